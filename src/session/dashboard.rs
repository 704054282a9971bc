//! Dashboard session driver.

use crate::api::{self, Backend, PredictionForm};
use crate::state::{DashboardTab, DashboardView, Load};

pub struct DashboardSession<B: Backend> {
    backend: B,
    view: DashboardView,
}

impl<B: Backend> DashboardSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            view: DashboardView::new(),
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut DashboardView {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Activate a tab and run its lazy load
    pub async fn select_tab(&mut self, tab: DashboardTab) {
        if let Some(load) = self.view.select_tab(tab) {
            self.load(load).await;
        }
    }

    pub async fn load(&mut self, load: Load) {
        let ticket = self.view.begin_load(load);
        match load {
            Load::Dataset => {
                let result = api::get_dataset(&self.backend).await;
                self.view.finish_dataset(ticket, result);
            }
            Load::EdaCharts => {
                let result = api::get_charts(&self.backend).await;
                self.view.finish_eda_charts(ticket, result);
            }
            Load::EvaluationCharts => {
                let result = api::get_evaluation_charts(&self.backend).await;
                self.view.finish_evaluation_charts(ticket, result);
            }
            Load::History => {
                let result = api::get_predictions(&self.backend).await;
                self.view.finish_history(ticket, result);
            }
        }
    }

    /// Train every model, holding out `test_size_percent` of the dataset
    pub async fn train_models(&mut self, test_size_percent: u8) -> bool {
        let (ticket, request) = self.view.begin_training(test_size_percent);
        let result = api::train_models(&self.backend, &request).await;

        if let Some(follow_up) = self.view.finish_training(ticket, result) {
            self.load(follow_up).await;
        }
        self.view.models_trained()
    }

    /// Predict without saving. Returns false if the request was refused
    /// locally or failed.
    pub async fn submit_prediction(&mut self, form: PredictionForm) -> bool {
        let Some((ticket, request)) = self.view.begin_prediction(form) else {
            return false;
        };

        let result = api::predict(&self.backend, &request).await;
        let succeeded = result.is_ok();
        self.view.finish_prediction(ticket, result);
        succeeded
    }

    /// Save the last prediction and refresh the history
    pub async fn save_prediction(&mut self) -> bool {
        let Some((ticket, request)) = self.view.begin_save() else {
            return false;
        };

        let result = api::predict(&self.backend, &request).await;
        match self.view.finish_save(ticket, result) {
            Some(follow_up) => {
                self.load(follow_up).await;
                true
            }
            None => false,
        }
    }

    pub async fn logout(&mut self) {
        if let Err(e) = api::logout(&self.backend).await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        self.view.logged_out();
    }
}
