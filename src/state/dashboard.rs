//! Dashboard View State
//!
//! Everything the dashboard shows, owned by one value and mutated only by
//! the completion of a request. Every operation is split in two:
//!
//! - `begin_*` records the request, updates "in flight" UI and returns a
//!   [`Ticket`] plus the request body.
//! - `finish_*` takes the ticket back with the result. Responses whose
//!   ticket was superseded by a newer request of the same kind are dropped,
//!   so the last request issued wins rather than the last one to resolve.
//!
//! Some completions ask for a follow-up load (training → evaluation images,
//! save → history); the caller runs it like any other load.

use serde_json::json;
use std::collections::BTreeMap;

use crate::api::{
    ClientError, ClientResult, EdaCharts, Endpoint, EvaluationCharts, FailureKind, ModelResults,
    PredictRequest, PredictionForm, Predictions, Record, TrainRequest,
};
use crate::render::{to_fixed, BarChart, Canvas, Table};
use crate::state::sequence::{Operation, RequestSequencer, Ticket};
use crate::state::status::{Notice, StatusBox, StatusKind};
use crate::state::tabs::{DashboardTab, Load, TabSet};

pub const TRAINING_IN_PROGRESS: &str = "⏳ Training models... This may take a moment.";
pub const TRAINING_SUCCEEDED: &str = "✅ Models trained successfully!";
pub const TRAINING_NETWORK_ERROR: &str = "❌ Network error";
pub const TRAIN_FIRST: &str = "Please train models first!";
pub const PREDICTION_SAVED: &str = "✅ Prediction saved successfully!";
pub const SAVE_FAILED: &str = "Failed to save prediction";
pub const NO_PREDICTIONS: &str = "No predictions yet";

/// Default position of the test-size slider
pub const DEFAULT_TEST_SIZE_PERCENT: u8 = 20;

/// CSV files offered for download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Download {
    Dataset,
    Predictions,
}

impl Download {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Download::Dataset => Endpoint::DownloadDataset,
            Download::Predictions => Endpoint::DownloadPredictions,
        }
    }

    pub fn path(&self) -> &'static str {
        self.endpoint().path()
    }
}

impl Load {
    fn operation(&self) -> Operation {
        match self {
            Load::Dataset => Operation::Dataset,
            Load::EdaCharts => Operation::EdaCharts,
            Load::EvaluationCharts => Operation::EvaluationCharts,
            Load::History => Operation::History,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardView {
    tabs: TabSet<DashboardTab>,
    models_trained: bool,
    model_results: Option<ModelResults>,
    current_predictions: Option<Predictions>,
    last_form: Option<PredictionForm>,
    pending_form: Option<PredictionForm>,
    training_status: StatusBox,
    predict_warning_visible: bool,
    prediction_headline: Option<String>,
    save_enabled: bool,
    dataset_table: Option<Table>,
    eda_charts: Option<EdaCharts>,
    evaluation_table: Option<Table>,
    evaluation_images: Option<EvaluationCharts>,
    comparison_table: Option<Table>,
    history_table: Option<Table>,
    charts: BTreeMap<Canvas, BarChart>,
    notice: Option<Notice>,
    location: Option<String>,
    sequencer: RequestSequencer,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            tabs: TabSet::new(DashboardTab::Dataset),
            models_trained: false,
            model_results: None,
            current_predictions: None,
            last_form: None,
            pending_form: None,
            training_status: StatusBox::new(),
            predict_warning_visible: true,
            prediction_headline: None,
            save_enabled: false,
            dataset_table: None,
            eda_charts: None,
            evaluation_table: None,
            evaluation_images: None,
            comparison_table: None,
            history_table: None,
            charts: BTreeMap::new(),
            notice: None,
            location: None,
            sequencer: RequestSequencer::new(),
        }
    }

    // ============ Accessors ============

    pub fn tabs(&self) -> &TabSet<DashboardTab> {
        &self.tabs
    }

    pub fn models_trained(&self) -> bool {
        self.models_trained
    }

    pub fn model_results(&self) -> Option<&ModelResults> {
        self.model_results.as_ref()
    }

    pub fn current_predictions(&self) -> Option<&Predictions> {
        self.current_predictions.as_ref()
    }

    /// Form values behind the displayed prediction
    pub fn last_form(&self) -> Option<&PredictionForm> {
        self.last_form.as_ref()
    }

    pub fn training_status(&self) -> &StatusBox {
        &self.training_status
    }

    pub fn predict_warning_visible(&self) -> bool {
        self.predict_warning_visible
    }

    pub fn prediction_headline(&self) -> Option<&str> {
        self.prediction_headline.as_deref()
    }

    pub fn save_enabled(&self) -> bool {
        self.save_enabled
    }

    pub fn dataset_table(&self) -> Option<&Table> {
        self.dataset_table.as_ref()
    }

    pub fn eda_charts(&self) -> Option<&EdaCharts> {
        self.eda_charts.as_ref()
    }

    pub fn evaluation_table(&self) -> Option<&Table> {
        self.evaluation_table.as_ref()
    }

    pub fn evaluation_images(&self) -> Option<&EvaluationCharts> {
        self.evaluation_images.as_ref()
    }

    pub fn comparison_table(&self) -> Option<&Table> {
        self.comparison_table.as_ref()
    }

    pub fn history_table(&self) -> Option<&Table> {
        self.history_table.as_ref()
    }

    pub fn chart(&self, canvas: Canvas) -> Option<&BarChart> {
        self.charts.get(&canvas)
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_location(&mut self) -> Option<String> {
        self.location.take()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    // ============ Tabs ============

    /// Activate a tab and return the load it triggers, if any
    pub fn select_tab(&mut self, tab: DashboardTab) -> Option<Load> {
        self.tabs.activate(tab);
        tab.lazy_load(self.models_trained)
    }

    // ============ Loads ============

    pub fn begin_load(&mut self, load: Load) -> Ticket {
        self.sequencer.issue(load.operation())
    }

    pub fn finish_dataset(&mut self, ticket: Ticket, result: ClientResult<Vec<Record>>) {
        if !self.sequencer.accept(&ticket) {
            return;
        }
        match result {
            Ok(records) => self.dataset_table = Some(Table::from_records(&records)),
            Err(e) => tracing::warn!(error = %e, "Error loading dataset"),
        }
    }

    pub fn finish_eda_charts(&mut self, ticket: Ticket, result: ClientResult<EdaCharts>) {
        if !self.sequencer.accept(&ticket) {
            return;
        }
        match result {
            Ok(charts) => self.eda_charts = Some(charts),
            Err(e) => tracing::warn!(error = %e, "Error loading charts"),
        }
    }

    pub fn finish_evaluation_charts(
        &mut self,
        ticket: Ticket,
        result: ClientResult<EvaluationCharts>,
    ) {
        if !self.sequencer.accept(&ticket) {
            return;
        }
        match result {
            Ok(charts) => self.evaluation_images = Some(charts),
            Err(e) => tracing::warn!(error = %e, "Error loading actual vs predicted charts"),
        }
    }

    pub fn finish_history(&mut self, ticket: Ticket, result: ClientResult<Vec<Record>>) {
        if !self.sequencer.accept(&ticket) {
            return;
        }
        match result {
            Ok(records) => {
                self.history_table = Some(Table::from_records_or(&records, NO_PREDICTIONS));
            }
            Err(e) if e.kind() == FailureKind::Application => {
                self.history_table = Some(Table::Placeholder(NO_PREDICTIONS.to_string()));
            }
            Err(e) => tracing::warn!(error = %e, "Error loading history"),
        }
    }

    // ============ Training ============

    pub fn begin_training(&mut self, test_size_percent: u8) -> (Ticket, TrainRequest) {
        let ticket = self.sequencer.issue(Operation::Train);
        self.training_status
            .show(StatusKind::Loading, TRAINING_IN_PROGRESS);
        (ticket, TrainRequest::from_percent(test_size_percent))
    }

    /// Apply a training result. On success, asks for the evaluation images.
    pub fn finish_training(
        &mut self,
        ticket: Ticket,
        result: ClientResult<ModelResults>,
    ) -> Option<Load> {
        if !self.sequencer.accept(&ticket) {
            return None;
        }

        match result {
            Ok(results) => {
                tracing::info!(models = results.len(), "Models trained");
                self.models_trained = true;
                self.training_status
                    .show(StatusKind::Success, TRAINING_SUCCEEDED);
                self.predict_warning_visible = false;

                self.evaluation_table = Some(Table::from_records(&evaluation_records(&results)));
                self.charts.insert(Canvas::R2, BarChart::r2(&results));
                self.charts.insert(Canvas::Rmse, BarChart::rmse(&results));
                self.model_results = Some(results);

                Some(Load::EvaluationCharts)
            }
            Err(e) => {
                let text = match e.kind() {
                    FailureKind::Application => format!(
                        "❌ Training failed: {}",
                        e.server_message().unwrap_or("unknown error")
                    ),
                    FailureKind::Transport => TRAINING_NETWORK_ERROR.to_string(),
                };
                self.training_status.show(StatusKind::Error, text);
                None
            }
        }
    }

    // ============ Prediction ============

    /// Start a prediction. Refused while no models have been trained.
    pub fn begin_prediction(&mut self, form: PredictionForm) -> Option<(Ticket, PredictRequest)> {
        if !self.models_trained {
            self.notice = Some(Notice::error(TRAIN_FIRST));
            return None;
        }

        let ticket = self.sequencer.issue(Operation::Predict);
        self.pending_form = Some(form.clone());
        Some((ticket, PredictRequest { form, save: false }))
    }

    pub fn finish_prediction(&mut self, ticket: Ticket, result: ClientResult<Predictions>) {
        if !self.sequencer.accept(&ticket) {
            return;
        }

        let form = self.pending_form.take();
        match result {
            Ok(predictions) => {
                self.last_form = form;
                self.prediction_headline = Some(format!(
                    "🌾 Predicted Yield: {} tons",
                    to_fixed(predictions.average, 2)
                ));
                self.save_enabled = true;
                self.comparison_table =
                    Some(Table::from_records(&comparison_records(&predictions)));
                self.charts
                    .insert(Canvas::Comparison, BarChart::comparison(&predictions));
                self.current_predictions = Some(predictions);
            }
            Err(e) => {
                self.notice = Some(Notice::error(format!(
                    "Prediction failed: {}",
                    describe(&e)
                )));
            }
        }
    }

    /// Save the last prediction: same form values, `save` forced on.
    /// Nothing happens until a prediction has succeeded.
    pub fn begin_save(&mut self) -> Option<(Ticket, PredictRequest)> {
        self.current_predictions.as_ref()?;
        let form = self.last_form.clone()?;

        let ticket = self.sequencer.issue(Operation::Save);
        Some((ticket, PredictRequest { form, save: true }))
    }

    /// Apply a save result. On success, asks for the history to reload.
    pub fn finish_save(&mut self, ticket: Ticket, result: ClientResult<Predictions>) -> Option<Load> {
        if !self.sequencer.accept(&ticket) {
            return None;
        }

        match result {
            Ok(_) => {
                self.notice = Some(Notice::success(PREDICTION_SAVED));
                Some(Load::History)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saving prediction failed");
                self.notice = Some(Notice::error(SAVE_FAILED));
                None
            }
        }
    }

    // ============ Navigation ============

    /// The session is over; go back to the landing page
    pub fn logged_out(&mut self) {
        self.location = Some("/".to_string());
    }

    pub fn download(&mut self, download: Download) {
        self.location = Some(download.path().to_string());
    }
}

fn describe(error: &ClientError) -> String {
    match error {
        ClientError::Rejected { message } => message
            .clone()
            .unwrap_or_else(|| "unknown error".to_string()),
        other => other.to_string(),
    }
}

/// Evaluation table rows; metrics pre-formatted to three decimals
pub fn evaluation_records(results: &ModelResults) -> Vec<Record> {
    results
        .models
        .iter()
        .map(|(name, scores)| {
            record(json!({
                "Model": name,
                "R² Score": to_fixed(scores.r2, 3),
                "MAE": to_fixed(scores.mae, 3),
                "RMSE": to_fixed(scores.rmse, 3),
            }))
        })
        .collect()
}

/// Comparison table rows, one per model (the average is not a model)
pub fn comparison_records(predictions: &Predictions) -> Vec<Record> {
    predictions
        .by_model
        .iter()
        .map(|(name, value)| {
            record(json!({
                "Model": name,
                "Predicted Yield": to_fixed(*value, 3),
            }))
        })
        .collect()
}

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Record::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Crop, Scores};
    use serde_json::Value;

    fn results() -> ModelResults {
        ModelResults {
            models: vec![
                ("Linear Regression".into(), Scores { r2: 0.8812, mae: 0.81, rmse: 1.0149 }),
                ("XGBoost".into(), Scores { r2: 0.9123, mae: 0.7, rmse: 0.9 }),
            ],
        }
    }

    fn predictions(average: f64) -> Predictions {
        Predictions {
            by_model: vec![
                ("Linear Regression".into(), average - 0.5),
                ("XGBoost".into(), average + 0.5),
            ],
            average,
        }
    }

    fn trained_view() -> DashboardView {
        let mut view = DashboardView::new();
        let (ticket, _) = view.begin_training(20);
        view.finish_training(ticket, Ok(results()));
        view
    }

    #[test]
    fn test_initial_state() {
        let view = DashboardView::new();
        assert!(!view.models_trained());
        assert!(view.model_results().is_none());
        assert!(view.current_predictions().is_none());
        assert!(view.predict_warning_visible());
        assert!(!view.save_enabled());
        assert!(view.tabs().is_active(DashboardTab::Dataset));
    }

    #[test]
    fn test_select_tab_triggers_lazy_load() {
        let mut view = DashboardView::new();
        assert_eq!(view.select_tab(DashboardTab::History), Some(Load::History));
        assert!(view.tabs().is_active(DashboardTab::History));
        assert!(!view.tabs().is_active(DashboardTab::Dataset));

        assert_eq!(view.select_tab(DashboardTab::Evaluation), None);

        let mut view = trained_view();
        assert_eq!(
            view.select_tab(DashboardTab::Evaluation),
            Some(Load::EvaluationCharts)
        );
    }

    #[test]
    fn test_training_in_progress_status() {
        let mut view = DashboardView::new();
        let (_, request) = view.begin_training(25);

        assert_eq!(request.test_size, 0.25);
        assert_eq!(view.training_status().visible_text(), Some(TRAINING_IN_PROGRESS));
        assert_eq!(view.training_status().kind(), Some(StatusKind::Loading));
        assert!(!view.models_trained());
    }

    #[test]
    fn test_training_success() {
        let mut view = DashboardView::new();
        let (ticket, _) = view.begin_training(20);
        let follow_up = view.finish_training(ticket, Ok(results()));

        assert_eq!(follow_up, Some(Load::EvaluationCharts));
        assert!(view.models_trained());
        assert!(!view.predict_warning_visible());
        assert_eq!(view.training_status().visible_text(), Some(TRAINING_SUCCEEDED));
        assert_eq!(view.model_results(), Some(&results()));

        let table = view.evaluation_table().unwrap();
        assert_eq!(table.headers(), &["Model", "R² Score", "MAE", "RMSE"]);
        assert_eq!(table.rows()[0], vec!["Linear Regression", "0.881", "0.810", "1.015"]);

        assert_eq!(view.chart(Canvas::R2).unwrap().values, vec![0.8812, 0.9123]);
        assert_eq!(view.chart(Canvas::Rmse).unwrap().values, vec![1.0149, 0.9]);
    }

    #[test]
    fn test_training_failure_keeps_untrained() {
        let mut view = DashboardView::new();
        let (ticket, _) = view.begin_training(20);
        let follow_up =
            view.finish_training(ticket, Err(ClientError::rejected("Login required")));

        assert_eq!(follow_up, None);
        assert!(!view.models_trained());
        assert!(view.predict_warning_visible());
        assert_eq!(
            view.training_status().visible_text(),
            Some("❌ Training failed: Login required")
        );

        let (ticket, _) = view.begin_training(20);
        view.finish_training(ticket, Err(ClientError::Network("offline".into())));
        assert_eq!(view.training_status().visible_text(), Some(TRAINING_NETWORK_ERROR));
        assert_eq!(view.training_status().kind(), Some(StatusKind::Error));
    }

    #[test]
    fn test_superseded_training_response_discarded() {
        let mut view = DashboardView::new();
        let (first, _) = view.begin_training(20);
        let (second, _) = view.begin_training(30);

        // Second finishes first and fails; the late success of the first is stale
        view.finish_training(second, Err(ClientError::rejected("boom")));
        let follow_up = view.finish_training(first, Ok(results()));

        assert_eq!(follow_up, None);
        assert!(!view.models_trained());
        assert_eq!(
            view.training_status().visible_text(),
            Some("❌ Training failed: boom")
        );
    }

    #[test]
    fn test_prediction_refused_until_trained() {
        let mut view = DashboardView::new();
        assert!(view.begin_prediction(PredictionForm::default()).is_none());
        assert_eq!(view.take_notice(), Some(Notice::error(TRAIN_FIRST)));
        assert!(view.last_form().is_none());
    }

    #[test]
    fn test_prediction_success() {
        let mut view = trained_view();
        let (ticket, request) = view.begin_prediction(PredictionForm::default()).unwrap();
        assert!(!request.save);

        view.finish_prediction(ticket, Ok(predictions(7.5)));

        assert_eq!(view.prediction_headline(), Some("🌾 Predicted Yield: 7.50 tons"));
        assert!(view.save_enabled());
        assert_eq!(view.current_predictions(), Some(&predictions(7.5)));

        let table = view.comparison_table().unwrap();
        assert_eq!(table.headers(), &["Model", "Predicted Yield"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1], vec!["XGBoost", "8.000"]);
        assert_eq!(
            view.chart(Canvas::Comparison).unwrap().labels,
            vec!["Linear Regression", "XGBoost"]
        );
    }

    #[test]
    fn test_predictions_overwritten_not_merged() {
        let mut view = trained_view();
        let (ticket, _) = view.begin_prediction(PredictionForm::default()).unwrap();
        view.finish_prediction(ticket, Ok(predictions(7.5)));

        let single = Predictions {
            by_model: vec![("CatBoost".into(), 6.0)],
            average: 6.0,
        };
        let (ticket, _) = view.begin_prediction(PredictionForm::default()).unwrap();
        view.finish_prediction(ticket, Ok(single.clone()));

        assert_eq!(view.current_predictions(), Some(&single));
        assert_eq!(view.chart(Canvas::Comparison).unwrap().labels, vec!["CatBoost"]);
    }

    #[test]
    fn test_prediction_failure_posts_notice() {
        let mut view = trained_view();
        let (ticket, _) = view.begin_prediction(PredictionForm::default()).unwrap();
        view.finish_prediction(ticket, Err(ClientError::rejected("Models not trained yet")));

        assert!(view.current_predictions().is_none());
        assert!(!view.save_enabled());
        assert_eq!(
            view.take_notice(),
            Some(Notice::error("Prediction failed: Models not trained yet"))
        );
    }

    #[test]
    fn test_save_reuses_last_submitted_form() {
        let mut view = trained_view();
        let submitted = PredictionForm {
            farm_area: 40.0,
            crop: Crop::Cotton,
            ..PredictionForm::default()
        };
        let (ticket, request) = view.begin_prediction(submitted.clone()).unwrap();
        assert!(!request.save);
        view.finish_prediction(ticket, Ok(predictions(7.5)));

        let (_, save) = view.begin_save().unwrap();
        assert!(save.save);
        assert_eq!(save.form, submitted);
    }

    #[test]
    fn test_save_uses_form_behind_displayed_prediction() {
        let mut view = trained_view();
        let shown = PredictionForm {
            farm_area: 40.0,
            ..PredictionForm::default()
        };
        let (ticket, _) = view.begin_prediction(shown.clone()).unwrap();
        view.finish_prediction(ticket, Ok(predictions(7.5)));

        // A newer prediction still in flight does not change what gets saved
        let rice = PredictionForm {
            crop: Crop::Rice,
            ..PredictionForm::default()
        };
        let (pending, _) = view.begin_prediction(rice.clone()).unwrap();
        assert_eq!(view.begin_save().unwrap().1.form, shown);

        // Nor does one that fails
        view.finish_prediction(pending, Err(ClientError::rejected("bad input")));
        assert_eq!(view.begin_save().unwrap().1.form, shown);
        assert_eq!(view.last_form(), Some(&shown));
    }

    #[test]
    fn test_stale_prediction_discarded() {
        let mut view = trained_view();
        let (old, _) = view.begin_prediction(PredictionForm::default()).unwrap();
        let (new, _) = view.begin_prediction(PredictionForm::default()).unwrap();

        view.finish_prediction(new, Ok(predictions(7.5)));
        view.finish_prediction(old, Ok(predictions(3.0)));
        assert_eq!(view.current_predictions(), Some(&predictions(7.5)));
        assert_eq!(view.prediction_headline(), Some("🌾 Predicted Yield: 7.50 tons"));

        view.finish_prediction(old, Err(ClientError::Network("offline".into())));
        assert!(view.take_notice().is_none());
        assert_eq!(view.current_predictions(), Some(&predictions(7.5)));
    }

    #[test]
    fn test_stale_save_discarded() {
        let mut view = trained_view();
        let (ticket, _) = view.begin_prediction(PredictionForm::default()).unwrap();
        view.finish_prediction(ticket, Ok(predictions(7.5)));

        let (old, _) = view.begin_save().unwrap();
        let (new, _) = view.begin_save().unwrap();

        assert_eq!(view.finish_save(new, Ok(predictions(7.5))), Some(Load::History));
        assert_eq!(view.take_notice(), Some(Notice::success(PREDICTION_SAVED)));

        assert_eq!(view.finish_save(old, Ok(predictions(7.5))), None);
        assert!(view.take_notice().is_none());
    }

    #[test]
    fn test_headline_rounds_ties_up() {
        let mut view = trained_view();
        let (ticket, _) = view.begin_prediction(PredictionForm::default()).unwrap();
        view.finish_prediction(ticket, Ok(predictions(12.625)));

        assert_eq!(view.prediction_headline(), Some("🌾 Predicted Yield: 12.63 tons"));
        let table = view.comparison_table().unwrap();
        assert_eq!(table.rows()[0], vec!["Linear Regression", "12.125"]);

        let tied = ModelResults {
            models: vec![("Ridge".into(), Scores { r2: 0.0625, mae: 0.5, rmse: -0.0 })],
        };
        let rows = evaluation_records(&tied);
        assert_eq!(rows[0]["R² Score"], "0.063");
        assert_eq!(rows[0]["RMSE"], "0.000");
    }

    #[test]
    fn test_save_requires_prediction() {
        let mut view = trained_view();
        assert!(view.begin_save().is_none());

        let (ticket, _) = view.begin_prediction(PredictionForm::default()).unwrap();
        view.finish_prediction(ticket, Err(ClientError::Network("offline".into())));
        assert!(view.begin_save().is_none());
    }

    #[test]
    fn test_save_success_reloads_history() {
        let mut view = trained_view();
        let (ticket, _) = view.begin_prediction(PredictionForm::default()).unwrap();
        view.finish_prediction(ticket, Ok(predictions(7.5)));

        let (ticket, _) = view.begin_save().unwrap();
        assert_eq!(view.finish_save(ticket, Ok(predictions(7.5))), Some(Load::History));
        assert_eq!(view.take_notice(), Some(Notice::success(PREDICTION_SAVED)));

        let (ticket, _) = view.begin_save().unwrap();
        assert_eq!(
            view.finish_save(ticket, Err(ClientError::Network("offline".into()))),
            None
        );
        assert_eq!(view.take_notice(), Some(Notice::error(SAVE_FAILED)));
    }

    #[test]
    fn test_history_placeholder() {
        let mut view = DashboardView::new();
        let ticket = view.begin_load(Load::History);
        view.finish_history(ticket, Ok(Vec::new()));
        assert_eq!(
            view.history_table().and_then(Table::placeholder),
            Some(NO_PREDICTIONS)
        );

        let ticket = view.begin_load(Load::History);
        view.finish_history(ticket, Err(ClientError::rejected("Login required")));
        assert_eq!(
            view.history_table().and_then(Table::placeholder),
            Some(NO_PREDICTIONS)
        );
    }

    #[test]
    fn test_failed_loads_leave_state() {
        let mut view = DashboardView::new();
        let ticket = view.begin_load(Load::Dataset);
        view.finish_dataset(ticket, Err(ClientError::Network("offline".into())));
        assert!(view.dataset_table().is_none());

        let ticket = view.begin_load(Load::EdaCharts);
        view.finish_eda_charts(ticket, Err(ClientError::rejected("Login required")));
        assert!(view.eda_charts().is_none());
    }

    #[test]
    fn test_stale_dataset_discarded() {
        let mut view = DashboardView::new();
        let old = view.begin_load(Load::Dataset);
        let new = view.begin_load(Load::Dataset);

        let mut row = Record::new();
        row.insert("Yield".into(), Value::from(9.0));
        view.finish_dataset(new, Ok(vec![row]));
        view.finish_dataset(old, Ok(Vec::new()));

        assert_eq!(view.dataset_table().unwrap().rows()[0], vec!["9.00"]);
    }

    #[test]
    fn test_navigation() {
        let mut view = DashboardView::new();
        view.download(Download::Predictions);
        assert_eq!(view.take_location().as_deref(), Some("/download-predictions"));

        view.logged_out();
        assert_eq!(view.location(), Some("/"));
    }
}
