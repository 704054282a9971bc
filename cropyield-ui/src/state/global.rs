//! Global Application State
//!
//! The auth and dashboard views live in signals. Every request follows the
//! same shape: `begin_*` inside an update, the call on `spawn_local`, then
//! `finish_*` inside another update. Tickets from the view decide whether a
//! late response still applies.

use leptos::*;

use cropyield::api::{self, PredictionForm};
use cropyield::state::{AuthAction, Deferred, Download, Load, RegistrationStep};
use cropyield::{AuthView, DashboardTab, DashboardView};

use crate::api::GlooBackend;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct AppState {
    pub backend: StoredValue<GlooBackend>,
    pub auth: RwSignal<AuthView>,
    pub dashboard: RwSignal<DashboardView>,
}

/// Provide global state to the component tree
pub fn provide_app_state() {
    let state = AppState {
        backend: store_value(GlooBackend::default()),
        auth: create_rw_signal(AuthView::default()),
        dashboard: create_rw_signal(DashboardView::new()),
    };

    provide_context(state);
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

/// Follow a pending navigation with a full page load
fn navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(path).is_err() {
            log_error(&format!("Navigation to {} failed", path));
        }
    }
}

fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

impl AppState {
    fn backend(&self) -> GlooBackend {
        self.backend.get_value()
    }

    // ============ Auth ============

    pub fn login(&self, username: String, password: String) {
        let auth = self.auth;
        let backend = self.backend();
        let credentials = auth.with_untracked(|view| view.begin_login(&username, &password));

        spawn_local(async move {
            let result = api::login(&backend, &credentials).await;
            let actions = auth.try_update(|view| view.finish_login(result)).unwrap_or_default();
            schedule_auth(auth, actions);
        });
    }

    pub fn register(&self) {
        let auth = self.auth;
        let backend = self.backend();

        match auth.try_update(|view| view.begin_registration()) {
            Some(RegistrationStep::Send(registration)) => {
                spawn_local(async move {
                    let result = api::register(&backend, &registration).await;
                    let actions = auth
                        .try_update(|view| view.finish_registration(result))
                        .unwrap_or_default();
                    schedule_auth(auth, actions);
                });
            }
            Some(RegistrationStep::Rejected(actions)) => schedule_auth(auth, actions),
            None => {}
        }
    }

    // ============ Dashboard ============

    pub fn select_tab(&self, tab: DashboardTab) {
        if let Some(load) = self.dashboard.try_update(|view| view.select_tab(tab)).flatten() {
            self.load(load);
        }
    }

    pub fn load(&self, load: Load) {
        let dashboard = self.dashboard;
        let backend = self.backend();
        let Some(ticket) = dashboard.try_update(|view| view.begin_load(load)) else {
            return;
        };

        spawn_local(async move {
            match load {
                Load::Dataset => {
                    let result = api::get_dataset(&backend).await;
                    dashboard.update(|view| view.finish_dataset(ticket, result));
                }
                Load::EdaCharts => {
                    let result = api::get_charts(&backend).await;
                    dashboard.update(|view| view.finish_eda_charts(ticket, result));
                }
                Load::EvaluationCharts => {
                    let result = api::get_evaluation_charts(&backend).await;
                    dashboard.update(|view| view.finish_evaluation_charts(ticket, result));
                }
                Load::History => {
                    let result = api::get_predictions(&backend).await;
                    dashboard.update(|view| view.finish_history(ticket, result));
                }
            }
        });
    }

    pub fn train(&self, test_size_percent: u8) {
        let state = *self;
        let backend = self.backend();
        let Some((ticket, request)) = self
            .dashboard
            .try_update(|view| view.begin_training(test_size_percent))
        else {
            return;
        };

        spawn_local(async move {
            let result = api::train_models(&backend, &request).await;
            let follow_up = state
                .dashboard
                .try_update(|view| view.finish_training(ticket, result))
                .flatten();
            if let Some(load) = follow_up {
                state.load(load);
            }
        });
    }

    pub fn predict(&self, form: PredictionForm) {
        let dashboard = self.dashboard;
        let backend = self.backend();
        let started = dashboard.try_update(|view| view.begin_prediction(form)).flatten();
        let Some((ticket, request)) = started else {
            self.flush_notice();
            return;
        };

        let state = *self;
        spawn_local(async move {
            let result = api::predict(&backend, &request).await;
            dashboard.update(|view| view.finish_prediction(ticket, result));
            state.flush_notice();
        });
    }

    pub fn save_prediction(&self) {
        let backend = self.backend();
        let Some((ticket, request)) = self.dashboard.try_update(|view| view.begin_save()).flatten()
        else {
            return;
        };

        let state = *self;
        spawn_local(async move {
            let result = api::predict(&backend, &request).await;
            let follow_up = state
                .dashboard
                .try_update(|view| view.finish_save(ticket, result))
                .flatten();
            state.flush_notice();
            if let Some(load) = follow_up {
                state.load(load);
            }
        });
    }

    pub fn logout(&self) {
        let dashboard = self.dashboard;
        let backend = self.backend();

        spawn_local(async move {
            if let Err(e) = api::logout(&backend).await {
                log_error(&format!("Logout failed: {}", e));
            }
            dashboard.update(|view| view.logged_out());
            follow_location(dashboard.try_update(|view| view.take_location()).flatten());
        });
    }

    pub fn download(&self, download: Download) {
        self.dashboard.update(|view| view.download(download));
        if let Some(path) = self.dashboard.try_update(|view| view.take_location()).flatten() {
            navigate(&self.backend.with_value(|backend| backend.resolve(&path)));
        }
    }

    /// Show the pending one-shot notice, if any
    fn flush_notice(&self) {
        if let Some(notice) = self.dashboard.try_update(|view| view.take_notice()).flatten() {
            alert(&notice.text);
        }
    }
}

fn follow_location(location: Option<String>) {
    if let Some(path) = location {
        navigate(&path);
    }
}

/// Run deferred auth actions on browser timers
fn schedule_auth(auth: RwSignal<AuthView>, actions: Vec<Deferred<AuthAction>>) {
    for Deferred { delay, action } in actions {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, move || {
            auth.update(|view| view.apply(action));
            follow_location(auth.try_update(|view| view.take_location()).flatten());
        })
        .forget();
    }
}
