//! Dashboard Page
//!
//! Tabbed dashboard: dataset, exploratory charts, training, prediction,
//! comparison, evaluation and history. Tabs fetch their data when they are
//! opened; the dataset loads on mount.

use leptos::*;

use cropyield::api::{Crop, Irrigation, PredictionForm, Season, Soil};
use cropyield::render::Canvas;
use cropyield::state::{Download, Tab, TabSet, DEFAULT_TEST_SIZE_PERCENT};
use cropyield::{DashboardTab, Table};

use crate::components::{BarChartCanvas, ChartSlots, RecordTable, StatusMessage, TabButtons};
use crate::state::global::use_app_state;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_app_state();
    let dashboard = state.dashboard;
    ChartSlots::provide();

    let tabs = Signal::derive(move || dashboard.with(|view| *view.tabs()));

    // Initial tab content
    state.load(cropyield::Load::Dataset);

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"🌾 Crop Yield Dashboard"</h1>
                <button class="btn btn-logout" on:click=move |_| state.logout()>"Logout"</button>
            </header>

            <TabButtons tabs=tabs on_select=move |tab| state.select_tab(tab) />

            <TabPanel tab=DashboardTab::Dataset tabs=tabs>
                <DatasetPanel />
            </TabPanel>
            <TabPanel tab=DashboardTab::Eda tabs=tabs>
                <EdaPanel />
            </TabPanel>
            <TabPanel tab=DashboardTab::Training tabs=tabs>
                <TrainingPanel />
            </TabPanel>
            <TabPanel tab=DashboardTab::Prediction tabs=tabs>
                <PredictionPanel />
            </TabPanel>
            <TabPanel tab=DashboardTab::Comparison tabs=tabs>
                <ComparisonPanel />
            </TabPanel>
            <TabPanel tab=DashboardTab::Evaluation tabs=tabs>
                <EvaluationPanel />
            </TabPanel>
            <TabPanel tab=DashboardTab::History tabs=tabs>
                <HistoryPanel />
            </TabPanel>
        </div>
    }
}

#[component]
fn TabPanel(
    tab: DashboardTab,
    #[prop(into)] tabs: Signal<TabSet<DashboardTab>>,
    children: Children,
) -> impl IntoView {
    view! {
        <section id=TabSet::panel_id(tab) class=move || tabs.with(|t| t.panel_class(tab))>
            <h2>{tab.label()}</h2>
            {children()}
        </section>
    }
}

/// Table projection of the dashboard view
fn table_signal(select: fn(&cropyield::DashboardView) -> Option<&Table>) -> Signal<Option<Table>> {
    let dashboard = use_app_state().dashboard;
    Signal::derive(move || dashboard.with(|view| select(view).cloned()))
}

#[component]
fn DatasetPanel() -> impl IntoView {
    let state = use_app_state();

    view! {
        <button class="btn" on:click=move |_| state.download(Download::Dataset)>
            "⬇️ Download Dataset"
        </button>
        <div id="dataset-table" class="table-container">
            <RecordTable table=table_signal(|view| view.dataset_table()) />
        </div>
    }
}

#[component]
fn EdaPanel() -> impl IntoView {
    let dashboard = use_app_state().dashboard;

    view! {
        <div id="eda-charts" class="chart-grid">
            {move || {
                dashboard.with(|view| {
                    view.eda_charts().map(|charts| {
                        charts
                            .images()
                            .into_iter()
                            .map(|(src, alt)| view! { <img src=src.to_string() alt=alt /> })
                            .collect_view()
                    })
                })
            }}
        </div>
    }
}

#[component]
fn TrainingPanel() -> impl IntoView {
    let state = use_app_state();
    let dashboard = state.dashboard;
    let test_size = create_rw_signal(f64::from(DEFAULT_TEST_SIZE_PERCENT));
    let status = Signal::derive(move || dashboard.with(|view| view.training_status().clone()));

    view! {
        <RangeField id="test-size" label="Test Size" min=10.0 max=50.0 step=5.0 value=test_size suffix="%" />
        <button
            class="btn btn-primary"
            on:click=move |_| state.train(test_size.get_untracked().round() as u8)
        >
            "🚀 Train Models"
        </button>
        <StatusMessage status=status id="training-status" base_class="status-box" />
    }
}

#[component]
fn PredictionPanel() -> impl IntoView {
    let state = use_app_state();
    let dashboard = state.dashboard;

    let defaults = PredictionForm::default();
    let farm_area = create_rw_signal(defaults.farm_area);
    let fertilizer = create_rw_signal(defaults.fertilizer);
    let pesticide = create_rw_signal(defaults.pesticide);
    let water = create_rw_signal(defaults.water);
    let crop = create_rw_signal(defaults.crop);
    let irrigation = create_rw_signal(defaults.irrigation);
    let soil = create_rw_signal(defaults.soil);
    let season = create_rw_signal(defaults.season);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.predict(PredictionForm {
            farm_area: farm_area.get_untracked(),
            fertilizer: fertilizer.get_untracked(),
            pesticide: pesticide.get_untracked(),
            water: water.get_untracked(),
            crop: crop.get_untracked(),
            irrigation: irrigation.get_untracked(),
            soil: soil.get_untracked(),
            season: season.get_untracked(),
        });
    };

    view! {
        <div
            id="predict-warning"
            class="warning"
            style=move || if dashboard.with(|view| view.predict_warning_visible()) { "" } else { "display: none" }
        >
            "⚠️ Train the models first (Train Models tab)."
        </div>

        <form id="predict-form" on:submit=on_submit>
            <RangeField id="farm-area" label="Farm Area (acres)" min=1.0 max=100.0 step=1.0 value=farm_area />
            <RangeField id="fertilizer" label="Fertilizer Used (kg)" min=0.0 max=500.0 step=10.0 value=fertilizer />
            <RangeField id="pesticide" label="Pesticide Used (kg)" min=0.0 max=50.0 step=1.0 value=pesticide />
            <RangeField id="water" label="Water Usage (cubic meters)" min=1000.0 max=10000.0 step=100.0 value=water />

            <ChoiceField id="crop" label="Crop Type" choices=Crop::ALL value=crop />
            <ChoiceField id="irrigation" label="Irrigation Type" choices=Irrigation::ALL value=irrigation />
            <ChoiceField id="soil" label="Soil Type" choices=Soil::ALL value=soil />
            <ChoiceField id="season" label="Season" choices=Season::ALL value=season />

            <button type="submit" class="btn btn-primary">"🔮 Predict Yield"</button>
        </form>

        <div id="prediction-result" class="prediction-result">
            {move || dashboard.with(|view| view.prediction_headline().map(str::to_string))}
        </div>

        <button
            id="save-btn"
            class="btn"
            disabled=move || !dashboard.with(|view| view.save_enabled())
            on:click=move |_| state.save_prediction()
        >
            "💾 Save Prediction"
        </button>
    }
}

#[component]
fn ComparisonPanel() -> impl IntoView {
    view! {
        <div id="comparison-content" class="table-container">
            <RecordTable table=table_signal(|view| view.comparison_table()) />
        </div>
        <BarChartCanvas canvas=Canvas::Comparison />
    }
}

#[component]
fn EvaluationPanel() -> impl IntoView {
    let dashboard = use_app_state().dashboard;

    view! {
        <div id="eval-table" class="table-container">
            <RecordTable table=table_signal(|view| view.evaluation_table()) />
        </div>
        <div class="chart-grid">
            <BarChartCanvas canvas=Canvas::R2 />
            <BarChartCanvas canvas=Canvas::Rmse />
        </div>
        <div id="actual-vs-predicted-charts" class="chart-grid">
            {move || {
                dashboard.with(|view| {
                    view.evaluation_images().map(|images| {
                        images
                            .charts
                            .iter()
                            .map(|(model, src)| view! {
                                <div class="chart-card">
                                    <h4>{model.clone()}</h4>
                                    <img src=src.clone() alt=model.clone() />
                                </div>
                            })
                            .collect_view()
                    })
                })
            }}
        </div>
    }
}

#[component]
fn HistoryPanel() -> impl IntoView {
    let state = use_app_state();

    view! {
        <button class="btn" on:click=move |_| state.download(Download::Predictions)>
            "⬇️ Download Predictions"
        </button>
        <div id="history-table" class="table-container">
            <RecordTable table=table_signal(|view| view.history_table()) />
        </div>
    }
}

/// Range slider with its current value shown next to the label
#[component]
fn RangeField(
    id: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    step: f64,
    value: RwSignal<f64>,
    #[prop(default = "")] suffix: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>
                {label} ": "
                <span id=format!("{}-value", id)>{move || format!("{}{}", value.get(), suffix)}</span>
            </label>
            <input
                id=id
                type="range"
                min=min
                max=max
                step=step
                prop:value=move || value.get().to_string()
                on:input=move |ev| {
                    if let Ok(parsed) = event_target_value(&ev).parse::<f64>() {
                        value.set(parsed);
                    }
                }
            />
        </div>
    }
}

/// Select over a fixed set of choices
#[component]
fn ChoiceField<C>(
    id: &'static str,
    label: &'static str,
    choices: &'static [C],
    value: RwSignal<C>,
) -> impl IntoView
where
    C: Copy + PartialEq + std::fmt::Display + std::str::FromStr + 'static,
{
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=id
                on:change=move |ev| {
                    if let Ok(choice) = event_target_value(&ev).parse::<C>() {
                        value.set(choice);
                    }
                }
            >
                {choices
                    .iter()
                    .map(|choice| {
                        let choice = *choice;
                        view! {
                            <option value=choice.to_string() selected=move || value.get() == choice>
                                {choice.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

