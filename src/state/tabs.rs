//! Tab Controller
//!
//! Mutually exclusive panels selected by buttons. A `TabSet` stores a single
//! active tab, so activating one deactivates every other panel and button
//! in the same step.

/// A tab identifier
pub trait Tab: Copy + Eq + 'static {
    /// Every tab, in button order
    const ALL: &'static [Self];

    /// DOM identifier stem (`<id>-tab` is the panel)
    fn id(&self) -> &'static str;

    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSet<T: Tab> {
    active: T,
}

impl<T: Tab> TabSet<T> {
    pub fn new(initial: T) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn activate(&mut self, tab: T) {
        self.active = tab;
    }

    pub fn is_active(&self, tab: T) -> bool {
        self.active == tab
    }

    pub fn panel_class(&self, tab: T) -> &'static str {
        if self.is_active(tab) {
            "tab-pane active"
        } else {
            "tab-pane"
        }
    }

    pub fn button_class(&self, tab: T) -> &'static str {
        if self.is_active(tab) {
            "tab-btn active"
        } else {
            "tab-btn"
        }
    }

    pub fn panel_id(tab: T) -> String {
        format!("{}-tab", tab.id())
    }
}

/// Dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardTab {
    Dataset,
    Eda,
    Training,
    Prediction,
    Comparison,
    Evaluation,
    History,
}

/// Data a tab fetches when it becomes active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Load {
    Dataset,
    EdaCharts,
    EvaluationCharts,
    History,
}

impl DashboardTab {
    /// Lazy load attached to this tab. Evaluation images only exist once
    /// models have been trained.
    pub fn lazy_load(&self, models_trained: bool) -> Option<Load> {
        match self {
            DashboardTab::Dataset => Some(Load::Dataset),
            DashboardTab::Eda => Some(Load::EdaCharts),
            DashboardTab::History => Some(Load::History),
            DashboardTab::Evaluation if models_trained => Some(Load::EvaluationCharts),
            _ => None,
        }
    }
}

impl Tab for DashboardTab {
    const ALL: &'static [Self] = &[
        DashboardTab::Dataset,
        DashboardTab::Eda,
        DashboardTab::Training,
        DashboardTab::Prediction,
        DashboardTab::Comparison,
        DashboardTab::Evaluation,
        DashboardTab::History,
    ];

    fn id(&self) -> &'static str {
        match self {
            DashboardTab::Dataset => "dataset",
            DashboardTab::Eda => "eda",
            DashboardTab::Training => "train",
            DashboardTab::Prediction => "predict",
            DashboardTab::Comparison => "comparison",
            DashboardTab::Evaluation => "evaluation",
            DashboardTab::History => "history",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DashboardTab::Dataset => "📊 Dataset",
            DashboardTab::Eda => "📈 EDA",
            DashboardTab::Training => "🤖 Train Models",
            DashboardTab::Prediction => "🌾 Predict",
            DashboardTab::Comparison => "⚖️ Comparison",
            DashboardTab::Evaluation => "🎯 Evaluation",
            DashboardTab::History => "📜 History",
        }
    }
}

/// Login page panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthTab {
    Login,
    Register,
}

impl Tab for AuthTab {
    const ALL: &'static [Self] = &[AuthTab::Login, AuthTab::Register];

    fn id(&self) -> &'static str {
        match self {
            AuthTab::Login => "login",
            AuthTab::Register => "register",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AuthTab::Login => "Login",
            AuthTab::Register => "Register",
        }
    }
}
