//! Bar Charts
//!
//! Chart specs plus a registry that keeps at most one live chart instance
//! per canvas: rendering on a canvas disposes whatever was drawn there
//! before drawing the replacement.

use std::collections::HashMap;

use crate::api::{ModelResults, Predictions};
use crate::render::table::to_fixed;

/// Canvases the dashboard draws on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Canvas {
    R2,
    Rmse,
    Comparison,
}

impl Canvas {
    pub const ALL: [Canvas; 3] = [Canvas::R2, Canvas::Rmse, Canvas::Comparison];

    pub fn id(&self) -> &'static str {
        match self {
            Canvas::R2 => "r2-chart",
            Canvas::Rmse => "rmse-chart",
            Canvas::Comparison => "comparison-chart",
        }
    }
}

/// A single-series bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub fill: &'static str,
    pub border: &'static str,
}

impl BarChart {
    pub fn r2(results: &ModelResults) -> Self {
        Self {
            title: "R² Score Comparison".to_string(),
            label: "R² Score".to_string(),
            labels: results.names(),
            values: results.models.iter().map(|(_, s)| s.r2).collect(),
            fill: "rgba(16, 185, 129, 0.6)",
            border: "rgba(16, 185, 129, 1)",
        }
    }

    pub fn rmse(results: &ModelResults) -> Self {
        Self {
            title: "RMSE Comparison".to_string(),
            label: "RMSE".to_string(),
            labels: results.names(),
            values: results.models.iter().map(|(_, s)| s.rmse).collect(),
            fill: "rgba(239, 68, 68, 0.6)",
            border: "rgba(239, 68, 68, 1)",
        }
    }

    /// Per-model predictions; the average is not a model and is left out
    pub fn comparison(predictions: &Predictions) -> Self {
        Self {
            title: "Model-wise Prediction Comparison".to_string(),
            label: "Predicted Yield".to_string(),
            labels: predictions.by_model.iter().map(|(m, _)| m.clone()).collect(),
            values: predictions.by_model.iter().map(|(_, v)| *v).collect(),
            fill: "rgba(59, 130, 246, 0.6)",
            border: "rgba(59, 130, 246, 1)",
        }
    }

    /// Largest value, floored at zero
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// A drawn chart bound to a canvas
pub trait ChartInstance {
    /// Release the chart and whatever it holds on its canvas
    fn destroy(self);
}

/// Something that can draw bar charts onto named canvases
pub trait ChartSurface {
    type Instance: ChartInstance;

    fn draw(&mut self, canvas: Canvas, chart: &BarChart) -> Self::Instance;
}

/// Live chart instances, at most one per canvas
pub struct ChartRegistry<I: ChartInstance> {
    live: HashMap<Canvas, I>,
}

impl<I: ChartInstance> Default for ChartRegistry<I> {
    fn default() -> Self {
        Self {
            live: HashMap::new(),
        }
    }
}

impl<I: ChartInstance> ChartRegistry<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose the chart currently on `canvas`, then draw `chart` there
    pub fn render<S>(&mut self, surface: &mut S, canvas: Canvas, chart: &BarChart)
    where
        S: ChartSurface<Instance = I>,
    {
        self.dispose(canvas);
        let instance = surface.draw(canvas, chart);
        self.live.insert(canvas, instance);
    }

    pub fn dispose(&mut self, canvas: Canvas) {
        if let Some(previous) = self.live.remove(&canvas) {
            tracing::trace!(canvas = canvas.id(), "Destroying chart");
            previous.destroy();
        }
    }

    pub fn is_live(&self, canvas: Canvas) -> bool {
        self.live.contains_key(&canvas)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// Draws charts as text bars, for terminals
#[derive(Debug, Clone)]
pub struct TextSurface {
    width: usize,
    output: Vec<String>,
}

/// A chart drawn by `TextSurface`
#[derive(Debug, Clone)]
pub struct TextChart {
    pub canvas: Canvas,
}

impl ChartInstance for TextChart {
    fn destroy(self) {}
}

impl TextSurface {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            output: Vec::new(),
        }
    }

    /// Everything drawn since the last call
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl ChartSurface for TextSurface {
    type Instance = TextChart;

    fn draw(&mut self, canvas: Canvas, chart: &BarChart) -> TextChart {
        self.output.push(render_text(chart, self.width));
        TextChart { canvas }
    }
}

/// Render a bar chart as lines of text, one bar per label
pub fn render_text(chart: &BarChart, width: usize) -> String {
    let label_width = chart
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart.max_value();

    let mut out = format!("{}\n", chart.title);
    for (label, value) in chart.labels.iter().zip(&chart.values) {
        let filled = if max > 0.0 {
            ((value.max(0.0) / max) * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<lw$} │{} {}\n",
            label,
            "█".repeat(filled),
            to_fixed(*value, 3),
            lw = label_width
        ));
    }
    out
}
