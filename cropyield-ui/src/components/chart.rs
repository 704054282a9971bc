//! Chart Component
//!
//! Bar charts drawn on HTML5 canvases. A registry shared by the dashboard
//! keeps one live chart per canvas; a redraw clears the previous chart
//! before painting the new one.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use cropyield::render::{to_fixed, BarChart, Canvas, ChartInstance, ChartRegistry, ChartSurface};

use crate::state::global::use_app_state;

const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// A chart painted on a canvas element
pub struct CanvasChart {
    element: HtmlCanvasElement,
}

impl ChartInstance for CanvasChart {
    fn destroy(self) {
        if let Some(ctx) = context_2d(&self.element) {
            ctx.clear_rect(
                0.0,
                0.0,
                self.element.width() as f64,
                self.element.height() as f64,
            );
        }
    }
}

/// Draws onto one mounted canvas element
struct CanvasSurface {
    element: HtmlCanvasElement,
}

impl ChartSurface for CanvasSurface {
    type Instance = CanvasChart;

    fn draw(&mut self, _canvas: Canvas, chart: &BarChart) -> CanvasChart {
        if let Some(ctx) = context_2d(&self.element) {
            draw_bar_chart(&ctx, &self.element, chart);
        }
        CanvasChart {
            element: self.element.clone(),
        }
    }
}

/// Chart registry shared by every canvas on the page
#[derive(Clone, Copy)]
pub struct ChartSlots {
    registry: StoredValue<ChartRegistry<CanvasChart>>,
}

impl ChartSlots {
    pub fn provide() {
        provide_context(Self {
            registry: store_value(ChartRegistry::new()),
        });
    }
}

/// Canvas for one of the dashboard's bar charts
#[component]
pub fn BarChartCanvas(canvas: Canvas) -> impl IntoView {
    let state = use_app_state();
    let slots = expect_context::<ChartSlots>();
    let canvas_ref = create_node_ref::<html::Canvas>();

    let spec = create_memo(move |_| state.dashboard.with(|view| view.chart(canvas).cloned()));

    // Redraw when the chart changes or the canvas mounts
    create_effect(move |_| {
        let spec = spec.get();
        let Some(element) = canvas_ref.get() else {
            return;
        };
        match spec {
            Some(chart) => {
                let mut surface = CanvasSurface {
                    element: (*element).clone(),
                };
                slots
                    .registry
                    .update_value(|registry| registry.render(&mut surface, canvas, &chart));
            }
            None => slots.registry.update_value(|registry| registry.dispose(canvas)),
        }
    });

    view! {
        <div class="chart-container">
            <canvas node_ref=canvas_ref id=canvas.id() width="600" height="360" />
        </div>
    }
}

fn context_2d(element: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    element
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Position of one bar inside the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
struct BarRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Lay out `values` as bars in a `width` x `height` plot area whose
/// y axis starts at zero
fn bar_layout(values: &[f64], max: f64, width: f64, height: f64) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }
    let slot = width / values.len() as f64;
    let scale = if max > 0.0 { height / max } else { 0.0 };

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let bar_height = value.max(0.0) * scale;
            BarRect {
                x: i as f64 * slot + slot * 0.15,
                y: height - bar_height,
                width: slot * 0.7,
                height: bar_height,
            }
        })
        .collect()
}

fn draw_bar_chart(ctx: &CanvasRenderingContext2d, element: &HtmlCanvasElement, chart: &BarChart) {
    let width = element.width() as f64;
    let height = element.height() as f64;
    let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    let max = chart.max_value();

    ctx.clear_rect(0.0, 0.0, width, height);

    // Title
    ctx.set_fill_style(&"#1f2937".into());
    ctx.set_font("bold 16px sans-serif");
    let _ = ctx.fill_text(&chart.title, MARGIN_LEFT, 24.0);

    // Axes and gridlines (5 steps from zero)
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let y = MARGIN_TOP + (i as f64 / 5.0) * plot_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = max - (i as f64 / 5.0) * max;
        ctx.set_fill_style(&"#6b7280".into());
        let _ = ctx.fill_text(&to_fixed(value, 2), 5.0, y + 4.0);
    }

    let bars = bar_layout(&chart.values, max, plot_width, plot_height);
    for (bar, label) in bars.iter().zip(&chart.labels) {
        let x = MARGIN_LEFT + bar.x;
        let y = MARGIN_TOP + bar.y;

        ctx.set_fill_style(&chart.fill.into());
        ctx.fill_rect(x, y, bar.width, bar.height);
        ctx.set_stroke_style(&chart.border.into());
        ctx.set_line_width(2.0);
        ctx.stroke_rect(x, y, bar.width, bar.height);

        ctx.set_fill_style(&"#374151".into());
        let _ = ctx.fill_text(label, x, height - MARGIN_BOTTOM + 18.0);
    }
}
