//! Rendering
//!
//! Platform-neutral rendering models: tables built from records and bar
//! chart specs with a per-canvas instance registry.

pub mod chart;
pub mod table;

pub use chart::{
    render_text, BarChart, Canvas, ChartInstance, ChartRegistry, ChartSurface, TextChart,
    TextSurface,
};
pub use table::{format_cell, to_fixed, Table, NO_DATA};
