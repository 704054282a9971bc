//! UI Components
//!
//! Reusable Leptos components for the auth page and the dashboard.

pub mod chart;
pub mod status;
pub mod table;
pub mod tabs;

pub use chart::{BarChartCanvas, ChartSlots};
pub use status::StatusMessage;
pub use table::RecordTable;
pub use tabs::TabButtons;
