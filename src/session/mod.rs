//! Native Sessions
//!
//! Drivers that run the view-state operations end to end against a
//! [`Backend`](crate::api::Backend): send the request, apply the result,
//! run follow-up loads and deferred actions on the tokio clock.
//!
//! Calls run one after another, so responses never race here; the browser
//! client drives the same view state from concurrent tasks instead.

mod auth;
mod dashboard;

pub use auth::AuthSession;
pub use dashboard::DashboardSession;
