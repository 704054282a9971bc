//! # Cropyield
//!
//! Client for the crop-yield prediction service: the view state and request
//! orchestration behind the login page and the tabbed dashboard, plus a
//! command-line front end.
//!
//! All modelling happens in the backend. This crate tracks what the backend
//! has confirmed (trained models, the latest prediction), sequences the
//! calls that depend on each other and turns responses into tables and
//! charts.
//!
//! ## Modules
//!
//! - [`api`]: typed request/response layer and the [`api::Backend`] trait
//! - [`state`]: auth and dashboard view state, tabs, status boxes, request
//!   sequencing
//! - [`render`]: record tables and bar charts with a per-canvas registry
//! - `session`: native drivers running the flows end to end (feature `native`)
//! - `config`: TOML + environment configuration (feature `native`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cropyield::api::{HttpBackend, HttpBackendConfig, PredictionForm};
//! use cropyield::session::{AuthSession, DashboardSession};
//! use cropyield::state::Timings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(HttpBackendConfig::default())?;
//!
//!     let mut auth = AuthSession::new(&backend, Timings::default());
//!     auth.submit_login("farmer", "secret").await;
//!
//!     let mut dashboard = DashboardSession::new(&backend);
//!     dashboard.train_models(20).await;
//!     dashboard.submit_prediction(PredictionForm::default()).await;
//!
//!     if let Some(headline) = dashboard.view().prediction_headline() {
//!         println!("{}", headline);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
#[cfg(feature = "native")]
pub mod config;
pub mod render;
#[cfg(feature = "native")]
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use api::{Backend, ClientError, ClientResult, Endpoint, FailureKind};

pub use render::{BarChart, Canvas, ChartRegistry, Table};

pub use state::{AuthView, DashboardTab, DashboardView, Load, Notice, StatusBox, Timings};

#[cfg(feature = "native")]
pub use api::{HttpBackend, HttpBackendConfig};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};

#[cfg(feature = "native")]
pub use session::{AuthSession, DashboardSession};
