//! View State
//!
//! Client-held state for the auth page and the dashboard. All of it is
//! transient: it lives as long as the page (or CLI run) and holds only the
//! most recent confirmed server results.

pub mod auth;
pub mod dashboard;
pub mod sequence;
pub mod status;
pub mod tabs;

pub use auth::{
    AuthAction, AuthView, Deferred, RegistrationDraft, RegistrationStep, Timings,
};
pub use dashboard::{DashboardView, Download, DEFAULT_TEST_SIZE_PERCENT};
pub use sequence::{Operation, RequestSequencer, Ticket};
pub use status::{Notice, StatusBox, StatusKind};
pub use tabs::{AuthTab, DashboardTab, Load, Tab, TabSet};
