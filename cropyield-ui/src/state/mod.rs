//! State Management
//!
//! Reactive wrappers around the auth and dashboard view state.

pub mod global;

pub use global::{provide_app_state, AppState};
