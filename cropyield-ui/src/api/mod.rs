//! Browser transport for the prediction service.

pub mod client;

pub use client::GlooBackend;
