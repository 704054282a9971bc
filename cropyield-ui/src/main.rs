//! Crop Yield Dashboard
//!
//! Browser front end for the crop-yield prediction service, built with
//! Leptos (WASM).
//!
//! # Pages
//!
//! - Landing page
//! - Login / registration
//! - Dashboard: dataset, exploratory charts, training, prediction,
//!   model comparison, evaluation and prediction history
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. View state and request sequencing come from the `cropyield`
//! core; this crate wires them to signals, timers and canvas drawing.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
