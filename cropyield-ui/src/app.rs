//! App Root Component
//!
//! Routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::pages::{Auth, Dashboard, Landing};
use crate::state::global::provide_app_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_app_state();

    view! {
        <Router>
            <main class="container">
                <Routes>
                    <Route path="/" view=Landing />
                    <Route path="/auth" view=Auth />
                    <Route path="/dashboard" view=Dashboard />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page Not Found"</h1>
            <A href="/" class="btn btn-primary">"Back to Home"</A>
        </div>
    }
}
