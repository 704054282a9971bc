//! Landing Page

use leptos::*;
use leptos_router::*;

#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <div class="landing">
            <h1>"🌾 Crop Yield Prediction"</h1>
            <p>"Train machine learning models on farm data and predict crop yields."</p>
            <div class="landing-actions">
                <A href="/auth" class="btn btn-primary">"Login / Register"</A>
                <A href="/dashboard" class="btn">"Open Dashboard"</A>
            </div>
        </div>
    }
}
