//! Status Message Component
//!
//! Transient message box driven by a core `StatusBox`.

use leptos::*;

use cropyield::StatusBox;

#[component]
pub fn StatusMessage(
    #[prop(into)] status: Signal<StatusBox>,
    /// Element id and base class
    id: &'static str,
    base_class: &'static str,
) -> impl IntoView {
    view! {
        <div
            id=id
            class=move || status.with(|s| s.class(base_class))
            style=move || if status.with(StatusBox::is_visible) { "" } else { "display: none" }
        >
            {move || status.with(|s| s.text().unwrap_or_default().to_string())}
        </div>
    }
}
