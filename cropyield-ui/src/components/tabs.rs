//! Tab Buttons Component

use leptos::*;

use cropyield::state::{Tab, TabSet};

/// One button per tab; the active one carries the `active` class
#[component]
pub fn TabButtons<T, F>(
    #[prop(into)] tabs: Signal<TabSet<T>>,
    on_select: F,
) -> impl IntoView
where
    T: Tab,
    F: Fn(T) + Copy + 'static,
{
    view! {
        <div class="tabs">
            {T::ALL
                .iter()
                .copied()
                .map(|tab| view! {
                    <button
                        class=move || tabs.with(|t| t.button_class(tab))
                        on:click=move |_| on_select(tab)
                    >
                        {tab.label()}
                    </button>
                })
                .collect_view()}
        </div>
    }
}
