//! Record table rendering.

use leptos::*;

use cropyield::Table;

/// Renders a `Table` as HTML, or its placeholder paragraph
#[component]
pub fn RecordTable(#[prop(into)] table: Signal<Option<Table>>) -> impl IntoView {
    move || match table.get() {
        None => view! { <div class="loading-spinner w-6 h-6" /> }.into_view(),
        Some(Table::Placeholder(text)) => view! { <p class="info">{text}</p> }.into_view(),
        Some(Table::Rows { headers, rows }) => view! {
            <table class="data-table">
                <thead>
                    <tr>
                        {headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| view! {
                            <tr>
                                {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_view(),
    }
}
