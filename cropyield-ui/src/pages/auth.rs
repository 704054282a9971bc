//! Auth Page
//!
//! Login and registration forms behind two tabs, with one shared message box.

use leptos::*;

use cropyield::state::{AuthTab, TabSet};

use crate::components::{StatusMessage, TabButtons};
use crate::state::global::use_app_state;

#[component]
pub fn Auth() -> impl IntoView {
    let state = use_app_state();
    let auth = state.auth;

    let tabs = Signal::derive(move || auth.with(|view| view.tabs));
    let message = Signal::derive(move || auth.with(|view| view.message().clone()));

    view! {
        <div class="auth-container">
            <h1>"🌾 Crop Yield Prediction"</h1>

            <TabButtons tabs=tabs on_select=move |tab| auth.update(|view| view.select_tab(tab)) />

            <StatusMessage status=message id="message" base_class="message" />

            <div
                id=TabSet::panel_id(AuthTab::Login)
                class=move || tabs.with(|t| t.panel_class(AuthTab::Login))
            >
                <LoginForm />
            </div>
            <div
                id=TabSet::panel_id(AuthTab::Register)
                class=move || tabs.with(|t| t.panel_class(AuthTab::Register))
            >
                <RegisterForm />
            </div>
        </div>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let state = use_app_state();
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.login(username.get_untracked(), password.get_untracked());
    };

    view! {
        <form id="login-form" on:submit=on_submit>
            <input
                id="login-username"
                type="text"
                placeholder="Username"
                required
                prop:value=username
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <input
                id="login-password"
                type="password"
                placeholder="Password"
                required
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary">"Login"</button>
        </form>
    }
}

/// Registration fields are bound to the draft held by the auth view, so a
/// successful registration clears them when it switches back to login.
#[component]
fn RegisterForm() -> impl IntoView {
    let state = use_app_state();
    let auth = state.auth;

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.register();
    };

    view! {
        <form id="register-form" on:submit=on_submit>
            <input
                id="reg-username"
                type="text"
                placeholder="Username"
                required
                prop:value=move || auth.with(|view| view.draft.username.clone())
                on:input=move |ev| auth.update(|view| view.draft.username = event_target_value(&ev))
            />
            <input
                id="reg-email"
                type="email"
                placeholder="Email"
                required
                prop:value=move || auth.with(|view| view.draft.email.clone())
                on:input=move |ev| auth.update(|view| view.draft.email = event_target_value(&ev))
            />
            <input
                id="reg-password"
                type="password"
                placeholder="Password"
                required
                prop:value=move || auth.with(|view| view.draft.password.clone())
                on:input=move |ev| auth.update(|view| view.draft.password = event_target_value(&ev))
            />
            <input
                id="reg-confirm"
                type="password"
                placeholder="Confirm Password"
                required
                prop:value=move || auth.with(|view| view.draft.confirm.clone())
                on:input=move |ev| auth.update(|view| view.draft.confirm = event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary">"Register"</button>
        </form>
    }
}
