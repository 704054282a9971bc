//! Auth View State
//!
//! Login and registration page: active form, the transient message box,
//! the registration draft and a pending navigation.
//!
//! Timed effects (message auto-hide, redirect after login, switching back
//! to the login form after registering) are returned as `Deferred` actions
//! for the presenter to schedule on its own clock.

use std::time::Duration;

use crate::api::{ClientResult, Credentials, FailureKind, LoginReply, RegisterReply, Registration};
use crate::state::status::{StatusBox, StatusKind};
use crate::state::tabs::{AuthTab, TabSet};

pub const LOGIN_SUCCEEDED: &str = "Login successful! Redirecting...";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful! Please login.";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match!";
pub const NETWORK_ERROR: &str = "Network error. Please try again.";

/// Where a successful login lands
pub const HOME: &str = "/";

/// Fixed delays of the auth flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    /// How long a status message stays up
    pub message_hide: Duration,
    /// Pause between a successful login and the redirect
    pub login_redirect: Duration,
    /// Pause between a successful registration and the switch to login
    pub registration_reset: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            message_hide: Duration::from_millis(5000),
            login_redirect: Duration::from_millis(1000),
            registration_reset: Duration::from_millis(2000),
        }
    }
}

/// An action to run after a delay
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred<A> {
    pub delay: Duration,
    pub action: A,
}

impl<A> Deferred<A> {
    pub fn new(delay: Duration, action: A) -> Self {
        Self { delay, action }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// Hide the message shown at this generation
    HideMessage(u64),
    /// Navigate to a path
    Redirect(String),
    /// Show the login form and clear the registration form
    ShowLoginAndReset,
}

/// Registration form contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Outcome of starting a registration
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationStep {
    /// Send this to the backend
    Send(Registration),
    /// Refused locally; nothing is sent
    Rejected(Vec<Deferred<AuthAction>>),
}

#[derive(Debug, Clone)]
pub struct AuthView {
    pub tabs: TabSet<AuthTab>,
    pub draft: RegistrationDraft,
    message: StatusBox,
    location: Option<String>,
    timings: Timings,
}

impl Default for AuthView {
    fn default() -> Self {
        Self::new(Timings::default())
    }
}

impl AuthView {
    pub fn new(timings: Timings) -> Self {
        Self {
            tabs: TabSet::new(AuthTab::Login),
            draft: RegistrationDraft::default(),
            message: StatusBox::new(),
            location: None,
            timings,
        }
    }

    pub fn select_tab(&mut self, tab: AuthTab) {
        self.tabs.activate(tab);
    }

    pub fn message(&self) -> &StatusBox {
        &self.message
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Pending navigation, if a redirect has fired
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn take_location(&mut self) -> Option<String> {
        self.location.take()
    }

    fn show(&mut self, kind: StatusKind, text: &str) -> Deferred<AuthAction> {
        let generation = self.message.show(kind, text);
        Deferred::new(self.timings.message_hide, AuthAction::HideMessage(generation))
    }

    pub fn begin_login(&self, username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn finish_login(&mut self, result: ClientResult<LoginReply>) -> Vec<Deferred<AuthAction>> {
        match result {
            Ok(reply) => {
                tracing::info!(username = reply.username.as_deref().unwrap_or(""), "Logged in");
                vec![
                    self.show(StatusKind::Success, LOGIN_SUCCEEDED),
                    Deferred::new(
                        self.timings.login_redirect,
                        AuthAction::Redirect(HOME.to_string()),
                    ),
                ]
            }
            Err(e) => {
                let text = failure_text(&e, LOGIN_FAILED);
                vec![self.show(StatusKind::Error, &text)]
            }
        }
    }

    /// Validate the draft and build the registration request.
    ///
    /// Mismatched passwords are refused here, before any request exists.
    pub fn begin_registration(&mut self) -> RegistrationStep {
        if self.draft.password != self.draft.confirm {
            return RegistrationStep::Rejected(vec![self.show(StatusKind::Error, PASSWORD_MISMATCH)]);
        }

        RegistrationStep::Send(Registration {
            username: self.draft.username.clone(),
            email: self.draft.email.clone(),
            password: self.draft.password.clone(),
        })
    }

    pub fn finish_registration(
        &mut self,
        result: ClientResult<RegisterReply>,
    ) -> Vec<Deferred<AuthAction>> {
        match result {
            Ok(_) => vec![
                self.show(StatusKind::Success, REGISTRATION_SUCCEEDED),
                Deferred::new(
                    self.timings.registration_reset,
                    AuthAction::ShowLoginAndReset,
                ),
            ],
            Err(e) => {
                let text = failure_text(&e, REGISTRATION_FAILED);
                vec![self.show(StatusKind::Error, &text)]
            }
        }
    }

    /// Run a deferred action
    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::HideMessage(generation) => {
                self.message.hide(generation);
            }
            AuthAction::Redirect(path) => {
                tracing::debug!(%path, "Redirecting");
                self.location = Some(path);
            }
            AuthAction::ShowLoginAndReset => {
                self.tabs.activate(AuthTab::Login);
                self.draft = RegistrationDraft::default();
            }
        }
    }
}

fn failure_text(error: &crate::api::ClientError, fallback: &str) -> String {
    match error.kind() {
        FailureKind::Application => error.server_message().unwrap_or(fallback).to_string(),
        FailureKind::Transport => NETWORK_ERROR.to_string(),
    }
}
