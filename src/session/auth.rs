//! Auth session driver.

use tokio::time::{sleep_until, Instant};

use crate::api::{self, Backend};
use crate::state::{AuthAction, AuthView, Deferred, RegistrationDraft, RegistrationStep, Timings};

pub struct AuthSession<B: Backend> {
    backend: B,
    view: AuthView,
}

impl<B: Backend> AuthSession<B> {
    pub fn new(backend: B, timings: Timings) -> Self {
        Self {
            backend,
            view: AuthView::new(timings),
        }
    }

    pub fn view(&self) -> &AuthView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut AuthView {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Post credentials and apply the outcome. Returns the deferred actions
    /// (message auto-hide, redirect) for [`settle`](Self::settle).
    pub async fn submit_login(&mut self, username: &str, password: &str) -> Vec<Deferred<AuthAction>> {
        let credentials = self.view.begin_login(username, password);
        let result = api::login(&self.backend, &credentials).await;
        self.view.finish_login(result)
    }

    /// Check the passwords locally, then post the registration
    pub async fn submit_registration(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Vec<Deferred<AuthAction>> {
        self.view.draft = RegistrationDraft {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
        };

        match self.view.begin_registration() {
            RegistrationStep::Rejected(actions) => actions,
            RegistrationStep::Send(registration) => {
                let result = api::register(&self.backend, &registration).await;
                self.view.finish_registration(result)
            }
        }
    }

    /// Run deferred actions in delay order, each at its own deadline
    pub async fn settle(&mut self, mut actions: Vec<Deferred<AuthAction>>) {
        actions.sort_by_key(|d| d.delay);
        let start = Instant::now();

        for deferred in actions {
            sleep_until(start + deferred.delay).await;
            self.view.apply(deferred.action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientError, Endpoint};
    use crate::state::auth::{LOGIN_SUCCEEDED, NETWORK_ERROR, PASSWORD_MISMATCH};
    use crate::state::AuthTab;
    use crate::testing::ScriptedBackend;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_login_redirects_after_delay() {
        let backend = ScriptedBackend::new();
        backend.respond(
            Endpoint::Login,
            json!({ "success": true, "username": "meera" }),
        );
        let mut session = AuthSession::new(backend, Timings::default());

        let actions = session.submit_login("meera", "hunter2").await;
        assert_eq!(session.view().message().visible_text(), Some(LOGIN_SUCCEEDED));
        assert!(session.view().location().is_none());

        let redirect = actions
            .iter()
            .find(|d| matches!(d.action, AuthAction::Redirect(_)))
            .cloned()
            .unwrap();

        let started = Instant::now();
        session.settle(vec![redirect]).await;
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1000) && elapsed < Duration::from_millis(1100));
        assert_eq!(session.view().location(), Some("/"));
        assert_eq!(session.view().message().visible_text(), Some(LOGIN_SUCCEEDED));

        let calls = session.backend().calls();
        assert_eq!(
            calls[0].1,
            Some(json!({ "username": "meera", "password": "hunter2" }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_hides_after_timeout() {
        let backend = ScriptedBackend::new();
        backend.respond(Endpoint::Login, json!({ "success": true }));
        let mut session = AuthSession::new(backend, Timings::default());

        let actions = session.submit_login("meera", "hunter2").await;
        let started = Instant::now();
        session.settle(actions).await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(5000) && elapsed < Duration::from_millis(5100));
        assert!(!session.view().message().is_visible());
        assert_eq!(session.view().location(), Some("/"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_credentials_no_redirect() {
        let backend = ScriptedBackend::new();
        backend.respond(
            Endpoint::Login,
            json!({ "success": false, "message": "Invalid credentials" }),
        );
        let mut session = AuthSession::new(backend, Timings::default());

        let actions = session.submit_login("meera", "nope").await;
        assert_eq!(
            session.view().message().visible_text(),
            Some("Invalid credentials")
        );

        session.settle(actions).await;
        assert!(session.view().location().is_none());
    }

    #[tokio::test]
    async fn test_network_failure_message() {
        let backend = ScriptedBackend::new();
        backend.fail(Endpoint::Login, ClientError::Network("offline".into()));
        let mut session = AuthSession::new(backend, Timings::default());

        session.submit_login("meera", "hunter2").await;
        assert_eq!(session.view().message().visible_text(), Some(NETWORK_ERROR));
    }

    #[tokio::test]
    async fn test_mismatched_registration_sends_nothing() {
        let backend = ScriptedBackend::new();
        backend.respond(Endpoint::Register, json!({ "success": true }));
        let mut session = AuthSession::new(backend, Timings::default());

        session
            .submit_registration("meera", "meera@example.com", "abc123", "abc124")
            .await;

        assert_eq!(
            session.view().message().visible_text(),
            Some(PASSWORD_MISMATCH)
        );
        assert!(session.backend().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_switches_to_login() {
        let backend = ScriptedBackend::new();
        backend.respond(
            Endpoint::Register,
            json!({ "success": true, "message": "User registered successfully" }),
        );
        let mut session = AuthSession::new(backend, Timings::default());
        session.view_mut().select_tab(AuthTab::Register);

        let actions = session
            .submit_registration("meera", "meera@example.com", "abc123", "abc123")
            .await;
        assert_eq!(
            session.backend().calls_to(Endpoint::Register),
            vec![Some(json!({
                "username": "meera",
                "email": "meera@example.com",
                "password": "abc123"
            }))]
        );

        session.settle(actions).await;
        assert!(session.view().tabs.is_active(AuthTab::Login));
        assert_eq!(session.view().draft, RegistrationDraft::default());
    }
}
