//! Login screen
//!
//! Submitting checks the credentials and, once access is granted, chains a
//! balance fetch for the new session before reporting success. The session
//! in the success payload is what the home and transfer screens are built
//! with.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use super::loading::hold_at_least;
use super::status::Status;
use super::store::{Reducer, Store};
use crate::messages;
use crate::outcome::Outcome;
use crate::repository::BankRepository;
use crate::types::Session;

/// What a successful login hands over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginSummary {
    pub session: Session,
    /// Main account balance, absent if the chained fetch failed
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginState {
    pub input_valid: bool,
    pub status: Status<LoginSummary>,
}

#[derive(Debug, Clone)]
pub enum LoginAction {
    InputChanged { id: bool, password: bool },
    Submitted,
    Succeeded(LoginSummary),
    Failed(String),
    Reset,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            input_valid: false,
            status: Status::Idle,
        }
    }
}

impl LoginState {
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// `Some(true)` once logged in, `Some(false)` after a failed attempt
    pub fn logged(&self) -> Option<bool> {
        self.status.result_flag()
    }

    pub fn session(&self) -> Option<&Session> {
        self.status.payload().map(|summary| &summary.session)
    }

    pub fn balance(&self) -> Option<f64> {
        self.status.payload().and_then(|summary| summary.balance)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    /// Login button enabled: both fields filled and nothing in flight
    pub fn can_submit(&self) -> bool {
        self.input_valid && !self.status.is_loading()
    }
}

impl Reducer for LoginState {
    type Action = LoginAction;

    fn reduce(self, action: LoginAction) -> Self {
        match action {
            LoginAction::InputChanged { id, password } => LoginState {
                input_valid: id && password,
                ..self
            },
            LoginAction::Submitted => LoginState {
                status: Status::Loading,
                ..self
            },
            LoginAction::Succeeded(summary) => LoginState {
                status: Status::Succeeded(summary),
                ..self
            },
            LoginAction::Failed(message) => LoginState {
                status: Status::Failed(message),
                ..self
            },
            LoginAction::Reset => LoginState {
                status: Status::Idle,
                ..self
            },
        }
    }
}

pub struct LoginScreen {
    repository: Arc<BankRepository>,
    store: Store<LoginState>,
    min_loading: Duration,
}

impl LoginScreen {
    pub fn new(repository: Arc<BankRepository>, min_loading: Duration) -> Self {
        Self {
            repository,
            store: Store::new(LoginState::default()),
            min_loading,
        }
    }

    pub fn state(&self) -> LoginState {
        self.store.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.store.subscribe()
    }

    /// Recompute whether the login button is enabled
    pub fn input_changed(&self, id: &str, password: &str) -> LoginState {
        self.store.dispatch(LoginAction::InputChanged {
            id: !id.is_empty(),
            password: !password.is_empty(),
        })
    }

    /// Run one login attempt and return the state it ended in
    ///
    /// Ignored while another attempt is loading or while a field is empty.
    pub async fn submit(&self, id: &str, password: &str) -> LoginState {
        let inputs = self.input_changed(id, password);
        if !inputs.input_valid {
            return inputs;
        }
        if !self
            .store
            .dispatch_if(|state| !state.is_loading(), LoginAction::Submitted)
        {
            return self.state();
        }

        let action = hold_at_least(self.min_loading, self.attempt(id, password)).await;
        self.store.dispatch(action)
    }

    /// Back to idle, clearing the previous result or error
    pub fn reset(&self) -> LoginState {
        self.store.dispatch(LoginAction::Reset)
    }

    async fn attempt(&self, id: &str, password: &str) -> LoginAction {
        match self.repository.login(id, password).await {
            Outcome::Success(_) => {}
            Outcome::Failure(message) => {
                warn!("Login failed for {}", id);
                return LoginAction::Failed(
                    message.unwrap_or_else(|| messages::LOGIN_FAILED.to_string()),
                );
            }
            Outcome::Loading => return LoginAction::Failed(messages::LOGIN_FAILED.to_string()),
        }

        let session = Session::new(id);
        let balance = match self.repository.balance(&session).await {
            Outcome::Success(report) => report.balance,
            other => {
                warn!(
                    "Balance fetch after login failed: {}",
                    other.failure_message().unwrap_or(messages::BALANCE_ERROR)
                );
                None
            }
        };

        info!("Logged in as {}", session);
        LoginAction::Succeeded(LoginSummary { session, balance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockBankClient, MockConfig, MockReply};
    use crate::types::LoginResponse;

    fn screen(client: &MockBankClient) -> LoginScreen {
        let repository = Arc::new(BankRepository::new(Arc::new(client.clone())));
        LoginScreen::new(repository, Duration::ZERO)
    }

    #[test]
    fn test_initial_state() {
        let state = LoginState::default();
        assert!(!state.input_valid);
        assert_eq!(state.logged(), None);
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_reducer_input_validity() {
        let state = LoginState::default();
        let state = state.reduce(LoginAction::InputChanged { id: true, password: false });
        assert!(!state.input_valid);

        let state = state.reduce(LoginAction::InputChanged { id: true, password: true });
        assert!(state.input_valid);
        assert!(state.can_submit());
    }

    #[test]
    fn test_reducer_submit_clears_previous_failure() {
        let state = LoginState::default()
            .reduce(LoginAction::Failed("Invalid data".to_string()))
            .reduce(LoginAction::Submitted);

        assert!(state.is_loading());
        assert_eq!(state.error_message(), None);
        assert_eq!(state.logged(), None);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let failed = LoginState::default()
            .reduce(LoginAction::InputChanged { id: true, password: true })
            .reduce(LoginAction::Failed("Login failed".to_string()));

        let once = failed.clone().reduce(LoginAction::Reset);
        let twice = failed.reduce(LoginAction::Reset).reduce(LoginAction::Reset);

        assert_eq!(once, twice);
        assert!(once.status.is_idle());
        assert!(once.input_valid);
    }

    #[tokio::test]
    async fn test_submit_granted_chains_balance() {
        let client = MockBankClient::with_balance(250.0);
        let screen = screen(&client);

        let state = screen.submit("alice", "pw").await;

        assert_eq!(state.logged(), Some(true));
        assert_eq!(state.balance(), Some(250.0));
        assert_eq!(state.session(), Some(&Session::new("alice")));
        assert_eq!(state.error_message(), None);
        assert_eq!(client.calls(), vec!["login", "accounts"]);
        assert_eq!(client.account_lookups(), vec!["alice".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_refused_does_not_fetch_balance() {
        let client = MockBankClient::new(MockConfig::default())
            .with_login(MockReply::ok(LoginResponse { granted: false }));
        let screen = screen(&client);

        let state = screen.submit("alice", "wrong").await;

        assert_eq!(state.logged(), Some(false));
        assert_eq!(state.error_message(), Some("Login failed"));
        assert!(state.can_submit());
        assert_eq!(client.calls(), vec!["login"]);
    }

    #[tokio::test]
    async fn test_submit_with_failed_balance_still_logs_in() {
        let client = MockBankClient::new(MockConfig::default())
            .with_accounts(MockReply::status(500));
        let screen = screen(&client);

        let state = screen.submit("alice", "pw").await;

        assert_eq!(state.logged(), Some(true));
        assert_eq!(state.balance(), None);
    }

    #[tokio::test]
    async fn test_submit_with_empty_field_makes_no_call() {
        let client = MockBankClient::new(MockConfig::default());
        let screen = screen(&client);

        let state = screen.submit("alice", "").await;

        assert!(!state.input_valid);
        assert!(state.status.is_idle());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let client = MockBankClient::new(MockConfig::default()).with_login(MockReply::status(400));
        let screen = screen(&client);

        let failed = screen.submit("alice", "pw").await;
        assert_eq!(failed.error_message(), Some("Invalid data"));

        let reset = screen.reset();
        assert!(reset.status.is_idle());
        assert_eq!(reset.error_message(), None);
    }
}
