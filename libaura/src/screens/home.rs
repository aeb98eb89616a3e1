//! Home (balance) screen
//!
//! Fetches the main account balance on entry and whenever the user retries.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

use super::loading::hold_at_least;
use super::status::Status;
use super::store::{Reducer, Store};
use crate::messages;
use crate::outcome::Outcome;
use crate::repository::BankRepository;
use crate::types::Session;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeState {
    pub status: Status<f64>,
}

#[derive(Debug, Clone)]
pub enum HomeAction {
    Requested,
    Loaded(f64),
    Failed(String),
    Reset,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            status: Status::Idle,
        }
    }
}

impl HomeState {
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn balance(&self) -> Option<f64> {
        self.status.payload().copied()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    /// Retry affordance is shown after a failure
    pub fn can_retry(&self) -> bool {
        matches!(self.status, Status::Failed(_))
    }
}

impl Reducer for HomeState {
    type Action = HomeAction;

    fn reduce(self, action: HomeAction) -> Self {
        let status = match action {
            HomeAction::Requested => Status::Loading,
            HomeAction::Loaded(balance) => Status::Succeeded(balance),
            HomeAction::Failed(message) => Status::Failed(message),
            HomeAction::Reset => Status::Idle,
        };
        HomeState { status }
    }
}

pub struct HomeScreen {
    repository: Arc<BankRepository>,
    session: Session,
    store: Store<HomeState>,
    min_loading: Duration,
}

impl HomeScreen {
    pub fn new(repository: Arc<BankRepository>, session: Session, min_loading: Duration) -> Self {
        Self {
            repository,
            session,
            store: Store::new(HomeState::default()),
            min_loading,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> HomeState {
        self.store.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.store.subscribe()
    }

    /// Fetch the balance, on entry or as a retry
    ///
    /// Ignored while a fetch is already loading.
    pub async fn load(&self) -> HomeState {
        if !self
            .store
            .dispatch_if(|state| !state.is_loading(), HomeAction::Requested)
        {
            return self.state();
        }

        let action = hold_at_least(self.min_loading, self.fetch()).await;
        self.store.dispatch(action)
    }

    pub fn reset(&self) -> HomeState {
        self.store.dispatch(HomeAction::Reset)
    }

    async fn fetch(&self) -> HomeAction {
        match self.repository.balance(&self.session).await {
            Outcome::Success(report) => match report.balance {
                Some(balance) => HomeAction::Loaded(balance),
                None => HomeAction::Failed(
                    report
                        .message
                        .unwrap_or_else(|| messages::BALANCE_ERROR.to_string()),
                ),
            },
            other => {
                let message = other
                    .failure_message()
                    .unwrap_or(messages::BALANCE_ERROR)
                    .to_string();
                warn!("Balance unavailable for {}: {}", self.session, message);
                HomeAction::Failed(message)
            }
        }
    }
}
