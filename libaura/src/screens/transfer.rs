//! Transfer screen
//!
//! Submitting sends the transfer and, once the server confirms it, refreshes
//! the balance so the new amount can be shown. The refresh never starts
//! before the transfer call has completed.

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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSummary {
    /// Balance after the transfer, absent if the refresh failed
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferState {
    pub input_valid: bool,
    pub status: Status<TransferSummary>,
}

#[derive(Debug, Clone)]
pub enum TransferAction {
    InputChanged { recipient: bool, amount: bool },
    Submitted,
    Succeeded(TransferSummary),
    Failed(String),
    Reset,
}

impl Default for TransferState {
    fn default() -> Self {
        Self {
            input_valid: false,
            status: Status::Idle,
        }
    }
}

impl TransferState {
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// `Some(true)` once the transfer went through, `Some(false)` after a failure
    pub fn transferred(&self) -> Option<bool> {
        self.status.result_flag()
    }

    pub fn balance(&self) -> Option<f64> {
        self.status.payload().and_then(|summary| summary.balance)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    /// Transfer button enabled: both fields filled and nothing in flight
    pub fn can_submit(&self) -> bool {
        self.input_valid && !self.status.is_loading()
    }
}

impl Reducer for TransferState {
    type Action = TransferAction;

    fn reduce(self, action: TransferAction) -> Self {
        match action {
            TransferAction::InputChanged { recipient, amount } => TransferState {
                input_valid: recipient && amount,
                ..self
            },
            TransferAction::Submitted => TransferState {
                status: Status::Loading,
                ..self
            },
            TransferAction::Succeeded(summary) => TransferState {
                status: Status::Succeeded(summary),
                ..self
            },
            TransferAction::Failed(message) => TransferState {
                status: Status::Failed(message),
                ..self
            },
            TransferAction::Reset => TransferState {
                status: Status::Idle,
                ..self
            },
        }
    }
}

/// Parse a user-entered amount, accepting a comma as decimal separator
pub fn parse_amount(raw: &str) -> Option<f64> {
    let amount: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

pub struct TransferScreen {
    repository: Arc<BankRepository>,
    session: Session,
    store: Store<TransferState>,
    min_loading: Duration,
    initial_balance: Option<f64>,
}

impl TransferScreen {
    pub fn new(repository: Arc<BankRepository>, session: Session, min_loading: Duration) -> Self {
        let initial_balance = repository.current_balance();
        Self {
            repository,
            session,
            store: Store::new(TransferState::default()),
            min_loading,
            initial_balance,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Balance known when the screen was opened
    pub fn initial_balance(&self) -> Option<f64> {
        self.initial_balance
    }

    pub fn state(&self) -> TransferState {
        self.store.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransferState> {
        self.store.subscribe()
    }

    /// Recompute whether the transfer button is enabled
    pub fn input_changed(&self, recipient: &str, amount: &str) -> TransferState {
        self.store.dispatch(TransferAction::InputChanged {
            recipient: !recipient.is_empty(),
            amount: !amount.is_empty(),
        })
    }

    /// Run one transfer attempt and return the state it ended in
    ///
    /// An amount that is not a positive number fails the attempt without
    /// contacting the server.
    pub async fn submit(&self, recipient: &str, amount: &str) -> TransferState {
        let inputs = self.input_changed(recipient, amount);
        if !inputs.input_valid {
            return inputs;
        }
        if !self
            .store
            .dispatch_if(|state| !state.is_loading(), TransferAction::Submitted)
        {
            return self.state();
        }

        let Some(amount) = parse_amount(amount) else {
            return self
                .store
                .dispatch(TransferAction::Failed(messages::INVALID_AMOUNT.to_string()));
        };

        let action = hold_at_least(self.min_loading, self.attempt(recipient, amount)).await;
        self.store.dispatch(action)
    }

    pub fn reset(&self) -> TransferState {
        self.store.dispatch(TransferAction::Reset)
    }

    async fn attempt(&self, recipient: &str, amount: f64) -> TransferAction {
        let report = match self.repository.transfer(&self.session, recipient, amount).await {
            Outcome::Success(report) => report,
            other => {
                let message = other
                    .failure_message()
                    .unwrap_or(messages::TRANSFER_ERROR)
                    .to_string();
                warn!("Transfer to {} failed: {}", recipient, message);
                return TransferAction::Failed(message);
            }
        };

        if report.done != Some(true) {
            warn!("Transfer to {} refused", recipient);
            return TransferAction::Failed(
                report
                    .message
                    .unwrap_or_else(|| messages::TRANSFER_ERROR.to_string()),
            );
        }

        let balance = match self.repository.balance(&self.session).await {
            Outcome::Success(report) => report.balance,
            other => {
                warn!(
                    "Balance refresh after transfer failed: {}",
                    other.failure_message().unwrap_or(messages::BALANCE_ERROR)
                );
                None
            }
        };

        info!("Transferred {} to {}", amount, recipient);
        TransferAction::Succeeded(TransferSummary { balance })
    }
}
