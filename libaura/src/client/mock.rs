//! Mock bank client for testing
//!
//! Serves canned responses per endpoint, optionally after a delay, and
//! records every request so tests can verify what the repository sent.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use super::{ApiResponse, BankClient, ClientResult};
use crate::error::ClientError;
use crate::types::{AccountResponse, Credentials, LoginResponse, TransferRequest, TransferResponse};

/// What a mocked endpoint answers with
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    /// A completed exchange (any status, optional body)
    Respond(ApiResponse<T>),
    /// The call raises without a response
    Fail(ClientError),
}

impl<T> MockReply<T> {
    pub fn ok(body: T) -> Self {
        MockReply::Respond(ApiResponse::ok(body))
    }

    pub fn status(status: u16) -> Self {
        MockReply::Respond(ApiResponse::error(status))
    }

    /// 200 without a body
    pub fn empty() -> Self {
        MockReply::Respond(ApiResponse {
            status: 200,
            body: None,
        })
    }

    pub fn network_error(message: &str) -> Self {
        MockReply::Fail(ClientError::Network(message.to_string()))
    }
}

/// Configuration for mock client behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub login: MockReply<LoginResponse>,
    pub accounts: MockReply<Vec<AccountResponse>>,
    pub transfer: MockReply<TransferResponse>,

    /// Delay before answering (simulates network latency)
    pub delay: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            login: MockReply::ok(LoginResponse { granted: true }),
            accounts: MockReply::ok(vec![AccountResponse {
                id: "main".to_string(),
                main: true,
                balance: 0.0,
            }]),
            transfer: MockReply::ok(TransferResponse { done: true }),
            delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    logins: Vec<Credentials>,
    account_lookups: Vec<String>,
    transfers: Vec<TransferRequest>,
    /// Endpoint names in call order
    calls: Vec<&'static str>,
}

/// Mock client for testing
///
/// Cloning shares the recorded requests, so a test can keep a handle while
/// the repository owns another.
#[derive(Debug, Clone)]
pub struct MockBankClient {
    config: MockConfig,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockBankClient {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            recorded: Arc::new(Mutex::new(Recorded::default())),
        }
    }

    /// Grants logins and reports one main account with the given balance
    pub fn with_balance(balance: f64) -> Self {
        Self::new(MockConfig {
            accounts: MockReply::ok(vec![AccountResponse {
                id: "main".to_string(),
                main: true,
                balance,
            }]),
            ..Default::default()
        })
    }

    pub fn with_login(mut self, reply: MockReply<LoginResponse>) -> Self {
        self.config.login = reply;
        self
    }

    pub fn with_accounts(mut self, reply: MockReply<Vec<AccountResponse>>) -> Self {
        self.config.accounts = reply;
        self
    }

    pub fn with_transfer(mut self, reply: MockReply<TransferResponse>) -> Self {
        self.config.transfer = reply;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn login_requests(&self) -> Vec<Credentials> {
        self.recorded().logins.clone()
    }

    pub fn account_lookups(&self) -> Vec<String> {
        self.recorded().account_lookups.clone()
    }

    pub fn transfer_requests(&self) -> Vec<TransferRequest> {
        self.recorded().transfers.clone()
    }

    /// Endpoint names (`login`, `accounts`, `transfer`) in call order
    pub fn calls(&self) -> Vec<&'static str> {
        self.recorded().calls.clone()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        // A panicking test thread must not hide the calls it already made
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn answer<T: Clone>(&self, reply: &MockReply<T>) -> ClientResult<T> {
        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }
        match reply {
            MockReply::Respond(response) => Ok(response.clone()),
            MockReply::Fail(error) => Err(error.clone()),
        }
    }
}

#[async_trait]
impl BankClient for MockBankClient {
    async fn authenticate(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        {
            let mut recorded = self.recorded();
            recorded.logins.push(credentials.clone());
            recorded.calls.push("login");
        }
        self.answer(&self.config.login).await
    }

    async fn fetch_accounts(
        &self,
        account_holder_id: &str,
    ) -> ClientResult<Vec<AccountResponse>> {
        {
            let mut recorded = self.recorded();
            recorded.account_lookups.push(account_holder_id.to_string());
            recorded.calls.push("accounts");
        }
        self.answer(&self.config.accounts).await
    }

    async fn submit_transfer(&self, request: &TransferRequest) -> ClientResult<TransferResponse> {
        {
            let mut recorded = self.recorded();
            recorded.transfers.push(request.clone());
            recorded.calls.push("transfer");
        }
        self.answer(&self.config.transfer).await
    }
}
