//! Transport client for the bank API
//!
//! `BankClient` describes the three remote operations. Implementations do
//! not treat HTTP error statuses as errors: they return an `ApiResponse`
//! whose `is_success()` is false and whose body is absent. Only failures
//! that leave no response at all (connection, timeout, undecodable body)
//! come back as `Err`.
//!
//! # Example
//!
//! ```no_run
//! use libaura::client::{BankClient, http::HttpBankClient};
//! use libaura::types::Credentials;
//! use libaura::Config;
//!
//! # async fn example() -> libaura::Result<()> {
//! let client = HttpBankClient::from_config(&Config::default())?;
//! let response = client.authenticate(&Credentials::new("alice", "pw")).await?;
//! if let Some(body) = response.body {
//!     println!("granted: {}", body.granted);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{AccountResponse, Credentials, LoginResponse, TransferRequest, TransferResponse};

pub mod http;

// Available outside tests so integration tests and the CLI's tests can use it
pub mod mock;

pub type ClientResult<T> = std::result::Result<ApiResponse<T>, ClientError>;

/// Response of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    /// Decoded body, present only for 2xx responses that carried one
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn error(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a successful response
    pub fn into_success_body(self) -> Option<T> {
        if self.is_success() {
            self.body
        } else {
            None
        }
    }
}

#[async_trait]
pub trait BankClient: Send + Sync {
    /// `POST /login`
    async fn authenticate(&self, credentials: &Credentials) -> ClientResult<LoginResponse>;

    /// `GET /accounts/{id}`
    async fn fetch_accounts(&self, account_holder_id: &str)
        -> ClientResult<Vec<AccountResponse>>;

    /// `POST /transfer`
    async fn submit_transfer(&self, request: &TransferRequest) -> ClientResult<TransferResponse>;
}
