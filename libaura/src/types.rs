//! Core types for Aura
//!
//! Wire types mirror the JSON bodies exchanged with the bank API. Report
//! types are what the repository hands to the screens.

use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Types
// ============================================================================

/// Body of `POST /login`
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response of `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub granted: bool,
}

/// One entry of the `GET /accounts/{id}` list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountResponse {
    pub id: String,
    pub main: bool,
    pub balance: f64,
}

/// Body of `POST /transfer`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

/// Response of `POST /transfer`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferResponse {
    #[serde(rename = "result")]
    pub done: bool,
}

// ============================================================================
// Domain Types
// ============================================================================

/// Identity of the logged-in account holder
///
/// Handed by value from the login screen to the home and transfer screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Session {
    pub id: String,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginReport {
    pub granted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceReport {
    /// Balance of the main account, absent when no account is flagged main
    pub balance: Option<f64>,
    pub message: Option<String>,
}

impl BalanceReport {
    /// Pick the first account flagged `main`
    pub fn from_accounts(accounts: &[AccountResponse]) -> Self {
        match accounts.iter().find(|account| account.main) {
            Some(account) => Self {
                balance: Some(account.balance),
                message: None,
            },
            None => Self {
                balance: None,
                message: Some(crate::messages::SERVER_ERROR.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferReport {
    pub done: Option<bool>,
    pub message: Option<String>,
}

impl From<TransferResponse> for TransferReport {
    fn from(response: TransferResponse) -> Self {
        let message = if response.done {
            None
        } else {
            Some(crate::messages::TRANSFER_ERROR.to_string())
        };
        Self {
            done: Some(response.done),
            message,
        }
    }
}
