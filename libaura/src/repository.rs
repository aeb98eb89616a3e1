//! Bank repository
//!
//! Translates each transport operation into an `Outcome`. Every transport
//! failure, unsuccessful status or missing body becomes a `Failure` with a
//! generic message; nothing is retried.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::client::{ApiResponse, BankClient};
use crate::error::ClientError;
use crate::messages;
use crate::outcome::Outcome;
use crate::types::{
    BalanceReport, Credentials, LoginReport, Session, TransferReport, TransferRequest,
};

pub struct BankRepository {
    client: Arc<dyn BankClient>,
    last_balance: Mutex<Option<f64>>,
}

impl BankRepository {
    pub fn new(client: Arc<dyn BankClient>) -> Self {
        Self {
            client,
            last_balance: Mutex::new(None),
        }
    }

    /// Check credentials
    ///
    /// `Success` only when the server grants access. A refusal is a
    /// `Failure` carrying the login-failed message.
    pub async fn login(&self, id: &str, password: &str) -> Outcome<LoginReport> {
        let credentials = Credentials::new(id, password);
        let response = self.client.authenticate(&credentials).await;

        match success_body(response, "login") {
            Some(body) if body.granted => Outcome::Success(LoginReport { granted: true }),
            Some(_) => {
                debug!("Login refused for {}", id);
                Outcome::failure(messages::LOGIN_FAILED)
            }
            None => Outcome::failure(messages::INVALID_DATA),
        }
    }

    /// Fetch the balance of the session's main account
    ///
    /// A list without a main account is still a `Success`, with the balance
    /// absent and a message set. Only a found balance updates the cache.
    pub async fn balance(&self, session: &Session) -> Outcome<BalanceReport> {
        let response = self.client.fetch_accounts(&session.id).await;

        let Some(accounts) = success_body(response, "accounts") else {
            return Outcome::failure(messages::INVALID_DATA);
        };

        let report = BalanceReport::from_accounts(&accounts);
        match report.balance {
            Some(balance) => self.remember_balance(balance),
            None => warn!("No main account among {} accounts", accounts.len()),
        }
        Outcome::Success(report)
    }

    /// Send money from the session's account to `recipient`
    pub async fn transfer(
        &self,
        session: &Session,
        recipient: &str,
        amount: f64,
    ) -> Outcome<TransferReport> {
        let request = TransferRequest {
            sender: session.id.clone(),
            recipient: recipient.to_string(),
            amount,
        };
        let response = self.client.submit_transfer(&request).await;

        match success_body(response, "transfer") {
            Some(body) => Outcome::Success(TransferReport::from(body)),
            None => Outcome::failure(messages::INVALID_DATA),
        }
    }

    /// Balance seen by the last successful `balance` call
    pub fn current_balance(&self) -> Option<f64> {
        *self
            .last_balance
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn remember_balance(&self, balance: f64) {
        *self
            .last_balance
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(balance);
    }
}

/// Body of a successful response, logging why there is none otherwise
fn success_body<T>(
    response: Result<ApiResponse<T>, ClientError>,
    operation: &str,
) -> Option<T> {
    match response {
        Ok(response) => {
            let status = response.status;
            let succeeded = response.is_success();
            let body = response.into_success_body();
            if body.is_none() {
                if succeeded {
                    warn!("{} returned status {} without a body", operation, status);
                } else {
                    warn!("{} returned status {}", operation, status);
                }
            }
            body
        }
        Err(e) => {
            warn!("{} failed: {}", operation, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockBankClient, MockConfig, MockReply};
    use crate::types::{AccountResponse, LoginResponse, TransferResponse};

    fn repository(client: &MockBankClient) -> BankRepository {
        BankRepository::new(Arc::new(client.clone()))
    }

    fn account(id: &str, main: bool, balance: f64) -> AccountResponse {
        AccountResponse {
            id: id.to_string(),
            main,
            balance,
        }
    }

    #[tokio::test]
    async fn test_login_granted() {
        let client = MockBankClient::new(MockConfig::default());
        let repo = repository(&client);

        let outcome = repo.login("identifier", "password").await;
        assert_eq!(outcome, Outcome::Success(LoginReport { granted: true }));
        assert_eq!(client.login_requests(), vec![Credentials::new("identifier", "password")]);
    }

    #[tokio::test]
    async fn test_login_refused() {
        let client = MockBankClient::new(MockConfig::default())
            .with_login(MockReply::ok(LoginResponse { granted: false }));

        let outcome = repository(&client).login("identifier", "password").await;
        assert_eq!(outcome, Outcome::failure("Login failed"));
    }

    #[tokio::test]
    async fn test_login_bad_request() {
        let client = MockBankClient::new(MockConfig::default()).with_login(MockReply::status(400));

        let outcome = repository(&client).login("identifier", "password").await;
        assert_eq!(outcome, Outcome::failure("Invalid data"));
    }

    #[tokio::test]
    async fn test_login_missing_body_and_network_error() {
        let client = MockBankClient::new(MockConfig::default()).with_login(MockReply::empty());
        assert_eq!(
            repository(&client).login("id", "pw").await,
            Outcome::failure("Invalid data")
        );

        let client = MockBankClient::new(MockConfig::default())
            .with_login(MockReply::network_error("connection refused"));
        assert_eq!(
            repository(&client).login("id", "pw").await,
            Outcome::failure("Invalid data")
        );
    }

    #[tokio::test]
    async fn test_error_status_body_is_ignored() {
        let client = MockBankClient::new(MockConfig::default()).with_login(MockReply::Respond(
            ApiResponse {
                status: 503,
                body: Some(LoginResponse { granted: true }),
            },
        ));

        let outcome = repository(&client).login("identifier", "password").await;
        assert_eq!(outcome, Outcome::failure("Invalid data"));
    }

    #[tokio::test]
    async fn test_balance_main_account() {
        let client = MockBankClient::new(MockConfig::default())
            .with_accounts(MockReply::ok(vec![account("identifiant", true, 100.0)]));
        let repo = repository(&client);

        let outcome = repo.balance(&Session::new("identifiant")).await;
        assert_eq!(
            outcome,
            Outcome::Success(BalanceReport {
                balance: Some(100.0),
                message: None,
            })
        );
        assert_eq!(repo.current_balance(), Some(100.0));
        assert_eq!(client.account_lookups(), vec!["identifiant".to_string()]);
    }

    #[tokio::test]
    async fn test_balance_without_main_account() {
        let client = MockBankClient::new(MockConfig::default())
            .with_accounts(MockReply::ok(vec![account("a1", false, 5.0)]));
        let repo = repository(&client);

        let report = repo.balance(&Session::new("alice")).await.success().unwrap();
        assert_eq!(report.balance, None);
        assert_eq!(report.message.as_deref(), Some("server error"));
        assert_eq!(repo.current_balance(), None);
    }

    #[tokio::test]
    async fn test_balance_error_keeps_cached_value() {
        let client = MockBankClient::with_balance(42.0);
        let repo = repository(&client);
        repo.balance(&Session::new("alice")).await;

        let failing = MockBankClient::new(MockConfig::default())
            .with_accounts(MockReply::status(400));
        let repo_failing = BankRepository {
            client: Arc::new(failing),
            last_balance: Mutex::new(repo.current_balance()),
        };

        let outcome = repo_failing.balance(&Session::new("alice")).await;
        assert_eq!(outcome, Outcome::failure("Invalid data"));
        assert_eq!(repo_failing.current_balance(), Some(42.0));
    }

    #[tokio::test]
    async fn test_transfer_done() {
        let client = MockBankClient::new(MockConfig::default());
        let repo = repository(&client);

        let outcome = repo.transfer(&Session::new("idendifiant1"), "idendifiant2", 100.0).await;
        assert_eq!(
            outcome,
            Outcome::Success(TransferReport {
                done: Some(true),
                message: None,
            })
        );
        assert_eq!(
            client.transfer_requests(),
            vec![TransferRequest {
                sender: "idendifiant1".to_string(),
                recipient: "idendifiant2".to_string(),
                amount: 100.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_transfer_refused() {
        let client = MockBankClient::new(MockConfig::default())
            .with_transfer(MockReply::ok(TransferResponse { done: false }));

        let report = repository(&client)
            .transfer(&Session::new("1234"), "5678", 100.0)
            .await
            .success()
            .unwrap();
        assert_eq!(report.done, Some(false));
        assert!(report.message.is_some());
    }

    #[tokio::test]
    async fn test_transfer_bad_request() {
        let client =
            MockBankClient::new(MockConfig::default()).with_transfer(MockReply::status(400));

        let outcome = repository(&client).transfer(&Session::new("1234"), "5678", 100.0).await;
        assert_eq!(outcome, Outcome::failure("Invalid data"));
    }
}
