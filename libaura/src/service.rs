//! Entry point wiring the client, repository and screens together
//!
//! `AuraService` owns the shared repository and hands out screen state
//! holders. The session is passed explicitly to the screens that need it,
//! never read from shared state.
//!
//! # Example
//!
//! ```no_run
//! use libaura::AuraService;
//!
//! # async fn example() -> libaura::Result<()> {
//! let service = AuraService::new()?;
//!
//! let login = service.login_screen();
//! let state = login.submit("alice", "secret").await;
//!
//! if let Some(session) = state.session() {
//!     let home = service.home_screen(session.clone());
//!     println!("{:?}", home.load().await.balance());
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::client::http::HttpBankClient;
use crate::client::BankClient;
use crate::screens::{HomeScreen, LoginScreen, TransferScreen};
use crate::{BankRepository, Config, Result, Session};

pub struct AuraService {
    config: Arc<Config>,
    repository: Arc<BankRepository>,
}

impl AuraService {
    /// Create a service from the default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration cannot be loaded or has an invalid server URL
    /// - The HTTP client cannot be built
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config)
    }

    /// Create a service talking HTTP to the configured server
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let client = HttpBankClient::from_config(&config)?;
        tracing::debug!("Using bank API at {}", client.base_url());
        Ok(Self::with_client(Arc::new(client), config))
    }

    /// Create a service on top of any client, e.g. a mock
    pub fn with_client(client: Arc<dyn BankClient>, config: Config) -> Self {
        Self {
            config: Arc::new(config),
            repository: Arc::new(BankRepository::new(client)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository(&self) -> &Arc<BankRepository> {
        &self.repository
    }

    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(Arc::clone(&self.repository), self.min_loading())
    }

    pub fn home_screen(&self, session: Session) -> HomeScreen {
        HomeScreen::new(Arc::clone(&self.repository), session, self.min_loading())
    }

    pub fn transfer_screen(&self, session: Session) -> TransferScreen {
        TransferScreen::new(Arc::clone(&self.repository), session, self.min_loading())
    }

    fn min_loading(&self) -> Duration {
        self.config.ui.min_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockBankClient;

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.ui.min_loading_ms = 0;
        config
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let mut config = quiet_config();
        config.server.base_url = "nowhere".to_string();
        assert!(AuraService::from_config(config).is_err());
    }

    #[test]
    fn test_from_config_builds_http_client() {
        assert!(AuraService::from_config(quiet_config()).is_ok());
    }

    #[tokio::test]
    async fn test_screens_share_repository() {
        let client = MockBankClient::with_balance(75.0);
        let service = AuraService::with_client(Arc::new(client), quiet_config());

        let home = service.home_screen(Session::new("alice"));
        home.load().await;

        let transfer = service.transfer_screen(Session::new("alice"));
        assert_eq!(transfer.initial_balance(), Some(75.0));
    }
}
