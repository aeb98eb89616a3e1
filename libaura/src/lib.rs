//! Aura - client core for a small banking demo
//!
//! Login, balance and transfer screens backed by a JSON REST API. The
//! transport client talks HTTP, the repository folds responses into
//! `Outcome`s, and the screen state holders sequence repository calls and
//! publish immutable snapshots for a UI to render.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod messages;
pub mod outcome;
pub mod repository;
pub mod screens;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AuraError, Result};
pub use outcome::Outcome;
pub use repository::BankRepository;
pub use service::AuraService;
pub use types::{BalanceReport, LoginReport, Session, TransferReport};
