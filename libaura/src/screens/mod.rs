//! Screen state holders
//!
//! Each screen keeps an immutable snapshot of what the UI should show and
//! publishes every replacement through a `watch` channel:
//!
//! - Actions: what happened (input change, submit, result, reset)
//! - State: what is true right now
//! - Reducer: pure function (State, Action) -> State
//!
//! The holders own the side effects: they call the repository between the
//! `Submitted` action and the result action, and wrap those calls in
//! `hold_at_least` so a loading indicator stays up for a minimum time.

pub mod home;
pub mod loading;
pub mod login;
pub mod status;
pub mod store;
pub mod transfer;

pub use home::{HomeScreen, HomeState};
pub use login::{LoginScreen, LoginState, LoginSummary};
pub use status::Status;
pub use store::{Reducer, Store};
pub use transfer::{TransferScreen, TransferState, TransferSummary};
