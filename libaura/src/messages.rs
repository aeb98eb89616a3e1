//! User-facing failure messages

/// Transport failure, unsuccessful status or missing body
pub const INVALID_DATA: &str = "Invalid data";

/// Credentials were rejected by the server
pub const LOGIN_FAILED: &str = "Login failed";

/// No account in the list is flagged main
pub const SERVER_ERROR: &str = "server error";

/// The server refused the transfer
pub const TRANSFER_ERROR: &str = "Transfer error";

/// Balance could not be fetched and no message came back with it
pub const BALANCE_ERROR: &str = "Balance unavailable";

/// Transfer amount is not a positive number
pub const INVALID_AMOUNT: &str = "Invalid amount";
