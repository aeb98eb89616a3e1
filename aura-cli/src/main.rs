//! aura - Drive the Aura login, balance and transfer screens from a terminal

use clap::{Parser, Subcommand};
use libaura::logging::{self, LogFormat};
use libaura::screens::Status;
use libaura::{AuraError, AuraService, Result, Session};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "aura")]
#[command(about = "Log in, check the main account balance and send transfers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,

    /// Log output format (text, json or pretty)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and show the main account balance
    Login {
        /// User identifier
        #[arg(long)]
        id: String,

        /// Password
        #[arg(long, env = "AURA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the main account balance for a logged-in user
    Balance {
        /// Session identifier returned by `aura login`
        #[arg(long)]
        session: String,
    },

    /// Transfer an amount to another user
    Transfer {
        /// Session identifier returned by `aura login`
        #[arg(long)]
        session: String,

        /// Recipient identifier
        #[arg(long)]
        recipient: String,

        /// Amount to send, "12.50" or "12,50"
        #[arg(long)]
        amount: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logging = logging::config_from_env();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    logging.init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let json = match cli.format.as_str() {
        "text" => false,
        "json" => true,
        other => {
            return Err(AuraError::InvalidInput(format!(
                "Invalid format '{}'. Valid options: text, json",
                other
            )))
        }
    };

    let service = AuraService::new()?;

    match cli.command {
        Command::Login { id, password } => {
            if id.is_empty() || password.is_empty() {
                return Err(AuraError::InvalidInput(
                    "id and password must not be empty".to_string(),
                ));
            }
            let state = service.login_screen().submit(&id, &password).await;
            print_state(json, &state, &state.status, || {
                format!(
                    "Logged in as {}\nBalance: {}",
                    id,
                    format_balance(state.balance())
                )
            })?;
            check("Login", &state.status)
        }
        Command::Balance { session } => {
            let state = service.home_screen(Session::new(session)).load().await;
            print_state(json, &state, &state.status, || {
                format!("Balance: {}", format_balance(state.balance()))
            })?;
            check("Balance", &state.status)
        }
        Command::Transfer {
            session,
            recipient,
            amount,
        } => {
            if recipient.is_empty() || amount.is_empty() {
                return Err(AuraError::InvalidInput(
                    "recipient and amount must not be empty".to_string(),
                ));
            }
            let screen = service.transfer_screen(Session::new(session));
            let state = screen.submit(&recipient, &amount).await;
            print_state(json, &state, &state.status, || {
                format!(
                    "Sent {} to {}\nBalance: {}",
                    amount.trim(),
                    recipient,
                    format_balance(state.balance())
                )
            })?;
            check("Transfer", &state.status)
        }
    }
}

/// Print the final screen state
///
/// Text output is only written for a succeeded screen; failures are
/// reported on stderr by `main`.
fn print_state<S: Serialize, T>(
    json: bool,
    state: &S,
    status: &Status<T>,
    text: impl FnOnce() -> String,
) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(state)
            .map_err(|e| AuraError::InvalidInput(format!("Failed to render state: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    if matches!(status, Status::Succeeded(_)) {
        println!("{}", text());
    }
    Ok(())
}

fn check<T>(screen: &str, status: &Status<T>) -> Result<()> {
    match status {
        Status::Failed(message) => Err(AuraError::ScreenFailed {
            screen: screen.to_string(),
            message: message.clone(),
        }),
        _ => Ok(()),
    }
}

fn format_balance(balance: Option<f64>) -> String {
    match balance {
        Some(balance) => format!("{:.2}", balance),
        None => "unavailable".to_string(),
    }
}
