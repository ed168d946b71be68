//! keygate - OS keychain entries behind device authentication.
//!
//! Every read, write or delete of a keychain entry first passes an
//! authentication gate. A successful challenge can be cached for a time
//! window (`--cache-for`) or a number of later operations (`--cache-n`).

mod commands;
mod config;
mod password;

use std::io;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use keygate_core::{AuthGate, CacheRequest, Credentials, KeyringStore, PasscodeChallenger};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::Context;
use config::Config;

/// A tool for managing keychain items with device authentication
#[derive(Parser, Debug)]
#[command(name = "keygate", version, about, long_about = None)]
struct Cli {
    /// Account name
    #[arg(short, long, global = true, env = "KEYGATE_ACCOUNT")]
    account: Option<String>,

    /// Service name (required for add, get, rm)
    #[arg(short, long, global = true, default_value = "")]
    service: String,

    /// Label distinguishing several items of one service and account
    #[arg(short, long, global = true, default_value = "")]
    label: String,

    /// Cache auth for time (e.g. 1h, 10m, 10s), use 0 to invalidate
    #[arg(long, global = true, value_name = "DURATION")]
    cache_for: Option<String>,

    /// Cache auth for N auth requests, use 0 to invalidate
    #[arg(long = "cache-n", global = true, value_name = "N")]
    cache_n: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a generic password item
    #[command(visible_aliases = ["a", "put", "set"])]
    Add {
        /// Password (if omitted: will be prompted (safest way), use '-' for stdin)
        #[arg(short, long)]
        password: Option<String>,

        /// Update existing keychain item if it exists already
        #[arg(short, long)]
        update: bool,
    },

    /// Get a generic password item
    #[command(visible_aliases = ["g", "find"])]
    Get,

    /// Delete a generic password item
    #[command(visible_aliases = ["d", "del", "delete", "remove"])]
    Rm,

    /// Manage the device passcode used for authentication
    Passcode {
        #[command(subcommand)]
        action: PasscodeAction,
    },

    /// Show the cached auth state for the account
    Status,
}

#[derive(Subcommand, Debug)]
enum PasscodeAction {
    /// Set or change the device passcode
    Set,
    /// Remove the device passcode
    Clear,
}

/// Initialize the tracing subscriber for logging
fn init_tracing(verbose: bool) {
    // RUST_LOG takes precedence over --verbose
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn prompt_hidden(prompt: &str) -> io::Result<String> {
    rpassword::prompt_password(prompt)
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let account = cli
        .account
        .or(config.default_account)
        .unwrap_or_default();
    debug!(account = %account, command = ?cli.command, "starting");

    let store = KeyringStore::new();
    let passcodes = PasscodeChallenger::new(store, prompt_hidden).with_tries(config.passcode_tries);
    let ctx = Context {
        gate: AuthGate::new(store, &passcodes),
        credentials: Credentials::new(store),
        account,
        service: cli.service,
        label: cli.label,
        cache: CacheRequest::new(cli.cache_for, cli.cache_n),
    };

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Add { password, update } => {
            commands::add::run(&ctx, password.as_deref(), update, &mut out)
        }
        Commands::Get => commands::get::run(&ctx, &mut out),
        Commands::Rm => commands::rm::run(&ctx, &mut out),
        Commands::Passcode { action } => match action {
            PasscodeAction::Set => commands::passcode::set(&ctx, &passcodes, prompt_hidden, &mut out),
            PasscodeAction::Clear => commands::passcode::clear(&ctx, &passcodes, &mut out),
        },
        Commands::Status => commands::status::run(&ctx, &mut out),
    }
}

fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
