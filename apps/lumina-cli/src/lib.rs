//! # lumina-cli: Command-Line Adapter
//!
//! Binds command-line actions to cart operations and renders the results.
//!
//! ## Invocation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lumina remove p1                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. init_tracing()          RUST_LOG or "warn,lumina=info,sqlx=warn"   │
//! │  2. Cli::parse()                                                        │
//! │  3. CliConfig::load()       defaults → lumina.toml → LUMINA_* env      │
//! │     + flags, validate()                                                 │
//! │  4. Session::open()         file or sqlite backend, cart loaded        │
//! │  5. confirm prompt          "Bạn có chắc muốn xóa ...?" [y/N]          │
//! │  6. session.apply(Remove { id, confirmed })                            │
//! │  7. Report → stdout         notice text, or JSON with --json           │
//! │  8. exit code               0 ok / 1 refused / 2 storage or config     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lumina_core::notice::{CLEAR_CONFIRMATION_PROMPT, REMOVE_CONFIRMATION_PROMPT};
use lumina_core::{CartCommand, Price, Product};

use crate::cli::{Cli, Command};
use crate::config::CliConfig;
use crate::error::{exit_code_for, AppError, AppResult};
use crate::render::{confirm, Report, View};
use crate::session::Session;

/// Runs the adapter and returns the process exit code.
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match execute(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every cart operation
/// - Default: warnings, plus info from the lumina crates
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,lumina=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolves configuration, runs one command and prints its report.
pub async fn execute(cli: Cli) -> AppResult<u8> {
    let config = resolve_config(&cli)?;
    let mut session = Session::open(&config).await?;

    let result = dispatch(&mut session, &cli.command).await;
    session.close().await;
    let report = result?;

    report.write_to(&mut io::stdout().lock(), cli.json)?;
    Ok(exit_code_for(report.outcome.reason))
}

fn resolve_config(cli: &Cli) -> AppResult<CliConfig> {
    let mut config = CliConfig::load(cli.config.as_deref())?;

    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(key) = &cli.key {
        config.storage_key = key.clone();
    }

    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

async fn dispatch(session: &mut Session, command: &Command) -> AppResult<Report> {
    let report = match command {
        Command::Add {
            id,
            name,
            price,
            image,
        } => {
            let product = Product::new(id.clone(), name.clone(), Price::new(*price), image.clone());
            apply(session, CartCommand::Add { product }).await
        }
        Command::Set { id, quantity } => {
            let set = CartCommand::SetQuantity {
                id: id.clone(),
                quantity: *quantity,
            };
            apply(session, set).await
        }
        Command::Inc { id } => apply(session, CartCommand::Increase { id: id.clone() }).await,
        Command::Dec { id } => apply(session, CartCommand::Decrease { id: id.clone() }).await,
        Command::List => Report::view(session.cart(), View::Items),
        Command::Total => Report::view(session.cart(), View::Totals),
        Command::Contains { id } => Report {
            contains: Some(session.cart().contains(id)),
            ..Report::view(session.cart(), View::Contains)
        },
        Command::Checkout => Report::checkout(&session.checkout(), session.cart()),
        Command::Remove { id, yes } => {
            // An absent id is reported as not found without prompting.
            let confirmed =
                session.cart().contains(id) && (*yes || ask(REMOVE_CONFIRMATION_PROMPT)?);
            let remove = CartCommand::Remove {
                id: id.clone(),
                confirmed,
            };
            apply(session, remove).await
        }
        Command::Clear { yes } => {
            let confirmed =
                session.cart().is_empty() || *yes || ask(CLEAR_CONFIRMATION_PROMPT)?;
            apply(session, CartCommand::Clear { confirmed }).await
        }
        Command::Apply { command } => {
            let cart_command: CartCommand =
                serde_json::from_str(command).map_err(AppError::InvalidCommand)?;
            apply(session, cart_command).await
        }
    };

    Ok(report)
}

async fn apply(session: &mut Session, command: CartCommand) -> Report {
    let result = session.apply(command).await;
    Report::change(&result, session.cart())
}

fn ask(prompt: &str) -> io::Result<bool> {
    confirm(prompt, &mut io::stdin().lock(), &mut io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;
    use lumina_core::ErrorKind;

    async fn run(session: &mut Session, args: &[&str]) -> Report {
        let cli = Cli::try_parse_from(std::iter::once("lumina").chain(args.iter().copied()))
            .unwrap();
        dispatch(session, &cli.command).await.unwrap()
    }

    #[tokio::test]
    async fn test_quantity_subcommands_reach_the_cart() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            backend: Backend::File,
            data_dir: Some(dir.path().to_path_buf()),
            ..CliConfig::default()
        };
        let mut session = Session::open(&config).await.unwrap();

        let report = run(&mut session, &["add", "p1", "--name", "A", "--price", "100"]).await;
        assert!(report.outcome.ok);
        assert_eq!(report.cart.item_count, 1);

        assert_eq!(run(&mut session, &["set", "p1", "5"]).await.cart.item_count, 5);
        assert_eq!(run(&mut session, &["inc", "p1"]).await.cart.item_count, 6);
        assert_eq!(run(&mut session, &["dec", "p1"]).await.cart.item_count, 5);

        let refused = run(&mut session, &["inc", "ghost"]).await;
        assert!(!refused.outcome.ok);
        assert_eq!(refused.outcome.reason, Some(ErrorKind::NotFound));

        let reopened = Session::open(&config).await.unwrap();
        assert_eq!(reopened.cart().item_count(), 5);
    }
}
