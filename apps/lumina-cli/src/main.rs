//! # Lumina Cart CLI Entry Point
//!
//! The actual setup is in lib.rs so it can be exercised from tests.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    lumina_cli::run().await
}
