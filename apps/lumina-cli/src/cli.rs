//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Backend;

/// Lumina storefront cart.
#[derive(Debug, Parser)]
#[command(name = "lumina", version, about)]
pub struct Cli {
    /// Config file (default: <config dir>/lumina.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Persistence backend
    #[arg(long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Directory holding the cart data
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage key of the cart slot
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a product, or one more if it is already in the cart
    Add {
        id: String,
        #[arg(long)]
        name: String,
        /// Unit price in đồng
        #[arg(long)]
        price: i64,
        #[arg(long, default_value = "")]
        image: String,
    },

    /// Show the cart
    List,

    /// Show the item count and total
    Total,

    /// Check whether a product is in the cart
    Contains { id: String },

    /// Set a line item's quantity (1-99)
    Set {
        id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },

    /// Increase a line item's quantity by one
    Inc { id: String },

    /// Decrease a line item's quantity by one
    Dec { id: String },

    /// Remove a line item
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove every line item
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Start checkout
    Checkout,

    /// Apply a JSON cart command, e.g. '{"op":"increase","id":"p1"}'
    Apply { command: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "lumina", "--json", "add", "p1", "--name", "Serum X", "--price", "250000",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Add {
                id,
                name,
                price,
                image,
            } => {
                assert_eq!((id.as_str(), name.as_str()), ("p1", "Serum X"));
                assert_eq!(price, 250_000);
                assert!(image.is_empty());
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_quantity() {
        let cli = Cli::try_parse_from(["lumina", "set", "p1", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Set { ref id, quantity: -1 } if id == "p1"
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["lumina", "list", "--backend", "sqlite", "--key", "k"]).unwrap();
        assert_eq!(cli.backend, Some(Backend::Sqlite));
        assert_eq!(cli.key.as_deref(), Some("k"));
        assert!(matches!(cli.command, Command::List));
    }
}
