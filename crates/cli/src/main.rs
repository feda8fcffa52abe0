//! Gallery CLI - drive the cart and wishlist from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add an original and a canvas print to the cart
//! gallery cart add --id 7GxQ2 --title "Harbour at Dusk" --artist "M. Reyes" --price 1200
//! gallery cart add-print --id 7GxQ2 --title "Harbour at Dusk" --artist "M. Reyes" --size a3 --type canvas
//!
//! # Save a print for later and list everything saved for that artwork
//! gallery wishlist add-print --id 7GxQ2 --title "Harbour at Dusk" --artist "M. Reyes" --size a2 --type paper
//! gallery wishlist show --artwork 7GxQ2
//!
//! # Print the checkout payload
//! gallery checkout
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, update, remove and list cart lines
//! - `wishlist` - Save, remove and list wishlist entries
//! - `prints` - Show the print price table
//! - `checkout` - Emit the checkout snapshot and payment line items as JSON
//!
//! State is kept in `GALLERY_DATA_DIR` (default `.gallery`) between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use gallery_storefront::config::LogFormat;
use gallery_storefront::{StorefrontConfig, StorefrontState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::cart::CartAction;
use commands::wishlist::WishlistAction;

#[derive(Parser)]
#[command(name = "gallery")]
#[command(author, version, about = "Gallery storefront cart and wishlist tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Show print prices for every size and type
    Prints,
    /// Print the checkout payload for the current cart as JSON
    Checkout,
}

fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let result: Result<(), Box<dyn std::error::Error>> = config
        .map_err(Into::into)
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, writing to stderr so stdout stays clean.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gallery_cli=info,gallery_storefront=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = StorefrontState::open(config)?;

    match cli.command {
        Commands::Cart { action } => commands::cart::run(&mut state, action)?,
        Commands::Wishlist { action } => commands::wishlist::run(&mut state, action)?,
        Commands::Prints => commands::prints::show(&state)?,
        Commands::Checkout => commands::checkout::show(&state)?,
    }

    if !state.cart().is_persistent() || !state.wishlist().is_persistent() {
        tracing::warn!("Changes could not be saved and will be lost when this command exits");
    }

    Ok(())
}
