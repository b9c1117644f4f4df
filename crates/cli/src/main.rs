//! Shopcart CLI - Drive the cart store from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add a product with a structured price
//! shopcart add --id tea --name "Green tea" --price 150
//!
//! # Add a product whose price is scraped from display text
//! shopcart add --id tea --name "Green tea" --price-text "Price: 150 руб."
//!
//! # Remove a product entirely
//! shopcart remove tea
//!
//! # Show the cart (as on page load), optionally as the HTML fragment
//! shopcart show
//! shopcart show --html
//!
//! # Print the total
//! shopcart total
//! ```
//!
//! # Commands
//!
//! - `add` - Add one unit of a product
//! - `remove` - Remove a product
//! - `show` - Render the cart
//! - `total` - Print the cart total
//!
//! Configuration is read from `SHOPCART_*` environment variables (see
//! [`shopcart_storefront::config`]); `--data-dir` overrides the store location.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shopcart_core::Price;

mod commands;

#[derive(Parser)]
#[command(name = "shopcart")]
#[command(author, version, about = "Shopcart cart store tools")]
struct Cli {
    /// Directory holding the persisted cart (overrides `SHOPCART_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add(AddArgs),
    /// Remove a product, whatever its quantity
    Remove {
        /// Product ID
        id: String,
    },
    /// Render the cart
    Show {
        /// Print the HTML fragment instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Print the cart total
    Total,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Product ID
    #[arg(long)]
    pub id: String,

    /// Product display name
    #[arg(long)]
    pub name: String,

    /// Image reference (placeholder used when omitted)
    #[arg(long)]
    pub image: Option<String>,

    #[command(flatten)]
    pub price: PriceArgs,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PriceArgs {
    /// Unit price as a decimal amount
    #[arg(long)]
    pub price: Option<Price>,

    /// Display text to extract the price from (first run of digits)
    #[arg(long)]
    pub price_text: Option<String>,
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopcart_storefront=info,shopcart_cli=info".into());

    // Diagnostics go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, commands::CommandError> {
    let mut config = shopcart_storefront::CartConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Add(args) => commands::cart::add(&config, args),
        Commands::Remove { id } => commands::cart::remove(&config, &id),
        Commands::Show { html } => commands::cart::show(&config, html),
        Commands::Total => Ok(commands::cart::total(&config)),
    }
}
