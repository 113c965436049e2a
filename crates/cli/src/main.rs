//! Tomtech CLI - Catalog maintenance and admin tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the catalog and where it was loaded from
//! tomtech catalog list
//!
//! # Reset the catalog to the built-in defaults
//! tomtech catalog seed --force
//!
//! # Push the local catalog to the realtime database
//! tomtech catalog sync
//!
//! # Hash the admin password
//! tomtech admin hash-password < password.txt
//!
//! # Order link for two of product 1
//! tomtech checkout-link 1 1
//! ```
//!
//! Results go to stdout; logs go to stderr (`RUST_LOG` to adjust).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tomtech_core::{Availability, Price, ProductDraft, ProductId, parse_tags};
use tomtech_storefront::checkout::MessageFormat;
use tomtech_storefront::config::{CatalogConfig, get_env_or_default, get_required_env};

mod commands;

#[derive(Parser)]
#[command(name = "tomtech")]
#[command(author, version, about = "Tomtech catalog and admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Admin account tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Print the WhatsApp order link for product ids (repeat an id for quantity)
    CheckoutLink {
        #[arg(required = true)]
        ids: Vec<ProductId>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load and print the catalog
    List,
    /// Write the default catalog
    Seed {
        /// Overwrite an existing catalog
        #[arg(long)]
        force: bool,
    },
    /// Push the current catalog to the remote store
    Sync,
    /// Write the catalog as pretty JSON
    Export { path: PathBuf },
    /// Add a product
    Add(AddArgs),
    /// Remove a product
    Remove { id: ProductId },
}

#[derive(clap::Args)]
struct AddArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    price: Price,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long)]
    category: Option<String>,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    tags: String,

    #[arg(long)]
    out_of_stock: bool,

    #[arg(long)]
    featured: bool,

    /// Image URL (repeatable)
    #[arg(long = "image")]
    images: Vec<String>,
}

impl From<AddArgs> for ProductDraft {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            price: args.price,
            description: args.description,
            category: args.category,
            tags: parse_tags(&args.tags),
            availability: if args.out_of_stock {
                Availability::OutOfStock
            } else {
                Availability::InStock
            },
            featured: args.featured,
            images: args.images,
        }
    }
}

#[derive(Subcommand)]
enum AdminAction {
    /// Read a password from stdin and print its Argon2 hash
    HashPassword,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tomtech=info,tomtech_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    match cli.command {
        Commands::Catalog { action } => {
            let store = commands::catalog::open_store()?;
            let out = stdout.lock();
            match action {
                CatalogAction::List => commands::catalog::list(&store, out).await?,
                CatalogAction::Seed { force } => {
                    commands::catalog::seed(&store, force, out).await?;
                }
                CatalogAction::Sync => commands::catalog::sync(&store, out).await?,
                CatalogAction::Export { path } => {
                    commands::catalog::export(&store, &path, out).await?;
                }
                CatalogAction::Add(args) => {
                    commands::catalog::add(&store, args.into(), out).await?;
                }
                CatalogAction::Remove { id } => commands::catalog::remove(&store, id, out).await?,
            }
        }
        Commands::Admin { action } => match action {
            AdminAction::HashPassword => {
                commands::admin::hash_password(std::io::stdin().lock(), stdout.lock())?;
            }
        },
        Commands::CheckoutLink { ids } => {
            let config = CatalogConfig::from_env()?;
            let store = commands::catalog::open_store()?;
            let format = MessageFormat::new(
                get_env_or_default("CURRENCY_LABEL", "KES"),
                &get_required_env("STOREFRONT_BASE_URL")?,
            );
            commands::checkout::checkout_link(
                &store,
                &config.default_whatsapp_number,
                &format,
                &ids,
                stdout.lock(),
            )
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "tomtech",
            "catalog",
            "add",
            "--name",
            "LED HEADLIGHT KIT",
            "--price",
            "3500",
            "--tags",
            "led, lighting",
            "--out-of-stock",
            "--image",
            "images/led.jpg",
        ]);
        let Ok(Cli {
            command: Commands::Catalog {
                action: CatalogAction::Add(args),
            },
        }) = cli
        else {
            panic!("expected catalog add");
        };

        let draft = ProductDraft::from(args);
        assert_eq!(draft.price, Price::from_units(3500));
        assert_eq!(draft.tags, vec!["led", "lighting"]);
        assert_eq!(draft.availability, Availability::OutOfStock);
        assert_eq!(draft.images, vec!["images/led.jpg"]);
    }

    #[test]
    fn test_checkout_link_requires_ids() {
        assert!(Cli::try_parse_from(["tomtech", "checkout-link"]).is_err());
        assert!(Cli::try_parse_from(["tomtech", "checkout-link", "1", "x"]).is_err());
    }
}
