//! # Seed Data Loader
//!
//! Initializes a storefront database with the sample catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (GLOW_DB_PATH or the platform data dir)
//! cargo run -p glow-db --bin seed
//!
//! # Specify database path
//! cargo run -p glow-db --bin seed -- --db ./data/glow.db
//!
//! # Replace an existing catalog
//! cargo run -p glow-db --bin seed -- --force
//! ```
//!
//! An existing products record is left alone unless `--force` is given.
//! Cart, wishlist, user and order records are never touched.

use std::env;

use glow_core::persistence::encode;
use glow_core::sample::{categories, sample_catalog, BRANDS};
use glow_core::RecordKey;
use glow_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut db_path: Option<String> = None;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Glow Storefront Seed Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $GLOW_DB_PATH or app data dir)");
                println!("  -f, --force        Replace an existing products record");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = match db_path {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_env()?,
    };
    let path = config.database_path.clone();
    let db = Database::new(config).await?;

    let records = db.records();
    if records.get(RecordKey::Products).await?.is_some() && !force {
        println!("⚠ {} already has a catalog", path.display());
        println!("  Run with --force to replace it.");
        return Ok(());
    }

    let products = sample_catalog();
    records.put(RecordKey::Products, &encode(&products)?).await?;
    info!(products = products.len(), path = %path.display(), "Sample catalog written");

    println!("✓ Seeded {}", path.display());
    println!("  Products:   {}", products.len());
    println!("  Categories: {}", categories().len());
    println!("  Brands:     {}", BRANDS.join(", "));

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Default filter: `info,glow=debug,sqlx=warn`; override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,glow=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
