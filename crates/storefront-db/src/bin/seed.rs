//! # Seed Data Writer
//!
//! Writes the default catalog and coupons into a database file.
//!
//! ## Usage
//! ```bash
//! # Seed ./storefront_dev.db
//! cargo run -p storefront-db --bin seed
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//!
//! # Overwrite existing collections and clear the cart
//! cargo run -p storefront-db --bin seed -- --force
//! ```

use std::env;

use storefront_core::defaults::{default_coupons, default_products};
use storefront_db::{Database, DbConfig};

const DEFAULT_DB_PATH: &str = "./storefront_dev.db";

const HELP: &str = "\
Storefront Seed Data Writer

Usage: seed [OPTIONS]

Options:
  -d, --db <PATH>    Database file path (default: ./storefront_dev.db)
  -f, --force        Overwrite existing collections
  -h, --help         Show this help message";

struct SeedArgs {
    db_path: String,
    force: bool,
}

/// `None` when help was requested.
fn parse_args(mut args: impl Iterator<Item = String>) -> Option<SeedArgs> {
    let mut parsed = SeedArgs {
        db_path: DEFAULT_DB_PATH.to_string(),
        force: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" | "-d" => {
                if let Some(path) = args.next() {
                    parsed.db_path = path;
                }
            }
            "--force" | "-f" => parsed.force = true,
            "--help" | "-h" => return None,
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
    }

    Some(parsed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(SeedArgs { db_path, force }) = parse_args(env::args().skip(1)) else {
        println!("{}", HELP);
        return Ok(());
    };

    println!("🌱 Storefront Seed Data Writer");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Database ready");

    let collections = db.collections();

    if collections.is_initialized().await? && !force {
        println!("⚠ Database already has stored collections");
        println!("  Skipping seed. Pass --force to overwrite.");
        db.close().await;
        return Ok(());
    }

    let products = default_products();
    let coupons = default_coupons();

    collections.save_products(&products).await?;
    collections.save_coupons(&coupons).await?;
    collections.save_cart(&[]).await?;

    println!();
    println!("✓ Wrote {} products", products.len());
    for product in &products {
        println!(
            "  {:<4} {:<12} {:>10}  stock {:>3}  tiers {}",
            product.id,
            product.name,
            product.price.to_string(),
            product.stock,
            product.discounts.len()
        );
    }

    println!("✓ Wrote {} coupons", coupons.len());
    for coupon in &coupons {
        println!("  {:<12} {}", coupon.code, coupon.name);
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
