//! # Seed Data Generator
//!
//! Populates the database with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p storefront-db --bin seed
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```

use anyhow::Context;
use rust_decimal::Decimal;
use std::env;
use storefront_core::Catalog;
use storefront_db::{Database, DbConfig};

/// Demo catalog: (title, price, inventory_count).
const DEMO_PRODUCTS: &[(&str, &str, i64)] = &[
    ("Espresso Beans 250g", "8.50", 40),
    ("Espresso Beans 1kg", "27.00", 15),
    ("Filter Roast 250g", "7.25", 32),
    ("Ceramic Mug", "12.00", 24),
    ("Travel Tumbler", "19.99", 18),
    ("Pour-Over Kettle", "45.00", 6),
    ("Hand Grinder", "59.00", 9),
    ("Paper Filters (100)", "4.75", 120),
    ("Digital Scale", "34.50", 5),
    ("Gift Card", "25.00", 0),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./storefront_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Storefront Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .context("failed to open database")?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating products...");

    let catalog = Catalog::new(db.store());
    for (title, price, inventory) in DEMO_PRODUCTS {
        let price: Decimal = price.parse().context("bad demo price")?;
        let product = catalog
            .create_product(title, price, *inventory)
            .await
            .with_context(|| format!("failed to create '{title}'"))?;
        println!("  + {} @ {} (stock {})", product.title, product.price, product.inventory_count);
    }

    println!();
    println!("✓ Seeded {} products", DEMO_PRODUCTS.len());

    db.close().await;
    Ok(())
}
