//! # Seed Snapshot Generator
//!
//! Writes a snapshot with purchase history for development.
//!
//! ## Usage
//! ```bash
//! # 20 simulated checkouts into the configured snapshot file
//! cargo run -p grocer-store --bin seed
//!
//! # Custom amount and location
//! cargo run -p grocer-store --bin seed -- --checkouts 50 --snapshot ./cart_data.json
//! ```
//!
//! ## Generated History
//! Each checkout buys 1-4 lines drawn from the default catalog plus a few
//! custom items, so the frequency view has a clear ranking and at least one
//! custom item competes with the defaults. A half-filled cart is left in
//! place at the end.

use std::env;
use std::path::PathBuf;

use grocer_store::grocer_core::{ItemId, Money};
use grocer_store::{Session, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Items that are not in the default catalog.
const CUSTOM_ITEMS: &[(&str, i64)] = &[("Mango", 40), ("Greek Yogurt", 95), ("Coffee Beans", 320)];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut checkouts: usize = 20;
    let mut snapshot: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--checkouts" | "-n" => {
                if i + 1 < args.len() {
                    checkouts = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--snapshot" | "-s" => {
                if i + 1 < args.len() {
                    snapshot = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Grocer Seed Snapshot Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --checkouts <N>    Checkouts to simulate (default: 20)");
                println!("  -s, --snapshot <PATH>  Snapshot file (default: from config)");
                println!("  -c, --config <PATH>    Config file (default: platform config dir)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = StoreConfig::load_or_default(config_path);
    if snapshot.is_some() {
        config.snapshot.path = snapshot;
    }
    // One write at the end instead of one per line
    config.snapshot.autosave = false;

    let session = Session::new(&config);
    let Some(file) = session.snapshot_file() else {
        return Err("no snapshot path; pass --snapshot".into());
    };

    println!("🌱 Grocer Seed Snapshot Generator");
    println!("=================================");
    println!("Snapshot:  {}", file.path().display());
    println!("Checkouts: {}", checkouts);
    println!();

    let catalog_size = session.with_store(|store| store.catalog().default_count());

    for checkout in 0..checkouts {
        let lines = 1 + (checkout * 7) % 4;
        for line in 0..lines {
            let seed = checkout * 31 + line * 17;
            add_line(&session, seed, catalog_size)?;
        }

        session.checkout_start()?;
        let receipt = session.checkout_process();
        info!(
            checkout,
            lines = receipt.lines.len(),
            total = %receipt.grand_total,
            "Simulated checkout"
        );
    }

    // Leave something in the cart
    for line in 0..3 {
        add_line(&session, checkouts * 31 + line * 13, catalog_size)?;
    }

    let path = session.snapshot_save(None)?;

    println!("✓ Saved {}", path.display());
    println!();
    println!("Top items:");
    for item in session.list_frequent_items().iter().take(5) {
        println!("  {} {:<20} {}", item.icon, item.name, item.purchase_count);
    }

    Ok(())
}

/// Adds one pseudo-random line derived from `seed`.
fn add_line(
    session: &Session,
    seed: usize,
    catalog_size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let quantity = 1 + (seed % 3) as i64;

    // Roughly one line in six is a custom item
    if seed % 6 == 0 {
        let (name, price) = CUSTOM_ITEMS[(seed / 6) % CUSTOM_ITEMS.len()];
        session.cart_add(name, Some(Money::from_major(price)), quantity, None)?;
    } else {
        // Skew towards low ids so the ranking is not flat
        let id = ((seed * seed) % (catalog_size * catalog_size)) / (catalog_size * 2);
        let id = id.min(catalog_size - 1) as ItemId;
        let item = session.get_item(id)?;
        session.cart_add(&item.name, None, quantity, Some(id))?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,grocer=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
