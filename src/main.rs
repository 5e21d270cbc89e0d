//! Inventory CLI: the `inventory` command.
//!
//! Loads the inventory file, applies a fixed set of stock movements, prints
//! a stock summary and saves the result.

use anyhow::{Context, Result};
use clap::Parser;
use inventory_store::telemetry::{self, LogFormat};
use inventory_store::{
    Inventory, InventoryConfig, DEFAULT_INVENTORY_FILE, DEFAULT_LOW_STOCK_THRESHOLD,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "inventory",
    about = "Track item quantities in a JSON inventory file",
    version
)]
struct Cli {
    /// Path to the inventory JSON file
    #[arg(long, default_value = DEFAULT_INVENTORY_FILE)]
    file: PathBuf,

    /// Report items with stock strictly below this value
    #[arg(long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD, allow_negative_numbers = true)]
    threshold: i64,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    let inventory = Inventory::open(InventoryConfig {
        path: cli.file,
        low_stock_threshold: cli.threshold,
    })
    .context("failed to open inventory")?;

    inventory.add("apple", 10, None)?;
    inventory.add("banana", -2, None)?;
    inventory.add("orange", 6, None)?;
    inventory.remove("apple", 3)?;
    inventory.remove("grapes", 1)?;

    println!("Apple stock: {}", inventory.get_quantity("apple"));
    println!("Low items: {:?}", inventory.check_low_default());

    inventory
        .save_default()
        .with_context(|| format!("failed to save {}", inventory.config().path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    inventory.write_report(&mut out)?;
    out.flush()?;

    Ok(())
}
