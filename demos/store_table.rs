//! Walkthrough: load stores into a table, show it, and exercise the copies.
//!
//! Run with `RUST_LOG=store_algos=debug` to see resize events on stderr.

use std::error::Error;
use std::io::IsTerminal;
use store_algos::{populate_table, Store, StoreTable};
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{fmt, EnvFilter};

// Eight stores: the 4th insert doubles 4 -> 8, the 7th doubles 8 -> 16.
const INPUT: &str = "Walmart\n1000.50\nTarget\n850.25\nCostco\n1200.00\nKroger\n500.75\n\
Publix\n700.00\nWegmans\n950.00\nAldi\n400.00\nLidl\n300.00";

fn init_logging() -> Result<(), SetGlobalDefaultError> {
    let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
    let subscriber = fmt::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let mut table = StoreTable::new();
    let added = populate_table(INPUT.as_bytes(), &mut table)?;
    tracing::info!(added, capacity = table.capacity(), "population complete");
    println!("{table}");

    let mut copied = table.clone();
    copied.insert(&Store::new("CopyTestStore", 999.99));
    println!("\nOriginal (unchanged):\n{table}");
    println!("Copy (with CopyTestStore):\n{copied}");

    if let Some(mut found) = table.find("Target") {
        let original_sales = found.sales();
        found.set_sales(0.0);
        let stored = table.find("Target").map(|s| s.sales());
        println!(
            "\nReturned copy now has sales {:.2}; table still has {:?} (was {:.2})",
            found.sales(),
            stored,
            original_sales
        );
    }

    if table.find("NonExistentStore").is_none() {
        println!("NonExistentStore correctly not found.");
    }
    Ok(())
}
