//! Command-line valuation of a base64 item batch.
//!
//! Usage: networth-core <prices.json> <items.b64> [catalog.json] [--tables tables.ron] [--log debug]
//!
//! Prints the priced batch as JSON on stdout; logs go to stderr.

use anyhow::{bail, Context, Result};
use networth_core::logging::{init_tracing, LogLevel, TracingConfig};
use networth_core::{ItemCatalog, PriceTable, ReferenceTables, Valuator};

const FLAGS_WITH_VALUES: [&str; 2] = ["--tables", "--log"];

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Arguments that are neither flags nor flag values
fn positional(args: &[String]) -> Vec<&String> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args.iter().skip(1) {
        if skip {
            skip = false;
        } else if FLAGS_WITH_VALUES.contains(&arg.as_str()) {
            skip = true;
        } else {
            out.push(arg);
        }
    }
    out
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let level = match parse_str_arg(&args, "--log") {
        Some(name) => LogLevel::parse(&name).with_context(|| format!("unknown log level {name:?}"))?,
        None => LogLevel::Info,
    };
    init_tracing(&TracingConfig::with_level(level));

    let positional = positional(&args);
    let (prices_path, items_path) = match positional.as_slice() {
        [prices, items, ..] => (*prices, *items),
        _ => bail!("usage: networth-core <prices.json> <items.b64> [catalog.json] [--tables path] [--log level]"),
    };

    let prices = PriceTable::load(prices_path)
        .with_context(|| format!("loading price table {prices_path}"))?;
    let catalog = match positional.get(2) {
        Some(path) => ItemCatalog::load(path).with_context(|| format!("loading item catalog {path}"))?,
        None => ItemCatalog::default(),
    };
    let tables = match parse_str_arg(&args, "--tables") {
        Some(path) => {
            ReferenceTables::load(&path).with_context(|| format!("loading reference tables {path}"))?
        }
        None => ReferenceTables::default(),
    };
    let payload = std::fs::read_to_string(items_path)
        .with_context(|| format!("reading item batch {items_path}"))?;

    let batch = Valuator::new(&prices, &catalog, &tables)
        .value_batch(&payload)
        .context("valuing item batch")?;
    println!("{}", serde_json::to_string_pretty(&batch)?);
    Ok(())
}
