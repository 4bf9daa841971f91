// ABOUTME: Command-line driver for the grocery health classification pipeline
// ABOUTME: Classifies product batches, resolves reading sets and explains ingredient lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Usage:
//! ```bash
//! # Classify a batch of flat product rows, one JSON line per product
//! cargo run --bin grocery-health -- classify --input products.json --output rows.jsonl
//!
//! # Resolve a set of per-image readings into one record
//! cargo run --bin grocery-health -- resolve --input readings.json
//!
//! # Show the processing verdict and evidence for an ingredient list
//! cargo run --bin grocery-health -- ingredients "agua, azúcar, E-330"
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use grocery_health::{
    catalog::ProductRow,
    config::HealthConfig,
    intelligence::{classify_ingredients, resolve_with_audit},
    logging::LoggingConfig,
    models::{Category, RawNutrientReading},
    pipeline::{classify_batch, BatchItem, OutputRow},
};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "grocery-health",
    about = "Grocery product health assessment",
    long_about = "Classify grocery products with nutrient traffic lights, ultra-processing heuristics and a combined health score."
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (JSON); defaults and GROCERY_HEALTH_* variables otherwise
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a JSON array of product rows and write one JSON line per product
    Classify {
        /// Input file with an array of flat product rows
        #[arg(long)]
        input: PathBuf,

        /// Output file (JSON lines); stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,

        /// Category used when a row gives no usable hint (food or drink)
        #[arg(long)]
        default_category: Option<String>,
    },
    /// Resolve a JSON array of readings into one canonical record
    Resolve {
        /// Input file with an array of readings
        #[arg(long)]
        input: PathBuf,
    },
    /// Classify one ingredient list and print the evidence
    Ingredients {
        /// Ingredient text
        text: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Classify {
            input,
            output,
            default_category,
        } => {
            let mut config = config;
            if let Some(name) = default_category {
                config.traffic_light.default_category = Category::from_str_lossy(&name)
                    .ok_or_else(|| anyhow!("Unknown category '{name}', expected food or drink"))?;
            }
            run_classify(&input, output.as_deref(), &config)
        }
        Command::Resolve { input } => run_resolve(&input, &config),
        Command::Ingredients { text } => {
            let classification = classify_ingredients(&text, &config.processing);
            print_json(&classification)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<HealthConfig> {
    let config = match path {
        Some(path) => HealthConfig::from_json_file(path)?,
        None => HealthConfig::load()?,
    };
    Ok(config)
}

fn run_classify(input: &Path, output: Option<&Path>, config: &HealthConfig) -> Result<()> {
    let started = Instant::now();
    let contents = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let rows: Vec<ProductRow> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not an array of product rows", input.display()))?;

    let total = rows.len();
    let items: Vec<BatchItem> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match BatchItem::from_row(row, &config.columns) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(row = index, error = %e, "Skipping row");
                None
            }
        })
        .collect();

    let reports = classify_batch(items, config);

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for report in &reports {
        serde_json::to_writer(&mut writer, &OutputRow::from(report))?;
        writeln!(writer)?;
    }
    writer.flush()?;

    info!(
        rows = total,
        classified = reports.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "Batch classified"
    );
    Ok(())
}

fn run_resolve(input: &Path, config: &HealthConfig) -> Result<()> {
    let contents = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let readings: Vec<RawNutrientReading> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not an array of readings", input.display()))?;

    let outcome = resolve_with_audit(&readings, &config.consensus)?;
    print_json(&outcome)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
