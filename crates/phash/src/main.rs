// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Searches a perfect hash for the non flush 5 cards hands and writes the
//! table as Rust source.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result, ensure};
use clap::Parser;
use log::{error, info};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use kicker_eval::{Card, Deck, Evaluator, PerfectHashConfig, phash};

#[derive(Debug, Parser)]
struct Cli {
    /// The output file, writes to stdout if not set.
    #[clap(long, short)]
    output: Option<PathBuf>,
    /// The table size in bits.
    #[clap(long, default_value_t = PerfectHashConfig::default().table_bits,
           value_parser = clap::value_parser!(u32).range(13..=24))]
    table_bits: u32,
    /// Maximum number of multipliers to try.
    #[clap(long, default_value_t = PerfectHashConfig::default().max_attempts)]
    max_attempts: u32,
    /// The multipliers generator seed.
    #[clap(long, default_value_t = PerfectHashConfig::default().seed)]
    seed: u64,
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = PerfectHashConfig {
        table_bits: cli.table_bits,
        max_attempts: cli.max_attempts,
        seed: cli.seed,
    };

    if let Err(e) = run(config, cli.output) {
        error!("{e:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(config: PerfectHashConfig, output: Option<PathBuf>) -> Result<()> {
    let now = Instant::now();
    let ev = Evaluator::new();
    let hash = phash::search(&ev, &config)?;

    // Check all the 5 cards hands before writing the table.
    let table = hash.to_table()?;
    let mut mismatches = 0;
    Deck::default().for_each(5, |hand| {
        let Ok(hand) = <[Card; 5]>::try_from(hand) else {
            return;
        };

        if table.evaluate5(&ev, &hand) != ev.evaluate5(&hand) {
            mismatches += 1;
        }
    });
    ensure!(mismatches == 0, "{mismatches} hands disagree with the evaluator");

    match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            hash.write_artifact(BufWriter::new(file))?;
            info!("Wrote {} entries to {}", hash.entries().len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            hash.write_artifact(BufWriter::new(&mut stdout))?;
            stdout.flush()?;
        }
    }

    info!(
        "Multiplier {:#010x} with {} table bits in {:.3}s",
        hash.multiplier(),
        hash.table_bits(),
        now.elapsed().as_secs_f64()
    );

    Ok(())
}
