// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Kicker CLI, evaluates hands and runs showdowns from the command line.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use serde::Serialize;
use std::{fmt::Display, process::ExitCode};

use kicker_eval::{BitBackend, Card, Evaluator, Variant, winners};

mod bench;
mod report;

use report::{EvalReport, HandReport, ShowdownReport};

#[derive(Debug, Parser)]
#[clap(name = "kicker", version, about = "Poker hand evaluator.")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluates a player hand.
    Eval {
        /// The variant: high, a5, 27, omaha, omaha8.
        #[clap(long, short, default_value = "high")]
        variant: Variant,
        /// The player cards, for example "As Kd".
        #[clap(long)]
        hole: String,
        /// The board cards.
        #[clap(long, short, default_value = "")]
        board: String,
        /// Print the result as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Finds the winners at showdown.
    Showdown {
        /// The variant: high, a5, 27, omaha, omaha8.
        #[clap(long, short, default_value = "high")]
        variant: Variant,
        /// The board cards.
        #[clap(long, short, default_value = "")]
        board: String,
        /// A player cards, repeat for each player.
        #[clap(long = "player", short, required = true)]
        players: Vec<String>,
        /// Print the result as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Evaluates all the hands in a deck and reports the throughput.
    Bench {
        /// Number of parallel tasks.
        #[clap(long, short, default_value_t = 4,
               value_parser = clap::value_parser!(u16).range(1..=256))]
        tasks: u16,
        /// The bit counting backend.
        #[clap(long, value_enum, default_value_t = Backend::Intrinsic)]
        backend: Backend,
        /// Number of cards per hand.
        #[clap(long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(5..=7))]
        cards: u8,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Intrinsic,
    Table,
}

impl From<Backend> for BitBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Intrinsic => BitBackend::Intrinsic,
            Backend::Table => BitBackend::Table,
        }
    }
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let res = match cli.command {
        Command::Eval {
            variant,
            hole,
            board,
            json,
        } => eval(variant, &hole, &board, json),
        Command::Showdown {
            variant,
            board,
            players,
            json,
        } => showdown(variant, &board, &players, json),
        Command::Bench {
            tasks,
            backend,
            cards,
        } => bench::run(&bench::BenchConfig {
            tasks: tasks as usize,
            backend: backend.into(),
            cards: cards as usize,
        }),
    };

    if let Err(e) = res {
        error!("{e:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn parse_cards(s: &str, what: &str) -> Result<Vec<Card>> {
    Card::parse_many(s).with_context(|| format!("invalid {what} cards {s:?}"))
}

fn print<T: Serialize + Display>(report: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}

fn eval(variant: Variant, hole: &str, board: &str, json: bool) -> Result<()> {
    let hole = parse_cards(hole, "hole")?;
    let board = parse_cards(board, "board")?;
    let showdown = variant.evaluate(Evaluator::shared(), &hole, &board)?;

    let cards = hole.iter().chain(&board).copied().collect::<Vec<_>>();
    let report = EvalReport {
        variant,
        hand: HandReport::new(variant, &cards, showdown),
    };

    print(&report, json)
}

fn showdown(variant: Variant, board: &str, players: &[String], json: bool) -> Result<()> {
    let ev = Evaluator::shared();
    let board = parse_cards(board, "board")?;

    let mut hands = Vec::with_capacity(players.len());
    let mut reports = Vec::with_capacity(players.len());
    for (idx, player) in players.iter().enumerate() {
        let hole = parse_cards(player, "player")?;
        let showdown = variant
            .evaluate(ev, &hole, &board)
            .with_context(|| format!("player {}", idx + 1))?;

        hands.push(showdown);
        reports.push(HandReport::new(variant, &hole, showdown));
    }

    let (winners, low_winners) = winners(variant, &hands);
    let report = ShowdownReport {
        variant,
        board: board.iter().map(|c| c.to_string()).collect(),
        players: reports,
        winners,
        low_winners,
    };

    print(&report, json)
}
