// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Exhaustive evaluation benchmark.
use anyhow::{Result, ensure};
use log::info;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use kicker_eval::{BitBackend, Card, Deck, EvalStats, Evaluator, HandType, subsets::nck};

/// Benchmark configuration.
#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    /// Number of parallel tasks.
    pub tasks: usize,
    /// The bit counting backend.
    pub backend: BitBackend,
    /// Number of cards per hand, 5 to 7.
    pub cards: usize,
}

/// Per hand type counts.
pub type TypeCounts = [u64; HandType::COUNT];

/// Evaluates all the hands and returns the per type counts.
pub fn count_hands(ev: &Evaluator, config: &BenchConfig, stats: &EvalStats) -> Result<TypeCounts> {
    ensure!(
        (5..=7).contains(&config.cards),
        "hands must have 5 to 7 cards, got {}",
        config.cards
    );
    ensure!(config.tasks > 0, "the number of tasks must be positive");

    // Create per task counters to avoid contention.
    let task_counters = (0..config.tasks)
        .map(|_| {
            (0..HandType::COUNT)
                .map(|_| AtomicU64::new(0))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let total = nck(Deck::SIZE, config.cards) as u64;
    stats.measure(total, || {
        Deck::default().par_for_each(config.tasks, config.cards, |task_id, hand| {
            let value = match <&[Card; 7]>::try_from(hand) {
                Ok(seven) => ev.evaluate7(seven),
                Err(_) => ev.evaluate_best(hand),
            };

            task_counters[task_id][value.hand_type() as usize].fetch_add(1, Ordering::Relaxed);
        });
    });

    // Aggregate counters.
    let mut counts = [0u64; HandType::COUNT];
    for counters in &task_counters {
        for (count, counter) in counts.iter_mut().zip(counters) {
            *count += counter.load(Ordering::Relaxed);
        }
    }

    Ok(counts)
}

/// Runs the benchmark and prints the results.
pub fn run(config: &BenchConfig) -> Result<()> {
    let now = Instant::now();
    let ev = Evaluator::with_backend(config.backend);
    info!(
        "Evaluator with {:?} backend ready in {:.3}s",
        config.backend,
        now.elapsed().as_secs_f64()
    );

    let stats = EvalStats::new();
    let counts = count_hands(&ev, config, &stats)?;

    let total = counts.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", stats.elapsed().as_secs_f64());
    println!("Hands/sec:       {:.0}\n", stats.evals_per_sec());

    for (hand_type, count) in HandType::ALL.iter().zip(counts) {
        println!("{:<17}{count}", format!("{hand_type}:"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_5cards_hands() {
        let config = BenchConfig {
            tasks: 3,
            backend: BitBackend::Table,
            cards: 5,
        };

        let stats = EvalStats::new();
        let counts = count_hands(Evaluator::shared(), &config, &stats).unwrap();
        assert_eq!(
            counts,
            [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 36, 4]
        );
        assert_eq!(stats.evaluations(), 2_598_960);
    }

    #[test]
    fn invalid_config() {
        let config = BenchConfig {
            tasks: 1,
            backend: BitBackend::Intrinsic,
            cards: 8,
        };

        let stats = EvalStats::new();
        assert!(count_hands(Evaluator::shared(), &config, &stats).is_err());
    }
}
