// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation counters.
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

/// Counts evaluations and the time spent on them.
///
/// Counters are atomic so a single instance can be shared by many threads,
/// recording has no effect on the evaluation results.
#[derive(Debug, Default)]
pub struct EvalStats {
    evaluations: AtomicU64,
    nanos: AtomicU64,
}

impl EvalStats {
    /// Creates zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f`, that performs `evals` evaluations, and records its elapsed
    /// time.
    pub fn measure<T, F>(&self, evals: u64, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let now = Instant::now();
        let res = f();
        self.record(evals, now.elapsed());
        res
    }

    /// Records `evals` evaluations that took `elapsed` time.
    pub fn record(&self, evals: u64, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.evaluations.fetch_add(evals, Ordering::Relaxed);
        self.nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// The number of evaluations.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// The total elapsed time.
    ///
    /// When many threads record concurrently this is the sum of their times.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }

    /// Evaluations per second, 0 if no time was recorded.
    pub fn evals_per_sec(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.evaluations() as f64 / secs
        } else {
            0.0
        }
    }

    /// Resets the counters.
    pub fn reset(&self) {
        self.evaluations.store(0, Ordering::Relaxed);
        self.nanos.store(0, Ordering::Relaxed);
    }
}

impl fmt::Display for EvalStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} evaluations in {:.3}s ({:.2}M/s)",
            self.evaluations(),
            self.elapsed().as_secs_f64(),
            self.evals_per_sec() / 1e6
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_reset() {
        let stats = EvalStats::new();
        assert_eq!(stats.evals_per_sec(), 0.0);

        stats.record(1_000, Duration::from_millis(500));
        stats.record(1_000, Duration::from_millis(500));
        assert_eq!(stats.evaluations(), 2_000);
        assert_eq!(stats.elapsed(), Duration::from_secs(1));
        assert_eq!(stats.evals_per_sec(), 2_000.0);
        assert_eq!(stats.to_string(), "2000 evaluations in 1.000s (0.00M/s)");

        stats.reset();
        assert_eq!(stats.evaluations(), 0);
        assert_eq!(stats.elapsed(), Duration::ZERO);
    }

    #[test]
    fn measure_from_threads() {
        let stats = EvalStats::new();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let v = stats.measure(10, || {
                        std::thread::sleep(Duration::from_millis(1));
                        42
                    });
                    assert_eq!(v, 42);
                });
            }
        });

        assert_eq!(stats.evaluations(), 40);
        assert!(stats.elapsed() >= Duration::from_millis(4));
    }
}
