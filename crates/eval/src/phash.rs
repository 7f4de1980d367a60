// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Perfect hash for non flush 5 cards hands.
//!
//! A non flush hand value depends only on its ranks multiset, each multiset is
//! keyed by the product of a prime per rank, the product is unique by prime
//! factorization. The search looks for a multiplier that maps all the 6175
//! keys to distinct slots of a `2^table_bits` table with a single multiply
//! and shift:
//!
//! ```text
//!   slot = (key * multiplier) >> (32 - table_bits)
//! ```
//!
//! The search result can be written as a Rust source artifact and loaded
//! back into a [PerfectHashTable].
use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{io::Write, ops::RangeInclusive};
use thiserror::Error;

use crate::{Card, Evaluator, Rank, Suit, SuitRanks, value::HandValue};

/// Prime for each rank from deuce to ace.
pub const RANK_PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Number of distinct non flush ranks multisets.
pub const NUM_KEYS: usize = 6175;

/// Valid table sizes in bits.
pub const TABLE_BITS_RANGE: RangeInclusive<u32> = 13..=24;

/// Perfect hash errors.
#[derive(Debug, Error)]
pub enum PerfectHashError {
    /// No collision free multiplier was found.
    #[error("no perfect hash found after {attempts} attempts with {table_bits} table bits")]
    NotFound {
        /// Number of multipliers tried.
        attempts: u32,
        /// The table size in bits.
        table_bits: u32,
    },
    /// The table size is out of range.
    #[error("invalid table bits {0}, must be in 13..=24")]
    InvalidTableBits(u32),
    /// A table entry is out of range.
    #[error("invalid table entry slot {slot} value {value:#010x}")]
    InvalidEntry {
        /// The entry slot.
        slot: u32,
        /// The entry value.
        value: u32,
    },
    /// Artifact I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Perfect hash search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfectHashConfig {
    /// The table size in bits.
    pub table_bits: u32,
    /// Maximum number of multipliers to try.
    pub max_attempts: u32,
    /// The multipliers generator seed.
    pub seed: u64,
}

impl Default for PerfectHashConfig {
    fn default() -> Self {
        Self {
            table_bits: 22,
            max_attempts: 100_000,
            seed: 0x6b69_636b_6572,
        }
    }
}

/// The key for a hand, the product of its ranks primes.
#[inline]
pub fn prime_product(cards: &[Card]) -> u32 {
    cards
        .iter()
        .map(|c| RANK_PRIMES[c.rank_value() as usize - 2])
        .product()
}

/// The table slot for a key.
#[inline]
pub fn slot(key: u32, multiplier: u32, table_bits: u32) -> usize {
    (key.wrapping_mul(multiplier) >> (32 - table_bits)) as usize
}

fn check_table_bits(table_bits: u32) -> Result<(), PerfectHashError> {
    if TABLE_BITS_RANGE.contains(&table_bits) {
        Ok(())
    } else {
        Err(PerfectHashError::InvalidTableBits(table_bits))
    }
}

/// Calls `f` with a hand for each non flush ranks multiset.
///
/// Suits are assigned by position so that no hand has more than two cards of
/// the same suit.
fn for_each_rank_hand<F>(mut f: F)
where
    F: FnMut(&[Card; 5]),
{
    for a in 0..13 {
        for b in a..13 {
            for c in b..13 {
                for d in c..13 {
                    for e in d..13 {
                        // Five of a kind.
                        if a == e {
                            continue;
                        }

                        let ranks = [a, b, c, d, e];
                        let hand = [0, 1, 2, 3, 4]
                            .map(|i| Card::new(Rank::ALL[ranks[i]], Suit::ALL[i % 4]));
                        f(&hand);
                    }
                }
            }
        }
    }
}

/// Searches a perfect hash for the non flush hands.
pub fn search(ev: &Evaluator, config: &PerfectHashConfig) -> Result<PerfectHash, PerfectHashError> {
    let table_bits = config.table_bits;
    check_table_bits(table_bits)?;

    let mut keys = Vec::with_capacity(NUM_KEYS);
    for_each_rank_hand(|hand| keys.push((prime_product(hand), ev.evaluate5(hand).value())));
    debug!("Searching {} keys with {table_bits} table bits", keys.len());

    let mut rng = StdRng::seed_from_u64(config.seed);

    // Slots used by the current attempt are stamped with the attempt number.
    let mut stamps = vec![0u32; 1 << table_bits];

    for attempt in 1..=config.max_attempts {
        let multiplier = rng.random::<u32>() | 1;

        let collision_free = keys.iter().all(|&(key, _)| {
            let s = slot(key, multiplier, table_bits);
            if stamps[s] == attempt {
                false
            } else {
                stamps[s] = attempt;
                true
            }
        });

        if collision_free {
            info!("Found multiplier {multiplier:#010x} after {attempt} attempts");

            let mut entries = keys
                .iter()
                .map(|&(key, value)| (slot(key, multiplier, table_bits) as u32, value))
                .collect::<Vec<_>>();
            entries.sort_unstable();

            return Ok(PerfectHash {
                multiplier,
                table_bits,
                attempts: attempt,
                entries,
            });
        }

        if attempt % 10_000 == 0 {
            debug!("Tried {attempt} multipliers");
        }
    }

    Err(PerfectHashError::NotFound {
        attempts: config.max_attempts,
        table_bits,
    })
}

/// A perfect hash search result.
#[derive(Debug, Clone)]
pub struct PerfectHash {
    multiplier: u32,
    table_bits: u32,
    attempts: u32,
    entries: Vec<(u32, u32)>,
}

impl PerfectHash {
    /// The hash multiplier.
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// The table size in bits.
    pub fn table_bits(&self) -> u32 {
        self.table_bits
    }

    /// Number of multipliers tried.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The occupied slots and their hand values sorted by slot.
    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }

    /// Builds the lookup table.
    pub fn to_table(&self) -> Result<PerfectHashTable, PerfectHashError> {
        PerfectHashTable::from_entries(self.multiplier, self.table_bits, &self.entries)
    }

    /// Writes the table as Rust source.
    pub fn write_artifact<W: Write>(&self, mut w: W) -> Result<(), PerfectHashError> {
        writeln!(w, "// Generated by kicker-phash, do not edit.")?;
        writeln!(w)?;
        writeln!(w, "/// Prime for each rank from deuce to ace.")?;
        writeln!(w, "pub const RANK_PRIMES: [u32; 13] = {RANK_PRIMES:?};")?;
        writeln!(w)?;
        writeln!(w, "/// Hash multiplier.")?;
        writeln!(w, "pub const MULTIPLIER: u32 = {:#010x};", self.multiplier)?;
        writeln!(w)?;
        writeln!(w, "/// Table size in bits.")?;
        writeln!(w, "pub const TABLE_BITS: u32 = {};", self.table_bits)?;
        writeln!(w)?;
        writeln!(w, "/// Occupied table slots and their hand values.")?;
        writeln!(
            w,
            "pub const ENTRIES: [(u32, u32); {}] = [",
            self.entries.len()
        )?;
        for (slot, value) in &self.entries {
            writeln!(w, "    ({slot}, {value:#010x}),")?;
        }
        writeln!(w, "];")?;
        w.flush()?;

        Ok(())
    }
}

/// A flat perfect hash table for non flush hands.
pub struct PerfectHashTable {
    multiplier: u32,
    table_bits: u32,
    table: Box<[u32]>,
}

impl PerfectHashTable {
    /// Builds the table from its occupied entries.
    pub fn from_entries(
        multiplier: u32,
        table_bits: u32,
        entries: &[(u32, u32)],
    ) -> Result<Self, PerfectHashError> {
        check_table_bits(table_bits)?;

        let mut table = vec![0u32; 1 << table_bits].into_boxed_slice();
        for &(slot, value) in entries {
            let invalid = PerfectHashError::InvalidEntry { slot, value };
            let entry = table.get_mut(slot as usize).ok_or(invalid)?;
            *entry = HandValue::try_from(value)
                .map_err(|_| PerfectHashError::InvalidEntry { slot, value })?
                .value();
        }

        Ok(Self {
            multiplier,
            table_bits,
            table,
        })
    }

    /// The hash multiplier.
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// The table size in bits.
    pub fn table_bits(&self) -> u32 {
        self.table_bits
    }

    /// Looks up the value for a key, `None` if the slot is empty.
    #[inline]
    pub fn lookup(&self, key: u32) -> Option<HandValue> {
        match self.table[slot(key, self.multiplier, self.table_bits)] {
            0 => None,
            v => Some(HandValue::from_raw(v)),
        }
    }

    /// Evaluates a 5 cards hand, flushes are looked up in the evaluator flush
    /// table.
    #[inline]
    pub fn evaluate5(&self, ev: &Evaluator, cards: &[Card; 5]) -> HandValue {
        let masks = SuitRanks::from_cards(cards).masks();
        if let Some(value) = ev.flush_value(masks) {
            return value;
        }

        let key = prime_product(cards);
        HandValue::from_raw(self.table[slot(key, self.multiplier, self.table_bits)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deck, eval::tests::cards};
    use ahash::HashSet;
    use std::sync::OnceLock;

    fn default_hash() -> &'static PerfectHash {
        static HASH: OnceLock<PerfectHash> = OnceLock::new();
        HASH.get_or_init(|| search(Evaluator::shared(), &PerfectHashConfig::default()).unwrap())
    }

    #[test]
    fn rank_hands_keys() {
        let mut keys = HashSet::default();
        let mut count = 0;
        for_each_rank_hand(|hand| {
            assert!(SuitRanks::from_cards(hand).masks().iter().all(|m| m.count_ones() < 5));
            keys.insert(prime_product(hand));
            count += 1;
        });

        assert_eq!(count, NUM_KEYS);
        assert_eq!(keys.len(), NUM_KEYS);

        // The largest key fits.
        assert_eq!(prime_product(&cards::<5>("Ac Ad Ah As Ks")), 41 * 41 * 41 * 41 * 37);
    }

    #[test]
    fn search_default() {
        let hash = default_hash();
        assert_eq!(hash.table_bits(), 22);
        assert_eq!(hash.multiplier() % 2, 1);
        assert!(hash.attempts() >= 1);
        assert_eq!(hash.entries().len(), NUM_KEYS);

        let slots = hash.entries().iter().map(|e| e.0).collect::<HashSet<_>>();
        assert_eq!(slots.len(), NUM_KEYS);
        assert!(hash.entries().windows(2).all(|w| w[0].0 < w[1].0));

        // Same seed same multiplier.
        let again = search(Evaluator::shared(), &PerfectHashConfig::default()).unwrap();
        assert_eq!(again.multiplier(), hash.multiplier());
    }

    #[test]
    fn search_errors() {
        let ev = Evaluator::shared();

        let config = PerfectHashConfig {
            table_bits: 13,
            max_attempts: 3,
            ..Default::default()
        };
        assert!(matches!(
            search(ev, &config),
            Err(PerfectHashError::NotFound {
                attempts: 3,
                table_bits: 13
            })
        ));

        for table_bits in [0, 12, 25, 32] {
            let config = PerfectHashConfig {
                table_bits,
                ..Default::default()
            };
            assert!(matches!(
                search(ev, &config),
                Err(PerfectHashError::InvalidTableBits(b)) if b == table_bits
            ));
        }
    }

    #[test]
    fn invalid_entries() {
        assert!(matches!(
            PerfectHashTable::from_entries(1, 13, &[(1 << 13, 1)]),
            Err(PerfectHashError::InvalidEntry { slot: 8192, .. })
        ));

        assert!(matches!(
            PerfectHashTable::from_entries(1, 13, &[(5, 0xf000_0000)]),
            Err(PerfectHashError::InvalidEntry { slot: 5, .. })
        ));

        let table = PerfectHashTable::from_entries(3, 13, &[]).unwrap();
        assert_eq!(table.lookup(7), None);
        assert_eq!(table.multiplier(), 3);
    }

    #[test]
    fn table_agrees_with_evaluator() {
        let ev = Evaluator::shared();
        let table = default_hash().to_table().unwrap();

        for s in [
            "As Ks Qs Js Ts",
            "2c 3c 4c 5c 7c",
            "7s 7h 7d 7c Ks",
            "As 2h 3d 4c 5s",
            "Qs Qh 4d 4c 9s",
            "7h 5d 4c 3s 2h",
        ] {
            let hand = cards(s);
            assert_eq!(table.evaluate5(ev, &hand), ev.evaluate5(&hand), "{s}");
        }

        let mut rng = rand::rng();
        Deck::default().sample(&mut rng, 20_000, 5, |hand| {
            let hand: [Card; 5] = hand.try_into().unwrap();
            assert_eq!(table.evaluate5(ev, &hand), ev.evaluate5(&hand));
        });
    }

    #[test]
    fn artifact() {
        let hash = default_hash();
        let mut buf = Vec::new();
        hash.write_artifact(&mut buf).unwrap();
        let src = String::from_utf8(buf).unwrap();

        assert!(src.contains("pub const RANK_PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];"));
        assert!(src.contains(&format!("pub const MULTIPLIER: u32 = {:#010x};", hash.multiplier())));
        assert!(src.contains("pub const TABLE_BITS: u32 = 22;"));
        assert!(src.contains("pub const ENTRIES: [(u32, u32); 6175] = ["));

        // Parse the entries back.
        let entries = src
            .lines()
            .filter_map(|l| l.trim().strip_prefix('(')?.strip_suffix("),"))
            .map(|l| {
                let (slot, value) = l.split_once(", ").unwrap();
                let value = u32::from_str_radix(value.trim_start_matches("0x"), 16).unwrap();
                (slot.parse::<u32>().unwrap(), value)
            })
            .collect::<Vec<_>>();
        assert_eq!(entries, hash.entries());

        let table = PerfectHashTable::from_entries(hash.multiplier(), 22, &entries).unwrap();
        let hand = cards::<5>("Ks Kh Kd Jc Js");
        assert_eq!(table.lookup(prime_product(&hand)), Some(Evaluator::shared().evaluate5(&hand)));
    }

    #[test]
    #[ignore]
    fn all_5cards_hands() {
        let ev = Evaluator::shared();
        let table = default_hash().to_table().unwrap();

        Deck::default().for_each(5, |hand| {
            let hand: [Card; 5] = hand.try_into().unwrap();
            assert_eq!(table.evaluate5(ev, &hand), ev.evaluate5(&hand));
        });
    }
}
