// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Kicker Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use kicker_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "Kd".parse().unwrap();
//! assert_eq!(kd.rank(), Rank::King);
//!
//! // Cards from numeric values are validated.
//! assert!(Card::try_new(15, 0).is_err());
//! ```
//!
//! the [RankSet] and [SuitRanks] types to convert cards to 13 bits rank sets,
//! and a [Deck] type for shuffling, sampling, and iterating cards in the deck.
//!
//! For example to iterate through all 7 cards hands:
//!
//! ```no_run
//! # use kicker_cards::{Card, Deck, Rank, Suit};
//! // Iterate through all 7 cards hands (133M hands).
//! let mut counter = 0;
//! Deck::default().for_each(7, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 133_784_560);
//! ```
//!
//! The **`parallel`** feature enables parallel iteration with a given number
//! of tasks, the following example uses 4 tasks to iterate all 7 cards hands,
//! the closure `task_id` can be used to store per task data to reduce
//! contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use std::sync::atomic;
//! # use kicker_cards::{Card, Deck, Rank, Suit};
//! // Iterate through all 7 cards hands (133M hands).
//! let counter = atomic::AtomicU64::new(0);
//! Deck::default().par_for_each(4, 7, |task_id, hand| {
//!     assert_eq!(hand.len(), 7);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 133_784_560);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod card;
pub use card::{Card, CardError, Rank, Suit};

mod deck;
pub use deck::Deck;

mod rankset;
pub use rankset::{RankSet, SuitRanks};

pub mod subsets;
