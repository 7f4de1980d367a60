// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Kicker Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 7 and any number of cards. Cards are converted
//! to 13 bits rank sets per suit, flushes and straights are resolved with
//! lookup tables and hands with pairs are classified by counting ranks across
//! suits. Hands are ranked by a [HandValue] that packs a [HandRank] into an
//! integer so that better hands have larger values.
//!
//! To use the evaluator create an [Evaluator], or use the shared one, and
//! evaluate the hands:
//!
//! ```
//! # use kicker_eval::*;
//! let ev = Evaluator::shared();
//! let v1 = ev.evaluate5(&[
//!     "Ks".parse().unwrap(),
//!     "Kh".parse().unwrap(),
//!     "Kd".parse().unwrap(),
//!     "Jc".parse().unwrap(),
//!     "Js".parse().unwrap(),
//! ]);
//!
//! let cards = Card::parse_many("As Ks 2d 3c Qs Js Ts").unwrap();
//! let v2 = ev.evaluate_best(&cards);
//! assert!(v2 > v1);
//! assert_eq!(v1.to_string(), "Full House: Kings full of Jacks");
//! ```
//!
//! Lowball and Omaha hands are evaluated by the [Variant] rules, for lowball
//! variants lower hand values win, use [Variant::compare] to compare hands:
//!
//! ```
//! # use kicker_eval::*;
//! # use std::cmp::Ordering;
//! let ev = Evaluator::shared();
//! let hole = Card::parse_many("Ah 2d Ks Qs").unwrap();
//! let board = Card::parse_many("3c 4h 5d Jc 9s").unwrap();
//!
//! let s = Variant::OmahaHiLo.evaluate(ev, &hole, &board).unwrap();
//! assert_eq!(s.hand.hand_type(), HandType::Straight);
//! assert_eq!(s.low.unwrap().decode().low_description(), "5-4-3-2-A");
//!
//! let wheel = ev.ace_to_five_best(&Card::parse_many("Ah 2c 3d 4s 5h").unwrap());
//! let six = ev.ace_to_five_best(&Card::parse_many("Ah 2c 3d 4s 6h").unwrap());
//! assert_eq!(Variant::AceToFive.compare(wheel, six), Ordering::Greater);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod bits;
pub use bits::BitBackend;

mod eval;
pub use eval::Evaluator;

mod lowball;
mod omaha;

pub mod phash;
pub use phash::{PerfectHash, PerfectHashConfig, PerfectHashError, PerfectHashTable};

mod stats;
pub use stats::EvalStats;

pub mod tables;
pub use tables::Tables;

mod value;
pub use value::{HandRank, HandType, HandValue, InvalidHandValue, compare, compare_low};

mod variant;
pub use variant::{EvalError, ParseVariantError, Showdown, Variant, winners};

// Reexport cards types.
pub use kicker_cards::{Card, CardError, Deck, Rank, RankSet, Suit, SuitRanks, subsets};
