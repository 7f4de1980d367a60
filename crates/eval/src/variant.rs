// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker variants and showdowns.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

use crate::{Card, Evaluator, compare, compare_low, value::HandValue};

/// Errors returned when evaluating a hand for a variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The number of cards is not valid for the variant.
    #[error("{variant} expects {expected} cards, got {got}")]
    CardCount {
        /// The variant being evaluated.
        variant: Variant,
        /// The expected card count.
        expected: &'static str,
        /// The number of cards given.
        got: usize,
    },
    /// The same card appears more than once.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown variant {0:?}, expected one of high, a5, 27, omaha, omaha8")]
pub struct ParseVariantError(String);

/// A poker variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// High hand, the best 5 cards out of any number of cards.
    #[default]
    #[serde(rename = "high")]
    High,
    /// Ace-to-five lowball.
    #[serde(rename = "a5")]
    AceToFive,
    /// Deuce-to-seven lowball.
    #[serde(rename = "27")]
    DeuceToSeven,
    /// Omaha high.
    #[serde(rename = "omaha")]
    Omaha,
    /// Omaha hi-lo eight or better.
    #[serde(rename = "omaha8")]
    OmahaHiLo,
}

impl Variant {
    /// All the variants.
    pub const ALL: [Variant; 5] = [
        Variant::High,
        Variant::AceToFive,
        Variant::DeuceToSeven,
        Variant::Omaha,
        Variant::OmahaHiLo,
    ];

    /// The variant short name.
    pub fn name(self) -> &'static str {
        match self {
            Variant::High => "high",
            Variant::AceToFive => "a5",
            Variant::DeuceToSeven => "27",
            Variant::Omaha => "omaha",
            Variant::OmahaHiLo => "omaha8",
        }
    }

    /// Checks if lower hand values win.
    pub fn is_lowball(self) -> bool {
        matches!(self, Variant::AceToFive | Variant::DeuceToSeven)
    }

    /// Checks if the pot is split between a high and a low hand.
    pub fn is_hi_lo(self) -> bool {
        matches!(self, Variant::OmahaHiLo)
    }

    /// Compares two hand values for this variant, `Greater` if `a` wins.
    pub fn compare(self, a: HandValue, b: HandValue) -> Ordering {
        if self.is_lowball() {
            compare_low(&a.decode(), &b.decode())
        } else {
            compare(&a.decode(), &b.decode())
        }
    }

    /// Evaluates a player hand.
    ///
    /// Omaha variants take exactly 4 hole cards and 5 board cards, lowball
    /// variants 5 to 7 cards in total and high hands at least one card.
    pub fn evaluate(
        self,
        ev: &Evaluator,
        hole: &[Card],
        board: &[Card],
    ) -> Result<Showdown, EvalError> {
        check_duplicates(hole.iter().chain(board))?;

        let total = hole.len() + board.len();
        let count_error = |expected| EvalError::CardCount {
            variant: self,
            expected,
            got: total,
        };

        match self {
            Variant::Omaha | Variant::OmahaHiLo => {
                let (Ok(hole), Ok(board)) = (
                    <&[Card; 4]>::try_from(hole),
                    <&[Card; 5]>::try_from(board),
                ) else {
                    return Err(count_error("4 hole and 5 board"));
                };

                if self == Variant::Omaha {
                    Ok(Showdown::high(ev.omaha_high(hole, board)))
                } else {
                    Ok(ev.omaha_hi_lo(hole, board))
                }
            }
            _ => {
                let cards = hole.iter().chain(board).copied().collect::<Vec<_>>();
                match self {
                    Variant::High if total == 0 => Err(count_error("at least 1")),
                    Variant::High => Ok(Showdown::high(ev.evaluate_best(&cards))),
                    _ if !(5..=7).contains(&total) => Err(count_error("5 to 7")),
                    Variant::AceToFive => Ok(Showdown::high(ev.ace_to_five_best(&cards))),
                    _ => Ok(Showdown::high(ev.deuce_to_seven_best(&cards))),
                }
            }
        }
    }
}

fn check_duplicates<'a>(cards: impl Iterator<Item = &'a Card>) -> Result<(), EvalError> {
    let mut seen = 0u64;
    for card in cards {
        let bit = 1u64 << card.id();
        if seen & bit != 0 {
            return Err(EvalError::DuplicateCard(*card));
        }

        seen |= bit;
    }

    Ok(())
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == name)
            .ok_or(ParseVariantError(s.to_string()))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A player hand at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showdown {
    /// The hand value, for lowball variants this is the low hand.
    pub hand: HandValue,
    /// The qualifying low hand for hi-lo variants, `None` if there is no
    /// qualifying low.
    pub low: Option<HandValue>,
}

impl Showdown {
    fn high(hand: HandValue) -> Self {
        Self { hand, low: None }
    }
}

/// Returns the indices of the players that win the main side and the low side
/// of the pot.
///
/// The low side is empty for variants that are not hi-lo or when no player
/// has a qualifying low, ties return all the tied players.
pub fn winners(variant: Variant, hands: &[Showdown]) -> (Vec<usize>, Vec<usize>) {
    let high = best_indices(hands.iter().map(|s| Some(s.hand)), |a, b| {
        variant.compare(a, b)
    });

    let low = if variant.is_hi_lo() {
        best_indices(hands.iter().map(|s| s.low), |a, b| {
            compare_low(&a.decode(), &b.decode())
        })
    } else {
        Vec::new()
    };

    (high, low)
}

fn best_indices<I, F>(values: I, cmp: F) -> Vec<usize>
where
    I: Iterator<Item = Option<HandValue>>,
    F: Fn(HandValue, HandValue) -> Ordering,
{
    let mut best: Option<HandValue> = None;
    let mut indices = Vec::new();

    for (idx, value) in values.enumerate() {
        let Some(value) = value else {
            continue;
        };

        match best.map(|b| cmp(value, b)) {
            None | Some(Ordering::Greater) => {
                best = Some(value);
                indices.clear();
                indices.push(idx);
            }
            Some(Ordering::Equal) => indices.push(idx),
            Some(Ordering::Less) => {}
        }
    }

    indices
}
