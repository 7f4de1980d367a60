// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation reports.
use serde::Serialize;
use std::fmt;

use kicker_eval::{Card, HandRank, HandType, HandValue, Showdown, Variant};

/// A hand value with its description.
#[derive(Debug, Serialize)]
pub struct ValueReport {
    /// The packed value.
    pub value: HandValue,
    /// The decoded rank.
    pub rank: HandRank,
    /// The human readable description.
    pub description: String,
}

impl ValueReport {
    fn new(value: HandValue, low: bool) -> Self {
        let rank = value.decode();
        let description = if low && rank.hand_type == HandType::HighCard {
            rank.low_description()
        } else {
            rank.to_string()
        };

        Self {
            value,
            rank,
            description,
        }
    }
}

/// A player hand report.
#[derive(Debug, Serialize)]
pub struct HandReport {
    /// The player cards.
    pub cards: Vec<String>,
    /// The main hand.
    pub hand: ValueReport,
    /// The low hand for hi-lo variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<ValueReport>,
    #[serde(skip)]
    hi_lo: bool,
}

impl HandReport {
    /// Creates a report for a player cards.
    pub fn new(variant: Variant, cards: &[Card], showdown: Showdown) -> Self {
        Self {
            cards: cards.iter().map(|c| c.to_string()).collect(),
            hand: ValueReport::new(showdown.hand, variant.is_lowball()),
            low: showdown.low.map(|v| ValueReport::new(v, true)),
            hi_lo: variant.is_hi_lo(),
        }
    }
}

impl fmt::Display for HandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20} {}", self.cards.join(" "), self.hand.description)?;

        match &self.low {
            Some(low) => write!(f, ", low {}", low.description),
            None if self.hi_lo => write!(f, ", no low"),
            None => Ok(()),
        }
    }
}

/// The `eval` command report.
#[derive(Debug, Serialize)]
pub struct EvalReport {
    /// The variant.
    pub variant: Variant,
    /// The player hand.
    #[serde(flatten)]
    pub hand: HandReport,
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} {}", self.variant, self.hand)
    }
}

/// The `showdown` command report.
#[derive(Debug, Serialize)]
pub struct ShowdownReport {
    /// The variant.
    pub variant: Variant,
    /// The board cards.
    pub board: Vec<String>,
    /// The players hands.
    pub players: Vec<HandReport>,
    /// The indices of the players winning the main side.
    pub winners: Vec<usize>,
    /// The indices of the players winning the low side.
    pub low_winners: Vec<usize>,
}

impl fmt::Display for ShowdownReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Variant: {}", self.variant)?;
        writeln!(f, "Board:   {}", self.board.join(" "))?;

        for (idx, player) in self.players.iter().enumerate() {
            let mut marks = String::new();
            if self.winners.contains(&idx) {
                marks.push_str(" *");
            }

            if self.low_winners.contains(&idx) {
                marks.push_str(" (low)");
            }

            writeln!(f, "Player {}: {player}{marks}", idx + 1)?;
        }

        Ok(())
    }
}
