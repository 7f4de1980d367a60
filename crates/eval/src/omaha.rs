// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Omaha hands, exactly two hole cards and three board cards.
use crate::{Card, Evaluator, Rank, Showdown, value::HandValue};

/// The 6 ways to choose 2 hole cards out of 4.
const HOLE_PAIRS: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// The 10 ways to choose 3 board cards out of 5.
const BOARD_TRIPLES: [[usize; 3]; 10] = board_triples();

const fn board_triples() -> [[usize; 3]; 10] {
    let mut out = [[0usize; 3]; 10];
    let mut n = 0;

    let mut i = 0;
    while i < 5 {
        let mut j = i + 1;
        while j < 5 {
            let mut k = j + 1;
            while k < 5 {
                out[n] = [i, j, k];
                n += 1;
                k += 1;
            }
            j += 1;
        }
        i += 1;
    }

    out
}

/// Checks if a card can play in an eight or better low.
#[inline]
fn qualifies_low(card: &Card) -> bool {
    card.rank() <= Rank::Eight || card.rank() == Rank::Ace
}

impl Evaluator {
    /// Evaluates an Omaha high hand, the best of the 60 hands made with
    /// two hole cards and three board cards.
    pub fn omaha_high(&self, hole: &[Card; 4], board: &[Card; 5]) -> HandValue {
        let mut best = HandValue::from_raw(0);
        for [h0, h1] in HOLE_PAIRS {
            for [b0, b1, b2] in BOARD_TRIPLES {
                let five = [hole[h0], hole[h1], board[b0], board[b1], board[b2]];
                best = best.max(self.evaluate5(&five));
            }
        }

        best
    }

    /// Evaluates the low side of an Omaha hi-lo hand.
    ///
    /// Only hands made of five cards ranked eight or lower, with aces low,
    /// qualify and they are evaluated as ace-to-five lows. Returns the lowest
    /// value or `None` if no hand qualifies.
    pub fn omaha_low(&self, hole: &[Card; 4], board: &[Card; 5]) -> Option<HandValue> {
        let hole_low = hole.map(|c| qualifies_low(&c));
        let board_low = board.map(|c| qualifies_low(&c));

        let mut best: Option<HandValue> = None;
        for [h0, h1] in HOLE_PAIRS {
            if !(hole_low[h0] && hole_low[h1]) {
                continue;
            }

            for [b0, b1, b2] in BOARD_TRIPLES {
                if !(board_low[b0] && board_low[b1] && board_low[b2]) {
                    continue;
                }

                let five = [hole[h0], hole[h1], board[b0], board[b1], board[b2]];
                let v = self.ace_to_five(&five);
                best = Some(best.map_or(v, |b| b.min(v)));
            }
        }

        best
    }

    /// Evaluates an Omaha hi-lo hand.
    pub fn omaha_hi_lo(&self, hole: &[Card; 4], board: &[Card; 5]) -> Showdown {
        Showdown {
            hand: self.omaha_high(hole, board),
            low: self.omaha_low(hole, board),
        }
    }
}
