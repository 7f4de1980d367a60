// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lookup tables indexed by 13 bits rank sets.
use log::debug;
use std::time::Instant;

use crate::{
    bits::{self, highest_set_bit},
    value::{HandType, HandValue},
};

/// Number of 13 bits rank sets.
pub const RANK_SETS: usize = 1 << 13;

/// Number of distinct straights, from the wheel to broadway.
pub const NUM_STRAIGHTS: u8 = 10;

/// The wheel rank set (A-2-3-4-5).
pub const WHEEL: u16 = 0b1_0000_0000_1111;

/// Returns the rank set for the given straight, 1 is the wheel and 10 is the
/// ace high straight.
pub const fn straight_mask(id: u8) -> u16 {
    if id == 1 {
        WHEEL
    } else {
        0b1_1111 << (id - 2)
    }
}

/// Returns the top card rank for the given straight.
pub const fn straight_high_card(id: u8) -> u8 {
    id + 4
}

/// The lookup tables.
///
/// Tables are built once by [Tables::build] and never mutated after, each
/// table is a single boxed slice owned by this value.
pub struct Tables {
    /// Number of bits set for each `u16` value.
    pub(crate) popcount: Box<[u8]>,
    /// The highest straight contained in each rank set, 0 for none.
    pub(crate) straights: Box<[u8]>,
    /// Straight or high card values for rank sets with exactly 5 ranks.
    pub(crate) unique5: Box<[u32]>,
    /// Flush, straight flush and royal flush values for rank sets with at
    /// least 5 ranks.
    pub(crate) flushes: Box<[u32]>,
}

impl Tables {
    /// Builds all the tables.
    pub fn build() -> Self {
        let now = Instant::now();

        let popcount = bits::popcount_table();
        let straights = build_straights();
        let unique5 = build_unique5(&popcount, &straights);
        let flushes = build_flushes(&popcount, &straights);

        debug!("Built lookup tables in {:?}", now.elapsed());

        Self {
            popcount,
            straights,
            unique5,
            flushes,
        }
    }

    /// Number of bits set in `x`.
    #[inline]
    pub fn popcount(&self, x: u16) -> u32 {
        self.popcount[x as usize] as u32
    }

    /// The highest straight contained in a rank set, 1 for the wheel up to 10
    /// for the ace high straight, `None` if the set has no straight.
    pub fn straight(&self, ranks: u16) -> Option<u8> {
        match self.straights[mask(ranks)] {
            0 => None,
            id => Some(id),
        }
    }

    /// The straight or high card value for a rank set with exactly 5 ranks.
    pub fn unique5(&self, ranks: u16) -> Option<HandValue> {
        (self.popcount(ranks) == 5).then(|| HandValue::from_raw(self.unique5[mask(ranks)]))
    }

    /// The flush value of the 5 highest ranks in a suit rank set with at least
    /// 5 ranks.
    pub fn flush(&self, ranks: u16) -> Option<HandValue> {
        (self.popcount(ranks) >= 5).then(|| HandValue::from_raw(self.flushes[mask(ranks)]))
    }
}

#[inline]
fn mask(ranks: u16) -> usize {
    (ranks & 0x1fff) as usize
}

/// Returns the ranks for the 5 highest bits in a rank set, missing ranks are 0.
pub(crate) fn top5(ranks: u16) -> [u8; 5] {
    let mut out = [0u8; 5];
    let mut m = ranks;
    for slot in out.iter_mut() {
        match highest_set_bit(m) {
            Some(b) => {
                *slot = b as u8 + 2;
                m &= !(1 << b);
            }
            None => break,
        }
    }

    out
}

/// Encodes a high card or a flush hand from its 5 highest ranks.
fn high_cards_value(hand_type: HandType, ranks: u16) -> u32 {
    let top = top5(ranks);
    HandValue::encode(hand_type, top[0], 0, [top[1], top[2], top[3], top[4], 0]).value()
}

fn build_straights() -> Box<[u8]> {
    let mut table = vec![0u8; RANK_SETS].into_boxed_slice();

    // Scan from the lowest straight so that higher straights overwrite lower
    // ones, a rank set maps to the straight with the highest top card.
    for id in 1..=NUM_STRAIGHTS {
        let straight = straight_mask(id);
        for (ranks, entry) in table.iter_mut().enumerate() {
            if ranks as u16 & straight == straight {
                *entry = id;
            }
        }
    }

    table
}

fn build_unique5(popcount: &[u8], straights: &[u8]) -> Box<[u32]> {
    let mut table = vec![0u32; RANK_SETS].into_boxed_slice();

    for (ranks, entry) in table.iter_mut().enumerate() {
        if popcount[ranks] != 5 {
            continue;
        }

        *entry = match straights[ranks] {
            0 => high_cards_value(HandType::HighCard, ranks as u16),
            id => HandValue::encode(HandType::Straight, straight_high_card(id), 0, [0; 5]).value(),
        };
    }

    table
}

fn build_flushes(popcount: &[u8], straights: &[u8]) -> Box<[u32]> {
    let mut table = vec![0u32; RANK_SETS].into_boxed_slice();

    for (ranks, entry) in table.iter_mut().enumerate() {
        if popcount[ranks] < 5 {
            continue;
        }

        // Only the five highest suited ranks make the hand.
        let mut top = ranks;
        for _ in 5..popcount[ranks] {
            top &= top - 1;
        }

        *entry = match straights[top] {
            0 => high_cards_value(HandType::Flush, top as u16),
            id => {
                let high = straight_high_card(id);
                let hand_type = if high == 14 {
                    HandType::RoyalFlush
                } else {
                    HandType::StraightFlush
                };

                HandValue::encode(hand_type, high, 0, [0; 5]).value()
            }
        };
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(ranks: &[u8]) -> u16 {
        ranks.iter().fold(0, |acc, r| acc | 1 << (r - 2))
    }

    #[test]
    fn straights_table() {
        let tables = Tables::build();
        assert_eq!(tables.straights.len(), RANK_SETS);

        assert_eq!(tables.straight(WHEEL), Some(1));
        assert_eq!(tables.straight(bits(&[2, 3, 4, 5, 6])), Some(2));
        assert_eq!(tables.straight(bits(&[10, 11, 12, 13, 14])), Some(10));
        assert_eq!(tables.straight(bits(&[2, 3, 4, 5, 7])), None);
        assert_eq!(tables.straight(bits(&[14, 13, 12, 11, 9])), None);

        // The highest straight wins.
        assert_eq!(tables.straight(bits(&[14, 2, 3, 4, 5, 6, 7])), Some(3));
        assert_eq!(tables.straight(bits(&[9, 10, 11, 12, 13, 14])), Some(10));

        let count = (0..RANK_SETS as u16)
            .filter(|&r| tables.straight(r).is_some())
            .count();
        assert!(count > 0);

        // Each straight with exactly 5 ranks.
        for id in 1..=NUM_STRAIGHTS {
            assert_eq!(tables.straight(straight_mask(id)), Some(id));
            assert_eq!(tables.popcount(straight_mask(id)), 5);
        }
    }

    #[test]
    fn unique5_table() {
        let tables = Tables::build();

        let v = tables.unique5(bits(&[14, 13, 12, 11, 9])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::HighCard);
        assert_eq!(v.primary, 14);
        assert_eq!(v.kickers, [13, 12, 11, 9, 0]);

        let v = tables.unique5(WHEEL).unwrap().decode();
        assert_eq!(v.hand_type, HandType::Straight);
        assert_eq!(v.primary, 5);

        let v = tables.unique5(bits(&[10, 11, 12, 13, 14])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::Straight);
        assert_eq!(v.primary, 14);

        assert_eq!(tables.unique5(bits(&[2, 3, 4, 5])), None);
        assert_eq!(tables.unique5(bits(&[2, 3, 4, 5, 7, 9])), None);

        // Every 5 ranks set is either a straight or a high card.
        let mut straights = 0;
        let mut high_cards = 0;
        for r in 0..RANK_SETS as u16 {
            match tables.unique5(r).map(|v| v.hand_type()) {
                Some(HandType::Straight) => straights += 1,
                Some(HandType::HighCard) => high_cards += 1,
                Some(t) => panic!("unexpected type {t:?}"),
                None => {}
            }
        }
        assert_eq!(straights, 10);
        assert_eq!(high_cards, 1277);
    }

    #[test]
    fn flushes_table() {
        let tables = Tables::build();

        let v = tables.flush(bits(&[10, 11, 12, 13, 14])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::RoyalFlush);
        assert_eq!(v.primary, 14);

        let v = tables.flush(WHEEL).unwrap().decode();
        assert_eq!(v.hand_type, HandType::StraightFlush);
        assert_eq!(v.primary, 5);

        let v = tables.flush(bits(&[2, 3, 4, 5, 7])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::Flush);
        assert_eq!(v.primary, 7);
        assert_eq!(v.kickers, [5, 4, 3, 2, 0]);

        // With more than 5 suited ranks only the top 5 count.
        let v = tables.flush(bits(&[2, 3, 4, 5, 6, 13])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::Flush);
        assert_eq!(v.primary, 13);
        assert_eq!(v.kickers, [6, 5, 4, 3, 0]);

        let v = tables.flush(bits(&[2, 3, 4, 5, 6, 7, 8])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::StraightFlush);
        assert_eq!(v.primary, 8);

        let v = tables.flush(bits(&[9, 10, 11, 12, 13, 14])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::RoyalFlush);

        // Wheel under a higher suited card is not a straight flush.
        let v = tables.flush(bits(&[2, 3, 4, 5, 9, 14])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::Flush);
        assert_eq!(v.primary, 14);
        assert_eq!(v.kickers, [9, 5, 4, 3, 0]);

        let v = tables.flush(bits(&[2, 3, 4, 5, 8, 11, 13])).unwrap().decode();
        assert_eq!(v.hand_type, HandType::Flush);
        assert_eq!(v.primary, 13);
        assert_eq!(v.kickers, [11, 8, 5, 4, 0]);

        assert_eq!(tables.flush(bits(&[2, 3, 4, 5])), None);
    }

    #[test]
    fn top5_ranks() {
        assert_eq!(top5(0), [0; 5]);
        assert_eq!(top5(bits(&[2, 9])), [9, 2, 0, 0, 0]);
        assert_eq!(top5(bits(&[2, 3, 4, 9, 10, 12, 14])), [14, 12, 10, 9, 4]);
    }
}
