// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rank presence sets.
use std::fmt;

use crate::{Card, Rank, Suit};

/// A set of ranks stored as 13 bits, bit `i` is set if rank `i + 2` is present.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RankSet(u16);

impl RankSet {
    /// Mask for the 13 rank bits.
    pub const MASK: u16 = 0x1fff;

    /// The empty set.
    pub const EMPTY: RankSet = RankSet(0);

    /// Creates a set from raw bits, bits above the ace are dropped.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::MASK)
    }

    /// The raw set bits.
    #[inline]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Adds a rank to the set.
    pub fn insert(&mut self, rank: Rank) {
        self.0 |= rank.bit();
    }

    /// Checks if the set contains a rank.
    pub fn contains(&self, rank: Rank) -> bool {
        self.0 & rank.bit() != 0
    }

    /// Number of ranks in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The highest rank in the set.
    pub fn highest(&self) -> Option<Rank> {
        if self.0 == 0 {
            None
        } else {
            Rank::from_index(15 - self.0.leading_zeros())
        }
    }

    /// Iterates the ranks from the highest to the lowest.
    pub fn iter(&self) -> impl Iterator<Item = Rank> + '_ {
        Rank::ranks().rev().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Rank> for RankSet {
    fn from_iter<I: IntoIterator<Item = Rank>>(iter: I) -> Self {
        let mut set = RankSet::EMPTY;
        iter.into_iter().for_each(|r| set.insert(r));
        set
    }
}

impl fmt::Debug for RankSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RankSet(")?;
        for rank in self.iter() {
            write!(f, "{rank}")?;
        }
        write!(f, ")")
    }
}

/// Per suit rank sets for a group of cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuitRanks {
    masks: [u16; 4],
}

impl SuitRanks {
    /// Builds the per suit rank sets for the given cards.
    #[inline]
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut masks = [0u16; 4];
        for card in cards {
            masks[card.suit_index()] |= card.rank_bit();
        }

        Self { masks }
    }

    /// The ranks for the given suit.
    pub fn suit(&self, suit: Suit) -> RankSet {
        RankSet(self.masks[suit as usize])
    }

    /// The union of all suits ranks.
    #[inline]
    pub fn combined(&self) -> RankSet {
        RankSet(self.masks[0] | self.masks[1] | self.masks[2] | self.masks[3])
    }

    /// The raw per suit masks indexed by suit.
    #[inline]
    pub fn masks(&self) -> [u16; 4] {
        self.masks
    }
}
