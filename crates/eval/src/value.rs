// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand types, ranks and their packed values.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use crate::Rank;

/// The hand type from high card to royal flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandType {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Royal flush.
    RoyalFlush,
}

impl HandType {
    /// All hand types from the weakest to the strongest.
    pub const ALL: [HandType; 10] = [
        HandType::HighCard,
        HandType::OnePair,
        HandType::TwoPair,
        HandType::ThreeOfAKind,
        HandType::Straight,
        HandType::Flush,
        HandType::FullHouse,
        HandType::FourOfAKind,
        HandType::StraightFlush,
        HandType::RoyalFlush,
    ];

    /// Number of hand types.
    pub const COUNT: usize = Self::ALL.len();
}

impl fmt::Display for HandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandType::HighCard => "High Card",
            HandType::OnePair => "One Pair",
            HandType::TwoPair => "Two Pair",
            HandType::ThreeOfAKind => "Three of a Kind",
            HandType::Straight => "Straight",
            HandType::Flush => "Flush",
            HandType::FullHouse => "Full House",
            HandType::FourOfAKind => "Four of a Kind",
            HandType::StraightFlush => "Straight Flush",
            HandType::RoyalFlush => "Royal Flush",
        };

        f.pad(name)
    }
}

/// The strength of a hand.
///
/// Ranks use the card rank values (2 to 14), lowball hands where aces play
/// low use 1 for the ace. Unused slots are zero. Ranks compare field by field,
/// the hand type first, then the primary and secondary ranks, then kickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandRank {
    /// The hand type.
    pub hand_type: HandType,
    /// The main rank: the pair, trips or quads rank, the top card otherwise.
    pub primary: u8,
    /// The second pair in two pair or the pair in a full house.
    pub secondary: u8,
    /// The remaining cards, most significant first.
    pub kickers: [u8; 5],
}

impl HandRank {
    /// Packs this rank into a [HandValue].
    pub fn encode(&self) -> HandValue {
        HandValue::encode(self.hand_type, self.primary, self.secondary, self.kickers)
    }

    /// Returns the ranks of the five cards in this hand from the highest to
    /// the lowest, missing cards are omitted.
    pub fn card_ranks(&self) -> Vec<u8> {
        let (p, s, k) = (self.primary, self.secondary, self.kickers);
        let mut ranks = match self.hand_type {
            HandType::HighCard | HandType::Flush => vec![p, k[0], k[1], k[2], k[3]],
            HandType::OnePair => vec![p, p, k[0], k[1], k[2]],
            HandType::TwoPair => vec![p, p, s, s, k[0]],
            HandType::ThreeOfAKind => vec![p, p, p, k[0], k[1]],
            HandType::FullHouse => vec![p, p, p, s, s],
            HandType::FourOfAKind => vec![p, p, p, p, k[0]],
            HandType::Straight | HandType::StraightFlush | HandType::RoyalFlush => {
                if p == 5 {
                    // The wheel plays the ace low.
                    vec![5, 4, 3, 2, 1]
                } else {
                    (0..5).map(|i| p.saturating_sub(i)).collect()
                }
            }
        };

        ranks.retain(|&r| r != 0);
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        ranks
    }

    /// Describes a low hand as its card ranks, for example "7-5-4-3-2".
    pub fn low_description(&self) -> String {
        self.card_ranks()
            .into_iter()
            .map(|r| rank_of(r).map(|r| r.to_string()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Maps a rank value to a rank, 1 is a low ace.
fn rank_of(value: u8) -> Option<Rank> {
    match value {
        1 => Some(Rank::Ace),
        v => Rank::try_from(v).ok(),
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(primary) = rank_of(self.primary) else {
            return write!(f, "{}", self.hand_type);
        };

        let secondary = rank_of(self.secondary).unwrap_or(primary);

        match self.hand_type {
            HandType::HighCard => write!(f, "High Card: {}", primary.name()),
            HandType::OnePair => write!(f, "Pair of {}", primary.plural()),
            HandType::TwoPair => write!(
                f,
                "Two Pair: {} and {}",
                primary.plural(),
                secondary.plural()
            ),
            HandType::ThreeOfAKind => write!(f, "Three of a Kind: {}", primary.plural()),
            HandType::Straight => write!(f, "Straight: {} high", primary.name()),
            HandType::Flush => write!(f, "Flush: {} high", primary.name()),
            HandType::FullHouse => write!(
                f,
                "Full House: {} full of {}",
                primary.plural(),
                secondary.plural()
            ),
            HandType::FourOfAKind => write!(f, "Four of a Kind: {}", primary.plural()),
            HandType::StraightFlush => write!(f, "Straight Flush: {} high", primary.name()),
            HandType::RoyalFlush => write!(f, "Royal Flush"),
        }
    }
}

/// A hand rank packed into an integer.
///
/// The value layout is:
///
/// ```text
///   +--------+--------+--------+--------+
///   |ttttpppp|ssss1111|22223333|44445555|
///   +--------+--------+--------+--------+
///   t = hand type
///   p = primary rank
///   s = secondary rank
///   1..5 = kickers
/// ```
///
/// so comparing two values as integers gives the same order as comparing
/// their [HandRank].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct HandValue(u32);

impl HandValue {
    /// Packs a hand rank.
    #[inline]
    pub const fn encode(
        hand_type: HandType,
        primary: u8,
        secondary: u8,
        kickers: [u8; 5],
    ) -> HandValue {
        HandValue(
            (hand_type as u32) << 28
                | (primary as u32 & 0xf) << 24
                | (secondary as u32 & 0xf) << 20
                | (kickers[0] as u32 & 0xf) << 16
                | (kickers[1] as u32 & 0xf) << 12
                | (kickers[2] as u32 & 0xf) << 8
                | (kickers[3] as u32 & 0xf) << 4
                | (kickers[4] as u32 & 0xf),
        )
    }

    /// Unpacks this value.
    pub fn decode(self) -> HandRank {
        let v = self.0;
        let nibble = |shift: u32| ((v >> shift) & 0xf) as u8;
        HandRank {
            hand_type: self.hand_type(),
            primary: nibble(24),
            secondary: nibble(20),
            kickers: [nibble(16), nibble(12), nibble(8), nibble(4), nibble(0)],
        }
    }

    /// The hand type.
    #[inline]
    pub fn hand_type(self) -> HandType {
        HandType::ALL[(self.0 >> 28) as usize]
    }

    /// The packed integer.
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Creates a value from a packed integer, the caller must ensure the hand
    /// type bits are valid.
    #[inline]
    pub(crate) const fn from_raw(v: u32) -> HandValue {
        HandValue(v)
    }
}

impl From<HandRank> for HandValue {
    fn from(rank: HandRank) -> Self {
        rank.encode()
    }
}

impl From<HandValue> for HandRank {
    fn from(value: HandValue) -> Self {
        value.decode()
    }
}

/// A raw value whose hand type nibble is out of range.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid hand value {0:#010x}")]
pub struct InvalidHandValue(pub u32);

impl TryFrom<u32> for HandValue {
    type Error = InvalidHandValue;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        if ((v >> 28) as usize) < HandType::COUNT {
            Ok(HandValue(v))
        } else {
            Err(InvalidHandValue(v))
        }
    }
}

impl From<HandValue> for u32 {
    fn from(value: HandValue) -> Self {
        value.0
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decode())
    }
}

/// Compares two hands, `Greater` if `a` is the stronger high hand.
pub fn compare(a: &HandRank, b: &HandRank) -> Ordering {
    a.hand_type
        .cmp(&b.hand_type)
        .then(a.primary.cmp(&b.primary))
        .then(a.secondary.cmp(&b.secondary))
        .then_with(|| a.kickers.cmp(&b.kickers))
}

/// Compares two low hands, `Greater` if `a` is the better low hand.
pub fn compare_low(a: &HandRank, b: &HandRank) -> Ordering {
    compare(b, a)
}
