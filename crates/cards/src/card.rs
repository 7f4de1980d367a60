// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Errors returned when building or parsing a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// Rank value outside 2..=14.
    #[error("invalid card rank {0}, expected 2..=14")]
    InvalidRank(u8),
    /// Suit value outside 0..=3.
    #[error("invalid card suit {0}, expected 0..=3")]
    InvalidSuit(u8),
    /// Unknown rank character.
    #[error("invalid rank character '{0}'")]
    InvalidRankChar(char),
    /// Unknown suit character.
    #[error("invalid suit character '{0}'")]
    InvalidSuitChar(char),
    /// A card string that is not a rank followed by a suit.
    #[error("invalid card '{0}'")]
    InvalidFormat(String),
}

/// A Poker card.
///
/// A card is packed in a single byte with the following format:
///
/// ```text
///   +--------+
///   |xxrrrrss|
///   +--------+
///   r = rank of card (deuce=2,trey=3,four=4,...,ace=14)
///   s = suit of card (clubs=0,diamonds=1,hearts=2,spades=3)
/// ```
///
/// A `Card` value always holds an in range rank and suit, out of range values
/// are rejected by [Card::try_new] and when parsing or deserializing.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(((rank as u8) << 2) | suit as u8)
    }

    /// Create a card from a numeric rank (2..=14) and suit (0..=3).
    pub fn try_new(rank: u8, suit: u8) -> Result<Card, CardError> {
        let rank = Rank::try_from(rank)?;
        let suit = Suit::try_from(suit)?;
        Ok(Card::new(rank, suit))
    }

    /// Parses a list of cards separated by spaces or commas, or concatenated
    /// as in "AsKd".
    pub fn parse_many(s: &str) -> Result<Vec<Card>, CardError> {
        let chars = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect::<Vec<_>>();

        chars
            .chunks(2)
            .map(|chunk| chunk.iter().collect::<String>().parse())
            .collect()
    }

    /// This card unique id.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// Returns the card suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        Suit::ALL[self.suit_index()]
    }

    /// Returns the card rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        Rank::ALL[(self.rank_value() - 2) as usize]
    }

    /// Returns the rank value, 2 for a deuce up to 14 for an ace.
    #[inline]
    pub fn rank_value(&self) -> u8 {
        self.0 >> 2
    }

    /// Returns the suit index 0..=3.
    #[inline]
    pub fn suit_index(&self) -> usize {
        (self.0 & 0x3) as usize
    }

    /// Returns this card bit in a rank set.
    #[inline]
    pub fn rank_bit(&self) -> u16 {
        1 << (self.rank_value() - 2)
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Card::try_new(id >> 2, id & 0x3)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => {
                let rank = Rank::from_char(r)?;
                let suit = Suit::from_char(s)?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(CardError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// All ranks from deuce to ace.
    pub const ALL: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        Self::ALL.into_iter()
    }

    /// Returns the rank for a rank set bit index, 0 for a deuce.
    pub fn from_index(idx: u32) -> Option<Rank> {
        Self::ALL.get(idx as usize).copied()
    }

    /// The rank value, 2 for a deuce up to 14 for an ace.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// The rank bit in a rank set.
    pub fn bit(self) -> u16 {
        1 << (self as u8 - 2)
    }

    /// The rank name.
    pub fn name(self) -> &'static str {
        match self {
            Rank::Deuce => "Deuce",
            Rank::Trey => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    /// The rank name in plural form.
    pub fn plural(self) -> &'static str {
        match self {
            Rank::Six => "Sixes",
            Rank::Deuce => "Deuces",
            Rank::Trey => "Threes",
            Rank::Four => "Fours",
            Rank::Five => "Fives",
            Rank::Seven => "Sevens",
            Rank::Eight => "Eights",
            Rank::Nine => "Nines",
            Rank::Ten => "Tens",
            Rank::Jack => "Jacks",
            Rank::Queen => "Queens",
            Rank::King => "Kings",
            Rank::Ace => "Aces",
        }
    }

    fn from_char(c: char) -> Result<Rank, CardError> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(CardError::InvalidRankChar(c)),
        };

        Ok(rank)
    }
}

impl TryFrom<u8> for Rank {
    type Error = CardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2..=14 => Ok(Self::ALL[(value - 2) as usize]),
            _ => Err(CardError::InvalidRank(value)),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds = 1,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 3,
}

impl Suit {
    /// All suits.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        Self::ALL.into_iter()
    }

    fn from_char(c: char) -> Result<Suit, CardError> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(CardError::InvalidSuitChar(c)),
        }
    }
}

impl TryFrom<u8> for Suit {
    type Error = CardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(CardError::InvalidSuit(value))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Deck;
    use ahash::HashSet;

    #[test]
    fn card_encoding() {
        let mut cards = HashSet::default();
        let mut deck = Deck::new_and_shuffled(&mut rand::rng());

        while let Some(card) = deck.deal() {
            assert_eq!(card.id() >> 2, card.rank() as u8);
            assert_eq!(card.id() & 0x3, card.suit() as u8);
            assert_eq!(card.rank_bit(), card.rank().bit());
            assert_eq!(Card::try_from(card.id()), Ok(card));
            cards.insert(card.id());
        }

        // Check uniquness.
        assert_eq!(cards.len(), Deck::SIZE);

        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(kd.id(), (13 << 2) | 1);
        assert_eq!(kd.rank_value(), 13);
        assert_eq!(kd.rank_bit(), 1 << 11);
    }

    #[test]
    fn card_validation() {
        assert_eq!(Card::try_new(1, 0), Err(CardError::InvalidRank(1)));
        assert_eq!(Card::try_new(15, 0), Err(CardError::InvalidRank(15)));
        assert_eq!(Card::try_new(14, 4), Err(CardError::InvalidSuit(4)));
        assert_eq!(
            Card::try_new(14, 3),
            Ok(Card::new(Rank::Ace, Suit::Spades))
        );
        assert_eq!(
            Card::try_new(2, 0),
            Ok(Card::new(Rank::Deuce, Suit::Clubs))
        );

        // Ids with a rank below deuce.
        assert!(Card::try_from(0).is_err());
        assert!(Card::try_from(7).is_err());
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(c.to_string(), "JC");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(c.to_string(), "AH");
    }

    #[test]
    fn card_parse() {
        assert_eq!("As".parse(), Ok(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!("td".parse(), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
        assert_eq!("2C".parse(), Ok(Card::new(Rank::Deuce, Suit::Clubs)));
        assert_eq!("Xs".parse::<Card>(), Err(CardError::InvalidRankChar('X')));
        assert_eq!("Ax".parse::<Card>(), Err(CardError::InvalidSuitChar('x')));
        assert!(matches!(
            "Asd".parse::<Card>(),
            Err(CardError::InvalidFormat(_))
        ));
        assert!(matches!("A".parse::<Card>(), Err(CardError::InvalidFormat(_))));

        // Every deck card parses back from its display string.
        for card in Deck::default() {
            assert_eq!(card.to_string().parse(), Ok(card));
        }
    }

    #[test]
    fn card_parse_many() {
        let expected = vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Deuce, Suit::Hearts),
        ];

        assert_eq!(Card::parse_many("AsKd2h"), Ok(expected.clone()));
        assert_eq!(Card::parse_many("As Kd 2h"), Ok(expected.clone()));
        assert_eq!(Card::parse_many("As, Kd, 2h"), Ok(expected));
        assert_eq!(Card::parse_many(""), Ok(vec![]));
        assert!(Card::parse_many("AsK").is_err());
    }

    #[test]
    fn rank_names() {
        assert_eq!(Rank::Ace.name(), "Ace");
        assert_eq!(Rank::Six.plural(), "Sixes");
        assert_eq!(Rank::try_from(11), Ok(Rank::Jack));
        assert_eq!(Rank::from_index(12), Some(Rank::Ace));
        assert_eq!(Rank::from_index(13), None);
        assert_eq!(Rank::ranks().count(), 13);
    }
}
