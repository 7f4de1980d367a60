// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator classifies 5 cards hands with two table lookups: cards are
//! converted to per suit 13 bits rank sets, a suit with 5 ranks indexes the
//! flush table and a hand with 5 distinct ranks indexes the unique ranks
//! table, the remaining hands have pairs and are classified by counting the
//! ranks occurrences across suits. Larger hands are evaluated by taking the
//! best of their 5 cards subsets.
use std::sync::OnceLock;

use crate::{
    Card, SuitRanks,
    bits::{self, BitBackend},
    subsets::for_each_subset,
    tables::Tables,
    value::{HandType, HandValue},
};

/// The 6 ways to choose 5 cards out of 6.
pub(crate) const FIVE_OF_SIX: [[usize; 5]; 6] = five_of::<6, 6>();

/// The 21 ways to choose 5 cards out of 7.
pub(crate) const FIVE_OF_SEVEN: [[usize; 5]; 21] = five_of::<7, 21>();

/// The `M` 5 cards subsets of `N` cards in lexicographic order.
const fn five_of<const N: usize, const M: usize>() -> [[usize; 5]; M] {
    let mut out = [[0usize; 5]; M];
    let mut idx = [0, 1, 2, 3, 4];
    let mut n = 0;

    while n < M {
        out[n] = idx;
        n += 1;

        // Bump the rightmost index that can move and reset the ones after it.
        let mut i = 5;
        while i > 0 && idx[i - 1] == N - 6 + i {
            i -= 1;
        }

        if i == 0 {
            break;
        }

        idx[i - 1] += 1;
        while i < 5 {
            idx[i] = idx[i - 1] + 1;
            i += 1;
        }
    }

    out
}

/// Bit to rank offset for ace high hands, bit 0 is a deuce.
pub(crate) const HIGH_BASE: u8 = 2;

/// A poker hand evaluator.
///
/// The evaluator owns the lookup tables, they are built by the constructor
/// and are read only after that so an evaluator can be shared by reference
/// across threads. Use [Evaluator::shared] for a process wide instance.
///
/// ```
/// # use kicker_eval::*;
/// let ev = Evaluator::new();
/// let cards = Card::parse_many("As Ks Qs Js Ts").unwrap();
/// let value = ev.evaluate_best(&cards);
/// assert_eq!(value.hand_type(), HandType::RoyalFlush);
/// ```
pub struct Evaluator {
    tables: Tables,
    backend: BitBackend,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator that uses the bit counting intrinsics.
    pub fn new() -> Self {
        Self::with_backend(BitBackend::Intrinsic)
    }

    /// Creates an evaluator with the given bit counting backend.
    pub fn with_backend(backend: BitBackend) -> Self {
        Self {
            tables: Tables::build(),
            backend,
        }
    }

    /// A process wide evaluator, built on first use.
    pub fn shared() -> &'static Evaluator {
        static EVALUATOR: OnceLock<Evaluator> = OnceLock::new();
        EVALUATOR.get_or_init(Evaluator::new)
    }

    /// The bit counting backend.
    pub fn backend(&self) -> BitBackend {
        self.backend
    }

    /// The lookup tables.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Evaluates a 5 cards hand.
    #[inline]
    pub fn evaluate5(&self, cards: &[Card; 5]) -> HandValue {
        self.eval_upto5(cards)
    }

    /// Evaluates a 7 cards hand as the best of its 21 5-cards hands.
    pub fn evaluate7(&self, cards: &[Card; 7]) -> HandValue {
        FIVE_OF_SEVEN
            .iter()
            .map(|idx| self.evaluate5(&idx.map(|i| cards[i])))
            .fold(HandValue::from_raw(0), HandValue::max)
    }

    /// Evaluates the best 5 cards hand out of any number of cards.
    ///
    /// Hands with less than 5 cards are evaluated as if the missing cards
    /// were blanks that match no rank and no suit, so they can only make
    /// pairs or high card hands. Hands with more than 7 cards are evaluated by
    /// enumerating all the 7 cards subsets, this is slow and not used by any
    /// standard variant.
    pub fn evaluate_best(&self, cards: &[Card]) -> HandValue {
        match cards.len() {
            0..=5 => self.eval_upto5(cards),
            7 => {
                let mut seven = [cards[0]; 7];
                seven.copy_from_slice(cards);
                self.evaluate7(&seven)
            }
            6 => FIVE_OF_SIX
                .iter()
                .map(|idx| self.evaluate5(&idx.map(|i| cards[i])))
                .fold(HandValue::from_raw(0), HandValue::max),
            n => {
                let mut best = HandValue::from_raw(0);
                for_each_subset(n, 7, |idx| {
                    let seven = [0, 1, 2, 3, 4, 5, 6].map(|i| cards[idx[i]]);
                    best = best.max(self.evaluate7(&seven));
                });
                best
            }
        }
    }

    /// Evaluates up to 5 cards.
    #[inline]
    pub(crate) fn eval_upto5(&self, cards: &[Card]) -> HandValue {
        debug_assert!(cards.len() <= 5);

        let masks = SuitRanks::from_cards(cards).masks();
        if let Some(value) = self.flush_value(masks) {
            return value;
        }

        let ranks = masks[0] | masks[1] | masks[2] | masks[3];
        if self.popcount(ranks) >= 5 {
            let top = self.keep_highest(ranks, 5);
            return HandValue::from_raw(self.tables.unique5[top as usize]);
        }

        self.classify_groups(masks, HIGH_BASE)
    }

    /// Looks up the flush table if any suit has 5 or more ranks.
    #[inline]
    pub(crate) fn flush_value(&self, masks: [u16; 4]) -> Option<HandValue> {
        masks
            .into_iter()
            .find(|&m| self.popcount(m) >= 5)
            .map(|m| HandValue::from_raw(self.tables.flushes[m as usize]))
    }

    /// Classifies a hand by the number of times each rank appears across the
    /// suits, ignoring straights and flushes.
    ///
    /// The masks bit `i` stands for rank `i + base`. Works for any number of
    /// cards, the best quads, full house, trips, two pair, pair or high card
    /// is selected with the kickers taken from the remaining ranks.
    pub(crate) fn classify_groups(&self, masks: [u16; 4], base: u8) -> HandValue {
        let [c, d, h, s] = masks;

        // Per rank count of the suits holding the rank as a 3 bits number.
        let (a_lo, a_hi) = (c ^ d, c & d);
        let (b_lo, b_hi) = (h ^ s, h & s);
        let carry = a_lo & b_lo;
        let bit0 = a_lo ^ b_lo;
        let bit1 = a_hi ^ b_hi ^ carry;
        let bit2 = (a_hi & b_hi) | (carry & (a_hi ^ b_hi));

        let all = c | d | h | s;
        let quads = bit2;
        let trips = bit1 & bit0;
        let pairs = bit1 & !bit0;
        let singles = bit0 & !bit1;

        let rank = |b: u32| b as u8 + base;
        let without = |m: u16, b: u32| m & !(1 << b);

        if let Some(q) = self.highest(quads) {
            let kicker = self.highest(without(all, q)).map_or(0, rank);
            return HandValue::encode(HandType::FourOfAKind, rank(q), 0, [kicker, 0, 0, 0, 0]);
        }

        if let Some(t) = self.highest(trips) {
            if let Some(p) = self.highest(pairs | without(trips, t)) {
                return HandValue::encode(HandType::FullHouse, rank(t), rank(p), [0; 5]);
            }

            let k = self.top_ranks(singles, base);
            return HandValue::encode(HandType::ThreeOfAKind, rank(t), 0, [k[0], k[1], 0, 0, 0]);
        }

        if let Some(p1) = self.highest(pairs) {
            let rest = without(pairs, p1);
            if let Some(p2) = self.highest(rest) {
                let kicker = self.highest(singles | without(rest, p2)).map_or(0, rank);
                return HandValue::encode(
                    HandType::TwoPair,
                    rank(p1),
                    rank(p2),
                    [kicker, 0, 0, 0, 0],
                );
            }

            let k = self.top_ranks(singles, base);
            return HandValue::encode(HandType::OnePair, rank(p1), 0, [k[0], k[1], k[2], 0, 0]);
        }

        let k = self.top_ranks(all, base);
        HandValue::encode(HandType::HighCard, k[0], 0, [k[1], k[2], k[3], k[4], 0])
    }

    /// The ranks of the 5 highest bits, missing ranks are 0.
    #[inline]
    fn top_ranks(&self, mut m: u16, base: u8) -> [u8; 5] {
        let mut out = [0u8; 5];
        for slot in out.iter_mut() {
            let Some(b) = self.highest(m) else {
                break;
            };

            *slot = b as u8 + base;
            m &= !(1 << b);
        }

        out
    }

    /// Clears the lowest bits until at most n bits are left.
    #[inline]
    fn keep_highest(&self, mut m: u16, n: u32) -> u16 {
        while self.popcount(m) > n {
            m &= m - 1;
        }

        m
    }

    #[inline]
    pub(crate) fn popcount(&self, x: u16) -> u32 {
        match self.backend {
            BitBackend::Intrinsic => bits::population_count(x),
            BitBackend::Table => self.tables.popcount(x),
        }
    }

    #[inline]
    pub(crate) fn highest(&self, x: u16) -> Option<u32> {
        match self.backend {
            BitBackend::Intrinsic => bits::highest_set_bit(x),
            BitBackend::Table => bits::table_highest_set_bit(&self.tables.popcount, x),
        }
    }
}
