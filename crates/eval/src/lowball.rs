// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lowball hands.
//!
//! Low hand values are regular [HandValue]s where the lower value is the
//! better hand, use [compare_low](crate::compare_low) or
//! [Variant::compare](crate::Variant::compare) to rank them.
use crate::{
    Card, Evaluator, SuitRanks,
    eval::{FIVE_OF_SEVEN, FIVE_OF_SIX},
    subsets::for_each_subset,
    value::HandValue,
};

/// Bit to rank offset for ace low hands, bit 0 is an ace.
const LOW_BASE: u8 = 1;

/// Moves the ace from the top bit to the bottom bit of a rank set.
#[inline]
fn ace_low(m: u16) -> u16 {
    ((m << 1) | (m >> 12)) & 0x1fff
}

impl Evaluator {
    /// Evaluates a 5 cards ace-to-five low hand.
    ///
    /// Aces play low and straights and flushes don't count, the best hand is
    /// 5-4-3-2-A. Ranks in the returned value use 1 for the ace.
    pub fn ace_to_five(&self, cards: &[Card; 5]) -> HandValue {
        self.ace_to_five_upto5(cards)
    }

    /// The best ace-to-five low hand out of any number of cards.
    pub fn ace_to_five_best(&self, cards: &[Card]) -> HandValue {
        self.best_low(cards, |five| self.ace_to_five_upto5(five))
    }

    /// Evaluates a 5 cards deuce-to-seven low hand.
    ///
    /// The hand is evaluated as a high hand so straights and flushes count
    /// against it, the best hand is 7-5-4-3-2 unsuited.
    pub fn deuce_to_seven(&self, cards: &[Card; 5]) -> HandValue {
        self.evaluate5(cards)
    }

    /// The best deuce-to-seven low hand out of any number of cards.
    pub fn deuce_to_seven_best(&self, cards: &[Card]) -> HandValue {
        self.best_low(cards, |five| self.eval_upto5(five))
    }

    pub(crate) fn ace_to_five_upto5(&self, cards: &[Card]) -> HandValue {
        let masks = SuitRanks::from_cards(cards).masks().map(ace_low);
        self.classify_groups(masks, LOW_BASE)
    }

    /// The lowest value over all the 5 cards subsets.
    fn best_low<F>(&self, cards: &[Card], eval: F) -> HandValue
    where
        F: Fn(&[Card]) -> HandValue,
    {
        match cards.len() {
            0..=5 => eval(cards),
            6 => FIVE_OF_SIX
                .iter()
                .map(|idx| eval(&idx.map(|i| cards[i])))
                .fold(HandValue::from_raw(u32::MAX), HandValue::min),
            7 => FIVE_OF_SEVEN
                .iter()
                .map(|idx| eval(&idx.map(|i| cards[i])))
                .fold(HandValue::from_raw(u32::MAX), HandValue::min),
            n => {
                let mut best = HandValue::from_raw(u32::MAX);
                for_each_subset(n, 5, |idx| {
                    let five = [0, 1, 2, 3, 4].map(|i| cards[idx[i]]);
                    best = best.min(eval(&five));
                });
                best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deck, HandType, compare_low, eval::tests::cards};
    use std::cmp::Ordering;

    #[test]
    fn ace_low_masks() {
        assert_eq!(ace_low(1 << 12), 1);
        assert_eq!(ace_low(1), 2);
        assert_eq!(ace_low(0x1fff), 0x1fff);
        assert_eq!(ace_low(1 << 11), 1 << 12);
    }

    #[test]
    fn ace_to_five_wheel_is_best() {
        let ev = Evaluator::new();
        let wheel = ev.ace_to_five(&cards("Ah 2c 3d 4s 5h"));

        let h = wheel.decode();
        assert_eq!(h.hand_type, HandType::HighCard);
        assert_eq!(h.primary, 5);
        assert_eq!(h.kickers, [4, 3, 2, 1, 0]);
        assert_eq!(h.low_description(), "5-4-3-2-A");

        // Suited wheel is the same hand.
        assert_eq!(wheel, ev.ace_to_five(&cards("Ah 2h 3h 4h 5h")));

        Deck::default().for_each(5, |hand| {
            let hand: [Card; 5] = hand.try_into().unwrap();
            let v = ev.ace_to_five(&hand);
            assert!(wheel <= v);
            assert_ne!(compare_low(&v.decode(), &wheel.decode()), Ordering::Greater);
        });
    }

    #[test]
    fn ace_to_five_ordering() {
        let ev = Evaluator::new();
        let ordered = [
            "Ah 2c 3d 4s 5h",
            "Ah 2c 3d 4s 6h",
            "2h 3c 4d 5s 6h",
            "Ah 2c 3d 4s 8h",
            "Ah 2c 3d 4s Kh",
            "Ah Ac 2d 3s 4h",
            "2h 2c Ad 3s 4h",
            "Kh Kc Qd Js Th",
            "Ah Ac 2d 2s 4h",
            "Ah Ac Ad 2s 3h",
            "Ah Ac Ad 2s 2h",
            "Ah Ac Ad As 2h",
        ];

        let values = ordered
            .iter()
            .map(|s| ev.ace_to_five(&cards(s)))
            .collect::<Vec<_>>();

        for (w, s) in values.windows(2).zip(ordered.windows(2)) {
            assert!(w[0] < w[1], "{} better than {}", s[0], s[1]);
        }

        let h = ev.ace_to_five(&cards("Ah Ac 2d 3s 4h")).decode();
        assert_eq!(h.hand_type, HandType::OnePair);
        assert_eq!(h.primary, 1);
        assert_eq!(h.kickers, [4, 3, 2, 0, 0]);
    }

    #[test]
    fn ace_to_five_best_of_seven() {
        let ev = Evaluator::new();

        let v = ev.ace_to_five_best(&Card::parse_many("Kh Ah 2c 3d 4s 7h Qd").unwrap());
        assert_eq!(v.decode().low_description(), "7-4-3-2-A");

        // Pairs are used only when needed.
        let v = ev.ace_to_five_best(&Card::parse_many("Ah Ac 2d 2s 3h 3d 4c").unwrap());
        let h = v.decode();
        assert_eq!(h.hand_type, HandType::OnePair);
        assert_eq!(h.primary, 1);

        let six = Card::parse_many("9h 2c 3d 4s 6h 8d").unwrap();
        let v = ev.ace_to_five_best(&six);
        assert_eq!(v.decode().low_description(), "8-6-4-3-2");
    }

    #[test]
    fn deuce_to_seven_best_hand() {
        let ev = Evaluator::new();
        let best = ev.deuce_to_seven(&cards("7h 5d 4c 3s 2h"));

        // The best hand beats everything else: pairs, straights and flushes.
        let others = [
            "7h 6d 4c 3s 2h",
            "8h 5d 4c 3s 2h",
            "2h 2d 4c 3s 5h",
            "As 2h 3d 4c 5s",
            "2s 3h 4d 5c 6s",
            "7h 5h 4h 3h 2h",
            "Ah Kd Qc Js 9h",
        ];

        for s in others {
            let v = ev.deuce_to_seven(&cards(s));
            assert_eq!(compare_low(&best.decode(), &v.decode()), Ordering::Greater, "{s}");
        }

        Deck::default().for_each(5, |hand| {
            let hand: [Card; 5] = hand.try_into().unwrap();
            assert!(best <= ev.deuce_to_seven(&hand));
        });
    }

    #[test]
    fn deuce_to_seven_ordering() {
        let ev = Evaluator::new();
        let ordered = [
            "7h 5d 4c 3s 2h",
            "7h 6d 4c 3s 2h",
            "7h 6d 5c 3s 2h",
            "8h 5d 4c 3s 2h",
            "Ah Kd Qc Js 9h",
            "2h 2d 4c 3s 5h",
            "3h 3d 4c 2s 5h",
            "2h 2d 3c 3s 5h",
            "As 2h 3d 4c 5s",
            "7h 5h 4h 3h 2h",
        ];

        let values = ordered
            .iter()
            .map(|s| ev.deuce_to_seven(&cards(s)))
            .collect::<Vec<_>>();

        for (w, s) in values.windows(2).zip(ordered.windows(2)) {
            assert_eq!(
                compare_low(&w[0].decode(), &w[1].decode()),
                Ordering::Greater,
                "{} better than {}",
                s[0],
                s[1]
            );
        }
    }

    #[test]
    fn deuce_to_seven_best_of_seven() {
        let ev = Evaluator::new();
        let seven = Card::parse_many("7h 5d 4c 3s 2h 2d Kc").unwrap();
        assert_eq!(
            ev.deuce_to_seven_best(&seven),
            ev.deuce_to_seven(&cards("7h 5d 4c 3s 2h"))
        );

        // Avoid the straight.
        let six = Card::parse_many("6h 5d 4c 3s 2h 8d").unwrap();
        let v = ev.deuce_to_seven_best(&six).decode();
        assert_eq!(v.hand_type, HandType::HighCard);
        assert_eq!(v.low_description(), "8-5-4-3-2");
    }
}
