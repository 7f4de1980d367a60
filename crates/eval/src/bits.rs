// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bit counting primitives for 13 bits rank sets.
//!
//! Each primitive comes in two flavours: one using the processor intrinsics
//! exposed by the integer types and one using a population count table, the
//! [BitBackend] selects which one an evaluator uses.

/// The number of entries in a population count table, one per `u16` value.
pub const POPCOUNT_TABLE_SIZE: usize = 1 << 16;

/// Selects the implementation of the bit counting primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitBackend {
    /// Use the `count_ones` and `leading_zeros` intrinsics.
    #[default]
    Intrinsic,
    /// Use the population count lookup table.
    Table,
}

/// Number of set bits.
#[inline]
pub fn population_count(x: u16) -> u32 {
    x.count_ones()
}

/// Index of the highest set bit, `None` if no bit is set.
#[inline]
pub fn highest_set_bit(x: u16) -> Option<u32> {
    if x == 0 {
        None
    } else {
        Some(15 - x.leading_zeros())
    }
}

/// Builds a table with the number of bits set for each `u16` value.
pub fn popcount_table() -> Box<[u8]> {
    let mut table = vec![0u8; POPCOUNT_TABLE_SIZE].into_boxed_slice();
    for idx in 1..POPCOUNT_TABLE_SIZE {
        table[idx] = table[idx >> 1] + (idx & 1) as u8;
    }

    table
}

/// Index of the highest set bit using a population count table.
///
/// Smears the highest bit into all the bits below it, the count of the
/// resulting bits is one past the highest bit index.
#[inline]
pub fn table_highest_set_bit(table: &[u8], x: u16) -> Option<u32> {
    let mut m = x;
    m |= m >> 1;
    m |= m >> 2;
    m |= m >> 4;
    m |= m >> 8;
    (table[m as usize] as u32).checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsics() {
        assert_eq!(population_count(0), 0);
        assert_eq!(population_count(0x1fff), 13);
        assert_eq!(population_count(0b1010_0101), 4);

        assert_eq!(highest_set_bit(0), None);
        assert_eq!(highest_set_bit(1), Some(0));
        assert_eq!(highest_set_bit(0x1000), Some(12));
        assert_eq!(highest_set_bit(0x1fff), Some(12));
        assert_eq!(highest_set_bit(0x8001), Some(15));
    }

    #[test]
    fn table_matches_intrinsics() {
        let table = popcount_table();
        assert_eq!(table.len(), POPCOUNT_TABLE_SIZE);

        for x in 0..=u16::MAX {
            assert_eq!(table[x as usize] as u32, population_count(x));
            assert_eq!(table_highest_set_bit(&table, x), highest_set_bit(x));
        }
    }
}
