// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! k-subsets enumeration.
//!
//! Subsets are sorted index tuples visited in lexicographic order, the
//! enumeration uses a fixed size buffer and never allocates.

/// The largest subset size.
pub const MAX_K: usize = 7;

/// The largest set size.
pub const MAX_N: usize = 52;

/// Pascal's triangle rows 0..=52, columns 0..=7.
const fn pascal() -> [[u32; MAX_K + 1]; MAX_N + 1] {
    let mut t = [[0u32; MAX_K + 1]; MAX_N + 1];

    let mut n = 0;
    while n <= MAX_N {
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n {
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u32; MAX_K + 1]; MAX_N + 1] = pascal();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= MAX_N, "n={n} must be 0 <= n <= {MAX_N}");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

    NCKS[n][k] as usize
}

/// Returns the k-subset of 0..n at position `rank` in lexicographic order.
///
/// Only the first k entries of the result are used, a rank past the last
/// subset returns the last subset.
pub fn nth_ksubset(n: usize, k: usize, mut rank: usize) -> [usize; MAX_K] {
    assert!(k <= MAX_K && k <= n);

    let mut out = [0; MAX_K];
    let mut next = 0;

    for pos in 0..k {
        let left = k - pos - 1;

        // Skip the subsets that start with a smaller index at this position.
        let mut v = next;
        while rank > 0 && v < n - left - 1 {
            let count = nck(n - v - 1, left);
            if rank < count {
                break;
            }

            rank -= count;
            v += 1;
        }

        out[pos] = v;
        next = v + 1;
    }

    out
}

/// Moves `idx` to the next k-subset of 0..n, returns false after the last one.
#[inline]
fn advance(idx: &mut [usize], n: usize) -> bool {
    let k = idx.len();

    let mut i = k;
    while i > 0 && idx[i - 1] == n - k + i - 1 {
        i -= 1;
    }

    if i == 0 {
        return false;
    }

    idx[i - 1] += 1;
    for j in i..k {
        idx[j] = idx[j - 1] + 1;
    }

    true
}

/// Calls the given closure for count k-subsets of 0..n starting from the nth
/// ksubset.
///
/// Panics if k > 7.
pub fn for_each_ksubset<F>(n: usize, k: usize, nth: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    if k == 0 || k > n || count == 0 {
        return;
    }

    let mut buf = nth_ksubset(n, k, nth);
    let idx = &mut buf[..k];

    for _ in 0..count {
        f(idx);

        if !advance(idx, n) {
            break;
        }
    }
}

/// Calls the given closure for every k-subset of 0..n in lexicographic order.
///
/// Panics if k > 7.
pub fn for_each_subset<F>(n: usize, k: usize, f: F)
where
    F: FnMut(&[usize]),
{
    for_each_ksubset(n, k, 0, usize::MAX, f);
}
