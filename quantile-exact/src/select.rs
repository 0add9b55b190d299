// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! The partial-selection primitive.
//!
//! Given a mutable slice and a target index `k`, rearranges it so that the
//! element at `k` is the `k`-th order statistic, everything before it
//! compares less-or-equal, and everything after compares greater-or-equal.
//! This is exactly [`<[T]>::select_nth_unstable_by`], the standard
//! library's introselect (pattern-defeating quicksort's selection mode):
//! expected O(len), worst case O(len log len). Re-deriving introselect by
//! hand would only reproduce what the standard library already does well;
//! this module exists to give the rest of the crate a total-order-aware,
//! `Element`-specific call surface around it, plus the one small extra
//! primitive the design calls for — scanning a slice for its minimum (or
//! maximum) so an interpolation policy can get its second order statistic
//! for the price of one scan instead of a second partial selection.

use crate::element::Element;

/// Partial-selects `arr` so that `arr[k]` holds the `k`-th order statistic
/// (0-indexed) and returns it.
///
/// # Panics
///
/// Panics if `k >= arr.len()`, mirroring the standard library primitive
/// this wraps.
pub(crate) fn select_nth<T: Element>(arr: &mut [T], k: usize) -> T {
    let (_, &mut pivot, _) = arr.select_nth_unstable_by(k, |a, b| a.cmp_total(b));
    pivot
}

/// Returns the minimum element of `arr`. Used both for the whole-buffer
/// boundary case (`level` below the first order statistic) and to recover
/// the order statistic just past a partial-selected position (the minimum
/// of the suffix following it).
///
/// # Panics
///
/// Panics if `arr` is empty.
pub(crate) fn slice_min<T: Element>(arr: &[T]) -> T {
    let mut it = arr.iter().copied();
    let first = it.next().expect("slice_min requires a non-empty slice");
    it.fold(first, |acc, x| {
        if x.cmp_total(&acc).is_lt() {
            x
        } else {
            acc
        }
    })
}

/// Returns the maximum element of `arr`.
///
/// # Panics
///
/// Panics if `arr` is empty.
pub(crate) fn slice_max<T: Element>(arr: &[T]) -> T {
    let mut it = arr.iter().copied();
    let first = it.next().expect("slice_max requires a non-empty slice");
    it.fold(first, |acc, x| {
        if x.cmp_total(&acc).is_gt() {
            x
        } else {
            acc
        }
    })
}

/// Like [`slice_min`], but also swaps the minimum into `arr[0]` before
/// returning it. The multi-level finalizer relies on this: a later query
/// whose lower position lands exactly on this one's upper position can
/// skip recomputing it, but only because it is physically sitting at the
/// front of the slice that query will see.
///
/// # Panics
///
/// Panics if `arr` is empty.
pub(crate) fn min_to_front<T: Element>(arr: &mut [T]) -> T {
    let mut min_idx = 0;
    for i in 1..arr.len() {
        if arr[i].cmp_total(&arr[min_idx]).is_lt() {
            min_idx = i;
        }
    }
    arr.swap(0, min_idx);
    arr[0]
}

/// Mirror of [`min_to_front`] for the upper boundary: swaps the maximum of
/// `arr` into its last position and returns it.
///
/// # Panics
///
/// Panics if `arr` is empty.
pub(crate) fn max_to_back<T: Element>(arr: &mut [T]) -> T {
    let mut max_idx = 0;
    for i in 1..arr.len() {
        if arr[i].cmp_total(&arr[max_idx]).is_gt() {
            max_idx = i;
        }
    }
    let last = arr.len() - 1;
    arr.swap(last, max_idx);
    arr[last]
}

mod fuzzer;
mod tests;
