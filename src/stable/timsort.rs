//! Simplified TimSort: natural run detection, short runs extended with insertion sort, and a run
//! stack that always merges its two topmost runs. No galloping mode and none of the balancing
//! rules of the real merge stack.

use std::cmp::{self, Ordering};
use std::mem;

use crate::primitives::{insertion_sort_shift_left, merge, try_with_capacity};
use crate::SortError;

sort_impl!("timsort_stable", scratch);

/// Runs shorter than this are extended with insertion sort.
const MIN_RUN: usize = 32;

#[inline]
pub fn sort<T>(v: &mut [T]) -> Result<(), SortError>
where
    T: Ord,
{
    stable_sort(v, |a, b| a.cmp(b))
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    stable_sort(v, compare)
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

#[inline]
fn stable_sort<T, F>(v: &mut [T], mut compare: F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if mem::size_of::<T>() == 0 {
        // Sorting has no meaningful behavior on zero-sized types. Do nothing.
        return Ok(());
    }

    merge_sort(v, &mut |a, b| compare(a, b) == Ordering::Less)
}

fn merge_sort<T, F>(v: &mut [T], is_less: &mut F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    if len < 2 {
        // These inputs are always sorted.
        return Ok(());
    }

    // Every merge copies the shorter of its two runs, which is never longer than half the input.
    let mut buf = try_with_capacity(len / 2)?;
    // All runs but the last span at least `MIN_RUN` elements.
    let mut runs = try_with_capacity(len / MIN_RUN + 1)?;

    let mut start = 0;
    while start < len {
        let (streak_len, was_reversed) = find_streak(&v[start..], is_less);
        if was_reversed {
            v[start..start + streak_len].reverse();
        }

        let mut end = start + streak_len;
        if streak_len < MIN_RUN {
            end = cmp::min(start + MIN_RUN, len);
            insertion_sort_shift_left(&mut v[start..end], streak_len, is_less);
        }

        runs.push(TimSortRun {
            start,
            len: end - start,
        });
        start = end;
    }

    // Collapse the stack from the top.
    while runs.len() > 1 {
        let top = runs.len() - 1;
        let left = runs[top - 1];
        let right = runs[top];

        merge(
            &mut v[left.start..right.start + right.len],
            left.len,
            &mut buf,
            is_less,
        );

        runs[top - 1].len += right.len;
        runs.truncate(top);
    }

    debug_assert!(runs.len() == 1 && runs[0].start == 0 && runs[0].len == len);

    Ok(())
}

/// Internal type used by merge_sort.
#[derive(Clone, Copy, Debug)]
struct TimSortRun {
    start: usize,
    len: usize,
}

/// Finds a streak of presorted elements starting at the beginning of the slice. Returns the length
/// of the streak, and a bool denoting whether the streak was strictly descending and has to be
/// reversed.
fn find_streak<T, F>(v: &[T], is_less: &mut F) -> (usize, bool)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    if len < 2 {
        return (len, false);
    }

    let mut end = 2;

    let assume_reverse = is_less(&v[1], &v[0]);

    // Descending streaks must be strictly descending, reversing them would otherwise break
    // stability.
    if assume_reverse {
        while end < len && is_less(&v[end], &v[end - 1]) {
            end += 1;
        }

        (end, true)
    } else {
        while end < len && !is_less(&v[end], &v[end - 1]) {
            end += 1;
        }

        (end, false)
    }
}
