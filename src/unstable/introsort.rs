//! Non-recursive introsort. Quicksort with a median-of-three pivot, insertion sort for small
//! subslices, and heapsort once the partition budget of a subslice is used up.

use std::cmp::Ordering;

use log::debug;

use crate::primitives::{heapsort, insertion_sort_shift_left, lomuto_partition};

sort_impl!("introsort_unstable");

/// Subslices shorter than this are insertion sorted.
const SMALL_SORT_THRESHOLD: usize = 16;

/// The stack holds at most `limit + 1` items, and `limit <= 2 * floor(log2(usize::MAX))`.
const MAX_STACK_LEN: usize = 2 * usize::BITS as usize + 2;

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    unstable_sort(v, |a, b| a.lt(b));
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    unstable_sort(v, |a, b| compare(a, b) == Ordering::Less);
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

#[inline]
fn unstable_sort<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 {
        return;
    }

    // Limit the number of partitions along any path to `2 * floor(log2(len))`.
    let limit = 2 * v.len().ilog2();

    introsort(v, limit, &mut is_less);
}

fn introsort<T, F>(v_full: &mut [T], limit: u32, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    // Pending `(start, end, remaining depth)` work items.
    let mut stack = [(0usize, 0usize, 0u32); MAX_STACK_LEN];
    stack[0] = (0, v_full.len(), limit);
    let mut stack_len = 1;

    while stack_len != 0 {
        stack_len -= 1;
        let (start, end, depth) = stack[stack_len];
        let v = &mut v_full[start..end];

        let len = v.len();
        if len < SMALL_SORT_THRESHOLD {
            if len >= 2 {
                insertion_sort_shift_left(v, 1, is_less);
            }
            continue;
        }

        // If too many bad pivot choices were made, simply fall back to heapsort in order to
        // guarantee `O(n * log(n))` worst-case.
        if depth == 0 {
            debug!("introsort depth limit reached, heapsorting {len} elements");
            heapsort(v, is_less);
            continue;
        }

        choose_pivot(v, is_less);

        let (pivot, v_without_pivot) = v.split_at_mut(1);
        let lt_count = lomuto_partition(v_without_pivot, &pivot[0], is_less);

        // Place the pivot between the two partitions.
        v.swap(0, lt_count);

        stack[stack_len] = (start, start + lt_count, depth - 1);
        stack[stack_len + 1] = (start + lt_count + 1, end, depth - 1);
        stack_len += 2;
    }
}

/// Moves the median of the first, middle and last element to the front.
fn choose_pivot<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let (a, b, c) = (0, len / 2, len - 1);

    // Order the three candidates, the median ends up at `b`.
    if is_less(&v[b], &v[a]) {
        v.swap(a, b);
    }
    if is_less(&v[c], &v[b]) {
        v.swap(b, c);
        if is_less(&v[b], &v[a]) {
            v.swap(a, b);
        }
    }

    v.swap(0, b);
}
