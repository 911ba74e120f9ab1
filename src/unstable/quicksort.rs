//! Basic quicksort, Lomuto partition around the last element.

use std::cmp::Ordering;
use std::mem;

use crate::primitives::lomuto_partition;

sort_impl!("quicksort_unstable");

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    quicksort(v, &mut |a, b| a.lt(b));
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quicksort(v, &mut |a, b| compare(a, b) == Ordering::Less);
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

fn quicksort<T, F>(mut v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let len = v.len();
        if len < 2 {
            return;
        }

        let (v_without_pivot, pivot) = v.split_at_mut(len - 1);
        let lt_count = lomuto_partition(v_without_pivot, &pivot[0], is_less);

        // Place the pivot between the two partitions.
        v.swap(lt_count, len - 1);

        // Recurse into the smaller side and continue with the larger one, that bounds the
        // recursion depth to log2(len) even though the running time can degrade to O(n^2).
        let (left, right) = mem::take(&mut v).split_at_mut(lt_count);
        let right = &mut right[1..];

        if left.len() < right.len() {
            quicksort(left, is_less);
            v = right;
        } else {
            quicksort(right, is_less);
            v = left;
        }
    }
}
