//! Comb sort. Compares elements a shrinking gap apart, the gap is divided by 1.3 before every
//! pass. Passes continue while the gap is above one or the previous pass swapped anything.

use std::cmp::Ordering;

sort_impl!("comb_unstable");

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    comb_sort(v, &mut |a, b| a.lt(b));
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    comb_sort(v, &mut |a, b| compare(a, b) == Ordering::Less);
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

fn comb_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let mut gap = len;
    let mut swapped = true;
    // Passes at gap one are bubble sort passes and `len` of them sort any input under a total
    // order. The cap only matters for comparison functions that violate `Ord`.
    let mut unit_passes = 0;

    while (gap > 1 || swapped) && unit_passes < len {
        gap = next_gap(gap);
        if gap == 1 {
            unit_passes += 1;
        }

        swapped = false;
        for i in 0..len - gap {
            if is_less(&v[i + gap], &v[i]) {
                v.swap(i, i + gap);
                swapped = true;
            }
        }
    }
}

/// Shrinks the gap by a factor of 1.3, never below 1.
fn next_gap(gap: usize) -> usize {
    (gap * 10 / 13).max(1)
}
