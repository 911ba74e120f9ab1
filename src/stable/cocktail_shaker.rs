//! Bidirectional bubble sort. Each pass shrinks the unsorted window to the position of its last
//! swap.

use std::cmp::Ordering;

sort_impl!("cocktail_shaker_stable");

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    cocktail_shaker_sort(v, &mut |a, b| a.lt(b));
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    cocktail_shaker_sort(v, &mut |a, b| compare(a, b) == Ordering::Less);
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

fn cocktail_shaker_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    // Inclusive bounds of the window that may still be out of order.
    let mut left = 0;
    let mut right = len - 1;

    loop {
        // Left to right, carries the maximum to `right`.
        let mut swapped = false;
        let mut last_swap = left;
        for i in left..right {
            if is_less(&v[i + 1], &v[i]) {
                v.swap(i, i + 1);
                swapped = true;
                last_swap = i;
            }
        }

        if !swapped {
            break;
        }
        right = last_swap;

        // Right to left, carries the minimum to `left`.
        swapped = false;
        last_swap = right;
        for i in (left + 1..=right).rev() {
            if is_less(&v[i], &v[i - 1]) {
                v.swap(i - 1, i);
                swapped = true;
                last_swap = i;
            }
        }

        if !swapped {
            break;
        }
        left = last_swap;
    }
}
