//! Library sort, also known as gapped insertion sort.
//!
//! Elements are inserted one by one into a backing array that leaves gaps between them, so most
//! insertions find a free slot right where they belong instead of shifting everything behind
//! them. Whenever the number of inserted elements doubles, the backing array is grown and the
//! elements are spread out evenly again.
//!
//! The backing array stores indices into the input, comparisons read through them. The final order
//! is applied to the input with swaps, so `T` needs neither `Clone` nor a sentinel value.
//!
//! Insertion policy:
//! - Elements are inserted in a shuffled order drawn from a generator seeded with the input
//!   length. Presorted inputs would otherwise pile every insertion into the same region and make
//!   the shifts quadratic.
//! - Elements are ordered by value, equal values by input index. The result does not depend on the
//!   insertion order and equal elements keep their relative order, which makes the sort stable.
//! - The insertion point is found by binary search over the gapped array itself. A probe that
//!   lands on a gap reads the next occupied slot instead, gaps are at most a few slots wide.
//! - If there is a gap between the neighbours at the insertion point, the element goes into the
//!   middle gap.
//! - Otherwise the occupied run on one side is shifted by one slot towards its nearest gap. The
//!   side with fewer elements to move is picked, on a tie the right side.

use std::cmp::{self, Ordering};

use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::primitives::{apply_permutation, try_filled, try_with_capacity};
use crate::SortError;

sort_impl!("library_stable", scratch);

/// Spare room factor of the backing array.
const EPSILON: f64 = 0.5;

#[inline]
pub fn sort<T>(v: &mut [T]) -> Result<(), SortError>
where
    T: Ord,
{
    library_sort(v, &mut |a, b| a.lt(b))
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    library_sort(v, &mut |a, b| compare(a, b) == Ordering::Less)
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

fn library_sort<T, F>(v: &mut [T], is_less: &mut F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 {
        return Ok(());
    }

    let shelf = fill_shelf(v, is_less)?;
    trace!(
        "library sort: {} elements, {} shifted",
        shelf.count,
        shelf.shifted
    );

    let order = shelf.into_order()?;
    apply_permutation(v, &order)
}

fn fill_shelf<T, F>(v: &[T], is_less: &mut F) -> Result<Shelf, SortError>
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    let mut insertion_order = try_with_capacity(len)?;
    insertion_order.extend(0..len);
    insertion_order.shuffle(&mut StdRng::seed_from_u64(len as u64));

    let mut shelf = Shelf::with_total(len)?;
    for idx in insertion_order {
        shelf.insert(v, idx, is_less)?;
    }

    Ok(shelf)
}

fn gapped_capacity(factor: f64, count: usize) -> usize {
    (factor * count as f64).ceil() as usize
}

/// Returns `true` if the element at input index `a` belongs before the one at `b`.
#[inline]
fn precedes<T, F>(v: &[T], a: usize, b: usize, is_less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    is_less(&v[a], &v[b]) || (a < b && !is_less(&v[b], &v[a]))
}

/// The gapped backing array.
struct Shelf {
    /// `None` is a gap, `Some(i)` holds the input element `v[i]`. Read in slot order the
    /// occupied slots are sorted.
    slots: Vec<Option<usize>>,
    count: usize,
    /// Rebalance once this many elements have been inserted.
    round_target: usize,
    total: usize,
    /// Elements moved by one slot to open a gap, over the whole sort.
    shifted: usize,
}

impl Shelf {
    fn with_total(total: usize) -> Result<Self, SortError> {
        let capacity = gapped_capacity(1.0 + EPSILON, total);

        Ok(Self {
            slots: try_filled(capacity, None)?,
            count: 0,
            round_target: 1,
            total,
            shifted: 0,
        })
    }

    fn insert<T, F>(&mut self, v: &[T], idx: usize, is_less: &mut F) -> Result<(), SortError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.count == 0 {
            let slot = self.slots.len() / 2;
            self.slots[slot] = Some(idx);
            self.count = 1;
            return Ok(());
        }

        // The second condition only matters if rounds were configured differently, it guarantees
        // a free slot below.
        if self.count == self.round_target || self.count >= self.slots.len() {
            self.rebalance()?;
        }

        let point = self.insertion_point(v, idx, is_less);

        // Gap window around `point`, bounded by its occupied neighbours or the array ends.
        let mut lo = point;
        while lo > 0 && self.slots[lo - 1].is_none() {
            lo -= 1;
        }
        let mut hi = point;
        while hi < self.slots.len() && self.slots[hi].is_none() {
            hi += 1;
        }

        let slot = if lo < hi {
            lo + (hi - lo) / 2
        } else {
            self.open_gap(point)
        };

        debug_assert!(self.slots[slot].is_none());
        self.slots[slot] = Some(idx);
        self.count += 1;

        Ok(())
    }

    /// First slot such that every occupied slot before it precedes `v[idx]` and no occupied slot
    /// from it on does.
    fn insertion_point<T, F>(&self, v: &[T], idx: usize, is_less: &mut F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut lo = 0;
        let mut hi = self.slots.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let probe = (mid..hi).find_map(|s| self.slots[s].map(|other| (s, other)));

            match probe {
                Some((slot, other)) if precedes(v, other, idx, is_less) => lo = slot + 1,
                _ => hi = mid,
            }
        }

        lo
    }

    /// Makes `slot` or `slot - 1` free by moving a contiguous run of elements by one towards the
    /// nearest gap and returns the freed slot. Both `slot - 1` and `slot` are occupied or outside
    /// the array.
    fn open_gap(&mut self, slot: usize) -> usize {
        let capacity = self.slots.len();

        for moved in 0..capacity {
            // Moving the run starting at `slot` to the right frees `slot`.
            let right = slot + moved;
            if right < capacity && self.slots[right].is_none() {
                self.slots[slot..=right].rotate_right(1);
                self.shifted += moved;
                return slot;
            }

            // Moving the run ending at `slot - 1` to the left frees `slot - 1`.
            if let Some(left) = slot.checked_sub(moved + 1) {
                if self.slots[left].is_none() {
                    self.slots[left..slot].rotate_left(1);
                    self.shifted += moved;
                    return slot - 1;
                }
            }
        }

        unreachable!("the backing array always keeps a gap")
    }

    /// Grows the backing array to `(2 + 2ε) · count` slots and spreads the elements evenly.
    fn rebalance(&mut self) -> Result<(), SortError> {
        let count = self.count;
        let capacity = gapped_capacity(2.0 + 2.0 * EPSILON, count);
        let mut slots = try_filled(capacity, None)?;

        // Element `i` goes to the middle of the `i`-th of `count` equal segments.
        for (i, idx) in self.slots.iter().flatten().enumerate() {
            let slot = ((2 * i + 1) * capacity) / (2 * count);
            slots[slot] = Some(*idx);
        }

        trace!("library sort rebalance: {count} elements over {capacity} slots");

        self.slots = slots;
        self.round_target = cmp::min(2 * count, self.total);

        Ok(())
    }

    /// Input indices in sorted order.
    fn into_order(self) -> Result<Vec<usize>, SortError> {
        let mut order = try_with_capacity(self.count)?;
        order.extend(self.slots.iter().flatten().copied());

        Ok(order)
    }
}
