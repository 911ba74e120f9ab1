//! Tournament sort over a static single-elimination tree.
//!
//! The tree has `k = n.next_power_of_two()` leaves, every node stores the leaf index of the winner
//! of its subtree. Leaves past the input and already extracted leaves are exhausted and lose every
//! match, which replaces the usual "infinity" sentinel. Ties go to the lower leaf index, which
//! keeps the sort stable.

use std::cmp::Ordering;

use crate::primitives::{apply_permutation, try_filled, try_with_capacity};
use crate::SortError;

sort_impl!("tournament_stable", scratch);

#[inline]
pub fn sort<T>(v: &mut [T]) -> Result<(), SortError>
where
    T: Ord,
{
    tournament_sort(v, &mut |a, b| a.lt(b))
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    tournament_sort(v, &mut |a, b| compare(a, b) == Ordering::Less)
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

fn tournament_sort<T, F>(v: &mut [T], is_less: &mut F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return Ok(());
    }

    let mut tree = Tournament::build(v, is_less)?;

    let mut order = try_with_capacity(len)?;
    for _ in 0..len {
        order.push(tree.pop(v, is_less));
    }

    apply_permutation(v, &order)
}

struct Tournament {
    /// Heap layout, the root is `nodes[1]` and leaf `i` is `nodes[leaves + i]`.
    nodes: Vec<usize>,
    exhausted: Vec<bool>,
    leaves: usize,
}

impl Tournament {
    fn build<T, F>(v: &[T], is_less: &mut F) -> Result<Self, SortError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let len = v.len();
        let leaves = len.next_power_of_two();

        let mut exhausted = try_filled(leaves, true)?;
        exhausted[..len].fill(false);

        let mut nodes = try_filled(2 * leaves, 0)?;
        for (i, leaf) in nodes[leaves..].iter_mut().enumerate() {
            *leaf = i;
        }

        let mut tree = Self {
            nodes,
            exhausted,
            leaves,
        };

        for node in (1..leaves).rev() {
            tree.replay(node, v, is_less);
        }

        Ok(tree)
    }

    /// Extracts the current winner and returns its input index.
    fn pop<T, F>(&mut self, v: &[T], is_less: &mut F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let winner = self.nodes[1];
        self.exhausted[winner] = true;

        // Only the matches on the path from the winner's leaf to the root can change.
        let mut node = (self.leaves + winner) / 2;
        while node >= 1 {
            self.replay(node, v, is_less);
            node /= 2;
        }

        winner
    }

    fn replay<T, F>(&mut self, node: usize, v: &[T], is_less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        // Every leaf in the left subtree has a lower index than every leaf in the right one.
        let left = self.nodes[2 * node];
        let right = self.nodes[2 * node + 1];

        self.nodes[node] = match (self.exhausted[left], self.exhausted[right]) {
            (true, _) => right,
            (false, true) => left,
            (false, false) => {
                if is_less(&v[right], &v[left]) {
                    right
                } else {
                    left
                }
            }
        };
    }
}
