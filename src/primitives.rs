//! Single-pass building blocks shared by the algorithm drivers.

use std::mem;
use std::ptr;

use crate::SortError;

////////////////////////////////////////////////////////////////////////////////
// Scratch allocation
////////////////////////////////////////////////////////////////////////////////

/// Allocates an empty `Vec` with room for `capacity` elements, reporting failure instead of
/// aborting.
pub(crate) fn try_with_capacity<T>(capacity: usize) -> Result<Vec<T>, SortError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity)
        .map_err(|err| SortError::out_of_memory(capacity, err))?;

    Ok(buf)
}

pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, SortError> {
    let mut buf = try_with_capacity(len)?;
    buf.resize(len, value);

    Ok(buf)
}

////////////////////////////////////////////////////////////////////////////////
// Insertion
////////////////////////////////////////////////////////////////////////////////

/// Sorts `v` assuming `v[..offset]` is already sorted, by moving each remaining element to the
/// left until it is no longer less than its predecessor.
pub(crate) fn insertion_sort_shift_left<T, F>(v: &mut [T], offset: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(offset != 0 && offset <= len);

    for i in offset..len {
        let mut j = i;
        while j > 0 && is_less(&v[j], &v[j - 1]) {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Partition
////////////////////////////////////////////////////////////////////////////////

/// Moves all elements less than `pivot` to the front of `v` and returns their count.
pub(crate) fn lomuto_partition<T, F>(v: &mut [T], pivot: &T, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    let mut l = 0;
    for r in 0..len {
        if is_less(&v[r], pivot) {
            v.swap(l, r);
            l += 1;
        }
    }

    l
}

////////////////////////////////////////////////////////////////////////////////
// Heap
////////////////////////////////////////////////////////////////////////////////

/// Sorts `v` using heapsort, which guarantees *O*(*n* \* log(*n*)) worst-case.
pub(crate) fn heapsort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    // Build the heap in linear time.
    for i in (0..len / 2).rev() {
        sift_down(v, i, is_less);
    }

    // Pop maximal elements from the heap.
    for i in (1..len).rev() {
        v.swap(0, i);
        sift_down(&mut v[..i], 0, is_less);
    }
}

// This binary heap respects the invariant `parent >= child`.
pub(crate) fn sift_down<T, F>(v: &mut [T], mut node: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    loop {
        // Children of `node`.
        let mut child = 2 * node + 1;
        if child >= len {
            break;
        }

        // Choose the greater child.
        if child + 1 < len && is_less(&v[child], &v[child + 1]) {
            child += 1;
        }

        // Stop if the invariant holds at `node`.
        if !is_less(&v[node], &v[child]) {
            break;
        }

        v.swap(node, child);
        node = child;
    }
}

////////////////////////////////////////////////////////////////////////////////
// Merge
////////////////////////////////////////////////////////////////////////////////

/// Merges non-decreasing runs `v[..mid]` and `v[mid..]` using the spare capacity of `buf` as
/// temporary storage, and stores the result into `v[..]`. Equal elements keep their order, the
/// left run wins ties.
///
/// `buf` must be empty and have capacity for the shorter of the two runs. `T` must not be a
/// zero-sized type.
pub(crate) fn merge<T, F>(v: &mut [T], mid: usize, buf: &mut Vec<T>, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if mid == 0 || mid >= len {
        return;
    }

    let shorter_len = mid.min(len - mid);
    assert!(buf.is_empty() && buf.capacity() >= shorter_len);
    assert!(mem::size_of::<T>() != 0);

    let arr_ptr = v.as_mut_ptr();
    let buf_ptr = buf.as_mut_ptr();

    // The shorter run is copied into `buf` and then merged back, forwards if it was the left run
    // and backwards if it was the right run. `hole` always covers the unconsumed part of `buf`
    // and the gap in `v` it belongs into. If `is_less` panics, dropping `hole` moves the rest of
    // `buf` into that gap, so `v` still holds every element exactly once.
    //
    // SAFETY: All pointers stay within `v` and the first `shorter_len` slots of `buf`. `buf` never
    // has its length changed, so the bitwise copies in it are never dropped.
    unsafe {
        let v_end = arr_ptr.add(len);

        if mid <= len - mid {
            // The left run is shorter.
            ptr::copy_nonoverlapping(arr_ptr, buf_ptr, mid);
            let mut hole = MergeHole {
                start: buf_ptr,
                end: buf_ptr.add(mid),
                dest: arr_ptr,
            };

            let mut right = arr_ptr.add(mid);

            while hole.start < hole.end && right < v_end {
                // Consume the lesser side. If equal, prefer the left run to maintain stability.
                let src = if is_less(&*right, &*hole.start) {
                    let src = right;
                    right = right.add(1);
                    src
                } else {
                    let src = hole.start;
                    hole.start = hole.start.add(1);
                    src
                };

                ptr::copy_nonoverlapping(src, hole.dest, 1);
                hole.dest = hole.dest.add(1);
            }
        } else {
            // The right run is shorter.
            let right_len = len - mid;
            ptr::copy_nonoverlapping(arr_ptr.add(mid), buf_ptr, right_len);

            // Here `dest` is the end of the unconsumed left run, the gap lies between it and
            // `out`.
            let mut hole = MergeHole {
                start: buf_ptr,
                end: buf_ptr.add(right_len),
                dest: arr_ptr.add(mid),
            };

            let mut out = v_end;

            while arr_ptr < hole.dest && hole.start < hole.end {
                let left_last = hole.dest.sub(1);
                let right_last = hole.end.sub(1);
                out = out.sub(1);

                // Consume the greater side. If equal, prefer the right run to maintain stability.
                if is_less(&*right_last, &*left_last) {
                    ptr::copy_nonoverlapping(left_last, out, 1);
                    hole.dest = left_last;
                } else {
                    ptr::copy_nonoverlapping(right_last, out, 1);
                    hole.end = right_last;
                }
            }
        }
        // Finally, `hole` gets dropped. If the shorter run was not fully consumed, whatever remains
        // of it will now be copied into the hole in `v`.
    }

    struct MergeHole<T> {
        start: *mut T,
        end: *mut T,
        dest: *mut T,
    }

    impl<T> Drop for MergeHole<T> {
        fn drop(&mut self) {
            // SAFETY: `start..end` is the unconsumed part of the scratch copy, and `dest` points to
            // a gap in `v` of exactly that length.
            unsafe {
                let len = self.end.offset_from(self.start) as usize;
                ptr::copy_nonoverlapping(self.start, self.dest, len);
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Permutation
////////////////////////////////////////////////////////////////////////////////

/// Reorders `v` so that afterwards `v[k]` holds the element previously at `v[order[k]]`.
///
/// `order` must be a permutation of `0..v.len()`. Each cycle of the permutation is walked once
/// with swaps, elements are never cloned.
pub(crate) fn apply_permutation<T>(v: &mut [T], order: &[usize]) -> Result<(), SortError> {
    let len = v.len();
    debug_assert_eq!(order.len(), len);

    let mut placed = try_filled(len, false)?;

    for start in 0..len {
        if placed[start] {
            continue;
        }

        let mut k = start;
        loop {
            placed[k] = true;
            let src = order[k];
            if src == start {
                break;
            }

            v.swap(k, src);
            k = src;
        }
    }

    Ok(())
}
