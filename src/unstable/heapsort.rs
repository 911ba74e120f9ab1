use std::cmp::Ordering;

sort_impl!("heapsort_unstable");

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    crate::primitives::heapsort(v, &mut |a, b| a.lt(b));
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    crate::primitives::heapsort(v, &mut |a, b| compare(a, b) == Ordering::Less);
}
