//! Input patterns for the experiment harness, the benchmarks and the tests.
//!
//! Every generator takes the random number generator as a parameter, so a dataset is fully
//! determined by the seed its caller picked.

use std::cmp::Reverse;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Exclusive upper bound of the values `random` and `partially_sorted` draw.
pub const RANDOM_VALUE_LIMIT: i32 = 10_000;

// --- Public ---

pub fn rng_from_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn ascending(size: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..size as i32).collect()
}

pub fn descending(size: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    // `size` down to 1.
    (1..=size as i32).rev().collect()
}

pub fn random<R: Rng>(size: usize, rng: &mut R) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    random_uniform(size, 0..RANDOM_VALUE_LIMIT, rng)
}

pub fn partially_sorted<R: Rng>(size: usize, rng: &mut R) -> Vec<i32> {
    //    .   .
    //   .: : :
    // .:::.:::

    // First half ascending from 0, second half random.
    let mid = size / 2;
    let mut vals = ascending(mid);
    vals.extend(random(size - mid, rng));

    vals
}

pub fn random_full<R: Rng>(size: usize, rng: &mut R) -> Vec<i32> {
    // Every value of `i32` is possible, including the extremes.
    (0..size).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<D, R>(size: usize, range: D, rng: &mut R) -> Vec<i32>
where
    D: Into<Uniform<i32>>,
    R: Rng,
{
    // :.:.:.::

    let dist: Uniform<i32> = range.into();

    dist.sample_iter(rng).take(size).collect()
}

pub fn all_equal(size: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; size]
}

pub fn saw_mixed<R: Rng>(size: usize, saw_count: usize, rng: &mut R) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if size == 0 {
        return Vec::new();
    }

    let mut vals = random_full(size, rng);
    let chunk_size = size / saw_count.max(1);

    for chunk in vals.chunks_mut(chunk_size.max(1)) {
        if rng.gen::<bool>() {
            chunk.sort();
        } else {
            chunk.sort_by_key(|&e| Reverse(e));
        }
    }

    vals
}

pub fn pipe_organ<R: Rng>(size: usize, rng: &mut R) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random_full(size, rng);
    let (first_half, second_half) = vals.split_at_mut(size / 2);

    first_half.sort();
    second_half.sort_by_key(|&e| Reverse(e));

    vals
}
