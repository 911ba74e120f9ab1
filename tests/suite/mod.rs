//! Generic test suite, instantiated for every sort by `instantiate_sort_tests!` in `main.rs`.

use std::cell::Cell;
use std::cmp::Ordering;
use std::env;
use std::fmt::Debug;
use std::fs;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::Rng;

use sort_classics::patterns;
use sort_classics::Sort;

const TEST_SIZES: [usize; 26] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 16, 17, 20, 24, 30, 32, 33, 35, 50, 100, 200, 500, 1_000,
    2_048,
];

/// Sizes only the sorts without a quadratic worst case are checked with.
const LARGE_TEST_SIZES: [usize; 3] = [5_000, 10_000, 10_007];

static SEED: Lazy<u64> = Lazy::new(|| {
    env::var("OVERRIDE_SEED")
        .ok()
        .and_then(|seed| seed.parse().ok())
        .unwrap_or_else(|| rand::thread_rng().gen())
});

fn get_or_init_random_seed<S: Sort>() -> u64 {
    static SEED_WRITTEN: Mutex<bool> = Mutex::new(false);
    let seed = *SEED;

    let mut seed_writer = SEED_WRITTEN.lock().unwrap();
    if !*seed_writer {
        // Always write the seed before doing anything to ensure reproducibility of crashes.
        io::stdout()
            .write_all(format!("\nSeed: {seed}\nTesting: {}\n\n", <S as Sort>::name()).as_bytes())
            .unwrap();
        io::stdout().flush().unwrap();

        *seed_writer = true;
    }

    seed
}

/// Every pattern of the same size draws the same values, different sizes differ.
fn rng(size: usize) -> StdRng {
    patterns::rng_from_seed(*SEED ^ (size as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn sort_comp<T: Ord + Clone + Debug, S: Sort>(v: &mut [T]) {
    let seed = get_or_init_random_seed::<S>();

    let is_small_test = v.len() <= 100;
    let original_clone = v.to_vec();

    let mut stdlib_sorted_vec = v.to_vec();
    let stdlib_sorted = stdlib_sorted_vec.as_mut_slice();
    stdlib_sorted.sort();

    let testsort_sorted = v;
    <S as Sort>::sort(testsort_sorted).unwrap();

    assert_eq!(stdlib_sorted.len(), testsort_sorted.len());

    for (a, b) in stdlib_sorted.iter().zip(testsort_sorted.iter()) {
        if a != b {
            if is_small_test {
                eprintln!("Original: {:?}", original_clone);
                eprintln!("Expected: {:?}", stdlib_sorted);
                eprintln!("Got:      {:?}", testsort_sorted);
            } else if env::var("WRITE_LARGE_FAILURE").is_ok() {
                // Large arrays output them as files.
                let original_name = format!("original_{}.txt", seed);
                let std_name = format!("stdlib_sorted_{}.txt", seed);
                let testsort_name = format!("testsort_sorted_{}.txt", seed);

                fs::write(&original_name, format!("{:?}", original_clone)).unwrap();
                fs::write(&std_name, format!("{:?}", stdlib_sorted)).unwrap();
                fs::write(&testsort_name, format!("{:?}", testsort_sorted)).unwrap();

                eprintln!(
                    "Failed comparison, see files {original_name}, {std_name}, and {testsort_name}"
                );
            } else {
                eprintln!(
                    "Failed comparison, re-run with WRITE_LARGE_FAILURE env var set, to get output."
                );
            }

            panic!("Test assertion failed!")
        }
    }
}

fn test_impl<T: Ord + Clone + Debug, S: Sort>(pattern_fn: impl Fn(usize) -> Vec<T>) {
    for test_size in TEST_SIZES {
        let mut test_data = pattern_fn(test_size);
        sort_comp::<T, S>(test_data.as_mut_slice());
    }
}

fn test_impl_custom(mut test_fn: impl FnMut(usize, fn(usize) -> Vec<i32>)) {
    let test_pattern_fns: Vec<fn(usize) -> Vec<i32>> = vec![
        |size| patterns::random_full(size, &mut rng(size)),
        |size: usize| {
            let max = (size as f64).log2().round() as i32;
            patterns::random_uniform(size, 0..=max, &mut rng(size))
        },
        |size| patterns::random_uniform(size, 0..=1, &mut rng(size)),
        patterns::ascending,
        patterns::descending,
        |size: usize| {
            let saw_count = (size as f64).log2().round() as usize;
            patterns::saw_mixed(size, saw_count, &mut rng(size))
        },
        |size| patterns::pipe_organ(size, &mut rng(size)),
    ];

    for test_pattern_fn in test_pattern_fns {
        for test_size in &TEST_SIZES[..TEST_SIZES.len() - 1] {
            if *test_size < 2 {
                continue;
            }

            test_fn(*test_size, test_pattern_fn);
        }
    }
}

trait DynTrait: Debug {
    fn get_val(&self) -> i32;
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct DynValA {
    value: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct DynValB {
    value: i32,
}

impl DynTrait for DynValA {
    fn get_val(&self) -> i32 {
        self.value
    }
}
impl DynTrait for DynValB {
    fn get_val(&self) -> i32 {
        self.value
    }
}

impl PartialOrd for dyn DynTrait {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for dyn DynTrait {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get_val().cmp(&other.get_val())
    }
}

impl PartialEq for dyn DynTrait {
    fn eq(&self, other: &Self) -> bool {
        self.get_val() == other.get_val()
    }
}

impl Eq for dyn DynTrait {}

// --- TESTS ---

pub fn basic<S: Sort>() {
    sort_comp::<i32, S>(&mut []);
    sort_comp::<(), S>(&mut []);
    sort_comp::<(), S>(&mut [()]);
    sort_comp::<(), S>(&mut [(), ()]);
    sort_comp::<(), S>(&mut [(), (), ()]);
    sort_comp::<i32, S>(&mut [2, 3]);
    sort_comp::<i32, S>(&mut [2, 3, 6]);
    sort_comp::<i32, S>(&mut [2, 3, 99, 6]);
    sort_comp::<i32, S>(&mut [2, 7709, 400, 90932]);
    sort_comp::<i32, S>(&mut [15, -1, 3, -1, -3, -1, 7]);
    sort_comp::<i32, S>(&mut [5, 3, 4, 1, 2]);
}

pub fn random<S: Sort>() {
    test_impl::<i32, S>(|size| patterns::random_full(size, &mut rng(size)));
}

pub fn random_dataset<S: Sort>() {
    // The values the experiment harness uses.
    test_impl::<i32, S>(|size| patterns::random(size, &mut rng(size)));
}

pub fn random_type_u64<S: Sort>() {
    test_impl::<u64, S>(|size| {
        patterns::random_full(size, &mut rng(size))
            .iter()
            .map(|val| -> u64 {
                // Extends the value into the 64 bit range,
                // while preserving input order.
                let x = ((*val as i64) + (i32::MAX as i64) + 1) as u64;
                x.checked_mul(i32::MAX as u64).unwrap()
            })
            .collect()
    });
}

pub fn random_type_u128<S: Sort>() {
    test_impl::<u128, S>(|size| {
        patterns::random_full(size, &mut rng(size))
            .iter()
            .map(|val| -> u128 {
                // Extends the value into the 128 bit range,
                // while preserving input order.
                let x = ((*val as i128) + (i64::MAX as i128) + 1) as u128;
                x.checked_mul(i64::MAX as u128).unwrap()
            })
            .collect()
    });
}

pub fn random_d4<S: Sort>() {
    test_impl::<i32, S>(|size| patterns::random_uniform(size, 0..4, &mut rng(size)));
}

pub fn random_d256<S: Sort>() {
    test_impl::<i32, S>(|size| patterns::random_uniform(size, 0..256, &mut rng(size)));
}

pub fn random_binary<S: Sort>() {
    test_impl::<i32, S>(|size| patterns::random_uniform(size, 0..=1, &mut rng(size)));
}

pub fn all_equal<S: Sort>() {
    test_impl::<i32, S>(patterns::all_equal);
}

pub fn ascending<S: Sort>() {
    test_impl::<i32, S>(patterns::ascending);
}

pub fn descending<S: Sort>() {
    test_impl::<i32, S>(patterns::descending);
}

pub fn partially_sorted<S: Sort>() {
    test_impl::<i32, S>(|size| patterns::partially_sorted(size, &mut rng(size)));
}

pub fn saw_mixed<S: Sort>() {
    test_impl::<i32, S>(|test_size| {
        let saw_count = (test_size as f64).log2().round() as usize;
        patterns::saw_mixed(test_size, saw_count, &mut rng(test_size))
    });
}

pub fn pipe_organ<S: Sort>() {
    test_impl::<i32, S>(|size| patterns::pipe_organ(size, &mut rng(size)));
}

pub fn random_str<S: Sort>() {
    test_impl::<String, S>(|test_size| {
        patterns::random_full(test_size, &mut rng(test_size))
            .into_iter()
            .map(|val| format!("{}", val))
            .collect::<Vec<_>>()
    });
}

pub fn dyn_val<S: Sort>() {
    // Dyn values are fat pointers, something the implementation might have overlooked.
    test_impl::<Rc<dyn DynTrait>, S>(|test_size| {
        patterns::random_full(test_size, &mut rng(test_size))
            .into_iter()
            .map(|val| -> Rc<dyn DynTrait> {
                if val < (i32::MAX / 2) {
                    Rc::new(DynValA { value: val })
                } else {
                    Rc::new(DynValB { value: val })
                }
            })
            .collect::<Vec<Rc<dyn DynTrait>>>()
    });
}

pub fn random_large<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    for test_size in LARGE_TEST_SIZES {
        let mut rng = rng(test_size);
        sort_comp::<i32, S>(&mut patterns::random_full(test_size, &mut rng));
        sort_comp::<i32, S>(&mut patterns::random(test_size, &mut rng));
        sort_comp::<i32, S>(&mut patterns::partially_sorted(test_size, &mut rng));
        sort_comp::<i32, S>(&mut patterns::saw_mixed(test_size, 13, &mut rng));
        sort_comp::<i32, S>(&mut patterns::descending(test_size));
    }
}

pub fn idempotent<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    for test_size in TEST_SIZES {
        let mut v = patterns::random_uniform(test_size, 0..100, &mut rng(test_size));
        <S as Sort>::sort(&mut v).unwrap();
        let once = v.clone();

        <S as Sort>::sort(&mut v).unwrap();
        assert_eq!(v, once);
    }
}

pub fn comp_panic<S: Sort>() {
    // Test that sorting upholds panic safety.
    // This means, no non trivial duplicates even if a comparison panics.

    let seed = get_or_init_random_seed::<S>();

    let test_fn = |test_size: usize, pattern_fn: fn(usize) -> Vec<i32>| {
        // Needs to be non trivial dtor.
        let mut pattern = pattern_fn(test_size)
            .into_iter()
            .map(|val| vec![val, val, val])
            .collect::<Vec<Vec<i32>>>();

        let val = panic::catch_unwind(AssertUnwindSafe(|| {
            <S as Sort>::sort_by(&mut pattern, |a, b| {
                if a[0].abs() < (i32::MAX / test_size as i32) {
                    panic!(
                        "Explicit panic. Seed: {}. test_size: {}. a: {} b: {}",
                        seed, test_size, a[0], b[0]
                    );
                }

                a[0].cmp(&b[0])
            })
            .unwrap();

            pattern
                .get(pattern.len().saturating_sub(1))
                .map(|val| val[0])
                .unwrap_or(66)
        }));
        if let Err(err) = val {
            // Side effect.
            println!("{:?}", err);
        }
    };

    test_impl_custom(test_fn);
}

fn calc_comps_required<T: Clone, S: Sort>(
    test_data: &[T],
    mut cmp_fn: impl FnMut(&T, &T) -> Ordering,
) -> u32 {
    let mut comp_counter = 0u32;

    let mut test_data_clone = test_data.to_vec();
    <S as Sort>::sort_by(&mut test_data_clone, |a, b| {
        comp_counter += 1;

        cmp_fn(a, b)
    })
    .unwrap();

    comp_counter
}

pub fn panic_retain_original_set<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    let test_fn = |test_size: usize, pattern_fn: fn(usize) -> Vec<i32>| {
        let mut test_data = pattern_fn(test_size);
        let mut sorted_before = test_data.clone();
        sorted_before.sort();

        // Calculate a specific comparison that should panic.
        // Ensure that it can be any of the possible comparisons and that it always panics.
        let required_comps = calc_comps_required::<i32, S>(&test_data, |a, b| a.cmp(b));
        let panic_threshold = rng(test_size).gen_range(0..required_comps);

        let mut comp_counter = 0;

        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ = <S as Sort>::sort_by(&mut test_data, |a, b| {
                if comp_counter == panic_threshold {
                    panic!();
                }
                comp_counter += 1;

                a.cmp(b)
            });
        }));

        assert!(res.is_err());

        // The slice must still hold exactly the original elements.
        test_data.sort();
        assert_eq!(test_data, sorted_before);
    };

    test_impl_custom(test_fn);
}

pub fn panic_observable_is_less<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    // Every call to the comparison function must be observable in the slice afterwards, even if
    // it panics. This can go wrong if the comparison sees a temporary copy that is never moved
    // back.

    #[derive(PartialEq, Eq, Debug, Clone)]
    struct CompCount {
        val: i32,
        comp_count: Cell<u32>,
    }

    impl CompCount {
        fn new(val: i32) -> Self {
            Self {
                val,
                comp_count: Cell::new(0),
            }
        }
    }

    let test_fn = |test_size: usize, pattern_fn: fn(usize) -> Vec<i32>| {
        let pattern = pattern_fn(test_size);

        let mut test_input = pattern
            .iter()
            .map(|val| CompCount::new(*val))
            .collect::<Vec<_>>();

        let required_comps =
            calc_comps_required::<CompCount, S>(&test_input, |a, b| a.val.cmp(&b.val));
        let panic_threshold = rng(test_size).gen_range(0..required_comps as u64);

        let mut comp_count_global = 0;

        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ = <S as Sort>::sort_by(&mut test_input, |a, b| {
                if comp_count_global == panic_threshold {
                    panic!();
                }

                a.comp_count.replace(a.comp_count.get() + 1);
                b.comp_count.replace(b.comp_count.get() + 1);
                comp_count_global += 1;

                a.val.cmp(&b.val)
            });
        }));

        assert!(res.is_err());

        let total_inner: u64 = test_input.iter().map(|c| c.comp_count.get() as u64).sum();
        assert_eq!(total_inner, comp_count_global * 2);

        let mut values_after = test_input.iter().map(|c| c.val).collect::<Vec<_>>();
        let mut values_before = pattern;
        values_after.sort();
        values_before.sort();
        assert_eq!(values_after, values_before);
    };

    test_impl_custom(test_fn);
}

pub fn violate_ord_retain_original_set<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    // A comparison function that violates Ord may produce any order, but the input must retain
    // its original set of elements and the sort must not go out of bounds.

    let invalid_ord_comp_functions: Vec<fn(&i32, &i32, &mut StdRng) -> Ordering> = vec![
        |_a: &i32, _b: &i32, rng: &mut StdRng| match rng.gen_range(0..3) {
            0 => Ordering::Less,
            1 => Ordering::Equal,
            _ => Ordering::Greater,
        },
        |_a: &i32, _b: &i32, _rng: &mut StdRng| Ordering::Less,
        |_a: &i32, _b: &i32, _rng: &mut StdRng| Ordering::Greater,
        |a: &i32, b: &i32, rng: &mut StdRng| {
            if rng.gen_ratio(1, 10) {
                b.cmp(a)
            } else {
                a.cmp(b)
            }
        },
    ];

    for comp_func in invalid_ord_comp_functions {
        let test_fn = |test_size: usize, pattern_fn: fn(usize) -> Vec<i32>| {
            let mut test_data = pattern_fn(test_size);
            let mut sorted_before = test_data.clone();
            sorted_before.sort();

            let mut rng = rng(test_size);
            <S as Sort>::sort_by(&mut test_data, |a, b| comp_func(a, b, &mut rng)).unwrap();

            test_data.sort();
            assert_eq!(test_data, sorted_before);
        };

        test_impl_custom(test_fn);
    }
}

pub fn stability<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    if <S as Sort>::name().contains("unstable") {
        // It would be great to mark the test as skipped, but that isn't possible as of now.
        return;
    }

    let rand_vals = patterns::random_uniform(5_000, 0..=9, &mut rng(5_000));
    let mut rand_idx = 0;

    for len in (2..55).chain(1_000..1_010) {
        let mut counts = [0; 10];

        // Create a vector like [(6, 1), (5, 1), (6, 2), ...], where the first item of each tuple
        // is random, but the second item represents which occurrence of that number this element
        // is, i.e., the second elements will occur in sorted order.
        let orig: Vec<(i32, i32)> = (0..len)
            .map(|_| {
                let n = rand_vals[rand_idx];
                rand_idx = (rand_idx + 1) % rand_vals.len();

                counts[n as usize] += 1;
                (n, counts[n as usize])
            })
            .collect();

        let mut v = orig.clone();
        // Only sort on the first element, so an unstable sort may mix up the counts.
        <S as Sort>::sort_by(&mut v, |a, b| a.0.cmp(&b.0)).unwrap();

        // This comparison includes the count, so elements with equal first items will need to be
        // ordered with increasing counts, i.e., exactly asserting that this sort is stable.
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
    }
}

pub fn sort_vs_sort_by<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    // Ensure that sort and sort_by produce the same result.
    let mut input_normal = [800, 3, -801, 5, -801, -3, 60, 200, 50, 7, 10];
    let expected = [-801, -801, -3, 3, 5, 7, 10, 50, 60, 200, 800];

    let mut input_sort_by = input_normal.to_vec();

    <S as Sort>::sort(&mut input_normal).unwrap();
    <S as Sort>::sort_by(&mut input_sort_by, |a, b| a.cmp(b)).unwrap();

    assert_eq!(input_normal, expected);
    assert_eq!(input_sort_by, expected);
}

pub fn int_edge<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    // Ensure that the sort can handle integer edge cases.
    sort_comp::<i32, S>(&mut [i32::MIN, i32::MAX]);
    sort_comp::<i32, S>(&mut [i32::MAX, i32::MIN]);
    sort_comp::<i32, S>(&mut [i32::MIN, 3]);
    sort_comp::<i32, S>(&mut [i32::MIN, -3]);
    sort_comp::<i32, S>(&mut [i32::MIN, -3, i32::MAX]);
    sort_comp::<i32, S>(&mut [i32::MIN, -3, i32::MAX, i32::MIN, 5]);
    sort_comp::<i32, S>(&mut [i32::MAX, 3, i32::MIN, 5, i32::MIN, -3, 60, 200, 50, 7, 10]);

    sort_comp::<u64, S>(&mut [u64::MIN, u64::MAX]);
    sort_comp::<u64, S>(&mut [u64::MAX, u64::MIN]);
    sort_comp::<u64, S>(&mut [u64::MIN, u64::MAX - 3, u64::MAX, u64::MIN, 5]);

    let size = TEST_SIZES[TEST_SIZES.len() - 1];
    let mut large = patterns::random_full(size, &mut rng(size));
    large.push(i32::MAX);
    large.push(i32::MIN);
    large.push(i32::MAX);
    sort_comp::<i32, S>(&mut large);
}
