use std::cmp::Ordering;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::{stable, unstable, Sort, SortError};

/// Runtime handle for every sort in the crate, used where the algorithm is picked by name or
/// iterated over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    CocktailShaker,
    Comb,
    Heap,
    Insertion,
    Introsort,
    Library,
    Quick,
    Selection,
    Tim,
    Tournament,
}

impl Algorithm {
    pub const ALL: [Algorithm; 11] = [
        Algorithm::Bubble,
        Algorithm::CocktailShaker,
        Algorithm::Comb,
        Algorithm::Heap,
        Algorithm::Insertion,
        Algorithm::Introsort,
        Algorithm::Library,
        Algorithm::Quick,
        Algorithm::Selection,
        Algorithm::Tim,
        Algorithm::Tournament,
    ];

    /// Short name used on the command line and in `SORT_ALGORITHMS`.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::CocktailShaker => "cocktail_shaker",
            Algorithm::Comb => "comb",
            Algorithm::Heap => "heap",
            Algorithm::Insertion => "insertion",
            Algorithm::Introsort => "introsort",
            Algorithm::Library => "library",
            Algorithm::Quick => "quick",
            Algorithm::Selection => "selection",
            Algorithm::Tim => "tim",
            Algorithm::Tournament => "tournament",
        }
    }

    /// Full registry name, `<algo>_stable` or `<algo>_unstable`.
    pub fn registry_name(self) -> String {
        match self {
            Algorithm::Bubble => <stable::bubble::SortImpl as Sort>::name(),
            Algorithm::CocktailShaker => <stable::cocktail_shaker::SortImpl as Sort>::name(),
            Algorithm::Comb => <unstable::comb::SortImpl as Sort>::name(),
            Algorithm::Heap => <unstable::heapsort::SortImpl as Sort>::name(),
            Algorithm::Insertion => <stable::insertion::SortImpl as Sort>::name(),
            Algorithm::Introsort => <unstable::introsort::SortImpl as Sort>::name(),
            Algorithm::Library => <stable::library::SortImpl as Sort>::name(),
            Algorithm::Quick => <unstable::quicksort::SortImpl as Sort>::name(),
            Algorithm::Selection => <unstable::selection::SortImpl as Sort>::name(),
            Algorithm::Tim => <stable::timsort::SortImpl as Sort>::name(),
            Algorithm::Tournament => <stable::tournament::SortImpl as Sort>::name(),
        }
    }

    pub fn is_stable(self) -> bool {
        matches!(
            self,
            Algorithm::Bubble
                | Algorithm::CocktailShaker
                | Algorithm::Insertion
                | Algorithm::Library
                | Algorithm::Tim
                | Algorithm::Tournament
        )
    }

    /// Sorts that take quadratic time on some inputs the experiment harness generates.
    pub fn has_quadratic_worst_case(self) -> bool {
        matches!(
            self,
            Algorithm::Bubble
                | Algorithm::CocktailShaker
                | Algorithm::Insertion
                | Algorithm::Quick
                | Algorithm::Selection
        )
    }

    pub fn sort<T>(self, v: &mut [T]) -> Result<(), SortError>
    where
        T: Ord,
    {
        match self {
            Algorithm::Bubble => <stable::bubble::SortImpl as Sort>::sort(v),
            Algorithm::CocktailShaker => <stable::cocktail_shaker::SortImpl as Sort>::sort(v),
            Algorithm::Comb => <unstable::comb::SortImpl as Sort>::sort(v),
            Algorithm::Heap => <unstable::heapsort::SortImpl as Sort>::sort(v),
            Algorithm::Insertion => <stable::insertion::SortImpl as Sort>::sort(v),
            Algorithm::Introsort => <unstable::introsort::SortImpl as Sort>::sort(v),
            Algorithm::Library => <stable::library::SortImpl as Sort>::sort(v),
            Algorithm::Quick => <unstable::quicksort::SortImpl as Sort>::sort(v),
            Algorithm::Selection => <unstable::selection::SortImpl as Sort>::sort(v),
            Algorithm::Tim => <stable::timsort::SortImpl as Sort>::sort(v),
            Algorithm::Tournament => <stable::tournament::SortImpl as Sort>::sort(v),
        }
    }

    pub fn sort_by<T, F>(self, v: &mut [T], compare: F) -> Result<(), SortError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            Algorithm::Bubble => <stable::bubble::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::CocktailShaker => {
                <stable::cocktail_shaker::SortImpl as Sort>::sort_by(v, compare)
            }
            Algorithm::Comb => <unstable::comb::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::Heap => <unstable::heapsort::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::Insertion => <stable::insertion::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::Introsort => <unstable::introsort::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::Library => <stable::library::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::Quick => <unstable::quicksort::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::Selection => <unstable::selection::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::Tim => <stable::timsort::SortImpl as Sort>::sort_by(v, compare),
            Algorithm::Tournament => <stable::tournament::SortImpl as Sort>::sort_by(v, compare),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    pub name: String,
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort algorithm '{}'", self.name)
    }
}

impl Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts the short name as well as the full registry name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|algo| algo.name() == name || algo.registry_name() == name)
            .ok_or_else(|| ParseAlgorithmError {
                name: name.to_string(),
            })
    }
}

/// Sorts the first `n` elements of `v` with `algorithm`, leaving the rest untouched.
///
/// `n` comes from callers that track lengths as signed integers. A negative `n` or one that
/// exceeds `v.len()` is rejected before anything is touched.
pub fn sort_len<T>(algorithm: Algorithm, v: &mut [T], n: isize) -> Result<(), SortError>
where
    T: Ord,
{
    let invalid = SortError::InvalidArgument {
        len: n,
        capacity: v.len(),
    };
    let len = usize::try_from(n).map_err(|_| invalid.clone())?;
    if len > v.len() {
        return Err(invalid);
    }

    if len <= 1 {
        return Ok(());
    }

    algorithm.sort(&mut v[..len])
}
