pub mod comb;
pub mod heapsort;
pub mod introsort;
pub mod quicksort;
pub mod selection;
