pub mod bubble;
pub mod cocktail_shaker;
pub mod insertion;

// Sorts that need scratch memory, their `sort` returns a `Result`.
pub mod library;
pub mod timsort;
pub mod tournament;
