use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Everything that can go wrong when sorting a valid slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortError {
    /// A scratch buffer of `requested` elements could not be allocated.
    OutOfMemory {
        requested: usize,
        source: TryReserveError,
    },
    /// A caller supplied length that is negative or exceeds the slice.
    InvalidArgument { len: isize, capacity: usize },
}

impl SortError {
    pub(crate) fn out_of_memory(requested: usize, source: TryReserveError) -> Self {
        Self::OutOfMemory { requested, source }
    }
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::OutOfMemory { requested, .. } => {
                write!(f, "failed to allocate scratch space for {requested} elements")
            }
            SortError::InvalidArgument { len, capacity } => {
                write!(f, "invalid length {len} for a slice of {capacity} elements")
            }
        }
    }
}

impl Error for SortError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SortError::OutOfMemory { source, .. } => Some(source),
            SortError::InvalidArgument { .. } => None,
        }
    }
}
