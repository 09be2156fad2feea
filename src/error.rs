//! The things that can go wrong outside of a plain lookup miss.

use std::io;

/// Errors produced by this crate. A key that isn't present is not an error;
/// lookups report that with `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An index handed to an [`ArrayList`](crate::ArrayList) operation was
    /// past the end of the list.
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A line of a grouping input file wasn't a `hometown<TAB>fullname`
    /// record. Lines are counted from 1.
    #[error("invalid data file -- incomplete record on line {line}")]
    MalformedRecord { line: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
