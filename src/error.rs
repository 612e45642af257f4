//! Common error types used throughout the crate.

use std::fmt;

/// Result type used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type covering failures across the integer utilities.
///
/// Values are carried as [`i128`] so that every supported element type,
/// signed or unsigned, is reported in its native interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A valid index was negative or not below the upper limit.
    IndexOutOfBounds {
        /// Position of the offending element in the index array.
        position: usize,
        /// The offending index value.
        index: i128,
        /// Exclusive upper limit the index was checked against.
        upper_limit: u64,
    },
    /// A valid value fell outside an inclusive range.
    IntegerOutOfRange {
        /// Position of the offending element.
        position: usize,
        /// The offending value.
        value: i128,
        /// Inclusive lower bound.
        lower: i128,
        /// Inclusive upper bound.
        upper: i128,
    },
    /// An argument violated preconditions.
    InvalidArgument(String),
}

impl Error {
    /// Creates an [`Error::InvalidArgument`] with the provided message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns the position of the offending element, if any.
    pub const fn position(&self) -> Option<usize> {
        match self {
            Error::IndexOutOfBounds { position, .. }
            | Error::IntegerOutOfRange { position, .. } => Some(*position),
            Error::InvalidArgument(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfBounds {
                position,
                index,
                upper_limit,
            } => write!(
                f,
                "index {index} out of bounds at position {position}, upper limit is {upper_limit}."
            ),
            Error::IntegerOutOfRange {
                position,
                value,
                lower,
                upper,
            } => write!(
                f,
                "integer value {value} at position {position} not in range: {lower} to {upper}."
            ),
            Error::InvalidArgument(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_index_out_of_bounds() {
        let e = Error::IndexOutOfBounds {
            position: 3,
            index: -1,
            upper_limit: 10,
        };
        assert_eq!(
            e.to_string(),
            "index -1 out of bounds at position 3, upper limit is 10."
        );
        assert_eq!(e.position(), Some(3));
    }

    #[test]
    fn test_display_integer_out_of_range() {
        let e = Error::IntegerOutOfRange {
            position: 0,
            value: 300,
            lower: -128,
            upper: 127,
        };
        assert_eq!(
            e.to_string(),
            "integer value 300 at position 0 not in range: -128 to 127."
        );
    }

    #[test]
    fn test_invalid_argument() {
        let e = Error::invalid_argument("bad");
        assert_eq!(e.to_string(), "bad");
        assert_eq!(e.position(), None);
    }
}
