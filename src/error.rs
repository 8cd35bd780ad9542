//! Error types shared by the stream encodings.
//!
//! Every failure the crate reports is a plain value: stepping past the end
//! of a pull stream, or settling a promise that already has an outcome.
//! [`StreamError`] unifies them so callers can use `?` across encodings.

use std::fmt;

use thiserror::Error;

/// Returned when the tail of an empty pull stream is requested.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::error::EmptyStreamError;
///
/// assert_eq!(EmptyStreamError.to_string(), "cannot take the tail of an empty stream");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("cannot take the tail of an empty stream")]
pub struct EmptyStreamError;

/// The terminal outcome of a promise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settlement {
    /// The promise holds a value.
    Resolved,
    /// The promise holds an error.
    Rejected,
}

impl fmt::Display for Settlement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved => formatter.write_str("resolved"),
            Self::Rejected => formatter.write_str("rejected"),
        }
    }
}

/// Returned when a promise that already left the pending state is settled again.
///
/// The promise keeps its first outcome; the second value is discarded.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::error::{AlreadySettledError, Settlement};
///
/// let error = AlreadySettledError {
///     attempted: Settlement::Rejected,
///     current: Settlement::Resolved,
/// };
/// assert_eq!(
///     error.to_string(),
///     "promise is already resolved and cannot be rejected"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("promise is already {current} and cannot be {attempted}")]
pub struct AlreadySettledError {
    /// The outcome the caller tried to record.
    pub attempted: Settlement,
    /// The outcome the promise already holds.
    pub current: Settlement,
}

/// Unified error type for all stream encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StreamError {
    /// See [`EmptyStreamError`].
    #[error(transparent)]
    EmptyStream(#[from] EmptyStreamError),
    /// See [`AlreadySettledError`].
    #[error(transparent)]
    AlreadySettled(#[from] AlreadySettledError),
}
