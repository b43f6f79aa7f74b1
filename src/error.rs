//! Errors returned by `CircularStore`.

use thiserror::Error;

/// Error value indicating that there is nothing to read.
///
/// Returned by `read`, `pop_back`, `peek_front` and `peek_back` of an empty
/// `CircularStore`.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
#[error("circular store is empty")]
pub struct EmptyError;
