//! Error types for `hrms-core`.

use thiserror::Error;

/// Record-level validation failures raised by the directory types.
#[derive(Debug, Error)]
pub enum Error {
  #[error("salary band is inverted: minimum {min} exceeds maximum {max}")]
  InvertedSalaryBand { min: f64, max: f64 },

  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("End_Date must be after Start_Date")]
  EndNotAfterStart,

  #[error("Overall_Score must be between 0 and 5, got {0}")]
  ScoreOutOfRange(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The outcome taxonomy of [`crate::guard::AssignmentGuard`] operations.
///
/// All four kinds are returned to the immediate caller; none are retried.
#[derive(Debug, Error)]
pub enum GuardError<E> {
  /// Malformed or out-of-policy input.
  #[error("{0}")]
  Validation(String),

  /// The active-tenure invariant (or a terminated assignment's immutability)
  /// would be violated.
  #[error("{0}")]
  Conflict(String),

  /// A referenced job or assignment does not exist.
  #[error("{0}")]
  NotFound(String),

  /// Opaque failure from the record store.
  #[error("store error: {0}")]
  Store(#[source] E),
}

impl<E> GuardError<E> {
  pub(crate) fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }

  pub(crate) fn conflict(msg: impl Into<String>) -> Self {
    Self::Conflict(msg.into())
  }

  pub(crate) fn not_found(msg: impl Into<String>) -> Self {
    Self::NotFound(msg.into())
  }
}
