// trellis/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::core::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum TrellisError {
  /// The tagged validation short-circuit. Raised by the pipeline's decision
  /// stage when `ValidationErrors` is non-empty, or returned explicitly from
  /// `validate`/`execute` to route into validation-failure handling.
  ///
  /// The carried map holds the entries raised *with* the error itself; the
  /// pipeline merges them into the context's `ValidationErrors` before the
  /// validation-failure hook runs. The decision stage raises this with an
  /// empty map since the context already holds the entries.
  #[error("validation failed for {} field(s)", .0.len())]
  Validation(ValidationErrors),

  /// A request field could not be coerced onto its model counterpart.
  /// Routed to the error hook like any other fault.
  #[error("could not map request field '{field}': {message}")]
  Mapping { field: String, message: String },

  /// Error in a user-provided hook or external operation.
  #[error("model processing failed: {source}")]
  Fault {
    #[source]
    source: AnyhowError,
  },

  #[error("no model registered for request type {type_name}")]
  NotRegistered { type_name: String },

  #[error("request type mismatch during dispatch (expected {expected_type})")]
  TypeMismatch { expected_type: String },
}

impl TrellisError {
  /// Wraps an arbitrary displayable value as an opaque fault.
  pub fn fault(message: impl std::fmt::Display) -> Self {
    TrellisError::Fault {
      source: anyhow::anyhow!("{message}"),
    }
  }

  /// A single-entry validation failure, convenient for one-off checks
  /// inside `validate` or `execute`.
  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
    let mut errors = ValidationErrors::new();
    errors.add(field, message);
    TrellisError::Validation(errors)
  }

  pub fn is_validation(&self) -> bool {
    matches!(self, TrellisError::Validation(_))
  }
}

// This is the key conversion trellis provides for external errors: hooks can
// use `?` on anything that converts into anyhow::Error and have it land in
// the Fault arm.
impl From<AnyhowError> for TrellisError {
  fn from(err: AnyhowError) -> Self {
    TrellisError::Fault { source: err }
  }
}

pub type TrellisResult<T, E = TrellisError> = std::result::Result<T, E>;
