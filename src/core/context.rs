// trellis/src/core/context.rs

//! Per-invocation pipeline state, threaded through every hook as `&mut`.

use crate::core::outcome::{ErrorDetail, Outcome};
use crate::core::validation::ValidationErrors;

/// Everything one pipeline invocation accumulates: the outcome under
/// construction, the validation-error map the decision stage branches on,
/// and a free-form list of error records for hooks to fill.
///
/// A fresh context is built at the start of every `process` call and handed
/// to each hook by exclusive borrow, so hook code reads and writes it
/// without any locking. Domain state belongs on the model itself; only
/// pipeline-visible state lives here.
#[derive(Debug)]
pub struct ModelContext<P> {
  pub outcome: Outcome<P>,
  pub validation_errors: ValidationErrors,
  pub errors: Vec<ErrorDetail>,
}

// Manual Default: P carries no Default bound.
impl<P> Default for ModelContext<P> {
  fn default() -> Self {
    ModelContext {
      outcome: Outcome::default(),
      validation_errors: ValidationErrors::new(),
      errors: Vec::new(),
    }
  }
}

impl<P> ModelContext<P> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets both halves of the outcome at once.
  pub fn respond(&mut self, payload: P, status: crate::core::status::StatusCode) {
    self.outcome.payload = Some(payload);
    self.outcome.status = Some(status);
  }

  /// Appends a generic error record.
  pub fn push_error(&mut self, id: impl Into<String>, message: impl Into<String>) {
    self.errors.push(ErrorDetail::new(id, message));
  }
}
