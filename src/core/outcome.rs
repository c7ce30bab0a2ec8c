// trellis/src/core/outcome.rs

//! The uniform result container returned by every model invocation.

use serde::Serialize;

use crate::core::status::StatusCode;

/// Outcome of a full model invocation: an opaque payload plus a status.
///
/// Both halves start out unset. `execute` (or a failure hook) fills them in;
/// the pipeline guarantees that `status` is `Some` by the time the outcome
/// reaches the caller, defaulting to `InternalServerError` when no hook set
/// one. The payload stays `None` unless a hook supplied it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<P> {
  pub payload: Option<P>,
  pub status: Option<StatusCode>,
}

// Manual Default so P needs no Default bound.
impl<P> Default for Outcome<P> {
  fn default() -> Self {
    Outcome {
      payload: None,
      status: None,
    }
  }
}

impl<P> Outcome<P> {
  /// True when the status is set and in the 2xx class.
  pub fn is_success(&self) -> bool {
    self.status.map_or(false, StatusCode::is_success)
  }
}

/// A generic error record: an identifier plus a human-readable message.
/// Models accumulate these on the context and typically embed them in
/// failure payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
  pub id: String,
  pub message: String,
}

impl ErrorDetail {
  pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
    ErrorDetail {
      id: id.into(),
      message: message.into(),
    }
  }
}
