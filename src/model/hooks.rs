// trellis/src/model/hooks.rs

//! The `Model` trait: one request-processing unit, expressed as a fixed
//! pipeline with overridable extension points.
//!
//! The control flow itself lives in `model::execution`; this trait only
//! declares the seams. Two methods are required (`map_request`, `execute`),
//! the rest default to the base behavior and can be overridden per model.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::context::ModelContext;
use crate::core::outcome::Outcome;
use crate::core::validation::ValidationState;
use crate::error::{TrellisError, TrellisResult};
use crate::model::execution;

/// A request-processing model. One instance handles one invocation; domain
/// state (mapped fields, injected services, intermediate results) lives on
/// `self`, while pipeline state (outcome, validation errors) arrives in the
/// `ModelContext`.
///
/// Call `process` or `process_with_state` to run the pipeline:
/// map → validate → decision → execute → failure handling → finalize.
#[async_trait]
pub trait Model: Send {
  /// The request value this model accepts. Read-only to the pipeline.
  type Request: Send + Sync;

  /// The outcome payload this model produces.
  type Payload: Send;

  /// Projects the request onto the model's fields. Runs first, before any
  /// validation.
  ///
  /// Serde-representable models delegate to the generic by-name copier:
  ///
  /// ```ignore
  /// fn map_request(&mut self, request: &Self::Request) -> TrellisResult<()> {
  ///   trellis::mapping::assign_named_fields(self, request)
  /// }
  /// ```
  ///
  /// Models holding non-serializable collaborators write the projection by
  /// hand instead. Errors returned here are routed to `on_error` like any
  /// other fault.
  fn map_request(&mut self, request: &Self::Request) -> TrellisResult<()>;

  /// Validation stage. The default absorbs a supplied external
  /// `ValidationState` (each failing field's messages land in
  /// `cx.validation_errors`) and otherwise does nothing.
  ///
  /// Overrides may keep that behavior by calling
  /// `cx.validation_errors.absorb(state)` themselves and then add further
  /// checks. Any entry present after this stage routes the invocation into
  /// the validation-failure path and `execute` never runs.
  async fn validate(
    &mut self,
    cx: &mut ModelContext<Self::Payload>,
    state: Option<&ValidationState>,
  ) -> TrellisResult<()> {
    if let Some(state) = state {
      cx.validation_errors.absorb(state);
    }
    Ok(())
  }

  /// The core processing step. Must set `cx.outcome` (payload and status)
  /// before returning `Ok`.
  ///
  /// Returning `TrellisError::Validation` short-circuits into the
  /// validation-failure path (its entries are merged into
  /// `cx.validation_errors` first); any other error routes to `on_error`.
  async fn execute(&mut self, cx: &mut ModelContext<Self::Payload>) -> TrellisResult<()>;

  /// Runs when validation failed, either via a non-empty
  /// `cx.validation_errors` after `validate` or via an explicit
  /// `Validation` error from `execute`. Responsible for shaping the failure
  /// outcome; the default leaves it untouched (status then resolves to
  /// `InternalServerError`).
  ///
  /// An error returned from this hook is not recovered: finalization still
  /// runs, then the error propagates out of `process`.
  async fn on_validation_failure(&mut self, cx: &mut ModelContext<Self::Payload>) -> TrellisResult<()> {
    let _ = cx;
    Ok(())
  }

  /// Runs when mapping, validation, or execution failed with anything other
  /// than a `Validation` error. Same outcome and propagation rules as
  /// `on_validation_failure`.
  async fn on_error(
    &mut self,
    cx: &mut ModelContext<Self::Payload>,
    fault: &TrellisError,
  ) -> TrellisResult<()> {
    let _ = (cx, fault);
    Ok(())
  }

  /// Runs exactly once at the end of every invocation, after the outcome's
  /// status has been filled in. `error_occurred` is true iff a failure path
  /// was taken; `elapsed` measures the whole invocation. Intended for side
  /// effects (audit logging, persistence of timings); it is not required to
  /// touch the outcome.
  async fn on_finalize(
    &mut self,
    cx: &mut ModelContext<Self::Payload>,
    error_occurred: bool,
    elapsed: Duration,
  ) -> TrellisResult<()> {
    let _ = (cx, error_occurred, elapsed);
    Ok(())
  }

  /// Runs the full pipeline against `request`, without an external
  /// validation state.
  ///
  /// `Ok` always carries an outcome with a set status. `Err` is only
  /// produced when a failure hook or `on_finalize` itself failed.
  async fn process(&mut self, request: &Self::Request) -> TrellisResult<Outcome<Self::Payload>>
  where
    Self: Sized,
  {
    execution::run(self, request, None).await
  }

  /// Runs the full pipeline with an external validation state, activating
  /// the default `validate` behavior.
  async fn process_with_state(
    &mut self,
    request: &Self::Request,
    state: &ValidationState,
  ) -> TrellisResult<Outcome<Self::Payload>>
  where
    Self: Sized,
  {
    execution::run(self, request, Some(state)).await
  }
}
