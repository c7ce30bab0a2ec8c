// trellis/src/model/execution.rs

//! The pipeline runner: the fixed stage machine every model invocation goes
//! through. Stage errors are captured (never `?`-propagated past the
//! failure-handling stages), so the status default-fill and the finalize
//! hook run exactly once on every path.

use std::time::Instant;

use tracing::{event, instrument, span, Level};

use crate::core::context::ModelContext;
use crate::core::outcome::Outcome;
use crate::core::status::StatusCode;
use crate::core::validation::{ValidationErrors, ValidationState};
use crate::error::{TrellisError, TrellisResult};
use crate::model::hooks::Model;

/// Executes map → validate → decision → execute → failure handling →
/// finalize against a fresh context and returns the accumulated outcome.
///
/// All errors from the map/validate/execute stages are recovered into the
/// outcome via the failure hooks. The `Err` arm is reserved for errors the
/// pipeline deliberately does not recover: a failing
/// `on_validation_failure`/`on_error` hook, or a failing `on_finalize`.
/// Either way the finalize hook has already run by the time `Err` is
/// returned.
#[instrument(
    name = "Model::process",
    skip_all,
    fields(
        model_type = %std::any::type_name::<M>(),
        has_validation_state = state.is_some(),
    ),
    err(Display)
)]
pub(crate) async fn run<M: Model>(
  model: &mut M,
  request: &M::Request,
  state: Option<&ValidationState>,
) -> TrellisResult<Outcome<M::Payload>> {
  event!(Level::DEBUG, "Model invocation starting.");
  let started = Instant::now();
  let mut cx = ModelContext::<M::Payload>::new();

  let staged = stages(model, &mut cx, request, state).await;

  let mut error_occurred = false;
  let mut hook_fault: Option<TrellisError> = None;

  match staged {
    Ok(()) => {
      event!(Level::DEBUG, "Execute stage completed.");
    }
    Err(TrellisError::Validation(raised)) => {
      error_occurred = true;
      // Entries carried by an explicit Validation error (e.g. raised from
      // execute) join the context's map before the hook sees it.
      cx.validation_errors.merge(raised);
      event!(
        Level::INFO,
        failing_fields = cx.validation_errors.len(),
        "Routing to validation-failure hook."
      );
      if let Err(e) = model.on_validation_failure(&mut cx).await {
        event!(Level::ERROR, error = %e, "Validation-failure hook itself failed.");
        hook_fault = Some(e);
      }
    }
    Err(fault) => {
      error_occurred = true;
      event!(Level::ERROR, error = %fault, "Routing to error hook.");
      if let Err(e) = model.on_error(&mut cx, &fault).await {
        event!(Level::ERROR, error = %e, "Error hook itself failed.");
        hook_fault = Some(e);
      }
    }
  }

  // A status should be set by this point; assume internal error otherwise.
  if cx.outcome.status.is_none() {
    cx.outcome.status = Some(StatusCode::InternalServerError);
  }

  let elapsed = started.elapsed();
  event!(
    Level::TRACE,
    error_occurred,
    elapsed_ms = elapsed.as_millis() as u64,
    "Running finalize hook."
  );
  let finalize_result = model.on_finalize(&mut cx, error_occurred, elapsed).await;

  // A failure-hook error wins over a finalize error; both leave only after
  // finalization has run.
  if let Some(fault) = hook_fault {
    return Err(fault);
  }
  finalize_result?;

  event!(Level::DEBUG, status = ?cx.outcome.status, error_occurred, "Model invocation finished.");
  Ok(cx.outcome)
}

/// The recoverable stages. Returning `Err(Validation)` routes to the
/// validation-failure hook, any other `Err` to the error hook.
async fn stages<M: Model>(
  model: &mut M,
  cx: &mut ModelContext<M::Payload>,
  request: &M::Request,
  state: Option<&ValidationState>,
) -> TrellisResult<()> {
  {
    // Mapping is synchronous; the span guard drops before any await.
    let stage_span = span!(Level::DEBUG, "map_request");
    let _guard = stage_span.enter();
    model.map_request(request)?;
  }

  model.validate(cx, state).await?;

  if !cx.validation_errors.is_empty() {
    // The context already holds the entries; the marker carries none.
    return Err(TrellisError::Validation(ValidationErrors::new()));
  }

  model.execute(cx).await
}
