// tests/common/mod.rs
#![allow(dead_code)] // Allow unused fixtures in this common test module

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::Level;
use trellis::{
  assign_named_fields, Model, ModelContext, StatusCode, TrellisError, TrellisResult, ValidationState,
};

// --- Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Requests ---

#[derive(Debug, Clone, Serialize)]
pub struct MappingRequest {
  pub random_property: String,
}

impl Default for MappingRequest {
  fn default() -> Self {
    MappingRequest {
      random_property: "TestValue".to_string(),
    }
  }
}

/// A request carrying fields the models do not declare.
#[derive(Debug, Clone, Serialize)]
pub struct WideRequest {
  pub random_property: String,
  pub unrelated_number: u64,
  pub unrelated_flag: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyRequest {}

// --- Mapping Models ---

/// A serde-visible field with the same name as the request's.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ValidMappingModel {
  pub random_property: String,
}

#[async_trait]
impl Model for ValidMappingModel {
  type Request = MappingRequest;
  type Payload = bool;

  fn map_request(&mut self, request: &Self::Request) -> TrellisResult<()> {
    assign_named_fields(self, request)
  }

  async fn execute(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    if self.random_property == "TestValue" {
      cx.respond(true, StatusCode::Ok);
    } else {
      cx.respond(false, StatusCode::BadRequest);
    }
    Ok(())
  }
}

/// The field is invisible to the copier, so it keeps its default
/// and execute falls into the else branch.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SkippedFieldModel {
  #[serde(skip)]
  pub random_property: String,
}

#[async_trait]
impl Model for SkippedFieldModel {
  type Request = MappingRequest;
  type Payload = bool;

  fn map_request(&mut self, request: &Self::Request) -> TrellisResult<()> {
    assign_named_fields(self, request)
  }

  async fn execute(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    if self.random_property == "TestValue" {
      cx.respond(true, StatusCode::Ok);
    } else {
      cx.respond(false, StatusCode::BadRequest);
    }
    Ok(())
  }
}

// --- Recording Model (stage/hook accounting) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutePlan {
  #[default]
  Succeed,
  Fault,
  RaiseValidation,
  SetPayloadThenFault,
  LeaveOutcomeUnset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookPlan {
  #[default]
  Noop,
  Respond,
  Fail,
}

/// Counts every stage and hook invocation and can be steered into each
/// failure path. The model is exclusively owned, so counts are plain fields
/// inspected after `process` returns.
#[derive(Debug, Default)]
pub struct RecordingModel {
  // Steering
  pub validate_adds: Vec<(String, String)>,
  pub execute_plan: ExecutePlan,
  pub validation_hook: HookPlan,
  pub error_hook: HookPlan,
  pub finalize_fails: bool,
  // Accounting
  pub map_calls: usize,
  pub validate_calls: usize,
  pub execute_calls: usize,
  pub validation_failure_calls: usize,
  pub error_calls: usize,
  pub finalize_calls: usize,
  pub validation_errors_seen: Option<usize>,
  pub finalize_error_flag: Option<bool>,
  pub finalize_elapsed: Option<Duration>,
}

#[async_trait]
impl Model for RecordingModel {
  type Request = ();
  type Payload = bool;

  fn map_request(&mut self, _request: &()) -> TrellisResult<()> {
    self.map_calls += 1;
    Ok(())
  }

  async fn validate(
    &mut self,
    cx: &mut ModelContext<bool>,
    state: Option<&ValidationState>,
  ) -> TrellisResult<()> {
    self.validate_calls += 1;
    // Keep the base behavior, then add the configured entries.
    if let Some(state) = state {
      cx.validation_errors.absorb(state);
    }
    for (field, message) in &self.validate_adds {
      cx.validation_errors.add(field.clone(), message.clone());
    }
    Ok(())
  }

  async fn execute(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    self.execute_calls += 1;
    match self.execute_plan {
      ExecutePlan::Succeed => {
        cx.respond(true, StatusCode::Ok);
        Ok(())
      }
      ExecutePlan::Fault => Err(TrellisError::fault("execute blew up")),
      ExecutePlan::RaiseValidation => Err(TrellisError::validation(
        "downstream",
        "rejected during execution",
      )),
      ExecutePlan::SetPayloadThenFault => {
        cx.outcome.payload = Some(true);
        Err(TrellisError::fault("fault after partial write"))
      }
      ExecutePlan::LeaveOutcomeUnset => Ok(()),
    }
  }

  async fn on_validation_failure(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    self.validation_failure_calls += 1;
    self.validation_errors_seen = Some(cx.validation_errors.len());
    match self.validation_hook {
      HookPlan::Noop => Ok(()),
      HookPlan::Respond => {
        cx.respond(false, StatusCode::BadRequest);
        Ok(())
      }
      HookPlan::Fail => Err(TrellisError::fault("validation hook failed")),
    }
  }

  async fn on_error(
    &mut self,
    cx: &mut ModelContext<bool>,
    _fault: &TrellisError,
  ) -> TrellisResult<()> {
    self.error_calls += 1;
    match self.error_hook {
      HookPlan::Noop => Ok(()),
      HookPlan::Respond => {
        cx.respond(false, StatusCode::InternalServerError);
        Ok(())
      }
      HookPlan::Fail => Err(TrellisError::fault("error hook failed")),
    }
  }

  async fn on_finalize(
    &mut self,
    _cx: &mut ModelContext<bool>,
    error_occurred: bool,
    elapsed: Duration,
  ) -> TrellisResult<()> {
    self.finalize_calls += 1;
    self.finalize_error_flag = Some(error_occurred);
    self.finalize_elapsed = Some(elapsed);
    if self.finalize_fails {
      Err(TrellisError::fault("finalize failed"))
    } else {
      Ok(())
    }
  }
}

// --- Minimal hook-focused models (ports of the original unit fixtures) ---

#[derive(Debug, Default)]
pub struct SuccessfulModel {}

#[async_trait]
impl Model for SuccessfulModel {
  type Request = EmptyRequest;
  type Payload = bool;

  fn map_request(&mut self, _request: &EmptyRequest) -> TrellisResult<()> {
    Ok(())
  }

  async fn execute(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    cx.respond(true, StatusCode::Ok);
    Ok(())
  }
}

/// Always fails its own validation; execute should never run.
#[derive(Debug, Default)]
pub struct ValidationFailureModel {}

#[async_trait]
impl Model for ValidationFailureModel {
  type Request = EmptyRequest;
  type Payload = bool;

  fn map_request(&mut self, _request: &EmptyRequest) -> TrellisResult<()> {
    Ok(())
  }

  async fn validate(
    &mut self,
    cx: &mut ModelContext<bool>,
    _state: Option<&ValidationState>,
  ) -> TrellisResult<()> {
    cx.validation_errors
      .add_all("Testing", ["cause", "Validation", "Failure"]);
    Ok(())
  }

  async fn execute(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    cx.respond(true, StatusCode::Ok);
    Ok(())
  }

  async fn on_validation_failure(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    cx.respond(false, StatusCode::BadRequest);
    Ok(())
  }
}

/// Keeps the default validate (absorbing external state) and only shapes the
/// failure outcome.
#[derive(Debug, Default)]
pub struct BindingFailureModel {}

#[async_trait]
impl Model for BindingFailureModel {
  type Request = EmptyRequest;
  type Payload = bool;

  fn map_request(&mut self, _request: &EmptyRequest) -> TrellisResult<()> {
    Ok(())
  }

  async fn execute(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    cx.respond(true, StatusCode::Ok);
    Ok(())
  }

  async fn on_validation_failure(&mut self, cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    cx.respond(false, StatusCode::BadRequest);
    Ok(())
  }
}

#[derive(Debug, Default)]
pub struct ErrorFailureModel {}

#[async_trait]
impl Model for ErrorFailureModel {
  type Request = EmptyRequest;
  type Payload = bool;

  fn map_request(&mut self, _request: &EmptyRequest) -> TrellisResult<()> {
    Ok(())
  }

  async fn execute(&mut self, _cx: &mut ModelContext<bool>) -> TrellisResult<()> {
    Err(TrellisError::fault("fire an error"))
  }

  async fn on_error(
    &mut self,
    cx: &mut ModelContext<bool>,
    _fault: &TrellisError,
  ) -> TrellisResult<()> {
    cx.respond(false, StatusCode::InternalServerError);
    Ok(())
  }
}
