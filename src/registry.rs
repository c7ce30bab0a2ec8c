// trellis/src/registry.rs

//! A type-keyed registry for dispatching request values to models.
//!
//! A web layer that routes many request types through one choke point
//! registers a factory per model; `process` looks the model up by the
//! request's type, builds a fresh instance (one instance per invocation),
//! runs the pipeline, and hands back an `Outcome` with the payload erased to
//! `serde_json::Value` so all outcomes share one shape.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tracing::{event, instrument, Level};

use crate::core::outcome::Outcome;
use crate::core::validation::ValidationState;
use crate::error::{TrellisError, TrellisResult};
use crate::model::Model;

/// Type-erased runner stored by the registry. `request` is expected to be a
/// `Box<dyn Any>` containing the model's `Request` type.
#[async_trait]
trait AnyModelRunner: Send + Sync {
  async fn process_erased(
    &self,
    request: Box<dyn Any + Send>,
    state: Option<&ValidationState>,
  ) -> TrellisResult<Outcome<Value>>;
}

/// Wraps a model factory so the registry can run it without knowing the
/// concrete model type.
struct ModelRunner<M> {
  factory: Box<dyn Fn() -> M + Send + Sync>,
}

#[async_trait]
impl<M> AnyModelRunner for ModelRunner<M>
where
  M: Model + 'static,
  M::Request: 'static,
  M::Payload: Serialize,
{
  #[instrument(
        name = "ModelRunner::process_erased",
        skip_all,
        fields(model_type = %std::any::type_name::<M>()),
        err(Display)
    )]
  async fn process_erased(
    &self,
    request: Box<dyn Any + Send>,
    state: Option<&ValidationState>,
  ) -> TrellisResult<Outcome<Value>> {
    let request = request.downcast::<M::Request>().map_err(|_| {
      let expected_type = std::any::type_name::<M::Request>().to_string();
      event!(Level::ERROR, %expected_type, "Request object type mismatch.");
      TrellisError::TypeMismatch { expected_type }
    })?;

    // Fresh instance per dispatch: a model must never be reused across
    // invocations.
    let mut model = (self.factory)();
    let outcome = match state {
      Some(state) => model.process_with_state(&request, state).await?,
      None => model.process(&request).await?,
    };

    let payload = outcome
      .payload
      .map(serde_json::to_value)
      .transpose()
      .map_err(|e| TrellisError::fault(format!("payload serialization failed: {e}")))?;
    Ok(Outcome {
      payload,
      status: outcome.status,
    })
  }
}

/// The trellis model registry, keyed by request type.
pub struct ModelRegistry {
  runners: Mutex<HashMap<TypeId, Arc<dyn AnyModelRunner>>>,
}

impl ModelRegistry {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self {
      runners: Mutex::new(HashMap::new()),
    }
  }

  /// Registers a model factory, keyed by `M::Request`. Registering a second
  /// model for the same request type replaces the first.
  ///
  /// `M::Payload` must serialize so dispatched outcomes can share the
  /// JSON-erased shape.
  pub fn register<M>(&self, factory: impl Fn() -> M + Send + Sync + 'static)
  where
    M: Model + 'static,
    M::Request: 'static,
    M::Payload: Serialize,
  {
    event!(
      Level::DEBUG,
      model_type = %std::any::type_name::<M>(),
      request_type = %std::any::type_name::<M::Request>(),
      "Registering model."
    );
    let runner = ModelRunner::<M> {
      factory: Box::new(factory),
    };
    self
      .runners
      .lock()
      .insert(TypeId::of::<M::Request>(), Arc::new(runner));
  }

  /// Dispatches `request` to the model registered for its type.
  pub async fn process<R>(&self, request: R) -> TrellisResult<Outcome<Value>>
  where
    R: Send + 'static,
  {
    self.dispatch(request, None).await
  }

  /// Dispatches with an external validation state.
  pub async fn process_with_state<R>(
    &self,
    request: R,
    state: &ValidationState,
  ) -> TrellisResult<Outcome<Value>>
  where
    R: Send + 'static,
  {
    self.dispatch(request, Some(state)).await
  }

  async fn dispatch<R>(
    &self,
    request: R,
    state: Option<&ValidationState>,
  ) -> TrellisResult<Outcome<Value>>
  where
    R: Send + 'static,
  {
    let runner = {
      let runners = self.runners.lock();
      runners.get(&TypeId::of::<R>()).cloned()
    }
    .ok_or_else(|| {
      let type_name = std::any::type_name::<R>();
      event!(Level::ERROR, "No model registered for request type {}.", type_name);
      TrellisError::NotRegistered {
        type_name: type_name.to_string(),
      }
    })?;

    runner.process_erased(Box::new(request), state).await
  }
}

impl Default for ModelRegistry {
  fn default() -> Self {
    Self::new()
  }
}
