// trellis/src/lib.rs

//! Trellis: a hook-driven processing pipeline for web-request models.
//!
//! Trellis normalizes the lifecycle of one request-handling "model" into a
//! fixed sequence of stages with overridable extension points:
//!  - A request value is projected onto the model's fields by name.
//!  - Optional validation runs, absorbing any external validation state.
//!  - The core processing step executes.
//!  - Success and failure are normalized into a uniform `Outcome` carrying
//!    an HTTP-style status and an opaque payload.
//!  - A finalize hook runs exactly once on every path.
//!
//! Implement [`Model`] for each unit of work, override the hooks you need,
//! and call `process`/`process_with_state`. For dispatching many request
//! types through one entry point, register model factories with
//! [`ModelRegistry`].

pub mod core;
pub mod error;
pub mod mapping;
pub mod model;
pub mod registry;

// --- Re-exports for the Public API ---

// Core types model authors interact with in every hook.
pub use crate::core::context::ModelContext;
pub use crate::core::outcome::{ErrorDetail, Outcome};
pub use crate::core::status::StatusCode;
pub use crate::core::validation::{ValidationErrors, ValidationState};

// The extension surface and the generic field copier.
pub use crate::mapping::assign_named_fields;
pub use crate::model::Model;

pub use crate::error::{TrellisError, TrellisResult};

// The registry for dispatching request values to registered models.
pub use crate::registry::ModelRegistry;

/*
    Core workflow:
    1. Define a model struct holding the fields the request should fill,
       plus whatever services it needs.
    2. Implement `Model`: `map_request` (often one line delegating to
       `assign_named_fields`) and `execute`; override `validate`,
       `on_validation_failure`, `on_error`, or `on_finalize` as needed.
    3. Call `model.process(&request).await` (or `process_with_state` when
       the hosting framework supplies binding-validation results).
    4. Translate the returned `Outcome` (payload + status) into the host
       framework's response type.
*/
