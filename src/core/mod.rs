pub mod context;
pub mod outcome;
pub mod status;
pub mod validation;

// Re-export key types for easier access from other trellis modules (and lib.rs)
pub use context::ModelContext;
pub use outcome::{ErrorDetail, Outcome};
pub use status::StatusCode;
pub use validation::{ValidationErrors, ValidationState};
