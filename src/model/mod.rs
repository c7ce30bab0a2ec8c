// trellis/src/model/mod.rs

//! The `Model` trait (the extension surface) and the pipeline runner that
//! drives it.

pub mod execution;
pub mod hooks;

pub use hooks::Model;
