// trellis/src/core/validation.rs

//! Validation state: the field→messages map that signals a validation
//! failure, and the external validation-state collaborator supplied by a
//! hosting framework's model binding.

use std::collections::HashMap;

use serde::Serialize;

/// Mapping from field name to a list of error messages. An empty map means
/// "no validation failure"; any entry routes the pipeline into the
/// validation-failure path before `execute` runs.
///
/// Field order and per-field message order carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors(HashMap<String, Vec<String>>);

impl ValidationErrors {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends one message to a field's list, creating the field entry if
  /// needed.
  pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.entry(field.into()).or_default().push(message.into());
  }

  /// Appends a batch of messages to a field's list.
  pub fn add_all<I, S>(&mut self, field: impl Into<String>, messages: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let list = self.0.entry(field.into()).or_default();
    list.extend(messages.into_iter().map(Into::into));
  }

  /// Merges another map into this one, field by field.
  pub fn merge(&mut self, other: ValidationErrors) {
    for (field, messages) in other.0 {
      self.0.entry(field).or_default().extend(messages);
    }
  }

  /// Copies every failing field from an external `ValidationState` into this
  /// map. No-op when the state reports valid. This is the default behavior
  /// of the `validate` hook when a state was supplied; overrides that still
  /// want it call this before adding their own checks.
  pub fn absorb(&mut self, state: &ValidationState) {
    if state.is_valid() {
      return;
    }
    for (field, messages) in state.field_errors() {
      self.add_all(field, messages.iter().cloned());
    }
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
  }
}

/// External validation outcome handed in by the hosting framework, e.g. the
/// result of binding-constraint checks run before the model ever sees the
/// request. Supplying one to `process_with_state` activates the default
/// `validate` behavior.
#[derive(Debug, Clone, Default)]
pub struct ValidationState(HashMap<String, Vec<String>>);

impl ValidationState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records a binding error against a field.
  pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.entry(field.into()).or_default().push(message.into());
  }

  /// True when no field carries an error message.
  pub fn is_valid(&self) -> bool {
    self.0.values().all(|messages| messages.is_empty())
  }

  /// Iterates the fields that actually failed (non-empty message lists).
  pub fn field_errors(&self) -> impl Iterator<Item = (&str, &[String])> {
    self
      .0
      .iter()
      .filter(|(_, messages)| !messages.is_empty())
      .map(|(k, v)| (k.as_str(), v.as_slice()))
  }
}
