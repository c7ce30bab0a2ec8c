// trellis/src/mapping.rs

//! The generic field mapper: copies same-named fields from a request value
//! onto a model value, coercing scalar kinds where they differ.
//!
//! Matching works over the serialized (JSON) view of both values, so "field"
//! here means "serde field": renames apply, and a `#[serde(skip)]` field is
//! invisible to the copier and keeps its constructor value. Models that
//! cannot take `Serialize + DeserializeOwned` (e.g. ones holding injected
//! service handles) implement `Model::map_request` with an explicit
//! projection instead of calling into this module.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{event, Level};

use crate::error::{TrellisError, TrellisResult};

/// Copies every request field whose name exactly matches a model field
/// (case-sensitive) onto the model, in place.
///
/// - A request serializing to `null` maps nothing (absent request).
/// - A request or model with no named fields (non-object) maps nothing.
/// - Model fields without a request counterpart keep their current values.
/// - Scalar kinds are coerced (see `coerce`); an inconvertible value yields
///   `TrellisError::Mapping`, which the pipeline treats as an ordinary
///   fault.
pub fn assign_named_fields<M, R>(model: &mut M, request: &R) -> TrellisResult<()>
where
  M: Serialize + DeserializeOwned,
  R: Serialize + ?Sized,
{
  let request_value = serde_json::to_value(request).map_err(|e| TrellisError::Mapping {
    field: "<request>".to_string(),
    message: e.to_string(),
  })?;
  let Value::Object(request_fields) = request_value else {
    // Null or scalar request: nothing named to copy.
    return Ok(());
  };
  if request_fields.is_empty() {
    return Ok(());
  }

  let model_value = serde_json::to_value(&*model).map_err(|e| TrellisError::Mapping {
    field: "<model>".to_string(),
    message: e.to_string(),
  })?;
  let Value::Object(mut model_fields) = model_value else {
    return Ok(());
  };

  let mut assigned = 0usize;
  for (name, incoming) in request_fields {
    let Some(slot) = model_fields.get_mut(&name) else {
      continue;
    };
    let coerced = coerce(&name, incoming, slot)?;
    *slot = coerced;
    assigned += 1;
  }
  if assigned == 0 {
    return Ok(());
  }
  event!(Level::TRACE, assigned, "Mapped request fields onto model.");

  // Residual mismatches (e.g. integer overflow for the field's Rust type)
  // surface here as a Mapping fault.
  *model = serde_json::from_value(Value::Object(model_fields)).map_err(|e| TrellisError::Mapping {
    field: "<model>".to_string(),
    message: e.to_string(),
  })?;
  Ok(())
}

/// Converts `incoming` to the kind of the model field's current value.
///
/// Scalars convert between string, number, and boolean representations;
/// null passes through untouched (optional fields); arrays and objects only
/// pass kind-for-kind. A null target (e.g. an `Option` field currently
/// `None`) accepts the incoming value as-is and leaves the final
/// deserialization to arbitrate.
fn coerce(field: &str, incoming: Value, target: &Value) -> TrellisResult<Value> {
  match target {
    Value::Null => Ok(incoming),
    Value::String(_) => match incoming {
      Value::String(_) | Value::Null => Ok(incoming),
      Value::Number(n) => Ok(Value::String(n.to_string())),
      Value::Bool(b) => Ok(Value::String(b.to_string())),
      other => Err(mismatch(field, "string", &other)),
    },
    Value::Number(target_number) => match incoming {
      Value::Number(_) | Value::Null => Ok(incoming),
      Value::String(s) => parse_number(field, &s, target_number),
      Value::Bool(b) => Ok(Value::Number(u64::from(b).into())),
      other => Err(mismatch(field, "number", &other)),
    },
    Value::Bool(_) => match incoming {
      Value::Bool(_) | Value::Null => Ok(incoming),
      Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(TrellisError::Mapping {
          field: field.to_string(),
          message: format!("cannot parse '{s}' as a boolean"),
        }),
      },
      Value::Number(n) => Ok(Value::Bool(n.as_f64().map_or(false, |v| v != 0.0))),
      other => Err(mismatch(field, "boolean", &other)),
    },
    Value::Array(_) => match incoming {
      Value::Array(_) | Value::Null => Ok(incoming),
      other => Err(mismatch(field, "array", &other)),
    },
    Value::Object(_) => match incoming {
      Value::Object(_) | Value::Null => Ok(incoming),
      other => Err(mismatch(field, "object", &other)),
    },
  }
}

fn parse_number(field: &str, raw: &str, target: &serde_json::Number) -> TrellisResult<Value> {
  let trimmed = raw.trim();
  if let Ok(v) = trimmed.parse::<i64>() {
    return Ok(Value::Number(v.into()));
  }
  if let Ok(v) = trimmed.parse::<u64>() {
    return Ok(Value::Number(v.into()));
  }
  // Fractional strings only convert when the field itself is fractional.
  if target.is_f64() {
    if let Some(n) = trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
      return Ok(Value::Number(n));
    }
  }
  Err(TrellisError::Mapping {
    field: field.to_string(),
    message: format!("cannot parse '{raw}' as a number"),
  })
}

fn mismatch(field: &str, expected: &'static str, found: &Value) -> TrellisError {
  TrellisError::Mapping {
    field: field.to_string(),
    message: format!("cannot convert {} into {expected}", kind(found)),
  }
}

fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
