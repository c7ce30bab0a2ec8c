// trellis/src/core/status.rs

//! HTTP-style status codes attached to a model `Outcome`.

/// The status half of an `Outcome`. Maps 1:1 onto conventional HTTP status
/// semantics; the pipeline itself only ever assigns `InternalServerError`
/// (the default fill when no hook set a status), everything else is chosen
/// by model hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
  Ok,
  Created,
  Accepted,
  NoContent,
  BadRequest,
  Unauthorized,
  Forbidden,
  NotFound,
  Conflict,
  UnprocessableEntity,
  InternalServerError,
  NotImplemented,
  ServiceUnavailable,
}

impl StatusCode {
  pub fn as_u16(self) -> u16 {
    match self {
      StatusCode::Ok => 200,
      StatusCode::Created => 201,
      StatusCode::Accepted => 202,
      StatusCode::NoContent => 204,
      StatusCode::BadRequest => 400,
      StatusCode::Unauthorized => 401,
      StatusCode::Forbidden => 403,
      StatusCode::NotFound => 404,
      StatusCode::Conflict => 409,
      StatusCode::UnprocessableEntity => 422,
      StatusCode::InternalServerError => 500,
      StatusCode::NotImplemented => 501,
      StatusCode::ServiceUnavailable => 503,
    }
  }

  pub fn is_success(self) -> bool {
    (200..300).contains(&self.as_u16())
  }

  pub fn is_client_error(self) -> bool {
    (400..500).contains(&self.as_u16())
  }

  pub fn is_server_error(self) -> bool {
    self.as_u16() >= 500
  }
}

impl std::fmt::Display for StatusCode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_u16())
  }
}

impl serde::Serialize for StatusCode {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(self.as_u16())
  }
}
