//! Boundary errors (configuration and session handling).
//!
//! The arithmetic core itself never fails; these only come from parsing
//! requests and driving sessions.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::domain::MAX_CEILING;
use crate::protocol::ErrorOut;

#[derive(Debug, Error)]
pub enum QuizError {
  /// Mode string outside the closed set.
  #[error("unknown quiz mode: {0}")]
  InvalidMode(String),

  #[error("terms must be 2 or 3, got {0}")]
  InvalidTerms(u8),

  #[error("max must be between 1 and {}, got {}", MAX_CEILING, .0)]
  InvalidMax(i64),

  #[error("unknown preset: {0}")]
  UnknownPreset(String),

  #[error("unknown session: {0}")]
  UnknownSession(String),

  /// An answer was submitted while no question was pending.
  #[error("session {0} has no question awaiting an answer")]
  NoActiveQuestion(String),

  #[error("session {0} is already finished")]
  SessionFinished(String),
}

impl QuizError {
  pub fn status(&self) -> StatusCode {
    match self {
      QuizError::InvalidMode(_)
      | QuizError::InvalidTerms(_)
      | QuizError::InvalidMax(_)
      | QuizError::UnknownPreset(_) => StatusCode::BAD_REQUEST,
      QuizError::UnknownSession(_) => StatusCode::NOT_FOUND,
      QuizError::NoActiveQuestion(_) | QuizError::SessionFinished(_) => StatusCode::CONFLICT,
    }
  }
}

impl IntoResponse for QuizError {
  fn into_response(self) -> Response {
    (self.status(), Json(ErrorOut { error: self.to_string() })).into_response()
  }
}
