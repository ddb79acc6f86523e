//! Error type and axum `IntoResponse` implementation.
//!
//! User-facing game failures never reach this type — the engine folds them
//! into reply text. What remains (missing word of the day, store failures)
//! is a server-side fault and maps to 500.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("game error: {0}")]
  Game(#[from] palabra_core::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    tracing::error!(error = %self, "webhook turn failed");
    (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
  }
}
