//! Error type for `palabra-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown letter score code: {0:?}")]
  UnknownScoreCode(char),

  /// Attempted to append to a session that was not found.
  #[error("session not found: {0}")]
  SessionNotFound(uuid::Uuid),

  #[error("session {0} is already completed or at the attempt cap")]
  SessionClosed(uuid::Uuid),

  #[error("a target word is already assigned for {0}")]
  DateTaken(chrono::NaiveDate),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
