//! Error types for `palabra-core`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("guess has {0} characters; a guess must have exactly 5")]
  InvalidGuessLength(usize),

  #[error("maximum attempts reached for today's word")]
  MaxAttemptsReached,

  #[error("no target word assigned for {0}")]
  NoTargetWord(NaiveDate),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
