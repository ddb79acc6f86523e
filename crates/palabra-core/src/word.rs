//! Target words and word validity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Number of letters in every target word and guess.
pub const WORD_LENGTH: usize = 5;

/// The word-of-the-day. At most one exists per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetWord {
  pub word_id: Uuid,
  pub word:    String,
  pub date:    NaiveDate,
}

/// A word (guess or target) is valid iff it has exactly [`WORD_LENGTH`]
/// characters. Counted in `char`s so `ñ` and accented vowels count as one.
///
/// Dictionary membership is deliberately not checked.
pub fn validate_word(word: &str) -> Result<()> {
  let len = word.chars().count();
  if len == WORD_LENGTH {
    Ok(())
  } else {
    Err(Error::InvalidGuessLength(len))
  }
}
