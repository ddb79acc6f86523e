//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as `YYYY-MM-DD`, UUIDs as
//! hyphenated lowercase strings, and letter scores as one `W`/`P`/`C` code
//! character per letter.

use chrono::{DateTime, NaiveDate, Utc};
use palabra_core::{
  score::LetterScore,
  session::{Attempt, Player, Session},
  word::TargetWord,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── LetterScore ─────────────────────────────────────────────────────────────

pub fn encode_scores(scores: &[LetterScore]) -> String {
  scores
    .iter()
    .map(|s| match s {
      LetterScore::Wrong => 'W',
      LetterScore::Present => 'P',
      LetterScore::Correct => 'C',
    })
    .collect()
}

pub fn decode_scores(s: &str) -> Result<Vec<LetterScore>> {
  s.chars()
    .map(|c| match c {
      'W' => Ok(LetterScore::Wrong),
      'P' => Ok(LetterScore::Present),
      'C' => Ok(LetterScore::Correct),
      other => Err(Error::UnknownScoreCode(other)),
    })
    .collect()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `players` row.
pub struct RawPlayer {
  pub player_id:    String,
  pub phone:        String,
  pub signed_up_at: String,
  pub last_seen_at: String,
}

impl RawPlayer {
  pub fn into_player(self) -> Result<Player> {
    Ok(Player {
      player_id:    decode_uuid(&self.player_id)?,
      phone:        self.phone,
      signed_up_at: decode_dt(&self.signed_up_at)?,
      last_seen_at: decode_dt(&self.last_seen_at)?,
    })
  }
}

/// Raw strings read directly from a `words` row.
pub struct RawWord {
  pub word_id: String,
  pub word:    String,
  pub date:    String,
}

impl RawWord {
  pub fn into_word(self) -> Result<TargetWord> {
    Ok(TargetWord {
      word_id: decode_uuid(&self.word_id)?,
      word:    self.word,
      date:    decode_date(&self.date)?,
    })
  }
}

/// Raw strings read directly from a `sessions` row.
pub struct RawSession {
  pub session_id: String,
  pub player_id:  String,
  pub date:       String,
  pub completed:  bool,
}

impl RawSession {
  pub fn into_session(self, attempts: Vec<RawAttempt>) -> Result<Session> {
    Ok(Session {
      session_id: decode_uuid(&self.session_id)?,
      player_id:  decode_uuid(&self.player_id)?,
      date:       decode_date(&self.date)?,
      completed:  self.completed,
      attempts:   attempts
        .into_iter()
        .map(RawAttempt::into_attempt)
        .collect::<Result<_>>()?,
    })
  }
}

/// Raw strings read directly from an `attempts` row.
pub struct RawAttempt {
  pub attempt_id:  String,
  pub word:        String,
  pub scores:      String,
  pub recorded_at: String,
}

impl RawAttempt {
  pub fn into_attempt(self) -> Result<Attempt> {
    Ok(Attempt {
      attempt_id:  decode_uuid(&self.attempt_id)?,
      word:        self.word,
      scores:      decode_scores(&self.scores)?,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}
