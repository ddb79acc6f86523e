//! Players, attempts, and the per-day session state machine.
//!
//! A session moves `InProgress → Completed` the instant an attempt scores
//! all-Correct, or `InProgress → Exhausted` when the sixth attempt misses.
//! Both terminal states reject further attempts for the day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  score::{LetterScore, is_winning},
};

/// Maximum attempts per session.
pub const MAX_TRIES: usize = 6;

// ─── Player ──────────────────────────────────────────────────────────────────

/// A player, identified by a stable phone-number string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
  pub player_id:    Uuid,
  pub phone:        String,
  pub signed_up_at: DateTime<Utc>,
  pub last_seen_at: DateTime<Utc>,
}

// ─── Attempt ─────────────────────────────────────────────────────────────────

/// One scored guess within a session. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
  pub attempt_id:  Uuid,
  pub word:        String,
  pub scores:      Vec<LetterScore>,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at: DateTime<Utc>,
}

/// Input to [`crate::store::GameStore::append_attempt`].
/// The id and `recorded_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAttempt {
  pub word:   String,
  pub scores: Vec<LetterScore>,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Where a session stands for the day. Computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
  /// Guesses remain and the word is not yet found.
  InProgress,
  /// An attempt scored all-Correct.
  Completed,
  /// All [`MAX_TRIES`] attempts spent without finding the word.
  Exhausted,
}

impl SessionStatus {
  /// Terminal states accept no further attempts for the day.
  pub fn is_terminal(self) -> bool { !matches!(self, Self::InProgress) }
}

/// A player's progress on a single day's word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub session_id: Uuid,
  pub player_id:  Uuid,
  pub date:       NaiveDate,
  pub completed:  bool,
  /// In recording order. Invariant: `attempts.len() <= MAX_TRIES`.
  pub attempts:   Vec<Attempt>,
}

impl Session {
  /// Try count; always equal to the number of attempts.
  pub fn tries(&self) -> usize { self.attempts.len() }

  pub fn status(&self) -> SessionStatus {
    if self.completed {
      SessionStatus::Completed
    } else if self.attempts.len() >= MAX_TRIES {
      SessionStatus::Exhausted
    } else {
      SessionStatus::InProgress
    }
  }

  /// Append an attempt and return the resulting status.
  ///
  /// The attempt is appended before the terminal condition is checked, so a
  /// winning sixth guess counts as Completed, not Exhausted. Errors with
  /// [`Error::MaxAttemptsReached`] if the session is already terminal.
  pub fn record_attempt(&mut self, attempt: Attempt) -> Result<SessionStatus> {
    if self.status().is_terminal() {
      return Err(Error::MaxAttemptsReached);
    }

    let won = is_winning(&attempt.scores);
    self.attempts.push(attempt);
    if won {
      self.completed = true;
    }

    Ok(self.status())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::score::LetterScore::{Correct, Wrong};

  fn session() -> Session {
    Session {
      session_id: Uuid::new_v4(),
      player_id:  Uuid::new_v4(),
      date:       NaiveDate::from_ymd_opt(2022, 3, 14).unwrap(),
      completed:  false,
      attempts:   Vec::new(),
    }
  }

  fn attempt(scores: Vec<LetterScore>) -> Attempt {
    Attempt {
      attempt_id: Uuid::new_v4(),
      word: "perro".to_string(),
      scores,
      recorded_at: Utc::now(),
    }
  }

  #[test]
  fn try_count_tracks_attempts() {
    let mut s = session();
    for k in 1..=4 {
      let status = s.record_attempt(attempt(vec![Wrong; 5])).unwrap();
      assert_eq!(s.tries(), k);
      assert_eq!(status, SessionStatus::InProgress);
    }
  }

  #[test]
  fn completes_the_instant_an_attempt_is_all_correct() {
    let mut s = session();
    s.record_attempt(attempt(vec![Wrong; 5])).unwrap();

    let status = s.record_attempt(attempt(vec![Correct; 5])).unwrap();
    assert_eq!(status, SessionStatus::Completed);
    assert!(s.completed);
    assert_eq!(s.tries(), 2);
  }

  #[test]
  fn sixth_miss_exhausts() {
    let mut s = session();
    for _ in 0..5 {
      assert_eq!(
        s.record_attempt(attempt(vec![Wrong; 5])).unwrap(),
        SessionStatus::InProgress
      );
    }
    let status = s.record_attempt(attempt(vec![Wrong; 5])).unwrap();
    assert_eq!(status, SessionStatus::Exhausted);
  }

  #[test]
  fn winning_sixth_guess_completes_not_exhausts() {
    let mut s = session();
    for _ in 0..5 {
      s.record_attempt(attempt(vec![Wrong; 5])).unwrap();
    }
    let status = s.record_attempt(attempt(vec![Correct; 5])).unwrap();
    assert_eq!(status, SessionStatus::Completed);
  }

  #[test]
  fn exhausted_session_rejects_attempts_and_keeps_count() {
    let mut s = session();
    for _ in 0..MAX_TRIES {
      s.record_attempt(attempt(vec![Wrong; 5])).unwrap();
    }

    let err = s.record_attempt(attempt(vec![Correct; 5])).unwrap_err();
    assert!(matches!(err, Error::MaxAttemptsReached));
    assert_eq!(s.tries(), MAX_TRIES);
  }

  #[test]
  fn completed_session_rejects_attempts() {
    let mut s = session();
    s.record_attempt(attempt(vec![Correct; 5])).unwrap();

    let err = s.record_attempt(attempt(vec![Wrong; 5])).unwrap_err();
    assert!(matches!(err, Error::MaxAttemptsReached));
    assert_eq!(s.tries(), 1);
  }
}
