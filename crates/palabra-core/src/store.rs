//! The `GameStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `palabra-store-sqlite`).
//! Higher layers (`palabra-webhook`, the game engine) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
  session::{Attempt, NewAttempt, Player, Session},
  stats::SessionOutcome,
  word::TargetWord,
};

/// Abstraction over the game's persistence backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait GameStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Players ───────────────────────────────────────────────────────────

  /// Fetch the player for `phone`, creating them on first contact.
  /// `last_seen_at` is refreshed either way.
  fn upsert_player<'a>(
    &'a self,
    phone: &'a str,
    seen_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Player, Self::Error>> + Send + 'a;

  // ── Target words ──────────────────────────────────────────────────────

  /// Assign `word` to `date`. Errors if the date already has a word; at most
  /// one target word exists per calendar date.
  fn add_word<'a>(
    &'a self,
    word: &'a str,
    date: NaiveDate,
  ) -> impl Future<Output = Result<TargetWord, Self::Error>> + Send + 'a;

  /// The word assigned to `date`, if any.
  fn word_for(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<TargetWord>, Self::Error>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// The session for `(player, date)` with its attempts in recording order.
  /// Returns `None` if the player has not guessed yet that day.
  fn session_for(
    &self,
    player_id: Uuid,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;

  /// Create the (empty) session for `(player, date)`.
  fn create_session(
    &self,
    player_id: Uuid,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Session, Self::Error>> + Send + '_;

  /// Persist one attempt: append the row, bump the session try count, and
  /// mark the session completed when `completed` is set. The attempt id and
  /// `recorded_at` are assigned by the store. Rejects appends to a session
  /// that is already completed or at the attempt cap.
  fn append_attempt(
    &self,
    session_id: Uuid,
    attempt: NewAttempt,
    completed: bool,
  ) -> impl Future<Output = Result<Attempt, Self::Error>> + Send + '_;

  // ── Statistics ────────────────────────────────────────────────────────

  /// Outcomes of the player's finished sessions (completed or exhausted),
  /// oldest first. In-progress sessions are not included.
  fn finished_outcomes(
    &self,
    player_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SessionOutcome>, Self::Error>> + Send + '_;
}
