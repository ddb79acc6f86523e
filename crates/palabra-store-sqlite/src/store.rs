//! [`SqliteStore`] — the SQLite implementation of [`GameStore`].

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use palabra_core::{
  session::{Attempt, MAX_TRIES, NewAttempt, Player, Session},
  stats::SessionOutcome,
  store::GameStore,
  word::TargetWord,
};

use crate::{
  Error, Result,
  encode::{
    RawAttempt, RawPlayer, RawSession, RawWord, encode_date, encode_dt,
    encode_scores, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A palabra game store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Current `(n_tries, completed)` of a session, or `None` if it does not
  /// exist.
  async fn session_state(
    &self,
    session_id: Uuid,
  ) -> Result<Option<(usize, bool)>> {
    let id_str = encode_uuid(session_id);

    let state: Option<(i64, bool)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT n_tries, completed FROM sessions WHERE session_id = ?1",
              rusqlite::params![id_str],
              |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(state.map(|(n, completed)| (n as usize, completed)))
  }
}

// ─── GameStore impl ──────────────────────────────────────────────────────────

impl GameStore for SqliteStore {
  type Error = Error;

  // ── Players ────────────────────────────────────────────────────────────────

  async fn upsert_player(
    &self,
    phone: &str,
    seen_at: DateTime<Utc>,
  ) -> Result<Player> {
    let phone_owned = phone.to_owned();
    let seen_str = encode_dt(seen_at);

    let raw: RawPlayer = self
      .conn
      .call(move |conn| {
        let existing: Option<RawPlayer> = conn
          .query_row(
            "SELECT player_id, phone, signed_up_at, last_seen_at
             FROM players WHERE phone = ?1",
            rusqlite::params![phone_owned],
            |row| {
              Ok(RawPlayer {
                player_id:    row.get(0)?,
                phone:        row.get(1)?,
                signed_up_at: row.get(2)?,
                last_seen_at: row.get(3)?,
              })
            },
          )
          .optional()?;

        match existing {
          Some(mut player) => {
            conn.execute(
              "UPDATE players SET last_seen_at = ?1 WHERE player_id = ?2",
              rusqlite::params![seen_str, player.player_id],
            )?;
            player.last_seen_at = seen_str;
            Ok(player)
          }
          None => {
            let player = RawPlayer {
              player_id:    encode_uuid(Uuid::new_v4()),
              phone:        phone_owned,
              signed_up_at: seen_str.clone(),
              last_seen_at: seen_str,
            };
            conn.execute(
              "INSERT INTO players (player_id, phone, signed_up_at, last_seen_at)
               VALUES (?1, ?2, ?3, ?4)",
              rusqlite::params![
                player.player_id,
                player.phone,
                player.signed_up_at,
                player.last_seen_at,
              ],
            )?;
            Ok(player)
          }
        }
      })
      .await?;

    raw.into_player()
  }

  // ── Target words ───────────────────────────────────────────────────────────

  async fn add_word(&self, word: &str, date: NaiveDate) -> Result<TargetWord> {
    if self.word_for(date).await?.is_some() {
      return Err(Error::DateTaken(date));
    }

    let target = TargetWord {
      word_id: Uuid::new_v4(),
      word:    word.to_lowercase(),
      date,
    };

    let id_str   = encode_uuid(target.word_id);
    let word_str = target.word.clone();
    let date_str = encode_date(date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO words (word_id, word, date) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, word_str, date_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(target)
  }

  async fn word_for(&self, date: NaiveDate) -> Result<Option<TargetWord>> {
    let date_str = encode_date(date);

    let raw: Option<RawWord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT word_id, word, date FROM words WHERE date = ?1",
              rusqlite::params![date_str],
              |row| {
                Ok(RawWord {
                  word_id: row.get(0)?,
                  word:    row.get(1)?,
                  date:    row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawWord::into_word).transpose()
  }

  // ── Sessions ───────────────────────────────────────────────────────────────

  async fn session_for(
    &self,
    player_id: Uuid,
    date: NaiveDate,
  ) -> Result<Option<Session>> {
    let player_id_str = encode_uuid(player_id);
    let date_str = encode_date(date);

    let raw: Option<(RawSession, Vec<RawAttempt>)> = self
      .conn
      .call(move |conn| {
        let session: Option<RawSession> = conn
          .query_row(
            "SELECT session_id, player_id, date, completed
             FROM sessions WHERE player_id = ?1 AND date = ?2",
            rusqlite::params![player_id_str, date_str],
            |row| {
              Ok(RawSession {
                session_id: row.get(0)?,
                player_id:  row.get(1)?,
                date:       row.get(2)?,
                completed:  row.get(3)?,
              })
            },
          )
          .optional()?;

        let Some(session) = session else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT attempt_id, word, scores, recorded_at
           FROM attempts WHERE session_id = ?1
           ORDER BY rowid",
        )?;
        let attempts = stmt
          .query_map(rusqlite::params![session.session_id], |row| {
            Ok(RawAttempt {
              attempt_id:  row.get(0)?,
              word:        row.get(1)?,
              scores:      row.get(2)?,
              recorded_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((session, attempts)))
      })
      .await?;

    match raw {
      Some((session, attempts)) => Ok(Some(session.into_session(attempts)?)),
      None => Ok(None),
    }
  }

  async fn create_session(
    &self,
    player_id: Uuid,
    date: NaiveDate,
  ) -> Result<Session> {
    let session = Session {
      session_id: Uuid::new_v4(),
      player_id,
      date,
      completed: false,
      attempts: Vec::new(),
    };

    let id_str        = encode_uuid(session.session_id);
    let player_id_str = encode_uuid(player_id);
    let date_str      = encode_date(date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (session_id, player_id, date, completed, n_tries)
           VALUES (?1, ?2, ?3, 0, 0)",
          rusqlite::params![id_str, player_id_str, date_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(session)
  }

  async fn append_attempt(
    &self,
    session_id: Uuid,
    attempt: NewAttempt,
    completed: bool,
  ) -> Result<Attempt> {
    let (n_tries, already_completed) = self
      .session_state(session_id)
      .await?
      .ok_or(Error::SessionNotFound(session_id))?;

    if already_completed || n_tries >= MAX_TRIES {
      return Err(Error::SessionClosed(session_id));
    }

    let attempt = Attempt {
      attempt_id:  Uuid::new_v4(),
      word:        attempt.word,
      scores:      attempt.scores,
      recorded_at: Utc::now(),
    };

    let attempt_id_str  = encode_uuid(attempt.attempt_id);
    let session_id_str  = encode_uuid(session_id);
    let word            = attempt.word.clone();
    let scores_str      = encode_scores(&attempt.scores);
    let recorded_at_str = encode_dt(attempt.recorded_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO attempts (attempt_id, session_id, word, scores, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            attempt_id_str,
            session_id_str,
            word,
            scores_str,
            recorded_at_str,
          ],
        )?;
        conn.execute(
          "UPDATE sessions
           SET n_tries = n_tries + 1,
               completed = CASE WHEN ?2 THEN 1 ELSE completed END
           WHERE session_id = ?1",
          rusqlite::params![session_id_str, completed],
        )?;
        Ok(())
      })
      .await?;

    Ok(attempt)
  }

  // ── Statistics ─────────────────────────────────────────────────────────────

  async fn finished_outcomes(
    &self,
    player_id: Uuid,
  ) -> Result<Vec<SessionOutcome>> {
    let player_id_str = encode_uuid(player_id);
    let max_tries = MAX_TRIES as i64;

    let rows: Vec<(i64, bool)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT n_tries, completed FROM sessions
           WHERE player_id = ?1 AND (completed = 1 OR n_tries >= ?2)
           ORDER BY date",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![player_id_str, max_tries], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      rows
        .into_iter()
        .map(|(tries, completed)| SessionOutcome {
          tries: tries as usize,
          completed,
        })
        .collect(),
    )
  }
}
