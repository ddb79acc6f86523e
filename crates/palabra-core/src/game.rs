//! One inbound message, one game turn.
//!
//! The engine runs over any [`GameStore`]. All user-facing failures (bad
//! word length, terminal session) are folded into the reply text; only a
//! missing target word or a store failure propagates as an error, and no
//! session data is lost either way.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  Error, Result,
  score::{ScoringMode, evaluate, is_winning, marker_row, render_attempt},
  session::{MAX_TRIES, NewAttempt, SessionStatus},
  stats::PlayerStats,
  store::GameStore,
  texts,
  word::validate_word,
};

/// Run one game turn for the message `body` sent by `phone`.
///
/// The player record is upserted first, whatever the message says. Returns
/// the reply segments in order; the transport layer decides whether to send
/// them as separate messages or one concatenated message.
pub async fn take_turn<S>(
  store: &S,
  scoring: ScoringMode,
  phone: &str,
  body: &str,
  now: DateTime<Utc>,
) -> Result<Vec<String>>
where
  S: GameStore,
{
  let player = store.upsert_player(phone, now).await.map_err(box_store)?;
  let message = body.to_lowercase();

  match message.as_str() {
    texts::CMD_BRIEFING => Ok(vec![texts::BRIEFING.to_string()]),
    texts::CMD_RESULTS => results_reply(store, player.player_id).await,
    guess => match validate_word(guess) {
      Ok(()) => guess_reply(store, scoring, player.player_id, guess, now).await,
      Err(Error::InvalidGuessLength(_)) => Ok(vec![
        texts::INVALID_WORD.to_string(),
        texts::INVALID_WORD_HINT.to_string(),
      ]),
      Err(e) => Err(e),
    },
  }
}

// ─── Results command ─────────────────────────────────────────────────────────

async fn results_reply<S>(store: &S, player_id: Uuid) -> Result<Vec<String>>
where
  S: GameStore,
{
  let outcomes = store
    .finished_outcomes(player_id)
    .await
    .map_err(box_store)?;

  let Some(stats) = PlayerStats::from_outcomes(&outcomes) else {
    return Ok(vec![texts::NO_GAMES_YET.to_string()]);
  };

  Ok(vec![
    texts::RESULTS_HEADER.to_string(),
    format!(
      "Partidas jugadas: {}\nVictorias: {}%",
      stats.games, stats.win_pct
    ),
    stats.render_distribution(),
  ])
}

// ─── Guess flow ──────────────────────────────────────────────────────────────

async fn guess_reply<S>(
  store: &S,
  scoring: ScoringMode,
  player_id: Uuid,
  guess: &str,
  now: DateTime<Utc>,
) -> Result<Vec<String>>
where
  S: GameStore,
{
  let date = now.date_naive();

  let mut session = match store
    .session_for(player_id, date)
    .await
    .map_err(box_store)?
  {
    Some(session) => session,
    None => store
      .create_session(player_id, date)
      .await
      .map_err(box_store)?,
  };

  if session.status().is_terminal() {
    let rows: Vec<String> =
      session.attempts.iter().map(|a| marker_row(&a.scores)).collect();
    return Ok(vec![texts::MAX_ATTEMPTS.to_string(), today_echo(&rows)]);
  }

  let target = store
    .word_for(date)
    .await
    .map_err(box_store)?
    .ok_or(Error::NoTargetWord(date))?;

  let scores = evaluate(&target.word, guess, scoring);
  let grid = render_attempt(guess, &scores);
  let won = is_winning(&scores);

  // Persist first, then replay the append on the in-memory aggregate; the
  // attempt lands before the terminal condition is checked.
  let attempt = store
    .append_attempt(
      session.session_id,
      NewAttempt { word: guess.to_string(), scores },
      won,
    )
    .await
    .map_err(box_store)?;
  let status = session.record_attempt(attempt)?;

  let tries = session.tries();
  let rows: Vec<String> =
    session.attempts.iter().map(|a| marker_row(&a.scores)).collect();

  let mut reply = vec![format!("Intento {tries}/{MAX_TRIES}\n{grid}")];
  match status {
    SessionStatus::Completed => {
      reply.push(texts::congratulation(tries));
      reply.push(today_echo(&rows));
    }
    SessionStatus::Exhausted => {
      reply.push(texts::TRY_TOMORROW.to_string());
      reply.push(today_echo(&rows));
    }
    SessionStatus::InProgress => {}
  }

  Ok(reply)
}

/// The day's attempt history, emoji rows only.
fn today_echo(rows: &[String]) -> String {
  format!("{}\n{}", texts::TODAY_HEADER, rows.join("\n"))
}

fn box_store<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}
