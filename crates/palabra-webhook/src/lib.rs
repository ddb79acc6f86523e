//! HTTP webhook layer for the palabra daily word game.
//!
//! Exposes an axum [`Router`] with the Twilio-style inbound-message endpoint,
//! backed by any [`GameStore`]. Replies are TwiML documents.

pub mod error;
pub mod turns;
pub mod twiml;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::{Form, State},
  http::header,
  response::{IntoResponse, Response},
  routing::post,
};
use chrono::Utc;
use palabra_core::{game, score::ScoringMode, store::GameStore};
use serde::Deserialize;

use turns::TurnLocks;
use twiml::MessagingResponse;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Concatenate all reply segments into a single outbound message.
  #[serde(default = "default_cost_optimizer")]
  pub cost_optimizer: bool,
  /// Guess scoring algorithm; `membership` is the shipped behaviour,
  /// `letter_budget` the standard duplicate-aware one.
  #[serde(default)]
  pub scoring: ScoringMode,
}

fn default_cost_optimizer() -> bool { true }

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: GameStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  pub locks:  TurnLocks,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the webhook server.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: GameStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/new-message", post(new_message::<S>))
    .with_state(state)
}

// ─── Inbound handler ─────────────────────────────────────────────────────────

/// The form fields the transport posts for an inbound message.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
  #[serde(rename = "From")]
  pub from: String,
  #[serde(rename = "Body")]
  pub body: String,
}

/// Strip the transport prefix from the sender id
/// (`whatsapp:+34600111222` → `+34600111222`).
fn sender_phone(from: &str) -> &str {
  from.split_once(':').map_or(from, |(_, rest)| rest)
}

async fn new_message<S>(
  State(state): State<AppState<S>>,
  Form(inbound): Form<InboundMessage>,
) -> Result<Response, Error>
where
  S: GameStore + Clone + Send + Sync + 'static,
{
  let now = Utc::now();
  let phone = sender_phone(&inbound.from);

  // One turn at a time per (player, day).
  let _turn = state.locks.acquire(phone, now.date_naive()).await;

  let segments = game::take_turn(
    state.store.as_ref(),
    state.config.scoring,
    phone,
    &inbound.body,
    now,
  )
  .await?;

  let doc = MessagingResponse::new(segments, state.config.cost_optimizer);
  Ok(([(header::CONTENT_TYPE, "text/xml")], doc.to_xml()).into_response())
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use palabra_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  const FROM: &str = "whatsapp%3A%2B34600111222";

  async fn make_state(cost_optimizer: bool) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:  Arc::new(store),
      config: Arc::new(ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 5000,
        store_path: PathBuf::from(":memory:"),
        cost_optimizer,
        scoring: ScoringMode::Membership,
      }),
      locks:  TurnLocks::new(),
    }
  }

  async fn seed_todays_word(state: &AppState<SqliteStore>, word: &str) {
    state
      .store
      .add_word(word, Utc::now().date_naive())
      .await
      .unwrap();
  }

  async fn send(state: AppState<SqliteStore>, from: &str, body: &str) -> (StatusCode, String) {
    let form = format!("From={from}&Body={body}");
    let req = Request::builder()
      .method("POST")
      .uri("/new-message")
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from(form))
      .unwrap();

    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
  }

  // ── Commands ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn instrucciones_returns_briefing() {
    let state = make_state(true).await;
    let (status, xml) = send(state, FROM, "Instrucciones").await;

    assert_eq!(status, StatusCode::OK);
    assert!(xml.starts_with("<?xml"), "missing declaration: {xml}");
    assert!(xml.contains("Adivina la palabra oculta"), "body: {xml}");
  }

  #[tokio::test]
  async fn resultados_without_games_reports_no_data() {
    let state = make_state(true).await;
    let (status, xml) = send(state, FROM, "resultados").await;

    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("Todavía no has jugado"), "body: {xml}");
  }

  // ── Guesses ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn wrong_length_guess_is_rejected_without_a_session() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    let (status, xml) = send(state, FROM, "gato").await;
    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("no es válida"), "body: {xml}");
  }

  #[tokio::test]
  async fn winning_first_guess_congratulates() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    let (status, xml) = send(state.clone(), FROM, "gatos").await;
    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("Intento 1/6"), "body: {xml}");
    assert!(xml.contains("🟩🟩🟩🟩🟩"), "body: {xml}");
    assert!(xml.contains("ENHORABUENA"), "body: {xml}");
    assert!(xml.contains("Tus estadísticas de hoy"), "body: {xml}");
  }

  #[tokio::test]
  async fn guess_is_case_insensitive() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    let (_, xml) = send(state, FROM, "GATOS").await;
    assert!(xml.contains("ENHORABUENA"), "body: {xml}");
  }

  #[tokio::test]
  async fn misses_count_up_and_the_sixth_exhausts() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    for k in 1..=5 {
      let (_, xml) = send(state.clone(), FROM, "pinos").await;
      assert!(xml.contains(&format!("Intento {k}/6")), "try {k}: {xml}");
      assert!(!xml.contains("máximo de intentos"), "try {k}: {xml}");
    }

    let (_, xml) = send(state.clone(), FROM, "pinos").await;
    assert!(xml.contains("Intento 6/6"), "body: {xml}");
    assert!(xml.contains("máximo de intentos"), "body: {xml}");
    assert!(xml.contains("Tus estadísticas de hoy"), "body: {xml}");
  }

  #[tokio::test]
  async fn seventh_guess_gets_history_echo_and_no_attempt() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    for _ in 0..6 {
      send(state.clone(), FROM, "pinos").await;
    }
    let (status, xml) = send(state.clone(), FROM, "gatos").await;

    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("máximo de intentos"), "body: {xml}");
    assert!(!xml.contains("Intento 7"), "body: {xml}");
    // Six echoed marker rows, one per played attempt.
    assert_eq!(xml.matches("⬜⬜⬜🟩🟩").count(), 6, "body: {xml}");
  }

  #[tokio::test]
  async fn guess_after_winning_is_rejected() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    send(state.clone(), FROM, "gatos").await;
    let (_, xml) = send(state.clone(), FROM, "pinos").await;
    assert!(xml.contains("máximo de intentos"), "body: {xml}");
  }

  #[tokio::test]
  async fn missing_word_of_the_day_is_a_server_error() {
    let state = make_state(true).await;

    let (status, _) = send(state, FROM, "gatos").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  }

  // ── Statistics ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn resultados_after_a_win_reports_the_distribution() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    send(state.clone(), FROM, "pinos").await;
    send(state.clone(), FROM, "gatos").await;

    let (_, xml) = send(state.clone(), FROM, "resultados").await;
    assert!(xml.contains("Partidas jugadas: 1"), "body: {xml}");
    assert!(xml.contains("Victorias: 100%"), "body: {xml}");
    assert!(xml.contains("2:⬛⬛⬛⬛⬛⬛⬛⬛⬛⬛(100%)"), "body: {xml}");
  }

  #[tokio::test]
  async fn in_progress_session_does_not_count_in_results() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    send(state.clone(), FROM, "pinos").await;
    let (_, xml) = send(state.clone(), FROM, "resultados").await;
    assert!(xml.contains("Todavía no has jugado"), "body: {xml}");
  }

  // ── Transport ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn cost_optimizer_sends_one_message() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    let (_, xml) = send(state, FROM, "gatos").await;
    assert_eq!(xml.matches("<Message>").count(), 1, "body: {xml}");
  }

  #[tokio::test]
  async fn without_cost_optimizer_segments_stay_separate() {
    let state = make_state(false).await;
    seed_todays_word(&state, "gatos").await;

    let (_, xml) = send(state, FROM, "gatos").await;
    assert_eq!(xml.matches("<Message>").count(), 3, "body: {xml}");
  }

  #[tokio::test]
  async fn players_are_tracked_per_phone() {
    let state = make_state(true).await;
    seed_todays_word(&state, "gatos").await;

    // First player spends their six attempts; the second still has theirs.
    for _ in 0..6 {
      send(state.clone(), FROM, "pinos").await;
    }
    let (_, xml) =
      send(state.clone(), "whatsapp%3A%2B34600333444", "pinos").await;
    assert!(xml.contains("Intento 1/6"), "body: {xml}");
  }
}
