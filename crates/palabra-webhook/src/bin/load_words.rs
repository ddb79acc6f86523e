//! Batch word loader.
//!
//! Reads a word list (one word per line), shuffles it, and assigns one word
//! per calendar day starting today. Days that already have a word are
//! reported and skipped.

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Days, Utc};
use clap::Parser;
use palabra_core::{store::GameStore as _, word::validate_word};
use palabra_store_sqlite::SqliteStore;
use rand::seq::SliceRandom as _;

#[derive(Parser)]
#[command(author, version, about = "Assign one shuffled word per day")]
struct Cli {
  /// Word list file, one word per line.
  words: PathBuf,

  /// Path to the SQLite store.
  #[arg(short, long, default_value = "palabra.db")]
  store: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().init();

  let cli = Cli::parse();

  let raw = std::fs::read_to_string(&cli.words)
    .with_context(|| format!("failed to read {:?}", cli.words))?;

  let mut words: Vec<&str> = raw
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .collect();

  let before = words.len();
  words.retain(|w| validate_word(w).is_ok());
  if words.len() < before {
    tracing::warn!(
      dropped = before - words.len(),
      "dropped words that are not exactly 5 letters"
    );
  }

  words.shuffle(&mut rand::thread_rng());

  let store = SqliteStore::open(&cli.store)
    .await
    .with_context(|| format!("failed to open store at {:?}", cli.store))?;

  let today = Utc::now().date_naive();
  for (offset, word) in words.iter().enumerate() {
    let date = today
      .checked_add_days(Days::new(offset as u64))
      .context("date overflow")?;

    match store.add_word(word, date).await {
      Ok(assigned) => {
        tracing::info!(%date, word = %assigned.word, "assigned");
      }
      Err(palabra_store_sqlite::Error::DateTaken(taken)) => {
        tracing::warn!(date = %taken, "date already has a word; skipping");
      }
      Err(e) => return Err(e).context("failed to assign word"),
    }
  }

  tracing::info!(count = words.len(), "word load complete");

  Ok(())
}
