//! Guess scoring and feedback rendering.

use serde::{Deserialize, Serialize};

// ─── Result codes ────────────────────────────────────────────────────────────

/// Classification of one guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterScore {
  /// The letter does not occur in the target word.
  Wrong,
  /// The letter occurs in the target word, but not at this position.
  Present,
  /// Right letter, right position.
  Correct,
}

impl LetterScore {
  /// Emoji marker shown beneath the letter.
  pub fn marker(self) -> &'static str {
    match self {
      Self::Wrong => "⬜",
      Self::Present => "🟨",
      Self::Correct => "🟩",
    }
  }
}

// ─── Scoring modes ───────────────────────────────────────────────────────────

/// Which scoring algorithm [`evaluate`] runs.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
  /// Positional match first, then a naive membership check anywhere in the
  /// target. No duplicate-letter budget is kept: a repeated guess letter can
  /// be marked Present several times even when the target contains a single
  /// instance. This is the behaviour the game shipped with and the default.
  #[default]
  Membership,
  /// Standard duplicate-aware scoring: each target letter feeds at most one
  /// Correct or Present mark.
  LetterBudget,
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

/// Score `guess` against `target`, position by position.
///
/// Pure: the same `(target, guess, mode)` always yields the same codes. Both
/// words must already be valid per [`crate::word::validate_word`].
pub fn evaluate(target: &str, guess: &str, mode: ScoringMode) -> Vec<LetterScore> {
  match mode {
    ScoringMode::Membership => evaluate_membership(target, guess),
    ScoringMode::LetterBudget => evaluate_letter_budget(target, guess),
  }
}

fn evaluate_membership(target: &str, guess: &str) -> Vec<LetterScore> {
  let target_chars: Vec<char> = target.chars().collect();

  guess
    .chars()
    .enumerate()
    .map(|(i, g)| {
      if target_chars.get(i) == Some(&g) {
        LetterScore::Correct
      } else if target_chars.contains(&g) {
        LetterScore::Present
      } else {
        LetterScore::Wrong
      }
    })
    .collect()
}

fn evaluate_letter_budget(target: &str, guess: &str) -> Vec<LetterScore> {
  let target_chars: Vec<char> = target.chars().collect();
  let guess_chars: Vec<char> = guess.chars().collect();

  let mut scores = vec![LetterScore::Wrong; guess_chars.len()];
  let mut budget: Vec<Option<char>> =
    target_chars.iter().copied().map(Some).collect();

  // Exact matches consume their target letter first.
  for (i, &g) in guess_chars.iter().enumerate() {
    if target_chars.get(i) == Some(&g) {
      scores[i] = LetterScore::Correct;
      budget[i] = None;
    }
  }

  // Remaining guess letters consume leftover target letters left-to-right.
  for (i, &g) in guess_chars.iter().enumerate() {
    if scores[i] == LetterScore::Correct {
      continue;
    }
    if let Some(slot) = budget.iter_mut().find(|slot| **slot == Some(g)) {
      scores[i] = LetterScore::Present;
      *slot = None;
    }
  }

  scores
}

/// True iff every position scored [`LetterScore::Correct`].
pub fn is_winning(scores: &[LetterScore]) -> bool {
  scores.iter().all(|s| *s == LetterScore::Correct)
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Render the two-line feedback grid: the uppercased letters, each padded
/// with three spaces to line up with the emoji row beneath.
///
/// Output is byte-for-byte reproducible for the same input.
pub fn render_attempt(word: &str, scores: &[LetterScore]) -> String {
  let mut letters = String::new();
  for c in word.chars() {
    for u in c.to_uppercase() {
      letters.push(u);
    }
    letters.push_str("   ");
  }
  format!("{letters}\n{}", marker_row(scores))
}

/// The emoji row alone; the daily history echo is built from these.
pub fn marker_row(scores: &[LetterScore]) -> String {
  scores.iter().map(|s| s.marker()).collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
