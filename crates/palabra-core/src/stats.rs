//! Aggregate statistics over a player's finished sessions.

use crate::session::MAX_TRIES;

/// The outcome of one finished (completed or exhausted) session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
  pub tries:     usize,
  pub completed: bool,
}

/// Aggregated results for a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
  /// Total finished sessions.
  pub games:   usize,
  /// round(100 × wins / games).
  pub win_pct: u32,
  /// Sessions per try-count bucket; index 0 holds one-try sessions.
  pub buckets: [usize; MAX_TRIES],
}

impl PlayerStats {
  /// Aggregate `outcomes`. Returns `None` when there is nothing to
  /// aggregate yet; no division by zero is reachable.
  pub fn from_outcomes(outcomes: &[SessionOutcome]) -> Option<Self> {
    if outcomes.is_empty() {
      return None;
    }

    let games = outcomes.len();
    let wins = outcomes.iter().filter(|o| o.completed).count();

    let mut buckets = [0usize; MAX_TRIES];
    for outcome in outcomes {
      if (1..=MAX_TRIES).contains(&outcome.tries) {
        buckets[outcome.tries - 1] += 1;
      }
    }

    Some(Self { games, win_pct: percentage(wins, games), buckets })
  }

  /// Render the tries distribution, one line per bucket, with a bar of one
  /// ⬛ per 10% (rounded): `3:⬛⬛⬛⬛⬛(50%)`.
  pub fn render_distribution(&self) -> String {
    let mut out = String::new();
    for (i, &n) in self.buckets.iter().enumerate() {
      let pct = percentage(n, self.games);
      let bar = "⬛".repeat((f64::from(pct) / 10.0).round() as usize);
      out.push_str(&format!("{}:{bar}({pct}%)\n", i + 1));
    }
    out
  }
}

fn percentage(part: usize, total: usize) -> u32 {
  ((part as f64 / total as f64) * 100.0).round() as u32
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn won(tries: usize) -> SessionOutcome {
    SessionOutcome { tries, completed: true }
  }

  fn lost() -> SessionOutcome {
    SessionOutcome { tries: MAX_TRIES, completed: false }
  }

  #[test]
  fn no_sessions_yields_no_stats() {
    assert_eq!(PlayerStats::from_outcomes(&[]), None);
  }

  #[test]
  fn distribution_of_four_sessions() {
    // Try counts [1, 3, 3, 6] over four sessions.
    let stats =
      PlayerStats::from_outcomes(&[won(1), won(3), won(3), lost()]).unwrap();

    assert_eq!(stats.games, 4);
    assert_eq!(stats.win_pct, 75);
    assert_eq!(stats.buckets, [1, 0, 2, 0, 0, 1]);
  }

  #[test]
  fn distribution_render_golden() {
    let stats =
      PlayerStats::from_outcomes(&[won(1), won(3), won(3), lost()]).unwrap();

    assert_eq!(
      stats.render_distribution(),
      "1:⬛⬛⬛(25%)\n2:(0%)\n3:⬛⬛⬛⬛⬛(50%)\n4:(0%)\n5:(0%)\n6:⬛⬛⬛(25%)\n"
    );
  }

  #[test]
  fn all_wins_is_one_hundred_percent() {
    let stats = PlayerStats::from_outcomes(&[won(2), won(4)]).unwrap();
    assert_eq!(stats.win_pct, 100);
  }

  #[test]
  fn all_losses_is_zero_percent() {
    let stats = PlayerStats::from_outcomes(&[lost(), lost()]).unwrap();
    assert_eq!(stats.win_pct, 0);
    assert_eq!(stats.buckets, [0, 0, 0, 0, 0, 2]);
  }
}
