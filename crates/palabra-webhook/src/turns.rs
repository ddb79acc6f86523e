//! Per-player turn serialisation.
//!
//! Each inbound message is a read-modify-write of that player's session for
//! the day. Webhook deliveries can race (retries, double-taps), so every turn
//! runs under a lock keyed by `(phone, date)`; this keeps the try-count
//! invariant without serialising unrelated players.

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Hands out one async mutex per `(player phone, date)`.
#[derive(Clone, Default)]
pub struct TurnLocks {
  inner: Arc<Mutex<HashMap<(String, NaiveDate), Arc<Mutex<()>>>>>,
}

impl TurnLocks {
  pub fn new() -> Self { Self::default() }

  /// Acquire the lock for `(phone, date)`, creating it on first use.
  ///
  /// Entries for other dates are swept on the way in, so the registry stays
  /// bounded by the number of players active on `date`.
  pub async fn acquire(
    &self,
    phone: &str,
    date: NaiveDate,
  ) -> OwnedMutexGuard<()> {
    let lock = {
      let mut map = self.inner.lock().await;
      map.retain(|(_, d), _| *d == date);
      map
        .entry((phone.to_owned(), date))
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
    };
    lock.lock_owned().await
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
