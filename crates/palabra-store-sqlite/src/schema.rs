//! SQL schema for the palabra SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS players (
    player_id    TEXT PRIMARY KEY,
    phone        TEXT NOT NULL UNIQUE,
    signed_up_at TEXT NOT NULL,   -- ISO 8601 UTC
    last_seen_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS words (
    word_id TEXT PRIMARY KEY,
    word    TEXT NOT NULL,
    date    TEXT NOT NULL UNIQUE  -- YYYY-MM-DD; at most one word per day
);

CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    player_id  TEXT NOT NULL REFERENCES players(player_id),
    date       TEXT NOT NULL,
    completed  INTEGER NOT NULL DEFAULT 0,
    n_tries    INTEGER NOT NULL DEFAULT 0,  -- always count(attempts), capped at 6
    UNIQUE (player_id, date)
);

-- Attempts are append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS attempts (
    attempt_id  TEXT PRIMARY KEY,
    session_id  TEXT NOT NULL REFERENCES sessions(session_id),
    word        TEXT NOT NULL,
    scores      TEXT NOT NULL,   -- five chars over W|P|C, one per letter
    recorded_at TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS sessions_player_idx  ON sessions(player_id);
CREATE INDEX IF NOT EXISTS attempts_session_idx ON attempts(session_id);

PRAGMA user_version = 1;
";
