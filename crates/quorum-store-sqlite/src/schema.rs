//! SQL schema for the SQLite minutes store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per minutes document. The topic array is embedded as JSON in
-- display order; the column is rewritten wholesale on every topic upsert
-- (last write wins at this boundary).
CREATE TABLE IF NOT EXISTS minutes (
    minutes_id  TEXT PRIMARY KEY,
    series_id   TEXT NOT NULL,
    created_at  TEXT NOT NULL,    -- ISO 8601 UTC
    topics      TEXT NOT NULL DEFAULT '[]'
);

-- Denormalized per-topic view, maintained alongside the embedded array.
-- The finder filters on (parent_id, is_open) here instead of unpacking JSON.
CREATE TABLE IF NOT EXISTS topics (
    topic_id   TEXT PRIMARY KEY,
    parent_id  TEXT NOT NULL,     -- owning meeting-series id
    is_open    INTEGER NOT NULL,
    doc        TEXT NOT NULL      -- full topic document JSON
);

CREATE INDEX IF NOT EXISTS minutes_series_idx ON minutes(series_id);
CREATE INDEX IF NOT EXISTS topics_parent_idx  ON topics(parent_id);
CREATE INDEX IF NOT EXISTS topics_open_idx    ON topics(parent_id, is_open);

PRAGMA user_version = 1;
";
