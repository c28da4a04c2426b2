//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; topic documents and topic
//! arrays are stored as compact JSON in the shape the core types serialize
//! to (camelCase field names).

use chrono::{DateTime, Utc};
use quorum_core::topic::TopicDoc;

use crate::{Error, Result, store::MinutesDoc};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Topic documents ─────────────────────────────────────────────────────────

pub fn encode_topic(doc: &TopicDoc) -> Result<String> {
  Ok(doc.to_json()?.to_string())
}

pub fn decode_topic(s: &str) -> Result<TopicDoc> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_topics(docs: &[TopicDoc]) -> Result<String> {
  Ok(serde_json::to_string(docs)?)
}

pub fn decode_topics(s: &str) -> Result<Vec<TopicDoc>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `minutes` row.
pub struct RawMinutes {
  pub minutes_id: String,
  pub series_id:  String,
  pub created_at: String,
  pub topics:     String,
}

impl RawMinutes {
  pub fn into_minutes(self) -> Result<MinutesDoc> {
    Ok(MinutesDoc {
      id:         self.minutes_id,
      series_id:  self.series_id,
      created_at: decode_dt(&self.created_at)?,
      topics:     decode_topics(&self.topics)?,
    })
  }
}
