//! [`SqliteMinutesStore`] — the SQLite implementation of the core's
//! collaborator seams.

use std::{
  path::Path,
  sync::{Arc, Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use quorum_core::{
  store::{MinutesLookup, ParentMinutes},
  topic::{Topic, TopicDoc},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawMinutes, decode_topic, encode_dt, encode_topic, encode_topics},
  schema::SCHEMA,
};

// ─── Documents ───────────────────────────────────────────────────────────────

/// One minutes document: the ordered topic array of a single meeting,
/// embedded the way the wire format stores it.
#[derive(Debug, Clone)]
pub struct MinutesDoc {
  pub id:         String,
  pub series_id:  String,
  pub created_at: DateTime<Utc>,
  pub topics:     Vec<TopicDoc>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A minutes store backed by a single SQLite file.
///
/// Cloning is cheap — the connection is reference-counted behind a mutex.
/// Concurrent upserts of the same topic resolve last-write-wins; the core
/// deliberately provides no locking above this boundary.
#[derive(Clone)]
pub struct SqliteMinutesStore {
  conn: Arc<Mutex<rusqlite::Connection>>,
}

impl SqliteMinutesStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_conn(rusqlite::Connection::open(path)?)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::from_conn(rusqlite::Connection::open_in_memory()?)
  }

  fn from_conn(conn: rusqlite::Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Arc::new(Mutex::new(conn)) })
  }

  fn conn(&self) -> MutexGuard<'_, rusqlite::Connection> {
    // A poisoned mutex means another thread panicked mid-statement; the
    // connection itself is still usable.
    self.conn.lock().unwrap_or_else(|e| e.into_inner())
  }

  // ── Minutes ───────────────────────────────────────────────────────────────

  /// Create and persist an empty minutes document for `series_id`.
  pub fn add_minutes(&self, series_id: &str) -> Result<MinutesDoc> {
    let minutes = MinutesDoc {
      id:         Uuid::new_v4().hyphenated().to_string(),
      series_id:  series_id.to_owned(),
      created_at: Utc::now(),
      topics:     Vec::new(),
    };

    self.conn().execute(
      "INSERT INTO minutes (minutes_id, series_id, created_at, topics)
       VALUES (?1, ?2, ?3, '[]')",
      rusqlite::params![
        minutes.id,
        minutes.series_id,
        encode_dt(minutes.created_at)
      ],
    )?;

    tracing::debug!(minutes_id = %minutes.id, series_id, "created minutes");
    Ok(minutes)
  }

  /// Retrieve a minutes document by id. Returns `None` if not found.
  pub fn get_minutes(&self, id: &str) -> Result<Option<MinutesDoc>> {
    let raw: Option<RawMinutes> = self
      .conn()
      .query_row(
        "SELECT minutes_id, series_id, created_at, topics
         FROM minutes WHERE minutes_id = ?1",
        rusqlite::params![id],
        |row| {
          Ok(RawMinutes {
            minutes_id: row.get(0)?,
            series_id:  row.get(1)?,
            created_at: row.get(2)?,
            topics:     row.get(3)?,
          })
        },
      )
      .optional()?;

    raw.map(RawMinutes::into_minutes).transpose()
  }

  // ── Topics ────────────────────────────────────────────────────────────────

  /// Order-preserving upsert of `doc` into the embedded topic array of the
  /// given minutes row, mirroring the in-memory merge rule: a matching id
  /// keeps its position, a new topic is appended. Also refreshes the
  /// denormalized `topics` row the finder reads.
  pub fn upsert_topic(&self, minutes_id: &str, doc: &TopicDoc) -> Result<()> {
    let minutes = self
      .get_minutes(minutes_id)?
      .ok_or_else(|| Error::MinutesNotFound(minutes_id.to_owned()))?;

    let mut topics = minutes.topics;
    let existing = doc
      .id
      .as_deref()
      .and_then(|id| Topic::find_topic_index(id, &topics));
    match existing {
      Some(i) => topics[i] = doc.clone(),
      None => topics.push(doc.clone()),
    }

    let topics_json = encode_topics(&topics)?;
    let doc_json = encode_topic(doc)?;

    let conn = self.conn();
    conn.execute(
      "UPDATE minutes SET topics = ?1 WHERE minutes_id = ?2",
      rusqlite::params![topics_json, minutes_id],
    )?;

    if let Some(topic_id) = doc.id.as_deref() {
      conn.execute(
        "INSERT INTO topics (topic_id, parent_id, is_open, doc)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(topic_id) DO UPDATE SET
           parent_id = excluded.parent_id,
           is_open   = excluded.is_open,
           doc       = excluded.doc",
        rusqlite::params![topic_id, minutes.series_id, doc.is_open, doc_json],
      )?;
    }

    tracing::debug!(
      minutes_id,
      topic_id = doc.id.as_deref().unwrap_or_default(),
      "upserted topic"
    );
    Ok(())
  }

  // ── Finder ────────────────────────────────────────────────────────────────

  /// All topic documents of a meeting series.
  pub fn all_topics_of_series(&self, series_id: &str) -> Result<Vec<TopicDoc>> {
    self.query_topics(
      "SELECT doc FROM topics WHERE parent_id = ?1",
      rusqlite::params![series_id],
    )
  }

  /// Only the still-open topics of a meeting series.
  pub fn open_topics_of_series(
    &self,
    series_id: &str,
  ) -> Result<Vec<TopicDoc>> {
    self.query_topics(
      "SELECT doc FROM topics WHERE parent_id = ?1 AND is_open = 1",
      rusqlite::params![series_id],
    )
  }

  fn query_topics(
    &self,
    sql: &str,
    params: impl rusqlite::Params,
  ) -> Result<Vec<TopicDoc>> {
    let conn = self.conn();
    let mut stmt = conn.prepare(sql)?;
    let raw = stmt
      .query_map(params, |row| row.get::<_, String>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    raw.iter().map(|s| decode_topic(s)).collect()
  }
}

// ─── Parent handle ───────────────────────────────────────────────────────────

/// A live handle to one minutes row, handed to topics as their parent
/// back-reference.
pub struct StoredMinutes {
  store:      SqliteMinutesStore,
  minutes_id: String,
}

impl ParentMinutes for StoredMinutes {
  fn id(&self) -> &str { &self.minutes_id }

  fn upsert_topic(&self, doc: &TopicDoc) -> quorum_core::Result<()> {
    self
      .store
      .upsert_topic(&self.minutes_id, doc)
      .map_err(quorum_core::Error::from)
  }
}

impl MinutesLookup for SqliteMinutesStore {
  fn find_by_id(&self, id: &str) -> Option<Arc<dyn ParentMinutes>> {
    match self.get_minutes(id) {
      Ok(Some(_)) => Some(Arc::new(StoredMinutes {
        store:      self.clone(),
        minutes_id: id.to_owned(),
      })),
      Ok(None) => None,
      Err(err) => {
        tracing::warn!(minutes_id = id, error = %err, "minutes lookup failed");
        None
      }
    }
  }
}
