//! Error type for `quorum-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] quorum_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to upsert a topic into a minutes row that does not exist.
  #[error("minutes not found: {0}")]
  MinutesNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for quorum_core::Error {
  /// Wraps a store failure so `Topic::save` can propagate it unchanged.
  fn from(err: Error) -> Self {
    quorum_core::Error::Persistence(Box::new(err))
  }
}
