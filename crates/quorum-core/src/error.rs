//! Error types for `quorum-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A topic was constructed against a minutes id that does not resolve.
  #[error("minutes not found: {0}")]
  MinutesNotFound(String),

  /// A failure raised by the parent's upsert capability, carried through
  /// [`Topic::save`](crate::topic::Topic::save) unchanged.
  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
