//! Collaborator traits at the persistence seam.
//!
//! The document model never talks to storage directly. A topic receives a
//! parent lookup and an identity source at construction and calls back
//! through them; concrete backends (e.g. `quorum-store-sqlite`) implement
//! these traits.

use std::sync::Arc;

use uuid::Uuid;

use crate::{Result, topic::TopicDoc};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Produces globally-unique string identifiers for new documents.
///
/// Injected rather than global so tests can substitute a deterministic
/// sequence. Implementations must never repeat an id.
pub trait IdGenerator: Send + Sync {
  fn new_id(&self) -> String;
}

/// The default identity source: hyphenated UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
  fn new_id(&self) -> String { Uuid::new_v4().hyphenated().to_string() }
}

// ─── Parent minutes ──────────────────────────────────────────────────────────

/// The minutes document a topic belongs to, seen from the topic's side.
///
/// A non-owning back-reference: the topic only reads the id and invokes the
/// upsert capability, it never mutates the parent in any other way.
pub trait ParentMinutes: Send + Sync {
  fn id(&self) -> &str;

  /// Persist the given topic document into this minutes document.
  /// Implementations report failures through
  /// [`Error::Persistence`](crate::Error::Persistence).
  fn upsert_topic(&self, doc: &TopicDoc) -> Result<()>;
}

/// Resolves a minutes id to its live handle. Consulted once, at
/// [`Topic::new`](crate::topic::Topic::new).
pub trait MinutesLookup {
  fn find_by_id(&self, id: &str) -> Option<Arc<dyn ParentMinutes>>;
}
