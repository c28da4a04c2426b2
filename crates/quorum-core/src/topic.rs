//! Topics — the ordered discussion units of a minutes document.
//!
//! A [`Topic`] is an ephemeral editing handle over one [`TopicDoc`]; it is
//! not the system of record. Mutations act on the in-memory document and
//! [`Topic::save`] hands the result to the parent minutes' upsert capability.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  error::Error,
  info_item::{InfoItem, InfoItemDoc, InfoItemKind},
  store::{IdGenerator, MinutesLookup, ParentMinutes},
};

fn default_true() -> bool { true }

// ─── Document ────────────────────────────────────────────────────────────────

/// The plain, JSON-serializable topic document — what gets embedded in a
/// minutes document. The parent back-reference lives on [`Topic`] and is
/// never part of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDoc {
  /// Unique within a meeting series; assigned at [`Topic::new`] when absent
  /// and fixed afterwards.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:         Option<String>,
  pub subject:    String,
  /// Whether the topic is still under discussion. Defaults to open.
  #[serde(default = "default_true")]
  pub is_open:    bool,
  /// Whether the topic first appeared in the current minutes, as opposed to
  /// being carried over from an earlier one. Defaults to new.
  #[serde(default = "default_true")]
  pub is_new:     bool,
  /// Ordered; insertion order is display order. An updated item keeps the
  /// position of the item it replaces.
  #[serde(default)]
  pub info_items: Vec<InfoItemDoc>,
}

impl TopicDoc {
  /// A fresh, open, empty topic document with no id yet.
  pub fn new(subject: impl Into<String>) -> Self {
    Self {
      id:         None,
      subject:    subject.into(),
      is_open:    true,
      is_new:     true,
      info_items: Vec::new(),
    }
  }

  pub fn to_json(&self) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(self)?)
  }

  pub fn from_json(value: serde_json::Value) -> Result<Self> {
    Ok(serde_json::from_value(value)?)
  }
}

// ─── Topic ───────────────────────────────────────────────────────────────────

/// A live topic bound to its parent minutes.
///
/// One logical editor session owns one instance at a time; the document is
/// not safe for concurrent in-place mutation. Two instances saving the same
/// underlying document race at the storage boundary, which is resolved there
/// (last write wins in the reference store).
pub struct Topic {
  doc:    TopicDoc,
  parent: Arc<dyn ParentMinutes>,
  ids:    Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for Topic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Topic").field("doc", &self.doc).finish_non_exhaustive()
  }
}

impl Topic {
  /// Resolve `parent_minutes_id` through `lookup` and wrap `doc`, assigning
  /// an id from `ids` when the document has none.
  ///
  /// Fails with [`Error::MinutesNotFound`] when the parent does not resolve;
  /// no partial topic is returned.
  pub fn new(
    lookup: &dyn MinutesLookup,
    ids: Arc<dyn IdGenerator>,
    parent_minutes_id: &str,
    mut doc: TopicDoc,
  ) -> Result<Self> {
    let parent = lookup
      .find_by_id(parent_minutes_id)
      .ok_or_else(|| Error::MinutesNotFound(parent_minutes_id.to_owned()))?;

    if doc.id.is_none() {
      doc.id = Some(ids.new_id());
    }

    Ok(Self { doc, parent, ids })
  }

  /// The topic's id. Always present after construction.
  pub fn id(&self) -> &str { self.doc.id.as_deref().unwrap_or_default() }

  pub fn subject(&self) -> &str { &self.doc.subject }

  pub fn is_open(&self) -> bool { self.doc.is_open }

  /// The live underlying document — a shared reference, not a copy.
  pub fn document(&self) -> &TopicDoc { &self.doc }

  /// The back-reference established at construction; reference-equal to the
  /// handle the lookup returned.
  pub fn parent(&self) -> &Arc<dyn ParentMinutes> { &self.parent }

  /// Current ordered sequence of raw info-item documents.
  pub fn info_items(&self) -> &[InfoItemDoc] { &self.doc.info_items }

  /// Flip the topic's own open/closed flag. Calling twice restores the
  /// original state.
  pub fn toggle_state(&mut self) { self.doc.is_open = !self.doc.is_open; }

  /// Insert-or-update by id.
  ///
  /// An item whose id matches an existing entry replaces that entry at its
  /// original position — including an in-place change of kind. Anything else
  /// is appended; a missing id is assigned from the identity source and a
  /// missing creation timestamp is stamped.
  pub fn upsert_info_item(&mut self, mut item: InfoItemDoc) {
    let existing = item
      .id
      .as_deref()
      .and_then(|id| find_item_index(id, &self.doc.info_items));

    match existing {
      Some(i) => self.doc.info_items[i] = item,
      None => {
        if item.id.is_none() {
          item.id = Some(self.ids.new_id());
        }
        if item.created_at.is_none() {
          item.created_at = Some(Utc::now());
        }
        self.doc.info_items.push(item);
      }
    }
  }

  /// Look up an info item by id. A miss is an expected steady state (another
  /// editor may have removed the item) and yields `None`, never an error.
  pub fn find_info_item(&self, id: &str) -> Option<InfoItem<'_>> {
    find_item_index(id, &self.doc.info_items)
      .map(|i| InfoItem::new(&self.doc.info_items[i]))
  }

  /// Remove the info item with the given id; no-op when the id is absent.
  pub fn remove_info_item(&mut self, id: &str) {
    if let Some(i) = find_item_index(id, &self.doc.info_items) {
      self.doc.info_items.remove(i);
    }
  }

  /// Prune the topic for the finalized minutes: keep only open action items.
  ///
  /// One-way and destructive — discussion notes and closed action items are
  /// gone from this document afterwards. Relative order of the survivors is
  /// preserved.
  pub fn tailor(&mut self) {
    self
      .doc
      .info_items
      .retain(|item| matches!(item.kind, InfoItemKind::Action { is_open: true }));
  }

  /// Hand the current document to the parent's upsert capability, exactly
  /// once. Failures propagate unchanged; reporting them to a user is the
  /// caller's concern.
  pub fn save(&self) -> Result<()> { self.parent.upsert_topic(&self.doc) }

  pub fn has_open_action_item(&self) -> bool {
    Self::doc_has_open_action_item(&self.doc)
  }

  /// True iff the document holds at least one open action item; false for an
  /// empty sequence.
  pub fn doc_has_open_action_item(doc: &TopicDoc) -> bool {
    doc
      .info_items
      .iter()
      .any(|item| matches!(item.kind, InfoItemKind::Action { is_open: true }))
  }

  /// Zero-based position of the topic document with the given id inside
  /// `docs`, or `None` when absent. Pure function, no side effects.
  pub fn find_topic_index(id: &str, docs: &[TopicDoc]) -> Option<usize> {
    docs.iter().position(|d| d.id.as_deref() == Some(id))
  }
}

fn find_item_index(id: &str, items: &[InfoItemDoc]) -> Option<usize> {
  items.iter().position(|item| item.id.as_deref() == Some(id))
}
