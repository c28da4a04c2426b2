//! Info items — the nested records inside a topic.
//!
//! An info item is either a plain discussion note or an action item with an
//! open/closed lifecycle. On the wire the two are told apart by the presence
//! of the `isOpen` field; in Rust the distinction is an explicit union so
//! matches stay exhaustive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The two kinds of info item.
///
/// Flattened into [`InfoItemDoc`], so an action item serializes as
/// `{"isOpen": <bool>}` and a discussion note carries no extra field.
/// Variant order matters for deserialization: `Action` is tried first, so a
/// document with `isOpen` always comes back as an action item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoItemKind {
  #[serde(rename_all = "camelCase")]
  Action { is_open: bool },
  Discussion {},
}

impl InfoItemKind {
  pub fn is_action(&self) -> bool { matches!(self, Self::Action { .. }) }

  /// The open/closed flag; `None` for discussion notes.
  pub fn open_flag(&self) -> Option<bool> {
    match self {
      Self::Action { is_open } => Some(*is_open),
      Self::Discussion {} => None,
    }
  }
}

impl Default for InfoItemKind {
  fn default() -> Self { Self::Discussion {} }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// One entry in a topic's ordered `infoItems` sequence. No independent
/// storage — the owning topic document embeds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoItemDoc {
  /// Unique within the owning topic; assigned by the topic on insert.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:         Option<String>,
  pub subject:    String,
  /// Stamped by the topic on insert when absent.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(flatten)]
  pub kind:       InfoItemKind,
}

impl InfoItemDoc {
  /// A plain discussion note with no id or timestamp yet.
  pub fn discussion(subject: impl Into<String>) -> Self {
    Self { subject: subject.into(), ..Self::default() }
  }

  /// An action item with no id or timestamp yet.
  pub fn action(subject: impl Into<String>, is_open: bool) -> Self {
    Self {
      subject: subject.into(),
      kind: InfoItemKind::Action { is_open },
      ..Self::default()
    }
  }
}

// ─── Handle ──────────────────────────────────────────────────────────────────

/// Read handle over one info-item document, returned by
/// [`Topic::find_info_item`](crate::topic::Topic::find_info_item).
#[derive(Debug, Clone, Copy)]
pub struct InfoItem<'a> {
  doc: &'a InfoItemDoc,
}

impl<'a> InfoItem<'a> {
  pub(crate) fn new(doc: &'a InfoItemDoc) -> Self { Self { doc } }

  pub fn document(&self) -> &'a InfoItemDoc { self.doc }

  pub fn id(&self) -> Option<&'a str> { self.doc.id.as_deref() }

  pub fn subject(&self) -> &'a str { &self.doc.subject }

  pub fn kind(&self) -> &'a InfoItemKind { &self.doc.kind }

  pub fn is_action_item(&self) -> bool { self.doc.kind.is_action() }

  /// The open/closed flag; `None` for discussion notes.
  pub fn is_open(&self) -> Option<bool> { self.doc.kind.open_flag() }
}
