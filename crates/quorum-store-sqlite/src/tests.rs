//! Integration tests for `SqliteMinutesStore` against an in-memory database.

use std::sync::Arc;

use quorum_core::{
  info_item::InfoItemDoc,
  store::{MinutesLookup, ParentMinutes as _, UuidIds},
  topic::{Topic, TopicDoc},
};

use crate::SqliteMinutesStore;

fn store() -> SqliteMinutesStore {
  SqliteMinutesStore::open_in_memory().expect("in-memory store")
}

fn topic_doc(id: &str, subject: &str, open: bool) -> TopicDoc {
  TopicDoc {
    id: Some(id.into()),
    is_open: open,
    ..TopicDoc::new(subject)
  }
}

// ─── Minutes ─────────────────────────────────────────────────────────────────

#[test]
fn add_and_get_minutes() {
  let s = store();

  let minutes = s.add_minutes("series-1").unwrap();
  assert_eq!(minutes.series_id, "series-1");
  assert!(minutes.topics.is_empty());

  let fetched = s.get_minutes(&minutes.id).unwrap().expect("row exists");
  assert_eq!(fetched.id, minutes.id);
  assert_eq!(fetched.series_id, "series-1");
  assert!(fetched.topics.is_empty());
}

#[test]
fn get_minutes_missing_returns_none() {
  let s = store();
  assert!(s.get_minutes("no-such-minutes").unwrap().is_none());
}

#[test]
fn lookup_missing_minutes_returns_none() {
  let s = store();
  assert!(s.find_by_id("no-such-minutes").is_none());
}

#[test]
fn lookup_returns_handle_for_existing_minutes() {
  let s = store();
  let minutes = s.add_minutes("series-1").unwrap();

  let handle = s.find_by_id(&minutes.id).expect("row exists");
  assert_eq!(handle.id(), minutes.id);
}

// ─── Topic upsert ────────────────────────────────────────────────────────────

#[test]
fn upsert_appends_then_updates_in_place() {
  let s = store();
  let minutes = s.add_minutes("series-1").unwrap();

  s.upsert_topic(&minutes.id, &topic_doc("t1", "first", true)).unwrap();
  s.upsert_topic(&minutes.id, &topic_doc("t2", "second", true)).unwrap();
  s.upsert_topic(&minutes.id, &topic_doc("t1", "first, revised", false))
    .unwrap();

  let topics = s.get_minutes(&minutes.id).unwrap().unwrap().topics;
  assert_eq!(topics.len(), 2);
  assert_eq!(topics[0].id.as_deref(), Some("t1"));
  assert_eq!(topics[0].subject, "first, revised");
  assert!(!topics[0].is_open);
  assert_eq!(topics[1].id.as_deref(), Some("t2"));
}

#[test]
fn upsert_into_missing_minutes_errors() {
  let s = store();
  let err = s
    .upsert_topic("no-such-minutes", &topic_doc("t1", "orphan", true))
    .unwrap_err();
  assert!(matches!(err, crate::Error::MinutesNotFound(_)));
}

#[test]
fn upsert_preserves_embedded_info_items() {
  let s = store();
  let minutes = s.add_minutes("series-1").unwrap();

  let mut doc = topic_doc("t1", "with items", true);
  doc.info_items.push(InfoItemDoc::action("chase the vendor", true));
  doc.info_items.push(InfoItemDoc::discussion("raw notes"));
  s.upsert_topic(&minutes.id, &doc).unwrap();

  let stored = s.get_minutes(&minutes.id).unwrap().unwrap().topics;
  assert_eq!(stored[0].info_items.len(), 2);
  assert!(Topic::doc_has_open_action_item(&stored[0]));
  assert_eq!(stored[0], doc);
}

// ─── Finder ──────────────────────────────────────────────────────────────────

#[test]
fn finder_filters_by_series_and_open_state() {
  let s = store();
  let m1 = s.add_minutes("series-1").unwrap();
  let m2 = s.add_minutes("series-2").unwrap();

  s.upsert_topic(&m1.id, &topic_doc("t1", "open one", true)).unwrap();
  s.upsert_topic(&m1.id, &topic_doc("t2", "closed one", false)).unwrap();
  s.upsert_topic(&m2.id, &topic_doc("t3", "other series", true)).unwrap();

  let all = s.all_topics_of_series("series-1").unwrap();
  assert_eq!(all.len(), 2);

  let open = s.open_topics_of_series("series-1").unwrap();
  assert_eq!(open.len(), 1);
  assert_eq!(open[0].id.as_deref(), Some("t1"));
  assert!(open[0].is_open);
}

#[test]
fn finder_sees_state_changes_through_reupsert() {
  let s = store();
  let minutes = s.add_minutes("series-1").unwrap();

  s.upsert_topic(&minutes.id, &topic_doc("t1", "will close", true)).unwrap();
  assert_eq!(s.open_topics_of_series("series-1").unwrap().len(), 1);

  s.upsert_topic(&minutes.id, &topic_doc("t1", "will close", false)).unwrap();
  assert!(s.open_topics_of_series("series-1").unwrap().is_empty());
  assert_eq!(s.all_topics_of_series("series-1").unwrap().len(), 1);
}

// ─── End to end with the core model ──────────────────────────────────────────

#[test]
fn topic_saves_through_the_store() {
  let s = store();
  let minutes = s.add_minutes("series-1").unwrap();

  let mut topic = Topic::new(
    &s,
    Arc::new(UuidIds),
    &minutes.id,
    TopicDoc::new("quarterly review"),
  )
  .unwrap();

  topic.upsert_info_item(InfoItemDoc::action("send the follow-up", true));
  topic.upsert_info_item(InfoItemDoc::action("archive the deck", false));
  topic.upsert_info_item(InfoItemDoc::discussion("raw notes"));
  topic.save().unwrap();

  let stored = s.get_minutes(&minutes.id).unwrap().unwrap().topics;
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0].subject, "quarterly review");
  assert_eq!(stored[0].info_items.len(), 3);

  // Tailoring then saving again replaces the stored copy in place.
  topic.tailor();
  topic.save().unwrap();

  let stored = s.get_minutes(&minutes.id).unwrap().unwrap().topics;
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0].info_items.len(), 1);
  assert_eq!(stored[0].info_items[0].subject, "send the follow-up");
  assert!(Topic::doc_has_open_action_item(&stored[0]));
}

#[test]
fn topic_construction_fails_for_unknown_minutes() {
  let s = store();
  let err =
    Topic::new(&s, Arc::new(UuidIds), "no-such-minutes", TopicDoc::new("x"))
      .unwrap_err();
  assert!(matches!(err, quorum_core::Error::MinutesNotFound(_)));
}
