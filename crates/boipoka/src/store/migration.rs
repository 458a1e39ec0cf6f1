//! Schema repair for persisted state written by older application versions.
//!
//! The persisted document's schema has grown over the product's life:
//! early versions had no flashcards or text highlights, and sessions gained
//! their bookmark and highlight sets later. [`repair`] normalizes whatever
//! was loaded into a structurally complete [`StateDocument`] in one pass,
//! so no downstream operation ever re-checks field presence.
//!
//! The policy for unrecognized shapes is default-fill, never reject:
//! a non-object blob becomes the empty document, malformed keys and
//! entries are dropped with a warning, and sorted-set invariants are
//! restored on the way in. Availability wins over strict validation.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::*;

/// Repairs a loaded document value into a structurally complete document.
///
/// Runs exactly once per hydration, before the store becomes visible.
/// Unit-testable in isolation against hand-built legacy fixtures.
pub fn repair(value: Value) -> StateDocument {
  let mut root = match value {
    Value::Object(map) => map,
    _ => {
      warn!("persisted state was not an object, starting empty");
      Map::new()
    },
  };

  StateDocument {
    last_read_pages:  page_map(root.remove("lastReadPages")),
    reading_sessions: session_map(root.remove("readingSessions")),
    flashcards:       artifact_map(root.remove("flashcards"), "flashcard"),
    page_summaries:   artifact_map(root.remove("pageSummaries"), "page summary"),
    text_highlights:  artifact_map(root.remove("textHighlights"), "text highlight"),
  }
}

/// Unwraps a sub-store into its key/value entries.
///
/// A missing sub-store is the common legacy case and backfills silently;
/// a present but non-object one is reset with a warning.
fn keyed_object(value: Option<Value>, store: &str) -> Map<String, Value> {
  match value {
    None => {
      trace!("backfilling missing {store} sub-store");
      Map::new()
    },
    Some(Value::Object(map)) => map,
    Some(_) => {
      warn!("{store} sub-store had an unexpected shape, resetting");
      Map::new()
    },
  }
}

/// Repairs the `lastReadPages` map, dropping malformed keys and pages.
fn page_map(value: Option<Value>) -> BTreeMap<ChapterKey, u32> {
  let mut pages = BTreeMap::new();
  for (raw_key, raw_page) in keyed_object(value, "last-read-pages") {
    let key = match raw_key.parse::<ChapterKey>() {
      Ok(key) => key,
      Err(_) => {
        warn!("dropping last-read page under malformed key {raw_key:?}");
        continue;
      },
    };
    match raw_page.as_u64().and_then(|page| u32::try_from(page).ok()) {
      Some(page) if page >= 1 => {
        pages.insert(key, page);
      },
      _ => warn!("dropping malformed last-read page for {key}"),
    }
  }
  pages
}

/// Repairs the `readingSessions` map, backfilling missing session fields.
fn session_map(value: Option<Value>) -> BTreeMap<ChapterKey, ReadingSession> {
  let mut sessions = BTreeMap::new();
  for (raw_key, raw_session) in keyed_object(value, "reading-sessions") {
    match raw_key.parse::<ChapterKey>() {
      Ok(key) => {
        sessions.insert(key, repair_session(raw_session));
      },
      Err(_) => warn!("dropping reading session under malformed key {raw_key:?}"),
    }
  }
  sessions
}

/// Rebuilds one session, substituting the default for every absent or
/// malformed field: empty sets, zero counters, the current time for
/// `lastReadAt`.
fn repair_session(value: Value) -> ReadingSession {
  let mut fields = match value {
    Value::Object(map) => map,
    _ => {
      warn!("reading session had an unexpected shape, resetting");
      Map::new()
    },
  };

  ReadingSession {
    last_read_at:      fields
      .remove("lastReadAt")
      .and_then(|v| v.as_i64())
      .and_then(DateTime::from_timestamp_millis)
      .unwrap_or_else(Utc::now),
    total_pages_read:  fields
      .remove("totalPagesRead")
      .and_then(|v| v.as_u64())
      .and_then(|page| u32::try_from(page).ok())
      .unwrap_or(0),
    reading_time:      fields.remove("readingTime").and_then(|v| v.as_u64()).unwrap_or(0),
    bookmarks:         page_set(fields.remove("bookmarks")),
    highlighted_pages: page_set(fields.remove("highlightedPages")),
  }
}

/// Rebuilds a page set: numeric entries only, sorted ascending, deduplicated.
fn page_set(value: Option<Value>) -> Vec<u32> {
  let mut pages: Vec<u32> = match value {
    Some(Value::Array(entries)) => entries
      .iter()
      .filter_map(Value::as_u64)
      .filter_map(|page| u32::try_from(page).ok())
      .filter(|&page| page >= 1)
      .collect(),
    _ => Vec::new(),
  };
  pages.sort_unstable();
  pages.dedup();
  pages
}

/// Repairs one artifact sub-store, dropping entries that no longer parse.
fn artifact_map<T: DeserializeOwned>(
  value: Option<Value>,
  kind: &str,
) -> BTreeMap<ChapterKey, Vec<T>> {
  let mut collections = BTreeMap::new();
  for (raw_key, raw_entries) in keyed_object(value, kind) {
    let key = match raw_key.parse::<ChapterKey>() {
      Ok(key) => key,
      Err(_) => {
        warn!("dropping {kind} collection under malformed key {raw_key:?}");
        continue;
      },
    };
    let entries = match raw_entries {
      Value::Array(entries) => entries,
      _ => {
        warn!("{kind} collection for {key} had an unexpected shape, resetting");
        Vec::new()
      },
    };
    let mut collection = Vec::with_capacity(entries.len());
    for entry in entries {
      match serde_json::from_value::<T>(entry) {
        Ok(artifact) => collection.push(artifact),
        Err(error) => warn!("dropping malformed {kind} entry for {key}: {}", error),
      }
    }
    collections.insert(key, collection);
  }
  collections
}
