use boipoka::{
  document::ChapterKey,
  prelude::*,
  store::{AddFlashcard, PageView},
};
use chrono::Utc;
use serde_json::json;
use tracing_test::traced_test;

use crate::{hydrate_from_blob, TestResult};

fn ch2() -> ChapterKey { "physics-9-10/ch2".parse().unwrap() }

#[traced_test]
#[tokio::test]
async fn blob_missing_flashcards_hydrates_usable() -> TestResult<()> {
  // State persisted before flashcards existed in the schema.
  let legacy = json!({
    "lastReadPages": { "physics-9-10/ch2": 5 },
    "readingSessions": {
      "physics-9-10/ch2": { "lastReadAt": 1_700_000_000_000_i64, "totalPagesRead": 5 }
    }
  });
  let (mut store, _provider) = hydrate_from_blob(&serde_json::to_vec(&legacy)?).await;

  // The sub-store is present and empty; adding needs no initialization call.
  assert!(store.flashcards(&ch2()).is_empty());
  let flashcard = boipoka::document::Flashcard {
    id:         "fc-1".to_string(),
    front:      "গতি কী?".to_string(),
    back:       "অবস্থানের পরিবর্তন".to_string(),
    page:       5,
    created_at: Utc::now(),
  };
  AddFlashcard::new("physics-9-10", "ch2", flashcard)?.execute(&mut store)?;
  assert_eq!(store.flashcards(&ch2()).len(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn legacy_session_fields_are_backfilled_through_hydration() -> TestResult<()> {
  let legacy = json!({
    "readingSessions": {
      "physics-9-10/ch2": { "totalPagesRead": 12 }
    }
  });
  let (mut store, _provider) = hydrate_from_blob(&serde_json::to_vec(&legacy)?).await;

  let session = store.session(&ch2()).unwrap();
  assert_eq!(session.total_pages_read, 12);
  assert_eq!(session.reading_time, 0);
  assert!(session.bookmarks.is_empty());
  assert!(session.highlighted_pages.is_empty());

  // The repaired session behaves like any other: progress keeps its
  // high-water semantics.
  PageView::new("physics-9-10", "ch2", 3)?.execute(&mut store)?;
  assert_eq!(store.session(&ch2()).unwrap().total_pages_read, 12);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn current_schema_round_trips_untouched() -> TestResult<()> {
  let full = json!({
    "lastReadPages": { "physics-9-10/ch2": 8 },
    "readingSessions": {
      "physics-9-10/ch2": {
        "lastReadAt": 1_700_000_000_000_i64,
        "totalPagesRead": 8,
        "readingTime": 540,
        "bookmarks": [3, 7],
        "highlightedPages": [5]
      }
    },
    "flashcards": {
      "physics-9-10/ch2": [{
        "id": "fc-1",
        "front": "গতি কী?",
        "back": "অবস্থানের পরিবর্তন",
        "page": 5,
        "createdAt": 1_700_000_000_000_i64
      }]
    },
    "pageSummaries": {
      "physics-9-10/ch2": [{
        "page": 5,
        "summary": "গতির সংজ্ঞা",
        "keyPoints": ["পরসঙ্গ কাঠামো"],
        "createdAt": 1_700_000_000_000_i64
      }]
    },
    "textHighlights": {
      "physics-9-10/ch2": [{
        "id": "hl-1",
        "text": "পরসঙ্গ কাঠামো",
        "page": 5,
        "rects": [{ "x": 10.0, "y": 20.0, "width": 120.0, "height": 16.0 }],
        "createdAt": 1_700_000_000_000_i64,
        "color": "#fde047"
      }]
    }
  });
  let (store, _provider) = hydrate_from_blob(&serde_json::to_vec(&full)?).await;

  let session = store.session(&ch2()).unwrap();
  assert_eq!(session.reading_time, 540);
  assert_eq!(session.bookmarks, vec![3, 7]);
  assert_eq!(store.flashcards(&ch2())[0].front, "গতি কী?");
  assert_eq!(store.page_summaries(&ch2())[0].key_points, vec!["পরসঙ্গ কাঠামো"]);
  assert_eq!(store.text_highlights(&ch2())[0].rects[0].width, 120.0);
  assert_eq!(store.resume_point(&ch2()), Some(8));
  Ok(())
}
