use boipoka::{
  document::ChapterKey,
  error::BoipokaError,
  prelude::*,
  store::{ClearSession, PageView, ReadingTick, ToggleBookmark, TogglePageHighlight},
};
use tracing_test::traced_test;

use crate::{create_test_store, TestResult};

fn ch2() -> ChapterKey { "physics-9-10/ch2".parse().unwrap() }

/// Page-view and high-water mark behavior
mod page_views {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn high_water_mark_is_max_of_all_pages_seen() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    PageView::new("physics-9-10", "ch2", 5)?.execute(&mut store)?;
    PageView::new("physics-9-10", "ch2", 3)?.execute(&mut store)?;
    let high_water = PageView::new("physics-9-10", "ch2", 8)?.execute(&mut store)?;

    assert_eq!(high_water, 8);
    assert_eq!(store.session(&ch2()).unwrap().total_pages_read, 8);
    assert_eq!(store.resume_point(&ch2()), Some(8));
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn revisiting_an_earlier_page_moves_resume_point_only() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    PageView::new("physics-9-10", "ch2", 8)?.execute(&mut store)?;
    PageView::new("physics-9-10", "ch2", 3)?.execute(&mut store)?;

    // Resume pointer follows the reader; the high-water mark does not drop.
    assert_eq!(store.resume_point(&ch2()), Some(3));
    assert_eq!(store.session(&ch2()).unwrap().total_pages_read, 8);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn chapters_are_tracked_independently() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    PageView::new("physics-9-10", "ch2", 8)?.execute(&mut store)?;
    PageView::new("physics-9-10", "ch3", 2)?.execute(&mut store)?;
    PageView::new("math-9-10", "ch2", 4)?.execute(&mut store)?;

    assert_eq!(store.session(&ch2()).unwrap().total_pages_read, 8);
    let other: ChapterKey = "math-9-10/ch2".parse()?;
    assert_eq!(store.session(&other).unwrap().total_pages_read, 4);
    assert_eq!(store.sessions().count(), 3);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn page_zero_is_rejected_before_any_state_changes() -> TestResult<()> {
    let (store, _provider) = create_test_store().await;

    assert!(matches!(PageView::new("physics-9-10", "ch2", 0), Err(BoipokaError::InvalidPage)));
    assert!(matches!(PageView::new("", "ch2", 1), Err(BoipokaError::InvalidKey(_))));
    assert!(store.session(&ch2()).is_none());
    Ok(())
  }
}

/// Reading-time attribution
mod reading_time {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn time_accumulates_additively() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    PageView::new("physics-9-10", "ch2", 1)?.execute(&mut store)?;
    assert_eq!(ReadingTick::new("physics-9-10", "ch2", 30)?.execute(&mut store)?, Some(30));
    assert_eq!(ReadingTick::new("physics-9-10", "ch2", 45)?.execute(&mut store)?, Some(75));

    assert_eq!(store.session(&ch2()).unwrap().reading_time, 75);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn time_for_an_unvisited_chapter_is_dropped() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    // No session exists: the tick is a no-op, not an error.
    assert_eq!(ReadingTick::new("physics-9-10", "ch2", 30)?.execute(&mut store)?, None);
    assert!(store.session(&ch2()).is_none());
    Ok(())
  }
}

/// Bookmark and page-highlight toggles
mod toggles {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn toggle_sequence_keeps_set_sorted() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    ToggleBookmark::new("physics-9-10", "ch2", 3)?.execute(&mut store)?;
    ToggleBookmark::new("physics-9-10", "ch2", 7)?.execute(&mut store)?;
    ToggleBookmark::new("physics-9-10", "ch2", 3)?.execute(&mut store)?;

    assert_eq!(store.session(&ch2()).unwrap().bookmarks, vec![7]);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn double_toggle_is_a_no_op_pair() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    ToggleBookmark::new("physics-9-10", "ch2", 3)?.execute(&mut store)?;
    let before = store.session(&ch2()).unwrap().bookmarks.clone();

    assert!(ToggleBookmark::new("physics-9-10", "ch2", 9)?.execute(&mut store)?);
    assert!(!ToggleBookmark::new("physics-9-10", "ch2", 9)?.execute(&mut store)?);

    assert_eq!(store.session(&ch2()).unwrap().bookmarks, before);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn toggle_on_unvisited_chapter_creates_the_session() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    assert!(ToggleBookmark::new("physics-9-10", "ch2", 4)?.execute(&mut store)?);

    // The triggering page seeds the high-water mark.
    let session = store.session(&ch2()).unwrap();
    assert_eq!(session.total_pages_read, 4);
    assert_eq!(session.bookmarks, vec![4]);
    assert!(session.is_bookmarked(4));
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn page_highlights_are_independent_of_bookmarks() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    ToggleBookmark::new("physics-9-10", "ch2", 3)?.execute(&mut store)?;
    TogglePageHighlight::new("physics-9-10", "ch2", 5)?.execute(&mut store)?;

    let session = store.session(&ch2()).unwrap();
    assert_eq!(session.bookmarks, vec![3]);
    assert_eq!(session.highlighted_pages, vec![5]);
    Ok(())
  }
}

/// Clearing a session
mod clearing {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn clear_removes_session_and_resume_point() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    PageView::new("physics-9-10", "ch2", 8)?.execute(&mut store)?;
    assert!(ClearSession::new("physics-9-10", "ch2")?.execute(&mut store)?);

    assert!(store.session(&ch2()).is_none());
    assert!(store.resume_point(&ch2()).is_none());

    // Clearing an absent session reports that nothing existed.
    assert!(!ClearSession::new("physics-9-10", "ch2")?.execute(&mut store)?);
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn page_view_after_clear_starts_fresh() -> TestResult<()> {
    let (mut store, _provider) = create_test_store().await;

    PageView::new("physics-9-10", "ch2", 42)?.execute(&mut store)?;
    ClearSession::new("physics-9-10", "ch2")?.execute(&mut store)?;
    PageView::new("physics-9-10", "ch2", 2)?.execute(&mut store)?;

    // The pre-clear high-water mark must not leak into the new session.
    assert_eq!(store.session(&ch2()).unwrap().total_pages_read, 2);
    assert_eq!(store.resume_point(&ch2()), Some(2));
    Ok(())
  }
}
