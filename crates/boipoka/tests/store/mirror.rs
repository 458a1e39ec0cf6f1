use boipoka::{
  document::ChapterKey,
  prelude::*,
  store::{PageView, ReadingTick, DOCUMENT_KEY},
};
use tracing_test::traced_test;

use crate::{create_test_store, TestResult};

fn ch2() -> ChapterKey { "physics-9-10/ch2".parse().unwrap() }

#[traced_test]
#[tokio::test]
async fn write_failure_never_rolls_back_memory_state() -> TestResult<()> {
  let (mut store, provider) = create_test_store().await;

  provider.set_fail_writes(true);
  PageView::new("physics-9-10", "ch2", 5)?.execute(&mut store)?;
  store.flush().await?;

  // The mirror write failed, the commit did not.
  assert!(provider.snapshot(DOCUMENT_KEY).is_none());
  assert_eq!(store.session(&ch2()).unwrap().total_pages_read, 5);

  // The next successful commit mirrors the full current state.
  provider.set_fail_writes(false);
  PageView::new("physics-9-10", "ch2", 6)?.execute(&mut store)?;
  store.flush().await?;

  let mirrored: serde_json::Value = serde_json::from_slice(&provider.snapshot(DOCUMENT_KEY).unwrap())?;
  assert_eq!(mirrored["readingSessions"]["physics-9-10/ch2"]["totalPagesRead"], 6);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn snapshots_drain_in_commit_order() -> TestResult<()> {
  let (mut store, provider) = create_test_store().await;

  PageView::new("physics-9-10", "ch2", 1)?.execute(&mut store)?;
  ReadingTick::new("physics-9-10", "ch2", 30)?.execute(&mut store)?;
  PageView::new("physics-9-10", "ch2", 9)?.execute(&mut store)?;
  store.flush().await?;

  // After the queue drains, durable state equals the latest commit.
  let mirrored: serde_json::Value = serde_json::from_slice(&provider.snapshot(DOCUMENT_KEY).unwrap())?;
  assert_eq!(mirrored["readingSessions"]["physics-9-10/ch2"]["totalPagesRead"], 9);
  assert_eq!(mirrored["readingSessions"]["physics-9-10/ch2"]["readingTime"], 30);
  assert_eq!(mirrored["lastReadPages"]["physics-9-10/ch2"], 9);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn flush_with_no_commits_is_immediate() -> TestResult<()> {
  let (store, provider) = create_test_store().await;

  store.flush().await?;
  store.flush().await?;
  assert!(provider.snapshot(DOCUMENT_KEY).is_none());
  Ok(())
}
