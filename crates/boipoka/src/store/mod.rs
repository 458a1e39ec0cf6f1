//! The reading-state container: hydration, commits, and the durable mirror.
//!
//! A [`Store`] owns the in-memory [`StateDocument`] and is the only mutation
//! surface over it. Mutations arrive as typed instructions (see
//! [`instruction`]) and are applied synchronously; after each successful
//! commit a snapshot of the document is queued for the background mirror
//! task, which writes it to the [`StorageProvider`] in commit order.
//!
//! Hydration and readiness form a two-state machine. The awaited future of
//! [`Store::open`] *is* the hydrating state: it reads the persisted blob and
//! runs the repair pass of [`migration`]. The constructed handle *is* the
//! ready state, so no operation can observe a half-hydrated store.
//!
//! Mirror writes are fire-and-forget. A failed write is logged and retried
//! at the provider's discretion on the next commit; it never rolls back the
//! in-memory state, which remains the session's source of truth.

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use super::*;
use crate::{
  document::{ChapterKey, Flashcard, PageSummary, ReadingSession, StateDocument, TextHighlight},
  storage::StorageProvider,
};

pub mod instruction;
pub mod migration;

pub use self::instruction::*;

/// Storage key under which the state document is persisted.
pub const DOCUMENT_KEY: &str = "bookReader";

/// Commands consumed by the background mirror task.
enum MirrorCommand {
  /// Write this serialized document snapshot to durable storage.
  Write(Vec<u8>),
  /// Acknowledge once every previously queued write has completed.
  Flush(oneshot::Sender<()>),
}

/// The reading-state container.
///
/// Holds the hydrated state document and the sending half of the mirror
/// channel. Components that need reading state receive a reference to this
/// store; there is no ambient global instance.
pub struct Store {
  /// The in-memory state document, authoritative for the session.
  document: StateDocument,
  /// Queue feeding the background mirror task.
  mirror:   mpsc::UnboundedSender<MirrorCommand>,
}

impl Store {
  /// Hydrates a store from the given provider.
  ///
  /// Reads the persisted blob under [`DOCUMENT_KEY`]; an absent blob yields
  /// an all-empty document, a present one is repaired before it becomes
  /// visible (see [`migration::repair`]). An unreadable blob is treated the
  /// same as an absent one, favoring availability over strict validation.
  pub async fn open(provider: Arc<dyn StorageProvider>) -> Result<Self> {
    let document = match provider.read(DOCUMENT_KEY).await? {
      Some(blob) => match serde_json::from_slice::<Value>(&blob) {
        Ok(value) => migration::repair(value),
        Err(error) => {
          warn!("persisted state was unreadable, starting empty: {}", error);
          StateDocument::default()
        },
      },
      None => StateDocument::default(),
    };
    debug!(
      "hydrated state document with {} reading session(s)",
      document.reading_sessions.len()
    );

    let (sender, receiver) = mpsc::unbounded_channel();
    tokio::spawn(mirror_task(provider, receiver));
    Ok(Self { document, mirror: sender })
  }

  /// Applies an instruction and queues the committed state for mirroring.
  ///
  /// The state transition is synchronous and runs to completion before this
  /// method returns; the durable write happens later, off the critical
  /// path. On a validation error the document is untouched and nothing is
  /// queued.
  pub fn commit<I: StoreInstruction>(&mut self, instruction: &I) -> Result<I::Output> {
    let output = instruction.apply(&mut self.document)?;
    self.enqueue_mirror();
    Ok(output)
  }

  /// Waits until every commit queued so far has been written durably.
  ///
  /// Commits never block on the mirror; call this at points where
  /// durability matters, such as process exit.
  pub async fn flush(&self) -> Result<()> {
    let (ack, done) = oneshot::channel();
    self.mirror.send(MirrorCommand::Flush(ack)).map_err(|_| BoipokaError::MirrorStopped)?;
    done.await.map_err(|_| BoipokaError::MirrorStopped)
  }

  /// Queues a snapshot of the current document on the mirror channel.
  fn enqueue_mirror(&self) {
    match serde_json::to_vec(&self.document) {
      Ok(blob) =>
        if self.mirror.send(MirrorCommand::Write(blob)).is_err() {
          warn!("state mirror task stopped; committed state is no longer mirrored");
        },
      Err(error) => warn!("failed to serialize state document for mirroring: {}", error),
    }
  }

  /// The page to resume from for this chapter, if any was recorded.
  pub fn resume_point(&self, key: &ChapterKey) -> Option<u32> {
    self.document.last_read_pages.get(key).copied()
  }

  /// The reading session for this chapter, if the chapter was ever visited.
  pub fn session(&self, key: &ChapterKey) -> Option<&ReadingSession> {
    self.document.reading_sessions.get(key)
  }

  /// All reading sessions, in key order.
  pub fn sessions(&self) -> impl Iterator<Item = (&ChapterKey, &ReadingSession)> {
    self.document.reading_sessions.iter()
  }

  /// The chapter's flashcards in insertion order; empty if none exist.
  pub fn flashcards(&self, key: &ChapterKey) -> &[Flashcard] {
    self.document.flashcards.get(key).map(Vec::as_slice).unwrap_or(&[])
  }

  /// The chapter's page summaries; empty if none exist.
  pub fn page_summaries(&self, key: &ChapterKey) -> &[PageSummary] {
    self.document.page_summaries.get(key).map(Vec::as_slice).unwrap_or(&[])
  }

  /// The summary for a specific page of the chapter, if one exists.
  pub fn summary_for_page(&self, key: &ChapterKey, page: u32) -> Option<&PageSummary> {
    self.page_summaries(key).iter().find(|summary| summary.page == page)
  }

  /// The chapter's text highlights in insertion order; empty if none exist.
  pub fn text_highlights(&self, key: &ChapterKey) -> &[TextHighlight] {
    self.document.text_highlights.get(key).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Read access to the whole document, e.g. for export.
  pub fn document(&self) -> &StateDocument { &self.document }
}

/// Drains the mirror queue, writing snapshots in commit order.
///
/// Runs until the owning [`Store`] is dropped. Write failures are logged
/// and do not stop the task; later commits will try again with a newer
/// snapshot.
async fn mirror_task(
  provider: Arc<dyn StorageProvider>,
  mut commands: mpsc::UnboundedReceiver<MirrorCommand>,
) {
  while let Some(command) = commands.recv().await {
    match command {
      MirrorCommand::Write(blob) =>
        if let Err(error) = provider.write(DOCUMENT_KEY, &blob).await {
          warn!("durable mirror write failed; in-memory state stays authoritative: {}", error);
        },
      MirrorCommand::Flush(ack) => {
        let _ = ack.send(());
      },
    }
  }
  trace!("state mirror task finished");
}
