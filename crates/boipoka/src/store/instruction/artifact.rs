#![allow(missing_docs, clippy::missing_docs_in_private_items)]
//! Study-artifact intents: flashcards, page summaries, and text highlights.
//!
//! Artifact content comes from external generators; these intents only
//! manage the storage lifecycle of already-formed entities. Duplicate ids
//! are a caller contract: inserts are not validated against existing ids.

use super::*;

/// Appends a flashcard to a chapter's collection (insertion order kept).
pub struct AddFlashcard {
  key:       ChapterKey,
  flashcard: Flashcard,
}

impl AddFlashcard {
  pub fn new(book_id: &str, chapter_id: &str, flashcard: Flashcard) -> Result<Self> {
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, flashcard })
  }
}

impl StoreInstruction for AddFlashcard {
  type Output = ();

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    document.flashcards.entry(self.key.clone()).or_default().push(self.flashcard.clone());
    Ok(())
  }
}

/// Removes the first flashcard matching the id; no-op if absent.
pub struct RemoveFlashcard {
  key: ChapterKey,
  id:  String,
}

impl RemoveFlashcard {
  pub fn new(book_id: &str, chapter_id: &str, id: &str) -> Result<Self> {
    if id.is_empty() {
      return Err(BoipokaError::EmptyId("flashcard"));
    }
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, id: id.to_string() })
  }
}

impl StoreInstruction for RemoveFlashcard {
  type Output = bool;

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    if let Some(cards) = document.flashcards.get_mut(&self.key) {
      if let Some(index) = cards.iter().position(|card| card.id == self.id) {
        cards.remove(index);
        return Ok(true);
      }
    }
    Ok(false)
  }
}

/// Adds a page summary, replacing any existing summary for the same page.
///
/// This is how the at-most-one-summary-per-page invariant is enforced:
/// replace semantics, not in-place update. Returns whether an existing
/// summary was replaced.
pub struct AddPageSummary {
  key:     ChapterKey,
  summary: PageSummary,
}

impl AddPageSummary {
  pub fn new(book_id: &str, chapter_id: &str, summary: PageSummary) -> Result<Self> {
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, summary })
  }
}

impl StoreInstruction for AddPageSummary {
  type Output = bool;

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    let summaries = document.page_summaries.entry(self.key.clone()).or_default();
    let existing = summaries.iter().position(|summary| summary.page == self.summary.page);
    if let Some(index) = existing {
      summaries.remove(index);
    }
    summaries.push(self.summary.clone());
    Ok(existing.is_some())
  }
}

/// Appends a text highlight to a chapter's collection.
pub struct AddTextHighlight {
  key:       ChapterKey,
  highlight: TextHighlight,
}

impl AddTextHighlight {
  pub fn new(book_id: &str, chapter_id: &str, highlight: TextHighlight) -> Result<Self> {
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, highlight })
  }
}

impl StoreInstruction for AddTextHighlight {
  type Output = ();

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    document.text_highlights.entry(self.key.clone()).or_default().push(self.highlight.clone());
    Ok(())
  }
}

/// Removes the first text highlight matching the id; no-op if absent.
pub struct RemoveTextHighlight {
  key: ChapterKey,
  id:  String,
}

impl RemoveTextHighlight {
  pub fn new(book_id: &str, chapter_id: &str, id: &str) -> Result<Self> {
    if id.is_empty() {
      return Err(BoipokaError::EmptyId("text highlight"));
    }
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, id: id.to_string() })
  }
}

impl StoreInstruction for RemoveTextHighlight {
  type Output = bool;

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    if let Some(highlights) = document.text_highlights.get_mut(&self.key) {
      if let Some(index) = highlights.iter().position(|highlight| highlight.id == self.id) {
        highlights.remove(index);
        return Ok(true);
      }
    }
    Ok(false)
  }
}
