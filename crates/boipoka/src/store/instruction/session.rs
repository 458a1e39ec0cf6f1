//! Reading-session intents: page views, time ticks, toggles, and clearing.

use super::*;

/// Records that the reader viewed a page of a chapter.
///
/// Sets the chapter's resume pointer and advances the session's high-water
/// mark; the session is created on the first view. Revisiting an earlier
/// page updates the resume pointer but never lowers recorded progress.
pub struct PageView {
  /// Chapter being read.
  key:  ChapterKey,
  /// Page that was viewed.
  page: u32,
}

impl PageView {
  /// Builds the intent, validating the identifiers and the page number.
  pub fn new(book_id: &str, chapter_id: &str, page: u32) -> Result<Self> {
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, page: validated_page(page)? })
  }
}

impl StoreInstruction for PageView {
  type Output = u32;

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    document.last_read_pages.insert(self.key.clone(), self.page);
    Ok(document.ensure_session(&self.key, self.page).note_page_view(self.page))
  }
}

/// Attributes elapsed reading time to a chapter's session.
///
/// Time can only be attributed to a chapter that was actually visited: if
/// no session exists yet this is a no-op returning `None`, not an error.
pub struct ReadingTick {
  /// Chapter being read.
  key:     ChapterKey,
  /// Seconds to add to the cumulative reading time.
  seconds: u64,
}

impl ReadingTick {
  /// Builds the intent, validating the identifiers.
  pub fn new(book_id: &str, chapter_id: &str, seconds: u64) -> Result<Self> {
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, seconds })
  }
}

impl StoreInstruction for ReadingTick {
  type Output = Option<u64>;

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    Ok(
      document
        .reading_sessions
        .get_mut(&self.key)
        .map(|session| session.accumulate(self.seconds)),
    )
  }
}

/// Toggles a bookmark on a page.
///
/// Creates the session first if the chapter was never visited, seeded with
/// the triggering page. Toggling twice restores the prior bookmark set.
pub struct ToggleBookmark {
  /// Chapter the bookmark belongs to.
  key:  ChapterKey,
  /// Page to bookmark or un-bookmark.
  page: u32,
}

impl ToggleBookmark {
  /// Builds the intent, validating the identifiers and the page number.
  pub fn new(book_id: &str, chapter_id: &str, page: u32) -> Result<Self> {
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, page: validated_page(page)? })
  }
}

impl StoreInstruction for ToggleBookmark {
  type Output = bool;

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    Ok(document.ensure_session(&self.key, self.page).toggle_bookmark(self.page))
  }
}

/// Toggles a page-level highlight marker.
///
/// Distinct from [`AddTextHighlight`]: this marks a whole page as
/// highlighted rather than storing a text selection. Same toggle semantics
/// as [`ToggleBookmark`].
pub struct TogglePageHighlight {
  /// Chapter the marker belongs to.
  key:  ChapterKey,
  /// Page to mark or unmark.
  page: u32,
}

impl TogglePageHighlight {
  /// Builds the intent, validating the identifiers and the page number.
  pub fn new(book_id: &str, chapter_id: &str, page: u32) -> Result<Self> {
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)?, page: validated_page(page)? })
  }
}

impl StoreInstruction for TogglePageHighlight {
  type Output = bool;

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    Ok(document.ensure_session(&self.key, self.page).toggle_highlighted_page(self.page))
  }
}

/// Deletes a chapter's reading session and resume pointer.
///
/// Irreversible; there is no soft delete. Study artifacts for the chapter
/// are unaffected. Returns whether a session existed.
pub struct ClearSession {
  /// Chapter whose session is cleared.
  key: ChapterKey,
}

impl ClearSession {
  /// Builds the intent, validating the identifiers.
  pub fn new(book_id: &str, chapter_id: &str) -> Result<Self> {
    Ok(Self { key: ChapterKey::new(book_id, chapter_id)? })
  }
}

impl StoreInstruction for ClearSession {
  type Output = bool;

  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output> {
    document.last_read_pages.remove(&self.key);
    Ok(document.reading_sessions.remove(&self.key).is_some())
  }
}
