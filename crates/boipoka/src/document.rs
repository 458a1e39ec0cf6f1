//! Core state-document and entity types for reading progress tracking.
//!
//! This module provides the fundamental types for the reader's durable
//! state. It handles:
//!
//! - Chapter-keyed record maps (the shape every sub-store shares)
//! - Reading sessions with bookmarks and page-level highlights
//! - Study artifacts: flashcards, page summaries, and text highlights
//!
//! All maps are keyed by [`ChapterKey`], the `bookId/chapterId` composite
//! identifier, and serialize with the camelCase field names of the persisted
//! state document so that state written by earlier application versions
//! remains readable.
//!
//! # Examples
//!
//! ```
//! use boipoka::document::ChapterKey;
//!
//! let key = ChapterKey::new("physics-9-10", "ch2")?;
//! assert_eq!(key.to_string(), "physics-9-10/ch2");
//!
//! // Keys round-trip through their string form.
//! let parsed: ChapterKey = "physics-9-10/ch2".parse()?;
//! assert_eq!(parsed, key);
//! # Ok::<(), boipoka::error::BoipokaError>(())
//! ```

use super::*;

/// Separator between the book and chapter components of a [`ChapterKey`].
const KEY_SEPARATOR: char = '/';

/// Composite identifier for all per-chapter state.
///
/// A `ChapterKey` is the pair of a book identifier and a chapter identifier.
/// It is a derived lookup key, not a stored entity: it always reconstructs
/// from its components and serializes as the `"bookId/chapterId"` string
/// used for the map keys of the persisted document.
///
/// Book identifiers must be non-empty and must not contain `/`; chapter
/// identifiers must be non-empty (and may contain `/`, which still
/// round-trips because the first separator always belongs to the book).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChapterKey {
  /// Identifier of the book.
  book_id:    String,
  /// Identifier of the chapter within the book.
  chapter_id: String,
}

impl ChapterKey {
  /// Creates a key from its components, validating both.
  pub fn new(book_id: impl Into<String>, chapter_id: impl Into<String>) -> Result<Self> {
    let book_id = book_id.into();
    let chapter_id = chapter_id.into();
    if book_id.is_empty() || chapter_id.is_empty() {
      return Err(BoipokaError::InvalidKey(format!("{book_id}{KEY_SEPARATOR}{chapter_id}")));
    }
    if book_id.contains(KEY_SEPARATOR) {
      return Err(BoipokaError::InvalidKey(book_id));
    }
    Ok(Self { book_id, chapter_id })
  }

  /// The book component of the key.
  pub fn book_id(&self) -> &str { &self.book_id }

  /// The chapter component of the key.
  pub fn chapter_id(&self) -> &str { &self.chapter_id }
}

impl Display for ChapterKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{KEY_SEPARATOR}{}", self.book_id, self.chapter_id)
  }
}

impl FromStr for ChapterKey {
  type Err = BoipokaError;

  fn from_str(s: &str) -> Result<Self> {
    match s.split_once(KEY_SEPARATOR) {
      Some((book_id, chapter_id)) => Self::new(book_id, chapter_id),
      None => Err(BoipokaError::InvalidKey(s.to_string())),
    }
  }
}

impl Serialize for ChapterKey {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for ChapterKey {
  fn deserialize<D: serde::Deserializer<'de>>(
    deserializer: D,
  ) -> core::result::Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

/// Per-chapter reading progress.
///
/// One session exists per [`ChapterKey`] once the reader has viewed a page
/// of that chapter. `total_pages_read` is a high-water mark: it only ever
/// increases, so revisiting an earlier page never reduces recorded progress.
/// `bookmarks` and `highlighted_pages` are sorted ascending and free of
/// duplicates; both invariants are maintained by the mutation methods here
/// and restored by the repair pass for persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSession {
  /// Timestamp of the most recent page-turn event.
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub last_read_at:      DateTime<Utc>,
  /// Highest page index reached; monotonic non-decreasing.
  pub total_pages_read:  u32,
  /// Cumulative seconds spent reading this chapter.
  pub reading_time:      u64,
  /// Bookmarked page numbers, sorted ascending, no duplicates.
  pub bookmarks:         Vec<u32>,
  /// Page-level highlight markers, sorted ascending, no duplicates.
  pub highlighted_pages: Vec<u32>,
}

impl ReadingSession {
  /// A fresh session seeded by the page that triggered its creation.
  pub(crate) fn starting_at(page: u32) -> Self {
    Self {
      last_read_at:      Utc::now(),
      total_pages_read:  page,
      reading_time:      0,
      bookmarks:         Vec::new(),
      highlighted_pages: Vec::new(),
    }
  }

  /// Registers a page view, advancing the high-water mark if needed.
  ///
  /// Returns the resulting `total_pages_read`.
  pub(crate) fn note_page_view(&mut self, page: u32) -> u32 {
    self.last_read_at = Utc::now();
    self.total_pages_read = self.total_pages_read.max(page);
    self.total_pages_read
  }

  /// Adds seconds to the cumulative reading time, returning the new total.
  pub(crate) fn accumulate(&mut self, seconds: u64) -> u64 {
    self.reading_time += seconds;
    self.reading_time
  }

  /// Toggles a bookmark, returning whether the page is now bookmarked.
  pub(crate) fn toggle_bookmark(&mut self, page: u32) -> bool {
    toggle_page(&mut self.bookmarks, page)
  }

  /// Toggles a page-level highlight marker, returning whether it is now set.
  pub(crate) fn toggle_highlighted_page(&mut self, page: u32) -> bool {
    toggle_page(&mut self.highlighted_pages, page)
  }

  /// Whether the given page is bookmarked.
  pub fn is_bookmarked(&self, page: u32) -> bool { self.bookmarks.binary_search(&page).is_ok() }
}

/// Inserts the page into the sorted set, or removes it if already present.
///
/// Returns whether the page is present afterwards.
fn toggle_page(pages: &mut Vec<u32>, page: u32) -> bool {
  match pages.binary_search(&page) {
    Ok(index) => {
      pages.remove(index);
      false
    },
    Err(index) => {
      pages.insert(index, page);
      true
    },
  }
}

/// A question/answer study card tied to a source page.
///
/// Flashcards are produced in batches by an external generator and handed to
/// the store already formed. Ids are caller-assigned; uniqueness within a
/// chapter is a caller contract and is not validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
  /// Caller-assigned unique id.
  pub id:         String,
  /// Prompt text.
  pub front:      String,
  /// Answer text.
  pub back:       String,
  /// Page the card was generated from.
  pub page:       u32,
  /// Creation timestamp.
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub created_at: DateTime<Utc>,
}

/// A generated summary of a single page.
///
/// At most one summary exists per (chapter, page); adding a new one replaces
/// any existing summary for that page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
  /// Page the summary covers.
  pub page:       u32,
  /// Summary text.
  pub summary:    String,
  /// Ordered key points extracted from the page.
  pub key_points: Vec<String>,
  /// Creation timestamp.
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub created_at: DateTime<Utc>,
}

/// Position of one highlighted span on the rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRect {
  /// Horizontal offset of the span.
  pub x:      f64,
  /// Vertical offset of the span.
  pub y:      f64,
  /// Width of the span.
  pub width:  f64,
  /// Height of the span.
  pub height: f64,
}

/// A user-selected text excerpt with its on-page geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextHighlight {
  /// Caller-assigned unique id.
  pub id:         String,
  /// The highlighted excerpt.
  pub text:       String,
  /// Page the selection was made on.
  pub page:       u32,
  /// Rectangles covering the highlighted spans, in selection order.
  pub rects:      Vec<HighlightRect>,
  /// Creation timestamp.
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub created_at: DateTime<Utc>,
  /// Optional display color.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color:      Option<String>,
}

/// The complete persisted-state document: five chapter-keyed sub-stores.
///
/// `last_read_pages` is the "where to resume" pointer and is kept in sync
/// with, but stored separately from, each session's high-water mark. The
/// artifact collections preserve insertion order.
///
/// A default document is all-empty; the repair pass in
/// [`store::migration`](crate::store::migration) guarantees every loaded
/// document is structurally complete, so operations here never re-check
/// field presence below the key level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDocument {
  /// Most recently viewed page per chapter.
  pub(crate) last_read_pages:  BTreeMap<ChapterKey, u32>,
  /// Reading progress per chapter.
  pub(crate) reading_sessions: BTreeMap<ChapterKey, ReadingSession>,
  /// Flashcards per chapter, in insertion order.
  pub(crate) flashcards:       BTreeMap<ChapterKey, Vec<Flashcard>>,
  /// Page summaries per chapter; at most one entry per page.
  pub(crate) page_summaries:   BTreeMap<ChapterKey, Vec<PageSummary>>,
  /// Text highlights per chapter, in insertion order.
  pub(crate) text_highlights:  BTreeMap<ChapterKey, Vec<TextHighlight>>,
}

impl StateDocument {
  /// Returns the session for `key`, materializing a fresh one seeded with
  /// `page` if the chapter has never been visited.
  ///
  /// Centralizing the create-if-missing step here keeps the per-intent code
  /// free of duplicated existence checks.
  pub(crate) fn ensure_session(&mut self, key: &ChapterKey, page: u32) -> &mut ReadingSession {
    self.reading_sessions.entry(key.clone()).or_insert_with(|| ReadingSession::starting_at(page))
  }
}
