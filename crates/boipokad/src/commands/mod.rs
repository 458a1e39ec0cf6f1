use super::*;

pub mod bookmark;
pub mod cards;
pub mod clear;
pub mod export;
pub mod init;
pub mod progress;
pub mod read;
pub mod resume;

pub use bookmark::bookmark;
pub use cards::{cards, CardCommands};
pub use clear::clear;
pub use export::export;
pub use init::init;
pub use progress::progress;
pub use read::read;
pub use resume::resume;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Initialize the reading state database
  Init,

  /// Show reading progress, optionally restricted to one book
  Progress {
    /// Book identifier to restrict the listing to
    book: Option<String>,
  },

  /// Show where to resume a chapter
  Resume {
    /// Book identifier, e.g. "physics-9-10"
    book: String,

    /// Chapter identifier within the book, e.g. "ch2"
    chapter: String,
  },

  /// Record that a page of a chapter was viewed
  Read {
    /// Book identifier
    book: String,

    /// Chapter identifier within the book
    chapter: String,

    /// Page number that was viewed (pages are numbered from 1)
    page: u32,
  },

  /// Toggle a bookmark on a page
  Bookmark {
    /// Book identifier
    book: String,

    /// Chapter identifier within the book
    chapter: String,

    /// Page number to bookmark or un-bookmark
    page: u32,
  },

  /// Manage a chapter's flashcards
  Cards {
    /// Book identifier
    book: String,

    /// Chapter identifier within the book
    chapter: String,

    /// The flashcard operation to perform
    #[command(subcommand)]
    cmd: CardCommands,
  },

  /// Clear a chapter's reading session after confirmation
  Clear {
    /// Book identifier
    book: String,

    /// Chapter identifier within the book
    chapter: String,
  },

  /// Print the full state document as JSON
  Export,
}

/// Formats cumulative reading seconds as a compact human duration.
pub(crate) fn format_reading_time(seconds: u64) -> String {
  if seconds < 60 {
    format!("{seconds}s")
  } else {
    format!("{}m {}s", seconds / 60, seconds % 60)
  }
}
