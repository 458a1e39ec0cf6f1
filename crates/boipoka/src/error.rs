//! Error types for the boipoka library.
//!
//! This module provides a comprehensive error type that encompasses all
//! possible failure modes when working with the reading-state store:
//! - Input validation on intents
//! - Serialization of the persisted state document
//! - Durable storage operations
//!
//! # Examples
//!
//! ```
//! use boipoka::{error::BoipokaError, store::PageView};
//!
//! // Malformed intents are rejected synchronously, before any state changes.
//! match PageView::new("physics-9-10", "ch2", 0) {
//!   Err(BoipokaError::InvalidPage) => println!("pages are numbered from 1"),
//!   Err(e) => println!("other error: {}", e),
//!   Ok(_) => println!("valid intent"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`boipoka`](crate) crate.
pub type Result<T> = core::result::Result<T, BoipokaError>;

/// Errors that can occur when working with the boipoka library.
///
/// This enum provides a comprehensive set of error cases that can occur when:
/// - Constructing intents from user-supplied identifiers
/// - Serializing the state document for the durable mirror
/// - Reading from or writing to the storage provider
///
/// Operations on an absent chapter are deliberately *not* errors: write
/// intents materialize the missing bucket and reads act as no-ops, so the
/// caller never has to pre-create a chapter's state.
#[derive(Error, Debug)]
pub enum BoipokaError {
  /// A chapter key or one of its components was malformed.
  ///
  /// This can occur when:
  /// - A book or chapter identifier is empty
  /// - A book identifier contains the `/` separator
  /// - A persisted key string has no separator at all
  ///
  /// The string parameter carries the offending input for debugging.
  #[error("Invalid chapter key: {0}")]
  InvalidKey(String),

  /// A page number of zero was supplied.
  ///
  /// Pages are numbered from 1; zero is the representation of a malformed
  /// page intent. Negative pages are unrepresentable by type.
  #[error("Page numbers start at 1")]
  InvalidPage,

  /// An empty id was supplied to an operation that removes by id.
  ///
  /// The parameter names the artifact kind (for example `"flashcard"`) so
  /// the message identifies which intent was malformed.
  #[error("An empty id cannot identify a {0}")]
  EmptyId(&'static str),

  /// The background mirror task is no longer running.
  ///
  /// This is only surfaced by [`Store::flush`](crate::store::Store::flush);
  /// commits themselves never fail on mirror trouble, they log and keep the
  /// in-memory state authoritative.
  #[error("State mirror task is no longer running")]
  MirrorStopped,

  /// Serializing or deserializing the state document failed.
  #[error(transparent)]
  Serde(#[from] serde_json::Error),

  /// A SQLite operation failed.
  ///
  /// This wraps errors from the `rusqlite` crate, covering:
  /// - SQL syntax errors
  /// - Constraint violations
  /// - Type conversion errors
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// An async SQLite operation failed.
  ///
  /// This wraps errors from the `tokio-rusqlite` crate, covering
  /// async-specific failures in storage operations.
  #[error(transparent)]
  AsyncSqlite(#[from] tokio_rusqlite::Error),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - Creating the database file or its parent directory fails
  /// - Permission errors occur
  #[error(transparent)]
  Path(#[from] std::io::Error),
}
