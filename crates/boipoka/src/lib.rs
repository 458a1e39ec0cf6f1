//! Reading-progress and study-artifact management library.
//!
//! `boipoka` is the state container behind a book reader, providing:
//!
//! - Per-book, per-chapter reading sessions (resume point, reading time,
//!   bookmarks, highlighted pages)
//! - Study artifacts: flashcards, page summaries, and text highlights
//! - Durable persistence with schema repair for state written by older
//!   versions of the application
//!
//! # Features
//!
//! - **Typed intents**: every mutation is a [`StoreInstruction`] applied as a
//!   synchronous, pure transition over the state document
//! - **Lazy buckets**: operations never require a chapter to be initialized
//!   first; missing buckets are materialized on demand
//! - **High-water progress**: furthest-page tracking is monotonic regardless
//!   of navigation order
//! - **Best-effort mirror**: committed state is mirrored to durable storage
//!   outside the critical path; in-memory state stays authoritative
//!
//! # Getting Started
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use boipoka::{
//!   prelude::*,
//!   storage::SqliteStorage,
//!   store::{PageView, Store, ToggleBookmark},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   // Hydrate the store from durable storage (repairing legacy state).
//!   let provider = Arc::new(SqliteStorage::open(SqliteStorage::default_path()).await?);
//!   let mut store = Store::open(provider).await?;
//!
//!   // Record that the reader reached page 8 of chapter 2.
//!   PageView::new("physics-9-10", "ch2", 8)?.execute(&mut store)?;
//!
//!   // Bookmark the page the reader is on.
//!   ToggleBookmark::new("physics-9-10", "ch2", 8)?.execute(&mut store)?;
//!
//!   // Make sure the mirror has drained before the process exits.
//!   store.flush().await?;
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`document`]: the state document and its entity types
//! - [`store`]: the state container, instruction set, and migration pass
//! - [`storage`]: durable storage providers
//! - [`error`]: error types
//! - [`prelude`]: common traits and types for ergonomic imports
//!
//! # Design Philosophy
//!
//! This library emphasizes:
//! - An explicit, injected state container rather than an ambient singleton
//! - A typed operation set as the only mutation surface
//! - Structural repair on load, so operations never re-check field presence
//! - Fire-and-forget durability that never blocks or rolls back a commit

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::BTreeMap,
  fmt::{self, Display},
  path::{Path, PathBuf},
  str::FromStr,
  sync::Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

pub mod document;
pub mod error;
pub mod storage;
pub mod store;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// This module provides a convenient way to import frequently used traits
/// and types with a single glob import:
///
/// ```no_run
/// use boipoka::{prelude::*, storage::MemoryStorage, store::Store};
///
/// async fn example() -> Result<(), BoipokaError> {
///   let provider = std::sync::Arc::new(MemoryStorage::new());
///   let store = Store::open(provider).await?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{error::BoipokaError, storage::StorageProvider, store::StoreInstruction};
}
