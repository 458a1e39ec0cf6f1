//! Durable storage providers for the persisted state document.
//!
//! The store treats durability as a pluggable collaborator: anything that
//! can read and write an opaque blob under a key can back it. This module
//! provides the [`StorageProvider`] contract and two implementations:
//!
//! - [`SqliteStorage`]: the durable provider used in production, a single
//!   upsert table in a SQLite file
//! - [`MemoryStorage`]: an ephemeral in-process provider, used where no
//!   durable storage is available and throughout the test suite
//!
//! Providers are deliberately oblivious to the document's schema; parsing
//! and repair happen in the store's hydration path.

use std::{
  collections::HashMap,
  sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
  },
};

use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;

use super::*;

/// Contract for a durable key-value blob store.
///
/// `read` distinguishes "no blob was ever written" (`None`) from an empty
/// blob; `write` acknowledges only that the blob was accepted. The store
/// calls `write` from a background task, so implementations must be
/// `Send + Sync`.
#[async_trait]
pub trait StorageProvider: Send + Sync {
  /// Reads the blob stored under `key`, if any.
  async fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

  /// Writes `blob` under `key`, replacing any previous value.
  async fn write(&self, key: &str, blob: &[u8]) -> Result<()>;
}

/// SQLite-backed storage provider.
///
/// Documents live in a single `documents` table keyed by name. Writes are
/// upserts, so the provider never grows beyond one row per document.
///
/// # Examples
///
/// ```no_run
/// # use boipoka::storage::SqliteStorage;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Open in a specific location
/// let storage = SqliteStorage::open("reader.db").await?;
///
/// // Or use the default location
/// let storage = SqliteStorage::open(SqliteStorage::default_path()).await?;
/// # Ok(())
/// # }
/// ```
pub struct SqliteStorage {
  /// Async handle to the underlying SQLite connection.
  conn: Connection,
}

impl SqliteStorage {
  /// Opens an existing database or creates a new one at the specified path.
  ///
  /// Missing parent directories are created first, then the `documents`
  /// table is initialized if it does not exist yet.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    if let Some(parent) = path.as_ref().parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
      }
    }
    let conn = Connection::open(path.as_ref().to_path_buf()).await?;
    conn
      .call(|conn| {
        conn.execute_batch(
          "CREATE TABLE IF NOT EXISTS documents (
                        key        TEXT PRIMARY KEY,
                        blob       BLOB NOT NULL,
                        updated_at TEXT NOT NULL
                    )",
        )?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }

  /// Returns the default path for the reader state database.
  ///
  /// The path is constructed as follows:
  /// - On Unix: `~/.local/share/boipoka/boipoka.db`
  /// - On macOS: `~/Library/Application Support/boipoka/boipoka.db`
  /// - On Windows: `%APPDATA%\boipoka\boipoka.db`
  /// - Fallback: `./boipoka.db` in the current directory
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("boipoka").join("boipoka.db")
  }
}

#[async_trait]
impl StorageProvider for SqliteStorage {
  async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
    let key = key.to_string();
    let blob = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached("SELECT blob FROM documents WHERE key = ?1")?;
        Ok(stmt.query_row(params![key], |row| row.get::<_, Vec<u8>>(0)).optional()?)
      })
      .await?;
    Ok(blob)
  }

  async fn write(&self, key: &str, blob: &[u8]) -> Result<()> {
    let key = key.to_string();
    let blob = blob.to_vec();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "INSERT INTO documents (key, blob, updated_at)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET
                        blob = excluded.blob,
                        updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![key, blob, Utc::now().to_rfc3339()])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// In-memory storage provider.
///
/// Used as the fallback where no durable storage is available, and as the
/// provider of choice in tests. `set_fail_writes` turns every subsequent
/// write into an error so callers can exercise the store's behavior under
/// persistence failure.
#[derive(Default)]
pub struct MemoryStorage {
  /// Blobs held for the lifetime of the process.
  blobs:       Mutex<HashMap<String, Vec<u8>>>,
  /// When set, every write fails.
  fail_writes: AtomicBool,
}

impl MemoryStorage {
  /// Creates an empty in-memory provider.
  pub fn new() -> Self { Self::default() }

  /// Makes every subsequent `write` fail (or succeed again when `false`).
  pub fn set_fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst); }

  /// Returns a copy of the blob currently stored under `key`, if any.
  pub fn snapshot(&self, key: &str) -> Option<Vec<u8>> {
    self.blobs.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
  }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
  async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
    Ok(self.blobs.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
  }

  async fn write(&self, key: &str, blob: &[u8]) -> Result<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(BoipokaError::Path(std::io::Error::other("memory storage writes disabled")));
    }
    self.blobs.lock().unwrap_or_else(PoisonError::into_inner).insert(key.to_string(), blob.to_vec());
    Ok(())
  }
}
