//! Command line interface for the boipoka reading-progress store.
//!
//! This crate provides a CLI tool for inspecting and updating reading state
//! using the `boipoka` library. It supports operations like:
//! - Database initialization
//! - Recording page views and toggling bookmarks
//! - Flashcard management
//! - Progress inspection and state export
//!
//! # Usage
//!
//! ```bash
//! # Initialize the state database
//! boipokad init
//!
//! # Record that page 8 of a chapter was read
//! boipokad read physics-9-10 ch2 8
//!
//! # Toggle a bookmark
//! boipokad bookmark physics-9-10 ch2 8
//!
//! # Show reading progress across chapters
//! boipokad progress
//!
//! # Clear a chapter's session
//! boipokad clear physics-9-10 ch2
//! ```
//!
//! The CLI provides colored output and interactive confirmation for
//! destructive operations. It also supports various verbosity levels for
//! debugging through the `-v` flag.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use boipoka::{
  document::ChapterKey,
  prelude::*,
  storage::SqliteStorage,
  store::{ClearSession, PageView, Store, ToggleBookmark},
};
use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use tracing::trace;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "! ";
/// Branch character for tree structure
static TREE_BRANCH: &str = "├";
/// Continuation line for tree structure
static CONTINUE_PREFIX: &str = "│  ";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "CLI for the boipoka reading-progress store")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the state database file. If not specified, uses the default
  /// platform-specific data directory.
  #[arg(long, short, global = true)]
  path: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used (0-3)
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Entry point for the boipokad CLI application
///
/// Handles command line argument parsing, sets up logging, hydrates the
/// store from durable storage, executes the requested command, and drains
/// the durable mirror before exiting so no committed state is lost.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let path = cli.path.clone().unwrap_or_else(SqliteStorage::default_path);
  trace!("using reading state database at: {}", path.display());
  let provider = Arc::new(SqliteStorage::open(&path).await?);
  let mut store = Store::open(provider).await?;

  match cli.command {
    Commands::Init => init(&path).await,
    Commands::Progress { book } => progress(&store, book.as_deref()).await,
    Commands::Resume { book, chapter } => resume(&store, &book, &chapter).await,
    Commands::Read { book, chapter, page } => read(&mut store, &book, &chapter, page).await,
    Commands::Bookmark { book, chapter, page } =>
      bookmark(&mut store, &book, &chapter, page).await,
    Commands::Cards { book, chapter, cmd } => cards(&mut store, &book, &chapter, cmd).await,
    Commands::Clear { book, chapter } =>
      clear(&mut store, &book, &chapter, cli.accept_defaults).await,
    Commands::Export => export(&store).await,
  }?;

  // Mirror writes are fire-and-forget; drain them before the process exits.
  store.flush().await?;
  Ok(())
}
