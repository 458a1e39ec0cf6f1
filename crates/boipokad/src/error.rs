//! Error types for the boipokad CLI.

use thiserror::Error;

/// Error type alias used for the `boipokad` crate.
pub type Result<T> = core::result::Result<T, BoipokadError>;

/// Errors that can occur while running CLI commands.
#[derive(Error, Debug)]
pub enum BoipokadError {
  /// An error from the underlying `boipoka` library.
  #[error(transparent)]
  Boipoka(#[from] boipoka::error::BoipokaError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt failed.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Serializing the state document for export failed.
  #[error(transparent)]
  Serde(#[from] serde_json::Error),
}
