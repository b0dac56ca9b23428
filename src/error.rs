//! Error types for loading preferences.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or configuring preferences.
///
/// Malformed lines are never an error; they are skipped during load.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The input stream could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A preferences file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A platform name that is not one of linux, windows, macos or other.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// A CLI setting with a value the CLI does not understand.
    #[error("invalid value for {key}: {value}")]
    InvalidSetting { key: String, value: String },
}

/// Convenience type alias for preference operations.
pub type Result<T> = std::result::Result<T, PrefsError>;
