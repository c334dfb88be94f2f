//! Error types for the native capability backend.
//!
//! None of these ever reach the caller of
//! [`Detector::supports_color`](crate::Detector::supports_color); the curses
//! probe downgrades them to [`Support::Unknown`](crate::Support::Unknown).

use std::path::PathBuf;

/// The native terminal-capability library could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No terminfo database directory exists in any searched location.
    #[error("no terminfo database found (searched {})", format_dirs(searched))]
    NoDatabase {
        /// The directories that were checked.
        searched: Vec<PathBuf>,
    },
}

/// A screen session failed.
#[derive(Debug, thiserror::Error)]
pub enum CursesError {
    /// The compiled terminal entry could not be read or parsed.
    #[error("invalid terminal entry {}: {reason}", path.display())]
    Entry {
        /// Path of the compiled entry.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// The session was queried after it was closed.
    #[error("screen session already closed")]
    Closed,

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// A specialized `Result` type for screen sessions.
pub type Result<T> = std::result::Result<T, CursesError>;

fn format_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "no locations".to_string();
    }
    dirs.iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
