//! Errors surfaced by the editor core.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong around the buffer.
///
/// None of these are fatal: the buffer is left untouched on every path.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Import of a file that is not markdown.
    #[error("Please select a markdown (.md) file")]
    UnsupportedFileType { name: String },

    /// The import file could not be read.
    #[error("Error reading file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file could not be written.
    #[error("Error writing file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persistence backend is unavailable or rejected a write.
    #[error("storage unavailable: {0}")]
    Persistence(String),
}

impl EditorError {
    /// Whether this failure should be shown to the user.
    ///
    /// Persistence problems are logged and otherwise ignored.
    pub const fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Persistence(_))
    }
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_matches_prompt() {
        let err = EditorError::UnsupportedFileType {
            name: "notes.txt".to_string(),
        };
        assert_eq!(err.to_string(), "Please select a markdown (.md) file");
        assert!(err.is_user_visible());
    }

    #[test]
    fn test_read_error_carries_underlying_message() {
        let err = EditorError::Read {
            path: PathBuf::from("gone.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "Error reading file: no such file");
    }

    #[test]
    fn test_persistence_errors_stay_quiet() {
        let err = EditorError::Persistence("quota exceeded".to_string());
        assert!(!err.is_user_visible());
    }
}
