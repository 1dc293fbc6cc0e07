//! # Error Types
//!
//! Errors raised while loading, parsing, and listing songs.
//!
//! The transposition engine itself never fails: unrecognized chords are passed
//! through unchanged. Everything that touches song documents or the filesystem
//! reports through [`SongError`].
//!
//! ## Usage
//! ```rust
//! use chordsheet::{parse_song, SongError};
//!
//! match parse_song("demo", "---\ntitle: Demo\n---\n[G]Hello") {
//!     Ok(song) => println!("{}", song.metadata.title),
//!     Err(SongError::ParseError { line, column, message }) => {
//!         eprintln!("Parse error at {}:{}: {}", line, column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SongError>;

#[derive(Error, Debug)]
pub enum SongError {
    /// Syntax error in a song body or its frontmatter markers.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SongError;
    /// let err = SongError::ParseError {
    ///     line: 5,
    ///     column: 10,
    ///     message: "Unterminated chord marker".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 5, column 10: Unterminated chord marker");
    /// ```
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Invalid YAML frontmatter, or a required field is missing.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SongError;
    /// let err = SongError::MetadataError("title must not be empty".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: title must not be empty");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    /// No song with the requested id exists in the repository.
    #[error("Song not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
