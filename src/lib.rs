//! # chordsheet
//!
//! Chord-and-lyric song sheets with live transposition.
//!
//! ## Pipeline
//! 1. A [`SongRepository`] supplies song sources (a directory, the bundled library, or both)
//! 2. [`parse_song()`] turns a source into a [`Song`]
//! 3. [`render_song()`] lays it out with every chord passed through [`transpose()`]
//!
//! [`SearchIndex`] filters song listings and has nothing to do with transposition.
//!
//! ```rust
//! use chordsheet::render_source;
//!
//! let source = "---\ntitle: Demo\nkey: G\n---\n! G D/F# Em";
//! let sheet = render_source("demo", source, 2)?;
//! assert_eq!(sheet, "Demo\nKey: A\n\nA E/G# F#m\n");
//! # Ok::<(), chordsheet::SongError>(())
//! ```

pub mod ast;
pub mod error;
pub mod library;
pub mod parser;
pub mod render;
pub mod search;
pub mod transpose;

pub use ast::*;
pub use error::*;
pub use library::{DirectoryRepository, FallbackRepository, MemoryRepository, SongRepository};
pub use parser::parse_song;
pub use render::{render_line, render_song};
pub use search::SearchIndex;
pub use transpose::{interval, transpose, transpose_chord_line, Accidental, ChordToken, PitchClass};

/// Parse a song source and render it transposed by `steps` semitones.
pub fn render_source(id: &str, source: &str, steps: i32) -> Result<String> {
    let song = parse_song(id, source)?;
    Ok(render_song(&song, steps))
}
