//! # Song Document Types
//!
//! Structures produced by the parser and consumed by the renderer.
//!
//! ## Type Hierarchy
//! ```text
//! Song
//!   ├── id: String (repository path without extension)
//!   ├── SongMetadata (title, artist, key)
//!   └── Vec<Line>
//!         ├── Section { name }
//!         ├── Chords { chords }        whole-line chord string
//!         ├── Lyric { words }          chords aligned to words
//!         │     └── Vec<Word> { text, chord, joined }
//!         └── Blank
//! ```
//!
//! Chord strings are stored exactly as written. Nothing here checks that they
//! are valid chords; the transposer passes anything it doesn't recognize through.

use serde::{Deserialize, Serialize};

use crate::transpose::transpose;

/// Frontmatter fields of a song document
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SongMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Key the song is written in, e.g. "G" or "Bbm"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// A lyric word, or a fragment of one, with the chord sung on it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<String>,
    /// Continues the previous word with no space between them ("A" + "mazing")
    #[serde(skip_serializing_if = "is_false")]
    pub joined: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Word {
    pub fn new(text: impl Into<String>, chord: Option<&str>) -> Self {
        Self {
            text: text.into(),
            chord: chord.map(str::to_string),
            joined: false,
        }
    }

    /// Mark this fragment as part of the word before it.
    pub fn joined(mut self) -> Self {
        self.joined = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Line {
    /// Section heading such as "Verse 1" or "Chorus"
    Section { name: String },
    /// Free-form chord line, e.g. an intro "G D/F# Em C"
    Chords { chords: String },
    Lyric { words: Vec<Word> },
    Blank,
}

/// The chords of one line, in either of the two shapes songs use.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordLine {
    /// One string holding several whitespace-separated chords
    Free(String),
    /// One chord per lyric word; empty strings mark words without a chord
    Aligned(Vec<String>),
}

impl Line {
    /// Chords carried by this line, if any.
    pub fn chord_line(&self) -> Option<ChordLine> {
        match self {
            Line::Chords { chords } => Some(ChordLine::Free(chords.clone())),
            Line::Lyric { words } if words.iter().any(|w| w.chord.is_some()) => {
                Some(ChordLine::Aligned(
                    words
                        .iter()
                        .map(|w| w.chord.clone().unwrap_or_default())
                        .collect(),
                ))
            }
            _ => None,
        }
    }

    pub fn transposed(&self, steps: i32) -> Line {
        match self {
            Line::Chords { chords } => Line::Chords {
                chords: transpose(chords, steps),
            },
            Line::Lyric { words } => Line::Lyric {
                words: words
                    .iter()
                    .map(|w| Word {
                        text: w.text.clone(),
                        chord: w.chord.as_deref().map(|c| transpose(c, steps)),
                        joined: w.joined,
                    })
                    .collect(),
            },
            other => other.clone(),
        }
    }
}

/// A parsed song document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    pub id: String,
    pub metadata: SongMetadata,
    pub lines: Vec<Line>,
}

impl Song {
    pub fn summary(&self) -> SongSummary {
        SongSummary {
            id: self.id.clone(),
            title: self.metadata.title.clone(),
            artist: self.metadata.artist.clone(),
            key: self.metadata.key.clone(),
        }
    }

    /// Copy of the song with every chord, and the key, moved by `steps`.
    pub fn transposed(&self, steps: i32) -> Song {
        Song {
            id: self.id.clone(),
            metadata: SongMetadata {
                title: self.metadata.title.clone(),
                artist: self.metadata.artist.clone(),
                key: self.metadata.key.as_deref().map(|k| transpose(k, steps)),
            },
            lines: self.lines.iter().map(|line| line.transposed(steps)).collect(),
        }
    }
}

/// Song list entry: metadata without the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}
