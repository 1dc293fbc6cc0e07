//! # Parser Module
//!
//! Parses song documents into [`Song`] values.
//!
//! ## Document Format
//! An optional YAML frontmatter block between `---` markers, then the body:
//!
//! ```text
//! ---
//! title: Amazing Grace
//! artist: Traditional
//! key: G
//! ---
//! # Verse 1
//! ! G G7 C G
//! A[G]mazing [G7]grace how [C]sweet the [G]sound
//! ```
//!
//! ## Body Lines
//! - Empty line -> `Line::Blank`
//! - `# Name` -> `Line::Section`
//! - `! chords...` -> `Line::Chords`, the rest of the line kept as one chord string
//! - Anything else -> `Line::Lyric`. A `[Chord]` marker attaches the chord to the
//!   word that follows it. A marker in the middle of a word splits it into fragments
//!   marked `joined`, and a marker followed by a space gives a word with empty text
//!
//! Chord text inside markers is not validated.
//!
//! ## Entry Point
//! `parse_song(id: &str, source: &str) -> Result<Song>`
//!
//! ## Example
//! ```rust
//! use chordsheet::{parse_song, Line};
//!
//! let source = "---\ntitle: Demo\n---\n[G]Hello [D]there";
//! let song = parse_song("demo", source).unwrap();
//! assert_eq!(song.metadata.title, "Demo");
//! assert!(matches!(&song.lines[0], Line::Lyric { words } if words.len() == 2));
//! ```

use crate::ast::{Line, Song, SongMetadata, Word};
use crate::error::{Result, SongError};

const FRONTMATTER_MARKER: &str = "---";

/// Parse a song document. `id` is recorded on the song as-is.
pub fn parse_song(id: &str, source: &str) -> Result<Song> {
    let mut parser = Parser::new(source);
    let metadata = parser.parse_frontmatter()?;
    let lines = parser.parse_body()?;
    Ok(Song {
        id: id.to_string(),
        metadata,
        lines,
    })
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            position: 0,
        }
    }

    /// 1-based line number of the line at `index`
    fn line_number(index: usize) -> usize {
        index + 1
    }

    fn parse_frontmatter(&mut self) -> Result<SongMetadata> {
        let start = match self
            .lines
            .iter()
            .position(|line| !line.trim().is_empty())
        {
            Some(index) if self.lines[index].trim() == FRONTMATTER_MARKER => index,
            _ => return Err(SongError::MetadataError("title is required".to_string())),
        };

        let end = self.lines[start + 1..]
            .iter()
            .position(|line| line.trim() == FRONTMATTER_MARKER)
            .map(|offset| start + 1 + offset)
            .ok_or_else(|| SongError::ParseError {
                line: Self::line_number(start),
                column: 1,
                message: "Unterminated frontmatter: expected a closing ---".to_string(),
            })?;

        let content = self.lines[start + 1..end].join("\n");
        self.position = end + 1;

        let metadata = if content.trim().is_empty() {
            SongMetadata::default()
        } else {
            serde_yaml::from_str::<SongMetadata>(&content)
                .map_err(|e| SongError::MetadataError(e.to_string()))?
        };

        if metadata.title.trim().is_empty() {
            return Err(SongError::MetadataError("title is required".to_string()));
        }

        Ok(metadata)
    }

    fn parse_body(&mut self) -> Result<Vec<Line>> {
        let mut lines = Vec::new();

        // Blank lines straight after the frontmatter carry no layout
        while self
            .lines
            .get(self.position)
            .map_or(false, |line| line.trim().is_empty())
        {
            self.position += 1;
        }

        for index in self.position..self.lines.len() {
            lines.push(self.parse_line(index)?);
        }

        while lines.last() == Some(&Line::Blank) {
            lines.pop();
        }

        Ok(lines)
    }

    fn parse_line(&self, index: usize) -> Result<Line> {
        let raw = self.lines[index];
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Ok(Line::Blank);
        }
        if let Some(name) = trimmed.strip_prefix('#') {
            return Ok(Line::Section {
                name: name.trim().to_string(),
            });
        }
        if let Some(chords) = trimmed.strip_prefix('!') {
            return Ok(Line::Chords {
                chords: chords.trim().to_string(),
            });
        }

        let words = parse_lyric(raw, Self::line_number(index))?;
        Ok(Line::Lyric { words })
    }
}

/// Split a lyric line into words, attaching `[Chord]` markers to the word after them.
fn parse_lyric(raw: &str, line: usize) -> Result<Vec<Word>> {
    let mut words = Vec::new();
    let mut text = String::new();
    let mut pending_chord: Option<String> = None;
    // Whether the fragment being collected continues the previous word
    let mut joined = false;
    let mut chars = raw.chars().enumerate();

    let flush = |words: &mut Vec<Word>, text: &mut String, chord: &mut Option<String>, joined: bool| {
        if !text.is_empty() || chord.is_some() {
            words.push(Word {
                text: std::mem::take(text),
                chord: chord.take(),
                joined,
            });
        }
    };

    while let Some((i, c)) = chars.next() {
        match c {
            '[' => {
                // A marker inside a word starts a new fragment of that same word
                let continues = !text.is_empty() || (joined && pending_chord.is_some());
                flush(&mut words, &mut text, &mut pending_chord, joined);
                joined = continues;

                let mut chord = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    chord.push(c);
                }

                if !closed {
                    return Err(SongError::ParseError {
                        line,
                        column: i + 1,
                        message: "Unterminated chord marker: expected ]".to_string(),
                    });
                }
                let chord = chord.trim();
                if chord.is_empty() {
                    return Err(SongError::ParseError {
                        line,
                        column: i + 1,
                        message: "Empty chord marker".to_string(),
                    });
                }
                pending_chord = Some(chord.to_string());
            }
            ']' => {
                return Err(SongError::ParseError {
                    line,
                    column: i + 1,
                    message: "Unexpected ] without an opening [".to_string(),
                });
            }
            c if c.is_whitespace() => {
                flush(&mut words, &mut text, &mut pending_chord, joined);
                joined = false;
            }
            c => text.push(c),
        }
    }
    flush(&mut words, &mut text, &mut pending_chord, joined);

    Ok(words)
}
