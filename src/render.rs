//! # Text Rendering
//!
//! Lays a song out as plain text with chords above the lyrics.
//!
//! ## Layout
//! - Lyric lines: each chord is transposed on its own and printed above the first
//!   letter of its word or word fragment. Lyrics print as written unless a chord would
//!   run into the one before it; then the lyric is pushed right, with spaces between
//!   words and hyphens inside a word
//! - Chord lines: the whole line is transposed in one call and printed as returned
//! - Sections print as `[Name]`
//!
//! ```rust
//! use chordsheet::{parse_song, render_song};
//!
//! let song = parse_song("demo", "---\ntitle: Demo\n---\n[G]Amazing [C]grace").unwrap();
//! let sheet = render_song(&song, 2);
//! assert!(sheet.ends_with("A       D\nAmazing grace\n"));
//! ```

use crate::ast::{Line, Song, Word};
use crate::transpose::transpose;

/// Render a whole song, every chord moved by `steps` semitones.
pub fn render_song(song: &Song, steps: i32) -> String {
    let mut out = String::new();

    out.push_str(&song.metadata.title);
    out.push('\n');
    if let Some(artist) = &song.metadata.artist {
        out.push_str(artist);
        out.push('\n');
    }
    if let Some(key) = &song.metadata.key {
        out.push_str("Key: ");
        out.push_str(&transpose(key, steps));
        out.push('\n');
    }

    if !song.lines.is_empty() {
        out.push('\n');
    }
    for line in &song.lines {
        out.push_str(&render_line(line, steps));
        out.push('\n');
    }

    out
}

/// Render one line. Lyric lines with chords produce two rows.
pub fn render_line(line: &Line, steps: i32) -> String {
    match line {
        Line::Section { name } => format!("[{}]", name),
        Line::Chords { chords } => transpose(chords, steps),
        Line::Lyric { words } => render_lyric(words, steps),
        Line::Blank => String::new(),
    }
}

fn render_lyric(words: &[Word], steps: i32) -> String {
    let mut chord_row = String::new();
    let mut lyric_row = String::new();

    for (i, word) in words.iter().enumerate() {
        let chord = word
            .chord
            .as_deref()
            .map(|c| transpose(c, steps))
            .unwrap_or_default();

        if !chord.is_empty() {
            // Keep one space after the previous chord
            let chord_end = width(&chord_row);
            let earliest = if chord_end == 0 { 0 } else { chord_end + 1 };
            let column = width(&lyric_row);
            if earliest > column {
                // Inside a word the gap is drawn as a hyphen so the word still reads as one
                let fill = if word.joined { '-' } else { ' ' };
                lyric_row.extend(std::iter::repeat(fill).take(earliest - column));
            }
            pad_to(&mut chord_row, width(&lyric_row));
            chord_row.push_str(&chord);
        }

        lyric_row.push_str(&word.text);
        let continues = words.get(i + 1).map_or(false, |next| next.joined);
        if !continues {
            lyric_row.push(' ');
        }
    }

    let lyric_row = lyric_row.trim_end();
    if chord_row.is_empty() {
        lyric_row.to_string()
    } else {
        format!("{}\n{}", chord_row.trim_end(), lyric_row)
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad_to(row: &mut String, column: usize) {
    let padding = column.saturating_sub(width(row));
    row.extend(std::iter::repeat(' ').take(padding));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SongMetadata;

    fn lyric(words: &[(&str, Option<&str>)]) -> Line {
        Line::Lyric {
            words: words.iter().map(|(t, c)| Word::new(*t, *c)).collect(),
        }
    }

    #[test]
    fn test_chords_sit_above_their_words() {
        let line = lyric(&[("Amazing", Some("G")), ("grace", Some("G7")), ("how", None), ("sweet", Some("C"))]);
        assert_eq!(
            render_line(&line, 0),
            "G       G7        C\nAmazing grace how sweet"
        );
    }

    #[test]
    fn test_long_chord_widens_column() {
        let line = lyric(&[("I", Some("Cmaj7")), ("love", Some("G"))]);
        assert_eq!(render_line(&line, 0), "Cmaj7 G\nI     love");
    }

    #[test]
    fn test_lyric_without_chords_is_one_row() {
        let line = lyric(&[("just", None), ("words", None)]);
        assert_eq!(render_line(&line, 5), "just words");
    }

    #[test]
    fn test_chord_without_text() {
        let line = lyric(&[("", Some("G")), ("", Some("D")), ("go", Some("Em"))]);
        assert_eq!(render_line(&line, 0), "G D Em\n    go");
    }

    #[test]
    fn test_transposed_chords_realign() {
        // E -> F#: the chord grows by one character and pushes the next chord along
        let line = lyric(&[("a", Some("E")), ("b", Some("C"))]);
        assert_eq!(render_line(&line, 0), "E C\na b");
        assert_eq!(render_line(&line, 2), "F# D\na  b");

        // Nothing to collide with, so the lyric keeps its spacing
        let line = lyric(&[("a", Some("E")), ("b", None)]);
        assert_eq!(render_line(&line, 2), "F#\na b");
    }

    #[test]
    fn test_chord_inside_word_keeps_word_whole() {
        let line = Line::Lyric {
            words: vec![
                Word::new("A", None),
                Word::new("mazing", Some("G")).joined(),
                Word::new("grace", None),
            ],
        };
        assert_eq!(render_line(&line, 0), " G\nAmazing grace");
    }

    #[test]
    fn test_crowded_chords_inside_word_use_hyphens() {
        let line = Line::Lyric {
            words: vec![
                Word::new("A", None),
                Word::new("ma", Some("Cmaj7")).joined(),
                Word::new("zing", Some("G")).joined(),
            ],
        };
        assert_eq!(render_line(&line, 0), " Cmaj7 G\nAma----zing");
    }

    #[test]
    fn test_chord_line_is_transposed_whole() {
        let line = Line::Chords {
            chords: "G  D/F#   N.C.".to_string(),
        };
        assert_eq!(render_line(&line, 2), "A E/G# N.C.");
    }

    #[test]
    fn test_section_and_blank() {
        assert_eq!(
            render_line(
                &Line::Section {
                    name: "Chorus".to_string()
                },
                3
            ),
            "[Chorus]"
        );
        assert_eq!(render_line(&Line::Blank, 3), "");
    }

    #[test]
    fn test_render_song_header() {
        let song = Song {
            id: "x".to_string(),
            metadata: SongMetadata {
                title: "Title".to_string(),
                artist: Some("Artist".to_string()),
                key: Some("Bb".to_string()),
            },
            lines: vec![Line::Chords {
                chords: "Bb F".to_string(),
            }],
        };
        assert_eq!(render_song(&song, 2), "Title\nArtist\nKey: C\n\nC G\n");
        assert_eq!(render_song(&song, 0), "Title\nArtist\nKey: A#\n\nA# F\n");
    }

    #[test]
    fn test_render_song_without_optional_fields() {
        let song = Song {
            id: "x".to_string(),
            metadata: SongMetadata {
                title: "Only".to_string(),
                ..Default::default()
            },
            lines: vec![],
        };
        assert_eq!(render_song(&song, 1), "Only\n");
    }
}
