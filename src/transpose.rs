//! # Chord Transposition
//!
//! Shifts chord symbols up or down by a number of semitones while keeping
//! everything except the root note exactly as written.
//!
//! ## Accepted Input
//! - Single chords: `G`, `Dm7`, `Bbsus4`, `F#m7b5`
//! - Slash chords: `D/F#`, `Am7/G`
//! - Whole chord lines: `G D/F# Am7 C`
//! - Anything else (`N.C.`, `%`, `|`, `x2`) is passed through untouched
//!
//! ## Algorithm
//! Applied recursively, in this order:
//! 1. Empty text is returned as-is
//! 2. Text containing whitespace is split into tokens, each token is transposed,
//!    and the tokens are rejoined with single spaces
//! 3. A token with one `/` is split into chord and bass, each transposed on its own.
//!    Two or more slashes are ambiguous and the token is returned unchanged
//! 4. A token must start with a letter `A`-`G`, optionally followed by `#` or `b`.
//!    The rest of the token is the suffix and is never touched
//! 5. Flat roots are respelled as sharps (`Db` -> `C#`), then moved around the
//!    12-step cycle. Roots outside the cycle (`Cb`, `E#`) are returned unchanged
//!
//! ## Spelling
//! Output roots are always sharp-spelled, even when `steps` is 0:
//! ```rust
//! use chordsheet::transpose;
//!
//! assert_eq!(transpose("Bb7", 0), "A#7");
//! assert_eq!(transpose("G D/F# Am7", 2), "A E/G# Bm7");
//! assert_eq!(transpose("N.C.", 3), "N.C.");
//! ```
//!
//! ## Related Modules
//! - `ast` - `ChordLine` values transposed by [`transpose_chord_line()`]
//! - `render` - Calls [`transpose()`] once per chord token or chord line

use std::fmt;

use crate::ast::ChordLine;

/// The 12 pitch classes, sharp-spelled, in chromatic order from C.
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings accepted on input, with their sharp equivalents.
const FLAT_ALIASES: [(&str, &str); 5] = [
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Gb", "F#"),
    ("Ab", "G#"),
    ("Bb", "A#"),
];

/// One of the 12 notes of the equal-tempered octave, ignoring octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Position in the cycle, C = 0 through B = 11.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pitch class at `index`, wrapping in both directions (-1 is B, 12 is C).
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Look up a note name such as `"F#"` or `"Eb"`.
    ///
    /// Accepts the 12 sharp spellings and the 5 flat aliases. Other spellings
    /// (`"Cb"`, `"E#"`, `"B#"`, `"Fb"`) are not part of the table and yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let canonical = FLAT_ALIASES
            .iter()
            .find(|(flat, _)| *flat == name)
            .map_or(name, |(_, sharp)| *sharp);
        PITCH_CLASS_NAMES
            .iter()
            .position(|n| *n == canonical)
            .map(|i| Self::ALL[i])
    }

    /// Sharp-spelled name, e.g. `"G#"`.
    pub fn name(self) -> &'static str {
        PITCH_CLASS_NAMES[self.index()]
    }

    pub fn transpose(self, steps: i32) -> Self {
        // i64 so that i32::MIN and i32::MAX cannot overflow
        Self::from_index(self.index() as i64 + i64::from(steps))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    pub fn symbol(self) -> char {
        match self {
            Accidental::Sharp => '#',
            Accidental::Flat => 'b',
        }
    }
}

/// A chord symbol split into its parts.
///
/// Writing a parsed token back out with `Display` reproduces the input exactly,
/// so anything after the root (`m7`, `sus4`, `add9`, `(b9)`) survives untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordToken {
    /// Root letter, `A` through `G`
    pub letter: char,
    pub accidental: Option<Accidental>,
    /// Quality and extensions following the root
    pub suffix: String,
    /// Bass note of a slash chord
    pub bass: Option<Box<ChordToken>>,
}

impl ChordToken {
    /// Parse a single chord or a slash chord.
    ///
    /// Returns `None` when the text does not start with `A`-`G`, contains more
    /// than one `/`, or has a bass part that is not itself a chord.
    ///
    /// ```rust
    /// use chordsheet::ChordToken;
    ///
    /// let chord = ChordToken::parse("Bbm7/Ab").unwrap();
    /// assert_eq!(chord.letter, 'B');
    /// assert_eq!(chord.suffix, "m7");
    /// assert_eq!(chord.bass.unwrap().letter, 'A');
    /// assert!(ChordToken::parse("N.C.").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        match text.split_once('/') {
            Some((_, bass)) if bass.contains('/') => None,
            Some((main, bass)) => {
                let mut chord = Self::parse_simple(main)?;
                chord.bass = Some(Box::new(Self::parse_simple(bass)?));
                Some(chord)
            }
            None => Self::parse_simple(text),
        }
    }

    /// Parse root, accidental, and suffix. Slashes are treated as suffix text.
    fn parse_simple(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let letter = chars.next().filter(|c| ('A'..='G').contains(c))?;
        let rest = chars.as_str();

        let (accidental, suffix) = match rest.chars().next() {
            Some('#') => (Some(Accidental::Sharp), &rest[1..]),
            Some('b') => (Some(Accidental::Flat), &rest[1..]),
            _ => (None, rest),
        };

        Some(Self {
            letter,
            accidental,
            suffix: suffix.to_string(),
            bass: None,
        })
    }

    /// Root as written, e.g. `"Bb"`.
    pub fn root_spelling(&self) -> String {
        let mut spelling = String::from(self.letter);
        if let Some(accidental) = self.accidental {
            spelling.push(accidental.symbol());
        }
        spelling
    }

    /// Root pitch class, or `None` for spellings such as `Cb` or `E#`.
    pub fn root(&self) -> Option<PitchClass> {
        PitchClass::from_name(&self.root_spelling())
    }

    /// Move the root (and bass) by `steps` semitones.
    ///
    /// A root without a pitch class is left as written.
    pub fn transposed(&self, steps: i32) -> Self {
        let (letter, accidental) = match self.root() {
            Some(root) => spell(root.transpose(steps)),
            None => (self.letter, self.accidental),
        };

        Self {
            letter,
            accidental,
            suffix: self.suffix.clone(),
            bass: self.bass.as_ref().map(|bass| Box::new(bass.transposed(steps))),
        }
    }
}

impl fmt::Display for ChordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root_spelling(), self.suffix)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// Split a sharp-spelled pitch class into letter and accidental.
fn spell(pitch: PitchClass) -> (char, Option<Accidental>) {
    let mut chars = pitch.name().chars();
    let letter = chars.next().unwrap_or('C');
    let accidental = chars.next().map(|_| Accidental::Sharp);
    (letter, accidental)
}

/// Transpose chord text by `steps` semitones.
///
/// `text` may be empty, one chord, a slash chord, or a whole line of chords.
/// Never fails: anything not recognized as a chord is returned unchanged.
///
/// Runs of whitespace in a chord line collapse to a single space, and leading or
/// trailing whitespace is dropped.
///
/// # Examples
/// ```rust
/// use chordsheet::transpose;
///
/// assert_eq!(transpose("B", 1), "C");
/// assert_eq!(transpose("C", -1), "B");
/// assert_eq!(transpose("D/F#", 2), "E/G#");
/// assert_eq!(transpose("A/B/C", 1), "A/B/C");
/// assert_eq!(transpose("Db", 0), "C#");
/// ```
pub fn transpose(text: &str, steps: i32) -> String {
    if text.is_empty() {
        return String::new();
    }

    if text.contains(char::is_whitespace) {
        return text
            .split_whitespace()
            .map(|token| transpose(token, steps))
            .collect::<Vec<_>>()
            .join(" ");
    }

    match text.split_once('/') {
        Some((_, bass)) if bass.contains('/') => text.to_string(),
        Some((main, bass)) => format!("{}/{}", transpose(main, steps), transpose(bass, steps)),
        None => match ChordToken::parse_simple(text) {
            Some(chord) => chord.transposed(steps).to_string(),
            None => text.to_string(),
        },
    }
}

/// Transpose either form of chord line.
///
/// A free-form line is transposed as one string; aligned chords are transposed
/// one by one so they stay paired with their words.
pub fn transpose_chord_line(line: &ChordLine, steps: i32) -> ChordLine {
    match line {
        ChordLine::Free(text) => ChordLine::Free(transpose(text, steps)),
        ChordLine::Aligned(chords) => {
            ChordLine::Aligned(chords.iter().map(|c| transpose(c, steps)).collect())
        }
    }
}

/// Semitones (0 to 11) needed to move a song from `from_key` up to `to_key`.
///
/// Keys are read like chords, so `"Am"`, `"Bb"`, and `"F#m"` all work.
/// Returns `None` if either key has no recognizable root.
///
/// ```rust
/// use chordsheet::interval;
///
/// assert_eq!(interval("G", "A"), Some(2));
/// assert_eq!(interval("Em", "Dm"), Some(10));
/// assert_eq!(interval("G", "H"), None);
/// ```
pub fn interval(from_key: &str, to_key: &str) -> Option<i32> {
    let from = key_root(from_key)?;
    let to = key_root(to_key)?;
    Some((to.index() as i32 - from.index() as i32).rem_euclid(12))
}

fn key_root(key: &str) -> Option<PitchClass> {
    ChordToken::parse(key.trim())?.root()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CHORDS: [&str; 10] = [
        "C", "G", "Dm7", "F#m7b5", "Bbsus4", "Ebmaj7", "A7(b9)", "D/F#", "Abadd9/C", "E",
    ];

    #[test]
    fn test_pitch_class_cycle() {
        assert_eq!(PitchClass::from_index(0), PitchClass::C);
        assert_eq!(PitchClass::from_index(12), PitchClass::C);
        assert_eq!(PitchClass::from_index(-1), PitchClass::B);
        assert_eq!(PitchClass::from_index(-13), PitchClass::B);
        assert_eq!(PitchClass::B.transpose(1), PitchClass::C);
        assert_eq!(PitchClass::C.transpose(i32::MIN), PitchClass::from_index(i32::MIN as i64));
        for (i, pitch) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(pitch.index(), i);
            assert_eq!(PitchClass::from_name(pitch.name()), Some(*pitch));
        }
    }

    #[test]
    fn test_flat_aliases() {
        assert_eq!(PitchClass::from_name("Db"), Some(PitchClass::CSharp));
        assert_eq!(PitchClass::from_name("Eb"), Some(PitchClass::DSharp));
        assert_eq!(PitchClass::from_name("Gb"), Some(PitchClass::FSharp));
        assert_eq!(PitchClass::from_name("Ab"), Some(PitchClass::GSharp));
        assert_eq!(PitchClass::from_name("Bb"), Some(PitchClass::ASharp));
        assert_eq!(PitchClass::from_name("Cb"), None);
        assert_eq!(PitchClass::from_name("E#"), None);
    }

    #[test]
    fn test_chord_token_parse() {
        let chord = ChordToken::parse("F#m7b5").unwrap();
        assert_eq!(chord.letter, 'F');
        assert_eq!(chord.accidental, Some(Accidental::Sharp));
        assert_eq!(chord.suffix, "m7b5");
        assert_eq!(chord.root(), Some(PitchClass::FSharp));
        assert!(chord.bass.is_none());

        // "b" directly after the letter is always the accidental
        let chord = ChordToken::parse("Bb").unwrap();
        assert_eq!(chord.accidental, Some(Accidental::Flat));
        assert_eq!(chord.suffix, "");

        let slash = ChordToken::parse("G/B").unwrap();
        assert_eq!(slash.bass.as_deref().map(|b| b.letter), Some('B'));

        assert!(ChordToken::parse("").is_none());
        assert!(ChordToken::parse("am").is_none());
        assert!(ChordToken::parse("A/B/C").is_none());
        assert!(ChordToken::parse("C/x").is_none());
    }

    #[test]
    fn test_chord_token_display_is_lossless() {
        for text in ["C", "Bbsus4", "A7(b9)", "D/F#", "Abadd9/C", "Cb7", "E#m"] {
            assert_eq!(ChordToken::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_flat_normalization_at_zero_offset() {
        // Flat roots are respelled as sharps even when nothing moves
        assert_eq!(transpose("Db", 0), "C#");
        assert_eq!(transpose("Bb7", 0), "A#7");
        assert_eq!(transpose("Eb/Bb", 0), "D#/A#");
        assert_eq!(transpose("G", 0), "G");
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(transpose("B", 1), "C");
        assert_eq!(transpose("C", -1), "B");
        assert_eq!(transpose("A#m", 2), "Cm");
    }

    #[test]
    fn test_large_and_negative_offsets() {
        assert_eq!(transpose("C", 13), "C#");
        assert_eq!(transpose("C", -13), "B");
        assert_eq!(transpose("C", 24), "C");
        assert_eq!(transpose("C", -24), "C");
        assert_eq!(transpose("C", i32::MAX), PitchClass::C.transpose(i32::MAX).name());
        assert_eq!(transpose("C", i32::MIN), PitchClass::C.transpose(i32::MIN).name());
    }

    #[test]
    fn test_slash_chords() {
        assert_eq!(transpose("D/F#", 2), "E/G#");
        assert_eq!(transpose("Am7/G", -2), "Gm7/F");
        // Each side of the slash degrades on its own
        assert_eq!(transpose("C/x", 2), "D/x");
        assert_eq!(transpose("x/C", 2), "x/D");
        assert_eq!(transpose("/G", 2), "/A");
    }

    #[test]
    fn test_multi_slash_passthrough() {
        assert_eq!(transpose("A/B/C", 1), "A/B/C");
        assert_eq!(transpose("G//B", 5), "G//B");
    }

    #[test]
    fn test_opaque_tokens() {
        assert_eq!(transpose("N.C.", 3), "N.C.");
        assert_eq!(transpose("%", 1), "%");
        assert_eq!(transpose("|", 1), "|");
        assert_eq!(transpose("x2", 4), "x2");
        assert_eq!(transpose("am", 1), "am");
        assert_eq!(transpose("H7", 1), "H7");
    }

    #[test]
    fn test_roots_outside_the_cycle_pass_through() {
        assert_eq!(transpose("Cb", 1), "Cb");
        assert_eq!(transpose("Fbmaj7", 3), "Fbmaj7");
        assert_eq!(transpose("E#m", 1), "E#m");
        assert_eq!(transpose("B#", -1), "B#");
    }

    #[test]
    fn test_multi_token_line() {
        assert_eq!(transpose("G D/F# Am7", 2), "A E/G# Bm7");
        assert_eq!(transpose("| G . . | N.C. |", 2), "| A . . | N.C. |");
    }

    #[test]
    fn test_irregular_whitespace_collapses() {
        // Spacing in chord lines is not preserved
        assert_eq!(transpose("G    C\tD", 0), "G C D");
        assert_eq!(transpose("  G C  ", 2), "A D");
        assert_eq!(transpose("   ", 2), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(transpose("", 5), "");
    }

    #[test]
    fn test_suffix_preserved() {
        for chord in SAMPLE_CHORDS {
            let original = ChordToken::parse(chord).unwrap();
            for steps in -14..=14 {
                let moved = ChordToken::parse(&transpose(chord, steps)).unwrap();
                assert_eq!(moved.suffix, original.suffix, "{} by {}", chord, steps);
            }
        }
    }

    #[test]
    fn test_round_trip_returns_to_same_pitch() {
        for chord in SAMPLE_CHORDS {
            let original = ChordToken::parse(chord).unwrap();
            for steps in -30..=30 {
                let back = transpose(&transpose(chord, steps), -steps);
                let back = ChordToken::parse(&back).unwrap();
                assert_eq!(back.root(), original.root(), "{} by {}", chord, steps);
                // Sharp-spelled on the way back, so equal to the 0-step result
                assert_eq!(back.to_string(), transpose(chord, 0));
            }
        }
    }

    #[test]
    fn test_additivity() {
        for chord in SAMPLE_CHORDS {
            for a in -15..=15 {
                for b in -15..=15 {
                    assert_eq!(
                        transpose(&transpose(chord, a), b),
                        transpose(chord, a + b),
                        "{} by {} then {}",
                        chord,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_transpose_chord_line_forms() {
        let free = ChordLine::Free("G D/F# Am7".to_string());
        assert_eq!(
            transpose_chord_line(&free, 2),
            ChordLine::Free("A E/G# Bm7".to_string())
        );

        let aligned = ChordLine::Aligned(vec!["G".to_string(), String::new(), "C/E".to_string()]);
        assert_eq!(
            transpose_chord_line(&aligned, -1),
            ChordLine::Aligned(vec!["F#".to_string(), String::new(), "B/D#".to_string()])
        );
    }

    #[test]
    fn test_interval() {
        assert_eq!(interval("C", "C"), Some(0));
        assert_eq!(interval("C", "G"), Some(7));
        assert_eq!(interval("G", "C"), Some(5));
        assert_eq!(interval("Bb", "C"), Some(2));
        assert_eq!(interval(" F#m ", "Am"), Some(3));
        assert_eq!(interval("Cb", "C"), None);
        assert_eq!(interval("", "C"), None);
    }
}
