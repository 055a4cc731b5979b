//! # Fretboard Types
//!
//! Value types shared by the validator and the fretboard model.
//!
//! ## Type Hierarchy
//! ```text
//! Alphabet            12 pitch-class labels, index 0 is the octave boundary
//! OpenStringNote      { letter, octave } of one unfretted string
//! IntervalContext     { root, intervals[12] }
//! FretPosition        { string_index, fret, note }
//!   └── Note          { letter, octave, interval }
//! FrettedNoteRef      { string, fret }, how a host names a note to click
//! ClickedString       { string_index, string, notes }, one group of a selection snapshot
//! ```
//!
//! ## Key Concepts
//!
//! ### Octave boundary
//! Octave numbers increase when the pitch class wraps from alphabet index 11
//! back to index 0. With the default alphabet that is the B to C step, so
//! `B2` fretted once is `C3`.
//!
//! ### Value semantics
//! Everything here is an owned value. The model hands out clones, so nothing
//! a caller holds can alias the model's internal state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FretboardError;
use crate::validate::{validate_alphabet, validate_note_mode};

/// Number of pitch classes in one octave.
pub const PITCH_CLASS_COUNT: usize = 12;

/// Western chromatic alphabet, starting at C.
pub const DEFAULT_ALPHABET: [&str; PITCH_CLASS_COUNT] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

/// Interval names by semitone distance above the root.
pub const DEFAULT_INTERVALS: [&str; PITCH_CLASS_COUNT] = [
    "1", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7",
];

/// Standard six-string guitar tuning, highest string first.
pub const DEFAULT_TUNING: [(&str, i32); 6] = [
    ("E", 4),
    ("B", 3),
    ("G", 3),
    ("D", 3),
    ("A", 2),
    ("E", 2),
];

pub const DEFAULT_NUM_FRETS: u32 = 15;

/// Largest accepted fret count.
pub const MAX_NUM_FRETS: u32 = 256;

/// An ordered set of 12 unique pitch-class labels.
///
/// Only constructible through [`Alphabet::new`], which runs the alphabet
/// validator, so every `Alphabet` value holds exactly 12 distinct labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Alphabet {
    labels: Vec<String>,
}

impl Alphabet {
    pub fn new(labels: Vec<String>) -> Result<Self, FretboardError> {
        validate_alphabet(&labels)?;
        Ok(Self { labels })
    }

    /// Position of `letter` in the alphabet, if present.
    pub fn index_of(&self, letter: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == letter)
    }

    pub fn contains(&self, letter: &str) -> bool {
        self.index_of(letter).is_some()
    }

    /// Label for a pitch class; indices wrap modulo 12.
    pub fn label(&self, pitch_class: usize) -> &str {
        &self.labels[pitch_class % PITCH_CLASS_COUNT]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            labels: DEFAULT_ALPHABET.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The note sounded by an open string.
///
/// Two open-string notes are the same string when both letter and octave match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpenStringNote {
    pub letter: String,
    pub octave: i32,
}

impl OpenStringNote {
    pub fn new(letter: impl Into<String>, octave: i32) -> Self {
        Self {
            letter: letter.into(),
            octave,
        }
    }
}

impl fmt::Display for OpenStringNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.octave)
    }
}

/// Standard guitar tuning as owned notes.
pub fn default_tuning() -> Vec<OpenStringNote> {
    DEFAULT_TUNING
        .iter()
        .map(|(letter, octave)| OpenStringNote::new(*letter, *octave))
        .collect()
}

/// Root note plus the 12 interval names used to label every position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalContext {
    pub root: String,
    pub intervals: Vec<String>,
}

impl IntervalContext {
    pub fn new(root: impl Into<String>, intervals: Vec<String>) -> Self {
        Self {
            root: root.into(),
            intervals,
        }
    }

    /// Default interval table rooted at `root`.
    pub fn with_root(root: impl Into<String>) -> Self {
        Self::new(
            root,
            DEFAULT_INTERVALS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl Default for IntervalContext {
    fn default() -> Self {
        Self::with_root(DEFAULT_ALPHABET[0])
    }
}

/// Identity of the note at one fret position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub letter: String,
    pub octave: i32,
    pub interval: String,
}

/// One playable position on the neck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretPosition {
    pub string_index: usize,
    pub fret: u32,
    pub note: Note,
}

impl FretPosition {
    /// Text a renderer shows on this position for the given display mode.
    pub fn label(&self, mode: NoteDisplayMode) -> &str {
        match mode {
            NoteDisplayMode::Letter => &self.note.letter,
            NoteDisplayMode::Interval => &self.note.interval,
        }
    }
}

/// A host-side reference to a note: which open string, and which fret on it.
///
/// The string is identified by its open note, not by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrettedNoteRef {
    pub string: OpenStringNote,
    pub fret: u32,
}

impl FrettedNoteRef {
    pub fn new(string: OpenStringNote, fret: u32) -> Self {
        Self { string, fret }
    }
}

/// Selected positions on one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickedString {
    pub string_index: usize,
    pub string: OpenStringNote,
    pub notes: Vec<FretPosition>,
}

/// Which label a renderer puts on a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteDisplayMode {
    #[default]
    Letter,
    Interval,
}

impl FromStr for NoteDisplayMode {
    type Err = FretboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_note_mode(s)
    }
}

impl fmt::Display for NoteDisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteDisplayMode::Letter => write!(f, "letter"),
            NoteDisplayMode::Interval => write!(f, "interval"),
        }
    }
}

/// Where a selection write comes from.
///
/// User gestures follow the chord/scale toggle rules and respect the
/// clicking-disabled gate. Administrative writes only ever add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOrigin {
    UserGesture,
    AdministrativeWrite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet_lookup() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.index_of("C"), Some(0));
        assert_eq!(alphabet.index_of("G"), Some(7));
        assert_eq!(alphabet.index_of("H"), None);
        assert_eq!(alphabet.label(13), "C#/Db");
    }

    #[test]
    fn test_alphabet_new_rejects_short_list() {
        let result = Alphabet::new(vec!["C".to_string(), "D".to_string()]);
        assert!(matches!(result, Err(FretboardError::InvalidAlphabet(_))));
    }

    #[test]
    fn test_default_tuning_is_high_to_low() {
        let tuning = default_tuning();
        assert_eq!(tuning.len(), 6);
        assert_eq!(tuning[0], OpenStringNote::new("E", 4));
        assert_eq!(tuning[5], OpenStringNote::new("E", 2));
        assert_eq!(tuning[5].to_string(), "E2");
    }

    #[test]
    fn test_position_label_by_mode() {
        let position = FretPosition {
            string_index: 5,
            fret: 3,
            note: Note {
                letter: "G".to_string(),
                octave: 2,
                interval: "5".to_string(),
            },
        };
        assert_eq!(position.label(NoteDisplayMode::Letter), "G");
        assert_eq!(position.label(NoteDisplayMode::Interval), "5");
    }

    #[test]
    fn test_note_display_mode_from_str() {
        assert_eq!("letter".parse::<NoteDisplayMode>(), Ok(NoteDisplayMode::Letter));
        assert_eq!(
            "interval-display".parse::<NoteDisplayMode>(),
            Ok(NoteDisplayMode::Interval)
        );
        assert!("solfege".parse::<NoteDisplayMode>().is_err());
        assert_eq!(NoteDisplayMode::Interval.to_string(), "interval");
    }
}
