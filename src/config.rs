//! # Configuration
//!
//! [`FretboardConfig`] is the construction-time record for a
//! [`Fretboard`](crate::Fretboard). `FretboardConfig::default()` is the
//! defaults template; every construction takes its own owned copy.
//!
//! ## YAML
//! A config can also be read from a kebab-case YAML document. Every key is
//! optional and falls back to the default:
//!
//! ```yaml
//! alphabet: [C, C#/Db, D, D#/Eb, E, F, F#/Gb, G, G#/Ab, A, A#/Bb, B]
//! tuning:
//!   - { letter: D, octave: 3 }
//!   - { letter: A, octave: 2 }
//!   - { letter: D, octave: 2 }
//! num-frets: 12
//! chord-mode: false
//! clicking-disabled: false
//! root: D
//! intervals: [1, b2, 2, b3, 3, 4, b5, 5, b6, 6, b7, 7]
//! note-display-mode: interval
//! ```
//!
//! When `alphabet` is given without `root`, the root is the first label of
//! that alphabet.
//!
//! Loading only parses. Structural checks run when the config is handed to
//! `Fretboard::new`.

use serde::Deserialize;

use crate::error::FretboardError;
use crate::note::{
    default_tuning, IntervalContext, NoteDisplayMode, OpenStringNote, DEFAULT_ALPHABET,
    DEFAULT_INTERVALS, DEFAULT_NUM_FRETS,
};
use crate::validate::validate_note_mode;

#[derive(Debug, Clone, PartialEq)]
pub struct FretboardConfig {
    pub alphabet: Vec<String>,
    /// Open strings, addressed by position.
    pub tuning: Vec<OpenStringNote>,
    pub num_frets: u32,
    /// At most one clicked fret per string when true.
    pub chord_mode: bool,
    /// Ignore user gestures when true.
    pub clicking_disabled: bool,
    pub interval_context: IntervalContext,
    pub note_display_mode: NoteDisplayMode,
    /// Root still follows the first alphabet label.
    root_is_default: bool,
}

impl Default for FretboardConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.iter().map(|s| s.to_string()).collect(),
            tuning: default_tuning(),
            num_frets: DEFAULT_NUM_FRETS,
            chord_mode: true,
            clicking_disabled: false,
            interval_context: IntervalContext::default(),
            note_display_mode: NoteDisplayMode::Letter,
            root_is_default: true,
        }
    }
}

/// Raw config for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
    pub alphabet: Option<Vec<String>>,
    pub tuning: Option<Vec<OpenStringNote>>,
    pub num_frets: Option<u32>,
    pub chord_mode: Option<bool>,
    pub clicking_disabled: Option<bool>,
    pub root: Option<String>,
    pub intervals: Option<Vec<String>>,
    pub note_display_mode: Option<String>,
}

impl FretboardConfig {
    /// Parse a YAML document, filling gaps from the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, FretboardError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_yaml::from_str(content)
            .map_err(|e| FretboardError::ConfigError(e.to_string()))?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, FretboardError> {
        let defaults = Self::default();

        let alphabet = raw.alphabet.unwrap_or(defaults.alphabet);

        let root = match (raw.root.clone(), alphabet.first()) {
            (Some(root), _) => root,
            (None, Some(first)) => first.clone(),
            (None, None) => defaults.interval_context.root,
        };
        let intervals = raw
            .intervals
            .unwrap_or_else(|| DEFAULT_INTERVALS.iter().map(|s| s.to_string()).collect());

        let note_display_mode = if let Some(ref mode) = raw.note_display_mode {
            validate_note_mode(mode)?
        } else {
            defaults.note_display_mode
        };

        Ok(Self {
            alphabet,
            tuning: raw.tuning.unwrap_or(defaults.tuning),
            num_frets: raw.num_frets.unwrap_or(defaults.num_frets),
            chord_mode: raw.chord_mode.unwrap_or(defaults.chord_mode),
            clicking_disabled: raw.clicking_disabled.unwrap_or(defaults.clicking_disabled),
            root_is_default: raw.root.is_none(),
            interval_context: IntervalContext::new(root, intervals),
            note_display_mode,
        })
    }

    /// Replace the alphabet. Unless a root was set explicitly, the root moves
    /// to the first label of the new alphabet.
    pub fn with_alphabet(mut self, alphabet: Vec<String>) -> Self {
        if self.root_is_default {
            if let Some(first) = alphabet.first() {
                self.interval_context.root = first.clone();
            }
        }
        self.alphabet = alphabet;
        self
    }

    pub fn with_tuning(mut self, tuning: Vec<OpenStringNote>) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_num_frets(mut self, num_frets: u32) -> Self {
        self.num_frets = num_frets;
        self
    }

    pub fn with_chord_mode(mut self, chord_mode: bool) -> Self {
        self.chord_mode = chord_mode;
        self
    }

    pub fn with_clicking_disabled(mut self, clicking_disabled: bool) -> Self {
        self.clicking_disabled = clicking_disabled;
        self
    }

    pub fn with_interval_context(mut self, interval_context: IntervalContext) -> Self {
        self.interval_context = interval_context;
        self.root_is_default = false;
        self
    }

    pub fn with_note_display_mode(mut self, mode: NoteDisplayMode) -> Self {
        self.note_display_mode = mode;
        self
    }
}
