//! # Error Types
//!
//! Every failure in this crate is a synchronous validation failure, raised at
//! the point where invalid input enters the model. The model never recovers
//! from one: it hands the error back to the caller and leaves its own state
//! exactly as it was before the call.
//!
//! ## Error Types
//! - `InvalidAlphabet` - pitch-class alphabet is not 12 unique non-empty labels
//! - `InvalidTuning` - empty tuning, unknown letter, or duplicate open string
//! - `InvalidFretCount` - fret count is zero or too large
//! - `InvalidIntervalContext` - root outside the alphabet or bad interval table
//! - `InvalidFrettedNote` - a clicked-note reference that matches no string or fret
//! - `InvalidNoteMode` - unknown note display mode
//! - `ConfigError` - malformed YAML configuration
//!
//! ## Usage
//! ```rust
//! use fretboard::{Fretboard, FretboardConfig, FretboardError};
//!
//! match Fretboard::new(FretboardConfig::default().with_num_frets(0)) {
//!     Ok(_) => unreachable!(),
//!     Err(FretboardError::InvalidFretCount(message)) => eprintln!("{}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FretboardError {
    /// The pitch-class alphabet is malformed.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretboardError;
    /// let err = FretboardError::InvalidAlphabet("expected 12 labels, got 7".to_string());
    /// assert_eq!(err.to_string(), "Invalid alphabet: expected 12 labels, got 7");
    /// ```
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// The tuning is empty, names a letter outside the alphabet, repeats an
    /// open string, or reaches an octave number that does not fit in `i32`.
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    /// The fret count is zero or above the supported maximum.
    #[error("Invalid fret count: {0}")]
    InvalidFretCount(String),

    /// The root is not part of the alphabet, or the interval table does not
    /// hold exactly 12 unique labels.
    #[error("Invalid interval context: {0}")]
    InvalidIntervalContext(String),

    /// A fretted-note reference points at a string that is not in the tuning,
    /// or at a fret outside `0..=num_frets`.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretboardError;
    /// let err = FretboardError::InvalidFrettedNote("fret 22 is outside 0..=15".to_string());
    /// assert_eq!(err.to_string(), "Invalid fretted note: fret 22 is outside 0..=15");
    /// ```
    #[error("Invalid fretted note: {0}")]
    InvalidFrettedNote(String),

    /// The note display mode names neither letter nor interval display.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretboardError;
    /// let err = FretboardError::InvalidNoteMode("'solfege' is not one of letter, interval".to_string());
    /// assert_eq!(err.to_string(), "Invalid note mode: 'solfege' is not one of letter, interval");
    /// ```
    #[error("Invalid note mode: {0}")]
    InvalidNoteMode(String),

    /// The YAML configuration could not be read.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
