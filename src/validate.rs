//! # Validation Module
//!
//! Stateless checks run by the fretboard model before it accepts any value.
//!
//! ## Purpose
//! Configuration and selection input may be well-typed but still structurally
//! illegal. Each function here either returns normally or fails with a
//! [`FretboardError`] naming the offending value. Nothing in this module holds
//! state between calls.
//!
//! ## Validation Rules
//!
//! ### Alphabet
//! - Exactly 12 labels
//! - Every label non-empty
//! - No label repeated
//!
//! ### Tuning
//! - At least one string
//! - Every open-string letter is in the alphabet
//! - No two strings share both letter and octave
//!
//! ### Fret count
//! - Greater than zero
//! - At most `MAX_NUM_FRETS`
//!
//! ### Interval context
//! - Root is in the alphabet
//! - Exactly 12 interval labels, all unique
//!
//! ### Fretted note
//! - The referenced open string is in the tuning (letter + octave match)
//! - The fret lies in `0..=num_frets`
//!
//! ### Note display mode
//! - `letter` / `letter-display` or `interval` / `interval-display`
//!
//! ## Related Modules
//! - `note` - the types being validated
//! - `model` - calls these before every mutation

use crate::error::FretboardError;
use crate::note::{
    Alphabet, FrettedNoteRef, IntervalContext, NoteDisplayMode, OpenStringNote,
    MAX_NUM_FRETS, PITCH_CLASS_COUNT,
};
use crate::pitch::first_duplicate;

pub fn validate_alphabet(labels: &[String]) -> Result<(), FretboardError> {
    if labels.len() != PITCH_CLASS_COUNT {
        return Err(FretboardError::InvalidAlphabet(format!(
            "expected {} labels, got {}: {:?}",
            PITCH_CLASS_COUNT,
            labels.len(),
            labels
        )));
    }

    if let Some(pos) = labels.iter().position(|l| l.is_empty()) {
        return Err(FretboardError::InvalidAlphabet(format!(
            "label at index {} is empty",
            pos
        )));
    }

    if let Some(dup) = first_duplicate(labels) {
        return Err(FretboardError::InvalidAlphabet(format!(
            "label '{}' appears more than once",
            dup
        )));
    }

    Ok(())
}

/// Check that one open-string note is expressible in `alphabet`.
pub fn validate_note(note: &OpenStringNote, alphabet: &Alphabet) -> Result<(), FretboardError> {
    if !alphabet.contains(&note.letter) {
        return Err(FretboardError::InvalidTuning(format!(
            "note {} uses letter '{}' which is not in the alphabet",
            note, note.letter
        )));
    }
    Ok(())
}

pub fn validate_tuning(
    tuning: &[OpenStringNote],
    alphabet: &Alphabet,
) -> Result<(), FretboardError> {
    if tuning.is_empty() {
        return Err(FretboardError::InvalidTuning(
            "tuning must contain at least one string".to_string(),
        ));
    }

    for note in tuning {
        validate_note(note, alphabet)?;
    }

    if let Some(dup) = first_duplicate(tuning) {
        return Err(FretboardError::InvalidTuning(format!(
            "open string {} appears more than once",
            dup
        )));
    }

    Ok(())
}

pub fn validate_fret_count(num_frets: u32) -> Result<(), FretboardError> {
    if num_frets == 0 {
        return Err(FretboardError::InvalidFretCount(
            "fret count must be greater than 0, got 0".to_string(),
        ));
    }
    if num_frets > MAX_NUM_FRETS {
        return Err(FretboardError::InvalidFretCount(format!(
            "fret count must be at most {}, got {}",
            MAX_NUM_FRETS, num_frets
        )));
    }
    Ok(())
}

pub fn validate_root(root: &str, alphabet: &Alphabet) -> Result<(), FretboardError> {
    if !alphabet.contains(root) {
        return Err(FretboardError::InvalidIntervalContext(format!(
            "root '{}' is not in the alphabet",
            root
        )));
    }
    Ok(())
}

pub fn validate_interval_context(
    ctx: &IntervalContext,
    alphabet: &Alphabet,
) -> Result<(), FretboardError> {
    validate_root(&ctx.root, alphabet)?;

    if ctx.intervals.len() != PITCH_CLASS_COUNT {
        return Err(FretboardError::InvalidIntervalContext(format!(
            "expected {} interval labels, got {}",
            PITCH_CLASS_COUNT,
            ctx.intervals.len()
        )));
    }

    if let Some(dup) = first_duplicate(&ctx.intervals) {
        return Err(FretboardError::InvalidIntervalContext(format!(
            "interval label '{}' appears more than once",
            dup
        )));
    }

    Ok(())
}

/// Resolve a fretted-note reference against the tuning.
///
/// Returns the index of the string the reference points at.
pub fn validate_fretted_note(
    note: &FrettedNoteRef,
    tuning: &[OpenStringNote],
    num_frets: u32,
) -> Result<usize, FretboardError> {
    if note.fret > num_frets {
        return Err(FretboardError::InvalidFrettedNote(format!(
            "fret {} on string {} is outside 0..={}",
            note.fret, note.string, num_frets
        )));
    }

    tuning
        .iter()
        .position(|open| *open == note.string)
        .ok_or_else(|| {
            FretboardError::InvalidFrettedNote(format!(
                "string {} is not part of the tuning",
                note.string
            ))
        })
}

pub fn validate_note_mode(mode: &str) -> Result<NoteDisplayMode, FretboardError> {
    match mode {
        "letter" | "letter-display" => Ok(NoteDisplayMode::Letter),
        "interval" | "interval-display" => Ok(NoteDisplayMode::Interval),
        _ => Err(FretboardError::InvalidNoteMode(format!(
            "'{}' is not one of letter, interval",
            mode
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{default_tuning, DEFAULT_ALPHABET};

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_default_alphabet() {
        assert!(validate_alphabet(&labels(&DEFAULT_ALPHABET)).is_ok());
    }

    #[test]
    fn test_alphabet_wrong_length() {
        let result = validate_alphabet(&labels(&["C", "D", "E", "F", "G", "A", "B"]));
        assert!(result.is_err());
        if let Err(FretboardError::InvalidAlphabet(message)) = result {
            assert!(message.contains("expected 12 labels, got 7"));
        }
    }

    #[test]
    fn test_alphabet_duplicate_label() {
        let mut items = labels(&DEFAULT_ALPHABET);
        items[11] = "C".to_string();
        let result = validate_alphabet(&items);
        assert!(result.is_err());
        if let Err(FretboardError::InvalidAlphabet(message)) = result {
            assert!(message.contains("'C' appears more than once"));
        }
    }

    #[test]
    fn test_alphabet_empty_label() {
        let mut items = labels(&DEFAULT_ALPHABET);
        items[3] = String::new();
        assert!(matches!(
            validate_alphabet(&items),
            Err(FretboardError::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn test_note_letter_outside_alphabet() {
        let alphabet = Alphabet::default();
        assert!(validate_note(&OpenStringNote::new("E", 2), &alphabet).is_ok());
        // Bare "Bb" is not a label in the default alphabet, "A#/Bb" is
        assert!(matches!(
            validate_note(&OpenStringNote::new("Bb", 2), &alphabet),
            Err(FretboardError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_valid_default_tuning() {
        assert!(validate_tuning(&default_tuning(), &Alphabet::default()).is_ok());
    }

    #[test]
    fn test_empty_tuning() {
        let result = validate_tuning(&[], &Alphabet::default());
        assert!(matches!(result, Err(FretboardError::InvalidTuning(_))));
    }

    #[test]
    fn test_tuning_duplicate_string() {
        let tuning = vec![
            OpenStringNote::new("E", 2),
            OpenStringNote::new("A", 2),
            OpenStringNote::new("E", 2),
        ];
        let result = validate_tuning(&tuning, &Alphabet::default());
        assert!(result.is_err());
        if let Err(FretboardError::InvalidTuning(message)) = result {
            assert!(message.contains("E2 appears more than once"), "got: {}", message);
        }
    }

    #[test]
    fn test_tuning_same_letter_different_octave_is_fine() {
        let tuning = vec![OpenStringNote::new("E", 4), OpenStringNote::new("E", 2)];
        assert!(validate_tuning(&tuning, &Alphabet::default()).is_ok());
    }

    #[test]
    fn test_fret_count() {
        assert!(validate_fret_count(1).is_ok());
        assert!(validate_fret_count(24).is_ok());
        assert!(validate_fret_count(MAX_NUM_FRETS).is_ok());
        assert!(matches!(
            validate_fret_count(0),
            Err(FretboardError::InvalidFretCount(_))
        ));
    }

    #[test]
    fn test_fret_count_upper_bound() {
        let result = validate_fret_count(MAX_NUM_FRETS + 1);
        assert!(result.is_err());
        if let Err(FretboardError::InvalidFretCount(message)) = result {
            assert!(message.contains("at most"), "got: {}", message);
        }
        assert!(matches!(
            validate_fret_count(u32::MAX),
            Err(FretboardError::InvalidFretCount(_))
        ));
    }

    #[test]
    fn test_interval_context() {
        let alphabet = Alphabet::default();
        assert!(validate_interval_context(&IntervalContext::default(), &alphabet).is_ok());
        assert!(validate_interval_context(&IntervalContext::with_root("G"), &alphabet).is_ok());
    }

    #[test]
    fn test_interval_context_unknown_root() {
        let result = validate_interval_context(&IntervalContext::with_root("H"), &Alphabet::default());
        assert!(result.is_err());
        if let Err(FretboardError::InvalidIntervalContext(message)) = result {
            assert!(message.contains("root 'H'"));
        }
    }

    #[test]
    fn test_interval_context_short_table() {
        let ctx = IntervalContext::new("C", labels(&["1", "3", "5"]));
        assert!(matches!(
            validate_interval_context(&ctx, &Alphabet::default()),
            Err(FretboardError::InvalidIntervalContext(_))
        ));
    }

    #[test]
    fn test_interval_context_duplicate_label() {
        let mut ctx = IntervalContext::default();
        ctx.intervals[1] = "1".to_string();
        assert!(matches!(
            validate_interval_context(&ctx, &Alphabet::default()),
            Err(FretboardError::InvalidIntervalContext(_))
        ));
    }

    #[test]
    fn test_fretted_note_resolves_string_index() {
        let tuning = default_tuning();
        let note = FrettedNoteRef::new(OpenStringNote::new("E", 2), 3);
        assert_eq!(validate_fretted_note(&note, &tuning, 15), Ok(5));

        let open = FrettedNoteRef::new(OpenStringNote::new("E", 4), 0);
        assert_eq!(validate_fretted_note(&open, &tuning, 15), Ok(0));
    }

    #[test]
    fn test_fretted_note_out_of_range() {
        let note = FrettedNoteRef::new(OpenStringNote::new("E", 2), 16);
        let result = validate_fretted_note(&note, &default_tuning(), 15);
        assert!(result.is_err());
        if let Err(FretboardError::InvalidFrettedNote(message)) = result {
            assert!(message.contains("outside 0..=15"));
        }
    }

    #[test]
    fn test_fretted_note_last_fret_is_valid() {
        let note = FrettedNoteRef::new(OpenStringNote::new("A", 2), 15);
        assert_eq!(validate_fretted_note(&note, &default_tuning(), 15), Ok(4));
    }

    #[test]
    fn test_fretted_note_unknown_string() {
        let note = FrettedNoteRef::new(OpenStringNote::new("E", 3), 0);
        let result = validate_fretted_note(&note, &default_tuning(), 15);
        assert!(result.is_err());
        if let Err(FretboardError::InvalidFrettedNote(message)) = result {
            assert!(message.contains("E3 is not part of the tuning"));
        }
    }

    #[test]
    fn test_note_mode() {
        assert_eq!(validate_note_mode("letter"), Ok(NoteDisplayMode::Letter));
        assert_eq!(validate_note_mode("letter-display"), Ok(NoteDisplayMode::Letter));
        assert_eq!(validate_note_mode("interval"), Ok(NoteDisplayMode::Interval));
        assert!(matches!(
            validate_note_mode("Letter"),
            Err(FretboardError::InvalidNoteMode(_))
        ));
    }
}
