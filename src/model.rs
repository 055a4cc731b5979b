//! # Fretboard Model
//!
//! Owns the canonical fretboard state and keeps the note grid and clicked-note
//! selection consistent with it.
//!
//! ## State
//! - alphabet, tuning, fret count, interval context (validated copies)
//! - chord mode, clicking-disabled gate, note display mode
//! - selection: per string index, the clicked frets in click order
//! - note grid: derived from the above, rebuilt in full on every structural change
//!
//! ## Selection Rules
//!
//! | origin | chord mode | effect on the string's frets |
//! |---|---|---|
//! | user | on | replace with `{fret}`, or clear if `fret` was the only one |
//! | user | off | toggle `fret` |
//! | admin | either | add `fret` if absent |
//!
//! User gestures are dropped entirely while clicking is disabled.
//!
//! ## Structural Changes
//! - `set_tuning` rebuilds the grid and resizes the selection by string index:
//!   trailing strings are dropped or appended empty, kept strings keep their frets
//! - `set_num_frets` rebuilds the grid and drops frets above the new count
//! - interval context, root and alphabet changes rebuild the grid only
//!
//! Every setter validates and builds the new grid before touching `self`, so
//! a failed call leaves the model unchanged.
//!
//! ## Example
//! ```rust
//! use fretboard::{Fretboard, FretboardConfig, FrettedNoteRef, OpenStringNote, WriteOrigin};
//!
//! let mut board = Fretboard::new(FretboardConfig::default())?;
//! let low_e = OpenStringNote::new("E", 2);
//! board.set_clicked_notes(&[FrettedNoteRef::new(low_e, 3)], WriteOrigin::UserGesture)?;
//!
//! let clicked = board.clicked_notes();
//! assert_eq!(clicked[0].notes[0].note.letter, "G");
//! assert_eq!(clicked[0].notes[0].note.interval, "5");
//! # Ok::<(), fretboard::FretboardError>(())
//! ```

use log::{debug, trace};
use serde::Serialize;
use std::fmt;

use crate::config::FretboardConfig;
use crate::error::FretboardError;
use crate::note::{
    Alphabet, ClickedString, FretPosition, FrettedNoteRef, IntervalContext, Note,
    NoteDisplayMode, OpenStringNote, WriteOrigin,
};
use crate::pitch::{fretted_pitch, semitones_above};
use crate::validate::{
    validate_fret_count, validate_fretted_note, validate_interval_context, validate_root,
    validate_tuning,
};

/// Host callback run after a user gesture has updated the selection.
pub type SelectionListener = Box<dyn FnMut(&[ClickedString])>;

/// Everything a renderer needs to draw the board, as one owned value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardSnapshot {
    pub notes: Vec<Vec<FretPosition>>,
    pub clicked_notes: Vec<ClickedString>,
    pub note_display_mode: NoteDisplayMode,
    pub chord_mode: bool,
    pub clicking_disabled: bool,
}

pub struct Fretboard {
    alphabet: Alphabet,
    tuning: Vec<OpenStringNote>,
    num_frets: u32,
    interval_context: IntervalContext,
    chord_mode: bool,
    clicking_disabled: bool,
    note_display_mode: NoteDisplayMode,
    selection: Vec<Vec<u32>>,
    notes: Vec<Vec<FretPosition>>,
    listeners: Vec<SelectionListener>,
}

impl fmt::Debug for Fretboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fretboard")
            .field("alphabet", &self.alphabet)
            .field("tuning", &self.tuning)
            .field("num_frets", &self.num_frets)
            .field("interval_context", &self.interval_context)
            .field("chord_mode", &self.chord_mode)
            .field("clicking_disabled", &self.clicking_disabled)
            .field("note_display_mode", &self.note_display_mode)
            .field("selection", &self.selection)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Compute every position on every string.
fn build_grid(
    alphabet: &Alphabet,
    tuning: &[OpenStringNote],
    num_frets: u32,
    ctx: &IntervalContext,
) -> Result<Vec<Vec<FretPosition>>, FretboardError> {
    let root = alphabet.index_of(&ctx.root).ok_or_else(|| {
        FretboardError::InvalidIntervalContext(format!("root '{}' is not in the alphabet", ctx.root))
    })?;

    tuning
        .iter()
        .enumerate()
        .map(|(string_index, open)| -> Result<Vec<FretPosition>, FretboardError> {
            let open_index = alphabet.index_of(&open.letter).ok_or_else(|| {
                FretboardError::InvalidTuning(format!(
                    "note {} uses letter '{}' which is not in the alphabet",
                    open, open.letter
                ))
            })?;

            (0..=num_frets)
                .map(|fret| {
                    let (pitch_class, octave) = fretted_pitch(open_index, open.octave, fret)
                        .ok_or_else(|| {
                            FretboardError::InvalidTuning(format!(
                                "octave of {} fretted at {} is out of range",
                                open, fret
                            ))
                        })?;
                    let interval = ctx
                        .intervals
                        .get(semitones_above(pitch_class, root))
                        .cloned()
                        .unwrap_or_default();
                    Ok(FretPosition {
                        string_index,
                        fret,
                        note: Note {
                            letter: alphabet.label(pitch_class).to_string(),
                            octave,
                            interval,
                        },
                    })
                })
                .collect()
        })
        .collect()
}

impl Fretboard {
    /// Validate `config` and build the note grid.
    ///
    /// # Errors
    /// Returns the first [`FretboardError`] raised by the alphabet, tuning,
    /// fret count or interval context validators.
    pub fn new(config: FretboardConfig) -> Result<Self, FretboardError> {
        let alphabet = Alphabet::new(config.alphabet)?;
        validate_tuning(&config.tuning, &alphabet)?;
        validate_fret_count(config.num_frets)?;
        validate_interval_context(&config.interval_context, &alphabet)?;

        let notes = build_grid(
            &alphabet,
            &config.tuning,
            config.num_frets,
            &config.interval_context,
        )?;
        let selection = vec![Vec::new(); config.tuning.len()];

        debug!(
            "fretboard created: {} strings, {} frets, root {}, chord mode {}",
            config.tuning.len(),
            config.num_frets,
            config.interval_context.root,
            config.chord_mode
        );

        Ok(Self {
            alphabet,
            tuning: config.tuning,
            num_frets: config.num_frets,
            interval_context: config.interval_context,
            chord_mode: config.chord_mode,
            clicking_disabled: config.clicking_disabled,
            note_display_mode: config.note_display_mode,
            selection,
            notes,
            listeners: Vec::new(),
        })
    }

    /// Every position on the board, one inner `Vec` per string, frets `0..=num_frets`.
    pub fn all_notes(&self) -> Vec<Vec<FretPosition>> {
        self.notes.clone()
    }

    pub fn note_at(&self, string_index: usize, fret: u32) -> Option<FretPosition> {
        self.notes
            .get(string_index)
            .and_then(|string| string.get(fret as usize))
            .cloned()
    }

    pub fn tuning(&self) -> Vec<OpenStringNote> {
        self.tuning.clone()
    }

    /// Replace the tuning.
    ///
    /// Selection is kept by string index: with fewer strings the trailing
    /// entries are dropped, with more strings empty entries are appended.
    /// Frets on kept strings are not re-matched by pitch.
    pub fn set_tuning(&mut self, tuning: Vec<OpenStringNote>) -> Result<(), FretboardError> {
        validate_tuning(&tuning, &self.alphabet)?;
        let notes = build_grid(&self.alphabet, &tuning, self.num_frets, &self.interval_context)?;

        debug!("tuning changed: {} -> {} strings", self.tuning.len(), tuning.len());

        self.selection.resize_with(tuning.len(), Vec::new);
        self.tuning = tuning;
        self.notes = notes;
        Ok(())
    }

    pub fn num_frets(&self) -> u32 {
        self.num_frets
    }

    /// Change the fret count, dropping clicked frets above the new count.
    pub fn set_num_frets(&mut self, num_frets: u32) -> Result<(), FretboardError> {
        validate_fret_count(num_frets)?;
        let notes = build_grid(&self.alphabet, &self.tuning, num_frets, &self.interval_context)?;

        debug!("fret count changed: {} -> {}", self.num_frets, num_frets);

        for frets in &mut self.selection {
            frets.retain(|&fret| fret <= num_frets);
        }
        self.num_frets = num_frets;
        self.notes = notes;
        Ok(())
    }

    pub fn interval_context(&self) -> IntervalContext {
        self.interval_context.clone()
    }

    /// Replace root and interval table. Clicked frets are unaffected.
    pub fn set_interval_settings(&mut self, ctx: IntervalContext) -> Result<(), FretboardError> {
        validate_interval_context(&ctx, &self.alphabet)?;
        let notes = build_grid(&self.alphabet, &self.tuning, self.num_frets, &ctx)?;

        debug!("interval context changed: root {} -> {}", self.interval_context.root, ctx.root);

        self.interval_context = ctx;
        self.notes = notes;
        Ok(())
    }

    pub fn root(&self) -> String {
        self.interval_context.root.clone()
    }

    pub fn set_root(&mut self, root: &str) -> Result<(), FretboardError> {
        validate_root(root, &self.alphabet)?;
        let ctx = IntervalContext::new(root, self.interval_context.intervals.clone());
        self.set_interval_settings(ctx)
    }

    pub fn alphabet(&self) -> Vec<String> {
        self.alphabet.labels().to_vec()
    }

    /// Swap in a new alphabet. The current tuning and root must be spelled in it.
    pub fn set_alphabet(&mut self, labels: Vec<String>) -> Result<(), FretboardError> {
        let alphabet = Alphabet::new(labels)?;
        validate_tuning(&self.tuning, &alphabet)?;
        validate_interval_context(&self.interval_context, &alphabet)?;
        let notes = build_grid(&alphabet, &self.tuning, self.num_frets, &self.interval_context)?;

        debug!("alphabet changed: {:?}", alphabet.labels());

        self.alphabet = alphabet;
        self.notes = notes;
        Ok(())
    }

    pub fn chord_mode(&self) -> bool {
        self.chord_mode
    }

    /// Takes effect on the next selection write; the current selection is kept.
    pub fn set_chord_mode(&mut self, chord_mode: bool) {
        debug!("chord mode: {}", chord_mode);
        self.chord_mode = chord_mode;
    }

    pub fn clicking_disabled(&self) -> bool {
        self.clicking_disabled
    }

    pub fn set_clicking_disabled(&mut self, disabled: bool) {
        debug!("clicking disabled: {}", disabled);
        self.clicking_disabled = disabled;
    }

    pub fn note_display_mode(&self) -> NoteDisplayMode {
        self.note_display_mode
    }

    pub fn set_note_display_mode(&mut self, mode: NoteDisplayMode) {
        debug!("note display mode: {}", mode);
        self.note_display_mode = mode;
    }

    /// Clicked positions grouped by string, skipping strings with nothing clicked.
    ///
    /// Within a string, notes appear in the order they were clicked.
    pub fn clicked_notes(&self) -> Vec<ClickedString> {
        self.selection
            .iter()
            .enumerate()
            .filter(|(_, frets)| !frets.is_empty())
            .filter_map(|(string_index, frets)| {
                let string = self.tuning.get(string_index)?.clone();
                let positions = self.notes.get(string_index)?;
                let notes = frets
                    .iter()
                    .filter_map(|&fret| positions.get(fret as usize).cloned())
                    .collect();
                Some(ClickedString {
                    string_index,
                    string,
                    notes,
                })
            })
            .collect()
    }

    /// The current selection as references that `set_clicked_notes` accepts.
    pub fn clicked_note_refs(&self) -> Vec<FrettedNoteRef> {
        self.selection
            .iter()
            .zip(&self.tuning)
            .flat_map(|(frets, string)| {
                frets
                    .iter()
                    .map(move |&fret| FrettedNoteRef::new(string.clone(), fret))
            })
            .collect()
    }

    /// Apply clicks to the selection.
    ///
    /// All references are resolved first; if any names an unknown string or
    /// an out-of-range fret the call fails and nothing is applied. Then each
    /// reference is applied in order following the rules in the module docs.
    /// After a user gesture, every registered listener is called with the new
    /// selection.
    pub fn set_clicked_notes(
        &mut self,
        notes: &[FrettedNoteRef],
        origin: WriteOrigin,
    ) -> Result<(), FretboardError> {
        if origin == WriteOrigin::UserGesture && self.clicking_disabled {
            debug!("ignoring {} clicked note(s): clicking is disabled", notes.len());
            return Ok(());
        }

        let resolved = notes
            .iter()
            .map(|note| {
                validate_fretted_note(note, &self.tuning, self.num_frets)
                    .map(|string_index| (string_index, note.fret))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (string_index, fret) in resolved {
            self.apply_click(string_index, fret, origin);
        }

        if origin == WriteOrigin::UserGesture {
            self.notify_listeners();
        }
        Ok(())
    }

    fn apply_click(&mut self, string_index: usize, fret: u32, origin: WriteOrigin) {
        let chord_mode = self.chord_mode;
        let Some(frets) = self.selection.get_mut(string_index) else {
            return;
        };

        match origin {
            WriteOrigin::UserGesture if chord_mode => {
                if frets.len() == 1 && frets[0] == fret {
                    frets.clear();
                } else {
                    frets.clear();
                    frets.push(fret);
                }
            }
            WriteOrigin::UserGesture => {
                if let Some(pos) = frets.iter().position(|&f| f == fret) {
                    frets.remove(pos);
                } else {
                    frets.push(fret);
                }
            }
            WriteOrigin::AdministrativeWrite => {
                if !frets.contains(&fret) {
                    frets.push(fret);
                }
            }
        }

        trace!("string {} fret {} ({:?}): now {:?}", string_index, fret, origin, frets);
    }

    pub fn clear_clicked_notes(&mut self) {
        trace!("clearing clicked notes");
        for frets in &mut self.selection {
            frets.clear();
        }
    }

    /// Register a callback for user-driven selection changes.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&[ClickedString]) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    fn notify_listeners(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let clicked = self.clicked_notes();
        for listener in &mut self.listeners {
            listener(clicked.as_slice());
        }
    }

    pub fn snapshot(&self) -> FretboardSnapshot {
        FretboardSnapshot {
            notes: self.all_notes(),
            clicked_notes: self.clicked_notes(),
            note_display_mode: self.note_display_mode,
            chord_mode: self.chord_mode,
            clicking_disabled: self.clicking_disabled,
        }
    }

    /// Tear the model down. Listeners are dropped with it.
    pub fn destroy(mut self) {
        debug!("fretboard destroyed ({} listener(s) dropped)", self.listeners.len());
        self.listeners.clear();
    }
}
