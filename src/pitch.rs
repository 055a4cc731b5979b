//! Pitch-class arithmetic on a 12-label alphabet.

use std::collections::HashSet;
use std::hash::Hash;

use crate::note::PITCH_CLASS_COUNT;

/// Pitch class and octave reached by moving `fret` semitones up from an open
/// string whose letter sits at `open_index` in the alphabet.
///
/// The octave steps up each time the pitch class wraps past index 11.
/// Returns `None` when the octave number would overflow `i32`.
pub fn fretted_pitch(open_index: usize, open_octave: i32, fret: u32) -> Option<(usize, i32)> {
    let absolute = open_index.checked_add(fret as usize)?;
    let pitch_class = absolute % PITCH_CLASS_COUNT;
    let octave_adj = i32::try_from(absolute / PITCH_CLASS_COUNT).ok()?;
    Some((pitch_class, open_octave.checked_add(octave_adj)?))
}

/// Semitone distance from `root` up to `pitch_class`, in `0..12`.
pub fn semitones_above(pitch_class: usize, root: usize) -> usize {
    (pitch_class as i64 - root as i64).rem_euclid(PITCH_CLASS_COUNT as i64) as usize
}

/// First element that appears earlier in the slice as well.
pub fn first_duplicate<T: Eq + Hash>(items: &[T]) -> Option<&T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().find(|item| !seen.insert(*item))
}
