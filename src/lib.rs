//! # Fretboard
//!
//! Note model for an interactive fretboard widget. Given a tuning, a fret count
//! and a root/interval table, it works out the letter, octave and interval of
//! every position, and keeps track of which positions are clicked.
//!
//! Rendering and input handling live in the host: it draws from
//! [`Fretboard::snapshot`] (or [`Fretboard::all_notes`] and
//! [`Fretboard::clicked_notes`]) and feeds user clicks back through
//! [`Fretboard::set_clicked_notes`] with [`WriteOrigin::UserGesture`].

pub mod config;
pub mod error;
pub mod model;
pub mod note;
pub mod pitch;
pub mod validate;

pub use config::{FretboardConfig, RawConfig};
pub use error::*;
pub use model::{Fretboard, FretboardSnapshot, SelectionListener};
pub use note::*;
pub use validate::*;

/// Build a fretboard from a YAML configuration document.
pub fn from_yaml(content: &str) -> Result<Fretboard, FretboardError> {
    let config = FretboardConfig::from_yaml(content)?;
    Fretboard::new(config)
}
