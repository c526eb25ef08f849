//! # Public API
//!
//! Entry points for turning chord symbols into pitches.
//!
//! ## Functions
//!
//! - [`chord_to_notes()`] - Root + quality + octave window, default naming
//! - [`chord_to_notes_with()`] - Same, against any [`PitchTheory`]
//! - [`chord_to_notes_with_options()`] - Root + quality with [`ChordOptions`]
//! - [`symbol_to_notes()`] - A full symbol such as `"F#add9"`
//! - [`chord_to_midi()`] - Pitch numbers instead of names
//!
//! ## Typical Usage
//!
//! ```rust
//! use chord2notes::chord_to_notes;
//!
//! let notes = chord_to_notes("C", "m7", 48)?;
//! assert_eq!(notes, vec!["C3", "Eb3", "G3", "Bb3"]);
//! # Ok::<(), chord2notes::ChordError>(())
//! ```
//!
//! Every call is a pure function of its arguments: nothing is cached per call
//! and callers on different threads need no coordination.

use crate::builder::{build_chord, normalize_root};
use crate::config::ChordOptions;
use crate::error::ChordError;
use crate::grammar::parse_quality;
use crate::symbol::ChordSymbol;
use crate::theory::{PitchTheory, StandardTheory};

/// Realize `quality` on `root`, with the root folded into the octave that
/// starts at pitch number `base_octave_start`.
///
/// An empty quality is a major triad.
///
/// # Pipeline
/// 1. Parse the quality into a degree vector
/// 2. Fold the root into the base octave
/// 3. Build the reference stack and apply the vector
///
/// # Example
/// ```rust
/// use chord2notes::chord_to_notes;
///
/// assert_eq!(chord_to_notes("G", "7", 48)?, vec!["G3", "B3", "D4", "F4"]);
/// # Ok::<(), chord2notes::ChordError>(())
/// ```
///
/// # Errors
/// Returns [`ChordError`] if the root, the quality or any chord tone cannot
/// be resolved.
pub fn chord_to_notes(
    root: &str,
    quality: &str,
    base_octave_start: i32,
) -> Result<Vec<String>, ChordError> {
    chord_to_notes_with(&StandardTheory::default(), root, quality, base_octave_start)
}

/// [`chord_to_notes()`] against a caller-supplied pitch theory.
pub fn chord_to_notes_with(
    theory: &impl PitchTheory,
    root: &str,
    quality: &str,
    base_octave_start: i32,
) -> Result<Vec<String>, ChordError> {
    let vector = parse_quality(quality)?;
    let root = normalize_root(theory, root, base_octave_start)?;
    build_chord(theory, &root, &vector)
}

/// Realize `quality` on `root` using the window and spelling from `options`.
pub fn chord_to_notes_with_options(
    root: &str,
    quality: &str,
    options: &ChordOptions,
) -> Result<Vec<String>, ChordError> {
    chord_to_notes_with(&options.theory(), root, quality, options.base_octave_start)
}

/// Realize a full chord symbol such as `"Cm7b5"` or `"F#add9"`.
///
/// # Example
/// ```rust
/// use chord2notes::{symbol_to_notes, ChordOptions};
///
/// let notes = symbol_to_notes("Bdim7", &ChordOptions::default())?;
/// assert_eq!(notes, vec!["B3", "D4", "F4", "Ab4"]);
/// # Ok::<(), chord2notes::ChordError>(())
/// ```
pub fn symbol_to_notes(symbol: &str, options: &ChordOptions) -> Result<Vec<String>, ChordError> {
    let symbol = ChordSymbol::parse(symbol)?;
    chord_to_notes_with_options(&symbol.root, &symbol.quality, options)
}

/// Pitch numbers of the realized chord, in the same order as the names.
pub fn chord_to_midi(
    root: &str,
    quality: &str,
    options: &ChordOptions,
) -> Result<Vec<u8>, ChordError> {
    let theory = options.theory();
    chord_to_notes_with(&theory, root, quality, options.base_octave_start)?
        .iter()
        .map(|name| {
            theory
                .to_number(name)
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| ChordError::PitchResolutionError(format!("cannot resolve '{}'", name)))
        })
        .collect()
}
