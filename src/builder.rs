//! Chord building
//!
//! Applies a [`DegreeVector`] to the dominant-13th reference stack of a root
//! and resolves every present degree to a pitch name.
//!
//! Output keeps degree order (root, 3rd, 5th, 7th, 9th, 11th, 13th), not pitch
//! order: `add2`/`add4`/`add6` place their tone an octave below the reference
//! degree, so it can land under an earlier degree.

use tracing::debug;

use crate::error::ChordError;
use crate::grammar::{Degree, DegreeVector};
use crate::theory::PitchTheory;

/// Dominant-13th stack (1, 3, 5, b7, 9, 11, 13) for one root, indexed by degree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceStack {
    pitches: Vec<String>,
}

impl ReferenceStack {
    /// Build the stack for `root`.
    ///
    /// The standard 13th formula leaves out the 11th, so it is derived
    /// separately as a perfect 11th above the root.
    pub fn build(theory: &impl PitchTheory, root: &str) -> Result<Self, ChordError> {
        let mut pitches = theory.chord_tones(root, "13").ok_or_else(|| {
            ChordError::PitchResolutionError(format!("cannot build 13th chord on '{}'", root))
        })?;
        if pitches.len() != 6 {
            return Err(ChordError::PitchResolutionError(format!(
                "13th chord on '{}' has {} tones, expected 6",
                root,
                pitches.len()
            )));
        }
        let eleventh = theory.transpose(root, "P11").ok_or_else(|| {
            ChordError::PitchResolutionError(format!("cannot transpose '{}' by an 11th", root))
        })?;
        pitches.insert(Degree::Eleventh.index(), eleventh);
        Ok(Self { pitches })
    }

    pub fn pitch(&self, degree: Degree) -> &str {
        &self.pitches[degree.index()]
    }

    pub fn pitches(&self) -> &[String] {
        &self.pitches
    }
}

/// Realize `vector` on `root`. Fails as a whole if any degree cannot be resolved.
pub fn build_chord(
    theory: &impl PitchTheory,
    root: &str,
    vector: &DegreeVector,
) -> Result<Vec<String>, ChordError> {
    let stack = ReferenceStack::build(theory, root)?;
    vector
        .present()
        .map(|(degree, offset)| shift_pitch(theory, stack.pitch(degree), offset))
        .collect()
}

fn shift_pitch(theory: &impl PitchTheory, pitch: &str, offset: i8) -> Result<String, ChordError> {
    let number = theory.to_number(pitch).ok_or_else(|| {
        ChordError::PitchResolutionError(format!("cannot resolve '{}'", pitch))
    })?;
    let shifted = number + i32::from(offset);
    theory.from_number(shifted).ok_or_else(|| {
        ChordError::PitchResolutionError(format!(
            "'{}' shifted by {} semitones is out of range",
            pitch, offset
        ))
    })
}

/// Fold `root` into the octave window starting at `base_range_start`.
///
/// Only the pitch class of `root` matters; its octave is discarded.
pub fn normalize_root(
    theory: &impl PitchTheory,
    root: &str,
    base_range_start: i32,
) -> Result<String, ChordError> {
    let number = theory
        .to_number(root)
        .ok_or_else(|| ChordError::UnresolvedRootPitch(root.to_string()))?;
    let base = i64::from(base_range_start);
    let folded = (i64::from(number) - base).rem_euclid(12) + base;
    debug!(root, base_range_start, folded, "folded root pitch");
    let folded = i32::try_from(folded).map_err(|_| {
        ChordError::PitchResolutionError(format!(
            "'{}' folded to {} is out of range",
            root, folded
        ))
    })?;
    theory.from_number(folded).ok_or_else(|| {
        ChordError::PitchResolutionError(format!(
            "'{}' folded to {} is out of range",
            root, folded
        ))
    })
}
