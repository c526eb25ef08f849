//! # Error Types
//!
//! This module defines all error types for chord realization.
//!
//! Every failure is terminal for the call: the grammar is deterministic, so the
//! same input always fails the same way, and no partial chord is ever returned.
//!
//! ## Error Types
//! - `UnresolvedRootPitch` - The root could not be turned into a pitch number
//! - `UnrecognizedChordQuality` - Text was left over after every grammar rule ran
//! - `EmptyChord` - Every degree ended up omitted
//! - `PitchResolutionError` - A chord tone fell outside the resolvable pitch range
//! - `ConfigError` - Invalid YAML options
//!
//! ## Usage
//! ```rust
//! use chord2notes::{chord_to_notes, ChordError};
//!
//! match chord_to_notes("C", "m7", 48) {
//!     Ok(notes) => println!("{}", notes.join(" ")),
//!     Err(ChordError::UnrecognizedChordQuality { leftover, .. }) => {
//!         eprintln!("Could not read '{}'", leftover);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// The root pitch name could not be resolved to a pitch number.
    ///
    /// # Example
    /// ```
    /// # use chord2notes::ChordError;
    /// let err = ChordError::UnresolvedRootPitch("H".to_string());
    /// assert_eq!(err.to_string(), "Unresolved root pitch: H");
    /// ```
    #[error("Unresolved root pitch: {0}")]
    UnresolvedRootPitch(String),

    /// Unparsed characters remained after all grammar rules ran.
    ///
    /// `leftover` holds the residual text so the caller can point at it.
    ///
    /// # Example
    /// ```
    /// # use chord2notes::ChordError;
    /// let err = ChordError::UnrecognizedChordQuality {
    ///     quality: "m7xyz".to_string(),
    ///     leftover: "xyz".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unrecognized chord quality 'm7xyz': cannot read 'xyz'");
    /// ```
    #[error("Unrecognized chord quality '{quality}': cannot read '{leftover}'")]
    UnrecognizedChordQuality { quality: String, leftover: String },

    /// The quality parsed cleanly but omitted every degree.
    #[error("Chord quality '{0}' leaves no notes")]
    EmptyChord(String),

    /// A reference or offset pitch could not be converted during the build.
    #[error("Pitch resolution error: {0}")]
    PitchResolutionError(String),

    /// Invalid options document.
    #[error("Invalid options: {0}")]
    ConfigError(String),
}

impl ChordError {
    /// True for both grammar failures: leftover text and an all-omitted chord.
    pub fn is_unrecognized_quality(&self) -> bool {
        matches!(
            self,
            ChordError::UnrecognizedChordQuality { .. } | ChordError::EmptyChord(_)
        )
    }
}
