//! Realization options
//!
//! Options can be built in code or read from a YAML document:
//!
//! ```yaml
//! base-octave-start: 60
//! spelling: sharp
//! ```

use serde::Deserialize;

use crate::error::ChordError;
use crate::theory::{Spelling, StandardTheory};

/// Default lower bound of the root's octave window (C3)
pub const DEFAULT_BASE_OCTAVE_START: i32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct ChordOptions {
    /// Pitch number where the root's octave window begins
    pub base_octave_start: i32,
    /// Naming of black keys in the output
    pub spelling: Spelling,
}

impl Default for ChordOptions {
    fn default() -> Self {
        Self {
            base_octave_start: DEFAULT_BASE_OCTAVE_START,
            spelling: Spelling::default(),
        }
    }
}

impl ChordOptions {
    /// Parse options from YAML. Missing keys keep their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ChordError::ConfigError(e.to_string()))
    }

    pub fn with_base_octave_start(mut self, base_octave_start: i32) -> Self {
        self.base_octave_start = base_octave_start;
        self
    }

    pub fn with_spelling(mut self, spelling: Spelling) -> Self {
        self.spelling = spelling;
        self
    }

    /// Pitch theory matching these options
    pub fn theory(&self) -> StandardTheory {
        StandardTheory::new(self.spelling)
    }
}
