pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod symbol;
pub mod theory;

pub use api::*;
pub use builder::{build_chord, normalize_root, ReferenceStack};
pub use config::{ChordOptions, DEFAULT_BASE_OCTAVE_START};
pub use error::*;
pub use grammar::{parse_quality, Degree, DegreeVector, Slot};
pub use normalize::{normalize, NormalizedChord};
pub use symbol::ChordSymbol;
pub use theory::{Interval, PitchTheory, Spelling, StandardTheory};
