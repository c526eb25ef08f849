//! # Chord Quality Grammar
//!
//! Reduces a chord-quality string ("m7b5", "M7(9,13)", "dim7") to a
//! [`DegreeVector`].
//!
//! ## Pipeline
//! 1. [`normalize`](crate::normalize::normalize) folds glyphs and lifts tension clauses
//! 2. Rule groups run in a fixed order, each consuming the text it recognizes
//! 3. Tension tokens are appended to whatever text is left
//! 4. Tension and omission rules run
//! 5. Leftover text, or a chord with every degree omitted, is a failure
//!
//! ## Rule order
//! | # | Group          | Examples                         |
//! |---|----------------|----------------------------------|
//! | 1 | base           | `M`, `m`                         |
//! | 2 | augmented      | `aug`, `+`, `ø`                  |
//! | 3 | altered fifth  | `#5`, `b5`, `-5`                 |
//! | 4 | extension      | `5`, `6`, `7`, `9`, `11`, `13`   |
//! | 5 | suspension     | `sus4`, `sus2`                   |
//! | 6 | added tone     | `add2`, `add9`, `add13`          |
//! | 7 | major seventh  | `M7`, `maj9`, `△13`              |
//! | 8 | diminished     | `dim`, `o`, `dim7`               |
//! | 9 | tension        | `#9`, `b13`, `11`                |
//! |10 | omission       | `omit5`, `no3`                   |
//!
//! ## Diminished compounding
//! `dim`/`o` lowers whatever offsets the 3rd and 5th already hold instead of
//! setting fixed values, so `mdim` yields a doubly-flattened 3rd.
//!
//! ## Example
//! ```rust
//! use chord2notes::grammar::{parse_quality, Degree, Slot};
//!
//! let vector = parse_quality("m7b5").unwrap();
//! assert_eq!(vector.get(Degree::Third), Slot::Offset(-1));
//! assert_eq!(vector.get(Degree::Fifth), Slot::Offset(-1));
//! assert_eq!(vector.get(Degree::Seventh), Slot::Offset(0));
//! assert_eq!(vector.get(Degree::Ninth), Slot::Omitted);
//! ```

mod rules;
mod types;


use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::error::ChordError;
use crate::normalize::{normalize, NormalizedChord};
use rules::{CompiledRule, CompiledStep, Flow, Selection, GRAMMAR};

pub use types::{Degree, DegreeVector, Slot};

static COMPILED_GRAMMAR: OnceLock<Vec<CompiledStep>> = OnceLock::new();

fn grammar() -> &'static [CompiledStep] {
    COMPILED_GRAMMAR.get_or_init(|| rules::compile(GRAMMAR))
}

/// Parse a raw chord-quality string into a degree vector.
///
/// An empty quality is a bare major triad.
///
/// # Errors
/// - [`ChordError::UnrecognizedChordQuality`] if any text is left unread
/// - [`ChordError::EmptyChord`] if every degree ends up omitted
pub fn parse_quality(quality: &str) -> Result<DegreeVector, ChordError> {
    parse_normalized(quality, &normalize(quality))
}

/// Parse an already-normalized quality. `quality` is the raw text as given, used
/// only in error messages.
pub fn parse_normalized(quality: &str, chord: &NormalizedChord) -> Result<DegreeVector, ChordError> {
    let mut vector = DegreeVector::default();
    let mut text = chord.working_text.clone();

    for step in grammar() {
        match step {
            CompiledStep::Group {
                name,
                selection,
                rules,
            } => {
                text = match selection {
                    Selection::FirstMatch => apply_first_match(name, rules, text, &mut vector),
                    Selection::EveryMatch => apply_every_match(name, rules, text, &mut vector),
                };
            }
            CompiledStep::InjectTensions => {
                text.push_str(&chord.tension_tokens.concat());
            }
        }
    }

    if !text.is_empty() {
        debug!(quality, leftover = %text, "unrecognized chord quality");
        return Err(ChordError::UnrecognizedChordQuality {
            quality: quality.to_string(),
            leftover: text,
        });
    }
    if vector.is_empty() {
        debug!(quality, "chord quality omits every degree");
        return Err(ChordError::EmptyChord(quality.to_string()));
    }
    Ok(vector)
}

/// Fire the first matching rule, then any rules it cascades into.
fn apply_first_match(
    group: &str,
    rules: &[CompiledRule],
    text: String,
    vector: &mut DegreeVector,
) -> String {
    for (i, compiled) in rules.iter().enumerate() {
        let Some(residual) = compiled.consume(&text) else {
            continue;
        };
        trace!(group, rule = compiled.rule.label, residual = %residual, "rule matched");

        let mut flow = Flow::Cascade;
        for implied in rules[i..].iter().map(|c| c.rule) {
            if flow == Flow::Stop {
                break;
            }
            for action in implied.actions {
                action.apply(vector);
            }
            flow = implied.flow;
        }
        return residual;
    }
    text
}

/// Try every rule once, in order.
fn apply_every_match(
    group: &str,
    rules: &[CompiledRule],
    mut text: String,
    vector: &mut DegreeVector,
) -> String {
    for compiled in rules {
        if let Some(residual) = compiled.consume(&text) {
            trace!(group, rule = compiled.rule.label, residual = %residual, "rule matched");
            for action in compiled.rule.actions {
                action.apply(vector);
            }
            text = residual;
        }
    }
    text
}
