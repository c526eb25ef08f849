//! Full chord symbols ("F#add9", "Bbm7", "Ｃｍ７")

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ChordError;
use crate::normalize::fold_glyphs;

static SYMBOL_REGEX: OnceLock<Regex> = OnceLock::new();

fn symbol_regex() -> &'static Regex {
    SYMBOL_REGEX.get_or_init(|| Regex::new(r"^([A-G](?:##|#|bb|b)?)(.*)$").expect("invalid regex pattern"))
}

/// A chord symbol split into root pitch and quality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    pub root: String,
    pub quality: String,
}

impl ChordSymbol {
    /// Split a symbol into root and quality.
    ///
    /// The root is an uppercase letter plus the longest accidental that
    /// follows it, so "Bb5" is a B-flat power chord. `x` is never read as a
    /// double sharp here; it stays in the quality.
    pub fn parse(symbol: &str) -> Result<Self, ChordError> {
        let folded = fold_glyphs(symbol.trim());
        let caps = symbol_regex()
            .captures(&folded)
            .ok_or_else(|| ChordError::UnresolvedRootPitch(symbol.to_string()))?;
        Ok(Self {
            root: caps[1].to_string(),
            quality: caps[2].to_string(),
        })
    }
}
