//! Chord quality normalization
//!
//! Folds full-width and musical glyphs to plain ASCII and lifts parenthesized
//! tension clauses ("(9,13)") out of the quality so the grammar can re-read them
//! as plain modifiers after the primary rules have run.

use std::sync::OnceLock;

use regex::Regex;

/// A quality string ready for the grammar
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedChord {
    /// Quality text with every parenthesized clause removed
    pub working_text: String,
    /// Tension tokens in the order they appeared
    pub tension_tokens: Vec<String>,
}

/// Full-width ASCII block (！ .. ～) maps onto ! .. ~
const FULL_WIDTH_START: u32 = 0xFF01;
const FULL_WIDTH_END: u32 = 0xFF5E;
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

/// Space followed by an ideographic space
const WIDE_GAP: &str = " \u{3000}";

static TENSION_REGEX: OnceLock<Regex> = OnceLock::new();
static TENSION_SPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn tension_regex() -> &'static Regex {
    TENSION_REGEX.get_or_init(|| Regex::new(r"[(（]([^)）]*)[)）]").expect("invalid regex pattern"))
}

fn tension_space_regex() -> &'static Regex {
    TENSION_SPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("invalid regex pattern"))
}

/// Fold full-width characters to half-width and canonicalize sharp/flat glyphs.
pub fn fold_glyphs(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .map(|c| {
            let code = c as u32;
            if (FULL_WIDTH_START..=FULL_WIDTH_END).contains(&code) {
                char::from_u32(code - FULL_WIDTH_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .map(|c| match c {
            '♯' => '#',
            '♭' => 'b',
            other => other,
        })
        .collect();
    folded.replace(WIDE_GAP, "")
}

/// Normalize a raw quality string and extract its tension clauses.
///
/// Never fails: an empty string yields empty working text and no tensions.
///
/// # Example
/// ```
/// use chord2notes::normalize::normalize;
///
/// let chord = normalize("Ｍ7（9, ♯11）");
/// assert_eq!(chord.working_text, "M7");
/// assert_eq!(chord.tension_tokens, vec!["9", "#11"]);
/// ```
pub fn normalize(raw: &str) -> NormalizedChord {
    let text = fold_glyphs(raw);

    let mut tension_tokens = Vec::new();
    for caps in tension_regex().captures_iter(&text) {
        let clause = tension_space_regex().replace_all(&caps[1], "");
        tension_tokens.extend(
            clause
                .split([',', '，'])
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        );
    }
    let working_text = tension_regex().replace_all(&text, "").into_owned();

    NormalizedChord {
        working_text,
        tension_tokens,
    }
}
