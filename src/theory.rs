//! Pitch naming and interval arithmetic.
//!
//! The chord pipeline never does pitch math on its own; it goes through the
//! [`PitchTheory`] trait so the grammar and builder can be exercised against a
//! fake implementation. [`StandardTheory`] is the MIDI-numbered default.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lowest and highest resolvable pitch numbers
pub const MIN_PITCH: i32 = 0;
pub const MAX_PITCH: i32 = 127;

/// Octave assumed for pitch names written without one ("C" == "C4")
pub const DEFAULT_OCTAVE: i32 = 4;

/// Pitch-name <-> number conversion and interval transposition.
pub trait PitchTheory {
    /// Resolve a pitch name ("C", "F#4", "Bb3") to its pitch number.
    fn to_number(&self, pitch: &str) -> Option<i32>;

    /// Name a pitch number. `None` when the number is out of range.
    fn from_number(&self, number: i32) -> Option<String>;

    /// Transpose a pitch by a named interval ("M3", "P11").
    fn transpose(&self, pitch: &str, interval: &str) -> Option<String>;

    /// Chord tones of a named chord formula built on `root`.
    fn chord_tones(&self, root: &str, quality: &str) -> Option<Vec<String>>;
}

/// How black keys are named when converting numbers back to pitch names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Flat,
    Sharp,
}

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Interval quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalQuality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
}

/// A named interval such as `M3`, `P5` or `m13`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub quality: IntervalQuality,
    pub number: u8,
}

impl Interval {
    /// Parse an interval name like "M3", "P11", "m7", "A4", "d5".
    ///
    /// Perfect qualities are only valid on unison/4th/5th degrees (and their
    /// compounds), major/minor only on the others.
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let quality = match chars.next()? {
            'P' => IntervalQuality::Perfect,
            'M' => IntervalQuality::Major,
            'm' => IntervalQuality::Minor,
            'A' => IntervalQuality::Augmented,
            'd' => IntervalQuality::Diminished,
            _ => return None,
        };
        let number: u8 = chars.as_str().parse().ok()?;
        if number == 0 {
            return None;
        }
        let interval = Interval { quality, number };
        let valid = match quality {
            IntervalQuality::Perfect => interval.is_perfect_degree(),
            IntervalQuality::Major | IntervalQuality::Minor => !interval.is_perfect_degree(),
            _ => true,
        };
        valid.then_some(interval)
    }

    fn is_perfect_degree(&self) -> bool {
        matches!((self.number - 1) % 7, 0 | 3 | 4)
    }

    /// Size in semitones
    pub fn semitones(&self) -> i32 {
        let simple = (self.number as i32 - 1) % 7;
        let octaves = (self.number as i32 - 1) / 7;
        let base = match simple {
            0 => 0,
            1 => 2,
            2 => 4,
            3 => 5,
            4 => 7,
            5 => 9,
            _ => 11,
        };
        let adjust = match (self.quality, self.is_perfect_degree()) {
            (IntervalQuality::Perfect | IntervalQuality::Major, _) => 0,
            (IntervalQuality::Minor, _) => -1,
            (IntervalQuality::Augmented, _) => 1,
            (IntervalQuality::Diminished, true) => -1,
            (IntervalQuality::Diminished, false) => -2,
        };
        base + adjust + octaves * 12
    }
}

/// Interval formulas for the chord qualities `chord_tones` understands
fn chord_formula(quality: &str) -> Option<&'static [&'static str]> {
    let formula: &'static [&'static str] = match quality {
        "" | "M" => &["P1", "M3", "P5"],
        "m" => &["P1", "m3", "P5"],
        "7" => &["P1", "M3", "P5", "m7"],
        "M7" => &["P1", "M3", "P5", "M7"],
        "m7" => &["P1", "m3", "P5", "m7"],
        "9" => &["P1", "M3", "P5", "m7", "M9"],
        // 11th omitted
        "13" => &["P1", "M3", "P5", "m7", "M9", "M13"],
        _ => return None,
    };
    Some(formula)
}

static PITCH_REGEX: OnceLock<Regex> = OnceLock::new();

fn pitch_regex() -> &'static Regex {
    PITCH_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Ga-g])(##|#|x|bb|b)?(-?\d+)?$").expect("invalid regex pattern")
    })
}

/// MIDI-numbered pitch theory: C4 = 60, range 0..=127
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTheory {
    pub spelling: Spelling,
}

impl StandardTheory {
    pub fn new(spelling: Spelling) -> Self {
        Self { spelling }
    }
}

/// Note letter to semitone offset from C
fn letter_to_semitone(letter: char) -> i32 {
    match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        _ => 11,
    }
}

fn accidental_to_semitones(accidental: &str) -> i32 {
    match accidental {
        "#" => 1,
        "##" | "x" => 2,
        "b" => -1,
        "bb" => -2,
        _ => 0,
    }
}

impl PitchTheory for StandardTheory {
    fn to_number(&self, pitch: &str) -> Option<i32> {
        let caps = pitch_regex().captures(pitch.trim())?;
        let letter = caps.get(1)?.as_str().chars().next()?;
        let accidental = caps.get(2).map_or("", |m| m.as_str());
        let octave = match caps.get(3) {
            Some(m) => m.as_str().parse::<i32>().ok()?,
            None => DEFAULT_OCTAVE,
        };
        let number = octave
            .checked_add(1)?
            .checked_mul(12)?
            .checked_add(letter_to_semitone(letter) + accidental_to_semitones(accidental))?;
        (MIN_PITCH..=MAX_PITCH).contains(&number).then_some(number)
    }

    fn from_number(&self, number: i32) -> Option<String> {
        if !(MIN_PITCH..=MAX_PITCH).contains(&number) {
            return None;
        }
        let names = match self.spelling {
            Spelling::Flat => &FLAT_NAMES,
            Spelling::Sharp => &SHARP_NAMES,
        };
        let name = names[number.rem_euclid(12) as usize];
        let octave = number.div_euclid(12) - 1;
        Some(format!("{}{}", name, octave))
    }

    fn transpose(&self, pitch: &str, interval: &str) -> Option<String> {
        let interval = Interval::from_str(interval)?;
        self.from_number(self.to_number(pitch)? + interval.semitones())
    }

    fn chord_tones(&self, root: &str, quality: &str) -> Option<Vec<String>> {
        chord_formula(quality)?
            .iter()
            .map(|interval| self.transpose(root, interval))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_numbers() {
        let theory = StandardTheory::default();
        assert_eq!(theory.to_number("C4"), Some(60));
        assert_eq!(theory.to_number("C"), Some(60));
        assert_eq!(theory.to_number("A4"), Some(69));
        assert_eq!(theory.to_number("Bb3"), Some(58));
        assert_eq!(theory.to_number("F#4"), Some(66));
        assert_eq!(theory.to_number("Cb4"), Some(59));
        assert_eq!(theory.to_number("Fx2"), Some(43));
        assert_eq!(theory.to_number("C-1"), Some(0));
        assert_eq!(theory.to_number("G9"), Some(127));
    }

    #[test]
    fn test_unresolvable_pitches() {
        let theory = StandardTheory::default();
        assert_eq!(theory.to_number("H"), None);
        assert_eq!(theory.to_number(""), None);
        assert_eq!(theory.to_number("C#x"), None);
        assert_eq!(theory.to_number("G#9"), None); // 128
        assert_eq!(theory.to_number("Cb-1"), None); // -1
        assert_eq!(theory.to_number("C999999999"), None);
        assert_eq!(theory.to_number("C-999999999"), None);
    }

    #[test]
    fn test_spelling() {
        let flats = StandardTheory::new(Spelling::Flat);
        let sharps = StandardTheory::new(Spelling::Sharp);
        assert_eq!(flats.from_number(61), Some("Db4".to_string()));
        assert_eq!(sharps.from_number(61), Some("C#4".to_string()));
        assert_eq!(flats.from_number(48), Some("C3".to_string()));
        assert_eq!(flats.from_number(0), Some("C-1".to_string()));
        assert_eq!(flats.from_number(128), None);
        assert_eq!(flats.from_number(-1), None);
    }

    #[test]
    fn test_interval_semitones() {
        let semitones = |name: &str| Interval::from_str(name).map(|i| i.semitones());
        assert_eq!(semitones("P1"), Some(0));
        assert_eq!(semitones("m3"), Some(3));
        assert_eq!(semitones("M3"), Some(4));
        assert_eq!(semitones("d5"), Some(6));
        assert_eq!(semitones("A5"), Some(8));
        assert_eq!(semitones("m7"), Some(10));
        assert_eq!(semitones("d7"), Some(9));
        assert_eq!(semitones("M9"), Some(14));
        assert_eq!(semitones("P11"), Some(17));
        assert_eq!(semitones("M13"), Some(21));
    }

    #[test]
    fn test_invalid_intervals() {
        assert_eq!(Interval::from_str("M11"), None);
        assert_eq!(Interval::from_str("P3"), None);
        assert_eq!(Interval::from_str("X3"), None);
        assert_eq!(Interval::from_str("M0"), None);
        assert_eq!(Interval::from_str("M"), None);
    }

    #[test]
    fn test_thirteenth_formula_skips_eleventh() {
        let theory = StandardTheory::default();
        let tones = theory.chord_tones("C3", "13").unwrap();
        assert_eq!(tones, vec!["C3", "E3", "G3", "Bb3", "D4", "A4"]);
        assert_eq!(theory.chord_tones("C3", "sus13"), None);
    }

    #[test]
    fn test_transpose_out_of_range() {
        let theory = StandardTheory::default();
        assert_eq!(theory.transpose("C3", "P11"), Some("F4".to_string()));
        assert_eq!(theory.transpose("G9", "M3"), None);
        assert_eq!(theory.chord_tones("C9", "13"), None);
    }
}
