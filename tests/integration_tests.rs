//! Integration tests for chord realization
//!
//! Tests the full pipeline from root + quality (or full symbol) to pitch names.

use std::thread;

use chord2notes::{
    chord_to_midi, chord_to_notes, chord_to_notes_with_options, symbol_to_notes, ChordError,
    ChordOptions, PitchTheory, Spelling, StandardTheory,
};
use pretty_assertions::assert_eq;

const ROOTS: [&str; 14] = [
    "C", "C#", "Db", "D", "Eb", "E", "F", "F#", "Gb", "G", "Ab", "A", "Bb", "B",
];

fn numbers(notes: &[String]) -> Vec<i32> {
    let theory = StandardTheory::default();
    notes.iter().map(|n| theory.to_number(n).unwrap()).collect()
}

#[test]
fn test_empty_quality_is_major_triad_for_every_root() {
    let theory = StandardTheory::default();
    for root in ROOTS {
        let notes = chord_to_notes(root, "", 48).unwrap();
        assert_eq!(notes.len(), 3, "{}", root);
        let pitches = numbers(&notes);
        assert_eq!(pitches[1] - pitches[0], 4, "{}", root);
        assert_eq!(pitches[2] - pitches[0], 7, "{}", root);
        assert!((48..60).contains(&pitches[0]), "{}", root);
        assert_eq!(pitches[0] % 12, theory.to_number(root).unwrap() % 12, "{}", root);
    }
}

#[test]
fn test_common_chords_on_c() {
    let cases = [
        ("m7", vec!["C3", "Eb3", "G3", "Bb3"]),
        ("7", vec!["C3", "E3", "G3", "Bb3"]),
        ("M7", vec!["C3", "E3", "G3", "B3"]),
        ("dim7", vec!["C3", "Eb3", "Gb3", "A3"]),
        ("m7b5", vec!["C3", "Eb3", "Gb3", "Bb3"]),
        ("aug", vec!["C3", "E3", "Ab3"]),
        ("6", vec!["C3", "E3", "G3", "A3"]),
        ("13", vec!["C3", "E3", "G3", "Bb3", "D4", "F4", "A4"]),
        ("7#9", vec!["C3", "E3", "G3", "Bb3", "Eb4"]),
        ("add9", vec!["C3", "E3", "G3", "D4"]),
    ];
    for (quality, expected) in cases {
        assert_eq!(chord_to_notes("C", quality, 48).unwrap(), expected, "{}", quality);
    }
}

#[test]
fn test_tension_clause_reinjection() {
    assert_eq!(
        chord_to_notes("C", "M7(9,13)", 48).unwrap(),
        vec!["C3", "E3", "G3", "B3", "D4", "A4"]
    );
}

#[test]
fn test_suspensions_replace_third() {
    assert_eq!(chord_to_notes("C", "sus4", 48).unwrap(), vec!["C3", "F3", "G3"]);
    assert_eq!(chord_to_notes("C", "sus2", 48).unwrap(), vec!["C3", "D3", "G3"]);
}

#[test]
fn test_added_tone_keeps_degree_order() {
    // The added 2nd is below the 3rd and 5th but is still listed after them
    assert_eq!(
        chord_to_notes("C", "add2", 48).unwrap(),
        vec!["C3", "E3", "G3", "D3"]
    );
}

#[test]
fn test_power_chord_for_every_root() {
    for root in ROOTS {
        let notes = chord_to_notes(root, "5", 48).unwrap();
        let pitches = numbers(&notes);
        assert_eq!(pitches.len(), 2, "{}", root);
        assert_eq!(pitches[1] - pitches[0], 7, "{}", root);
    }
}

#[test]
fn test_input_octave_is_irrelevant() {
    let high = chord_to_notes("C5", "", 48).unwrap();
    let low = chord_to_notes("C2", "", 48).unwrap();
    assert_eq!(high, low);
    assert_eq!(high, vec!["C3", "E3", "G3"]);
}

#[test]
fn test_base_octave_start_moves_register() {
    assert_eq!(chord_to_notes("C", "", 60).unwrap(), vec!["C4", "E4", "G4"]);
    assert_eq!(chord_to_notes("A", "m", 50).unwrap(), vec!["A3", "C4", "E4"]);
    assert_eq!(chord_to_notes("C", "", 0).unwrap(), vec!["C-1", "E-1", "G-1"]);
}

#[test]
fn test_unrecognized_quality_never_returns_partial_chord() {
    let err = symbol_to_notes("Cxyz", &ChordOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ChordError::UnrecognizedChordQuality {
            quality: "xyz".to_string(),
            leftover: "xyz".to_string(),
        }
    );
    assert!(chord_to_notes("C", "m7q", 48).unwrap_err().is_unrecognized_quality());
}

#[test]
fn test_empty_chord_is_rejected() {
    let err = chord_to_notes("C", "5(omit1,omit5)", 48).unwrap_err();
    assert!(err.is_unrecognized_quality());
}

#[test]
fn test_unresolved_root() {
    assert_eq!(
        chord_to_notes("H", "", 48),
        Err(ChordError::UnresolvedRootPitch("H".to_string()))
    );
    assert_eq!(
        symbol_to_notes("m7", &ChordOptions::default()),
        Err(ChordError::UnresolvedRootPitch("m7".to_string()))
    );
}

#[test]
fn test_out_of_range_tone_fails_whole_chord() {
    // Bb folded to 106: the reference 13th is 127, raising it overflows
    assert!(chord_to_notes("Bb", "7", 106).is_ok());
    assert!(matches!(
        chord_to_notes("Bb", "7(#13)", 106),
        Err(ChordError::PitchResolutionError(_))
    ));
    assert!(matches!(
        chord_to_notes("C", "", 120),
        Err(ChordError::PitchResolutionError(_))
    ));
}

#[test]
fn test_extreme_base_octave_start_is_an_error() {
    for base in [i32::MIN, i32::MAX] {
        assert!(matches!(
            chord_to_notes("C", "", base),
            Err(ChordError::PitchResolutionError(_))
        ));
    }
}

#[test]
fn test_symbols() {
    let options = ChordOptions::default();
    assert_eq!(
        symbol_to_notes("F#add9", &options).unwrap(),
        vec!["Gb3", "Bb3", "Db4", "Ab4"]
    );
    assert_eq!(
        symbol_to_notes("Cm7b5", &options).unwrap(),
        vec!["C3", "Eb3", "Gb3", "Bb3"]
    );
    assert_eq!(
        symbol_to_notes("Ｃｍ７", &options).unwrap(),
        vec!["C3", "Eb3", "G3", "Bb3"]
    );
}

#[test]
fn test_sharp_spelling() {
    let options = ChordOptions::default().with_spelling(Spelling::Sharp);
    assert_eq!(
        symbol_to_notes("F#add9", &options).unwrap(),
        vec!["F#3", "A#3", "C#4", "G#4"]
    );
    assert_eq!(
        chord_to_notes_with_options("C", "aug", &options).unwrap(),
        vec!["C3", "E3", "G#3"]
    );
}

#[test]
fn test_options_from_yaml() {
    let options = ChordOptions::from_yaml("base-octave-start: 60").unwrap();
    assert_eq!(
        chord_to_notes_with_options("G", "7", &options).unwrap(),
        vec!["G4", "B4", "D5", "F5"]
    );
}

#[test]
fn test_midi_output() {
    let options = ChordOptions::default();
    assert_eq!(chord_to_midi("C", "m7", &options).unwrap(), vec![48, 51, 55, 58]);
    assert_eq!(chord_to_midi("G", "", &options).unwrap(), vec![55, 59, 62]);
}

#[test]
fn test_concurrent_calls_agree() {
    let handles: Vec<_> = ["m7", "dim7", "M7(9,13)", "sus4"]
        .into_iter()
        .map(|quality| {
            thread::spawn(move || {
                (0..50)
                    .map(|_| chord_to_notes("Eb", quality, 48).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        let results = handle.join().unwrap();
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
