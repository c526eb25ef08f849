//! Degree vector type definitions
//!
//! A chord is described by seven slots, one per stacked-third degree, each
//! either omitted or offset by some semitones from the reference stack.

use serde::Serialize;

/// Stacked-third scale degree, in reference-stack order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    Root,
    Third,
    Fifth,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Degree {
    pub const ALL: [Degree; 7] = [
        Degree::Root,
        Degree::Third,
        Degree::Fifth,
        Degree::Seventh,
        Degree::Ninth,
        Degree::Eleventh,
        Degree::Thirteenth,
    ];

    /// Slot index (0 = root .. 6 = 13th)
    pub fn index(self) -> usize {
        self as usize
    }
}

/// State of one degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Degree is not part of the chord
    Omitted,
    /// Degree is present, shifted by this many semitones from the reference pitch
    Offset(i8),
}

impl Slot {
    pub fn is_omitted(self) -> bool {
        matches!(self, Slot::Omitted)
    }

    pub fn offset(self) -> Option<i8> {
        match self {
            Slot::Omitted => None,
            Slot::Offset(n) => Some(n),
        }
    }
}

/// Which degrees a chord contains and how far each deviates from the
/// dominant-13th reference stack.
///
/// The default is a bare major triad: root, 3rd and 5th at offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DegreeVector {
    slots: [Slot; 7],
}

impl Default for DegreeVector {
    fn default() -> Self {
        Self {
            slots: [
                Slot::Offset(0),
                Slot::Offset(0),
                Slot::Offset(0),
                Slot::Omitted,
                Slot::Omitted,
                Slot::Omitted,
                Slot::Omitted,
            ],
        }
    }
}

impl DegreeVector {
    pub fn from_slots(slots: [Slot; 7]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Slot; 7] {
        &self.slots
    }

    pub fn get(&self, degree: Degree) -> Slot {
        self.slots[degree.index()]
    }

    pub fn set(&mut self, degree: Degree, offset: i8) {
        self.slots[degree.index()] = Slot::Offset(offset);
    }

    pub fn omit(&mut self, degree: Degree) {
        self.slots[degree.index()] = Slot::Omitted;
    }

    /// Lower a present degree by `semitones`; omitted degrees stay omitted.
    pub fn lower(&mut self, degree: Degree, semitones: i8) {
        if let Slot::Offset(n) = self.slots[degree.index()] {
            self.slots[degree.index()] = Slot::Offset(n - semitones);
        }
    }

    /// True when every degree is omitted
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_omitted())
    }

    /// Present degrees with their offsets, root first
    pub fn present(&self) -> impl Iterator<Item = (Degree, i8)> + '_ {
        Degree::ALL
            .into_iter()
            .filter_map(move |degree| self.get(degree).offset().map(|n| (degree, n)))
    }
}
