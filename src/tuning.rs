// jingle -- playing simple tunes from JSON song files
// Copyright (C) 2024  The jingle developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The equal-tempered tuning table mapping note names to frequencies.

use std::collections::HashMap;

/// Frequency of the reference pitch A3 in Hz.
pub const REFERENCE_FREQUENCY: f64 = 440.0;

/// Octave digit of the reference pitch.
const REFERENCE_OCTAVE: i32 = 3;

/// First octave block of the table.
const LOWEST_OCTAVE: i32 = 1;

/// Last octave block; only its first step (A6) is part of the table.
const HIGHEST_OCTAVE: i32 = 6;

/// Semitone offset of the highest note, A6.
const HIGHEST_OFFSET: i32 = (HIGHEST_OCTAVE - REFERENCE_OCTAVE) * 12;

/// The twelve semitone steps of an octave block, starting at A, together
/// with the flat spelling of the sharp steps.
const SEMITONE_NAMES: [(&str, Option<&str>); 12] = [
    ("A", None),
    ("A#", Some("Bb")),
    ("B", None),
    ("C", None),
    ("C#", Some("Db")),
    ("D", None),
    ("D#", Some("Eb")),
    ("E", None),
    ("F", None),
    ("F#", Some("Gb")),
    ("G", None),
    ("G#", Some("Ab")),
];

/// An immutable map from note names like `"C#4"` or `"Db4"` to their
/// frequency in Hz, following `freq = 440 * 2^(offset / 12)` with A3 as
/// offset zero.
///
/// The table spans A1 up to A6, and octave blocks start at A: `A4` is one
/// octave above `A3`, and the twelve steps `A4, A#4, B4, C4, ..., G#4` all
/// share the digit. Sharp steps are also known under their flat spelling,
/// so `"C#4"` and `"Db4"` resolve to the same frequency.
///
/// ```
/// use jingle::tuning::TuningTable;
///
/// let tuning = TuningTable::new();
/// assert_eq!(tuning.lookup("A3"), Some(440.0));
/// assert_eq!(tuning.lookup("H9"), None);
/// ```
#[derive(Debug, Clone)]
pub struct TuningTable {
    frequencies: HashMap<String, f64>,
}

impl TuningTable {
    /// Build the table from the fixed semitone offsets.
    pub fn new() -> Self {
        let mut frequencies = HashMap::new();
        for octave in LOWEST_OCTAVE..=HIGHEST_OCTAVE {
            let block = (octave - REFERENCE_OCTAVE) * 12;
            for (step, &(sharp, flat)) in SEMITONE_NAMES.iter().enumerate() {
                let offset = block + step as i32;
                if offset > HIGHEST_OFFSET {
                    break;
                }
                let frequency = REFERENCE_FREQUENCY * from_semitones(offset);
                frequencies.insert(format!("{}{}", sharp, octave), frequency);
                if let Some(flat) = flat {
                    frequencies.insert(format!("{}{}", flat, octave), frequency);
                }
            }
        }
        TuningTable { frequencies }
    }

    /// Frequency in Hz of the named note, or `None` for anything the table
    /// does not know. Names are matched exactly: uppercase letter, optional
    /// `#` or `b`, octave digit.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.frequencies.get(name).copied()
    }

    /// Number of known names; sharp and flat spellings count separately.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl Default for TuningTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Frequency ratio corresponding to a step of the given number of
/// semitones.
fn from_semitones(semitones: i32) -> f64 {
    2f64.powf(f64::from(semitones) / 12.0)
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "{} not close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn reference_pitch() {
        let tuning = TuningTable::new();
        let a3 = tuning.lookup("A3").unwrap();
        assert!((a3 - 440.0).abs() < 1e-9);
    }

    #[test]
    fn enharmonic_spellings_agree() {
        let tuning = TuningTable::new();
        let pairs = [
            ("A#2", "Bb2"),
            ("C#4", "Db4"),
            ("D#3", "Eb3"),
            ("F#1", "Gb1"),
            ("G#5", "Ab5"),
        ];
        for &(sharp, flat) in &pairs {
            assert_eq!(tuning.lookup(sharp), tuning.lookup(flat), "{} vs {}", sharp, flat);
            assert!(tuning.lookup(sharp).is_some());
        }
    }

    #[test]
    fn octave_doubling() {
        let tuning = TuningTable::new();
        let pairs = [("A3", "A4"), ("C2", "C3"), ("G#1", "G#2"), ("B4", "B5")];
        for &(low, high) in &pairs {
            let low = tuning.lookup(low).unwrap();
            let high = tuning.lookup(high).unwrap();
            close(2.0 * low, high);
        }
    }

    #[test]
    fn known_frequencies() {
        let tuning = TuningTable::new();
        close(tuning.lookup("A1").unwrap(), 110.0);
        close(tuning.lookup("A2").unwrap(), 220.0);
        close(tuning.lookup("A6").unwrap(), 3520.0);
        // C4 sits 15 semitones above the reference
        close(tuning.lookup("C4").unwrap(), 1046.5022612023945);
        close(tuning.lookup("E3").unwrap(), 659.2551138257398);
    }

    #[test]
    fn table_extent() {
        let tuning = TuningTable::new();
        assert!(tuning.lookup("A1").is_some());
        assert!(tuning.lookup("G#5").is_some());
        assert!(tuning.lookup("A6").is_some());
        // the table ends right after A6
        assert!(tuning.lookup("A#6").is_none());
        assert!(tuning.lookup("A0").is_none());
        assert!(tuning.lookup("A7").is_none());
        // 61 pitches plus 25 flat spellings
        assert_eq!(tuning.len(), 86);
    }

    #[test]
    fn lookups_are_strict() {
        let tuning = TuningTable::new();
        assert!(tuning.lookup("a3").is_none());
        assert!(tuning.lookup("H9").is_none());
        assert!(tuning.lookup("Cb4").is_none());
        assert!(tuning.lookup("A 3").is_none());
        assert!(tuning.lookup("").is_none());
    }
}
