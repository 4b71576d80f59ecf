// jingle -- playing simple tunes from JSON song files
// Copyright (C) 2024  The jingle developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! High-level description of a song and its JSON representation.

use serde::{Deserialize, Serialize};

use crate::duration::{Multiplier, Tempo};

/// A complete monophonic tune.
///
/// The JSON form is the historical song-file format:
///
/// ```json
/// {
///     "notes": [["C#4", "1/3"], ["A3", null], ["F2", 2]],
///     "bpm": 90
/// }
/// ```
///
/// with `"default_duration": <milliseconds>` as the alternative to
/// `"bpm"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// The notes of the song in playing order.
    pub notes: Vec<NoteEntry>,
    /// How long a note lasts by default.
    #[serde(flatten)]
    pub tempo: Tempo,
}

/// One played note: its name and an optional duration multiplier.
///
/// Serialized as a two-element array like `["C#4", "1/3"]`; the second
/// element may be `null` or missing entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry(pub String, #[serde(default)] pub Option<Multiplier>);

impl NoteEntry {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn multiplier(&self) -> Option<&Multiplier> {
        self.1.as_ref()
    }
}
