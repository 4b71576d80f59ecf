// jingle -- playing simple tunes from JSON song files
// Copyright (C) 2024  The jingle developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Assembling a song into one continuous waveform.

use log::{info, trace};

use crate::duration;
use crate::error::Error;
use crate::song::Song;
use crate::tuning::TuningTable;
use crate::wave;

/// Render all notes of a song back to back into a single buffer and apply
/// the master fade-out to its tail.
///
/// Fails on the first problem (unknown note, bad multiplier) without
/// producing a buffer; the reported index points at the offending entry.
pub fn assemble(tuning: &TuningTable, song: &Song, sample_rate: u32) -> Result<Vec<f64>, Error> {
    if !song.tempo.is_valid() {
        return Err(Error::InvalidTempo { tempo: song.tempo });
    }

    let fade = wave::fade_samples(sample_rate);
    info!(
        "assembling {} notes at {} ({} sample fade)",
        song.notes.len(),
        song.tempo,
        fade
    );

    let mut waveform = Vec::new();
    for (index, entry) in song.notes.iter().enumerate() {
        let frequency = tuning
            .lookup(entry.name())
            .ok_or_else(|| Error::InvalidNote {
                index,
                name: entry.name().to_owned(),
            })?;
        let count = duration::sample_count(song.tempo, entry.multiplier(), sample_rate).map_err(
            |source| Error::InvalidDurationExpression {
                index,
                text: entry
                    .multiplier()
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
                source,
            },
        )?;
        trace!(
            "{:4}: {:4} at {:8.2} Hz for {} samples",
            index,
            entry.name(),
            frequency,
            count
        );
        let note = wave::render_note(frequency, count, fade, sample_rate);
        waveform.extend_from_slice(&note);
    }

    if waveform.len() < fade {
        return Err(Error::SongTooShort {
            actual: waveform.len(),
            needed: fade,
        });
    }
    wave::fade_out(&mut waveform, fade);

    info!(
        "assembled {} samples ({:.2} seconds)",
        waveform.len(),
        waveform.len() as f64 / f64::from(sample_rate)
    );
    Ok(waveform)
}
