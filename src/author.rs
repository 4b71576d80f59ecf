// jingle -- playing simple tunes from JSON song files
// Copyright (C) 2024  The jingle developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Interactive authoring of new songs on the terminal.

use std::io::{self, BufRead, Write};
use std::path::Path;

use log::info;
use snafu::Snafu;

use crate::catalog;
use crate::duration::{self, Multiplier, Tempo};
use crate::error::Error;
use crate::song::{NoteEntry, Song};
use crate::tuning::TuningTable;

/// Why an entered line was not accepted. The message is shown to the user
/// and the prompt repeats.
#[derive(Debug, PartialEq, Snafu)]
pub enum EntryError {
    #[snafu(display("expected a note name, e.g. 'C#4 1/3'"))]
    NoNote,
    #[snafu(display("unknown note name {:?}", name))]
    UnknownNote { name: String },
    #[snafu(display("bad duration multiplier: {}", source))]
    BadMultiplier { source: duration::ExprError },
    #[snafu(display("expected at most a note name and a multiplier"))]
    TooManyWords,
}

/// What one line of note input means.
#[derive(Debug, PartialEq)]
pub enum EntryLine {
    /// The author is done entering notes.
    Stop,
    /// A validated note entry.
    Note(NoteEntry),
}

/// Parse and validate one line of note input, `NOTE [MULTIPLIER]` or the
/// word `stop`.
pub fn parse_entry(tuning: &TuningTable, line: &str) -> Result<EntryLine, EntryError> {
    let mut words = line.split_whitespace();
    let name = match words.next() {
        None => return Err(EntryError::NoNote),
        Some(word) => word,
    };
    if name == "stop" {
        return Ok(EntryLine::Stop);
    }
    if tuning.lookup(name).is_none() {
        return Err(EntryError::UnknownNote {
            name: name.to_owned(),
        });
    }
    let multiplier = match words.next() {
        None => None,
        Some(word) => {
            duration::parse_multiplier(word)
                .map_err(|source| EntryError::BadMultiplier { source })?;
            Some(Multiplier::Expr(word.to_owned()))
        }
    };
    if words.next().is_some() {
        return Err(EntryError::TooManyWords);
    }
    Ok(EntryLine::Note(NoteEntry(name.to_owned(), multiplier)))
}

/// Ask for everything a new song needs, save it to the catalog, and return
/// its name and definition.
///
/// Answers are read line by line from `input` (stdin in practice), invalid
/// lines are reported and asked again. End of input while entering notes
/// counts as `stop`.
pub fn add_song(
    tuning: &TuningTable,
    dir: &Path,
    input: &mut dyn BufRead,
) -> Result<(String, Song), Error> {
    let name = prompt_nonempty(input, "Name of the new song: ")?;
    let millis = prompt_millis(input)?;

    println!("Enter one note per line as NOTE [MULTIPLIER], e.g. 'C#4 1/3'; finish with 'stop'.");
    let mut notes = Vec::new();
    loop {
        let line = match prompt(input, "> ")? {
            None => break,
            Some(line) => line,
        };
        match parse_entry(tuning, &line) {
            Ok(EntryLine::Stop) => break,
            Ok(EntryLine::Note(entry)) => notes.push(entry),
            Err(err) => println!("{}", err),
        }
    }

    let song = Song {
        notes,
        tempo: Tempo::Milliseconds(millis),
    };
    let path = catalog::save(dir, &name, &song)?;
    info!(
        "new song {:?} with {} notes saved to {}",
        name,
        song.notes.len(),
        path.display()
    );
    Ok((name, song))
}

/// Show a prompt and read one trimmed line; `None` on end of input.
fn prompt(input: &mut dyn BufRead, text: &str) -> Result<Option<String>, Error> {
    print!("{}", text);
    io::stdout()
        .flush()
        .map_err(|source| Error::Prompt { source })?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|source| Error::Prompt { source })?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim().to_owned()))
    }
}

fn prompt_nonempty(input: &mut dyn BufRead, text: &str) -> Result<String, Error> {
    loop {
        match prompt(input, text)? {
            None => {
                return Err(Error::Prompt {
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"),
                })
            }
            Some(line) => {
                if line.is_empty() {
                    println!("Please enter something.");
                } else {
                    return Ok(line);
                }
            }
        }
    }
}

fn prompt_millis(input: &mut dyn BufRead) -> Result<u32, Error> {
    loop {
        let line = prompt_nonempty(input, "Default note duration in milliseconds: ")?;
        match line.parse::<u32>() {
            Ok(millis) if millis > 0 => return Ok(millis),
            _ => println!("Please enter a positive whole number of milliseconds."),
        }
    }
}
