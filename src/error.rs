//! Everything that can go wrong between reading a song file and handing the
//! finished waveform to the audio output.

use std::io;
use std::path::PathBuf;

use snafu::Snafu;

use crate::duration::{ExprError, Tempo};

#[derive(Debug, Snafu)]
pub enum Error {
    /// A note name the tuning table does not know.
    #[snafu(display("note {}: unknown note name {:?}", index, name))]
    InvalidNote { index: usize, name: String },

    /// A duration multiplier that the restricted parser refused.
    #[snafu(display("note {}: bad duration multiplier {:?}: {}", index, text, source))]
    InvalidDurationExpression {
        index: usize,
        text: String,
        source: ExprError,
    },

    #[snafu(display("invalid tempo ({}), value must be positive", tempo))]
    InvalidTempo { tempo: Tempo },

    #[snafu(display(
        "song is too short for the final fade-out ({} samples assembled, {} needed)",
        actual,
        needed
    ))]
    SongTooShort { actual: usize, needed: usize },

    #[snafu(display("song {:?} not found in {}", name, dir.display()))]
    SongNotFound { name: String, dir: PathBuf },

    #[snafu(display("cannot read song file {}: {}", path.display(), source))]
    SongFileUnreadable { path: PathBuf, source: io::Error },

    #[snafu(display("song file {} is not a valid song: {}", path.display(), source))]
    SongFileMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("cannot write song file {}: {}", path.display(), source))]
    SongFileUnwritable { path: PathBuf, source: io::Error },

    #[snafu(display("cannot access song directory {}: {}", dir.display(), source))]
    SongDirInaccessible { dir: PathBuf, source: io::Error },

    #[snafu(display("no songs found in {}", dir.display()))]
    NoSongs { dir: PathBuf },

    /// Song names double as file names and must not escape the directory.
    #[snafu(display("unusable song name {:?}", name))]
    BadSongName { name: String },

    #[snafu(display("cannot read the terminal input: {}", source))]
    Prompt { source: io::Error },

    #[snafu(display("audio output failed: {}", source))]
    Playback { source: io::Error },
}
