// jingle -- playing simple tunes from JSON song files
// Copyright (C) 2024  The jingle developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The song directory: loading, saving, listing and picking songs.
//!
//! Every song lives in its own `<name>.json` file inside one flat
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::seq::SliceRandom;

use crate::error::Error;
use crate::song::Song;

/// File extension of song definitions.
const EXTENSION: &str = "json";

fn song_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, EXTENSION))
}

/// Load the named song from the directory.
pub fn load(dir: &Path, name: &str) -> Result<Song, Error> {
    let path = song_path(dir, name);
    if !path.is_file() {
        return Err(Error::SongNotFound {
            name: name.to_owned(),
            dir: dir.to_owned(),
        });
    }
    let text = fs::read_to_string(&path).map_err(|source| Error::SongFileUnreadable {
        path: path.clone(),
        source,
    })?;
    let song = serde_json::from_str(&text).map_err(|source| Error::SongFileMalformed {
        path: path.clone(),
        source,
    })?;
    debug!("loaded song {:?} from {}", name, path.display());
    Ok(song)
}

/// Save a song under the given name, creating the directory if needed.
/// Returns the path written.
pub fn save(dir: &Path, name: &str, song: &Song) -> Result<PathBuf, Error> {
    if name.is_empty() || name.starts_with('.') || name.contains('/') || name.contains('\\') {
        return Err(Error::BadSongName {
            name: name.to_owned(),
        });
    }
    fs::create_dir_all(dir).map_err(|source| Error::SongDirInaccessible {
        dir: dir.to_owned(),
        source,
    })?;
    let path = song_path(dir, name);
    let text = serde_json::to_string_pretty(song).map_err(|source| Error::SongFileMalformed {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, text).map_err(|source| Error::SongFileUnwritable {
        path: path.clone(),
        source,
    })?;
    info!("saved song {:?} to {}", name, path.display());
    Ok(path)
}

/// Names of all songs in the directory, sorted. A missing directory is
/// just an empty catalog.
pub fn list(dir: &Path) -> Result<Vec<String>, Error> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|source| Error::SongDirInaccessible {
        dir: dir.to_owned(),
        source,
    })?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::SongDirInaccessible {
            dir: dir.to_owned(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(EXTENSION) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Pick a random song name from the directory.
pub fn random(dir: &Path) -> Result<String, Error> {
    let names = list(dir)?;
    names
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| Error::NoSongs {
            dir: dir.to_owned(),
        })
}
