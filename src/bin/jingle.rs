// jingle -- playing simple tunes from JSON song files
// Copyright (C) 2024  The jingle developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `jingle` plays sine-wave tunes defined in JSON song files.

use std::io;
use std::path::PathBuf;

use log::info;
use simple_logger;
use structopt::StructOpt;

use jingle::assemble::assemble;
use jingle::author;
use jingle::catalog;
use jingle::output::sox::{play_samples, SoxTarget};
use jingle::tuning::TuningTable;
use jingle::SAMPLE_RATE;

#[derive(Debug, StructOpt)]
#[structopt(name = "jingle", about = "Playing simple tunes from JSON song files")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Directory containing the song files.
    #[structopt(long = "songs", default_value = "songs", parse(from_os_str))]
    songs: PathBuf,

    /// Output file (any sox-supported format). Songs are played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Play the named song.
    Play {
        /// Name of the song, without the .json extension.
        name: String,
    },
    /// List the songs in the song directory.
    List,
    /// Interactively enter a new song, then play it.
    Add,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    run(&opt).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn run(opt: &Opt) -> Result<(), jingle::Error> {
    let tuning = TuningTable::new();

    match &opt.command {
        Some(Command::List) => {
            for name in catalog::list(&opt.songs)? {
                println!("{}", name);
            }
            Ok(())
        }
        Some(Command::Add) => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let (name, song) = author::add_song(&tuning, &opt.songs, &mut input)?;
            info!("playing new song {:?}", name);
            let waveform = assemble(&tuning, &song, SAMPLE_RATE)?;
            play(&waveform, opt)
        }
        Some(Command::Play { name }) => play_named(&tuning, opt, name),
        None => {
            let name = catalog::random(&opt.songs)?;
            info!("picked {:?} at random", name);
            play_named(&tuning, opt, &name)
        }
    }
}

fn play_named(tuning: &TuningTable, opt: &Opt, name: &str) -> Result<(), jingle::Error> {
    let song = catalog::load(&opt.songs, name)?;
    let waveform = assemble(tuning, &song, SAMPLE_RATE)?;
    play(&waveform, opt)
}

fn play(waveform: &[f64], opt: &Opt) -> Result<(), jingle::Error> {
    let target = match &opt.output {
        None => SoxTarget::Play,
        Some(path) => SoxTarget::File(path),
    };
    play_samples(waveform, SAMPLE_RATE, target)
        .map_err(|source| jingle::Error::Playback { source })
}
