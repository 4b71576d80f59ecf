//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

/// Where the rendered audio should go.
pub enum SoxTarget<'a> {
    /// Play directly on the default audio device.
    Play,
    /// Write into a file, any format sox recognizes by its extension.
    File(&'a Path),
}

/// Feed mono `f64` samples produced by `callback` into a sox subprocess
/// and wait for it to finish.
///
/// For the [`SoxTarget::Play`] target the wait only returns once the audio
/// has actually been played to the end, which is exactly the blocking
/// behavior callers rely on.
pub fn with_sox<R, F>(sample_rate: u32, target: SoxTarget, callback: F) -> io::Result<R>
where
    F: FnOnce(&mut dyn Write) -> io::Result<R>,
{
    let sample_rate_str = format!("{}", sample_rate);
    let input_args: &[&str] = &[
        "-R", // make the output reproducible
        "--channels",
        "1",
        "--rate",
        &sample_rate_str,
        "--type",
        "f64",
        "/dev/stdin",
    ];

    let mut player = match target {
        SoxTarget::Play => {
            debug!("spawning sox player at {} Hz", sample_rate);
            Command::new("play")
                .args(input_args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()?
        }
        SoxTarget::File(outfile) => {
            debug!("spawning sox to write {}", outfile.display());
            Command::new("sox")
                .args(input_args)
                .arg(outfile)
                .stdin(Stdio::piped())
                .spawn()?
        }
    };

    let mut audio_stream = player.stdin.take().expect("Used stdin(Stdio::piped())");
    let result = callback(&mut audio_stream);

    // Closing the pipe lets sox see the end of the input; the wait is what
    // makes playback block until it is done.
    drop(audio_stream);
    let status = player.wait()?;
    if !status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("sox exited with {}", status),
        ));
    }

    result
}

/// Stream a finished waveform to the target and block until done.
pub fn play_samples(samples: &[f64], sample_rate: u32, target: SoxTarget) -> io::Result<()> {
    with_sox(sample_rate, target, |stream| {
        super::write_samples(stream, samples)
    })
}
