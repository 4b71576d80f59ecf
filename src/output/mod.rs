//! Getting finished waveforms out of the process.

pub mod sox;

use std::io;
use std::io::Write;

/// Stream samples as little-endian `f64` bytes, the raw format the sox
/// sink consumes.
///
/// Copying into one byte buffer first keeps this a single write on the
/// subprocess pipe.
pub fn write_samples(out: &mut dyn Write, samples: &[f64]) -> io::Result<()> {
    let mut bytes = Vec::with_capacity(samples.len() * 8);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    out.write_all(&bytes)?;
    out.flush()
}
