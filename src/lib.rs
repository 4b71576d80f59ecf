pub mod assemble;
pub mod author;
pub mod catalog;
pub mod duration;
pub mod output;
pub mod song;
pub mod tuning;
pub mod wave;

// Utility modules
pub mod error;

pub use error::Error;

/// Sampling rate of everything this crate renders, in Hz.
pub const SAMPLE_RATE: u32 = 44_100;
