//! Tempo handling and the restricted duration-multiplier expressions.

use std::fmt;

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// How a song specifies the base duration of its notes.
///
/// Song files come in two historical flavors: an explicit default duration
/// in milliseconds, or a beats-per-minute value where every note lasts one
/// beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tempo {
    /// Every note lasts this many milliseconds by default.
    #[serde(rename = "default_duration")]
    Milliseconds(u32),
    /// Every note lasts one beat, `60 / bpm` seconds.
    #[serde(rename = "bpm")]
    BeatsPerMinute(u32),
}

impl Tempo {
    /// Base duration of a single note in seconds, before multipliers.
    pub fn base_duration(&self) -> f64 {
        match *self {
            Tempo::Milliseconds(ms) => f64::from(ms) / 1000.0,
            Tempo::BeatsPerMinute(bpm) => 60.0 / f64::from(bpm),
        }
    }

    /// A zero tempo would divide by zero or produce degenerate one-sample
    /// notes; reject it before any rendering happens.
    pub fn is_valid(&self) -> bool {
        match *self {
            Tempo::Milliseconds(ms) => ms > 0,
            Tempo::BeatsPerMinute(bpm) => bpm > 0,
        }
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tempo::Milliseconds(ms) => write!(f, "{} ms per note", ms),
            Tempo::BeatsPerMinute(bpm) => write!(f, "{} bpm", bpm),
        }
    }
}

/// A per-note scaling factor for the base duration.
///
/// Song files may carry either a plain number or a small expression like
/// `"1/3"`; expressions go through [`parse_multiplier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Multiplier {
    Number(f64),
    Expr(String),
}

impl Multiplier {
    /// The numeric value of the multiplier.
    pub fn value(&self) -> Result<f64, ExprError> {
        match self {
            Multiplier::Number(value) => check_scalar(*value),
            Multiplier::Expr(text) => parse_multiplier(text),
        }
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Multiplier::Number(value) => write!(f, "{}", value),
            Multiplier::Expr(text) => f.write_str(text),
        }
    }
}

/// Reasons a multiplier can be refused.
#[derive(Debug, PartialEq, Snafu)]
pub enum ExprError {
    #[snafu(display("empty expression"))]
    Empty,
    #[snafu(display("not an unsigned number: {:?}", text))]
    BadNumber { text: String },
    #[snafu(display("more than one division"))]
    ExtraDivision,
    #[snafu(display("division by zero"))]
    DivisionByZero,
    #[snafu(display("multiplier must be a finite, non-negative number, got {}", value))]
    BadScalar { value: f64 },
}

/// Evaluate a duration-multiplier expression.
///
/// The grammar is deliberately tiny: an unsigned integer or decimal,
/// optionally divided by a second one. Everything else is rejected, since
/// the text comes straight out of a song file and must never reach a real
/// evaluator.
///
/// ```
/// use jingle::duration::parse_multiplier;
///
/// assert_eq!(parse_multiplier("2"), Ok(2.0));
/// assert_eq!(parse_multiplier("1/4"), Ok(0.25));
/// assert!(parse_multiplier("2+2").is_err());
/// ```
pub fn parse_multiplier(text: &str) -> Result<f64, ExprError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ExprError::Empty);
    }
    let value = match text.find('/') {
        None => number(text)?,
        Some(pos) => {
            let lhs = &text[..pos];
            let rhs = &text[pos + 1..];
            if rhs.contains('/') {
                return Err(ExprError::ExtraDivision);
            }
            let numerator = number(lhs)?;
            let denominator = number(rhs)?;
            if denominator == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            numerator / denominator
        }
    };
    check_scalar(value)
}

/// Parse one operand: ASCII digits with at most one decimal point.
fn number(text: &str) -> Result<f64, ExprError> {
    let text = text.trim();
    let mut dots = 0;
    let valid = !text.is_empty()
        && text.chars().all(|c| {
            if c == '.' {
                dots += 1;
                dots <= 1
            } else {
                c.is_ascii_digit()
            }
        });
    if !valid {
        return Err(ExprError::BadNumber { text: text.into() });
    }
    text.parse().map_err(|_| ExprError::BadNumber { text: text.into() })
}

fn check_scalar(value: f64) -> Result<f64, ExprError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ExprError::BadScalar { value })
    }
}

/// Number of samples a note should last.
///
/// The product of base duration, multiplier and sample rate is truncated
/// toward zero, with a floor of one sample so a note never vanishes
/// entirely.
pub fn sample_count(
    tempo: Tempo,
    multiplier: Option<&Multiplier>,
    sample_rate: u32,
) -> Result<usize, ExprError> {
    let factor = match multiplier {
        None => 1.0,
        Some(multiplier) => multiplier.value()?,
    };
    let seconds = tempo.base_duration() * factor;
    let samples = (seconds * f64::from(sample_rate)) as usize;
    Ok(samples.max(1))
}

#[cfg(test)]
mod test {
    use super::*;

    const RATE: u32 = 44_100;

    #[test]
    fn beat_duration_at_120_bpm() {
        let count = sample_count(Tempo::BeatsPerMinute(120), None, RATE);
        assert_eq!(count, Ok(22_050));
    }

    #[test]
    fn millisecond_default() {
        let count = sample_count(Tempo::Milliseconds(400), None, RATE);
        assert_eq!(count, Ok(17_640));
    }

    #[test]
    fn fractional_multiplier() {
        let third = Multiplier::Expr("1/3".to_owned());
        let count = sample_count(Tempo::BeatsPerMinute(120), Some(&third), RATE).unwrap();
        // 0.5 s * 1/3 would be exactly 7350 samples, allow one off for
        // the truncation
        assert!((count as i64 - 7350).abs() <= 1, "got {}", count);
    }

    #[test]
    fn zero_multiplier_keeps_one_sample() {
        let zero = Multiplier::Expr("0".to_owned());
        let count = sample_count(Tempo::Milliseconds(400), Some(&zero), RATE);
        assert_eq!(count, Ok(1));
    }

    #[test]
    fn accepted_expressions() {
        assert_eq!(parse_multiplier("2"), Ok(2.0));
        assert_eq!(parse_multiplier("1.5"), Ok(1.5));
        assert_eq!(parse_multiplier("007"), Ok(7.0));
        assert_eq!(parse_multiplier(" 2 / 3 "), Ok(2.0 / 3.0));
        assert_eq!(parse_multiplier("0.5/2"), Ok(0.25));
        assert_eq!(parse_multiplier(".5"), Ok(0.5));
    }

    #[test]
    fn rejected_expressions() {
        assert_eq!(parse_multiplier(""), Err(ExprError::Empty));
        assert_eq!(parse_multiplier("   "), Err(ExprError::Empty));
        assert_eq!(parse_multiplier("1/2/3"), Err(ExprError::ExtraDivision));
        assert_eq!(parse_multiplier("1/0"), Err(ExprError::DivisionByZero));
        assert_eq!(parse_multiplier("1/0.0"), Err(ExprError::DivisionByZero));
        assert!(parse_multiplier("-1").is_err());
        assert!(parse_multiplier("1+1").is_err());
        assert!(parse_multiplier("(1)").is_err());
        assert!(parse_multiplier("1e3").is_err());
        assert!(parse_multiplier("1.2.3").is_err());
        assert!(parse_multiplier("/2").is_err());
        assert!(parse_multiplier("2/").is_err());
    }

    #[test]
    fn hostile_expressions_fail_closed() {
        // song files are untrusted input; nothing that smells like code
        // may get through
        assert!(parse_multiplier("system('reboot')").is_err());
        assert!(parse_multiplier("open('/etc/passwd')").is_err());
        assert!(parse_multiplier("2; rm -rf ~").is_err());
        assert!(parse_multiplier("${HOME}").is_err());
    }

    #[test]
    fn numeric_multipliers_are_checked() {
        assert_eq!(Multiplier::Number(1.5).value(), Ok(1.5));
        assert!(Multiplier::Number(-2.0).value().is_err());
        assert!(Multiplier::Number(f64::INFINITY).value().is_err());
    }

    #[test]
    fn tempo_base_durations() {
        assert!((Tempo::BeatsPerMinute(120).base_duration() - 0.5).abs() < 1e-12);
        assert!((Tempo::Milliseconds(250).base_duration() - 0.25).abs() < 1e-12);
        assert!(Tempo::BeatsPerMinute(120).is_valid());
        assert!(!Tempo::BeatsPerMinute(0).is_valid());
        assert!(!Tempo::Milliseconds(0).is_valid());
    }
}
