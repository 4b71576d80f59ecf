//! Rendering single notes into shaped sample buffers.

use std::f64::consts::PI;

/// Length of the anti-click fade ramps in seconds.
const FADE_DURATION: f64 = 0.006;

/// Number of samples the fade ramps span at the given sample rate.
///
/// ```
/// assert_eq!(jingle::wave::fade_samples(44_100), 265);
/// ```
pub fn fade_samples(sample_rate: u32) -> usize {
    (FADE_DURATION * f64::from(sample_rate)).round() as usize
}

/// Render one note as `0.5 * sin(2π f t)` with linear fade ramps at both
/// ends.
///
/// The `count` time points are evenly spaced over `[0, count / rate)` with
/// the endpoint excluded, so consecutive notes tile without repeating a
/// sample. The fade window is clamped to half the buffer, the two ramps
/// never overlap on short notes.
pub fn render_note(frequency: f64, count: usize, fade: usize, sample_rate: u32) -> Vec<f64> {
    let step = 1.0 / f64::from(sample_rate);
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f64 * step;
        samples.push(0.5 * (2.0 * PI * frequency * t).sin());
    }
    let fade = fade.min(count / 2);
    fade_in(&mut samples, fade);
    fade_out(&mut samples, fade);
    samples
}

/// Linear ramp from silence to full amplitude over the first `fade`
/// samples. Ramps shorter than two samples are skipped, they have no
/// interior to interpolate.
pub fn fade_in(samples: &mut [f64], fade: usize) {
    debug_assert!(fade <= samples.len());
    if fade < 2 {
        return;
    }
    let scale = 1.0 / (fade - 1) as f64;
    for (i, sample) in samples[..fade].iter_mut().enumerate() {
        *sample *= i as f64 * scale;
    }
}

/// Linear ramp from full amplitude to silence over the last `fade`
/// samples, mirroring [`fade_in`].
pub fn fade_out(samples: &mut [f64], fade: usize) {
    debug_assert!(fade <= samples.len());
    if fade < 2 {
        return;
    }
    let len = samples.len();
    let scale = 1.0 / (fade - 1) as f64;
    for (i, sample) in samples[len - fade..].iter_mut().enumerate() {
        *sample *= (fade - 1 - i) as f64 * scale;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const RATE: u32 = 44_100;

    #[test]
    fn buffer_length_matches_request() {
        assert_eq!(render_note(440.0, 22_050, 265, RATE).len(), 22_050);
        assert_eq!(render_note(440.0, 7, 265, RATE).len(), 7);
        assert_eq!(render_note(440.0, 0, 265, RATE).len(), 0);
    }

    #[test]
    fn sine_values_without_fades() {
        // a quarter of the sample rate puts successive samples on
        // 0, +peak, 0, -peak
        let buf = render_note(11_025.0, 8, 0, RATE);
        assert!(buf[0].abs() < 1e-9);
        assert!((buf[1] - 0.5).abs() < 1e-9);
        assert!(buf[2].abs() < 1e-9);
        assert!((buf[3] + 0.5).abs() < 1e-9);
    }

    #[test]
    fn fades_reach_the_endpoints() {
        let buf = render_note(440.0, 22_050, 265, RATE);
        assert!(buf[0].abs() < 1e-9);
        assert!(buf[22_049].abs() < 1e-9);
        // the interior still swings at full amplitude
        assert!(buf.iter().any(|s| s.abs() > 0.4));
        assert!(buf.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn short_notes_clamp_fades() {
        // 10 samples instead of 2 * 265: the ramps shrink to 5 + 5
        let buf = render_note(440.0, 10, 265, RATE);
        assert_eq!(buf.len(), 10);
        assert!(buf.iter().all(|s| s.is_finite()));
        assert!(buf[0].abs() < 1e-9);
        assert!(buf[9].abs() < 1e-9);

        // below four samples there is no room for any ramp
        for count in 1..4 {
            let tiny = render_note(440.0, count, 265, RATE);
            assert_eq!(tiny.len(), count);
            assert!(tiny.iter().all(|s| s.is_finite()));
        }
    }

    #[test]
    fn ramps_are_linear() {
        let mut buf = vec![1.0; 6];
        fade_in(&mut buf, 3);
        assert_eq!(&buf[..3], &[0.0, 0.5, 1.0]);
        fade_out(&mut buf, 3);
        assert_eq!(&buf[3..], &[1.0, 0.5, 0.0]);
    }

    #[test]
    fn zero_fade_leaves_the_buffer_alone() {
        let mut buf = vec![1.0; 4];
        fade_in(&mut buf, 0);
        fade_out(&mut buf, 0);
        assert_eq!(buf, vec![1.0; 4]);
    }
}
