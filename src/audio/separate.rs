use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::assets::media::AudioSampleBuffer;
use crate::foundation::error::{RemediaError, RemediaResult};

/// High-pass cutoff approximating the bottom of the vocal range.
pub const VOCAL_HIGHPASS_HZ: f64 = 250.0;
/// Low-pass cutoff approximating the top of the vocal range.
pub const VOCAL_LOWPASS_HZ: f64 = 4000.0;

/// Which separation heuristic to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationMode {
    /// Phase cancellation: `left - right` removes center-panned content
    /// (commonly vocals). A lossy heuristic that assumes vocals are mixed
    /// dead-center, not true source separation.
    Instrumental,
    /// Band-limited approximation: mono mixdown through a 250 Hz high-pass
    /// and 4 kHz low-pass cascade. Keeps everything in the vocal band, not
    /// only center-panned content; categorically rougher than the
    /// instrumental path.
    Vocal,
}

/// Run one separation heuristic over a decoded stereo buffer, producing a
/// mono buffer at the source sample rate.
///
/// Fails with an input error when fewer than two channels are supplied.
pub fn separate(buf: &AudioSampleBuffer, mode: SeparationMode) -> RemediaResult<AudioSampleBuffer> {
    if buf.channel_count() < 2 {
        return Err(RemediaError::input("stereo file required for separation"));
    }

    let mono = match mode {
        SeparationMode::Instrumental => extract_instrumental(buf),
        SeparationMode::Vocal => isolate_vocal(buf),
    };
    AudioSampleBuffer::new(buf.sample_rate, vec![mono])
}

/// `out[i] = left[i] - right[i]`. Anything identical in both channels
/// cancels to zero; any remaining channels beyond the first two are
/// ignored, matching the stereo phase-math model.
fn extract_instrumental(buf: &AudioSampleBuffer) -> Vec<f32> {
    let left = &buf.channels[0];
    let right = &buf.channels[1];
    left.iter().zip(right).map(|(&l, &r)| l - r).collect()
}

/// Mono mixdown `0.5*(L+R)` through cascaded high-pass and low-pass
/// biquads bracketing the vocal band.
fn isolate_vocal(buf: &AudioSampleBuffer) -> Vec<f32> {
    let rate = f64::from(buf.sample_rate);
    let mut high_pass = Biquad::high_pass(rate, VOCAL_HIGHPASS_HZ, FRAC_1_SQRT_2);
    let mut low_pass = Biquad::low_pass(rate, VOCAL_LOWPASS_HZ, FRAC_1_SQRT_2);

    let left = &buf.channels[0];
    let right = &buf.channels[1];
    left.iter()
        .zip(right)
        .map(|(&l, &r)| {
            let mixed = 0.5 * (f64::from(l) + f64::from(r));
            low_pass.process(high_pass.process(mixed)) as f32
        })
        .collect()
}

/// Direct-form-1 biquad with Audio EQ Cookbook coefficients, normalized
/// by a0. State is per-instance; one instance filters one stream.
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    fn low_pass(sample_rate: f64, frequency: f64, q: f64) -> Self {
        let (cos_w0, alpha) = Self::prewarp(sample_rate, frequency, q);
        let b1 = 1.0 - cos_w0;
        Self::normalized(
            b1 / 2.0,
            b1,
            b1 / 2.0,
            1.0 + alpha,
            -2.0 * cos_w0,
            1.0 - alpha,
        )
    }

    fn high_pass(sample_rate: f64, frequency: f64, q: f64) -> Self {
        let (cos_w0, alpha) = Self::prewarp(sample_rate, frequency, q);
        let b1 = 1.0 + cos_w0;
        Self::normalized(
            b1 / 2.0,
            -b1,
            b1 / 2.0,
            1.0 + alpha,
            -2.0 * cos_w0,
            1.0 - alpha,
        )
    }

    fn prewarp(sample_rate: f64, frequency: f64, q: f64) -> (f64, f64) {
        // Keep the cutoff under Nyquist even for low-rate sources.
        let freq = frequency.min(sample_rate / 2.0 - 1.0).max(1.0);
        let w0 = 2.0 * PI * freq / sample_rate;
        (w0.cos(), w0.sin() / (2.0 * q))
    }

    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    fn process(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/separate.rs"]
mod tests;
