//! Window contract: sample rate → analysis window length.
//!
//! Silero VAD is trained on a fixed ~32 ms analysis window, so the required
//! window length in samples is a pure function of the sample rate:
//! 512 samples at 16 kHz, 256 samples at 8 kHz. A session derives this value
//! once at construction and uses it as the sole length validator for every
//! subsequent `process` call (a single comparison per window).

use crate::error::{Result, VocaleError};

/// Sample rates the Silero VAD model accepts, in Hz.
pub const SUPPORTED_SAMPLE_RATES: [u32; 2] = [8_000, 16_000];

/// Fixed analysis window duration in milliseconds.
pub const WINDOW_DURATION_MS: u32 = 32;

/// Returns the required window length in samples for `sample_rate`.
///
/// Deterministic and constant-time. Unsupported rates are rejected here,
/// at session construction, never later.
///
/// # Errors
/// [`VocaleError::UnsupportedSampleRate`] if `sample_rate` is not one of
/// [`SUPPORTED_SAMPLE_RATES`].
pub fn window_size_samples(sample_rate: u32) -> Result<usize> {
    if !SUPPORTED_SAMPLE_RATES.contains(&sample_rate) {
        return Err(VocaleError::UnsupportedSampleRate { rate: sample_rate });
    }
    Ok(WINDOW_DURATION_MS as usize * (sample_rate as usize / 1_000))
}
