//! `StubScorer` — deterministic stand-in backend without real inference.
//!
//! Exists so the full session contract (window length, ordering, state
//! carry-over, poisoning, the serialization guard) can be exercised without
//! the ONNX runtime. The score is a pure function of window RMS blended
//! with a leaky recurrent accumulator; it is NOT a model of speech.

use tracing::debug;

use crate::error::Result;
use crate::inference::SpeechScorer;
use crate::window;

/// RMS level at which the instantaneous response reaches 0.5.
const KNEE_RMS: f32 = 0.05;
/// Weight of the current window vs. the carried state.
const BLEND: f32 = 0.6;

/// Deterministic stateful stub scorer.
///
/// For a constant input the score rises monotonically toward a fixed point,
/// which makes state carry-over observable in tests: feeding the same
/// window twice yields two different scores.
pub struct StubScorer {
    sample_rate: u32,
    window_size: usize,
    state: f32,
}

impl StubScorer {
    /// Create a stub scorer bound to `sample_rate`.
    ///
    /// # Errors
    /// `UnsupportedSampleRate` — the stub honors the same window contract
    /// as the real model.
    pub fn new(sample_rate: u32) -> Result<Self> {
        let window_size = window::window_size_samples(sample_rate)?;
        Ok(Self {
            sample_rate,
            window_size,
            state: 0.0,
        })
    }
}

impl SpeechScorer for StubScorer {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn window_size_samples(&self) -> usize {
        self.window_size
    }

    fn score(&mut self, window: &[f32]) -> Result<f32> {
        debug_assert_eq!(window.len(), self.window_size);

        let sum_sq: f32 = window.iter().map(|s| s * s).sum();
        let rms = (sum_sq / window.len() as f32).sqrt();

        // Saturating response in [0, 1), blended with the carried state.
        let drive = rms / (rms + KNEE_RMS);
        let score = BLEND * drive + (1.0 - BLEND) * self.state;
        self.state = score;

        Ok(score)
    }

    fn reset(&mut self) {
        debug!("StubScorer::reset");
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(amplitude: f32) -> Vec<f32> {
        vec![amplitude; 512]
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let mut scorer = StubScorer::new(16_000).unwrap();
        for amplitude in [0.0, 0.01, 0.5, 1.0] {
            let score = scorer.score(&window(amplitude)).unwrap();
            assert!((0.0..=1.0).contains(&score), "score={score}");
        }
    }

    #[test]
    fn state_carries_over_between_windows() {
        let mut scorer = StubScorer::new(16_000).unwrap();
        let first = scorer.score(&window(0.25)).unwrap();
        let second = scorer.score(&window(0.25)).unwrap();
        assert!(
            second > first,
            "constant input should rise toward the fixed point: {first} vs {second}"
        );
    }

    #[test]
    fn reset_restores_fresh_behavior() {
        let mut scorer = StubScorer::new(16_000).unwrap();
        let fresh = scorer.score(&window(0.25)).unwrap();
        scorer.score(&window(0.25)).unwrap();
        scorer.reset();
        let after_reset = scorer.score(&window(0.25)).unwrap();
        assert_eq!(fresh.to_bits(), after_reset.to_bits());
    }

    #[test]
    fn honors_window_contract() {
        let scorer = StubScorer::new(8_000).unwrap();
        assert_eq!(scorer.window_size_samples(), 256);
        assert_eq!(scorer.sample_rate(), 8_000);
        assert!(StubScorer::new(44_100).is_err());
    }
}
