//! Scored-inference abstraction.
//!
//! The `SpeechScorer` trait decouples the session facade from any specific
//! acoustic backend (deterministic stub, ONNX Silero, a caller-provided
//! engine).
//!
//! `&mut self` on `score` intentionally expresses that scorers are stateful
//! — recurrent hidden state is threaded through every call, in call order.
//! A scorer is therefore not reentrant; cross-thread sharing must go
//! through `SessionHandle`'s `parking_lot::Mutex`.

pub mod stub;

#[cfg(feature = "onnx")]
pub mod silero;

#[cfg(feature = "onnx")]
pub use silero::SileroScorer;

pub use stub::StubScorer;

use crate::error::Result;

/// Contract for stateful per-window speech scoring backends.
pub trait SpeechScorer: Send + 'static {
    /// Sample rate this scorer was built for, in Hz.
    fn sample_rate(&self) -> u32;

    /// Exact number of samples `score` requires per window.
    ///
    /// Constant for the lifetime of the scorer.
    fn window_size_samples(&self) -> usize;

    /// Score one window, returning a speech probability in [0.0, 1.0].
    ///
    /// Mutates the scorer's recurrent state as a side effect: calls must be
    /// issued in the temporal order of the audio stream. The caller (the
    /// session) guarantees `window.len() == self.window_size_samples()` and
    /// never mutates `window` contents.
    ///
    /// # Errors
    /// Returns an error if the underlying engine fails; the session treats
    /// any such failure as fatal because state integrity is no longer
    /// guaranteed.
    fn score(&mut self, window: &[f32]) -> Result<f32>;

    /// Zero all recurrent state, as if freshly constructed.
    fn reset(&mut self);
}
