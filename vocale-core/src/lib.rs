//! # vocale-core
//!
//! Streaming windowed voice-activity detection.
//!
//! ```text
//! caller buffer → AudioFrame::normalize → VadSession (window contract)
//!                                              │
//!                                   SpeechScorer::score (recurrent state)
//!                                              │
//!                                  speech probability in [0.0, 1.0]
//! ```
//!
//! A [`VadSession`] binds one acoustic scorer plus one fixed analysis
//! window (32 ms: 512 samples at 16 kHz, 256 at 8 kHz) and scores windows
//! one at a time, carrying the model's recurrent state across calls. The
//! core emits raw per-window probabilities only; thresholding, hangover and
//! segmentation are caller policy.
//!
//! `process` calls must arrive in stream order — the recurrent state makes
//! scoring order-dependent. `&mut self` enforces exclusive access at
//! compile time; use [`SessionHandle`] to share one session across threads.
//!
//! The ONNX Silero backend lives behind the `onnx` feature; the default
//! build carries a deterministic stub scorer so the session contract stays
//! fully testable without the native runtime.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod frame;
pub mod inference;
pub mod session;
pub mod window;

// Convenience re-exports for downstream crates
pub use error::{Result, VocaleError};
pub use frame::{AudioFrame, Sample};
pub use inference::{SpeechScorer, StubScorer};
pub use session::{SessionConfig, SessionHandle, VadSession};
pub use window::{window_size_samples, SUPPORTED_SAMPLE_RATES, WINDOW_DURATION_MS};

#[cfg(feature = "onnx")]
pub use inference::SileroScorer;
