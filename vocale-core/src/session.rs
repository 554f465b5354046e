//! VAD session facade.
//!
//! One `VadSession` binds one scorer and one window contract for the life
//! of a streaming session. The lifecycle is `Ready → Closed`:
//!
//! - `process` is the sole score-producing, state-mutating operation. Every
//!   call must carry exactly `window_size_samples()` samples; there is no
//!   truncation and no padding.
//! - `close` drops the scorer (releasing the native ONNX session with it)
//!   and is idempotent. Dropping the session has the same effect — release
//!   is scoped, never left to nondeterministic finalization.
//! - a failed inference poisons the session: recurrent state integrity can
//!   no longer be trusted, so every later `process` fails too.
//!
//! A session is `Send` but deliberately not shared: `process(&mut self)`
//! makes concurrent calls on one session unrepresentable in safe Rust.
//! Callers that must share a session across threads wrap it in
//! [`SessionHandle`], which serializes access through a mutex. Independent
//! sessions share nothing and may run fully in parallel.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VocaleError};
use crate::frame::{AudioFrame, Sample};
use crate::inference::SpeechScorer;

/// Session construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sample rate of the incoming audio (Hz). Must be 8000 or 16000.
    /// Default: 16000.
    pub sample_rate: u32,
    /// Override path for the Silero VAD ONNX model.
    /// `None` resolves to `silero_vad.onnx` in the platform models
    /// directory, once, at construction.
    pub model_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            model_path: None,
        }
    }
}

/// A streaming VAD session: one scorer, one window contract, one ordered
/// stream of windows.
pub struct VadSession {
    scorer: Option<Box<dyn SpeechScorer>>,
    sample_rate: u32,
    window_size_samples: usize,
    poisoned: bool,
}

impl VadSession {
    /// Open a session over the Silero ONNX scorer.
    ///
    /// Model load happens here, once; it is expensive and expected to be
    /// amortized over many `process` calls.
    ///
    /// # Errors
    /// `UnsupportedSampleRate`, `ModelNotFound`, or `ModelLoad`. Nothing
    /// leaks on failure: the scorer is only boxed once fully constructed.
    #[cfg(feature = "onnx")]
    pub fn open(config: SessionConfig) -> Result<Self> {
        use crate::inference::SileroScorer;

        let model_path = config
            .model_path
            .unwrap_or_else(SileroScorer::default_model_path);
        let scorer = SileroScorer::new(model_path, config.sample_rate)?;
        Ok(Self::with_scorer(scorer))
    }

    /// Bind a session to any scorer (a stub in tests, a caller-provided
    /// engine in embedders).
    pub fn with_scorer(scorer: impl SpeechScorer) -> Self {
        let sample_rate = scorer.sample_rate();
        let window_size_samples = scorer.window_size_samples();
        Self {
            scorer: Some(Box::new(scorer)),
            sample_rate,
            window_size_samples,
            poisoned: false,
        }
    }

    /// Sample rate bound at construction (Hz). Queryable in any state.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Exact sample count `process` requires per call. Queryable in any
    /// state; callers size their buffers from this.
    pub fn window_size_samples(&self) -> usize {
        self.window_size_samples
    }

    /// Whether `close` has been called (or the scorer otherwise released).
    pub fn is_closed(&self) -> bool {
        self.scorer.is_none()
    }

    /// Score one window of audio.
    ///
    /// The frame is normalized (see [`AudioFrame::normalize`]), checked
    /// against the window contract, and fed to the scorer. The caller's
    /// memory is borrowed for this call only and never mutated.
    ///
    /// # Errors
    /// - `SessionClosed` / `SessionPoisoned` before any other work;
    /// - adapter failures (`EmptyInput`, `MisalignedLength`);
    /// - `WindowLengthMismatch` if the normalized element count differs
    ///   from `window_size_samples()` in either direction;
    /// - `NativeInference` if the engine fails — the session is poisoned
    ///   before the error is returned.
    ///
    /// All validation happens before the scorer is touched, so a failed
    /// call mutates no recurrent state.
    pub fn process(&mut self, frame: AudioFrame<'_>) -> Result<f32> {
        if self.poisoned {
            return Err(VocaleError::SessionPoisoned);
        }
        let scorer = self.scorer.as_mut().ok_or(VocaleError::SessionClosed)?;

        let view = frame.normalize()?;
        if view.len() != self.window_size_samples {
            return Err(VocaleError::WindowLengthMismatch {
                got: view.len(),
                expected: self.window_size_samples,
            });
        }

        match scorer.score(&view) {
            Ok(score) => Ok(score),
            Err(e) => {
                self.poisoned = true;
                Err(e)
            }
        }
    }

    /// Score one window supplied as a generic numeric sequence.
    ///
    /// Always allocates one transient buffer; prefer [`Self::process`]
    /// with `AudioFrame::F32` when the samples already live in a slice.
    pub fn process_samples<S, I>(&mut self, samples: I) -> Result<f32>
    where
        S: Sample,
        I: IntoIterator<Item = S>,
    {
        let buf: Vec<f32> = samples.into_iter().map(Sample::to_f32).collect();
        self.process(AudioFrame::F32(&buf))
    }

    /// Zero the scorer's recurrent state, e.g. on a stream discontinuity.
    ///
    /// Does not clear poisoning: a poisoned session must be recreated.
    ///
    /// # Errors
    /// `SessionClosed` after `close`.
    pub fn reset(&mut self) -> Result<()> {
        let scorer = self.scorer.as_mut().ok_or(VocaleError::SessionClosed)?;
        scorer.reset();
        Ok(())
    }

    /// Release the scorer and its native resources. Idempotent; closing an
    /// already-closed session is a no-op.
    pub fn close(&mut self) {
        if self.scorer.take().is_some() {
            debug!("VadSession closed");
        }
    }
}

impl std::fmt::Debug for VadSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VadSession")
            .field("sample_rate", &self.sample_rate)
            .field("window_size_samples", &self.window_size_samples)
            .field("closed", &self.is_closed())
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

/// Thread-safe reference-counted handle to one [`VadSession`].
///
/// Serializes all cross-thread use of the session through a
/// `parking_lot::Mutex`, preserving the strict call ordering the recurrent
/// state depends on. Interleaved `process` calls from multiple threads
/// execute one at a time, each seeing the state left by the previous call.
#[derive(Clone)]
pub struct SessionHandle(Arc<Mutex<VadSession>>);

impl SessionHandle {
    /// Wrap a session in a shareable handle.
    pub fn new(session: VadSession) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Serialized [`VadSession::process`].
    pub fn process(&self, frame: AudioFrame<'_>) -> Result<f32> {
        self.0.lock().process(frame)
    }

    /// Lock the underlying session for a multi-call sequence.
    pub fn lock(&self) -> parking_lot::MutexGuard<'_, VadSession> {
        self.0.lock()
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}
