//! Silero VAD neural scorer.
//!
//! Wraps the official Silero VAD v5 ONNX model published at
//! <https://github.com/snakers4/silero-vad>.
//!
//! ## Model I/O
//!
//! | Name     | Shape       | DType | Direction |
//! |----------|-------------|-------|-----------|
//! | `input`  | `[1, W]`    | f32   | in        |
//! | `state`  | `[2,1,128]` | f32   | in        |
//! | `sr`     | `[1]`       | i64   | in        |
//! | `output` | `[1, 1]`    | f32   | out       |
//! | `stateN` | `[2,1,128]` | f32   | out       |
//!
//! `W` is 512 at 16 kHz and 256 at 8 kHz (the 32 ms window contract). The
//! GRU state is zero at construction and overwritten from `stateN` after
//! every run, so scores are conditioned on the full ordered window history.

use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2, Array3};
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::{Session, SessionInputValue};
use ort::value::Value;
use tracing::info;

use crate::error::{Result, VocaleError};
use crate::inference::SpeechScorer;
use crate::window;

/// GRU state layout: 2 layers × 1 batch × 128 units.
const STATE_SHAPE: (usize, usize, usize) = (2, 1, 128);
const STATE_LEN: usize = 256;

/// Neural scorer backed by the Silero VAD v5 ONNX model.
pub struct SileroScorer {
    session: Session,
    sample_rate: u32,
    window_size: usize,
    state: Vec<f32>, // [2, 1, 128] row-major
}

impl SileroScorer {
    /// Load the Silero VAD ONNX model from `path`, bound to `sample_rate`.
    ///
    /// The session is built single-threaded: one window per call is far too
    /// small for intra-op parallelism to pay off.
    ///
    /// # Errors
    /// `UnsupportedSampleRate`, `ModelNotFound`, or `ModelLoad`.
    pub fn new(path: impl AsRef<Path>, sample_rate: u32) -> Result<Self> {
        let window_size = window::window_size_samples(sample_rate)?;

        let path = path.as_ref();
        if !path.exists() {
            return Err(VocaleError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let size_mb = std::fs::metadata(path)
            .map(|m| m.len() as f64 / 1_048_576.0)
            .unwrap_or(0.0);

        info!("=== SileroScorer Startup Report ===");
        info!("  path: {:?}", path);
        info!("  size: {:.2} MB", size_mb);
        info!("  sample_rate: {} Hz", sample_rate);
        info!("  window: {} samples", window_size);

        let session = SessionBuilder::new()
            .map_err(|e| VocaleError::ModelLoad(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| VocaleError::ModelLoad(e.to_string()))?
            .with_intra_threads(1)
            .map_err(|e| VocaleError::ModelLoad(e.to_string()))?
            .with_inter_threads(1)
            .map_err(|e| VocaleError::ModelLoad(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| VocaleError::ModelLoad(e.to_string()))?;

        info!("=== SileroScorer ready ===");

        Ok(Self {
            session,
            sample_rate,
            window_size,
            state: vec![0.0; STATE_LEN],
        })
    }

    /// Default location of the bundled model: `silero_vad.onnx` in the
    /// platform models directory.
    pub fn default_model_path() -> PathBuf {
        default_models_dir().join("silero_vad.onnx")
    }
}

impl SpeechScorer for SileroScorer {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn window_size_samples(&self) -> usize {
        self.window_size
    }

    fn score(&mut self, window: &[f32]) -> Result<f32> {
        debug_assert_eq!(window.len(), self.window_size);

        let input_arr = Array2::<f32>::from_shape_vec((1, self.window_size), window.to_vec())
            .map_err(|e| VocaleError::NativeInference(e.to_string()))?;
        let input_val = Value::from_array(input_arr)
            .map_err(|e: ort::Error| VocaleError::NativeInference(e.to_string()))?;

        let state_arr = Array3::<f32>::from_shape_vec(STATE_SHAPE, self.state.clone())
            .map_err(|e| VocaleError::NativeInference(e.to_string()))?;
        let state_val = Value::from_array(state_arr)
            .map_err(|e: ort::Error| VocaleError::NativeInference(e.to_string()))?;

        let sr_arr = Array1::<i64>::from_elem(1, i64::from(self.sample_rate));
        let sr_val = Value::from_array(sr_arr)
            .map_err(|e: ort::Error| VocaleError::NativeInference(e.to_string()))?;

        let input_values: Vec<(String, SessionInputValue<'_>)> = vec![
            ("input".to_string(), input_val.into()),
            ("state".to_string(), state_val.into()),
            ("sr".to_string(), sr_val.into()),
        ];

        let outputs = self
            .session
            .run(input_values)
            .map_err(|e| VocaleError::NativeInference(e.to_string()))?;

        let prob_out = outputs.get("output").ok_or_else(|| {
            VocaleError::NativeInference("model produced no 'output' tensor".into())
        })?;
        let (_, prob_data) = prob_out
            .try_extract_tensor::<f32>()
            .map_err(|e| VocaleError::NativeInference(e.to_string()))?;
        let prob = prob_data.first().copied().unwrap_or(0.0);

        let state_out = outputs.get("stateN").ok_or_else(|| {
            VocaleError::NativeInference("model produced no 'stateN' tensor".into())
        })?;
        let (_, state_data) = state_out
            .try_extract_tensor::<f32>()
            .map_err(|e| VocaleError::NativeInference(e.to_string()))?;
        if state_data.len() != STATE_LEN {
            return Err(VocaleError::NativeInference(format!(
                "'stateN' has {} elements, expected {STATE_LEN}",
                state_data.len()
            )));
        }
        self.state.clear();
        self.state.extend_from_slice(state_data);

        Ok(prob.clamp(0.0, 1.0))
    }

    fn reset(&mut self) {
        self.state.iter_mut().for_each(|v| *v = 0.0);
    }
}

/// Platform models directory, overridable with `VOCALE_MODELS_DIR`.
pub fn default_models_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("VOCALE_MODELS_DIR") {
        return PathBuf::from(dir);
    }
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(|p| PathBuf::from(p).join("Vocale").join("models"))
            .unwrap_or_else(|| PathBuf::from("models"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::var_os("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".local")
                    .join("share")
            })
            .join("vocale")
            .join("models")
    }
}
