use thiserror::Error;

/// All errors produced by vocale-core.
#[derive(Debug, Error)]
pub enum VocaleError {
    #[error("unsupported sample rate: {rate} Hz (supported: 8000, 16000)")]
    UnsupportedSampleRate { rate: u32 },

    #[error("model file not found: {}", .path.display())]
    ModelNotFound { path: std::path::PathBuf },

    #[error("model load error: {0}")]
    ModelLoad(String),

    #[error("inference error: {0}")]
    NativeInference(String),

    #[error("audio input is empty")]
    EmptyInput,

    #[error("byte length {len} is not a multiple of 4 (the f32 sample width)")]
    MisalignedLength { len: usize },

    #[error("window has {got} samples, session requires exactly {expected}")]
    WindowLengthMismatch { got: usize, expected: usize },

    #[error("session is closed")]
    SessionClosed,

    #[error("session is poisoned by an earlier inference failure — recreate it")]
    SessionPoisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VocaleError>;
