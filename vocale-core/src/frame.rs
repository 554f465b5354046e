//! Buffer adaptation: caller-supplied audio representations → `&[f32]`.
//!
//! Callers hand audio to a session in whatever form their capture layer
//! produces. The closed [`AudioFrame`] set replaces duck typing with
//! explicit tags, each carrying its own validation rules:
//!
//! - [`AudioFrame::F32`] is the canonical form and the zero-copy path: the
//!   normalized view aliases the caller's slice exactly.
//! - [`AudioFrame::Bytes`] reinterprets raw native-endian IEEE-754 bytes.
//!   Safe Rust cannot view `&[u8]` as `&[f32]` in place (byte slices carry
//!   no 4-byte alignment guarantee), so this path decodes into one transient
//!   allocation.
//! - [`AudioFrame::I16`] rescales signed 16-bit PCM into one transient
//!   allocation.
//!
//! Arbitrary numeric sources go through the [`Sample`] trait and
//! `VadSession::process_samples`, which always allocates.
//!
//! The adapter never checks window length — it surfaces the element count
//! unmodified and the session performs the single length comparison.

use std::borrow::Cow;

use crate::error::{Result, VocaleError};

/// One window of audio in a caller-chosen representation.
///
/// The frame borrows caller memory for the duration of one call; nothing is
/// retained afterwards and the contents are never mutated.
#[derive(Debug, Clone, Copy)]
pub enum AudioFrame<'a> {
    /// Raw bytes of IEEE-754 single-precision samples, native byte order.
    /// Length must be a non-zero multiple of 4.
    Bytes(&'a [u8]),
    /// Single-precision PCM samples, nominally in [-1.0, 1.0]. Used in place.
    F32(&'a [f32]),
    /// Signed 16-bit PCM samples, rescaled to [-1.0, 1.0) with one copy.
    I16(&'a [i16]),
}

impl<'a> AudioFrame<'a> {
    /// Normalize this frame into a contiguous f32 view.
    ///
    /// Returns `Cow::Borrowed` whenever the caller's memory can be used as
    /// is, `Cow::Owned` when a one-time decode/rescale copy is unavoidable.
    ///
    /// # Errors
    /// - [`VocaleError::EmptyInput`] for any empty frame.
    /// - [`VocaleError::MisalignedLength`] for a byte frame whose length is
    ///   not a multiple of 4.
    pub fn normalize(&self) -> Result<Cow<'a, [f32]>> {
        match *self {
            AudioFrame::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(VocaleError::EmptyInput);
                }
                if bytes.len() % 4 != 0 {
                    return Err(VocaleError::MisalignedLength { len: bytes.len() });
                }
                let samples: Vec<f32> = bytes
                    .chunks_exact(4)
                    .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
                    .collect();
                Ok(Cow::Owned(samples))
            }
            AudioFrame::F32(samples) => {
                if samples.is_empty() {
                    return Err(VocaleError::EmptyInput);
                }
                Ok(Cow::Borrowed(samples))
            }
            AudioFrame::I16(samples) => {
                if samples.is_empty() {
                    return Err(VocaleError::EmptyInput);
                }
                Ok(Cow::Owned(samples.iter().map(|&s| s.to_f32()).collect()))
            }
        }
    }
}

impl<'a> From<&'a [f32]> for AudioFrame<'a> {
    fn from(samples: &'a [f32]) -> Self {
        AudioFrame::F32(samples)
    }
}

impl<'a> From<&'a [i16]> for AudioFrame<'a> {
    fn from(samples: &'a [i16]) -> Self {
        AudioFrame::I16(samples)
    }
}

impl<'a> From<&'a [u8]> for AudioFrame<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        AudioFrame::Bytes(bytes)
    }
}

/// Conversion of a single numeric sample into PCM-normalized f32.
///
/// The generic fallback for sources with no in-place representation;
/// going through it always allocates one transient buffer per window.
pub trait Sample: Copy {
    fn to_f32(self) -> f32;
}

impl Sample for f32 {
    fn to_f32(self) -> f32 {
        self
    }
}

impl Sample for f64 {
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl Sample for i16 {
    fn to_f32(self) -> f32 {
        self as f32 / 32_768.0
    }
}

impl Sample for i32 {
    fn to_f32(self) -> f32 {
        self as f32 / 2_147_483_648.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn f32_path_borrows_caller_memory() {
        let samples = vec![0.1f32, -0.2, 0.3];
        let frame = AudioFrame::F32(&samples);
        let view = frame.normalize().unwrap();
        assert!(matches!(view, Cow::Borrowed(_)));
        assert_eq!(view.as_ptr(), samples.as_ptr());
    }

    #[test]
    fn byte_path_decodes_native_endian() {
        let samples = [0.5f32, -1.0, 0.25, f32::MIN_POSITIVE];
        let mut bytes = Vec::new();
        for s in samples {
            bytes.extend_from_slice(&s.to_ne_bytes());
        }
        let view = AudioFrame::Bytes(&bytes).normalize().unwrap();
        assert_eq!(view.as_ref(), &samples);
    }

    #[test]
    fn byte_path_rejects_misaligned_length() {
        for len in [1, 2, 3, 5, 511] {
            let bytes = vec![0u8; len];
            match AudioFrame::Bytes(&bytes).normalize() {
                Err(VocaleError::MisalignedLength { len: got }) => assert_eq!(got, len),
                other => panic!("expected MisalignedLength for {len} bytes, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_frames_are_rejected() {
        assert!(matches!(
            AudioFrame::Bytes(&[]).normalize(),
            Err(VocaleError::EmptyInput)
        ));
        assert!(matches!(
            AudioFrame::F32(&[]).normalize(),
            Err(VocaleError::EmptyInput)
        ));
        assert!(matches!(
            AudioFrame::I16(&[]).normalize(),
            Err(VocaleError::EmptyInput)
        ));
    }

    #[test]
    fn i16_path_rescales_to_unit_range() {
        let samples = [i16::MIN, -16_384, 0, 16_384, i16::MAX];
        let view = AudioFrame::I16(&samples).normalize().unwrap();
        assert_abs_diff_eq!(view[0], -1.0);
        assert_abs_diff_eq!(view[1], -0.5);
        assert_abs_diff_eq!(view[2], 0.0);
        assert_abs_diff_eq!(view[3], 0.5);
        assert!(view[4] < 1.0);
        assert_abs_diff_eq!(view[4], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn element_count_is_surfaced_unmodified() {
        // Not the window size — the adapter must not care.
        let samples = vec![0.0f32; 7];
        let view = AudioFrame::F32(&samples).normalize().unwrap();
        assert_eq!(view.len(), 7);

        let bytes = vec![0u8; 20];
        let view = AudioFrame::Bytes(&bytes).normalize().unwrap();
        assert_eq!(view.len(), 5);
    }

    #[test]
    fn sample_conversions() {
        assert_abs_diff_eq!(0.5f32.to_f32(), 0.5);
        assert_abs_diff_eq!(0.5f64.to_f32(), 0.5);
        assert_abs_diff_eq!((-32_768i16).to_f32(), -1.0);
        assert_abs_diff_eq!(i32::MIN.to_f32(), -1.0);
    }
}
