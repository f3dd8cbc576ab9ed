//! Errors surfaced by a render or save attempt.
//!
//! Every error is terminal for the attempt that produced it: nothing is
//! retried and no default output is substituted. The caller decides whether
//! to prompt for a new source image or try the save again.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::persist::PersistenceError;
use crate::target::InvalidTargetError;
use crate::CropMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The source bytes could not be decoded as an image.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The source buffer does not hold `width * height` RGB pixels.
    #[error("Invalid source: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidSource {
        width: u32,
        height: u32,
        expected: u64,
        actual: u64,
    },

    /// The crop rectangle has no area.
    #[error("Empty crop: {mode} crop of a {width}x{height} source has no area")]
    EmptyCrop {
        width: u32,
        height: u32,
        mode: CropMode,
    },

    /// The target reference does not name a content entity.
    #[error(transparent)]
    InvalidTarget(#[from] InvalidTargetError),

    /// The rendered buffer could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The persistence collaborator reported a failure.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The editor was closed before the render finished.
    #[error("Render abandoned: the editor was closed")]
    Abandoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_crop_display() {
        let err = EditorError::EmptyCrop {
            width: 0,
            height: 40,
            mode: CropMode::Vertical,
        };
        assert_eq!(
            err.to_string(),
            "Empty crop: vertical crop of a 0x40 source has no area"
        );
    }

    #[test]
    fn test_decode_error_is_transparent() {
        let err = EditorError::from(DecodeError::Empty);
        assert_eq!(err.to_string(), "Empty image data");
    }
}
