use thiserror::Error;

/// Input validation failures. Degenerate signals (silence, zero-energy
/// channels) are not errors; they resolve to zero/identity results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("channel length mismatch: left has {left} samples, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("stereo buffer is empty")]
    EmptyBuffer,

    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    #[error("unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(usize),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
