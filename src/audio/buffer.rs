use crate::error::{ConvertError, Result};

/// Two equal-length channels of f32 samples plus their sample rate.
///
/// Construction validates the invariants (equal, non-zero length and a
/// positive sample rate); the buffer is read-only afterwards. Samples are
/// expected to be finite and within [-1.0, 1.0]; non-finite values are not
/// sanitized.
#[derive(Clone, Debug, PartialEq)]
pub struct StereoBuffer {
    left: Vec<f32>,
    right: Vec<f32>,
    sample_rate: u32,
}

impl StereoBuffer {
    pub fn new(left: Vec<f32>, right: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if left.len() != right.len() {
            return Err(ConvertError::LengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        if left.is_empty() {
            return Err(ConvertError::EmptyBuffer);
        }
        if sample_rate == 0 {
            return Err(ConvertError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            left,
            right,
            sample_rate,
        })
    }

    /// Duplicate a mono signal into both channels.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        let right = samples.clone();
        Self::new(samples, right, sample_rate)
    }

    /// Split interleaved frames. One channel is duplicated, two are split.
    pub fn from_interleaved(samples: &[f32], channels: usize, sample_rate: u32) -> Result<Self> {
        match channels {
            1 => Self::from_mono(samples.to_vec(), sample_rate),
            2 => {
                let frames = samples.len() / 2;
                let mut left = Vec::with_capacity(frames);
                let mut right = Vec::with_capacity(frames);
                for frame in samples.chunks_exact(2) {
                    left.push(frame[0]);
                    right.push(frame[1]);
                }
                Self::new(left, right, sample_rate)
            }
            n => Err(ConvertError::UnsupportedChannels(n)),
        }
    }

    pub fn left(&self) -> &[f32] {
        &self.left
    }

    pub fn right(&self) -> &[f32] {
        &self.right
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel). Never zero.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn duration(&self) -> f32 {
        self.len() as f32 / self.sample_rate as f32
    }
}
