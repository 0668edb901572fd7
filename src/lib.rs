//! Perceptual stereo-to-mono downmixing.
//!
//! A plain `(L + R) / 2` fold cancels out-of-phase content, flattens the
//! stereo image and drops perceived loudness. This crate analyzes the stereo
//! buffer first (width, phase correlation, levels, a zero-crossing richness
//! estimate and a coarse difference-band distribution), maps those features
//! to mixing weights through a small fixed feed-forward transform, then
//! downmixes in stages: weighted sum plus side fold-in, harmonic
//! reinjection, high-frequency emphasis, loudness compensation and a soft
//! limiter.
//!
//! ```no_run
//! use monica::{ConversionConfig, Converter, StereoBuffer};
//!
//! let left = vec![0.0f32; 44100];
//! let right = vec![0.0f32; 44100];
//! let buffer = StereoBuffer::new(left, right, 44100)?;
//!
//! let converter = Converter::new();
//! let mono = converter.convert(&buffer, &ConversionConfig::default().with_preserve_width(0.9))?;
//! println!("{} samples at {} Hz", mono.samples.len(), mono.sample_rate);
//! # Ok::<(), monica::ConvertError>(())
//! ```

pub mod audio;
pub mod config;
pub mod encode;
pub mod error;
pub mod mixer;

pub use audio::analysis::StereoAnalyzer;
pub use audio::buffer::StereoBuffer;
pub use audio::features::{AnalysisResult, FrequencyDistribution};
pub use error::ConvertError;
pub use mixer::converter::{ConversionConfig, Converter, MonoOutput};
pub use mixer::downmix::Downmixer;
pub use mixer::weights::{MixWeights, WeightMapper};

/// Analyze a stereo buffer without converting it.
pub fn analyze(buffer: &StereoBuffer) -> AnalysisResult {
    StereoAnalyzer::new().analyze(buffer)
}

/// Convert with a freshly built converter. Prefer holding a [`Converter`]
/// when converting many buffers.
pub fn convert(buffer: &StereoBuffer, config: &ConversionConfig) -> Result<MonoOutput, ConvertError> {
    Converter::new().convert(buffer, config)
}

/// Validate raw channels and analyze them.
pub fn analyze_channels(
    left: &[f32],
    right: &[f32],
    sample_rate: u32,
) -> Result<AnalysisResult, ConvertError> {
    let buffer = StereoBuffer::new(left.to_vec(), right.to_vec(), sample_rate)?;
    Ok(analyze(&buffer))
}

/// Validate raw channels and convert them.
pub fn convert_channels(
    left: &[f32],
    right: &[f32],
    sample_rate: u32,
    config: &ConversionConfig,
) -> Result<MonoOutput, ConvertError> {
    let buffer = StereoBuffer::new(left.to_vec(), right.to_vec(), sample_rate)?;
    convert(&buffer, config)
}
