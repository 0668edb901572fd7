use serde::{Deserialize, Serialize};

use crate::audio::buffer::StereoBuffer;
use crate::audio::features::AnalysisResult;
use crate::audio::resample::resample;
use crate::error::{ConvertError, Result};

use super::downmix::Downmixer;
use super::weights::MixWeights;

/// Per-call conversion parameters.
///
/// Immutable once built; pass a fresh value (or a shared reference) to each
/// conversion instead of mutating options on a long-lived converter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// How much side information to fold back in (0.0-1.0)
    pub preserve_width: f32,
    /// How much harmonic/high-band content to reinject (0.0-1.0)
    pub preserve_richness: f32,
    /// Loudness multiplier applied to the source mid level (0.5-2.0)
    pub volume_compensation: f32,
    /// Reserved; accepted and clamped but does not change processing yet
    pub quality: f32,
    /// Gate for harmonic reinjection
    pub spectral_analysis: bool,
    /// Resample to this rate before downmixing
    pub sample_rate: Option<u32>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            preserve_width: 0.7,
            preserve_richness: 0.8,
            volume_compensation: 1.1,
            quality: 0.8,
            spectral_analysis: true,
            sample_rate: None,
        }
    }
}

impl ConversionConfig {
    pub fn with_preserve_width(mut self, value: f32) -> Self {
        self.preserve_width = value.clamp(0.0, 1.0);
        self
    }

    pub fn with_preserve_richness(mut self, value: f32) -> Self {
        self.preserve_richness = value.clamp(0.0, 1.0);
        self
    }

    pub fn with_volume_compensation(mut self, value: f32) -> Self {
        self.volume_compensation = value.clamp(0.5, 2.0);
        self
    }

    pub fn with_quality(mut self, value: f32) -> Self {
        self.quality = value.clamp(0.0, 1.0);
        self
    }

    pub fn with_spectral_analysis(mut self, enabled: bool) -> Self {
        self.spectral_analysis = enabled;
        self
    }

    /// A zero rate is kept and rejected at conversion time.
    pub fn with_sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    /// Re-apply the builder clamps, e.g. after deserializing from a file.
    pub fn clamped(&self) -> Self {
        Self {
            preserve_width: self.preserve_width.clamp(0.0, 1.0),
            preserve_richness: self.preserve_richness.clamp(0.0, 1.0),
            volume_compensation: self.volume_compensation.clamp(0.5, 2.0),
            quality: self.quality.clamp(0.0, 1.0),
            spectral_analysis: self.spectral_analysis,
            sample_rate: self.sample_rate,
        }
    }
}

/// Converted mono signal plus what the pipeline decided along the way.
#[derive(Clone, Debug)]
pub struct MonoOutput {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub analysis: AnalysisResult,
    pub weights: MixWeights,
}

impl MonoOutput {
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Entry point that owns the fixed weight tables.
///
/// All methods take `&self` and hold no mutable state, so one converter can
/// be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    downmixer: Downmixer,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_downmixer(downmixer: Downmixer) -> Self {
        Self { downmixer }
    }

    pub fn analyze(&self, buffer: &StereoBuffer) -> AnalysisResult {
        self.downmixer.analyze(buffer)
    }

    /// Weights the downmixer would use for this analysis.
    pub fn mix_weights(&self, analysis: &AnalysisResult) -> MixWeights {
        self.downmixer.mix_weights(analysis)
    }

    pub fn convert(&self, buffer: &StereoBuffer, config: &ConversionConfig) -> Result<MonoOutput> {
        let config = config.clamped();

        let resampled = match config.sample_rate {
            Some(0) => return Err(ConvertError::InvalidSampleRate(0)),
            Some(rate) if rate != buffer.sample_rate() => {
                log::debug!("Resampling {} Hz -> {} Hz", buffer.sample_rate(), rate);
                let left = resample(buffer.left(), buffer.sample_rate(), rate)?;
                let right = resample(buffer.right(), buffer.sample_rate(), rate)?;
                Some(StereoBuffer::new(left, right, rate)?)
            }
            _ => None,
        };
        let source = resampled.as_ref().unwrap_or(buffer);

        let downmix = self.downmixer.process(source, &config);

        Ok(MonoOutput {
            samples: downmix.samples,
            sample_rate: source.sample_rate(),
            analysis: downmix.analysis,
            weights: downmix.weights,
        })
    }
}
