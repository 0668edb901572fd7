use crate::audio::analysis::StereoAnalyzer;
use crate::audio::buffer::StereoBuffer;
use crate::audio::dsp::{hann_window, normalize, soft_clip};
use crate::audio::features::AnalysisResult;

use super::converter::ConversionConfig;
use super::weights::{MixWeights, WeightMapper};

const HARMONIC_BLOCK: usize = 512;
const HARMONIC_HOP: usize = HARMONIC_BLOCK / 2;
const HARMONIC_MIX: f32 = 0.15;
const RICHNESS_GATE: f32 = 0.3;
const HIGH_BAND_GATE: f32 = 0.2;
const WIDTH_LOUDNESS_BOOST: f32 = 0.15;
const LIMITER_THRESHOLD: f32 = 0.95;

/// Result of one downmix, with the intermediate analysis and weights.
#[derive(Clone, Debug)]
pub struct Downmix {
    pub samples: Vec<f32>,
    pub analysis: AnalysisResult,
    pub weights: MixWeights,
}

/// Multi-stage stereo-to-mono pipeline:
/// analyze, map weights, base+side mix, harmonic reinjection, high-frequency
/// emphasis, loudness compensation, soft limiting.
#[derive(Clone, Debug, Default)]
pub struct Downmixer {
    analyzer: StereoAnalyzer,
    mapper: WeightMapper,
}

impl Downmixer {
    pub fn new(analyzer: StereoAnalyzer, mapper: WeightMapper) -> Self {
        Self { analyzer, mapper }
    }

    pub fn analyze(&self, buffer: &StereoBuffer) -> AnalysisResult {
        self.analyzer.analyze(buffer)
    }

    pub fn mix_weights(&self, analysis: &AnalysisResult) -> MixWeights {
        self.mapper.map_features(&analysis.feature_vector())
    }

    pub fn process(&self, buffer: &StereoBuffer, config: &ConversionConfig) -> Downmix {
        let left = buffer.left();
        let right = buffer.right();

        let analysis = self.analyzer.analyze(buffer);
        let weights = self.mix_weights(&analysis);

        let mut mixed = base_mix(left, right, &weights, config.preserve_width);

        if config.preserve_richness > 0.0 {
            if config.spectral_analysis && analysis.richness > RICHNESS_GATE {
                let gain = config.preserve_richness * analysis.richness * HARMONIC_MIX;
                let harmonic = harmonic_content(left, right);
                for (sample, h) in mixed.iter_mut().zip(harmonic.iter()) {
                    *sample += h * gain;
                }
                log::debug!("Harmonic reinjection applied (gain={:.4})", gain);
            } else {
                log::debug!(
                    "Harmonic reinjection skipped (spectral={}, richness={:.4})",
                    config.spectral_analysis,
                    analysis.richness
                );
            }
        }

        let high = analysis.frequency_distribution.high;
        if high > HIGH_BAND_GATE {
            let factor = 1.0 + high * 0.2 * config.preserve_richness;
            enhance_high_frequencies(&mut mixed, factor);
            log::debug!("High-frequency emphasis applied (factor={:.4})", factor);
        }

        let target_rms = analysis.rms_level
            * config.volume_compensation
            * (1.0 + analysis.width * WIDTH_LOUDNESS_BOOST);
        let compensated = normalize(&mixed, target_rms);

        let samples = soft_clip(&compensated, LIMITER_THRESHOLD);

        Downmix {
            samples,
            analysis,
            weights,
        }
    }
}

/// Weighted channel sum with the side signal folded back at half strength.
fn base_mix(left: &[f32], right: &[f32], weights: &MixWeights, preserve_width: f32) -> Vec<f32> {
    left.iter()
        .zip(right.iter())
        .map(|(&l, &r)| {
            let mid = l * weights.left_weight + r * weights.right_weight;
            if preserve_width > 0.0 {
                let side = (l - r) * weights.side_gain * preserve_width;
                mid + side * 0.5
            } else {
                mid
            }
        })
        .collect()
}

/// Overlap-added Hann-windowed blocks of the half-scaled difference signal.
///
/// Only whole blocks contribute; a tail shorter than one block stays zero.
fn harmonic_content(left: &[f32], right: &[f32]) -> Vec<f32> {
    let len = left.len();
    let mut harmonic = vec![0.0f32; len];
    let window = hann_window(HARMONIC_BLOCK);

    let mut start = 0;
    while start + HARMONIC_BLOCK <= len {
        for (offset, w) in window.iter().enumerate() {
            let i = start + offset;
            harmonic[i] += (left[i] - right[i]) * 0.5 * w;
        }
        start += HARMONIC_HOP;
    }

    harmonic
}

/// Recursive first-difference emphasis. Each step reads the already
/// emphasized previous sample, so this must stay a left-to-right scan.
fn enhance_high_frequencies(samples: &mut [f32], factor: f32) {
    let amount = factor - 1.0;
    for i in 1..samples.len() {
        let high = (samples[i] - samples[i - 1]) * 0.5;
        samples[i] += high * amount;
    }
}
