use serde::Serialize;

/// Number of features fed to the weight mapper.
pub const FEATURE_COUNT: usize = 8;

/// Share of sampled energy in each inter-channel difference band.
///
/// Sums to 1.0 when any energy was sampled, otherwise all zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FrequencyDistribution {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl FrequencyDistribution {
    pub fn total(&self) -> f32 {
        self.low + self.mid + self.high
    }
}

/// Stereo characteristics of one buffer (Pass 1 output).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Mean absolute L/R difference, clamped to [0, 1]
    pub width: f32,
    /// Zero-crossing-density estimate of harmonic content, [0, 1]
    pub richness: f32,
    /// RMS of the mid (L+R)/2 signal
    pub rms_level: f32,
    /// Absolute peak over both channels
    pub peak_level: f32,
    /// Zero-lag normalized cross-correlation, [-1, 1]
    pub phase_correlation: f32,
    pub frequency_distribution: FrequencyDistribution,
}

impl AnalysisResult {
    /// Feature vector in the weight mapper's fixed input order:
    /// width, richness, rms, peak, shifted phase, low, mid, high.
    pub fn feature_vector(&self) -> [f32; FEATURE_COUNT] {
        [
            self.width,
            self.richness,
            self.rms_level,
            self.peak_level,
            (self.phase_correlation + 1.0) / 2.0,
            self.frequency_distribution.low,
            self.frequency_distribution.mid,
            self.frequency_distribution.high,
        ]
    }

    pub fn is_silent(&self) -> bool {
        self.peak_level == 0.0
    }
}
