use super::buffer::StereoBuffer;
use super::features::{AnalysisResult, FrequencyDistribution};

/// Samples inspected by the richness estimate.
pub const RICHNESS_PREFIX: usize = 8192;
/// Samples inspected by the difference-band distribution.
pub const DISTRIBUTION_PREFIX: usize = 4096;

const RICHNESS_WINDOW: usize = 256;
const RICHNESS_HOP: usize = RICHNESS_WINDOW / 2;

const LOW_BAND_LIMIT: f32 = 0.1;
const MID_BAND_LIMIT: f32 = 0.3;

/// Single-pass statistical feature extractor for stereo buffers.
///
/// The richness and band-distribution estimates only look at a bounded
/// prefix of the buffer; both lengths are tunable.
#[derive(Clone, Copy, Debug)]
pub struct StereoAnalyzer {
    richness_prefix: usize,
    distribution_prefix: usize,
}

impl Default for StereoAnalyzer {
    fn default() -> Self {
        Self {
            richness_prefix: RICHNESS_PREFIX,
            distribution_prefix: DISTRIBUTION_PREFIX,
        }
    }
}

impl StereoAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes(richness_prefix: usize, distribution_prefix: usize) -> Self {
        Self {
            richness_prefix,
            distribution_prefix,
        }
    }

    pub fn analyze(&self, buffer: &StereoBuffer) -> AnalysisResult {
        let left = buffer.left();
        let right = buffer.right();

        let stats = channel_statistics(left, right);
        let richness = estimate_richness(left, right, self.richness_prefix);
        let frequency_distribution =
            difference_band_distribution(left, right, self.distribution_prefix);

        let result = AnalysisResult {
            width: stats.width,
            richness,
            rms_level: stats.rms_level,
            peak_level: stats.peak_level,
            phase_correlation: stats.phase_correlation,
            frequency_distribution,
        };

        if result.is_silent() {
            log::warn!("Analyzed buffer is silent ({} samples)", buffer.len());
        }
        log::debug!(
            "Analysis: width={:.4}, richness={:.4}, rms={:.4}, peak={:.4}, phase={:.4}, bands=[{:.3}, {:.3}, {:.3}]",
            result.width,
            result.richness,
            result.rms_level,
            result.peak_level,
            result.phase_correlation,
            frequency_distribution.low,
            frequency_distribution.mid,
            frequency_distribution.high
        );

        result
    }
}

struct ChannelStatistics {
    width: f32,
    rms_level: f32,
    peak_level: f32,
    phase_correlation: f32,
}

fn channel_statistics(left: &[f32], right: &[f32]) -> ChannelStatistics {
    let mut sum_diff = 0.0f64;
    let mut sum_lr = 0.0f64;
    let mut sum_l_sq = 0.0f64;
    let mut sum_r_sq = 0.0f64;
    let mut sum_mid_sq = 0.0f64;
    let mut peak = 0.0f32;

    for (&l, &r) in left.iter().zip(right.iter()) {
        let mid = (l + r) / 2.0;
        sum_diff += (l - r).abs() as f64;
        sum_lr += l as f64 * r as f64;
        sum_l_sq += l as f64 * l as f64;
        sum_r_sq += r as f64 * r as f64;
        sum_mid_sq += mid as f64 * mid as f64;
        peak = peak.max(l.abs()).max(r.abs());
    }

    let n = left.len().max(1) as f64;
    let left_rms = (sum_l_sq / n).sqrt();
    let right_rms = (sum_r_sq / n).sqrt();

    // Zero-lag only; silent channels have no defined correlation
    let phase_correlation = if left_rms > 0.0 && right_rms > 0.0 {
        ((sum_lr / n) / (left_rms * right_rms)).clamp(-1.0, 1.0) as f32
    } else {
        0.0
    };

    ChannelStatistics {
        width: ((sum_diff / n) as f32).min(1.0),
        rms_level: (sum_mid_sq / n).sqrt() as f32,
        peak_level: peak,
        phase_correlation,
    }
}

/// Zero-crossing rate scaled by window energy, averaged over half-overlapping
/// windows of both channels.
fn estimate_richness(left: &[f32], right: &[f32], prefix: usize) -> f32 {
    let len = left.len().min(prefix);
    if len < RICHNESS_WINDOW {
        return 0.0;
    }

    let mut total = 0.0f32;
    let mut windows = 0usize;
    let mut start = 0;
    while start + RICHNESS_WINDOW <= len {
        let end = start + RICHNESS_WINDOW;
        total += window_complexity(&left[start..end]);
        total += window_complexity(&right[start..end]);
        windows += 1;
        start += RICHNESS_HOP;
    }

    if windows == 0 {
        return 0.0;
    }
    (total / windows as f32).clamp(0.0, 1.0)
}

fn window_complexity(window: &[f32]) -> f32 {
    let crossings = window
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count();
    let zero_crossing_rate = crossings as f32 / window.len() as f32;
    let mean_energy = window.iter().map(|s| s * s).sum::<f32>() / window.len() as f32;
    zero_crossing_rate * mean_energy.sqrt() * 10.0
}

/// Buckets each sample's absolute level by how sharply the channels moved
/// since the previous sample.
fn difference_band_distribution(
    left: &[f32],
    right: &[f32],
    prefix: usize,
) -> FrequencyDistribution {
    let len = left.len().min(prefix);
    let mut low = 0.0f32;
    let mut mid = 0.0f32;
    let mut high = 0.0f32;

    for i in 1..len {
        let delta = ((left[i] - left[i - 1]).abs() + (right[i] - right[i - 1]).abs()) / 2.0;
        let energy = left[i].abs() + right[i].abs();
        if delta < LOW_BAND_LIMIT {
            low += energy;
        } else if delta < MID_BAND_LIMIT {
            mid += energy;
        } else {
            high += energy;
        }
    }

    let total = low + mid + high;
    if total <= 0.0 {
        return FrequencyDistribution::default();
    }

    FrequencyDistribution {
        low: low / total,
        mid: mid / total,
        high: high / total,
    }
}
