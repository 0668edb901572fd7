//! Stateless signal helpers shared by the analyzer and the downmixer.

/// Root mean square, 0.0 for an empty slice.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

/// Largest absolute sample value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

pub fn hann_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos())
        })
        .collect()
}

pub fn apply_hann_window(samples: &[f32]) -> Vec<f32> {
    let window = hann_window(samples.len());
    samples.iter().zip(window.iter()).map(|(s, w)| s * w).collect()
}

/// Scale to `target_rms`, clamping every output sample to [-1, 1].
///
/// Silent input is returned unchanged.
pub fn normalize(samples: &[f32], target_rms: f32) -> Vec<f32> {
    let current = rms(samples);
    if current == 0.0 {
        return samples.to_vec();
    }
    let gain = target_rms / current;
    samples.iter().map(|s| (s * gain).clamp(-1.0, 1.0)).collect()
}

/// tanh knee above `threshold`; samples with |x| <= threshold pass through
/// bit-exact.
pub fn soft_clip(samples: &[f32], threshold: f32) -> Vec<f32> {
    samples.iter().map(|&s| soft_clip_sample(s, threshold)).collect()
}

#[inline]
pub fn soft_clip_sample(sample: f32, threshold: f32) -> f32 {
    let magnitude = sample.abs();
    if magnitude <= threshold {
        return sample;
    }
    let headroom = 1.0 - threshold;
    sample.signum() * (threshold + headroom * ((magnitude - threshold) / headroom).tanh())
}
