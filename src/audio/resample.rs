use crate::error::{ConvertError, Result};

/// Linear-interpolation resampler.
///
/// Output length is `floor(len / (source_rate / target_rate))`. Equal rates
/// return the input unchanged.
pub fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    if source_rate == 0 {
        return Err(ConvertError::InvalidSampleRate(source_rate));
    }
    if target_rate == 0 {
        return Err(ConvertError::InvalidSampleRate(target_rate));
    }
    if source_rate == target_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let out_len = (samples.len() as f64 / ratio).floor() as usize;
    let last = samples.len() - 1;

    let output = (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = (pos.floor() as usize).min(last);
            let frac = (pos - idx as f64) as f32;
            let s0 = samples[idx];
            let s1 = samples[(idx + 1).min(last)];
            s0 + (s1 - s0) * frac
        })
        .collect();

    Ok(output)
}
