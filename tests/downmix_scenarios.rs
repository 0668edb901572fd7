//! End-to-end behaviour of the public analysis and conversion API

use approx::assert_abs_diff_eq;
use monica::{
    analyze, analyze_channels, convert, convert_channels, AnalysisResult, ConversionConfig,
    ConvertError, FrequencyDistribution, StereoBuffer,
};

fn sine(len: usize, step: f32, phase: f32, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| (i as f32 * step + phase).sin() * amplitude)
        .collect()
}

fn quadrature_pair() -> StereoBuffer {
    let left = sine(1000, 0.1, 0.0, 0.5);
    let right = sine(1000, 0.1, std::f32::consts::FRAC_PI_2, 0.5);
    StereoBuffer::new(left, right, 44100).unwrap()
}

#[test]
fn silent_buffer_analysis_and_conversion() {
    let buffer = StereoBuffer::new(vec![0.0; 1000], vec![0.0; 1000], 44100).unwrap();

    let analysis = analyze(&buffer);
    assert_eq!(
        analysis,
        AnalysisResult {
            width: 0.0,
            richness: 0.0,
            rms_level: 0.0,
            peak_level: 0.0,
            phase_correlation: 0.0,
            frequency_distribution: FrequencyDistribution {
                low: 0.0,
                mid: 0.0,
                high: 0.0
            },
        }
    );

    let mono = convert(&buffer, &ConversionConfig::default()).unwrap();
    assert_eq!(mono.samples.len(), 1000);
    assert!(mono.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn constant_signal_levels() {
    let analysis = analyze_channels(&[0.5; 1000], &[0.5; 1000], 44100).unwrap();
    assert_abs_diff_eq!(analysis.rms_level, 0.5, epsilon = 1e-5);
    assert_eq!(analysis.peak_level, 0.5);
}

#[test]
fn true_mono_input_is_narrow_and_in_phase() {
    let samples = sine(4096, 0.07, 0.0, 0.6);
    let analysis = analyze_channels(&samples, &samples, 48000).unwrap();
    assert!(analysis.width < 1e-6);
    assert!(analysis.phase_correlation > 0.99);
}

#[test]
fn inverted_input_is_wide_and_anti_phase() {
    let left = sine(4096, 0.07, 0.0, 0.6);
    let right: Vec<f32> = left.iter().map(|s| -s).collect();
    let analysis = analyze_channels(&left, &right, 48000).unwrap();
    assert!(analysis.width > 0.5, "got width {}", analysis.width);
    assert_abs_diff_eq!(analysis.phase_correlation, -1.0, epsilon = 1e-4);
}

#[test]
fn band_distribution_sums_to_one() {
    let left = sine(6000, 1.3, 0.0, 0.9);
    let right = sine(6000, 0.05, 0.3, 0.4);
    let dist = analyze_channels(&left, &right, 44100)
        .unwrap()
        .frequency_distribution;
    assert_abs_diff_eq!(dist.low + dist.mid + dist.high, 1.0, epsilon = 1e-5);
}

#[test]
fn width_preservation_changes_output() {
    let buffer = quadrature_pair();
    let narrow = convert(&buffer, &ConversionConfig::default().with_preserve_width(0.0)).unwrap();
    let wide = convert(&buffer, &ConversionConfig::default().with_preserve_width(1.0)).unwrap();

    let difference: f32 = narrow
        .samples
        .iter()
        .zip(wide.samples.iter())
        .map(|(a, b)| (a - b).abs())
        .sum();
    assert!(difference > 0.5, "summed difference was {}", difference);
}

#[test]
fn output_length_always_matches_input() {
    for len in [1, 2, 255, 256, 513, 5000, 9000] {
        let left = sine(len, 0.9, 0.0, 0.8);
        let right = sine(len, 0.3, 1.0, 0.8);
        let mono = convert_channels(&left, &right, 44100, &ConversionConfig::default()).unwrap();
        assert_eq!(mono.samples.len(), len);
        assert!(mono.samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    }
}

#[test]
fn loud_material_is_soft_limited() {
    let left: Vec<f32> = (0..4096).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let right: Vec<f32> = (0..4096).map(|i| if i % 4 < 2 { 1.0 } else { -1.0 }).collect();
    let config = ConversionConfig::default()
        .with_volume_compensation(2.0)
        .with_preserve_width(1.0);
    let mono = convert_channels(&left, &right, 44100, &config).unwrap();
    assert!(mono.samples.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn invalid_buffers_are_rejected() {
    assert_eq!(
        analyze_channels(&[0.1, 0.2], &[0.1], 44100).unwrap_err(),
        ConvertError::LengthMismatch { left: 2, right: 1 }
    );
    assert_eq!(
        convert_channels(&[], &[], 44100, &ConversionConfig::default()).unwrap_err(),
        ConvertError::EmptyBuffer
    );
    assert_eq!(
        analyze_channels(&[0.1], &[0.1], 0).unwrap_err(),
        ConvertError::InvalidSampleRate(0)
    );
}

#[test]
fn conversion_is_reproducible() {
    let buffer = quadrature_pair();
    let config = ConversionConfig::default();
    let first = convert(&buffer, &config).unwrap();
    let second = convert(&buffer, &config).unwrap();
    assert_eq!(first.samples, second.samples);
    assert_eq!(first.weights, second.weights);
}
