//! Decode -> convert -> encode through real WAV files

use monica::audio::decode::decode_stereo;
use monica::encode::wav::{write_mono_wav, BitDepth};
use monica::{ConversionConfig, Converter};
use std::path::Path;

fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let left = (t * 440.0 * std::f32::consts::TAU).sin() * 0.5;
        let right = (t * 660.0 * std::f32::consts::TAU).sin() * 0.3;
        writer.write_sample((left * 32767.0) as i16).unwrap();
        if channels == 2 {
            writer.write_sample((right * 32767.0) as i16).unwrap();
        }
    }
    writer.finalize().unwrap();
}

#[test]
fn stereo_wav_converts_to_mono_wav() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stereo.wav");
    let output = dir.path().join("stereo_mono.wav");
    write_wav(&input, 2, 44100, 4410);

    let buffer = decode_stereo(&input).unwrap();
    assert_eq!(buffer.len(), 4410);
    assert_eq!(buffer.sample_rate(), 44100);
    assert_ne!(buffer.left(), buffer.right());

    let mono = Converter::new()
        .convert(&buffer, &ConversionConfig::default())
        .unwrap();
    write_mono_wav(&output, &mono.samples, mono.sample_rate, BitDepth::Int24).unwrap();

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().bits_per_sample, 24);
    assert_eq!(reader.len(), 4410);
}

#[test]
fn mono_wav_is_duplicated_into_both_channels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mono.wav");
    write_wav(&input, 1, 22050, 2205);

    let buffer = decode_stereo(&input).unwrap();
    assert_eq!(buffer.left(), buffer.right());

    let analysis = Converter::new().analyze(&buffer);
    assert_eq!(analysis.width, 0.0);
}

#[test]
fn resampled_output_uses_target_rate() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hi.wav");
    let output = dir.path().join("lo.wav");
    write_wav(&input, 2, 48000, 4800);

    let buffer = decode_stereo(&input).unwrap();
    let config = ConversionConfig::default().with_sample_rate(24000);
    let mono = Converter::new().convert(&buffer, &config).unwrap();
    write_mono_wav(&output, &mono.samples, mono.sample_rate, BitDepth::Float32).unwrap();

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().sample_rate, 24000);
    assert_eq!(reader.len(), 2400);
}

#[test]
fn missing_file_reports_path() {
    let err = decode_stereo(Path::new("/nonexistent/monica.wav")).unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/monica.wav"));
}
