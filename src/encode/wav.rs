use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{Seek, Write};
use std::path::Path;

/// Output sample format for mono WAV files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u16")]
pub enum BitDepth {
    #[default]
    Int16,
    Int24,
    Float32,
}

impl TryFrom<u16> for BitDepth {
    type Error = String;

    fn try_from(bits: u16) -> std::result::Result<Self, Self::Error> {
        match bits {
            16 => Ok(BitDepth::Int16),
            24 => Ok(BitDepth::Int24),
            32 => Ok(BitDepth::Float32),
            other => Err(format!("Unsupported bit depth: {} (expected 16, 24 or 32)", other)),
        }
    }
}

impl BitDepth {
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Float32 => 32,
        }
    }

    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: self.bits(),
            sample_format: match self {
                BitDepth::Float32 => hound::SampleFormat::Float,
                _ => hound::SampleFormat::Int,
            },
        }
    }
}

pub fn write_mono_wav(path: &Path, samples: &[f32], sample_rate: u32, depth: BitDepth) -> Result<()> {
    let writer = hound::WavWriter::create(path, depth.spec(sample_rate))
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;
    write_samples(writer, samples, depth)
        .with_context(|| format!("Failed to write WAV file: {}", path.display()))?;

    log::info!(
        "Wrote {} ({} samples, {}Hz, {}-bit)",
        path.display(),
        samples.len(),
        sample_rate,
        depth.bits()
    );
    Ok(())
}

/// Encode into any seekable sink, e.g. an in-memory cursor.
pub fn encode_mono_wav<W: Write + Seek>(
    sink: W,
    samples: &[f32],
    sample_rate: u32,
    depth: BitDepth,
) -> Result<()> {
    let writer = hound::WavWriter::new(sink, depth.spec(sample_rate))
        .context("Failed to start WAV stream")?;
    write_samples(writer, samples, depth)
}

fn write_samples<W: Write + Seek>(
    mut writer: hound::WavWriter<W>,
    samples: &[f32],
    depth: BitDepth,
) -> Result<()> {
    match depth {
        BitDepth::Int16 => {
            for &sample in samples {
                writer.write_sample((sample.clamp(-1.0, 1.0) * 32767.0) as i16)?;
            }
        }
        BitDepth::Int24 => {
            for &sample in samples {
                writer.write_sample((sample.clamp(-1.0, 1.0) * 8388607.0) as i32)?;
            }
        }
        BitDepth::Float32 => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}
