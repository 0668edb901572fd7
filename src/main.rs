mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use cli::Cli;
use monica::audio::decode::decode_stereo;
use monica::config;
use monica::encode::wav::{write_mono_wav, BitDepth};
use monica::{AnalysisResult, ConversionConfig, Converter, MixWeights};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisReport {
    file: String,
    sample_rate: u32,
    frames: usize,
    duration: f32,
    analysis: AnalysisResult,
    weights: MixWeights,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Merge: config values apply only when CLI is at its default
    if let Some(ref path) = config::find_config(cli.config.as_deref()) {
        match config::load_config(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                let conv = cfg.conversion;
                if cli.preserve_width == 0.7 { cli.preserve_width = conv.preserve_width; }
                if cli.preserve_richness == 0.8 { cli.preserve_richness = conv.preserve_richness; }
                if cli.volume == 1.1 { cli.volume = conv.volume_compensation; }
                if cli.quality == 0.8 { cli.quality = conv.quality; }
                if !cli.no_spectral && !conv.spectral_analysis { cli.no_spectral = true; }
                if cli.sample_rate.is_none() { cli.sample_rate = conv.sample_rate; }
                if cli.bit_depth == 16 { cli.bit_depth = cfg.output.bit_depth.bits(); }
                if cli.suffix == "_mono" { cli.suffix = cfg.output.suffix; }
            }
            Err(err) => log::warn!("Ignoring config: {:#}", err),
        }
    }

    let mut conversion = ConversionConfig::default()
        .with_preserve_width(cli.preserve_width)
        .with_preserve_richness(cli.preserve_richness)
        .with_volume_compensation(cli.volume)
        .with_quality(cli.quality)
        .with_spectral_analysis(!cli.no_spectral);
    if let Some(rate) = cli.sample_rate {
        conversion = conversion.with_sample_rate(rate);
    }
    let bit_depth = BitDepth::try_from(cli.bit_depth).map_err(anyhow::Error::msg)?;

    if cli.output.is_some() && cli.inputs.len() > 1 {
        anyhow::bail!("--output can only be used with a single input file");
    }
    for input in &cli.inputs {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let converter = Converter::new();

    if cli.analyze_only {
        let reports = cli
            .inputs
            .iter()
            .map(|input| analyze_file(&converter, input))
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if let Some(ref dir) = cli.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    log::info!("monica - perceptual stereo to mono converter");
    log::info!(
        "Width={:.2}, richness={:.2}, volume={:.2}, spectral={}, bit depth={}",
        conversion.preserve_width,
        conversion.preserve_richness,
        conversion.volume_compensation,
        conversion.spectral_analysis,
        bit_depth.bits()
    );

    let pb = ProgressBar::new(cli.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files ({eta} remaining)")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );

    let results: Vec<(PathBuf, Result<PathBuf>)> = cli
        .inputs
        .par_iter()
        .map(|input| {
            let output = output_path(input, &cli);
            let result = convert_file(&converter, input, &output, &conversion, bit_depth)
                .map(|_| output);
            pb.inc(1);
            (input.clone(), result)
        })
        .collect();

    pb.finish_with_message("Conversion complete");

    let mut failures = 0;
    for (input, result) in &results {
        match result {
            Ok(output) => log::info!("{} -> {}", input.display(), output.display()),
            Err(err) => {
                failures += 1;
                log::error!("{}: {:#}", input.display(), err);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) failed to convert", failures, results.len());
    }

    log::info!("Done! Converted {} file(s)", results.len());
    Ok(())
}

fn analyze_file(converter: &Converter, input: &Path) -> Result<AnalysisReport> {
    let buffer = decode_stereo(input)?;
    let analysis = converter.analyze(&buffer);
    Ok(AnalysisReport {
        file: input.display().to_string(),
        sample_rate: buffer.sample_rate(),
        frames: buffer.len(),
        duration: buffer.duration(),
        weights: converter.mix_weights(&analysis),
        analysis,
    })
}

fn convert_file(
    converter: &Converter,
    input: &Path,
    output: &Path,
    conversion: &ConversionConfig,
    bit_depth: BitDepth,
) -> Result<()> {
    let buffer = decode_stereo(input)?;
    let mono = converter
        .convert(&buffer, conversion)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    log::debug!(
        "{}: {:.2}s, width={:.3}, phase={:.3}, weights=({:.3}, {:.3}, side {:.3})",
        input.display(),
        mono.duration(),
        mono.analysis.width,
        mono.analysis.phase_correlation,
        mono.weights.left_weight,
        mono.weights.right_weight,
        mono.weights.side_gain
    );

    write_mono_wav(output, &mono.samples, mono.sample_rate, bit_depth)
}

/// Explicit `--output`, else `<stem><suffix>.wav` in `--out-dir` or beside
/// the input.
fn output_path(input: &Path, cli: &Cli) -> PathBuf {
    if let Some(ref output) = cli.output {
        return output.clone();
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = format!("{}{}.wav", stem, cli.suffix);
    match cli.out_dir {
        Some(ref dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}
