use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "monica", about = "Perceptual stereo to mono converter")]
pub struct Cli {
    /// Input audio files (WAV, MP3, FLAC, OGG, AAC)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output WAV file (single input only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for converted files (default: next to each input)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Config file (default: monica.toml or ~/.config/monica/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stereo width preservation (0.0-1.0)
    #[arg(long, default_value_t = 0.7)]
    pub preserve_width: f32,

    /// Harmonic richness preservation (0.0-1.0)
    #[arg(long, default_value_t = 0.8)]
    pub preserve_richness: f32,

    /// Loudness compensation multiplier (0.5-2.0)
    #[arg(long, default_value_t = 1.1)]
    pub volume: f32,

    /// Quality hint (0.0-1.0, reserved)
    #[arg(long, default_value_t = 0.8)]
    pub quality: f32,

    /// Disable the richness-gated harmonic reinjection
    #[arg(long)]
    pub no_spectral: bool,

    /// Resample output to this rate in Hz
    #[arg(short = 'r', long)]
    pub sample_rate: Option<u32>,

    /// Output bit depth: 16, 24 or 32 (float)
    #[arg(short, long, default_value_t = 16)]
    pub bit_depth: u16,

    /// Suffix appended to the input stem for derived output names
    #[arg(long, default_value = "_mono")]
    pub suffix: String,

    /// Print the stereo analysis and mix weights as JSON instead of converting
    #[arg(long)]
    pub analyze_only: bool,

    /// Worker threads for batch conversion (default: all cores)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}
