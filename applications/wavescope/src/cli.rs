//! Command-line interface
use clap::Parser;
use std::path::{Path, PathBuf};
use wavescope_core::{SampleFormat, ScopeError, StreamDescriptor};
use wavescope_visual::VisualizationMode;

/// Input path that selects standard input
pub const STDIN_PATH: &str = "-";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "wavescope")]
#[command(version)]
#[command(about = "Play 16-bit PCM audio and draw it while it plays", long_about = None)]
pub struct Cli {
    /// Sample rate in Hz (raw input only; requires -c and -f)
    #[arg(short = 'r', long = "rate")]
    pub sample_rate: Option<u32>,

    /// Channel count (raw input only; requires -r and -f)
    #[arg(short = 'c', long = "channels")]
    pub channels: Option<u16>,

    /// Sample format, `s16le` (raw input only; requires -r and -c)
    #[arg(short = 'f', long = "format")]
    pub format: Option<SampleFormat>,

    /// Visualization: waveform (wave), bars-baseline (bars), bars-centered (bars2)
    #[arg(short = 'm', long = "mode")]
    pub mode: Option<VisualizationMode>,

    /// Output volume, 0-100
    #[arg(short = 'v', long = "volume", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: Option<u8>,

    /// Configuration file (default: wavescope.toml if present)
    #[arg(long, env = "WAVESCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// WAVE file, raw PCM file, or `-` for standard input
    pub input: PathBuf,
}

impl Cli {
    /// Whether the input is standard input
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new(STDIN_PATH)
    }

    /// Stream format given on the command line
    ///
    /// `Ok(None)` when none of rate, channels and format were given; the format
    /// then comes from the WAVE header. Giving some but not all is an error
    /// listing every missing option, one per line.
    pub fn explicit_descriptor(&self) -> Result<Option<StreamDescriptor>, ScopeError> {
        match (self.sample_rate, self.channels, self.format) {
            (None, None, None) => Ok(None),
            (Some(rate), Some(channels), Some(format)) => StreamDescriptor::new(rate, channels, format)
                .map(Some)
                .map_err(|e| ScopeError::configuration(e.to_string())),
            (rate, channels, format) => {
                let mut missing = Vec::new();
                if rate.is_none() {
                    missing.push("Sample rate not specified");
                }
                if channels.is_none() {
                    missing.push("Channel count not specified");
                }
                if format.is_none() {
                    missing.push("Audio format not specified");
                }
                Err(ScopeError::configuration(missing.join("\n")))
            }
        }
    }
}
