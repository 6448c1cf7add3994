//! Application configuration
use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wavescope_audio_desktop::{DEFAULT_QUEUE_DEPTH, MAX_VOLUME};
use wavescope_core::{Result, ScopeError};
use wavescope_visual::{
    Layout, VisualizationMode, DEFAULT_BAR_PITCH, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

/// Configuration file read from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "wavescope.toml";

/// Prefix of configuration environment variables, e.g. `WAVESCOPE_WINDOW__WIDTH`
pub const ENV_PREFIX: &str = "WAVESCOPE";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_window")]
    pub window: WindowSettings,

    #[serde(default = "default_audio")]
    pub audio: AudioSettings,

    #[serde(default)]
    pub visual: VisualSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowSettings {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_bar_pitch")]
    pub bar_pitch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AudioSettings {
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VisualSettings {
    #[serde(default)]
    pub mode: Option<VisualizationMode>,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `file` must exist when given; otherwise `wavescope.toml` is read if present.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(file, None)
    }

    /// Load with an explicit environment instead of the process environment
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match file {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (WAVESCOPE_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| ScopeError::configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ScopeError::configuration(e.to_string()))
    }

    /// Command-line flags take precedence over file and environment
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(volume) = cli.volume {
            self.audio.volume = volume;
        }
        if let Some(mode) = cli.mode {
            self.visual.mode = Some(mode);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.layout()?;

        if self.audio.volume > MAX_VOLUME {
            return Err(ScopeError::configuration(format!(
                "Volume outside of range: {} (0-{})",
                self.audio.volume, MAX_VOLUME
            )));
        }

        if self.audio.queue_depth == 0 {
            return Err(ScopeError::configuration(
                "Audio queue depth must be at least 1",
            ));
        }

        Ok(())
    }

    /// Surface layout from the window settings
    pub fn layout(&self) -> Result<Layout> {
        Layout::new(
            self.window.width,
            self.window.height,
            self.window.bar_pitch,
        )
        .map_err(|e| ScopeError::configuration(e.to_string()))
    }

    /// The selected visualization
    pub fn mode(&self) -> Result<VisualizationMode> {
        self.visual
            .mode
            .ok_or_else(|| ScopeError::configuration("Visualisation method not specified"))
    }
}

// Default values
fn default_window() -> WindowSettings {
    WindowSettings {
        width: default_width(),
        height: default_height(),
        bar_pitch: default_bar_pitch(),
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_bar_pitch() -> u32 {
    DEFAULT_BAR_PITCH
}

fn default_audio() -> AudioSettings {
    AudioSettings {
        volume: default_volume(),
        queue_depth: default_queue_depth(),
    }
}

fn default_volume() -> u8 {
    MAX_VOLUME
}

fn default_queue_depth() -> usize {
    DEFAULT_QUEUE_DEPTH
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            audio: default_audio(),
            visual: VisualSettings::default(),
        }
    }
}
