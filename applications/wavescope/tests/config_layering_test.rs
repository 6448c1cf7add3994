//! Configuration layering tests
//!
//! File, environment and command line are applied in that order of
//! increasing precedence.

use clap::Parser;
use std::fs;
use wavescope::{AppConfig, Cli};
use wavescope_core::ScopeError;
use wavescope_visual::VisualizationMode;

fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    )
}

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("wavescope.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_file_values_are_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[window]
width = 640
height = 240
bar_pitch = 16

[audio]
volume = 70
queue_depth = 3

[visual]
mode = "bars-centered"
"#,
    );

    let config = AppConfig::load_with_env(Some(&path), env(&[])).unwrap();
    assert_eq!(config.window.width, 640);
    assert_eq!(config.window.height, 240);
    assert_eq!(config.audio.volume, 70);
    assert_eq!(config.audio.queue_depth, 3);
    assert_eq!(config.mode().unwrap(), VisualizationMode::BarsCentered);

    let layout = config.layout().unwrap();
    assert_eq!(layout.columns(), 40);
    assert_eq!(layout.bar_width(), 15);
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[window]\nwidth = 640\nbar_pitch = 16\n");

    let config = AppConfig::load_with_env(
        Some(&path),
        env(&[
            ("WAVESCOPE_WINDOW__WIDTH", "800"),
            ("WAVESCOPE_VISUAL__MODE", "bars"),
        ]),
    )
    .unwrap();

    assert_eq!(config.window.width, 800);
    // Untouched by the environment
    assert_eq!(config.window.bar_pitch, 16);
    assert_eq!(config.window.height, 220);
    assert_eq!(config.mode().unwrap(), VisualizationMode::BarsBaseline);
}

#[test]
fn test_command_line_overrides_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[audio]\nvolume = 20\n[visual]\nmode = \"waveform\"\n");

    let mut config =
        AppConfig::load_with_env(Some(&path), env(&[("WAVESCOPE_AUDIO__VOLUME", "40")])).unwrap();
    assert_eq!(config.audio.volume, 40);

    let cli = Cli::try_parse_from(["wavescope", "-v", "90", "-m", "bars2", "in.wav"]).unwrap();
    config.apply_cli(&cli);
    assert_eq!(config.audio.volume, 90);
    assert_eq!(config.mode().unwrap(), VisualizationMode::BarsCentered);
}

#[test]
fn test_cli_leaves_unset_values_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[audio]\nvolume = 20\n[visual]\nmode = \"wave\"\n");

    let mut config = AppConfig::load_with_env(Some(&path), env(&[])).unwrap();
    let cli = Cli::try_parse_from(["wavescope", "in.wav"]).unwrap();
    config.apply_cli(&cli);

    assert_eq!(config.audio.volume, 20);
    assert_eq!(config.mode().unwrap(), VisualizationMode::Waveform);
}

#[test]
fn test_invalid_layout_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[window]\nwidth = 4\nbar_pitch = 8\n");

    let config = AppConfig::load_with_env(Some(&path), env(&[])).unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ScopeError::Configuration(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_unknown_mode_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[visual]\nmode = \"fourier\"\n");

    let err = AppConfig::load_with_env(Some(&path), env(&[])).unwrap_err();
    assert!(matches!(err, ScopeError::Configuration(_)));
}
