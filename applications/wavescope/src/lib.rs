//! Wavescope
//!
//! Plays 16-bit PCM audio from a WAVE file, a raw file or standard input and
//! draws each 50 ms chunk as it plays.
//!
//! This library exposes the application components for testing purposes.

pub mod app;
pub mod cli;
pub mod config;
pub mod session;

pub use app::{ScopeApp, WINDOW_TITLE};
pub use cli::Cli;
pub use config::AppConfig;
pub use session::{open_input, resolve_descriptor, Input};
