//! Audio device errors
use thiserror::Error;

/// Result type for device operations
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Device errors
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No default output device
    #[error("Audio device not found")]
    DeviceNotFound,

    /// The device could not be queried for its configurations
    #[error("Failed to query audio device: {0}")]
    Query(String),

    /// No supported configuration matches the stream
    #[error("Failed to set audio device: no output configuration for {channels} channel(s) at {sample_rate} Hz")]
    UnsupportedConfig {
        /// Requested sample rate
        sample_rate: u32,
        /// Requested channel count
        channels: u16,
    },

    /// Failed to build output stream
    #[error("Failed to build output stream: {0}")]
    StreamBuild(String),

    /// Failed to start the stream
    #[error("Failed to play stream: {0}")]
    Play(String),

    /// The device reported an error while streaming
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// The audio thread could not be started or has gone away
    #[error("Audio thread error: {0}")]
    Thread(String),

    /// Invalid queue depth
    #[error("Invalid queue depth: {0}. Must be at least 1")]
    InvalidQueueDepth(usize),
}

impl From<cpal::BuildStreamError> for DeviceError {
    fn from(err: cpal::BuildStreamError) -> Self {
        DeviceError::StreamBuild(err.to_string())
    }
}

impl From<cpal::PlayStreamError> for DeviceError {
    fn from(err: cpal::PlayStreamError) -> Self {
        DeviceError::Play(err.to_string())
    }
}

impl From<cpal::SupportedStreamConfigsError> for DeviceError {
    fn from(err: cpal::SupportedStreamConfigsError) -> Self {
        DeviceError::Query(err.to_string())
    }
}

impl From<DeviceError> for wavescope_core::ScopeError {
    fn from(err: DeviceError) -> Self {
        wavescope_core::ScopeError::device(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavescope_core::ScopeError;

    #[test]
    fn unsupported_config_message() {
        let err = DeviceError::UnsupportedConfig {
            sample_rate: 12_345,
            channels: 7,
        };
        assert_eq!(
            err.to_string(),
            "Failed to set audio device: no output configuration for 7 channel(s) at 12345 Hz"
        );
    }

    #[test]
    fn maps_to_device_category() {
        let scope: ScopeError = DeviceError::DeviceNotFound.into();
        assert!(matches!(scope, ScopeError::Device(_)));
        assert_eq!(scope.exit_code(), 4);
    }
}
