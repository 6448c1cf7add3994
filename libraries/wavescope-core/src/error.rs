//! Core error types for Wavescope
use thiserror::Error;

/// Result type alias using `ScopeError`
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Core error type for Wavescope
///
/// Every variant is fatal. The only non-error way out of the pipeline is a
/// clean end of input.
#[derive(Error, Debug)]
pub enum ScopeError {
    /// Missing or invalid option, or an incomplete explicit stream format
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Container tag mismatch, unsupported encoding or bit depth, short header
    #[error("Parse error: {0}")]
    Parse(String),

    /// Audio device open, configuration or write failure
    #[error("Device error: {0}")]
    Device(String),

    /// Read failure other than a clean end of input
    #[error("Stream I/O error: {0}")]
    StreamIo(String),

    /// Presentation surface failure
    #[error("Surface error: {0}")]
    Surface(String),
}

impl ScopeError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a device error
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Create a stream I/O error
    pub fn stream_io(msg: impl Into<String>) -> Self {
        Self::StreamIo(msg.into())
    }

    /// Create a surface error
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Process exit code reported for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::Parse(_) => 3,
            Self::Device(_) => 4,
            Self::StreamIo(_) => 5,
            Self::Surface(_) => 6,
        }
    }
}
