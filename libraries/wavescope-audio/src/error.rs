//! Audio-specific errors
use thiserror::Error;
use wavescope_core::ScopeError;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// A fixed tag in the WAVE header did not match
    #[error("Failed to parse WAVE file: expected {expected:?} tag, found {found:?}")]
    TagMismatch {
        /// Tag the parser required
        expected: &'static str,
        /// Bytes actually read, lossily decoded
        found: String,
    },

    /// Encoding code other than linear PCM
    #[error("Audio encoding not supported: format code {0}")]
    UnsupportedEncoding(u16),

    /// Bit depth other than 16
    #[error("Audio format not supported: {0} bits per sample")]
    UnsupportedBitDepth(u16),

    /// Header field values that cannot describe a stream
    #[error("Failed to parse WAVE file: {0}")]
    InvalidHeader(String),

    /// Input ended inside the header
    #[error("Failed to parse WAVE file: unexpected end of input while reading {0}")]
    Truncated(&'static str),

    /// I/O failure while reading the header
    #[error("Failed to parse WAVE file: {0}")]
    HeaderIo(#[source] std::io::Error),

    /// I/O failure while reading samples
    #[error("Failed to read audio sample: {0}")]
    Read(#[source] std::io::Error),
}

impl From<AudioError> for ScopeError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::Read(_) => ScopeError::stream_io(err.to_string()),
            _ => ScopeError::parse(err.to_string()),
        }
    }
}
