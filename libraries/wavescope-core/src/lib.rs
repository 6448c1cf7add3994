//! Wavescope Core
//!
//! Platform-agnostic core types, traits, and error handling for Wavescope.
//!
//! This crate provides the foundational building blocks shared by the parser,
//! the visualization strategies, the pipeline and the desktop bindings.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Stream Types**: `StreamDescriptor`, `SampleFormat`
//! - **Draw Primitives**: `Point`, `Rect`, `DrawPrimitive`
//! - **Core Traits**: `PlaybackSink`, `Surface`
//! - **Error Handling**: Unified `ScopeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use wavescope_core::{SampleFormat, StreamDescriptor};
//!
//! let descriptor = StreamDescriptor::new(48_000, 2, SampleFormat::S16Le).unwrap();
//!
//! // One chunk is 50 ms of audio
//! assert_eq!(descriptor.chunk_frames(), 2_400);
//! assert_eq!(descriptor.chunk_bytes(), 2_400 * 2 * 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ScopeError};
pub use traits::{PlaybackSink, Surface};
pub use types::{
    // Stream types
    InvalidDescriptor, SampleFormat, StreamDescriptor, CHUNKS_PER_SECOND,
    // Geometry
    DrawPrimitive, Point, Rect,
};
