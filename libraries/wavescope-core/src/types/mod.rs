//! Core domain types for Wavescope
pub mod geometry;
pub mod stream;

pub use geometry::{DrawPrimitive, Point, Rect};
pub use stream::{InvalidDescriptor, SampleFormat, StreamDescriptor, CHUNKS_PER_SECOND};
