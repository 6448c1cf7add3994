//! Wavescope Audio
//!
//! Input-side audio handling for Wavescope.
//!
//! This crate provides:
//! - WAVE header parsing that recovers the stream parameters and leaves the
//!   reader on the first sample byte
//! - Blocking full reads of fixed 50 ms chunks with explicit short-read signaling
//! - Normalization of raw PCM samples to floating-point amplitudes
//!
//! # Example: Reading a WAVE stream chunk by chunk
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use wavescope_audio::{parse_header, ChunkReader, ChunkRead, Chunk};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut input = BufReader::new(File::open("/music/tone.wav")?);
//! let header = parse_header(&mut input)?;
//!
//! let mut reader = ChunkReader::new(header.descriptor);
//! while reader.read_chunk(&mut input)? == ChunkRead::Full {
//!     let chunk = Chunk::new(reader.bytes(), &header.descriptor);
//!     println!("first sample: {}", chunk.sample(0, 0));
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod sample;
pub mod stream;
pub mod wav;

pub use error::{AudioError, Result};
pub use sample::{normalize, Chunk};
pub use stream::{read_full, ChunkRead, ChunkReader};
pub use wav::{parse_header, WavHeader};
