//! Fixed-size chunk reading
//!
//! The pipeline consumes the input in chunks of exactly 50 ms. `read_full`
//! is the blocking full-read helper; `ChunkReader` owns the reusable chunk
//! buffer and reports whether each read filled it.

use crate::error::{AudioError, Result};
use std::io::{self, Read};
use wavescope_core::StreamDescriptor;

/// Read until `buf` is full or the source reports end of input
///
/// Contract:
/// - Returns `buf.len()` when the source had at least that many bytes left.
/// - Returns a smaller count, exactly the bytes that remained, when the source
///   returned `Ok(0)` first. Those bytes are at the front of `buf`.
/// - Reads returning `Ok(n)` with `n > 0` are accumulated and reading
///   continues; `ErrorKind::Interrupted` is retried.
/// - Any other error is returned and the accumulated bytes are lost.
pub fn read_full<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match source.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

/// Outcome of one chunk read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkRead {
    /// The chunk buffer was filled completely
    Full,
    /// The input ended after this many bytes (possibly zero)
    Short(usize),
}

impl ChunkRead {
    /// Whether the read filled the chunk
    pub fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Reads fixed-size chunks of interleaved samples into a reused buffer
#[derive(Debug)]
pub struct ChunkReader {
    descriptor: StreamDescriptor,
    buffer: Vec<u8>,
    filled: usize,
}

impl ChunkReader {
    /// Create a reader sized for one chunk of `descriptor`
    pub fn new(descriptor: StreamDescriptor) -> Self {
        Self {
            descriptor,
            buffer: vec![0; descriptor.chunk_bytes()],
            filled: 0,
        }
    }

    /// Stream parameters the buffer is sized for
    pub fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    /// Size of a full chunk in bytes
    pub fn chunk_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Read the next chunk from `source`
    pub fn read_chunk<R: Read + ?Sized>(&mut self, source: &mut R) -> Result<ChunkRead> {
        self.filled = read_full(source, &mut self.buffer).map_err(AudioError::Read)?;

        if self.filled == self.buffer.len() {
            Ok(ChunkRead::Full)
        } else {
            Ok(ChunkRead::Short(self.filled))
        }
    }

    /// Bytes produced by the last read
    ///
    /// After a short read this is the trailing partial chunk.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer[..self.filled]
    }
}
