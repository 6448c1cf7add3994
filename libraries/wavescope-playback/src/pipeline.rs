//! Streaming pipeline - core orchestration
//!
//! Reads one chunk, plays it, draws it, and repeats until the input runs out.
//! Pacing comes from the blocking sink write; the pipeline itself never sleeps.

use crate::types::{PipelineContext, PipelineState, PipelineStats};
use std::io::Read;
use wavescope_audio::{Chunk, ChunkRead, ChunkReader};
use wavescope_core::{PlaybackSink, Result, ScopeError, Surface};

/// Chunk-by-chunk streamer
///
/// Owns the input, the playback sink and the surface until it terminates.
/// Any fatal error drops all three and leaves the pipeline `Terminated`.
pub struct Pipeline<R, K, S> {
    context: PipelineContext,
    source: Option<R>,
    sink: Option<K>,
    surface: Option<S>,
    reader: ChunkReader,
    state: PipelineState,
    stats: PipelineStats,
}

impl<R, K, S> Pipeline<R, K, S>
where
    R: Read,
    K: PlaybackSink,
    S: Surface,
{
    /// Create an idle pipeline
    ///
    /// `source` must be positioned on the first sample byte.
    pub fn new(context: PipelineContext, source: R, sink: K, surface: S) -> Self {
        Self {
            reader: ChunkReader::new(*context.descriptor()),
            context,
            source: Some(source),
            sink: Some(sink),
            surface: Some(surface),
            state: PipelineState::Idle,
            stats: PipelineStats::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Counters so far
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Stream parameters, mode and layout
    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// The surface, until it is released
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// The playback sink, until it is released
    pub fn sink(&self) -> Option<&K> {
        self.sink.as_ref()
    }

    /// Move from `Idle` to `Streaming`
    ///
    /// Has no effect in any other state.
    pub fn start(&mut self) {
        if self.state == PipelineState::Idle {
            tracing::info!(
                "Streaming {} as {} ({} bytes per chunk)",
                self.context.descriptor(),
                self.context.mode(),
                self.context.chunk_bytes()
            );
            self.state = PipelineState::Streaming;
        }
    }

    /// Perform one unit of work and return the resulting state
    ///
    /// - `Idle`: start streaming
    /// - `Streaming`: read one chunk; play and draw it if full, else begin draining
    /// - `Draining`: flush the sink and release every handle
    /// - `Terminated`: nothing
    ///
    /// On error the pipeline releases its handles, becomes `Terminated` and
    /// returns the error.
    pub fn step(&mut self) -> Result<PipelineState> {
        let outcome = match self.state {
            PipelineState::Idle => {
                self.start();
                Ok(())
            }
            PipelineState::Streaming => self.stream_chunk(),
            PipelineState::Draining => self.drain(),
            PipelineState::Terminated => Ok(()),
        };

        if let Err(e) = outcome {
            tracing::debug!("Pipeline failed in {:?}: {}", self.state, e);
            self.release();
            return Err(e);
        }

        Ok(self.state)
    }

    /// Drive the pipeline until it terminates
    pub fn run(&mut self) -> Result<PipelineStats> {
        while !self.step()?.is_terminated() {}
        Ok(self.stats)
    }

    fn stream_chunk(&mut self) -> Result<()> {
        let source = self
            .source
            .as_mut()
            .ok_or_else(|| ScopeError::stream_io("Input already released"))?;

        match self.reader.read_chunk(source)? {
            ChunkRead::Full => {}
            ChunkRead::Short(trailing) => {
                tracing::debug!("End of input, dropping {} trailing bytes", trailing);
                self.stats.trailing_bytes = trailing;
                self.state = PipelineState::Draining;
                return Ok(());
            }
        }

        let bytes = self.reader.bytes();
        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| ScopeError::device("Audio output already released"))?;
        let written = sink.write(bytes)?;
        if written < bytes.len() {
            return Err(ScopeError::device(format!(
                "Failed to write audio: {} of {} bytes accepted",
                written,
                bytes.len()
            )));
        }
        self.stats.chunks_played += 1;

        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| ScopeError::surface("Surface already released"))?;
        let chunk = Chunk::new(bytes, self.context.descriptor());
        surface.clear();
        for primitive in self.context.mode().render(chunk, self.context.layout()) {
            surface.draw(primitive);
        }
        surface.present()?;
        self.stats.frames_presented += 1;

        tracing::debug!("Chunk {} played and drawn", self.stats.chunks_played);
        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.finish()?;
        }
        self.release();
        tracing::info!(
            "Stream finished: {} chunks played, {} frames presented, {} trailing bytes dropped",
            self.stats.chunks_played,
            self.stats.frames_presented,
            self.stats.trailing_bytes
        );
        Ok(())
    }

    fn release(&mut self) {
        self.source = None;
        self.sink = None;
        self.surface = None;
        self.state = PipelineState::Terminated;
    }
}
