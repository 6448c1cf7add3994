//! Core types for the streaming pipeline

use serde::{Deserialize, Serialize};
use wavescope_core::StreamDescriptor;
use wavescope_visual::{Layout, VisualizationMode};

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    /// Constructed, nothing read yet
    Idle,

    /// Reading, playing and drawing one chunk per step
    Streaming,

    /// Input exhausted, waiting to release the handles
    Draining,

    /// Handles released; no further work
    Terminated,
}

impl PipelineState {
    /// True once the pipeline will do no further work
    pub fn is_terminated(self) -> bool {
        self == Self::Terminated
    }
}

/// Everything the pipeline needs to know about the stream, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineContext {
    descriptor: StreamDescriptor,
    mode: VisualizationMode,
    layout: Layout,
}

impl PipelineContext {
    /// Bundle the resolved stream parameters, visualization and surface layout
    pub fn new(descriptor: StreamDescriptor, mode: VisualizationMode, layout: Layout) -> Self {
        Self {
            descriptor,
            mode,
            layout,
        }
    }

    /// Stream parameters
    pub fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    /// Selected visualization
    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    /// Surface layout
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Size of one chunk in bytes
    pub fn chunk_bytes(&self) -> usize {
        self.descriptor.chunk_bytes()
    }
}

/// Counters reported when the pipeline terminates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Full chunks written to the playback sink
    pub chunks_played: u64,

    /// Frames presented on the surface
    pub frames_presented: u64,

    /// Bytes of the trailing partial chunk that were dropped
    pub trailing_bytes: usize,
}
