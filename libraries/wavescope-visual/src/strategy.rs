//! Visualization strategies
//!
//! Each strategy turns one chunk into a lazy sequence of draw primitives.
//! Only channel 0 is drawn.
//!
//! Pixel arithmetic is done in `f32` and truncated toward zero when converted
//! to integer coordinates, so output is reproducible pixel for pixel.
//!
//! # Example
//!
//! ```rust
//! use wavescope_audio::Chunk;
//! use wavescope_core::{SampleFormat, StreamDescriptor};
//! use wavescope_visual::{Layout, VisualizationMode};
//!
//! let descriptor = StreamDescriptor::new(8_000, 1, SampleFormat::S16Le).unwrap();
//! let silence = vec![0u8; descriptor.chunk_bytes()];
//! let chunk = Chunk::new(&silence, &descriptor);
//!
//! let bars = VisualizationMode::BarsBaseline.render(chunk, Layout::default());
//! assert_eq!(bars.count(), 40);
//! ```

use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use wavescope_audio::Chunk;
use wavescope_core::{DrawPrimitive, Point, Rect};

/// Channel the strategies read from
pub const DRAWN_CHANNEL: usize = 0;

/// The selected visualization, fixed for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizationMode {
    /// Connected line through every sample of the chunk
    #[serde(alias = "wave")]
    Waveform,
    /// Magnitude bars growing up from the bottom edge
    #[serde(alias = "bars")]
    BarsBaseline,
    /// Signed bars growing from the vertical midline
    #[serde(alias = "bars2")]
    BarsCentered,
}

/// Unrecognised visualization name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid visualisation method: {0}")]
pub struct UnknownMode(pub String);

impl VisualizationMode {
    /// All modes, in display order
    pub const ALL: [Self; 3] = [Self::Waveform, Self::BarsBaseline, Self::BarsCentered];

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            Self::Waveform => "waveform",
            Self::BarsBaseline => "bars-baseline",
            Self::BarsCentered => "bars-centered",
        }
    }

    /// Emit the primitives for one chunk
    pub fn render(self, chunk: Chunk<'_>, layout: Layout) -> Primitives<'_> {
        match self {
            Self::Waveform => Primitives::Waveform(WaveformPrimitives::new(chunk, layout)),
            Self::BarsBaseline => {
                Primitives::Bars(BarPrimitives::new(chunk, layout, BarAnchor::Baseline))
            }
            Self::BarsCentered => {
                Primitives::Bars(BarPrimitives::new(chunk, layout, BarAnchor::Centered))
            }
        }
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VisualizationMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waveform" | "wave" => Ok(Self::Waveform),
            "bars-baseline" | "bars" => Ok(Self::BarsBaseline),
            "bars-centered" | "bars2" => Ok(Self::BarsCentered),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Primitive sequence produced by any strategy
#[derive(Debug, Clone)]
pub enum Primitives<'a> {
    /// Line segments of the waveform strategy
    Waveform(WaveformPrimitives<'a>),
    /// Rectangles of either bar strategy
    Bars(BarPrimitives<'a>),
}

impl Iterator for Primitives<'_> {
    type Item = DrawPrimitive;

    fn next(&mut self) -> Option<DrawPrimitive> {
        match self {
            Self::Waveform(it) => it.next(),
            Self::Bars(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Waveform(it) => it.size_hint(),
            Self::Bars(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for Primitives<'_> {}

/// Time-domain line: one segment between each pair of consecutive samples
///
/// Sample `i` sits at `x = (width / frames) * i` and
/// `y = height/2 - height * amplitude / 2`. A chunk of `n` frames yields
/// `n - 1` segments; the pen starts at sample 0.
#[derive(Debug, Clone)]
pub struct WaveformPrimitives<'a> {
    chunk: Chunk<'a>,
    layout: Layout,
    frames: usize,
    next_frame: usize,
    pen: Point,
}

impl<'a> WaveformPrimitives<'a> {
    fn new(chunk: Chunk<'a>, layout: Layout) -> Self {
        let frames = chunk.frames();
        let mut it = Self {
            chunk,
            layout,
            frames,
            next_frame: 1,
            pen: Point::new(0, layout.mid_y()),
        };
        if frames > 0 {
            it.pen = it.point(0);
        }
        it
    }

    fn point(&self, frame: usize) -> Point {
        let step = self.layout.width() as f32 / self.frames as f32;
        let x = (step * frame as f32) as i32;
        let amplitude = self.chunk.sample(frame, DRAWN_CHANNEL);
        let y = self.layout.mid_y() - (self.layout.height() as f32 * amplitude / 2.0) as i32;
        Point::new(x, y)
    }
}

impl Iterator for WaveformPrimitives<'_> {
    type Item = DrawPrimitive;

    fn next(&mut self) -> Option<DrawPrimitive> {
        if self.next_frame >= self.frames {
            return None;
        }
        let to = self.point(self.next_frame);
        let from = std::mem::replace(&mut self.pen, to);
        self.next_frame += 1;
        Some(DrawPrimitive::Line { from, to })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frames.saturating_sub(self.next_frame);
        (left, Some(left))
    }
}

impl ExactSizeIterator for WaveformPrimitives<'_> {}

/// Vertical anchor of the bar strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarAnchor {
    /// Bars stand on the bottom edge, height from the magnitude
    Baseline,
    /// Bars start at the midline, up for positive and down for negative
    Centered,
}

/// One bar per column of `bar_pitch` pixels
///
/// Column `i` shows the sample at `floor(i * pitch / width * frames)`, i.e.
/// the nearest preceding sample; there is no averaging or peak detection.
#[derive(Debug, Clone)]
pub struct BarPrimitives<'a> {
    chunk: Chunk<'a>,
    layout: Layout,
    anchor: BarAnchor,
    column: u32,
}

impl<'a> BarPrimitives<'a> {
    fn new(chunk: Chunk<'a>, layout: Layout, anchor: BarAnchor) -> Self {
        Self {
            chunk,
            layout,
            anchor,
            column: 0,
        }
    }

    /// Frame shown by `column`
    pub fn column_frame(layout: Layout, frames: usize, column: u32) -> usize {
        ((column * layout.bar_pitch()) as f32 / layout.width() as f32 * frames as f32) as usize
    }

    fn bar(&self, column: u32) -> Rect {
        let frame = Self::column_frame(self.layout, self.chunk.frames(), column);
        let amplitude = self.chunk.sample(frame, DRAWN_CHANNEL);
        let x = (column * self.layout.bar_pitch()) as i32;
        let width = self.layout.bar_width();
        let height = self.layout.height() as f32;

        match self.anchor {
            BarAnchor::Baseline => {
                let bar = (height * amplitude.abs()) as i32;
                Rect::new(x, self.layout.height() as i32 - bar, width, bar as u32)
            }
            BarAnchor::Centered => {
                let bar = (height * amplitude / 2.0) as i32;
                let mid = self.layout.mid_y();
                let y = if bar > 0 { mid - bar } else { mid };
                Rect::new(x, y, width, bar.unsigned_abs())
            }
        }
    }
}

impl Iterator for BarPrimitives<'_> {
    type Item = DrawPrimitive;

    fn next(&mut self) -> Option<DrawPrimitive> {
        if self.column >= self.layout.columns() {
            return None;
        }
        let rect = self.bar(self.column);
        self.column += 1;
        Some(DrawPrimitive::FillRect(rect))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.layout.columns() - self.column) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BarPrimitives<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use wavescope_core::{SampleFormat, StreamDescriptor};

    fn encode(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    fn mono(rate: u32) -> StreamDescriptor {
        StreamDescriptor::new(rate, 1, SampleFormat::S16Le).unwrap()
    }

    fn lines(primitives: Primitives<'_>) -> Vec<(Point, Point)> {
        primitives
            .map(|p| match p {
                DrawPrimitive::Line { from, to } => (from, to),
                other => panic!("expected a line, got {other:?}"),
            })
            .collect()
    }

    fn rects(primitives: Primitives<'_>) -> Vec<Rect> {
        primitives
            .map(|p| match p {
                DrawPrimitive::FillRect(rect) => rect,
                other => panic!("expected a rectangle, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn waveform_of_silence_is_flat() {
        let descriptor = mono(8_000);
        let raw = vec![0u8; descriptor.chunk_bytes()];
        let chunk = Chunk::new(&raw, &descriptor);
        let layout = Layout::default();

        let segments = lines(VisualizationMode::Waveform.render(chunk, layout));
        assert_eq!(segments.len(), 399);
        for (from, to) in &segments {
            assert_eq!(from.y, 110);
            assert_eq!(to.y, 110);
        }
        assert_eq!(segments[0].0, Point::new(0, 110));
    }

    #[test]
    fn waveform_segments_connect() {
        let descriptor = mono(400);
        let samples: Vec<i16> = (0..20).map(|i| (i * 1000) as i16).collect();
        let raw = encode(&samples);
        let chunk = Chunk::new(&raw, &descriptor);

        let segments = lines(VisualizationMode::Waveform.render(chunk, Layout::default()));
        for pair in segments.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn waveform_point_geometry() {
        // 20 frames across 320 pixels: 16 pixels per frame
        let descriptor = mono(400);
        let mut samples = vec![0i16; 20];
        samples[1] = i16::MAX;
        samples[2] = i16::MIN;
        samples[3] = i16::MAX / 2;
        let raw = encode(&samples);
        let chunk = Chunk::new(&raw, &descriptor);

        let segments = lines(VisualizationMode::Waveform.render(chunk, Layout::default()));
        // Full scale reaches the top edge
        assert_eq!(segments[0].1, Point::new(16, 0));
        // -32768 maps just below -1.0 and truncates to the bottom edge
        assert_eq!(segments[1].1, Point::new(32, 220));
        // 16383 / 32767 * 110 = 54.998 -> 54
        assert_eq!(segments[2].1, Point::new(48, 56));
    }

    #[test]
    fn waveform_starts_at_the_first_sample() {
        // No lead-in from the midline: the first segment leaves sample 0
        let descriptor = mono(400);
        let mut samples = vec![0i16; 20];
        samples[0] = i16::MAX;
        let raw = encode(&samples);
        let chunk = Chunk::new(&raw, &descriptor);

        let segments = lines(VisualizationMode::Waveform.render(chunk, Layout::default()));
        assert_eq!(segments.len(), 19);
        assert_eq!(segments[0], (Point::new(0, 0), Point::new(16, 110)));
        assert_eq!(segments[1], (Point::new(16, 110), Point::new(32, 110)));
    }

    #[test]
    fn waveform_reads_channel_zero_only() {
        let descriptor = StreamDescriptor::new(400, 2, SampleFormat::S16Le).unwrap();
        let mut samples = vec![0i16; 40];
        for frame in 0..20 {
            samples[frame * 2 + 1] = i16::MAX;
        }
        let raw = encode(&samples);
        let chunk = Chunk::new(&raw, &descriptor);

        let segments = lines(VisualizationMode::Waveform.render(chunk, Layout::default()));
        assert_eq!(segments.len(), 19);
        assert!(segments.iter().all(|(a, b)| a.y == 110 && b.y == 110));
    }

    #[test]
    fn baseline_bars_geometry() {
        let descriptor = mono(400);
        // 40 columns over 20 frames: column i shows frame i / 2
        let mut samples = vec![0i16; 20];
        samples[0] = i16::MAX;
        samples[1] = -16384;
        let raw = encode(&samples);
        let chunk = Chunk::new(&raw, &descriptor);

        let bars = rects(VisualizationMode::BarsBaseline.render(chunk, Layout::default()));
        assert_eq!(bars.len(), 40);
        assert_eq!(bars[0], Rect::new(0, 0, 7, 220));
        assert_eq!(bars[1], Rect::new(8, 0, 7, 220));
        // 16384 / 32767 * 220 = 110.003 -> 110, magnitude only
        assert_eq!(bars[2], Rect::new(16, 110, 7, 110));
        assert_eq!(bars[4], Rect::new(32, 220, 7, 0));
    }

    #[test]
    fn centered_bars_geometry() {
        let descriptor = mono(400);
        let mut samples = vec![0i16; 20];
        samples[0] = i16::MAX;
        samples[1] = i16::MIN;
        samples[2] = 100;
        let raw = encode(&samples);
        let chunk = Chunk::new(&raw, &descriptor);

        let bars = rects(VisualizationMode::BarsCentered.render(chunk, Layout::default()));
        assert_eq!(bars.len(), 40);
        // Positive grows up from the midline
        assert_eq!(bars[0], Rect::new(0, 0, 7, 110));
        // Negative grows down from the midline
        assert_eq!(bars[2], Rect::new(16, 110, 7, 110));
        // 100 / 32767 * 110 < 1: clamped to zero height, still emitted
        assert_eq!(bars[4], Rect::new(32, 110, 7, 0));
    }

    #[test]
    fn column_mapping_truncates() {
        let layout = Layout::default();
        assert_eq!(BarPrimitives::column_frame(layout, 2_400, 0), 0);
        assert_eq!(BarPrimitives::column_frame(layout, 2_400, 1), 60);
        assert_eq!(BarPrimitives::column_frame(layout, 2_400, 39), 2_340);
        assert_eq!(BarPrimitives::column_frame(layout, 2_205, 1), 55);
    }

    #[test]
    fn exact_size_matches_output() {
        let descriptor = mono(44_100);
        let raw = vec![0u8; descriptor.chunk_bytes()];
        for mode in VisualizationMode::ALL {
            let primitives = mode.render(Chunk::new(&raw, &descriptor), Layout::default());
            let hinted = primitives.len();
            assert_eq!(hinted, primitives.count());
        }
    }

    #[test]
    fn mode_names_and_aliases() {
        for mode in VisualizationMode::ALL {
            assert_eq!(mode.name().parse::<VisualizationMode>(), Ok(mode));
        }
        assert_eq!("wave".parse(), Ok(VisualizationMode::Waveform));
        assert_eq!("bars".parse(), Ok(VisualizationMode::BarsBaseline));
        assert_eq!("bars2".parse(), Ok(VisualizationMode::BarsCentered));
        assert_eq!(
            "fourier".parse::<VisualizationMode>(),
            Err(UnknownMode("fourier".to_string()))
        );
    }
}
