//! Core traits for Wavescope
use crate::error::Result;
use crate::types::{DrawPrimitive, Point, Rect};

/// Playback sink trait
///
/// Implementers accept raw interleaved PCM bytes in the format the sink was
/// negotiated for. Writes block until the sink has accepted the data, which is
/// what paces the pipeline to the device's playback rate.
pub trait PlaybackSink {
    /// Write a chunk of raw PCM bytes
    ///
    /// Returns the number of bytes accepted. The pipeline treats anything less
    /// than `bytes.len()` as a fatal device error.
    ///
    /// # Errors
    /// Returns an error if the device rejected the data or has failed
    fn write(&mut self, bytes: &[u8]) -> Result<usize>;

    /// Block until queued audio has been played out
    ///
    /// Called once, after the last chunk, before the sink is released.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: PlaybackSink + ?Sized> PlaybackSink for Box<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        (**self).write(bytes)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Presentation surface trait
///
/// A frame is built by `clear()`, any number of draw calls, then `present()`.
pub trait Surface {
    /// Erase the frame being built
    fn clear(&mut self);

    /// Draw a line segment
    fn draw_line(&mut self, from: Point, to: Point);

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect);

    /// Make the frame visible
    ///
    /// # Errors
    /// Returns an error if the frame cannot be shown
    fn present(&mut self) -> Result<()>;

    /// Dispatch one primitive to the matching draw call
    fn draw(&mut self, primitive: DrawPrimitive) {
        match primitive {
            DrawPrimitive::Line { from, to } => self.draw_line(from, to),
            DrawPrimitive::FillRect(rect) => self.fill_rect(rect),
        }
    }
}

impl<T: Surface + ?Sized> Surface for Box<T> {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        (**self).draw_line(from, to);
    }

    fn fill_rect(&mut self, rect: Rect) {
        (**self).fill_rect(rect);
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
}
