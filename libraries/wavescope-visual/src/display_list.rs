//! Retained display list surface
//!
//! Records primitives instead of rasterising them. The frame being built and
//! the last presented frame are kept apart, so a painter that runs on its own
//! schedule always sees a complete frame.

use wavescope_core::{DrawPrimitive, Point, Rect, Result, Surface};

/// Surface that keeps the last presented frame as a list of primitives
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    pending: Vec<DrawPrimitive>,
    presented: Vec<DrawPrimitive>,
    frames_presented: u64,
}

impl DisplayList {
    /// Create an empty display list
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitives of the most recently presented frame
    pub fn presented(&self) -> &[DrawPrimitive] {
        &self.presented
    }

    /// Primitives drawn since the last `clear()` that are not yet presented
    pub fn pending(&self) -> &[DrawPrimitive] {
        &self.pending
    }

    /// Number of `present()` calls so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Surface for DisplayList {
    fn clear(&mut self) {
        self.pending.clear();
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.pending.push(DrawPrimitive::Line { from, to });
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.pending.push(DrawPrimitive::FillRect(rect));
    }

    fn present(&mut self) -> Result<()> {
        std::mem::swap(&mut self.pending, &mut self.presented);
        self.pending.clear();
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_publishes_the_pending_frame() {
        let mut list = DisplayList::new();
        list.clear();
        list.draw_line(Point::new(0, 0), Point::new(4, 4));
        assert!(list.presented().is_empty());
        assert_eq!(list.pending().len(), 1);

        list.present().unwrap();
        assert_eq!(list.presented().len(), 1);
        assert!(list.pending().is_empty());
        assert_eq!(list.frames_presented(), 1);
    }

    #[test]
    fn clear_only_touches_the_frame_being_built() {
        let mut list = DisplayList::new();
        list.fill_rect(Rect::new(0, 0, 7, 10));
        list.present().unwrap();

        list.clear();
        list.fill_rect(Rect::new(8, 0, 7, 20));
        list.fill_rect(Rect::new(16, 0, 7, 30));
        assert_eq!(
            list.presented(),
            &[DrawPrimitive::FillRect(Rect::new(0, 0, 7, 10))]
        );

        list.present().unwrap();
        assert_eq!(list.presented().len(), 2);
        assert_eq!(list.frames_presented(), 2);
    }

    #[test]
    fn empty_frames_still_count() {
        let mut list = DisplayList::new();
        list.draw_line(Point::new(0, 0), Point::new(1, 1));
        list.present().unwrap();
        list.clear();
        list.present().unwrap();
        assert!(list.presented().is_empty());
        assert_eq!(list.frames_presented(), 2);
    }
}
