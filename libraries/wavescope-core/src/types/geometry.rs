//! Pixel geometry and draw primitives
//!
//! Coordinates are integer pixels with the origin at the top-left corner of
//! the surface and y growing downward.
use serde::{Deserialize, Serialize};

/// A pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: i32,
    /// Vertical position
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its top-left corner and extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }
}

/// One drawing command emitted by a visualization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawPrimitive {
    /// Straight line between two points
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
    },
    /// Solid rectangle
    FillRect(Rect),
}
