//! Surface layout parameters
use thiserror::Error;

/// Default surface width in pixels
pub const DEFAULT_WIDTH: u32 = 320;
/// Default surface height in pixels
pub const DEFAULT_HEIGHT: u32 = 220;
/// Default horizontal distance between bar origins in pixels
pub const DEFAULT_BAR_PITCH: u32 = 8;

/// Reasons a layout is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidLayout {
    /// Zero width or height
    #[error("Invalid surface size: {width}x{height}")]
    Size {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Bar pitch of zero or wider than the surface
    #[error("Invalid bar pitch: {pitch} (surface is {width} pixels wide)")]
    BarPitch {
        /// Requested pitch
        pitch: u32,
        /// Surface width
        width: u32,
    },
}

/// Fixed geometry the strategies draw into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: u32,
    height: u32,
    bar_pitch: u32,
}

impl Layout {
    /// Create a layout
    pub fn new(width: u32, height: u32, bar_pitch: u32) -> Result<Self, InvalidLayout> {
        if width == 0 || height == 0 {
            return Err(InvalidLayout::Size { width, height });
        }
        if bar_pitch == 0 || bar_pitch > width {
            return Err(InvalidLayout::BarPitch {
                pitch: bar_pitch,
                width,
            });
        }

        Ok(Self {
            width,
            height,
            bar_pitch,
        })
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between bar origins in pixels
    pub fn bar_pitch(&self) -> u32 {
        self.bar_pitch
    }

    /// Drawn width of one bar (one pixel of gap per pitch)
    pub fn bar_width(&self) -> u32 {
        self.bar_pitch - 1
    }

    /// Number of bars that fit across the surface
    pub fn columns(&self) -> u32 {
        self.width / self.bar_pitch
    }

    /// Vertical midline, rounded down
    pub fn mid_y(&self) -> i32 {
        (self.height / 2) as i32
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bar_pitch: DEFAULT_BAR_PITCH,
        }
    }
}
