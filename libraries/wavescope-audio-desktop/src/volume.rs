//! Output volume with logarithmic scaling
//!
//! Volume range is 0-100%, mapped to -60 dB to 0 dB internally.

use serde::{Deserialize, Serialize};

/// Highest volume level (unity gain)
pub const MAX_VOLUME: u8 = 100;

/// Output volume
///
/// Uses dB-based scaling to match human hearing perception.
/// 0% is silence, 1% is -59.4 dB, 100% is 0 dB (unity gain).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Volume {
    level: u8,
    linear_gain: f32,
}

impl Volume {
    /// Create a volume, clamping `level` to 0-100
    pub fn new(level: u8) -> Self {
        let level = level.min(MAX_VOLUME);
        Self {
            level,
            linear_gain: Self::calculate_linear_gain(level),
        }
    }

    /// Volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Linear gain multiplier applied to every sample
    pub fn gain(&self) -> f32 {
        self.linear_gain
    }

    /// Gain in dB; negative infinity at level 0
    pub fn to_db(&self) -> f32 {
        if self.linear_gain == 0.0 {
            f32::NEG_INFINITY
        } else {
            20.0 * self.linear_gain.log10()
        }
    }

    /// Convert volume percentage to linear gain
    ///
    /// Formula: gain = 10^((level% - 100) * 0.6 / 20)
    /// - 0%   → silence
    /// - 50%  → -30 dB → 0.0316 gain
    /// - 100% →   0 dB → 1.0 gain (unity)
    fn calculate_linear_gain(level: u8) -> f32 {
        if level == 0 {
            return 0.0;
        }

        let db = (f32::from(level) - 100.0) * 0.6;
        10.0_f32.powf(db / 20.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(MAX_VOLUME)
    }
}

impl From<u8> for Volume {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<Volume> for u8 {
    fn from(volume: Volume) -> Self {
        volume.level
    }
}
