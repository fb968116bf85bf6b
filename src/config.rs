use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_WINDOW_SIZE: usize = 12;
pub const DEFAULT_STATIONARY_SPEED_THRESHOLD: f32 = 2.0;

/// Tunables of the classification core. Validated once when a monitor is
/// built; per-frame processing never fails.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MonitorConfig {
    /// Number of recent samples retained per track.
    pub window_size: usize,

    /// Mean speed, in distance units per frame, below which a track is
    /// classified as parked.
    pub stationary_speed_threshold: f32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            stationary_speed_threshold: DEFAULT_STATIONARY_SPEED_THRESHOLD,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.window_size == 0 {
            return Err(Error::InvalidWindowSize);
        }

        let t = self.stationary_speed_threshold;
        if !t.is_finite() || t < 0.0 {
            return Err(Error::InvalidThreshold(t));
        }

        Ok(())
    }
}
