use serde_derive::{Deserialize, Serialize};

pub type TrackId = u32;

/// Classifier verdict for one track, carried forward frame to frame until
/// overwritten or the track is evicted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    Moving,
    Parked,
}

impl MotionState {
    #[inline]
    pub fn is_parked(&self) -> bool {
        matches!(self, MotionState::Parked)
    }
}

/// Per-track report for overlay or logging callers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub track_id: TrackId,

    // (x, y) of the last recorded centroid
    pub position: (f32, f32),

    // in distance units per frame, averaged over the window
    pub mean_speed: f32,

    pub state: MotionState,
}
