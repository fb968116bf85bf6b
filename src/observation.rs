use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::track::TrackId;

/// One tracker report for one identity in one frame: the centroid of its
/// bounding region and whether the tracker considers the track stable enough
/// to act on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    #[serde(rename = "id")]
    pub track_id: TrackId,
    pub cx: f32,
    pub cy: f32,
    pub confirmed: bool,
}

impl Observation {
    pub fn new(track_id: TrackId, cx: f32, cy: f32, confirmed: bool) -> Self {
        Self {
            track_id,
            cx,
            cy,
            confirmed,
        }
    }

    #[inline(always)]
    pub fn centroid(&self) -> na::Point2<f32> {
        na::Point2::new(self.cx, self.cy)
    }

    /// A non-finite centroid would make every later speed mean non-finite,
    /// so such observations are dropped at the boundary.
    #[inline(always)]
    pub fn is_well_formed(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite()
    }
}
