use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};

use crate::track::{MotionState, TrackId};

/// Per-frame output of the monitor: counts for dashboards plus the verdict
/// for every track still holding state after reconciliation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FrameSummary {
    pub confirmed_count: usize,
    pub parked_count: usize,
    pub states: HashMap<TrackId, MotionState>,
}
