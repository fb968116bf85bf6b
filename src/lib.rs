pub mod config;
pub mod error;
pub mod frame;
pub mod observation;
pub mod scene;
pub mod summary;
pub mod track;

mod circular_queue;
mod history;

pub use config::MonitorConfig;
pub use error::Error;
pub use frame::Frame;
pub use observation::Observation;
pub use summary::FrameSummary;
pub use track::{MotionState, Track, TrackId};

use scene::Scene;
use std::collections::HashMap;
use std::rc::Rc;

/// Seam between the hosting frame loop and the classification core. The
/// external detector+tracker produces observations; this side turns them into
/// parked/moving verdicts.
pub trait Monitoring {
    fn process(&mut self, frame: &Frame, src: &str) -> FrameSummary;
    fn tracks(&self, src: &str) -> Rc<[Track]>;
}

/// Parked/moving monitor for any number of independent streams, keyed by
/// source name. Each stream gets its own scene; no state is shared between
/// them.
pub struct ParkingMonitor {
    config: MonitorConfig,
    scenes: HashMap<String, Scene>,
}

impl ParkingMonitor {
    pub fn new(config: MonitorConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            scenes: HashMap::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

impl Default for ParkingMonitor {
    fn default() -> Self {
        Self {
            config: MonitorConfig::default(),
            scenes: HashMap::new(),
        }
    }
}

impl Monitoring for ParkingMonitor {
    fn process(&mut self, frame: &Frame, src: &str) -> FrameSummary {
        let config = self.config;

        let scene = self
            .scenes
            .entry(src.to_string())
            .or_insert_with(|| Scene::new(config));

        scene.process(frame)
    }

    #[inline]
    fn tracks(&self, src: &str) -> Rc<[Track]> {
        if let Some(scene) = self.scenes.get(src) {
            return scene.tracks().into_boxed_slice().into();
        }

        Rc::new([])
    }
}
