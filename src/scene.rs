use std::collections::{HashMap, HashSet};

use crate::config::MonitorConfig;
use crate::frame::Frame;
use crate::history::MotionHistory;
use crate::summary::FrameSummary;
use crate::track::{MotionState, Track, TrackId};

/// Everything retained for one track: its sample window and the classifier's
/// last verdict. One record per track means insertion and eviction can never
/// leave the window and the verdict out of step.
#[derive(Debug, Clone)]
struct TrackEntry {
    history: MotionHistory,
    state: MotionState,
}

impl TrackEntry {
    fn new(window_size: usize) -> Self {
        Self {
            history: MotionHistory::new(window_size),
            state: MotionState::Parked,
        }
    }
}

/// Per-stream classification state: one entry per track the external tracker
/// is still reporting, plus the tunables.
pub struct Scene {
    config: MonitorConfig,
    tracks: HashMap<TrackId, TrackEntry>,
}

impl Scene {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            tracks: HashMap::new(),
        }
    }

    /// One full pass over a frame's tracker output: update windows and
    /// verdicts for confirmed observations, reconcile against the reported
    /// id set, and summarize.
    pub fn process(&mut self, frame: &Frame) -> FrameSummary {
        let window_size = self.config.window_size;
        let threshold = self.config.stationary_speed_threshold;

        // every id the tracker still reports, confirmed or not
        let mut reported_ids = HashSet::with_capacity(frame.len());
        let mut confirmed_ids = HashSet::with_capacity(frame.len());

        for obs in frame.iter() {
            reported_ids.insert(obs.track_id);

            if !obs.confirmed {
                continue;
            }

            confirmed_ids.insert(obs.track_id);

            if !obs.is_well_formed() {
                log::debug!(
                    "track {}: skipping non-finite centroid ({}, {})",
                    obs.track_id,
                    obs.cx,
                    obs.cy
                );
                continue;
            }

            let entry = self
                .tracks
                .entry(obs.track_id)
                .or_insert_with(|| TrackEntry::new(window_size));

            let speed = entry.history.record(obs.centroid());
            let mean = entry.history.mean_speed();

            let next = if mean < threshold {
                MotionState::Parked
            } else {
                MotionState::Moving
            };

            if next != entry.state {
                log::debug!(
                    "track {}: {:?} -> {:?} (mean speed {:.2})",
                    obs.track_id,
                    entry.state,
                    next,
                    mean
                );
            }

            entry.state = next;

            log::trace!(
                "track {}: speed {:.2}, mean {:.2} over {} samples",
                obs.track_id,
                speed,
                mean,
                entry.history.len()
            );
        }

        self.reconcile(&reported_ids);

        let states: HashMap<TrackId, MotionState> = self
            .tracks
            .iter()
            .map(|(id, entry)| (*id, entry.state))
            .collect();

        let parked_count = states.values().filter(|s| s.is_parked()).count();

        FrameSummary {
            confirmed_count: confirmed_ids.len(),
            parked_count,
            states,
        }
    }

    /// Drops every track the current frame no longer reports at all. Absence
    /// from the tracker output is the sole eviction path; a track that merely
    /// went unconfirmed keeps its state. Ids in `live_ids` without stored
    /// state are first sightings, not errors.
    pub fn reconcile(&mut self, live_ids: &HashSet<TrackId>) {
        self.tracks.retain(|id, _| {
            let keep = live_ids.contains(id);

            if !keep {
                log::debug!("track {}: gone from tracker output, evicting", id);
            }

            keep
        });
    }

    /// Per-track reports for overlay or logging callers.
    pub fn tracks(&self) -> Vec<Track> {
        self.tracks
            .iter()
            .filter_map(|(id, entry)| {
                let pos = entry.history.last_position()?;

                Some(Track {
                    track_id: *id,
                    position: (pos.x, pos.y),
                    mean_speed: entry.history.mean_speed(),
                    state: entry.state,
                })
            })
            .collect()
    }

    #[inline]
    pub fn state(&self, id: TrackId) -> Option<MotionState> {
        self.tracks.get(&id).map(|entry| entry.state)
    }

    #[inline]
    pub fn history_len(&self, id: TrackId) -> Option<usize> {
        self.tracks.get(&id).map(|entry| entry.history.len())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[cfg(test)]
    fn speeds(&self, id: TrackId) -> Vec<f32> {
        self.tracks
            .get(&id)
            .map(|entry| entry.history.speeds().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Observation;

    fn scene() -> Scene {
        Scene::new(MonitorConfig::default())
    }

    fn frame(observations: Vec<Observation>) -> Frame {
        Frame::new(observations)
    }

    fn confirmed(id: TrackId, cx: f32, cy: f32) -> Observation {
        Observation::new(id, cx, cy, true)
    }

    #[test]
    fn stationary_track_stays_parked() {
        // identity 7 at (100, 100) for 12 consecutive confirmed frames
        let mut scene = scene();

        let mut last = FrameSummary::default();
        for _ in 0..12 {
            last = scene.process(&frame(vec![confirmed(7, 100.0, 100.0)]));
        }

        assert_eq!(scene.speeds(7), vec![0.0; 12]);
        assert_eq!(scene.state(7), Some(MotionState::Parked));
        assert_eq!(last.confirmed_count, 1);
        assert_eq!(last.parked_count, 1);
    }

    #[test]
    fn single_large_jump_flips_track_to_moving() {
        // 11 still frames, then a 50px jump on frame 12: mean 50/12 >= 2.0
        let mut scene = scene();

        for _ in 0..11 {
            scene.process(&frame(vec![confirmed(7, 100.0, 100.0)]));
        }
        let summary = scene.process(&frame(vec![confirmed(7, 100.0, 150.0)]));

        assert_eq!(scene.state(7), Some(MotionState::Moving));
        assert_eq!(summary.parked_count, 0);
        assert_eq!(summary.states.get(&7), Some(&MotionState::Moving));
    }

    #[test]
    fn absent_track_is_evicted_entirely() {
        let mut scene = scene();

        for i in 0..5 {
            scene.process(&frame(vec![confirmed(9, 10.0 * i as f32, 0.0)]));
        }
        assert_eq!(scene.history_len(9), Some(5));

        // frame 6: id 9 not present at all in tracker output
        let summary = scene.process(&frame(vec![]));

        assert!(scene.is_empty());
        assert_eq!(scene.state(9), None);
        assert!(summary.states.is_empty());
    }

    #[test]
    fn reappearance_after_eviction_starts_fresh() {
        let mut scene = scene();

        for _ in 0..5 {
            scene.process(&frame(vec![confirmed(9, 500.0, 500.0)]));
        }
        scene.process(&frame(vec![]));

        let summary = scene.process(&frame(vec![confirmed(9, 0.0, 0.0)]));

        assert_eq!(scene.history_len(9), Some(1));
        assert_eq!(scene.speeds(9), vec![0.0]);
        assert_eq!(summary.states.get(&9), Some(&MotionState::Parked));
    }

    #[test]
    fn first_sighting_is_parked() {
        let mut scene = scene();

        let summary = scene.process(&frame(vec![confirmed(3, 42.0, 7.0)]));

        assert_eq!(summary.confirmed_count, 1);
        assert_eq!(summary.parked_count, 1);
        assert_eq!(scene.state(3), Some(MotionState::Parked));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut scene = scene();

        scene.process(&frame(vec![confirmed(1, 0.0, 0.0), confirmed(2, 9.0, 9.0)]));

        let live: HashSet<TrackId> = [1].into_iter().collect();
        scene.reconcile(&live);
        assert_eq!(scene.len(), 1);

        scene.reconcile(&live);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.state(1), Some(MotionState::Parked));
    }

    #[test]
    fn unconfirmed_track_is_not_evicted_or_updated() {
        let mut scene = scene();

        for _ in 0..3 {
            scene.process(&frame(vec![confirmed(5, 100.0, 100.0)]));
        }

        // still reported, momentarily unconfirmed: state survives untouched
        let summary = scene.process(&frame(vec![Observation::new(5, 100.0, 100.0, false)]));

        assert_eq!(scene.history_len(5), Some(3));
        assert_eq!(scene.state(5), Some(MotionState::Parked));
        assert_eq!(summary.confirmed_count, 0);
        assert_eq!(summary.states.get(&5), Some(&MotionState::Parked));
    }

    #[test]
    fn unconfirmed_observation_never_enters_history() {
        let mut scene = scene();

        scene.process(&frame(vec![Observation::new(5, 100.0, 100.0, false)]));

        assert!(scene.is_empty());
    }

    #[test]
    fn non_finite_centroid_is_skipped_without_corrupting_history() {
        let mut scene = scene();

        scene.process(&frame(vec![confirmed(4, 10.0, 10.0)]));
        scene.process(&frame(vec![confirmed(4, f32::NAN, 10.0)]));

        // bad sample skipped, but the track stays alive
        assert_eq!(scene.history_len(4), Some(1));
        assert!(scene.speeds(4).iter().all(|s| s.is_finite()));

        let summary = scene.process(&frame(vec![confirmed(4, 11.0, 10.0)]));
        assert_eq!(scene.history_len(4), Some(2));
        assert_eq!(summary.states.get(&4), Some(&MotionState::Parked));
    }

    #[test]
    fn movement_fully_outside_window_no_longer_counts() {
        // drive fast, then park long enough to flush the window
        let config = MonitorConfig {
            window_size: 4,
            ..Default::default()
        };
        let mut scene = Scene::new(config);

        for i in 0..6 {
            scene.process(&frame(vec![confirmed(2, 100.0 * i as f32, 0.0)]));
        }
        assert_eq!(scene.state(2), Some(MotionState::Moving));

        for _ in 0..4 {
            scene.process(&frame(vec![confirmed(2, 500.0, 0.0)]));
        }

        assert_eq!(scene.speeds(2), vec![0.0; 4]);
        assert_eq!(scene.state(2), Some(MotionState::Parked));
    }

    #[test]
    fn tracks_reports_position_and_mean_speed() {
        let mut scene = scene();

        scene.process(&frame(vec![confirmed(8, 0.0, 0.0)]));
        scene.process(&frame(vec![confirmed(8, 30.0, 40.0)]));

        let tracks = scene.tracks();
        assert_eq!(tracks.len(), 1);

        let t = &tracks[0];
        assert_eq!(t.track_id, 8);
        assert_eq!(t.position, (30.0, 40.0));
        assert_eq!(t.mean_speed, 25.0);
        assert_eq!(t.state, MotionState::Moving);
    }

    #[test]
    fn independent_tracks_are_classified_independently() {
        let mut scene = scene();

        for i in 0..12 {
            scene.process(&frame(vec![
                confirmed(1, 100.0, 100.0),
                confirmed(2, 50.0 * i as f32, 0.0),
            ]));
        }

        let summary = scene.process(&frame(vec![
            confirmed(1, 100.0, 100.0),
            confirmed(2, 650.0, 0.0),
        ]));

        assert_eq!(summary.confirmed_count, 2);
        assert_eq!(summary.parked_count, 1);
        assert_eq!(summary.states.get(&1), Some(&MotionState::Parked));
        assert_eq!(summary.states.get(&2), Some(&MotionState::Moving));
    }
}
