use nalgebra as na;

use crate::circular_queue::CircularQueue;

/// One recorded sample: where the track was and how far it moved since the
/// previous sample of the same track.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub pos: na::Point2<f32>,
    pub speed: f32,
}

/// Bounded motion window for a single track. Positions and instantaneous
/// speeds live in the same queue, so the two histories always have equal
/// length and are trimmed together.
#[derive(Debug, Clone)]
pub struct MotionHistory {
    window: CircularQueue<Sample>,
}

impl MotionHistory {
    pub fn new(window_size: usize) -> Self {
        Self {
            window: CircularQueue::with_capacity(window_size),
        }
    }

    /// Appends a position and returns the instantaneous speed relative to the
    /// previous sample. The first sample of a track has speed 0.
    pub fn record(&mut self, pos: na::Point2<f32>) -> f32 {
        let speed = match self.window.back() {
            Some(prev) => na::distance(&prev.pos, &pos),
            None => 0.0,
        };

        self.window.push(Sample { pos, speed });

        speed
    }

    /// Mean instantaneous speed over the current window. Classified on
    /// whatever history exists; a single sample yields its own speed.
    pub fn mean_speed(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }

        let sum: f32 = self.window.iter().map(|s| s.speed).sum();

        sum / self.window.len() as f32
    }

    #[inline]
    pub fn last_position(&self) -> Option<na::Point2<f32>> {
        self.window.back().map(|s| s.pos)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub fn speeds(&self) -> impl Iterator<Item = f32> + '_ {
        self.window.iter().map(|s| s.speed)
    }

    #[inline]
    pub fn positions(&self) -> impl Iterator<Item = na::Point2<f32>> + '_ {
        self.window.iter().map(|s| s.pos)
    }
}
