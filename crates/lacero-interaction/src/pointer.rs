//! Recent pointer motion.

use std::collections::VecDeque;

use lacero_math::Vec2;
use lacero_types::constants::{EPSILON, POINTER_HISTORY_LEN};

/// Ring of the most recent pointer deltas with their frame times.
#[derive(Debug, Clone, Default)]
pub struct PointerHistory {
    samples: VecDeque<(Vec2, f32)>,
}

impl PointerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one move. The oldest sample is dropped past
    /// [`POINTER_HISTORY_LEN`].
    pub fn push(&mut self, delta: Vec2, dt: f32) {
        if !delta.is_finite() || !dt.is_finite() || dt < 0.0 {
            return;
        }
        if self.samples.len() == POINTER_HISTORY_LEN {
            self.samples.pop_front();
        }
        self.samples.push_back((delta, dt));
    }

    /// Average velocity over the kept samples: total delta over total time.
    /// Zero when no time has been recorded.
    pub fn release_velocity(&self) -> Vec2 {
        let elapsed: f32 = self.samples.iter().map(|&(_, dt)| dt).sum();
        if elapsed <= EPSILON {
            return Vec2::ZERO;
        }
        let travel: Vec2 = self.samples.iter().map(|&(d, _)| d).sum();
        travel / elapsed
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
