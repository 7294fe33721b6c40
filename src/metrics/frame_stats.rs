//! Frame timing fed from the host's elapsed time.
//!
//! Under deterministic pacing this is the only consumer of real elapsed
//! time; the simulation itself never sees it.

use std::collections::VecDeque;
use std::time::Duration;

/// Rolling window of recent frame times
#[derive(Debug, Clone)]
pub struct FrameStats {
    recent_times: VecDeque<Duration>,
    window_size: usize,
}

impl FrameStats {
    pub fn new(window_size: usize) -> Self {
        Self {
            recent_times: VecDeque::with_capacity(window_size),
            window_size: window_size.max(1),
        }
    }

    /// Record one frame's elapsed time
    pub fn record(&mut self, frame_time: Duration) {
        // Add to rolling window
        if self.recent_times.len() >= self.window_size {
            self.recent_times.pop_front();
        }
        self.recent_times.push_back(frame_time);
    }

    /// Average frame time over the rolling window
    pub fn avg_time(&self) -> Duration {
        if self.recent_times.is_empty() {
            Duration::ZERO
        } else {
            let sum: Duration = self.recent_times.iter().sum();
            sum / self.recent_times.len() as u32
        }
    }

    /// Frames per second over the rolling window
    pub fn fps(&self) -> f64 {
        let avg = self.avg_time();
        if avg.is_zero() {
            0.0
        } else {
            1.0 / avg.as_secs_f64()
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(60)
    }
}
