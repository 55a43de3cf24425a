//! Fixed-timestep accumulator
//!
//! Turns irregular animation-frame deltas into whole simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame timestamp (first frame counts as one tick)
    pub fn frame_dt(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time_ms = Some(now_ms);
        dt.max(0.0)
    }

    /// Add frame time and return how many fixed ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Drop whatever the substep cap could not absorb
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Forget accumulated time (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks_only() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(10.0), MAX_SUBSTEPS);
    }

    #[test]
    fn test_frame_dt_from_timestamps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame_dt(1000.0), SIM_DT);
        let dt = clock.frame_dt(1050.0);
        assert!((dt - 0.05).abs() < 1e-6);
    }
}
