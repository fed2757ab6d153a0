//! Frame clock: turns monotonically increasing frame timestamps into
//! `(time, delta)` pairs for the kinematics engine.

/// Timing for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameTime {
    /// Session time in seconds.
    pub time: f64,
    /// Seconds since the previous frame. Zero on the first frame.
    pub delta: f32,
}

/// Tracks the previous frame timestamp.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock that has not seen any frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now` seconds.
    ///
    /// A timestamp earlier than the previous one yields a zero delta and
    /// keeps the previous time, so session time never runs backwards.
    pub fn advance(&mut self, now: f64) -> FrameTime {
        let time = match self.last {
            Some(last) => now.max(last),
            None => now,
        };
        let delta = self.last.map_or(0.0, |last| (time - last) as f32);
        self.last = Some(time);
        self.frame_count += 1;
        FrameTime { time, delta }
    }

    /// Number of frames recorded.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.advance(3.5);
        assert_eq!(ft.time, 3.5);
        assert_eq!(ft.delta, 0.0);
    }

    #[test]
    fn test_delta_between_frames() {
        let mut clock = FrameClock::new();
        clock.advance(1.0);
        let ft = clock.advance(1.25);
        assert!((ft.delta - 0.25).abs() < 1e-6);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let mut clock = FrameClock::new();
        clock.advance(2.0);
        let ft = clock.advance(1.0);
        assert_eq!(ft.time, 2.0);
        assert_eq!(ft.delta, 0.0);
        assert_eq!(clock.advance(2.5).delta, 0.5);
    }

    #[test]
    fn test_large_gap_is_not_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let ft = clock.advance(120.0);
        assert!((ft.delta - 120.0).abs() < 1e-4);
    }
}
