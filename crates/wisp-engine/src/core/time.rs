use crate::api::config::TimingConfig;

/// Time step handed to the traveler for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// Real elapsed seconds. Drives position integration so distance covered
    /// matches wall time even when frames drop.
    pub raw: f32,
    /// Raw delta clamped into the interpolation range. Drives smoothing,
    /// ramps, timers, and spark physics.
    pub smooth: f32,
    /// Seconds since the clock started (sum of raw deltas).
    pub elapsed: f32,
}

impl FrameDelta {
    /// A frame where raw and smoothed deltas agree.
    pub fn fixed(dt: f32, elapsed: f32) -> Self {
        Self {
            raw: dt,
            smooth: dt,
            elapsed,
        }
    }
}

/// Splits variable frame times into raw and clamped deltas.
pub struct FrameClock {
    min_dt: f32,
    max_dt: f32,
    elapsed: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new(min_dt: f32, max_dt: f32) -> Self {
        Self {
            min_dt: min_dt.min(max_dt),
            max_dt: max_dt.max(min_dt),
            elapsed: 0.0,
            frames: 0,
        }
    }

    pub fn from_config(config: &TimingConfig) -> Self {
        Self::new(config.min_dt, config.max_dt)
    }

    /// Consume one frame time. Negative or non-finite input counts as a zero-length frame.
    pub fn advance(&mut self, frame_dt: f32) -> FrameDelta {
        let raw = if frame_dt.is_finite() { frame_dt.max(0.0) } else { 0.0 };
        // A zero-length frame stays zero instead of being bumped to min_dt.
        let smooth = if raw > 0.0 {
            raw.clamp(self.min_dt, self.max_dt)
        } else {
            0.0
        };
        self.elapsed += raw;
        self.frames += 1;
        FrameDelta {
            raw,
            smooth,
            elapsed: self.elapsed,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::from_config(&TimingConfig::default())
    }
}
