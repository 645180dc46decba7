//! Speed model: eases the effective scroll speed toward its target.
//!
//! The ramp is evaluated from the clock on demand, so stopping or retargeting
//! never needs to cancel an animation; it just restarts the ramp from the
//! value sampled at that instant.

/// Ease-in/ease-out curve on `[0, 1]`. Monotone, so ramps never overshoot.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRamp {
    from: f32,
    to: f32,
    start_ms: u64,
    duration_ms: u64,
}

impl SpeedRamp {
    pub fn idle(duration_ms: u64) -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            start_ms: 0,
            duration_ms,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if self.duration_ms == 0 || elapsed >= self.duration_ms {
            return self.to;
        }
        let t = elapsed as f32 / self.duration_ms as f32;
        let value = self.from + (self.to - self.from) * smoothstep(t);
        let (lo, hi) = if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        value.clamp(lo, hi)
    }

    pub fn is_settled(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Restart the ramp toward `to`, continuing from the current value.
    pub fn retarget(&mut self, now_ms: u64, to: f32) {
        let current = self.sample(now_ms);
        *self = Self {
            from: current,
            to: to.max(0.0),
            start_ms: now_ms,
            duration_ms: self.duration_ms,
        };
    }
}
