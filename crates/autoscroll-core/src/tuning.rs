use serde::{Deserialize, Serialize};

/// Limits and defaults for the speed slider.
pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 15.0;
pub const DEFAULT_SPEED: f32 = 2.0;

/// Numeric parameters of the scroll loop and its timers.
///
/// `pixels_per_speed_unit` depends on the rendering density of the host; the
/// default was tuned for a phone-sized viewport and is expected to be
/// overridden from configuration on other displays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    pub default_speed: f32,
    pub tick_interval_ms: u64,
    pub pixels_per_speed_unit: f32,
    pub min_effective_speed: f32,
    pub ease_duration_ms: u64,
    pub controls_hide_delay_ms: u64,
    pub end_notice_ms: u64,
    pub toggle_icon_ms: u64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            default_speed: DEFAULT_SPEED,
            tick_interval_ms: 16,
            pixels_per_speed_unit: 0.3,
            min_effective_speed: 0.01,
            ease_duration_ms: 500,
            controls_hide_delay_ms: 3000,
            end_notice_ms: 3000,
            toggle_icon_ms: 800,
        }
    }
}

impl ScrollTuning {
    /// Clamp a requested speed into the slider range; non-finite input falls
    /// back to the configured default.
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            self.default_speed.clamp(MIN_SPEED, MAX_SPEED)
        }
    }

    /// Pixels the driver requests per tick at the given effective speed.
    pub fn pixels_per_tick(&self, effective_speed: f32) -> f32 {
        effective_speed * self.pixels_per_speed_unit
    }

    /// Tick period, never zero so periodic timers always make progress.
    pub fn tick_period_ms(&self) -> u64 {
        self.tick_interval_ms.max(1)
    }
}
