use super::models::LogLevel;
use autoscroll_core::DEFAULT_SPEED;

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Debug
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}

pub(crate) fn default_speed() -> f32 {
    DEFAULT_SPEED
}

pub(crate) fn default_tick_interval_ms() -> u64 {
    16
}

pub(crate) fn default_pixels_per_speed_unit() -> f32 {
    0.3
}

pub(crate) fn default_ease_duration_ms() -> u64 {
    500
}

pub(crate) fn default_controls_hide_delay_ms() -> u64 {
    3000
}

pub(crate) fn default_end_notice_ms() -> u64 {
    3000
}

pub(crate) fn default_toggle_icon_ms() -> u64 {
    800
}

pub(crate) fn default_page_height() -> i32 {
    1400
}

pub(crate) fn default_viewport_height() -> i32 {
    900
}
