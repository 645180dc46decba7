use autoscroll_core::ScrollTuning;
use serde::Deserialize;

/// Reader configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_cache_dir")]
    pub cache_dir: String,
    #[serde(default = "crate::config::defaults::default_speed")]
    pub default_speed: f32,
    #[serde(default = "crate::config::defaults::default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_pixels_per_speed_unit")]
    pub pixels_per_speed_unit: f32,
    #[serde(default = "crate::config::defaults::default_ease_duration_ms")]
    pub ease_duration_ms: u64,
    #[serde(default = "crate::config::defaults::default_controls_hide_delay_ms")]
    pub controls_hide_delay_ms: u64,
    #[serde(default = "crate::config::defaults::default_end_notice_ms")]
    pub end_notice_ms: u64,
    #[serde(default = "crate::config::defaults::default_toggle_icon_ms")]
    pub toggle_icon_ms: u64,
    #[serde(default = "crate::config::defaults::default_page_height")]
    pub page_height: i32,
    #[serde(default = "crate::config::defaults::default_viewport_height")]
    pub viewport_height: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: crate::config::defaults::default_log_level(),
            cache_dir: crate::config::defaults::default_cache_dir(),
            default_speed: crate::config::defaults::default_speed(),
            tick_interval_ms: crate::config::defaults::default_tick_interval_ms(),
            pixels_per_speed_unit: crate::config::defaults::default_pixels_per_speed_unit(),
            ease_duration_ms: crate::config::defaults::default_ease_duration_ms(),
            controls_hide_delay_ms: crate::config::defaults::default_controls_hide_delay_ms(),
            end_notice_ms: crate::config::defaults::default_end_notice_ms(),
            toggle_icon_ms: crate::config::defaults::default_toggle_icon_ms(),
            page_height: crate::config::defaults::default_page_height(),
            viewport_height: crate::config::defaults::default_viewport_height(),
        }
    }
}

impl AppConfig {
    pub fn tuning(&self) -> ScrollTuning {
        let base = ScrollTuning::default();
        ScrollTuning {
            default_speed: base.clamp_speed(self.default_speed),
            tick_interval_ms: self.tick_interval_ms,
            pixels_per_speed_unit: self.pixels_per_speed_unit,
            ease_duration_ms: self.ease_duration_ms,
            controls_hide_delay_ms: self.controls_hide_delay_ms,
            end_notice_ms: self.end_notice_ms,
            toggle_icon_ms: self.toggle_icon_ms,
            ..base
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
