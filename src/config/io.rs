use super::models::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load `path`, falling back to defaults when the file is missing or invalid.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).context("Failed to parse reader config")
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string(config).context("Failed to serialize reader config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").expect("parse");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.cache_dir, ".cache");
        assert_eq!(config.tick_interval_ms, 16);
        assert_eq!(config.end_notice_ms, 3000);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = parse_config(
            "log_level = \"warn\"\npixels_per_speed_unit = 0.75\ndefault_speed = 40.0\n",
        )
        .expect("parse");
        assert_eq!(config.log_level, LogLevel::Warn);
        let tuning = config.tuning();
        assert_eq!(tuning.pixels_per_speed_unit, 0.75);
        assert_eq!(tuning.default_speed, autoscroll_core::MAX_SPEED);
        assert_eq!(tuning.controls_hide_delay_ms, 3000);
        assert_eq!(tuning.min_effective_speed, 0.01);
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.page_height = 2000;
        config.log_level = LogLevel::Info;
        let text = serialize_config(&config).expect("serialize");
        let parsed = parse_config(&text).expect("parse");
        assert_eq!(parsed.page_height, 2000);
        assert_eq!(parsed.log_level, LogLevel::Info);
    }

    #[test]
    fn missing_or_invalid_file_falls_back() {
        let dir = std::env::temp_dir().join(format!("autoscroll-config-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let missing = load_config(&dir.join("absent.toml"));
        assert_eq!(missing.viewport_height, 900);

        let invalid = dir.join("invalid.toml");
        fs::write(&invalid, "tick_interval_ms = \"fast\"").expect("write");
        let config = load_config(&invalid);
        assert_eq!(config.tick_interval_ms, 16);
        let _ = fs::remove_dir_all(&dir);
    }
}
