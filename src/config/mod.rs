//! Configuration loading for the autoscroll reader.
//!
//! All user-tunable settings are loaded from `conf/config.toml` if present.
//! Missing or invalid entries fall back to defaults so a session can always
//! start.

mod defaults;
mod io;
mod models;

pub use io::{load_config, serialize_config};
pub use models::AppConfig;
#[cfg(test)]
pub use models::LogLevel;
