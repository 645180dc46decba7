//! Entry point for the headless autoscroll reader.
//!
//! Parses arguments, loads `conf/config.toml`, applies the configured log
//! level and runs one autoscroll session against the on-disk position cache.

mod cache;
mod cancellation;
mod config;
mod harness;

use crate::cancellation::CancellationToken;
use crate::config::{load_config, serialize_config};
use crate::harness::{SessionOptions, run_session};
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const USAGE: &str = "Usage: autoscroll-reader <document-key> <page-count> [speed]";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let options = parse_args(env::args().skip(1))?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    debug!("Effective configuration:\n{}", serialize_config(&config)?);
    info!(
        key = %options.document_key,
        pages = options.page_count,
        level = %config.log_level,
        cache = %config.cache_dir,
        "Starting autoscroll reader"
    );

    let cancel = CancellationToken::on_ctrlc();
    let summary = run_session(&config, &options, &cancel);
    info!(
        stop = ?summary.stop,
        page = summary.position.item_index,
        offset = summary.position.pixel_offset,
        elapsed_ms = summary.elapsed_ms,
        "Reading session finished"
    );
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<SessionOptions> {
    let document_key = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let page_count = args
        .next()
        .ok_or_else(|| anyhow!(USAGE))?
        .parse::<usize>()
        .context("Page count must be a non-negative integer")?;
    let speed = args
        .next()
        .map(|raw| raw.parse::<f32>())
        .transpose()
        .context("Speed must be a number")?;
    if let Some(extra) = args.next() {
        return Err(anyhow!("Unexpected argument `{extra}`\n{USAGE}"));
    }
    Ok(SessionOptions {
        document_key,
        page_count,
        speed,
    })
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_key_pages_and_optional_speed() {
        let options = parse_args(args(&["file:///a.pdf", "12"])).expect("parse");
        assert_eq!(options.document_key, "file:///a.pdf");
        assert_eq!(options.page_count, 12);
        assert_eq!(options.speed, None);

        let options = parse_args(args(&["file:///a.pdf", "12", "4.5"])).expect("parse");
        assert_eq!(options.speed, Some(4.5));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["file:///a.pdf"])).is_err());
        assert!(parse_args(args(&["file:///a.pdf", "many"])).is_err());
        assert!(parse_args(args(&["file:///a.pdf", "3", "fast"])).is_err());
        assert!(parse_args(args(&["file:///a.pdf", "3", "2", "extra"])).is_err());
    }
}
