//! Headless reading session: a paged viewport scrolled in real time.
//!
//! The loop sleeps until the next timer deadline, delivers due timers and
//! stops once autoscroll has ended and any end-of-document notice has been
//! cleared, or when the cancellation token trips.

use crate::cache::FileCache;
use crate::cancellation::CancellationToken;
use crate::config::AppConfig;
use autoscroll_core::{
    AutoScrollController, Message, PagedViewport, PositionBridge, SavedPosition, StopReason,
    TimerQueue, Viewport,
};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const MAX_IDLE_SLEEP: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub document_key: String,
    pub page_count: usize,
    pub speed: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub stop: Option<StopReason>,
    pub position: SavedPosition,
    pub elapsed_ms: u64,
}

pub fn run_session(
    config: &AppConfig,
    options: &SessionOptions,
    cancel: &CancellationToken,
) -> SessionSummary {
    let key = options.document_key.as_str();
    let cache = FileCache::new(&config.cache_dir);
    debug!(cache = %cache.root().display(), "Using position cache");
    let mut bridge = PositionBridge::new(cache);
    let previous = bridge.last_opened(key);
    if previous > 0 {
        debug!(key, previous, "Document opened before");
    }
    bridge.record_opened(key, now_millis());

    let viewport = PagedViewport::uniform(
        options.page_count,
        config.page_height,
        config.viewport_height,
    );
    let mut controller = AutoScrollController::new(
        key,
        viewport,
        bridge.into_inner(),
        TimerQueue::new(),
        config.tuning(),
    );
    controller.subscribe(log_transitions());
    controller.document_loaded();

    let speed = options.speed.unwrap_or(config.default_speed);
    controller.dispatch(Message::SetSpeed(speed));
    // The end notice fires on reaching the end, so a session that opens
    // there would tick against a pinned viewport forever.
    if controller.viewport().layout().is_at_end() {
        info!(
            key,
            pages = options.page_count,
            "Document already at its end; not starting autoscroll"
        );
    } else {
        controller.dispatch(Message::SetAutoScroll(true));
        info!(
            key,
            pages = options.page_count,
            speed = %controller.session().speed_label(),
            "Autoscroll session started"
        );
    }

    let started = Instant::now();
    loop {
        if cancel.is_cancelled() {
            info!(key, "Cancellation requested");
            break;
        }
        controller.advance_to(elapsed_ms(started));
        controller.poll_viewport();
        let session = controller.session();
        if !session.is_auto_scrolling() && !session.at_end_transient() {
            break;
        }
        let wait = controller
            .next_deadline()
            .map(|deadline| Duration::from_millis(deadline.saturating_sub(elapsed_ms(started))))
            .unwrap_or(MAX_IDLE_SLEEP)
            .min(MAX_IDLE_SLEEP);
        thread::sleep(wait);
    }

    controller.close();
    let position = SavedPosition {
        item_index: controller.viewport().first_visible_index(),
        pixel_offset: controller.viewport().first_visible_offset(),
    };
    SessionSummary {
        stop: controller.session().last_stop(),
        position,
        elapsed_ms: elapsed_ms(started),
    }
}

fn log_transitions() -> impl FnMut(&autoscroll_core::SessionEvent) + 'static {
    let mut last = None;
    move |event| {
        let snapshot = &event.snapshot;
        let state = (
            snapshot.is_auto_scrolling,
            snapshot.at_end_transient,
            snapshot.controls_visible,
        );
        if last == Some(state) {
            return;
        }
        last = Some(state);
        info!(
            action = event.action,
            at_ms = event.at_ms,
            scrolling = snapshot.is_auto_scrolling,
            at_end = snapshot.at_end_transient,
            controls = snapshot.controls_visible,
            speed = %snapshot.speed_label,
            progress = snapshot.progress,
            "Session state changed"
        );
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoscroll_core::PositionStore;
    use std::fs;
    use std::sync::mpsc;

    fn fast_config(name: &str) -> AppConfig {
        let cache_dir = std::env::temp_dir().join(format!(
            "autoscroll-harness-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&cache_dir);
        AppConfig {
            cache_dir: cache_dir.to_string_lossy().into_owned(),
            tick_interval_ms: 1,
            pixels_per_speed_unit: 10.0,
            ease_duration_ms: 20,
            end_notice_ms: 10,
            page_height: 100,
            viewport_height: 100,
            ..AppConfig::default()
        }
    }

    #[test]
    fn session_runs_to_the_end_and_persists() {
        let config = fast_config("end");
        let options = SessionOptions {
            document_key: "file:///short.pdf".to_string(),
            page_count: 2,
            speed: Some(15.0),
        };
        let summary = run_session(&config, &options, &CancellationToken::new());
        assert_eq!(summary.stop, Some(StopReason::EndOfDocument));
        assert_eq!(
            summary.position,
            SavedPosition {
                item_index: 1,
                pixel_offset: 0
            }
        );

        let cache = FileCache::new(&config.cache_dir);
        assert_eq!(
            cache.get("file:///short.pdf").expect("read"),
            Some(summary.position)
        );
        assert!(cache.last_opened("file:///short.pdf").expect("read") > 0);
        let _ = fs::remove_dir_all(&config.cache_dir);
    }

    #[test]
    fn reopening_a_finished_document_returns() {
        let config = fast_config("reopen");
        let options = SessionOptions {
            document_key: "file:///finished.pdf".to_string(),
            page_count: 2,
            speed: Some(15.0),
        };
        let first = run_session(&config, &options, &CancellationToken::new());
        assert_eq!(first.stop, Some(StopReason::EndOfDocument));

        let (tx, rx) = mpsc::channel();
        let worker_config = config.clone();
        let worker_options = options.clone();
        thread::spawn(move || {
            let summary = run_session(&worker_config, &worker_options, &CancellationToken::new());
            let _ = tx.send(summary);
        });
        let second = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("second session must finish on its own");
        assert_eq!(second.stop, None);
        assert_eq!(second.position, first.position);
        let _ = fs::remove_dir_all(&config.cache_dir);
    }

    #[test]
    fn document_shorter_than_viewport_returns() {
        let config = fast_config("short");
        let options = SessionOptions {
            document_key: "file:///one-page.pdf".to_string(),
            page_count: 1,
            speed: None,
        };
        let summary = run_session(&config, &options, &CancellationToken::new());
        assert_eq!(summary.stop, None);
        assert_eq!(summary.position, SavedPosition::default());
        let _ = fs::remove_dir_all(&config.cache_dir);
    }

    #[test]
    fn cancelled_session_closes_immediately() {
        let config = fast_config("cancel");
        let options = SessionOptions {
            document_key: "file:///long.pdf".to_string(),
            page_count: 500,
            speed: None,
        };
        let cancel = CancellationToken::new();
        cancel.cancel();
        let summary = run_session(&config, &options, &cancel);
        assert_eq!(summary.stop, Some(StopReason::Closed));
        assert_eq!(summary.position, SavedPosition::default());
        let _ = fs::remove_dir_all(&config.cache_dir);
    }
}
