use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::{info, warn};

/// Shutdown flag shared between the signal handler and the scroll loop.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that trips on Ctrl+C. Without a handler the session can still be
    /// closed normally, so installation failure is only logged.
    pub fn on_ctrlc() -> Self {
        let token = Self::new();
        let handler = token.clone();
        if let Err(err) = ctrlc::set_handler(move || {
            info!("Received Ctrl+C; closing reading session");
            handler.cancel();
        }) {
            warn!("Failed to install Ctrl+C signal handler: {err}");
        }
        token
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
