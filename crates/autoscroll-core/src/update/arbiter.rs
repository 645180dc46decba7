use super::Effect;
use crate::session::{ScrollSession, StopReason};
use tracing::{info, trace};

impl ScrollSession {
    /// A scroll starting while autoscroll runs is the user's unless the
    /// driver was issuing a delta when it was observed.
    pub(super) fn handle_scroll_activity(
        &mut self,
        in_progress: bool,
        from_driver: bool,
        now_ms: u64,
        effects: &mut Vec<Effect>,
    ) {
        if !in_progress || !self.is_auto_scrolling {
            return;
        }
        if from_driver {
            trace!("Scroll activity caused by the driver");
            return;
        }
        info!(key = %self.document_key, "Manual scroll interrupted autoscroll");
        self.stop_auto_scroll(StopReason::ManualScroll, now_ms, effects);
    }
}
