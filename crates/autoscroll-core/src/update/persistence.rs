use super::Effect;
use crate::messages::TimerSlot;
use crate::session::{ScrollSession, StopReason};
use crate::store::SavedPosition;
use tracing::{debug, info};

impl ScrollSession {
    pub(super) fn handle_document_loaded(&mut self, item_count: usize, effects: &mut Vec<Effect>) {
        self.item_count = Some(item_count);
        info!(key = %self.document_key, item_count, "Document ready");
        if self.position_restored || item_count == 0 {
            return;
        }
        self.position_restored = true;
        effects.push(Effect::LoadPosition);
    }

    pub(super) fn handle_position_loaded(
        &mut self,
        saved: Option<SavedPosition>,
        effects: &mut Vec<Effect>,
    ) {
        match saved {
            Some(position) if position.item_index < self.item_count() => {
                info!(
                    key = %self.document_key,
                    index = position.item_index,
                    offset = position.pixel_offset,
                    "Resuming from saved position"
                );
                effects.push(Effect::ScrollToItem {
                    index: position.item_index,
                    offset: position.pixel_offset,
                });
            }
            Some(position) => debug!(
                key = %self.document_key,
                index = position.item_index,
                item_count = self.item_count(),
                "Discarding saved position outside the document"
            ),
            None => debug!(key = %self.document_key, "No saved position"),
        }
    }

    pub(super) fn handle_close(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        if !self.stop_auto_scroll(StopReason::Closed, now_ms, effects) {
            effects.push(Effect::SavePosition);
        }
        for slot in TimerSlot::ALL {
            effects.push(Effect::Cancel(slot));
        }
        self.driver_generation.bump();
        self.hide_generation.bump();
        self.end_generation.bump();
        self.icon_generation.bump();
        self.pending_hide_deadline = None;
        self.closed = true;
        info!(key = %self.document_key, "Reading session closed");
    }
}
