use super::Effect;
use crate::generation::Generation;
use crate::messages::TimerKind;
use crate::session::{ScrollSession, StopReason};
use tracing::{debug, info, trace};

impl ScrollSession {
    pub(super) fn handle_tap_content(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        self.handle_toggle_auto_scroll(now_ms, effects);
        self.toggle_icon_visible = true;
        let generation = self.icon_generation.bump();
        effects.push(Effect::Schedule {
            timer: TimerKind::HideToggleIcon { generation },
            delay_ms: self.tuning.toggle_icon_ms,
        });
    }

    pub(super) fn handle_toggle_auto_scroll(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        let enabled = !self.is_auto_scrolling;
        self.handle_set_auto_scroll(enabled, now_ms, effects);
    }

    pub(super) fn handle_set_auto_scroll(
        &mut self,
        enabled: bool,
        now_ms: u64,
        effects: &mut Vec<Effect>,
    ) {
        if enabled {
            self.start_auto_scroll(now_ms, effects);
        } else {
            self.stop_auto_scroll(StopReason::UserToggle, now_ms, effects);
        }
    }

    pub(super) fn handle_set_speed(&mut self, speed: f32, now_ms: u64, effects: &mut Vec<Effect>) {
        let clamped = self.tuning.clamp_speed(speed);
        if clamped != speed {
            debug!(requested = speed, applied = clamped, "Clamped scroll speed");
        }
        self.target_speed = clamped;
        if self.is_auto_scrolling {
            self.speed.retarget(now_ms, clamped);
            self.restart_hide_timer(now_ms, effects);
        }
    }

    pub(super) fn handle_driver_tick(
        &mut self,
        generation: Generation,
        now_ms: u64,
        effects: &mut Vec<Effect>,
    ) {
        if !self.is_auto_scrolling || !self.driver_generation.is_current(generation) {
            trace!(generation = generation.value(), "Dropping stale driver tick");
            return;
        }
        let speed = self.speed.sample(now_ms);
        if speed > self.tuning.min_effective_speed {
            effects.push(Effect::ScrollBy(self.tuning.pixels_per_tick(speed)));
        }
    }

    pub(super) fn start_auto_scroll(&mut self, now_ms: u64, effects: &mut Vec<Effect>) -> bool {
        if self.is_auto_scrolling {
            return false;
        }
        if self.item_count() == 0 {
            debug!(key = %self.document_key, "Autoscroll unavailable for an empty document");
            return false;
        }
        self.is_auto_scrolling = true;
        self.last_stop = None;
        self.speed.retarget(now_ms, self.target_speed);
        let generation = self.driver_generation.bump();
        effects.push(Effect::StartDriver { generation });
        self.restart_hide_timer(now_ms, effects);
        info!(
            key = %self.document_key,
            speed = self.target_speed,
            generation = generation.value(),
            "Autoscroll started"
        );
        true
    }

    /// Stop the driver, bring the controls back and persist the position.
    /// Returns false when autoscroll was not running.
    pub(super) fn stop_auto_scroll(
        &mut self,
        reason: StopReason,
        now_ms: u64,
        effects: &mut Vec<Effect>,
    ) -> bool {
        if !self.is_auto_scrolling {
            return false;
        }
        self.is_auto_scrolling = false;
        self.auto_scroll_origin = false;
        self.speed.retarget(now_ms, 0.0);
        self.driver_generation.bump();
        self.last_stop = Some(reason);
        effects.push(Effect::StopDriver);
        self.cancel_hide_timer(effects);
        self.controls_visible = true;
        effects.push(Effect::SavePosition);
        info!(key = %self.document_key, %reason, "Autoscroll stopped");
        true
    }
}
