use crate::generation::Generation;
use crate::messages::{Message, TimerKind, TimerSlot};
use crate::session::ScrollSession;
use tracing::trace;

mod arbiter;
mod controls;
mod driver;
mod end_of_document;
mod persistence;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start the periodic driver tick, replacing any running one.
    StartDriver { generation: Generation },
    StopDriver,
    ScrollBy(f32),
    ScrollToItem { index: usize, offset: i32 },
    LoadPosition,
    SavePosition,
    Schedule { timer: TimerKind, delay_ms: u64 },
    Cancel(TimerSlot),
}

impl ScrollSession {
    /// Apply one message at time `now_ms` and return the effects to run.
    pub fn reduce(&mut self, message: Message, now_ms: u64) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.closed {
            trace!(action = message.action(), "Ignoring message for closed session");
            return effects;
        }

        match message {
            Message::DocumentLoaded { item_count } => {
                self.handle_document_loaded(item_count, &mut effects)
            }
            Message::PositionLoaded(saved) => self.handle_position_loaded(saved, &mut effects),
            Message::TapContent => self.handle_tap_content(now_ms, &mut effects),
            Message::ToggleAutoScroll => self.handle_toggle_auto_scroll(now_ms, &mut effects),
            Message::SetAutoScroll(enabled) => {
                self.handle_set_auto_scroll(enabled, now_ms, &mut effects)
            }
            Message::SetSpeed(speed) => self.handle_set_speed(speed, now_ms, &mut effects),
            Message::ResetSpeed => {
                let speed = self.tuning.default_speed;
                self.handle_set_speed(speed, now_ms, &mut effects);
            }
            Message::ToggleControls => self.handle_toggle_controls(now_ms, &mut effects),
            Message::ShowControls => self.handle_show_controls(now_ms, &mut effects),
            Message::ControlsTouched => self.handle_controls_touched(now_ms, &mut effects),
            Message::ScrollActivity {
                in_progress,
                from_driver,
            } => self.handle_scroll_activity(in_progress, from_driver, now_ms, &mut effects),
            Message::LayoutChanged(layout) => {
                self.handle_layout_changed(layout, now_ms, &mut effects)
            }
            Message::Timer(TimerKind::DriverTick { generation }) => {
                self.handle_driver_tick(generation, now_ms, &mut effects)
            }
            Message::Timer(TimerKind::HideControls { generation }) => {
                self.handle_hide_controls_elapsed(generation)
            }
            Message::Timer(TimerKind::ClearEndNotice { generation }) => {
                self.handle_end_notice_elapsed(generation)
            }
            Message::Timer(TimerKind::HideToggleIcon { generation }) => {
                self.handle_toggle_icon_elapsed(generation)
            }
            Message::Close => self.handle_close(now_ms, &mut effects),
        }

        effects
    }
}
