use super::Effect;
use crate::generation::Generation;
use crate::messages::{TimerKind, TimerSlot};
use crate::session::ScrollSession;
use tracing::debug;

impl ScrollSession {
    /// Debounced: a new countdown supersedes the pending one.
    pub(super) fn restart_hide_timer(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        let delay_ms = self.tuning.controls_hide_delay_ms;
        let generation = self.hide_generation.bump();
        self.pending_hide_deadline = Some(now_ms.saturating_add(delay_ms));
        effects.push(Effect::Schedule {
            timer: TimerKind::HideControls { generation },
            delay_ms,
        });
    }

    pub(super) fn cancel_hide_timer(&mut self, effects: &mut Vec<Effect>) {
        self.hide_generation.bump();
        self.pending_hide_deadline = None;
        effects.push(Effect::Cancel(TimerSlot::Controls));
    }

    pub(super) fn handle_toggle_controls(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        self.controls_visible = !self.controls_visible;
        if self.controls_visible {
            if self.is_auto_scrolling {
                self.restart_hide_timer(now_ms, effects);
            }
        } else if self.pending_hide_deadline.is_some() {
            self.cancel_hide_timer(effects);
        }
    }

    pub(super) fn handle_show_controls(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        self.controls_visible = true;
        if self.is_auto_scrolling {
            self.restart_hide_timer(now_ms, effects);
        }
    }

    pub(super) fn handle_controls_touched(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        if self.is_auto_scrolling {
            self.restart_hide_timer(now_ms, effects);
        }
    }

    pub(super) fn handle_hide_controls_elapsed(&mut self, generation: Generation) {
        if !self.hide_generation.is_current(generation) {
            debug!(generation = generation.value(), "Ignoring superseded hide timer");
            return;
        }
        self.pending_hide_deadline = None;
        if self.is_auto_scrolling {
            self.controls_visible = false;
        }
    }

    pub(super) fn handle_toggle_icon_elapsed(&mut self, generation: Generation) {
        if self.icon_generation.is_current(generation) {
            self.toggle_icon_visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::messages::{Message, TimerKind};
    use crate::session::ScrollSession;
    use crate::tuning::ScrollTuning;
    use crate::update::Effect;

    fn hide_generation(effects: &[Effect]) -> crate::generation::Generation {
        effects
            .iter()
            .rev()
            .find_map(|e| match e {
                Effect::Schedule {
                    timer: TimerKind::HideControls { generation },
                    ..
                } => Some(*generation),
                _ => None,
            })
            .expect("hide timer scheduled")
    }

    fn scrolling_session() -> (ScrollSession, Vec<Effect>) {
        let mut session = ScrollSession::new("doc.pdf", ScrollTuning::default());
        session.reduce(Message::DocumentLoaded { item_count: 5 }, 0);
        let effects = session.reduce(Message::SetAutoScroll(true), 0);
        (session, effects)
    }

    #[test]
    fn controls_hide_after_countdown() {
        let (mut session, effects) = scrolling_session();
        let generation = hide_generation(&effects);
        session.reduce(Message::Timer(TimerKind::HideControls { generation }), 3000);
        assert!(!session.controls_visible());
        assert_eq!(session.pending_hide_deadline(), None);
    }

    #[test]
    fn touching_controls_supersedes_pending_countdown() {
        let (mut session, effects) = scrolling_session();
        let first = hide_generation(&effects);
        let touched = session.reduce(Message::ControlsTouched, 2000);
        let second = hide_generation(&touched);
        assert_eq!(session.pending_hide_deadline(), Some(5000));

        session.reduce(Message::Timer(TimerKind::HideControls { generation: first }), 3000);
        assert!(session.controls_visible());
        session.reduce(Message::Timer(TimerKind::HideControls { generation: second }), 5000);
        assert!(!session.controls_visible());
    }

    #[test]
    fn hide_timer_does_nothing_once_paused() {
        let (mut session, effects) = scrolling_session();
        let generation = hide_generation(&effects);
        session.reduce(Message::SetAutoScroll(false), 1000);
        session.reduce(Message::Timer(TimerKind::HideControls { generation }), 3000);
        assert!(session.controls_visible());
    }

    #[test]
    fn double_tap_toggles_and_restarts_countdown_when_shown() {
        let (mut session, _) = scrolling_session();
        session.reduce(Message::ToggleControls, 500);
        assert!(!session.controls_visible());
        assert_eq!(session.pending_hide_deadline(), None);

        let effects = session.reduce(Message::ToggleControls, 900);
        assert!(session.controls_visible());
        assert_eq!(session.pending_hide_deadline(), Some(3900));
        let generation = hide_generation(&effects);
        session.reduce(Message::Timer(TimerKind::HideControls { generation }), 3900);
        assert!(!session.controls_visible());

        session.reduce(Message::ShowControls, 4000);
        assert!(session.controls_visible());
        assert_eq!(session.pending_hide_deadline(), Some(7000));
    }

    #[test]
    fn paused_double_tap_never_schedules() {
        let mut session = ScrollSession::new("doc.pdf", ScrollTuning::default());
        session.reduce(Message::DocumentLoaded { item_count: 5 }, 0);
        let hidden = session.reduce(Message::ToggleControls, 0);
        assert!(hidden.is_empty());
        let shown = session.reduce(Message::ToggleControls, 10);
        assert!(shown.is_empty());
        assert!(session.controls_visible());
    }
}
