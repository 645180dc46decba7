use super::Effect;
use crate::generation::Generation;
use crate::messages::TimerKind;
use crate::session::{ScrollSession, StopReason};
use crate::viewport::LayoutSnapshot;
use tracing::{debug, info};

impl ScrollSession {
    /// Edge-triggered: only the transition into "last page fully visible"
    /// while autoscrolling ends the run.
    pub(super) fn handle_layout_changed(
        &mut self,
        layout: LayoutSnapshot,
        now_ms: u64,
        effects: &mut Vec<Effect>,
    ) {
        let at_end = layout.is_at_end();
        let reached_end = at_end && !self.was_at_end;
        self.was_at_end = at_end;

        if !reached_end || layout.total_items == 0 || !self.is_auto_scrolling {
            return;
        }

        self.stop_auto_scroll(StopReason::EndOfDocument, now_ms, effects);
        self.at_end_transient = true;
        let generation = self.end_generation.bump();
        effects.push(Effect::Schedule {
            timer: TimerKind::ClearEndNotice { generation },
            delay_ms: self.tuning.end_notice_ms,
        });
        info!(
            key = %self.document_key,
            items = layout.total_items,
            "Reached end of document"
        );
    }

    pub(super) fn handle_end_notice_elapsed(&mut self, generation: Generation) {
        if !self.end_generation.is_current(generation) {
            debug!(generation = generation.value(), "Ignoring superseded end notice timer");
            return;
        }
        self.at_end_transient = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::messages::{Message, TimerKind};
    use crate::session::{ScrollSession, StopReason};
    use crate::tuning::ScrollTuning;
    use crate::update::Effect;
    use crate::viewport::{LayoutSnapshot, VisibleItem};

    fn layout(total: usize, last_index: usize, offset: i32) -> LayoutSnapshot {
        LayoutSnapshot {
            total_items: total,
            last_visible: Some(VisibleItem {
                index: last_index,
                offset,
                size: 1000,
            }),
            viewport_end_offset: 800,
        }
    }

    fn scrolling_session(pages: usize) -> ScrollSession {
        let mut session = ScrollSession::new("doc.pdf", ScrollTuning::default());
        session.reduce(Message::DocumentLoaded { item_count: pages }, 0);
        session.reduce(Message::LayoutChanged(layout(pages, 0, 0)), 0);
        session.reduce(Message::SetAutoScroll(true), 0);
        session
    }

    fn end_notice_timers(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Effect::Schedule {
                        timer: TimerKind::ClearEndNotice { .. },
                        delay_ms: 3000
                    }
                )
            })
            .count()
    }

    #[test]
    fn reaching_end_stops_and_shows_notice() {
        let mut session = scrolling_session(3);
        session.controls_visible = false;
        let effects = session.reduce(Message::LayoutChanged(layout(3, 2, -200)), 5000);
        assert!(!session.is_auto_scrolling());
        assert!(session.at_end_transient());
        assert!(session.controls_visible());
        assert_eq!(session.last_stop(), Some(StopReason::EndOfDocument));
        assert!(effects.contains(&Effect::SavePosition));
        assert_eq!(end_notice_timers(&effects), 1);
    }

    #[test]
    fn repeated_end_snapshots_fire_once() {
        let mut session = scrolling_session(3);
        let first = session.reduce(Message::LayoutChanged(layout(3, 2, -200)), 5000);
        assert_eq!(end_notice_timers(&first), 1);
        session.reduce(Message::SetAutoScroll(true), 5100);
        for now in [5116, 5132, 5148] {
            let again = session.reduce(Message::LayoutChanged(layout(3, 2, -200)), now);
            assert!(again.is_empty());
        }
        assert!(session.is_auto_scrolling());
    }

    #[test]
    fn notice_clears_unless_superseded() {
        let mut session = scrolling_session(3);
        let first = session.reduce(Message::LayoutChanged(layout(3, 2, -200)), 1000);
        let Some(Effect::Schedule {
            timer: TimerKind::ClearEndNotice { generation: old },
            ..
        }) = first.last().cloned()
        else {
            panic!("expected end notice timer");
        };

        session.reduce(Message::LayoutChanged(layout(3, 1, 300)), 1500);
        session.reduce(Message::SetAutoScroll(true), 1500);
        let second = session.reduce(Message::LayoutChanged(layout(3, 2, -200)), 2000);
        assert_eq!(end_notice_timers(&second), 1);

        session.reduce(Message::Timer(TimerKind::ClearEndNotice { generation: old }), 4000);
        assert!(session.at_end_transient(), "stale timer must not clear the newer notice");
    }

    #[test]
    fn end_while_paused_does_not_fire() {
        let mut session = ScrollSession::new("doc.pdf", ScrollTuning::default());
        session.reduce(Message::DocumentLoaded { item_count: 3 }, 0);
        let effects = session.reduce(Message::LayoutChanged(layout(3, 2, -200)), 100);
        assert!(effects.is_empty());
        assert!(!session.at_end_transient());
    }

    #[test]
    fn empty_document_never_fires() {
        let mut session = ScrollSession::new("doc.pdf", ScrollTuning::default());
        session.reduce(Message::DocumentLoaded { item_count: 0 }, 0);
        let effects = session.reduce(Message::LayoutChanged(LayoutSnapshot::default()), 0);
        assert!(effects.is_empty());
        assert!(!session.at_end_transient());
    }
}
