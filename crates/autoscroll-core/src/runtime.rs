//! Effect runner binding a [`ScrollSession`] to its collaborators.

use crate::messages::{Message, TimerKind, TimerSlot};
use crate::scheduler::{Scheduler, TimerId};
use crate::session::{ScrollSession, SessionEvent, SessionSnapshot};
use crate::store::{PositionBridge, PositionStore, SavedPosition};
use crate::tuning::ScrollTuning;
use crate::update::Effect;
use crate::viewport::{LayoutSnapshot, Viewport};
use std::collections::{HashMap, VecDeque};
use tracing::trace;

type Observer = Box<dyn FnMut(&SessionEvent)>;

/// Drives one reading session.
///
/// Messages are processed strictly in arrival order: anything raised while
/// effects run (scroll activity, layout updates, position lookups) is queued
/// behind the message being handled. Dropping the controller closes the
/// session, which persists the position.
pub struct AutoScrollController<V, S, C>
where
    V: Viewport,
    S: PositionStore,
    C: Scheduler,
{
    session: ScrollSession,
    viewport: V,
    bridge: PositionBridge<S>,
    scheduler: C,
    timers: HashMap<TimerSlot, TimerId>,
    queue: VecDeque<Message>,
    draining: bool,
    scroll_in_progress: bool,
    observers: Vec<Observer>,
}

impl<V, S, C> AutoScrollController<V, S, C>
where
    V: Viewport,
    S: PositionStore,
    C: Scheduler,
{
    pub fn new(
        document_key: impl Into<String>,
        viewport: V,
        store: S,
        scheduler: C,
        tuning: ScrollTuning,
    ) -> Self {
        let scroll_in_progress = viewport.is_scroll_in_progress();
        Self {
            session: ScrollSession::new(document_key, tuning),
            viewport,
            bridge: PositionBridge::new(store),
            scheduler,
            timers: HashMap::new(),
            queue: VecDeque::new(),
            draining: false,
            scroll_in_progress,
            observers: Vec::new(),
        }
    }

    pub fn session(&self) -> &ScrollSession {
        &self.session
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Direct access for adapters feeding input into the viewport. Call
    /// [`Self::poll_viewport`] afterwards so the session sees the change.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn bridge(&self) -> &PositionBridge<S> {
        &self.bridge
    }

    pub fn store(&self) -> &S {
        self.bridge.store()
    }

    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn effective_speed(&self) -> f32 {
        self.session.effective_speed(self.scheduler.now_ms())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session
            .snapshot(self.scheduler.now_ms(), self.viewport.first_visible_index())
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Call once the viewport knows how many pages the document has.
    pub fn document_loaded(&mut self) {
        let item_count = self.viewport.item_count();
        self.queue.push_back(Message::DocumentLoaded { item_count });
        self.queue
            .push_back(Message::LayoutChanged(self.viewport.layout()));
        self.drain();
    }

    pub fn dispatch(&mut self, message: Message) {
        self.queue.push_back(message);
        self.drain();
    }

    /// Push-style notification from adapters that observe scrolling
    /// themselves.
    pub fn scroll_activity_changed(&mut self, in_progress: bool) {
        self.scroll_in_progress = in_progress;
        self.queue.push_back(Message::ScrollActivity {
            in_progress,
            from_driver: self.session.auto_scroll_origin(),
        });
        self.drain();
    }

    pub fn layout_changed(&mut self, layout: LayoutSnapshot) {
        self.dispatch(Message::LayoutChanged(layout));
    }

    /// Pull-style observation: report scroll-activity transitions and the
    /// current layout.
    pub fn poll_viewport(&mut self) {
        self.observe_scroll_activity();
        self.queue
            .push_back(Message::LayoutChanged(self.viewport.layout()));
        self.drain();
    }

    /// Deliver every timer due by `now_ms`, each at its own deadline.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            let slot = fired.timer.slot();
            if slot != TimerSlot::Driver && self.timers.get(&slot) == Some(&fired.id) {
                self.timers.remove(&slot);
            }
            self.dispatch(Message::Timer(fired.timer));
        }
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }

    pub fn close(&mut self) {
        if self.session.is_closed() {
            return;
        }
        self.dispatch(Message::Close);
    }

    fn observe_scroll_activity(&mut self) {
        let in_progress = self.viewport.is_scroll_in_progress();
        if in_progress == self.scroll_in_progress {
            return;
        }
        self.scroll_in_progress = in_progress;
        self.queue.push_back(Message::ScrollActivity {
            in_progress,
            from_driver: self.session.auto_scroll_origin(),
        });
    }

    fn drain(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;
        while let Some(message) = self.queue.pop_front() {
            let action = message.action();
            let now_ms = self.scheduler.now_ms();
            let effects = self.session.reduce(message, now_ms);
            for effect in effects {
                self.run_effect(effect);
            }
            self.notify(action);
        }
        self.draining = false;
    }

    fn notify(&mut self, action: &'static str) {
        if self.observers.is_empty() {
            return;
        }
        let event = SessionEvent {
            action,
            at_ms: self.scheduler.now_ms(),
            snapshot: self.snapshot(),
        };
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartDriver { generation } => {
                self.cancel_slot(TimerSlot::Driver);
                let period = self.session.tuning().tick_period_ms();
                let id = self
                    .scheduler
                    .schedule_every(period, TimerKind::DriverTick { generation });
                self.timers.insert(TimerSlot::Driver, id);
            }
            Effect::StopDriver => self.cancel_slot(TimerSlot::Driver),
            Effect::ScrollBy(delta) => {
                // A touch that began before this tick belongs to the user and
                // wins over the driver.
                self.observe_scroll_activity();
                if self.scroll_in_progress {
                    trace!("Skipping driver scroll during user touch");
                    return;
                }
                self.session.set_auto_scroll_origin(true);
                let consumed = self.viewport.scroll_by(delta);
                self.observe_scroll_activity();
                self.session.set_auto_scroll_origin(false);
                if consumed == 0.0 {
                    trace!(delta, "Viewport rejected driver scroll");
                }
                self.queue
                    .push_back(Message::LayoutChanged(self.viewport.layout()));
            }
            Effect::ScrollToItem { index, offset } => {
                self.viewport.scroll_to_item(index, offset);
                self.queue
                    .push_back(Message::LayoutChanged(self.viewport.layout()));
            }
            Effect::LoadPosition => {
                let saved = self.bridge.restore(self.session.document_key());
                self.queue.push_back(Message::PositionLoaded(saved));
            }
            Effect::SavePosition => {
                if self.viewport.item_count() == 0 {
                    return;
                }
                let position = SavedPosition {
                    item_index: self.viewport.first_visible_index(),
                    pixel_offset: self.viewport.first_visible_offset(),
                };
                let key = self.session.document_key().to_string();
                self.bridge.save(&key, position);
            }
            Effect::Schedule { timer, delay_ms } => {
                let slot = timer.slot();
                self.cancel_slot(slot);
                let id = self.scheduler.schedule_once(delay_ms, timer);
                self.timers.insert(slot, id);
            }
            Effect::Cancel(slot) => self.cancel_slot(slot),
        }
    }

    fn cancel_slot(&mut self, slot: TimerSlot) {
        if let Some(id) = self.timers.remove(&slot) {
            self.scheduler.cancel(id);
        }
    }
}

impl<V, S, C> Drop for AutoScrollController<V, S, C>
where
    V: Viewport,
    S: PositionStore,
    C: Scheduler,
{
    fn drop(&mut self) {
        self.close();
    }
}
