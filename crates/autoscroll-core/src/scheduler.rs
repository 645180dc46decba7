//! Clock and timer collaborator.
//!
//! Timers are not callbacks: the scheduler hands fired [`TimerKind`]s back
//! to the controller, which turns them into messages. That keeps the whole
//! controller on a single execution context and makes simulated time
//! trivial: advancing a [`TimerQueue`] to `t` delivers every timer due by `t`
//! in deadline order, with the clock set to each deadline as it fires.

use crate::messages::TimerKind;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub at_ms: u64,
    pub timer: TimerKind,
}

pub trait Scheduler {
    fn now_ms(&self) -> u64;
    fn schedule_once(&mut self, delay_ms: u64, timer: TimerKind) -> TimerId;
    fn schedule_every(&mut self, period_ms: u64, timer: TimerKind) -> TimerId;
    fn cancel(&mut self, id: TimerId);
    /// Pop the earliest timer due at or before `until_ms`, moving the clock
    /// to its deadline. Returns `None` once nothing else is due, leaving the
    /// clock at `until_ms`.
    fn pop_due(&mut self, until_ms: u64) -> Option<Fired>;
    fn next_deadline(&self) -> Option<u64>;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    timer: TimerKind,
    period_ms: Option<u64>,
}

/// Deadline-ordered timer queue with an explicitly advanced clock.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    entries: BTreeMap<(u64, TimerId), Entry>,
    deadlines: HashMap<TimerId, u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    fn insert(&mut self, due_ms: u64, entry: Entry) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.insert((due_ms, id), entry);
        self.deadlines.insert(id, due_ms);
        id
    }
}

impl Scheduler for TimerQueue {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_once(&mut self, delay_ms: u64, timer: TimerKind) -> TimerId {
        let due = self.now_ms.saturating_add(delay_ms);
        self.insert(
            due,
            Entry {
                timer,
                period_ms: None,
            },
        )
    }

    fn schedule_every(&mut self, period_ms: u64, timer: TimerKind) -> TimerId {
        let period_ms = period_ms.max(1);
        let due = self.now_ms.saturating_add(period_ms);
        self.insert(
            due,
            Entry {
                timer,
                period_ms: Some(period_ms),
            },
        )
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(due) = self.deadlines.remove(&id) {
            self.entries.remove(&(due, id));
        }
    }

    fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let (&(due, id), _) = match self.entries.first_key_value() {
            Some(first) if first.0.0 <= until_ms => first,
            _ => {
                self.now_ms = self.now_ms.max(until_ms);
                return None;
            }
        };
        let entry = self.entries.remove(&(due, id))?;
        self.deadlines.remove(&id);
        self.now_ms = self.now_ms.max(due);
        if let Some(period) = entry.period_ms {
            let next_due = due.saturating_add(period);
            self.entries.insert((next_due, id), entry);
            self.deadlines.insert(id, next_due);
        }
        Some(Fired {
            id,
            at_ms: due,
            timer: entry.timer,
        })
    }

    fn next_deadline(&self) -> Option<u64> {
        self.entries.first_key_value().map(|((due, _), _)| *due)
    }
}
