//! Auto-scroll controller for paginated document viewers.
//!
//! The controller is a plain state machine: inputs arrive as [`Message`]s,
//! [`ScrollSession::reduce`] turns them into state changes plus a list of
//! [`Effect`]s, and [`AutoScrollController`] performs those effects against
//! the injected collaborators:
//! - a [`Viewport`] that can scroll and report its layout,
//! - a [`PositionStore`] that remembers where each document was left,
//! - a [`Scheduler`] that delivers the periodic tick and one-shot timers.
//!
//! Nothing here depends on a UI toolkit. [`PagedViewport`] and
//! [`TimerQueue`] are in-memory implementations usable both by headless
//! front-ends and by tests driving a simulated clock.

mod error;
mod generation;
mod messages;
mod runtime;
mod scheduler;
mod session;
mod speed;
mod store;
mod tuning;
mod update;
mod viewport;

pub use error::StoreError;
pub use generation::Generation;
pub use messages::{Message, TimerKind, TimerSlot};
pub use runtime::AutoScrollController;
pub use scheduler::{Fired, Scheduler, TimerId, TimerQueue};
pub use session::{ScrollSession, SessionEvent, SessionSnapshot, StopReason, progress_fraction};
pub use speed::{SpeedRamp, smoothstep};
pub use store::{MemoryPositionStore, PositionBridge, PositionStore, SavedPosition};
pub use tuning::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, ScrollTuning};
pub use update::Effect;
pub use viewport::{LayoutSnapshot, PagedViewport, Viewport, VisibleItem};
