use crate::generation::Generation;
use crate::store::SavedPosition;
use crate::viewport::LayoutSnapshot;

/// Timers the session schedules, each stamped with the generation of its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    DriverTick { generation: Generation },
    HideControls { generation: Generation },
    ClearEndNotice { generation: Generation },
    HideToggleIcon { generation: Generation },
}

/// At most one timer is pending per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    Driver,
    Controls,
    EndNotice,
    ToggleIcon,
}

impl TimerSlot {
    pub const ALL: [TimerSlot; 4] = [
        TimerSlot::Driver,
        TimerSlot::Controls,
        TimerSlot::EndNotice,
        TimerSlot::ToggleIcon,
    ];
}

impl TimerKind {
    pub fn slot(&self) -> TimerSlot {
        match self {
            Self::DriverTick { .. } => TimerSlot::Driver,
            Self::HideControls { .. } => TimerSlot::Controls,
            Self::ClearEndNotice { .. } => TimerSlot::EndNotice,
            Self::HideToggleIcon { .. } => TimerSlot::ToggleIcon,
        }
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The document's page count became known.
    DocumentLoaded { item_count: usize },
    /// Result of the one-time position lookup.
    PositionLoaded(Option<SavedPosition>),
    /// Single tap on the page area: toggles autoscroll and flashes the
    /// play/pause indicator.
    TapContent,
    ToggleAutoScroll,
    SetAutoScroll(bool),
    SetSpeed(f32),
    ResetSpeed,
    /// Double tap on the page area.
    ToggleControls,
    /// Tap on the hotspot shown while controls are hidden.
    ShowControls,
    /// Any touch on the control panel.
    ControlsTouched,
    /// The viewport's scroll-in-progress flag changed. `from_driver` is the
    /// origin flag as it was when the change was observed.
    ScrollActivity { in_progress: bool, from_driver: bool },
    LayoutChanged(LayoutSnapshot),
    Timer(TimerKind),
    Close,
}

impl Message {
    pub fn action(&self) -> &'static str {
        match self {
            Self::DocumentLoaded { .. } => "document_loaded",
            Self::PositionLoaded(_) => "position_loaded",
            Self::TapContent => "tap_content",
            Self::ToggleAutoScroll => "toggle_auto_scroll",
            Self::SetAutoScroll(_) => "set_auto_scroll",
            Self::SetSpeed(_) => "set_speed",
            Self::ResetSpeed => "reset_speed",
            Self::ToggleControls => "toggle_controls",
            Self::ShowControls => "show_controls",
            Self::ControlsTouched => "controls_touched",
            Self::ScrollActivity { .. } => "scroll_activity",
            Self::LayoutChanged(_) => "layout_changed",
            Self::Timer(TimerKind::DriverTick { .. }) => "driver_tick",
            Self::Timer(TimerKind::HideControls { .. }) => "hide_controls_elapsed",
            Self::Timer(TimerKind::ClearEndNotice { .. }) => "end_notice_elapsed",
            Self::Timer(TimerKind::HideToggleIcon { .. }) => "toggle_icon_elapsed",
            Self::Close => "close",
        }
    }
}
