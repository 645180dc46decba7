use crate::generation::Generation;
use crate::speed::SpeedRamp;
use crate::tuning::ScrollTuning;

/// Why autoscroll stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    UserToggle,
    ManualScroll,
    EndOfDocument,
    Closed,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserToggle => "user_toggle",
            Self::ManualScroll => "manual_scroll",
            Self::EndOfDocument => "end_of_document",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live state of one open document.
#[derive(Debug, Clone)]
pub struct ScrollSession {
    pub(crate) tuning: ScrollTuning,
    pub(crate) document_key: String,
    pub(crate) item_count: Option<usize>,
    pub(crate) position_restored: bool,
    pub(crate) is_auto_scrolling: bool,
    pub(crate) target_speed: f32,
    pub(crate) speed: SpeedRamp,
    pub(crate) controls_visible: bool,
    pub(crate) auto_scroll_origin: bool,
    pub(crate) pending_hide_deadline: Option<u64>,
    pub(crate) at_end_transient: bool,
    pub(crate) was_at_end: bool,
    pub(crate) toggle_icon_visible: bool,
    pub(crate) last_stop: Option<StopReason>,
    pub(crate) closed: bool,
    pub(crate) driver_generation: Generation,
    pub(crate) hide_generation: Generation,
    pub(crate) end_generation: Generation,
    pub(crate) icon_generation: Generation,
}

impl ScrollSession {
    pub fn new(document_key: impl Into<String>, tuning: ScrollTuning) -> Self {
        Self {
            tuning,
            document_key: document_key.into(),
            item_count: None,
            position_restored: false,
            is_auto_scrolling: false,
            target_speed: tuning.clamp_speed(tuning.default_speed),
            speed: SpeedRamp::idle(tuning.ease_duration_ms),
            controls_visible: true,
            auto_scroll_origin: false,
            pending_hide_deadline: None,
            at_end_transient: false,
            was_at_end: false,
            toggle_icon_visible: false,
            last_stop: None,
            closed: false,
            driver_generation: Generation::default(),
            hide_generation: Generation::default(),
            end_generation: Generation::default(),
            icon_generation: Generation::default(),
        }
    }

    pub fn document_key(&self) -> &str {
        &self.document_key
    }

    pub fn tuning(&self) -> &ScrollTuning {
        &self.tuning
    }

    pub fn item_count(&self) -> usize {
        self.item_count.unwrap_or(0)
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.is_auto_scrolling
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    pub fn effective_speed(&self, now_ms: u64) -> f32 {
        self.speed.sample(now_ms)
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn auto_scroll_origin(&self) -> bool {
        self.auto_scroll_origin
    }

    pub(crate) fn set_auto_scroll_origin(&mut self, origin: bool) {
        self.auto_scroll_origin = origin;
    }

    pub fn pending_hide_deadline(&self) -> Option<u64> {
        self.pending_hide_deadline
    }

    pub fn at_end_transient(&self) -> bool {
        self.at_end_transient
    }

    pub fn toggle_icon_visible(&self) -> bool {
        self.toggle_icon_visible
    }

    pub fn last_stop(&self) -> Option<StopReason> {
        self.last_stop
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Readout shown next to the speed slider, e.g. `2.3x` for 2.37.
    pub fn speed_label(&self) -> String {
        let truncated = (self.target_speed * 10.0).trunc() / 10.0;
        format!("{truncated:.1}x")
    }

    pub fn snapshot(&self, now_ms: u64, first_visible_index: usize) -> SessionSnapshot {
        SessionSnapshot {
            document_key: self.document_key.clone(),
            item_count: self.item_count(),
            is_auto_scrolling: self.is_auto_scrolling,
            target_speed: self.target_speed,
            effective_speed: self.effective_speed(now_ms),
            speed_label: self.speed_label(),
            controls_visible: self.controls_visible,
            auto_scroll_origin: self.auto_scroll_origin,
            pending_hide_deadline: self.pending_hide_deadline,
            at_end_transient: self.at_end_transient,
            toggle_icon_visible: self.toggle_icon_visible,
            progress: progress_fraction(first_visible_index, self.item_count()),
        }
    }
}

/// Share of the document above the first visible page, in `[0, 1]`.
pub fn progress_fraction(first_visible_index: usize, item_count: usize) -> f32 {
    if item_count == 0 {
        return 0.0;
    }
    (first_visible_index as f32 / item_count as f32).clamp(0.0, 1.0)
}

/// Read-only view handed to observers after every processed message.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub document_key: String,
    pub item_count: usize,
    pub is_auto_scrolling: bool,
    pub target_speed: f32,
    pub effective_speed: f32,
    pub speed_label: String,
    pub controls_visible: bool,
    pub auto_scroll_origin: bool,
    pub pending_hide_deadline: Option<u64>,
    pub at_end_transient: bool,
    pub toggle_icon_visible: bool,
    pub progress: f32,
}

#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub action: &'static str,
    pub at_ms: u64,
    pub snapshot: SessionSnapshot,
}
