//! Viewport collaborator and layout geometry.

/// Geometry of one visible item, relative to the viewport start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleItem {
    pub index: usize,
    pub offset: i32,
    pub size: i32,
}

impl VisibleItem {
    pub fn trailing_edge(&self) -> i32 {
        self.offset.saturating_add(self.size)
    }
}

/// What the end-of-document detector needs from a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutSnapshot {
    pub total_items: usize,
    pub last_visible: Option<VisibleItem>,
    pub viewport_end_offset: i32,
}

impl LayoutSnapshot {
    /// True when the last item of the document is fully visible.
    ///
    /// An empty document is vacuously at its end.
    pub fn is_at_end(&self) -> bool {
        if self.total_items == 0 {
            return true;
        }
        match self.last_visible {
            Some(item) => {
                item.index + 1 == self.total_items
                    && item.trailing_edge() <= self.viewport_end_offset
            }
            None => false,
        }
    }
}

/// Scrollable list of document items (one per page).
pub trait Viewport {
    fn item_count(&self) -> usize;
    fn first_visible_index(&self) -> usize;
    fn first_visible_offset(&self) -> i32;
    fn is_scroll_in_progress(&self) -> bool;
    /// Scroll by `delta` pixels and return how much was actually consumed.
    /// Zero means the viewport is pinned at a boundary.
    fn scroll_by(&mut self, delta: f32) -> f32;
    fn scroll_to_item(&mut self, index: usize, offset: i32);
    fn layout(&self) -> LayoutSnapshot;
}

/// In-memory vertical list of fixed-height items.
///
/// Used by the headless harness and by tests; touch input is simulated with
/// [`PagedViewport::begin_drag`] and [`PagedViewport::end_drag`].
#[derive(Debug, Clone)]
pub struct PagedViewport {
    item_heights: Vec<i32>,
    viewport_height: i32,
    scroll_px: f64,
    dragging: bool,
}

impl PagedViewport {
    pub fn new(item_heights: Vec<i32>, viewport_height: i32) -> Self {
        Self {
            item_heights: item_heights.into_iter().map(|h| h.max(0)).collect(),
            viewport_height: viewport_height.max(1),
            scroll_px: 0.0,
            dragging: false,
        }
    }

    pub fn uniform(item_count: usize, item_height: i32, viewport_height: i32) -> Self {
        Self::new(vec![item_height; item_count], viewport_height)
    }

    pub fn scroll_px(&self) -> f64 {
        self.scroll_px
    }

    pub fn content_height(&self) -> i64 {
        self.item_heights.iter().map(|h| i64::from(*h)).sum()
    }

    pub fn max_scroll_px(&self) -> f64 {
        (self.content_height() - i64::from(self.viewport_height)).max(0) as f64
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Move content as a finger drag would; works whether or not a drag is
    /// in progress.
    pub fn drag_by(&mut self, delta: f32) -> f32 {
        self.scroll_by(delta)
    }

    fn item_start(&self, index: usize) -> f64 {
        self.item_heights
            .iter()
            .take(index)
            .map(|h| f64::from(*h))
            .sum()
    }

    fn item_at(&self, position: f64) -> Option<(usize, f64)> {
        let mut start = 0.0;
        for (index, height) in self.item_heights.iter().enumerate() {
            let end = start + f64::from(*height);
            if position < end {
                return Some((index, start));
            }
            start = end;
        }
        None
    }
}

impl Viewport for PagedViewport {
    fn item_count(&self) -> usize {
        self.item_heights.len()
    }

    fn first_visible_index(&self) -> usize {
        self.item_at(self.scroll_px)
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    fn first_visible_offset(&self) -> i32 {
        self.item_at(self.scroll_px)
            .map(|(_, start)| (self.scroll_px - start).floor() as i32)
            .unwrap_or(0)
    }

    fn is_scroll_in_progress(&self) -> bool {
        self.dragging
    }

    fn scroll_by(&mut self, delta: f32) -> f32 {
        if !delta.is_finite() {
            return 0.0;
        }
        let before = self.scroll_px;
        self.scroll_px = (before + f64::from(delta)).clamp(0.0, self.max_scroll_px());
        (self.scroll_px - before) as f32
    }

    fn scroll_to_item(&mut self, index: usize, offset: i32) {
        if self.item_heights.is_empty() {
            return;
        }
        let index = index.min(self.item_heights.len() - 1);
        let target = self.item_start(index) + f64::from(offset.max(0));
        self.scroll_px = target.clamp(0.0, self.max_scroll_px());
    }

    fn layout(&self) -> LayoutSnapshot {
        let visible_end = self.scroll_px + f64::from(self.viewport_height);
        let mut start = 0.0;
        let mut last_visible = None;
        for (index, height) in self.item_heights.iter().enumerate() {
            if start >= visible_end {
                break;
            }
            let end = start + f64::from(*height);
            if end > self.scroll_px {
                last_visible = Some(VisibleItem {
                    index,
                    // Rounded up so a fractional scroll never reports the
                    // trailing edge inside the viewport early.
                    offset: (start - self.scroll_px).ceil() as i32,
                    size: *height,
                });
            }
            start = end;
        }
        LayoutSnapshot {
            total_items: self.item_heights.len(),
            last_visible,
            viewport_end_offset: self.viewport_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total: usize, index: usize, offset: i32, size: i32, end: i32) -> LayoutSnapshot {
        LayoutSnapshot {
            total_items: total,
            last_visible: Some(VisibleItem {
                index,
                offset,
                size,
            }),
            viewport_end_offset: end,
        }
    }

    #[test]
    fn at_end_when_trailing_edge_meets_viewport_end() {
        assert!(snapshot(10, 9, 400, 600, 1000).is_at_end());
        assert!(snapshot(10, 9, 300, 600, 1000).is_at_end());
    }

    #[test]
    fn not_at_end_for_other_items_or_overflow() {
        assert!(!snapshot(10, 8, 300, 600, 1000).is_at_end());
        assert!(!snapshot(10, 9, 401, 600, 1000).is_at_end());
        let empty_view = LayoutSnapshot {
            total_items: 4,
            last_visible: None,
            viewport_end_offset: 1000,
        };
        assert!(!empty_view.is_at_end());
    }

    #[test]
    fn empty_document_is_vacuously_at_end() {
        assert!(LayoutSnapshot::default().is_at_end());
    }

    #[test]
    fn paged_viewport_reports_first_visible_item() {
        let mut viewport = PagedViewport::uniform(5, 1000, 800);
        assert_eq!(viewport.scroll_by(1250.5), 1250.5);
        assert_eq!(viewport.first_visible_index(), 1);
        assert_eq!(viewport.first_visible_offset(), 250);
    }

    #[test]
    fn paged_viewport_rejects_scroll_past_end() {
        let mut viewport = PagedViewport::uniform(3, 1000, 800);
        let consumed = viewport.scroll_by(5000.0);
        assert_eq!(consumed, 2200.0);
        assert_eq!(viewport.scroll_by(10.0), 0.0);
        assert!(viewport.layout().is_at_end());
    }

    #[test]
    fn paged_viewport_layout_tracks_last_visible() {
        let mut viewport = PagedViewport::uniform(3, 1000, 800);
        viewport.scroll_by(500.0);
        let layout = viewport.layout();
        assert_eq!(layout.total_items, 3);
        assert_eq!(
            layout.last_visible,
            Some(VisibleItem {
                index: 1,
                offset: 500,
                size: 1000
            })
        );
        assert!(!layout.is_at_end());
    }

    #[test]
    fn fractional_scroll_short_of_the_end_is_not_at_end() {
        let mut viewport = PagedViewport::uniform(3, 400, 800);
        viewport.scroll_by(399.6);
        let layout = viewport.layout();
        assert_eq!(
            layout.last_visible,
            Some(VisibleItem {
                index: 2,
                offset: 401,
                size: 400
            })
        );
        assert!(!layout.is_at_end());

        viewport.scroll_by(0.4);
        assert_eq!(viewport.scroll_px(), viewport.max_scroll_px());
        assert!(viewport.layout().is_at_end());
    }

    #[test]
    fn scroll_to_item_clamps_into_content() {
        let mut viewport = PagedViewport::uniform(3, 1000, 800);
        viewport.scroll_to_item(1, 120);
        assert_eq!(viewport.first_visible_index(), 1);
        assert_eq!(viewport.first_visible_offset(), 120);
        viewport.scroll_to_item(2, 900);
        assert_eq!(viewport.scroll_px(), viewport.max_scroll_px());
    }
}
