//! Viewport windowing for continuous scrolling.
//!
//! Only the rows overlapping the viewport (plus an overscan buffer on each
//! side) are handed to the host for rendering. The rendered slice is
//! translated by `top_offset` inside a spacer of `total_height`, so render
//! cost depends on the container size, never on the total row count.

use std::ops::Range;

/// Raw viewport inputs, all in pixels except `overscan` (rows).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Distance scrolled from the top of the content.
    pub scroll_offset: f64,
    /// Height of the visible container.
    pub container_height: f64,
    /// Fixed height of every row.
    pub row_height: f64,
    /// Extra rows rendered above and below the visible area.
    pub overscan: usize,
}

impl ViewportState {
    pub fn new(row_height: f64, overscan: usize) -> Self {
        Self {
            scroll_offset: 0.0,
            container_height: 0.0,
            row_height,
            overscan,
        }
    }
}

/// The slice of rows to render.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportWindow {
    /// First row index to render (inclusive).
    pub start_index: usize,
    /// Last row index to render (exclusive).
    pub end_index: usize,
    /// Vertical translation of the first rendered row.
    pub top_offset: f64,
}

impl ViewportWindow {
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }
}

/// Compute the window of rows to render.
///
/// `start = max(0, floor(offset / row_height) - overscan)`,
/// `end = min(total, ceil((offset + container) / row_height) + overscan)`.
pub fn compute_window(state: &ViewportState, total_rows: usize) -> ViewportWindow {
    let h = state.row_height;
    if total_rows == 0 || h <= 0.0 || !h.is_finite() {
        return ViewportWindow::default();
    }

    let offset = state.scroll_offset.max(0.0);
    let container = state.container_height.max(0.0);

    let first = (offset / h).floor() as usize;
    let last = ((offset + container) / h).ceil() as usize;

    let end_index = last.saturating_add(state.overscan).min(total_rows);
    let start_index = first.saturating_sub(state.overscan).min(end_index);

    ViewportWindow {
        start_index,
        end_index,
        top_offset: start_index as f64 * h,
    }
}

// =============================================================================
// ScrollRequest
// =============================================================================

/// Actions that can be requested on the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRequest {
    /// Scroll by relative amount (positive = down, negative = up).
    Delta(f64),
    /// Scroll to absolute offset.
    ToOffset(f64),
    /// Scroll the minimum amount that makes the row at index fully visible.
    IntoView(usize),
    /// Scroll up by one container height.
    PageUp,
    /// Scroll down by one container height.
    PageDown,
    /// Scroll to top.
    Home,
    /// Scroll to bottom.
    End,
}

// =============================================================================
// Viewport
// =============================================================================

/// Viewport state with a cached window.
///
/// The window is recomputed on scroll, on container resize and when the
/// row count changes; replacing rows with the same count reuses it.
#[derive(Debug, Clone)]
pub struct Viewport {
    state: ViewportState,
    total_rows: usize,
    window: ViewportWindow,
    generation: u64,
}

impl Viewport {
    pub fn new(row_height: f64, overscan: usize) -> Self {
        Self {
            state: ViewportState::new(row_height, overscan),
            total_rows: 0,
            window: ViewportWindow::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// The current window.
    pub fn window(&self) -> ViewportWindow {
        self.window
    }

    /// Number of window recomputations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scroll_offset(&self) -> f64 {
        self.state.scroll_offset
    }

    pub fn container_height(&self) -> f64 {
        self.state.container_height
    }

    pub fn row_height(&self) -> f64 {
        self.state.row_height
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Full content height (spacer height).
    pub fn total_height(&self) -> f64 {
        self.total_rows as f64 * self.state.row_height
    }

    /// Maximum scroll offset (content height - container height).
    pub fn max_offset(&self) -> f64 {
        (self.total_height() - self.state.container_height).max(0.0)
    }

    /// Whether content exceeds the container.
    pub fn can_scroll(&self) -> bool {
        self.total_height() > self.state.container_height
    }

    /// Number of fully visible rows (at least 1).
    pub fn rows_per_page(&self) -> usize {
        if self.state.row_height > 0.0 {
            ((self.state.container_height / self.state.row_height).floor() as usize).max(1)
        } else {
            1
        }
    }

    /// Container resize. Returns true if the window was recomputed.
    pub fn set_container_height(&mut self, height: f64) -> bool {
        if !height.is_finite() {
            return false;
        }
        self.state.container_height = height.max(0.0);
        self.clamp_offset();
        self.recompute();
        true
    }

    /// Row count change. Same count is a no-op.
    pub fn set_total_rows(&mut self, total: usize) -> bool {
        if total == self.total_rows {
            return false;
        }
        self.total_rows = total;
        self.clamp_offset();
        self.recompute();
        true
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.state.overscan = overscan;
        self.recompute();
    }

    /// Apply a scroll request. Returns true if the offset changed.
    pub fn apply(&mut self, request: ScrollRequest) -> bool {
        let old = self.state.scroll_offset;
        let max = self.max_offset();
        let target = match request {
            ScrollRequest::Delta(d) => old + d,
            ScrollRequest::ToOffset(o) => o,
            ScrollRequest::PageUp => old - self.state.container_height,
            ScrollRequest::PageDown => old + self.state.container_height,
            ScrollRequest::Home => 0.0,
            ScrollRequest::End => max,
            ScrollRequest::IntoView(index) => self.offset_for_index(index),
        };
        if !target.is_finite() {
            return false;
        }
        self.state.scroll_offset = target.clamp(0.0, max);
        log::trace!(
            "[viewport] {:?}: offset {} -> {}",
            request,
            old,
            self.state.scroll_offset
        );
        self.recompute();
        self.state.scroll_offset != old
    }

    /// Map a y-coordinate relative to the container top to a row index.
    pub fn row_index_at(&self, y: f64) -> Option<usize> {
        let h = self.state.row_height;
        if !y.is_finite() || y < 0.0 || h <= 0.0 || !h.is_finite() {
            return None;
        }
        let index = ((self.state.scroll_offset + y) / h).floor() as usize;
        (index < self.total_rows).then_some(index)
    }

    fn offset_for_index(&self, index: usize) -> f64 {
        let offset = self.state.scroll_offset;
        if index >= self.total_rows || self.state.container_height <= 0.0 {
            return offset;
        }
        let h = self.state.row_height;
        let row_top = index as f64 * h;
        let row_bottom = row_top + h;
        let container = self.state.container_height;

        if row_top < offset {
            row_top
        } else if row_bottom > offset + container {
            row_bottom - container
        } else {
            offset
        }
    }

    fn clamp_offset(&mut self) {
        self.state.scroll_offset = self.state.scroll_offset.clamp(0.0, self.max_offset());
    }

    fn recompute(&mut self) {
        self.window = compute_window(&self.state, self.total_rows);
        self.generation += 1;
    }
}
