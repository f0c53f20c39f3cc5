//! Windowed rendering of long, fixed-height lists.
//!
//! Provides the slice of a list that has to be instantiated for a given
//! scroll position, plus the spacer heights that keep the scroll container
//! the same total height as if every row were rendered. This is a pure data
//! component that knows nothing about rendering.

use std::ops::Range;

/// Extra rows rendered above and below the visible window.
pub const DEFAULT_OVERSCAN: usize = 2;

/// The part of a list to render for one scroll position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSlice {
    /// Indices of the rows to render (half-open).
    pub visible: Range<usize>,
    /// Height of the placeholder before the first rendered row.
    pub spacer_above: usize,
    /// Height of the placeholder after the last rendered row.
    pub spacer_below: usize,
}

impl WindowSlice {
    /// Window over an empty list.
    pub fn empty() -> Self {
        Self {
            visible: 0..0,
            spacer_above: 0,
            spacer_below: 0,
        }
    }

    /// Index of the first rendered row.
    pub fn start(&self) -> usize {
        self.visible.start
    }

    /// Index of the last rendered row, if any row is rendered.
    pub fn end(&self) -> Option<usize> {
        self.visible.end.checked_sub(1).filter(|_| !self.visible.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// The rendered part of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.visible.end.min(items.len());
        let start = self.visible.start.min(end);
        &items[start..end]
    }
}

/// Window geometry for a virtual list with fixed row height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindow {
    /// Height of a single row, in pixels.
    pub row_height: usize,
    /// Number of rows the viewport shows at once.
    pub window_size: usize,
    /// Rows rendered beyond the window in each direction.
    pub overscan: usize,
}

impl VirtualWindow {
    pub fn new(row_height: usize, window_size: usize) -> Self {
        Self {
            row_height,
            window_size,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Index of the row under `offset` pixels from the top of the list.
    pub fn row_at(&self, offset: usize) -> usize {
        if self.row_height == 0 {
            return 0;
        }
        offset / self.row_height
    }

    /// Full scroll height of a list with `total_items` rows.
    pub fn total_height(&self, total_items: usize) -> usize {
        total_items.saturating_mul(self.row_height)
    }

    /// Compute the rows to render for `total_items` rows scrolled to
    /// `scroll_offset` pixels.
    ///
    /// The first rendered row is never past the last row, so a list that
    /// shrank under a stale scroll offset still shows its tail.
    pub fn compute(&self, total_items: usize, scroll_offset: usize) -> WindowSlice {
        if total_items == 0 {
            return WindowSlice::empty();
        }

        let last = total_items - 1;
        let start = self
            .row_at(scroll_offset)
            .saturating_sub(self.overscan)
            .min(last);
        let end = start
            .saturating_add(self.window_size)
            .saturating_add(self.overscan.saturating_mul(2))
            .min(last);

        WindowSlice {
            visible: start..end + 1,
            spacer_above: start.saturating_mul(self.row_height),
            spacer_below: (last - end).saturating_mul(self.row_height),
        }
    }
}

/// Coalesces scroll events so the window is recomputed at most once per
/// display frame.
///
/// Every scroll event only records the newest offset. The renderer calls
/// [`ScrollThrottle::on_frame`] once per frame and recomputes only when it
/// returns a new offset.
#[derive(Debug, Clone, Default)]
pub struct ScrollThrottle {
    applied: usize,
    pending: Option<usize>,
}

impl ScrollThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll event. Returns true when a frame callback has to be
    /// requested, i.e. no update was pending yet.
    pub fn on_scroll(&mut self, offset: usize) -> bool {
        let needs_frame = self.pending.is_none();
        self.pending = Some(offset);
        needs_frame
    }

    /// Apply the latest recorded offset. Returns it when it differs from the
    /// offset applied on the previous frame.
    pub fn on_frame(&mut self) -> Option<usize> {
        let offset = self.pending.take()?;
        if offset == self.applied {
            return None;
        }
        self.applied = offset;
        Some(offset)
    }

    /// Offset the window is currently computed for.
    pub fn offset(&self) -> usize {
        self.applied
    }
}
