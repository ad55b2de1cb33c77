//! Viewport state management for scrolling.

use super::SizeModel;
use crate::types::{Axis, Rect};

/// Viewport state - the visible window onto the content layer
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Horizontal scroll position in content coordinates
    pub scroll_x: f64,
    /// Vertical scroll position in content coordinates
    pub scroll_y: f64,
    /// Content viewport width in pixels (excludes headers and scrollbars)
    pub width: f64,
    /// Content viewport height in pixels (excludes headers and scrollbars)
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    /// Create a viewport scrolled to the origin
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Scroll offset along `axis`
    pub fn scroll(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.scroll_y,
            Axis::Col => self.scroll_x,
        }
    }

    /// Viewport extent along `axis`
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.height,
            Axis::Col => self.width,
        }
    }

    /// Largest legal scroll offset along `axis`, from the live sizes.
    pub fn max_scroll(&self, axis: Axis, sizes: &SizeModel) -> f64 {
        (sizes.total_extent(axis) - self.extent(axis)).max(0.0)
    }

    pub fn max_scroll_x(&self, sizes: &SizeModel) -> f64 {
        self.max_scroll(Axis::Col, sizes)
    }

    pub fn max_scroll_y(&self, sizes: &SizeModel) -> f64 {
        self.max_scroll(Axis::Row, sizes)
    }

    /// True if further scrolling towards `direction`'s sign is possible.
    pub fn can_scroll(&self, axis: Axis, direction: f64, sizes: &SizeModel) -> bool {
        let scroll = self.scroll(axis);
        if direction < 0.0 {
            scroll > 0.0
        } else if direction > 0.0 {
            scroll < self.max_scroll(axis, sizes)
        } else {
            false
        }
    }

    /// Clamp both axes independently to `[0, max]`.
    pub fn clamp_scroll(&mut self, sizes: &SizeModel) {
        self.scroll_x = self.scroll_x.clamp(0.0, self.max_scroll_x(sizes));
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll_y(sizes));
    }

    /// Set absolute scroll position. Returns true if it changed.
    pub fn set_scroll(&mut self, x: f64, y: f64, sizes: &SizeModel) -> bool {
        let (old_x, old_y) = (self.scroll_x, self.scroll_y);
        self.scroll_x = if x.is_finite() { x } else { old_x };
        self.scroll_y = if y.is_finite() { y } else { old_y };
        self.clamp_scroll(sizes);
        (self.scroll_x - old_x).abs() > f64::EPSILON || (self.scroll_y - old_y).abs() > f64::EPSILON
    }

    /// Set the scroll position of one axis, leaving the other untouched.
    pub fn set_axis_scroll(&mut self, axis: Axis, value: f64, sizes: &SizeModel) -> bool {
        match axis {
            Axis::Row => self.set_scroll(self.scroll_x, value, sizes),
            Axis::Col => self.set_scroll(value, self.scroll_y, sizes),
        }
    }

    /// Scroll by delta amounts
    pub fn scroll_by(&mut self, delta_x: f64, delta_y: f64, sizes: &SizeModel) -> bool {
        self.set_scroll(self.scroll_x + delta_x, self.scroll_y + delta_y, sizes)
    }

    /// Minimal scroll that brings the cell fully into view.
    ///
    /// A cell already in view leaves the scroll untouched; a cell before the
    /// origin aligns its near edge, a cell past the far edge aligns its far
    /// edge. Returns true if the scroll changed.
    pub fn scroll_to_cell(&mut self, row: u32, col: u32, sizes: &SizeModel) -> bool {
        let x = Self::reveal(
            self.scroll_x,
            self.width,
            sizes.offset_of(Axis::Col, col),
            sizes.width_of(col),
        );
        let y = Self::reveal(
            self.scroll_y,
            self.height,
            sizes.offset_of(Axis::Row, row),
            sizes.height_of(row),
        );
        self.set_scroll(x, y, sizes)
    }

    fn reveal(scroll: f64, extent: f64, start: f64, size: f64) -> f64 {
        if start < scroll {
            start
        } else if start + size > scroll + extent {
            start + size - extent
        } else {
            scroll
        }
    }

    /// Resize the viewport and re-clamp the scroll position
    pub fn resize(&mut self, width: f64, height: f64, sizes: &SizeModel) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.clamp_scroll(sizes);
    }

    /// Inclusive range of indices intersecting the viewport along `axis`.
    ///
    /// `None` when the axis is empty or the viewport has no extent.
    pub fn visible_range(&self, axis: Axis, sizes: &SizeModel) -> Option<(u32, u32)> {
        let count = sizes.count(axis);
        let extent = self.extent(axis);
        if count == 0 || extent <= 0.0 {
            return None;
        }
        let scroll = self.scroll(axis);
        let far = scroll + extent;
        let start = sizes.index_at_offset(axis, scroll).min(count - 1);
        let mut end = sizes.index_at_offset(axis, far);
        // A cell starting exactly on the far edge is not visible
        if end > start && sizes.offset_of(axis, end) >= far {
            end -= 1;
        }
        Some((start, end.min(count - 1).max(start)))
    }

    pub fn visible_rows(&self, sizes: &SizeModel) -> Option<(u32, u32)> {
        self.visible_range(Axis::Row, sizes)
    }

    pub fn visible_cols(&self, sizes: &SizeModel) -> Option<(u32, u32)> {
        self.visible_range(Axis::Col, sizes)
    }

    /// Number of rows/columns at least partially visible.
    pub fn visible_count(&self, axis: Axis, sizes: &SizeModel) -> u32 {
        self.visible_range(axis, sizes)
            .map_or(0, |(start, end)| end - start + 1)
    }

    /// Convert content-local coordinates (relative to the content layer's
    /// origin) to absolute content coordinates
    pub fn to_content(&self, local_x: f64, local_y: f64) -> (f64, f64) {
        (local_x + self.scroll_x, local_y + self.scroll_y)
    }

    /// Convert absolute content coordinates to content-local coordinates
    pub fn to_local(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.scroll_x, y - self.scroll_y)
    }

    /// Local rectangle of a cell (may lie partly outside the viewport)
    pub fn cell_rect(&self, row: u32, col: u32, sizes: &SizeModel) -> Rect {
        let (x, y) = self.to_local(sizes.offset_of(Axis::Col, col), sizes.offset_of(Axis::Row, row));
        Rect::new(x, y, sizes.width_of(col), sizes.height_of(row))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::GridConfig;

    fn sizes() -> SizeModel {
        SizeModel::new(GridConfig::default().dimensions(), 20.0)
    }

    #[test]
    fn set_scroll_clamps_each_axis() {
        let s = sizes();
        let mut v = Viewport::new(1000.0, 600.0);
        v.set_scroll(-50.0, 1e12, &s);
        assert_eq!(v.scroll_x, 0.0);
        assert_eq!(v.scroll_y, 3_000_000.0 - 600.0);
    }

    #[test]
    fn in_range_scroll_is_exact() {
        let s = sizes();
        let mut v = Viewport::new(1000.0, 600.0);
        assert!(v.set_scroll(1234.5, 777.25, &s));
        assert_eq!((v.scroll_x, v.scroll_y), (1234.5, 777.25));
        assert!(!v.set_scroll(1234.5, 777.25, &s));
    }

    #[test]
    fn non_finite_scroll_is_ignored() {
        let s = sizes();
        let mut v = Viewport::new(1000.0, 600.0);
        v.set_scroll(10.0, 10.0, &s);
        v.set_scroll(f64::NAN, f64::INFINITY, &s);
        assert_eq!((v.scroll_x, v.scroll_y), (10.0, 10.0));
    }

    #[test]
    fn max_scroll_tracks_overrides() {
        let mut s = sizes();
        let v = Viewport::new(1000.0, 600.0);
        assert_eq!(v.max_scroll_x(&s), 49_000.0);
        s.set_size(Axis::Col, 0, 600.0);
        assert_eq!(v.max_scroll_x(&s), 49_500.0);
    }

    #[test]
    fn content_smaller_than_viewport_cannot_scroll() {
        let config = GridConfig {
            total_rows: 5,
            total_cols: 3,
            ..GridConfig::default()
        };
        let s = SizeModel::new(config.dimensions(), 20.0);
        let mut v = Viewport::new(1000.0, 600.0);
        assert_eq!(v.max_scroll_x(&s), 0.0);
        v.scroll_by(500.0, 500.0, &s);
        assert_eq!((v.scroll_x, v.scroll_y), (0.0, 0.0));
    }

    #[test]
    fn scroll_to_cell_is_minimal() {
        let s = sizes();
        let mut v = Viewport::new(1000.0, 600.0);
        // Already visible: untouched
        assert!(!v.scroll_to_cell(5, 5, &s));
        // Below the viewport: bottom edge aligned
        v.scroll_to_cell(30, 0, &s);
        assert_eq!(v.scroll_y, 31.0 * 30.0 - 600.0);
        // Above: top edge aligned
        v.scroll_to_cell(2, 0, &s);
        assert_eq!(v.scroll_y, 60.0);
        // Right of viewport
        v.scroll_to_cell(2, 12, &s);
        assert_eq!(v.scroll_x, 1300.0 - 1000.0);
    }

    #[test]
    fn visible_range_culls() {
        let s = sizes();
        let mut v = Viewport::new(1000.0, 600.0);
        assert_eq!(v.visible_cols(&s), Some((0, 9)));
        assert_eq!(v.visible_rows(&s), Some((0, 19)));
        v.set_scroll(50.0, 15.0, &s);
        assert_eq!(v.visible_cols(&s), Some((0, 10)));
        assert_eq!(v.visible_rows(&s), Some((0, 20)));
        assert_eq!(v.visible_count(Axis::Col, &s), 11);
    }

    #[test]
    fn visible_range_at_end_of_grid() {
        let s = sizes();
        let mut v = Viewport::new(1000.0, 600.0);
        v.set_scroll(1e12, 1e12, &s);
        assert_eq!(v.visible_cols(&s), Some((490, 499)));
        assert_eq!(v.visible_rows(&s), Some((99_980, 99_999)));
    }

    #[test]
    fn resize_reclamps() {
        let s = sizes();
        let mut v = Viewport::new(1000.0, 600.0);
        v.set_scroll(1e12, 0.0, &s);
        v.resize(2000.0, 600.0, &s);
        assert_eq!(v.scroll_x, 48_000.0);
    }

    #[test]
    fn empty_viewport_has_no_visible_range() {
        let s = sizes();
        let v = Viewport::new(0.0, 0.0);
        assert_eq!(v.visible_cols(&s), None);
        assert_eq!(v.visible_count(Axis::Row, &s), 0);
    }
}
