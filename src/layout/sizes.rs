//! Row heights and column widths.
//!
//! Every row/column has the default size unless the user resized it, in which
//! case the override lives in a sparse ordered map. Offsets are computed from
//! the default multiplied out plus the sum of override deltas, so a lookup
//! costs O(overrides) rather than O(index).

use std::collections::BTreeMap;

use crate::types::{Axis, GridDimensions};

/// Sparse size table for both axes.
#[derive(Debug, Clone)]
pub struct SizeModel {
    dims: GridDimensions,
    min_size: f64,
    col_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
}

impl SizeModel {
    /// Create a size model where every row/column has the default size.
    pub fn new(dims: GridDimensions, min_size: f64) -> Self {
        Self {
            dims,
            min_size,
            col_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Smallest size a row/column can be set to.
    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Number of rows or columns on `axis`.
    pub fn count(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Row => self.dims.total_rows,
            Axis::Col => self.dims.total_cols,
        }
    }

    pub fn default_size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.dims.default_cell_height,
            Axis::Col => self.dims.default_cell_width,
        }
    }

    fn overrides(&self, axis: Axis) -> &BTreeMap<u32, f64> {
        match axis {
            Axis::Row => &self.row_heights,
            Axis::Col => &self.col_widths,
        }
    }

    /// Size of one row/column.
    pub fn size_of(&self, axis: Axis, index: u32) -> f64 {
        self.overrides(axis)
            .get(&index)
            .copied()
            .unwrap_or_else(|| self.default_size(axis))
    }

    pub fn width_of(&self, col: u32) -> f64 {
        self.size_of(Axis::Col, col)
    }

    pub fn height_of(&self, row: u32) -> f64 {
        self.size_of(Axis::Row, row)
    }

    /// True if the row/column was resized by the user.
    pub fn has_override(&self, axis: Axis, index: u32) -> bool {
        self.overrides(axis).contains_key(&index)
    }

    /// Sum of the sizes of every row/column before `index`.
    ///
    /// `index == count` yields the total extent.
    pub fn offset_of(&self, axis: Axis, index: u32) -> f64 {
        let index = index.min(self.count(axis));
        let default = self.default_size(axis);
        let delta: f64 = self
            .overrides(axis)
            .range(..index)
            .map(|(_, size)| size - default)
            .sum();
        f64::from(index) * default + delta
    }

    /// Index of the row/column containing `offset`.
    ///
    /// Boundaries belong to the following cell. Negative offsets map to 0;
    /// offsets at or past the content end return `count` (no cell).
    pub fn index_at_offset(&self, axis: Axis, offset: f64) -> u32 {
        let count = self.count(axis);
        if offset <= 0.0 {
            return 0;
        }
        let mut index = self.walk_to_offset(axis, offset).min(count);
        // The walk accumulates in a different order than `offset_of`; snap to
        // its boundaries so the two stay exact inverses.
        while index > 0 && offset < self.offset_of(axis, index) {
            index -= 1;
        }
        while index < count && offset >= self.offset_of(axis, index + 1) {
            index += 1;
        }
        index
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn walk_to_offset(&self, axis: Axis, offset: f64) -> u32 {
        let default = self.default_size(axis);
        let steps = |pos: f64| ((offset - pos) / default).floor().min(f64::from(u32::MAX)) as u32;

        let mut pos = 0.0;
        let mut next = 0u32;
        for (&index, &size) in self.overrides(axis) {
            let run_end = pos + f64::from(index - next) * default;
            if offset < run_end {
                return next.saturating_add(steps(pos));
            }
            if offset < run_end + size {
                return index;
            }
            pos = run_end + size;
            next = index + 1;
        }
        next.saturating_add(steps(pos))
    }

    /// Total content extent along `axis`.
    pub fn total_extent(&self, axis: Axis) -> f64 {
        self.offset_of(axis, self.count(axis))
    }

    /// Store a new size, clamped to the minimum floor. Returns the stored size.
    pub fn set_size(&mut self, axis: Axis, index: u32, size: f64) -> f64 {
        if index >= self.count(axis) {
            return self.size_of(axis, index);
        }
        let size = size.max(self.min_size);
        match axis {
            Axis::Row => self.row_heights.insert(index, size),
            Axis::Col => self.col_widths.insert(index, size),
        };
        size
    }

    /// Forget every user resize on both axes.
    pub fn clear_overrides(&mut self) {
        self.col_widths.clear();
        self.row_heights.clear();
    }

    /// Number of resized rows/columns on `axis`.
    pub fn override_count(&self, axis: Axis) -> usize {
        self.overrides(axis).len()
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
    fn defaults() {
        let s = sizes();
        assert_eq!(s.width_of(0), 100.0);
        assert_eq!(s.height_of(99_999), 30.0);
        assert_eq!(s.offset_of(Axis::Col, 3), 300.0);
        assert_eq!(s.total_extent(Axis::Col), 50_000.0);
        assert_eq!(s.total_extent(Axis::Row), 3_000_000.0);
    }

    #[test]
    fn resized_column_shifts_following_offsets() {
        let mut s = sizes();
        s.set_size(Axis::Col, 2, 160.0);
        assert_eq!(s.offset_of(Axis::Col, 2), 200.0);
        assert_eq!(s.offset_of(Axis::Col, 3), 360.0);
        assert_eq!(s.total_extent(Axis::Col), 50_060.0);
        assert_eq!(s.offset_of(Axis::Row, 3), 90.0, "rows are independent");
    }

    #[test]
    fn set_size_clamps_to_floor() {
        let mut s = sizes();
        assert_eq!(s.set_size(Axis::Row, 4, 3.0), 20.0);
        assert_eq!(s.height_of(4), 20.0);
        assert!(s.has_override(Axis::Row, 4));
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let mut s = sizes();
        s.set_size(Axis::Col, 500, 300.0);
        assert_eq!(s.override_count(Axis::Col), 0);
    }

    #[test]
    fn index_at_offset_inside_and_on_boundaries() {
        let mut s = sizes();
        s.set_size(Axis::Col, 1, 50.0);
        s.set_size(Axis::Col, 4, 250.0);
        // 0:[0,100) 1:[100,150) 2:[150,250) 3:[250,350) 4:[350,600) 5:[600,700)
        assert_eq!(s.index_at_offset(Axis::Col, -10.0), 0);
        assert_eq!(s.index_at_offset(Axis::Col, 99.9), 0);
        assert_eq!(s.index_at_offset(Axis::Col, 100.0), 1);
        assert_eq!(s.index_at_offset(Axis::Col, 149.0), 1);
        assert_eq!(s.index_at_offset(Axis::Col, 150.0), 2);
        assert_eq!(s.index_at_offset(Axis::Col, 349.0), 3);
        assert_eq!(s.index_at_offset(Axis::Col, 350.0), 4);
        assert_eq!(s.index_at_offset(Axis::Col, 599.0), 4);
        assert_eq!(s.index_at_offset(Axis::Col, 600.0), 5);
        assert_eq!(s.index_at_offset(Axis::Col, 1000.0), 9);
    }

    #[test]
    fn index_past_end_is_count() {
        let s = sizes();
        let total = s.total_extent(Axis::Col);
        assert_eq!(s.index_at_offset(Axis::Col, total), 500);
        assert_eq!(s.index_at_offset(Axis::Col, total + 1e9), 500);
        assert_eq!(s.index_at_offset(Axis::Col, total - 1.0), 499);
    }

    #[test]
    fn fractional_sizes_round_trip_at_boundaries() {
        let mut s = sizes();
        for col in 0..200u32 {
            s.set_size(Axis::Col, col, 20.03 + f64::from(col) * 0.1);
        }
        for col in 0..=250 {
            assert_eq!(s.index_at_offset(Axis::Col, s.offset_of(Axis::Col, col)), col);
        }
    }

    #[test]
    fn clear_overrides_restores_defaults() {
        let mut s = sizes();
        s.set_size(Axis::Col, 0, 300.0);
        s.set_size(Axis::Row, 0, 300.0);
        s.clear_overrides();
        assert_eq!(s.width_of(0), 100.0);
        assert_eq!(s.height_of(0), 30.0);
    }
}
