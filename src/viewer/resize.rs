//! Interactive row/column resizing from the header layers.
//!
//! A pointer near a header boundary starts a `ResizeSession`; every move
//! applies the pointer delta to the Size Model; release discards the session.

use crate::layout::SizeModel;
use crate::types::Axis;

/// Transient state of an active resize drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    pub axis: Axis,
    /// Row/column being resized
    pub index: u32,
    /// Pointer coordinate (along `axis`) at the previous move
    pub last_pointer: f64,
}

/// Find the row/column whose trailing edge is within `tolerance` of
/// `offset` (an absolute content offset along `axis`).
///
/// The band is symmetric around each boundary: just past the end of cell
/// `i` still resizes `i`. Past the last cell, only the final edge counts.
pub fn hit_zone(sizes: &SizeModel, axis: Axis, offset: f64, tolerance: f64) -> Option<u32> {
    let count = sizes.count(axis);
    if count == 0 || offset < 0.0 || !offset.is_finite() {
        return None;
    }
    let index = sizes.index_at_offset(axis, offset);
    if index >= count {
        let end = sizes.total_extent(axis);
        return (offset - end <= tolerance).then_some(count - 1);
    }

    let trailing = sizes.offset_of(axis, index + 1);
    if trailing - offset <= tolerance {
        return Some(index);
    }
    if index > 0 && offset - sizes.offset_of(axis, index) <= tolerance {
        return Some(index - 1);
    }
    None
}

/// Owner of the (at most one) resize session.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<ResizeSession> {
        self.session
    }

    /// Start resizing `index` on `axis` with the pointer at `pointer`.
    pub fn begin(&mut self, axis: Axis, index: u32, pointer: f64) {
        tracing::debug!(target: "gridview::resize", ?axis, index, "resize started");
        self.session = Some(ResizeSession {
            axis,
            index,
            last_pointer: pointer,
        });
    }

    /// Apply the pointer movement since the last call. Returns true if the
    /// Size Model changed.
    pub fn drag_to(&mut self, pointer: f64, sizes: &mut SizeModel) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let delta = pointer - session.last_pointer;
        if !delta.is_finite() || delta.abs() < f64::EPSILON {
            return false;
        }
        let old = sizes.size_of(session.axis, session.index);
        let new = sizes.set_size(session.axis, session.index, old + delta);
        session.last_pointer = pointer;
        tracing::trace!(target: "gridview::resize", index = session.index, size = new, "resize step");
        (new - old).abs() > f64::EPSILON
    }

    /// Finish the drag, discarding the session.
    pub fn end(&mut self) -> Option<ResizeSession> {
        let session = self.session.take();
        if let Some(s) = &session {
            tracing::debug!(target: "gridview::resize", axis = ?s.axis, index = s.index, "resize finished");
        }
        session
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::GridConfig;
    use test_case::test_case;

    fn sizes() -> SizeModel {
        let config = GridConfig::default();
        SizeModel::new(config.dimensions(), config.min_cell_size)
    }

    #[test_case(194.0 => Some(1) ; "inside tolerance before edge")]
    #[test_case(200.0 => Some(1) ; "on the edge")]
    #[test_case(206.0 => Some(1) ; "inside tolerance after edge")]
    #[test_case(193.0 => None ; "just outside before edge")]
    #[test_case(207.0 => None ; "just outside after edge")]
    #[test_case(150.0 => None ; "middle of cell")]
    #[test_case(3.0 => None ; "leading edge of first column")]
    fn column_zone(offset: f64) -> Option<u32> {
        hit_zone(&sizes(), Axis::Col, offset, 6.0)
    }

    #[test]
    fn last_edge_is_reachable_from_past_the_end() {
        let s = sizes();
        let end = s.total_extent(Axis::Col);
        assert_eq!(hit_zone(&s, Axis::Col, end + 4.0, 6.0), Some(499));
        assert_eq!(hit_zone(&s, Axis::Col, end + 8.0, 6.0), None);
    }

    #[test]
    fn zone_follows_overrides() {
        let mut s = sizes();
        s.set_size(Axis::Row, 0, 50.0);
        assert_eq!(hit_zone(&s, Axis::Row, 48.0, 6.0), Some(0));
        assert_eq!(hit_zone(&s, Axis::Row, 30.0, 6.0), None);
        assert_eq!(hit_zone(&s, Axis::Row, 79.0, 6.0), Some(1));
    }

    #[test]
    fn drag_applies_deltas() {
        let mut s = sizes();
        let mut rc = ResizeController::new();
        rc.begin(Axis::Col, 2, 300.0);
        assert!(rc.is_active());
        assert!(rc.drag_to(340.0, &mut s));
        assert!(rc.drag_to(360.0, &mut s));
        assert_eq!(s.width_of(2), 160.0);
        assert_eq!(s.offset_of(Axis::Col, 3), 360.0);
        assert!(!rc.drag_to(360.0, &mut s));
    }

    #[test]
    fn drag_clamps_to_floor() {
        let mut s = sizes();
        let mut rc = ResizeController::new();
        rc.begin(Axis::Row, 0, 30.0);
        rc.drag_to(-500.0, &mut s);
        assert_eq!(s.height_of(0), 20.0);
    }

    #[test]
    fn end_discards_session() {
        let mut s = sizes();
        let mut rc = ResizeController::new();
        rc.begin(Axis::Col, 0, 100.0);
        let session = rc.end().unwrap();
        assert_eq!(session.index, 0);
        assert!(!rc.is_active());
        assert!(!rc.drag_to(150.0, &mut s));
        assert_eq!(s.override_count(Axis::Col), 0);
        assert_eq!(rc.end(), None);
    }
}
