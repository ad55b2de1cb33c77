//! Size model and viewport properties: offset round-trips, scroll clamping,
//! minimal scroll-to-cell.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]

mod common;

use gridview::{Axis, GridConfig, SizeModel, Viewport};
use test_case::test_case;

fn sizes() -> SizeModel {
    let config = GridConfig::default();
    SizeModel::new(config.dimensions(), config.min_cell_size)
}

fn resized_sizes() -> SizeModel {
    let mut sizes = sizes();
    sizes.set_size(Axis::Col, 3, 150.0);
    sizes.set_size(Axis::Col, 7, 40.0);
    sizes.set_size(Axis::Col, 400, 260.0);
    sizes.set_size(Axis::Row, 0, 45.0);
    sizes.set_size(Axis::Row, 99_998, 90.0);
    sizes
}

/// Fractional defaults and overrides, so offsets carry rounding error
fn fractional_sizes() -> SizeModel {
    let config = GridConfig {
        cell_width: 33.3,
        cell_height: 17.7,
        ..GridConfig::default()
    };
    let mut sizes = SizeModel::new(config.dimensions(), config.min_cell_size);
    for i in 0..200u32 {
        sizes.set_size(Axis::Col, i, 20.03 + f64::from(i) * 0.1);
        sizes.set_size(Axis::Row, i * 3, 21.07 + f64::from(i) * 0.01);
    }
    sizes
}

#[test_case(resized_sizes(), Axis::Col ; "columns")]
#[test_case(resized_sizes(), Axis::Row ; "rows")]
#[test_case(fractional_sizes(), Axis::Col ; "fractional columns")]
#[test_case(fractional_sizes(), Axis::Row ; "fractional rows")]
fn offset_round_trip_at_boundaries(sizes: SizeModel, axis: Axis) {
    let indices = (0..50)
        .chain([199, 200, 201, 250, 399, 400, 401, 499])
        .chain([99_997, 99_998, 99_999]);
    for i in indices.filter(|&i| i < sizes.count(axis)) {
        let start = sizes.offset_of(axis, i);
        assert_eq!(sizes.index_at_offset(axis, start), i, "start of {i}");
        let last_pixel = start + sizes.size_of(axis, i) - 0.05;
        assert_eq!(sizes.index_at_offset(axis, last_pixel), i, "inside {i}");
    }
}

#[test]
fn offsets_include_override_deltas() {
    let sizes = resized_sizes();
    assert_eq!(sizes.offset_of(Axis::Col, 3), 300.0);
    assert_eq!(sizes.offset_of(Axis::Col, 4), 450.0);
    assert_eq!(sizes.offset_of(Axis::Col, 8), 790.0);
    assert_eq!(sizes.offset_of(Axis::Row, 1), 45.0);
    assert_eq!(sizes.total_extent(Axis::Col), 500.0 * 100.0 + 50.0 - 60.0 + 160.0);
}

#[test_case(-1.0 => 0 ; "negative offset")]
#[test_case(60_000.0 => 500 ; "past the end")]
fn index_outside_extent(offset: f64) -> u32 {
    resized_sizes().index_at_offset(Axis::Col, offset)
}

#[test]
fn resized_column_shifts_following_offsets() {
    let mut sizes = sizes();
    sizes.set_size(Axis::Col, 2, 160.0);
    assert_eq!(sizes.offset_of(Axis::Col, 3), 360.0);
}

#[test]
fn size_floor_is_enforced() {
    let mut sizes = sizes();
    assert_eq!(sizes.set_size(Axis::Row, 4, 3.0), 20.0);
    assert_eq!(sizes.height_of(4), 20.0);
}

#[test_case(-250.0 => 0.0 ; "below zero")]
#[test_case(0.0 => 0.0 ; "origin")]
#[test_case(1234.5 => 1234.5 ; "in range is kept")]
#[test_case(49_000.0 => 49_000.0 ; "exact max")]
#[test_case(1e12 => 49_000.0 ; "beyond max")]
fn set_scroll_x_is_clamped(target: f64) -> f64 {
    let sizes = sizes();
    let mut viewport = Viewport::new(1000.0, 600.0);
    viewport.set_scroll(target, 0.0, &sizes);
    viewport.scroll_x
}

#[test]
fn max_scroll_matches_content_minus_viewport() {
    let sizes = sizes();
    let viewport = Viewport::new(1000.0, 600.0);
    assert_eq!(viewport.max_scroll_x(&sizes), 49_000.0);
    assert_eq!(viewport.max_scroll_y(&sizes), 2_999_400.0);
}

#[test]
fn scroll_to_origin_on_fresh_viewport() {
    let sizes = sizes();
    let mut viewport = Viewport::new(1000.0, 600.0);
    assert!(!viewport.scroll_to_cell(0, 0, &sizes));
    assert_eq!((viewport.scroll_x, viewport.scroll_y), (0.0, 0.0));
}

#[test_case(50, 20 => (1100.0, 930.0) ; "below and right aligns far edges")]
#[test_case(5, 3 => (0.0, 0.0) ; "already visible")]
#[test_case(99_999, 499 => (49_000.0, 2_999_400.0) ; "last cell")]
fn scroll_to_cell_is_minimal(row: u32, col: u32) -> (f64, f64) {
    let sizes = sizes();
    let mut viewport = Viewport::new(1000.0, 600.0);
    viewport.scroll_to_cell(row, col, &sizes);
    (viewport.scroll_x, viewport.scroll_y)
}

#[test]
fn scroll_to_cell_before_origin_aligns_near_edge() {
    let sizes = sizes();
    let mut viewport = Viewport::new(1000.0, 600.0);
    viewport.set_scroll(5000.0, 9000.0, &sizes);
    viewport.scroll_to_cell(10, 2, &sizes);
    assert_eq!((viewport.scroll_x, viewport.scroll_y), (200.0, 300.0));
}

#[test_case(50, 20 ; "far cell")]
#[test_case(0, 0 ; "origin")]
#[test_case(12_345, 321 ; "deep cell")]
fn scroll_to_cell_is_idempotent(row: u32, col: u32) {
    let sizes = resized_sizes();
    let mut viewport = Viewport::new(1000.0, 600.0);
    viewport.set_scroll(700.0, 4_000.0, &sizes);
    viewport.scroll_to_cell(row, col, &sizes);
    let once = (viewport.scroll_x, viewport.scroll_y);
    assert!(!viewport.scroll_to_cell(row, col, &sizes));
    assert_eq!((viewport.scroll_x, viewport.scroll_y), once);
}

#[test]
fn engine_scroll_renders_only_on_change() {
    let mut engine = common::engine();
    let before = common::frames(&engine);
    assert!(engine.set_scroll(-100.0, 1e12));
    assert_eq!(engine.viewport().scroll_x, 0.0);
    assert_eq!(engine.viewport().scroll_y, 2_999_400.0);
    assert_eq!(common::frames(&engine), before + 1);
    assert!(!engine.set_scroll(0.0, 3e6));
    assert_eq!(common::frames(&engine), before + 1);
}

#[test]
fn deep_scroll_keeps_visible_count_bounded() {
    let mut engine = common::engine();
    engine.set_scroll(0.0, 2_000_010.0);
    assert_eq!(engine.visible_rows(), 20);
    engine.set_scroll(0.0, 2_000_025.0);
    assert_eq!(engine.visible_rows(), 21);
}
