//! End-to-end pointer, keyboard and wheel scenarios driven through the
//! headless engine.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::indexing_slicing
)]

mod common;

use common::{cell_center, column_edge};
use gridview::types::{CellRange, Selection};
use gridview::{Axis, HitTarget, KeyOutcome};
use test_case::test_case;

// ============================================================================
// Selection
// ============================================================================

#[test]
fn drag_select_normalizes_regardless_of_direction() {
    let mut engine = common::engine();
    let (x0, y0) = cell_center(5, 5);
    let (x1, y1) = cell_center(2, 2);

    let down = engine.pointer_down(x0, y0);
    assert!(down.capture_pointer);
    let moved = engine.pointer_move(x1, y1);
    assert!(moved.rendered);
    assert!(!moved.start_auto_scroll);
    engine.pointer_up();

    let range = engine.selection().normalized_range().unwrap();
    assert_eq!(
        range,
        CellRange {
            min_row: 2,
            max_row: 5,
            min_col: 2,
            max_col: 5
        }
    );
    assert_eq!(engine.selection().anchor(), Some((5, 5)));
    assert!(!engine.selection().is_selecting());
}

#[test_case((0, 0), (9, 9) ; "down right")]
#[test_case((9, 9), (0, 0) ; "up left")]
#[test_case((0, 9), (9, 0) ; "down left")]
#[test_case((9, 0), (0, 9) ; "up right")]
fn normalized_bounds_are_ordered(anchor: (u32, u32), focus: (u32, u32)) {
    let mut engine = common::engine();
    engine.select_range(anchor, focus);
    let range = engine.selection().normalized_range().unwrap();
    assert!(range.min_row <= range.max_row);
    assert!(range.min_col <= range.max_col);
    assert_eq!((range.row_count(), range.col_count()), (10, 10));
}

#[test]
fn select_row_is_a_full_row_only() {
    let mut engine = common::engine();
    engine.select_row(7);
    let selection = engine.selection();
    assert!(selection.is_row_selected(7));
    assert!(!selection.is_row_selected(8));
    assert!((0..engine.total_cols()).all(|c| !selection.is_column_selected(c)));
    assert_eq!(
        selection.normalized_range(),
        Some(CellRange {
            min_row: 7,
            max_row: 7,
            min_col: 0,
            max_col: 499
        })
    );
}

#[test]
fn header_clicks_select_whole_lines() {
    let mut engine = common::engine();
    engine.pointer_down(400.0, 10.0);
    assert_eq!(engine.selection().selection(), Some(Selection::FullColumn { col: 3 }));
    engine.pointer_up();

    engine.pointer_down(20.0, 30.0 + 4.0 * 30.0 + 15.0);
    assert_eq!(engine.selection().selection(), Some(Selection::FullRow { row: 4 }));
}

#[test]
fn header_press_during_drag_is_ignored() {
    let mut engine = common::engine();
    let (x, y) = cell_center(3, 3);
    engine.pointer_down(x, y);
    let outcome = engine.pointer_down(400.0, 10.0);
    assert!(!outcome.rendered);
    assert!(engine.selection().is_selecting());
    assert!(matches!(engine.selection().selection(), Some(Selection::CellRange { .. })));
}

#[test]
fn select_ref_selects_and_reveals() {
    let mut engine = common::engine();
    engine.select_ref("C200:E210").unwrap();
    assert_eq!(engine.selection().anchor(), Some((199, 2)));
    assert_eq!(engine.selection().focus(), Some((209, 4)));
    assert_eq!(engine.viewport().scroll_y, 199.0 * 30.0 + 30.0 - 600.0);

    assert!(engine.select_ref("not a ref").is_err());
    assert!(engine.select_ref("ZZZ1").is_err(), "column past the grid");
    assert_eq!(engine.selection().anchor(), Some((199, 2)), "failed refs keep the selection");
}

// ============================================================================
// Resize
// ============================================================================

#[test_case(column_edge(1) - 6.0 => HitTarget::ColumnResize(1) ; "edge minus 6")]
#[test_case(column_edge(1) + 6.0 => HitTarget::ColumnResize(1) ; "edge plus 6")]
#[test_case(column_edge(1) - 7.0 => HitTarget::ColumnHeader(1) ; "edge minus 7")]
#[test_case(column_edge(1) + 7.0 => HitTarget::ColumnHeader(2) ; "edge plus 7")]
fn column_resize_zone_is_symmetric(x: f64) -> HitTarget {
    common::engine().hit_test(x, 10.0)
}

#[test_case(54.0 => HitTarget::RowResize(0) ; "edge minus 6")]
#[test_case(66.0 => HitTarget::RowResize(0) ; "edge plus 6")]
#[test_case(53.0 => HitTarget::RowHeader(0) ; "edge minus 7")]
#[test_case(67.0 => HitTarget::RowHeader(1) ; "edge plus 7")]
fn row_resize_zone_is_symmetric(y: f64) -> HitTarget {
    common::engine().hit_test(20.0, y)
}

#[test]
fn widening_column_two_shifts_column_three() {
    let mut engine = common::engine();
    let edge = column_edge(2);
    let down = engine.pointer_down(edge, 10.0);
    assert!(down.capture_pointer);
    assert!(engine.is_resizing());

    assert!(engine.pointer_move(edge + 60.0, 10.0).rendered);
    engine.pointer_up();

    assert!(!engine.is_resizing());
    assert_eq!(engine.width_of(2), 160.0);
    assert_eq!(engine.sizes().offset_of(Axis::Col, 3), 360.0);
    assert_eq!(engine.selection().selection(), None, "resize does not select");
}

#[test]
fn row_resize_respects_floor() {
    let mut engine = common::engine();
    engine.pointer_down(20.0, 60.0);
    engine.pointer_move(20.0, 0.0);
    engine.pointer_up();
    assert_eq!(engine.height_of(0), 20.0);
}

#[test]
fn programmatic_resize_reclamps_scroll() {
    let mut engine = common::small_engine(40, 12);
    engine.set_scroll(200.0, 600.0);
    engine.set_size(Axis::Col, 11, 20.0);
    assert_eq!(engine.viewport().scroll_x, 120.0);
}

// ============================================================================
// Auto-scroll
// ============================================================================

#[test]
fn auto_scroll_stops_at_the_limit() {
    let mut engine = common::small_engine(40, 12);
    let max_y = engine.viewport().max_scroll_y(engine.sizes());
    assert_eq!(max_y, 600.0);

    let (x, y) = cell_center(5, 5);
    engine.pointer_down(x, y);
    let outcome = engine.pointer_move(x, 620.0);
    assert!(outcome.start_auto_scroll);
    assert!(engine.is_auto_scrolling());

    let mut ticks = 0;
    while engine.auto_scroll_tick() {
        ticks += 1;
        assert!(engine.viewport().scroll_y <= max_y);
        assert!(ticks < 1000, "loop never stopped");
    }
    assert_eq!(engine.viewport().scroll_y, max_y);
    assert_eq!(engine.viewport().scroll_x, 0.0);
    assert!(!engine.is_auto_scrolling());

    // Holding the pointer in the band after the stop changes nothing
    assert!(!engine.auto_scroll_tick());
    assert_eq!(engine.viewport().scroll_y, max_y);

    // The focus followed the content under the still pointer
    assert_eq!(engine.selection().focus(), Some((39, 5)));
    engine.pointer_up();
    assert!(!engine.selection().is_selecting());
}

#[test]
fn pointer_up_cancels_auto_scroll() {
    let mut engine = common::engine();
    let (x, y) = cell_center(5, 5);
    engine.pointer_down(x, y);
    assert!(engine.pointer_move(x, 625.0).start_auto_scroll);
    assert!(engine.auto_scroll_tick());
    let scrolled = engine.viewport().scroll_y;

    engine.pointer_up();
    assert!(!engine.is_auto_scrolling());
    assert!(!engine.auto_scroll_tick());
    assert_eq!(engine.viewport().scroll_y, scrolled);
}

// ============================================================================
// Wheel, scrollbars, keyboard
// ============================================================================

#[test]
fn wheel_scrolls_with_multiplier() {
    let mut engine = common::engine();
    assert!(engine.wheel(500.0, 300.0, 10.0, 100.0));
    assert_eq!(engine.viewport().scroll_x, 30.0);
    assert_eq!(engine.viewport().scroll_y, 300.0);
    assert!(engine.wheel(500.0, 300.0, -1000.0, 0.0));
    assert_eq!(engine.viewport().scroll_x, 0.0, "clamped at the origin");
    assert!(!engine.wheel(500.0, 300.0, -10.0, 0.0));
}

#[test]
fn thumbs_reflect_content_size() {
    let engine = common::engine();
    let vertical = engine.scrollbars().vertical.thumb().unwrap();
    assert_eq!(vertical.length, 20.0, "clamped to the minimum length");
    assert_eq!(vertical.position, 0.0);

    let horizontal = engine.scrollbars().horizontal.thumb().unwrap();
    assert_eq!(horizontal.length, 20.0);

    let small = common::small_engine(10, 5);
    assert!(small.scrollbars().vertical.thumb().is_none(), "content fits");
    assert!(!small.scrollbars().corner_visible());
}

#[test]
fn arrow_keys_move_from_a1() {
    let mut engine = common::engine();
    assert_eq!(engine.key_down("ArrowDown", false, false), KeyOutcome::Handled);
    assert_eq!(engine.selection().anchor(), Some((0, 0)), "first press selects A1");

    engine.key_down("ArrowDown", false, false);
    engine.key_down("ArrowRight", false, false);
    assert_eq!(engine.selection().anchor(), Some((1, 1)));

    engine.key_down("ArrowRight", true, false);
    engine.key_down("ArrowDown", true, false);
    assert_eq!(engine.selection().anchor(), Some((1, 1)));
    assert_eq!(engine.selection().focus(), Some((2, 2)));

    assert_eq!(engine.key_down("x", false, false), KeyOutcome::Ignored);
}

#[test]
fn end_key_reveals_last_column() {
    let mut engine = common::engine();
    engine.select_cell(3, 0);
    engine.key_down("End", false, false);
    assert_eq!(engine.selection().anchor(), Some((3, 499)));
    assert_eq!(engine.viewport().scroll_x, 49_000.0);
}

// ============================================================================
// Data
// ============================================================================

#[test]
fn empty_value_deletes_cell() {
    let mut engine = common::engine();
    engine.set_cell_data(10, 3, "hello");
    assert_eq!(engine.get_cell_data(10, 3), "hello");
    assert_eq!(engine.cells().len(), 1);

    engine.set_cell_data(10, 3, "");
    assert_eq!(engine.get_cell_data(10, 3), "");
    assert!(engine.cells().is_empty());
}

#[test]
fn json_import_then_copy() {
    let mut engine = common::engine();
    let summary = engine
        .load_json(r#"[{"name":"Ada","age":36},{"name":"Linus","age":54,"note":"a\tb"}]"#)
        .unwrap();
    assert_eq!((summary.columns, summary.rows), (3, 2));
    assert_eq!(engine.get_cell_data(0, 2), "note");
    assert_eq!(engine.get_cell_data(1, 1), "36");

    engine.select_ref("A1:C20").unwrap();
    assert_eq!(
        engine.key_down("c", false, true),
        KeyOutcome::Copy("name\tage\tnote\nAda\t36\t\nLinus\t54\t\"a\tb\"".to_string())
    );
}

#[test]
fn visible_cells_are_drawn() {
    let mut engine = common::engine();
    engine.set_cell_data(0, 0, "top-left");
    engine.set_cell_data(500, 0, "far below");
    let texts = engine.layers().content.texts();
    assert!(texts.contains(&"top-left"));
    assert!(!texts.contains(&"far below"));

    engine.scroll_to_cell(500, 0);
    assert!(engine.layers().content.texts().contains(&"far below"));
}
