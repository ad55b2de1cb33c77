//! Selection overlay helpers.
//!
//! These helpers keep selection math testable without depending on Canvas APIs.

use super::surface::Surface;
use crate::layout::{SizeModel, Viewport};
use crate::types::{Axis, GridColors, Rect, Selection, SelectionModel};

/// Extra room around the viewport so a border on the exact edge still shows.
const BORDER_MARGIN: f64 = 2.0;

/// Local-coordinate geometry of the selection on the content layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOverlay {
    /// Tinted areas; the anchor cell of a range stays unfilled
    pub fills: Vec<Rect>,
    /// Outline of the whole selection, clipped near the viewport
    pub border: Rect,
}

fn intersect(a: Rect, b: Rect) -> Option<Rect> {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = a.right().min(b.right());
    let y2 = a.bottom().min(b.bottom());
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
}

/// Local rectangle spanning rows `r0..=r1` and columns `c0..=c1`.
fn span_rect(sizes: &SizeModel, viewport: &Viewport, rows: (u32, u32), cols: (u32, u32)) -> Rect {
    let x1 = sizes.offset_of(Axis::Col, cols.0) - viewport.scroll_x;
    let x2 = sizes.offset_of(Axis::Col, cols.1.saturating_add(1)) - viewport.scroll_x;
    let y1 = sizes.offset_of(Axis::Row, rows.0) - viewport.scroll_y;
    let y2 = sizes.offset_of(Axis::Row, rows.1.saturating_add(1)) - viewport.scroll_y;
    Rect::new(x1, y1, x2 - x1, y2 - y1)
}

/// Split `outer` into the parts not covered by `hole` (at most four).
fn subtract(outer: Rect, hole: Rect) -> Vec<Rect> {
    let Some(hole) = intersect(outer, hole) else {
        return vec![outer];
    };
    let mut parts = Vec::with_capacity(4);
    // Above and below the hole, full width
    parts.push(Rect::new(outer.x, outer.y, outer.w, hole.y - outer.y));
    parts.push(Rect::new(outer.x, hole.bottom(), outer.w, outer.bottom() - hole.bottom()));
    // Left and right of the hole, hole height
    parts.push(Rect::new(outer.x, hole.y, hole.x - outer.x, hole.h));
    parts.push(Rect::new(hole.right(), hole.y, outer.right() - hole.right(), hole.h));
    parts.retain(|r| r.w > 0.0 && r.h > 0.0);
    parts
}

/// Compute the overlay for the current selection.
///
/// Returns `None` when nothing is selected or the selection lies entirely
/// outside the viewport.
pub fn selection_overlay(
    selection: &SelectionModel,
    sizes: &SizeModel,
    viewport: &Viewport,
) -> Option<SelectionOverlay> {
    let range = selection.normalized_range()?;
    let bounds = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    let full = span_rect(
        sizes,
        viewport,
        (range.min_row, range.max_row),
        (range.min_col, range.max_col),
    );
    let visible = intersect(full, bounds)?;

    let fills = match selection.selection()? {
        Selection::CellRange {
            anchor_row,
            anchor_col,
            ..
        } => {
            let anchor = span_rect(sizes, viewport, (anchor_row, anchor_row), (anchor_col, anchor_col));
            subtract(full, anchor)
                .into_iter()
                .filter_map(|r| intersect(r, bounds))
                .collect()
        }
        Selection::FullRow { .. } | Selection::FullColumn { .. } => vec![visible],
    };

    let margin = Rect::new(
        -BORDER_MARGIN,
        -BORDER_MARGIN,
        viewport.width + 2.0 * BORDER_MARGIN,
        viewport.height + 2.0 * BORDER_MARGIN,
    );
    let border = intersect(full, margin).unwrap_or(visible);

    Some(SelectionOverlay { fills, border })
}

/// Paint the overlay on top of the content layer.
pub fn draw_selection<S: Surface>(surface: &mut S, overlay: &SelectionOverlay, colors: &GridColors) {
    for fill in &overlay.fills {
        surface.fill_rect(*fill, &colors.selection_fill);
    }
    surface.stroke_rect(overlay.border, &colors.selection_border, 2.0);
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::GridConfig;

    fn setup() -> (SizeModel, Viewport, SelectionModel) {
        let config = GridConfig::default();
        (
            SizeModel::new(config.dimensions(), config.min_cell_size),
            Viewport::new(450.0, 300.0),
            SelectionModel::new(config.total_rows, config.total_cols),
        )
    }

    fn area(rects: &[Rect]) -> f64 {
        rects.iter().map(|r| r.w * r.h).sum()
    }

    #[test]
    fn no_selection_no_overlay() {
        let (sizes, viewport, selection) = setup();
        assert_eq!(selection_overlay(&selection, &sizes, &viewport), None);
    }

    #[test]
    fn single_cell_is_border_only() {
        let (sizes, viewport, mut selection) = setup();
        selection.select_cell(1, 1);
        let overlay = selection_overlay(&selection, &sizes, &viewport).unwrap();
        assert!(overlay.fills.is_empty());
        assert_eq!(overlay.border, Rect::new(100.0, 30.0, 100.0, 30.0));
    }

    #[test]
    fn range_fill_skips_anchor() {
        let (sizes, viewport, mut selection) = setup();
        selection.start_selection(2, 2);
        selection.update_selection(1, 1);
        let overlay = selection_overlay(&selection, &sizes, &viewport).unwrap();
        assert_eq!(overlay.border, Rect::new(100.0, 30.0, 200.0, 60.0));
        assert_eq!(area(&overlay.fills), 200.0 * 60.0 - 100.0 * 30.0);
        assert!(overlay.fills.iter().all(|r| !r.contains(250.0, 75.0)));
    }

    #[test]
    fn follows_resized_columns() {
        let (mut sizes, viewport, mut selection) = setup();
        sizes.set_size(Axis::Col, 0, 160.0);
        selection.select_cell(0, 1);
        let overlay = selection_overlay(&selection, &sizes, &viewport).unwrap();
        assert_eq!(overlay.border.x, 160.0);
    }

    #[test]
    fn full_row_is_clipped_to_viewport() {
        let (sizes, viewport, mut selection) = setup();
        selection.select_row(3);
        let overlay = selection_overlay(&selection, &sizes, &viewport).unwrap();
        assert_eq!(overlay.fills, vec![Rect::new(0.0, 90.0, 450.0, 30.0)]);
        assert_eq!(overlay.border.right(), 452.0);
    }

    #[test]
    fn offscreen_selection_is_skipped() {
        let (sizes, mut viewport, mut selection) = setup();
        selection.select_cell(0, 0);
        viewport.set_scroll(0.0, 3000.0, &sizes);
        assert_eq!(selection_overlay(&selection, &sizes, &viewport), None);
    }
}
