//! Virtualized rendering of the three grid layers.
//!
//! This module provides:
//! - The `Surface` drawing abstraction (+ a recording implementation)
//! - Column header, row header and content layer renderers
//! - Selection overlay geometry, testable without a canvas
//! - A Canvas 2D surface for the browser (wasm32 only)
//!
//! Every layer iterates only the indices intersecting the viewport; no work
//! is proportional to the total grid size.

pub mod grid;
pub mod headers;
pub mod selection;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use grid::render_content;
pub use headers::{column_highlight, render_column_headers, render_row_headers, row_highlight, HeaderHighlight};
pub use selection::{draw_selection, selection_overlay, SelectionOverlay};
pub use surface::{DrawCommand, Line, RecordingSurface, Surface, TextAlign, TextRun};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::data::DataProvider;
use crate::layout::{SizeModel, Viewport};
use crate::types::{Axis, GridConfig, SelectionModel};

/// Read-only view of engine state needed to draw a frame.
pub struct RenderParams<'a> {
    pub sizes: &'a SizeModel,
    pub viewport: &'a Viewport,
    pub selection: &'a SelectionModel,
    pub cells: &'a dyn DataProvider,
    pub config: &'a GridConfig,
}

/// The three drawing surfaces, one per layer.
#[derive(Debug, Clone)]
pub struct Layers<S: Surface> {
    pub col_header: S,
    pub row_header: S,
    pub content: S,
}

impl<S: Surface> Layers<S> {
    /// Redraw every layer from the current state.
    pub fn render(&mut self, params: &RenderParams<'_>) {
        render_column_headers(&mut self.col_header, params);
        render_row_headers(&mut self.row_header, params);
        render_content(&mut self.content, params);
    }
}

/// A visible row or column: its index plus local start and size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub index: u32,
    pub start: f64,
    pub size: f64,
}

impl Span {
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

/// Rows/columns intersecting the viewport along `axis`, with local offsets.
///
/// Offsets are accumulated from the first visible index, so the cost is
/// proportional to the visible count (plus one offset lookup).
pub fn visible_spans(axis: Axis, sizes: &SizeModel, viewport: &Viewport) -> Vec<Span> {
    let Some((start, end)) = viewport.visible_range(axis, sizes) else {
        return Vec::new();
    };
    let scroll = viewport.scroll(axis);
    let mut pos = sizes.offset_of(axis, start) - scroll;
    let mut spans = Vec::with_capacity((end - start + 1) as usize);
    for index in start..=end {
        let size = sizes.size_of(axis, index);
        spans.push(Span {
            index,
            start: pos,
            size,
        });
        pos += size;
    }
    spans
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn spans_start_at_scroll_and_cover_viewport() {
        let mut sizes = SizeModel::new(GridConfig::default().dimensions(), 20.0);
        sizes.set_size(Axis::Col, 1, 160.0);
        let mut viewport = Viewport::new(400.0, 300.0);
        viewport.set_scroll(150.0, 0.0, &sizes);

        let spans = visible_spans(Axis::Col, &sizes, &viewport);
        assert_eq!(spans[0].index, 1);
        assert_eq!(spans[0].start, -50.0);
        assert_eq!(spans[0].size, 160.0);
        assert_eq!(spans[1].start, 110.0);
        let last = spans.last().unwrap();
        assert!(last.end() >= 400.0);
        assert!(last.start < 400.0);
    }

    #[test]
    fn spans_deep_in_grid_stay_small() {
        let sizes = SizeModel::new(GridConfig::default().dimensions(), 20.0);
        let mut viewport = Viewport::new(1000.0, 600.0);
        viewport.set_scroll(0.0, 2_500_000.0, &sizes);
        let spans = visible_spans(Axis::Row, &sizes, &viewport);
        // 83_333 starts 10px above the viewport, so one extra row peeks in
        assert_eq!(spans.len(), 21);
        assert_eq!(spans[0].index, 83_333);
        assert_eq!(spans[0].start, -10.0);
    }
}
