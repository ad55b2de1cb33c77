//! Row and column header rendering.
//!
//! Headers follow the spreadsheet convention:
//! - Column headers: A, B, C, ... Z, AA, AB, ...
//! - Row headers: 1, 2, 3, ...
//! - Strong highlight for a fully selected row/column, a lighter one for
//!   rows/columns crossed by a cell range

use super::surface::{Line, Surface, TextAlign, TextRun};
use super::{visible_spans, RenderParams, Span};
use crate::cell_ref::col_to_letter;
use crate::types::{Axis, Rect, Selection, SelectionModel};

/// Highlight state of one header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHighlight {
    None,
    /// Row/column lies within the span of a cell range
    InRange,
    /// Row/column is selected as a whole
    Full,
}

/// Highlight for a column header
pub fn column_highlight(selection: &SelectionModel, col: u32) -> HeaderHighlight {
    if selection.is_column_selected(col) {
        HeaderHighlight::Full
    } else if matches!(selection.selection(), Some(Selection::CellRange { .. }))
        && selection.col_in_range(col)
    {
        HeaderHighlight::InRange
    } else {
        HeaderHighlight::None
    }
}

/// Highlight for a row header
pub fn row_highlight(selection: &SelectionModel, row: u32) -> HeaderHighlight {
    if selection.is_row_selected(row) {
        HeaderHighlight::Full
    } else if matches!(selection.selection(), Some(Selection::CellRange { .. }))
        && selection.row_in_range(row)
    {
        HeaderHighlight::InRange
    } else {
        HeaderHighlight::None
    }
}

fn highlight_color<'a>(highlight: HeaderHighlight, params: &'a RenderParams<'_>) -> Option<&'a str> {
    let colors = &params.config.colors;
    match highlight {
        HeaderHighlight::Full => Some(colors.header_selected.as_str()),
        HeaderHighlight::InRange => Some(colors.header_in_range.as_str()),
        HeaderHighlight::None => None,
    }
}

/// Render the column header layer (A, B, C, ...)
pub fn render_column_headers<S: Surface>(surface: &mut S, params: &RenderParams<'_>) {
    let width = surface.width();
    let height = surface.height();
    let colors = &params.config.colors;

    surface.clear();
    surface.fill_rect(Rect::new(0.0, 0.0, width, height), &colors.header_background);

    let spans = visible_spans(Axis::Col, params.sizes, params.viewport);
    let mut separators = Vec::with_capacity(spans.len() + 1);

    for span in &spans {
        let cell = Rect::new(span.start, 0.0, span.size, height);
        if let Some(color) = highlight_color(column_highlight(params.selection, span.index), params) {
            surface.fill_rect(cell, color);
        }
        let label = col_to_letter(span.index);
        surface.fill_text(TextRun {
            text: &label,
            x: span.start + span.size / 2.0,
            y: height / 2.0,
            align: TextAlign::Center,
            clip: cell,
            color: &colors.header_text,
        });
        separators.push(Line::vertical(span.end() + 0.5, 0.0, height));
    }

    // Bottom border
    separators.push(Line::horizontal(height - 0.5, 0.0, width));
    surface.stroke_lines(&separators, &colors.header_border, 1.0);
}

/// Render the row header layer (1, 2, 3, ...)
pub fn render_row_headers<S: Surface>(surface: &mut S, params: &RenderParams<'_>) {
    let width = surface.width();
    let height = surface.height();
    let colors = &params.config.colors;

    surface.clear();
    surface.fill_rect(Rect::new(0.0, 0.0, width, height), &colors.header_background);

    let spans: Vec<Span> = visible_spans(Axis::Row, params.sizes, params.viewport);
    let mut separators = Vec::with_capacity(spans.len() + 1);

    for span in &spans {
        let cell = Rect::new(0.0, span.start, width, span.size);
        if let Some(color) = highlight_color(row_highlight(params.selection, span.index), params) {
            surface.fill_rect(cell, color);
        }
        // Row numbers are 1-indexed for display
        let label = (u64::from(span.index) + 1).to_string();
        surface.fill_text(TextRun {
            text: &label,
            x: width / 2.0,
            y: span.start + span.size / 2.0,
            align: TextAlign::Center,
            clip: cell,
            color: &colors.header_text,
        });
        separators.push(Line::horizontal(span.end() + 0.5, 0.0, width));
    }

    // Right border
    separators.push(Line::vertical(width - 0.5, 0.0, height));
    surface.stroke_lines(&separators, &colors.header_border, 1.0);
}
