//! Main content layer: grid lines, cell text, selection overlay.

use super::selection::{draw_selection, selection_overlay};
use super::surface::{Line, Surface, TextAlign, TextRun};
use super::{visible_spans, RenderParams, Span};
use crate::types::{Axis, Rect};

/// Render the content layer.
///
/// Draw order is fixed: background, grid lines, cell text, then the
/// selection overlay on top of everything.
pub fn render_content<S: Surface>(surface: &mut S, params: &RenderParams<'_>) {
    let width = surface.width();
    let height = surface.height();
    let colors = &params.config.colors;

    surface.clear();
    surface.fill_rect(Rect::new(0.0, 0.0, width, height), &colors.background);

    let cols = visible_spans(Axis::Col, params.sizes, params.viewport);
    let rows = visible_spans(Axis::Row, params.sizes, params.viewport);
    if cols.is_empty() || rows.is_empty() {
        return;
    }

    render_grid_lines(surface, &rows, &cols, params);
    render_cell_text(surface, &rows, &cols, params);

    if let Some(overlay) = selection_overlay(params.selection, params.sizes, params.viewport) {
        draw_selection(surface, &overlay, colors);
    }
}

/// Grid lines as a single batched path, stopping at the end of the content
fn render_grid_lines<S: Surface>(surface: &mut S, rows: &[Span], cols: &[Span], params: &RenderParams<'_>) {
    let right = cols.last().map_or(0.0, Span::end).min(params.viewport.width);
    let bottom = rows.last().map_or(0.0, Span::end).min(params.viewport.height);

    let mut lines = Vec::with_capacity(rows.len() + cols.len());
    for col in cols {
        lines.push(Line::vertical(col.end(), 0.0, bottom));
    }
    for row in rows {
        lines.push(Line::horizontal(row.end(), 0.0, right));
    }
    surface.stroke_lines(&lines, &params.config.colors.grid_line, 1.0);
}

fn render_cell_text<S: Surface>(surface: &mut S, rows: &[Span], cols: &[Span], params: &RenderParams<'_>) {
    let padding = params.config.cell_padding;
    let color = &params.config.colors.cell_text;

    for row in rows {
        for col in cols {
            let text = params.cells.get_cell_data(row.index, col.index);
            if text.is_empty() {
                continue;
            }
            let clip = Rect::new(
                col.start + padding,
                row.start,
                (col.size - 2.0 * padding).max(0.0),
                row.size,
            );
            surface.fill_text(TextRun {
                text,
                x: col.start + padding,
                y: row.start + row.size / 2.0,
                align: TextAlign::Left,
                clip,
                color,
            });
        }
    }
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
    use crate::data::{CellStore, DataProvider};
    use crate::layout::{SizeModel, Viewport};
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::types::{GridConfig, SelectionModel};

    fn draw(
        config: &GridConfig,
        sizes: &SizeModel,
        viewport: &Viewport,
        selection: &SelectionModel,
        cells: &CellStore,
    ) -> RecordingSurface {
        let mut surface = RecordingSurface::new(viewport.width, viewport.height);
        let params = RenderParams {
            sizes,
            viewport,
            selection,
            cells,
            config,
        };
        render_content(&mut surface, &params);
        surface
    }

    #[test]
    fn draws_only_visible_text() {
        let config = GridConfig::default();
        let sizes = SizeModel::new(config.dimensions(), config.min_cell_size);
        let mut viewport = Viewport::new(450.0, 300.0);
        let selection = SelectionModel::new(config.total_rows, config.total_cols);
        let mut cells = CellStore::new();
        cells.set_cell_data(10, 3, "hello".to_string());
        cells.set_cell_data(50_000, 3, "deep".to_string());

        let surface = draw(&config, &sizes, &viewport, &selection, &cells);
        assert!(surface.texts().is_empty());

        viewport.set_scroll(0.0, 150.0, &sizes);
        let surface = draw(&config, &sizes, &viewport, &selection, &cells);
        assert_eq!(surface.texts(), vec!["hello"]);

        viewport.set_scroll(0.0, 50_000.0 * 30.0, &sizes);
        let surface = draw(&config, &sizes, &viewport, &selection, &cells);
        assert_eq!(surface.texts(), vec!["deep"]);
    }

    #[test]
    fn text_is_padded_and_clipped() {
        let config = GridConfig::default();
        let sizes = SizeModel::new(config.dimensions(), config.min_cell_size);
        let viewport = Viewport::new(450.0, 300.0);
        let selection = SelectionModel::new(config.total_rows, config.total_cols);
        let mut cells = CellStore::new();
        cells.set_cell_data(1, 1, "a very long value that overflows".to_string());

        let surface = draw(&config, &sizes, &viewport, &selection, &cells);
        let text = surface
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { x, y, align, clip, .. } => Some((*x, *y, *align, *clip)),
                _ => None,
            })
            .unwrap();
        assert_eq!(text.0, 104.0);
        assert_eq!(text.1, 45.0);
        assert_eq!(text.2, TextAlign::Left);
        assert_eq!(text.3, Rect::new(104.0, 30.0, 92.0, 30.0));
    }

    #[test]
    fn selection_is_drawn_last() {
        let config = GridConfig::default();
        let sizes = SizeModel::new(config.dimensions(), config.min_cell_size);
        let viewport = Viewport::new(450.0, 300.0);
        let mut selection = SelectionModel::new(config.total_rows, config.total_cols);
        selection.select_cell(0, 0);
        let mut cells = CellStore::new();
        cells.set_cell_data(0, 0, "x".to_string());

        let surface = draw(&config, &sizes, &viewport, &selection, &cells);
        let last = surface.commands().last().unwrap();
        assert!(matches!(last, DrawCommand::StrokeRect { color, .. } if *color == config.colors.selection_border));
    }

    #[test]
    fn grid_lines_stop_at_content_end() {
        let config = GridConfig {
            total_rows: 3,
            total_cols: 2,
            ..GridConfig::default()
        };
        let sizes = SizeModel::new(config.dimensions(), config.min_cell_size);
        let viewport = Viewport::new(450.0, 300.0);
        let selection = SelectionModel::new(config.total_rows, config.total_cols);
        let surface = draw(&config, &sizes, &viewport, &selection, &CellStore::new());
        let lines = surface
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::StrokeLines { lines, .. } => Some(lines.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.x2 <= 200.0 && l.y2 <= 90.0));
    }
}
