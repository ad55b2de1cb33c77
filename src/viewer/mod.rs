//! Grid engine - the single owner of all interactive state.
//!
//! `GridEngine` wires the Size Model, viewport, selection, resize controller,
//! scrollbars and auto-scroll driver together and routes pointer, wheel and
//! keyboard input to them. Every handler that changes visible state redraws
//! all three layers exactly once before returning.
//!
//! Pointer coordinates are relative to the grid container:
//! - `[0, header_width) × [0, header_height)` is the inert corner
//! - the column header runs along the top, the row header down the left
//! - the content area starts at `(header_width, header_height)`
//! - scrollbars occupy the trailing `scrollbar_size` band of each axis
//!
//! The browser binding lives in `web` (wasm32 only).

pub mod autoscroll;
pub mod clipboard;
pub mod keyboard;
pub mod resize;
pub mod scrollbar;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autoscroll::AutoScrollState;
pub use keyboard::{KeyCommand, NavKey};
pub use resize::{ResizeController, ResizeSession};
pub use scrollbar::{ScrollbarAxis, ScrollbarSync, ThumbMetrics, ThumbState};
#[cfg(target_arch = "wasm32")]
pub use web::GridView;

use crate::cell_ref::parse_cell_range;
use crate::data::{CellStore, DataProvider};
use crate::error::{GridError, Result};
use crate::import::{load_json_records, ImportSummary};
use crate::layout::{SizeModel, Viewport};
use crate::render::{Layers, RecordingSurface, RenderParams, Surface};
use crate::types::{Axis, GridConfig, GridDimensions, Rect, SelectionModel};

/// Target of a hit test (what is under the pointer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A regular cell at (row, col)
    Cell(u32, u32),
    /// A row header at the given row index
    RowHeader(u32),
    /// A column header at the given column index
    ColumnHeader(u32),
    /// Resize zone at the trailing edge of a row header
    RowResize(u32),
    /// Resize zone at the trailing edge of a column header
    ColumnResize(u32),
    VerticalScrollbar,
    HorizontalScrollbar,
    /// Header corner or scrollbar corner; inert
    Corner,
    /// Nothing (outside any interactive region)
    None,
}

/// Pointer cursor hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorKind {
    #[default]
    Default,
    ColResize,
    RowResize,
}

impl CursorKind {
    /// CSS `cursor` value
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ColResize => "col-resize",
            Self::RowResize => "row-resize",
        }
    }
}

/// What the host must do after a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The layers were redrawn
    pub rendered: bool,
    /// Capture the pointer until release
    pub capture_pointer: bool,
    /// Start a per-frame loop calling `auto_scroll_tick`
    pub start_auto_scroll: bool,
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a grid key; let the event through
    Ignored,
    /// Consumed (and rendered if anything changed)
    Handled,
    /// Text the host should put on the clipboard
    Copy(String),
}

/// The engine context object.
pub struct GridEngine<S: Surface> {
    config: GridConfig,
    dims: GridDimensions,
    sizes: SizeModel,
    viewport: Viewport,
    selection: SelectionModel,
    resize: ResizeController,
    scrollbars: ScrollbarSync,
    autoscroll: AutoScrollState,
    cells: CellStore,
    layers: Layers<S>,
    container: (f64, f64),
}

impl GridEngine<RecordingSurface> {
    /// Engine drawing into recording surfaces (tests, benches, native hosts).
    pub fn headless(config: GridConfig, width: f64, height: f64) -> Self {
        let layers = Layers {
            col_header: RecordingSurface::default(),
            row_header: RecordingSurface::default(),
            content: RecordingSurface::default(),
        };
        Self::new(config, layers, width, height)
    }
}

impl<S: Surface> GridEngine<S> {
    /// Build the engine for a container of `width × height` and draw the
    /// first frame.
    pub fn new(config: GridConfig, layers: Layers<S>, width: f64, height: f64) -> Self {
        let dims = config.dimensions();
        let sizes = SizeModel::new(dims, config.min_cell_size);
        let mut engine = Self {
            selection: SelectionModel::new(dims.total_rows, dims.total_cols),
            scrollbars: ScrollbarSync::new(&config),
            autoscroll: AutoScrollState::new(config.auto_scroll_edge, config.auto_scroll_speed),
            resize: ResizeController::new(),
            viewport: Viewport::new(0.0, 0.0),
            cells: CellStore::new(),
            container: (0.0, 0.0),
            config,
            dims,
            sizes,
            layers,
        };
        engine.resize(width, height);
        engine
    }

    // --- Accessors -------------------------------------------------------

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn total_rows(&self) -> u32 {
        self.dims.total_rows
    }

    pub fn total_cols(&self) -> u32 {
        self.dims.total_cols
    }

    pub fn sizes(&self) -> &SizeModel {
        &self.sizes
    }

    pub fn width_of(&self, col: u32) -> f64 {
        self.sizes.width_of(col)
    }

    pub fn height_of(&self, row: u32) -> f64 {
        self.sizes.height_of(row)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn scrollbars(&self) -> &ScrollbarSync {
        &self.scrollbars
    }

    pub fn cells(&self) -> &CellStore {
        &self.cells
    }

    pub fn layers(&self) -> &Layers<S> {
        &self.layers
    }

    /// Rows at least partially visible
    pub fn visible_rows(&self) -> u32 {
        self.viewport.visible_count(Axis::Row, &self.sizes)
    }

    /// Columns at least partially visible
    pub fn visible_cols(&self) -> u32 {
        self.viewport.visible_count(Axis::Col, &self.sizes)
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.autoscroll.is_running()
    }

    /// Content area in container coordinates.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.config.header_width,
            self.config.header_height,
            self.viewport.width,
            self.viewport.height,
        )
    }

    // --- Rendering & layout ----------------------------------------------

    /// Redraw every layer from the current state.
    pub fn render(&mut self) {
        let params = RenderParams {
            sizes: &self.sizes,
            viewport: &self.viewport,
            selection: &self.selection,
            cells: &self.cells,
            config: &self.config,
        };
        self.layers.render(&params);
    }

    fn sync_and_render(&mut self) {
        self.scrollbars.update(&self.viewport, &self.sizes);
        self.render();
    }

    /// Container resize: recompute the content viewport (container minus
    /// headers and scrollbars), re-clamp scroll, resize the layers.
    pub fn resize(&mut self, width: f64, height: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.container = (width, height);
        let content_w = (width - self.config.header_width - self.config.scrollbar_size).max(0.0);
        let content_h = (height - self.config.header_height - self.config.scrollbar_size).max(0.0);
        self.viewport.resize(content_w, content_h, &self.sizes);

        self.layers.col_header.resize(content_w, self.config.header_height);
        self.layers.row_header.resize(self.config.header_width, content_h);
        self.layers.content.resize(content_w, content_h);
        tracing::debug!(target: "gridview::viewer", width, height, content_w, content_h, "container resized");
        self.sync_and_render();
    }

    // --- Programmatic API -------------------------------------------------

    /// Set the scroll position (clamped). Renders only if it changed.
    pub fn set_scroll(&mut self, x: f64, y: f64) -> bool {
        let changed = self.viewport.set_scroll(x, y, &self.sizes);
        if changed {
            self.sync_and_render();
        }
        changed
    }

    /// Minimal scroll bringing the cell into view.
    pub fn scroll_to_cell(&mut self, row: u32, col: u32) -> bool {
        let changed = self.viewport.scroll_to_cell(row, col, &self.sizes);
        if changed {
            self.sync_and_render();
        }
        changed
    }

    pub fn select_cell(&mut self, row: u32, col: u32) {
        self.selection.select_cell(row, col);
        self.render();
    }

    pub fn select_range(&mut self, anchor: (u32, u32), focus: (u32, u32)) {
        self.selection.select_range(anchor, focus);
        self.render();
    }

    pub fn select_row(&mut self, row: u32) {
        self.selection.select_row(row);
        self.render();
    }

    pub fn select_column(&mut self, col: u32) {
        self.selection.select_column(col);
        self.render();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.render();
    }

    /// Select by reference (`"B3"` or `"A1:C4"`) and scroll the anchor into view.
    pub fn select_ref(&mut self, reference: &str) -> Result<()> {
        let (sr, sc, er, ec) = parse_cell_range(reference)
            .ok_or_else(|| GridError::CellRef(reference.to_string()))?;
        if !self.dims.contains(sr, sc) || !self.dims.contains(er, ec) {
            return Err(GridError::CellRef(format!("{reference} is outside the grid")));
        }
        self.selection.select_range((sr, sc), (er, ec));
        self.viewport.scroll_to_cell(sr, sc, &self.sizes);
        self.sync_and_render();
        Ok(())
    }

    /// Set a row height or column width (clamped to the floor).
    pub fn set_size(&mut self, axis: Axis, index: u32, size: f64) -> f64 {
        let applied = self.sizes.set_size(axis, index, size);
        self.viewport.clamp_scroll(&self.sizes);
        self.sync_and_render();
        applied
    }

    pub fn get_cell_data(&self, row: u32, col: u32) -> &str {
        self.cells.get_cell_data(row, col)
    }

    /// Store a value and redraw. Cells outside the grid are ignored.
    pub fn set_cell_data(&mut self, row: u32, col: u32, value: impl Into<String>) {
        if !self.dims.contains(row, col) {
            return;
        }
        self.cells.set_cell_data(row, col, value.into());
        self.render();
    }

    /// Replace the data with a JSON array of records.
    pub fn load_json(&mut self, json: &str) -> Result<ImportSummary> {
        let summary = load_json_records(&mut self.cells, json, self.dims)?;
        self.render();
        Ok(summary)
    }

    /// Drop all data, sizes, selection and scroll.
    pub fn clear_data(&mut self) {
        self.cells.clear();
        self.sizes.clear_overrides();
        self.selection.clear();
        self.resize.end();
        self.autoscroll.reset();
        self.scrollbars.end_drag();
        self.viewport.set_scroll(0.0, 0.0, &self.sizes);
        tracing::debug!(target: "gridview::viewer", "grid data cleared");
        self.sync_and_render();
    }

    /// Selected range as TSV, or `None` without a selection.
    pub fn copy_selection(&self) -> Option<String> {
        let range = self.selection.normalized_range()?;
        Some(clipboard::selection_to_tsv(&self.cells, range))
    }

    // --- Hit testing --------------------------------------------------------

    /// Absolute content offset of a container coordinate along `axis`.
    fn content_offset(&self, axis: Axis, pointer: f64) -> f64 {
        match axis {
            Axis::Col => pointer - self.config.header_width + self.viewport.scroll_x,
            Axis::Row => pointer - self.config.header_height + self.viewport.scroll_y,
        }
    }

    /// Index under a container coordinate, `None` outside the grid.
    fn index_at(&self, axis: Axis, pointer: f64) -> Option<u32> {
        let offset = self.content_offset(axis, pointer);
        if offset < 0.0 || !offset.is_finite() {
            return None;
        }
        let index = self.sizes.index_at_offset(axis, offset);
        (index < self.sizes.count(axis)).then_some(index)
    }

    /// Cell under a container coordinate (not restricted to the visible
    /// content area, so a drag past the edge keeps extending).
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        Some((self.index_at(Axis::Row, y)?, self.index_at(Axis::Col, x)?))
    }

    /// What lies under the pointer.
    pub fn hit_test(&self, x: f64, y: f64) -> HitTarget {
        let hw = self.config.header_width;
        let hh = self.config.header_height;
        let content = self.content_rect();
        let tolerance = self.config.resize_tolerance;

        if x < 0.0 || y < 0.0 || !x.is_finite() || !y.is_finite() {
            return HitTarget::None;
        }
        if x < hw && y < hh {
            return HitTarget::Corner;
        }

        // Column header
        if y < hh {
            if x >= content.right() {
                return HitTarget::None;
            }
            let offset = self.content_offset(Axis::Col, x);
            if let Some(col) = resize::hit_zone(&self.sizes, Axis::Col, offset, tolerance) {
                return HitTarget::ColumnResize(col);
            }
            return self
                .index_at(Axis::Col, x)
                .map_or(HitTarget::None, HitTarget::ColumnHeader);
        }

        // Row header
        if x < hw {
            if y >= content.bottom() {
                return HitTarget::None;
            }
            let offset = self.content_offset(Axis::Row, y);
            if let Some(row) = resize::hit_zone(&self.sizes, Axis::Row, offset, tolerance) {
                return HitTarget::RowResize(row);
            }
            return self
                .index_at(Axis::Row, y)
                .map_or(HitTarget::None, HitTarget::RowHeader);
        }

        let right_band = x >= content.right();
        let bottom_band = y >= content.bottom();
        let sb = self.config.scrollbar_size;
        match (right_band, bottom_band) {
            (true, true) => HitTarget::Corner,
            (true, false) if x < content.right() + sb && self.scrollbars.vertical.is_visible() => {
                HitTarget::VerticalScrollbar
            }
            (false, true) if y < content.bottom() + sb && self.scrollbars.horizontal.is_visible() => {
                HitTarget::HorizontalScrollbar
            }
            (false, false) => self
                .cell_at(x, y)
                .map_or(HitTarget::None, |(row, col)| HitTarget::Cell(row, col)),
            _ => HitTarget::None,
        }
    }

    /// Cursor affordance for the pointer position.
    pub fn cursor_at(&self, x: f64, y: f64) -> CursorKind {
        if let Some(session) = self.resize.session() {
            return match session.axis {
                Axis::Col => CursorKind::ColResize,
                Axis::Row => CursorKind::RowResize,
            };
        }
        match self.hit_test(x, y) {
            HitTarget::ColumnResize(_) => CursorKind::ColResize,
            HitTarget::RowResize(_) => CursorKind::RowResize,
            _ => CursorKind::Default,
        }
    }

    // --- Pointer input --------------------------------------------------------

    fn interaction_active(&self) -> bool {
        self.resize.is_active() || self.selection.is_selecting() || self.scrollbars.is_dragging()
    }

    /// Pointer pressed at a container coordinate.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        // Resize, selection drag and thumb drag are mutually exclusive
        if self.interaction_active() {
            return outcome;
        }

        match self.hit_test(x, y) {
            HitTarget::ColumnResize(col) => {
                self.resize.begin(Axis::Col, col, x);
                outcome.capture_pointer = true;
            }
            HitTarget::RowResize(row) => {
                self.resize.begin(Axis::Row, row, y);
                outcome.capture_pointer = true;
            }
            HitTarget::ColumnHeader(col) => {
                self.selection.select_column(col);
                self.render();
                outcome.rendered = true;
            }
            HitTarget::RowHeader(row) => {
                self.selection.select_row(row);
                self.render();
                outcome.rendered = true;
            }
            HitTarget::Cell(row, col) => {
                self.selection.start_selection(row, col);
                self.render();
                outcome.rendered = true;
                outcome.capture_pointer = true;
            }
            HitTarget::VerticalScrollbar => {
                outcome = self.scrollbar_down(Axis::Row, y - self.config.header_height, y);
            }
            HitTarget::HorizontalScrollbar => {
                outcome = self.scrollbar_down(Axis::Col, x - self.config.header_width, x);
            }
            HitTarget::Corner | HitTarget::None => {}
        }
        outcome
    }

    /// Thumb press starts a drag; a track press jumps.
    fn scrollbar_down(&mut self, axis: Axis, track_pos: f64, pointer: f64) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        let bar = self.scrollbars.axis_mut(axis);
        if bar.hit_thumb(track_pos) {
            outcome.capture_pointer = bar.begin_drag(pointer, &self.viewport);
        } else if bar.track_click(track_pos, &mut self.viewport, &self.sizes) {
            self.sync_and_render();
            outcome.rendered = true;
        }
        outcome
    }

    /// Pointer moved to a container coordinate.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> EventOutcome {
        let mut outcome = EventOutcome::default();

        if let Some(session) = self.resize.session() {
            let pointer = match session.axis {
                Axis::Col => x,
                Axis::Row => y,
            };
            if self.resize.drag_to(pointer, &mut self.sizes) {
                self.viewport.clamp_scroll(&self.sizes);
                self.sync_and_render();
                outcome.rendered = true;
            }
            return outcome;
        }

        if self.scrollbars.is_dragging() {
            let (axis, pointer) = if self.scrollbars.vertical.is_dragging() {
                (Axis::Row, y)
            } else {
                (Axis::Col, x)
            };
            if self
                .scrollbars
                .axis_mut(axis)
                .drag_to(pointer, &mut self.viewport, &self.sizes)
            {
                self.sync_and_render();
                outcome.rendered = true;
            }
            return outcome;
        }

        if self.selection.is_selecting() {
            let changed = self
                .cell_at(x, y)
                .is_some_and(|(row, col)| self.selection.update_selection(row, col));
            let content = self.content_rect();
            outcome.start_auto_scroll =
                self.autoscroll
                    .evaluate((x, y), content, &self.viewport, &self.sizes);
            if changed {
                self.render();
                outcome.rendered = true;
            }
            return outcome;
        }

        // Idle: only thumb hover state
        let hit = self.hit_test(x, y);
        let v_hover = hit == HitTarget::VerticalScrollbar
            && self.scrollbars.vertical.hit_thumb(y - self.config.header_height);
        let h_hover = hit == HitTarget::HorizontalScrollbar
            && self.scrollbars.horizontal.hit_thumb(x - self.config.header_width);
        self.scrollbars.vertical.set_hover(v_hover);
        self.scrollbars.horizontal.set_hover(h_hover);
        outcome
    }

    /// Pointer released anywhere. The sole cancellation point for resize
    /// drags, thumb drags, selection drags and the auto-scroll loop.
    pub fn pointer_up(&mut self) -> EventOutcome {
        let resized = self.resize.end().is_some();
        let thumb = self.scrollbars.end_drag();
        self.autoscroll.reset();
        let selecting = self.selection.is_selecting();
        self.selection.end_selection();

        let mut outcome = EventOutcome::default();
        if resized || thumb || selecting {
            self.render();
            outcome.rendered = true;
        }
        outcome
    }

    /// One auto-scroll frame. Returns true while the loop should continue.
    pub fn auto_scroll_tick(&mut self) -> bool {
        if !self.autoscroll.is_running() || !self.selection.is_selecting() {
            self.autoscroll.stop();
            return false;
        }
        let moved = self.autoscroll.tick(&mut self.viewport, &self.sizes);
        // Content moved under a still pointer: re-resolve the focus cell
        let focus_changed = self
            .autoscroll
            .last_pointer()
            .and_then(|(x, y)| self.cell_at(x, y))
            .is_some_and(|(row, col)| self.selection.update_selection(row, col));
        if moved || focus_changed {
            self.sync_and_render();
        }
        self.autoscroll.is_running()
    }

    /// Wheel input at a container coordinate. Over a scrollbar only that
    /// axis scrolls.
    pub fn wheel(&mut self, x: f64, y: f64, delta_x: f64, delta_y: f64) -> bool {
        let changed = match self.hit_test(x, y) {
            HitTarget::VerticalScrollbar => {
                self.scrollbars
                    .wheel(Axis::Row, delta_y, &mut self.viewport, &self.sizes)
            }
            HitTarget::HorizontalScrollbar => {
                self.scrollbars
                    .wheel(Axis::Col, delta_x, &mut self.viewport, &self.sizes)
            }
            _ => {
                let m = self.config.wheel_multiplier;
                let dx = if delta_x.is_finite() { delta_x * m } else { 0.0 };
                let dy = if delta_y.is_finite() { delta_y * m } else { 0.0 };
                self.viewport.scroll_by(dx, dy, &self.sizes)
            }
        };
        if changed {
            self.sync_and_render();
        }
        changed
    }

    // --- Keyboard ---------------------------------------------------------------

    /// Key press. `modifier` is Ctrl (or Cmd on macOS).
    pub fn key_down(&mut self, key: &str, shift: bool, modifier: bool) -> KeyOutcome {
        match keyboard::resolve_key(key, shift, modifier) {
            None => KeyOutcome::Ignored,
            Some(KeyCommand::Copy) => self
                .copy_selection()
                .map_or(KeyOutcome::Ignored, KeyOutcome::Copy),
            Some(KeyCommand::Navigate { key, extend }) => {
                self.navigate(key, extend);
                KeyOutcome::Handled
            }
        }
    }

    fn navigate(&mut self, key: NavKey, extend: bool) {
        if self.dims.total_rows == 0 || self.dims.total_cols == 0 {
            return;
        }
        let page = self.visible_rows();

        // First key press with nothing selected lands on A1
        let (Some(anchor), Some(focus)) = (self.selection.anchor(), self.selection.focus()) else {
            self.selection.select_cell(0, 0);
            self.viewport.scroll_to_cell(0, 0, &self.sizes);
            self.sync_and_render();
            return;
        };

        if extend {
            let target = keyboard::navigation_target(key, focus, self.dims, page);
            if target == focus {
                return;
            }
            self.selection.extend_to(target.0, target.1);
            self.viewport.scroll_to_cell(target.0, target.1, &self.sizes);
        } else {
            let target = keyboard::navigation_target(key, anchor, self.dims, page);
            if target == anchor {
                return;
            }
            self.selection.select_cell(target.0, target.1);
            self.viewport.scroll_to_cell(target.0, target.1, &self.sizes);
        }
        self.sync_and_render();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::types::Selection;

    /// Container 1067×647: content viewport 1000×600 with default chrome.
    fn engine() -> GridEngine<RecordingSurface> {
        GridEngine::headless(GridConfig::default(), 1067.0, 647.0)
    }

    fn frames(e: &GridEngine<RecordingSurface>) -> u32 {
        e.layers().content.frames()
    }

    #[test]
    fn layout_from_container() {
        let e = engine();
        assert_eq!(e.viewport().width, 1000.0);
        assert_eq!(e.viewport().height, 600.0);
        assert_eq!(e.content_rect(), Rect::new(50.0, 30.0, 1000.0, 600.0));
        assert_eq!(e.layers().col_header.width(), 1000.0);
        assert_eq!(e.layers().row_header.height(), 600.0);
        assert_eq!(e.visible_cols(), 10);
        assert_eq!(e.visible_rows(), 20);
        assert_eq!(frames(&e), 1);
    }

    #[test]
    fn hit_regions() {
        let e = engine();
        assert_eq!(e.hit_test(10.0, 10.0), HitTarget::Corner);
        assert_eq!(e.hit_test(60.0, 10.0), HitTarget::ColumnHeader(0));
        assert_eq!(e.hit_test(148.0, 10.0), HitTarget::ColumnResize(0));
        assert_eq!(e.hit_test(155.0, 10.0), HitTarget::ColumnResize(0));
        assert_eq!(e.hit_test(157.0, 10.0), HitTarget::ColumnHeader(1));
        assert_eq!(e.hit_test(10.0, 45.0), HitTarget::RowHeader(0));
        assert_eq!(e.hit_test(10.0, 58.0), HitTarget::RowResize(0));
        assert_eq!(e.hit_test(175.0, 75.0), HitTarget::Cell(1, 1));
        assert_eq!(e.hit_test(1055.0, 100.0), HitTarget::VerticalScrollbar);
        assert_eq!(e.hit_test(500.0, 640.0), HitTarget::HorizontalScrollbar);
        assert_eq!(e.hit_test(1060.0, 640.0), HitTarget::Corner);
    }

    #[test]
    fn cursor_affordance() {
        let e = engine();
        assert_eq!(e.cursor_at(150.0, 10.0), CursorKind::ColResize);
        assert_eq!(e.cursor_at(10.0, 60.0), CursorKind::RowResize);
        assert_eq!(e.cursor_at(300.0, 300.0), CursorKind::Default);
        assert_eq!(CursorKind::ColResize.as_css(), "col-resize");
    }

    #[test]
    fn drag_selection_renders_once_per_event() {
        let mut e = engine();
        let start = frames(&e);
        let out = e.pointer_down(575.0, 195.0);
        assert!(out.rendered && out.capture_pointer);
        assert_eq!(frames(&e), start + 1);
        assert!(e.selection().is_selecting());

        e.pointer_move(275.0, 105.0);
        assert_eq!(frames(&e), start + 2);
        e.pointer_move(276.0, 106.0);
        assert_eq!(frames(&e), start + 2, "same cell does not redraw");

        e.pointer_up();
        assert_eq!(frames(&e), start + 3);
        let range = e.selection().normalized_range().unwrap();
        assert_eq!((range.min_row, range.max_row), (2, 5));
        assert_eq!((range.min_col, range.max_col), (2, 5));
    }

    #[test]
    fn header_click_selects_whole_row_or_column() {
        let mut e = engine();
        let out = e.pointer_down(260.0, 10.0);
        assert!(!out.capture_pointer);
        assert!(e.selection().is_column_selected(2));
        assert!(!e.selection().is_selecting());

        e.pointer_down(10.0, 100.0);
        assert!(e.selection().is_row_selected(2));
        assert!(!e.selection().is_column_selected(2));
    }

    #[test]
    fn resize_drag_and_release() {
        let mut e = engine();
        // Trailing edge of column 1 is at container x = 50 + 200
        let out = e.pointer_down(250.0, 10.0);
        assert!(out.capture_pointer);
        assert!(e.is_resizing());
        assert!(!e.selection().has_selection(), "resize does not select");

        e.pointer_move(280.0, 400.0);
        assert_eq!(e.width_of(1), 130.0);
        e.pointer_move(200.0, 400.0);
        assert_eq!(e.width_of(1), 50.0);
        assert!(!e.selection().is_selecting());

        e.pointer_up();
        assert!(!e.is_resizing());
        e.pointer_move(300.0, 10.0);
        assert_eq!(e.width_of(1), 50.0);
    }

    #[test]
    fn pointer_down_ignored_during_resize() {
        let mut e = engine();
        e.pointer_down(250.0, 10.0);
        let out = e.pointer_down(500.0, 300.0);
        assert_eq!(out, EventOutcome::default());
        assert!(!e.selection().has_selection());
    }

    #[test]
    fn auto_scroll_lifecycle() {
        let mut e = engine();
        e.pointer_down(500.0, 300.0);
        let out = e.pointer_move(500.0, 625.0);
        assert!(out.start_auto_scroll);
        assert!(e.is_auto_scrolling());

        let before = frames(&e);
        assert!(e.auto_scroll_tick());
        assert_eq!(e.viewport().scroll_y, 15.0);
        assert_eq!(frames(&e), before + 1);
        // Focus re-evaluated under the still pointer: content y = 595 + 15
        assert_eq!(e.selection().focus(), Some((20, 4)));

        e.pointer_up();
        assert!(!e.is_auto_scrolling());
        assert!(!e.auto_scroll_tick());
        assert_eq!(e.viewport().scroll_y, 15.0);
    }

    #[test]
    fn auto_scroll_is_bounded() {
        let mut e = engine();
        let max_y = e.viewport().max_scroll_y(e.sizes());
        e.set_scroll(0.0, max_y - 30.0);
        e.pointer_down(500.0, 300.0);
        e.pointer_move(500.0, 625.0);
        let mut ticks = 0;
        while e.auto_scroll_tick() {
            ticks += 1;
            assert!(ticks < 10);
        }
        assert_eq!(e.viewport().scroll_y, max_y);
        assert!(!e.is_auto_scrolling());
    }

    #[test]
    fn wheel_scrolls_with_multiplier() {
        let mut e = engine();
        assert!(e.wheel(500.0, 300.0, 10.0, 100.0));
        assert_eq!((e.viewport().scroll_x, e.viewport().scroll_y), (30.0, 300.0));
        // Over the vertical bar only the vertical axis moves
        e.wheel(1055.0, 300.0, 10.0, 10.0);
        assert_eq!((e.viewport().scroll_x, e.viewport().scroll_y), (30.0, 330.0));
        assert!(e.wheel(500.0, 300.0, -1000.0, -1000.0));
        assert_eq!((e.viewport().scroll_x, e.viewport().scroll_y), (0.0, 0.0));
        assert!(!e.wheel(500.0, 300.0, -1.0, -1.0), "already at origin");
    }

    #[test]
    fn thumb_drag_through_pointer_events() {
        let mut e = engine();
        let thumb = e.scrollbars().vertical.thumb().unwrap();
        let grab_y = 30.0 + thumb.position + thumb.length / 2.0;
        let out = e.pointer_down(1055.0, grab_y);
        assert!(out.capture_pointer);
        e.pointer_move(0.0, grab_y + 290.0);
        assert!(e.viewport().scroll_y > 0.0);
        e.pointer_up();
        assert!(!e.scrollbars().is_dragging());
    }

    #[test]
    fn track_click_jumps() {
        let mut e = engine();
        let out = e.pointer_down(1055.0, 600.0);
        assert!(out.rendered);
        assert!(e.viewport().scroll_y > 0.0);
    }

    #[test]
    fn keyboard_navigation() {
        let mut e = engine();
        assert_eq!(e.key_down("ArrowDown", false, false), KeyOutcome::Handled);
        assert_eq!(e.selection().anchor(), Some((0, 0)), "first press selects A1");

        e.key_down("ArrowDown", false, false);
        e.key_down("ArrowRight", false, false);
        assert_eq!(e.selection().anchor(), Some((1, 1)));

        e.key_down("ArrowRight", true, false);
        e.key_down("ArrowDown", true, false);
        assert_eq!(
            e.selection().selection(),
            Some(Selection::CellRange {
                anchor_row: 1,
                anchor_col: 1,
                focus_row: 2,
                focus_col: 2
            })
        );

        e.key_down("PageDown", false, false);
        assert_eq!(e.selection().anchor(), Some((21, 1)));
        assert_eq!(e.viewport().scroll_y, 22.0 * 30.0 - 600.0);

        assert_eq!(e.key_down("x", false, false), KeyOutcome::Ignored);
    }

    #[test]
    fn keyboard_clamps_at_edges() {
        let mut e = engine();
        e.select_cell(0, 0);
        let before = frames(&e);
        e.key_down("ArrowUp", false, false);
        e.key_down("ArrowLeft", false, false);
        assert_eq!(e.selection().anchor(), Some((0, 0)));
        assert_eq!(frames(&e), before);
    }

    #[test]
    fn copy_via_keyboard() {
        let mut e = engine();
        e.set_cell_data(0, 0, "a");
        e.set_cell_data(0, 1, "b");
        assert_eq!(e.key_down("c", false, true), KeyOutcome::Ignored);
        e.select_range((0, 0), (5, 5));
        assert_eq!(e.key_down("c", false, true), KeyOutcome::Copy("a\tb".to_string()));
    }

    #[test]
    fn select_ref_scrolls_into_view() {
        let mut e = engine();
        e.select_ref("B100:C101").unwrap();
        assert_eq!(e.selection().anchor(), Some((99, 1)));
        assert_eq!(e.viewport().scroll_y, 100.0 * 30.0 - 600.0);
        assert!(matches!(e.select_ref("nope"), Err(GridError::CellRef(_))));
        assert!(e.select_ref("ZZZ1").is_err());
    }

    #[test]
    fn clear_data_resets_everything() {
        let mut e = engine();
        e.load_json(r#"[{"a": 1}]"#).unwrap();
        e.set_size(Axis::Col, 0, 300.0);
        e.select_cell(3, 3);
        e.set_scroll(500.0, 500.0);
        e.clear_data();
        assert!(e.cells().is_empty());
        assert_eq!(e.width_of(0), 100.0);
        assert!(!e.selection().has_selection());
        assert_eq!((e.viewport().scroll_x, e.viewport().scroll_y), (0.0, 0.0));
    }

    #[test]
    fn resize_reclamps_scroll() {
        let mut e = engine();
        e.set_scroll(1e9, 0.0);
        e.resize(2067.0, 647.0);
        assert_eq!(e.viewport().scroll_x, 50_000.0 - 2000.0);
        assert_eq!(e.visible_cols(), 20);
    }

    #[test]
    fn shrinking_resize_reclamps_scroll() {
        let config = GridConfig {
            total_rows: 5,
            total_cols: 12,
            ..GridConfig::default()
        };
        let mut e = GridEngine::headless(config, 1067.0, 647.0);
        e.set_scroll(200.0, 0.0);
        e.set_size(Axis::Col, 11, 20.0);
        assert_eq!(e.viewport().scroll_x, 120.0);
        assert!(!e.scrollbars().vertical.is_visible());
    }
}
