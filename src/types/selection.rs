//! Selection state for the grid.
//!
//! The model is a small state machine (`Idle → Selecting → Idle`) over one of
//! three selection shapes. Range bounds are always derived on read.

/// The active selection shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Rectangular range; the anchor is the originally clicked cell.
    CellRange {
        anchor_row: u32,
        anchor_col: u32,
        focus_row: u32,
        focus_col: u32,
    },
    /// Every column of one row.
    FullRow { row: u32 },
    /// Every row of one column.
    FullColumn { col: u32 },
}

/// Normalized (min/max) bounds of a selection, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl CellRange {
    /// Build a range from any two corners.
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        Self {
            min_row: a.0.min(b.0),
            max_row: a.0.max(b.0),
            min_col: a.1.min(b.1),
            max_col: a.1.max(b.1),
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.contains_row(row) && self.contains_col(col)
    }

    pub fn contains_row(&self, row: u32) -> bool {
        row >= self.min_row && row <= self.max_row
    }

    pub fn contains_col(&self, col: u32) -> bool {
        col >= self.min_col && col <= self.max_col
    }

    pub fn row_count(&self) -> u32 {
        self.max_row - self.min_row + 1
    }

    pub fn col_count(&self) -> u32 {
        self.max_col - self.min_col + 1
    }
}

/// Selection state machine.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    total_rows: u32,
    total_cols: u32,
    current: Option<Selection>,
    selecting: bool,
}

impl SelectionModel {
    /// Create an empty model for a grid of the given size.
    pub fn new(total_rows: u32, total_cols: u32) -> Self {
        Self {
            total_rows,
            total_cols,
            current: None,
            selecting: false,
        }
    }

    fn is_empty_grid(&self) -> bool {
        self.total_rows == 0 || self.total_cols == 0
    }

    fn clamp(&self, row: u32, col: u32) -> (u32, u32) {
        (
            row.min(self.total_rows.saturating_sub(1)),
            col.min(self.total_cols.saturating_sub(1)),
        )
    }

    /// Begin a drag selection at (row, col).
    pub fn start_selection(&mut self, row: u32, col: u32) {
        if self.is_empty_grid() {
            return;
        }
        let (row, col) = self.clamp(row, col);
        self.current = Some(Selection::CellRange {
            anchor_row: row,
            anchor_col: col,
            focus_row: row,
            focus_col: col,
        });
        self.selecting = true;
    }

    /// Move the focus of an in-progress drag. Returns true if it moved.
    pub fn update_selection(&mut self, row: u32, col: u32) -> bool {
        if !self.selecting {
            return false;
        }
        let (row, col) = self.clamp(row, col);
        match &mut self.current {
            Some(Selection::CellRange {
                focus_row,
                focus_col,
                ..
            }) => {
                if *focus_row == row && *focus_col == col {
                    return false;
                }
                *focus_row = row;
                *focus_col = col;
                true
            }
            _ => false,
        }
    }

    /// Finish the drag. The selection itself is kept.
    pub fn end_selection(&mut self) {
        self.selecting = false;
    }

    /// Replace the selection with a single cell.
    pub fn select_cell(&mut self, row: u32, col: u32) {
        self.select_range((row, col), (row, col));
    }

    /// Replace the selection with a range (no drag phase).
    pub fn select_range(&mut self, anchor: (u32, u32), focus: (u32, u32)) {
        if self.is_empty_grid() {
            return;
        }
        let (anchor_row, anchor_col) = self.clamp(anchor.0, anchor.1);
        let (focus_row, focus_col) = self.clamp(focus.0, focus.1);
        self.current = Some(Selection::CellRange {
            anchor_row,
            anchor_col,
            focus_row,
            focus_col,
        });
        self.selecting = false;
    }

    /// Keep the anchor and move the focus, converting row/column
    /// selections into a cell range rooted at their anchor.
    pub fn extend_to(&mut self, row: u32, col: u32) {
        let anchor = self.anchor().unwrap_or((0, 0));
        self.select_range(anchor, (row, col));
    }

    /// Select every column of `row`.
    pub fn select_row(&mut self, row: u32) {
        if self.is_empty_grid() {
            return;
        }
        let (row, _) = self.clamp(row, 0);
        self.current = Some(Selection::FullRow { row });
        self.selecting = false;
    }

    /// Select every row of `col`.
    pub fn select_column(&mut self, col: u32) {
        if self.is_empty_grid() {
            return;
        }
        let (_, col) = self.clamp(0, col);
        self.current = Some(Selection::FullColumn { col });
        self.selecting = false;
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self) {
        self.current = None;
        self.selecting = false;
    }

    pub fn selection(&self) -> Option<Selection> {
        self.current
    }

    pub fn has_selection(&self) -> bool {
        self.current.is_some()
    }

    /// True while a drag selection is in progress.
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// The fixed corner of the selection.
    pub fn anchor(&self) -> Option<(u32, u32)> {
        match self.current? {
            Selection::CellRange {
                anchor_row,
                anchor_col,
                ..
            } => Some((anchor_row, anchor_col)),
            Selection::FullRow { row } => Some((row, 0)),
            Selection::FullColumn { col } => Some((0, col)),
        }
    }

    /// The moving corner of the selection.
    pub fn focus(&self) -> Option<(u32, u32)> {
        match self.current? {
            Selection::CellRange {
                focus_row,
                focus_col,
                ..
            } => Some((focus_row, focus_col)),
            Selection::FullRow { row } => Some((row, self.total_cols.saturating_sub(1))),
            Selection::FullColumn { col } => Some((self.total_rows.saturating_sub(1), col)),
        }
    }

    /// Min/max bounds of the selection, computed fresh on every call.
    pub fn normalized_range(&self) -> Option<CellRange> {
        Some(CellRange::from_corners(self.anchor()?, self.focus()?))
    }

    /// True only when `row` is selected as a whole row.
    pub fn is_row_selected(&self, row: u32) -> bool {
        matches!(self.current, Some(Selection::FullRow { row: r }) if r == row)
    }

    /// True only when `col` is selected as a whole column.
    pub fn is_column_selected(&self, col: u32) -> bool {
        matches!(self.current, Some(Selection::FullColumn { col: c }) if c == col)
    }

    /// True if `row` lies within the span of the current selection.
    pub fn row_in_range(&self, row: u32) -> bool {
        self.normalized_range().is_some_and(|r| r.contains_row(row))
    }

    /// True if `col` lies within the span of the current selection.
    pub fn col_in_range(&self, col: u32) -> bool {
        self.normalized_range().is_some_and(|r| r.contains_col(col))
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.normalized_range().is_some_and(|r| r.contains(row, col))
    }
}
