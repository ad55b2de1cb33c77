//! Sparse cell value storage.
//!
//! Absence means empty: setting an empty string removes the entry, so the map
//! only ever holds cells with content.

use std::collections::HashMap;

/// Read/write access to cell values, as consumed by the renderer and the
/// toolbar/import collaborators.
pub trait DataProvider {
    /// Value at (row, col); empty string when the cell has no content.
    fn get_cell_data(&self, row: u32, col: u32) -> &str;

    /// Store a value. An empty value deletes the cell.
    fn set_cell_data(&mut self, row: u32, col: u32, value: String);

    /// Remove every value.
    fn clear(&mut self);
}

/// Composite key of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row: u32,
    pub col: u32,
}

/// Default in-memory `DataProvider`.
#[derive(Debug, Clone, Default)]
pub struct CellStore {
    cells: HashMap<CellKey, String>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-empty cells inside the inclusive bounds, in no particular order.
    pub fn iter_in_range(
        &self,
        min_row: u32,
        max_row: u32,
        min_col: u32,
        max_col: u32,
    ) -> impl Iterator<Item = (CellKey, &str)> + '_ {
        self.cells
            .iter()
            .filter(move |(k, _)| {
                k.row >= min_row && k.row <= max_row && k.col >= min_col && k.col <= max_col
            })
            .map(|(k, v)| (*k, v.as_str()))
    }
}

impl DataProvider for CellStore {
    fn get_cell_data(&self, row: u32, col: u32) -> &str {
        self.cells
            .get(&CellKey { row, col })
            .map_or("", String::as_str)
    }

    fn set_cell_data(&mut self, row: u32, col: u32, value: String) {
        let key = CellKey { row, col };
        if value.is_empty() {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, value);
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
    }
}
