//! Clipboard formatting for the selected range.
//!
//! Produces TSV the way spreadsheet applications do: trailing empty rows and
//! columns are trimmed, and values with tabs, newlines or quotes are quoted.

use crate::data::{CellStore, DataProvider};
use crate::types::CellRange;

/// Format the cells of `range` as TSV, trimmed to the last non-empty cell.
///
/// Returns an empty string when the range holds no content.
pub fn selection_to_tsv(cells: &CellStore, range: CellRange) -> String {
    // Find the actual content bounds within the selection (trim trailing empty cells)
    let mut content_max: Option<(u32, u32)> = None;
    for (key, _) in cells.iter_in_range(range.min_row, range.max_row, range.min_col, range.max_col) {
        let (r, c) = content_max.unwrap_or((range.min_row, range.min_col));
        content_max = Some((r.max(key.row), c.max(key.col)));
    }
    let Some((max_row, max_col)) = content_max else {
        return String::new();
    };

    let mut result = String::new();
    for row in range.min_row..=max_row {
        for col in range.min_col..=max_col {
            if col > range.min_col {
                result.push('\t');
            }
            let value = cells.get_cell_data(row, col);
            if !value.is_empty() {
                result.push_str(&escape_cell_value(value));
            }
        }
        if row < max_row {
            result.push('\n');
        }
    }
    result
}

/// Escape a cell value for TSV/clipboard format
/// If the value contains tabs, newlines, or quotes, wrap in quotes and escape internal quotes
pub fn escape_cell_value(value: &str) -> String {
    let needs_quoting = value.contains(['\t', '\n', '\r', '"']);
    if needs_quoting {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write text to the system clipboard.
#[cfg(target_arch = "wasm32")]
pub fn copy_to_clipboard(text: &str) {
    if let Some(window) = web_sys::window() {
        let clipboard = window.navigator().clipboard();
        let _ = clipboard.write_text(text);
    }
}
