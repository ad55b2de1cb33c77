//! Bulk load of tabular JSON.
//!
//! Input is an array of flat records. The header row (row 0) lists the union
//! of record keys in first-seen order; record `i` lands in row `i + 1`.

use serde_json::Value;

use crate::data::DataProvider;
use crate::error::{GridError, Result};
use crate::types::GridDimensions;

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Number of header columns written
    pub columns: u32,
    /// Number of data rows written (excluding the header row)
    pub rows: u32,
    /// Records that were not objects
    pub skipped_records: u32,
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Replace the contents of `store` with the records in `json`.
///
/// Fails only if the payload is not a JSON array; non-object records are
/// skipped but keep their row. Cells beyond `dims` are dropped.
pub fn load_json_records<D: DataProvider>(
    store: &mut D,
    json: &str,
    dims: GridDimensions,
) -> Result<ImportSummary> {
    let payload: Value = serde_json::from_str(json)?;
    let Value::Array(records) = payload else {
        return Err(GridError::Import(
            "JSON payload must be an array of objects".to_string(),
        ));
    };

    let mut keys: Vec<&str> = Vec::new();
    for record in &records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }
    }

    store.clear();
    let mut summary = ImportSummary::default();

    for (col, key) in (0..dims.total_cols).zip(keys.iter()) {
        store.set_cell_data(0, col, (*key).to_string());
        summary.columns += 1;
    }

    for (row, record) in (1..dims.total_rows).zip(records.iter()) {
        let Value::Object(map) = record else {
            summary.skipped_records += 1;
            continue;
        };
        for (col, key) in (0..dims.total_cols).zip(keys.iter()) {
            if let Some(text) = map.get(*key).and_then(display_value) {
                store.set_cell_data(row, col, text);
            }
        }
        summary.rows += 1;
    }

    tracing::debug!(
        target: "gridview::import",
        columns = summary.columns,
        rows = summary.rows,
        skipped = summary.skipped_records,
        "bulk import complete"
    );
    Ok(summary)
}
