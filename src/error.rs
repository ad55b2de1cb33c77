//! Structured error types for gridview.
//!
//! The grid engine itself clamps instead of failing; these errors only come
//! from the edges (bulk import, cell references, surface acquisition).

/// All errors that can occur outside the infallible grid core.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Bulk-import payload was not valid JSON.
    #[error("JSON parsing: {0}")]
    Json(#[from] serde_json::Error),

    /// Bulk-import payload had the wrong shape.
    #[error("Import failed: {0}")]
    Import(String),

    /// Invalid cell reference.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// Drawing surface could not be acquired.
    #[error("Render error: {0}")]
    Render(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
