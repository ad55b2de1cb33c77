//! gridview - virtualized spreadsheet grid for the web
//!
//! Renders grids of 100k+ rows to Canvas 2D via WebAssembly:
//! - Only visible rows and columns are drawn
//! - Resizable rows and columns (sparse size overrides)
//! - Cell, range, row and column selection with edge auto-scroll
//! - Custom scrollbars, keyboard navigation, TSV copy
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const grid = new GridView(document.getElementById('grid'));
//! grid.loadJson(JSON.stringify(records));
//! grid.selectRef('B3');
//! ```
//!
//! Native hosts and tests drive [`GridEngine`] directly with recording
//! surfaces (see [`GridEngine::headless`]).

pub mod cell_ref;
pub mod data;
pub mod error;
pub mod import;
pub mod types;

// Layout + rendering
pub mod layout;
pub mod render;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use data::{CellKey, CellStore, DataProvider};
pub use error::{GridError, Result};
pub use import::ImportSummary;
pub use layout::{SizeModel, Viewport};
pub use types::*;
pub use viewer::{CursorKind, EventOutcome, GridEngine, HitTarget, KeyOutcome};

// Re-export the browser binding
#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
