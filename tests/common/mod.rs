//! Shared helpers for the integration tests.
//!
//! All engines use the default chrome (50px row header, 30px column header,
//! 17px scrollbars) and a 1067×647 container, giving a 1000×600 content
//! viewport: ten default columns and twenty default rows.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use gridview::render::RecordingSurface;
use gridview::{GridConfig, GridEngine};

pub const CONTAINER_W: f64 = 1067.0;
pub const CONTAINER_H: f64 = 647.0;

/// Engine over the default 100 000 × 500 grid.
#[must_use]
pub fn engine() -> GridEngine<RecordingSurface> {
    GridEngine::headless(GridConfig::default(), CONTAINER_W, CONTAINER_H)
}

/// Engine over a small grid, so scroll limits are reachable in a few steps.
#[must_use]
pub fn small_engine(total_rows: u32, total_cols: u32) -> GridEngine<RecordingSurface> {
    let config = GridConfig {
        total_rows,
        total_cols,
        ..GridConfig::default()
    };
    GridEngine::headless(config, CONTAINER_W, CONTAINER_H)
}

/// Container coordinate of a cell's centre, assuming default sizes and no scroll.
#[must_use]
pub fn cell_center(row: u32, col: u32) -> (f64, f64) {
    (
        50.0 + f64::from(col) * 100.0 + 50.0,
        30.0 + f64::from(row) * 30.0 + 15.0,
    )
}

/// Container x of the trailing edge of a column, assuming default sizes and no scroll.
#[must_use]
pub fn column_edge(col: u32) -> f64 {
    50.0 + f64::from(col + 1) * 100.0
}

/// Content-layer frames drawn so far.
#[must_use]
pub fn frames(engine: &GridEngine<RecordingSurface>) -> u32 {
    engine.layers().content.frames()
}
