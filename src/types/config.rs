use serde::Deserialize;

/// Minimum width/height any row or column can be resized to.
pub const MIN_CELL_SIZE: f64 = 20.0;

/// Distance from a header boundary that still counts as a resize zone.
pub const RESIZE_TOLERANCE: f64 = 6.0;

/// Width of the band along each content edge that triggers auto-scroll.
pub const AUTO_SCROLL_EDGE: f64 = 20.0;

/// Auto-scroll distance per animation frame.
pub const AUTO_SCROLL_SPEED: f64 = 15.0;

/// Multiplier applied to raw wheel deltas.
pub const WHEEL_SCROLL_MULTIPLIER: f64 = 3.0;

/// Smallest length a scrollbar thumb is drawn at.
pub const MIN_THUMB_LENGTH: f64 = 20.0;

/// Fixed dimensions of a grid session.
///
/// Immutable once the engine is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDimensions {
    pub total_rows: u32,
    pub total_cols: u32,
    pub default_cell_width: f64,
    pub default_cell_height: f64,
}

impl GridDimensions {
    /// True if (row, col) addresses a real cell.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.total_rows && col < self.total_cols
    }

    /// Index of the last row (0 when the grid is empty).
    pub fn last_row(&self) -> u32 {
        self.total_rows.saturating_sub(1)
    }

    /// Index of the last column (0 when the grid is empty).
    pub fn last_col(&self) -> u32 {
        self.total_cols.saturating_sub(1)
    }
}

/// Engine configuration.
///
/// Deserializable from a JS object (camelCase keys); every field is optional
/// and falls back to the default grid: 500 × 100,000 cells of 100 × 30.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub total_rows: u32,
    pub total_cols: u32,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Height of the column header strip
    pub header_height: f64,
    /// Width of the row header strip
    pub header_width: f64,
    /// Thickness of each scrollbar track
    pub scrollbar_size: f64,
    pub min_cell_size: f64,
    pub resize_tolerance: f64,
    pub auto_scroll_edge: f64,
    pub auto_scroll_speed: f64,
    pub wheel_multiplier: f64,
    pub min_thumb_length: f64,
    /// Horizontal inset of cell text
    pub cell_padding: f64,
    pub colors: GridColors,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            total_rows: 100_000,
            total_cols: 500,
            cell_width: 100.0,
            cell_height: 30.0,
            header_height: 30.0,
            header_width: 50.0,
            scrollbar_size: 17.0,
            min_cell_size: MIN_CELL_SIZE,
            resize_tolerance: RESIZE_TOLERANCE,
            auto_scroll_edge: AUTO_SCROLL_EDGE,
            auto_scroll_speed: AUTO_SCROLL_SPEED,
            wheel_multiplier: WHEEL_SCROLL_MULTIPLIER,
            min_thumb_length: MIN_THUMB_LENGTH,
            cell_padding: 4.0,
            colors: GridColors::default(),
        }
    }
}

impl GridConfig {
    /// The immutable grid dimensions implied by this config.
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions {
            total_rows: self.total_rows,
            total_cols: self.total_cols,
            default_cell_width: self.cell_width.max(self.min_cell_size),
            default_cell_height: self.cell_height.max(self.min_cell_size),
        }
    }
}

/// Colours used by the three render layers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridColors {
    pub background: String,
    pub header_background: String,
    pub header_text: String,
    pub header_border: String,
    /// Header fill for a fully selected row/column
    pub header_selected: String,
    /// Header fill for a row/column inside the selected range
    pub header_in_range: String,
    pub grid_line: String,
    pub cell_text: String,
    pub selection_fill: String,
    pub selection_border: String,
    pub scrollbar_track: String,
    pub scrollbar_thumb: String,
    pub scrollbar_thumb_hover: String,
    pub scrollbar_thumb_active: String,
}

impl Default for GridColors {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            header_background: "#F5F5F5".to_string(),
            header_text: "#000000".to_string(),
            header_border: "#CCCCCC".to_string(),
            header_selected: "rgba(32, 151, 79, 0.5)".to_string(),
            header_in_range: "rgba(32, 151, 79, 0.15)".to_string(),
            grid_line: "#E0E0E0".to_string(),
            cell_text: "#000000".to_string(),
            selection_fill: "rgba(232, 242, 236, 0.5)".to_string(),
            selection_border: "#20974F".to_string(),
            scrollbar_track: "#F8F8F8".to_string(),
            scrollbar_thumb: "#C1C1C1".to_string(),
            scrollbar_thumb_hover: "#A8A8A8".to_string(),
            scrollbar_thumb_active: "#787878".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_grid() {
        let dims = GridConfig::default().dimensions();
        assert_eq!(dims.total_rows, 100_000);
        assert_eq!(dims.total_cols, 500);
        assert_eq!(dims.default_cell_width, 100.0);
        assert_eq!(dims.default_cell_height, 30.0);
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let config: GridConfig =
            serde_json::from_str(r#"{"totalRows": 50, "cellWidth": 80, "colors": {"gridLine": "red"}}"#)
                .unwrap();
        assert_eq!(config.total_rows, 50);
        assert_eq!(config.total_cols, 500);
        assert_eq!(config.cell_width, 80.0);
        assert_eq!(config.colors.grid_line, "red");
        assert_eq!(config.colors.cell_text, "#000000");
    }

    #[test]
    fn default_sizes_respect_floor() {
        let config = GridConfig {
            cell_width: 5.0,
            ..GridConfig::default()
        };
        assert_eq!(config.dimensions().default_cell_width, MIN_CELL_SIZE);
    }

    #[test]
    fn dimensions_contains() {
        let dims = GridConfig::default().dimensions();
        assert!(dims.contains(99_999, 499));
        assert!(!dims.contains(100_000, 0));
        assert!(!dims.contains(0, 500));
    }
}
