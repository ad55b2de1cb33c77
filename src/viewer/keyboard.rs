//! Keyboard navigation: key names to target cells.

use crate::types::GridDimensions;

/// Navigation keys understood by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            _ => None,
        }
    }
}

/// A key press resolved against the modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Move the active cell; with `extend` only the focus moves
    Navigate { key: NavKey, extend: bool },
    /// Ctrl/Cmd+C
    Copy,
}

/// Resolve a key press. `modifier` is Ctrl on most platforms, Cmd on macOS.
pub fn resolve_key(key: &str, shift: bool, modifier: bool) -> Option<KeyCommand> {
    if modifier {
        return matches!(key, "c" | "C").then_some(KeyCommand::Copy);
    }
    NavKey::from_key(key).map(|key| KeyCommand::Navigate { key, extend: shift })
}

/// Cell reached by pressing `key` at `from`, clamped to the grid.
///
/// `page_rows` is the number of rows a PageUp/PageDown jumps.
pub fn navigation_target(key: NavKey, from: (u32, u32), dims: GridDimensions, page_rows: u32) -> (u32, u32) {
    let (row, col) = from;
    let last_row = dims.last_row();
    let last_col = dims.last_col();
    let page = page_rows.max(1);
    let (row, col) = match key {
        NavKey::Up => (row.saturating_sub(1), col),
        NavKey::Down => (row.saturating_add(1), col),
        NavKey::Left => (row, col.saturating_sub(1)),
        NavKey::Right => (row, col.saturating_add(1)),
        NavKey::Home => (row, 0),
        NavKey::End => (row, last_col),
        NavKey::PageUp => (row.saturating_sub(page), col),
        NavKey::PageDown => (row.saturating_add(page), col),
    };
    (row.min(last_row), col.min(last_col))
}
