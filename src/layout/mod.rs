//! Layout engine for mapping logical grid coordinates to pixels.
//!
//! This module handles:
//! - Default and user-resized row/column sizes (sparse overrides)
//! - Index ↔ cumulative offset conversion
//! - Viewport state (scroll position, visible range, minimal scroll-to-cell)

mod sizes;
mod viewport;

pub use sizes::SizeModel;
pub use viewport::Viewport;
