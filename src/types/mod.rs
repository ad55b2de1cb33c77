//! Shared data types for the grid engine.

mod config;
mod geometry;
mod selection;

pub use config::*;
pub use geometry::*;
pub use selection::*;
