//! # Rendering Module
//!
//! Macroquad painting for the welcome screen and the board. The painter only
//! reads dungeon state through `Dungeon::query_cell`; it owns no game rules.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
