//! # D&D Sweeper
//!
//! A minesweeper-style dungeon crawler: the board is a procedurally generated
//! dungeon of monster and treasure rooms, and the player uncovers it one click
//! at a time.
//!
//! ## Architecture Overview
//!
//! The crate is split into a rules core and a thin presentation layer:
//!
//! - **Game**: the grid of cells, the reveal cascade, and the `Dungeon` session
//! - **Generation**: sector-based room placement, same-type room networks,
//!   and the adjacency hint pass
//! - **Input / Rendering / Scenes**: macroquad glue that converts clicks into
//!   grid coordinates and paints whatever the core reports
//!
//! The core never touches pixels or devices. A collaborator drives it with
//! [`Dungeon::reveal`] and reads it back with [`Dungeon::query_cell`].

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;

pub use game::{
    Cell, CellState, CellType, CellView, Dungeon, Grid, Position, RevealEngine,
};

pub use generation::{
    GenerationConfig, GenerationSummary, GeneratedLayout, Generator, Room, RoomType,
    SectorDungeonGenerator,
};

pub use input::{BoardLayout, InputHandler, PlayerInput};
pub use rendering::{Button, MacroquadDisplay};
pub use scenes::{SceneManager, SceneType};

/// Core error type for the D&D Sweeper engine.
#[derive(thiserror::Error, Debug)]
pub enum SweeperError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A grid mutation addressed a cell outside the grid
    #[error("Position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    /// Generation parameters are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generated dungeon broke one of its invariants
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the D&D Sweeper codebase.
pub type SweeperResult<T> = Result<T, SweeperError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Window width in pixels
    pub const WINDOW_WIDTH: i32 = 800;

    /// Window height in pixels
    pub const WINDOW_HEIGHT: i32 = 600;

    /// Default edge length of one board cell in pixels
    pub const DEFAULT_CELL_SIZE: f32 = 10.0;

    /// Window title
    pub const WINDOW_TITLE: &str = "D&D Sweeper";
}
