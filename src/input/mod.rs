//! # Input Module
//!
//! Mouse and keyboard handling, and the conversion from screen pixels to
//! board coordinates.

use crate::Position;
use macroquad::prelude::*;

/// Where the board sits on screen and how large each cell is drawn.
///
/// Conversion floors pixel coordinates, so clicks left of or above the board
/// map to negative coordinates that the core ignores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    /// Screen x of the board's left edge
    pub origin_x: f32,
    /// Screen y of the board's top edge
    pub origin_y: f32,
    /// Edge length of one cell in pixels
    pub cell_size: f32,
}

impl BoardLayout {
    pub fn new(origin_x: f32, origin_y: f32, cell_size: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_size,
        }
    }

    /// Largest whole-pixel cell size that fits the board on screen, centered.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnd_sweeper::BoardLayout;
    ///
    /// let layout = BoardLayout::fit(80, 60, 800.0, 600.0);
    /// assert_eq!(layout.cell_size, 10.0);
    /// assert_eq!((layout.origin_x, layout.origin_y), (0.0, 0.0));
    /// ```
    pub fn fit(grid_width: u32, grid_height: u32, screen_width: f32, screen_height: f32) -> Self {
        let columns = grid_width.max(1) as f32;
        let rows = grid_height.max(1) as f32;
        let cell_size = (screen_width / columns)
            .min(screen_height / rows)
            .floor()
            .max(1.0);
        Self {
            origin_x: ((screen_width - cell_size * columns) / 2.0).max(0.0).floor(),
            origin_y: ((screen_height - cell_size * rows) / 2.0).max(0.0).floor(),
            cell_size,
        }
    }

    /// Converts a pixel position to the board cell under it.
    pub fn screen_to_grid(&self, pixel_x: f32, pixel_y: f32) -> Position {
        Position::new(
            ((pixel_x - self.origin_x) / self.cell_size).floor() as i32,
            ((pixel_y - self.origin_y) / self.cell_size).floor() as i32,
        )
    }

    /// Gets the top-left pixel of a board cell.
    pub fn grid_to_screen(&self, pos: Position) -> (f32, f32) {
        (
            self.origin_x + pos.x as f32 * self.cell_size,
            self.origin_y + pos.y as f32 * self.cell_size,
        )
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(0.0, 0.0, crate::config::DEFAULT_CELL_SIZE)
    }
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    /// Primary mouse button pressed at a screen pixel
    Click { x: f32, y: f32 },
    /// Generate a fresh board
    Regenerate,
    /// Quit the game
    Quit,
}

/// Input handler for processing player commands.
pub struct InputHandler;

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Polls macroquad for this frame's input, if any.
    pub fn get_input(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PlayerInput::Quit);
        }

        if is_key_pressed(KeyCode::R) {
            return Some(PlayerInput::Regenerate);
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            return Some(PlayerInput::Click { x, y });
        }

        None
    }
}
