//! # Display Management
//!
//! Screen painting with macroquad: the welcome screen and the board.

use crate::input::BoardLayout;
use crate::rendering::Button;
use crate::{CellState, CellType, CellView, Dungeon, Position};
use macroquad::prelude::*;

const TITLE: &str = "Welcome to D&D Sweeper";
const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// Welcome screen start button
    pub start_button: Button,
    /// Title font size in pixels
    pub title_font_size: f32,
}

impl MacroquadDisplay {
    /// Creates a display laid out for the given screen size.
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            start_button: Button::centered(
                screen_width,
                screen_height / 2.0,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
                "Start Game",
            ),
            title_font_size: 48.0,
        }
    }

    /// Renders the title and the start button.
    pub fn render_welcome(&self) {
        clear_background(WHITE);

        let dimensions = measure_text(TITLE, None, self.title_font_size as u16, 1.0);
        draw_text(
            TITLE,
            self.screen_width / 2.0 - dimensions.width / 2.0,
            self.screen_height / 3.0 + dimensions.offset_y / 2.0,
            self.title_font_size,
            BLACK,
        );

        self.start_button.draw();
    }

    /// Renders every cell of the board plus a one-line status bar.
    pub fn render_dungeon(&self, dungeon: &Dungeon, layout: &BoardLayout) {
        clear_background(BLACK);

        let gap = if layout.cell_size >= 6.0 { 1.0 } else { 0.0 };
        for y in 0..dungeon.height() as i32 {
            for x in 0..dungeon.width() as i32 {
                let Some(view) = dungeon.query_cell(x, y) else {
                    continue;
                };
                let (pixel_x, pixel_y) = layout.grid_to_screen(Position::new(x, y));
                draw_rectangle(
                    pixel_x,
                    pixel_y,
                    layout.cell_size - gap,
                    layout.cell_size - gap,
                    cell_color(&view),
                );

                if let Some(label) = hint_label(&view) {
                    let font_size = layout.cell_size * 1.2;
                    draw_text(
                        &label,
                        pixel_x + layout.cell_size * 0.25,
                        pixel_y + layout.cell_size * 0.85,
                        font_size,
                        BLACK,
                    );
                }
            }
        }

        let status = format!(
            "Seed {}  |  {} revealed  |  {} hidden  |  R: new board  Esc: quit",
            dungeon.seed(),
            dungeon.revealed_count(),
            dungeon.hidden_count()
        );
        draw_text(&status, 8.0, self.screen_height - 6.0, 16.0, WHITE);
    }
}

/// Fill color for a cell as the player currently sees it.
fn cell_color(view: &CellView) -> Color {
    match view.state {
        CellState::Hidden => DARKGRAY,
        CellState::Flagged => RED,
        CellState::Revealed => match view.cell_type {
            CellType::Wall => Color::new(0.15, 0.15, 0.18, 1.0),
            CellType::Floor => BEIGE,
            CellType::Door => BROWN,
            CellType::Monster => MAROON,
            CellType::Treasure => GOLD,
        },
    }
}

/// Hint digit shown on revealed floor, if any.
fn hint_label(view: &CellView) -> Option<String> {
    let shows_hint = view.state == CellState::Revealed
        && view.cell_type == CellType::Floor
        && view.adjacent_count > 0;
    shows_hint.then(|| view.adjacent_count.to_string())
}
