//! # Scene Management System
//!
//! Switches between the welcome screen and the board, so the main loop only
//! has to drive frames.

use crate::{
    BoardLayout, Dungeon, GenerationConfig, InputHandler, MacroquadDisplay, PlayerInput,
    SweeperResult,
};
use log::{error, info};
use macroquad::prelude::*;

/// Pixels kept free under the board for the status line.
const STATUS_BAR_HEIGHT: f32 = 24.0;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Title and start button
    Welcome,
    /// A board is on screen and accepts clicks
    Playing,
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    config: GenerationConfig,
    dungeon: Option<Dungeon>,
    layout: BoardLayout,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Creates a scene manager showing the welcome screen.
    pub fn new(config: GenerationConfig, display: MacroquadDisplay, input_handler: InputHandler) -> Self {
        let layout = Self::fit_board(&config, &display);
        Self {
            current_scene: SceneType::Welcome,
            config,
            dungeon: None,
            layout,
            display,
            input_handler,
        }
    }

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    pub fn dungeon(&self) -> Option<&Dungeon> {
        self.dungeon.as_ref()
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> SweeperResult<()> {
        loop {
            let exit_requested = match self.current_scene {
                SceneType::Welcome => self.update_welcome_scene()?,
                SceneType::Playing => self.update_playing_scene()?,
            };
            if exit_requested {
                break;
            }
            next_frame().await;
        }
        info!("Scene loop ended");
        Ok(())
    }

    /// Updates the welcome scene, returns true if exit is requested
    fn update_welcome_scene(&mut self) -> SweeperResult<bool> {
        if is_key_pressed(KeyCode::Escape) {
            return Ok(true);
        }

        let (mouse_x, mouse_y) = mouse_position();
        let button = &mut self.display.start_button;
        button.update_hover(mouse_x, mouse_y);

        if is_mouse_button_pressed(MouseButton::Left) && button.is_clicked(mouse_x, mouse_y) {
            self.start_game()?;
        }

        self.display.render_welcome();
        Ok(false)
    }

    /// Updates the playing scene, returns true if exit is requested
    fn update_playing_scene(&mut self) -> SweeperResult<bool> {
        if let Some(input) = self.input_handler.get_input() {
            match input {
                PlayerInput::Quit => return Ok(true),
                PlayerInput::Regenerate => self.regenerate(),
                PlayerInput::Click { x, y } => self.handle_click(x, y),
            }
        }

        if let Some(dungeon) = &self.dungeon {
            self.display.render_dungeon(dungeon, &self.layout);
        }
        Ok(false)
    }

    /// Builds the first board and switches to the playing scene.
    pub fn start_game(&mut self) -> SweeperResult<()> {
        info!("Starting game with seed {}", self.config.seed);
        self.dungeon = Some(Dungeon::generate(&self.config)?);
        self.current_scene = SceneType::Playing;
        Ok(())
    }

    /// Replaces the board with one built from the next seed. A failed build
    /// keeps the current board.
    pub fn regenerate(&mut self) {
        let mut config = self.config.clone();
        config.seed = config.seed.wrapping_add(1);

        match Dungeon::generate(&config) {
            Ok(dungeon) => {
                info!("Regenerated board with seed {}", config.seed);
                self.config = config;
                self.dungeon = Some(dungeon);
            }
            Err(e) => error!("Could not regenerate board with seed {}: {}", config.seed, e),
        }
    }

    /// Reveals the cell under a screen pixel, if there is one.
    pub fn handle_click(&mut self, pixel_x: f32, pixel_y: f32) {
        let Some(dungeon) = self.dungeon.as_mut() else {
            return;
        };
        let pos = self.layout.screen_to_grid(pixel_x, pixel_y);
        dungeon.reveal(pos.x, pos.y);
    }

    fn fit_board(config: &GenerationConfig, display: &MacroquadDisplay) -> BoardLayout {
        BoardLayout::fit(
            config.width,
            config.height,
            display.screen_width,
            (display.screen_height - STATUS_BAR_HEIGHT).max(1.0),
        )
    }
}
