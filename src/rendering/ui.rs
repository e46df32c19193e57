//! # User Interface Elements
//!
//! Clickable widgets drawn over the game screen.

use macroquad::prelude::*;

/// A labelled rectangular button that highlights while hovered.
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub text: String,
    pub font_size: f32,
    pub is_hovered: bool,
}

impl Button {
    /// Creates a button with its top-left corner at `(x, y)`.
    pub fn new(x: f32, y: f32, width: f32, height: f32, text: impl Into<String>) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            text: text.into(),
            font_size: 36.0,
            is_hovered: false,
        }
    }

    /// Creates a button horizontally centered on a screen of the given width.
    pub fn centered(screen_width: f32, y: f32, width: f32, height: f32, text: impl Into<String>) -> Self {
        Self::new(screen_width / 2.0 - width / 2.0, y, width, height, text)
    }

    /// Updates the hover flag from the pointer position.
    pub fn update_hover(&mut self, pointer_x: f32, pointer_y: f32) {
        self.is_hovered = self.rect.contains(vec2(pointer_x, pointer_y));
    }

    /// Whether a click at the given pixel lands on the button.
    pub fn is_clicked(&self, click_x: f32, click_y: f32) -> bool {
        self.rect.contains(vec2(click_x, click_y))
    }

    /// Draws the button with its label centered.
    pub fn draw(&self) {
        let background = if self.is_hovered { GRAY } else { BLACK };
        draw_rectangle(self.rect.x, self.rect.y, self.rect.w, self.rect.h, background);

        let dimensions = measure_text(&self.text, None, self.font_size as u16, 1.0);
        let (center_x, center_y) = (self.rect.x + self.rect.w / 2.0, self.rect.y + self.rect.h / 2.0);
        draw_text(
            &self.text,
            center_x - dimensions.width / 2.0,
            center_y + dimensions.offset_y / 2.0,
            self.font_size,
            WHITE,
        );
    }
}
