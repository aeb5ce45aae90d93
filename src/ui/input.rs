//! Mouse state for UI interaction

use macroquad::prelude::{is_mouse_button_down, is_mouse_button_pressed, mouse_position, MouseButton};
use crate::game::geometry::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool, // Just pressed this frame
}

impl MouseState {
    /// Read the mouse for this frame
    pub fn poll() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is clicking inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_needs_press_inside() {
        let button = Rect::new(10.0, 10.0, 100.0, 40.0);
        let mut mouse = MouseState { x: 50.0, y: 20.0, left_down: true, left_pressed: false };
        assert!(mouse.inside(&button));
        assert!(mouse.clicking(&button));
        assert!(!mouse.clicked(&button));

        mouse.left_pressed = true;
        assert!(mouse.clicked(&button));

        mouse.x = 200.0;
        assert!(!mouse.clicked(&button));
    }
}
