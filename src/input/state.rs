//! Input state
//!
//! Polls macroquad's keyboard into the action API.

use macroquad::prelude::*;
use crate::game::player::PlayerInput;
use super::Action;

/// Keys bound to each action; any of them triggers it
pub fn bindings(action: Action) -> &'static [KeyCode] {
    match action {
        Action::MoveLeft => &[KeyCode::Left, KeyCode::A],
        Action::MoveRight => &[KeyCode::Right, KeyCode::D],
        Action::Jump => &[KeyCode::Up, KeyCode::W, KeyCode::Space],
        Action::Back => &[KeyCode::Escape],
        Action::Confirm => &[KeyCode::Enter, KeyCode::KpEnter],
        Action::Retry => &[KeyCode::R],
    }
}

/// Keyboard state for one frame
#[derive(Debug, Default)]
pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        bindings(action).iter().any(|&key| is_key_down(key))
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        bindings(action).iter().any(|&key| is_key_pressed(key))
    }

    /// Held movement keys as the player's input for this frame
    pub fn player_input(&self) -> PlayerInput {
        let [left, right, up] = Action::MOVEMENT.map(|action| self.action_down(action));
        PlayerInput { left, right, up }
    }
}
