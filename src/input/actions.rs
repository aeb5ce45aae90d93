//! Action definitions
//!
//! Keyboard layout:
//! - Left / A = move left
//! - Right / D = move right
//! - Up / W / Space = jump (and wall jump)
//! - Escape = back to level select
//! - Enter = confirm (start, next level)
//! - R = retry the level

/// All actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveLeft,
    MoveRight,
    Jump,

    // Navigation (pressed)
    Back,
    Confirm,
    Retry,
}

impl Action {
    /// Actions polled as held keys every tick
    pub const MOVEMENT: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Jump];
}
