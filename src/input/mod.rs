//! Keyboard input
//!
//! Maps keys to actions and builds the held-key `PlayerInput` the player
//! consumes every tick. Entities never read devices themselves.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
