//! Immediate-mode menus and HUD
//!
//! Title, level select and summary screens, plus the in-game HUD. Each
//! screen draws itself from read-only state and returns the navigation
//! command the player chose this frame, if any.
//!
//! Design principles:
//! - Immediate mode (no retained state, rebuilt each frame)
//! - Fixed 800×500 layout matching the playfield

mod input;
mod theme;
mod widgets;
mod screens;

pub use input::*;
pub use widgets::*;
pub use screens::*;
