//! UI Theme - Shared colors and styling constants
//!
//! Centralized color definitions for the menus, HUD and summary screen.

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Menu background
pub const BG_COLOR: Color = Color::new(0.11, 0.13, 0.20, 1.0);

/// Summary panel and HUD bar background
pub const PANEL_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.75);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.95, 0.95, 0.95, 1.0);

/// Dimmed/secondary text (stats, hints)
pub const TEXT_DIM: Color = Color::new(0.87, 0.87, 0.87, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Screen title size
pub const FONT_SIZE_TITLE: f32 = 48.0;

/// Button labels and headers
pub const FONT_SIZE_HEADER: f32 = 24.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 20.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 16.0;

// =============================================================================
// Buttons
// =============================================================================

pub const BUTTON_BG: Color = Color::new(0.30, 0.69, 0.31, 1.0); // #4CAF50
pub const BUTTON_HOVER: Color = Color::new(0.40, 0.79, 0.41, 1.0);
pub const BUTTON_PRESSED: Color = Color::new(0.22, 0.56, 0.24, 1.0);
pub const BUTTON_LOCKED: Color = Color::new(0.33, 0.33, 0.36, 1.0);
pub const BUTTON_COMPLETE: Color = Color::new(0.13, 0.59, 0.95, 1.0); // #2196F3

// =============================================================================
// Stars and summary
// =============================================================================

/// Earned star
pub const STAR_ON: Color = Color::new(1.0, 0.84, 0.0, 1.0); // #FFD700
/// Missing star
pub const STAR_OFF: Color = Color::new(0.4, 0.4, 0.4, 1.0); // #666

pub const SUCCESS_COLOR: Color = Color::new(0.30, 0.69, 0.31, 1.0); // #4CAF50
pub const FAILURE_COLOR: Color = Color::new(0.96, 0.26, 0.21, 1.0); // #f44336
pub const GOOD_COLOR: Color = Color::new(0.51, 0.78, 0.52, 1.0); // #81C784
