//! Game constants
//!
//! World dimensions, progression limits and effect tuning. Player physics
//! lives in `PlayerSettings` so individual levels can override it.

use serde::{Serialize, Deserialize};

/// World width in pixels (the playfield, not the window)
pub const WORLD_WIDTH: f32 = 800.0;

/// World height in pixels. The bottom edge acts as a floor.
pub const WORLD_HEIGHT: f32 = 500.0;

/// Highest level index that progression can unlock
pub const MAX_LEVELS: u32 = 20;

/// Number of buttons on the level select screen
pub const LEVEL_SELECT_COUNT: u32 = 7;

/// Level index that spawns the boss table instead of regular enemies
pub const BOSS_LEVEL: u32 = 20;

/// Particles emitted per collected item
pub const PARTICLE_COUNT: usize = 8;

/// Life lost by each particle per tick (life starts at 1.0)
pub const PARTICLE_DECAY: f32 = 0.02;

/// Exit radius; the exit collides as its bounding square
pub const EXIT_RADIUS: f32 = 30.0;

/// Wall-slide grace period in frames, re-armed on every wall contact
pub const WALL_SLIDE_TIMER: u32 = 15;

/// Player physics parameters.
///
/// Units are pixels and frames: velocities are pixels per tick and
/// gravity is pixels per tick squared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Collision box width
    pub width: f32,
    /// Collision box height
    pub height: f32,
    /// Horizontal run speed
    pub speed: f32,
    /// Initial upward velocity of a ground jump
    pub jump_power: f32,
    /// Initial upward velocity of a wall jump
    pub wall_jump_power: f32,
    /// Added to vertical velocity every tick while airborne
    pub gravity: f32,
    /// Maximum descent speed while clinging to a wall
    pub wall_slide_speed: f32,
    /// Horizontal wall-jump impulse as a multiple of `speed`
    pub wall_jump_speed_multiplier: f32,
    /// Player hit points
    pub max_health: i32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            speed: 5.0,
            jump_power: 12.0,
            wall_jump_power: 10.0,
            gravity: 0.5,
            wall_slide_speed: 2.0,
            wall_jump_speed_multiplier: 1.5,
            max_health: 100,
        }
    }
}
