//! Shared components
//!
//! Plain data pieces reused by the player and the enemies.

use serde::{Serialize, Deserialize};

/// Velocity in pixels per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Health component for damageable entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, flooring at zero. Returns true if this hit was lethal.
    pub fn damage(&mut self, amount: i32) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current = (self.current - amount).max(0);
        self.current == 0
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Remaining fraction in [0, 1] (health bars)
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}
