//! Player Character
//!
//! Instant-response platformer movement with three controlling states:
//! grounded, airborne and wall-sliding. Horizontal speed has no momentum;
//! vertical speed accumulates gravity with no terminal velocity.
//!
//! Input is pushed in by the adapter layer (`PlayerInput`); the player never
//! reads devices itself.

use crate::config::{PlayerSettings, WORLD_HEIGHT, WORLD_WIDTH};
use super::components::{Health, Velocity};
use super::geometry::Rect;

/// Held-key state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: Velocity,
    pub on_ground: bool,
    pub on_wall: bool,
    /// Horizontal launch direction of the next wall jump (-1, 0 or 1)
    pub wall_jump_direction: i8,
    /// Frames left in which a wall jump is still allowed
    pub wall_slide_timer: u32,
    /// -1 facing left, 1 facing right
    pub facing: i8,
    pub input: PlayerInput,
    pub health: Health,
    pub settings: PlayerSettings,
}

impl Player {
    /// Create a player at the level spawn point
    pub fn new(x: f32, y: f32, settings: PlayerSettings) -> Self {
        Self {
            x,
            y,
            width: settings.width,
            height: settings.height,
            velocity: Velocity::default(),
            on_ground: false,
            on_wall: false,
            wall_jump_direction: 0,
            wall_slide_timer: 0,
            facing: 1,
            input: PlayerInput::default(),
            health: Health::new(settings.max_health),
            settings,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Replace the held-key state (called by the input adapter every frame)
    pub fn set_input(&mut self, input: PlayerInput) {
        self.input = input;
    }

    /// Apply damage from an enemy. Returns true if the player died.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health.damage(amount)
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Advance one tick: input, physics, world bounds, wall timer
    pub fn update(&mut self) {
        // Falling: ground contact must be re-established by collision this tick
        if self.velocity.y > 0.0 {
            self.on_ground = false;
        }

        self.handle_input();
        self.apply_physics();
        self.constrain_to_world();

        if self.wall_slide_timer > 0 {
            self.wall_slide_timer -= 1;
        }
    }

    fn handle_input(&mut self) {
        let speed = self.settings.speed;
        self.velocity.x = 0.0;

        if self.input.left {
            self.velocity.x = -speed;
            self.facing = -1;
        }
        if self.input.right {
            self.velocity.x = speed;
            self.facing = 1;
        }

        if self.input.up {
            if self.on_ground {
                self.velocity.y = -self.settings.jump_power;
                self.on_ground = false;
            } else if self.on_wall && self.wall_slide_timer > 0 {
                self.velocity.y = -self.settings.wall_jump_power;
                self.velocity.x = self.wall_jump_direction as f32
                    * speed
                    * self.settings.wall_jump_speed_multiplier;
                self.on_wall = false;
                self.wall_slide_timer = 0;
            }
        }
    }

    fn apply_physics(&mut self) {
        if self.on_wall && !self.on_ground && self.velocity.y > 0.0 {
            self.velocity.y = self.velocity.y.min(self.settings.wall_slide_speed);
        } else {
            self.velocity.y += self.settings.gravity;
        }

        self.x += self.velocity.x;
        self.y += self.velocity.y;
    }

    fn constrain_to_world(&mut self) {
        if self.x < 0.0 {
            self.x = 0.0;
        }
        if self.x + self.width > WORLD_WIDTH {
            self.x = WORLD_WIDTH - self.width;
        }

        // Floor only, the top of the world is open
        if self.y + self.height >= WORLD_HEIGHT {
            self.y = WORLD_HEIGHT - self.height;
            self.velocity.y = 0.0;
            self.on_ground = true;
        }
    }
}
