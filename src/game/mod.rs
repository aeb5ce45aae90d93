//! Gameplay
//!
//! Everything that happens inside a level: the player controller, enemies,
//! collectibles, collision, particles and the per-level session that ties
//! them together. `runtime` drives a session at a fixed tick rate and
//! `renderer` draws it.
//!
//! Design philosophy:
//! - Simulation is plain data and pure logic, no macroquad calls
//! - One tick is one 60 Hz frame; all speeds are per tick
//! - Systems talk through event queues, drained once per frame

pub mod geometry;
pub mod components;
pub mod player;
pub mod collectible;
pub mod collision;
pub mod enemy;
pub mod particles;
pub mod event;
pub mod session;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use session::{LevelSession, Summary};
pub use runtime::GameRuntime;
