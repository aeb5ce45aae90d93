//! World module - level data model and level file loading
//!
//! Levels are immutable configuration: spawn point, collectibles, obstacle
//! rectangles, exit, time limit and the number of items required to open
//! the exit.

mod level;

pub use level::*;
