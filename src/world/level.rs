//! Level loading
//!
//! Level files are RON by default. JSON exports (with the web editor's
//! camelCase field names) and brotli-packed RON are accepted too:
//! - Reading: auto-detects the format from the first byte
//! - Every loaded level is validated before it reaches the game

use std::io::Cursor;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::config::PlayerSettings;
use crate::game::geometry::Rect;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of collectibles in a level
    pub const MAX_COLLECTIBLES: usize = 512;
    /// Maximum number of obstacles in a level
    pub const MAX_OBSTACLES: usize = 512;
    /// Maximum time limit in seconds
    pub const MAX_TIME_LIMIT: u32 = 3600;
    /// Maximum string length for asset names
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 100_000.0;
}

/// A point in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Collectible placement; `kind` is "coin", "gem" or "special"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleSpec {
    pub x: f32,
    pub y: f32,
    #[serde(alias = "type", default = "default_collectible_kind")]
    pub kind: String,
}

fn default_collectible_kind() -> String {
    "coin".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Wall,
    Platform,
}

/// Static obstacle rectangle; `kind` is "wall" or "platform"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(alias = "type", default = "default_obstacle_kind")]
    pub kind: String,
}

fn default_obstacle_kind() -> String {
    "platform".to_string()
}

impl ObstacleSpec {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Anything that isn't a wall is drawn and treated as a platform
    pub fn obstacle_kind(&self) -> ObstacleKind {
        if self.kind == "wall" {
            ObstacleKind::Wall
        } else {
            ObstacleKind::Platform
        }
    }
}

/// Exit center; collides as a square of side 2 * EXIT_RADIUS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitSpec {
    pub x: f32,
    pub y: f32,
}

/// Immutable per-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(alias = "playerStart")]
    pub player_start: Point,
    #[serde(default)]
    pub collectibles: Vec<CollectibleSpec>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    pub exit: ExitSpec,
    /// Countdown length in seconds
    #[serde(alias = "timeLimit")]
    pub time_limit: u32,
    /// Items needed to open the exit (all items are needed for 3 stars)
    #[serde(alias = "requiredItems")]
    pub required_items: u32,
    /// Background image name under assets/img/
    #[serde(default)]
    pub background: Option<String>,
    /// Per-level physics overrides
    #[serde(default, alias = "playerSettings")]
    pub player_settings: PlayerSettings,
}

/// Error type for level loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Failed to read {path}: {reason}")]
    ReadError { path: String, reason: String },
    #[error("Parse error: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid level data: {0}")]
    InvalidData(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Asset path of a numbered level
pub fn level_path(level: u32) -> String {
    format!("assets/levels/level{}.ron", level)
}

/// Check if a float is valid (not NaN or Inf, within the coordinate limit)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn validate_point(x: f32, y: f32, context: &str) -> Result<(), String> {
    if !is_valid_float(x) || !is_valid_float(y) {
        return Err(format!("{}: invalid position ({}, {})", context, x, y));
    }
    Ok(())
}

fn validate_obstacle(obstacle: &ObstacleSpec, context: &str) -> Result<(), String> {
    validate_point(obstacle.x, obstacle.y, context)?;
    if !is_valid_float(obstacle.width) || !is_valid_float(obstacle.height) {
        return Err(format!("{}: invalid size", context));
    }
    if obstacle.width <= 0.0 || obstacle.height <= 0.0 {
        return Err(format!("{}: size must be positive ({} x {})",
            context, obstacle.width, obstacle.height));
    }
    Ok(())
}

fn validate_player_settings(settings: &PlayerSettings) -> Result<(), String> {
    let values = [
        settings.width,
        settings.height,
        settings.speed,
        settings.jump_power,
        settings.wall_jump_power,
        settings.gravity,
        settings.wall_slide_speed,
        settings.wall_jump_speed_multiplier,
    ];
    if values.iter().any(|v| !is_valid_float(*v)) {
        return Err("player_settings: non-finite value".to_string());
    }
    if settings.width <= 0.0 || settings.height <= 0.0 {
        return Err("player_settings: size must be positive".to_string());
    }
    if settings.max_health <= 0 {
        return Err("player_settings: max_health must be positive".to_string());
    }
    Ok(())
}

/// Validate a level after parsing
pub fn validate_level(level: &LevelData) -> Result<(), LevelError> {
    let fail = |msg: String| Err(LevelError::ValidationError(msg));

    if level.time_limit == 0 || level.time_limit > limits::MAX_TIME_LIMIT {
        return fail(format!("time_limit out of range ({})", level.time_limit));
    }
    if level.collectibles.len() > limits::MAX_COLLECTIBLES {
        return fail(format!("too many collectibles ({} > {})",
            level.collectibles.len(), limits::MAX_COLLECTIBLES));
    }
    if level.obstacles.len() > limits::MAX_OBSTACLES {
        return fail(format!("too many obstacles ({} > {})",
            level.obstacles.len(), limits::MAX_OBSTACLES));
    }
    if level.required_items as usize > level.collectibles.len() {
        return fail(format!("required_items ({}) exceeds collectible count ({})",
            level.required_items, level.collectibles.len()));
    }

    validate_point(level.player_start.x, level.player_start.y, "player_start")
        .map_err(LevelError::ValidationError)?;
    validate_point(level.exit.x, level.exit.y, "exit")
        .map_err(LevelError::ValidationError)?;

    for (i, item) in level.collectibles.iter().enumerate() {
        validate_point(item.x, item.y, &format!("collectibles[{}]", i))
            .map_err(LevelError::ValidationError)?;
        if item.kind.len() > limits::MAX_STRING_LEN {
            return fail(format!("collectibles[{}]: type name too long", i));
        }
    }
    for (i, obstacle) in level.obstacles.iter().enumerate() {
        validate_obstacle(obstacle, &format!("obstacles[{}]", i))
            .map_err(LevelError::ValidationError)?;
    }

    if let Some(background) = &level.background {
        if background.len() > limits::MAX_STRING_LEN || background.contains("..") {
            return fail(format!("invalid background name '{}'", background));
        }
    }

    validate_player_settings(&level.player_settings).map_err(LevelError::ValidationError)
}

/// Parse level data from bytes (RON, JSON or brotli-packed RON)
pub fn parse_level_data(bytes: &[u8]) -> Result<LevelData, LevelError> {
    // Text formats start with a bracket, a comment or whitespace; brotli is binary
    let is_plain_text = bytes
        .first()
        .map(|&b| matches!(b, b'(' | b'{' | b'/' | b' ' | b'\n' | b'\r' | b'\t'))
        .unwrap_or(false);

    let contents = if is_plain_text {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| LevelError::InvalidData(format!("invalid UTF-8: {}", e)))?
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(bytes), &mut decompressed)
            .map_err(|e| LevelError::InvalidData(format!("brotli decompression failed: {}", e)))?;
        String::from_utf8(decompressed)
            .map_err(|e| LevelError::InvalidData(format!("invalid UTF-8 after decompression: {}", e)))?
    };

    load_level_from_str(&contents)
}

/// Parse a level from a RON or JSON string
pub fn load_level_from_str(s: &str) -> Result<LevelData, LevelError> {
    let level: LevelData = if s.trim_start().starts_with('{') {
        serde_json::from_str(s)?
    } else {
        match ron::from_str(s) {
            Ok(level) => level,
            Err(e) => {
                let pos = e.position;
                let line = s.lines().nth(pos.line.saturating_sub(1)).unwrap_or("");
                tracing::error!(line = pos.line, col = pos.col, context = line.trim(), "RON parse error: {}", e.code);
                return Err(e.into());
            }
        }
    };

    validate_level(&level)?;
    Ok(level)
}
