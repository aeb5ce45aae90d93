//! Collectibles
//!
//! Coins, gems and specials. Each kind has a fixed size, color and point
//! value. Collection is a one-way transition.

use super::geometry::Rect;

/// Animation phase advance per tick (pulse and spin)
pub const ANIMATION_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    Coin,
    Gem,
    Special,
}

impl CollectibleKind {
    /// Parse a level-file type name. Unknown names become coins.
    pub fn from_name(name: &str) -> Self {
        match name {
            "gem" => CollectibleKind::Gem,
            "special" => CollectibleKind::Special,
            _ => CollectibleKind::Coin,
        }
    }

    /// Bounding square side in pixels
    pub fn size(&self) -> f32 {
        match self {
            CollectibleKind::Coin => 12.0,
            CollectibleKind::Gem => 15.0,
            CollectibleKind::Special => 18.0,
        }
    }

    /// Display color (RGB)
    pub fn color(&self) -> [u8; 3] {
        match self {
            CollectibleKind::Coin => [0xFF, 0xD7, 0x00],
            CollectibleKind::Gem => [0xFF, 0x69, 0xB4],
            CollectibleKind::Special => [0x00, 0xFF, 0xFF],
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            CollectibleKind::Coin => 10,
            CollectibleKind::Gem => 25,
            CollectibleKind::Special => 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Collectible {
    /// Center position
    pub x: f32,
    pub y: f32,
    pub kind: CollectibleKind,
    pub collected: bool,
    /// Render-only phase; keeps advancing after collection
    pub animation_phase: f32,
}

impl Collectible {
    pub fn new(x: f32, y: f32, kind: CollectibleKind, animation_phase: f32) -> Self {
        Self {
            x,
            y,
            kind,
            collected: false,
            animation_phase,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.x, self.y, self.kind.size())
    }

    pub fn update(&mut self) {
        self.animation_phase += ANIMATION_SPEED;
    }

    /// Mark as collected. Returns the point value the first time, 0 afterwards.
    pub fn collect(&mut self) -> u32 {
        if self.collected {
            return 0;
        }
        self.collected = true;
        self.kind.points()
    }

    /// Size multiplier for the pulse effect, in [0.8, 1.2]
    pub fn pulse(&self) -> f32 {
        self.animation_phase.sin() * 0.2 + 1.0
    }
}
