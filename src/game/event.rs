//! Event System
//!
//! The level session reports what happened during a tick through event
//! queues instead of calling the runtime back. The runtime drains them once
//! per frame:
//! 1. Collection → ItemCollectedEvent → debug log
//! 2. Melee hit → DamageEvent → hit flash on the player sprite
//! 3. Enemy killed → DeathEvent → info log
//! 4. Terminal transition → LevelEndedEvent → progress is saved
//!
//! Each consumer handles its own concern without the session knowing about it.

use super::collectible::CollectibleKind;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all session events
#[derive(Debug, Default)]
pub struct SessionEvents {
    /// Item picked up by the player
    pub item_collected: EventQueue<ItemCollectedEvent>,

    /// Enemy hit the player
    pub damage: EventQueue<DamageEvent>,

    /// Enemy died
    pub death: EventQueue<DeathEvent>,

    /// Level reached Complete or Over
    pub level_ended: EventQueue<LevelEndedEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// An item was collected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemCollectedEvent {
    pub kind: CollectibleKind,
    /// Item center (particle origin)
    pub x: f32,
    pub y: f32,
    pub points: u32,
}

/// An enemy dealt damage to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    /// Index of the attacking enemy in the roster
    pub source: usize,
    pub amount: i32,
    /// Player health after the hit
    pub remaining: i32,
}

/// An enemy died
#[derive(Debug, Clone, PartialEq)]
pub struct DeathEvent {
    /// Type tag of the dead enemy ("slime", "boss")
    pub kind: String,
    /// Where it died
    pub x: f32,
    pub y: f32,
}

/// The level session reached a terminal phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEndedEvent {
    pub level: u32,
    pub success: bool,
    /// 1-3 on success, 0 on failure
    pub stars: u8,
}
