//! Game Runtime
//!
//! Drives a `LevelSession` from macroquad's variable frame time. The
//! simulation steps at a fixed 60 Hz so the per-tick physics constants mean
//! the same thing on every display; the countdown drains its own 1-second
//! accumulator after the simulation steps of the frame.
//!
//! The runtime is also the consumer of session events: it logs them, keeps
//! the hit flash for the renderer, and merges a completed level into the
//! progress store.

use crate::progress::ProgressStore;
use super::player::PlayerInput;
use super::session::{LevelSession, Summary};

/// Length of one simulation tick in seconds
pub const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Countdown cadence in seconds
pub const COUNTDOWN_INTERVAL: f32 = 1.0;

/// Longest frame the simulation will account for (stalls, hidden tabs)
pub const MAX_FRAME_SECONDS: f32 = 0.25;

/// Simulation steps allowed in one frame before the backlog is dropped
pub const MAX_TICKS_PER_FRAME: u32 = 4;

/// Frames the player sprite flashes after an enemy hit
pub const HIT_FLASH_FRAMES: u32 = 12;

pub struct GameRuntime {
    session: LevelSession,
    /// Cleared on the terminal transition; no ticks afterwards
    running: bool,
    tick_accumulator: f32,
    countdown_accumulator: f32,
    hit_flash: u32,
}

impl GameRuntime {
    pub fn new(session: LevelSession) -> Self {
        Self {
            running: session.is_running(),
            session,
            tick_accumulator: 0.0,
            countdown_accumulator: 0.0,
            hit_flash: 0,
        }
    }

    pub fn session(&self) -> &LevelSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames of hit flash left (renderer)
    pub fn hit_flash(&self) -> u32 {
        self.hit_flash
    }

    /// Advance by one rendered frame. Returns the summary on the frame the
    /// session ends; progress has already been recorded by then.
    pub fn update(
        &mut self,
        frame_dt: f32,
        input: PlayerInput,
        store: &dyn ProgressStore,
    ) -> Option<Summary> {
        if !self.running {
            return None;
        }
        // The countdown follows wall-clock time; only the simulation is capped
        let frame_dt = frame_dt.max(0.0);
        let sim_dt = frame_dt.min(MAX_FRAME_SECONDS);

        self.session.set_input(input);
        self.hit_flash = self.hit_flash.saturating_sub(1);

        // Simulation
        self.tick_accumulator += sim_dt;
        let mut steps = 0;
        while self.tick_accumulator >= TICK_SECONDS
            && steps < MAX_TICKS_PER_FRAME
            && self.session.is_running()
        {
            self.session.tick();
            self.tick_accumulator -= TICK_SECONDS;
            steps += 1;
        }
        self.tick_accumulator = self.tick_accumulator.min(TICK_SECONDS);

        // Countdown
        if self.session.countdown_active() {
            self.countdown_accumulator += frame_dt;
            while self.countdown_accumulator >= COUNTDOWN_INTERVAL && self.session.countdown_active() {
                self.countdown_accumulator -= COUNTDOWN_INTERVAL;
                self.session.tick_second();
            }
        }

        self.process_events(store)
    }

    fn process_events(&mut self, store: &dyn ProgressStore) -> Option<Summary> {
        let events = self.session.events_mut();

        for item in events.item_collected.drain() {
            tracing::debug!(kind = ?item.kind, x = item.x, y = item.y, points = item.points, "item collected");
        }

        for hit in events.damage.drain() {
            tracing::debug!(enemy = hit.source, amount = hit.amount, remaining = hit.remaining, "player hit");
            self.hit_flash = HIT_FLASH_FRAMES;
        }

        for death in events.death.drain() {
            tracing::debug!(kind = %death.kind, x = death.x, y = death.y, "enemy death");
        }

        let ended = events.level_ended.drain().last()?;
        self.running = false;
        self.countdown_accumulator = 0.0;
        self.tick_accumulator = 0.0;

        if ended.success {
            store.record_completion(ended.level, ended.stars);
        }
        self.session.summary().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerSettings;
    use crate::game::session::SessionPhase;
    use crate::progress::{MemoryProgressStore, ProgressStore};
    use crate::world::{ExitSpec, LevelData, Point};

    fn level(start: (f32, f32), exit: (f32, f32), time_limit: u32) -> LevelData {
        LevelData {
            player_start: Point { x: start.0, y: start.1 },
            collectibles: Vec::new(),
            obstacles: Vec::new(),
            exit: ExitSpec { x: exit.0, y: exit.1 },
            time_limit,
            required_items: 0,
            background: None,
            player_settings: PlayerSettings::default(),
        }
    }

    #[test]
    fn test_one_tick_per_60hz_frame() {
        let store = MemoryProgressStore::in_memory();
        let mut runtime = GameRuntime::new(LevelSession::new(1, level((600.0, 0.0), (50.0, 50.0), 30), 0));

        runtime.update(TICK_SECONDS, PlayerInput::default(), &store);
        // One tick of gravity from rest
        assert_eq!(runtime.session().player().velocity.y, 0.5);

        // A long stall is capped
        runtime.update(10.0, PlayerInput::default(), &store);
        assert_eq!(runtime.session().player().velocity.y, 0.5 * (1 + MAX_TICKS_PER_FRAME) as f32);
    }

    #[test]
    fn test_countdown_cadence() {
        let store = MemoryProgressStore::in_memory();
        let mut runtime = GameRuntime::new(LevelSession::new(1, level((600.0, 0.0), (50.0, 50.0), 30), 0));

        for _ in 0..3 {
            runtime.update(0.25, PlayerInput::default(), &store);
        }
        assert_eq!(runtime.session().hud().time_left, 30);
        runtime.update(0.25, PlayerInput::default(), &store);
        assert_eq!(runtime.session().hud().time_left, 29);
    }

    #[test]
    fn test_countdown_keeps_wall_clock_through_long_frames() {
        let store = MemoryProgressStore::in_memory();
        let mut runtime = GameRuntime::new(LevelSession::new(1, level((600.0, 0.0), (50.0, 50.0), 30), 0));

        for _ in 0..3 {
            runtime.update(1.0, PlayerInput::default(), &store);
        }
        assert_eq!(runtime.session().hud().time_left, 27);

        // A single 2.5 s stall still counts two whole seconds
        runtime.update(2.5, PlayerInput::default(), &store);
        assert_eq!(runtime.session().hud().time_left, 25);
        // The simulation still ran at most MAX_TICKS_PER_FRAME per frame
        assert_eq!(
            runtime.session().player().velocity.y,
            0.5 * (4 * MAX_TICKS_PER_FRAME) as f32
        );
    }

    #[test]
    fn test_timeout_stops_runtime_without_saving() {
        let store = MemoryProgressStore::in_memory();
        let mut runtime = GameRuntime::new(LevelSession::new(1, level((600.0, 0.0), (50.0, 50.0), 1), 0));

        let mut summary = None;
        for _ in 0..4 {
            summary = summary.or(runtime.update(0.25, PlayerInput::default(), &store));
        }
        let summary = summary.unwrap();
        assert!(!summary.success);
        assert!(!runtime.is_running());
        assert!(!runtime.session().countdown_active());
        assert_eq!(store.load_or_default().unlocked_levels, 1);

        // No further updates
        assert!(runtime.update(1.0, PlayerInput::default(), &store).is_none());
    }

    #[test]
    fn test_completion_records_progress() {
        let store = MemoryProgressStore::in_memory();
        let mut runtime = GameRuntime::new(LevelSession::new(1, level((600.0, 400.0), (625.0, 425.0), 30), 0));

        let summary = runtime.update(TICK_SECONDS, PlayerInput::default(), &store).unwrap();

        assert!(summary.success);
        assert_eq!(summary.stars, 3);
        assert_eq!(runtime.session().phase(), SessionPhase::Complete);
        let record = store.load_or_default();
        assert_eq!(record.unlocked_levels, 2);
        assert_eq!(record.stars(1), 3);
    }

    #[test]
    fn test_enemy_hit_starts_flash() {
        let store = MemoryProgressStore::in_memory();
        // Level 1 slime at (150, 200)
        let mut runtime = GameRuntime::new(LevelSession::new(1, level((150.0, 200.0), (700.0, 50.0), 30), 0));

        runtime.update(TICK_SECONDS, PlayerInput::default(), &store);
        assert_eq!(runtime.hit_flash(), HIT_FLASH_FRAMES);
        assert_eq!(runtime.session().hud().health, 90);
    }
}
