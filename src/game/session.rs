//! Level Session
//!
//! Owns everything that lives for one attempt at one level: the player,
//! collectibles, enemy roster, particles, score and countdown. The runtime
//! drives it through two entry points, `tick` once per frame and
//! `tick_second` on the 1-second countdown cadence.
//!
//! Phases: Running → Complete (enough items and the exit reached) or
//! Over (time ran out or the player was defeated). Both terminal phases
//! are final; every entry point is a no-op outside Running.

use std::f32::consts::TAU;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use crate::world::{ExitSpec, LevelData, ObstacleSpec};
use super::collectible::{Collectible, CollectibleKind};
use super::collision::{check_player_collectible, check_player_exit, resolve_player_obstacle};
use super::enemy::EnemyRoster;
use super::event::{ItemCollectedEvent, LevelEndedEvent, SessionEvents};
use super::particles::ParticleSystem;
use super::player::{Player, PlayerInput};

pub const MSG_COMPLETE: &str = "Level Complete!";
pub const MSG_TIME_UP: &str = "Time's up!";
pub const MSG_DEFEATED: &str = "You were defeated!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    Complete,
    Over,
}

/// Result of a finished session, shown on the summary screen
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub level: u32,
    pub success: bool,
    pub message: String,
    /// 1-3 on success, 0 on failure
    pub stars: u8,
    pub score: u32,
    pub collected: u32,
    pub required: u32,
    pub time_left: u32,
}

/// Values shown in the in-game HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub level: u32,
    pub score: u32,
    pub collected: u32,
    pub required: u32,
    pub time_left: u32,
    pub health: i32,
    pub max_health: i32,
}

/// Star rating of a completed level.
///
/// 3 stars need at least half the time left AND every item; 2 stars need
/// 30% of the time OR every item; anything else is 1 star.
pub fn star_rating(time_fraction: f32, all_collected: bool) -> u8 {
    if time_fraction >= 0.5 && all_collected {
        3
    } else if time_fraction >= 0.3 || all_collected {
        2
    } else {
        1
    }
}

pub struct LevelSession {
    level: u32,
    data: LevelData,
    player: Player,
    collectibles: Vec<Collectible>,
    enemies: EnemyRoster,
    particles: ParticleSystem,
    score: u32,
    collected: u32,
    time_left: u32,
    phase: SessionPhase,
    countdown_active: bool,
    summary: Option<Summary>,
    events: SessionEvents,
    rng: SmallRng,
}

impl LevelSession {
    /// Build the entities of a loaded level and start running
    pub fn new(level: u32, data: LevelData, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);

        let player = Player::new(data.player_start.x, data.player_start.y, data.player_settings);
        let collectibles = data
            .collectibles
            .iter()
            .map(|spec| {
                let phase = rng.gen_range(0.0..TAU);
                Collectible::new(spec.x, spec.y, CollectibleKind::from_name(&spec.kind), phase)
            })
            .collect();
        let enemies = EnemyRoster::spawn_for_level(level);

        tracing::info!(
            level,
            collectibles = data.collectibles.len(),
            obstacles = data.obstacles.len(),
            enemies = enemies.len(),
            time_limit = data.time_limit,
            "session started"
        );

        Self {
            level,
            time_left: data.time_limit,
            data,
            player,
            collectibles,
            enemies,
            particles: ParticleSystem::new(),
            score: 0,
            collected: 0,
            phase: SessionPhase::Running,
            countdown_active: true,
            summary: None,
            events: SessionEvents::new(),
            rng,
        }
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Forward the held keys to the player
    pub fn set_input(&mut self, input: PlayerInput) {
        self.player.set_input(input);
    }

    /// One frame of simulation
    pub fn tick(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }

        self.player.update();

        self.enemies.update(&mut self.player, &mut self.events.damage);
        if self.player.is_dead() {
            self.end(false, MSG_DEFEATED);
            return;
        }

        for obstacle in &self.data.obstacles {
            resolve_player_obstacle(&mut self.player, obstacle);
        }

        for item in &mut self.collectibles {
            item.update();
            if !check_player_collectible(&self.player, item) {
                continue;
            }
            let points = item.collect();
            if points > 0 {
                self.particles.spawn_burst(item.x, item.y, item.kind.color(), &mut self.rng);
                self.score += points;
                self.collected += 1;
                self.events.item_collected.send(ItemCollectedEvent {
                    kind: item.kind,
                    x: item.x,
                    y: item.y,
                    points,
                });
            }
        }

        self.particles.update();

        if self.exit_open() && check_player_exit(&self.player, &self.data.exit) {
            self.end(true, MSG_COMPLETE);
        }
    }

    /// One step of the 1-second countdown
    pub fn tick_second(&mut self) {
        if self.phase != SessionPhase::Running || !self.countdown_active {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end(false, MSG_TIME_UP);
        }
    }

    fn end(&mut self, success: bool, message: &str) {
        self.phase = if success { SessionPhase::Complete } else { SessionPhase::Over };
        self.countdown_active = false;

        let stars = if success {
            let time_fraction = self.time_left as f32 / self.data.time_limit as f32;
            star_rating(time_fraction, self.all_collected())
        } else {
            0
        };

        tracing::info!(
            level = self.level,
            success,
            stars,
            score = self.score,
            time_left = self.time_left,
            "{}", message
        );

        self.summary = Some(Summary {
            level: self.level,
            success,
            message: message.to_string(),
            stars,
            score: self.score,
            collected: self.collected,
            required: self.data.required_items,
            time_left: self.time_left,
        });
        self.events.level_ended.send(LevelEndedEvent { level: self.level, success, stars });
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn countdown_active(&self) -> bool {
        self.countdown_active
    }

    /// Set once the session reaches a terminal phase
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Enough items collected for the exit to accept the player
    pub fn exit_open(&self) -> bool {
        self.collected >= self.data.required_items
    }

    /// Every collectible of the level gathered (3-star requirement)
    pub fn all_collected(&self) -> bool {
        self.collected as usize >= self.collectibles.len()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            level: self.level,
            score: self.score,
            collected: self.collected,
            required: self.data.required_items,
            time_left: self.time_left,
            health: self.player.health.current,
            max_health: self.player.health.max,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn obstacles(&self) -> &[ObstacleSpec] {
        &self.data.obstacles
    }

    pub fn exit(&self) -> &ExitSpec {
        &self.data.exit
    }

    pub fn enemies(&self) -> &EnemyRoster {
        &self.enemies
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Events produced since the last drain
    pub fn events_mut(&mut self) -> &mut SessionEvents {
        &mut self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerSettings;
    use crate::world::{CollectibleSpec, Point};

    fn level(start: (f32, f32), exit: (f32, f32), items: Vec<CollectibleSpec>, required: u32) -> LevelData {
        LevelData {
            player_start: Point { x: start.0, y: start.1 },
            collectibles: items,
            obstacles: Vec::new(),
            exit: ExitSpec { x: exit.0, y: exit.1 },
            time_limit: 10,
            required_items: required,
            background: None,
            player_settings: PlayerSettings::default(),
        }
    }

    fn coin(x: f32, y: f32) -> CollectibleSpec {
        CollectibleSpec { x, y, kind: "coin".to_string() }
    }

    #[test]
    fn test_star_table() {
        assert_eq!(star_rating(1.0, true), 3);
        assert_eq!(star_rating(0.5, true), 3);
        assert_eq!(star_rating(0.49, true), 2);
        assert_eq!(star_rating(0.3, false), 2);
        assert_eq!(star_rating(0.29, false), 1);
        assert_eq!(star_rating(0.0, true), 2);
    }

    #[test]
    fn test_reaching_open_exit_completes() {
        let mut session = LevelSession::new(1, level((600.0, 400.0), (625.0, 425.0), vec![], 0), 1);
        session.tick();

        assert_eq!(session.phase(), SessionPhase::Complete);
        assert!(!session.countdown_active());
        let summary = session.summary().unwrap();
        assert!(summary.success);
        assert_eq!(summary.message, MSG_COMPLETE);
        assert_eq!(summary.stars, 3);

        let ended: Vec<_> = session.events_mut().level_ended.drain().collect();
        assert_eq!(ended, vec![LevelEndedEvent { level: 1, success: true, stars: 3 }]);
    }

    #[test]
    fn test_closed_exit_is_ignored() {
        let mut session = LevelSession::new(
            1,
            level((600.0, 400.0), (625.0, 425.0), vec![coin(50.0, 50.0)], 1),
            1,
        );
        session.tick();
        assert!(session.is_running());
        assert!(!session.exit_open());
    }

    #[test]
    fn test_collection_scores_and_bursts() {
        let mut session = LevelSession::new(
            1,
            level((600.0, 400.0), (50.0, 50.0), vec![coin(625.0, 425.0), coin(50.0, 300.0)], 1),
            2,
        );
        session.tick();

        let hud = session.hud();
        assert_eq!(hud.score, 10);
        assert_eq!(hud.collected, 1);
        assert!(session.collectibles()[0].collected);
        assert_eq!(session.particles().iter().count(), crate::config::PARTICLE_COUNT);
        assert_eq!(session.events_mut().item_collected.drain().count(), 1);
        assert!(session.exit_open());
        assert!(!session.all_collected());

        // Already collected: no second payout
        session.tick();
        assert_eq!(session.hud().score, 10);
        assert_eq!(session.hud().collected, 1);
    }

    #[test]
    fn test_countdown_runs_out() {
        let mut data = level((600.0, 400.0), (50.0, 50.0), vec![], 0);
        data.time_limit = 3;
        let mut session = LevelSession::new(1, data, 3);

        session.tick_second();
        session.tick_second();
        assert_eq!(session.hud().time_left, 1);
        assert!(session.is_running());

        session.tick_second();
        assert_eq!(session.phase(), SessionPhase::Over);
        let summary = session.summary().unwrap();
        assert!(!summary.success);
        assert_eq!(summary.message, MSG_TIME_UP);
        assert_eq!(summary.stars, 0);

        // Terminal phases are final
        session.tick_second();
        session.tick();
        assert_eq!(session.hud().time_left, 0);
        assert_eq!(session.phase(), SessionPhase::Over);
    }

    #[test]
    fn test_player_defeat_ends_session() {
        let mut session = LevelSession::new(1, level((150.0, 200.0), (700.0, 50.0), vec![], 0), 4);
        session.player.health.current = 10;

        session.tick();

        assert_eq!(session.phase(), SessionPhase::Over);
        assert_eq!(session.summary().unwrap().message, MSG_DEFEATED);
        assert_eq!(session.events_mut().damage.drain().count(), 1);
    }

    #[test]
    fn test_two_star_completion_when_items_missing() {
        let mut data = level((600.0, 400.0), (625.0, 425.0), vec![coin(50.0, 50.0)], 0);
        data.time_limit = 10;
        let mut session = LevelSession::new(1, data, 5);
        for _ in 0..6 {
            session.tick_second();
        }
        session.tick();
        // 4/10 of the time left, one item missing
        assert_eq!(session.summary().unwrap().stars, 2);
    }
}
