//! Enemies
//!
//! Static 50×50 enemies with health and an attack cooldown. Behavior is
//! chosen per enemy by a closed `AiKind`; only melee contact damage is
//! implemented, the other kinds are explicit no-ops.
//!
//! Spawn policy at level start, first match wins:
//! - the boss level spawns the boss table
//! - every 5th level spawns a 5×2 grid of slimes cycling melee/ranged/dash
//! - any other level spawns three melee slimes in a row

use crate::config::BOSS_LEVEL;
use super::components::Health;
use super::event::{DamageEvent, DeathEvent, EventQueue};
use super::geometry::{rect_overlap, Rect};
use super::player::Player;

pub const ENEMY_SIZE: f32 = 50.0;
pub const ENEMY_MAX_HEALTH: i32 = 100;
/// Damage of one melee contact hit
pub const MELEE_DAMAGE: i32 = 10;
/// Ticks between two melee hits
pub const MELEE_COOLDOWN: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiKind {
    Melee,
    Ranged,
    Dash,
    Boss,
}

impl AiKind {
    /// Rotation used by the every-5th-level grid
    const GRID_CYCLE: [AiKind; 3] = [AiKind::Melee, AiKind::Ranged, AiKind::Dash];
}

/// One entry of the boss table
struct BossSpawn {
    x: f32,
    y: f32,
    kind: &'static str,
    ai: AiKind,
}

const BOSS_TABLE: &[BossSpawn] = &[BossSpawn { x: 300.0, y: 300.0, kind: "boss", ai: AiKind::Boss }];

#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Type tag ("slime", "boss")
    pub kind: String,
    pub ai: AiKind,
    pub health: Health,
    /// One-way: true until health reaches zero
    pub alive: bool,
    /// Ticks until the next melee hit is allowed
    pub attack_cooldown: i32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: &str, ai: AiKind) -> Self {
        Self {
            x,
            y,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            kind: kind.to_string(),
            ai,
            health: Health::new(ENEMY_MAX_HEALTH),
            alive: true,
            attack_cooldown: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Run this enemy's behavior for one tick. Returns the damage dealt to
    /// the player, if any.
    pub fn run_ai(&mut self, player: &mut Player) -> Option<i32> {
        if !self.alive {
            return None;
        }
        match self.ai {
            AiKind::Melee => self.run_melee(player),
            AiKind::Ranged => None,
            AiKind::Dash => None,
            AiKind::Boss => None,
        }
    }

    fn run_melee(&mut self, player: &mut Player) -> Option<i32> {
        let mut dealt = None;
        if self.attack_cooldown <= 0 && rect_overlap(&self.bounds(), &player.bounds()) {
            player.take_damage(MELEE_DAMAGE);
            self.attack_cooldown = MELEE_COOLDOWN;
            dealt = Some(MELEE_DAMAGE);
        }
        if self.attack_cooldown > 0 {
            self.attack_cooldown -= 1;
        }
        dealt
    }

    /// Apply damage. Returns a death event the one time health reaches zero.
    pub fn take_damage(&mut self, amount: i32) -> Option<DeathEvent> {
        if !self.alive {
            return None;
        }
        if !self.health.damage(amount) {
            return None;
        }
        self.alive = false;
        tracing::info!(kind = %self.kind, x = self.x, y = self.y, "enemy died");
        Some(DeathEvent { kind: self.kind.clone(), x: self.x, y: self.y })
    }
}

/// Enemies of one level session
#[derive(Debug, Clone, Default)]
pub struct EnemyRoster {
    enemies: Vec<Enemy>,
}

impl EnemyRoster {
    /// Spawn the enemies for a level index
    pub fn spawn_for_level(level: u32) -> Self {
        let mut enemies = Vec::new();

        if level == BOSS_LEVEL && !BOSS_TABLE.is_empty() {
            for spawn in BOSS_TABLE {
                enemies.push(Enemy::new(spawn.x, spawn.y, spawn.kind, spawn.ai));
            }
        } else if level % 5 == 0 {
            for i in 0..10u32 {
                let x = 100.0 + (i % 5) as f32 * 100.0;
                let y = 100.0 + (i / 5) as f32 * 100.0;
                let ai = AiKind::GRID_CYCLE[i as usize % AiKind::GRID_CYCLE.len()];
                enemies.push(Enemy::new(x, y, "slime", ai));
            }
        } else {
            for i in 0..3u32 {
                enemies.push(Enemy::new(150.0 + i as f32 * 100.0, 200.0, "slime", AiKind::Melee));
            }
        }

        tracing::debug!(level, count = enemies.len(), "spawned enemies");
        Self { enemies }
    }

    /// Run every living enemy's AI against the player
    pub fn update(&mut self, player: &mut Player, damage: &mut EventQueue<DamageEvent>) {
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if let Some(amount) = enemy.run_ai(player) {
                damage.send(DamageEvent {
                    source: index,
                    amount,
                    remaining: player.health.current,
                });
            }
        }
    }

    /// Damage one enemy by roster index; deaths go to the event queue
    #[allow(dead_code)] // No player attack deals damage yet
    pub fn damage_enemy(&mut self, index: usize, amount: i32, deaths: &mut EventQueue<DeathEvent>) {
        if let Some(event) = self.enemies.get_mut(index).and_then(|e| e.take_damage(amount)) {
            deaths.send(event);
        }
    }

    /// True iff every spawned enemy is dead
    #[allow(dead_code)]
    pub fn all_defeated(&self) -> bool {
        self.enemies.iter().all(|e| !e.alive)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerSettings;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(x, y, PlayerSettings::default())
    }

    #[test]
    fn test_melee_hits_once_per_cooldown_window() {
        let mut enemy = Enemy::new(100.0, 100.0, "slime", AiKind::Melee);
        let mut player = player_at(110.0, 110.0);

        let hits = (0..60).filter_map(|_| enemy.run_ai(&mut player)).count();
        assert_eq!(hits, 1);
        assert_eq!(player.health.current, 90);

        // Cooldown ran out on the last tick of the window
        assert_eq!(enemy.attack_cooldown, 0);
        assert_eq!(enemy.run_ai(&mut player), Some(MELEE_DAMAGE));
        assert_eq!(player.health.current, 80);
    }

    #[test]
    fn test_melee_needs_overlap() {
        let mut enemy = Enemy::new(100.0, 100.0, "slime", AiKind::Melee);
        // Touching edges only
        let mut player = player_at(150.0, 100.0);
        assert_eq!(enemy.run_ai(&mut player), None);
        assert_eq!(player.health.current, 100);
    }

    #[test]
    fn test_unimplemented_ai_kinds_do_nothing() {
        for ai in [AiKind::Ranged, AiKind::Dash, AiKind::Boss] {
            let mut enemy = Enemy::new(100.0, 100.0, "slime", ai);
            let mut player = player_at(100.0, 100.0);
            assert_eq!(enemy.run_ai(&mut player), None);
            assert_eq!(player.health.current, 100);
        }
    }

    #[test]
    fn test_take_damage_kills_once() {
        let mut enemy = Enemy::new(0.0, 0.0, "slime", AiKind::Melee);
        assert!(enemy.take_damage(60).is_none());
        let death = enemy.take_damage(60).unwrap();
        assert_eq!(death.kind, "slime");
        assert_eq!(enemy.health.current, 0);
        assert!(!enemy.alive);
        assert!(enemy.take_damage(10).is_none());
    }

    #[test]
    fn test_dead_enemy_does_not_attack() {
        let mut enemy = Enemy::new(100.0, 100.0, "slime", AiKind::Melee);
        enemy.take_damage(ENEMY_MAX_HEALTH);
        let mut player = player_at(100.0, 100.0);
        assert_eq!(enemy.run_ai(&mut player), None);
    }

    #[test]
    fn test_spawn_policy() {
        let regular = EnemyRoster::spawn_for_level(1);
        assert_eq!(regular.len(), 3);
        let xs: Vec<f32> = regular.iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![150.0, 250.0, 350.0]);
        assert!(regular.iter().all(|e| e.ai == AiKind::Melee && e.y == 200.0));

        let grid = EnemyRoster::spawn_for_level(10);
        assert_eq!(grid.len(), 10);
        let last = grid.iter().last().unwrap();
        assert_eq!((last.x, last.y), (500.0, 200.0));
        let ais: Vec<AiKind> = grid.iter().take(4).map(|e| e.ai).collect();
        assert_eq!(ais, vec![AiKind::Melee, AiKind::Ranged, AiKind::Dash, AiKind::Melee]);

        let boss = EnemyRoster::spawn_for_level(BOSS_LEVEL);
        assert_eq!(boss.len(), 1);
        let b = boss.iter().next().unwrap();
        assert_eq!((b.x, b.y, b.kind.as_str(), b.ai), (300.0, 300.0, "boss", AiKind::Boss));
    }

    #[test]
    fn test_roster_events_and_defeat() {
        let mut roster = EnemyRoster::spawn_for_level(1);
        let mut player = player_at(150.0, 200.0);
        let mut damage = EventQueue::new();
        roster.update(&mut player, &mut damage);
        let events: Vec<_> = damage.drain().collect();
        assert_eq!(events, vec![DamageEvent { source: 0, amount: 10, remaining: 90 }]);

        let mut deaths = EventQueue::new();
        assert!(!roster.all_defeated());
        for i in 0..roster.len() {
            roster.damage_enemy(i, 100, &mut deaths);
        }
        roster.damage_enemy(99, 100, &mut deaths);
        assert_eq!(deaths.drain().count(), 3);
        assert!(roster.all_defeated());
    }
}
