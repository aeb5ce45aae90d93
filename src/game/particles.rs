//! Particle System
//!
//! Short-lived sparks emitted when an item is collected. Purely cosmetic:
//! particles never collide and are never persisted. The renderer draws each
//! one as a circle whose alpha is its remaining life.

use rand::Rng;
use crate::config::{PARTICLE_COUNT, PARTICLE_DECAY};

/// Downward acceleration applied to every particle per tick
pub const PARTICLE_GRAVITY: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life in [0, 1], also the draw alpha
    pub life: f32,
    /// RGB 0-255, copied from the collected item
    pub color: [u8; 3],
    /// Radius in pixels
    pub size: f32,
}

impl Particle {
    fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += PARTICLE_GRAVITY;
        self.life -= PARTICLE_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// All live particles of a level session
#[derive(Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self { particles: Vec::new() }
    }

    /// Spawn a burst of `PARTICLE_COUNT` particles at a point
    pub fn spawn_burst<R: Rng>(&mut self, x: f32, y: f32, color: [u8; 3], rng: &mut R) {
        self.particles.reserve(PARTICLE_COUNT);
        for _ in 0..PARTICLE_COUNT {
            self.particles.push(Particle {
                x,
                y,
                vx: rng.gen_range(-3.0..3.0),
                vy: rng.gen_range(-6.0..-2.0),
                life: 1.0,
                color,
                size: rng.gen_range(2.0..6.0),
            });
        }
    }

    /// Advance every particle one tick and drop the dead ones
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_burst_spawns_fixed_count() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut system = ParticleSystem::new();
        system.spawn_burst(100.0, 100.0, [255, 215, 0], &mut rng);
        assert_eq!(system.iter().count(), PARTICLE_COUNT);

        for p in system.iter() {
            assert!((-3.0..3.0).contains(&p.vx));
            assert!((-6.0..-2.0).contains(&p.vy));
            assert!((2.0..6.0).contains(&p.size));
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut system = ParticleSystem::new();
        system.spawn_burst(0.0, 0.0, [0, 255, 255], &mut rng);

        for _ in 0..10 {
            system.update();
        }
        assert_eq!(system.iter().count(), PARTICLE_COUNT);

        for _ in 0..50 {
            system.update();
        }
        assert_eq!(system.iter().count(), 0);
    }

    #[test]
    fn test_gravity_pulls_particles_down() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut system = ParticleSystem::new();
        system.spawn_burst(0.0, 0.0, [255, 255, 255], &mut rng);
        let before: Vec<f32> = system.iter().map(|p| p.vy).collect();
        system.update();
        for (p, vy) in system.iter().zip(before) {
            assert!((p.vy - (vy + PARTICLE_GRAVITY)).abs() < 1e-5);
        }
    }
}
