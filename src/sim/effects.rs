//! Transient visual effects: particles, shockwaves and screen shake
//!
//! Pure decay-and-cull buffers. Nothing in here is read back by gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Downward velocity bias added to every particle each tick
pub const PARTICLE_GRAVITY: f32 = 0.16;
/// Linear life decay per tick
pub const PARTICLE_DECAY: f32 = 0.05;

pub const SHOCKWAVE_START_RADIUS: f32 = 20.0;
pub const SHOCKWAVE_MAX_RADIUS: f32 = 400.0;
pub const SHOCKWAVE_GROWTH: f32 = 15.0;
pub const SHOCKWAVE_START_OPACITY: f32 = 0.8;
pub const SHOCKWAVE_FADE: f32 = 0.92;
pub const SHOCKWAVE_MIN_OPACITY: f32 = 0.01;
pub const SHOCKWAVE_WIDTH: f32 = 15.0;

pub const SHAKE_DAMPING: f32 = 0.9;
pub const SHAKE_EPSILON: f32 = 0.5;

/// Effect palette (packed 0xRRGGBB)
pub mod colors {
    pub const PARRY: u32 = 0xffff00;
    pub const CLASH: u32 = 0xffffff;
    pub const PUSH: u32 = 0x00ffff;
    pub const PLAYER_SABER: u32 = 0x00ffff;
    pub const ENEMY_SABER: u32 = 0xff0000;
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 1.0 at spawn, removed once <= 0
    pub life: f32,
    pub size: f32,
}

/// Expanding ring spawned by the force push
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shockwave {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub color: u32,
    pub opacity: f32,
    pub width: f32,
}

/// Burst parameters
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub color: u32,
    pub count: usize,
    pub speed: f32,
}

impl Burst {
    pub const PARRY: Burst = Burst { color: colors::PARRY, count: 15, speed: 12.0 };
    pub const CLASH: Burst = Burst { color: colors::CLASH, count: 30, speed: 15.0 };
    pub const PUSH: Burst = Burst { color: colors::PUSH, count: 20, speed: 10.0 };

    /// Damage burst in the defender's saber color
    pub fn hit(color: u32) -> Burst {
        Burst { color, count: 20, speed: 8.0 }
    }
}

/// Screen shake magnitudes
pub mod shake {
    pub const BLOCK: f32 = 5.0;
    pub const CLASH: f32 = 15.0;
    pub const HIT: f32 = 10.0;
    pub const PUSH: f32 = 10.0;
}

/// All live effects for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsStore {
    pub particles: Vec<Particle>,
    pub shockwaves: Vec<Shockwave>,
    /// Current shake magnitude in px
    pub screen_shake: f32,
    max_particles: usize,
}

impl EffectsStore {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles),
            shockwaves: Vec::new(),
            screen_shake: 0.0,
            max_particles,
        }
    }

    /// Drop everything (match reset)
    pub fn clear(&mut self) {
        self.particles.clear();
        self.shockwaves.clear();
        self.screen_shake = 0.0;
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.shockwaves.is_empty() && self.screen_shake == 0.0
    }

    /// Spawn a burst of particles at `pos` with random spread
    pub fn burst(&mut self, pos: Vec2, burst: Burst, rng: &mut impl Rng) {
        if self.max_particles == 0 {
            return;
        }
        for _ in 0..burst.count {
            let particle = Particle {
                pos,
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * burst.speed,
                    (rng.random::<f32>() - 0.5) * burst.speed,
                ),
                color: burst.color,
                life: 1.0,
                size: rng.random::<f32>() * 4.0 + 2.0,
            };
            if self.particles.len() >= self.max_particles {
                // Order is irrelevant; replace the oldest slot
                self.particles.swap_remove(0);
            }
            self.particles.push(particle);
        }
    }

    pub fn shockwave(&mut self, pos: Vec2, color: u32) {
        self.shockwaves.push(Shockwave {
            pos,
            radius: SHOCKWAVE_START_RADIUS,
            max_radius: SHOCKWAVE_MAX_RADIUS,
            color,
            opacity: SHOCKWAVE_START_OPACITY,
            width: SHOCKWAVE_WIDTH,
        });
    }

    /// Set shake magnitude (a new impact replaces the current one)
    pub fn shake(&mut self, amount: f32) {
        self.screen_shake = amount;
    }

    /// Advance all effects by one tick and cull the expired ones
    pub fn age(&mut self) {
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            p.pos += p.vel;
            p.life -= PARTICLE_DECAY;
            p.vel.y += PARTICLE_GRAVITY;
            if p.life <= 0.0 {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }

        let mut i = 0;
        while i < self.shockwaves.len() {
            let wave = &mut self.shockwaves[i];
            wave.radius = (wave.radius + SHOCKWAVE_GROWTH).min(wave.max_radius);
            wave.opacity *= SHOCKWAVE_FADE;
            if wave.opacity < SHOCKWAVE_MIN_OPACITY {
                self.shockwaves.swap_remove(i);
            } else {
                i += 1;
            }
        }

        self.screen_shake *= SHAKE_DAMPING;
        if self.screen_shake < SHAKE_EPSILON {
            self.screen_shake = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_spawns_count() {
        let mut store = EffectsStore::new(256);
        let mut rng = Pcg32::seed_from_u64(1);
        store.burst(Vec2::new(10.0, 20.0), Burst::CLASH, &mut rng);
        assert_eq!(store.particles.len(), 30);
        for p in &store.particles {
            assert_eq!(p.life, 1.0);
            assert!(p.size >= 2.0 && p.size < 6.0);
            assert!(p.vel.x.abs() <= 7.5 && p.vel.y.abs() <= 7.5);
        }
    }

    #[test]
    fn test_particle_cap() {
        let mut store = EffectsStore::new(25);
        let mut rng = Pcg32::seed_from_u64(2);
        store.burst(Vec2::ZERO, Burst::CLASH, &mut rng);
        assert_eq!(store.particles.len(), 25);
    }

    #[test]
    fn test_particle_gravity_and_decay() {
        let mut store = EffectsStore::new(8);
        store.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            color: colors::CLASH,
            life: 1.0,
            size: 3.0,
        });
        store.age();
        let p = &store.particles[0];
        assert_eq!(p.pos, Vec2::new(1.0, 0.0));
        assert!((p.vel.y - PARTICLE_GRAVITY).abs() < 1e-6);
        assert!((p.life - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_expired_particle_removed_next_tick() {
        let mut store = EffectsStore::new(8);
        store.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: colors::PARRY,
            life: 0.04,
            size: 2.0,
        });
        store.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: colors::PARRY,
            life: 1.0,
            size: 2.0,
        });
        store.age();
        assert_eq!(store.particles.len(), 1);
        assert!(store.particles[0].life > 0.0);
    }

    #[test]
    fn test_particles_die_after_twenty_ticks() {
        let mut store = EffectsStore::new(64);
        let mut rng = Pcg32::seed_from_u64(3);
        store.burst(Vec2::ZERO, Burst::PARRY, &mut rng);
        for _ in 0..21 {
            store.age();
        }
        assert!(store.particles.is_empty());
    }

    #[test]
    fn test_shockwave_grows_fades_and_culls() {
        let mut store = EffectsStore::new(8);
        store.shockwave(Vec2::ZERO, colors::PUSH);
        store.age();
        assert_eq!(store.shockwaves[0].radius, 35.0);
        assert!((store.shockwaves[0].opacity - 0.8 * 0.92).abs() < 1e-6);

        store.shockwaves[0].opacity = 0.0105;
        store.age();
        assert!(store.shockwaves.is_empty());
    }

    #[test]
    fn test_shake_floors_to_zero() {
        let mut store = EffectsStore::new(8);
        store.shake(shake::CLASH);
        store.age();
        assert!((store.screen_shake - 13.5).abs() < 1e-4);
        for _ in 0..40 {
            store.age();
        }
        assert_eq!(store.screen_shake, 0.0);
    }

    #[test]
    fn test_clear() {
        let mut store = EffectsStore::new(8);
        let mut rng = Pcg32::seed_from_u64(4);
        store.burst(Vec2::ZERO, Burst::PUSH, &mut rng);
        store.shockwave(Vec2::ZERO, colors::PUSH);
        store.shake(shake::PUSH);
        store.clear();
        assert!(store.is_empty());
    }
}
