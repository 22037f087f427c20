//! Particle field: explosion, energy and ambient particles plus concentration
//! lines.
//!
//! `ParticleField` is purely mechanical. It spawns exactly what it is asked
//! to (randomness comes from the caller's [`Rng`]) and prunes whatever has
//! died. Deciding *when* to spawn belongs to the phase machine.

mod arena;
mod concentration_line;
mod particle;
mod rng;

pub use arena::{Handle, SlotArena};
pub use concentration_line::{ConcentrationLine, LineSegment};
pub use particle::{Absorb, Particle, ParticleKind};
pub use rng::Rng;

use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::types::Rgb;

/// Smallest distance used when normalizing a direction.
const MIN_DISTANCE: f32 = 0.001;

/// Capacities of the four collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCapacity {
    pub explosion: usize,
    pub energy: usize,
    pub ambient: usize,
    pub lines: usize,
}

impl From<&SceneConfig> for FieldCapacity {
    fn from(config: &SceneConfig) -> Self {
        Self {
            explosion: config.max_explosion_particles,
            energy: config.max_energy_particles,
            ambient: config.max_ambient_particles,
            lines: config.max_lines,
        }
    }
}

pub struct ParticleField {
    explosion: SlotArena<Particle>,
    energy: SlotArena<Particle>,
    ambient: SlotArena<Particle>,
    lines: SlotArena<ConcentrationLine>,
    /// Distance from the target at which energy particles are absorbed.
    absorb_radius: f32,
    /// Spawns dropped because an arena was full.
    dropped: u64,
}

impl ParticleField {
    pub const DEFAULT_ABSORB_RADIUS: f32 = 50.0;

    pub fn new(capacity: FieldCapacity) -> Self {
        Self {
            explosion: SlotArena::with_capacity(capacity.explosion),
            energy: SlotArena::with_capacity(capacity.energy),
            ambient: SlotArena::with_capacity(capacity.ambient),
            lines: SlotArena::with_capacity(capacity.lines),
            absorb_radius: Self::DEFAULT_ABSORB_RADIUS,
            dropped: 0,
        }
    }

    pub fn with_absorb_radius(mut self, radius: f32) -> Self {
        self.absorb_radius = radius.max(0.0);
        self
    }

    fn track(&mut self, handle: Option<Handle>, what: &str) -> Option<Handle> {
        if handle.is_none() {
            self.dropped += 1;
            log::trace!("{} arena full, spawn dropped", what);
        }
        handle
    }

    /// Burst of `count` particles at `center`, colours drawn from `palette`.
    /// Returns how many were actually spawned.
    pub fn spawn_explosion(&mut self, center: Vec2, count: usize, palette: &[Rgb], rng: &mut Rng) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let color = rng.pick(palette).copied().unwrap_or(Rgb::WHITE);
            let velocity = rng.unit_vec2() * rng.range(5.0, 20.0);
            let particle = Particle::new(
                ParticleKind::Explosion,
                center,
                velocity,
                rng.range(2.0, 6.0),
                color,
                rng.range(1.0, 2.0),
            )
            .with_gravity(Particle::EXPLOSION_GRAVITY)
            .with_friction(Particle::EXPLOSION_FRICTION);
            let handle = self.explosion.spawn(particle);
            if self.track(handle, "explosion").is_some() {
                spawned += 1;
            }
        }
        log::debug!("explosion: {} of {} particles spawned", spawned, count);
        spawned
    }

    /// One particle on the annulus `[min_radius, max_radius)` around `center`,
    /// travelling straight at it.
    pub fn spawn_energy_particle(
        &mut self,
        center: Vec2,
        min_radius: f32,
        max_radius: f32,
        color: Rgb,
        rng: &mut Rng,
    ) -> Option<Handle> {
        let radius = rng.range(min_radius, max_radius);
        let position = center + rng.unit_vec2() * radius;
        let offset = center - position;
        let direction = offset / offset.length().max(MIN_DISTANCE);
        let velocity = direction * rng.range(3.0, 6.0);
        let particle = Particle::new(ParticleKind::Energy, position, velocity, rng.range(1.5, 3.5), color, 3.0)
            .with_absorb(center, self.absorb_radius);
        let handle = self.energy.spawn(particle);
        self.track(handle, "energy")
    }

    pub fn spawn_concentration_line(&mut self, center: Vec2, rng: &mut Rng) -> Option<Handle> {
        let line = ConcentrationLine::new(
            center,
            rng.angle(),
            rng.range(400.0, 600.0),
            rng.range(15.0, 25.0),
            rng.range(60.0, 160.0),
            rng.range(1.0, 3.0),
        );
        let handle = self.lines.spawn(line);
        self.track(handle, "line")
    }

    /// One particle on a ring around `center` that drifts upward.
    pub fn spawn_ambient(&mut self, center: Vec2, color: Rgb, ring_radius: f32, rng: &mut Rng) -> Option<Handle> {
        let position = center + rng.unit_vec2() * ring_radius;
        let velocity = Vec2::new(rng.range(-0.5, 0.5), rng.range(-2.0, -0.5));
        let particle = Particle::new(
            ParticleKind::Ambient,
            position,
            velocity,
            rng.range(1.0, 3.0),
            color,
            rng.range(2.0, 3.0),
        )
        .with_gravity(Particle::AMBIENT_GRAVITY)
        .with_friction(Particle::AMBIENT_FRICTION);
        let handle = self.ambient.spawn(particle);
        self.track(handle, "ambient")
    }

    /// Update every entity and drop the ones whose removal condition fired.
    pub fn advance(&mut self, dt: f32) {
        self.explosion.retain_mut(|p| p.update(dt));
        self.ambient.retain_mut(|p| p.update(dt));
        self.energy.retain_mut(|p| p.update(dt) && !p.is_absorbed());
        self.lines.retain_mut(|l| l.update(dt));
    }

    /// Drop everything that converges on the orb.
    pub fn clear_convergence(&mut self) {
        self.energy.clear();
        self.lines.clear();
    }

    /// Drop the burst and the floating result particles.
    pub fn clear_result(&mut self) {
        self.explosion.clear();
        self.ambient.clear();
    }

    pub fn clear(&mut self) {
        self.clear_convergence();
        self.clear_result();
    }

    pub fn explosion_particles(&self) -> impl Iterator<Item = &Particle> {
        self.explosion.iter()
    }

    pub fn energy_particles(&self) -> impl Iterator<Item = &Particle> {
        self.energy.iter()
    }

    pub fn ambient_particles(&self) -> impl Iterator<Item = &Particle> {
        self.ambient.iter()
    }

    /// Every live particle, back to front: ambient, energy, explosion.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.ambient.iter().chain(self.energy.iter()).chain(self.explosion.iter())
    }

    pub fn lines(&self) -> impl Iterator<Item = &ConcentrationLine> {
        self.lines.iter()
    }

    pub fn energy(&self, handle: Handle) -> Option<&Particle> {
        self.energy.get(handle)
    }

    pub fn explosion_len(&self) -> usize {
        self.explosion.len()
    }

    pub fn energy_len(&self) -> usize {
        self.energy.len()
    }

    pub fn ambient_len(&self) -> usize {
        self.ambient.len()
    }

    pub fn lines_len(&self) -> usize {
        self.lines.len()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(FieldCapacity::from(&SceneConfig::default()))
    }
}
