//! Particle physics for the three particle populations of the scene.

use glam::Vec2;

use crate::api::types::Rgb;
use crate::core::time::FRAME_RATE;

/// Which population a particle belongs to. Decides how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// Burst fired at the release boundary.
    Explosion,
    /// Streams into the orb while charging.
    Energy,
    /// Floats up around the result card.
    Ambient,
}

/// Removal condition for particles that stream into a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Absorb {
    pub target: Vec2,
    pub radius: f32,
}

/// A single particle with physics and rendering state.
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining life in (0, 1].
    pub life: f32,
    pub max_life_secs: f32,
    pub size: f32,
    pub color: Rgb,
    /// Added to `velocity.y` per tick. Negative values float upward.
    pub gravity: f32,
    /// Per-tick velocity multiplier in (0, 1].
    pub friction: f32,
    pub absorb: Option<Absorb>,
}

impl Particle {
    pub const EXPLOSION_GRAVITY: f32 = 0.15;
    pub const EXPLOSION_FRICTION: f32 = 0.96;
    pub const AMBIENT_GRAVITY: f32 = -0.02;
    pub const AMBIENT_FRICTION: f32 = 0.99;

    /// Shortest lifetime a particle may be given; keeps the life decay finite.
    pub const MIN_LIFE_SECS: f32 = 0.01;

    pub fn new(kind: ParticleKind, position: Vec2, velocity: Vec2, size: f32, color: Rgb, max_life_secs: f32) -> Self {
        Particle {
            kind,
            position,
            velocity,
            life: 1.0,
            max_life_secs: max_life_secs.max(Self::MIN_LIFE_SECS),
            size,
            color,
            gravity: 0.0,
            friction: 1.0,
            absorb: None,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.clamp(f32::EPSILON, 1.0);
        self
    }

    pub fn with_absorb(mut self, target: Vec2, radius: f32) -> Self {
        self.absorb = Some(Absorb { target, radius });
        self
    }

    /// Integrate one step of `dt` ticks. Returns false once life is spent.
    pub fn update(&mut self, dt: f32) -> bool {
        self.velocity.y += self.gravity * dt;
        self.velocity *= self.friction.powf(dt);
        self.position += self.velocity * dt;
        self.life -= dt / (FRAME_RATE * self.max_life_secs);
        self.life > 0.0
    }

    /// True once a streaming particle has reached (or overshot) its target.
    pub fn is_absorbed(&self) -> bool {
        let Some(absorb) = self.absorb else {
            return false;
        };
        let to_target = absorb.target - self.position;
        to_target.length() < absorb.radius || to_target.dot(self.velocity) < 0.0
    }

    /// Draw radius, shrinking with life.
    pub fn radius(&self) -> f32 {
        self.size * self.life.clamp(0.0, 1.0)
    }

    /// Draw alpha, fading with life.
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}
