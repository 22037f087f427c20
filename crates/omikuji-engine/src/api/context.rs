use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::types::DrawEvent;
use crate::gacha::catalog::FortuneCatalog;
use crate::systems::effects::{FieldCapacity, ParticleField, Rng};
use crate::systems::transition::TransitionEffects;

/// Undrained events kept before the oldest are dropped.
pub const MAX_PENDING_EVENTS: usize = 64;

/// Visibility and transform of the non-particle layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layers {
    pub orb_scale: f32,
    pub orb_alpha: f32,
    pub card_visible: bool,
    /// The "tap to draw" instruction text.
    pub prompt_visible: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            orb_scale: 1.0,
            orb_alpha: 1.0,
            card_visible: false,
            prompt_visible: true,
        }
    }
}

/// Everything a scene owns besides the phase record. Passed explicitly to
/// the phase machine so several scenes can run side by side.
pub struct SceneContext {
    pub config: SceneConfig,
    pub field: ParticleField,
    pub effects: TransitionEffects,
    pub catalog: FortuneCatalog,
    pub rng: Rng,
    pub layers: Layers,
    /// Events emitted since the host last drained them, oldest first.
    /// Bounded by [`MAX_PENDING_EVENTS`].
    pub events: Vec<DrawEvent>,
    center: Vec2,
    size: Vec2,
}

impl SceneContext {
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let field = ParticleField::new(FieldCapacity::from(&config)).with_absorb_radius(config.absorb_radius);
        Self {
            center: config.center(),
            size: Vec2::new(config.width, config.height),
            field,
            effects: TransitionEffects::new(),
            catalog: FortuneCatalog::default(),
            rng: Rng::new(seed),
            layers: Layers::default(),
            events: Vec::with_capacity(MAX_PENDING_EVENTS),
            config,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Recompute the centre for a new surface size. Ignores degenerate sizes.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {}x{}", width, height);
            return false;
        }
        self.size = Vec2::new(width, height);
        self.center = self.size * 0.5;
        true
    }

    /// Emit an event to be forwarded to the host. A host that never drains
    /// loses the oldest events once [`MAX_PENDING_EVENTS`] are pending.
    pub fn emit_event(&mut self, event: DrawEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            log::trace!("event queue full, dropping oldest");
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_follows_resize() {
        let mut ctx = SceneContext::new(SceneConfig::default(), 1);
        assert_eq!(ctx.center(), Vec2::new(400.0, 300.0));
        assert!(ctx.resize(1024.0, 768.0));
        assert_eq!(ctx.center(), Vec2::new(512.0, 384.0));
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut ctx = SceneContext::new(SceneConfig::default(), 1);
        assert!(!ctx.resize(0.0, 600.0));
        assert!(!ctx.resize(f32::NAN, 600.0));
        assert_eq!(ctx.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn undrained_events_stay_bounded() {
        let mut ctx = SceneContext::new(SceneConfig::default(), 1);
        for i in 0..(MAX_PENDING_EVENTS + 10) {
            ctx.emit_event(DrawEvent { kind: i as f32, ..Default::default() });
        }
        assert_eq!(ctx.events.len(), MAX_PENDING_EVENTS);
        assert_eq!(ctx.events[0].kind, 10.0);
        assert_eq!(ctx.events[MAX_PENDING_EVENTS - 1].kind, (MAX_PENDING_EVENTS + 9) as f32);
    }
}
