//! Read-only per-frame snapshot consumed by the host renderer.

use glam::Vec2;
use serde::Serialize;

use crate::api::types::{Phase, Rgb};
use crate::gacha::catalog::FortuneEntry;
use crate::systems::effects::{ConcentrationLine, Particle, ParticleKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            kind: p.kind,
            position: p.position,
            radius: p.radius(),
            color: p.color,
            alpha: p.alpha(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub start: Vec2,
    pub end: Vec2,
    pub width: f32,
    pub alpha: f32,
}

impl From<&ConcentrationLine> for LineView {
    fn from(line: &ConcentrationLine) -> Self {
        let seg = line.position_at();
        Self {
            start: seg.start,
            end: seg.end,
            width: line.width,
            alpha: line.alpha(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbLayer {
    pub scale: f32,
    pub alpha: f32,
    /// Glow strength fed to the orb's radial gradient.
    pub glow: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardLayer {
    pub scale: f32,
    /// Entrance rotation plus idle sway, radians.
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bloom {
    pub intensity: f32,
    pub brightness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerTransforms {
    pub orb: OrbLayer,
    pub card: CardLayer,
    pub overlay_alpha: f32,
    pub flash_alpha: f32,
    pub bloom: Bloom,
}

/// Everything the render pass needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub phase: Phase,
    pub progress: f32,
    pub center: Vec2,
    pub particles: Vec<ParticleView>,
    pub concentration_lines: Vec<LineView>,
    pub selected_fortune: Option<FortuneEntry>,
    pub card_visible: bool,
    pub prompt_visible: bool,
    pub layers: LayerTransforms,
}

impl RenderState {
    /// True when every coordinate and layer value is finite.
    pub fn is_finite(&self) -> bool {
        let layer_values = [
            self.progress,
            self.layers.orb.scale,
            self.layers.orb.alpha,
            self.layers.orb.glow,
            self.layers.card.scale,
            self.layers.card.rotation,
            self.layers.overlay_alpha,
            self.layers.flash_alpha,
            self.layers.bloom.intensity,
            self.layers.bloom.brightness,
        ];
        self.center.is_finite()
            && layer_values.iter().all(|v| v.is_finite())
            && self.particles.iter().all(|p| p.position.is_finite() && p.radius.is_finite())
            && self.concentration_lines.iter().all(|l| l.start.is_finite() && l.end.is_finite())
    }
}
