use crate::renderer::instance::{draw_kind, DrawBuffer, DrawInstance};
use crate::systems::effects::ParticleField;

/// Build the particle-layer draw buffer.
/// Lines are drawn first, then particles back to front (ambient, energy, explosion).
pub fn build_draw_buffer(field: &ParticleField, buffer: &mut DrawBuffer) {
    buffer.clear();

    for line in field.lines() {
        let seg = line.position_at();
        buffer.push(DrawInstance {
            kind: draw_kind::LINE,
            x: seg.start.x,
            y: seg.start.y,
            x2: seg.end.x,
            y2: seg.end.y,
            size: line.width,
            r: 1.0,
            g: 1.0,
            b: 1.0,
            alpha: line.alpha(),
            ..Default::default()
        });
    }

    for p in field.particles() {
        let radius = p.radius();
        if radius <= 0.0 {
            continue;
        }
        buffer.push(DrawInstance {
            kind: draw_kind::CIRCLE,
            x: p.position.x,
            y: p.position.y,
            size: radius,
            r: p.color.r,
            g: p.color.g,
            b: p.color.b,
            alpha: p.alpha(),
            ..Default::default()
        });
    }
}
