//! Concentration lines: streaks that slide inward along a ray toward a fixed
//! point while the orb charges.

use glam::Vec2;

/// Endpoints of a line at the current distance.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LineSegment {
    /// Inner end, `distance` from the target.
    pub start: Vec2,
    /// Outer end, `distance + length` from the target.
    pub end: Vec2,
}

#[derive(Debug, Clone)]
pub struct ConcentrationLine {
    pub angle: f32,
    /// Inward speed in units per tick.
    pub speed: f32,
    pub length: f32,
    pub width: f32,
    /// Remaining distance from the target to the inner end.
    pub distance: f32,
    /// Captured at spawn and never moved, even if the layout changes.
    target: Vec2,
    start_distance: f32,
}

impl ConcentrationLine {
    pub fn new(target: Vec2, angle: f32, distance: f32, speed: f32, length: f32, width: f32) -> Self {
        ConcentrationLine {
            angle,
            speed: speed.max(0.0),
            length,
            width,
            distance,
            target,
            start_distance: distance.max(f32::EPSILON),
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Slide inward by `speed * dt`. Returns false once the line reaches the target.
    pub fn update(&mut self, dt: f32) -> bool {
        self.distance -= self.speed * dt;
        self.distance > 0.0
    }

    pub fn position_at(&self) -> LineSegment {
        let dir = Vec2::from_angle(self.angle);
        LineSegment {
            start: self.target + dir * self.distance,
            end: self.target + dir * (self.distance + self.length),
        }
    }

    /// Lines fade in as they approach the target.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.distance / self.start_distance).clamp(0.0, 1.0) * 0.8 + 0.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_non_increasing() {
        let mut line = ConcentrationLine::new(Vec2::new(400.0, 300.0), 1.0, 500.0, 20.0, 80.0, 2.0);
        let mut last = line.distance;
        while line.update(1.0) {
            assert!(line.distance <= last);
            last = line.distance;
        }
        assert!(line.distance <= 0.0);
    }

    #[test]
    fn segment_spans_length_along_ray() {
        let center = Vec2::new(400.0, 300.0);
        let line = ConcentrationLine::new(center, 0.7, 450.0, 20.0, 120.0, 2.0);
        let seg = line.position_at();
        let inner = seg.start.distance(center);
        let outer = seg.end.distance(center);
        assert!((inner - 450.0).abs() < 1e-2);
        assert!((outer - inner - 120.0).abs() < 1e-2);
    }

    #[test]
    fn target_is_fixed_at_spawn() {
        let line = ConcentrationLine::new(Vec2::new(10.0, 20.0), 0.0, 400.0, 10.0, 50.0, 1.0);
        assert_eq!(line.target(), Vec2::new(10.0, 20.0));
        let seg = line.position_at();
        assert!((seg.start - Vec2::new(410.0, 20.0)).length() < 1e-3);
    }

    #[test]
    fn alpha_grows_as_line_closes_in() {
        let mut line = ConcentrationLine::new(Vec2::ZERO, 0.0, 500.0, 100.0, 50.0, 1.0);
        let far = line.alpha();
        line.update(3.0);
        assert!(line.alpha() > far);
    }
}
