use serde::Deserialize;

/// Tunables for a scene. Every field has a default, so a host can override
/// just the values it cares about from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Initial surface width in world units.
    pub width: f32,
    /// Initial surface height in world units.
    pub height: f32,
    /// Length of the charge phase in ticks (default: 90, 1.5 s).
    pub charge_ticks: f32,
    /// Length of the release phase in ticks (default: 60, 1 s).
    pub release_ticks: f32,
    /// Per-tick chance of an energy particle while charging.
    pub energy_chance: f32,
    /// Per-tick chance of a concentration line while charging.
    pub line_chance: f32,
    /// Per-tick chance of an ambient particle while showing a result.
    pub ambient_chance: f32,
    /// Particles in the release burst.
    pub explosion_count: usize,
    /// Energy particles spawn on an annulus between these radii.
    pub energy_min_radius: f32,
    pub energy_max_radius: f32,
    /// Energy particles are absorbed within this distance of the centre.
    pub absorb_radius: f32,
    /// Radius of the ring ambient particles spawn on.
    pub ambient_ring_radius: f32,
    /// Arena capacities.
    pub max_explosion_particles: usize,
    pub max_energy_particles: usize,
    pub max_ambient_particles: usize,
    pub max_lines: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            charge_ticks: 90.0,
            release_ticks: 60.0,
            energy_chance: 0.3,
            line_chance: 0.2,
            ambient_chance: 0.1,
            explosion_count: 150,
            energy_min_radius: 150.0,
            energy_max_radius: 250.0,
            absorb_radius: 50.0,
            ambient_ring_radius: 180.0,
            max_explosion_particles: 512,
            max_energy_particles: 256,
            max_ambient_particles: 256,
            max_lines: 128,
        }
    }
}

impl SceneConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: SceneConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp values into ranges the simulation can run with.
    pub fn sanitized(mut self) -> Self {
        let defaults = SceneConfig::default();
        if !(self.charge_ticks.is_finite() && self.charge_ticks > 0.0) {
            log::warn!("charge_ticks {} invalid, using {}", self.charge_ticks, defaults.charge_ticks);
            self.charge_ticks = defaults.charge_ticks;
        }
        if !(self.release_ticks.is_finite() && self.release_ticks > 0.0) {
            log::warn!("release_ticks {} invalid, using {}", self.release_ticks, defaults.release_ticks);
            self.release_ticks = defaults.release_ticks;
        }
        if !(self.width.is_finite() && self.width > 0.0) || !(self.height.is_finite() && self.height > 0.0) {
            log::warn!("surface {}x{} invalid, using defaults", self.width, self.height);
            self.width = defaults.width;
            self.height = defaults.height;
        }
        self.energy_chance = clamp_chance(self.energy_chance);
        self.line_chance = clamp_chance(self.line_chance);
        self.ambient_chance = clamp_chance(self.ambient_chance);
        self.absorb_radius = self.absorb_radius.max(0.0);
        if self.energy_max_radius < self.energy_min_radius {
            log::warn!(
                "energy radii swapped ({} > {})",
                self.energy_min_radius,
                self.energy_max_radius
            );
            std::mem::swap(&mut self.energy_min_radius, &mut self.energy_max_radius);
        }
        if self.explosion_count > self.max_explosion_particles {
            log::warn!(
                "explosion_count {} exceeds capacity {}, clamping",
                self.explosion_count,
                self.max_explosion_particles
            );
            self.explosion_count = self.max_explosion_particles;
        }
        self
    }

    /// Centre of the initial surface.
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

fn clamp_chance(p: f32) -> f32 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
