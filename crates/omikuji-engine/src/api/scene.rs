use crate::api::config::SceneConfig;
use crate::api::context::{SceneContext, MAX_PENDING_EVENTS};
use crate::api::types::DrawEvent;
use crate::gacha::machine::{GachaState, GachaStateMachine};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::DrawBuffer;
use crate::renderer::snapshot::{Bloom, CardLayer, LayerTransforms, LineView, OrbLayer, ParticleView, RenderState};
use crate::systems::render::build_draw_buffer;

/// One running fortune-draw scene: the phase machine plus everything it drives.
///
/// The host calls [`advance`](Self::advance) once per frame, forwards taps to
/// [`handle_input`](Self::handle_input) and reads [`render_state`](Self::render_state)
/// (or the flat [`draw_buffer`](Self::draw_buffer)) to draw.
pub struct FortuneScene {
    ctx: SceneContext,
    machine: GachaStateMachine,
    draw_buffer: DrawBuffer,
}

impl FortuneScene {
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        let capacity = config.max_explosion_particles
            + config.max_energy_particles
            + config.max_ambient_particles
            + config.max_lines;
        log::info!("scene: {}x{}, seed {}", config.width, config.height, seed);
        Self {
            ctx: SceneContext::new(config, seed),
            machine: GachaStateMachine::new(),
            draw_buffer: DrawBuffer::with_capacity(capacity),
        }
    }

    pub fn with_defaults(seed: u64) -> Self {
        Self::new(SceneConfig::default(), seed)
    }

    /// Step the scene by `dt` frame-normalised ticks (1.0 = one nominal frame).
    /// Particles and tweens advance first, then the phase logic runs, so
    /// anything spawned at a phase boundary is visible at full life.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.ctx.field.advance(dt);
        self.ctx.effects.tick(dt);
        self.machine.advance(&mut self.ctx, dt);
        build_draw_buffer(&self.ctx.field, &mut self.draw_buffer);
    }

    /// A single tap/click. Returns whether it changed anything.
    pub fn handle_input(&mut self) -> bool {
        let changed = self.machine.handle_input(&mut self.ctx);
        if changed {
            build_draw_buffer(&self.ctx.field, &mut self.draw_buffer);
        }
        changed
    }

    /// Apply queued input in arrival order. Returns how many taps took effect.
    pub fn apply_input(&mut self, queue: &mut InputQueue) -> usize {
        let mut applied = 0;
        for event in queue.drain() {
            match event {
                InputEvent::Activate => {
                    if self.handle_input() {
                        applied += 1;
                    }
                }
                InputEvent::Resize { width, height } => self.on_resize(width, height),
            }
        }
        applied
    }

    /// Move the scene centre. Phase, progress and live particles are untouched.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if self.ctx.resize(width, height) {
            log::debug!("resized to {}x{} during {:?}", width, height, self.machine.phase());
        }
    }

    pub fn state(&self) -> &GachaState {
        self.machine.state()
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    /// Events emitted since the last drain. Hosts should drain once per
    /// frame; past [`MAX_PENDING_EVENTS`] the oldest are dropped.
    pub fn drain_events(&mut self) -> impl Iterator<Item = DrawEvent> + '_ {
        self.ctx.events.drain(..)
    }

    pub fn events(&self) -> &[DrawEvent] {
        &self.ctx.events
    }

    /// Particle-layer instances as of the last `advance`.
    pub fn draw_buffer(&self) -> &DrawBuffer {
        &self.draw_buffer
    }

    /// Snapshot of everything the renderer needs. Pure read.
    pub fn render_state(&self) -> RenderState {
        let state = self.machine.state();
        let channels = self.ctx.effects.channels();
        let layers = &self.ctx.layers;
        RenderState {
            phase: state.phase,
            progress: state.progress,
            center: self.ctx.center(),
            particles: self.ctx.field.particles().map(ParticleView::from).collect(),
            concentration_lines: self.ctx.field.lines().map(LineView::from).collect(),
            selected_fortune: self.machine.selected_fortune(&self.ctx).copied(),
            card_visible: layers.card_visible,
            prompt_visible: layers.prompt_visible,
            layers: LayerTransforms {
                orb: OrbLayer {
                    scale: layers.orb_scale,
                    alpha: layers.orb_alpha,
                    glow: self.machine.glow(),
                },
                card: CardLayer {
                    scale: channels.card_scale,
                    rotation: channels.card_rotation + self.machine.card_sway(),
                },
                overlay_alpha: channels.overlay_alpha,
                flash_alpha: channels.flash_alpha,
                bloom: Bloom {
                    intensity: channels.bloom_intensity,
                    brightness: channels.bloom_brightness,
                },
            },
        }
    }
}
