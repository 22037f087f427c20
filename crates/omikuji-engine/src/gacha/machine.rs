//! The draw cycle: idle → charging → releasing → result → idle.
//!
//! The machine owns the [`GachaState`] record and nothing else; particles,
//! tweens and randomness live in the [`SceneContext`] handed to every call.
//! Phase changes are driven purely by `progress`, never by whether a
//! cosmetic tween has finished.

use crate::api::context::SceneContext;
use crate::api::types::{event_kind, DrawEvent, Phase};
use crate::core::time::FRAME_RATE;
use crate::gacha::catalog::{FortuneEntry, ENERGY_COLOR, EXPLOSION_PALETTE};

/// Orb scale gained over a full charge.
const CHARGE_SCALE_GAIN: f32 = 0.3;
/// Breathing rate of the idle orb, radians per second.
const BREATH_RATE: f64 = 2.0;
/// Card sway rate (radians per second) and amplitude (radians).
const SWAY_RATE: f64 = 0.5;
const SWAY_AMPLITUDE: f32 = 0.02;
/// Ticks the result-phase progress takes to reach 1 (card entrance length).
const REVEAL_TICKS: f32 = 48.0;

/// The single source of truth for what phase a scene is in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GachaState {
    pub phase: Phase,
    /// Phase-relative progress in [0, 1].
    pub progress: f32,
    /// Ticks spent in the current phase. Progress is derived from this so
    /// that integral tick counts land exactly on phase boundaries.
    pub phase_ticks: f32,
    /// Seconds since the scene started; drives breathing and sway. Kept in
    /// f64 so the step size stays exact over days of uptime.
    pub idle_clock: f64,
    /// Catalog index chosen when charging began.
    pub selected: Option<usize>,
}

#[derive(Debug, Default)]
pub struct GachaStateMachine {
    state: GachaState,
}

impl GachaStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GachaState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn selected_fortune(&self, ctx: &SceneContext) -> Option<&'static FortuneEntry> {
        self.state.selected.and_then(|i| ctx.catalog.get(i))
    }

    /// Orb glow: a slow breath at idle, climbing with charge progress.
    pub fn glow(&self) -> f32 {
        let breath = 0.5 + 0.5 * (self.state.idle_clock * BREATH_RATE).sin() as f32;
        match self.state.phase {
            Phase::Idle => breath,
            Phase::Charging => breath * (1.0 - self.state.progress) + 2.0 * self.state.progress,
            Phase::Releasing => 2.0 * (1.0 - self.state.progress),
            Phase::Result => 0.0,
        }
    }

    /// Small idle sway added to the card rotation while a result is shown.
    pub fn card_sway(&self) -> f32 {
        if self.state.phase == Phase::Result {
            (self.state.idle_clock * SWAY_RATE).sin() as f32 * SWAY_AMPLITUDE
        } else {
            0.0
        }
    }

    fn enter(&mut self, to: Phase) {
        debug_assert_eq!(to, self.state.phase.next(), "illegal transition");
        log::info!("phase {:?} -> {:?}", self.state.phase, to);
        self.state.phase = to;
        self.state.progress = 0.0;
        self.state.phase_ticks = 0.0;
    }

    fn emit(&self, ctx: &mut SceneContext, kind: f32) {
        let center = ctx.center();
        ctx.emit_event(DrawEvent {
            kind,
            a: self.state.selected.map(|i| i as f32).unwrap_or(-1.0),
            b: center.x,
            c: center.y,
        });
    }

    /// A tap. Starts a draw from idle, dismisses a result; ignored while a
    /// draw is in flight. Returns whether it had any effect.
    pub fn handle_input(&mut self, ctx: &mut SceneContext) -> bool {
        if !self.state.phase.accepts_input() {
            log::debug!("input ignored during {:?}", self.state.phase);
            return false;
        }
        if self.state.phase == Phase::Idle {
            self.begin_charge(ctx)
        } else {
            self.reset(ctx);
            true
        }
    }

    fn begin_charge(&mut self, ctx: &mut SceneContext) -> bool {
        let Some(index) = ctx.catalog.pick(&mut ctx.rng) else {
            log::warn!("fortune catalog is empty, draw not started");
            return false;
        };
        self.state.selected = Some(index);
        self.enter(Phase::Charging);
        ctx.layers.prompt_visible = false;
        ctx.effects.begin_charge();
        self.emit(ctx, event_kind::CHARGE_STARTED);
        true
    }

    fn release(&mut self, ctx: &mut SceneContext) {
        self.enter(Phase::Releasing);
        ctx.effects.release();
        let (center, count) = (ctx.center(), ctx.config.explosion_count);
        ctx.field.spawn_explosion(center, count, &EXPLOSION_PALETTE, &mut ctx.rng);
        ctx.field.clear_convergence();
        self.emit(ctx, event_kind::RELEASED);
    }

    fn reveal(&mut self, ctx: &mut SceneContext) {
        self.enter(Phase::Result);
        ctx.layers.orb_scale = 1.0;
        ctx.layers.card_visible = true;
        ctx.effects.reveal_card();
        self.emit(ctx, event_kind::REVEALED);
    }

    fn reset(&mut self, ctx: &mut SceneContext) {
        self.enter(Phase::Idle);
        self.state.selected = None;
        ctx.layers.card_visible = false;
        ctx.layers.prompt_visible = true;
        ctx.layers.orb_alpha = 1.0;
        ctx.layers.orb_scale = 1.0;
        ctx.field.clear_result();
        ctx.effects.reset();
        self.emit(ctx, event_kind::RESET);
    }

    /// Run the phase logic for `dt` ticks. The caller advances the particle
    /// field and tweens; this only decides spawns and transitions.
    pub fn advance(&mut self, ctx: &mut SceneContext, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.state.idle_clock += f64::from(dt) / f64::from(FRAME_RATE);
        self.state.phase_ticks += dt;

        match self.state.phase {
            Phase::Idle => {}
            Phase::Charging => {
                self.state.progress = (self.state.phase_ticks / ctx.config.charge_ticks).min(1.0);
                let center = ctx.center();
                if ctx.rng.chance(ctx.config.energy_chance) {
                    let (min_r, max_r) = (ctx.config.energy_min_radius, ctx.config.energy_max_radius);
                    ctx.field.spawn_energy_particle(center, min_r, max_r, ENERGY_COLOR, &mut ctx.rng);
                }
                if ctx.rng.chance(ctx.config.line_chance) {
                    ctx.field.spawn_concentration_line(center, &mut ctx.rng);
                }
                ctx.layers.orb_scale = 1.0 + CHARGE_SCALE_GAIN * self.state.progress;
                if self.state.progress >= 1.0 {
                    self.release(ctx);
                }
            }
            Phase::Releasing => {
                self.state.progress = (self.state.phase_ticks / ctx.config.release_ticks).min(1.0);
                ctx.layers.orb_alpha = 1.0 - self.state.progress;
                if self.state.progress >= 1.0 {
                    if self.state.selected.is_some() {
                        self.reveal(ctx);
                    } else {
                        log::warn!("release finished without a fortune; returning to idle");
                        self.state.phase = Phase::Result;
                        self.reset(ctx);
                    }
                }
            }
            Phase::Result => {
                self.state.progress = (self.state.phase_ticks / REVEAL_TICKS).min(1.0);
                if ctx.rng.chance(ctx.config.ambient_chance) {
                    if let Some(fortune) = self.selected_fortune(ctx) {
                        let (center, ring) = (ctx.center(), ctx.config.ambient_ring_radius);
                        ctx.field.spawn_ambient(center, fortune.color, ring, &mut ctx.rng);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SceneConfig;

    fn setup() -> (GachaStateMachine, SceneContext) {
        (GachaStateMachine::new(), SceneContext::new(SceneConfig::default(), 42))
    }

    #[test]
    fn input_selects_fortune_and_starts_charge() {
        let (mut m, mut ctx) = setup();
        assert!(m.handle_input(&mut ctx));
        assert_eq!(m.phase(), Phase::Charging);
        assert!(m.state().selected.is_some());
        assert!(!ctx.layers.prompt_visible);
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, event_kind::CHARGE_STARTED);
    }

    #[test]
    fn input_ignored_while_in_flight() {
        let (mut m, mut ctx) = setup();
        m.handle_input(&mut ctx);
        m.advance(&mut ctx, 10.0);
        let before = *m.state();
        assert!(!m.handle_input(&mut ctx));
        assert_eq!(*m.state(), before);

        m.advance(&mut ctx, 80.0);
        assert_eq!(m.phase(), Phase::Releasing);
        let before = *m.state();
        assert!(!m.handle_input(&mut ctx));
        assert_eq!(*m.state(), before);
    }

    #[test]
    fn charge_scales_orb_with_progress() {
        let (mut m, mut ctx) = setup();
        m.handle_input(&mut ctx);
        m.advance(&mut ctx, 45.0);
        assert!((m.state().progress - 0.5).abs() < 1e-5);
        assert!((ctx.layers.orb_scale - 1.15).abs() < 1e-5);
    }

    #[test]
    fn release_fades_orb_then_reveals() {
        let (mut m, mut ctx) = setup();
        m.handle_input(&mut ctx);
        m.advance(&mut ctx, 90.0);
        assert_eq!(m.phase(), Phase::Releasing);
        assert_eq!(ctx.field.energy_len(), 0);
        assert_eq!(ctx.field.lines_len(), 0);

        m.advance(&mut ctx, 30.0);
        assert!((ctx.layers.orb_alpha - 0.5).abs() < 1e-5);

        m.advance(&mut ctx, 30.0);
        assert_eq!(m.phase(), Phase::Result);
        assert!(ctx.layers.card_visible);
        assert_eq!(ctx.layers.orb_scale, 1.0);
    }

    #[test]
    fn selection_is_fixed_for_the_cycle() {
        let (mut m, mut ctx) = setup();
        m.handle_input(&mut ctx);
        let chosen = m.state().selected;
        for _ in 0..200 {
            m.advance(&mut ctx, 1.0);
            assert_eq!(m.state().selected, chosen);
        }
        assert_eq!(m.phase(), Phase::Result);
        m.handle_input(&mut ctx);
        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.state().selected.is_none());
    }

    #[test]
    fn result_spawns_ambient_in_fortune_colour() {
        let (mut m, mut ctx) = setup();
        m.handle_input(&mut ctx);
        m.advance(&mut ctx, 90.0);
        m.advance(&mut ctx, 60.0);
        let colour = m.selected_fortune(&ctx).unwrap().color;
        for _ in 0..200 {
            m.advance(&mut ctx, 1.0);
        }
        assert!(ctx.field.ambient_len() > 0);
        assert!(ctx.field.ambient_particles().all(|p| p.color == colour));
    }

    #[test]
    fn sway_only_in_result() {
        let (mut m, mut ctx) = setup();
        m.advance(&mut ctx, 30.0);
        assert_eq!(m.card_sway(), 0.0);
        m.handle_input(&mut ctx);
        m.advance(&mut ctx, 90.0);
        m.advance(&mut ctx, 60.0);
        m.advance(&mut ctx, 100.0);
        assert!(m.card_sway().abs() <= SWAY_AMPLITUDE);
        assert!(m.card_sway() != 0.0);
    }

    #[test]
    fn clock_keeps_exact_steps_after_long_uptime() {
        let (mut m, mut ctx) = setup();
        // Four days of frames.
        m.state.idle_clock = 345_600.0;
        for _ in 0..600 {
            m.advance(&mut ctx, 1.0);
        }
        assert!((m.state().idle_clock - 345_610.0).abs() < 1e-6);
    }

    #[test]
    fn idle_glow_breathes() {
        let (mut m, mut ctx) = setup();
        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for _ in 0..400 {
            m.advance(&mut ctx, 1.0);
            lo = lo.min(m.glow());
            hi = hi.max(m.glow());
        }
        assert!(lo < 0.1 && hi > 0.9);
        assert_eq!(ctx.field.particles().count(), 0);
    }
}
