//! Cosmetic transitions fired at phase boundaries: overlay darkening, bloom
//! ramps, the white flash and the card entrance.
//!
//! These are fire-and-forget. The phase machine never waits on them; a new
//! transition on a channel simply overrides whatever was running there.

use std::f32::consts::PI;

use crate::core::time::ticks_to_secs;
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Channel, EffectChannels, Tween, TweenLoop, TweenState};

/// Bloom filter `(intensity, brightness)` levels.
pub const BLOOM_BASELINE: (f32, f32) = (1.2, 1.2);
pub const BLOOM_CHARGE: (f32, f32) = (2.0, 1.5);
pub const BLOOM_SPIKE: (f32, f32) = (3.0, 2.0);
pub const BLOOM_SETTLE: (f32, f32) = (1.5, 1.3);

pub const OVERLAY_DARK: f32 = 0.7;

const DARKEN_SECS: f32 = 0.5;
const BLOOM_RAMP_SECS: f32 = 1.5;
const FLASH_SECS: f32 = 0.3;
const SPIKE_LEG_SECS: f32 = 0.15;
const SETTLE_SECS: f32 = 0.5;
const CARD_ENTRANCE_SECS: f32 = 0.8;
const RESET_SECS: f32 = 0.5;

pub struct TransitionEffects {
    tweens: TweenState,
    channels: EffectChannels,
}

impl TransitionEffects {
    pub fn new() -> Self {
        Self {
            tweens: TweenState::new(),
            channels: EffectChannels {
                overlay_alpha: 0.0,
                bloom_intensity: BLOOM_BASELINE.0,
                bloom_brightness: BLOOM_BASELINE.1,
                flash_alpha: 0.0,
                card_scale: 0.0,
                card_rotation: 0.0,
            },
        }
    }

    pub fn channels(&self) -> &EffectChannels {
        &self.channels
    }

    /// Number of transitions still running.
    pub fn active(&self) -> usize {
        self.tweens.len()
    }

    /// Advance running transitions by `dt` ticks.
    pub fn tick(&mut self, dt: f32) {
        self.tweens.tick(ticks_to_secs(dt), &mut self.channels);
    }

    fn bloom_to(&mut self, (intensity, brightness): (f32, f32), secs: f32, easing: Easing) {
        self.tweens.add(Tween::to(Channel::BloomIntensity, intensity, secs, easing));
        self.tweens.add(Tween::to(Channel::BloomBrightness, brightness, secs, easing));
    }

    /// Idle → charging: darken the background and ramp bloom to the charge peak.
    pub fn begin_charge(&mut self) {
        self.tweens.add(Tween::to(Channel::OverlayAlpha, OVERLAY_DARK, DARKEN_SECS, Easing::QuadOut));
        self.bloom_to(BLOOM_CHARGE, BLOOM_RAMP_SECS, Easing::QuadInOut);
    }

    /// Charging → releasing: white flash and a single bloom pulse up to the
    /// spike level and back.
    pub fn release(&mut self) {
        // Full flash on the release frame itself; the tween fades it from there.
        self.channels.flash_alpha = 1.0;
        self.tweens.add(Tween::new(Channel::FlashAlpha, 1.0, 0.0, FLASH_SECS, Easing::QuadOut));
        let (from_i, from_b) = (self.channels.bloom_intensity, self.channels.bloom_brightness);
        self.tweens.add(
            Tween::new(Channel::BloomIntensity, from_i, BLOOM_SPIKE.0, SPIKE_LEG_SECS, Easing::QuadOut)
                .with_loop(TweenLoop::PingPong, 1),
        );
        self.tweens.add(
            Tween::new(Channel::BloomBrightness, from_b, BLOOM_SPIKE.1, SPIKE_LEG_SECS, Easing::QuadOut)
                .with_loop(TweenLoop::PingPong, 1),
        );
    }

    /// Releasing → result: card spins in from nothing, bloom settles.
    pub fn reveal_card(&mut self) {
        self.tweens.add(Tween::new(Channel::CardScale, 0.0, 1.0, CARD_ENTRANCE_SECS, Easing::BackOut));
        self.tweens.add(Tween::new(Channel::CardRotation, -PI, 0.0, CARD_ENTRANCE_SECS, Easing::BackOut));
        self.bloom_to(BLOOM_SETTLE, SETTLE_SECS, Easing::QuadOut);
    }

    /// Result → idle: hide the card and reverse the darken and bloom tweens.
    pub fn reset(&mut self) {
        self.tweens.add(Tween::new(Channel::CardScale, self.channels.card_scale, 0.0, 0.0, Easing::Linear));
        self.tweens.add(Tween::new(Channel::CardRotation, 0.0, 0.0, 0.0, Easing::Linear));
        self.tweens.add(Tween::to(Channel::OverlayAlpha, 0.0, RESET_SECS, Easing::QuadOut));
        self.bloom_to(BLOOM_BASELINE, RESET_SECS, Easing::QuadOut);
    }
}

impl Default for TransitionEffects {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_secs(fx: &mut TransitionEffects, secs: f32) {
        let ticks = (secs * 60.0).ceil() as usize;
        for _ in 0..ticks {
            fx.tick(1.0);
        }
    }

    #[test]
    fn starts_at_baseline() {
        let fx = TransitionEffects::new();
        let ch = fx.channels();
        assert_eq!(ch.overlay_alpha, 0.0);
        assert_eq!((ch.bloom_intensity, ch.bloom_brightness), BLOOM_BASELINE);
    }

    #[test]
    fn charge_darkens_and_ramps_bloom() {
        let mut fx = TransitionEffects::new();
        fx.begin_charge();
        run_secs(&mut fx, 0.5);
        assert!((fx.channels().overlay_alpha - OVERLAY_DARK).abs() < 1e-3);
        run_secs(&mut fx, 1.0);
        fx.tick(1.0);
        assert!((fx.channels().bloom_intensity - BLOOM_CHARGE.0).abs() < 1e-3);
        assert!((fx.channels().bloom_brightness - BLOOM_CHARGE.1).abs() < 1e-3);
        assert_eq!(fx.active(), 0);
    }

    #[test]
    fn release_spikes_then_returns() {
        let mut fx = TransitionEffects::new();
        fx.begin_charge();
        run_secs(&mut fx, 1.5);
        fx.release();
        assert_eq!(fx.channels().flash_alpha, 1.0);
        fx.tick(1.0);
        let after_one = fx.channels().flash_alpha;
        assert!(after_one > 0.5 && after_one < 1.0);

        let mut peak: f32 = 0.0;
        for _ in 0..30 {
            fx.tick(1.0);
            peak = peak.max(fx.channels().bloom_intensity);
        }
        assert!(peak > 2.9, "peak {}", peak);
        assert!((fx.channels().bloom_intensity - BLOOM_CHARGE.0).abs() < 1e-2);
        assert!(fx.channels().flash_alpha.abs() < 1e-3);
    }

    #[test]
    fn reveal_and_reset_card() {
        let mut fx = TransitionEffects::new();
        fx.reveal_card();
        fx.tick(1.0);
        assert!(fx.channels().card_rotation < 0.0);
        run_secs(&mut fx, 0.8);
        assert!((fx.channels().card_scale - 1.0).abs() < 1e-3);
        assert!(fx.channels().card_rotation.abs() < 1e-3);

        fx.reset();
        fx.tick(1.0);
        assert_eq!(fx.channels().card_scale, 0.0);
        run_secs(&mut fx, 0.5);
        assert!(fx.channels().overlay_alpha.abs() < 1e-3);
        assert!((fx.channels().bloom_intensity - BLOOM_BASELINE.0).abs() < 1e-3);
    }
}
