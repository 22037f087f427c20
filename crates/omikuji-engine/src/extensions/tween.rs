// extensions/tween.rs
//
// Tween system: an explicit list of interpolation tasks over named
// effect channels, advanced by the scene clock. No callbacks: whoever owns
// the TweenState reads the channel values after `tick`.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(Tween::to(Channel::OverlayAlpha, 0.7, 0.5, Easing::QuadOut));
//   tweens.tick(dt_secs, &mut channels);

use serde::Serialize;

use super::easing::{ease, Easing};

/// A property a tween can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    OverlayAlpha,
    BloomIntensity,
    BloomBrightness,
    FlashAlpha,
    CardScale,
    CardRotation,
}

/// Current values of every animatable channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectChannels {
    /// Darkening overlay opacity, 0 (clear) to 0.7.
    pub overlay_alpha: f32,
    /// Bloom filter intensity.
    pub bloom_intensity: f32,
    /// Bloom filter brightness.
    pub bloom_brightness: f32,
    /// White background flash opacity.
    pub flash_alpha: f32,
    pub card_scale: f32,
    /// Card rotation in radians (entrance animation, sway is added on top).
    pub card_rotation: f32,
}

impl EffectChannels {
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::OverlayAlpha => self.overlay_alpha,
            Channel::BloomIntensity => self.bloom_intensity,
            Channel::BloomBrightness => self.bloom_brightness,
            Channel::FlashAlpha => self.flash_alpha,
            Channel::CardScale => self.card_scale,
            Channel::CardRotation => self.card_rotation,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::OverlayAlpha => self.overlay_alpha = value,
            Channel::BloomIntensity => self.bloom_intensity = value,
            Channel::BloomBrightness => self.bloom_brightness = value,
            Channel::FlashAlpha => self.flash_alpha = value,
            Channel::CardScale => self.card_scale = value,
            Channel::CardRotation => self.card_rotation = value,
        }
    }
}

/// What happens when a tween reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop and remove the tween.
    #[default]
    Once,
    /// Reverse direction (ping-pong).
    PingPong,
}

/// A single interpolation task.
#[derive(Debug, Clone)]
pub struct Tween {
    pub channel: Channel,
    /// Start value. `None` captures the channel's value on the first tick.
    pub from: Option<f32>,
    pub to: f32,
    /// Duration of one leg in seconds.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
    /// Extra legs to run before finishing.
    pub repeats: u32,
    forward: bool,
}

impl Tween {
    pub fn new(channel: Channel, from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            channel,
            from: Some(from),
            to,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            repeats: 0,
            forward: true,
        }
    }

    /// Animate from whatever the channel holds when the tween starts.
    pub fn to(channel: Channel, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from: None,
            ..Self::new(channel, 0.0, to, duration, easing)
        }
    }

    pub fn with_loop(mut self, mode: TweenLoop, repeats: u32) -> Self {
        self.loop_mode = mode;
        self.repeats = repeats;
        self
    }

    /// Normalized progress of the current leg [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn value(&self, from: f32) -> f32 {
        let t = if self.forward { self.progress() } else { 1.0 - self.progress() };
        ease(from, self.to, t, self.easing)
    }
}

/// Manages all active tweens. At most one tween runs per channel.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: Vec<Tween>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween, superseding any tween already running on its channel.
    pub fn add(&mut self, tween: Tween) {
        self.tweens.retain(|t| t.channel != tween.channel);
        self.tweens.push(tween);
    }

    /// Advance all tweens by `dt` seconds and write their values.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, channels: &mut EffectChannels) -> usize {
        let mut completed = 0;

        self.tweens.retain_mut(|tween| {
            let from = *tween.from.get_or_insert(channels.get(tween.channel));
            tween.elapsed += dt;
            channels.set(tween.channel, tween.value(from));

            if tween.elapsed < tween.duration {
                return true;
            }

            if tween.repeats == 0 || tween.loop_mode == TweenLoop::Once {
                completed += 1;
                return false;
            }
            tween.repeats -= 1;
            tween.elapsed = 0.0;
            tween.forward = !tween.forward;
            true
        });

        completed
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels() -> EffectChannels {
        EffectChannels {
            overlay_alpha: 0.0,
            bloom_intensity: 1.2,
            bloom_brightness: 1.2,
            flash_alpha: 0.0,
            card_scale: 0.0,
            card_rotation: 0.0,
        }
    }

    #[test]
    fn tween_reaches_target_and_is_removed() {
        let mut tweens = TweenState::new();
        let mut ch = channels();
        tweens.add(Tween::new(Channel::OverlayAlpha, 0.0, 0.7, 0.5, Easing::Linear));

        tweens.tick(0.25, &mut ch);
        assert!((ch.overlay_alpha - 0.35).abs() < 1e-4);

        let done = tweens.tick(0.25, &mut ch);
        assert_eq!(done, 1);
        assert!((ch.overlay_alpha - 0.7).abs() < 1e-4);
        assert!(tweens.is_empty());
    }

    #[test]
    fn from_current_captures_on_first_tick() {
        let mut tweens = TweenState::new();
        let mut ch = channels();
        tweens.add(Tween::to(Channel::BloomIntensity, 2.0, 1.0, Easing::Linear));
        tweens.tick(0.5, &mut ch);
        assert!((ch.bloom_intensity - 1.6).abs() < 1e-4);
    }

    #[test]
    fn new_tween_supersedes_same_channel() {
        let mut tweens = TweenState::new();
        let mut ch = channels();
        tweens.add(Tween::new(Channel::OverlayAlpha, 0.0, 0.7, 1.0, Easing::Linear));
        tweens.add(Tween::new(Channel::CardScale, 0.0, 1.0, 1.0, Easing::Linear));
        tweens.add(Tween::new(Channel::OverlayAlpha, 0.7, 0.0, 1.0, Easing::Linear));
        assert_eq!(tweens.len(), 2);

        tweens.tick(1.0, &mut ch);
        assert!(ch.overlay_alpha.abs() < 1e-4);
    }

    #[test]
    fn ping_pong_once_returns_to_start() {
        let mut tweens = TweenState::new();
        let mut ch = channels();
        tweens.add(
            Tween::new(Channel::BloomIntensity, 2.0, 3.0, 0.15, Easing::Linear)
                .with_loop(TweenLoop::PingPong, 1),
        );

        tweens.tick(0.15, &mut ch);
        assert!((ch.bloom_intensity - 3.0).abs() < 1e-4);
        assert_eq!(tweens.len(), 1);

        let done = tweens.tick(0.15, &mut ch);
        assert_eq!(done, 1);
        assert!((ch.bloom_intensity - 2.0).abs() < 1e-4);
        assert!(tweens.is_empty());
    }
}
