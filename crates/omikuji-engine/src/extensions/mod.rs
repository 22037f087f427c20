// extensions/mod.rs
//
// Animation helpers decoupled from the scene: easing curves and the tween
// task list. The transition layer drives these; nothing here knows about
// phases or particles.

pub mod easing;
pub mod tween;

pub use easing::{ease, lerp, Easing};
pub use tween::{Channel, EffectChannels, Tween, TweenLoop, TweenState};
