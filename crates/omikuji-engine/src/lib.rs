pub mod api;
pub mod core;
pub mod gacha;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::SceneConfig;
pub use api::context::{Layers, SceneContext};
pub use api::scene::FortuneScene;
pub use api::types::{event_kind, DrawEvent, Phase, Rgb};
pub use crate::core::time::{FrameClock, FRAME_RATE};
pub use gacha::catalog::{FortuneCatalog, FortuneEntry, EXPLOSION_PALETTE, FORTUNES};
pub use gacha::machine::{GachaState, GachaStateMachine};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{draw_kind, DrawBuffer, DrawInstance};
pub use renderer::snapshot::{LayerTransforms, LineView, ParticleView, RenderState};
pub use systems::effects::{ConcentrationLine, FieldCapacity, Handle, Particle, ParticleField, ParticleKind, Rng};
pub use systems::transition::TransitionEffects;

// Animation helpers
pub use extensions::{Easing, Tween, TweenState};
