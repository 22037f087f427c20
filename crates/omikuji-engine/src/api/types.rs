use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Linear RGB colour, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

/// Phase of the draw cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Charging,
    Releasing,
    Result,
}

impl Phase {
    /// The only phase this one may advance to.
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle => Phase::Charging,
            Phase::Charging => Phase::Releasing,
            Phase::Releasing => Phase::Result,
            Phase::Result => Phase::Idle,
        }
    }

    /// Whether a tap is honoured in this phase.
    pub fn accepts_input(self) -> bool {
        matches!(self, Phase::Idle | Phase::Result)
    }
}

/// Kinds of [`DrawEvent`] the scene emits.
pub mod event_kind {
    pub const CHARGE_STARTED: f32 = 1.0;
    pub const RELEASED: f32 = 2.0;
    pub const REVEALED: f32 = 3.0;
    pub const RESET: f32 = 4.0;
}

/// An event emitted by the scene at a phase boundary, read by the host
/// (sound cues, analytics). `kind` is one of [`event_kind`]; `a` carries the
/// selected catalog index where relevant, `b`/`c` the scene centre.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize)]
pub struct DrawEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl DrawEvent {
    pub const FLOATS: usize = 4;
}
