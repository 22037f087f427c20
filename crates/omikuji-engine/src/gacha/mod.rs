//! Fortune table and the draw-cycle phase machine.

pub mod catalog;
pub mod machine;
