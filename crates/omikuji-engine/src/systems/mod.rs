pub mod effects;
pub mod render;
pub mod transition;
