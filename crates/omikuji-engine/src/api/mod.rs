pub mod config;
pub mod context;
pub mod scene;
pub mod types;
