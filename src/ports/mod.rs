//! Capability interfaces shared by agents and pipelines

pub mod observer;
pub mod player;

// Public re-exports
pub use observer::Observer;
pub use player::Player;
