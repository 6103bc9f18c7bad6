// src/lib.rs
//! Scrapyard
//!
//! The attachment and physics core of a drivable excavator sandbox. The host
//! renderer supplies a [`world::World`] implementation; this crate owns the
//! per-frame tick that swings the wrecking ball, runs the electromagnet, and
//! keeps exactly one attachment active.

pub mod input;
pub mod prelude;
pub mod simulation;
pub mod world;

// Re-export main types for convenience
pub use simulation::GameCore;

/// Creates a game core over the built-in in-memory world
pub fn default() -> GameCore<world::SceneWorld> {
    GameCore::new(world::SceneWorld::new())
}
