//! # Scrapyard Prelude
//!
//! Convenient single import for typical hosts:
//!
//! ```rust
//! use scrapyard::prelude::*;
//!
//! let mut core = scrapyard::default();
//! core.input_mut().press_cycle_attachment();
//! core.tick();
//! assert_eq!(core.mode(), AttachmentMode::Magnet);
//! ```

// Re-export the core aggregate and its pieces
pub use crate::default;
pub use crate::simulation::{
    AttachmentMode, ChainConfig, ChainLink, ChainSimulator, GameCore, MagnetController,
};

// Re-export the world boundary
pub use crate::world::{Candidate, Excavator, ObjectId, SceneWorld, World, WorldError};

// Re-export input
pub use crate::input::InputState;

// Re-export common math types
pub use cgmath::{InnerSpace, MetricSpace, Point3, Vector3};
