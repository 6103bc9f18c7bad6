//! # World boundary
//!
//! The core never owns render objects. Everything it knows about the scene
//! comes through the [`World`] trait: an ordered view of the liftable scrap,
//! a handful of cached world-space points, and narrow mutation and rendering
//! handoff methods. Hosts implement this over their scene graph; the built-in
//! [`SceneWorld`] implements it over plain structs for headless use.

pub mod excavator;
pub mod scene;

pub use excavator::Excavator;
pub use scene::SceneWorld;

use cgmath::Point3;
use thiserror::Error;

use crate::input::InputState;
use crate::simulation::attachment::AttachmentMode;

/// Stable identifier for a world object (a scrap car)
///
/// Ids are opaque handles into the host's object collection; the core keeps
/// at most one of them (the held object) and never a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A liftable object as seen by the magnet scan
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub id: ObjectId,
    pub world_position: Point3<f32>,
}

/// Errors from world mutation requests
///
/// Nothing in the tick path treats these as fatal; the core logs and
/// continues, since a missing id just means the host already disposed of
/// the object.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unknown object id {0}")]
    UnknownObject(ObjectId),
}

/// Scene boundary consumed by the game core
///
/// Query methods are called every tick; mutation and handoff methods only
/// when the active attachment needs them. The candidate sequence must have a
/// stable order (insertion order for the built-in world) because magnet
/// tie-breaking is first-encountered.
pub trait World {
    /// Ordered sequence of liftable objects and their world positions
    fn candidates(&self) -> Vec<Candidate>;

    /// World position of the garbage bin anchor
    fn container_anchor(&self) -> Point3<f32>;

    /// World position of the stick tip the chain hangs from
    fn chain_anchor_world(&self) -> Point3<f32>;

    /// World position of the magnet head
    fn magnet_head_world(&self) -> Point3<f32>;

    /// Converts a world-space point into the chain mount's local space
    ///
    /// Used for the rendering handoff: chain physics runs in world space but
    /// link visuals are children of the mount.
    fn world_to_chain_local(&self, point: Point3<f32>) -> Point3<f32>;

    /// Permanently removes an object from the live collection
    fn remove_object(&mut self, id: ObjectId) -> Result<(), WorldError>;

    /// Moves an object to a new world position
    fn set_object_position(&mut self, id: ObjectId, position: Point3<f32>)
        -> Result<(), WorldError>;

    /// Hands the chain link positions (mount-local space) to the renderer
    fn set_link_local_positions(&mut self, points: &[Point3<f32>]);

    /// Hands the wrecking ball's world position to the renderer
    fn set_ball_world_position(&mut self, point: Point3<f32>);

    /// Shows or hides one attachment's visuals
    fn set_attachment_visible(&mut self, mode: AttachmentMode, visible: bool);

    /// Applies the level-triggered drive flags for this tick
    ///
    /// Provided as a no-op so pure scene adapters and test doubles can skip
    /// locomotion entirely.
    fn apply_drive(&mut self, _input: &InputState) {}
}
