//! # Magnet pickup controller
//!
//! Attract/release/drop-in-bin semantics for the electromagnet. The
//! controller keeps a single weak [`ObjectId`] while something is held and
//! routes every world change through the [`World`] boundary; invalid
//! requests (attract while holding, release with nothing held) are silent
//! no-ops, never errors.

use cgmath::{MetricSpace, Point3};
use log::{info, warn};

use crate::world::{ObjectId, World};

/// Attraction radius around the magnet head
pub const MAGNET_RANGE: f32 = 5.0;
/// Height an object is lifted to on a successful attract
pub const CARRY_HEIGHT: f32 = 2.0;
/// Vertical gap kept between the magnet head and the held object
pub const CARRY_OFFSET: f32 = 2.0;
/// Objects released within this distance of the bin anchor are scrapped
pub const BIN_RADIUS: f32 = 5.0;
/// Resting height of a dropped object
pub const GROUND_HEIGHT: f32 = 0.5;

/// Electromagnet attract/carry/release logic
#[derive(Debug, Default)]
pub struct MagnetController {
    held: Option<ObjectId>,
}

impl MagnetController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the held object, if any
    pub fn held(&self) -> Option<ObjectId> {
        self.held
    }

    /// Attempts to grab the nearest candidate within [`MAGNET_RANGE`]
    ///
    /// Scans the world's candidates in their given order and takes the
    /// strictly closest one; ties go to the first encountered. Already
    /// holding something makes this a no-op that keeps the current object.
    ///
    /// # Returns
    /// The id now held, or `None` if nothing was in range
    pub fn try_attract<W: World>(&mut self, world: &mut W) -> Option<ObjectId> {
        if self.held.is_some() {
            return self.held;
        }

        let head = world.magnet_head_world();
        let mut closest: Option<(ObjectId, Point3<f32>, f32)> = None;
        for candidate in world.candidates() {
            let distance = candidate.world_position.distance(head);
            if distance < MAGNET_RANGE && closest.map_or(true, |(_, _, best)| distance < best) {
                closest = Some((candidate.id, candidate.world_position, distance));
            }
        }

        let (id, position, distance) = closest?;
        let lifted = Point3::new(position.x, CARRY_HEIGHT, position.z);
        if let Err(err) = world.set_object_position(id, lifted) {
            warn!("attract lost object {id}: {err}");
            return None;
        }
        info!("magnet attached {id} at distance {distance:.2}");
        self.held = Some(id);
        self.held
    }

    /// Releases the held object: scraps it near the bin, drops it otherwise
    ///
    /// Within [`BIN_RADIUS`] of the container anchor the object is removed
    /// from the live collection for good; anywhere else it is set back down
    /// at [`GROUND_HEIGHT`] under its current horizontal position. No-op if
    /// nothing is held.
    pub fn release<W: World>(&mut self, world: &mut W) {
        let Some(id) = self.held.take() else {
            return;
        };

        let Some(position) = world
            .candidates()
            .into_iter()
            .find(|c| c.id == id)
            .map(|c| c.world_position)
        else {
            warn!("held object {id} vanished before release");
            return;
        };

        if position.distance(world.container_anchor()) < BIN_RADIUS {
            match world.remove_object(id) {
                Ok(()) => info!("scrapped {id} in the bin"),
                Err(err) => warn!("failed to scrap {id}: {err}"),
            }
        } else {
            let grounded = Point3::new(position.x, GROUND_HEIGHT, position.z);
            match world.set_object_position(id, grounded) {
                Ok(()) => info!("dropped {id} at ground level"),
                Err(err) => warn!("failed to drop {id}: {err}"),
            }
        }
    }

    /// Keeps the held object tracking the magnet head, [`CARRY_OFFSET`]
    /// below it. Direct positional clamp, no physics. Called once per tick
    /// while the magnet is active and holding.
    pub fn track<W: World>(&mut self, world: &mut W) {
        let Some(id) = self.held else {
            return;
        };
        let head = world.magnet_head_world();
        let carried = Point3::new(head.x, head.y - CARRY_OFFSET, head.z);
        if let Err(err) = world.set_object_position(id, carried) {
            warn!("held object {id} vanished while carrying: {err}");
            self.held = None;
        }
    }

}
