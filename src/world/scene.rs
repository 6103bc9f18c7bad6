//! # Built-in scene world
//!
//! An in-memory [`World`] implementation with the stock yard layout: four
//! rusty cars, a garbage bin off to the west, and the excavator parked at
//! the origin. Lets the whole core run headless; a renderer-backed host
//! would implement [`World`] over its scene graph instead and mirror this
//! module's bookkeeping.

use cgmath::Point3;
use log::debug;

use crate::input::InputState;
use crate::simulation::attachment::AttachmentMode;
use crate::world::excavator::Excavator;
use crate::world::{Candidate, ObjectId, World, WorldError};

/// Resting height of a parked car
pub const CAR_REST_HEIGHT: f32 = 0.5;

/// Stock bin anchor position, west of the yard
pub fn stock_bin_anchor() -> Point3<f32> {
    Point3::new(-40.0, 0.0, 0.0)
}

#[derive(Debug, Clone)]
struct Car {
    id: ObjectId,
    position: Point3<f32>,
}

/// Per-attachment visibility bookkeeping
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentVisibility {
    pub bucket: bool,
    pub magnet: bool,
    pub wrecking_ball: bool,
}

impl AttachmentVisibility {
    pub fn get(&self, mode: AttachmentMode) -> bool {
        match mode {
            AttachmentMode::Bucket => self.bucket,
            AttachmentMode::Magnet => self.magnet,
            AttachmentMode::WreckingBall => self.wrecking_ball,
        }
    }

    fn set(&mut self, mode: AttachmentMode, visible: bool) {
        match mode {
            AttachmentMode::Bucket => self.bucket = visible,
            AttachmentMode::Magnet => self.magnet = visible,
            AttachmentMode::WreckingBall => self.wrecking_ball = visible,
        }
    }

    /// True when exactly one attachment is shown
    pub fn exactly_one(&self) -> bool {
        [self.bucket, self.magnet, self.wrecking_ball]
            .iter()
            .filter(|v| **v)
            .count()
            == 1
    }
}

/// Headless scene: excavator, scrap cars, bin, and the rendering handoff
/// caches a real renderer would consume.
#[derive(Debug, Clone)]
pub struct SceneWorld {
    excavator: Excavator,
    cars: Vec<Car>,
    next_id: u32,
    bin_anchor: Point3<f32>,
    visibility: AttachmentVisibility,
    link_locals: Vec<Point3<f32>>,
    ball_world: Option<Point3<f32>>,
}

impl SceneWorld {
    /// Creates the stock yard: four cars and the bin at [`stock_bin_anchor`]
    pub fn new() -> Self {
        let mut world = Self::empty();
        world.add_car(-20.0, 20.0);
        world.add_car(20.0, -20.0);
        world.add_car(-30.0, -30.0);
        world.add_car(30.0, 30.0);
        world
    }

    /// Creates a yard with no cars
    pub fn empty() -> Self {
        Self {
            excavator: Excavator::new(),
            cars: Vec::new(),
            next_id: 0,
            bin_anchor: stock_bin_anchor(),
            visibility: AttachmentVisibility::default(),
            link_locals: Vec::new(),
            ball_world: None,
        }
    }

    /// Parks a new car at ground height
    ///
    /// # Returns
    /// The id of the new car; candidate order is insertion order.
    pub fn add_car(&mut self, x: f32, z: f32) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.cars.push(Car {
            id,
            position: Point3::new(x, CAR_REST_HEIGHT, z),
        });
        debug!("parked car {id} at ({x:.1}, {z:.1})");
        id
    }

    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    pub fn car_position(&self, id: ObjectId) -> Option<Point3<f32>> {
        self.cars.iter().find(|c| c.id == id).map(|c| c.position)
    }

    pub fn excavator(&self) -> &Excavator {
        &self.excavator
    }

    pub fn excavator_mut(&mut self) -> &mut Excavator {
        &mut self.excavator
    }

    pub fn visibility(&self) -> AttachmentVisibility {
        self.visibility
    }

    /// Chain link positions from the latest handoff, mount-local space
    pub fn link_local_positions(&self) -> &[Point3<f32>] {
        &self.link_locals
    }

    /// Ball position from the latest handoff, if the ball has ever run
    pub fn ball_world_position(&self) -> Option<Point3<f32>> {
        self.ball_world
    }

    fn car_index(&self, id: ObjectId) -> Result<usize, WorldError> {
        self.cars
            .iter()
            .position(|c| c.id == id)
            .ok_or(WorldError::UnknownObject(id))
    }
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for SceneWorld {
    fn candidates(&self) -> Vec<Candidate> {
        self.cars
            .iter()
            .map(|c| Candidate {
                id: c.id,
                world_position: c.position,
            })
            .collect()
    }

    fn container_anchor(&self) -> Point3<f32> {
        self.bin_anchor
    }

    fn chain_anchor_world(&self) -> Point3<f32> {
        self.excavator.mount_world()
    }

    fn magnet_head_world(&self) -> Point3<f32> {
        // The magnet head mounts at the same stick-tip point the chain
        // hangs from.
        self.excavator.mount_world()
    }

    fn world_to_chain_local(&self, point: Point3<f32>) -> Point3<f32> {
        self.excavator.world_to_mount_local(point)
    }

    fn remove_object(&mut self, id: ObjectId) -> Result<(), WorldError> {
        let index = self.car_index(id)?;
        self.cars.remove(index);
        debug!("removed car {id}");
        Ok(())
    }

    fn set_object_position(
        &mut self,
        id: ObjectId,
        position: Point3<f32>,
    ) -> Result<(), WorldError> {
        let index = self.car_index(id)?;
        self.cars[index].position = position;
        Ok(())
    }

    fn set_link_local_positions(&mut self, points: &[Point3<f32>]) {
        self.link_locals.clear();
        self.link_locals.extend_from_slice(points);
    }

    fn set_ball_world_position(&mut self, point: Point3<f32>) {
        self.ball_world = Some(point);
    }

    fn set_attachment_visible(&mut self, mode: AttachmentMode, visible: bool) {
        self.visibility.set(mode, visible);
    }

    fn apply_drive(&mut self, input: &InputState) {
        self.excavator.apply_drive(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_yard_layout() {
        let world = SceneWorld::new();
        assert_eq!(world.car_count(), 4);
        assert_eq!(world.container_anchor(), stock_bin_anchor());

        let candidates = world.candidates();
        assert_eq!(
            candidates[0].world_position,
            Point3::new(-20.0, CAR_REST_HEIGHT, 20.0)
        );
        assert_eq!(
            candidates[3].world_position,
            Point3::new(30.0, CAR_REST_HEIGHT, 30.0)
        );
        assert_eq!(
            world.car_position(candidates[0].id),
            Some(candidates[0].world_position)
        );
    }

    #[test]
    fn test_candidate_order_is_insertion_order() {
        let mut world = SceneWorld::empty();
        let a = world.add_car(1.0, 0.0);
        let b = world.add_car(2.0, 0.0);
        let c = world.add_car(3.0, 0.0);

        let order: Vec<_> = world.candidates().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![a, b, c]);

        // Removal keeps the survivors' relative order
        world.remove_object(b).unwrap();
        let order: Vec<_> = world.candidates().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let mut world = SceneWorld::empty();
        let id = world.add_car(0.0, 0.0);
        world.remove_object(id).unwrap();

        assert!(matches!(
            world.remove_object(id),
            Err(WorldError::UnknownObject(_))
        ));
        assert!(matches!(
            world.set_object_position(id, Point3::new(0.0, 0.0, 0.0)),
            Err(WorldError::UnknownObject(_))
        ));
    }

    #[test]
    fn test_mount_points_coincide() {
        let world = SceneWorld::new();
        assert_eq!(world.chain_anchor_world(), world.magnet_head_world());
    }

    #[test]
    fn test_visibility_bookkeeping() {
        let mut world = SceneWorld::empty();
        assert!(!world.visibility().exactly_one());

        world.set_attachment_visible(AttachmentMode::Magnet, true);
        world.set_attachment_visible(AttachmentMode::Bucket, false);
        world.set_attachment_visible(AttachmentMode::WreckingBall, false);
        assert!(world.visibility().exactly_one());
        assert!(world.visibility().get(AttachmentMode::Magnet));
    }

    #[test]
    fn test_drive_moves_mount() {
        let mut world = SceneWorld::empty();
        let before = world.chain_anchor_world();

        let mut input = InputState::new();
        input.forward = true;
        for _ in 0..20 {
            world.apply_drive(&input);
        }
        let after = world.chain_anchor_world();
        assert!((after.z - before.z - 3.0).abs() < 1e-4);
        assert!((after.y - before.y).abs() < 1e-4);
    }
}
