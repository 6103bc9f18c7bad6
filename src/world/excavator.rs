//! # Excavator kinematics
//!
//! Drive, yaw, and boom/stick articulation for the excavator, plus the
//! composed transform that places the attachment mount (the stick tip both
//! the chain and the magnet head hang from) in world space.
//!
//! Speeds are flat per-tick increments, matching the chain simulator's
//! constant-timestep model.

use cgmath::{Matrix4, Point3, Rad, SquareMatrix, Transform, Vector3};

use crate::input::InputState;

/// Ground travel per tick while a drive flag is held
pub const DRIVE_SPEED: f32 = 0.15;
/// Yaw change per tick in radians
pub const YAW_SPEED: f32 = 0.03;
/// Boom angle change per tick in radians
pub const BOOM_SPEED: f32 = 0.02;
/// Stick angle change per tick in radians
pub const STICK_SPEED: f32 = 0.02;

/// Boom articulation limits (radians about the mount's x axis)
pub const BOOM_MIN: f32 = -std::f32::consts::FRAC_PI_3;
pub const BOOM_MAX: f32 = std::f32::consts::FRAC_PI_4;
/// Stick articulation limits
pub const STICK_MIN: f32 = -std::f32::consts::FRAC_PI_2;
pub const STICK_MAX: f32 = std::f32::consts::FRAC_PI_4;

/// Drivable excavator with an articulated boom and stick
///
/// The mount transform chain mirrors the vehicle's build: tracks at ground
/// level, body 5 up, boom pivot at (0, 4, -2) on the body, a 6-long boom, a
/// 6-long stick, and the mount 4 past the stick pivot. All of the arm
/// segments extend toward -z and pivot about x.
#[derive(Debug, Clone)]
pub struct Excavator {
    /// Position on the ground plane (y stays 0)
    pub position: Point3<f32>,
    /// Heading in radians about the y axis
    pub yaw: f32,
    /// Boom pivot angle, clamped to [`BOOM_MIN`]..=[`BOOM_MAX`]
    pub boom_angle: f32,
    /// Stick pivot angle, clamped to [`STICK_MIN`]..=[`STICK_MAX`]
    pub stick_angle: f32,
}

impl Default for Excavator {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            yaw: 0.0,
            boom_angle: 0.0,
            stick_angle: 0.0,
        }
    }
}

impl Excavator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit vector the excavator drives along
    pub fn forward(&self) -> Vector3<f32> {
        Vector3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Advances locomotion and articulation one tick from the drive flags
    ///
    /// Boom-up lowers the angle toward [`BOOM_MIN`]; stick-out lowers toward
    /// [`STICK_MIN`]. Both clamp rather than stop short.
    pub fn apply_drive(&mut self, input: &InputState) {
        if input.forward {
            self.position += self.forward() * DRIVE_SPEED;
        }
        if input.backward {
            self.position -= self.forward() * DRIVE_SPEED;
        }
        if input.turn_left {
            self.yaw += YAW_SPEED;
        }
        if input.turn_right {
            self.yaw -= YAW_SPEED;
        }

        if input.boom_up {
            self.boom_angle = (self.boom_angle - BOOM_SPEED).max(BOOM_MIN);
        }
        if input.boom_down {
            self.boom_angle = (self.boom_angle + BOOM_SPEED).min(BOOM_MAX);
        }
        if input.stick_out {
            self.stick_angle = (self.stick_angle - STICK_SPEED).max(STICK_MIN);
        }
        if input.stick_in {
            self.stick_angle = (self.stick_angle + STICK_SPEED).min(STICK_MAX);
        }
    }

    /// Local-to-world transform of the attachment mount
    pub fn mount_transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(self.position.x, 0.0, self.position.z))
            * Matrix4::from_angle_y(Rad(self.yaw))
            * Matrix4::from_translation(Vector3::new(0.0, 5.0, 0.0))
            * Matrix4::from_translation(Vector3::new(0.0, 4.0, -2.0))
            * Matrix4::from_translation(Vector3::new(0.0, 0.0, -6.0))
            * Matrix4::from_angle_x(Rad(self.boom_angle))
            * Matrix4::from_translation(Vector3::new(0.0, 0.0, -6.0))
            * Matrix4::from_angle_x(Rad(self.stick_angle))
            * Matrix4::from_translation(Vector3::new(0.0, 0.0, -4.0))
    }

    /// World position of the attachment mount
    pub fn mount_world(&self) -> Point3<f32> {
        self.mount_transform()
            .transform_point(Point3::new(0.0, 0.0, 0.0))
    }

    /// Maps a world-space point into mount-local space
    ///
    /// The mount transform is rigid, so it is always invertible; the
    /// identity fallback is unreachable in practice.
    pub fn world_to_mount_local(&self, point: Point3<f32>) -> Point3<f32> {
        self.mount_transform()
            .invert()
            .unwrap_or_else(Matrix4::identity)
            .transform_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::MetricSpace;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_mount_at_rest() {
        let excavator = Excavator::new();
        let mount = excavator.mount_world();
        // 5 (body) + 4 (pivot) up, 2 + 6 + 6 + 4 back along -z
        assert!(mount.distance(Point3::new(0.0, 9.0, -18.0)) < EPS);
    }

    #[test]
    fn test_mount_follows_yaw() {
        let mut excavator = Excavator::new();
        excavator.yaw = std::f32::consts::FRAC_PI_2;
        let mount = excavator.mount_world();
        // Quarter turn left swings the arm from -z to -x
        assert!(mount.distance(Point3::new(-18.0, 9.0, 0.0)) < EPS);
    }

    #[test]
    fn test_world_to_mount_local_round_trip() {
        let mut excavator = Excavator::new();
        excavator.position = Point3::new(12.0, 0.0, -7.0);
        excavator.yaw = 0.8;
        excavator.boom_angle = -0.4;
        excavator.stick_angle = 0.3;

        let world = Point3::new(3.0, 4.0, 5.0);
        let local = excavator.world_to_mount_local(world);
        let back = excavator.mount_transform().transform_point(local);
        assert!(back.distance(world) < EPS);

        // The mount itself maps to the local origin
        let origin = excavator.world_to_mount_local(excavator.mount_world());
        assert!(origin.distance(Point3::new(0.0, 0.0, 0.0)) < EPS);
    }

    #[test]
    fn test_articulation_clamps() {
        let mut excavator = Excavator::new();
        let mut input = InputState::new();
        input.boom_up = true;
        input.stick_out = true;
        for _ in 0..500 {
            excavator.apply_drive(&input);
        }
        assert!((excavator.boom_angle - BOOM_MIN).abs() < EPS);
        assert!((excavator.stick_angle - STICK_MIN).abs() < EPS);

        input.clear();
        input.boom_down = true;
        input.stick_in = true;
        for _ in 0..500 {
            excavator.apply_drive(&input);
        }
        assert!((excavator.boom_angle - BOOM_MAX).abs() < EPS);
        assert!((excavator.stick_angle - STICK_MAX).abs() < EPS);
    }

    #[test]
    fn test_drive_moves_along_heading() {
        let mut excavator = Excavator::new();
        let mut input = InputState::new();
        input.forward = true;
        for _ in 0..10 {
            excavator.apply_drive(&input);
        }
        // Heading 0 faces +z
        assert!(excavator.position.distance(Point3::new(0.0, 0.0, 1.5)) < EPS);

        input.clear();
        input.backward = true;
        for _ in 0..10 {
            excavator.apply_drive(&input);
        }
        assert!(excavator.position.distance(Point3::new(0.0, 0.0, 0.0)) < EPS);
    }
}
