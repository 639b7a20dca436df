//! Oriented bounding boxes
//!
//! `OrientedBox` is the volume every body in the simulation is made of: a
//! position, half-extents, and a right/up/front basis that may be driven
//! either by yaw/pitch/roll angles or by external hints (terrain normal,
//! travel direction). The basis is the input to the separating-axis test in
//! [`crate::physics::collision`]; `half_projection` is the primitive that
//! test is built on.

use crate::foundation::math::utils::{
    normalize_or, world_front, world_right, world_up, yaw_pitch_roll,
};
use crate::foundation::math::{Mat4, Vec3};

/// Axis-aligned bounding box in world space, used only for coarse bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Smallest corner
    pub min: Vec3,
    /// Largest corner
    pub max: Vec3,
}

impl Aabb {
    /// Center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether this box and `other` overlap on every world axis
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// A box volume with arbitrary orientation, anchored at a point.
///
/// The basis vectors stay mutually orthogonal and unit length across every
/// `update_basis*` call; degenerate inputs fall back to the world axes
/// rather than producing NaN. Angles are radians and are not clamped here;
/// limiting pitch/roll to avoid gimbal artifacts is the owning body's
/// policy.
#[derive(Debug, Clone)]
pub struct OrientedBox {
    /// Anchor position in world space
    pub position: Vec3,
    /// Heading angle about +Y, radians
    pub yaw: f32,
    /// Tip angle about +X, radians
    pub pitch: f32,
    /// Bank angle about +Z, radians
    pub roll: f32,
    half_extents: Vec3,
    right: Vec3,
    up: Vec3,
    front: Vec3,
}

impl OrientedBox {
    /// Create a box at `position` spanning `size` on each local axis.
    ///
    /// The basis starts as the world axes (right +X, up +Y, front -Z).
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            half_extents: size * 0.5,
            right: world_right(),
            up: world_up(),
            front: world_front(),
        }
    }

    /// Local right axis (unit length)
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Local up axis (unit length)
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Local front axis (unit length)
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Half-extents along the local right/up/front axes
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Replace the box dimensions with a new full `size`.
    pub fn resize(&mut self, size: Vec3) {
        self.half_extents = size * 0.5;
    }

    /// Rotation angles packed as (yaw, pitch, roll)
    pub fn rotation(&self) -> Vec3 {
        Vec3::new(self.yaw, self.pitch, self.roll)
    }

    /// Set raw pose state without recomputing the basis.
    ///
    /// `rotation` is packed as (yaw, pitch, roll). Callers follow up with
    /// one of the `update_basis*` methods before the basis is read.
    pub fn set_pose(&mut self, position: Vec3, rotation: Vec3) {
        self.position = position;
        self.yaw = rotation.x;
        self.pitch = rotation.y;
        self.roll = rotation.z;
    }

    /// Rebuild the basis from an externally supplied up vector, usually a
    /// terrain normal.
    ///
    /// The yaw/pitch/roll rotation orients the box about the hint: right is
    /// the hint crossed with the rotated world-right axis, front closes the
    /// frame. Keeps the box glued flat to an irregular surface while the
    /// heading angles still steer it.
    pub fn update_basis(&mut self, up_hint: Vec3) {
        let up = normalize_or(up_hint, world_up());
        let rotated_right = yaw_pitch_roll(self.yaw, self.pitch, self.roll) * world_right();
        let right = normalize_or(up.cross(&rotated_right), world_right());
        let front = normalize_or(up.cross(&right), world_front());
        self.up = up;
        self.right = right;
        self.front = front;
    }

    /// Rebuild the basis purely from yaw/pitch/roll.
    ///
    /// Used for free-flying volumes that are not attached to a surface.
    pub fn update_basis_free(&mut self) {
        let rotation = yaw_pitch_roll(self.yaw, self.pitch, self.roll);
        self.right = rotation * world_right();
        self.up = rotation * world_up();
        self.front = rotation * world_front();
    }

    /// Rebuild the basis so front tracks the direction of travel.
    ///
    /// `velocity` supplies the facing; the rotation angles are ignored. A
    /// stationary body keeps facing world front. `up_hint` anchors the
    /// frame's bank.
    pub fn update_basis_from_velocity(&mut self, up_hint: Vec3, velocity: Vec3) {
        let reference_up = normalize_or(up_hint, world_up());
        let front = normalize_or(velocity, world_front());
        let right = normalize_or(front.cross(&reference_up), world_right());
        let up = normalize_or(right.cross(&front), world_up());
        self.front = front;
        self.right = right;
        self.up = up;
    }

    /// Copy another box's orientation state (angles and basis vectors).
    ///
    /// Used to slave a collision volume to its pose box without re-deriving
    /// the frame.
    pub fn copy_orientation_from(&mut self, other: &OrientedBox) {
        self.yaw = other.yaw;
        self.pitch = other.pitch;
        self.roll = other.roll;
        self.right = other.right;
        self.up = other.up;
        self.front = other.front;
    }

    /// Half-length of the box's shadow when projected onto `axis`.
    ///
    /// This is the primitive the separating-axis test relies on: the box
    /// covers `[dot(center, axis) - h, dot(center, axis) + h]` on the axis,
    /// where `h` is the returned value.
    pub fn half_projection(&self, axis: &Vec3) -> f32 {
        (self.half_extents.x * self.right.dot(axis)).abs()
            + (self.half_extents.y * self.up.dot(axis)).abs()
            + (self.half_extents.z * self.front.dot(axis)).abs()
    }

    /// World-space axis-aligned bounds of the oriented box.
    ///
    /// Projects the half-extents through the absolute basis, so the result
    /// is exact for any orientation. Coarse bounds only; the SAT test does
    /// not use this.
    pub fn world_aabb(&self) -> Aabb {
        let extent = Vec3::new(
            self.half_projection(&Vec3::x()),
            self.half_projection(&Vec3::y()),
            self.half_projection(&Vec3::z()),
        );
        Aabb {
            min: self.position - extent,
            max: self.position + extent,
        }
    }

    /// World affine transform of the frame (position, front, up).
    ///
    /// Assembled from the current basis and position on each call, so the
    /// translation column always matches `position`.
    pub fn world_transform(&self) -> Mat4 {
        let back = -self.front;
        Mat4::new(
            self.right.x, self.up.x, back.x, self.position.x,
            self.right.y, self.up.y, back.y, self.position.y,
            self.right.z, self.up.z, back.z, self.position.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn assert_orthonormal(obb: &OrientedBox) {
        assert_relative_eq!(obb.right().magnitude(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(obb.up().magnitude(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(obb.front().magnitude(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(obb.right().dot(&obb.up()), 0.0, epsilon = EPSILON);
        assert_relative_eq!(obb.up().dot(&obb.front()), 0.0, epsilon = EPSILON);
        assert_relative_eq!(obb.front().dot(&obb.right()), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_new_box_uses_world_axes() {
        let obb = OrientedBox::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(obb.right().x, 1.0);
        assert_relative_eq!(obb.up().y, 1.0);
        assert_relative_eq!(obb.front().z, -1.0);
        assert_relative_eq!(obb.half_extents().x, 1.0);
        assert_relative_eq!(obb.half_extents().y, 2.0);
        assert_relative_eq!(obb.half_extents().z, 3.0);
    }

    #[test]
    fn test_set_pose_leaves_basis_untouched() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.set_pose(Vec3::new(5.0, 0.0, 0.0), Vec3::new(HALF_PI, 0.0, 0.0));
        assert_relative_eq!(obb.yaw, HALF_PI);
        // Basis still the construction-time world axes
        assert_relative_eq!(obb.front().z, -1.0);
    }

    #[test]
    fn test_free_basis_quarter_yaw() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.yaw = HALF_PI;
        obb.update_basis_free();
        assert_orthonormal(&obb);
        // Quarter turn about +Y carries -Z onto -X
        assert_relative_eq!(obb.front().x, -1.0, epsilon = EPSILON);
        assert_relative_eq!(obb.front().z, 0.0, epsilon = EPSILON);
        assert_relative_eq!(obb.up().y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_up_hint_basis_is_orthonormal_on_slope() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.yaw = 0.37;
        obb.update_basis(Vec3::new(0.3, 1.0, -0.2));
        assert_orthonormal(&obb);
        // Up matches the normalized hint
        let hint = Vec3::new(0.3, 1.0, -0.2).normalize();
        assert_relative_eq!(obb.up().dot(&hint), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_up_hint_zero_falls_back_to_world_up() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.update_basis(Vec3::zeros());
        assert_orthonormal(&obb);
        assert_relative_eq!(obb.up().y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_velocity_basis_faces_travel() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.update_basis_from_velocity(Vec3::y(), Vec3::new(7.0, 0.0, 0.0));
        assert_orthonormal(&obb);
        assert_relative_eq!(obb.front().x, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_velocity_basis_stationary_keeps_world_front() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.update_basis_from_velocity(Vec3::y(), Vec3::zeros());
        assert_relative_eq!(obb.front().z, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_half_projection_axis_aligned() {
        let obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(obb.half_projection(&Vec3::x()), 1.0, epsilon = EPSILON);
        assert_relative_eq!(obb.half_projection(&Vec3::y()), 2.0, epsilon = EPSILON);
        assert_relative_eq!(obb.half_projection(&Vec3::z()), 3.0, epsilon = EPSILON);
    }

    #[test]
    fn test_half_projection_diagonal_yaw() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.yaw = HALF_PI * 0.5;
        obb.update_basis_free();
        // Unit half-extents at 45 degrees shadow sqrt(2) on the X axis
        assert_relative_eq!(
            obb.half_projection(&Vec3::x()),
            std::f32::consts::SQRT_2,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_world_transform_translation_matches_position() {
        let mut obb = OrientedBox::new(Vec3::new(3.0, -1.0, 8.0), Vec3::new(2.0, 2.0, 2.0));
        obb.yaw = 1.1;
        obb.update_basis_free();
        let origin = obb.world_transform().transform_point(&Point3::origin());
        assert_relative_eq!(origin.x, 3.0, epsilon = EPSILON);
        assert_relative_eq!(origin.y, -1.0, epsilon = EPSILON);
        assert_relative_eq!(origin.z, 8.0, epsilon = EPSILON);
    }

    #[test]
    fn test_world_transform_maps_local_front() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.yaw = HALF_PI;
        obb.update_basis_free();
        // Local -Z maps onto the basis front vector
        let mapped = obb.world_transform().transform_vector(&Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(mapped.x, obb.front().x, epsilon = EPSILON);
        assert_relative_eq!(mapped.y, obb.front().y, epsilon = EPSILON);
        assert_relative_eq!(mapped.z, obb.front().z, epsilon = EPSILON);
    }

    #[test]
    fn test_world_aabb_axis_aligned() {
        let obb = OrientedBox::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        let aabb = obb.world_aabb();
        assert_relative_eq!(aabb.min.x, 9.0, epsilon = EPSILON);
        assert_relative_eq!(aabb.max.x, 11.0, epsilon = EPSILON);
        assert_relative_eq!(aabb.min.y, -2.0, epsilon = EPSILON);
        assert_relative_eq!(aabb.max.z, 3.0, epsilon = EPSILON);
        assert_relative_eq!(aabb.center().x, 10.0, epsilon = EPSILON);
    }

    #[test]
    fn test_world_aabb_grows_under_rotation() {
        let mut obb = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        obb.yaw = HALF_PI * 0.5;
        obb.update_basis_free();
        let aabb = obb.world_aabb();
        assert_relative_eq!(aabb.max.x, std::f32::consts::SQRT_2, epsilon = EPSILON);
        // Height is unaffected by a pure yaw
        assert_relative_eq!(aabb.max.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_separated_boxes_have_disjoint_aabbs() {
        let a = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        let b = OrientedBox::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        assert!(!a.world_aabb().overlaps(&b.world_aabb()));
        let c = OrientedBox::new(Vec3::new(1.5, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        assert!(a.world_aabb().overlaps(&c.world_aabb()));
    }
}
