//! Separating-axis collision test and penetration resolution
//!
//! Stateless pair of operations over oriented boxes: [`intersect`] answers
//! whether two bodies' collision volumes overlap and by how much, and
//! [`resolve`] applies the minimum-translation correction to both bodies.
//!
//! The test projects both boxes onto 15 candidate axes: the three basis
//! vectors of each box and the nine pairwise cross products. One axis with
//! disjoint projections proves separation and short-circuits the loop; if
//! none is found, the axis with the smallest overlap yields the MTV.
//! Candidate axes are normalized before the comparison so overlaps from
//! different axes are commensurable distances, and near-zero cross products
//! (parallel edges) are skipped rather than counted as zero-width contacts.

use crate::foundation::math::Vec3;
use crate::physics::config::PhysicsConfig;
use crate::physics::obb::OrientedBox;
use crate::physics::rigid_body::RigidBody;

/// Squared-length cutoff for degenerate candidate axes when no config is in
/// play (matches `PhysicsConfig::default().axis_epsilon`).
pub const DEFAULT_AXIS_EPSILON: f32 = 1e-6;

/// One intersection between two volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit axis of least penetration, pointing from the first box toward
    /// the second
    pub axis: Vec3,
    /// Penetration depth along `axis`
    pub overlap: f32,
    /// Minimum translation vector: `axis * overlap`
    pub mtv: Vec3,
}

/// Hit-test two bodies' collision volumes without mutating anything.
///
/// Distinct from [`resolve`]: use this for pure queries such as
/// projectile-versus-target checks.
pub fn intersect(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    intersect_boxes(&a.collision, &b.collision, DEFAULT_AXIS_EPSILON)
}

/// Run the separating-axis test between two oriented boxes.
///
/// # Arguments
///
/// * `a`, `b` - the volumes to test
/// * `axis_epsilon` - squared-length threshold below which a candidate axis
///   is considered degenerate and skipped
///
/// # Returns
///
/// `None` when a separating axis exists; otherwise the contact whose MTV
/// points from `a` toward `b`. Touching boxes (zero overlap on the tightest
/// axis) count as intersecting with a zero-length MTV.
pub fn intersect_boxes(a: &OrientedBox, b: &OrientedBox, axis_epsilon: f32) -> Option<Contact> {
    let delta = b.position - a.position;

    let axes_a = [a.right(), a.up(), a.front()];
    let axes_b = [b.right(), b.up(), b.front()];

    let mut candidates = [Vec3::zeros(); 15];
    candidates[..3].copy_from_slice(&axes_a);
    candidates[3..6].copy_from_slice(&axes_b);
    let mut index = 6;
    for axis_a in &axes_a {
        for axis_b in &axes_b {
            candidates[index] = axis_a.cross(axis_b);
            index += 1;
        }
    }

    let mut min_overlap = f32::MAX;
    let mut min_axis: Option<Vec3> = None;

    for candidate in &candidates {
        // Parallel box edges produce near-zero cross products; skip them.
        // Treating them as zero-projection axes would fabricate zero-overlap
        // contacts.
        if candidate.magnitude_squared() < axis_epsilon {
            continue;
        }
        let axis = candidate.normalize();

        let dist = delta.dot(&axis).abs();
        let reach = a.half_projection(&axis) + b.half_projection(&axis);
        if dist > reach {
            // One separating axis is proof of disjointness
            return None;
        }

        let overlap = reach - dist;
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = Some(axis);
        }
    }

    let axis = min_axis?;
    // Orient the correction from a toward b
    let axis = if delta.dot(&axis) < 0.0 { -axis } else { axis };
    Some(Contact {
        axis,
        overlap: min_overlap,
        mtv: axis * min_overlap,
    })
}

/// Test two bodies and, when they overlap, push them apart.
///
/// The MTV is applied equal-and-opposite: subtracted from the first body's
/// pose position, added to the second's. Both collision flags are set. When
/// the pose fronts point the same way (a rear-end contact) each body's
/// throttle speed is damped by its own `mass / 10`, approximating an
/// inelastic exchange. Both collision volumes are refreshed afterwards so a
/// following resolution pass observes the corrected poses.
pub fn resolve(a: &mut RigidBody, b: &mut RigidBody, config: &PhysicsConfig) -> Option<Contact> {
    let contact = intersect_boxes(&a.collision, &b.collision, config.axis_epsilon)?;

    a.pose.position -= contact.mtv;
    b.pose.position += contact.mtv;
    a.is_colliding = true;
    b.is_colliding = true;

    if a.pose.front().dot(&b.pose.front()) > 0.0 {
        a.speed *= a.mass / 10.0;
        b.speed *= b.mass / 10.0;
    }

    a.refresh_collision_shape();
    b.refresh_collision_shape();

    log::trace!(
        "resolved contact: overlap {:.4} along ({:.3}, {:.3}, {:.3})",
        contact.overlap,
        contact.axis.x,
        contact.axis.y,
        contact.axis.z
    );
    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn unit_body_at(x: f32, y: f32, z: f32) -> RigidBody {
        let mut body = RigidBody::new(Vec3::new(x, y, z), Vec3::new(2.0, 2.0, 2.0));
        body.refresh_collision_shape();
        body
    }

    #[test]
    fn test_overlapping_boxes_report_x_mtv() {
        // Half-extent-1 cubes at the origin and x=1.5 overlap by 0.5
        let a = unit_body_at(0.0, 0.0, 0.0);
        let b = unit_body_at(1.5, 0.0, 0.0);
        let contact = intersect(&a, &b).expect("boxes overlap");
        assert_relative_eq!(contact.overlap, 0.5, epsilon = EPSILON);
        assert_relative_eq!(contact.mtv.x, 0.5, epsilon = EPSILON);
        assert_relative_eq!(contact.mtv.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(contact.mtv.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_separated_boxes_do_not_intersect() {
        let a = unit_body_at(0.0, 0.0, 0.0);
        let b = unit_body_at(3.0, 0.0, 0.0);
        assert!(intersect(&a, &b).is_none());
    }

    #[test]
    fn test_axis_aligned_separation_on_each_world_axis() {
        let a = unit_body_at(0.0, 0.0, 0.0);
        // Center separation beyond the summed half-extents on any single
        // world axis is conclusive
        assert!(intersect(&a, &unit_body_at(2.1, 0.0, 0.0)).is_none());
        assert!(intersect(&a, &unit_body_at(0.0, 2.1, 0.0)).is_none());
        assert!(intersect(&a, &unit_body_at(0.0, 0.0, 2.1)).is_none());
        assert!(intersect(&a, &unit_body_at(2.1, 2.1, 2.1)).is_none());
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let a = unit_body_at(0.0, 0.0, 0.0);
        let b = unit_body_at(1.5, 0.2, -0.3);
        let ab = intersect(&a, &b).expect("overlap");
        let ba = intersect(&b, &a).expect("overlap");
        assert_relative_eq!(ab.overlap, ba.overlap, epsilon = EPSILON);
        // MTV always points first-toward-second, so it flips with the order
        assert_relative_eq!(ab.mtv.x, -ba.mtv.x, epsilon = EPSILON);
        assert_relative_eq!(ab.mtv.y, -ba.mtv.y, epsilon = EPSILON);
        assert_relative_eq!(ab.mtv.z, -ba.mtv.z, epsilon = EPSILON);

        let far_a = unit_body_at(0.0, 0.0, 0.0);
        let far_b = unit_body_at(3.0, 1.0, 0.5);
        assert_eq!(intersect(&far_a, &far_b).is_none(), intersect(&far_b, &far_a).is_none());
    }

    #[test]
    fn test_rotated_box_tightest_axis() {
        let a = unit_body_at(0.0, 0.0, 0.0);
        let mut b = unit_body_at(2.0, 0.0, 0.0);
        b.pose.yaw = HALF_PI * 0.5;
        b.pose.update_basis_free();
        b.refresh_collision_shape();
        // B's 45-degree shadow reaches sqrt(2) toward A, so the X axis
        // carries the least overlap: 1 + sqrt(2) - 2
        let contact = intersect(&a, &b).expect("corner overlap");
        assert_relative_eq!(contact.overlap, std::f32::consts::SQRT_2 - 1.0, epsilon = EPSILON);
        assert_relative_eq!(contact.axis.x, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_touching_boxes_count_as_contact() {
        let a = unit_body_at(0.0, 0.0, 0.0);
        let b = unit_body_at(2.0, 0.0, 0.0);
        let contact = intersect(&a, &b).expect("touching faces intersect");
        assert_relative_eq!(contact.overlap, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_resolve_separates_and_flags() {
        let mut a = unit_body_at(0.0, 0.0, 0.0);
        let mut b = unit_body_at(1.5, 0.0, 0.0);
        let config = PhysicsConfig::default();

        let contact = resolve(&mut a, &mut b, &config).expect("overlap resolved");
        assert_relative_eq!(contact.overlap, 0.5, epsilon = EPSILON);
        assert_relative_eq!(a.pose.position.x, -0.5, epsilon = EPSILON);
        assert_relative_eq!(b.pose.position.x, 2.0, epsilon = EPSILON);
        assert!(a.is_colliding);
        assert!(b.is_colliding);

        // Penetration never increases across a resolution call
        assert!(intersect(&a, &b).map_or(true, |c| c.overlap <= 0.5 + EPSILON));
    }

    #[test]
    fn test_rear_end_contact_damps_throttle_speed() {
        // Both fronts face -Z: a rear-end case
        let mut a = unit_body_at(0.0, 0.0, 0.0);
        let mut b = unit_body_at(0.0, 0.0, -1.5);
        a.speed = 1.0;
        a.mass = 5.0;
        b.speed = 2.0;
        b.mass = 2.0;

        resolve(&mut a, &mut b, &PhysicsConfig::default()).expect("overlap");
        assert_relative_eq!(a.speed, 0.5, epsilon = EPSILON);
        assert_relative_eq!(b.speed, 0.4, epsilon = EPSILON);
    }

    #[test]
    fn test_head_on_contact_keeps_throttle_speed() {
        let mut a = unit_body_at(0.0, 0.0, 0.0);
        let mut b = unit_body_at(0.0, 0.0, -1.5);
        b.pose.yaw = HALF_PI * 2.0;
        b.pose.update_basis_free();
        b.refresh_collision_shape();
        a.speed = 1.0;
        b.speed = 1.0;

        resolve(&mut a, &mut b, &PhysicsConfig::default()).expect("overlap");
        assert_relative_eq!(a.speed, 1.0, epsilon = EPSILON);
        assert_relative_eq!(b.speed, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_resolve_acts_on_offset_collision_volumes() {
        // A's hull sits 1.5 units to the right of its anchor; the pose boxes
        // alone would not touch
        let mut a = RigidBody::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0))
            .with_collision_box(Vec3::new(2.0, 2.0, 2.0), Vec3::new(1.5, 0.0, 0.0));
        let mut b = unit_body_at(3.0, 0.0, 0.0);
        a.refresh_collision_shape();

        // Offset is carried through the right axis: +X at identity
        assert_relative_eq!(a.collision.position.x, 1.5, epsilon = EPSILON);
        let contact = resolve(&mut a, &mut b, &PhysicsConfig::default()).expect("hull overlap");
        assert_relative_eq!(contact.overlap, 0.5, epsilon = EPSILON);
        assert_relative_eq!(a.pose.position.x, -0.5, epsilon = EPSILON);
        assert_relative_eq!(b.pose.position.x, 3.5, epsilon = EPSILON);
        // Refresh keeps the hull slaved to the corrected pose
        assert_relative_eq!(a.collision.position.x, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_resolve_misses_leave_state_untouched() {
        let mut a = unit_body_at(0.0, 0.0, 0.0);
        let mut b = unit_body_at(5.0, 0.0, 0.0);
        assert!(resolve(&mut a, &mut b, &PhysicsConfig::default()).is_none());
        assert!(!a.is_colliding);
        assert_relative_eq!(a.pose.position.x, 0.0);
        assert_relative_eq!(b.pose.position.x, 5.0);
    }
}
