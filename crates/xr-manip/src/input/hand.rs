//! Hand skeleton geometry: pinch, palm facing, and wrist orientation

use super::Handedness;
use crate::spatial::{Point3D, Quaternion};

/// Distance between the thumb tip and the index fingertip
pub fn pinch_distance(thumb_tip: Point3D, index_tip: Point3D) -> f32 {
    thumb_tip.distance(&index_tip)
}

/// Outward palm normal, or `None` when the joints are degenerate.
///
/// The cross product order flips with handedness so that the result always
/// points out of the palm. An unreported side is treated as a right hand.
pub fn palm_normal(
    handedness: Handedness,
    wrist: Point3D,
    index_tip: Point3D,
    thumb_tip: Point3D,
) -> Option<crate::spatial::Vector3D> {
    let to_index = index_tip - wrist;
    let to_thumb = thumb_tip - wrist;
    let normal = match handedness {
        Handedness::Left => to_index.cross(&to_thumb),
        Handedness::Right | Handedness::None => to_thumb.cross(&to_index),
    };
    normal.try_normalize()
}

/// Hand orientation built from the wrist, index and thumb joints.
///
/// Local +Z runs from the wrist toward the index tip, local +Y is normal to
/// the wrist/index/thumb plane, and local +X is re-orthogonalized from those
/// two. `None` when the joints are collinear or coincident.
pub fn synthesize_orientation(
    wrist: Point3D,
    index_tip: Point3D,
    thumb_tip: Point3D,
) -> Option<Quaternion> {
    let forward = (index_tip - wrist).try_normalize()?;
    let normal = forward.cross(&(thumb_tip - wrist)).try_normalize()?;
    let side = normal.cross(&forward);
    Some(Quaternion::from_basis(side, normal, forward))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Vector3D;

    // Palm-down, fingers pointing forward (-Z)
    const WRIST: Point3D = Point3D { x: 0.0, y: 1.0, z: 0.0 };
    const INDEX: Point3D = Point3D { x: 0.0, y: 1.0, z: -0.1 };
    const RIGHT_THUMB: Point3D = Point3D { x: -0.05, y: 1.0, z: -0.05 };
    const LEFT_THUMB: Point3D = Point3D { x: 0.05, y: 1.0, z: -0.05 };

    #[test]
    fn test_palm_down_both_hands() {
        let right = palm_normal(Handedness::Right, WRIST, INDEX, RIGHT_THUMB).unwrap();
        let left = palm_normal(Handedness::Left, WRIST, INDEX, LEFT_THUMB).unwrap();
        assert!((right.y + 1.0).abs() < 0.0001);
        assert!((left.y + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_palm_up_right_hand() {
        // Right hand turned over: the thumb ends up on the +X side
        let normal = palm_normal(Handedness::Right, WRIST, INDEX, LEFT_THUMB).unwrap();
        assert!(normal.y > 0.9);
    }

    #[test]
    fn test_degenerate_palm() {
        assert!(palm_normal(Handedness::Right, WRIST, WRIST, WRIST).is_none());
    }

    #[test]
    fn test_synthesized_orientation_is_orthonormal() {
        let q = synthesize_orientation(WRIST, INDEX, RIGHT_THUMB).unwrap();
        assert!((q.magnitude() - 1.0).abs() < 0.0001);
        // Local +Z lands on the wrist->index direction
        let z = q.rotate_vector(Vector3D::new(0.0, 0.0, 1.0));
        assert!((z - Vector3D::FORWARD).magnitude() < 0.0001);
    }

    #[test]
    fn test_synthesized_orientation_collinear() {
        let thumb_on_line = Point3D::new(0.0, 1.0, -0.05);
        assert!(synthesize_orientation(WRIST, INDEX, thumb_on_line).is_none());
    }
}
