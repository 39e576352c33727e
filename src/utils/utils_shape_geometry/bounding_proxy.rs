use nalgebra::Vector3;
use parry3d_f64::shape::Cuboid;
use serde::{Serialize, Deserialize};
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_robot::link::Link;
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;

/// Identifies what a bounding proxy stands in for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProxySignature {
    ArmLink { link_idx: usize },
    Obstacle { obstacle_idx: usize }
}

/// A `BoundingProxy` is the simplified oriented box that represents an arm link or an obstacle for
/// collision purposes.
///
/// The box is centered on `centroid_offset`, which is expressed in the frame of whatever owns the
/// proxy.  For arm links the owner is the link's forward transform, which changes every solver
/// iteration; obstacles are fixed in the world and are always evaluated against the identity.
/// Queries take the owner transform as an argument, so the proxy itself never changes after it is
/// built.
#[derive(Clone, Debug)]
pub struct BoundingProxy {
    shape: Cuboid,
    signature: ProxySignature,
    centroid_offset: HomogeneousMatrix,
    half_extents: Vector3<f64>,
    max_extent: f64
}
impl BoundingProxy {
    pub fn new(signature: ProxySignature, centroid_offset: HomogeneousMatrix, half_extents: Vector3<f64>) -> Result<Self, ArmIKError> {
        if half_extents.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ArmIKError::new_generic_error_str(&format!("Bounding proxy half extents must be finite and non-negative (given {:?}).", half_extents.as_slice()), file!(), line!()));
        }
        if !centroid_offset.is_finite() {
            return Err(ArmIKError::new_generic_error_str("Bounding proxy centroid offset contains non-finite values.", file!(), line!()));
        }

        let max_extent = 2.0 * half_extents.max();

        Ok(Self {
            shape: Cuboid::new(half_extents),
            signature,
            centroid_offset,
            half_extents,
            max_extent
        })
    }
    /// The proxy for arm link `link_idx`.  The box extends `length` along the link's local z axis
    /// starting at the link frame, so its centroid sits half a length forward.
    pub fn new_arm_link(link_idx: usize, link: &Link) -> Result<Self, ArmIKError> {
        let centroid_offset = HomogeneousMatrix::new_translation(0.0, 0.0, link.length() / 2.0);
        return Self::new(ProxySignature::ArmLink { link_idx }, centroid_offset, link.half_extents());
    }
    /// A static obstacle from a world-space axis-aligned bounding box.
    pub fn new_obstacle_from_aabb(obstacle_idx: usize, min: &Vector3<f64>, max: &Vector3<f64>) -> Result<Self, ArmIKError> {
        if (0..3).any(|i| max[i] < min[i]) {
            return Err(ArmIKError::new_generic_error_str(&format!("Obstacle bounding box max {:?} is below min {:?}.", max.as_slice(), min.as_slice()), file!(), line!()));
        }
        let center = (min + max) / 2.0;
        let half_extents = (max - min) / 2.0;
        return Self::new(ProxySignature::Obstacle { obstacle_idx }, HomogeneousMatrix::new_translation(center[0], center[1], center[2]), half_extents);
    }
    /// A static obstacle from its world-space center and its size along x (`length`), y (`width`),
    /// and z (`height`).
    pub fn new_obstacle(obstacle_idx: usize, center: &Vector3<f64>, length: f64, width: f64, height: f64) -> Result<Self, ArmIKError> {
        let half_extents = Vector3::new(length / 2.0, width / 2.0, height / 2.0);
        return Self::new(ProxySignature::Obstacle { obstacle_idx }, HomogeneousMatrix::new_translation(center[0], center[1], center[2]), half_extents);
    }
    pub fn signature(&self) -> &ProxySignature {
        &self.signature
    }
    pub fn centroid_offset(&self) -> &HomogeneousMatrix {
        &self.centroid_offset
    }
    /// Half extents in the proxy's local (x, y, z) order.
    pub fn half_extents(&self) -> &Vector3<f64> {
        &self.half_extents
    }
    /// Largest full dimension of the box.  Used by the broad phase.
    pub fn max_extent(&self) -> f64 {
        self.max_extent
    }
    /// World-space pose of the box center given the owner's current transform.
    pub fn transformed_centroid(&self, owner_transform: &HomogeneousMatrix) -> HomogeneousMatrix {
        owner_transform.multiply(&self.centroid_offset)
    }
    /// Exact overlap test between two posed boxes (separating-axis test on the two cuboids).
    pub fn intersection_test(&self, owner_transform: &HomogeneousMatrix, other: &BoundingProxy, other_owner_transform: &HomogeneousMatrix) -> Result<bool, ArmIKError> {
        let pos1 = self.transformed_centroid(owner_transform).to_isometry();
        let pos2 = other.transformed_centroid(other_owner_transform).to_isometry();
        return parry3d_f64::query::intersection_test(&pos1, &self.shape, &pos2, &other.shape).map_err(|_| {
            ArmIKError::new_unsupported_operation_error("intersection_test", "parry could not test the given shape pair.", file!(), line!())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::utils::utils_robot::joint::JointAxis;

    #[test]
    fn arm_link_proxy_is_offset_half_a_length() {
        let link = Link::new(4.0, 1.2, 1.0).unwrap();
        let p = BoundingProxy::new_arm_link(2, &link).unwrap();
        assert_relative_eq!(p.centroid_offset().translation(), Vector3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(p.max_extent(), 4.0);
        assert_eq!(p.signature(), &ProxySignature::ArmLink { link_idx: 2 });

        let owner = HomogeneousMatrix::new_rotation(JointAxis::Y, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(p.transformed_centroid(&owner).translation(), Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn obstacle_from_aabb() {
        let p = BoundingProxy::new_obstacle_from_aabb(0, &Vector3::new(1.0, 2.0, 3.0), &Vector3::new(3.0, 3.0, 7.0)).unwrap();
        assert_relative_eq!(p.centroid_offset().translation(), Vector3::new(2.0, 2.5, 5.0));
        assert_relative_eq!(*p.half_extents(), Vector3::new(1.0, 0.5, 2.0));
        assert_relative_eq!(p.max_extent(), 4.0);
        assert!(BoundingProxy::new_obstacle_from_aabb(0, &Vector3::new(1.0, 0.0, 0.0), &Vector3::new(0.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn rotated_boxes_are_tested_exactly() {
        let a = BoundingProxy::new_obstacle(0, &Vector3::zeros(), 4.0, 0.2, 0.2).unwrap();
        let b = BoundingProxy::new_obstacle(1, &Vector3::new(0.0, 1.5, 0.0), 4.0, 0.2, 0.2).unwrap();
        let id = HomogeneousMatrix::new_identity();
        assert!(!a.intersection_test(&id, &b, &id).unwrap());
        // swinging `a` about z by 90 degrees makes it reach `b`
        let rotated = HomogeneousMatrix::new_rotation(JointAxis::Z, std::f64::consts::FRAC_PI_2);
        assert!(a.intersection_test(&rotated, &b, &id).unwrap());
    }
}
