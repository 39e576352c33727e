use nalgebra::{Vector3, Vector6};
use serde::{Serialize, Deserialize};
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;

/// Default scale applied to rotation-block differences.
pub const ROT_CORRECTION: f64 = std::f64::consts::PI;
/// Bias added to the first diagonal entry before the quaternion branch is chosen.
pub const QUATERNION_BRANCH_PAD: f64 = 0.0001;

/// Controls how the orientation term of [`TransformLoss`] is normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationNormalization {
    /// Each rotation-block difference is divided by the rotation correction before squaring, and
    /// the summed orientation term is divided by it once more.
    Reference,
    /// Only the per-entry division is applied.
    SingleDivision
}
impl Default for RotationNormalization {
    fn default() -> Self {
        Self::Reference
    }
}

/// Scalar error between an achieved end-effector transform and a target transform.
///
/// Position differences are divided by `dist_correction` (the total arm length) before squaring so
/// that chains of different size produce comparable losses.  The result is zero for a perfect match.
/// This is not a proper SE(3) metric, just a cheap smooth error suited to finite differencing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformLoss {
    dist_correction: f64,
    rot_correction: f64,
    normalization: RotationNormalization
}
impl TransformLoss {
    pub fn new(arm_length: f64) -> Self {
        Self::new_with_corrections(arm_length, ROT_CORRECTION, RotationNormalization::Reference)
    }
    pub fn new_with_corrections(dist_correction: f64, rot_correction: f64, normalization: RotationNormalization) -> Self {
        Self {
            dist_correction,
            rot_correction,
            normalization
        }
    }
    pub fn loss(&self, actual: &HomogeneousMatrix, target: &HomogeneousMatrix) -> f64 {
        return self.position_loss(actual, target) + self.orientation_loss(actual, target);
    }
    pub fn position_loss(&self, actual: &HomogeneousMatrix, target: &HomogeneousMatrix) -> f64 {
        let diff = (target.translation() - actual.translation()) / self.dist_correction;
        return diff.norm_squared();
    }
    pub fn orientation_loss(&self, actual: &HomogeneousMatrix, target: &HomogeneousMatrix) -> f64 {
        let diff = (target.rotation_block() - actual.rotation_block()) / self.rot_correction;
        let err_rot = diff.norm_squared();
        return match self.normalization {
            RotationNormalization::Reference => { err_rot / self.rot_correction }
            RotationNormalization::SingleDivision => { err_rot }
        }
    }
    pub fn dist_correction(&self) -> f64 {
        self.dist_correction
    }
    pub fn rot_correction(&self) -> f64 {
        self.rot_correction
    }
    pub fn normalization(&self) -> RotationNormalization {
        self.normalization
    }
}

/// Converts the rotation block of a transform to a quaternion `(w, x, y, z)` using the trace-based
/// branch selection.
///
/// The branch is chosen from the diagonal with [`QUATERNION_BRANCH_PAD`] added to its first entry so
/// that rotations near 180 degrees do not land on a branch whose divisor vanishes.  The square root
/// arguments are floored at a tiny positive value, which keeps NaN out of non-orthonormal input.
/// Precision near 180 degree rotations is still limited.
pub fn quaternion_from_transform(matrix: &HomogeneousMatrix) -> (f64, f64, f64, f64) {
    let m = matrix.rotation_block();
    let (m00, m01, m02) = (m[(0,0)], m[(0,1)], m[(0,2)]);
    let (m10, m11, m12) = (m[(1,0)], m[(1,1)], m[(1,2)]);
    let (m20, m21, m22) = (m[(2,0)], m[(2,1)], m[(2,2)]);

    let padded_m00 = m00 + QUATERNION_BRANCH_PAD;
    let padded_tr = padded_m00 + m11 + m22;

    let floor = 1e-12;
    return if padded_tr > 0.0 {
        let s = (m00 + m11 + m22 + 1.0).max(floor).sqrt() * 2.0;
        (0.25 * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
    } else if padded_m00 > m11 && padded_m00 > m22 {
        let s = (1.0 + m00 - m11 - m22).max(floor).sqrt() * 2.0;
        ((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
    } else if m11 > m22 {
        let s = (1.0 + m11 - m00 - m22).max(floor).sqrt() * 2.0;
        ((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
    } else {
        let s = (1.0 + m22 - m00 - m11).max(floor).sqrt() * 2.0;
        ((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
    }
}

/// Converts a quaternion `(w, x, y, z)` to an axis-angle 3-vector (unit axis scaled by the angle).
pub fn axis_angle_from_quaternion(q: (f64, f64, f64, f64)) -> Vector3<f64> {
    let (qw, qx, qy, qz) = q;
    let qw = qw.max(-1.0).min(1.0);

    let angle = 2.0 * qw.acos();
    let s = (1.0 - qw * qw).sqrt();
    // near the identity the axis is ill-defined; angle / s tends to 2
    if s < 0.001 {
        return Vector3::new(qx, qy, qz) * 2.0;
    }

    return Vector3::new(qx / s, qy / s, qz / s) * angle;
}

/// A 6-vector made of the transform's translation followed by its axis-angle rotation.
pub fn twist_from_transform(matrix: &HomogeneousMatrix) -> Vector6<f64> {
    let p = matrix.translation();
    let r = axis_angle_from_quaternion(quaternion_from_transform(matrix));
    return Vector6::new(p[0], p[1], p[2], r[0], r[1], r[2]);
}

/// The 6-vector the end effector has to move along to reach `desired` from `current`.
pub fn target_velocity(desired: &HomogeneousMatrix, current: &HomogeneousMatrix) -> Vector6<f64> {
    return twist_from_transform(desired) - twist_from_transform(current);
}

/// One column of a numerical Jacobian: the twist change between `start` and `end` divided by the
/// perturbation `d` that produced it.
pub fn jacobian_column(start: &HomogeneousMatrix, end: &HomogeneousMatrix, d: f64) -> Vector6<f64> {
    return (twist_from_transform(end) - twist_from_transform(start)) / d;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::utils::utils_robot::joint::JointAxis;

    #[test]
    fn identical_transforms_have_zero_loss() {
        let l = TransformLoss::new(9.0);
        let t = HomogeneousMatrix::new_from_position_and_xyz_rotation(1.0, 2.0, 3.0, 0.1, 0.2, 0.3);
        assert_eq!(l.loss(&t, &t), 0.0);
    }

    #[test]
    fn position_error_is_scaled_by_arm_length() {
        let a = HomogeneousMatrix::new_translation(0.0, 0.0, 0.0);
        let b = HomogeneousMatrix::new_translation(2.0, 0.0, 0.0);
        assert_relative_eq!(TransformLoss::new(1.0).loss(&a, &b), 4.0);
        assert_relative_eq!(TransformLoss::new(2.0).loss(&a, &b), 1.0);
        assert_relative_eq!(TransformLoss::new(4.0).loss(&a, &b), 0.25);
    }

    #[test]
    fn orientation_error_is_divided_twice_by_default() {
        let a = HomogeneousMatrix::new_identity();
        let b = HomogeneousMatrix::new_rotation(JointAxis::Z, std::f64::consts::FRAC_PI_2);
        // four entries change by one each
        let pi = std::f64::consts::PI;
        let reference = TransformLoss::new(1.0).loss(&a, &b);
        assert_relative_eq!(reference, 4.0 / (pi * pi) / pi, epsilon = 1e-12);

        let single = TransformLoss::new_with_corrections(1.0, pi, RotationNormalization::SingleDivision).loss(&a, &b);
        assert_relative_eq!(single, 4.0 / (pi * pi), epsilon = 1e-12);
    }

    #[test]
    fn axis_angle_of_principal_rotations() {
        for (axis, v) in [(JointAxis::X, Vector3::x()), (JointAxis::Y, Vector3::y()), (JointAxis::Z, Vector3::z())] {
            for angle in [0.05, 0.7, 2.0, -1.3] {
                let r = HomogeneousMatrix::new_rotation(axis, angle);
                let aa = axis_angle_from_quaternion(quaternion_from_transform(&r));
                assert_relative_eq!(aa, v * angle, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn tiny_rotations_keep_their_magnitude() {
        let r = HomogeneousMatrix::new_rotation(JointAxis::X, 1e-5);
        let aa = axis_angle_from_quaternion(quaternion_from_transform(&r));
        assert_relative_eq!(aa, Vector3::new(1e-5, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn identity_maps_to_zero_twist() {
        let t = HomogeneousMatrix::new_translation(1.0, 2.0, 3.0);
        let twist = twist_from_transform(&t);
        assert_relative_eq!(twist, Vector6::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn half_turn_does_not_produce_nan() {
        for axis in [JointAxis::X, JointAxis::Y, JointAxis::Z] {
            let r = HomogeneousMatrix::new_rotation(axis, std::f64::consts::PI);
            let twist = twist_from_transform(&r);
            assert!(twist.iter().all(|v| v.is_finite()));
            assert_relative_eq!(twist.fixed_rows::<3>(3).norm(), std::f64::consts::PI, epsilon = 1e-3);
        }
    }

    #[test]
    fn target_velocity_points_from_current_to_desired() {
        let current = HomogeneousMatrix::new_translation(0.0, 0.0, 1.0);
        let desired = HomogeneousMatrix::new_translation(1.0, 0.0, 1.0).multiply(&HomogeneousMatrix::new_rotation(JointAxis::Z, 0.5));
        let v = target_velocity(&desired, &current);
        assert_relative_eq!(v, Vector6::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.5), epsilon = 1e-9);
    }

    #[test]
    fn jacobian_column_of_a_pure_z_rotation() {
        let d = 1e-5;
        let start = HomogeneousMatrix::new_rotation(JointAxis::Z, 0.4);
        let end = HomogeneousMatrix::new_rotation(JointAxis::Z, 0.4 + d);
        let c = jacobian_column(&start, &end, d);
        assert_relative_eq!(c, Vector6::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0), epsilon = 1e-5);
    }
}
