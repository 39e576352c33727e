use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion, Vector3, Vector4};
use serde::{Serialize, Deserialize};
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_robot::joint::JointAxis;

/// A representation for an SE(3) transform composed of a 4x4 homogeneous transformation matrix.
///
/// The bottom row is always [0, 0, 0, 1].  The rotation block is expected to stay orthonormal but
/// this is not enforced; products of many transforms are allowed to drift.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HomogeneousMatrix {
    matrix: Matrix4<f64>
}
impl HomogeneousMatrix {
    pub fn new(matrix: Matrix4<f64>) -> Self {
        Self {
            matrix
        }
    }
    pub fn new_identity() -> Self {
        Self::new(Matrix4::identity())
    }
    pub fn new_translation(x: f64, y: f64, z: f64) -> Self {
        let mut matrix = Matrix4::identity();
        matrix[(0,3)] = x;
        matrix[(1,3)] = y;
        matrix[(2,3)] = z;
        return Self::new(matrix);
    }
    /// A pure rotation of `theta` radians about one of the principal axes.
    pub fn new_rotation(axis: JointAxis, theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        let matrix = match axis {
            JointAxis::X => {
                Matrix4::new(1., 0., 0., 0.,
                             0., c, -s, 0.,
                             0., s, c, 0.,
                             0., 0., 0., 1.)
            }
            JointAxis::Y => {
                Matrix4::new(c, 0., s, 0.,
                             0., 1., 0., 0.,
                             -s, 0., c, 0.,
                             0., 0., 0., 1.)
            }
            JointAxis::Z => {
                Matrix4::new(c, -s, 0., 0.,
                             s, c, 0., 0.,
                             0., 0., 1., 0.,
                             0., 0., 0., 1.)
            }
        };
        return Self::new(matrix);
    }
    /// The transform contributed by one joint of a chain:
    /// `translation(0, 0, link_length) * rotation(axis, theta)`.
    ///
    /// The rotation is applied first and the frame is then pushed `link_length` along z, so the
    /// translation places the next joint's frame at the end of the link.
    pub fn new_joint_transform(theta: f64, axis: JointAxis, link_length: f64) -> Self {
        let mut out = Self::new_rotation(axis, theta);
        out.matrix[(2,3)] = link_length;
        return out;
    }
    /// Builds a target pose from a position and successive rotations about x, then y, then z:
    /// `translation(x, y, z) * Rx(rx) * Ry(ry) * Rz(rz)`.
    pub fn new_from_position_and_xyz_rotation(x: f64, y: f64, z: f64, rx: f64, ry: f64, rz: f64) -> Self {
        return Self::new_translation(x, y, z)
            .multiply(&Self::new_rotation(JointAxis::X, rx))
            .multiply(&Self::new_rotation(JointAxis::Y, ry))
            .multiply(&Self::new_rotation(JointAxis::Z, rz));
    }
    /// Loads a matrix from 16 values in column-major order.
    pub fn new_from_column_major_slice(values: &[f64]) -> Result<Self, ArmIKError> {
        if values.len() != 16 {
            return Err(ArmIKError::new_wrong_size_error("new_from_column_major_slice", values.len(), 16, file!(), line!()));
        }
        return Ok(Self::new(Matrix4::from_column_slice(values)));
    }
    pub fn to_column_major_vec(&self) -> Vec<f64> {
        self.matrix.as_slice().to_vec()
    }
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }
    /// Returns the 3x3 rotation block of the homogeneous matrix, exactly as stored.
    pub fn rotation_block(&self) -> Matrix3<f64> {
        self.matrix.fixed_slice::<3, 3>(0, 0).into_owned()
    }
    /// Returns the translation component of the homogeneous matrix.
    pub fn translation(&self) -> Vector3<f64> {
        Vector3::new(self.matrix[(0,3)], self.matrix[(1,3)], self.matrix[(2,3)])
    }
    /// multiplication
    pub fn multiply(&self, other: &HomogeneousMatrix) -> HomogeneousMatrix {
        let matrix = self.matrix * &other.matrix;
        return Self::new(matrix);
    }
    /// multiplication by a point
    pub fn multiply_by_point(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let four_point = Vector4::new(point[0], point[1], point[2], 1.0);
        let result_point = self.matrix * &four_point;
        return Vector3::new(result_point[0], result_point[1], result_point[2]);
    }
    /// The inverse transform such that T * T^-1 = I.  Assumes an orthonormal rotation block.
    pub fn inverse(&self) -> Self {
        let rot_mat_transpose = self.rotation_block().transpose();
        let new_translation = -(rot_mat_transpose * self.translation());

        let mut matrix = Matrix4::identity();
        matrix.fixed_slice_mut::<3, 3>(0, 0).copy_from(&rot_mat_transpose);
        matrix[(0,3)] = new_translation[0];
        matrix[(1,3)] = new_translation[1];
        matrix[(2,3)] = new_translation[2];

        return Self::new(matrix);
    }
    /// The displacement transform such that T_self * T_disp = T_other.
    pub fn displacement(&self, other: &HomogeneousMatrix) -> HomogeneousMatrix {
        return self.inverse().multiply(other);
    }
    /// Sum of absolute per-axis differences between the two translations.
    pub fn l1_translation_distance(&self, other: &HomogeneousMatrix) -> f64 {
        return (self.translation() - other.translation()).abs().sum();
    }
    /// Converts to a rigid isometry.  The rotation block is projected onto the nearest proper
    /// rotation first, so slightly drifted products still produce a valid pose.
    pub fn to_isometry(&self) -> Isometry3<f64> {
        let rotation = Rotation3::from_matrix(&self.rotation_block());
        let t = self.translation();
        return Isometry3::from_parts(Translation3::new(t[0], t[1], t[2]), UnitQuaternion::from_rotation_matrix(&rotation));
    }
    pub fn is_finite(&self) -> bool {
        self.matrix.iter().all(|v| v.is_finite())
    }
}
impl Default for HomogeneousMatrix {
    fn default() -> Self {
        Self::new_identity()
    }
}
