use nalgebra::Vector3;
use serde::{Serialize, Deserialize};
use crate::utils::utils_console::{arm_print, PrintColor, PrintMode};
use crate::utils::utils_errors::ArmIKError;

/// The axis a revolute joint rotates about, expressed in the joint's local frame.
///
/// Axes form a closed set; labels other than `x`, `y`, or `z` are rejected when parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointAxis {
    X,
    Y,
    Z
}
impl JointAxis {
    pub fn from_label(label: &str) -> Result<Self, ArmIKError> {
        return match label.trim() {
            "x" | "X" => { Ok(Self::X) }
            "y" | "Y" => { Ok(Self::Y) }
            "z" | "Z" => { Ok(Self::Z) }
            _ => { Err(ArmIKError::new_unknown_axis_error(label, file!(), line!())) }
        }
    }
    /// Recovers an axis from a unit vector such as [0,1,0].  Only the three standard basis
    /// vectors (within a small tolerance) are accepted.
    pub fn from_unit_vector(v: &[f64; 3]) -> Result<Self, ArmIKError> {
        let candidates = [Self::X, Self::Y, Self::Z];
        for c in candidates {
            let a = c.axis_vector();
            if (a - Vector3::new(v[0], v[1], v[2])).norm() < 1e-9 { return Ok(c); }
        }
        return Err(ArmIKError::new_unknown_axis_error(&format!("{:?}", v), file!(), line!()));
    }
    pub fn label(&self) -> &'static str {
        match self {
            JointAxis::X => { "x" }
            JointAxis::Y => { "y" }
            JointAxis::Z => { "z" }
        }
    }
    pub fn axis_vector(&self) -> Vector3<f64> {
        match self {
            JointAxis::X => { Vector3::new(1., 0., 0.) }
            JointAxis::Y => { Vector3::new(0., 1., 0.) }
            JointAxis::Z => { Vector3::new(0., 0., 1.) }
        }
    }
    pub fn to_array(&self) -> [f64; 3] {
        let v = self.axis_vector();
        [v[0], v[1], v[2]]
    }
}

/// A single revolute degree of freedom in an arm chain.  The axis and bounds are fixed once the
/// joint is created; the current angle lives in the solver state, not here.
/// Bounds are in radians.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    axis: JointAxis,
    min_angle: f64,
    max_angle: f64
}
impl Joint {
    pub fn new(axis: JointAxis, min_angle: f64, max_angle: f64) -> Result<Self, ArmIKError> {
        if !min_angle.is_finite() || !max_angle.is_finite() {
            return Err(ArmIKError::new_malformed_chain_error(&format!("Joint bounds must be finite (given [{}, {}]).", min_angle, max_angle), file!(), line!()));
        }
        if min_angle > max_angle {
            return Err(ArmIKError::new_malformed_chain_error(&format!("Joint min angle {} is greater than max angle {}.", min_angle, max_angle), file!(), line!()));
        }

        Ok(Self {
            axis,
            min_angle,
            max_angle
        })
    }
    pub fn new_from_degrees(axis: JointAxis, min_angle_degrees: f64, max_angle_degrees: f64) -> Result<Self, ArmIKError> {
        return Self::new(axis, min_angle_degrees.to_radians(), max_angle_degrees.to_radians());
    }
    pub fn axis(&self) -> JointAxis {
        self.axis
    }
    pub fn min_angle(&self) -> f64 {
        self.min_angle
    }
    pub fn max_angle(&self) -> f64 {
        self.max_angle
    }
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_angle, self.max_angle)
    }
    /// The angle halfway between the joint bounds.  Chains start their search here.
    pub fn midpoint(&self) -> f64 {
        (self.min_angle + self.max_angle) / 2.0
    }
    pub fn clamp(&self, angle: f64) -> f64 {
        angle.max(self.min_angle).min(self.max_angle)
    }
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.min_angle && angle <= self.max_angle
    }
    pub fn print_summary(&self) {
        arm_print(&format!(" axis {} ", self.axis.label()), PrintMode::Print, PrintColor::None, false);
        arm_print(&format!(" bounds [{:.4}, {:.4}] rad ", self.min_angle, self.max_angle), PrintMode::Print, PrintColor::None, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_are_a_closed_set() {
        assert_eq!(JointAxis::from_label("x").unwrap(), JointAxis::X);
        assert_eq!(JointAxis::from_label("Y").unwrap(), JointAxis::Y);
        assert_eq!(JointAxis::from_label(" z ").unwrap(), JointAxis::Z);
        assert!(matches!(JointAxis::from_label("w"), Err(ArmIKError::UnknownAxisError(_))));
        assert!(JointAxis::from_label("").is_err());
    }

    #[test]
    fn unit_vectors_map_back_to_axes() {
        for axis in [JointAxis::X, JointAxis::Y, JointAxis::Z] {
            assert_eq!(JointAxis::from_unit_vector(&axis.to_array()).unwrap(), axis);
        }
        assert!(JointAxis::from_unit_vector(&[0.5, 0.5, 0.0]).is_err());
    }

    #[test]
    fn joint_rejects_inverted_bounds() {
        assert!(Joint::new(JointAxis::Z, 1.0, -1.0).is_err());
        assert!(Joint::new(JointAxis::Z, f64::NAN, 1.0).is_err());
        assert!(Joint::new(JointAxis::Z, 0.0, 0.0).is_ok());
    }

    #[test]
    fn degrees_are_converted_and_midpoint_seeds_the_angle() {
        let j = Joint::new_from_degrees(JointAxis::Y, -90.0, 180.0).unwrap();
        assert!((j.min_angle() + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((j.max_angle() - std::f64::consts::PI).abs() < 1e-12);
        assert!((j.midpoint() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(j.clamp(10.0), j.max_angle());
        assert_eq!(j.clamp(-10.0), j.min_angle());
        assert!(j.contains(0.0));
    }
}
