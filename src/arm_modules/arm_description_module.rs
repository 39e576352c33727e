use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::arm_modules::arm_chain_module::ArmChain;
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_files::FileUtils;
use crate::utils::utils_robot::joint::{Joint, JointAxis};
use crate::utils::utils_robot::link::Link;
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;

/// The chain description document an editor hands over, e.g.
///
/// ```json
/// { "arm": [ { "link": { "length": 1, "width": 1.2, "height": 1.2 },
///              "joint": { "axis": "z", "minAngle": -360, "maxAngle": 360 } } ] }
/// ```
///
/// Joint bounds are given in degrees and converted to radians by [`ArmChainDescription::to_arm_chain`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmChainDescription {
    pub arm: Vec<ArmSegmentDescription>
}
impl ArmChainDescription {
    pub fn new_from_json_string(json_str: &str) -> Result<Self, ArmIKError> {
        return FileUtils::load_object_from_json_string(json_str);
    }
    pub fn new_from_json_file(path: &Path) -> Result<Self, ArmIKError> {
        return FileUtils::load_object_from_json_file(path);
    }
    pub fn save_to_json_file(&self, path: &Path) -> Result<(), ArmIKError> {
        return FileUtils::save_object_to_file_as_json(self, path);
    }
    /// The stock ten-segment arm.
    pub fn new_default_arm() -> Self {
        let segments = [
            (1.0, "z", -360.0, 360.0),
            (4.0, "y", -180.0, 180.0),
            (4.0, "y", -180.0, 180.0),
            (4.0, "z", -360.0, 360.0),
            (2.0, "y", -180.0, 180.0),
            (4.0, "y", -180.0, 180.0),
            (4.0, "z", -180.0, 180.0),
            (1.0, "y", -180.0, 180.0),
            (2.0, "y", -180.0, 180.0),
            (2.0, "z", -180.0, 180.0)
        ];

        let arm = segments.iter().map(|(length, axis, min_angle, max_angle)| {
            ArmSegmentDescription {
                link: LinkDescription { length: *length, width: 1.2, height: 1.2 },
                joint: JointDescription { axis: axis.to_string(), min_angle: *min_angle, max_angle: *max_angle }
            }
        }).collect();

        Self { arm }
    }
    /// Validates the description and converts it to an [`ArmChain`] rooted at `origin`.  Unknown
    /// axis labels are rejected here, before any solving begins.
    pub fn to_arm_chain(&self, origin: HomogeneousMatrix) -> Result<ArmChain, ArmIKError> {
        let mut joints = vec![];
        let mut links = vec![];

        for segment in &self.arm {
            let axis = JointAxis::from_label(&segment.joint.axis)?;
            joints.push(Joint::new_from_degrees(axis, segment.joint.min_angle, segment.joint.max_angle)?);
            links.push(Link::new(segment.link.length, segment.link.width, segment.link.height)?);
        }

        return ArmChain::new(origin, joints, links);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmSegmentDescription {
    pub link: LinkDescription,
    pub joint: JointDescription
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkDescription {
    pub length: f64,
    pub width: f64,
    pub height: f64
}

/// Angles in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointDescription {
    pub axis: String,
    pub min_angle: f64,
    pub max_angle: f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TWO_SEGMENTS: &str = r#"{
        "arm": [
            { "link": { "length": 1, "width": 1.2, "height": 1.2 },
              "joint": { "axis": "z", "minAngle": -360, "maxAngle": 360 } },
            { "link": { "length": 4, "width": 1.0, "height": 0.8 },
              "joint": { "axis": "y", "minAngle": 0, "maxAngle": 90 } }
        ]
    }"#;

    #[test]
    fn parses_and_converts_degrees() {
        let d = ArmChainDescription::new_from_json_string(TWO_SEGMENTS).unwrap();
        let chain = d.to_arm_chain(HomogeneousMatrix::new_identity()).unwrap();
        assert_eq!(chain.num_joints(), 2);
        assert_eq!(chain.axes(), vec![JointAxis::Z, JointAxis::Y]);
        assert_relative_eq!(chain.max_angles()[1], std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(chain.initial_angles()[0], 0.0);
        assert_relative_eq!(chain.initial_angles()[1], std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(chain.arm_length(), 5.0);
        assert_eq!(chain.links()[1].height(), 0.8);
    }

    #[test]
    fn unknown_axis_is_a_validation_error() {
        let json = TWO_SEGMENTS.replace("\"y\"", "\"q\"");
        let d = ArmChainDescription::new_from_json_string(&json).unwrap();
        assert!(matches!(d.to_arm_chain(HomogeneousMatrix::new_identity()), Err(ArmIKError::UnknownAxisError(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(ArmChainDescription::new_from_json_string("{ \"arm\": [ { \"link\": {} } ] }").is_err());
    }

    #[test]
    fn description_survives_a_file_round_trip() {
        let path = std::env::temp_dir().join("arm_ik_description_test").join("default_arm.json");
        let d = ArmChainDescription::new_default_arm();
        d.save_to_json_file(&path).unwrap();
        assert_eq!(ArmChainDescription::new_from_json_file(&path).unwrap(), d);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn default_arm_builds() {
        let chain = ArmChainDescription::new_default_arm().to_arm_chain(HomogeneousMatrix::new_identity()).unwrap();
        assert_eq!(chain.num_joints(), 10);
        assert_relative_eq!(chain.arm_length(), 28.0);
    }
}
