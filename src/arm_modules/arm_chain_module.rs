use nalgebra::DVector;
use serde::{Serialize, Deserialize};
use crate::utils::utils_console::{arm_print, arm_print_new_line, PrintColor, PrintMode};
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_robot::joint::{Joint, JointAxis};
use crate::utils::utils_robot::link::Link;
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;

/// Cross-section (width and height) given to links built from bare parameter arrays.
pub const DEFAULT_LINK_CROSS_SECTION: f64 = 1.2;

/// An `ArmChain` is the ordered sequence of (joint, link) pairs that makes up a serial arm, along
/// with the `origin` transform that places the base in the world.  Index 0 is the base.
///
/// Joint `i` contributes `translation(0, 0, length_i) * rotation(axis_i, theta_i)`, so the frame
/// `forward[i]` sits at the start of link `i` and `forward[n]` is the end effector.
///
/// # Example
/// ```
/// use nalgebra::DVector;
/// use arm_ik::arm_modules::arm_chain_module::ArmChain;
/// use arm_ik::utils::utils_robot::joint::JointAxis;
/// use arm_ik::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;
///
/// let chain = ArmChain::new_from_parameter_arrays(
///     HomogeneousMatrix::new_identity(),
///     &[JointAxis::Z, JointAxis::Y, JointAxis::Y],
///     &[1.0, 4.0, 4.0],
///     &[-6.28, -3.14, -3.14],
///     &[6.28, 3.14, 3.14]
/// ).expect("error");
///
/// let fk_res = chain.compute_fk(&DVector::zeros(3)).expect("error");
/// assert!((fk_res.end_effector().translation()[2] - 9.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmChain {
    origin: HomogeneousMatrix,
    joints: Vec<Joint>,
    links: Vec<Link>,
    arm_length: f64
}
impl ArmChain {
    pub fn new(origin: HomogeneousMatrix, joints: Vec<Joint>, links: Vec<Link>) -> Result<Self, ArmIKError> {
        if joints.is_empty() {
            return Err(ArmIKError::new_malformed_chain_error("A chain needs at least one joint.", file!(), line!()));
        }
        if joints.len() != links.len() {
            return Err(ArmIKError::new_malformed_chain_error(&format!("Chain has {} joints but {} links.", joints.len(), links.len()), file!(), line!()));
        }
        if !origin.is_finite() {
            return Err(ArmIKError::new_malformed_chain_error("Chain origin contains non-finite values.", file!(), line!()));
        }

        let arm_length: f64 = links.iter().map(|l| l.length()).sum();
        if arm_length <= 0.0 {
            return Err(ArmIKError::new_malformed_chain_error("Total link length of the chain must be positive.", file!(), line!()));
        }

        Ok(Self {
            origin,
            joints,
            links,
            arm_length
        })
    }
    /// Builds a chain from parallel parameter arrays.  Angle bounds are in radians.  Links get a
    /// square cross-section of [`DEFAULT_LINK_CROSS_SECTION`].
    pub fn new_from_parameter_arrays(origin: HomogeneousMatrix,
                                     axes: &[JointAxis],
                                     lengths: &[f64],
                                     min_angles: &[f64],
                                     max_angles: &[f64]) -> Result<Self, ArmIKError> {
        let n = axes.len();
        if lengths.len() != n || min_angles.len() != n || max_angles.len() != n {
            return Err(ArmIKError::new_malformed_chain_error(&format!("Parameter arrays disagree in length (axes: {}, lengths: {}, min angles: {}, max angles: {}).", n, lengths.len(), min_angles.len(), max_angles.len()), file!(), line!()));
        }

        let mut joints = vec![];
        let mut links = vec![];
        for i in 0..n {
            joints.push(Joint::new(axes[i], min_angles[i], max_angles[i])?);
            links.push(Link::new(lengths[i], DEFAULT_LINK_CROSS_SECTION, DEFAULT_LINK_CROSS_SECTION)?);
        }

        return Self::new(origin, joints, links);
    }
    pub fn origin(&self) -> &HomogeneousMatrix {
        &self.origin
    }
    pub fn joints(&self) -> &Vec<Joint> {
        &self.joints
    }
    pub fn links(&self) -> &Vec<Link> {
        &self.links
    }
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }
    /// Sum of all link lengths.  Used to normalize position error.
    pub fn arm_length(&self) -> f64 {
        self.arm_length
    }
    pub fn axes(&self) -> Vec<JointAxis> {
        self.joints.iter().map(|j| j.axis()).collect()
    }
    pub fn link_lengths(&self) -> Vec<f64> {
        self.links.iter().map(|l| l.length()).collect()
    }
    pub fn min_angles(&self) -> Vec<f64> {
        self.joints.iter().map(|j| j.min_angle()).collect()
    }
    pub fn max_angles(&self) -> Vec<f64> {
        self.joints.iter().map(|j| j.max_angle()).collect()
    }
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        self.joints.iter().map(|j| j.bounds()).collect()
    }
    /// The starting angle vector: each joint at the midpoint of its bounds.
    pub fn initial_angles(&self) -> DVector<f64> {
        DVector::from_iterator(self.num_joints(), self.joints.iter().map(|j| j.midpoint()))
    }
    pub fn check_angles_size(&self, angles: &DVector<f64>) -> Result<(), ArmIKError> {
        if angles.len() != self.num_joints() {
            return Err(ArmIKError::new_wrong_size_error("ArmChain angle vector", angles.len(), self.num_joints(), file!(), line!()));
        }
        Ok(())
    }
    pub fn clamp_angles(&self, angles: &mut DVector<f64>) {
        for (a, j) in angles.iter_mut().zip(self.joints.iter()) {
            *a = j.clamp(*a);
        }
    }
    pub fn joint_transform(&self, joint_idx: usize, angle: f64) -> HomogeneousMatrix {
        HomogeneousMatrix::new_joint_transform(angle, self.joints[joint_idx].axis(), self.links[joint_idx].length())
    }
    /// `[origin, J(theta_1), ..., J(theta_n)]`
    pub fn build_local_transforms(&self, angles: &DVector<f64>) -> Result<Vec<HomogeneousMatrix>, ArmIKError> {
        self.check_angles_size(angles)?;

        let mut out_vec = Vec::with_capacity(self.num_joints() + 1);
        out_vec.push(self.origin.clone());
        for (i, angle) in angles.iter().enumerate() {
            out_vec.push(self.joint_transform(i, *angle));
        }

        Ok(out_vec)
    }
    /// Computes the forward and backward partial products for the given joint angles.
    pub fn compute_fk(&self, angles: &DVector<f64>) -> Result<ArmFKResult, ArmIKError> {
        let locals = self.build_local_transforms(angles)?;
        let forward = forward_products(&locals);
        let backward = backward_products(&locals);

        Ok(ArmFKResult {
            forward,
            backward
        })
    }
    pub fn print_summary(&self) {
        arm_print(&format!("Arm chain with {} joints, total length {}", self.num_joints(), self.arm_length), PrintMode::Println, PrintColor::Blue, true);
        for (i, (joint, link)) in self.joints.iter().zip(self.links.iter()).enumerate() {
            arm_print(&format!(">> Joint {}: ", i), PrintMode::Print, PrintColor::Blue, true);
            joint.print_summary();
            arm_print(&format!("  Link: length {}, width {}, height {}", link.length(), link.width(), link.height()), PrintMode::Print, PrintColor::None, false);
            arm_print_new_line();
        }
    }
}

/// `F[0] = locals[0]`, `F[i] = F[i-1] * locals[i]`.
pub fn forward_products(locals: &[HomogeneousMatrix]) -> Vec<HomogeneousMatrix> {
    let mut out_vec: Vec<HomogeneousMatrix> = Vec::with_capacity(locals.len());
    for (i, local) in locals.iter().enumerate() {
        if i == 0 {
            out_vec.push(local.clone());
        } else {
            let next = out_vec[i - 1].multiply(local);
            out_vec.push(next);
        }
    }
    out_vec
}

/// `B[n] = locals[n]`, `B[i] = locals[i] * B[i+1]`, followed by an identity sentinel at `B[n+1]`.
///
/// With this padding `F[i] * B[i+1]` is the full product for every `i`, and replacing
/// `locals[i+1]` by a perturbed joint transform `dJ` gives `F[i] * dJ * B[i+2]`.
pub fn backward_products(locals: &[HomogeneousMatrix]) -> Vec<HomogeneousMatrix> {
    let n = locals.len();
    let mut out_vec = vec![HomogeneousMatrix::new_identity(); n + 1];
    for i in (0..n).rev() {
        out_vec[i] = locals[i].multiply(&out_vec[i + 1]);
    }
    out_vec
}

/// Ephemeral output of forward kinematics.  `forward` has one entry per chain frame (index 0 is the
/// origin, the last entry is the end effector) and `backward` carries the suffix products plus the
/// identity sentinel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArmFKResult {
    forward: Vec<HomogeneousMatrix>,
    backward: Vec<HomogeneousMatrix>
}
impl ArmFKResult {
    pub fn forward(&self) -> &Vec<HomogeneousMatrix> {
        &self.forward
    }
    pub fn backward(&self) -> &Vec<HomogeneousMatrix> {
        &self.backward
    }
    pub fn end_effector(&self) -> &HomogeneousMatrix {
        &self.forward[self.forward.len() - 1]
    }
    /// The frame each link's geometry hangs from: link `i` is posed by `forward[i]`.
    pub fn link_transforms(&self) -> &[HomogeneousMatrix] {
        &self.forward[..self.forward.len() - 1]
    }
    /// The transforms a renderer draws, one per joint (everything after the origin).
    pub fn joint_transforms(&self) -> &[HomogeneousMatrix] {
        &self.forward[1..]
    }
    /// End-effector pose when only joint `joint_idx` is moved to `angle`, reusing the cached
    /// prefix and suffix products.
    pub fn perturbed_end_effector(&self, chain: &ArmChain, joint_idx: usize, angle: f64) -> Result<HomogeneousMatrix, ArmIKError> {
        ArmIKError::new_check_for_idx_out_of_bound_error(joint_idx, chain.num_joints(), file!(), line!())?;
        if self.forward.len() != chain.num_joints() + 1 {
            return Err(ArmIKError::new_wrong_size_error("perturbed_end_effector", self.forward.len(), chain.num_joints() + 1, file!(), line!()));
        }

        let d_mat = chain.joint_transform(joint_idx, angle);
        return Ok(self.forward[joint_idx].multiply(&d_mat).multiply(&self.backward[joint_idx + 2]));
    }
    pub fn print_summary(&self) {
        for (i, f) in self.forward.iter().enumerate() {
            let label = if i == 0 { "origin".to_string() } else if i == self.forward.len() - 1 { "end effector".to_string() } else { format!("frame {}", i) };
            arm_print(&format!("{} ---> ", label), PrintMode::Print, PrintColor::Blue, true);
            arm_print(&format!("translation {:?}", f.translation().as_slice()), PrintMode::Println, PrintColor::None, false);
        }
    }
}
