use nalgebra::{DMatrix, DVector};
use serde::{Serialize, Deserialize};
use crate::arm_modules::arm_chain_module::{ArmChain, ArmFKResult};
use crate::inverse_kinematics::{IKStrategy, SolverState};
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;
use crate::utils::utils_se3::transform_loss::{jacobian_column, target_velocity, TransformLoss};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JacobianTransposeParams {
    pub gain: f64,
    pub perturbation: f64,
    pub enforce_joint_limits: bool,
    pub verbose: bool
}
impl Default for JacobianTransposeParams {
    fn default() -> Self {
        Self {
            gain: 0.001,
            perturbation: 0.00001,
            enforce_joint_limits: true,
            verbose: false
        }
    }
}

/// Numerical Jacobian-transpose stepping: `delta_theta = gain * J^T * v`, where `v` is the twist
/// from the current end effector to the target and column `i` of `J` is the twist change caused by
/// perturbing joint `i`.  No momentum is kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JacobianTransposeStrategy {
    params: JacobianTransposeParams
}
impl JacobianTransposeStrategy {
    pub fn new(params: JacobianTransposeParams) -> Self {
        Self {
            params
        }
    }
    pub fn params(&self) -> &JacobianTransposeParams {
        &self.params
    }
    pub fn params_mut(&mut self) -> &mut JacobianTransposeParams {
        &mut self.params
    }
    /// The 6 x n numerical Jacobian at the angles `fk_res` was computed for.
    pub fn numerical_jacobian(&self, chain: &ArmChain, angles: &[f64], fk_res: &ArmFKResult) -> Result<DMatrix<f64>, ArmIKError> {
        let n = chain.num_joints();
        if angles.len() != n {
            return Err(ArmIKError::new_wrong_size_error("numerical_jacobian", angles.len(), n, file!(), line!()));
        }

        let d = self.params.perturbation;
        let current = fk_res.end_effector();
        let mut jacobian = DMatrix::zeros(6, n);
        for i in 0..n {
            let perturbed = fk_res.perturbed_end_effector(chain, i, angles[i] + d)?;
            let column = jacobian_column(current, &perturbed, d);
            for r in 0..6 { jacobian[(r, i)] = column[r]; }
        }

        Ok(jacobian)
    }
}
impl Default for JacobianTransposeStrategy {
    fn default() -> Self {
        Self::new(JacobianTransposeParams::default())
    }
}
impl IKStrategy for JacobianTransposeStrategy {
    fn step_from_fk(&self, state: &mut SolverState, chain: &ArmChain, target: &HomogeneousMatrix, fk_res: &ArmFKResult, _loss_fn: &TransformLoss) -> Result<(), ArmIKError> {
        chain.check_angles_size(state.angles())?;

        let v = DVector::from_column_slice(target_velocity(target, fk_res.end_effector()).as_slice());
        let jacobian = self.numerical_jacobian(chain, state.angles().as_slice(), fk_res)?;
        let delta = jacobian.transpose() * v * self.params.gain;

        *state.angles_mut() += delta;

        if self.params.enforce_joint_limits {
            chain.clamp_angles(state.angles_mut());
        }

        Ok(())
    }
    fn verbose(&self) -> bool {
        self.params.verbose
    }
    fn name(&self) -> &'static str {
        "jacobian transpose"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::inverse_kinematics::{IKSolverEngine, SolveRequest};
    use crate::utils::utils_robot::joint::JointAxis;

    #[test]
    fn jacobian_of_a_single_z_joint_is_a_pure_rotation_column() {
        let chain = ArmChain::new_from_parameter_arrays(HomogeneousMatrix::new_identity(), &[JointAxis::Z], &[1.0], &[-3.0], &[3.0]).unwrap();
        let fk = chain.compute_fk(&DVector::from_vec(vec![0.2])).unwrap();
        let j = JacobianTransposeStrategy::default().numerical_jacobian(&chain, &[0.2], &fk).unwrap();
        assert_eq!(j.shape(), (6, 1));
        for r in 0..5 { assert_relative_eq!(j[(r, 0)], 0.0, epsilon = 1e-5); }
        assert_relative_eq!(j[(5, 0)], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn update_is_gain_times_transpose_times_velocity() {
        let chain = ArmChain::new_from_parameter_arrays(HomogeneousMatrix::new_identity(), &[JointAxis::Z], &[1.0], &[-3.0], &[3.0]).unwrap();
        let strategy = JacobianTransposeStrategy::default();
        let loss_fn = TransformLoss::new(chain.arm_length());
        let target = HomogeneousMatrix::new_joint_transform(0.3, JointAxis::Z, 1.0);
        let mut state = SolverState::new(DVector::zeros(1));
        strategy.step(&mut state, &chain, &target, &loss_fn).unwrap();
        // J = e_rz and v = (0, 0, 0, 0, 0, 0.3)
        assert_relative_eq!(state.angles()[0], 0.001 * 0.3, epsilon = 1e-8);
        assert_eq!(state.momentums()[0], 0.0);
    }

    #[test]
    fn single_joint_rotation_converges() {
        let chain = ArmChain::new_from_parameter_arrays(HomogeneousMatrix::new_identity(), &[JointAxis::Z], &[1.0], &[-3.0], &[3.0]).unwrap();
        let mut engine = IKSolverEngine::new(JacobianTransposeStrategy::default(), &chain);
        let target = HomogeneousMatrix::new_joint_transform(0.3, JointAxis::Z, 1.0);
        let res = engine.solve(&chain, &SolveRequest::new_with_max_iterations(target, 1e-6, 10000)).unwrap();
        assert!(res.converged());
        assert!(res.iterations() > 100);
        assert_relative_eq!(res.angles()[0], 0.3, epsilon = 5e-3);
    }

    #[test]
    fn steps_reduce_the_loss_on_a_three_link_arm() {
        let chain = ArmChain::new_from_parameter_arrays(HomogeneousMatrix::new_identity(), &[JointAxis::Z, JointAxis::Y, JointAxis::Y], &[1.0, 4.0, 4.0], &[-6.0, -3.0, -3.0], &[6.0, 3.0, 3.0]).unwrap();
        let truth = DVector::from_vec(vec![0.3, 0.5, 0.4]);
        let target = chain.compute_fk(&truth).unwrap().end_effector().clone();
        let mut engine = IKSolverEngine::new(JacobianTransposeStrategy::default(), &chain);
        engine.set_angles(&chain, DVector::from_vec(vec![0.2, 0.4, 0.5])).unwrap();

        let first = engine.step_once(&chain, &target).unwrap();
        let mut last = first;
        for _ in 0..300 { last = engine.step_once(&chain, &target).unwrap(); }
        assert!(last < first);
    }
}
