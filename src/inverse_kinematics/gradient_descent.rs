use serde::{Serialize, Deserialize};
use crate::arm_modules::arm_chain_module::{ArmChain, ArmFKResult};
use crate::inverse_kinematics::{IKStrategy, SolverState};
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;
use crate::utils::utils_se3::transform_loss::TransformLoss;

/// Hyper-parameters of [`GradientDescentStrategy`].  The defaults are the tuned reference values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientDescentParams {
    pub learn_rate: f64,
    pub decay: f64,
    pub momentum_retain: f64,
    /// Finite-difference derivatives are clamped to `[-max_dloss, max_dloss]`.
    pub max_dloss: f64,
    pub perturbation: f64,
    /// Step with `SolverState::current_learn_rate` instead of `learn_rate`.
    pub use_decayed_learn_rate: bool,
    pub enforce_joint_limits: bool,
    pub verbose: bool
}
impl Default for GradientDescentParams {
    fn default() -> Self {
        Self {
            learn_rate: 0.5,
            decay: 0.000005,
            momentum_retain: 0.25,
            max_dloss: 0.25,
            perturbation: 0.00001,
            use_decayed_learn_rate: false,
            enforce_joint_limits: true,
            verbose: false
        }
    }
}

/// Finite-difference gradient descent with momentum.
///
/// Every joint's partial derivative is taken against the same forward kinematics by substituting
/// the perturbed joint transform between the cached prefix and suffix products, so one iteration
/// costs a single chain evaluation plus two matrix products per joint.  The update is
/// `theta_i -= momentum_i * momentum_retain + dloss_i * learn_rate` followed by
/// `momentum_i = dloss_i`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientDescentStrategy {
    params: GradientDescentParams
}
impl GradientDescentStrategy {
    pub fn new(params: GradientDescentParams) -> Self {
        Self {
            params
        }
    }
    pub fn params(&self) -> &GradientDescentParams {
        &self.params
    }
    pub fn params_mut(&mut self) -> &mut GradientDescentParams {
        &mut self.params
    }
    /// `learn_rate / (1 + decay * iterations)`
    pub fn decayed_learn_rate(&self, iterations: usize) -> f64 {
        self.params.learn_rate / (1.0 + self.params.decay * iterations as f64)
    }
}
impl Default for GradientDescentStrategy {
    fn default() -> Self {
        Self::new(GradientDescentParams::default())
    }
}
impl IKStrategy for GradientDescentStrategy {
    fn reset_params(&self, state: &mut SolverState) {
        state.reset();
        state.set_current_learn_rate(self.params.learn_rate);
    }
    fn step_from_fk(&self, state: &mut SolverState, chain: &ArmChain, target: &HomogeneousMatrix, fk_res: &ArmFKResult, loss_fn: &TransformLoss) -> Result<(), ArmIKError> {
        chain.check_angles_size(state.angles())?;

        let d = self.params.perturbation;
        let current_loss = loss_fn.loss(fk_res.end_effector(), target);
        let learn_rate = if self.params.use_decayed_learn_rate { state.current_learn_rate() } else { self.params.learn_rate };

        let mut dlosses = Vec::with_capacity(chain.num_joints());
        for i in 0..chain.num_joints() {
            let perturbed = fk_res.perturbed_end_effector(chain, i, state.angles()[i] + d)?;
            let dloss = (loss_fn.loss(&perturbed, target) - current_loss) / d;
            dlosses.push(dloss.max(-self.params.max_dloss).min(self.params.max_dloss));
        }

        for (i, dloss) in dlosses.iter().enumerate() {
            let momentum = state.momentums()[i];
            state.angles_mut()[i] -= momentum * self.params.momentum_retain + dloss * learn_rate;
            state.momentums_mut()[i] = *dloss;
        }

        if self.params.enforce_joint_limits {
            chain.clamp_angles(state.angles_mut());
        }

        state.set_current_learn_rate(self.decayed_learn_rate(state.iterations() + 1));

        Ok(())
    }
    fn verbose(&self) -> bool {
        self.params.verbose
    }
    fn name(&self) -> &'static str {
        "gradient descent"
    }
}
