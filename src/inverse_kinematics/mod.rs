use std::time::Duration;
use nalgebra::DVector;
use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::arm_modules::arm_chain_module::{ArmChain, ArmFKResult};
use crate::inverse_kinematics::gradient_descent::GradientDescentStrategy;
use crate::inverse_kinematics::jacobian_transpose::JacobianTransposeStrategy;
use crate::utils::utils_console::{arm_print, PrintColor, PrintMode};
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_sampling::SimpleSamplers;
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;
use crate::utils::utils_se3::transform_loss::{RotationNormalization, TransformLoss};

pub mod gradient_descent;
pub mod jacobian_transpose;

/// Loss value a freshly reset solver reports before its first evaluation.
pub const LOSS_SENTINEL: f64 = 100.0;
/// Iteration cap used when a [`SolveRequest`] does not override it.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Mutable per-solver bookkeeping.  Owned by exactly one [`IKSolverEngine`] (or by whoever drives
/// an [`IKStrategy`] by hand) and threaded explicitly through every step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverState {
    angles: DVector<f64>,
    momentums: DVector<f64>,
    iterations: usize,
    current_learn_rate: f64,
    loss: f64
}
impl SolverState {
    pub fn new(initial_angles: DVector<f64>) -> Self {
        let n = initial_angles.len();
        Self {
            angles: initial_angles,
            momentums: DVector::zeros(n),
            iterations: 0,
            current_learn_rate: 0.0,
            loss: LOSS_SENTINEL
        }
    }
    /// Zeroes the iteration count and momentum and sets the loss back to [`LOSS_SENTINEL`].  The
    /// angles are kept so that consecutive solves continue from where the last one stopped.
    pub fn reset(&mut self) {
        self.iterations = 0;
        self.loss = LOSS_SENTINEL;
        self.momentums = DVector::zeros(self.angles.len());
    }
    pub fn angles(&self) -> &DVector<f64> {
        &self.angles
    }
    pub fn angles_mut(&mut self) -> &mut DVector<f64> {
        &mut self.angles
    }
    pub fn set_angles(&mut self, angles: DVector<f64>) {
        if angles.len() != self.momentums.len() {
            self.momentums = DVector::zeros(angles.len());
        }
        self.angles = angles;
    }
    pub fn momentums(&self) -> &DVector<f64> {
        &self.momentums
    }
    pub fn momentums_mut(&mut self) -> &mut DVector<f64> {
        &mut self.momentums
    }
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    pub fn current_learn_rate(&self) -> f64 {
        self.current_learn_rate
    }
    pub fn set_current_learn_rate(&mut self, current_learn_rate: f64) {
        self.current_learn_rate = current_learn_rate;
    }
    pub fn loss(&self) -> f64 {
        self.loss
    }
    pub fn set_loss(&mut self, loss: f64) {
        self.loss = loss;
    }
    fn increment_iterations(&mut self) {
        self.iterations += 1;
    }
}

/// One iteration scheme for moving joint angles toward a target pose.
///
/// Implementors only supply [`IKStrategy::step_from_fk`], which receives the forward kinematics of
/// the current angles and must write the updated angles back into the state.
pub trait IKStrategy {
    fn reset_params(&self, state: &mut SolverState) {
        state.reset();
    }
    /// Updates `state` in place given `fk_res`, the forward kinematics at `state.angles()`.  Does
    /// not touch the iteration counter.
    fn step_from_fk(&self, state: &mut SolverState, chain: &ArmChain, target: &HomogeneousMatrix, fk_res: &ArmFKResult, loss_fn: &TransformLoss) -> Result<(), ArmIKError>;
    /// Evaluates the loss at the current angles, records it in the state, applies one update and
    /// counts it.  Returns the loss measured before the update.
    fn step(&self, state: &mut SolverState, chain: &ArmChain, target: &HomogeneousMatrix, loss_fn: &TransformLoss) -> Result<f64, ArmIKError> {
        let fk_res = chain.compute_fk(state.angles())?;
        let loss = loss_fn.loss(fk_res.end_effector(), target);
        state.set_loss(loss);
        self.step_from_fk(state, chain, target, &fk_res, loss_fn)?;
        state.increment_iterations();
        Ok(loss)
    }
    fn verbose(&self) -> bool { false }
    fn name(&self) -> &'static str;
}

/// Selects one of the two built-in strategies at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum IKStrategyType {
    GradientDescent(GradientDescentStrategy),
    JacobianTranspose(JacobianTransposeStrategy)
}
impl IKStrategyType {
    pub fn new_gradient_descent_default() -> Self {
        Self::GradientDescent(GradientDescentStrategy::default())
    }
    pub fn new_jacobian_transpose_default() -> Self {
        Self::JacobianTranspose(JacobianTransposeStrategy::default())
    }
}
impl IKStrategy for IKStrategyType {
    fn reset_params(&self, state: &mut SolverState) {
        match self {
            IKStrategyType::GradientDescent(s) => { s.reset_params(state) }
            IKStrategyType::JacobianTranspose(s) => { s.reset_params(state) }
        }
    }
    fn step_from_fk(&self, state: &mut SolverState, chain: &ArmChain, target: &HomogeneousMatrix, fk_res: &ArmFKResult, loss_fn: &TransformLoss) -> Result<(), ArmIKError> {
        match self {
            IKStrategyType::GradientDescent(s) => { s.step_from_fk(state, chain, target, fk_res, loss_fn) }
            IKStrategyType::JacobianTranspose(s) => { s.step_from_fk(state, chain, target, fk_res, loss_fn) }
        }
    }
    fn verbose(&self) -> bool {
        match self {
            IKStrategyType::GradientDescent(s) => { s.verbose() }
            IKStrategyType::JacobianTranspose(s) => { s.verbose() }
        }
    }
    fn name(&self) -> &'static str {
        match self {
            IKStrategyType::GradientDescent(s) => { s.name() }
            IKStrategyType::JacobianTranspose(s) => { s.name() }
        }
    }
}

/// Target pose, convergence threshold (in loss units) and optional iteration cap for one solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub target: HomogeneousMatrix,
    pub threshold: f64,
    pub max_iterations: Option<usize>
}
impl SolveRequest {
    pub fn new(target: HomogeneousMatrix, threshold: f64) -> Self {
        Self {
            target,
            threshold,
            max_iterations: None
        }
    }
    pub fn new_with_max_iterations(target: HomogeneousMatrix, threshold: f64, max_iterations: usize) -> Self {
        Self {
            target,
            threshold,
            max_iterations: Some(max_iterations)
        }
    }
    pub fn max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Converged,
    Exhausted
}

/// Output of [`IKSolverEngine::solve`].  `fk_res` holds the forward transforms at the returned
/// angles, ready for rendering or for the collision scene.
#[derive(Clone, Debug)]
pub struct SolveResult {
    angles: DVector<f64>,
    loss: f64,
    status: SolveStatus,
    iterations: usize,
    restarts: usize,
    fk_res: ArmFKResult,
    elapsed: Duration
}
impl SolveResult {
    pub fn angles(&self) -> &DVector<f64> {
        &self.angles
    }
    pub fn loss(&self) -> f64 {
        self.loss
    }
    pub fn status(&self) -> SolveStatus {
        self.status
    }
    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }
    /// Iterations summed over every attempt.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    /// How many times the angles were reseeded; zero unless the result came from
    /// [`IKSolverEngine::solve_with_restarts`].
    pub fn restarts(&self) -> usize {
        self.restarts
    }
    pub fn fk_res(&self) -> &ArmFKResult {
        &self.fk_res
    }
    pub fn forward_transforms(&self) -> &Vec<HomogeneousMatrix> {
        self.fk_res.forward()
    }
    pub fn end_effector(&self) -> &HomogeneousMatrix {
        self.fk_res.end_effector()
    }
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
    pub fn print_summary(&self) {
        match self.status {
            SolveStatus::Converged => {
                arm_print(&format!("Found solution in {} iterations ({:?}).", self.iterations, self.elapsed), PrintMode::Println, PrintColor::Green, true);
            }
            SolveStatus::Exhausted => {
                arm_print(&format!("Could not converge in {} iterations ({:?}).", self.iterations, self.elapsed), PrintMode::Println, PrintColor::Yellow, true);
            }
        }
        arm_print(&format!("  loss: {:e}", self.loss), PrintMode::Println, PrintColor::None, false);
        arm_print(&format!("  angles: {:?}", self.angles.as_slice()), PrintMode::Println, PrintColor::None, false);
    }
}

/// Drives an [`IKStrategy`] over a chain.  The engine owns the [`SolverState`] and the loss
/// function; the chain is borrowed on every call and the loss is rescaled to its arm length.
///
/// # Example
/// ```
/// use nalgebra::DVector;
/// use arm_ik::arm_modules::arm_chain_module::ArmChain;
/// use arm_ik::inverse_kinematics::{IKSolverEngine, IKStrategyType, SolveRequest};
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
/// let target = chain.compute_fk(&DVector::from_vec(vec![0.2, 0.4, 0.5])).expect("error").end_effector().clone();
/// let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
/// let res = engine.solve(&chain, &SolveRequest::new_with_max_iterations(target, 1e-6, 2000)).expect("error");
/// assert!(res.converged());
/// ```
#[derive(Clone, Debug)]
pub struct IKSolverEngine<S: IKStrategy> {
    strategy: S,
    state: SolverState,
    loss_fn: TransformLoss
}
impl<S: IKStrategy> IKSolverEngine<S> {
    /// Seeds the angles at the midpoints of the chain's joint bounds.
    pub fn new(strategy: S, chain: &ArmChain) -> Self {
        let mut state = SolverState::new(chain.initial_angles());
        strategy.reset_params(&mut state);
        Self {
            strategy,
            state,
            loss_fn: TransformLoss::new(chain.arm_length())
        }
    }
    pub fn strategy(&self) -> &S {
        &self.strategy
    }
    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }
    pub fn state(&self) -> &SolverState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut SolverState {
        &mut self.state
    }
    pub fn loss_fn(&self) -> &TransformLoss {
        &self.loss_fn
    }
    pub fn set_rotation_normalization(&mut self, normalization: RotationNormalization) {
        self.loss_fn = TransformLoss::new_with_corrections(self.loss_fn.dist_correction(), self.loss_fn.rot_correction(), normalization);
    }
    pub fn set_angles(&mut self, chain: &ArmChain, angles: DVector<f64>) -> Result<(), ArmIKError> {
        chain.check_angles_size(&angles)?;
        self.state.set_angles(angles);
        Ok(())
    }
    /// Resets the state and iterates until the loss drops to the threshold or the iteration cap is
    /// reached.  Running out of iterations is reported through [`SolveStatus::Exhausted`], not as
    /// an error, and the last angles are kept.
    pub fn solve(&mut self, chain: &ArmChain, request: &SolveRequest) -> Result<SolveResult, ArmIKError> {
        chain.check_angles_size(self.state.angles())?;
        self.match_loss_to_chain(chain);
        if !request.target.is_finite() {
            return Err(ArmIKError::new_generic_error_str("Solve target contains non-finite values.", file!(), line!()));
        }

        let start = instant::Instant::now();
        self.strategy.reset_params(&mut self.state);
        let max_iterations = request.max_iterations();

        let (status, fk_res) = loop {
            let fk_res = chain.compute_fk(self.state.angles())?;
            let loss = self.loss_fn.loss(fk_res.end_effector(), &request.target);
            self.state.set_loss(loss);

            if loss <= request.threshold { break (SolveStatus::Converged, fk_res); }
            if self.state.iterations() >= max_iterations { break (SolveStatus::Exhausted, fk_res); }

            self.strategy.step_from_fk(&mut self.state, chain, &request.target, &fk_res, &self.loss_fn)?;
            self.state.increment_iterations();
        };

        let res = SolveResult {
            angles: self.state.angles().clone(),
            loss: self.state.loss(),
            status,
            iterations: self.state.iterations(),
            restarts: 0,
            fk_res,
            elapsed: start.elapsed()
        };

        if self.strategy.verbose() {
            arm_print(&format!("[{}] ", self.strategy.name()), PrintMode::Print, PrintColor::Cyan, true);
            res.print_summary();
        }

        Ok(res)
    }
    /// Solves from the current angles and, while the result is [`SolveStatus::Exhausted`], reseeds
    /// the angles uniformly inside the joint bounds and solves again, at most `max_restarts` times.
    /// Each attempt gets the full iteration cap of `request`.  The best attempt is returned and its
    /// angles are left in the state.
    pub fn solve_with_restarts<R: Rng>(&mut self, chain: &ArmChain, request: &SolveRequest, max_restarts: usize, rng: &mut R) -> Result<SolveResult, ArmIKError> {
        let start = instant::Instant::now();
        let bounds = chain.bounds();

        let mut best = self.solve(chain, request)?;
        let mut total_iterations = best.iterations;
        let mut restarts = 0;
        while !best.converged() && restarts < max_restarts {
            restarts += 1;
            self.state.set_angles(DVector::from_vec(SimpleSamplers::uniform_samples(&bounds, rng)));
            let res = self.solve(chain, request)?;
            total_iterations += res.iterations;
            if res.converged() || res.loss < best.loss { best = res; }
        }

        self.state.set_angles(best.angles.clone());
        self.state.set_loss(best.loss);
        best.iterations = total_iterations;
        best.restarts = restarts;
        best.elapsed = start.elapsed();

        Ok(best)
    }
    /// Seeds the angles (if given) and solves with the given iteration cap.
    pub fn solve_with_conditions(&mut self, chain: &ArmChain, target: &HomogeneousMatrix, threshold: f64, initial_angles: Option<DVector<f64>>, max_iterations: usize) -> Result<SolveResult, ArmIKError> {
        if let Some(initial_angles) = initial_angles {
            self.set_angles(chain, initial_angles)?;
        }
        return self.solve(chain, &SolveRequest::new_with_max_iterations(target.clone(), threshold, max_iterations));
    }
    /// Runs one iteration without resetting, for callers that advance the solve a little every
    /// frame.  Returns the loss at the angles before the update.
    pub fn step_once(&mut self, chain: &ArmChain, target: &HomogeneousMatrix) -> Result<f64, ArmIKError> {
        self.match_loss_to_chain(chain);
        return self.strategy.step(&mut self.state, chain, target, &self.loss_fn);
    }
    /// Resets the state without solving.
    pub fn reset(&mut self) {
        self.strategy.reset_params(&mut self.state);
    }
    fn match_loss_to_chain(&mut self, chain: &ArmChain) {
        if self.loss_fn.dist_correction() != chain.arm_length() {
            self.loss_fn = TransformLoss::new_with_corrections(chain.arm_length(), self.loss_fn.rot_correction(), self.loss_fn.normalization());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::utils::utils_robot::joint::JointAxis;

    fn three_link_chain() -> ArmChain {
        let pi = std::f64::consts::PI;
        ArmChain::new_from_parameter_arrays(
            HomogeneousMatrix::new_identity(),
            &[JointAxis::Z, JointAxis::Y, JointAxis::Y],
            &[1.0, 4.0, 4.0],
            &[-2.0 * pi, -pi, -pi],
            &[2.0 * pi, pi, pi]
        ).unwrap()
    }

    #[test]
    fn reset_restores_sentinels_but_keeps_angles() {
        let mut s = SolverState::new(DVector::from_vec(vec![0.1, 0.2]));
        s.set_loss(0.5);
        s.momentums_mut()[0] = 3.0;
        s.increment_iterations();
        s.reset();
        assert_eq!(s.loss(), LOSS_SENTINEL);
        assert_eq!(s.iterations(), 0);
        assert_eq!(s.momentums(), &DVector::zeros(2));
        assert_eq!(s.angles(), &DVector::from_vec(vec![0.1, 0.2]));
    }

    #[test]
    fn default_cap_is_used_without_override() {
        let req = SolveRequest::new(HomogeneousMatrix::new_identity(), 1e-6);
        assert_eq!(req.max_iterations(), DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn already_solved_target_converges_without_iterating() {
        let chain = three_link_chain();
        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        let target = chain.compute_fk(&chain.initial_angles()).unwrap().end_effector().clone();
        let res = engine.solve(&chain, &SolveRequest::new(target, 1e-9)).unwrap();
        assert!(res.converged());
        assert_eq!(res.iterations(), 0);
        assert_eq!(res.loss(), 0.0);
        assert_eq!(res.forward_transforms().len(), 4);
    }

    #[test]
    fn exhausting_the_cap_keeps_the_last_angles() {
        let chain = three_link_chain();
        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        // far outside the reachable sphere
        let target = HomogeneousMatrix::new_translation(50.0, 0.0, 0.0);
        let res = engine.solve(&chain, &SolveRequest::new_with_max_iterations(target.clone(), 1e-6, 7)).unwrap();
        assert_eq!(res.status(), SolveStatus::Exhausted);
        assert_eq!(res.iterations(), 7);
        assert_eq!(res.angles(), engine.state().angles());
        let fk = chain.compute_fk(res.angles()).unwrap();
        assert_relative_eq!(res.loss(), engine.loss_fn().loss(fk.end_effector(), &target));
    }

    #[test]
    fn solve_with_conditions_reseeds_and_reaches_the_target() {
        let chain = three_link_chain();
        let truth = DVector::from_vec(vec![0.3, 0.5, 0.4]);
        let target = chain.compute_fk(&truth).unwrap().end_effector().clone();
        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        let res = engine.solve_with_conditions(&chain, &target, 1e-6, Some(DVector::zeros(3)), 2000).unwrap();
        assert!(res.converged());
        let err = (res.end_effector().translation() - target.translation()).norm();
        assert!(err <= 1e-3 * chain.arm_length());

        assert!(engine.solve_with_conditions(&chain, &target, 1e-6, Some(DVector::zeros(2)), 10).is_err());
    }

    #[test]
    fn step_once_counts_iterations_and_reports_prior_loss() {
        let chain = three_link_chain();
        let target = chain.compute_fk(&DVector::from_vec(vec![0.3, 0.5, 0.4])).unwrap().end_effector().clone();
        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        engine.set_angles(&chain, DVector::zeros(3)).unwrap();
        let first = engine.step_once(&chain, &target).unwrap();
        let start_fk = chain.compute_fk(&DVector::zeros(3)).unwrap();
        assert_relative_eq!(first, engine.loss_fn().loss(start_fk.end_effector(), &target));
        engine.step_once(&chain, &target).unwrap();
        assert_eq!(engine.state().iterations(), 2);
    }

    #[test]
    fn rotation_normalization_can_be_switched() {
        let chain = three_link_chain();
        let mut engine = IKSolverEngine::new(IKStrategyType::new_jacobian_transpose_default(), &chain);
        assert_eq!(engine.loss_fn().normalization(), RotationNormalization::Reference);
        engine.set_rotation_normalization(RotationNormalization::SingleDivision);
        assert_eq!(engine.loss_fn().normalization(), RotationNormalization::SingleDivision);
        assert_relative_eq!(engine.loss_fn().dist_correction(), 9.0);
    }

    #[test]
    fn loss_is_rescaled_to_the_chain_being_solved() {
        let chain = three_link_chain();
        let longer = ArmChain::new_from_parameter_arrays(
            HomogeneousMatrix::new_identity(),
            &[JointAxis::Z, JointAxis::Y, JointAxis::Y],
            &[2.0, 8.0, 8.0],
            &chain.min_angles(),
            &chain.max_angles()
        ).unwrap();
        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        engine.set_rotation_normalization(RotationNormalization::SingleDivision);

        let target = HomogeneousMatrix::new_translation(50.0, 0.0, 0.0);
        let res = engine.solve(&longer, &SolveRequest::new_with_max_iterations(target.clone(), 1e-6, 3)).unwrap();
        assert_relative_eq!(engine.loss_fn().dist_correction(), 18.0);
        assert_eq!(engine.loss_fn().normalization(), RotationNormalization::SingleDivision);
        let expected = TransformLoss::new_with_corrections(18.0, std::f64::consts::PI, RotationNormalization::SingleDivision);
        assert_relative_eq!(res.loss(), expected.loss(res.end_effector(), &target));

        engine.step_once(&chain, &target).unwrap();
        assert_relative_eq!(engine.loss_fn().dist_correction(), 9.0);
    }

    #[test]
    fn restarts_escape_the_mirrored_local_minimum() {
        let chain = three_link_chain();
        let truth = DVector::from_vec(vec![2.3879292969352504, -1.2398452420952344, 0.3175556511596396]);
        let target = chain.compute_fk(&truth).unwrap().end_effector().clone();
        let request = SolveRequest::new(target, 1e-6);

        // from the midpoint the base settles half a turn away and the elbow folds the other way
        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        let single = engine.solve(&chain, &request).unwrap();
        assert_eq!(single.status(), SolveStatus::Exhausted);
        assert!(single.loss() > 0.1);

        engine.set_angles(&chain, chain.initial_angles()).unwrap();
        let mut rng = SimpleSamplers::seeded_rng(1);
        let res = engine.solve_with_restarts(&chain, &request, 30, &mut rng).unwrap();
        assert!(res.converged());
        assert!(res.restarts() >= 1);
        assert!(res.iterations() > DEFAULT_MAX_ITERATIONS);
        assert_eq!(res.angles(), engine.state().angles());
    }

    #[test]
    fn exhausted_restarts_return_the_best_attempt() {
        let chain = three_link_chain();
        let target = HomogeneousMatrix::new_translation(50.0, 0.0, 0.0);
        let request = SolveRequest::new_with_max_iterations(target, 1e-6, 20);

        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        let first = engine.solve(&chain, &request).unwrap();

        engine.set_angles(&chain, chain.initial_angles()).unwrap();
        let mut rng = SimpleSamplers::seeded_rng(3);
        let res = engine.solve_with_restarts(&chain, &request, 4, &mut rng).unwrap();
        assert_eq!(res.status(), SolveStatus::Exhausted);
        assert_eq!(res.restarts(), 4);
        assert_eq!(res.iterations(), 5 * 20);
        assert!(res.loss() <= first.loss());
        assert_eq!(engine.state().angles(), res.angles());
        assert_eq!(engine.state().loss(), res.loss());
    }

    #[test]
    fn converged_solve_does_not_restart() {
        let chain = three_link_chain();
        let target = chain.compute_fk(&chain.initial_angles()).unwrap().end_effector().clone();
        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        let mut rng = SimpleSamplers::seeded_rng(0);
        let res = engine.solve_with_restarts(&chain, &SolveRequest::new(target, 1e-9), 10, &mut rng).unwrap();
        assert!(res.converged());
        assert_eq!(res.restarts(), 0);
        assert_eq!(res.iterations(), 0);
    }
}
