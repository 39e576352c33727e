#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use nalgebra::{DVector, Vector3};
use serde::{Serialize, Deserialize};
use crate::arm_modules::arm_chain_module::{ArmChain, DEFAULT_LINK_CROSS_SECTION};
use crate::inverse_kinematics::{IKSolverEngine, IKStrategyType, SolveRequest, SolveResult};
use crate::scenes::arm_collision_scene::{ArmCollisionScene, CollisionDump, CollisionStatus};
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_robot::joint::{Joint, JointAxis};
use crate::utils::utils_robot::link::Link;
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;
use crate::utils::utils_traits::ToAndFromJsonString;

/// Everything needed to reproduce a solve outside the host process: the chain (origin as 16
/// column-major floats, axes as unit vectors, link lengths in `radii`, bounds in radians), the
/// current angles, and the collision proxies as centroid offsets plus half extents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmIKProblem {
    pub origin: Vec<f64>,
    pub thetas: Vec<f64>,
    pub axes: Vec<[f64; 3]>,
    pub radii: Vec<f64>,
    pub min_angles: Vec<f64>,
    pub max_angles: Vec<f64>,
    pub arm_offsets: Vec<[f64; 3]>,
    pub arm_half_extents: Vec<[f64; 3]>,
    pub world_offsets: Vec<[f64; 3]>,
    pub world_half_extents: Vec<[f64; 3]>
}
impl ArmIKProblem {
    pub fn new(chain: &ArmChain, thetas: &DVector<f64>, scene: &ArmCollisionScene) -> Result<Self, ArmIKError> {
        chain.check_angles_size(thetas)?;
        if scene.num_links() != chain.num_joints() {
            return Err(ArmIKError::new_wrong_size_error("ArmIKProblem collision scene", scene.num_links(), chain.num_joints(), file!(), line!()));
        }

        let dump = scene.dump();
        Ok(Self {
            origin: chain.origin().to_column_major_vec(),
            thetas: thetas.as_slice().to_vec(),
            axes: chain.axes().iter().map(|a| a.to_array()).collect(),
            radii: chain.link_lengths(),
            min_angles: chain.min_angles(),
            max_angles: chain.max_angles(),
            arm_offsets: dump.arm_offsets,
            arm_half_extents: dump.arm_half_extents,
            world_offsets: dump.world_offsets,
            world_half_extents: dump.world_half_extents
        })
    }
    pub fn new_from_json_string(json_str: &str) -> Result<Self, ArmIKError> {
        return Self::load_from_json_string(json_str);
    }
    pub fn num_joints(&self) -> usize {
        self.axes.len()
    }
    /// Rebuilds the chain.  Link cross-sections come from `arm_half_extents` (x is height, y is
    /// width); when no arm proxies were sent the default cross-section is used.
    pub fn to_arm_chain(&self) -> Result<ArmChain, ArmIKError> {
        let n = self.num_joints();
        for (name, len) in [("radii", self.radii.len()), ("min_angles", self.min_angles.len()), ("max_angles", self.max_angles.len())] {
            if len != n {
                return Err(ArmIKError::new_malformed_chain_error(&format!("ArmIKProblem has {} axes but {} {}.", n, len, name), file!(), line!()));
            }
        }
        let use_half_extents = !self.arm_half_extents.is_empty();
        if use_half_extents && self.arm_half_extents.len() != n {
            return Err(ArmIKError::new_malformed_chain_error(&format!("ArmIKProblem has {} axes but {} arm half extents.", n, self.arm_half_extents.len()), file!(), line!()));
        }

        let origin = HomogeneousMatrix::new_from_column_major_slice(&self.origin)?;
        let mut joints = vec![];
        let mut links = vec![];
        for i in 0..n {
            joints.push(Joint::new(JointAxis::from_unit_vector(&self.axes[i])?, self.min_angles[i], self.max_angles[i])?);
            let link = if use_half_extents {
                let h = &self.arm_half_extents[i];
                Link::new(self.radii[i], 2.0 * h[1], 2.0 * h[0])?
            } else {
                Link::new(self.radii[i], DEFAULT_LINK_CROSS_SECTION, DEFAULT_LINK_CROSS_SECTION)?
            };
            links.push(link);
        }

        return ArmChain::new(origin, joints, links);
    }
    /// Rebuilds the collision scene from the sent proxies.  When no arm proxies were sent they are
    /// derived from `chain`.
    pub fn to_collision_scene(&self, chain: &ArmChain) -> Result<ArmCollisionScene, ArmIKError> {
        if !self.arm_offsets.is_empty() {
            return ArmCollisionScene::new_from_dump(&CollisionDump {
                arm_offsets: self.arm_offsets.clone(),
                arm_half_extents: self.arm_half_extents.clone(),
                world_offsets: self.world_offsets.clone(),
                world_half_extents: self.world_half_extents.clone()
            });
        }

        if self.world_offsets.len() != self.world_half_extents.len() {
            return Err(ArmIKError::new_wrong_size_error("to_collision_scene world_half_extents", self.world_half_extents.len(), self.world_offsets.len(), file!(), line!()));
        }
        let mut scene = ArmCollisionScene::new(chain)?;
        for (o, h) in self.world_offsets.iter().zip(self.world_half_extents.iter()) {
            scene.add_obstacle(&Vector3::new(o[0], o[1], o[2]), 2.0 * h[0], 2.0 * h[1], 2.0 * h[2])?;
        }

        Ok(scene)
    }
    /// The sent angles, or None if the problem carries none.
    pub fn thetas(&self) -> Option<DVector<f64>> {
        if self.thetas.is_empty() { return None; }
        Some(DVector::from_column_slice(&self.thetas))
    }
}

/// Solver side of the offload boundary: holds the rebuilt chain, scene, and a gradient-descent
/// engine, and speaks JSON in and out.  Targets are 16 column-major floats.
#[derive(Clone, Debug)]
pub struct ArmIKOffloadSolver {
    chain: ArmChain,
    scene: ArmCollisionScene,
    engine: IKSolverEngine<IKStrategyType>
}
impl ArmIKOffloadSolver {
    pub fn new(problem: &ArmIKProblem) -> Result<Self, ArmIKError> {
        let chain = problem.to_arm_chain()?;
        let scene = problem.to_collision_scene(&chain)?;
        let mut engine = IKSolverEngine::new(IKStrategyType::new_gradient_descent_default(), &chain);
        if let Some(thetas) = problem.thetas() {
            engine.set_angles(&chain, thetas)?;
        }

        Ok(Self {
            chain,
            scene,
            engine
        })
    }
    pub fn new_from_json(json_str: &str) -> Result<Self, ArmIKError> {
        return Self::new(&ArmIKProblem::new_from_json_string(json_str)?);
    }
    pub fn chain(&self) -> &ArmChain {
        &self.chain
    }
    pub fn scene(&self) -> &ArmCollisionScene {
        &self.scene
    }
    pub fn engine(&self) -> &IKSolverEngine<IKStrategyType> {
        &self.engine
    }
    pub fn engine_mut(&mut self) -> &mut IKSolverEngine<IKStrategyType> {
        &mut self.engine
    }
    fn parse_target(target_json: &str) -> Result<HomogeneousMatrix, ArmIKError> {
        let values = Vec::<f64>::load_from_json_string(target_json)?;
        return HomogeneousMatrix::new_from_column_major_slice(&values);
    }
    pub fn solve_target(&mut self, target: &HomogeneousMatrix, threshold: f64, initial_angles: Option<DVector<f64>>, max_iterations: usize) -> Result<SolveResult, ArmIKError> {
        return self.engine.solve_with_conditions(&self.chain, target, threshold, initial_angles, max_iterations);
    }
    /// Solves from the current angles with the default iteration cap and returns the angles as a
    /// JSON array.
    pub fn solve(&mut self, target_json: &str, threshold: f64) -> Result<String, ArmIKError> {
        let target = Self::parse_target(target_json)?;
        let res = self.engine.solve(&self.chain, &SolveRequest::new(target, threshold))?;
        return res.angles().as_slice().to_vec().convert_to_json_string();
    }
    /// Like [`ArmIKOffloadSolver::solve`] but seeds the angles from `thetas_json` (if given) and
    /// uses `max_iterations` as the cap.
    pub fn solve_with_conditions(&mut self, target_json: &str, threshold: f64, thetas_json: Option<&str>, max_iterations: usize) -> Result<String, ArmIKError> {
        let target = Self::parse_target(target_json)?;
        let initial_angles = match thetas_json {
            None => { None }
            Some(j) => {
                let v = Vec::<f64>::load_from_json_string(j)?;
                Some(DVector::from_vec(v))
            }
        };
        let res = self.solve_target(&target, threshold, initial_angles, max_iterations)?;
        return res.angles().as_slice().to_vec().convert_to_json_string();
    }
    /// Collision status at the solver's current angles.
    pub fn collision_status(&self) -> Result<CollisionStatus, ArmIKError> {
        let fk_res = self.chain.compute_fk(self.engine.state().angles())?;
        return self.scene.collision_status_from_fk(&fk_res);
    }
    /// The problem as it stands now, current angles included.
    pub fn to_problem(&self) -> Result<ArmIKProblem, ArmIKError> {
        return ArmIKProblem::new(&self.chain, self.engine.state().angles(), &self.scene);
    }
}

/// WASM entry point.  Errors come back to JavaScript as strings.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct ArmIKWasm {
    solver: ArmIKOffloadSolver
}
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl ArmIKWasm {
    #[wasm_bindgen(constructor)]
    pub fn new(problem_json: &str) -> Result<ArmIKWasm, JsValue> {
        let solver = ArmIKOffloadSolver::new_from_json(problem_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { solver })
    }
    pub fn solve(&mut self, target_json: &str, thresh: f64) -> Result<String, JsValue> {
        return self.solver.solve(target_json, thresh).map_err(|e| JsValue::from_str(&e.to_string()));
    }
    pub fn solve_with_conditions(&mut self, target_json: &str, thresh: f64, thetas_json: Option<String>, max_steps: usize) -> Result<String, JsValue> {
        return self.solver.solve_with_conditions(target_json, thresh, thetas_json.as_deref(), max_steps).map_err(|e| JsValue::from_str(&e.to_string()));
    }
    pub fn collision_status(&self) -> Result<String, JsValue> {
        let status = self.solver.collision_status().map_err(|e| JsValue::from_str(&e.to_string()))?;
        return status.convert_to_json_string().map_err(|e| JsValue::from_str(&e.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::arm_modules::arm_description_module::ArmChainDescription;

    fn problem() -> ArmIKProblem {
        let chain = ArmChainDescription::new_default_arm().to_arm_chain(HomogeneousMatrix::new_translation(0.0, 0.0, 0.5)).unwrap();
        let mut scene = ArmCollisionScene::new(&chain).unwrap();
        scene.add_obstacle_from_aabb(&Vector3::new(5.0, 5.0, 0.0), &Vector3::new(7.0, 6.0, 3.0)).unwrap();
        ArmIKProblem::new(&chain, &chain.initial_angles(), &scene).unwrap()
    }

    #[test]
    fn problem_rebuilds_the_same_chain_and_scene() {
        let p = problem();
        let json = p.convert_to_json_string().unwrap();
        let back = ArmIKProblem::new_from_json_string(&json).unwrap();
        assert_eq!(back, p);

        let chain = back.to_arm_chain().unwrap();
        let original = ArmChainDescription::new_default_arm().to_arm_chain(HomogeneousMatrix::new_translation(0.0, 0.0, 0.5)).unwrap();
        assert_eq!(chain.axes(), original.axes());
        assert_eq!(chain.link_lengths(), original.link_lengths());
        assert_relative_eq!(chain.links()[3].width(), 1.2, epsilon = 1e-12);
        assert_eq!(back.to_collision_scene(&chain).unwrap().dump(), ArmCollisionScene::new(&original).map(|mut s| {
            s.add_obstacle_from_aabb(&Vector3::new(5.0, 5.0, 0.0), &Vector3::new(7.0, 6.0, 3.0)).unwrap();
            s
        }).unwrap().dump());
    }

    #[test]
    fn malformed_problem_is_rejected() {
        let mut p = problem();
        p.radii.pop();
        assert!(matches!(p.to_arm_chain(), Err(ArmIKError::MalformedChainError(_))));

        let mut p = problem();
        p.axes[0] = [0.0, 0.7, 0.7];
        assert!(matches!(p.to_arm_chain(), Err(ArmIKError::UnknownAxisError(_))));

        let mut p = problem();
        p.origin.truncate(12);
        assert!(matches!(p.to_arm_chain(), Err(ArmIKError::WrongSizeError(_))));
    }

    #[test]
    fn offload_solver_answers_in_json() {
        let chain = ArmChain::new_from_parameter_arrays(
            HomogeneousMatrix::new_identity(),
            &[JointAxis::Z, JointAxis::Y, JointAxis::Y],
            &[1.0, 4.0, 4.0],
            &[-6.0, -3.0, -3.0],
            &[6.0, 3.0, 3.0]
        ).unwrap();
        let scene = ArmCollisionScene::new(&chain).unwrap();
        let p = ArmIKProblem::new(&chain, &DVector::zeros(3), &scene).unwrap();
        let mut solver = ArmIKOffloadSolver::new_from_json(&p.convert_to_json_string().unwrap()).unwrap();

        let target = chain.compute_fk(&DVector::from_vec(vec![0.3, 0.5, 0.4])).unwrap().end_effector().clone();
        let target_json = target.to_column_major_vec().convert_to_json_string().unwrap();
        let out = solver.solve_with_conditions(&target_json, 1e-6, Some("[0.0, 0.0, 0.0]"), 2000).unwrap();
        let angles = Vec::<f64>::load_from_json_string(&out).unwrap();
        assert_eq!(angles.len(), 3);

        let fk = chain.compute_fk(&DVector::from_vec(angles)).unwrap();
        assert!(solver.engine().loss_fn().loss(fk.end_effector(), &target) <= 1e-6);
        assert_eq!(solver.collision_status().unwrap().is_colliding(), &vec![false, false, false]);

        assert!(solver.solve("[1.0, 2.0]", 1e-6).is_err());
    }
}
