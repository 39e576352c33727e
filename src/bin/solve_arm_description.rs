extern crate arm_ik;

use std::env;
use std::path::Path;
use arm_ik::arm_modules::arm_description_module::ArmChainDescription;
use arm_ik::inverse_kinematics::{IKSolverEngine, IKStrategyType, SolveRequest};
use arm_ik::scenes::arm_collision_scene::ArmCollisionScene;
use arm_ik::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;

fn main () {
    let args: Vec<String> = env::args().collect();
    assert!(args.len() == 5 || args.len() == 6, "Arguments must be <chain description json | default> <x> <y> <z> [jacobian]");

    // load the chain description, or use the stock ten-segment arm
    let description = if args[1] == "default" {
        ArmChainDescription::new_default_arm()
    } else {
        ArmChainDescription::new_from_json_file(Path::new(&args[1])).expect("error")
    };
    let chain = description.to_arm_chain(HomogeneousMatrix::new_identity()).expect("error");
    chain.print_summary();

    let coords: Vec<f64> = args[2..5].iter().map(|a| a.parse::<f64>().expect("coordinates must be numbers")).collect();
    let target = HomogeneousMatrix::new_translation(coords[0], coords[1], coords[2]);

    let strategy = if args.len() == 6 && args[5] == "jacobian" {
        IKStrategyType::new_jacobian_transpose_default()
    } else {
        IKStrategyType::new_gradient_descent_default()
    };

    let mut engine = IKSolverEngine::new(strategy, &chain);
    let res = engine.solve(&chain, &SolveRequest::new_with_max_iterations(target, 1e-6, 5000)).expect("error");
    res.print_summary();

    // collision status of the solved pose
    let scene = ArmCollisionScene::new(&chain).expect("error");
    scene.collision_status_from_fk(res.fk_res()).expect("error").print_summary();
}
