//! `arm_ik` solves inverse kinematics for serial-link robotic arms and checks the resulting poses
//! for self- and obstacle-collisions.
//!
//! A chain of revolute joints and box-shaped links is described once (see
//! [`arm_modules::arm_chain_module::ArmChain`] or the JSON chain description in
//! [`arm_modules::arm_description_module`]).  An [`inverse_kinematics::IKSolverEngine`] then drives
//! the joint angles toward a target end-effector pose with one of two interchangeable strategies,
//! finite-difference gradient descent with momentum or a numerical Jacobian transpose.  The solved
//! forward transforms feed [`scenes::arm_collision_scene::ArmCollisionScene`], which reports which
//! links touch a non-adjacent link or an obstacle.
//!
//! The whole problem can also be serialized through
//! [`arm_modules::arm_offload_module::ArmIKProblem`] and solved behind a JSON boundary, which is how
//! the WebAssembly build is used.

pub mod arm_modules;
pub mod inverse_kinematics;
pub mod scenes;
pub mod utils;
