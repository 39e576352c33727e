pub mod arm_collision_scene;
