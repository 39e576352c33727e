pub mod arm_chain_module;
pub mod arm_description_module;
pub mod arm_offload_module;
