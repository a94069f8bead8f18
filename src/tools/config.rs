pub mod magic_constants;
pub mod self_config;
