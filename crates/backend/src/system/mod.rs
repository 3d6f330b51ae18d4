pub mod component_patch;
pub mod tracing;
