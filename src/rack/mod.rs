//! Rack configuration module.
//!
//! Total rack height, the sparse placement map, and height-reduction
//! pruning.

pub mod config;

pub use config::*;
