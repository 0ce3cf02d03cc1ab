//! Occupancy module.
//!
//! Derives the dense per-unit view of a rack from its sparse placement map.
//! Rendering, drop validation and cable eligibility all read this view.

pub mod resolver;

pub use resolver::*;
