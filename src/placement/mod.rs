//! Placement module.
//!
//! Validates candidate placements and resolves drag/drop interactions into
//! placement-map changes:
//! - `validator` - bounds and collision checks against current occupancy
//! - `decision` - drop payload x target decision table
//! - `mutator` - commits accepted plans to a new placement map

pub mod decision;
pub mod mutator;
pub mod validator;

pub use decision::*;
pub use mutator::*;
pub use validator::*;
