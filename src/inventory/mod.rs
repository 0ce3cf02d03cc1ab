//! Inventory module.
//!
//! Equipment and cable definitions, their tag enumerations, and the
//! form-level edit operations.

pub mod models;
pub mod store;
pub mod tags;
pub mod text;

pub use models::*;
pub use store::*;
pub use tags::*;
