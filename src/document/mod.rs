//! Document module.
//!
//! The exchanged JSON document: its shape, bundled seed data, and
//! validated import / pretty-printed export.

pub mod exchange;
pub mod schema;
pub mod seed;

pub use exchange::*;
pub use schema::*;
pub use seed::*;
