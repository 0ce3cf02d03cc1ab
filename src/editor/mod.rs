//! Editor module.
//!
//! Owns the whole editing state and is the only entry point the rendering
//! collaborator needs:
//! - `config` - settings with environment overrides
//! - `context` - session identity for logging
//! - `session` - the editor itself

pub mod config;
pub mod context;
pub mod session;

pub use config::*;
pub use context::*;
pub use session::*;
