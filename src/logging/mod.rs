//! Structured logging with editor session context.
//!
//! Provides logging macros and utilities that include the session id and
//! the current operation in every log message for easy correlation.

pub mod structured;

pub use structured::*;
