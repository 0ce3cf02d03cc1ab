//! Cable attachment module.
//!
//! Tracks how much of each cable definition's stock is attached to placed
//! equipment.

pub mod attachments;

pub use attachments::*;
