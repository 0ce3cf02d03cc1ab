//! Rackplan Core - Rack layout placement engine
//!
//! This crate provides the editing core for data-center rack layout
//! planning: placing equipment into numbered rack units, tracking port and
//! cable inventory, and recording rear-side cable attachments. The
//! implementation prioritizes:
//!
//! 1. **Invariants** - A rejected operation never leaves partial state
//! 2. **Logging** - Every decision point logged with session context
//! 3. **Sparse storage** - Placements keyed by start unit, occupancy derived
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `editor` - Session owning the document, entry point for callers
//! - `occupancy` - Dense per-unit view derived from the placement map
//! - `placement` - Placement validation and drag/drop resolution
//! - `cabling` - Cable availability and attachments
//! - `rack` - Rack height and height-reduction pruning
//! - `inventory` - Equipment and cable definitions
//! - `document` - JSON import/export and seed data
//! - `logging` - Structured logging with session context

pub mod cabling;
pub mod document;
pub mod editor;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod occupancy;
pub mod placement;
pub mod rack;

pub use document::RackDocument;
pub use editor::{DropOutcome, EditorConfig, RackEditor};
pub use error::{RackError, RackResult, ValidationFailure};
pub use placement::{DragPayload, ViewMode};

/// Initialize the process-wide logger and cap it at `level`.
///
/// The logger is installed once; later calls only move the level cap.
pub fn init_logger(level: log::LevelFilter) {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .format_timestamp_millis()
        .try_init();
    log::set_max_level(level);
}
