//! Bundled seed document.

use crate::error::RackResult;
use crate::logging::structured::LogContext;

use super::exchange::parse_document;
use super::schema::RackDocument;

const SEED_JSON: &str = include_str!("../../data/rack-data.json");

/// Load the sample rack shipped with the crate.
pub fn seed_document(ctx: &LogContext) -> RackResult<RackDocument> {
    parse_document(SEED_JSON, ctx)
}
