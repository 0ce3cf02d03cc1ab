//! Document import and export.
//!
//! Import checks the raw JSON shape before deserializing, and never touches
//! the caller's current document: on any failure the caller simply keeps
//! what it had.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{RackError, RackResult};
use crate::inventory::{MAX_EQUIPMENT_U, MIN_EQUIPMENT_U};
use crate::logging::structured::LogContext;
use crate::occupancy::resolver::Occupancy;
use crate::rack::config::is_valid_height;

use super::schema::RackDocument;

fn malformed(ctx: &LogContext, reason: String) -> RackError {
    log::warn!("{} IMPORT_REJECTED reason={}", ctx, reason);
    RackError::MalformedInput(reason)
}

/// Minimal structural check on the raw value.
fn check_shape(value: &Value) -> Result<(), String> {
    let total_u = value
        .get("rack")
        .and_then(|r| r.get("totalU"))
        .ok_or_else(|| "rack.totalU missing".to_string())?;
    let total_u = total_u
        .as_i64()
        .ok_or_else(|| format!("rack.totalU is not an integer: {}", total_u))?;
    if !is_valid_height(total_u) {
        return Err(format!("rack.totalU out of range: {}", total_u));
    }

    let equipments = value
        .get("equipments")
        .and_then(Value::as_array)
        .ok_or_else(|| "equipments is not an array".to_string())?;
    for (index, equipment) in equipments.iter().enumerate() {
        let height = equipment.get("heightU").and_then(Value::as_i64);
        match height {
            Some(h) if h >= MIN_EQUIPMENT_U as i64 && h <= MAX_EQUIPMENT_U as i64 => {}
            _ => {
                return Err(format!(
                    "equipments[{}].heightU out of range: {}",
                    index,
                    equipment.get("heightU").unwrap_or(&Value::Null)
                ))
            }
        }
    }
    Ok(())
}

/// Parse and validate a document.
pub fn parse_document(raw: &str, ctx: &LogContext) -> RackResult<RackDocument> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| malformed(ctx, format!("JSON parse error: {}", e)))?;

    check_shape(&value).map_err(|reason| malformed(ctx, reason))?;

    let document: RackDocument = serde_json::from_value(value)
        .map_err(|e| malformed(ctx, format!("schema mismatch: {}", e)))?;

    let resolved = Occupancy::from_rack(&document.rack, &document.inventory).start_units();
    if resolved != document.rack.slots {
        log::warn!(
            "{} IMPORT_PLACEMENT_CONFLICTS entries={} resolvable={}",
            ctx,
            document.rack.slots.len(),
            resolved.len()
        );
    }

    log::info!(
        "{} IMPORT_PARSED total_u={} equipments={} cables={} attachments={}",
        ctx,
        document.rack.total_u,
        document.inventory.equipments.len(),
        document.inventory.cables_inventory.len(),
        document.cable_attachments.len()
    );
    Ok(document)
}

/// Pretty-printed JSON export.
pub fn export_document(document: &RackDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// SHA-256 of the compact serialized document, hex encoded.
pub fn fingerprint(document: &RackDocument) -> serde_json::Result<String> {
    let bytes = serde_json::to_vec(document)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Read and validate a document from disk.
pub fn read_document(path: &Path, ctx: &LogContext) -> anyhow::Result<RackDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document = parse_document(&raw, ctx)
        .with_context(|| format!("failed to import {}", path.display()))?;
    Ok(document)
}

/// Write a document to disk as pretty-printed JSON.
pub fn write_document(document: &RackDocument, path: &Path) -> anyhow::Result<()> {
    let payload = export_document(document).context("failed to serialize document")?;
    fs::write(path, payload).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
