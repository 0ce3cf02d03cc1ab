//! Cable availability and attachment records.

use serde_json::Map;
use uuid::Uuid;

use crate::error::{RackResult, ValidationFailure};
use crate::inventory::{AttachmentId, CableAttachment, Inventory};
use crate::logging::structured::LogContext;

/// Stock of `cable_id` not yet attached. Zero for unknown cables.
pub fn available_quantity(
    inventory: &Inventory,
    attachments: &[CableAttachment],
    cable_id: &str,
) -> u32 {
    let Some(cable) = inventory.cable(cable_id) else {
        return 0;
    };
    let used = attachments.iter().filter(|a| a.cable_id == cable_id).count();
    cable.quantity.saturating_sub(used.min(u32::MAX as usize) as u32)
}

/// Attach one cable of `cable_id` to `equipment_id`.
///
/// Fails without touching `attachments` when no stock is left.
pub fn attach(
    inventory: &Inventory,
    attachments: &mut Vec<CableAttachment>,
    cable_id: &str,
    equipment_id: &str,
    ctx: &LogContext,
) -> RackResult<AttachmentId> {
    let available = available_quantity(inventory, attachments, cable_id);
    if available == 0 {
        log::info!(
            "{} CABLE_ATTACH_REJECTED cable={} equipment={} available=0",
            ctx,
            cable_id,
            equipment_id
        );
        return Err(ValidationFailure::CableExhausted.into());
    }

    let id = format!("att-{}", Uuid::new_v4());
    attachments.push(CableAttachment {
        id: id.clone(),
        cable_id: cable_id.to_string(),
        equipment_id: equipment_id.to_string(),
        extra: Map::new(),
    });

    log::info!(
        "{} CABLE_ATTACHED id={} cable={} equipment={} remaining={}",
        ctx,
        id,
        cable_id,
        equipment_id,
        available - 1
    );
    Ok(id)
}

/// Delete an attachment. Returns whether one was removed.
pub fn remove(attachments: &mut Vec<CableAttachment>, attachment_id: &str) -> bool {
    let before = attachments.len();
    attachments.retain(|a| a.id != attachment_id);
    attachments.len() != before
}

pub fn count_for_equipment(attachments: &[CableAttachment], equipment_id: &str) -> usize {
    attachments
        .iter()
        .filter(|a| a.equipment_id == equipment_id)
        .count()
}
