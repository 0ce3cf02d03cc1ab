//! Drop decision logic.
//!
//! Maps a drag payload and a target unit to a plan. Planning never mutates;
//! the plan is either committed whole or rejected whole.

use serde::{Deserialize, Serialize};

use crate::error::ValidationFailure;
use crate::inventory::{CableId, EquipmentId, Inventory};
use crate::logging::structured::LogContext;
use crate::occupancy::resolver::Occupancy;
use crate::rack::config::{span_end, RackConfig};

use super::validator::PlacementValidator;

/// Which face of the rack is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Front,
    /// Exposes cable attachment drop targets.
    Rear,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Front => "front",
            ViewMode::Rear => "rear",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "front" => Some(ViewMode::Front),
            "rear" => Some(ViewMode::Rear),
            _ => None,
        }
    }
}

/// What is being dragged, as carried in the drag event data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragPayload {
    /// A unit of already-placed equipment.
    Slot {
        #[serde(rename = "sourceU")]
        source_u: u32,
    },
    /// An equipment item from the inventory list.
    Inventory {
        #[serde(rename = "equipmentId")]
        equipment_id: EquipmentId,
    },
    Cable {
        #[serde(rename = "cableId")]
        cable_id: CableId,
    },
}

impl DragPayload {
    /// Parse drag event data. Unreadable data yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DragPayload::Slot { .. } => "slot",
            DragPayload::Inventory { .. } => "inventory",
            DragPayload::Cable { .. } => "cable",
        }
    }
}

/// Outcome of planning a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    /// Nothing to do; the reason is for logs only.
    Ignore(&'static str),
    /// Put an inventory item at `start_u`, clearing any earlier placement.
    Place {
        equipment_id: EquipmentId,
        start_u: u32,
    },
    Move {
        equipment_id: EquipmentId,
        from_u: u32,
        to_u: u32,
    },
    Swap {
        source_id: EquipmentId,
        source_start: u32,
        target_id: EquipmentId,
        target_start: u32,
    },
    Attach {
        cable_id: CableId,
        equipment_id: EquipmentId,
    },
    Reject(ValidationFailure),
}

impl DropPlan {
    pub fn as_str(&self) -> &str {
        match self {
            DropPlan::Ignore(_) => "ignore",
            DropPlan::Place { .. } => "place",
            DropPlan::Move { .. } => "move",
            DropPlan::Swap { .. } => "swap",
            DropPlan::Attach { .. } => "attach",
            DropPlan::Reject(_) => "reject",
        }
    }
}

fn spans_overlap(a_start: u32, a_height: u32, b_start: u32, b_height: u32) -> bool {
    let low = span_end(a_start, a_height).max(span_end(b_start, b_height));
    let high = a_start.min(b_start) as i64;
    low <= high
}

/// Decide what a drop of `payload` on unit `target_u` does.
///
/// # Decision Table
/// 1. inventory(eq) -> Place if `eq` fits at the target, else Reject
/// 2. slot on an empty unit -> Move if the source equipment fits, else Reject
/// 3. slot on another equipment -> Swap if both fit at each other's start, else Reject
/// 4. slot on itself -> Ignore
/// 5. cable on a start unit in rear view -> Attach
/// 6. anything else -> Ignore
pub fn plan_drop(
    rack: &RackConfig,
    inventory: &Inventory,
    view: ViewMode,
    payload: &DragPayload,
    target_u: u32,
    ctx: &LogContext,
) -> DropPlan {
    let occupancy = Occupancy::from_rack(rack, inventory);
    let validator = PlacementValidator::new(&occupancy, inventory);
    let target = occupancy.get(target_u);

    let plan = match payload {
        DragPayload::Cable { cable_id } => match target {
            Some(info) if view == ViewMode::Rear && info.is_start => DropPlan::Attach {
                cable_id: cable_id.clone(),
                equipment_id: info.equipment.id.clone(),
            },
            _ => DropPlan::Ignore("cable target is not a rear start unit"),
        },

        DragPayload::Inventory { equipment_id } => match inventory.equipment(equipment_id) {
            None => DropPlan::Ignore("unknown equipment"),
            Some(equipment) => match validator.check_placement(equipment_id, target_u, &[]) {
                Ok(()) => DropPlan::Place {
                    equipment_id: equipment_id.clone(),
                    start_u: target_u,
                },
                Err(rejection) => {
                    log::debug!(
                        "{} PLACEMENT_REJECTED equipment={} target_u={} reason={}",
                        ctx,
                        equipment_id,
                        target_u,
                        rejection
                    );
                    DropPlan::Reject(ValidationFailure::InsufficientSpace {
                        name: equipment.display_name().to_string(),
                        height: equipment.height_u,
                    })
                }
            },
        },

        DragPayload::Slot { source_u } => match (occupancy.get(*source_u), target) {
            (None, _) => DropPlan::Ignore("nothing placed at source"),

            (Some(source), None) => {
                let source_id = source.equipment_id();
                match validator.check_placement(source_id, target_u, &[source_id]) {
                    Ok(()) => DropPlan::Move {
                        equipment_id: source_id.to_string(),
                        from_u: source.start_u,
                        to_u: target_u,
                    },
                    Err(rejection) => {
                        log::debug!(
                            "{} MOVE_REJECTED equipment={} target_u={} reason={}",
                            ctx,
                            source_id,
                            target_u,
                            rejection
                        );
                        DropPlan::Reject(ValidationFailure::MoveBlocked)
                    }
                }
            }

            (Some(source), Some(dest)) => {
                let source_id = source.equipment_id();
                let target_id = dest.equipment_id();
                if source_id == target_id {
                    DropPlan::Ignore("dropped on itself")
                } else {
                    let ignore = [source_id, target_id];
                    let source_fits = validator.can_place(source_id, dest.start_u, &ignore);
                    let target_fits = validator.can_place(target_id, source.start_u, &ignore);
                    // Each fits alone; the swapped spans must not collide with each other.
                    let clash = spans_overlap(
                        dest.start_u,
                        source.equipment.height_u,
                        source.start_u,
                        dest.equipment.height_u,
                    );
                    if source_fits && target_fits && !clash {
                        DropPlan::Swap {
                            source_id: source_id.to_string(),
                            source_start: source.start_u,
                            target_id: target_id.to_string(),
                            target_start: dest.start_u,
                        }
                    } else {
                        log::debug!(
                            "{} SWAP_REJECTED source={} target={} source_fits={} target_fits={} clash={}",
                            ctx,
                            source_id,
                            target_id,
                            source_fits,
                            target_fits,
                            clash
                        );
                        DropPlan::Reject(ValidationFailure::SwapBlocked)
                    }
                }
            }
        },
    };

    log::debug!(
        "{} DROP_PLANNED kind={} target_u={} view={} plan={}",
        ctx,
        payload.kind(),
        target_u,
        view.as_str(),
        plan.as_str()
    );
    plan
}
