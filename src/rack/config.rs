//! Rack height and placement map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::inventory::{EquipmentId, Inventory};
use crate::logging::structured::LogContext;

pub const MIN_RACK_U: u32 = 12;
pub const MAX_RACK_U: u32 = 60;

/// Start unit -> equipment id. Only the top unit of each placed equipment
/// has an entry; the units below it are derived from the height.
pub type PlacementMap = BTreeMap<u32, EquipmentId>;

/// Lowest unit covered by equipment of `height` starting at `start_u`.
/// Negative or zero when the span runs below the rack.
pub fn span_end(start_u: u32, height: u32) -> i64 {
    start_u as i64 - height as i64 + 1
}

/// Whether `height` units starting at `start_u` fit inside a rack of `total_u`.
pub fn span_fits(start_u: u32, height: u32, total_u: u32) -> bool {
    start_u <= total_u && span_end(start_u, height) >= 1
}

pub fn is_valid_height(value: i64) -> bool {
    value >= MIN_RACK_U as i64 && value <= MAX_RACK_U as i64
}

/// Parse a height typed into a form field. Non-integers yield `None`.
pub fn parse_height(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RackConfig {
    pub total_u: u32,
    #[serde(default)]
    pub slots: PlacementMap,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A placement removed because it no longer fit after a height change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedPlacement {
    pub start_u: u32,
    pub equipment_id: EquipmentId,
}

/// Result of an accepted height change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightChange {
    pub previous_u: u32,
    pub total_u: u32,
    pub pruned: Vec<PrunedPlacement>,
}

impl RackConfig {
    pub fn new(total_u: u32) -> Self {
        Self {
            total_u,
            slots: PlacementMap::new(),
            extra: Map::new(),
        }
    }

    /// Start unit of `equipment_id`, if placed.
    pub fn start_of(&self, equipment_id: &str) -> Option<u32> {
        self.slots
            .iter()
            .find(|(_, id)| id.as_str() == equipment_id)
            .map(|(u, _)| *u)
    }

    pub fn is_placed(&self, equipment_id: &str) -> bool {
        self.start_of(equipment_id).is_some()
    }

    /// Change the rack height, dropping every placement that no longer fits.
    ///
    /// Returns `None` and leaves the rack untouched when `value` is outside
    /// [`MIN_RACK_U`, `MAX_RACK_U`]. Pruned equipment becomes unplaced; it is
    /// never relocated. Entries naming unknown equipment are dropped too.
    pub fn set_height(
        &mut self,
        value: i64,
        inventory: &Inventory,
        ctx: &LogContext,
    ) -> Option<HeightChange> {
        if !is_valid_height(value) {
            log::debug!("{} RACK_HEIGHT_REJECTED value={}", ctx, value);
            return None;
        }
        let total_u = value as u32;

        let mut next_slots = PlacementMap::new();
        let mut pruned = Vec::new();
        for (&start_u, equipment_id) in &self.slots {
            let fits = inventory
                .height_of(equipment_id)
                .map(|height| span_fits(start_u, height, total_u))
                .unwrap_or(false);
            if fits {
                next_slots.insert(start_u, equipment_id.clone());
            } else {
                pruned.push(PrunedPlacement {
                    start_u,
                    equipment_id: equipment_id.clone(),
                });
            }
        }

        let change = HeightChange {
            previous_u: self.total_u,
            total_u,
            pruned,
        };
        self.total_u = total_u;
        self.slots = next_slots;

        if change.pruned.is_empty() {
            log::info!(
                "{} RACK_HEIGHT_CHANGED from={} to={}",
                ctx,
                change.previous_u,
                total_u
            );
        } else {
            log::warn!(
                "{} RACK_HEIGHT_CHANGED from={} to={} pruned={:?}",
                ctx,
                change.previous_u,
                total_u,
                change.pruned
            );
        }
        Some(change)
    }
}
