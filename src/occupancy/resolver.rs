//! Occupancy resolution.
//!
//! Walks the placement map in ascending start-unit order and claims every
//! unit each entry covers. The first claim on a unit wins; later
//! overlapping claims are ignored rather than reported, so a corrupt map
//! still resolves. Entries naming equipment missing from the inventory
//! leave their units empty.

use std::collections::HashMap;

use crate::inventory::{Equipment, Inventory};
use crate::rack::config::{span_end, PlacementMap, RackConfig};

/// What covers one rack unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotInfo<'a> {
    pub equipment: &'a Equipment,
    pub start_u: u32,
    /// Lowest unit of the span. Below 1 only for entries that overhang the
    /// rack bottom.
    pub end_u: i64,
    pub is_start: bool,
}

impl<'a> SlotInfo<'a> {
    pub fn equipment_id(&self) -> &'a str {
        &self.equipment.id
    }
}

/// Dense occupancy of units `1..=total_u`.
#[derive(Debug, Clone)]
pub struct Occupancy<'a> {
    total_u: u32,
    // Index `u - 1` holds unit `u`.
    units: Vec<Option<SlotInfo<'a>>>,
}

impl<'a> Occupancy<'a> {
    pub fn resolve(slots: &PlacementMap, inventory: &'a Inventory, total_u: u32) -> Self {
        let by_id: HashMap<&str, &'a Equipment> = inventory
            .equipments
            .iter()
            .map(|e| (e.id.as_str(), e))
            .collect();

        let mut units: Vec<Option<SlotInfo<'a>>> = vec![None; total_u as usize];

        for (&start_u, equipment_id) in slots {
            let Some(&equipment) = by_id.get(equipment_id.as_str()) else {
                continue;
            };
            let end_u = span_end(start_u, equipment.height_u);
            let low = end_u.max(1);
            let high = (start_u as i64).min(total_u as i64);
            for u in low..=high {
                let cell = &mut units[(u - 1) as usize];
                if cell.is_some() {
                    continue;
                }
                *cell = Some(SlotInfo {
                    equipment,
                    start_u,
                    end_u,
                    is_start: u == start_u as i64,
                });
            }
        }

        Self { total_u, units }
    }

    pub fn from_rack(rack: &RackConfig, inventory: &'a Inventory) -> Self {
        Self::resolve(&rack.slots, inventory, rack.total_u)
    }

    pub fn total_u(&self) -> u32 {
        self.total_u
    }

    /// Occupant of unit `u`; `None` for empty or out-of-rack units.
    pub fn get(&self, u: u32) -> Option<&SlotInfo<'a>> {
        if u == 0 {
            return None;
        }
        self.units.get((u - 1) as usize).and_then(|cell| cell.as_ref())
    }

    pub fn is_free(&self, u: u32) -> bool {
        self.get(u).is_none()
    }

    pub fn occupied_count(&self) -> usize {
        self.units.iter().filter(|cell| cell.is_some()).count()
    }

    /// Units from the top of the rack down, as drawn.
    pub fn rows_top_down(&self) -> impl Iterator<Item = (u32, Option<&SlotInfo<'a>>)> + '_ {
        (1..=self.total_u).rev().map(move |u| (u, self.get(u)))
    }

    /// Rebuild the sparse map from the dense view.
    pub fn start_units(&self) -> PlacementMap {
        self.units
            .iter()
            .flatten()
            .filter(|info| info.is_start)
            .map(|info| (info.start_u, info.equipment.id.clone()))
            .collect()
    }

    /// Whether any unit is held by `equipment_id`.
    pub fn holds(&self, equipment_id: &str) -> bool {
        self.units
            .iter()
            .flatten()
            .any(|info| info.equipment.id == equipment_id)
    }
}
