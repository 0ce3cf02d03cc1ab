//! Placement validation.
//!
//! A placement fits when its whole span lies inside the rack and every unit
//! it covers is free or held by one of the ignored equipment ids. Move and
//! swap pass the equipment being moved as ignored so it does not collide
//! with itself.

use std::fmt;

use crate::inventory::Inventory;
use crate::occupancy::resolver::Occupancy;
use crate::rack::config::span_end;

/// Why a candidate placement was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    UnknownEquipment,
    /// Start unit above the top of the rack.
    AboveRack { start_u: u32, total_u: u32 },
    /// Span runs below unit 1.
    BelowRack { end_u: i64 },
    /// A unit in the span is held by another equipment.
    Collision { unit: u32, occupant: String },
}

impl fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRejection::UnknownEquipment => write!(f, "unknown equipment"),
            PlacementRejection::AboveRack { start_u, total_u } => {
                write!(f, "U{} is above the {}U rack", start_u, total_u)
            }
            PlacementRejection::BelowRack { end_u } => {
                write!(f, "span ends at U{} below the rack", end_u)
            }
            PlacementRejection::Collision { unit, occupant } => {
                write!(f, "U{} is held by {}", unit, occupant)
            }
        }
    }
}

/// Checks placements against one occupancy snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PlacementValidator<'o, 'a> {
    occupancy: &'o Occupancy<'a>,
    inventory: &'a Inventory,
}

impl<'o, 'a> PlacementValidator<'o, 'a> {
    pub fn new(occupancy: &'o Occupancy<'a>, inventory: &'a Inventory) -> Self {
        Self {
            occupancy,
            inventory,
        }
    }

    /// Check `height` units starting at `start_u`, ignoring units held by
    /// any id in `ignore`.
    pub fn check_span(
        &self,
        start_u: u32,
        height: u32,
        ignore: &[&str],
    ) -> Result<(), PlacementRejection> {
        let total_u = self.occupancy.total_u();
        if start_u > total_u {
            return Err(PlacementRejection::AboveRack { start_u, total_u });
        }
        let end_u = span_end(start_u, height);
        if end_u < 1 {
            return Err(PlacementRejection::BelowRack { end_u });
        }

        for u in (end_u as u32..=start_u).rev() {
            if let Some(existing) = self.occupancy.get(u) {
                if !ignore.iter().any(|id| *id == existing.equipment_id()) {
                    return Err(PlacementRejection::Collision {
                        unit: u,
                        occupant: existing.equipment.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn check_placement(
        &self,
        equipment_id: &str,
        start_u: u32,
        ignore: &[&str],
    ) -> Result<(), PlacementRejection> {
        let height = self
            .inventory
            .height_of(equipment_id)
            .ok_or(PlacementRejection::UnknownEquipment)?;
        self.check_span(start_u, height, ignore)
    }

    pub fn can_place(&self, equipment_id: &str, start_u: u32, ignore: &[&str]) -> bool {
        self.check_placement(equipment_id, start_u, ignore).is_ok()
    }
}
