//! Placement commits.
//!
//! Builds the next placement map from the current one and an accepted plan.
//! The current map is never edited in place, so a caller that drops the
//! result keeps the old state untouched.

use crate::inventory::EquipmentId;
use crate::rack::config::PlacementMap;

use super::decision::DropPlan;

/// Apply a placement plan. Returns `None` for plans that do not change the
/// placement map (ignored, rejected, or cable attachments).
pub fn commit_placement(slots: &PlacementMap, plan: &DropPlan) -> Option<PlacementMap> {
    let mut next = slots.clone();
    match plan {
        DropPlan::Place {
            equipment_id,
            start_u,
        } => {
            next.retain(|_, id| *id != *equipment_id);
            next.insert(*start_u, equipment_id.clone());
        }
        DropPlan::Move {
            equipment_id,
            from_u,
            to_u,
        } => {
            next.remove(from_u);
            next.insert(*to_u, equipment_id.clone());
        }
        DropPlan::Swap {
            source_id,
            source_start,
            target_id,
            target_start,
        } => {
            next.remove(source_start);
            next.remove(target_start);
            next.insert(*target_start, source_id.clone());
            next.insert(*source_start, target_id.clone());
        }
        DropPlan::Ignore(_) | DropPlan::Attach { .. } | DropPlan::Reject(_) => return None,
    }
    Some(next)
}

/// Take the equipment starting at `start_u` out of the rack.
pub fn remove_placement(slots: &PlacementMap, start_u: u32) -> Option<(PlacementMap, EquipmentId)> {
    let mut next = slots.clone();
    let removed = next.remove(&start_u)?;
    Some((next, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFailure;

    fn map(entries: &[(u32, &str)]) -> PlacementMap {
        entries.iter().map(|(u, id)| (*u, id.to_string())).collect()
    }

    #[test]
    fn test_place_clears_previous_entry() {
        let slots = map(&[(3, "a"), (8, "b")]);
        let plan = DropPlan::Place {
            equipment_id: "a".to_string(),
            start_u: 11,
        };
        let next = commit_placement(&slots, &plan).unwrap();
        assert_eq!(next, map(&[(8, "b"), (11, "a")]));
        assert_eq!(slots, map(&[(3, "a"), (8, "b")]));
    }

    #[test]
    fn test_move_and_swap() {
        let slots = map(&[(5, "a"), (10, "b")]);
        let moved = commit_placement(
            &slots,
            &DropPlan::Move {
                equipment_id: "a".to_string(),
                from_u: 5,
                to_u: 7,
            },
        )
        .unwrap();
        assert_eq!(moved, map(&[(7, "a"), (10, "b")]));

        let swapped = commit_placement(
            &slots,
            &DropPlan::Swap {
                source_id: "a".to_string(),
                source_start: 5,
                target_id: "b".to_string(),
                target_start: 10,
            },
        )
        .unwrap();
        assert_eq!(swapped, map(&[(5, "b"), (10, "a")]));
    }

    #[test]
    fn test_non_placement_plans() {
        let slots = map(&[(5, "a")]);
        assert!(commit_placement(&slots, &DropPlan::Ignore("noop")).is_none());
        assert!(commit_placement(&slots, &DropPlan::Reject(ValidationFailure::SwapBlocked)).is_none());
    }

    #[test]
    fn test_remove_placement() {
        let slots = map(&[(5, "a")]);
        let (next, removed) = remove_placement(&slots, 5).unwrap();
        assert!(next.is_empty());
        assert_eq!(removed, "a");
        assert!(remove_placement(&slots, 4).is_none());
    }
}
