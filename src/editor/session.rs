//! Rack editor session.
//!
//! Single-threaded owner of the document. Every operation runs to
//! completion: it either replaces the affected state with a fully built
//! successor or leaves everything as it was and reports why.

use std::path::{Path, PathBuf};

use crate::cabling::attachments;
use crate::document::exchange::{
    export_document, fingerprint, parse_document, read_document, write_document,
};
use crate::document::schema::RackDocument;
use crate::document::seed::seed_document;
use crate::error::{RackResult, ValidationFailure};
use crate::inventory::{
    clamp_height, AttachmentId, CableDraft, CableEdit, CableId, Equipment, EquipmentDraft,
    CableAttachment, EquipmentEdit, EquipmentId, Inventory, PortEdit, RearConnection,
};
use crate::occupancy::resolver::Occupancy;
use crate::placement::decision::{plan_drop, DragPayload, DropPlan, ViewMode};
use crate::placement::mutator::{commit_placement, remove_placement};
use crate::placement::validator::PlacementValidator;
use crate::rack::config::{HeightChange, RackConfig};

use super::config::EditorConfig;
use super::context::EditorContext;

/// What a drop changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Placed {
        equipment_id: EquipmentId,
        start_u: u32,
    },
    Moved {
        equipment_id: EquipmentId,
        from_u: u32,
        to_u: u32,
    },
    Swapped {
        source_id: EquipmentId,
        target_id: EquipmentId,
    },
    Attached {
        attachment_id: AttachmentId,
    },
    Unchanged,
}

fn placement_outcome(plan: DropPlan) -> DropOutcome {
    match plan {
        DropPlan::Place {
            equipment_id,
            start_u,
        } => DropOutcome::Placed {
            equipment_id,
            start_u,
        },
        DropPlan::Move {
            equipment_id,
            from_u,
            to_u,
        } => DropOutcome::Moved {
            equipment_id,
            from_u,
            to_u,
        },
        DropPlan::Swap {
            source_id,
            target_id,
            ..
        } => DropOutcome::Swapped {
            source_id,
            target_id,
        },
        _ => DropOutcome::Unchanged,
    }
}

#[derive(Debug)]
pub struct RackEditor {
    ctx: EditorContext,
    config: EditorConfig,
    document: RackDocument,
    view_mode: ViewMode,
}

impl RackEditor {
    pub fn new(document: RackDocument, config: EditorConfig) -> Self {
        Self::open(EditorContext::new(), document, config)
    }

    /// Editor over the bundled sample rack.
    pub fn with_seed(config: EditorConfig) -> RackResult<Self> {
        let ctx = EditorContext::new();
        let document = seed_document(&ctx.op("seed"))?;
        Ok(Self::open(ctx, document, config))
    }

    fn open(ctx: EditorContext, document: RackDocument, config: EditorConfig) -> Self {
        crate::init_logger(config.log_level);
        log::info!(
            "{} SESSION_OPENED opened_at={} total_u={} equipments={}",
            ctx.log_context(),
            ctx.opened_at.to_rfc3339(),
            document.rack.total_u,
            document.inventory.equipments.len()
        );
        Self {
            ctx,
            view_mode: config.initial_view,
            config,
            document,
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &RackDocument {
        &self.document
    }

    pub fn inventory(&self) -> &Inventory {
        &self.document.inventory
    }

    pub fn rack(&self) -> &RackConfig {
        &self.document.rack
    }

    pub fn cable_attachments(&self) -> &[CableAttachment] {
        &self.document.cable_attachments
    }

    pub fn rear_connections(&self) -> &[RearConnection] {
        &self.document.rear_connections
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }


    pub fn occupancy(&self) -> Occupancy<'_> {
        Occupancy::from_rack(&self.document.rack, &self.document.inventory)
    }

    pub fn is_equipment_placed(&self, equipment_id: &str) -> bool {
        self.document.rack.is_placed(equipment_id)
    }

    /// Inventory items not in the rack, in inventory order.
    pub fn unplaced_equipment(&self) -> Vec<&Equipment> {
        self.document
            .inventory
            .equipments
            .iter()
            .filter(|e| !self.document.rack.is_placed(&e.id))
            .collect()
    }

    pub fn can_place(&self, equipment_id: &str, start_u: u32, ignore: &[&str]) -> bool {
        let occupancy = self.occupancy();
        PlacementValidator::new(&occupancy, &self.document.inventory).can_place(
            equipment_id,
            start_u,
            ignore,
        )
    }

    pub fn available_quantity(&self, cable_id: &str) -> u32 {
        attachments::available_quantity(
            &self.document.inventory,
            &self.document.cable_attachments,
            cable_id,
        )
    }

    pub fn attachment_count(&self, equipment_id: &str) -> usize {
        attachments::count_for_equipment(&self.document.cable_attachments, equipment_id)
    }


    /// Resolve a drop of `payload` on unit `target_u`.
    ///
    /// Rejections leave the document unchanged and carry the notice to show.
    pub fn drop_payload(&mut self, payload: &DragPayload, target_u: u32) -> RackResult<DropOutcome> {
        let ctx = self.ctx.op("drop");
        let plan = plan_drop(
            &self.document.rack,
            &self.document.inventory,
            self.view_mode,
            payload,
            target_u,
            &ctx,
        );

        match plan {
            DropPlan::Ignore(reason) => {
                crate::log_debug!(ctx, "DROP_IGNORED", kind = payload.kind(), reason = reason);
                Ok(DropOutcome::Unchanged)
            }
            DropPlan::Reject(failure) => {
                crate::log_warn!(
                    ctx,
                    "DROP_REJECTED",
                    kind = payload.kind(),
                    target_u = target_u,
                    notice = failure.to_string()
                );
                Err(failure.into())
            }
            DropPlan::Attach {
                cable_id,
                equipment_id,
            } => {
                let attachment_id = attachments::attach(
                    &self.document.inventory,
                    &mut self.document.cable_attachments,
                    &cable_id,
                    &equipment_id,
                    &ctx,
                )?;
                Ok(DropOutcome::Attached { attachment_id })
            }
            placement => {
                let Some(next) = commit_placement(&self.document.rack.slots, &placement) else {
                    return Ok(DropOutcome::Unchanged);
                };
                self.document.rack.slots = next;
                crate::log_info!(
                    ctx,
                    "DROP_COMMITTED",
                    plan = placement.as_str(),
                    target_u = target_u
                );
                Ok(placement_outcome(placement))
            }
        }
    }

    /// Resolve a drop from raw drag event data. Unreadable data is ignored.
    pub fn drop_raw(&mut self, raw: &str, target_u: u32) -> RackResult<DropOutcome> {
        match DragPayload::parse(raw) {
            Some(payload) => self.drop_payload(&payload, target_u),
            None => {
                log::debug!("{} DROP_PAYLOAD_UNREADABLE", self.ctx.op("drop"));
                Ok(DropOutcome::Unchanged)
            }
        }
    }

    /// Take the equipment starting at `start_u` out of the rack.
    pub fn remove_from_rack(&mut self, start_u: u32) -> Option<EquipmentId> {
        let (next, removed) = remove_placement(&self.document.rack.slots, start_u)?;
        self.document.rack.slots = next;
        log::info!(
            "{} EQUIPMENT_UNRACKED equipment={} start_u={}",
            self.ctx.op("unrack"),
            removed,
            start_u
        );
        Some(removed)
    }


    /// Change the rack height; `None` when the value is out of range.
    pub fn set_rack_height(&mut self, value: i64) -> Option<HeightChange> {
        let ctx = self.ctx.op("set_height");
        let mut rack = self.document.rack.clone();
        let change = rack.set_height(value, &self.document.inventory, &ctx)?;
        self.document.rack = rack;
        Some(change)
    }


    pub fn add_equipment(&mut self, draft: EquipmentDraft) -> RackResult<EquipmentId> {
        let ctx = self.ctx.op("add_equipment");
        self.document.inventory.add_equipment(draft, &ctx)
    }

    /// Apply a field edit. A height change on placed equipment must still
    /// fit at its current start unit.
    pub fn update_equipment(&mut self, equipment_id: &str, edit: EquipmentEdit) -> RackResult<()> {
        if let EquipmentEdit::Height(value) = edit {
            if let Some(start_u) = self.document.rack.start_of(equipment_id) {
                let height = clamp_height(value);
                let occupancy = self.occupancy();
                let validator = PlacementValidator::new(&occupancy, &self.document.inventory);
                if let Err(rejection) = validator.check_span(start_u, height, &[equipment_id]) {
                    let name = self
                        .document
                        .inventory
                        .equipment(equipment_id)
                        .map(|e| e.display_name().to_string())
                        .unwrap_or_else(|| equipment_id.to_string());
                    log::warn!(
                        "{} RESIZE_REJECTED equipment={} height={} reason={}",
                        self.ctx.op("update_equipment"),
                        equipment_id,
                        height,
                        rejection
                    );
                    return Err(ValidationFailure::ResizeBlocked {
                        name,
                        height,
                        start_u,
                    }
                    .into());
                }
            }
        }
        self.document.inventory.apply_equipment_edit(equipment_id, edit)
    }

    pub fn add_port_profile(&mut self, equipment_id: &str) -> RackResult<()> {
        self.document.inventory.add_port_profile(equipment_id)
    }

    pub fn update_port_profile(
        &mut self,
        equipment_id: &str,
        index: usize,
        edit: PortEdit,
    ) -> RackResult<()> {
        self.document
            .inventory
            .update_port_profile(equipment_id, index, edit)
    }

    pub fn remove_port_profile(&mut self, equipment_id: &str, index: usize) -> RackResult<()> {
        self.document
            .inventory
            .remove_port_profile(equipment_id, index)
    }

    pub fn add_cable(&mut self, draft: CableDraft) -> RackResult<CableId> {
        let ctx = self.ctx.op("add_cable");
        self.document.inventory.add_cable(draft, &ctx)
    }

    pub fn update_cable(&mut self, cable_id: &str, edit: CableEdit) -> RackResult<()> {
        self.document.inventory.update_cable(cable_id, edit)
    }


    pub fn attach_cable(&mut self, cable_id: &str, equipment_id: &str) -> RackResult<AttachmentId> {
        let ctx = self.ctx.op("attach");
        attachments::attach(
            &self.document.inventory,
            &mut self.document.cable_attachments,
            cable_id,
            equipment_id,
            &ctx,
        )
    }

    pub fn remove_attachment(&mut self, attachment_id: &str) -> bool {
        let removed = attachments::remove(&mut self.document.cable_attachments, attachment_id);
        log::info!(
            "{} CABLE_DETACHED id={} removed={}",
            self.ctx.op("detach"),
            attachment_id,
            removed
        );
        removed
    }


    /// Replace the whole document with `raw`, or keep the current one and
    /// report "Invalid JSON file."
    pub fn import_json(&mut self, raw: &str) -> RackResult<()> {
        let ctx = self.ctx.op("import");
        let document = parse_document(raw, &ctx)?;
        self.document = document;
        log::info!("{} DOCUMENT_REPLACED", ctx);
        Ok(())
    }

    pub fn export_json(&self) -> serde_json::Result<String> {
        export_document(&self.document)
    }

    pub fn fingerprint(&self) -> serde_json::Result<String> {
        fingerprint(&self.document)
    }

    pub fn import_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let ctx = self.ctx.op("import");
        let document = read_document(path, &ctx)?;
        self.document = document;
        log::info!("{} DOCUMENT_REPLACED path={}", ctx, path.display());
        Ok(())
    }

    /// Write the document into `dir` under the configured export name.
    pub fn export_to_dir(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(&self.config.export_file_name);
        write_document(&self.document, &path)?;
        log::info!(
            "{} DOCUMENT_EXPORTED path={}",
            self.ctx.op("export"),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> RackEditor {
        RackEditor::with_seed(EditorConfig::default()).unwrap()
    }

    #[test]
    fn test_seed_editor_queries() {
        let editor = editor();
        assert_eq!(editor.view_mode(), ViewMode::Front);
        assert!(editor.is_equipment_placed("eq-blade"));
        let unplaced: Vec<&str> = editor
            .unplaced_equipment()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(unplaced, vec!["eq-storage-shelf"]);
        assert_eq!(editor.available_quantity("cb-dac-25g-3m"), 10);
        assert_eq!(editor.attachment_count("eq-netapp"), 2);
        assert_eq!(editor.cable_attachments().len(), 2);
        assert_eq!(editor.rear_connections().len(), 5);
        assert!(editor.occupancy().get(20).is_some());
    }

    #[test]
    fn test_drop_inventory_item() {
        let mut editor = editor();
        let payload = DragPayload::Inventory {
            equipment_id: "eq-storage-shelf".to_string(),
        };
        let outcome = editor.drop_payload(&payload, 35).unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Placed {
                equipment_id: "eq-storage-shelf".to_string(),
                start_u: 35
            }
        );
        assert_eq!(editor.rack().start_of("eq-storage-shelf"), Some(35));
        assert!(editor.unplaced_equipment().is_empty());
    }

    #[test]
    fn test_rejected_drop_keeps_state() {
        let mut editor = editor();
        let before = editor.document().clone();
        let payload = DragPayload::Inventory {
            equipment_id: "eq-storage-shelf".to_string(),
        };
        let err = editor.drop_payload(&payload, 16).unwrap_err();
        assert_eq!(
            err.notice(),
            "Cannot place Disk Shelf: not enough contiguous 2U space."
        );
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_unreadable_payload_is_ignored() {
        let mut editor = editor();
        let before = editor.document().clone();
        assert_eq!(editor.drop_raw("{oops", 10).unwrap(), DropOutcome::Unchanged);
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_cable_drop_requires_rear_view() {
        let mut editor = editor();
        let raw = r#"{"kind":"cable","cableId":"cb-aoc-100g-5m"}"#;
        assert_eq!(editor.drop_raw(raw, 25).unwrap(), DropOutcome::Unchanged);
        assert_eq!(editor.attachment_count("eq-blade"), 0);

        editor.set_view_mode(ViewMode::Rear);
        let outcome = editor.drop_raw(raw, 25).unwrap();
        assert!(matches!(outcome, DropOutcome::Attached { .. }));
        assert_eq!(editor.attachment_count("eq-blade"), 1);
        assert_eq!(editor.available_quantity("cb-aoc-100g-5m"), 3);

        // Interior unit of the blade chassis is not a drop target.
        assert_eq!(editor.drop_raw(raw, 20).unwrap(), DropOutcome::Unchanged);
    }

    #[test]
    fn test_resize_placed_equipment() {
        let mut editor = editor();
        // eq-ats sits at U5 directly on top of eq-ups-b (U3-U4).
        let err = editor
            .update_equipment("eq-ats", EquipmentEdit::Height(2))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(editor.inventory().height_of("eq-ats"), Some(1));

        // Unplaced equipment resizes freely.
        editor
            .update_equipment("eq-storage-shelf", EquipmentEdit::Height(4))
            .unwrap();
        assert_eq!(editor.inventory().height_of("eq-storage-shelf"), Some(4));

        // Growing downwards into free space is fine: netapp 14-15, free 6-13.
        editor
            .update_equipment("eq-netapp", EquipmentEdit::Height(4))
            .unwrap();
        assert_eq!(editor.inventory().height_of("eq-netapp"), Some(4));
    }

    #[test]
    fn test_remove_from_rack_and_detach() {
        let mut editor = editor();
        assert_eq!(editor.remove_from_rack(42), Some("eq-mgmt".to_string()));
        assert_eq!(editor.remove_from_rack(42), None);
        assert!(!editor.is_equipment_placed("eq-mgmt"));

        assert!(editor.remove_attachment("att-seed-1"));
        assert_eq!(editor.available_quantity("cb-dac-25g-3m"), 11);
    }

    #[test]
    fn test_set_rack_height_rejects_out_of_range() {
        let mut editor = editor();
        let before = editor.document().clone();
        assert!(editor.set_rack_height(8).is_none());
        assert!(editor.set_rack_height(61).is_none());
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_import_rejects_zero_height_equipment() {
        let mut editor = editor();
        let before = editor.document().clone();
        let raw = r#"{
            "rack": {"totalU": 12, "slots": {"5": "z"}},
            "equipments": [
                {"id": "z", "name": "Blank", "heightU": 0},
                {"id": "a", "name": "Switch", "heightU": 1}
            ]
        }"#;
        let err = editor.import_json(raw).unwrap_err();
        assert_eq!(err.notice(), "Invalid JSON file.");
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_export_to_dir_uses_configured_name() {
        let dir = tempfile::tempdir().unwrap();
        let editor = editor();
        let path = editor.export_to_dir(dir.path()).unwrap();
        assert!(path.ends_with("rack-layout.json"));

        let mut other = RackEditor::new(RackDocument::empty("Blank", 12), EditorConfig::default());
        other.import_file(&path).unwrap();
        assert_eq!(other.document(), editor.document());
    }
}
