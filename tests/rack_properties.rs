//! End-to-end behaviour of the editor through its public interface.

use rackplan_core::inventory::{CableDraft, EquipmentDraft};
use rackplan_core::occupancy::Occupancy;
use rackplan_core::{DragPayload, DropOutcome, EditorConfig, RackDocument, RackEditor, ViewMode};

fn blank_editor(total_u: u32) -> RackEditor {
    RackEditor::new(RackDocument::empty("Test rack", total_u), EditorConfig::default())
}

fn add(editor: &mut RackEditor, name: &str, height_u: i64) -> String {
    editor
        .add_equipment(EquipmentDraft {
            name: name.to_string(),
            height_u,
            ..Default::default()
        })
        .unwrap()
}

fn place(editor: &mut RackEditor, equipment_id: &str, start_u: u32) {
    let payload = DragPayload::Inventory {
        equipment_id: equipment_id.to_string(),
    };
    editor.drop_payload(&payload, start_u).unwrap();
}

fn slot(source_u: u32) -> DragPayload {
    DragPayload::Slot { source_u }
}

#[test]
fn drop_on_own_start_unit_is_noop() {
    let mut editor = blank_editor(12);
    let a = add(&mut editor, "A", 3);
    place(&mut editor, &a, 8);
    let before = editor.fingerprint().unwrap();

    for target in 6..=8 {
        assert_eq!(
            editor.drop_payload(&slot(8), target).unwrap(),
            DropOutcome::Unchanged
        );
    }
    assert_eq!(editor.fingerprint().unwrap(), before);
}

#[test]
fn swap_of_different_heights_succeeds_when_both_fit() {
    let mut editor = blank_editor(12);
    let a = add(&mut editor, "A", 2);
    let b = add(&mut editor, "B", 1);
    place(&mut editor, &a, 5);
    place(&mut editor, &b, 10);

    let outcome = editor.drop_payload(&slot(5), 10).unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Swapped {
            source_id: a.clone(),
            target_id: b.clone()
        }
    );
    assert_eq!(editor.rack().start_of(&a), Some(10));
    assert_eq!(editor.rack().start_of(&b), Some(5));

    let occupancy = editor.occupancy();
    assert_eq!(occupancy.get(9).unwrap().equipment_id(), a);
    assert!(occupancy.get(4).is_none());
}

#[test]
fn failed_swap_leaves_map_unchanged() {
    let mut editor = blank_editor(12);
    let a = add(&mut editor, "A", 2);
    let b = add(&mut editor, "B", 1);
    let c = add(&mut editor, "C", 1);
    place(&mut editor, &a, 2);
    place(&mut editor, &c, 11);
    place(&mut editor, &b, 12);
    let slots_before = editor.rack().slots.clone();

    let err = editor.drop_payload(&slot(1), 12).unwrap_err();
    assert_eq!(
        err.notice(),
        "Swap cannot be done due to height/space constraints."
    );
    assert_eq!(editor.rack().slots, slots_before);
}

#[test]
fn failed_move_leaves_map_unchanged() {
    let mut editor = blank_editor(12);
    let a = add(&mut editor, "A", 4);
    let b = add(&mut editor, "B", 1);
    place(&mut editor, &a, 12);
    place(&mut editor, &b, 3);
    let slots_before = editor.rack().slots.clone();

    let err = editor.drop_payload(&slot(10), 4).unwrap_err();
    assert_eq!(
        err.notice(),
        "Cannot move equipment there: not enough contiguous free U space."
    );
    assert_eq!(editor.rack().slots, slots_before);

    let outcome = editor.drop_payload(&slot(10), 7).unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Moved {
            equipment_id: a,
            from_u: 12,
            to_u: 7
        }
    );
}

#[test]
fn cable_quantity_limits_attachments() {
    let mut editor = blank_editor(12);
    let a = add(&mut editor, "A", 1);
    place(&mut editor, &a, 6);
    let cable = editor
        .add_cable(CableDraft {
            name: "SFP28 DAC".to_string(),
            quantity: 3,
            ..Default::default()
        })
        .unwrap();

    editor.attach_cable(&cable, &a).unwrap();
    editor.attach_cable(&cable, &a).unwrap();
    assert_eq!(editor.available_quantity(&cable), 1);

    editor.set_view_mode(ViewMode::Rear);
    let payload = DragPayload::Cable {
        cable_id: cable.clone(),
    };
    assert!(matches!(
        editor.drop_payload(&payload, 6).unwrap(),
        DropOutcome::Attached { .. }
    ));
    assert_eq!(editor.available_quantity(&cable), 0);

    let err = editor.drop_payload(&payload, 6).unwrap_err();
    assert_eq!(err.notice(), "No remaining cable quantity for this item.");
    assert_eq!(editor.attachment_count(&a), 3);
}

#[test]
fn height_reduction_prunes_only_overflowing_entries() {
    let mut editor = blank_editor(42);
    let low = add(&mut editor, "Low", 2);
    let edge = add(&mut editor, "Edge", 3);
    let high = add(&mut editor, "High", 1);
    let tall = add(&mut editor, "Tall", 4);
    place(&mut editor, &low, 4);
    place(&mut editor, &edge, 20);
    place(&mut editor, &high, 21);
    place(&mut editor, &tall, 40);

    let change = editor.set_rack_height(20).unwrap();
    assert_eq!(change.pruned.len(), 2);
    assert_eq!(editor.rack().total_u, 20);
    assert_eq!(editor.rack().start_of(&low), Some(4));
    assert_eq!(editor.rack().start_of(&edge), Some(20));
    assert!(!editor.is_equipment_placed(&high));
    assert!(!editor.is_equipment_placed(&tall));

    let occupancy = editor.occupancy();
    assert_eq!(occupancy.total_u(), 20);
    assert_eq!(occupancy.start_units(), editor.rack().slots);
    assert_eq!(occupancy.get(18).unwrap().equipment_id(), edge);
    assert!(!occupancy.get(18).unwrap().is_start);
    assert_eq!(occupancy.occupied_count(), 5);
}

#[test]
fn invalid_import_keeps_prior_state() {
    let mut editor = RackEditor::with_seed(EditorConfig::default()).unwrap();
    let before = editor.fingerprint().unwrap();

    let bad = [
        r#"{"rack":{"totalU":0},"equipments":[]}"#,
        r#"{"rack":{"totalU":42,"slots":{}}}"#,
        "[]",
    ];
    for raw in bad {
        let err = editor.import_json(raw).unwrap_err();
        assert_eq!(err.notice(), "Invalid JSON file.");
        assert_eq!(editor.fingerprint().unwrap(), before);
    }
}

#[test]
fn valid_import_replaces_every_collection() {
    let mut editor = RackEditor::with_seed(EditorConfig::default()).unwrap();
    let raw = r#"{
        "title": "Edge site",
        "subtitle": "Closet",
        "rack": {"totalU": 12, "slots": {"12": "eq-fw"}},
        "equipments": [
            {"id": "eq-fw", "name": "Firewall", "heightU": 1, "type": "appliance",
             "ports": [{"count": 8, "portType": "1GbaseT"}]}
        ],
        "cablesInventory": [
            {"id": "cb-1", "name": "Cat6", "quantity": 2, "portType1": "1GbaseT",
             "portType2": "1GbaseT", "cableType": "copper", "speed": "1G", "length": "1m"}
        ],
        "cableAttachments": [{"id": "att-1", "cableId": "cb-1", "equipmentId": "eq-fw"}],
        "rearConnections": []
    }"#;

    editor.import_json(raw).unwrap();
    let doc = editor.document();
    assert_eq!(doc.title, "Edge site");
    assert_eq!(doc.rack.total_u, 12);
    assert_eq!(doc.inventory.equipments.len(), 1);
    assert_eq!(doc.inventory.cables_inventory.len(), 1);
    assert_eq!(doc.cable_attachments.len(), 1);
    assert!(doc.rear_connections.is_empty());
    assert_eq!(editor.available_quantity("cb-1"), 1);

    // Unknown tags survive a round trip.
    let exported = editor.export_json().unwrap();
    assert!(exported.contains("\"appliance\""));
    assert!(exported.contains("\"copper\""));
    let occupancy = Occupancy::from_rack(editor.rack(), editor.inventory());
    assert!(occupancy.get(12).unwrap().is_start);
}
