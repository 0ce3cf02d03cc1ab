//! Inventory store.
//!
//! Sole owner of equipment and cable definitions. Knows nothing about
//! placement; height edits that could break a placement are checked by the
//! editor before they reach [`Inventory::apply_equipment_edit`].

use serde::{Deserialize, Serialize};
use serde_json::Map;
use uuid::Uuid;

use crate::error::{RackResult, ValidationFailure};
use crate::logging::structured::LogContext;

use super::models::{CableDefinition, CableId, Equipment, EquipmentId, PortProfile};
use super::tags::{CableSpeed, CableType, EquipmentType, PortType};
use super::text::{clean_label, clean_text};

pub const MIN_EQUIPMENT_U: u32 = 1;
pub const MAX_EQUIPMENT_U: u32 = 20;

/// Length label used when a new cable leaves it blank.
const DEFAULT_CABLE_LENGTH: &str = "1m";

/// Equipment and cable definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub equipments: Vec<Equipment>,
    #[serde(default)]
    pub cables_inventory: Vec<CableDefinition>,
}

/// Form input for a new equipment.
#[derive(Debug, Clone)]
pub struct EquipmentDraft {
    pub name: String,
    pub height_u: i64,
    pub kind: EquipmentType,
    pub description: String,
    pub brand: String,
    pub model: String,
}

impl Default for EquipmentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            height_u: 1,
            kind: EquipmentType::Switch,
            description: String::new(),
            brand: String::new(),
            model: String::new(),
        }
    }
}

/// A single field edit on an existing equipment.
#[derive(Debug, Clone, PartialEq)]
pub enum EquipmentEdit {
    Name(String),
    Description(String),
    Brand(String),
    Model(String),
    /// Clamped into the supported height range.
    Height(i64),
    Kind(EquipmentType),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PortEdit {
    /// Clamped to at least one port.
    Count(i64),
    PortType(PortType),
}

/// Form input for a new cable definition.
#[derive(Debug, Clone)]
pub struct CableDraft {
    pub name: String,
    pub quantity: i64,
    pub port_type1: PortType,
    pub port_type2: PortType,
    pub cable_type: CableType,
    pub speed: CableSpeed,
    pub length: String,
}

impl Default for CableDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: 1,
            port_type1: PortType::Sfp28,
            port_type2: PortType::Sfp28,
            cable_type: CableType::Dac,
            speed: CableSpeed::TwentyFiveG,
            length: "3m".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CableEdit {
    Name(String),
    /// Clamped to zero or more.
    Quantity(i64),
    PortType1(PortType),
    PortType2(PortType),
    CableType(CableType),
    Speed(CableSpeed),
    Length(String),
}

/// Clamp a requested height into the supported equipment range.
pub fn clamp_height(value: i64) -> u32 {
    value.clamp(MIN_EQUIPMENT_U as i64, MAX_EQUIPMENT_U as i64) as u32
}

fn clamp_count(value: i64, min: u32) -> u32 {
    value.clamp(min as i64, u32::MAX as i64) as u32
}

fn unknown(entity: &'static str, id: &str) -> ValidationFailure {
    ValidationFailure::UnknownEntity {
        entity,
        id: id.to_string(),
    }
}

impl Inventory {
    pub fn equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipments.iter().find(|e| e.id == id)
    }

    pub fn cable(&self, id: &str) -> Option<&CableDefinition> {
        self.cables_inventory.iter().find(|c| c.id == id)
    }

    pub fn height_of(&self, id: &str) -> Option<u32> {
        self.equipment(id).map(|e| e.height_u)
    }

    fn equipment_mut(&mut self, id: &str) -> Result<&mut Equipment, ValidationFailure> {
        self.equipments
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| unknown("equipment", id))
    }

    fn cable_mut(&mut self, id: &str) -> Result<&mut CableDefinition, ValidationFailure> {
        self.cables_inventory
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| unknown("cable", id))
    }

    /// Add a new equipment from form input. Returns the generated id.
    pub fn add_equipment(&mut self, draft: EquipmentDraft, ctx: &LogContext) -> RackResult<EquipmentId> {
        let name = clean_label(&draft.name);
        if name.is_empty() {
            return Err(ValidationFailure::InvalidField {
                field: "name",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if draft.height_u < MIN_EQUIPMENT_U as i64 || draft.height_u > MAX_EQUIPMENT_U as i64 {
            return Err(ValidationFailure::InvalidField {
                field: "heightU",
                reason: format!(
                    "must be between {} and {}",
                    MIN_EQUIPMENT_U, MAX_EQUIPMENT_U
                ),
            }
            .into());
        }

        let id = format!("eq-custom-{}", Uuid::new_v4());
        self.equipments.push(Equipment {
            id: id.clone(),
            name,
            description: clean_text(&draft.description),
            brand: clean_label(&draft.brand),
            model: clean_label(&draft.model),
            height_u: draft.height_u as u32,
            kind: draft.kind,
            ports: vec![PortProfile::default()],
            extra: Default::default(),
        });

        log::info!(
            "{} EQUIPMENT_ADDED id={} height_u={}",
            ctx,
            id,
            draft.height_u
        );
        Ok(id)
    }

    pub fn apply_equipment_edit(&mut self, id: &str, edit: EquipmentEdit) -> RackResult<()> {
        let equipment = self.equipment_mut(id)?;
        match edit {
            EquipmentEdit::Name(value) => equipment.name = clean_label(&value),
            EquipmentEdit::Description(value) => equipment.description = clean_text(&value),
            EquipmentEdit::Brand(value) => equipment.brand = clean_label(&value),
            EquipmentEdit::Model(value) => equipment.model = clean_label(&value),
            EquipmentEdit::Height(value) => equipment.height_u = clamp_height(value),
            EquipmentEdit::Kind(kind) => equipment.kind = kind,
        }
        Ok(())
    }

    pub fn add_port_profile(&mut self, id: &str) -> RackResult<()> {
        self.equipment_mut(id)?.ports.push(PortProfile::default());
        Ok(())
    }

    pub fn update_port_profile(&mut self, id: &str, index: usize, edit: PortEdit) -> RackResult<()> {
        let equipment = self.equipment_mut(id)?;
        let profile = equipment
            .ports
            .get_mut(index)
            .ok_or_else(|| ValidationFailure::InvalidField {
                field: "ports",
                reason: format!("no port profile at index {}", index),
            })?;
        match edit {
            PortEdit::Count(value) => profile.count = clamp_count(value, 1),
            PortEdit::PortType(port_type) => profile.port_type = port_type,
        }
        Ok(())
    }

    /// Remove a port profile. An equipment is never left without one.
    pub fn remove_port_profile(&mut self, id: &str, index: usize) -> RackResult<()> {
        let equipment = self.equipment_mut(id)?;
        if index < equipment.ports.len() {
            equipment.ports.remove(index);
        }
        if equipment.ports.is_empty() {
            equipment.ports.push(PortProfile::default());
        }
        Ok(())
    }

    /// Add a new cable definition from form input. Returns the generated id.
    pub fn add_cable(&mut self, draft: CableDraft, ctx: &LogContext) -> RackResult<CableId> {
        let name = clean_label(&draft.name);
        if name.is_empty() {
            return Err(ValidationFailure::InvalidField {
                field: "name",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let length = match clean_label(&draft.length) {
            l if l.is_empty() => DEFAULT_CABLE_LENGTH.to_string(),
            l => l,
        };

        let id = format!("cb-{}", Uuid::new_v4());
        let quantity = clamp_count(draft.quantity, 1);
        self.cables_inventory.push(CableDefinition {
            id: id.clone(),
            name,
            quantity,
            port_type1: draft.port_type1,
            port_type2: draft.port_type2,
            cable_type: draft.cable_type,
            speed: draft.speed,
            length,
            extra: Map::new(),
        });

        log::info!("{} CABLE_ADDED id={} quantity={}", ctx, id, quantity);
        Ok(id)
    }

    pub fn update_cable(&mut self, id: &str, edit: CableEdit) -> RackResult<()> {
        let cable = self.cable_mut(id)?;
        match edit {
            CableEdit::Name(value) => cable.name = clean_label(&value),
            CableEdit::Quantity(value) => cable.quantity = clamp_count(value, 0),
            CableEdit::PortType1(port_type) => cable.port_type1 = port_type,
            CableEdit::PortType2(port_type) => cable.port_type2 = port_type,
            CableEdit::CableType(cable_type) => cable.cable_type = cable_type,
            CableEdit::Speed(speed) => cable.speed = speed,
            CableEdit::Length(value) => cable.length = clean_label(&value),
        }
        Ok(())
    }
}

/// Port summary such as `"2x sfp28, 1x 10GbaseT"`.
pub fn format_ports(equipment: &Equipment) -> String {
    equipment
        .ports
        .iter()
        .map(|p| format!("{}x {}", p.count, p.port_type))
        .collect::<Vec<_>>()
        .join(", ")
}
