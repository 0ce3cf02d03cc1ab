//! Inventory records as they appear in the exchanged document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tags::{CableSpeed, CableType, EquipmentType, PortType};

pub type EquipmentId = String;
pub type CableId = String;
pub type AttachmentId = String;

/// A group of identical ports on one piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortProfile {
    pub count: u32,
    pub port_type: PortType,
}

impl Default for PortProfile {
    fn default() -> Self {
        Self {
            count: 1,
            port_type: PortType::TenGBaseT,
        }
    }
}

/// A rack-mountable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(rename = "heightU")]
    pub height_u: u32,
    #[serde(rename = "type", default)]
    pub kind: EquipmentType,
    #[serde(default)]
    pub ports: Vec<PortProfile>,

    // Fields this crate does not interpret (e.g. rearPorts), kept for export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Equipment {
    /// Display name, falling back for blank names.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }
}

/// A stock of identical cables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableDefinition {
    pub id: CableId,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub port_type1: PortType,
    #[serde(default)]
    pub port_type2: PortType,
    #[serde(default)]
    pub cable_type: CableType,
    #[serde(default)]
    pub speed: CableSpeed,
    #[serde(default)]
    pub length: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One cable from a definition's stock attached to a placed equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableAttachment {
    pub id: AttachmentId,
    pub cable_id: CableId,
    pub equipment_id: EquipmentId,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Informational rear cabling row. Never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RearConnection {
    pub from_equipment_id: String,
    pub from_port: String,
    pub to: String,
    pub to_port: String,
    pub cable: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
