//! Document shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::inventory::{CableAttachment, Inventory, RearConnection};
use crate::rack::config::RackConfig;

/// Complete editor state as imported and exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RackDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub rack: RackConfig,
    #[serde(flatten)]
    pub inventory: Inventory,
    #[serde(default)]
    pub cable_attachments: Vec<CableAttachment>,
    #[serde(default)]
    pub rear_connections: Vec<RearConnection>,

    // Top-level keys this crate does not interpret, kept for export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RackDocument {
    /// An empty rack of `total_u` units.
    pub fn empty(title: &str, total_u: u32) -> Self {
        Self {
            title: title.to_string(),
            subtitle: String::new(),
            rack: RackConfig::new(total_u),
            inventory: Inventory::default(),
            cable_attachments: Vec::new(),
            rear_connections: Vec::new(),
            extra: Map::new(),
        }
    }
}
