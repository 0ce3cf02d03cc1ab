//! Closed tag enumerations used by equipment and cable records.
//!
//! Each tag serializes as its plain string. A string outside the known set
//! is kept as `Other` so an imported document exports unchanged, and it maps
//! to neutral styling instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Badge class for tags that have no dedicated styling.
pub const NEUTRAL_BADGE: &str = "text-bg-secondary";

macro_rules! string_tag {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Every known tag, in form order.
            pub const TAGS: &'static [&'static str] = &[$($tag),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $tag,)+
                    $name::Other(tag) => tag,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                match tag.as_str() {
                    $($tag => $name::$variant,)+
                    _ => $name::Other(tag),
                }
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                $name::from(tag.to_string())
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> String {
                match tag {
                    $name::Other(tag) => tag,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_tag! {
    /// Kind of rack equipment.
    pub enum EquipmentType {
        Ups => "ups",
        Ats => "ats",
        Netapp => "netapp",
        Fujitsu => "fujitsu",
        Blade => "blade",
        Switch => "switch",
        Storage => "storage",
    }
}

string_tag! {
    /// Physical port standard.
    pub enum PortType {
        OneGBaseT => "1GbaseT",
        TenGBaseT => "10GbaseT",
        Sfp => "sfp",
        SfpPlus => "sfp+",
        Sfp28 => "sfp28",
        Qsfp => "qsfp",
        Qsfp28 => "qsfp28",
    }
}

string_tag! {
    pub enum CableType {
        Aoc => "aoc",
        Dac => "dac",
        Fiber => "fiber",
    }
}

string_tag! {
    pub enum CableSpeed {
        OneG => "1G",
        TenG => "10G",
        TwentyFiveG => "25G",
        FortyG => "40G",
        HundredG => "100G",
    }
}

impl Default for EquipmentType {
    fn default() -> Self {
        EquipmentType::Switch
    }
}

impl Default for PortType {
    fn default() -> Self {
        PortType::TenGBaseT
    }
}

impl Default for CableType {
    fn default() -> Self {
        CableType::Dac
    }
}

impl Default for CableSpeed {
    fn default() -> Self {
        CableSpeed::TwentyFiveG
    }
}

impl EquipmentType {
    pub fn badge(&self) -> &'static str {
        match self {
            EquipmentType::Ups => "text-bg-danger",
            EquipmentType::Ats => "text-bg-warning",
            EquipmentType::Netapp => "text-bg-primary",
            EquipmentType::Fujitsu => "text-bg-info",
            EquipmentType::Blade => "text-bg-secondary",
            EquipmentType::Switch => "text-bg-success",
            EquipmentType::Storage => "text-bg-dark",
            EquipmentType::Other(_) => NEUTRAL_BADGE,
        }
    }
}

impl CableType {
    pub fn badge(&self) -> &'static str {
        match self {
            CableType::Dac => "text-bg-warning",
            CableType::Aoc => "text-bg-primary",
            CableType::Fiber => "text-bg-success",
            CableType::Other(_) => NEUTRAL_BADGE,
        }
    }
}
