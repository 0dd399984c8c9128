//! Console-wide configuration: solo bus and monitor outputs

use crate::state::ValueKind;
use serde::{Deserialize, Serialize};

/// Monitor outputs present on every model
pub const MONITOR_OUTPUTS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    SoloMode,
    SoloExclusive,
}

impl ConfigField {
    pub const ALL: [ConfigField; 2] = [ConfigField::SoloMode, ConfigField::SoloExclusive];

    pub fn path(self) -> &'static str {
        match self {
            ConfigField::SoloMode => "/cfg/solo/mode",
            ConfigField::SoloExclusive => "/cfg/solo/excl",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            ConfigField::SoloMode => ValueKind::Text,
            ConfigField::SoloExclusive => ValueKind::Bool,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfigField::SoloMode => "Solo Mode",
            ConfigField::SoloExclusive => "Exclusive Solo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorField {
    Level,
    Dim,
    Mode,
}

impl MonitorField {
    pub const ALL: [MonitorField; 3] = [MonitorField::Level, MonitorField::Dim, MonitorField::Mode];

    pub fn suffix(self) -> &'static str {
        match self {
            MonitorField::Level => "lvl",
            MonitorField::Dim => "dim",
            MonitorField::Mode => "mode",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            MonitorField::Level => ValueKind::Number,
            MonitorField::Dim => ValueKind::Bool,
            MonitorField::Mode => ValueKind::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MonitorField::Level => "Level",
            MonitorField::Dim => "Dim",
            MonitorField::Mode => "Mode",
        }
    }
}

pub fn field(field: ConfigField) -> String {
    field.path().to_string()
}

/// `/cfg/mon/{index}`
pub fn monitor_node(index: u32) -> String {
    format!("/cfg/mon/{}", index)
}

pub fn monitor_field(index: u32, field: MonitorField) -> String {
    format!("{}/{}", monitor_node(index), field.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_addresses() {
        assert_eq!(field(ConfigField::SoloExclusive), "/cfg/solo/excl");
        assert_eq!(monitor_field(2, MonitorField::Dim), "/cfg/mon/2/dim");
    }
}
