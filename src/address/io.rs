//! Physical inputs and outputs, grouped by connector family

use crate::state::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Connector family of an I/O slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IoGroup {
    /// Local analog sockets
    Local,
    /// Local aux sockets (not present on every model)
    LocalAux,
    /// AES/EBU digital
    Aes,
    /// Stage-connect links
    StageConnect,
}

impl IoGroup {
    pub const ALL: [IoGroup; 4] = [
        IoGroup::Local,
        IoGroup::LocalAux,
        IoGroup::Aes,
        IoGroup::StageConnect,
    ];

    pub fn token(self) -> &'static str {
        match self {
            IoGroup::Local => "LCL",
            IoGroup::LocalAux => "AUX",
            IoGroup::Aes => "AES",
            IoGroup::StageConnect => "SC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IoGroup::Local => "Local",
            IoGroup::LocalAux => "Local Aux",
            IoGroup::Aes => "AES",
            IoGroup::StageConnect => "Stage Connect",
        }
    }
}

impl fmt::Display for IoGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Name,
    Color,
    Icon,
    Gain,
    Phantom,
    Mute,
}

impl InputField {
    pub const ALL: [InputField; 6] = [
        InputField::Name,
        InputField::Color,
        InputField::Icon,
        InputField::Gain,
        InputField::Phantom,
        InputField::Mute,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            InputField::Name => "name",
            InputField::Color => "col",
            InputField::Icon => "icon",
            InputField::Gain => "g",
            InputField::Phantom => "vph",
            InputField::Mute => "mute",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            InputField::Name => ValueKind::Text,
            InputField::Color | InputField::Icon | InputField::Gain => ValueKind::Number,
            InputField::Phantom | InputField::Mute => ValueKind::Bool,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputField::Name => "Name",
            InputField::Color => "Color",
            InputField::Icon => "Icon",
            InputField::Gain => "Gain",
            InputField::Phantom => "Phantom Power",
            InputField::Mute => "Mute",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputField {
    Name,
    /// Connector family of the routed source
    SourceGroup,
    /// Slot index of the routed source
    SourceIndex,
}

impl OutputField {
    pub const ALL: [OutputField; 3] = [
        OutputField::Name,
        OutputField::SourceGroup,
        OutputField::SourceIndex,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            OutputField::Name => "name",
            OutputField::SourceGroup => "grp",
            OutputField::SourceIndex => "in",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            OutputField::Name | OutputField::SourceGroup => ValueKind::Text,
            OutputField::SourceIndex => ValueKind::Number,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputField::Name => "Name",
            OutputField::SourceGroup => "Source Group",
            OutputField::SourceIndex => "Source",
        }
    }
}

/// `/io/in/{GRP}/{index}`
pub fn input_node(group: IoGroup, index: u32) -> String {
    format!("/io/in/{}/{}", group.token(), index)
}

pub fn input_field(group: IoGroup, index: u32, field: InputField) -> String {
    format!("{}/{}", input_node(group, index), field.suffix())
}

/// `/io/out/{GRP}/{index}`
pub fn output_node(group: IoGroup, index: u32) -> String {
    format!("/io/out/{}/{}", group.token(), index)
}

pub fn output_field(group: IoGroup, index: u32, field: OutputField) -> String {
    format!("{}/{}", output_node(group, index), field.suffix())
}
