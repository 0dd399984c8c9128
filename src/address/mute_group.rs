//! Mute groups

use crate::state::ValueKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuteGroupField {
    Name,
    Mute,
}

impl MuteGroupField {
    pub const ALL: [MuteGroupField; 2] = [MuteGroupField::Name, MuteGroupField::Mute];

    pub fn suffix(self) -> &'static str {
        match self {
            MuteGroupField::Name => "name",
            MuteGroupField::Mute => "mute",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            MuteGroupField::Name => ValueKind::Text,
            MuteGroupField::Mute => ValueKind::Bool,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MuteGroupField::Name => "Name",
            MuteGroupField::Mute => "Mute",
        }
    }
}

pub fn node(index: u32) -> String {
    format!("/mgrp/{}", index)
}

pub fn field(index: u32, field: MuteGroupField) -> String {
    format!("{}/{}", node(index), field.suffix())
}

pub fn name(index: u32) -> String {
    field(index, MuteGroupField::Name)
}

pub fn mute(index: u32) -> String {
    field(index, MuteGroupField::Mute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_group_addresses() {
        assert_eq!(name(2), "/mgrp/2/name");
        assert_eq!(mute(8), "/mgrp/8/mute");
    }
}
