//! DCA groups

use crate::state::ValueKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DcaField {
    Name,
    Color,
    Icon,
    Led,
    Mute,
    Fader,
    Solo,
    /// Lit while any member of the DCA is soloed
    SoloIndicator,
}

impl DcaField {
    pub const ALL: [DcaField; 8] = [
        DcaField::Name,
        DcaField::Color,
        DcaField::Icon,
        DcaField::Led,
        DcaField::Mute,
        DcaField::Fader,
        DcaField::Solo,
        DcaField::SoloIndicator,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            DcaField::Name => "name",
            DcaField::Color => "col",
            DcaField::Icon => "icon",
            DcaField::Led => "led",
            DcaField::Mute => "mute",
            DcaField::Fader => "fdr",
            DcaField::Solo => "$solo",
            DcaField::SoloIndicator => "$sololed",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            DcaField::Name => ValueKind::Text,
            DcaField::Color | DcaField::Icon | DcaField::Fader => ValueKind::Number,
            DcaField::Led | DcaField::Mute | DcaField::Solo | DcaField::SoloIndicator => {
                ValueKind::Bool
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DcaField::Name => "Name",
            DcaField::Color => "Color",
            DcaField::Icon => "Icon",
            DcaField::Led => "Scribble Light",
            DcaField::Mute => "Mute",
            DcaField::Fader => "Fader",
            DcaField::Solo => "Solo",
            DcaField::SoloIndicator => "Solo Indicator",
        }
    }
}

pub fn node(index: u32) -> String {
    format!("/dca/{}", index)
}

pub fn field(index: u32, field: DcaField) -> String {
    format!("{}/{}", node(index), field.suffix())
}

pub fn name(index: u32) -> String {
    field(index, DcaField::Name)
}

pub fn mute(index: u32) -> String {
    field(index, DcaField::Mute)
}

pub fn fader(index: u32) -> String {
    field(index, DcaField::Fader)
}

pub fn solo(index: u32) -> String {
    field(index, DcaField::Solo)
}

pub fn solo_indicator(index: u32) -> String {
    field(index, DcaField::SoloIndicator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dca_addresses() {
        assert_eq!(node(3), "/dca/3");
        assert_eq!(fader(3), "/dca/3/fdr");
        assert_eq!(solo_indicator(16), "/dca/16/$sololed");
        assert_eq!(field(1, DcaField::Icon), "/dca/1/icon");
    }
}
