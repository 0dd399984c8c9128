//! Typed composite key for a single leaf
//!
//! `LeafKey` is the structural form of an address. Indexed accessors work
//! on keys and never parse strings; `address()` renders the wire form
//! through the same builders used for outbound commands.

use super::{
    config, control, dca, io, mute_group, strip, talkback, ConfigField, DcaField, GpioField,
    InputField, IoGroup, MonitorField, MuteGroupField, OutputField, SendField, Strip,
    StripField, Talkback, TalkbackField, UserControlField,
};
use crate::state::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum LeafKey {
    Strip {
        strip: Strip,
        index: u32,
        field: StripField,
    },
    Send {
        strip: Strip,
        index: u32,
        dest: u32,
        field: SendField,
    },
    Dca {
        index: u32,
        field: DcaField,
    },
    MuteGroup {
        index: u32,
        field: MuteGroupField,
    },
    Input {
        group: IoGroup,
        index: u32,
        field: InputField,
    },
    Output {
        group: IoGroup,
        index: u32,
        field: OutputField,
    },
    Config {
        field: ConfigField,
    },
    Monitor {
        index: u32,
        field: MonitorField,
    },
    Talkback {
        talkback: Talkback,
        field: TalkbackField,
    },
    Gpio {
        index: u32,
        field: GpioField,
    },
    UserControl {
        page: u32,
        row: u32,
        column: u32,
        field: UserControlField,
    },
}

impl LeafKey {
    pub fn strip(strip: Strip, index: u32, field: StripField) -> Self {
        LeafKey::Strip {
            strip,
            index,
            field,
        }
    }

    pub fn send(strip: Strip, index: u32, dest: u32, field: SendField) -> Self {
        LeafKey::Send {
            strip,
            index,
            dest,
            field,
        }
    }

    pub fn dca(index: u32, field: DcaField) -> Self {
        LeafKey::Dca { index, field }
    }

    pub fn mute_group(index: u32, field: MuteGroupField) -> Self {
        LeafKey::MuteGroup { index, field }
    }

    /// Canonical wire address
    pub fn address(&self) -> String {
        match *self {
            LeafKey::Strip {
                strip: s,
                index,
                field,
            } => strip::field(s, index, field),
            LeafKey::Send {
                strip: s,
                index,
                dest,
                field,
            } => strip::send_field(s, index, dest, field),
            LeafKey::Dca { index, field } => dca::field(index, field),
            LeafKey::MuteGroup { index, field } => mute_group::field(index, field),
            LeafKey::Input {
                group,
                index,
                field,
            } => io::input_field(group, index, field),
            LeafKey::Output {
                group,
                index,
                field,
            } => io::output_field(group, index, field),
            LeafKey::Config { field } => config::field(field),
            LeafKey::Monitor { index, field } => config::monitor_field(index, field),
            LeafKey::Talkback {
                talkback: tb,
                field,
            } => talkback::field(tb, field),
            LeafKey::Gpio { index, field } => control::gpio_field(index, field),
            LeafKey::UserControl {
                page,
                row,
                column,
                field,
            } => control::user_field(page, row, column, field),
        }
    }

    /// Declared value type of the leaf
    pub fn kind(&self) -> ValueKind {
        match self {
            LeafKey::Strip { field, .. } => field.kind(),
            LeafKey::Send { field, .. } => field.kind(),
            LeafKey::Dca { field, .. } => field.kind(),
            LeafKey::MuteGroup { field, .. } => field.kind(),
            LeafKey::Input { field, .. } => field.kind(),
            LeafKey::Output { field, .. } => field.kind(),
            LeafKey::Config { field } => field.kind(),
            LeafKey::Monitor { field, .. } => field.kind(),
            LeafKey::Talkback { field, .. } => field.kind(),
            LeafKey::Gpio { field, .. } => field.kind(),
            LeafKey::UserControl { field, .. } => field.kind(),
        }
    }

    /// Whether the field is device-internal (`$`-prefixed)
    pub fn is_internal(&self) -> bool {
        self.address()
            .rsplit('/')
            .next()
            .is_some_and(|last| last.starts_with('$'))
    }
}

impl fmt::Display for LeafKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches_builders() {
        let key = LeafKey::strip(Strip::Channel, 5, StripField::Fader);
        assert_eq!(key.address(), strip::channel::fader(5));
        assert_eq!(key.kind(), ValueKind::Number);

        let key = LeafKey::send(Strip::Bus, 2, 3, SendField::PreFade);
        assert_eq!(key.address(), strip::bus::send_pre(2, 3));
        assert_eq!(key.kind(), ValueKind::Bool);
    }

    #[test]
    fn test_internal_fields() {
        assert!(LeafKey::dca(1, DcaField::SoloIndicator).is_internal());
        assert!(!LeafKey::dca(1, DcaField::Mute).is_internal());
        let key = LeafKey::Talkback {
            talkback: Talkback::A,
            field: TalkbackField::On,
        };
        assert!(key.is_internal());
    }

    #[test]
    fn test_display_is_address() {
        let key = LeafKey::mute_group(4, MuteGroupField::Name);
        assert_eq!(key.to_string(), "/mgrp/4/name");
    }
}
