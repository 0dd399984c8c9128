//! Mixing strips: channels, auxes, busses, mains and matrices
//!
//! All five families share one field vocabulary. Strips that feed other
//! strips also own a send node per destination: `/ch/3/send/7/fdr`.

use crate::state::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Family of a mixing strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strip {
    Channel,
    Aux,
    Bus,
    Main,
    Matrix,
}

impl Strip {
    pub const ALL: [Strip; 5] = [
        Strip::Channel,
        Strip::Aux,
        Strip::Bus,
        Strip::Main,
        Strip::Matrix,
    ];

    /// First path segment of the family
    pub fn token(self) -> &'static str {
        match self {
            Strip::Channel => "ch",
            Strip::Aux => "aux",
            Strip::Bus => "bus",
            Strip::Main => "main",
            Strip::Matrix => "mtx",
        }
    }

    /// Human-readable family name
    pub fn label(self) -> &'static str {
        match self {
            Strip::Channel => "Channel",
            Strip::Aux => "Aux",
            Strip::Bus => "Bus",
            Strip::Main => "Main",
            Strip::Matrix => "Matrix",
        }
    }

    /// Family that this strip's sends feed, if it has sends at all
    pub fn send_target(self) -> Option<Strip> {
        match self {
            Strip::Channel | Strip::Aux | Strip::Bus => Some(Strip::Bus),
            Strip::Main => Some(Strip::Matrix),
            Strip::Matrix => None,
        }
    }
}

impl fmt::Display for Strip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Per-strip parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripField {
    Name,
    Color,
    Icon,
    /// Scribble-strip light
    Led,
    Mute,
    Fader,
    Pan,
    /// Monitor mode
    Monitor,
    Solo,
}

impl StripField {
    pub const ALL: [StripField; 9] = [
        StripField::Name,
        StripField::Color,
        StripField::Icon,
        StripField::Led,
        StripField::Mute,
        StripField::Fader,
        StripField::Pan,
        StripField::Monitor,
        StripField::Solo,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            StripField::Name => "name",
            StripField::Color => "col",
            StripField::Icon => "icon",
            StripField::Led => "led",
            StripField::Mute => "mute",
            StripField::Fader => "fdr",
            StripField::Pan => "pan",
            StripField::Monitor => "mon",
            StripField::Solo => "$solo",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            StripField::Name => ValueKind::Text,
            StripField::Led | StripField::Mute | StripField::Solo => ValueKind::Bool,
            StripField::Color
            | StripField::Icon
            | StripField::Fader
            | StripField::Pan
            | StripField::Monitor => ValueKind::Number,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StripField::Name => "Name",
            StripField::Color => "Color",
            StripField::Icon => "Icon",
            StripField::Led => "Scribble Light",
            StripField::Mute => "Mute",
            StripField::Fader => "Fader",
            StripField::Pan => "Pan",
            StripField::Monitor => "Monitor Mode",
            StripField::Solo => "Solo",
        }
    }
}

/// Per-send parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendField {
    Fader,
    Mute,
    PreFade,
}

impl SendField {
    pub const ALL: [SendField; 3] = [SendField::Fader, SendField::Mute, SendField::PreFade];

    pub fn suffix(self) -> &'static str {
        match self {
            SendField::Fader => "fdr",
            SendField::Mute => "mute",
            SendField::PreFade => "pre",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            SendField::Fader => ValueKind::Number,
            SendField::Mute | SendField::PreFade => ValueKind::Bool,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SendField::Fader => "Level",
            SendField::Mute => "Mute",
            SendField::PreFade => "Pre-Fade",
        }
    }
}

/// `/{family}/{index}`
pub fn node(strip: Strip, index: u32) -> String {
    format!("/{}/{}", strip.token(), index)
}

/// `/{family}/{index}/{field}`
pub fn field(strip: Strip, index: u32, field: StripField) -> String {
    format!("{}/{}", node(strip, index), field.suffix())
}

/// `/{family}/{index}/send/{dest}`
pub fn send_node(strip: Strip, index: u32, dest: u32) -> String {
    format!("{}/send/{}", node(strip, index), dest)
}

/// `/{family}/{index}/send/{dest}/{field}`
pub fn send_field(strip: Strip, index: u32, dest: u32, field: SendField) -> String {
    format!("{}/{}", send_node(strip, index, dest), field.suffix())
}

/// Per-family shorthand, e.g. `channel::fader(5)`
macro_rules! strip_family {
    (@fields $module:ident, $strip:expr, { $($extra:item)* }) => {
        pub mod $module {
            #[allow(unused_imports)]
            use super::{SendField, Strip, StripField};

            const STRIP: Strip = $strip;

            pub fn node(index: u32) -> String {
                super::node(STRIP, index)
            }

            pub fn name(index: u32) -> String {
                super::field(STRIP, index, StripField::Name)
            }

            pub fn color(index: u32) -> String {
                super::field(STRIP, index, StripField::Color)
            }

            pub fn icon(index: u32) -> String {
                super::field(STRIP, index, StripField::Icon)
            }

            pub fn led(index: u32) -> String {
                super::field(STRIP, index, StripField::Led)
            }

            pub fn mute(index: u32) -> String {
                super::field(STRIP, index, StripField::Mute)
            }

            pub fn fader(index: u32) -> String {
                super::field(STRIP, index, StripField::Fader)
            }

            pub fn pan(index: u32) -> String {
                super::field(STRIP, index, StripField::Pan)
            }

            pub fn monitor(index: u32) -> String {
                super::field(STRIP, index, StripField::Monitor)
            }

            pub fn solo(index: u32) -> String {
                super::field(STRIP, index, StripField::Solo)
            }

            $($extra)*
        }
    };
    ($module:ident, $strip:expr) => {
        strip_family!(@fields $module, $strip, {});
    };
    ($module:ident, $strip:expr, sends) => {
        strip_family!(@fields $module, $strip, {
            pub fn send(index: u32, dest: u32) -> String {
                super::send_node(STRIP, index, dest)
            }

            pub fn send_fader(index: u32, dest: u32) -> String {
                super::send_field(STRIP, index, dest, SendField::Fader)
            }

            pub fn send_mute(index: u32, dest: u32) -> String {
                super::send_field(STRIP, index, dest, SendField::Mute)
            }

            pub fn send_pre(index: u32, dest: u32) -> String {
                super::send_field(STRIP, index, dest, SendField::PreFade)
            }
        });
    };
}

strip_family!(channel, Strip::Channel, sends);
strip_family!(aux, Strip::Aux, sends);
strip_family!(bus, Strip::Bus, sends);
strip_family!(main, Strip::Main, sends);
strip_family!(matrix, Strip::Matrix);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_addresses() {
        assert_eq!(channel::fader(1), "/ch/1/fdr");
        assert_eq!(aux::name(8), "/aux/8/name");
        assert_eq!(bus::mute(16), "/bus/16/mute");
        assert_eq!(main::color(2), "/main/2/col");
        assert_eq!(matrix::led(3), "/mtx/3/led");
        assert_eq!(channel::solo(4), "/ch/4/$solo");
        assert_eq!(channel::monitor(4), "/ch/4/mon");
    }

    #[test]
    fn test_send_addresses() {
        assert_eq!(channel::send(1, 2), "/ch/1/send/2");
        assert_eq!(channel::send_fader(1, 2), "/ch/1/send/2/fdr");
        assert_eq!(bus::send_mute(3, 4), "/bus/3/send/4/mute");
        assert_eq!(main::send_pre(1, 8), "/main/1/send/8/pre");
    }

    #[test]
    fn test_builders_are_deterministic() {
        assert_eq!(channel::fader(12), channel::fader(12));
        assert_eq!(field(Strip::Channel, 12, StripField::Fader), channel::fader(12));
    }

    #[test]
    fn test_out_of_model_index_is_still_syntactic() {
        assert_eq!(channel::fader(999), "/ch/999/fdr");
    }

    #[test]
    fn test_send_targets() {
        assert_eq!(Strip::Channel.send_target(), Some(Strip::Bus));
        assert_eq!(Strip::Main.send_target(), Some(Strip::Matrix));
        assert_eq!(Strip::Matrix.send_target(), None);
    }
}
