//! Talkback engines and their destination assignments

use crate::state::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Talkback {
    A,
    B,
}

impl Talkback {
    pub const ALL: [Talkback; 2] = [Talkback::A, Talkback::B];

    pub fn token(self) -> &'static str {
        match self {
            Talkback::A => "A",
            Talkback::B => "B",
        }
    }
}

impl fmt::Display for Talkback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Talkback parameter; destination flags carry the 1-based target index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalkbackField {
    On,
    Mode,
    Level,
    Bus(u32),
    Main(u32),
    Matrix(u32),
}

impl TalkbackField {
    pub fn suffix(self) -> String {
        match self {
            TalkbackField::On => "$on".to_string(),
            TalkbackField::Mode => "mode".to_string(),
            TalkbackField::Level => "lvl".to_string(),
            TalkbackField::Bus(n) => format!("B{}", n),
            TalkbackField::Main(n) => format!("M{}", n),
            TalkbackField::Matrix(n) => format!("MX{}", n),
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            TalkbackField::Mode => ValueKind::Text,
            TalkbackField::Level => ValueKind::Number,
            TalkbackField::On
            | TalkbackField::Bus(_)
            | TalkbackField::Main(_)
            | TalkbackField::Matrix(_) => ValueKind::Bool,
        }
    }

    pub fn label(self) -> String {
        match self {
            TalkbackField::On => "On".to_string(),
            TalkbackField::Mode => "Mode".to_string(),
            TalkbackField::Level => "Level".to_string(),
            TalkbackField::Bus(n) => format!("To Bus {}", n),
            TalkbackField::Main(n) => format!("To Main {}", n),
            TalkbackField::Matrix(n) => format!("To Matrix {}", n),
        }
    }
}

/// `/cfg/talk/{A|B}`
pub fn node(talkback: Talkback) -> String {
    format!("/cfg/talk/{}", talkback.token())
}

pub fn field(talkback: Talkback, field: TalkbackField) -> String {
    format!("{}/{}", node(talkback), field.suffix())
}

pub fn on(talkback: Talkback) -> String {
    field(talkback, TalkbackField::On)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talkback_addresses() {
        assert_eq!(on(Talkback::A), "/cfg/talk/A/$on");
        assert_eq!(field(Talkback::B, TalkbackField::Bus(3)), "/cfg/talk/B/B3");
        assert_eq!(field(Talkback::B, TalkbackField::Main(1)), "/cfg/talk/B/M1");
        assert_eq!(field(Talkback::A, TalkbackField::Matrix(1)), "/cfg/talk/A/MX1");
    }
}
