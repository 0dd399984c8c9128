//! State tree type definitions
//!
//! Defines leaf values, their declared kinds, the leaf itself and the
//! errors raised by the tree's get/set surface.

use super::actor_handle::ActorGone;
use crate::address::LeafKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Primitive type a leaf is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Number,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::Text => write!(f, "string"),
        }
    }
}

/// Current value of a leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeafValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl LeafValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            LeafValue::Bool(_) => ValueKind::Bool,
            LeafValue::Number(_) => ValueKind::Number,
            LeafValue::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LeafValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            LeafValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LeafValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafValue::Bool(b) => write!(f, "{}", b),
            LeafValue::Number(n) => write!(f, "{}", n),
            LeafValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for LeafValue {
    fn from(value: bool) -> Self {
        LeafValue::Bool(value)
    }
}

impl From<f64> for LeafValue {
    fn from(value: f64) -> Self {
        LeafValue::Number(value)
    }
}

impl From<&str> for LeafValue {
    fn from(value: &str) -> Self {
        LeafValue::Text(value.to_string())
    }
}

impl From<String> for LeafValue {
    fn from(value: String) -> Self {
        LeafValue::Text(value)
    }
}

/// One scalar device parameter
///
/// Owned by the [`StateTree`](super::StateTree); only the tree writes
/// `value`, and the declared kind never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    key: LeafKey,
    address: String,
    kind: ValueKind,
    value: Option<LeafValue>,
}

impl Leaf {
    pub(super) fn new(key: LeafKey) -> Self {
        Self {
            address: key.address(),
            kind: key.kind(),
            key,
            value: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn key(&self) -> &LeafKey {
        &self.key
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// `None` until the device (or a local write) has reported a value
    pub fn value(&self) -> Option<&LeafValue> {
        self.value.as_ref()
    }

    pub(super) fn replace(&mut self, value: LeafValue) -> Option<LeafValue> {
        debug_assert_eq!(value.kind(), self.kind);
        self.value.replace(value)
    }

    pub(super) fn clear(&mut self) {
        self.value = None;
    }
}

/// A change applied to the tree, as seen by subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct LeafChange {
    pub address: String,
    pub previous: Option<LeafValue>,
    pub value: LeafValue,
}

/// Failures of the tree's get/set surface
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    /// Address was never allocated for the bound model
    #[error("unknown address: {0}")]
    UnknownAddress(String),

    /// Value kind disagrees with the leaf's declared kind
    #[error("type mismatch at {address}: expected {expected}, got {found}")]
    TypeMismatch {
        address: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Index outside the bound model's count for that family
    #[error("{family} index {index} out of range (model has {count})")]
    OutOfRangeIndex {
        family: &'static str,
        index: u32,
        count: u32,
    },

    /// NaN or infinite number; never stored
    #[error("non-finite number at {address}: {value}")]
    NonFinite { address: String, value: f64 },

    /// The owning actor stopped; no address can resolve any more
    #[error(transparent)]
    ActorGone(#[from] ActorGone),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{Strip, StripField};

    #[test]
    fn test_value_kinds() {
        assert_eq!(LeafValue::from(true).kind(), ValueKind::Bool);
        assert_eq!(LeafValue::from(-10.0).kind(), ValueKind::Number);
        assert_eq!(LeafValue::from("Kick").kind(), ValueKind::Text);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(LeafValue::Number(1.5).as_number(), Some(1.5));
        assert_eq!(LeafValue::Number(1.5).as_bool(), None);
        assert_eq!(LeafValue::from("Vox").as_text(), Some("Vox"));
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<LeafValue> = serde_json::from_str(r#"[true, -3.5, "Snare"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                LeafValue::Bool(true),
                LeafValue::Number(-3.5),
                LeafValue::Text("Snare".to_string())
            ]
        );
    }

    #[test]
    fn test_leaf_starts_absent() {
        let leaf = Leaf::new(LeafKey::strip(Strip::Channel, 1, StripField::Mute));
        assert_eq!(leaf.address(), "/ch/1/mute");
        assert_eq!(leaf.kind(), ValueKind::Bool);
        assert!(leaf.value().is_none());
    }

    #[test]
    fn test_error_messages() {
        let err = StateError::TypeMismatch {
            address: "/ch/1/fdr".to_string(),
            expected: ValueKind::Number,
            found: ValueKind::Text,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch at /ch/1/fdr: expected number, got string"
        );
    }
}
