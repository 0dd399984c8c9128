//! Console model specifications
//!
//! Every supported console variant is described by one immutable
//! [`ModelSpec`]: how many entities of each addressable family it has.
//! Specs are `'static` singletons; the state tree and the variable
//! projection only ever borrow them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a console variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    /// Full-size desk (default)
    Full,
    /// Compact desk, no local aux I/O
    Compact,
    /// Rack unit, no GPIO
    Rack,
}

impl ModelId {
    /// All known variants, default first
    pub fn all() -> &'static [ModelId] {
        &[ModelId::Full, ModelId::Compact, ModelId::Rack]
    }

    /// Lowercase identifier as used in config files and on the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Full => "full",
            ModelId::Compact => "compact",
            ModelId::Rack => "rack",
        }
    }

    /// The immutable specification of this variant
    pub fn spec(&self) -> &'static ModelSpec {
        match self {
            ModelId::Full => &FULL,
            ModelId::Compact => &COMPACT,
            ModelId::Rack => &RACK,
        }
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::Full
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model lookup failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown console model '{0}' (expected one of: full, compact, rack)")]
    UnknownModel(String),
}

impl FromStr for ModelId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModelId::all()
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownModel(wanted.to_string()))
    }
}

/// Static entity counts of one console variant
///
/// Optional capabilities are `None` when the variant lacks the hardware;
/// the state tree allocates nothing for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSpec {
    pub id: ModelId,
    pub name: &'static str,
    pub channels: u32,
    pub auxes: u32,
    pub busses: u32,
    pub matrices: u32,
    pub mains: u32,
    pub dcas: u32,
    pub mute_groups: u32,
    pub local_inputs: u32,
    pub local_outputs: u32,
    pub local_aux_inputs: Option<u32>,
    pub local_aux_outputs: Option<u32>,
    pub aes_inputs: u32,
    pub aes_outputs: u32,
    /// Stage-connect links, each usable as input and output
    pub stage_connect: u32,
    pub gpio: Option<u32>,
    pub user_pages: u32,
    pub user_rows: u32,
    pub user_columns: u32,
}

pub static FULL: ModelSpec = ModelSpec {
    id: ModelId::Full,
    name: "Full",
    channels: 40,
    auxes: 8,
    busses: 16,
    matrices: 8,
    mains: 4,
    dcas: 16,
    mute_groups: 8,
    local_inputs: 8,
    local_outputs: 8,
    local_aux_inputs: Some(8),
    local_aux_outputs: Some(8),
    aes_inputs: 2,
    aes_outputs: 2,
    stage_connect: 32,
    gpio: Some(4),
    user_pages: 16,
    user_rows: 2,
    user_columns: 4,
};

pub static COMPACT: ModelSpec = ModelSpec {
    id: ModelId::Compact,
    name: "Compact",
    channels: 40,
    auxes: 8,
    busses: 16,
    matrices: 8,
    mains: 4,
    dcas: 16,
    mute_groups: 8,
    local_inputs: 8,
    local_outputs: 8,
    local_aux_inputs: None,
    local_aux_outputs: None,
    aes_inputs: 2,
    aes_outputs: 2,
    stage_connect: 32,
    gpio: Some(2),
    user_pages: 16,
    user_rows: 2,
    user_columns: 4,
};

pub static RACK: ModelSpec = ModelSpec {
    id: ModelId::Rack,
    name: "Rack",
    channels: 40,
    auxes: 8,
    busses: 16,
    matrices: 8,
    mains: 4,
    dcas: 16,
    mute_groups: 8,
    local_inputs: 8,
    local_outputs: 8,
    local_aux_inputs: Some(8),
    local_aux_outputs: Some(8),
    aes_inputs: 2,
    aes_outputs: 2,
    stage_connect: 32,
    gpio: None,
    user_pages: 16,
    user_rows: 2,
    user_columns: 2,
};

/// Resolve a model identifier to its specification
///
/// `None` selects the default variant.
pub fn lookup(id: Option<&str>) -> Result<&'static ModelSpec, ModelError> {
    match id {
        Some(id) => Ok(id.parse::<ModelId>()?.spec()),
        None => Ok(ModelId::default().spec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_default_is_full() {
        let spec = lookup(None).unwrap();
        assert_eq!(spec.id, ModelId::Full);
        assert_eq!(spec.channels, 40);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(lookup(Some("Compact")).unwrap().id, ModelId::Compact);
        assert_eq!(lookup(Some(" RACK ")).unwrap().id, ModelId::Rack);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup(Some("desk9000")).unwrap_err();
        assert_eq!(err, ModelError::UnknownModel("desk9000".to_string()));
    }

    #[test]
    fn test_specs_are_singletons() {
        for id in ModelId::all() {
            assert!(std::ptr::eq(id.spec(), id.spec()));
            assert_eq!(id.spec().id, *id);
        }
    }

    #[test]
    fn test_optional_capabilities() {
        assert!(COMPACT.local_aux_inputs.is_none());
        assert!(RACK.gpio.is_none());
        assert_eq!(FULL.gpio, Some(4));
    }
}
