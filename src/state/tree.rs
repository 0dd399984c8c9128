//! StateTree - pre-allocated, typed mirror of every console parameter
//!
//! The tree is built once from a [`ModelSpec`] and never grows or shrinks.
//! Leaves live in a flat arena; two indexes point into it: the typed
//! [`LeafKey`] index used by structural accessors, and the address index
//! used for inbound feedback. Both are filled from the same key list, so
//! string and structural lookups always agree.

use super::layout;
use super::types::{Leaf, LeafValue, StateError};
use crate::address::{
    DcaField, LeafKey, MuteGroupField, SendField, Strip, StripField,
};
use crate::model::ModelSpec;
use std::collections::HashMap;
use tracing::{debug, trace};

pub struct StateTree {
    model: &'static ModelSpec,
    leaves: Vec<Leaf>,
    by_address: HashMap<String, usize>,
    by_key: HashMap<LeafKey, usize>,
}

impl StateTree {
    /// Allocate one absent leaf per address the model declares
    pub fn new(model: &'static ModelSpec) -> Self {
        let keys = layout::leaf_keys(model);
        let mut leaves = Vec::with_capacity(keys.len());
        let mut by_address = HashMap::with_capacity(keys.len());
        let mut by_key = HashMap::with_capacity(keys.len());

        for key in keys {
            let leaf = Leaf::new(key);
            let id = leaves.len();
            let fresh_address = by_address.insert(leaf.address().to_string(), id).is_none();
            let fresh_key = by_key.insert(key, id).is_none();
            assert!(
                fresh_address && fresh_key,
                "duplicate leaf allocated at {}",
                leaf.address()
            );
            leaves.push(leaf);
        }

        debug!(
            model = model.name,
            leaves = leaves.len(),
            "State tree allocated"
        );

        Self {
            model,
            leaves,
            by_address,
            by_key,
        }
    }

    pub fn model(&self) -> &'static ModelSpec {
        self.model
    }

    /// Number of allocated leaves
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// All leaves in allocation order
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.leaves.iter()
    }

    /// Leaves that currently hold a value
    pub fn present(&self) -> impl Iterator<Item = (&str, &LeafValue)> {
        self.leaves
            .iter()
            .filter_map(|leaf| leaf.value().map(|value| (leaf.address(), value)))
    }

    pub fn contains(&self, address: &str) -> bool {
        self.by_address.contains_key(address)
    }

    fn id_of(&self, address: &str) -> Result<usize, StateError> {
        self.by_address
            .get(address)
            .copied()
            .ok_or_else(|| StateError::UnknownAddress(address.to_string()))
    }

    fn id_of_key(&self, key: &LeafKey) -> Result<usize, StateError> {
        layout::check_range(self.model, key)?;
        self.by_key
            .get(key)
            .copied()
            .ok_or_else(|| StateError::UnknownAddress(key.address()))
    }

    /// Resolve an address to its leaf
    pub fn leaf(&self, address: &str) -> Result<&Leaf, StateError> {
        self.id_of(address).map(|id| &self.leaves[id])
    }

    /// Current value at `address`; `Ok(None)` when allocated but never reported
    pub fn get(&self, address: &str) -> Result<Option<&LeafValue>, StateError> {
        self.leaf(address).map(Leaf::value)
    }

    /// Overwrite the value at `address`, returning the previous one
    ///
    /// The value's kind must match the leaf's declared kind and numbers must
    /// be finite; otherwise the leaf is left untouched.
    pub fn set(
        &mut self,
        address: &str,
        value: impl Into<LeafValue>,
    ) -> Result<Option<LeafValue>, StateError> {
        let id = self.id_of(address)?;
        self.write(id, value.into())
    }

    fn write(&mut self, id: usize, value: LeafValue) -> Result<Option<LeafValue>, StateError> {
        let leaf = &mut self.leaves[id];
        if value.kind() != leaf.kind() {
            return Err(StateError::TypeMismatch {
                address: leaf.address().to_string(),
                expected: leaf.kind(),
                found: value.kind(),
            });
        }
        if let LeafValue::Number(n) = value {
            if !n.is_finite() {
                return Err(StateError::NonFinite {
                    address: leaf.address().to_string(),
                    value: n,
                });
            }
        }
        trace!(address = leaf.address(), %value, "Leaf set");
        Ok(leaf.replace(value))
    }

    /// Resolve a typed key to its leaf
    ///
    /// Indices outside the model fail with `OutOfRangeIndex`; in-range keys
    /// that were never allocated (self-sends) fail with `UnknownAddress`.
    pub fn leaf_by_key(&self, key: &LeafKey) -> Result<&Leaf, StateError> {
        self.id_of_key(key).map(|id| &self.leaves[id])
    }

    pub fn get_key(&self, key: &LeafKey) -> Result<Option<&LeafValue>, StateError> {
        self.leaf_by_key(key).map(Leaf::value)
    }

    pub fn set_key(
        &mut self,
        key: &LeafKey,
        value: impl Into<LeafValue>,
    ) -> Result<Option<LeafValue>, StateError> {
        let id = self.id_of_key(key)?;
        self.write(id, value.into())
    }

    /// e.g. "channel 5's fader leaf"
    pub fn strip(&self, strip: Strip, index: u32, field: StripField) -> Result<&Leaf, StateError> {
        self.leaf_by_key(&LeafKey::strip(strip, index, field))
    }

    pub fn send(
        &self,
        strip: Strip,
        index: u32,
        dest: u32,
        field: SendField,
    ) -> Result<&Leaf, StateError> {
        self.leaf_by_key(&LeafKey::send(strip, index, dest, field))
    }

    pub fn dca(&self, index: u32, field: DcaField) -> Result<&Leaf, StateError> {
        self.leaf_by_key(&LeafKey::dca(index, field))
    }

    pub fn mute_group(&self, index: u32, field: MuteGroupField) -> Result<&Leaf, StateError> {
        self.leaf_by_key(&LeafKey::mute_group(index, field))
    }

    /// Number of send nodes (one per source/destination pair) of a family
    pub fn send_count(&self, strip: Strip) -> usize {
        self.leaves
            .iter()
            .filter(|leaf| {
                matches!(
                    leaf.key(),
                    LeafKey::Send { strip: s, field: SendField::Fader, .. } if *s == strip
                )
            })
            .count()
    }

    /// Forget every value, keeping all leaves allocated
    pub fn clear(&mut self) {
        for leaf in &mut self.leaves {
            leaf.clear();
        }
        debug!("State tree cleared");
    }
}

impl std::fmt::Debug for StateTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTree")
            .field("model", &self.model.id)
            .field("leaves", &self.leaves.len())
            .field("present", &self.present().count())
            .finish()
    }
}
