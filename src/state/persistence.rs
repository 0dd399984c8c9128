//! Tree persistence to JSON snapshots
//!
//! Saves the present values of a tree so a restarted session can show the
//! last known console state before the device has answered every query.

use super::actor_handle::TreeHandle;
use super::tree::StateTree;
use super::types::LeafValue;
use crate::model::{ModelId, ModelSpec};
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Snapshot of present values, keyed by address
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TreeSnapshot {
    /// Milliseconds since epoch
    pub timestamp: u64,
    pub version: String,
    pub model: ModelId,
    pub values: BTreeMap<String, LeafValue>,
}

impl TreeSnapshot {
    /// Current snapshot format version
    pub const VERSION: &'static str = "1.0.0";

    /// Build a snapshot; non-finite numbers are dropped since JSON cannot hold them
    pub fn new(model: &ModelSpec, mut values: BTreeMap<String, LeafValue>) -> Self {
        values.retain(|address, value| match value {
            LeafValue::Number(n) if !n.is_finite() => {
                warn!(address = %address, "Dropping non-finite value from snapshot");
                false
            }
            _ => true,
        });
        Self {
            timestamp: now_ms(),
            version: Self::VERSION.to_string(),
            model: model.id,
            values,
        }
    }

    pub fn from_tree(tree: &StateTree) -> Self {
        let values = tree
            .present()
            .map(|(address, value)| (address.to_string(), value.clone()))
            .collect();
        Self::new(tree.model(), values)
    }

    /// Take a snapshot of a running session
    pub async fn from_handle(handle: &TreeHandle) -> Result<Self> {
        let (model, values) = handle
            .snapshot()
            .await
            .context("Failed to snapshot state tree")?;
        Ok(Self::new(model, values))
    }

    fn check_model(&self, model: &ModelSpec) -> Result<()> {
        if self.model != model.id {
            bail!(
                "Snapshot was taken on model '{}', session is bound to '{}'",
                self.model,
                model.id
            );
        }
        Ok(())
    }

    /// Write values into a tree; returns how many were applied
    ///
    /// Addresses the tree does not know, or values of the wrong kind, are
    /// skipped with a warning.
    pub fn load_into_tree(&self, tree: &mut StateTree) -> Result<usize> {
        self.check_model(tree.model())?;
        let mut applied = 0;
        for (address, value) in &self.values {
            match tree.set(address, value.clone()) {
                Ok(_) => applied += 1,
                Err(e) => warn!(address = %address, error = %e, "Skipping snapshot value"),
            }
        }
        debug!(applied, total = self.values.len(), "Snapshot loaded into tree");
        Ok(applied)
    }

    /// Hand values to a running session's actor
    pub fn load_into_handle(&self, handle: &TreeHandle, model: &ModelSpec) -> Result<()> {
        self.check_model(model)?;
        handle.restore(self.values.clone());
        Ok(())
    }

    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize tree snapshot")?;

        fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write tree snapshot: {}", path.display()))?;

        debug!(path = %path.display(), values = self.values.len(), "Tree snapshot saved");
        Ok(())
    }

    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read tree snapshot: {}", path.display()))?;

        let snapshot: TreeSnapshot =
            serde_json::from_str(&json).context("Failed to parse tree snapshot JSON")?;

        debug!(
            "Tree snapshot loaded (version: {}, timestamp: {})",
            snapshot.version, snapshot.timestamp
        );

        Ok(snapshot)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
