//! Command enum for the tree actor
//!
//! Inbound device feedback is fire-and-forget; local writes and queries
//! carry a oneshot sender for the reply.

use super::types::{LeafChange, LeafValue, StateError};
use crate::model::ModelSpec;
use crate::osc::WireValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Called for every set that actually changed a value
pub type SubscriberFn = Arc<dyn Fn(&LeafChange) + Send + Sync>;

pub enum TreeCommand {
    // -------------------------------------------------------------------------
    // Hot path (no response)
    // -------------------------------------------------------------------------
    /// Apply one decoded feedback report from the device
    Feedback { address: String, value: WireValue },

    /// Restore present values, e.g. from a snapshot
    Restore {
        values: BTreeMap<String, LeafValue>,
    },

    // -------------------------------------------------------------------------
    // Request-response
    // -------------------------------------------------------------------------
    /// Local write; replies with the previous value
    Set {
        address: String,
        value: LeafValue,
        response: oneshot::Sender<Result<Option<LeafValue>, StateError>>,
    },

    Get {
        address: String,
        response: oneshot::Sender<Result<Option<LeafValue>, StateError>>,
    },

    /// All present values keyed by address
    Snapshot {
        response: oneshot::Sender<(&'static ModelSpec, BTreeMap<String, LeafValue>)>,
    },

    Subscribe {
        listener: SubscriberFn,
        response: oneshot::Sender<usize>,
    },

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------
    /// Discard the current tree and allocate a fresh one for `model`
    Rebind { model: &'static ModelSpec },

    /// Forget all values (e.g. before re-querying after a reconnect)
    Clear,

    Shutdown,
}

impl std::fmt::Debug for TreeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeCommand::Feedback { address, value } => f
                .debug_struct("Feedback")
                .field("address", address)
                .field("value", value)
                .finish(),
            TreeCommand::Restore { values } => f
                .debug_struct("Restore")
                .field("count", &values.len())
                .finish(),
            TreeCommand::Set { address, value, .. } => f
                .debug_struct("Set")
                .field("address", address)
                .field("value", value)
                .finish(),
            TreeCommand::Get { address, .. } => {
                f.debug_struct("Get").field("address", address).finish()
            }
            TreeCommand::Snapshot { .. } => write!(f, "Snapshot"),
            TreeCommand::Subscribe { .. } => write!(f, "Subscribe"),
            TreeCommand::Rebind { model } => {
                f.debug_struct("Rebind").field("model", &model.id).finish()
            }
            TreeCommand::Clear => write!(f, "Clear"),
            TreeCommand::Shutdown => write!(f, "Shutdown"),
        }
    }
}
