//! TreeHandle - public API for the TreeActor
//!
//! Fire-and-forget methods for device feedback, async methods with
//! oneshot replies for local writes and queries.

use std::collections::BTreeMap;

use tokio::sync::{mpsc, oneshot};

use super::commands::TreeCommand;
use super::types::{LeafChange, LeafValue, StateError};
use crate::model::ModelSpec;
use crate::osc::WireValue;

/// Cloneable handle to a running [`TreeActor`](super::actor::TreeActor)
#[derive(Clone)]
pub struct TreeHandle {
    cmd_tx: mpsc::UnboundedSender<TreeCommand>,
}

/// Returned when the actor is gone
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("state tree actor has stopped")]
pub struct ActorGone;

impl TreeHandle {
    pub fn new(cmd_tx: mpsc::UnboundedSender<TreeCommand>) -> Self {
        Self { cmd_tx }
    }

    // =========================================================================
    // Hot path (fire-and-forget)
    // =========================================================================

    /// Apply a decoded device report
    pub fn feedback(&self, address: String, value: WireValue) {
        let _ = self.cmd_tx.send(TreeCommand::Feedback { address, value });
    }

    pub fn restore(&self, values: BTreeMap<String, LeafValue>) {
        let _ = self.cmd_tx.send(TreeCommand::Restore { values });
    }

    // =========================================================================
    // Request-response
    // =========================================================================

    /// Local (optimistic) write; returns the previous value
    ///
    /// A stopped actor is reported as [`StateError::ActorGone`].
    pub async fn set(
        &self,
        address: impl Into<String>,
        value: impl Into<LeafValue>,
    ) -> Result<Option<LeafValue>, StateError> {
        let (response_tx, response_rx) = oneshot::channel();
        let cmd = TreeCommand::Set {
            address: address.into(),
            value: value.into(),
            response: response_tx,
        };

        self.cmd_tx.send(cmd).map_err(|_| ActorGone)?;
        response_rx.await.map_err(|_| ActorGone)?
    }

    pub async fn get(
        &self,
        address: impl Into<String>,
    ) -> Result<Option<LeafValue>, StateError> {
        let (response_tx, response_rx) = oneshot::channel();
        let cmd = TreeCommand::Get {
            address: address.into(),
            response: response_tx,
        };

        self.cmd_tx.send(cmd).map_err(|_| ActorGone)?;
        response_rx.await.map_err(|_| ActorGone)?
    }

    /// Bound model and all present values
    pub async fn snapshot(
        &self,
    ) -> Result<(&'static ModelSpec, BTreeMap<String, LeafValue>), ActorGone> {
        let (response_tx, response_rx) = oneshot::channel();
        self.cmd_tx
            .send(TreeCommand::Snapshot {
                response: response_tx,
            })
            .map_err(|_| ActorGone)?;
        response_rx.await.map_err(|_| ActorGone)
    }

    /// Register a change listener; returns its id
    pub async fn subscribe<F>(&self, listener: F) -> Option<usize>
    where
        F: Fn(&LeafChange) + Send + Sync + 'static,
    {
        let (response_tx, response_rx) = oneshot::channel();
        let cmd = TreeCommand::Subscribe {
            listener: std::sync::Arc::new(listener),
            response: response_tx,
        };

        if self.cmd_tx.send(cmd).is_err() {
            return None;
        }

        response_rx.await.ok()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn rebind(&self, model: &'static ModelSpec) {
        let _ = self.cmd_tx.send(TreeCommand::Rebind { model });
    }

    pub fn clear(&self) {
        let _ = self.cmd_tx.send(TreeCommand::Clear);
    }

    pub fn is_alive(&self) -> bool {
        !self.cmd_tx.is_closed()
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(TreeCommand::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<TreeHandle>();
    }

    #[tokio::test]
    async fn test_is_alive_when_channel_open() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let handle = TreeHandle::new(tx);
        assert!(handle.is_alive());
    }

    #[tokio::test]
    async fn test_closed_channel_reports_errors() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = TreeHandle::new(tx);
        assert!(!handle.is_alive());
        assert_eq!(
            handle.get("/ch/1/fdr").await,
            Err(StateError::ActorGone(ActorGone))
        );
        assert_eq!(
            handle.set("/ch/1/fdr", -3.0).await,
            Err(StateError::ActorGone(ActorGone))
        );
        assert!(handle.snapshot().await.is_err());
    }
}
