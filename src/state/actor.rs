//! TreeActor - the single writer of a session's state tree
//!
//! The actor owns the [`StateTree`] and handles commands strictly in
//! arrival order, so feedback and local writes never interleave. Readers
//! go through the same queue and always see whole values.
//!
//! ```text
//! transport ──Feedback──┐
//! actions  ──Set/Get────┼──► command_rx ──► TreeActor { tree, subscribers }
//! snapshot ──Restore────┘
//! ```

use super::actor_handle::TreeHandle;
use super::commands::{SubscriberFn, TreeCommand};
use super::tree::StateTree;
use super::types::{LeafChange, LeafValue, StateError};
use crate::osc::WireValue;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

pub struct TreeActor {
    tree: StateTree,

    subscribers: Vec<SubscriberFn>,

    command_rx: mpsc::UnboundedReceiver<TreeCommand>,

    /// Feedback reports applied
    update_count: u64,

    /// Feedback reports rejected (unknown address or wrong type)
    rejected_count: u64,
}

impl TreeActor {
    /// Spawn the actor's run loop on the current tokio runtime
    pub fn spawn(tree: StateTree) -> TreeHandle {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        info!(
            model = tree.model().name,
            leaves = tree.len(),
            "TreeActor spawned"
        );

        let actor = TreeActor {
            tree,
            subscribers: Vec::new(),
            command_rx: cmd_rx,
            update_count: 0,
            rejected_count: 0,
        };
        tokio::spawn(actor.run());

        TreeHandle::new(cmd_tx)
    }

    async fn run(mut self) {
        debug!("TreeActor run loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            trace!(?cmd, "Processing command");

            match cmd {
                TreeCommand::Feedback { address, value } => {
                    self.handle_feedback(&address, &value);
                }
                TreeCommand::Restore { values } => {
                    self.handle_restore(values);
                }
                TreeCommand::Set {
                    address,
                    value,
                    response,
                } => {
                    let result = self.apply(&address, value);
                    let _ = response.send(result);
                }
                TreeCommand::Get { address, response } => {
                    let result = self.tree.get(&address).map(|value| value.cloned());
                    let _ = response.send(result);
                }
                TreeCommand::Snapshot { response } => {
                    let values = self
                        .tree
                        .present()
                        .map(|(address, value)| (address.to_string(), value.clone()))
                        .collect();
                    let _ = response.send((self.tree.model(), values));
                }
                TreeCommand::Subscribe { listener, response } => {
                    self.subscribers.push(listener);
                    let id = self.subscribers.len() - 1;
                    let _ = response.send(id);
                    debug!(subscriber_id = id, "Added subscriber");
                }
                TreeCommand::Rebind { model } => {
                    if model.id == self.tree.model().id {
                        debug!(model = model.name, "Rebind to same model ignored");
                        continue;
                    }
                    self.tree = StateTree::new(model);
                    info!(
                        model = model.name,
                        leaves = self.tree.len(),
                        "State tree rebuilt for new model"
                    );
                }
                TreeCommand::Clear => {
                    self.tree.clear();
                }
                TreeCommand::Shutdown => {
                    info!("TreeActor received shutdown command");
                    break;
                }
            }
        }

        info!(
            update_count = self.update_count,
            rejected_count = self.rejected_count,
            "TreeActor run loop terminated"
        );
    }

    /// Set a value and notify subscribers when it actually changed
    fn apply(&mut self, address: &str, value: LeafValue) -> Result<Option<LeafValue>, StateError> {
        let previous = self.tree.set(address, value.clone())?;
        if previous.as_ref() != Some(&value) {
            let change = LeafChange {
                address: address.to_string(),
                previous: previous.clone(),
                value,
            };
            for subscriber in &self.subscribers {
                subscriber(&change);
            }
        }
        Ok(previous)
    }

    fn handle_feedback(&mut self, address: &str, value: &WireValue) {
        let decoded = self
            .tree
            .leaf(address)
            .and_then(|leaf| value.decode_for(address, leaf.kind()));

        match decoded.and_then(|value| self.apply(address, value)) {
            Ok(_) => self.update_count += 1,
            Err(e) => {
                self.rejected_count += 1;
                warn!(address, error = %e, "Feedback rejected");
            }
        }
    }

    fn handle_restore(&mut self, values: BTreeMap<String, LeafValue>) {
        let total = values.len();
        let mut restored = 0usize;
        for (address, value) in values {
            match self.tree.set(&address, value) {
                Ok(_) => restored += 1,
                Err(e) => warn!(address = %address, error = %e, "Skipping restored value"),
            }
        }
        debug!(restored, total, "Restored values into state tree");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{bus, channel};
    use crate::model::{COMPACT, FULL};
    use crate::state::ActorGone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_feedback_then_get() {
        let handle = TreeActor::spawn(StateTree::new(&FULL));

        handle.feedback(channel::mute(3), WireValue::Int(1));
        handle.feedback(channel::fader(3), WireValue::Float(-12.5));

        assert_eq!(
            handle.get(channel::mute(3)).await.unwrap(),
            Some(LeafValue::Bool(true))
        );
        assert_eq!(
            handle.get(channel::fader(3)).await.unwrap(),
            Some(LeafValue::Number(-12.5))
        );
    }

    #[tokio::test]
    async fn test_rejected_feedback_leaves_value() {
        let handle = TreeActor::spawn(StateTree::new(&FULL));
        handle.set(channel::name(1), "Kick").await.unwrap();

        handle.feedback(channel::name(1), WireValue::Float(1.0));
        handle.feedback("/ch/99/name".to_string(), WireValue::Str("x".to_string()));

        assert_eq!(
            handle.get(channel::name(1)).await.unwrap(),
            Some(LeafValue::Text("Kick".to_string()))
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_real_changes_only() {
        let handle = TreeActor::spawn(StateTree::new(&FULL));
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();
        handle
            .subscribe(move |_change| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        handle.feedback(bus::mute(1), WireValue::Int(1));
        handle.feedback(bus::mute(1), WireValue::Int(1));
        handle.feedback(bus::mute(1), WireValue::Int(0));
        // Round-trip through the queue so all feedback is processed
        handle.get(bus::mute(1)).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_finite_feedback_is_dropped() {
        let handle = TreeActor::spawn(StateTree::new(&FULL));
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();
        handle
            .subscribe(move |_change| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        handle.feedback(channel::fader(2), WireValue::Float(-30.0));
        handle.feedback(channel::fader(2), WireValue::Float(f32::NAN));
        handle.feedback(channel::fader(2), WireValue::Float(f32::NAN));
        handle.feedback(channel::fader(2), WireValue::Float(f32::NEG_INFINITY));

        assert_eq!(
            handle.get(channel::fader(2)).await.unwrap(),
            Some(LeafValue::Number(-30.0))
        );
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stopped_actor_is_not_unknown_address() {
        let handle = TreeActor::spawn(StateTree::new(&FULL));
        handle.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert_eq!(
            handle.set(channel::name(1), "Kick").await,
            Err(StateError::ActorGone(ActorGone))
        );
        assert_eq!(
            handle.get(channel::name(1)).await,
            Err(StateError::ActorGone(ActorGone))
        );
    }

    #[tokio::test]
    async fn test_set_errors_propagate() {
        let handle = TreeActor::spawn(StateTree::new(&FULL));
        assert!(matches!(
            handle.set(channel::send_fader(1, 1), -10.0).await,
            Err(StateError::UnknownAddress(_))
        ));
        assert!(matches!(
            handle.set(channel::mute(1), 1.0).await,
            Err(StateError::TypeMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_rebind_replaces_tree() {
        let handle = TreeActor::spawn(StateTree::new(&FULL));
        handle.set(channel::name(1), "Kick").await.unwrap();

        handle.rebind(&COMPACT);
        let (model, values) = handle.snapshot().await.unwrap();
        assert_eq!(model.id, COMPACT.id);
        assert!(values.is_empty());
        assert!(handle.get("/io/in/AUX/1/name".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn test_shutdown_closes_handle() {
        let handle = TreeActor::spawn(StateTree::new(&FULL));
        handle.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!handle.is_alive());
    }
}
