//! State management - the typed mirror of the console's parameter space
//!
//! A [`StateTree`] is allocated once per session from a model spec and is
//! mutated only through get/set by address (or by typed key). In a running
//! session the tree is owned by a [`TreeActor`], which serializes every
//! write; other tasks talk to it through a [`TreeHandle`].

mod actor;
mod actor_handle;
mod commands;
pub mod layout;
mod persistence;
mod tree;
mod types;

pub use actor::TreeActor;
pub use actor_handle::{ActorGone, TreeHandle};
pub use commands::{SubscriberFn, TreeCommand};
pub use persistence::TreeSnapshot;
pub use tree::StateTree;
pub use types::{Leaf, LeafChange, LeafValue, StateError, ValueKind};
