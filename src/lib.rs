//! console-mirror - typed mirror of a digital mixing console's OSC parameter space
//!
//! - [`model`]: per-variant entity counts
//! - [`address`]: pure builders for canonical OSC addresses
//! - [`state`]: the pre-allocated state tree and its single-writer actor
//! - [`variables`]: named projections for UI variables and device subscriptions
//! - [`osc`], [`transport`]: wire codec and UDP session

pub mod address;
pub mod config;
pub mod model;
pub mod osc;
pub mod state;
pub mod transport;
pub mod variables;
