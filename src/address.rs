//! Address builders - canonical OSC paths for every console parameter
//!
//! Each entity family has a single node address (`/ch/5`, `/dca/2`, ...)
//! and fixed field suffixes appended to it. Builders are pure: the same
//! arguments always produce the same string, so outbound commands and
//! inbound feedback match byte-for-byte. Builders never check indices
//! against a model; the state tree does that.
//!
//! Fields prefixed with `$` are device-internal (solo state, talkback
//! engage, GPIO state) and are kept distinct from user-visible ones.

pub mod config;
pub mod control;
pub mod dca;
pub mod io;
mod key;
pub mod mute_group;
pub mod strip;
pub mod talkback;

pub use config::{ConfigField, MonitorField, MONITOR_OUTPUTS};
pub use control::{GpioField, UserControlField};
pub use dca::DcaField;
pub use io::{InputField, IoGroup, OutputField};
pub use key::LeafKey;
pub use mute_group::MuteGroupField;
pub use strip::{aux, bus, channel, main, matrix, SendField, Strip, StripField};
pub use talkback::{Talkback, TalkbackField};
