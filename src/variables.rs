//! Variable projection - named views over tree addresses
//!
//! Enumerates, for a model, the live values the UI layer should expose and
//! the addresses the transport should subscribe to on the device. Both
//! lists are pure functions of the model and the address builders; they
//! are recomputed whenever the bound model changes.

use crate::address::{
    ConfigField, DcaField, GpioField, LeafKey, MuteGroupField, Strip, StripField, TalkbackField,
    UserControlField,
};
use crate::model::ModelSpec;
use crate::state::{layout, LeafValue, StateError, StateTree};
use serde::Serialize;

/// A UI-facing value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Stable identifier, e.g. `ch1_fdr`
    pub name: String,
    /// Display label, e.g. `Channel 1 Fader`
    pub label: String,
    pub address: String,
}

/// A device address the transport keeps current
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub name: String,
    pub address: String,
}

/// External name of a leaf
pub fn external_name(key: &LeafKey) -> String {
    let field = |suffix: &str| suffix.trim_start_matches('$').to_lowercase();
    match *key {
        LeafKey::Strip {
            strip,
            index,
            field: f,
        } => format!("{}{}_{}", strip.token(), index, field(f.suffix())),
        LeafKey::Send {
            strip,
            index,
            dest,
            field: f,
        } => format!(
            "{}{}_send{}_{}",
            strip.token(),
            index,
            dest,
            field(f.suffix())
        ),
        LeafKey::Dca { index, field: f } => format!("dca{}_{}", index, field(f.suffix())),
        LeafKey::MuteGroup { index, field: f } => {
            format!("mgrp{}_{}", index, field(f.suffix()))
        }
        LeafKey::Input {
            group,
            index,
            field: f,
        } => format!(
            "in_{}{}_{}",
            group.token().to_lowercase(),
            index,
            field(f.suffix())
        ),
        LeafKey::Output {
            group,
            index,
            field: f,
        } => format!(
            "out_{}{}_{}",
            group.token().to_lowercase(),
            index,
            field(f.suffix())
        ),
        LeafKey::Config { field: f } => f
            .path()
            .trim_start_matches('/')
            .replace('/', "_"),
        LeafKey::Monitor { index, field: f } => format!("mon{}_{}", index, field(f.suffix())),
        LeafKey::Talkback { talkback, field: f } => format!(
            "talk_{}_{}",
            talkback.token().to_lowercase(),
            field(&f.suffix())
        ),
        LeafKey::Gpio { index, field: f } => format!("gpio{}_{}", index, field(f.suffix())),
        LeafKey::UserControl {
            page,
            row,
            column,
            field: f,
        } => format!("user{}_{}_{}_{}", page, row, column, field(f.suffix())),
    }
}

/// Display label of a leaf
pub fn label(key: &LeafKey) -> String {
    match *key {
        LeafKey::Strip { strip, index, field } => {
            format!("{} {} {}", strip.label(), index, field.label())
        }
        LeafKey::Send {
            strip,
            index,
            dest,
            field,
        } => {
            let target = strip.send_target().map(Strip::label).unwrap_or("Send");
            format!(
                "{} {} to {} {} {}",
                strip.label(),
                index,
                target,
                dest,
                field.label()
            )
        }
        LeafKey::Dca { index, field } => format!("DCA {} {}", index, field.label()),
        LeafKey::MuteGroup { index, field } => format!("Mute Group {} {}", index, field.label()),
        LeafKey::Input {
            group,
            index,
            field,
        } => format!("{} In {} {}", group.label(), index, field.label()),
        LeafKey::Output {
            group,
            index,
            field,
        } => format!("{} Out {} {}", group.label(), index, field.label()),
        LeafKey::Config { field } => field.label().to_string(),
        LeafKey::Monitor { index, field } => format!("Monitor {} {}", index, field.label()),
        LeafKey::Talkback { talkback, field } => {
            format!("Talkback {} {}", talkback.token(), field.label())
        }
        LeafKey::Gpio { index, field } => format!("GPIO {} {}", index, field.label()),
        LeafKey::UserControl {
            page,
            row,
            column,
            field,
        } => format!(
            "User {} Row {} Button {} {}",
            page,
            row,
            column,
            field.label()
        ),
    }
}

/// Whether a leaf is surfaced to the UI as a variable
fn is_variable(key: &LeafKey) -> bool {
    match key {
        LeafKey::Strip { field, .. } => matches!(
            field,
            StripField::Name | StripField::Mute | StripField::Fader | StripField::Solo
        ),
        LeafKey::Send { .. } => false,
        LeafKey::Dca { field, .. } => matches!(
            field,
            DcaField::Name | DcaField::Mute | DcaField::Fader | DcaField::SoloIndicator
        ),
        LeafKey::MuteGroup { field, .. } => {
            matches!(field, MuteGroupField::Name | MuteGroupField::Mute)
        }
        LeafKey::Input { .. } | LeafKey::Output { .. } => false,
        LeafKey::Config { field } => matches!(field, ConfigField::SoloMode),
        LeafKey::Monitor { .. } => true,
        LeafKey::Talkback { field, .. } => matches!(field, TalkbackField::On),
        LeafKey::Gpio { field, .. } => matches!(field, GpioField::State),
        LeafKey::UserControl { field, .. } => matches!(field, UserControlField::Name),
    }
}

/// UI variables for a model
pub fn variables(model: &ModelSpec) -> Vec<Variable> {
    layout::leaf_keys(model)
        .iter()
        .filter(|key| is_variable(key))
        .map(|key| Variable {
            name: external_name(key),
            label: label(key),
            address: key.address(),
        })
        .collect()
}

/// Device subscriptions for a model: every allocated leaf
pub fn subscriptions(model: &ModelSpec) -> Vec<Subscription> {
    layout::leaf_keys(model)
        .iter()
        .map(|key| Subscription {
            name: external_name(key),
            address: key.address(),
        })
        .collect()
}

/// Current value of each variable
///
/// `Ok(None)` where the device has not reported yet; `UnknownAddress` when
/// the variables were built for a different model than the tree.
pub fn resolve<'a>(
    tree: &'a StateTree,
    variables: &'a [Variable],
) -> impl Iterator<Item = (&'a str, Result<Option<&'a LeafValue>, StateError>)> {
    variables
        .iter()
        .map(move |var| (var.name.as_str(), tree.get(&var.address)))
}
