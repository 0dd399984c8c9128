//! Tree layout - which leaves a console model allocates
//!
//! The layout is the single place where address families meet model
//! counts. Construction walks `leaf_keys`; accessors use `check_range`
//! to tell an out-of-model index apart from an address the tree never
//! allocated.

use super::types::StateError;
use crate::address::{
    ConfigField, DcaField, GpioField, InputField, IoGroup, LeafKey, MonitorField, MuteGroupField,
    OutputField, SendField, Strip, StripField, Talkback, TalkbackField, UserControlField,
    MONITOR_OUTPUTS,
};
use crate::model::ModelSpec;

/// Number of strips of a family
pub fn strip_count(model: &ModelSpec, strip: Strip) -> u32 {
    match strip {
        Strip::Channel => model.channels,
        Strip::Aux => model.auxes,
        Strip::Bus => model.busses,
        Strip::Main => model.mains,
        Strip::Matrix => model.matrices,
    }
}

/// Number of input slots of a connector family (0 when absent)
pub fn input_count(model: &ModelSpec, group: IoGroup) -> u32 {
    match group {
        IoGroup::Local => model.local_inputs,
        IoGroup::LocalAux => model.local_aux_inputs.unwrap_or(0),
        IoGroup::Aes => model.aes_inputs,
        IoGroup::StageConnect => model.stage_connect,
    }
}

/// Number of output slots of a connector family (0 when absent)
pub fn output_count(model: &ModelSpec, group: IoGroup) -> u32 {
    match group {
        IoGroup::Local => model.local_outputs,
        IoGroup::LocalAux => model.local_aux_outputs.unwrap_or(0),
        IoGroup::Aes => model.aes_outputs,
        IoGroup::StageConnect => model.stage_connect,
    }
}

/// Destinations a strip sends to, in order
///
/// The slot equal to the source's own index is skipped: it is "no such
/// send", not an empty one.
pub fn send_destinations(model: &ModelSpec, strip: Strip, index: u32) -> Vec<u32> {
    match strip.send_target() {
        Some(target) => (1..=strip_count(model, target))
            .filter(|dest| *dest != index)
            .collect(),
        None => Vec::new(),
    }
}

fn talkback_fields(model: &ModelSpec) -> Vec<TalkbackField> {
    let mut fields = vec![TalkbackField::On, TalkbackField::Mode, TalkbackField::Level];
    fields.extend((1..=model.busses).map(TalkbackField::Bus));
    fields.extend((1..=model.mains).map(TalkbackField::Main));
    fields.extend((1..=model.matrices).map(TalkbackField::Matrix));
    fields
}

/// Every leaf key the model allocates, in a stable order
pub fn leaf_keys(model: &ModelSpec) -> Vec<LeafKey> {
    let mut keys = Vec::new();

    for strip in Strip::ALL {
        for index in 1..=strip_count(model, strip) {
            for field in StripField::ALL {
                keys.push(LeafKey::strip(strip, index, field));
            }
            for dest in send_destinations(model, strip, index) {
                for field in SendField::ALL {
                    keys.push(LeafKey::send(strip, index, dest, field));
                }
            }
        }
    }

    for index in 1..=model.dcas {
        for field in DcaField::ALL {
            keys.push(LeafKey::dca(index, field));
        }
    }

    for index in 1..=model.mute_groups {
        for field in MuteGroupField::ALL {
            keys.push(LeafKey::mute_group(index, field));
        }
    }

    for group in IoGroup::ALL {
        for index in 1..=input_count(model, group) {
            for field in InputField::ALL {
                keys.push(LeafKey::Input {
                    group,
                    index,
                    field,
                });
            }
        }
        for index in 1..=output_count(model, group) {
            for field in OutputField::ALL {
                keys.push(LeafKey::Output {
                    group,
                    index,
                    field,
                });
            }
        }
    }

    for field in ConfigField::ALL {
        keys.push(LeafKey::Config { field });
    }
    for index in 1..=MONITOR_OUTPUTS {
        for field in MonitorField::ALL {
            keys.push(LeafKey::Monitor { index, field });
        }
    }

    for talkback in Talkback::ALL {
        for field in talkback_fields(model) {
            keys.push(LeafKey::Talkback { talkback, field });
        }
    }

    for index in 1..=model.gpio.unwrap_or(0) {
        for field in GpioField::ALL {
            keys.push(LeafKey::Gpio { index, field });
        }
    }

    for page in 1..=model.user_pages {
        for row in 1..=model.user_rows {
            for column in 1..=model.user_columns {
                for field in UserControlField::ALL {
                    keys.push(LeafKey::UserControl {
                        page,
                        row,
                        column,
                        field,
                    });
                }
            }
        }
    }

    keys
}

fn in_range(family: &'static str, index: u32, count: u32) -> Result<(), StateError> {
    if index == 0 || index > count {
        return Err(StateError::OutOfRangeIndex {
            family,
            index,
            count,
        });
    }
    Ok(())
}

/// Check every index of a key against the model's counts
///
/// A key that passes may still be unallocated (a self-send); the tree
/// reports that as `UnknownAddress`.
pub fn check_range(model: &ModelSpec, key: &LeafKey) -> Result<(), StateError> {
    match *key {
        LeafKey::Strip { strip, index, .. } => {
            in_range(strip.label(), index, strip_count(model, strip))
        }
        LeafKey::Send {
            strip, index, dest, ..
        } => {
            in_range(strip.label(), index, strip_count(model, strip))?;
            let target = strip.send_target().ok_or_else(|| StateError::OutOfRangeIndex {
                family: "Send",
                index: dest,
                count: 0,
            })?;
            in_range(target.label(), dest, strip_count(model, target))
        }
        LeafKey::Dca { index, .. } => in_range("DCA", index, model.dcas),
        LeafKey::MuteGroup { index, .. } => in_range("Mute Group", index, model.mute_groups),
        LeafKey::Input { group, index, .. } => {
            in_range(group.label(), index, input_count(model, group))
        }
        LeafKey::Output { group, index, .. } => {
            in_range(group.label(), index, output_count(model, group))
        }
        LeafKey::Config { .. } => Ok(()),
        LeafKey::Monitor { index, .. } => in_range("Monitor", index, MONITOR_OUTPUTS),
        LeafKey::Talkback { field, .. } => match field {
            TalkbackField::Bus(n) => in_range("Bus", n, model.busses),
            TalkbackField::Main(n) => in_range("Main", n, model.mains),
            TalkbackField::Matrix(n) => in_range("Matrix", n, model.matrices),
            TalkbackField::On | TalkbackField::Mode | TalkbackField::Level => Ok(()),
        },
        LeafKey::Gpio { index, .. } => in_range("GPIO", index, model.gpio.unwrap_or(0)),
        LeafKey::UserControl {
            page, row, column, ..
        } => {
            in_range("User Page", page, model.user_pages)?;
            in_range("User Row", row, model.user_rows)?;
            in_range("User Column", column, model.user_columns)
        }
    }
}
