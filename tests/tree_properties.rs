//! Whole-tree properties checked across every console model

use console_mirror::address::{
    self, bus, channel, matrix, LeafKey, SendField, Strip, StripField,
};
use console_mirror::model::{ModelId, FULL};
use console_mirror::state::{LeafValue, StateError, StateTree, ValueKind};
use console_mirror::variables;
use proptest::prelude::*;
use std::collections::HashSet;

fn value_of(kind: ValueKind, flag: bool, number: f64, text: &str) -> LeafValue {
    match kind {
        ValueKind::Bool => LeafValue::Bool(flag),
        ValueKind::Number => LeafValue::Number(number),
        ValueKind::Text => LeafValue::Text(text.to_string()),
    }
}

fn wrong_value(kind: ValueKind) -> LeafValue {
    match kind {
        ValueKind::Bool => LeafValue::Text("on".to_string()),
        ValueKind::Number => LeafValue::Bool(true),
        ValueKind::Text => LeafValue::Number(1.0),
    }
}

fn model_strategy() -> impl Strategy<Value = ModelId> {
    prop::sample::select(ModelId::all().to_vec())
}

proptest! {
    #[test]
    fn set_then_get_returns_value(
        model in model_strategy(),
        pick in any::<prop::sample::Index>(),
        flag in any::<bool>(),
        number in -90.0f64..10.0,
        text in "[A-Za-z0-9 ]{0,12}",
    ) {
        let mut tree = StateTree::new(model.spec());
        let (address, kind) = {
            let leaf = tree.leaves().nth(pick.index(tree.len())).unwrap();
            (leaf.address().to_string(), leaf.kind())
        };
        let value = value_of(kind, flag, number, &text);

        prop_assert_eq!(tree.set(&address, value.clone()).unwrap(), None);
        prop_assert_eq!(tree.get(&address).unwrap(), Some(&value));

        // Same write again leaves the tree unchanged
        prop_assert_eq!(tree.set(&address, value.clone()).unwrap(), Some(value.clone()));
        prop_assert_eq!(tree.present().count(), 1);
    }

    #[test]
    fn wrong_kind_is_rejected(
        model in model_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree = StateTree::new(model.spec());
        let (address, kind) = {
            let leaf = tree.leaves().nth(pick.index(tree.len())).unwrap();
            (leaf.address().to_string(), leaf.kind())
        };

        let err = tree.set(&address, wrong_value(kind)).unwrap_err();
        let is_mismatch = matches!(err, StateError::TypeMismatch { .. });
        prop_assert!(is_mismatch);
        prop_assert_eq!(tree.get(&address).unwrap(), None);
    }

    #[test]
    fn indices_past_count_are_unknown(model in model_strategy(), extra in 1u32..8) {
        let spec = model.spec();
        let tree = StateTree::new(spec);

        prop_assert!(!tree.contains(&channel::fader(spec.channels + extra)));
        prop_assert!(!tree.contains(&bus::mute(spec.busses + extra)));
        prop_assert!(!tree.contains(&matrix::name(spec.matrices + extra)));
        prop_assert!(!tree.contains(&channel::send_fader(1, spec.busses + extra)));

        let out_of_range = tree.strip(Strip::Channel, spec.channels + extra, StripField::Fader);
        let is_out_of_range = matches!(out_of_range, Err(StateError::OutOfRangeIndex { .. }));
        prop_assert!(is_out_of_range);
    }
}

#[test]
fn every_address_allocated_once() {
    for id in ModelId::all() {
        let tree = StateTree::new(id.spec());
        let addresses: HashSet<_> = tree.leaves().map(|leaf| leaf.address()).collect();
        assert_eq!(addresses.len(), tree.len(), "model {}", id);
    }
}

#[test]
fn string_and_typed_lookup_agree() {
    let tree = StateTree::new(&FULL);
    for leaf in tree.leaves() {
        let by_key = tree.leaf_by_key(leaf.key()).unwrap();
        assert_eq!(by_key.address(), leaf.address());
        assert_eq!(by_key.kind(), leaf.kind());
    }
}

#[test]
fn sends_skip_own_index() {
    let tree = StateTree::new(&FULL);
    let n = FULL.busses as usize;
    assert_eq!(tree.send_count(Strip::Bus), n * (n - 1));

    for index in 1..=FULL.busses {
        assert!(!tree.contains(&bus::send_fader(index, index)));
    }
    assert!(tree.contains(&bus::send_fader(1, 2)));
    assert!(!tree.contains(&address::main::send_fader(2, 2)));
    assert!(tree.contains(&address::main::send_fader(2, 3)));
    assert_eq!(tree.send_count(Strip::Matrix), 0);

    let self_send = tree.send(Strip::Bus, 3, 3, SendField::Fader);
    assert!(matches!(self_send, Err(StateError::UnknownAddress(_))));
}

#[test]
fn fader_scenario() {
    let mut tree = StateTree::new(&FULL);
    let address = channel::fader(1);
    assert_eq!(address, "/ch/1/fdr");

    assert_eq!(tree.get(&address).unwrap(), None);
    tree.set(&address, -12.5).unwrap();
    assert_eq!(tree.get(&address).unwrap(), Some(&LeafValue::Number(-12.5)));
    assert_eq!(
        tree.strip(Strip::Channel, 1, StripField::Fader)
            .unwrap()
            .value(),
        Some(&LeafValue::Number(-12.5))
    );

    assert!(matches!(
        tree.get("/ch/1/send/1/fdr"),
        Err(StateError::UnknownAddress(_))
    ));
    assert!(matches!(
        tree.set(&address, "loud"),
        Err(StateError::TypeMismatch { .. })
    ));
}

#[test]
fn optional_capabilities_follow_model() {
    let full = StateTree::new(ModelId::Full.spec());
    let compact = StateTree::new(ModelId::Compact.spec());
    let rack = StateTree::new(ModelId::Rack.spec());

    assert!(full.contains("/io/in/AUX/1/name"));
    assert!(!compact.contains("/io/in/AUX/1/name"));
    assert!(full.contains("/$ctl/gpio/1/$state"));
    assert!(!rack.contains("/$ctl/gpio/1/$state"));
    assert!(full.contains("/$ctl/user/1/1/4/name"));
    assert!(!rack.contains("/$ctl/user/1/1/4/name"));
}

#[test]
fn subscriptions_match_allocation() {
    for id in ModelId::all() {
        let tree = StateTree::new(id.spec());
        let subs = variables::subscriptions(id.spec());
        assert_eq!(subs.len(), tree.len());
        for (sub, leaf) in subs.iter().zip(tree.leaves()) {
            assert_eq!(sub.address, leaf.address());
            assert_eq!(sub.address, leaf.key().address());
        }
        let keys: HashSet<&LeafKey> = tree.leaves().map(|leaf| leaf.key()).collect();
        assert_eq!(keys.len(), tree.len());
    }
}
