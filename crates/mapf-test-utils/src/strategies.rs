//! Proptest strategies for motion records.

use proptest::prelude::*;

/// One of the five recognised action symbols.
pub fn arb_action_symbol() -> impl Strategy<Value = char> {
    prop_oneof![Just('u'), Just('d'), Just('l'), Just('r'), Just('w')]
}

/// A single run: optional count (1..=20) followed by a symbol.
pub fn arb_run() -> impl Strategy<Value = String> {
    (proptest::option::of(1u64..=20), arb_action_symbol()).prop_map(|(count, sym)| match count {
        Some(n) => format!("{n}{sym}"),
        None => sym.to_string(),
    })
}

/// A well-formed record of up to `max_runs` runs.
pub fn arb_record(max_runs: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_run(), 0..=max_runs).prop_map(|runs| runs.concat())
}
