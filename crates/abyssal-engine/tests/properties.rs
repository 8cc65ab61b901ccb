//! Property-based tests for the parameter store and the engine.
//!
//! Covers clamping, preset lookup bounds, state round trips and block-size
//! independence with randomized inputs.

use abyssal_core::ChannelLayout;
use abyssal_engine::{Engine, EngineConfig, Param, ParameterSnapshot, ParameterStore, preset_at};
use proptest::prelude::*;

fn snapshot_strategy() -> impl Strategy<Value = ParameterSnapshot> {
    prop::array::uniform7(0.0f32..=1.0)
        .prop_map(|values| ParameterSnapshot::from_values(values, None))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any write leaves every continuous value in [0, 1].
    #[test]
    fn values_stay_normalized(index in 0usize..7, value in prop::num::f32::ANY) {
        let store = ParameterStore::new();
        let param = Param::CONTINUOUS[index];
        store.set(param, value);
        let stored = store.get(param);
        prop_assert!((0.0..=1.0).contains(&stored));
        if !value.is_finite() {
            prop_assert_eq!(stored, param.default_value().unwrap_or(0.0));
        }
    }

    /// Lookup succeeds exactly for indices 0 through 9.
    #[test]
    fn preset_lookup_bounds(index in -100i64..100) {
        prop_assert_eq!(preset_at(index).is_some(), (0..10).contains(&index));
    }

    /// Export then import reproduces every value.
    #[test]
    fn state_round_trip(snapshot in snapshot_strategy(), revelation in prop::option::of(0i64..10)) {
        let source = ParameterStore::new();
        for (param, value) in Param::CONTINUOUS.into_iter().zip(snapshot.values()) {
            source.set(param, value);
        }
        if let Some(index) = revelation {
            source.set_revelation(index);
        }

        let target = ParameterStore::new();
        let bytes = abyssal_engine::state::export(&source).unwrap();
        abyssal_engine::state::import(&target, &bytes).unwrap();
        prop_assert_eq!(target.snapshot(), source.snapshot());
    }

    /// Output does not depend on how the host slices the stream.
    #[test]
    fn block_size_independence(
        snapshot in snapshot_strategy(),
        host_block in 1usize..300,
        max_block in 1usize..300,
    ) {
        let input: Vec<f32> = (0..1200).map(|i| ((i * 37) % 101) as f32 / 101.0 - 0.5).collect();

        let mut reference = Engine::new(EngineConfig::default()).unwrap();
        reference.prepare(48000.0, 1200, ChannelLayout::Mono).unwrap();
        let mut expected = input.clone();
        reference.process_block_with(&mut [&mut expected[..]], &snapshot).unwrap();

        let mut sliced = Engine::new(EngineConfig::default()).unwrap();
        sliced.prepare(48000.0, max_block, ChannelLayout::Mono).unwrap();
        let mut actual = input;
        for chunk in actual.chunks_mut(host_block) {
            sliced.process_block_with(&mut [chunk], &snapshot).unwrap();
        }

        prop_assert_eq!(actual, expected);
    }
}
