use std::collections::HashMap;
use std::rc::Rc;

use proptest::prelude::*;
use stackgrid::core::{AxisPadding, AxisValue, DomainFilter, MemorySource, StackingEngine};

fn layer_strategy() -> impl Strategy<Value = Vec<(u8, f64)>> {
    prop::collection::vec((0u8..12, -1_000.0f64..1_000.0), 0..12)
}

fn build_stack(layers: &[Vec<(u8, f64)>], hidden: &[bool]) -> StackingEngine {
    let mut stack = StackingEngine::new();
    for (index, pairs) in layers.iter().enumerate() {
        let mut unique: HashMap<u8, f64> = HashMap::new();
        for (key, value) in pairs {
            unique.insert(*key, *value);
        }
        let source = MemorySource::from_pairs(
            unique
                .into_iter()
                .map(|(key, value)| (f64::from(key), value)),
        );
        let id = stack.add_layer(Rc::new(source), None, None);
        if hidden.get(index).copied().unwrap_or(false) {
            stack.hide_layer(&id);
        }
    }
    stack
}

proptest! {
    #[test]
    fn baseline_equals_sum_of_visible_layers_below(
        layers in prop::collection::vec(layer_strategy(), 1..6),
        hidden in prop::collection::vec(any::<bool>(), 6)
    ) {
        let stack = build_stack(&layers, &hidden);
        let stacked = stack.compute_stacked_layers(&DomainFilter::All);

        let visible = hidden.iter().take(layers.len()).filter(|hidden| !**hidden).count();
        prop_assert_eq!(stacked.len(), visible);

        let mut totals: HashMap<AxisValue, f64> = HashMap::new();
        for layer in &stacked {
            for point in &layer.points {
                let expected = totals.get(&point.key).copied().unwrap_or(0.0);
                prop_assert!((point.baseline - expected).abs() <= 1e-9);
            }
            for point in &layer.points {
                *totals.entry(point.key.clone()).or_insert(0.0) += point.value.unwrap_or(0.0);
            }
        }
    }

    #[test]
    fn hiding_then_showing_restores_stacked_output(
        layers in prop::collection::vec(layer_strategy(), 1..6),
        target in 0usize..6
    ) {
        let mut stack = build_stack(&layers, &[]);
        let before = stack.compute_stacked_layers(&DomainFilter::All);

        let id = (target % layers.len()).to_string();
        prop_assert!(stack.hide_layer(&id));
        prop_assert!(stack.show_layer(&id));

        let after = stack.compute_stacked_layers(&DomainFilter::All);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn numeric_padding_round_trip(
        layers in prop::collection::vec(layer_strategy(), 1..4),
        padding in 0.0f64..500.0
    ) {
        let mut stack = build_stack(&layers, &[]);
        stack.set_value_padding(AxisPadding::Absolute(padding)).expect("padding");
        stack.set_key_padding(AxisPadding::Absolute(padding)).expect("padding");
        let stacked = stack.compute_stacked_layers(&DomainFilter::All);

        if let Some((raw_min, raw_max)) = StackingEngine::value_extent(&stacked) {
            let min = stack.value_axis_min(&stacked).expect("min");
            let max = stack.value_axis_max(&stacked).expect("max");
            let expected = (raw_max - raw_min) + 2.0 * padding;
            prop_assert!(((max - min) - expected).abs() <= 1e-6);
        }
        if let Some((raw_min, raw_max)) = StackingEngine::key_extent(&stacked) {
            let min = stack.key_axis_min(&stacked).expect("min");
            let max = stack.key_axis_max(&stacked).expect("max");
            let expected = (raw_max - raw_min) + 2.0 * padding;
            prop_assert!(((max - min) - expected).abs() <= 1e-6);
        }
    }

    #[test]
    fn percent_padding_scales_with_raw_span(
        layers in prop::collection::vec(layer_strategy(), 1..4),
        percent in 0.0f64..100.0
    ) {
        let mut stack = build_stack(&layers, &[]);
        stack.set_value_padding(AxisPadding::Percent(percent)).expect("padding");
        let stacked = stack.compute_stacked_layers(&DomainFilter::All);

        if let Some((raw_min, raw_max)) = StackingEngine::value_extent(&stacked) {
            let span = raw_max - raw_min;
            let min = stack.value_axis_min(&stacked).expect("min");
            let max = stack.value_axis_max(&stacked).expect("max");
            let expected = span * (1.0 + 2.0 * percent / 100.0);
            prop_assert!(((max - min) - expected).abs() <= 1e-6);
        }
    }
}
