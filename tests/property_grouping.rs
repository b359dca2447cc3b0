//! Property tests for parameter grouping
//!
//! Grouping invariants that must hold for any model and override table:
//! - Every trainable parameter lands in exactly one group
//! - Group 0 holds exactly the parameters without an override
//! - One extra group per distinct override set, in sorted order
//! - The grouping does not depend on parameter insertion order

use ajustar::config::{build_optimizer, OptimizerConfig};
use ajustar::nn::ParamStore;
use ajustar::optim::{Hyperparams, Optimizer};
use ajustar::{OverrideTable, Tensor};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

const LR_POOL: [f64; 4] = [0.1, 0.2, 0.05, 0.3];

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Per-parameter override choice plus a permutation of the parameter indices
fn choices_and_order() -> impl Strategy<Value = (Vec<Option<usize>>, Vec<usize>)> {
    vec(proptest::option::of(0..LR_POOL.len()), 1..12).prop_flat_map(|choices| {
        let order: Vec<usize> = (0..choices.len()).collect();
        (Just(choices), Just(order).prop_shuffle())
    })
}

fn setup(choices: &[Option<usize>]) -> (Vec<(String, Tensor)>, OverrideTable) {
    let params: Vec<(String, Tensor)> =
        (0..choices.len()).map(|i| (format!("p{i}"), Tensor::zeros(i + 1, true))).collect();

    let mut overrides = OverrideTable::new();
    for (i, choice) in choices.iter().enumerate() {
        if let Some(k) = choice {
            overrides.set(format!("p{i}"), Hyperparams::new().with("lr", LR_POOL[*k]));
        }
    }
    (params, overrides)
}

/// Group membership as parameter names
fn group_names(optimizer: &dyn Optimizer, params: &[(String, Tensor)]) -> Vec<BTreeSet<String>> {
    optimizer
        .param_groups()
        .iter()
        .map(|group| {
            group
                .params
                .iter()
                .filter_map(|t| params.iter().find(|(_, p)| p.ptr_eq(t)).map(|(n, _)| n.clone()))
                .collect()
        })
        .collect()
}

fn sgd() -> OptimizerConfig {
    OptimizerConfig::new("SGD", Hyperparams::new().with("lr", 1.0))
}

// =============================================================================
// Grouping Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_every_parameter_in_exactly_one_group(choices in vec(proptest::option::of(0..4usize), 1..12)) {
        let (params, overrides) = setup(&choices);
        let model: ParamStore = params.iter().cloned().collect();
        let optimizer = build_optimizer(&sgd(), &model, &overrides).expect("valid config");

        prop_assert_eq!(optimizer.num_params(), params.len());
        let names = group_names(optimizer.as_ref(), &params);
        let union: BTreeSet<&String> = names.iter().flatten().collect();
        prop_assert_eq!(union.len(), params.len());
    }

    #[test]
    fn prop_group_zero_holds_unoverridden(choices in vec(proptest::option::of(0..4usize), 1..12)) {
        let (params, overrides) = setup(&choices);
        let model: ParamStore = params.iter().cloned().collect();
        let optimizer = build_optimizer(&sgd(), &model, &overrides).expect("valid config");

        let expected = choices.iter().filter(|c| c.is_none()).count();
        prop_assert_eq!(optimizer.param_groups()[0].len(), expected);
        prop_assert!((optimizer.param_groups()[0].lr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_one_group_per_distinct_override(choices in vec(proptest::option::of(0..4usize), 1..12)) {
        let (params, overrides) = setup(&choices);
        let model: ParamStore = params.iter().cloned().collect();
        let optimizer = build_optimizer(&sgd(), &model, &overrides).expect("valid config");

        let distinct: BTreeSet<usize> = choices.iter().flatten().copied().collect();
        prop_assert_eq!(optimizer.param_groups().len(), 1 + distinct.len());

        let lrs: Vec<f64> = optimizer.param_groups()[1..].iter().map(|g| g.lr()).collect();
        let mut sorted = lrs.clone();
        sorted.sort_by(f64::total_cmp);
        prop_assert_eq!(lrs, sorted);
    }

    #[test]
    fn prop_grouping_independent_of_insertion_order((choices, order) in choices_and_order()) {
        let (params, overrides) = setup(&choices);
        let forward: ParamStore = params.iter().cloned().collect();
        let shuffled: ParamStore = order.iter().map(|&i| params[i].clone()).collect();

        let a = build_optimizer(&sgd(), &forward, &overrides).expect("valid config");
        let b = build_optimizer(&sgd(), &shuffled, &overrides).expect("valid config");

        prop_assert_eq!(group_names(a.as_ref(), &params), group_names(b.as_ref(), &params));
    }
}

// =============================================================================
// Hyperparams Ordering Properties
// =============================================================================

fn hyperparams() -> impl Strategy<Value = Hyperparams> {
    vec(("[a-d]", -3i64..3), 0..4)
        .prop_map(|kv| kv.into_iter().fold(Hyperparams::new(), |hp, (k, v)| hp.with(k, v)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_ordering_is_antisymmetric(a in hyperparams(), b in hyperparams()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, a.cmp(&b).is_eq());
    }

    #[test]
    fn prop_integer_and_float_values_coincide(v in -1000i64..1000) {
        let int = Hyperparams::new().with("lr", v);
        let float = Hyperparams::new().with("lr", v as f64);
        prop_assert_eq!(int, float);
    }
}

/// Integers and floats clustered around 2^53, where f64 loses integer precision
fn large_number() -> impl Strategy<Value = serde_json::Value> {
    const BASE: i64 = 1 << 53;
    prop_oneof![
        (-4i64..4).prop_map(|d| serde_json::json!(BASE + d)),
        (-4i64..4).prop_map(|d| serde_json::json!((BASE + d) as f64)),
        (-4i64..4).prop_map(|d| serde_json::json!(-(BASE + d))),
        (-4i64..4).prop_map(|d| serde_json::json!(-((BASE + d) as f64))),
        prop_oneof![Just(0.0), Just(-0.0), Just(0.5)].prop_map(|f| serde_json::json!(f)),
        (-2i64..2).prop_map(|i| serde_json::json!(i)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_ordering_is_transitive(a in large_number(), b in large_number(), c in large_number()) {
        let a = Hyperparams::new().with("x", a);
        let b = Hyperparams::new().with("x", b);
        let c = Hyperparams::new().with("x", c);

        if a == b && b == c {
            prop_assert_eq!(&a, &c);
        }
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn prop_dedup_independent_of_insertion_order(
        values in vec(large_number(), 1..8).prop_shuffle()
    ) {
        let forward: BTreeSet<Hyperparams> =
            values.iter().map(|v| Hyperparams::new().with("x", v.clone())).collect();
        let backward: BTreeSet<Hyperparams> =
            values.iter().rev().map(|v| Hyperparams::new().with("x", v.clone())).collect();
        prop_assert_eq!(forward.len(), backward.len());
        for (l, r) in forward.iter().zip(&backward) {
            prop_assert_eq!(l, r);
        }
    }
}
