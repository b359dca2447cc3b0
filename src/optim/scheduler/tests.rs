//! Tests for learning rate schedulers

use super::*;
use crate::optim::{Optimizer, SGD};
use crate::Tensor;
use approx::assert_abs_diff_eq;

fn sgd(lr: f64) -> SGD {
    SGD::new(vec![Tensor::zeros(2, true)], &Hyperparams::new().with("lr", lr)).expect("valid SGD")
}

fn params(pairs: &[(&str, serde_json::Value)]) -> Hyperparams {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

// =========================================================================
// StepLR tests
// =========================================================================

#[test]
fn test_step_lr_initial() {
    let mut optimizer = sgd(0.1);
    let scheduler =
        StepLR::new(&mut optimizer, &params(&[("step_size", 10.into())])).expect("valid");
    assert_abs_diff_eq!(scheduler.get_last_lr()[0], 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(optimizer.lr(), 0.1, epsilon = 1e-12);
    assert_eq!(scheduler.last_epoch(), 0);
}

#[test]
fn test_step_lr_decays_every_step_size() {
    let mut optimizer = sgd(0.1);
    let mut scheduler = StepLR::new(
        &mut optimizer,
        &params(&[("step_size", 10.into()), ("gamma", 0.5.into())]),
    )
    .expect("valid");

    for _ in 0..9 {
        scheduler.step(&mut optimizer);
    }
    assert_abs_diff_eq!(optimizer.lr(), 0.1, epsilon = 1e-12);

    scheduler.step(&mut optimizer);
    assert_abs_diff_eq!(optimizer.lr(), 0.05, epsilon = 1e-12);

    for _ in 0..10 {
        scheduler.step(&mut optimizer);
    }
    assert_abs_diff_eq!(optimizer.lr(), 0.025, epsilon = 1e-12);
    assert_eq!(scheduler.last_epoch(), 20);
}

#[test]
fn test_step_lr_requires_step_size() {
    let mut optimizer = sgd(0.1);
    let result = StepLR::new(&mut optimizer, &params(&[("gamma", 0.5.into())]));
    assert!(matches!(result, Err(Error::InvalidParam { .. })));
}

#[test]
fn test_step_lr_zero_step_size_rejected() {
    let mut optimizer = sgd(0.1);
    let result = StepLR::new(&mut optimizer, &params(&[("step_size", 0.into())]));
    assert!(result.is_err());
}

// =========================================================================
// MultiStepLR tests
// =========================================================================

#[test]
fn test_multi_step_lr_milestones() {
    let schedule = MultiStepDecay { milestones: vec![30, 10, 20], gamma: 0.1 };
    assert_abs_diff_eq!(schedule.lr(1.0, 9), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(schedule.lr(1.0, 10), 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(schedule.lr(1.0, 25), 0.01, epsilon = 1e-12);
    assert_abs_diff_eq!(schedule.lr(1.0, 100), 0.001, epsilon = 1e-12);
}

#[test]
fn test_multi_step_lr_from_params() {
    let mut optimizer = sgd(1.0);
    let mut scheduler = MultiStepLR::new(
        &mut optimizer,
        &params(&[("milestones", serde_json::json!([2, 4]))]),
    )
    .expect("valid");

    let mut lrs = vec![optimizer.lr()];
    for _ in 0..5 {
        scheduler.step(&mut optimizer);
        lrs.push(optimizer.lr());
    }

    let expected = [1.0, 1.0, 0.1, 0.1, 0.01, 0.01];
    for (got, want) in lrs.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
    }
}

// =========================================================================
// ExponentialLR tests
// =========================================================================

#[test]
fn test_exponential_lr() {
    let mut optimizer = sgd(1.0);
    let mut scheduler =
        ExponentialLR::new(&mut optimizer, &params(&[("gamma", 0.9.into())])).expect("valid");

    for _ in 0..3 {
        scheduler.step(&mut optimizer);
    }
    assert_abs_diff_eq!(optimizer.lr(), 0.729, epsilon = 1e-12);
}

#[test]
fn test_exponential_lr_requires_gamma() {
    let mut optimizer = sgd(1.0);
    assert!(ExponentialLR::new(&mut optimizer, &Hyperparams::new()).is_err());
}

// =========================================================================
// CosineAnnealingLR tests
// =========================================================================

#[test]
fn test_cosine_annealing_initial_lr() {
    let mut optimizer = sgd(1.0);
    let scheduler =
        CosineAnnealingLR::new(&mut optimizer, &params(&[("T_max", 100.into())])).expect("valid");
    // At step 0, should return the base rate
    assert_abs_diff_eq!(scheduler.get_last_lr()[0], 1.0, epsilon = 1e-12);
}

#[test]
fn test_cosine_annealing_midpoint_and_end() {
    let schedule = CosineAnnealing { t_max: 100, eta_min: 0.1 };
    // At midpoint, cos(pi/2) = 0
    assert_abs_diff_eq!(schedule.lr(1.0, 50), 0.55, epsilon = 1e-9);
    assert_abs_diff_eq!(schedule.lr(1.0, 100), 0.1, epsilon = 1e-12);
    // Past T_max, stays at eta_min
    assert_abs_diff_eq!(schedule.lr(1.0, 150), 0.1, epsilon = 1e-12);
}

#[test]
fn test_cosine_annealing_decreases_monotonically() {
    let mut optimizer = sgd(1.0);
    let mut scheduler =
        CosineAnnealingLR::new(&mut optimizer, &params(&[("t_max", 100.into())])).expect("valid");
    let mut prev_lr = optimizer.lr();

    for _ in 0..100 {
        scheduler.step(&mut optimizer);
        let current_lr = optimizer.lr();
        assert!(
            current_lr <= prev_lr,
            "Learning rate should decrease monotonically: prev={prev_lr}, current={current_lr}"
        );
        prev_lr = current_lr;
    }
}

// =========================================================================
// LinearWarmupLR tests
// =========================================================================

#[test]
fn test_linear_warmup_starts_at_zero() {
    let mut optimizer = sgd(0.001);
    let scheduler =
        LinearWarmupLR::new(&mut optimizer, &params(&[("warmup_steps", 100.into())]))
            .expect("valid");
    assert_abs_diff_eq!(optimizer.lr(), 0.0, epsilon = 1e-12);
    // Base rate is remembered from before the warmup was applied
    assert_abs_diff_eq!(scheduler.base_lrs()[0], 0.001, epsilon = 1e-12);
}

#[test]
fn test_linear_warmup_midpoint_and_after() {
    let schedule = LinearWarmup { warmup_steps: 100 };
    assert_abs_diff_eq!(schedule.lr(0.001, 50), 0.0005, epsilon = 1e-12);
    assert_abs_diff_eq!(schedule.lr(0.001, 100), 0.001, epsilon = 1e-12);
    assert_abs_diff_eq!(schedule.lr(0.001, 200), 0.001, epsilon = 1e-12);
    assert_abs_diff_eq!(LinearWarmup { warmup_steps: 0 }.lr(0.001, 0), 0.001, epsilon = 1e-12);
}

// =========================================================================
// WarmupCosineDecayLR tests
// =========================================================================

#[test]
fn test_warmup_cosine_decay_phases() {
    let schedule = WarmupCosineDecay { warmup_steps: 10, total_steps: 110, eta_min: 0.0 };
    assert_abs_diff_eq!(schedule.lr(1.0, 0), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(schedule.lr(1.0, 5), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(schedule.lr(1.0, 10), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(schedule.lr(1.0, 60), 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(schedule.lr(1.0, 110), 0.0, epsilon = 1e-12);
}

#[test]
fn test_warmup_cosine_decay_rejects_long_warmup() {
    let mut optimizer = sgd(1.0);
    let result = WarmupCosineDecayLR::new(
        &mut optimizer,
        &params(&[("warmup_steps", 20.into()), ("total_steps", 10.into())]),
    );
    assert!(result.is_err());
}

// =========================================================================
// Group handling
// =========================================================================

#[test]
fn test_scheduler_keeps_per_group_base_lrs() {
    let mut optimizer = sgd(0.1);
    optimizer
        .add_param_group(vec![Tensor::zeros(1, true)], &Hyperparams::new().with("lr", 1.0))
        .expect("valid group");

    let mut scheduler = StepLR::new(
        &mut optimizer,
        &params(&[("step_size", 1.into()), ("gamma", 0.5.into())]),
    )
    .expect("valid");
    scheduler.step(&mut optimizer);

    let lrs: Vec<f64> = optimizer.param_groups().iter().map(ParamGroup::lr).collect();
    assert_abs_diff_eq!(lrs[0], 0.05, epsilon = 1e-12);
    assert_abs_diff_eq!(lrs[1], 0.5, epsilon = 1e-12);
    assert_eq!(scheduler.get_last_lr(), lrs.as_slice());
}

#[test]
fn test_unknown_scheduler_param_rejected() {
    let mut optimizer = sgd(0.1);
    let result =
        StepLR::new(&mut optimizer, &params(&[("step_size", 1.into()), ("T_max", 5.into())]));
    assert!(matches!(result, Err(Error::InvalidParam { .. })));
}

#[test]
fn test_construct_boxes_scheduler() {
    let mut optimizer = sgd(0.1);
    let scheduler = construct::<ExponentialDecay>(&mut optimizer, &params(&[("gamma", 0.5.into())]))
        .expect("valid");
    assert_eq!(scheduler.name(), "ExponentialLR");
    assert!(scheduler.as_any().downcast_ref::<ExponentialLR>().is_some());
}
