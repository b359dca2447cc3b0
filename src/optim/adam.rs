//! Adam optimizer

use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};

use super::{GroupedOptimizer, UpdateRule};

/// Adam optimizer (weight decay applied as L2 penalty on the gradient)
pub type Adam = GroupedOptimizer<AdamRule>;

/// Adam hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdamOptions {
    pub lr: f64,
    pub betas: (f64, f64),
    pub eps: f64,
    pub weight_decay: f64,
    pub amsgrad: bool,
}

impl Default for AdamOptions {
    fn default() -> Self {
        Self { lr: 1e-3, betas: (0.9, 0.999), eps: 1e-8, weight_decay: 0.0, amsgrad: false }
    }
}

/// Moment estimates for one parameter
#[derive(Debug, Default)]
pub struct AdamState {
    t: i32,
    m: Option<Array1<f32>>,
    v: Option<Array1<f32>>,
    v_max: Option<Array1<f32>>,
}

impl AdamState {
    /// Number of updates applied so far
    pub fn step_count(&self) -> i32 {
        self.t
    }
}

pub(crate) fn validate_adam_like(
    lr: f64,
    betas: (f64, f64),
    eps: f64,
    weight_decay: f64,
) -> Result<(), String> {
    if lr < 0.0 {
        return Err(format!("Invalid learning rate: {lr}"));
    }
    if eps < 0.0 {
        return Err(format!("Invalid epsilon value: {eps}"));
    }
    if !(0.0..1.0).contains(&betas.0) {
        return Err(format!("Invalid beta parameter at index 0: {}", betas.0));
    }
    if !(0.0..1.0).contains(&betas.1) {
        return Err(format!("Invalid beta parameter at index 1: {}", betas.1));
    }
    if weight_decay < 0.0 {
        return Err(format!("Invalid weight_decay value: {weight_decay}"));
    }
    Ok(())
}

/// Bias-corrected Adam step shared by Adam and AdamW
///
/// θ_t = θ_{t-1} - lr / (1 - β1^t) * m_t / (√v_t / √(1 - β2^t) + ε)
pub(crate) fn adam_step(
    state: &mut AdamState,
    param: &mut Array1<f32>,
    grad: &Array1<f32>,
    lr: f32,
    (beta1, beta2): (f32, f32),
    eps: f32,
    amsgrad: bool,
) {
    let n = grad.len();
    state.t += 1;

    let m = state.m.get_or_insert_with(|| Array1::zeros(n));
    let v = state.v.get_or_insert_with(|| Array1::zeros(n));
    Zip::from(&mut *m).and(&mut *v).and(grad).for_each(|m, v, &g| {
        *m = beta1 * *m + (1.0 - beta1) * g;
        *v = beta2 * *v + (1.0 - beta2) * g * g;
    });

    let second = if amsgrad {
        let v_max = state.v_max.get_or_insert_with(|| Array1::zeros(n));
        Zip::from(&mut *v_max).and(&*v).for_each(|vm, &v| *vm = vm.max(v));
        &*v_max
    } else {
        &*v
    };

    let bias1 = 1.0 - beta1.powi(state.t);
    let bias2_sqrt = (1.0 - beta2.powi(state.t)).sqrt();
    let step_size = lr / bias1;

    Zip::from(param).and(&*m).and(second).for_each(|p, &m, &v| {
        *p -= step_size * m / (v.sqrt() / bias2_sqrt + eps);
    });
}

/// Update rule behind [`Adam`]
pub struct AdamRule;

impl UpdateRule for AdamRule {
    const NAME: &'static str = "Adam";
    type Options = AdamOptions;
    type State = AdamState;

    fn validate(o: &AdamOptions) -> Result<(), String> {
        validate_adam_like(o.lr, o.betas, o.eps, o.weight_decay)
    }

    fn update(o: &AdamOptions, state: &mut AdamState, param: &mut Array1<f32>, grad: &Array1<f32>) {
        let grad = if o.weight_decay != 0.0 {
            grad + &(&*param * o.weight_decay as f32)
        } else {
            grad.clone()
        };
        let betas = (o.betas.0 as f32, o.betas.1 as f32);
        adam_step(state, param, &grad, o.lr as f32, betas, o.eps as f32, o.amsgrad);
    }
}
