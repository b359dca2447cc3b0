//! AdamW optimizer (Adam with decoupled Weight decay)

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::adam::{adam_step, validate_adam_like, AdamState};
use super::{GroupedOptimizer, UpdateRule};

/// AdamW optimizer
///
/// AdamW decouples weight decay from the gradient-based update, making it more
/// effective than L2 regularization. Instead of adding weight decay to the gradient,
/// it applies weight decay directly to the parameters.
///
/// Standard Adam with L2: θ_t = θ_{t-1} - lr * (m_t / (√v_t + ε) + λ * θ_{t-1})
/// AdamW: θ_t = (1 - lr * λ) * θ_{t-1} - lr * m_t / (√v_t + ε)
pub type AdamW = GroupedOptimizer<AdamWRule>;

/// AdamW hyperparameters (weight_decay defaults to 0.01)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdamWOptions {
    pub lr: f64,
    pub betas: (f64, f64),
    pub eps: f64,
    pub weight_decay: f64,
    pub amsgrad: bool,
}

impl Default for AdamWOptions {
    fn default() -> Self {
        Self { lr: 1e-3, betas: (0.9, 0.999), eps: 1e-8, weight_decay: 1e-2, amsgrad: false }
    }
}

/// Update rule behind [`AdamW`]
pub struct AdamWRule;

impl UpdateRule for AdamWRule {
    const NAME: &'static str = "AdamW";
    type Options = AdamWOptions;
    type State = AdamState;

    fn validate(o: &AdamWOptions) -> Result<(), String> {
        validate_adam_like(o.lr, o.betas, o.eps, o.weight_decay)
    }

    fn update(
        o: &AdamWOptions,
        state: &mut AdamState,
        param: &mut Array1<f32>,
        grad: &Array1<f32>,
    ) {
        let lr = o.lr as f32;
        if o.weight_decay != 0.0 {
            param.mapv_inplace(|p| p * (1.0 - lr * o.weight_decay as f32));
        }
        let betas = (o.betas.0 as f32, o.betas.1 as f32);
        adam_step(state, param, grad, lr, betas, o.eps as f32, o.amsgrad);
    }
}
