//! Lion optimizer (EvoLved Sign Momentum)
//!
//! Sign-based update with a single momentum buffer:
//!
//! c_t = β1 * m_{t-1} + (1 - β1) * g_t
//! θ_t = θ_{t-1} * (1 - lr * λ) - lr * sign(c_t)
//! m_t = β2 * m_{t-1} + (1 - β2) * g_t

use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};

use super::{GroupedOptimizer, UpdateRule};

/// Lion optimizer
pub type Lion = GroupedOptimizer<LionRule>;

/// Lion hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LionOptions {
    pub lr: f64,
    pub betas: (f64, f64),
    pub weight_decay: f64,
}

impl Default for LionOptions {
    fn default() -> Self {
        Self { lr: 1e-4, betas: (0.9, 0.99), weight_decay: 0.0 }
    }
}

#[derive(Debug, Default)]
pub struct LionState {
    m: Option<Array1<f32>>,
}

/// Update rule behind [`Lion`]
pub struct LionRule;

impl UpdateRule for LionRule {
    const NAME: &'static str = "Lion";
    type Options = LionOptions;
    type State = LionState;

    fn validate(o: &LionOptions) -> Result<(), String> {
        super::adam::validate_adam_like(o.lr, o.betas, 0.0, o.weight_decay)
    }

    fn update(o: &LionOptions, state: &mut LionState, param: &mut Array1<f32>, grad: &Array1<f32>) {
        let lr = o.lr as f32;
        let (beta1, beta2) = (o.betas.0 as f32, o.betas.1 as f32);
        let decay = 1.0 - lr * o.weight_decay as f32;
        let m = state.m.get_or_insert_with(|| Array1::zeros(grad.len()));

        Zip::from(param).and(m).and(grad).for_each(|p, m, &g| {
            let c = beta1 * *m + (1.0 - beta1) * g;
            let sign = if c > 0.0 {
                1.0
            } else if c < 0.0 {
                -1.0
            } else {
                0.0
            };
            *p = *p * decay - lr * sign;
            *m = beta2 * *m + (1.0 - beta2) * g;
        });
    }
}
