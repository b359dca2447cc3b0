//! Stochastic Gradient Descent optimizer

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::{GroupedOptimizer, UpdateRule};

/// SGD optimizer with optional momentum, dampening, Nesterov and weight decay
pub type SGD = GroupedOptimizer<SgdRule>;

/// SGD hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SgdOptions {
    pub lr: f64,
    pub momentum: f64,
    pub dampening: f64,
    pub weight_decay: f64,
    pub nesterov: bool,
}

impl Default for SgdOptions {
    fn default() -> Self {
        Self { lr: 1e-3, momentum: 0.0, dampening: 0.0, weight_decay: 0.0, nesterov: false }
    }
}

/// Momentum buffer, created on the first step
#[derive(Debug, Default)]
pub struct SgdState {
    velocity: Option<Array1<f32>>,
}

/// Update rule behind [`SGD`]
pub struct SgdRule;

impl UpdateRule for SgdRule {
    const NAME: &'static str = "SGD";
    type Options = SgdOptions;
    type State = SgdState;

    fn validate(o: &SgdOptions) -> Result<(), String> {
        if o.lr < 0.0 {
            return Err(format!("Invalid learning rate: {}", o.lr));
        }
        if o.momentum < 0.0 {
            return Err(format!("Invalid momentum value: {}", o.momentum));
        }
        if o.weight_decay < 0.0 {
            return Err(format!("Invalid weight_decay value: {}", o.weight_decay));
        }
        if o.nesterov && (o.momentum <= 0.0 || o.dampening != 0.0) {
            return Err("Nesterov momentum requires a momentum and zero dampening".to_string());
        }
        Ok(())
    }

    fn update(o: &SgdOptions, state: &mut SgdState, param: &mut Array1<f32>, grad: &Array1<f32>) {
        let lr = o.lr as f32;
        let momentum = o.momentum as f32;

        let mut d_p = grad.clone();
        if o.weight_decay != 0.0 {
            d_p.scaled_add(o.weight_decay as f32, &*param);
        }

        if momentum != 0.0 {
            // v = momentum * v + (1 - dampening) * g
            let velocity = match state.velocity.take() {
                Some(v) => v * momentum + &d_p * (1.0 - o.dampening as f32),
                None => d_p.clone(),
            };

            if o.nesterov {
                d_p.scaled_add(momentum, &velocity);
            } else {
                d_p.assign(&velocity);
            }
            state.velocity = Some(velocity);
        }

        param.scaled_add(-lr, &d_p);
    }
}
