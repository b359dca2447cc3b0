//! Linear warmup learning rate scheduler

use serde::Deserialize;

use super::{EpochScheduler, Schedule};

/// Linear Warmup Learning Rate Scheduler
///
/// Linearly increases learning rate from 0 to the base rate over warmup_steps.
/// After warmup, maintains the base rate.
///
/// Formula: lr_t = lr_base * min(1, t / warmup_steps)
pub type LinearWarmupLR = EpochScheduler<LinearWarmup>;

/// Parameters of [`LinearWarmupLR`]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearWarmup {
    pub warmup_steps: usize,
}

impl Schedule for LinearWarmup {
    const NAME: &'static str = "LinearWarmupLR";

    fn lr(&self, base_lr: f64, epoch: usize) -> f64 {
        if self.warmup_steps == 0 {
            return base_lr;
        }

        let progress = (epoch as f64 / self.warmup_steps as f64).min(1.0);
        base_lr * progress
    }
}
