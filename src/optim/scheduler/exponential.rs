//! Exponential learning rate scheduler

use serde::Deserialize;

use super::{EpochScheduler, Schedule};

/// Multiplies the learning rate by gamma every epoch.
///
/// Formula: lr_t = lr_initial * gamma^t
pub type ExponentialLR = EpochScheduler<ExponentialDecay>;

/// Parameters of [`ExponentialLR`]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExponentialDecay {
    pub gamma: f64,
}

impl Schedule for ExponentialDecay {
    const NAME: &'static str = "ExponentialLR";

    fn validate(&self) -> Result<(), String> {
        if self.gamma <= 0.0 {
            return Err(format!("gamma must be > 0, got {}", self.gamma));
        }
        Ok(())
    }

    fn lr(&self, base_lr: f64, epoch: usize) -> f64 {
        base_lr * self.gamma.powi(epoch as i32)
    }
}
