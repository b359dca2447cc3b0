//! Step decay learning rate scheduler

use serde::Deserialize;

use super::{EpochScheduler, Schedule};

/// Step Decay Learning Rate Scheduler
///
/// Multiplies learning rate by gamma every step_size epochs.
///
/// Formula: lr_t = lr_initial * gamma^(floor(epoch / step_size))
pub type StepLR = EpochScheduler<StepDecay>;

/// Parameters of [`StepLR`]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDecay {
    /// Decay LR every step_size epochs
    pub step_size: usize,
    /// Multiplicative factor (e.g., 0.1 for 10x reduction)
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

fn default_gamma() -> f64 {
    0.1
}

impl Schedule for StepDecay {
    const NAME: &'static str = "StepLR";

    fn validate(&self) -> Result<(), String> {
        if self.step_size == 0 {
            return Err("step_size must be > 0".to_string());
        }
        Ok(())
    }

    fn lr(&self, base_lr: f64, epoch: usize) -> f64 {
        let num_decays = epoch / self.step_size;
        base_lr * self.gamma.powi(num_decays as i32)
    }
}
