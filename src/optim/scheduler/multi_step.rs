//! Multi-step learning rate scheduler

use serde::Deserialize;

use super::{EpochScheduler, Schedule};

/// Decays the learning rate by gamma once each milestone epoch is reached.
pub type MultiStepLR = EpochScheduler<MultiStepDecay>;

/// Parameters of [`MultiStepLR`]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiStepDecay {
    /// Epochs at which to decay; order does not matter
    pub milestones: Vec<usize>,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

fn default_gamma() -> f64 {
    0.1
}

impl Schedule for MultiStepDecay {
    const NAME: &'static str = "MultiStepLR";

    fn lr(&self, base_lr: f64, epoch: usize) -> f64 {
        // Repeated milestones decay more than once
        let passed = self.milestones.iter().filter(|&&m| m <= epoch).count();
        base_lr * self.gamma.powi(passed as i32)
    }
}
