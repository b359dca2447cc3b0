//! Warmup + cosine decay learning rate scheduler

use serde::Deserialize;
use std::f64::consts::PI;

use super::{EpochScheduler, Schedule};

/// Warmup + Cosine Decay Learning Rate Scheduler
///
/// Combines linear warmup with cosine annealing decay.
/// - Phase 1 (warmup): Linear increase from 0 to the base rate
/// - Phase 2 (decay): Cosine decay from the base rate to eta_min
pub type WarmupCosineDecayLR = EpochScheduler<WarmupCosineDecay>;

/// Parameters of [`WarmupCosineDecayLR`]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarmupCosineDecay {
    /// Number of warmup steps
    pub warmup_steps: usize,
    /// Total training steps (including warmup)
    pub total_steps: usize,
    /// Minimum learning rate (at end)
    #[serde(default)]
    pub eta_min: f64,
}

impl Schedule for WarmupCosineDecay {
    const NAME: &'static str = "WarmupCosineDecayLR";

    fn validate(&self) -> Result<(), String> {
        if self.warmup_steps > self.total_steps {
            return Err(format!(
                "warmup_steps ({}) exceeds total_steps ({})",
                self.warmup_steps, self.total_steps
            ));
        }
        Ok(())
    }

    fn lr(&self, base_lr: f64, epoch: usize) -> f64 {
        if epoch < self.warmup_steps {
            // Warmup phase: linear increase
            let progress = epoch as f64 / self.warmup_steps as f64;
            return base_lr * progress;
        }

        // Cosine decay phase
        let decay_steps = self.total_steps - self.warmup_steps;
        let decay_step = epoch - self.warmup_steps;
        if decay_steps == 0 || decay_step >= decay_steps {
            return self.eta_min;
        }

        let progress = decay_step as f64 / decay_steps as f64;
        let cosine_decay = 0.5 * (1.0 + (PI * progress).cos());
        self.eta_min + (base_lr - self.eta_min) * cosine_decay
    }
}
