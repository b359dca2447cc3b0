//! Cosine annealing learning rate scheduler

use serde::Deserialize;
use std::f64::consts::PI;

use super::{EpochScheduler, Schedule};

/// Cosine Annealing Learning Rate Scheduler
///
/// Decreases the learning rate following a cosine curve from the base rate to eta_min.
///
/// Formula: lr_t = eta_min + 0.5 * (lr_base - eta_min) * (1 + cos(π * t / T))
///
/// Where:
/// - t is the current epoch
/// - T is `T_max`
///
/// Past `T_max` the rate stays at eta_min.
pub type CosineAnnealingLR = EpochScheduler<CosineAnnealing>;

/// Parameters of [`CosineAnnealingLR`]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CosineAnnealing {
    #[serde(rename = "T_max", alias = "t_max")]
    pub t_max: usize,
    #[serde(default)]
    pub eta_min: f64,
}

impl Schedule for CosineAnnealing {
    const NAME: &'static str = "CosineAnnealingLR";

    fn validate(&self) -> Result<(), String> {
        if self.t_max == 0 {
            return Err("T_max must be > 0".to_string());
        }
        Ok(())
    }

    fn lr(&self, base_lr: f64, epoch: usize) -> f64 {
        if epoch >= self.t_max {
            return self.eta_min;
        }

        let progress = epoch as f64 / self.t_max as f64;
        let cosine_decay = 0.5 * (1.0 + (PI * progress).cos());
        self.eta_min + (base_lr - self.eta_min) * cosine_decay
    }
}
