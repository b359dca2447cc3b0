//! Learning rate schedulers
//!
//! Provides learning rate scheduling strategies for training:
//! - `StepLR` - Step decay by factor every N epochs
//! - `MultiStepLR` - Decay by factor at each milestone epoch
//! - `ExponentialLR` - Decay by factor every epoch
//! - `CosineAnnealingLR` - Smooth cosine decay
//! - `LinearWarmupLR` - Linear warmup from 0 to target
//! - `WarmupCosineDecayLR` - Combined warmup + cosine decay
//!
//! A scheduler reads each group's learning rate when it is built and treats it
//! as that group's base rate. Groups added to the optimizer afterwards are not
//! scheduled.

mod cosine_annealing;
mod exponential;
mod linear_warmup;
mod multi_step;
mod step_decay;
mod warmup_cosine_decay;

#[cfg(test)]
mod tests;

pub use cosine_annealing::{CosineAnnealing, CosineAnnealingLR};
pub use exponential::{ExponentialDecay, ExponentialLR};
pub use linear_warmup::{LinearWarmup, LinearWarmupLR};
pub use multi_step::{MultiStepDecay, MultiStepLR};
pub use step_decay::{StepDecay, StepLR};
pub use warmup_cosine_decay::{WarmupCosineDecay, WarmupCosineDecayLR};

use serde::de::DeserializeOwned;
use std::any::Any;

use super::{Hyperparams, Optimizer, ParamGroup};
use crate::error::{Error, Result};

/// Learning rate scheduler trait
pub trait LRScheduler {
    /// Registry name of the scheduler type
    fn name(&self) -> &str;

    /// Advance one epoch and write the new learning rates into `optimizer`
    fn step(&mut self, optimizer: &mut dyn Optimizer);

    /// Epochs stepped so far
    fn last_epoch(&self) -> usize;

    /// Learning rate of each scheduled group after the last step
    fn get_last_lr(&self) -> &[f64];

    /// Learning rate of each group when the scheduler was built
    fn base_lrs(&self) -> &[f64];

    /// Access to the concrete type
    fn as_any(&self) -> &dyn Any;
}

/// Closed-form learning rate as a function of epoch
///
/// Implementors deserialize directly from the `PARAM` mapping.
pub trait Schedule: DeserializeOwned + 'static {
    /// Registry name of the scheduler
    const NAME: &'static str;

    /// Check cross-field constraints
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }

    /// Learning rate for a group with `base_lr` at `epoch`
    fn lr(&self, base_lr: f64, epoch: usize) -> f64;
}

/// Scheduler driving every group of an optimizer through one `Schedule`
#[derive(Debug)]
pub struct EpochScheduler<S: Schedule> {
    schedule: S,
    base_lrs: Vec<f64>,
    last_lrs: Vec<f64>,
    last_epoch: usize,
}

impl<S: Schedule> EpochScheduler<S> {
    /// Build the scheduler and apply the epoch-0 learning rate to `optimizer`
    pub fn new(optimizer: &mut dyn Optimizer, param: &Hyperparams) -> Result<Self> {
        let schedule: S = param.to_typed(S::NAME)?;
        schedule.validate().map_err(|msg| Error::invalid_param(S::NAME, msg))?;
        Ok(Self::with_schedule(optimizer, schedule))
    }

    /// Build from an already constructed schedule
    pub fn with_schedule(optimizer: &mut dyn Optimizer, schedule: S) -> Self {
        let base_lrs: Vec<f64> = optimizer.param_groups().iter().map(ParamGroup::lr).collect();
        let mut scheduler = Self { schedule, last_lrs: base_lrs.clone(), base_lrs, last_epoch: 0 };
        scheduler.apply(optimizer);
        scheduler
    }

    /// The underlying schedule
    pub fn schedule(&self) -> &S {
        &self.schedule
    }

    fn apply(&mut self, optimizer: &mut dyn Optimizer) {
        for (index, base_lr) in self.base_lrs.iter().enumerate() {
            let lr = self.schedule.lr(*base_lr, self.last_epoch);
            optimizer.set_group_lr(index, lr);
            self.last_lrs[index] = lr;
        }
    }
}

impl<S: Schedule> LRScheduler for EpochScheduler<S> {
    fn name(&self) -> &str {
        S::NAME
    }

    fn step(&mut self, optimizer: &mut dyn Optimizer) {
        self.last_epoch += 1;
        self.apply(optimizer);
    }

    fn last_epoch(&self) -> usize {
        self.last_epoch
    }

    fn get_last_lr(&self) -> &[f64] {
        &self.last_lrs
    }

    fn base_lrs(&self) -> &[f64] {
        &self.base_lrs
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Construct a boxed scheduler for schedule `S`; usable as a registry constructor
pub fn construct<S: Schedule>(
    optimizer: &mut dyn Optimizer,
    param: &Hyperparams,
) -> Result<Box<dyn LRScheduler>> {
    Ok(Box::new(EpochScheduler::<S>::new(optimizer, param)?))
}
