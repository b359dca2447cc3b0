//! Optimizers, parameter groups and learning rate schedulers

mod adam;
mod adamw;
mod hyper;
mod lion;
mod optimizer;
mod overrides;
mod param_group;
pub mod scheduler;
mod sgd;

pub use adam::{Adam, AdamOptions, AdamRule, AdamState};
pub use adamw::{AdamW, AdamWOptions, AdamWRule};
pub use hyper::{cmp_value, Hyperparams};
pub use lion::{Lion, LionOptions, LionRule, LionState};
pub use optimizer::{construct, GroupedOptimizer, Optimizer, UpdateRule};
pub use overrides::OverrideTable;
pub use param_group::{ParamGroup, LR_KEY};
pub use scheduler::{
    CosineAnnealingLR, EpochScheduler, ExponentialLR, LRScheduler, LinearWarmupLR, MultiStepLR,
    Schedule, StepLR, WarmupCosineDecayLR,
};
pub use sgd::{SgdOptions, SgdRule, SgdState, SGD};
