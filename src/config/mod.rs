//! Configuration: schema, loading and optimizer/scheduler construction
//!
//! A configuration names a component by `TYPE` and passes its constructor
//! arguments as `PARAM`:
//!
//! ```yaml
//! OPTIM:
//!   TYPE: AdamW
//!   PARAM:
//!     lr: 0.0003
//!     weight_decay: 0.01
//! LR_SCHEDULER:
//!   TYPE: CosineAnnealingLR
//!   PARAM:
//!     T_max: 100
//! OVERRIDES:
//!   head.bias:
//!     weight_decay: 0.0
//! ```

mod builder;
mod loader;
mod schema;

pub use builder::{
    build_lr_scheduler, build_optimizer, describe_param_groups, OptimizerBuilder,
    SchedulerBuilder,
};
pub use loader::load_config;
pub use schema::{ComponentConfig, OptimizerConfig, SchedulerConfig, TrainConfig};
