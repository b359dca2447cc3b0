//! Ajustar: configuration-driven optimizer and learning rate scheduler construction
//!
//! A training configuration names an optimizer and an optional scheduler by
//! `TYPE` with constructor arguments in `PARAM`. Names resolve against a
//! builtin registry first and a custom extension registry second. Per-parameter
//! hyperparameter overrides split the model's trainable parameters into
//! torch-style parameter groups: parameters without an override form group 0,
//! and each distinct override set gets one extra group.
//!
//! # Example
//!
//! ```
//! use ajustar::config::{build_lr_scheduler, build_optimizer, TrainConfig};
//! use ajustar::nn::ParamStore;
//! use ajustar::Tensor;
//!
//! let config: TrainConfig = serde_yaml::from_str(
//!     "OPTIM:\n  TYPE: SGD\n  PARAM:\n    lr: 0.1\n\
//!      LR_SCHEDULER:\n  TYPE: StepLR\n  PARAM:\n    step_size: 10\n",
//! )
//! .expect("valid yaml");
//!
//! let model = ParamStore::new().with("weight", Tensor::zeros(8, true));
//! let mut optimizer = build_optimizer(&config.optim, &model, &config.overrides)?;
//! if let Some(sched) = &config.lr_scheduler {
//!     let mut scheduler = build_lr_scheduler(sched, optimizer.as_mut())?;
//!     scheduler.step(optimizer.as_mut());
//! }
//! # Ok::<(), ajustar::Error>(())
//! ```

pub mod autograd;
pub mod cli;
pub mod config;
pub mod error;
pub mod nn;
pub mod optim;
pub mod registry;

pub use autograd::Tensor;
pub use error::{Error, Result};
pub use optim::{Hyperparams, LRScheduler, Optimizer, OverrideTable};
