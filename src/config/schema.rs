//! Configuration schema for optimizer and scheduler construction
//!
//! Each component is described by a `TYPE` (registry name) and a `PARAM`
//! mapping of constructor arguments:
//!
//! ```yaml
//! OPTIM:
//!   TYPE: Adam
//!   PARAM:
//!     lr: 0.001
//!     betas: [0.9, 0.99]
//! LR_SCHEDULER:
//!   TYPE: MultiStepLR
//!   PARAM:
//!     milestones: [100, 200, 300]
//!     gamma: 0.1
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::optim::{Hyperparams, OverrideTable};
use crate::registry::{ComponentType, OptimizerCtor, SchedulerCtor};

/// A `TYPE` + `PARAM` pair
#[derive(Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ComponentConfig<C> {
    /// Registry name or constructor
    #[serde(rename = "TYPE")]
    pub kind: ComponentType<C>,

    /// Constructor arguments
    #[serde(rename = "PARAM")]
    pub param: Hyperparams,
}

/// Optimizer `TYPE`/`PARAM` (the parameters to optimize are supplied separately)
pub type OptimizerConfig = ComponentConfig<OptimizerCtor>;

/// Scheduler `TYPE`/`PARAM` (the optimizer is supplied separately)
pub type SchedulerConfig = ComponentConfig<SchedulerCtor>;

impl<C> ComponentConfig<C> {
    pub fn new(kind: impl Into<ComponentType<C>>, param: Hyperparams) -> Self {
        Self { kind: kind.into(), param }
    }

    /// Parse from an in-memory JSON value
    ///
    /// A missing `TYPE` or `PARAM` is a configuration error.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Parse from YAML (or JSON) text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::ConfigError(e.to_string()))
    }
}

impl<C> fmt::Debug for ComponentConfig<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("TYPE", &self.kind)
            .field("PARAM", &self.param)
            .finish()
    }
}

/// Complete training-optimization configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Optimizer configuration
    #[serde(rename = "OPTIM")]
    pub optim: OptimizerConfig,

    /// Optional learning rate scheduler configuration
    #[serde(rename = "LR_SCHEDULER", default, skip_serializing_if = "Option::is_none")]
    pub lr_scheduler: Option<SchedulerConfig>,

    /// Per-parameter optimizer overrides, keyed by parameter name
    #[serde(rename = "OVERRIDES", default, skip_serializing_if = "OverrideTable::is_empty")]
    pub overrides: OverrideTable,
}
