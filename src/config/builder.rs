//! Build optimizers and schedulers from configuration

use std::collections::BTreeSet;
use tracing::{debug, warn};

use super::schema::{OptimizerConfig, SchedulerConfig};
use crate::error::{Error, Result};
use crate::nn::Module;
use crate::optim::{Hyperparams, LRScheduler, Optimizer, OverrideTable};
use crate::registry::{
    builtin_optimizers, builtin_schedulers, custom_optimizers, custom_schedulers, known_names,
    lookup, ComponentType, OptimizerCtor, Registry, SchedulerCtor,
};
use crate::Tensor;

/// Resolves optimizer `TYPE`s and binds the optimizer to a model's parameters
#[derive(Debug, Clone)]
pub struct OptimizerBuilder {
    builtin: Registry<OptimizerCtor>,
    custom: Registry<OptimizerCtor>,
}

impl Default for OptimizerBuilder {
    fn default() -> Self {
        Self::new(builtin_optimizers(), custom_optimizers())
    }
}

impl OptimizerBuilder {
    pub fn new(builtin: Registry<OptimizerCtor>, custom: Registry<OptimizerCtor>) -> Self {
        Self { builtin, custom }
    }

    /// Add an extension optimizer
    pub fn with_custom(mut self, name: impl Into<String>, ctor: OptimizerCtor) -> Self {
        self.custom.register(name, ctor);
        self
    }

    pub fn builtin(&self) -> &Registry<OptimizerCtor> {
        &self.builtin
    }

    pub fn custom(&self) -> &Registry<OptimizerCtor> {
        &self.custom
    }

    /// Resolve a `TYPE`: builtin registry first, then custom
    pub fn resolve(&self, kind: &ComponentType<OptimizerCtor>) -> Result<OptimizerCtor> {
        match kind {
            ComponentType::Ctor(ctor) => Ok(*ctor),
            ComponentType::Name(name) => {
                let registries = [&self.builtin, &self.custom];
                let (ctor, source) =
                    lookup(name, &registries).ok_or_else(|| Error::UnknownOptimizer {
                        name: name.clone(),
                        known: known_names(&registries),
                    })?;
                debug!(optimizer = %name, registry = source, "resolved optimizer type");
                Ok(ctor)
            }
        }
    }

    /// Build the optimizer for `model`
    ///
    /// Trainable parameters without an entry in `overrides` form group 0 and
    /// are passed to the constructor with `PARAM`. Every distinct override set
    /// then becomes one extra group, in sorted order, holding exactly the
    /// parameters that carry it. A summary line per group goes to stdout.
    pub fn build(
        &self,
        config: &OptimizerConfig,
        model: &dyn Module,
        overrides: &OverrideTable,
    ) -> Result<Box<dyn Optimizer>> {
        let ctor = self.resolve(&config.kind)?;

        let all_params = model.named_parameters();
        for name in overrides.params() {
            if !all_params.iter().any(|(n, _)| n == name) {
                return Err(Error::UnknownParameter(name.to_string()));
            }
        }

        let (overridden, default): (Vec<_>, Vec<_>) = model
            .trainable_parameters()
            .into_iter()
            .partition(|(name, _)| overrides.get(name).is_some());

        if default.is_empty() && !overridden.is_empty() {
            warn!("every trainable parameter carries an override; default group is empty");
        }

        let default_params: Vec<Tensor> = default.into_iter().map(|(_, t)| t).collect();
        let mut optimizer = ctor(default_params, &config.param)?;

        let distinct: BTreeSet<&Hyperparams> =
            overridden.iter().filter_map(|(name, _)| overrides.get(name)).collect();

        for hyperparams in &distinct {
            let params: Vec<Tensor> = overridden
                .iter()
                .filter(|(name, _)| overrides.get(name) == Some(*hyperparams))
                .map(|(_, t)| t.clone())
                .collect();
            debug!(group = %hyperparams, tensors = params.len(), "adding parameter group");
            optimizer.add_param_group(params, hyperparams)?;
        }

        let keys: Vec<&str> =
            distinct.iter().flat_map(|h| h.keys()).collect::<BTreeSet<_>>().into_iter().collect();
        for line in describe_param_groups(optimizer.as_ref(), &keys) {
            println!("{line}");
        }

        Ok(optimizer)
    }
}

/// Resolves scheduler `TYPE`s and binds the scheduler to a built optimizer
#[derive(Debug, Clone)]
pub struct SchedulerBuilder {
    builtin: Registry<SchedulerCtor>,
    custom: Registry<SchedulerCtor>,
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new(builtin_schedulers(), custom_schedulers())
    }
}

impl SchedulerBuilder {
    pub fn new(builtin: Registry<SchedulerCtor>, custom: Registry<SchedulerCtor>) -> Self {
        Self { builtin, custom }
    }

    /// Add an extension scheduler
    pub fn with_custom(mut self, name: impl Into<String>, ctor: SchedulerCtor) -> Self {
        self.custom.register(name, ctor);
        self
    }

    pub fn builtin(&self) -> &Registry<SchedulerCtor> {
        &self.builtin
    }

    pub fn custom(&self) -> &Registry<SchedulerCtor> {
        &self.custom
    }

    /// Resolve a `TYPE`: builtin registry first, then custom
    pub fn resolve(&self, kind: &ComponentType<SchedulerCtor>) -> Result<SchedulerCtor> {
        match kind {
            ComponentType::Ctor(ctor) => Ok(*ctor),
            ComponentType::Name(name) => {
                let registries = [&self.builtin, &self.custom];
                let (ctor, source) =
                    lookup(name, &registries).ok_or_else(|| Error::UnknownScheduler {
                        name: name.clone(),
                        known: known_names(&registries),
                    })?;
                debug!(scheduler = %name, registry = source, "resolved LR scheduler type");
                Ok(ctor)
            }
        }
    }

    /// Build the scheduler, handing it `optimizer`
    pub fn build(
        &self,
        config: &SchedulerConfig,
        optimizer: &mut dyn Optimizer,
    ) -> Result<Box<dyn LRScheduler>> {
        let ctor = self.resolve(&config.kind)?;
        ctor(optimizer, &config.param)
    }
}

/// Build an optimizer with the default registries
///
/// # Example
///
/// ```
/// use ajustar::config::{build_optimizer, OptimizerConfig};
/// use ajustar::nn::ParamStore;
/// use ajustar::optim::{Hyperparams, OverrideTable};
/// use ajustar::Tensor;
///
/// let model = ParamStore::new()
///     .with("weight", Tensor::zeros(4, true))
///     .with("bias", Tensor::zeros(1, true));
/// let overrides =
///     OverrideTable::new().with("bias", Hyperparams::new().with("weight_decay", 0.0));
/// let config = OptimizerConfig::new(
///     "SGD",
///     Hyperparams::new().with("lr", 0.1).with("weight_decay", 1e-4),
/// );
///
/// let optimizer = build_optimizer(&config, &model, &overrides)?;
/// assert_eq!(optimizer.param_groups().len(), 2);
/// # Ok::<(), ajustar::Error>(())
/// ```
pub fn build_optimizer(
    config: &OptimizerConfig,
    model: &dyn Module,
    overrides: &OverrideTable,
) -> Result<Box<dyn Optimizer>> {
    OptimizerBuilder::default().build(config, model, overrides)
}

/// Build a learning rate scheduler with the default registries
pub fn build_lr_scheduler(
    config: &SchedulerConfig,
    optimizer: &mut dyn Optimizer,
) -> Result<Box<dyn LRScheduler>> {
    SchedulerBuilder::default().build(config, optimizer)
}

/// One line per parameter group: index, tensor count and the values of `keys`
///
/// A group without a value for a key shows `None`. Other values are rendered
/// as JSON, e.g. `true` or `[0.9,0.999]`.
pub fn describe_param_groups(optimizer: &dyn Optimizer, keys: &[&str]) -> Vec<String> {
    optimizer
        .param_groups()
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let mut fields = vec![format!("Optimizer group {i}"), format!("{} tensors", group.len())];
            for key in keys {
                let value = match group.options.get(key) {
                    None | Some(serde_json::Value::Null) => "None".to_string(),
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                fields.push(format!("{key} {value}"));
            }
            fields.join(" | ")
        })
        .collect()
}
