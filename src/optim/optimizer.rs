//! Optimizer trait and the parameter-group machinery shared by all optimizers

use ndarray::Array1;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;

use super::{Hyperparams, ParamGroup};
use crate::error::{Error, Result};
use crate::Tensor;

/// Trait for optimization algorithms
pub trait Optimizer {
    /// Registry name of the optimizer type
    fn name(&self) -> &str;

    /// Perform a single optimization step over every group
    fn step(&mut self) -> Result<()>;

    /// Parameter groups in creation order; group 0 is the default group
    fn param_groups(&self) -> &[ParamGroup];

    /// Add a group whose hyperparameters are the defaults overlaid with `overrides`
    fn add_param_group(&mut self, params: Vec<Tensor>, overrides: &Hyperparams) -> Result<()>;

    /// Defaults every group starts from (built-in defaults overlaid with construction arguments)
    fn defaults(&self) -> &Hyperparams;

    /// Set the learning rate of one group
    fn set_group_lr(&mut self, index: usize, lr: f64);

    /// Access to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Zero out all gradients
    fn zero_grad(&mut self) {
        for group in self.param_groups() {
            for param in &group.params {
                param.zero_grad();
            }
        }
    }

    /// Learning rate of the default group
    fn lr(&self) -> f64 {
        self.param_groups().first().map_or(0.0, ParamGroup::lr)
    }

    /// Set the learning rate of every group
    fn set_lr(&mut self, lr: f64) {
        for index in 0..self.param_groups().len() {
            self.set_group_lr(index, lr);
        }
    }

    /// Total number of tensors across groups
    fn num_params(&self) -> usize {
        self.param_groups().iter().map(ParamGroup::len).sum()
    }
}

/// Per-element update applied to each parameter
pub trait UpdateRule: 'static {
    /// Registry name of the optimizer
    const NAME: &'static str;

    /// Typed hyperparameters; unknown keys must be rejected on deserialize
    type Options: Serialize + DeserializeOwned + Default;

    /// Per-parameter state (moments, velocity, step count)
    type State: Default + 'static;

    /// Check cross-field constraints
    fn validate(_options: &Self::Options) -> std::result::Result<(), String> {
        Ok(())
    }

    /// Update `param` in place from `grad`
    fn update(
        options: &Self::Options,
        state: &mut Self::State,
        param: &mut Array1<f32>,
        grad: &Array1<f32>,
    );
}

/// Optimizer holding torch-style parameter groups for one update rule
pub struct GroupedOptimizer<R: UpdateRule> {
    defaults: Hyperparams,
    groups: Vec<ParamGroup>,
    state: HashMap<usize, R::State>,
}

impl<R: UpdateRule> GroupedOptimizer<R> {
    /// Create the optimizer with `params` as the default group
    ///
    /// `param` holds construction arguments; keys the rule does not know are rejected.
    pub fn new(params: Vec<Tensor>, param: &Hyperparams) -> Result<Self> {
        let defaults = Hyperparams::from_typed(R::NAME, &R::Options::default())?.merged(param);
        Self::resolve(&defaults)?;

        let mut optimizer = Self { defaults, groups: Vec::new(), state: HashMap::new() };
        optimizer.add_param_group(params, &Hyperparams::new())?;
        Ok(optimizer)
    }

    fn resolve(options: &Hyperparams) -> Result<R::Options> {
        let typed: R::Options = options.to_typed(R::NAME)?;
        R::validate(&typed).map_err(|msg| Error::invalid_param(R::NAME, msg))?;
        Ok(typed)
    }

    /// Number of parameters with update state
    pub fn state_len(&self) -> usize {
        self.state.len()
    }
}

impl<R: UpdateRule> Optimizer for GroupedOptimizer<R> {
    fn name(&self) -> &str {
        R::NAME
    }

    fn step(&mut self) -> Result<()> {
        for group in &self.groups {
            let options = Self::resolve(&group.options)?;
            for param in &group.params {
                let Some(grad) = param.grad() else { continue };
                if grad.len() != param.len() {
                    return Err(Error::ShapeMismatch { param: param.len(), grad: grad.len() });
                }
                let state = self.state.entry(param.id()).or_default();
                R::update(&options, state, &mut param.data_mut(), &grad);
            }
        }
        Ok(())
    }

    fn param_groups(&self) -> &[ParamGroup] {
        &self.groups
    }

    fn add_param_group(&mut self, params: Vec<Tensor>, overrides: &Hyperparams) -> Result<()> {
        let options = self.defaults.merged(overrides);
        Self::resolve(&options)?;

        for (i, param) in params.iter().enumerate() {
            let seen_before = params[..i].iter().any(|p| p.ptr_eq(param));
            if seen_before || self.groups.iter().any(|g| g.contains(param)) {
                return Err(Error::DuplicateParameter(format!(
                    "tensor of length {} added to group {}",
                    param.len(),
                    self.groups.len()
                )));
            }
        }

        self.groups.push(ParamGroup::new(params, options));
        Ok(())
    }

    fn defaults(&self) -> &Hyperparams {
        &self.defaults
    }

    fn set_group_lr(&mut self, index: usize, lr: f64) {
        if let Some(group) = self.groups.get_mut(index) {
            group.set_lr(lr);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Construct a boxed optimizer for rule `R`; usable as a registry constructor
pub fn construct<R: UpdateRule>(
    params: Vec<Tensor>,
    param: &Hyperparams,
) -> Result<Box<dyn Optimizer>> {
    Ok(Box::new(GroupedOptimizer::<R>::new(params, param)?))
}
