//! Optimizer parameter groups

use super::Hyperparams;
use crate::Tensor;

/// Key under which every group stores its learning rate
pub const LR_KEY: &str = "lr";

/// Parameters sharing one set of resolved hyperparameters
#[derive(Debug, Clone)]
pub struct ParamGroup {
    /// Parameters optimized with these settings
    pub params: Vec<Tensor>,
    /// Fully resolved hyperparameters (defaults filled in)
    pub options: Hyperparams,
}

impl ParamGroup {
    pub fn new(params: Vec<Tensor>, options: Hyperparams) -> Self {
        Self { params, options }
    }

    /// Number of tensors in the group
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Learning rate of the group
    pub fn lr(&self) -> f64 {
        self.options.get_f64(LR_KEY).unwrap_or_default()
    }

    /// Overwrite the learning rate of the group
    pub fn set_lr(&mut self, lr: f64) {
        self.options.insert(LR_KEY, lr);
    }

    /// Whether the group already holds this tensor
    pub fn contains(&self, tensor: &Tensor) -> bool {
        self.params.iter().any(|p| p.ptr_eq(tensor))
    }
}
