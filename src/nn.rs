//! Models as named parameter collections

use crate::Tensor;

/// Anything that owns named parameters
pub trait Module {
    /// All parameters in a stable order, trainable or not
    fn named_parameters(&self) -> Vec<(String, Tensor)>;

    /// Parameters with `requires_grad` set, in the same order
    fn trainable_parameters(&self) -> Vec<(String, Tensor)> {
        self.named_parameters().into_iter().filter(|(_, t)| t.requires_grad()).collect()
    }
}

/// Ordered store of named parameters
#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    params: Vec<(String, Tensor)>,
}

impl ParamStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any existing one with the same name
    pub fn insert(&mut self, name: impl Into<String>, tensor: Tensor) {
        let name = name.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = tensor,
            None => self.params.push((name, tensor)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, tensor: Tensor) -> Self {
        self.insert(name, tensor);
        self
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Module for ParamStore {
    fn named_parameters(&self) -> Vec<(String, Tensor)> {
        self.params.clone()
    }
}

impl<S: Into<String>> FromIterator<(S, Tensor)> for ParamStore {
    fn from_iter<I: IntoIterator<Item = (S, Tensor)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, tensor) in iter {
            store.insert(name, tensor);
        }
        store
    }
}
