//! Per-parameter optimizer overrides
//!
//! A side table from parameter name to the hyperparameters that parameter
//! should train with. Parameters sharing an identical override set end up in
//! the same optimizer parameter group.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Hyperparams;

/// Parameter name to override set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideTable(BTreeMap<String, Hyperparams>);

impl OverrideTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an override set to a parameter, replacing any previous one
    pub fn set(&mut self, param: impl Into<String>, hyperparams: Hyperparams) {
        self.0.insert(param.into(), hyperparams);
    }

    /// Builder-style `set`
    pub fn with(mut self, param: impl Into<String>, hyperparams: Hyperparams) -> Self {
        self.set(param, hyperparams);
        self
    }

    /// Detach the override from a parameter
    pub fn remove(&mut self, param: &str) -> Option<Hyperparams> {
        self.0.remove(param)
    }

    /// Override set for a parameter, if any
    pub fn get(&self, param: &str) -> Option<&Hyperparams> {
        self.0.get(param)
    }

    /// Names of all parameters with an override
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
