//! Name-based lookup of optimizer and scheduler constructors
//!
//! Two registries exist per component kind: the builtin one and a custom
//! extension one. Names are resolved against the builtin registry first.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::optim::scheduler::{self, LRScheduler};
use crate::optim::{self, Hyperparams, Optimizer};
use crate::Tensor;

/// Builds an optimizer over the default-group parameters from `PARAM`
pub type OptimizerCtor = fn(Vec<Tensor>, &Hyperparams) -> Result<Box<dyn Optimizer>>;

/// Builds a scheduler bound to an already built optimizer from `PARAM`
pub type SchedulerCtor = fn(&mut dyn Optimizer, &Hyperparams) -> Result<Box<dyn LRScheduler>>;

/// Ordered map from type name to constructor
#[derive(Clone)]
pub struct Registry<C> {
    kind: &'static str,
    entries: BTreeMap<String, C>,
}

impl<C: Copy> Registry<C> {
    /// Create an empty registry; `kind` names it in diagnostics
    pub fn new(kind: &'static str) -> Self {
        Self { kind, entries: BTreeMap::new() }
    }

    /// Register a constructor, returning the one it replaced
    pub fn register(&mut self, name: impl Into<String>, ctor: C) -> Option<C> {
        self.entries.insert(name.into(), ctor)
    }

    /// Builder-style `register`
    pub fn with(mut self, name: impl Into<String>, ctor: C) -> Self {
        self.register(name, ctor);
        self
    }

    /// Constructor registered under `name`
    pub fn get(&self, name: &str) -> Option<C> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Resolve `name` against `registries` in order
///
/// Returns the constructor and the `kind` of the registry that supplied it.
pub fn lookup<C: Copy>(name: &str, registries: &[&Registry<C>]) -> Option<(C, &'static str)> {
    registries.iter().find_map(|r| r.get(name).map(|ctor| (ctor, r.kind())))
}

/// Comma-separated names across `registries`, for error messages
pub fn known_names<C: Copy>(registries: &[&Registry<C>]) -> String {
    registries.iter().flat_map(|r| r.names()).collect::<Vec<_>>().join(", ")
}

/// Optimizers shipped with the crate
pub fn builtin_optimizers() -> Registry<OptimizerCtor> {
    Registry::<OptimizerCtor>::new("builtin")
        .with("SGD", optim::construct::<optim::SgdRule>)
        .with("Adam", optim::construct::<optim::AdamRule>)
        .with("AdamW", optim::construct::<optim::AdamWRule>)
}

/// Extension optimizers, consulted after the builtin ones
pub fn custom_optimizers() -> Registry<OptimizerCtor> {
    Registry::<OptimizerCtor>::new("custom").with("Lion", optim::construct::<optim::LionRule>)
}

/// Schedulers shipped with the crate
pub fn builtin_schedulers() -> Registry<SchedulerCtor> {
    Registry::<SchedulerCtor>::new("builtin")
        .with("StepLR", scheduler::construct::<scheduler::StepDecay>)
        .with("MultiStepLR", scheduler::construct::<scheduler::MultiStepDecay>)
        .with("ExponentialLR", scheduler::construct::<scheduler::ExponentialDecay>)
        .with("CosineAnnealingLR", scheduler::construct::<scheduler::CosineAnnealing>)
}

/// Extension schedulers, consulted after the builtin ones
pub fn custom_schedulers() -> Registry<SchedulerCtor> {
    Registry::<SchedulerCtor>::new("custom")
        .with("LinearWarmupLR", scheduler::construct::<scheduler::LinearWarmup>)
        .with("WarmupCosineDecayLR", scheduler::construct::<scheduler::WarmupCosineDecay>)
}

/// A `TYPE` entry: either a registry name or a constructor passed directly
#[derive(Clone)]
pub enum ComponentType<C> {
    Name(String),
    Ctor(C),
}

impl<C> ComponentType<C> {
    /// Registry name, if this is a name reference
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Ctor(_) => None,
        }
    }
}

impl<C> fmt::Debug for ComponentType<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Ctor(_) => f.write_str("Ctor(..)"),
        }
    }
}

impl<C> fmt::Display for ComponentType<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Ctor(_) => f.write_str("<constructor>"),
        }
    }
}

impl<C> From<&str> for ComponentType<C> {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl<C> From<String> for ComponentType<C> {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl<'de, C> Deserialize<'de> for ComponentType<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name.is_empty() {
            return Err(de::Error::custom("TYPE must not be empty"));
        }
        Ok(Self::Name(name))
    }
}

impl<C> Serialize for ComponentType<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Name(name) => serializer.serialize_str(name),
            Self::Ctor(_) => {
                Err(serde::ser::Error::custom("a constructor TYPE cannot be serialized"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_optimizer_names() {
        let builtin = builtin_optimizers();
        assert_eq!(builtin.names(), vec!["Adam", "AdamW", "SGD"]);
        assert_eq!(builtin.kind(), "builtin");
        assert!(!builtin.contains("Lion"));
    }

    #[test]
    fn test_lookup_prefers_first_registry() {
        let builtin = builtin_schedulers();
        let mut custom = custom_schedulers();
        custom.register("StepLR", scheduler::construct::<scheduler::LinearWarmup>);

        let (_, source) = lookup("StepLR", &[&builtin, &custom]).expect("registered");
        assert_eq!(source, "builtin");

        let (_, source) = lookup("LinearWarmupLR", &[&builtin, &custom]).expect("registered");
        assert_eq!(source, "custom");

        assert!(lookup("NoSuchLR", &[&builtin, &custom]).is_none());
    }

    #[test]
    fn test_known_names_spans_registries() {
        let names = known_names(&[&builtin_optimizers(), &custom_optimizers()]);
        assert_eq!(names, "Adam, AdamW, SGD, Lion");
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = custom_optimizers();
        let previous = registry.register("Lion", optim::construct::<optim::SgdRule>);
        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_component_type_serde() {
        let ty: ComponentType<OptimizerCtor> = serde_json::from_str("\"Adam\"").expect("string");
        assert_eq!(ty.as_name(), Some("Adam"));
        assert_eq!(serde_json::to_string(&ty).expect("name serializes"), "\"Adam\"");

        assert!(serde_json::from_str::<ComponentType<OptimizerCtor>>("\"\"").is_err());
        assert!(serde_json::from_str::<ComponentType<OptimizerCtor>>("3").is_err());

        let ctor: ComponentType<OptimizerCtor> =
            ComponentType::Ctor(optim::construct::<optim::SgdRule>);
        assert!(serde_json::to_string(&ctor).is_err());
        assert_eq!(ctor.to_string(), "<constructor>");
    }
}
