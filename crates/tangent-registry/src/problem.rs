//! The host problem: storage, constants, aliases, variable systems,
//! and the sample-point sizing oracle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use indexmap::IndexMap;
use tangent_core::{PropertyName, PropertyValue, VariableSystem};
use tangent_store::{DefaultConstants, PropertyStore};

/// One simulation run's shared context.
///
/// Owns the property store, the constant registry, the parameter alias
/// table, the primary ("nonlinear") and auxiliary variable systems, and
/// the maximum sample-point count. Constructed once at setup and shared
/// (`Arc`) by every registry instance; the mutation paths (declaring
/// properties, registering constants and aliases, raising the
/// sample-point bound) are setup-phase operations by contract.
pub struct Problem {
    store: PropertyStore,
    constants: DefaultConstants,
    aliases: RwLock<IndexMap<String, String>>,
    nonlinear: VariableSystem,
    auxiliary: VariableSystem,
    max_sample_points: AtomicUsize,
}

impl Problem {
    /// Create a problem over the given variable systems.
    pub fn new(
        nonlinear: VariableSystem,
        auxiliary: VariableSystem,
        max_sample_points: usize,
    ) -> Self {
        Self {
            store: PropertyStore::new(),
            constants: DefaultConstants::new(),
            aliases: RwLock::new(IndexMap::new()),
            nonlinear,
            auxiliary,
            max_sample_points: AtomicUsize::new(max_sample_points),
        }
    }

    /// The property storage service.
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// The default/constant resolver.
    pub fn constants(&self) -> &DefaultConstants {
        &self.constants
    }

    /// The primary (nonlinear) variable system.
    pub fn nonlinear_system(&self) -> &VariableSystem {
        &self.nonlinear
    }

    /// The auxiliary variable system.
    pub fn auxiliary_system(&self) -> &VariableSystem {
        &self.auxiliary
    }

    /// Largest sample-point count any element evaluates with.
    ///
    /// Zero and constant properties are sized to this bound so a handle
    /// stays valid for every element.
    pub fn max_sample_points(&self) -> usize {
        self.max_sample_points.load(Ordering::Relaxed)
    }

    /// Raise the sample-point bound; the bound never decreases.
    pub fn update_max_sample_points(&self, n: usize) {
        self.max_sample_points.fetch_max(n, Ordering::Relaxed);
    }

    /// Register `name` as a compile-time constant.
    pub fn register_constant<T: PropertyValue>(&self, name: impl Into<PropertyName>, value: T) {
        self.constants.register(name, value);
    }

    /// Map an input-parameter alias to the property name it stands for.
    pub fn add_alias(&self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases
            .write()
            .unwrap()
            .insert(alias.into(), target.into());
    }

    /// Resolve `raw` through the alias table to the canonical base
    /// property name; unmapped names resolve to themselves.
    pub fn deduce_property_name(&self, raw: &str) -> PropertyName {
        let aliases = self.aliases.read().unwrap();
        match aliases.get(raw) {
            Some(target) => PropertyName::from(target.as_str()),
            None => PropertyName::from(raw),
        }
    }
}
