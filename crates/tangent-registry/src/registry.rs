//! The derivative property registry.
//!
//! [`DerivativeRegistry`] is the lookup surface a simulation object
//! uses during construction: base properties (with constant
//! resolution), derivative properties (with the zero fallback), and
//! derivative declarations. It owns the zero-property cache for its
//! host; nothing here runs on the assembly hot path.

use std::any::{Any, TypeId};
use std::error::Error;
use std::fmt;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use tangent_core::{
    ConfigError, Property, PropertyHandle, PropertyValue, StoreError, VariableName,
};

use crate::host::HostBinding;
use crate::names::{check_base_name, derivative_name};
use crate::problem::Problem;

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from derivative declaration (setup-time, never from lookup).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclareError {
    /// The base name cannot appear in a canonical derivative name.
    InvalidBaseName(ConfigError),
    /// The storage layer rejected the declaration.
    Store(StoreError),
}

impl fmt::Display for DeclareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseName(reason) => write!(f, "invalid base name: {reason}"),
            Self::Store(reason) => write!(f, "declaration rejected: {reason}"),
        }
    }
}

impl Error for DeclareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBaseName(reason) => Some(reason),
            Self::Store(reason) => Some(reason),
        }
    }
}

impl From<ConfigError> for DeclareError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidBaseName(e)
    }
}

impl From<StoreError> for DeclareError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ── Registry ───────────────────────────────────────────────────────

/// Per-object registry for derivative properties.
///
/// One instance per simulation object, bound to the object's
/// [`HostBinding`] and the shared [`Problem`]. Lookups degrade to a
/// cached zero property instead of failing; only declarations and
/// construction-time configuration can error.
pub struct DerivativeRegistry {
    problem: Arc<Problem>,
    host: HostBinding,
    /// One zero property per element type, shared across all names.
    zeros: RwLock<IndexMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl DerivativeRegistry {
    /// Bind a registry to a host object.
    pub fn new(problem: Arc<Problem>, host: HostBinding) -> Self {
        Self {
            problem,
            host,
            zeros: RwLock::new(IndexMap::new()),
        }
    }

    /// The shared problem context.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The host object's capability record.
    pub fn host(&self) -> &HostBinding {
        &self.host
    }

    /// The cached zero property for `T`, sized to the problem's current
    /// maximum sample-point count.
    ///
    /// Lazily created on first use; repeated calls return the same
    /// instance, grown monotonically (growth re-zeroes every slot, and
    /// a smaller bound is a no-op).
    pub fn zero_property<T: PropertyValue>(&self) -> PropertyHandle<T> {
        let n = self.problem.max_sample_points();

        {
            let zeros = self.zeros.read().unwrap();
            if let Some(entry) = zeros.get(&TypeId::of::<T>()) {
                let handle = entry
                    .downcast_ref::<PropertyHandle<T>>()
                    .expect("zero cache entry carries its key type")
                    .clone();
                handle.write().resize_zeroed(n);
                return handle;
            }
        }

        let mut zeros = self.zeros.write().unwrap();
        let entry = zeros.entry(TypeId::of::<T>()).or_insert_with(|| {
            let mut property = Property::<T>::new("zero");
            property.resize_zeroed(n);
            Box::new(PropertyHandle::new(property))
        });
        let handle = entry
            .downcast_ref::<PropertyHandle<T>>()
            .expect("zero cache entry carries its key type")
            .clone();
        handle.write().resize_zeroed(n);
        handle
    }

    /// Fetch the base property `name` refers to.
    ///
    /// The name is resolved through the problem's alias table first; if
    /// the resolved name denotes a default constant (registered value
    /// or numeric literal), the materialized constant property is
    /// returned without touching storage. Otherwise the lookup falls
    /// through to [`property_by_name`](Self::property_by_name).
    pub fn base_property<T: PropertyValue>(&self, name: &str) -> PropertyHandle<T> {
        let prop_name = self.problem.deduce_property_name(name);
        if let Some(constant) = self
            .problem
            .constants()
            .resolve::<T>(prop_name.as_str(), self.problem.max_sample_points())
        {
            return constant;
        }
        self.property_by_name(prop_name.as_str())
    }

    /// Fetch the stored property `name`, or the zero property if it is
    /// absent, has a different element type, or is region-restricted
    /// away from this host.
    pub fn property_by_name<T: PropertyValue>(&self, name: &str) -> PropertyHandle<T> {
        match self.problem.store().get::<T>(name, self.host.scope()) {
            Some(handle) => handle,
            None => self.zero_property::<T>(),
        }
    }

    /// Fetch the derivative of `base` with respect to `vars`.
    ///
    /// If `base` resolves to a declared constant the result is the zero
    /// property, without a storage query: derivatives of constants are
    /// identically zero. Otherwise the canonical derivative name is
    /// looked up with the usual zero fallback. Never fails; an
    /// undeclared derivative resolves to an exact zero.
    pub fn derivative<T: PropertyValue>(
        &self,
        base: &str,
        vars: &[VariableName],
    ) -> PropertyHandle<T> {
        let prop_name = self.problem.deduce_property_name(base);
        if self.problem.constants().is_constant::<T>(prop_name.as_str()) {
            return self.zero_property::<T>();
        }
        self.property_by_name(derivative_name(prop_name.as_str(), vars).as_str())
    }

    /// Declare fresh storage for the derivative of `base` with respect
    /// to `vars`, under the canonical name and this host's scope.
    ///
    /// The producer fills every sample point before the property is
    /// read. Declaring the same canonical name twice is a conflict.
    pub fn declare_derivative<T: PropertyValue>(
        &self,
        base: &str,
        vars: &[VariableName],
    ) -> Result<PropertyHandle<T>, DeclareError> {
        check_base_name(base)?;
        let name = derivative_name(base, vars);
        let handle = self
            .problem
            .store()
            .declare::<T>(name, self.host.scope().clone())?;
        Ok(handle)
    }

    /// Declare fresh storage for a base property under this host's
    /// scope.
    ///
    /// Base names are checked for the derivative separator here, so a
    /// name that would later generate ambiguous derivative names fails
    /// at its declaration instead of at the first lookup.
    pub fn declare_property<T: PropertyValue>(
        &self,
        name: &str,
    ) -> Result<PropertyHandle<T>, DeclareError> {
        check_base_name(name)?;
        let handle = self
            .problem
            .store()
            .declare::<T>(name, self.host.scope().clone())?;
        Ok(handle)
    }
}
