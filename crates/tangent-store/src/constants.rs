//! Default/constant property resolution.
//!
//! A property name may denote a compile-time constant instead of stored
//! data: either a value registered at setup, or a numeric literal used
//! directly where a property name is expected (`"0.5"`). Both resolve
//! to a materialized constant property without touching the store, and
//! their derivatives are identically zero.

use std::any::{Any, TypeId};
use std::sync::RwLock;

use indexmap::IndexMap;
use tangent_core::{Property, PropertyHandle, PropertyName, PropertyValue, Real};

/// One constant registration: element type, the value, and the cached
/// materialized property.
struct ConstantEntry {
    type_id: TypeId,
    value: Box<dyn Any + Send + Sync>,
    handle: Box<dyn Any + Send + Sync>,
}

impl ConstantEntry {
    fn new<T: PropertyValue>(name: PropertyName, value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            value: Box::new(value),
            handle: Box::new(PropertyHandle::new(Property::<T>::new(name))),
        }
    }
}

/// Registry of named compile-time constants.
///
/// Numeric-literal names resolve implicitly for [`Real`]: a caller that
/// passes `"0.75"` where a property name is expected gets a constant
/// property holding 0.75 at every sample point. Materialized properties
/// are cached per name and grown monotonically to the largest requested
/// sample-point count.
pub struct DefaultConstants {
    entries: RwLock<IndexMap<String, ConstantEntry>>,
}

impl DefaultConstants {
    /// Create an empty constant registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// Register `name` as a constant of value `value`.
    ///
    /// Re-registering a name replaces the previous constant.
    pub fn register<T: PropertyValue>(&self, name: impl Into<PropertyName>, value: T) {
        let name = name.into();
        let entry = ConstantEntry::new(name.clone(), value);
        self.entries
            .write()
            .unwrap()
            .insert(name.as_str().to_string(), entry);
    }

    /// Whether `name` denotes a constant of element type `T`.
    ///
    /// True for registered constants with matching type, and for
    /// numeric literals when `T` is [`Real`]. Never touches the
    /// property store.
    pub fn is_constant<T: PropertyValue>(&self, name: &str) -> bool {
        {
            let entries = self.entries.read().unwrap();
            if let Some(entry) = entries.get(name) {
                return entry.type_id == TypeId::of::<T>();
            }
        }
        parse_literal::<T>(name).is_some()
    }

    /// Resolve `name` to its materialized constant property, sized to
    /// at least `n` sample points.
    ///
    /// Returns `None` if `name` is not a constant of type `T`.
    pub fn resolve<T: PropertyValue>(&self, name: &str, n: usize) -> Option<PropertyHandle<T>> {
        {
            let entries = self.entries.read().unwrap();
            if let Some(entry) = entries.get(name) {
                let handle = entry.handle.downcast_ref::<PropertyHandle<T>>()?.clone();
                let value = entry.value.downcast_ref::<T>()?.clone();
                fill_constant(&handle, n, value);
                return Some(handle);
            }
        }

        // Numeric literal: materialize on first use and cache it.
        let value = parse_literal::<T>(name)?;
        let mut entries = self.entries.write().unwrap();
        let entry = entries
            .entry(name.to_string())
            .or_insert_with(|| ConstantEntry::new(PropertyName::from(name), value));
        let handle = entry.handle.downcast_ref::<PropertyHandle<T>>()?.clone();
        let value = entry.value.downcast_ref::<T>()?.clone();
        fill_constant(&handle, n, value);
        Some(handle)
    }
}

impl Default for DefaultConstants {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `name` as a numeric literal of type `T`.
///
/// Only [`Real`] supports literal constants; for any other element type
/// this returns `None`.
fn parse_literal<T: PropertyValue>(name: &str) -> Option<T> {
    if TypeId::of::<T>() != TypeId::of::<Real>() {
        return None;
    }
    let value: Real = name.trim().parse().ok()?;
    let boxed: Box<dyn Any> = Box::new(value);
    boxed.downcast::<T>().ok().map(|v| *v)
}

/// Grow the constant property to `n` sample points, every slot holding
/// `value`. No-op when already large enough.
fn fill_constant<T: PropertyValue>(handle: &PropertyHandle<T>, n: usize, value: T) {
    let mut property = handle.write();
    if property.len() >= n {
        return;
    }
    property.resize_zeroed(n);
    for qp in 0..property.len() {
        property.set(qp, value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangent_core::Tensor2;

    #[test]
    fn registered_constant_resolves_filled() {
        let constants = DefaultConstants::new();
        constants.register::<Real>("kappa", 1.25);

        assert!(constants.is_constant::<Real>("kappa"));
        let handle = constants.resolve::<Real>("kappa", 4).unwrap();
        let p = handle.read();
        assert_eq!(p.len(), 4);
        assert!(p.values().iter().all(|&v| v == 1.25));
    }

    #[test]
    fn numeric_literal_resolves_for_real() {
        let constants = DefaultConstants::new();
        assert!(constants.is_constant::<Real>("0.5"));

        let handle = constants.resolve::<Real>("0.5", 3).unwrap();
        assert!(handle.read().values().iter().all(|&v| v == 0.5));
    }

    #[test]
    fn numeric_literal_is_not_a_tensor_constant() {
        let constants = DefaultConstants::new();
        assert!(!constants.is_constant::<Tensor2>("0.5"));
        assert!(constants.resolve::<Tensor2>("0.5", 2).is_none());
    }

    #[test]
    fn unregistered_non_literal_name_is_not_constant() {
        let constants = DefaultConstants::new();
        assert!(!constants.is_constant::<Real>("free_energy"));
        assert!(constants.resolve::<Real>("free_energy", 2).is_none());
    }

    #[test]
    fn wrong_type_resolution_fails() {
        let constants = DefaultConstants::new();
        constants.register::<Real>("kappa", 2.0);
        assert!(!constants.is_constant::<Tensor2>("kappa"));
        assert!(constants.resolve::<Tensor2>("kappa", 2).is_none());
    }

    #[test]
    fn resolution_caches_one_property_per_name() {
        let constants = DefaultConstants::new();
        constants.register::<Real>("kappa", 2.0);

        let a = constants.resolve::<Real>("kappa", 2).unwrap();
        let b = constants.resolve::<Real>("kappa", 5).unwrap();
        assert!(a.ptr_eq(&b));
        // grown monotonically, every slot refilled
        assert_eq!(a.read().len(), 5);
        assert!(a.read().values().iter().all(|&v| v == 2.0));

        let c = constants.resolve::<Real>("kappa", 3).unwrap();
        assert_eq!(c.read().len(), 5);
    }

    #[test]
    fn literal_cached_across_resolves() {
        let constants = DefaultConstants::new();
        let a = constants.resolve::<Real>("1.5", 2).unwrap();
        let b = constants.resolve::<Real>("1.5", 2).unwrap();
        assert!(a.ptr_eq(&b));
    }
}
