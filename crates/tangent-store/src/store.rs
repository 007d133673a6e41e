//! The name-keyed property store.

use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use indexmap::IndexMap;
use tangent_core::{Property, PropertyHandle, PropertyName, PropertyValue, RegionScope, StoreError};

/// One declared property: element type, declaration scope, and the
/// type-erased shared handle.
struct StoredEntry {
    type_id: TypeId,
    scope: RegionScope,
    handle: Box<dyn Any + Send + Sync>,
}

/// Query counters for the store.
///
/// The registry's constant short-circuit is contractually forbidden
/// from touching storage; tests read these counters to prove it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of `has`/`get` queries served since construction.
    pub lookups: u64,
    /// Number of successful declarations since construction.
    pub declarations: u64,
}

/// Owns every declared property, keyed by name.
///
/// Declarations happen during the single-threaded setup phase; the
/// assembly phase only dereferences handles obtained earlier. The
/// internal lock exists so that even an out-of-contract late access is
/// guarded by exclusive access rather than undefined behavior.
///
/// A lookup with a mismatched element type behaves as "not present";
/// the registry's zero fallback covers it, matching the type-aware
/// existence checks of the host storage contract.
pub struct PropertyStore {
    entries: RwLock<IndexMap<String, StoredEntry>>,
    lookups: AtomicU64,
    declarations: AtomicU64,
}

impl PropertyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            lookups: AtomicU64::new(0),
            declarations: AtomicU64::new(0),
        }
    }

    /// Declare fresh storage for `name` with the producer's scope.
    ///
    /// The returned property is empty; the producer sizes and fills it
    /// before it is read. Declaring an already-declared name is a
    /// conflict regardless of element type.
    pub fn declare<T: PropertyValue>(
        &self,
        name: impl Into<PropertyName>,
        scope: RegionScope,
    ) -> Result<PropertyHandle<T>, StoreError> {
        let name = name.into();
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(name.as_str()) {
            return Err(StoreError::AlreadyDeclared { name });
        }
        let handle = PropertyHandle::new(Property::<T>::new(name.clone()));
        entries.insert(
            name.as_str().to_string(),
            StoredEntry {
                type_id: TypeId::of::<T>(),
                scope,
                handle: Box::new(handle.clone()),
            },
        );
        self.declarations.fetch_add(1, Ordering::Relaxed);
        Ok(handle)
    }

    /// Whether a property named `name` with element type `T` is present
    /// and visible to a caller with scope `caller`.
    pub fn has<T: PropertyValue>(&self, name: &str, caller: &RegionScope) -> bool {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let entries = self.entries.read().unwrap();
        match entries.get(name) {
            Some(entry) => entry.type_id == TypeId::of::<T>() && caller.can_see(&entry.scope),
            None => false,
        }
    }

    /// Fetch the handle for `name` if present, typed `T`, and visible
    /// to `caller`.
    pub fn get<T: PropertyValue>(
        &self,
        name: &str,
        caller: &RegionScope,
    ) -> Option<PropertyHandle<T>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let entries = self.entries.read().unwrap();
        let entry = entries.get(name)?;
        if !caller.can_see(&entry.scope) {
            return None;
        }
        entry
            .handle
            .downcast_ref::<PropertyHandle<T>>()
            .map(PropertyHandle::clone)
    }

    /// Names of all declared properties, in declaration order.
    pub fn names(&self) -> Vec<PropertyName> {
        let entries = self.entries.read().unwrap();
        entries.keys().map(|k| PropertyName::from(k.as_str())).collect()
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether no properties are declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the query counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            declarations: self.declarations.load(Ordering::Relaxed),
        }
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}
