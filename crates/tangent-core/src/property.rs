//! Per-sample-point property storage and shared handles.
//!
//! A [`Property`] holds one value per discretization sample point of the
//! element currently being processed. Kernels obtain a
//! [`PropertyHandle`] during setup and only dereference it during
//! assembly: a read guard per element, indexed by sample point.

use std::ops::Index;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::name::PropertyName;
use crate::value::PropertyValue;

/// A named, typed array of values, one per discretization sample point.
///
/// Owned by whichever producer declared it. The array length tracks the
/// sample-point count of the element being processed (or, for zero
/// properties, the simulation-wide maximum).
#[derive(Clone, Debug)]
pub struct Property<T> {
    name: PropertyName,
    values: Vec<T>,
}

impl<T: PropertyValue> Property<T> {
    /// Create an empty property with the given name.
    pub fn new(name: impl Into<PropertyName>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// The property's name.
    pub fn name(&self) -> &PropertyName {
        &self.name
    }

    /// Number of sample points currently stored.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the property holds no sample points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Grow the array to `n` sample points, setting every slot to zero.
    ///
    /// Growth re-zeroes the whole array, not just the new tail, so no
    /// slot can carry a stale value. Calls with `n <= len()` are no-ops:
    /// the array never shrinks.
    pub fn resize_zeroed(&mut self, n: usize) {
        if n <= self.values.len() {
            return;
        }
        self.values.clear();
        self.values.resize_with(n, T::zero);
    }

    /// Set the value at sample point `qp`.
    ///
    /// # Panics
    ///
    /// Panics if `qp` is out of bounds; the producer sizes the property
    /// before filling it.
    pub fn set(&mut self, qp: usize, value: T) {
        self.values[qp] = value;
    }

    /// All sample-point values as a slice.
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: PropertyValue> Index<usize> for Property<T> {
    type Output = T;

    fn index(&self, qp: usize) -> &T {
        &self.values[qp]
    }
}

/// Shared handle to a [`Property`].
///
/// Producers keep a handle to fill values each assembly sweep; consumers
/// clone handles at setup and take read guards per element on the hot
/// path. Lock poisoning is unrecoverable (a producer panicked mid-fill),
/// so acquisition unwraps.
#[derive(Debug)]
pub struct PropertyHandle<T> {
    inner: Arc<RwLock<Property<T>>>,
}

impl<T: PropertyValue> PropertyHandle<T> {
    /// Wrap a property in a shared handle.
    pub fn new(property: Property<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(property)),
        }
    }

    /// Acquire a read guard for per-element evaluation.
    pub fn read(&self) -> RwLockReadGuard<'_, Property<T>> {
        self.inner.read().unwrap()
    }

    /// Acquire a write guard for producer-side filling or resizing.
    pub fn write(&self) -> RwLockWriteGuard<'_, Property<T>> {
        self.inner.write().unwrap()
    }

    /// Whether two handles refer to the same underlying property.
    ///
    /// Used to verify that zero-property lookups share one instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for PropertyHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
