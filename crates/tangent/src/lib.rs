//! Tangent: a derivative-property registry for finite-element assembly
//! engines.
//!
//! Physics kernels consume named material properties and selected
//! partial derivatives of them. Tangent gives every simulation object
//! one uniform surface for that: canonical derivative names of any
//! order, lookup with an exact-zero fallback for derivatives nobody
//! declared, constant short-circuiting, and a setup-time check that
//! each variable a kernel differentiates against is actually coupled
//! into it.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Tangent sub-crates. For most users, adding `tangent` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use tangent::prelude::*;
//!
//! // A problem with two unknowns; elements carry up to 4 sample points.
//! let problem = Arc::new(Problem::new(
//!     VariableSystem::from_variables(["c", "eta"]),
//!     VariableSystem::empty(),
//!     4,
//! ));
//!
//! // A constitutive law declares the free energy and one sensitivity.
//! let producer =
//!     DerivativeRegistry::new(Arc::clone(&problem), HostBinding::material("eos"));
//! let f = producer.declare_property::<Real>("F").unwrap();
//! let dfdc = producer
//!     .declare_derivative::<Real>("F", &["c".into()])
//!     .unwrap();
//!
//! // A kernel fetches what it needs; the derivative nobody declared
//! // resolves to an exact zero property instead of failing.
//! let kernel =
//!     DerivativeRegistry::new(Arc::clone(&problem), HostBinding::kernel("diffusion", "c"));
//! let dfdeta = kernel.derivative::<Real>("F", &["eta".into()]);
//! assert_eq!(dfdeta.read().len(), 4);
//!
//! // Setup-time completeness check: dF/dc exists, but c is the
//! // kernel's own variable, so nothing is missing.
//! assert!(kernel.validate_coupling::<Real>("F", &[]).is_empty());
//! # let _ = (f, dfdc);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tangent-core` | Names, value types, properties, systems, errors |
//! | [`store`] | `tangent-store` | Property storage and the constant resolver |
//! | [`registry`] | `tangent-registry` | Derivative registry, naming, coupling validation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`tangent-core`).
pub use tangent_core as types;

/// Property storage service and constant resolver (`tangent-store`).
pub use tangent_store as store;

/// Derivative registry, canonical naming, and coupling validation
/// (`tangent-registry`).
pub use tangent_registry as registry;

/// Common imports for typical Tangent usage.
///
/// ```rust
/// use tangent::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tangent_core::{
        Property, PropertyHandle, PropertyName, PropertyValue, Real, RegionId, RegionScope,
        Tensor2, VarList, VariableGroup, VariableName, VariableSystem,
    };

    // Errors
    pub use tangent_core::{ConfigError, StoreError};

    // Storage
    pub use tangent_store::{DefaultConstants, PropertyStore, StoreStats};

    // Registry
    pub use tangent_registry::{
        derivative_name, DeclareError, DerivativeRegistry, HostBinding, Problem,
    };
}
