//! Derivative-property naming, lookup, and coupling validation.
//!
//! The registry gives simulation objects one uniform surface for
//! derivative material properties: canonical names for derivatives of
//! any order, lookup with a zero-property fallback for anything never
//! declared, constant short-circuiting (derivatives of constants are
//! identically zero, without a storage query), and a setup-time check
//! that every variable a kernel differentiates against is actually
//! coupled into it.
//!
//! All registry and validator calls happen during single-threaded
//! setup; the assembly hot path only dereferences the
//! [`PropertyHandle`](tangent_core::PropertyHandle)s obtained here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coupling;
pub mod host;
pub mod names;
pub mod problem;
pub mod registry;

pub use host::HostBinding;
pub use names::{check_base_name, derivative_name, DERIVATIVE_SEPARATOR};
pub use problem::Problem;
pub use registry::{DeclareError, DerivativeRegistry};
