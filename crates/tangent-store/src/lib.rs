//! Property storage service and default-constant resolver.
//!
//! [`PropertyStore`] owns every declared property, keyed by name with
//! the element type and declaration scope recorded per entry.
//! [`DefaultConstants`] resolves names that denote compile-time
//! constants (registered values or numeric literals) to materialized
//! constant properties without touching the store.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod store;

pub use constants::DefaultConstants;
pub use store::{PropertyStore, StoreStats};
