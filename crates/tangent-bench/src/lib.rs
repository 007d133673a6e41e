//! Benchmark crate for the Tangent workspace.
//!
//! No library code; the criterion benchmarks live under `benches/`.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
