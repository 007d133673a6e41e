//! Test utilities and fixtures for Tangent development.
//!
//! Provides a [`ProblemBuilder`] for constructing test problems and a
//! [`TabulatedMaterial`] producer that declares properties and fills
//! them from closures, standing in for a real constitutive law.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use tangent_core::VariableSystem;
use tangent_registry::Problem;

mod fixtures;

pub use fixtures::TabulatedMaterial;

/// Builder for test problems with preconfigured variable systems.
pub struct ProblemBuilder {
    nonlinear: Vec<String>,
    auxiliary: Vec<String>,
    max_sample_points: usize,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self {
            nonlinear: Vec::new(),
            auxiliary: Vec::new(),
            max_sample_points: 4,
        }
    }

    /// Variables of the primary (nonlinear) system.
    pub fn with_variables<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nonlinear = variables.into_iter().map(Into::into).collect();
        self
    }

    /// Variables of the auxiliary system.
    pub fn with_auxiliary<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auxiliary = variables.into_iter().map(Into::into).collect();
        self
    }

    /// Maximum sample-point count for the problem.
    pub fn with_max_sample_points(mut self, n: usize) -> Self {
        self.max_sample_points = n;
        self
    }

    pub fn build(self) -> Arc<Problem> {
        Arc::new(Problem::new(
            VariableSystem::from_variables(self.nonlinear),
            VariableSystem::from_variables(self.auxiliary),
            self.max_sample_points,
        ))
    }
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
