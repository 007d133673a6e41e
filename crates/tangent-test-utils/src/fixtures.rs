//! Reusable producer fixtures.
//!
//! [`TabulatedMaterial`] plays the role of a constitutive-law object:
//! it declares a set of base and derivative properties during
//! construction and fills them per element from caller-supplied
//! closures of the sample-point index.

use std::sync::Arc;

use tangent_core::{PropertyHandle, Real, VariableName};
use tangent_registry::{DeclareError, DerivativeRegistry, HostBinding, Problem};

type FillFn = Box<dyn Fn(usize) -> Real + Send + Sync>;

/// Declares scalar properties and fills them from closures.
pub struct TabulatedMaterial {
    registry: DerivativeRegistry,
    outputs: Vec<(PropertyHandle<Real>, FillFn)>,
}

impl TabulatedMaterial {
    /// Create a producer named `name` over `problem`.
    pub fn new(problem: Arc<Problem>, name: impl Into<String>) -> Self {
        Self {
            registry: DerivativeRegistry::new(problem, HostBinding::material(name)),
            outputs: Vec::new(),
        }
    }

    /// The registry this producer declares through.
    pub fn registry(&self) -> &DerivativeRegistry {
        &self.registry
    }

    /// Declare a base property filled by `f`.
    pub fn declare_base(
        &mut self,
        name: &str,
        f: impl Fn(usize) -> Real + Send + Sync + 'static,
    ) -> Result<(), DeclareError> {
        let handle = self.registry.declare_property::<Real>(name)?;
        self.outputs.push((handle, Box::new(f)));
        Ok(())
    }

    /// Declare the derivative of `base` with respect to `vars`, filled
    /// by `f`.
    pub fn declare_derivative(
        &mut self,
        base: &str,
        vars: &[VariableName],
        f: impl Fn(usize) -> Real + Send + Sync + 'static,
    ) -> Result<(), DeclareError> {
        let handle = self.registry.declare_derivative::<Real>(base, vars)?;
        self.outputs.push((handle, Box::new(f)));
        Ok(())
    }

    /// Fill every declared property for an element with `n_qp` sample
    /// points, as a material would at the start of an element sweep.
    pub fn compute_element(&self, n_qp: usize) {
        for (handle, f) in &self.outputs {
            let mut property = handle.write();
            property.resize_zeroed(n_qp);
            for qp in 0..n_qp {
                property.set(qp, f(qp));
            }
        }
    }
}
