//! The querying object's capability record.
//!
//! The registry overlays an arbitrary simulation object (a physics
//! kernel, a constitutive-law provider). What it needs from that object
//! is resolved once at construction into a [`HostBinding`]: the name
//! used in diagnostics, the assembly variable if the object is a
//! residual-form kernel, the declared coupling list, and the region
//! scope the object evaluates on.

use tangent_core::{RegionId, RegionScope, VariableName};

/// Capabilities of the object a registry is bound to.
#[derive(Clone, Debug)]
pub struct HostBinding {
    name: String,
    own_variable: Option<VariableName>,
    coupled: Vec<VariableName>,
    scope: RegionScope,
}

impl HostBinding {
    /// Binding for an object with no assembly variable (a material, a
    /// postprocessor).
    pub fn material(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            own_variable: None,
            coupled: Vec::new(),
            scope: RegionScope::Global,
        }
    }

    /// Binding for a residual-form kernel assembling for
    /// `own_variable`.
    ///
    /// A kernel implicitly couples to its own variable; the coupling
    /// validator never reports it as missing.
    pub fn kernel(name: impl Into<String>, own_variable: impl Into<VariableName>) -> Self {
        Self {
            name: name.into(),
            own_variable: Some(own_variable.into()),
            coupled: Vec::new(),
            scope: RegionScope::Global,
        }
    }

    /// Declare the object's coupled input variables.
    pub fn with_coupled<I, N>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<VariableName>,
    {
        self.coupled = variables.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the object to a region subset.
    pub fn restricted_to<I>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = RegionId>,
    {
        self.scope = RegionScope::Restricted(regions.into_iter().collect());
        self
    }

    /// The object's name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kernel's own assembly variable, if the object is one.
    pub fn own_variable(&self) -> Option<&VariableName> {
        self.own_variable.as_ref()
    }

    /// The declared coupling list.
    pub fn coupled_variables(&self) -> &[VariableName] {
        &self.coupled
    }

    /// The region scope the object evaluates on.
    pub fn scope(&self) -> &RegionScope {
        &self.scope
    }

    /// Whether `variable` is in the declared coupling list.
    pub fn couples(&self, variable: &VariableName) -> bool {
        self.coupled.contains(variable)
    }

    /// Whether `variable` is the kernel's own assembly variable.
    ///
    /// Always false for objects that are not residual-form kernels.
    pub fn is_own_variable(&self, variable: &VariableName) -> bool {
        self.own_variable.as_ref() == Some(variable)
    }
}
