//! Typed names and the [`VarList`] differentiation-variable sequence.

use smallvec::SmallVec;
use std::fmt;

/// Name of a property sampled at the discretization points of an element.
///
/// Properties are declared once during setup by a producer (a
/// constitutive-law object, a derivative declaration, or the registry's
/// zero cache) and looked up by name afterwards. Canonical derivative
/// names are themselves `PropertyName`s, generated from a base name and
/// a variable list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyName(pub String);

impl PropertyName {
    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PropertyName {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for PropertyName {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// Name of a solution variable (a primary unknown or an auxiliary field).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableName(pub String);

impl VariableName {
    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VariableName {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for VariableName {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// An ordered sequence of differentiation variables.
///
/// Uses `SmallVec<[VariableName; 3]>` to avoid heap allocation for the
/// common first/second/third-derivative cases. Higher arities spill to
/// the heap transparently. An empty list denotes the base property
/// itself (no differentiation).
pub type VarList = SmallVec<[VariableName; 3]>;
