//! Spatial region identifiers and visibility scopes.
//!
//! Properties may be declared on a subset of the mesh (a block or
//! boundary region); a caller evaluating outside that subset must not
//! see them. The scope is recorded at declaration and each querying
//! object resolves its own scope once at construction.

use std::fmt;

/// Identifies a spatial region (mesh block or boundary subset).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RegionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Where a property is declared, or where a querying object evaluates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionScope {
    /// Declared or evaluating everywhere on the mesh.
    Global,
    /// Declared or evaluating only on the listed regions.
    Restricted(Vec<RegionId>),
}

impl RegionScope {
    /// Whether this scope is restricted to a region subset.
    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::Restricted(_))
    }

    /// Whether a caller with this scope may see a property declared
    /// with `declared`.
    ///
    /// A globally declared property is visible to everyone. A
    /// region-restricted property is visible only to a caller whose own
    /// restriction is a subset of the property's regions; an
    /// unrestricted caller can wander outside the declared subset and
    /// must not see it.
    pub fn can_see(&self, declared: &RegionScope) -> bool {
        match declared {
            RegionScope::Global => true,
            RegionScope::Restricted(declared_regions) => match self {
                RegionScope::Global => false,
                RegionScope::Restricted(caller_regions) => caller_regions
                    .iter()
                    .all(|r| declared_regions.contains(r)),
            },
        }
    }
}
