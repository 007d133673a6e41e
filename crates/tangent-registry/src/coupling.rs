//! Coupling-completeness validation.
//!
//! A kernel that consumes `dF/dv` must declare `v` as a coupled input,
//! or its off-diagonal Jacobian silently loses the contribution. The
//! validator runs once during setup: it enumerates the active variable
//! systems, checks which variables have an actually-declared derivative
//! of the base property, and reports the ones the host forgot to
//! couple. The zero fallback keeps assembly well-defined either way,
//! so the check warns and continues.

use tangent_core::{PropertyName, PropertyValue, VariableName, VarList, VariableSystem};

use crate::names::derivative_name;
use crate::registry::DerivativeRegistry;

impl DerivativeRegistry {
    /// Check coupling completeness for `base` against the primary
    /// system, and the auxiliary system when `include_aux` is set.
    ///
    /// For each candidate variable `v`, the derivative of `base` with
    /// respect to `extra ∪ {v}` is looked up in storage; if it exists,
    /// `v` must be in the host's coupling list, unless `v` is the
    /// kernel's own assembly variable, which is implicitly coupled.
    ///
    /// All missing variables are aggregated into a single warning and
    /// returned. The check mutates nothing and is idempotent.
    pub fn validate_coupling_systems<T: PropertyValue>(
        &self,
        base: &str,
        extra: &[VariableName],
        include_aux: bool,
    ) -> Vec<VariableName> {
        let prop_name = self.problem().deduce_property_name(base);
        let mut missing = Vec::new();

        self.collect_missing::<T>(
            &prop_name,
            extra,
            self.problem().nonlinear_system(),
            &mut missing,
        );
        if include_aux {
            self.collect_missing::<T>(
                &prop_name,
                extra,
                self.problem().auxiliary_system(),
                &mut missing,
            );
        }

        if !missing.is_empty() {
            let list = missing
                .iter()
                .map(VariableName::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                object = self.host().name(),
                base = %prop_name,
                "missing coupled variables {{{list}}} (add them to the coupling \
                 list of '{}')",
                self.host().name(),
            );
        }

        missing
    }

    /// Coupling check against both the primary and auxiliary systems.
    pub fn validate_coupling<T: PropertyValue>(
        &self,
        base: &str,
        extra: &[VariableName],
    ) -> Vec<VariableName> {
        self.validate_coupling_systems::<T>(base, extra, true)
    }

    /// Coupling check against the primary (nonlinear) system only.
    pub fn validate_nonlinear_coupling<T: PropertyValue>(
        &self,
        base: &str,
        extra: &[VariableName],
    ) -> Vec<VariableName> {
        self.validate_coupling_systems::<T>(base, extra, false)
    }

    /// Accumulate relevant-but-undeclared variables from one system.
    fn collect_missing<T: PropertyValue>(
        &self,
        base: &PropertyName,
        extra: &[VariableName],
        system: &VariableSystem,
        missing: &mut Vec<VariableName>,
    ) {
        for group in system.groups() {
            for v in group.variables() {
                let mut with_v: VarList = extra.iter().cloned().collect();
                with_v.push(v.clone());
                let name = derivative_name(base.as_str(), &with_v);

                // A derivative nobody declared resolves to zero anyway;
                // only declared ones make the variable relevant.
                if !self
                    .problem()
                    .store()
                    .has::<T>(name.as_str(), self.host().scope())
                {
                    continue;
                }
                if self.host().is_own_variable(v)
                    || self.host().couples(v)
                    || missing.contains(v)
                {
                    continue;
                }
                missing.push(v.clone());
            }
        }
    }
}
