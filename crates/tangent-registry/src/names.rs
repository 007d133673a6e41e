//! Canonical derivative property names.
//!
//! A derivative of `F` with respect to `c1`, `c2`, ... is identified by
//! a single canonical string so that producers and consumers agree on
//! the key regardless of the order they list the variables in. The
//! variable list is sorted lexicographically before concatenation and
//! runs of equal names collapse into an exponent, so `∂²F/∂x∂y` and
//! `∂²F/∂x²` get distinct names and the call-site argument order never
//! matters.

use smallvec::SmallVec;
use tangent_core::{ConfigError, PropertyName, VariableName};

/// Separator between the base-name part and each differentiation
/// variable in a canonical derivative name.
pub const DERIVATIVE_SEPARATOR: char = '/';

/// Generate the canonical name for the derivative of `base` with
/// respect to `vars`.
///
/// - empty `vars` returns `base` unchanged;
/// - one variable: `dF/dx`;
/// - two or more: `d^2F/dxdy`, with repeats collapsed (`d^2F/dx^2`,
///   `d^3F/dx^2dy`).
///
/// The result is a pure function of `base` and the multiset of `vars`:
/// permuting the input list never changes the output.
pub fn derivative_name(base: &str, vars: &[VariableName]) -> PropertyName {
    if vars.is_empty() {
        return PropertyName::from(base);
    }

    // Inline buffer for the sort; no heap traffic up to third order.
    let mut sorted: SmallVec<[&VariableName; 3]> = vars.iter().collect();
    sorted.sort();

    let order = sorted.len();
    let mut out = String::with_capacity(base.len() + 8 * order);
    if order == 1 {
        out.push('d');
    } else {
        out.push_str("d^");
        out.push_str(&order.to_string());
    }
    out.push_str(base);
    out.push(DERIVATIVE_SEPARATOR);

    let mut i = 0;
    while i < order {
        let v = sorted[i];
        let mut run = 1;
        while i + run < order && sorted[i + run] == v {
            run += 1;
        }
        out.push('d');
        out.push_str(v.as_str());
        if run > 1 {
            out.push('^');
            out.push_str(&run.to_string());
        }
        i += run;
    }

    PropertyName::from(out)
}

/// Reject base names that would make generated derivative names
/// ambiguous.
///
/// Canonical names embed the base verbatim, so a separator inside it is
/// a caller error, surfaced at declaration time.
pub fn check_base_name(base: &str) -> Result<(), ConfigError> {
    if base.contains(DERIVATIVE_SEPARATOR) {
        return Err(ConfigError::SeparatorInBaseName {
            name: base.to_string(),
        });
    }
    Ok(())
}
