//! Property element types and their additive identities.

/// Scalar value type used for property samples and tensor components.
pub type Real = f64;

/// A rank-two tensor property value (3x3, full dimension).
///
/// Constitutive laws in mechanics and phase-field models declare stress,
/// strain, and mobility properties of this type; their derivatives are
/// rank-two tensors as well.
pub type Tensor2 = nalgebra::Matrix3<Real>;

/// A value that can live in a [`Property`](crate::Property) array.
///
/// The single requirement beyond threading bounds is an additive
/// identity: the registry materializes zero properties for derivatives
/// that were never declared, and "zero" must be well-defined for the
/// element type.
///
/// The trait is not implemented for references or raw pointers: a zero
/// of a pointer-like type is meaningless, so requesting one is a
/// compile error rather than a runtime one.
pub trait PropertyValue: Clone + Send + Sync + 'static {
    /// The additive identity of this type.
    fn zero() -> Self;
}

impl PropertyValue for Real {
    fn zero() -> Self {
        0.0
    }
}

impl PropertyValue for Tensor2 {
    fn zero() -> Self {
        Tensor2::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_zero_is_additive_identity() {
        let z = Real::zero();
        assert_eq!(z, 0.0);
        assert_eq!(z + 3.25, 3.25);
    }

    #[test]
    fn tensor2_zero_has_all_zero_components() {
        let z = Tensor2::zero();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(z[(i, j)], 0.0);
            }
        }
    }
}
