//! Element trait for mapping Rust types to DType

use super::{Complex64, Complex128, DType, Rational64, Rational128};
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a numat buffer
///
/// This trait connects Rust's type system to numat's runtime dtype system.
/// It's implemented for every member of the element type domain and nothing
/// else: the set is closed so the dispatch gateway can enumerate it.
///
/// # Bounds
/// - `Copy + Clone + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory reinterpretation at the dispatch boundary
/// - `Add + Sub + Mul + Div` - Arithmetic operations (Output = Self)
/// - `PartialEq + PartialOrd` - Equality and comparison for pivot/extremum
///   searches (complex types compare by magnitude)
pub trait Element:
    Copy
    + Clone
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialEq
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Magnitude as f64: |x| for reals, the modulus for complex types, and
    /// |n/d| for rationals
    ///
    /// This is what `imax` and pivot selection compare, so it must be
    /// non-negative and zero exactly when the value is zero.
    fn magnitude(self) -> f64;

    /// Complex conjugate; the identity for every non-complex type
    #[inline]
    fn conj(self) -> Self {
        self
    }
}

macro_rules! impl_int_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }

            #[inline]
            fn magnitude(self) -> f64 {
                (self as f64).abs()
            }
        }
    };
}

impl_int_element!(i8, DType::I8);
impl_int_element!(i16, DType::I16);
impl_int_element!(i32, DType::I32);
impl_int_element!(i64, DType::I64);

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn magnitude(self) -> f64 {
        (self as f64).abs()
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl Element for Complex64 {
    const DTYPE: DType = DType::Complex64;

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn magnitude(self) -> f64 {
        Complex64::magnitude(self) as f64
    }

    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(self)
    }
}

impl Element for Complex128 {
    const DTYPE: DType = DType::Complex128;

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn magnitude(self) -> f64 {
        Complex128::magnitude(self)
    }

    #[inline]
    fn conj(self) -> Self {
        Complex128::conj(self)
    }
}

impl Element for Rational64 {
    const DTYPE: DType = DType::Rational64;

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.to_f64().abs()
    }
}

impl Element for Rational128 {
    const DTYPE: DType = DType::Rational128;

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.to_f64().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(i8::DTYPE, DType::I8);
        assert_eq!(i64::DTYPE, DType::I64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(Complex128::DTYPE, DType::Complex128);
        assert_eq!(Rational64::DTYPE, DType::Rational64);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!((-7i32).magnitude(), 7.0);
        assert_eq!((-2.5f64).magnitude(), 2.5);
        assert_eq!(Complex64::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Rational64::new(-7, 2).magnitude(), 3.5);
        assert_eq!(Element::magnitude(Rational128::ZERO), 0.0);
    }

    #[test]
    fn test_conj_identity_for_reals() {
        assert_eq!(Element::conj(-3i16), -3);
        assert_eq!(Element::conj(1.5f32), 1.5);
        assert_eq!(Element::conj(Rational64::new(1, 2)), Rational64::new(1, 2));
        assert_eq!(
            Element::conj(Complex128::new(1.0, 2.0)),
            Complex128::new(1.0, -2.0)
        );
    }

    #[test]
    fn test_identities() {
        fn check<T: Element + std::fmt::Debug>() {
            assert_eq!(T::zero() + T::one(), T::one());
            assert_eq!(T::one() * T::one(), T::one());
            assert_eq!(T::zero().magnitude(), 0.0);
        }
        check::<i32>();
        check::<f64>();
        check::<Complex64>();
        check::<Rational128>();
    }
}
