//! Fixed-width rational types for exact arithmetic
//!
//! This module provides Rational64 and Rational128: a numerator/denominator
//! pair of machine integers, stored side by side so buffers of them can cross
//! the untyped dispatch boundary like any other Pod type.
//!
//! # Invariants
//!
//! Values are kept in canonical form: gcd(numerator, denominator) == 1 and
//! the denominator is strictly positive. Every constructor and arithmetic
//! operation re-establishes this, so derived equality is exact value
//! equality.
//!
//! Intermediate products are computed in the next-wider integer before
//! reduction. A *reduced* result whose components exceed the fixed width
//! wraps on the final narrowing, as with any fixed-width integer type.

use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement a fixed-width rational type with all operations
macro_rules! impl_rational {
    ($name:ident, $int:ty, $wide:ty, $doc_bits:literal) => {
        #[doc = concat!($doc_bits, "-bit rational: ", stringify!($int), " numerator over ", stringify!($int), " denominator")]
        ///
        /// Canonical form: reduced to lowest terms, denominator positive.
        #[repr(C)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
        pub struct $name {
            /// Numerator
            pub n: $int,
            /// Denominator (always positive in canonical form)
            pub d: $int,
        }

        impl $name {
            /// Zero (0/1)
            pub const ZERO: Self = Self { n: 0, d: 1 };

            /// One (1/1)
            pub const ONE: Self = Self { n: 1, d: 1 };

            /// Create a rational from numerator and denominator, reducing to
            /// canonical form.
            ///
            /// # Panics
            ///
            /// Panics if `d == 0`.
            #[inline]
            pub fn new(n: $int, d: $int) -> Self {
                Self::reduce(n as $wide, d as $wide)
            }

            /// Create a rational from a whole number
            #[inline]
            pub const fn from_integer(n: $int) -> Self {
                Self { n, d: 1 }
            }

            /// Numeric value as f64 (lossy for large components)
            #[inline]
            pub fn to_f64(self) -> f64 {
                self.n as f64 / self.d as f64
            }

            /// Absolute value
            #[inline]
            pub fn abs(self) -> Self {
                Self {
                    n: self.n.abs(),
                    d: self.d,
                }
            }

            /// Reciprocal: d/n
            ///
            /// # Panics
            ///
            /// Panics if the value is zero.
            #[inline]
            pub fn recip(self) -> Self {
                Self::reduce(self.d as $wide, self.n as $wide)
            }

            // Reduce a widened numerator/denominator pair to canonical form.
            fn reduce(num: $wide, den: $wide) -> Self {
                assert!(den != 0, "rational denominator must be nonzero");
                let sign: $wide = if den < 0 { -1 } else { 1 };
                let mut a = num.unsigned_abs();
                let mut b = den.unsigned_abs();
                while b != 0 {
                    let t = a % b;
                    a = b;
                    b = t;
                }
                // num == 0 leaves a == |den|, giving the canonical 0/1
                let g = a as $wide;
                Self {
                    n: ((sign * num) / g) as $int,
                    d: ((sign * den) / g) as $int,
                }
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self::reduce(
                    self.n as $wide * rhs.d as $wide + rhs.n as $wide * self.d as $wide,
                    self.d as $wide * rhs.d as $wide,
                )
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self::reduce(
                    self.n as $wide * rhs.d as $wide - rhs.n as $wide * self.d as $wide,
                    self.d as $wide * rhs.d as $wide,
                )
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self::reduce(
                    self.n as $wide * rhs.n as $wide,
                    self.d as $wide * rhs.d as $wide,
                )
            }
        }

        impl Div for $name {
            type Output = Self;

            /// # Panics
            ///
            /// Panics if `rhs` is zero.
            #[inline]
            fn div(self, rhs: Self) -> Self {
                Self::reduce(
                    self.n as $wide * rhs.d as $wide,
                    self.d as $wide * rhs.n as $wide,
                )
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self {
                    n: -self.n,
                    d: self.d,
                }
            }
        }

        // Cross-multiplied comparison; denominators are positive in
        // canonical form, so no sign flip is needed.
        impl PartialOrd for $name {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                (self.n as $wide * other.d as $wide)
                    .partial_cmp(&(other.n as $wide * self.d as $wide))
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl From<$int> for $name {
            #[inline]
            fn from(n: $int) -> Self {
                Self::from_integer(n)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}/{}", self.n, self.d)
            }
        }
    };
}

impl_rational!(Rational64, i32, i64, "64");
impl_rational!(Rational128, i64, i128, "128");
