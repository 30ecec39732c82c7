//! Complex number types for the kernel layer
//!
//! This module provides Complex64 and Complex128 types that are compatible
//! with bytemuck for zero-copy reinterpretation at the dispatch boundary.
//!
//! # Storage Format
//!
//! Complex numbers are stored in interleaved format (re, im, re, im...),
//! matching the convention of every CBLAS implementation, so a buffer of
//! these types can be handed to a vendor routine unchanged.
//!
//! # Ordering
//!
//! `PartialOrd` compares by magnitude. Complex numbers have no natural total
//! order; magnitude ordering is what the `imax` kernel contract requires.

use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement a complex number type with all operations
///
/// This avoids code duplication between Complex64 and Complex128.
macro_rules! impl_complex {
    ($name:ident, $float:ty, $doc_bits:literal, $doc_float_bits:literal) => {
        #[doc = concat!($doc_bits, "-bit complex number with ", $doc_float_bits, " real and imaginary parts")]
        ///
        #[doc = concat!("Memory layout: ", stringify!($float), " × 2, interleaved (re, im).")]
        #[repr(C)]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
        pub struct $name {
            /// Real part
            pub re: $float,
            /// Imaginary part
            pub im: $float,
        }

        impl $name {
            /// Zero complex number
            pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

            /// One (real unit)
            pub const ONE: Self = Self { re: 1.0, im: 0.0 };

            /// Imaginary unit i
            pub const I: Self = Self { re: 0.0, im: 1.0 };

            /// Create a new complex number
            #[inline]
            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }

            /// Magnitude (absolute value): |z| = sqrt(re² + im²)
            #[inline]
            pub fn magnitude(self) -> $float {
                (self.re * self.re + self.im * self.im).sqrt()
            }

            /// Squared magnitude: |z|² = re² + im²
            ///
            /// More efficient than `magnitude()` when only the squared value
            /// is needed.
            #[inline]
            pub fn magnitude_squared(self) -> $float {
                self.re * self.re + self.im * self.im
            }

            /// Complex conjugate: conj(a + bi) = a - bi
            #[inline]
            pub fn conj(self) -> Self {
                Self {
                    re: self.re,
                    im: -self.im,
                }
            }

            /// Reciprocal: 1/z = conj(z)/|z|²
            #[inline]
            pub fn recip(self) -> Self {
                let mag_sq = self.magnitude_squared();
                if mag_sq == 0.0 {
                    Self {
                        re: <$float>::INFINITY,
                        im: <$float>::INFINITY,
                    }
                } else {
                    Self {
                        re: self.re / mag_sq,
                        im: -self.im / mag_sq,
                    }
                }
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self {
                    re: self.re + rhs.re,
                    im: self.im + rhs.im,
                }
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self {
                    re: self.re - rhs.re,
                    im: self.im - rhs.im,
                }
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self {
                    re: self.re * rhs.re - self.im * rhs.im,
                    im: self.re * rhs.im + self.im * rhs.re,
                }
            }
        }

        impl Div for $name {
            type Output = Self;

            #[inline]
            fn div(self, rhs: Self) -> Self {
                self * rhs.recip()
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self {
                    re: -self.re,
                    im: -self.im,
                }
            }
        }

        // Magnitude ordering; see the module docs.
        impl PartialOrd for $name {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                self.magnitude_squared()
                    .partial_cmp(&other.magnitude_squared())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.im < 0.0 {
                    write!(f, "{}-{}i", self.re, -self.im)
                } else {
                    write!(f, "{}+{}i", self.re, self.im)
                }
            }
        }
    };
}

impl_complex!(Complex64, f32, "64", "f32");
impl_complex!(Complex128, f64, "128", "f64");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        let z = Complex64::new(3.0, 4.0);
        assert_eq!(z.magnitude(), 5.0);
        assert_eq!(z.magnitude_squared(), 25.0);

        let w = Complex128::new(-3.0, -4.0);
        assert_eq!(w.magnitude(), 5.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Complex128::new(1.0, 2.0);
        let b = Complex128::new(3.0, -1.0);

        assert_eq!(a + b, Complex128::new(4.0, 1.0));
        assert_eq!(a - b, Complex128::new(-2.0, 3.0));
        // (1+2i)(3-i) = 3 - i + 6i - 2i² = 5 + 5i
        assert_eq!(a * b, Complex128::new(5.0, 5.0));
        assert_eq!(-a, Complex128::new(-1.0, -2.0));
    }

    #[test]
    fn test_division() {
        let a = Complex128::new(5.0, 5.0);
        let b = Complex128::new(3.0, -1.0);
        let q = a / b;
        assert!((q.re - 1.0).abs() < 1e-12);
        assert!((q.im - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_conjugate() {
        let z = Complex64::new(2.0, -7.0);
        assert_eq!(z.conj(), Complex64::new(2.0, 7.0));
        assert_eq!(z.conj().conj(), z);
    }

    #[test]
    fn test_magnitude_ordering() {
        let small = Complex64::new(1.0, 1.0);
        let big = Complex64::new(-3.0, 0.0);
        assert!(small < big);
        assert!(big > small);
    }

    #[test]
    fn test_recip_of_zero() {
        let z = Complex128::ZERO.recip();
        assert!(z.re.is_infinite());
    }

    #[test]
    fn test_display() {
        assert_eq!(Complex64::new(1.0, 2.0).to_string(), "1+2i");
        assert_eq!(Complex64::new(1.0, -2.0).to_string(), "1-2i");
    }
}
