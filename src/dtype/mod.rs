//! Element type domain for numat buffers
//!
//! This module provides the `DType` enum naming every supported element type,
//! the `Element` trait connecting those tags to concrete Rust types, and the
//! concrete complex and rational types that have no machine primitive.

pub mod complex;
mod element;
pub mod rational;

pub use complex::{Complex64, Complex128};
pub use element::Element;
pub use rational::{Rational64, Rational128};

use std::fmt;

/// Element types supported by numat buffers
///
/// This enum identifies the element type of a buffer at runtime. Using an
/// enum (rather than generics alone) allows the host matrix layer to pick a
/// type per instance while the kernels stay compiled once per type.
///
/// # Discriminant Values (Serialization Stability)
///
/// The discriminant values are **stable** for serialization purposes:
/// - Signed ints: 0-9 (I8=0, I16=1, I32=2, I64=3)
/// - Floats: 10-19 (F32=10, F64=11)
/// - Complex: 20-29 (Complex64=20, Complex128=21)
/// - Rationals: 30-39 (Rational64=30, Rational128=31)
///
/// New types will use reserved ranges. Existing values are NEVER changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 8-bit signed integer
    I8 = 0,
    /// 16-bit signed integer
    I16 = 1,
    /// 32-bit signed integer
    I32 = 2,
    /// 64-bit signed integer
    I64 = 3,

    /// 32-bit floating point
    F32 = 10,
    /// 64-bit floating point
    F64 = 11,

    /// 64-bit complex (two f32: re, im)
    Complex64 = 20,
    /// 128-bit complex (two f64: re, im)
    Complex128 = 21,

    /// 64-bit rational (i32 numerator / i32 denominator)
    Rational64 = 30,
    /// 128-bit rational (i64 numerator / i64 denominator)
    Rational128 = 31,
}

impl DType {
    /// Every supported dtype, in discriminant order
    pub const ALL: [DType; 10] = [
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
        Self::Complex64,
        Self::Complex128,
        Self::Rational64,
        Self::Rational128,
    ];

    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::I8 => 1,
            Self::I16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::I64 | Self::F64 | Self::Complex64 | Self::Rational64 => 8,
            Self::Complex128 | Self::Rational128 => 16,
        }
    }

    /// Returns true if this is a signed machine integer type
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns true if this is a complex number type
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Returns true if this is a fixed-width rational type
    #[inline]
    pub const fn is_rational(self) -> bool {
        matches!(self, Self::Rational64 | Self::Rational128)
    }

    /// Returns true if a vendor BLAS carries routines for this type
    ///
    /// Vendor libraries cover exactly the four dense numeric types; every
    /// other dtype always runs the reference kernels.
    #[inline]
    pub const fn is_blas(self) -> bool {
        matches!(
            self,
            Self::F32 | Self::F64 | Self::Complex64 | Self::Complex128
        )
    }

    /// Returns the underlying float type for complex types
    /// Returns None for non-complex types
    #[inline]
    pub const fn complex_component_dtype(self) -> Option<Self> {
        match self {
            Self::Complex64 => Some(Self::F32),
            Self::Complex128 => Some(Self::F64),
            _ => None,
        }
    }

    /// Short name for display (e.g., "f64", "c128")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Complex64 => "c64",
            Self::Complex128 => "c128",
            Self::Rational64 => "r64",
            Self::Rational128 => "r128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Set of dtypes for efficient membership testing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DTypeSet {
    bits: u64,
}

impl DTypeSet {
    /// Empty set
    pub const EMPTY: Self = Self { bits: 0 };

    /// All signed machine integer types
    pub const INTS: Self = Self {
        bits: (1 << DType::I8 as u8)
            | (1 << DType::I16 as u8)
            | (1 << DType::I32 as u8)
            | (1 << DType::I64 as u8),
    };

    /// All floating point types
    pub const FLOATS: Self = Self {
        bits: (1 << DType::F32 as u8) | (1 << DType::F64 as u8),
    };

    /// All complex types
    pub const COMPLEX: Self = Self {
        bits: (1 << DType::Complex64 as u8) | (1 << DType::Complex128 as u8),
    };

    /// All fixed-width rational types
    pub const RATIONALS: Self = Self {
        bits: (1 << DType::Rational64 as u8) | (1 << DType::Rational128 as u8),
    };

    /// The four types a vendor BLAS can stand in for
    pub const BLAS: Self = Self {
        bits: Self::FLOATS.bits | Self::COMPLEX.bits,
    };

    /// Every supported dtype
    pub const ALL: Self = Self {
        bits: Self::INTS.bits | Self::FLOATS.bits | Self::COMPLEX.bits | Self::RATIONALS.bits,
    };

    /// Create a set containing a single dtype
    #[inline]
    pub const fn single(dtype: DType) -> Self {
        Self {
            bits: 1 << dtype as u8,
        }
    }

    /// Check if the set contains a dtype
    #[inline]
    pub const fn contains(self, dtype: DType) -> bool {
        self.bits & (1 << dtype as u8) != 0
    }

    /// Union of two sets
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Intersection of two sets
    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Check if set is empty
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}
