//! Error types for numat

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using numat's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in numat operations
#[derive(Error, Debug)]
pub enum Error {
    /// Kernel has no implementation (reference or vendor) for this dtype
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// An untyped buffer could not be reinterpreted as the tagged element type
    #[error("Buffer does not match dtype {dtype:?} in '{op}': {reason}")]
    TypeMismatch {
        /// The dtype the buffer was tagged with
        dtype: DType,
        /// The operation name
        op: &'static str,
        /// Why the reinterpretation failed
        reason: String,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A Yale sparsity rebuild would exceed the format's capacity bound
    #[error("Yale storage needs {needed} slots but is capped at {limit}")]
    YaleCapacity {
        /// Slots the rebuild would require
        needed: usize,
        /// Maximum slots this matrix can hold
        limit: usize,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Factorization hit an exactly-zero pivot
    #[error("Matrix is singular: zero pivot at step {pivot}")]
    Singular {
        /// Elimination step at which the zero pivot appeared
        pivot: usize,
    },

    /// Name not present in the attribute/identifier table
    #[error("Unknown symbol '{name}'")]
    UnknownSymbol {
        /// The name that failed to resolve
        name: String,
    },
}

impl Error {
    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
