//! Numeric kernel layer: strided reference kernels, the dispatch gateway,
//! and the vendor override registry
//!
//! Every kernel is written once, generically over [`Element`], stepping
//! through buffers by an explicit [`StrideSpec`] so the same source serves
//! dense rows, dense columns, and any other constant-spacing view. Callers
//! outside the crate go through [`gateway`], which owns the untyped-buffer
//! boundary; the typed functions in [`reference`] are available directly
//! when the element type is statically known.
//!
//! [`Element`]: crate::dtype::Element

pub mod dispatch;
pub mod gateway;
pub mod reference;
pub(crate) mod registry;
#[cfg(feature = "cblas")]
pub(crate) mod vendor;

/// A 1-D logical sequence within a buffer: element count plus constant
/// spacing between consecutive elements.
///
/// Both fields are signed so that a caller's degenerate or nonsensical view
/// (zero/negative count, zero/negative stride) can be *represented* and then
/// rejected by the kernel, rather than rejected at construction. The kernels'
/// shared policy for such a spec is the empty result: `None` from `imax`, a
/// no-op from the mutating level-1 kernels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StrideSpec {
    /// Number of logical elements
    pub count: isize,
    /// Spacing between consecutive logical elements, in elements
    pub stride: isize,
}

impl StrideSpec {
    /// Create a spec from raw count and stride
    #[inline]
    pub const fn new(count: isize, stride: isize) -> Self {
        Self { count, stride }
    }

    /// Spec for `count` contiguous elements (stride 1)
    #[inline]
    pub const fn contiguous(count: usize) -> Self {
        Self {
            count: count as isize,
            stride: 1,
        }
    }

    /// True when a kernel will produce its empty result for this spec
    #[inline]
    pub const fn is_degenerate(self) -> bool {
        self.count < 1 || self.stride <= 0
    }

    /// Number of buffer elements the pattern touches: the index one past the
    /// last accessed element, or 0 for a degenerate spec. Saturates on
    /// overflow, so no buffer can satisfy an absurd count/stride pair.
    #[inline]
    pub const fn span(self) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        match (self.count as usize - 1).checked_mul(self.stride as usize) {
            Some(last) => match last.checked_add(1) {
                Some(span) => span,
                None => usize::MAX,
            },
            None => usize::MAX,
        }
    }
}

/// Whether (and how) a matrix operand is transposed
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transpose {
    /// Use the operand as stored
    NoTrans,
    /// Use the transpose
    Trans,
    /// Use the conjugate transpose (same as `Trans` for non-complex types)
    ConjTrans,
}

/// Which triangle of a matrix a triangular kernel reads
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Uplo {
    /// Upper triangle
    Upper,
    /// Lower triangle
    Lower,
}

/// Whether a triangular matrix has an implicit unit diagonal
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diag {
    /// Diagonal entries are implicitly one and not read
    Unit,
    /// Diagonal entries are read from storage
    NonUnit,
}

/// Operand side for the level-3 kernels that distinguish one
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The triangular/symmetric operand is on the left
    Left,
    /// The triangular/symmetric operand is on the right
    Right,
}

/// Identifies one kernel contract in the override registry
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KernelId {
    /// Index of maximum magnitude
    Imax,
    /// Element-wise exchange of two strided vectors
    Swap,
    /// In-place scaling
    Scal,
    /// y += alpha * x
    Axpy,
    /// Unconjugated product sum
    Dot,
    /// Dense matrix-vector product
    Gemv,
    /// Rank-1 update
    Ger,
    /// Triangular solve with a single right-hand side
    Trsv,
    /// Dense matrix-matrix product
    Gemm,
    /// LU factorization with partial pivoting
    Getrf,
}
