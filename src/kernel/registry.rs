//! Vendor kernel override registry
//!
//! The registry is the runtime data structure behind the "use the vendor
//! BLAS when it exists for this type" rule: a table from (kernel id, dtype)
//! to a function value, built exactly once on first access and read-only
//! after. Without the `cblas` feature the table is empty and every call
//! falls through to the reference kernels.
//!
//! Entries receive raw pointers whose element type the gateway has already
//! validated against the dtype tag; nothing outside the gateway may call
//! them.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::dtype::DType;
use crate::kernel::{KernelId, Transpose};

/// Index of maximum magnitude over `n` elements at `incx` spacing.
pub(crate) type ImaxFn = unsafe fn(n: usize, x: *const u8, incx: usize) -> usize;

/// Element-wise exchange of two strided vectors.
pub(crate) type SwapFn = unsafe fn(n: usize, x: *mut u8, incx: usize, y: *mut u8, incy: usize);

/// In-place scaling by the scalar at `alpha`.
pub(crate) type ScalFn = unsafe fn(n: usize, alpha: *const u8, x: *mut u8, incx: usize);

/// y += alpha * x.
pub(crate) type AxpyFn =
    unsafe fn(n: usize, alpha: *const u8, x: *const u8, incx: usize, y: *mut u8, incy: usize);

/// Unconjugated dot product written to `out`.
pub(crate) type DotFn =
    unsafe fn(n: usize, x: *const u8, incx: usize, y: *const u8, incy: usize, out: *mut u8);

/// Row-major gemv.
pub(crate) type GemvFn = unsafe fn(
    trans: Transpose,
    m: usize,
    n: usize,
    alpha: *const u8,
    a: *const u8,
    lda: usize,
    x: *const u8,
    incx: usize,
    beta: *const u8,
    y: *mut u8,
    incy: usize,
);

/// Rank-1 update over a row-major matrix.
pub(crate) type GerFn = unsafe fn(
    m: usize,
    n: usize,
    alpha: *const u8,
    x: *const u8,
    incx: usize,
    y: *const u8,
    incy: usize,
    a: *mut u8,
    lda: usize,
);

/// Row-major gemm.
#[allow(clippy::type_complexity)]
pub(crate) type GemmFn = unsafe fn(
    transa: Transpose,
    transb: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: *const u8,
    a: *const u8,
    lda: usize,
    b: *const u8,
    ldb: usize,
    beta: *const u8,
    c: *mut u8,
    ldc: usize,
);

/// One vendor entry; the variant must match the kernel id it is filed under.
#[derive(Copy, Clone)]
#[cfg_attr(not(feature = "cblas"), allow(dead_code))]
pub(crate) enum VendorFn {
    Imax(ImaxFn),
    Swap(SwapFn),
    Scal(ScalFn),
    Axpy(AxpyFn),
    Dot(DotFn),
    Gemv(GemvFn),
    Ger(GerFn),
    Gemm(GemmFn),
}

/// The override table: (kernel id, dtype) -> vendor function.
pub(crate) struct OverrideTable {
    entries: HashMap<(KernelId, DType), VendorFn>,
}

impl OverrideTable {
    fn build() -> Self {
        #[allow(unused_mut)]
        let mut entries = HashMap::new();

        #[cfg(feature = "cblas")]
        crate::kernel::vendor::register(&mut entries);

        log::debug!("kernel override table built with {} entries", entries.len());
        Self { entries }
    }

    /// Look up the override for a (kernel, dtype) pair, if one was linked.
    pub(crate) fn get(&self, id: KernelId, dtype: DType) -> Option<VendorFn> {
        self.entries.get(&(id, dtype)).copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Access the process-wide override table, building it on first use.
pub(crate) fn overrides() -> &'static OverrideTable {
    static TABLE: OnceLock<OverrideTable> = OnceLock::new();
    TABLE.get_or_init(OverrideTable::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(feature = "cblas"))]
    fn test_table_empty_without_vendor() {
        assert_eq!(overrides().len(), 0);
        assert!(overrides().get(KernelId::Imax, DType::F64).is_none());
    }

    #[test]
    #[cfg(feature = "cblas")]
    fn test_vendor_covers_blas_dtypes_only() {
        for dtype in DType::ALL {
            let have = overrides().get(KernelId::Imax, dtype).is_some();
            assert_eq!(have, dtype.is_blas(), "imax override for {dtype}");
        }
        // No vendor entry exists for the factorization
        for dtype in DType::ALL {
            assert!(overrides().get(KernelId::Getrf, dtype).is_none());
        }
    }
}
