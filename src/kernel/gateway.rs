//! Kernel dispatch gateway
//!
//! This is the single entry point higher layers call: every function takes a
//! [`DType`] tag plus untyped byte buffers, validates the tag, reinterprets
//! the buffers as the tagged element type, and routes to either a vendor
//! override or the reference kernel. The gateway performs no numeric work
//! itself and holds no state beyond the override table.
//!
//! # The cast boundary
//!
//! Reinterpreting an untyped buffer is the one unsafe-in-spirit operation in
//! the crate, and it happens only here, through [`bytemuck::try_cast_slice`]:
//! a buffer whose length or alignment does not fit the tagged type fails
//! with [`Error::TypeMismatch`] before any element is touched. Buffers are
//! expected to originate from typed allocations (e.g.
//! `bytemuck::cast_slice(&[f64])`), which makes alignment automatic.
//!
//! # Degenerate strides
//!
//! A degenerate [`StrideSpec`] (count < 1 or stride <= 0) short-circuits to
//! the kernel's empty result before any vendor routine is consulted, so the
//! policy is identical on both code paths.

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::kernel::registry::{self, VendorFn};
use crate::kernel::{reference, Diag, KernelId, StrideSpec, Transpose, Uplo};

// ---------------------------------------------------------------------------
// Cast and validation helpers
// ---------------------------------------------------------------------------

fn cast<'a, T: Element>(bytes: &'a [u8], op: &'static str) -> Result<&'a [T]> {
    bytemuck::try_cast_slice(bytes).map_err(|e| Error::TypeMismatch {
        dtype: T::DTYPE,
        op,
        reason: e.to_string(),
    })
}

fn cast_mut<'a, T: Element>(bytes: &'a mut [u8], op: &'static str) -> Result<&'a mut [T]> {
    bytemuck::try_cast_slice_mut(bytes).map_err(|e| Error::TypeMismatch {
        dtype: T::DTYPE,
        op,
        reason: e.to_string(),
    })
}

// A scalar operand is a buffer holding exactly one element.
fn scalar<T: Element>(bytes: &[u8], op: &'static str) -> Result<T> {
    let s = cast::<T>(bytes, op)?;
    if s.len() != 1 {
        return Err(Error::invalid_argument(
            "scalar",
            format!("expected exactly 1 element, got {}", s.len()),
        ));
    }
    Ok(s[0])
}

fn check_span(len: usize, spec: StrideSpec, arg: &'static str) -> Result<()> {
    let need = spec.span();
    if len < need {
        return Err(Error::invalid_argument(
            arg,
            format!("buffer holds {len} elements but the stride pattern touches {need}"),
        ));
    }
    Ok(())
}

fn check_counts(xs: StrideSpec, ys: StrideSpec) -> Result<()> {
    if !xs.is_degenerate() && !ys.is_degenerate() && xs.count != ys.count {
        return Err(Error::invalid_argument(
            "count",
            format!("logical counts differ: {} vs {}", xs.count, ys.count),
        ));
    }
    Ok(())
}

// Row-major matrix operand: `rows`×`cols` with leading dimension `ld`.
fn check_matrix(len: usize, rows: usize, cols: usize, ld: usize, arg: &'static str) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    if ld < cols {
        return Err(Error::invalid_argument(
            arg,
            format!("leading dimension {ld} is less than column count {cols}"),
        ));
    }
    // Saturate so hostile dimensions cannot wrap past the check
    let need = (rows - 1).saturating_mul(ld).saturating_add(cols);
    if len < need {
        return Err(Error::invalid_argument(
            arg,
            format!("buffer holds {len} elements but a {rows}x{cols} (ld {ld}) matrix needs {need}"),
        ));
    }
    Ok(())
}

fn check_inc(inc: usize, arg: &'static str) -> Result<()> {
    if inc == 0 {
        return Err(Error::invalid_argument(arg, "increment must be nonzero"));
    }
    Ok(())
}

// Span check for a (count, inc) vector operand of the level-2/3 kernels.
fn check_vector(len: usize, count: usize, inc: usize, arg: &'static str) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    let need = (count - 1).saturating_mul(inc).saturating_add(1);
    if len < need {
        return Err(Error::invalid_argument(
            arg,
            format!("buffer holds {len} elements but {count} elements at increment {inc} need {need}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Level 1
// ---------------------------------------------------------------------------

/// Index of maximum magnitude; `None` for a degenerate spec.
pub fn imax(dtype: DType, x: &[u8], spec: StrideSpec) -> Result<Option<usize>> {
    crate::dispatch_dtype!(dtype, T => {
        let x = cast::<T>(x, "imax")?;
        if spec.is_degenerate() {
            return Ok(None);
        }
        check_span(x.len(), spec, "x")?;
        if let Some(VendorFn::Imax(f)) = registry::overrides().get(KernelId::Imax, dtype) {
            let idx =
                unsafe { f(spec.count as usize, x.as_ptr().cast(), spec.stride as usize) };
            return Ok(Some(idx));
        }
        Ok(reference::imax(x, spec))
    }, "imax")
}

/// Exchange element i of `x` with element i of `y`; degenerate specs no-op.
pub fn swap(
    dtype: DType,
    x: &mut [u8],
    xs: StrideSpec,
    y: &mut [u8],
    ys: StrideSpec,
) -> Result<()> {
    check_counts(xs, ys)?;
    crate::dispatch_dtype!(dtype, T => {
        let x = cast_mut::<T>(x, "swap")?;
        let y = cast_mut::<T>(y, "swap")?;
        if xs.is_degenerate() || ys.is_degenerate() {
            return Ok(());
        }
        check_span(x.len(), xs, "x")?;
        check_span(y.len(), ys, "y")?;
        if let Some(VendorFn::Swap(f)) = registry::overrides().get(KernelId::Swap, dtype) {
            unsafe {
                f(
                    xs.count as usize,
                    x.as_mut_ptr().cast(),
                    xs.stride as usize,
                    y.as_mut_ptr().cast(),
                    ys.stride as usize,
                );
            }
            return Ok(());
        }
        reference::swap(x, xs, y, ys);
        Ok(())
    }, "swap")
}

/// In-place scaling: x[i] *= alpha.
pub fn scal(dtype: DType, alpha: &[u8], x: &mut [u8], spec: StrideSpec) -> Result<()> {
    crate::dispatch_dtype!(dtype, T => {
        let alpha_t = scalar::<T>(alpha, "scal")?;
        let x = cast_mut::<T>(x, "scal")?;
        if spec.is_degenerate() {
            return Ok(());
        }
        check_span(x.len(), spec, "x")?;
        if let Some(VendorFn::Scal(f)) = registry::overrides().get(KernelId::Scal, dtype) {
            unsafe {
                f(
                    spec.count as usize,
                    (&alpha_t as *const T).cast(),
                    x.as_mut_ptr().cast(),
                    spec.stride as usize,
                );
            }
            return Ok(());
        }
        reference::scal(alpha_t, x, spec);
        Ok(())
    }, "scal")
}

/// y[i] += alpha * x[i].
pub fn axpy(
    dtype: DType,
    alpha: &[u8],
    x: &[u8],
    xs: StrideSpec,
    y: &mut [u8],
    ys: StrideSpec,
) -> Result<()> {
    check_counts(xs, ys)?;
    crate::dispatch_dtype!(dtype, T => {
        let alpha_t = scalar::<T>(alpha, "axpy")?;
        let x = cast::<T>(x, "axpy")?;
        let y = cast_mut::<T>(y, "axpy")?;
        if xs.is_degenerate() || ys.is_degenerate() {
            return Ok(());
        }
        check_span(x.len(), xs, "x")?;
        check_span(y.len(), ys, "y")?;
        if let Some(VendorFn::Axpy(f)) = registry::overrides().get(KernelId::Axpy, dtype) {
            unsafe {
                f(
                    xs.count as usize,
                    (&alpha_t as *const T).cast(),
                    x.as_ptr().cast(),
                    xs.stride as usize,
                    y.as_mut_ptr().cast(),
                    ys.stride as usize,
                );
            }
            return Ok(());
        }
        reference::axpy(alpha_t, x, xs, y, ys);
        Ok(())
    }, "axpy")
}

/// Unconjugated dot product, written to the one-element buffer `out`.
pub fn dot(
    dtype: DType,
    x: &[u8],
    xs: StrideSpec,
    y: &[u8],
    ys: StrideSpec,
    out: &mut [u8],
) -> Result<()> {
    check_counts(xs, ys)?;
    crate::dispatch_dtype!(dtype, T => {
        let x = cast::<T>(x, "dot")?;
        let y = cast::<T>(y, "dot")?;
        let out = cast_mut::<T>(out, "dot")?;
        if out.len() != 1 {
            return Err(Error::invalid_argument(
                "out",
                format!("expected exactly 1 element, got {}", out.len()),
            ));
        }
        if xs.is_degenerate() || ys.is_degenerate() {
            out[0] = T::zero();
            return Ok(());
        }
        check_span(x.len(), xs, "x")?;
        check_span(y.len(), ys, "y")?;
        if let Some(VendorFn::Dot(f)) = registry::overrides().get(KernelId::Dot, dtype) {
            unsafe {
                f(
                    xs.count as usize,
                    x.as_ptr().cast(),
                    xs.stride as usize,
                    y.as_ptr().cast(),
                    ys.stride as usize,
                    out.as_mut_ptr().cast(),
                );
            }
            return Ok(());
        }
        out[0] = reference::dot(x, xs, y, ys);
        Ok(())
    }, "dot")
}

// ---------------------------------------------------------------------------
// Level 2
// ---------------------------------------------------------------------------

/// Dense matrix-vector product: y = alpha * op(A) * x + beta * y.
#[allow(clippy::too_many_arguments)]
pub fn gemv(
    dtype: DType,
    trans: Transpose,
    m: usize,
    n: usize,
    alpha: &[u8],
    a: &[u8],
    lda: usize,
    x: &[u8],
    incx: usize,
    beta: &[u8],
    y: &mut [u8],
    incy: usize,
) -> Result<()> {
    check_inc(incx, "incx")?;
    check_inc(incy, "incy")?;
    crate::dispatch_dtype!(dtype, T => {
        let alpha_t = scalar::<T>(alpha, "gemv")?;
        let beta_t = scalar::<T>(beta, "gemv")?;
        let a = cast::<T>(a, "gemv")?;
        let x = cast::<T>(x, "gemv")?;
        let y = cast_mut::<T>(y, "gemv")?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        check_matrix(a.len(), m, n, lda, "a")?;
        let (rows, cols) = match trans {
            Transpose::NoTrans => (m, n),
            _ => (n, m),
        };
        check_vector(x.len(), cols, incx, "x")?;
        check_vector(y.len(), rows, incy, "y")?;
        if let Some(VendorFn::Gemv(f)) = registry::overrides().get(KernelId::Gemv, dtype) {
            unsafe {
                f(
                    trans,
                    m,
                    n,
                    (&alpha_t as *const T).cast(),
                    a.as_ptr().cast(),
                    lda,
                    x.as_ptr().cast(),
                    incx,
                    (&beta_t as *const T).cast(),
                    y.as_mut_ptr().cast(),
                    incy,
                );
            }
            return Ok(());
        }
        reference::gemv(trans, m, n, alpha_t, a, lda, x, incx, beta_t, y, incy);
        Ok(())
    }, "gemv")
}

/// Rank-1 update: A += alpha * x * y^T (unconjugated).
#[allow(clippy::too_many_arguments)]
pub fn ger(
    dtype: DType,
    m: usize,
    n: usize,
    alpha: &[u8],
    x: &[u8],
    incx: usize,
    y: &[u8],
    incy: usize,
    a: &mut [u8],
    lda: usize,
) -> Result<()> {
    check_inc(incx, "incx")?;
    check_inc(incy, "incy")?;
    crate::dispatch_dtype!(dtype, T => {
        let alpha_t = scalar::<T>(alpha, "ger")?;
        let x = cast::<T>(x, "ger")?;
        let y = cast::<T>(y, "ger")?;
        let a = cast_mut::<T>(a, "ger")?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        check_matrix(a.len(), m, n, lda, "a")?;
        check_vector(x.len(), m, incx, "x")?;
        check_vector(y.len(), n, incy, "y")?;
        if let Some(VendorFn::Ger(f)) = registry::overrides().get(KernelId::Ger, dtype) {
            unsafe {
                f(
                    m,
                    n,
                    (&alpha_t as *const T).cast(),
                    x.as_ptr().cast(),
                    incx,
                    y.as_ptr().cast(),
                    incy,
                    a.as_mut_ptr().cast(),
                    lda,
                );
            }
            return Ok(());
        }
        reference::ger(m, n, alpha_t, x, incx, y, incy, a, lda);
        Ok(())
    }, "ger")
}

/// Triangular solve: x := op(A)^-1 * x.
///
/// With `Diag::NonUnit`, an exactly-zero diagonal entry fails with
/// [`Error::Singular`] before any element is modified.
#[allow(clippy::too_many_arguments)]
pub fn trsv(
    dtype: DType,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: usize,
    a: &[u8],
    lda: usize,
    x: &mut [u8],
    incx: usize,
) -> Result<()> {
    check_inc(incx, "incx")?;
    crate::dispatch_dtype!(dtype, T => {
        let a = cast::<T>(a, "trsv")?;
        let x = cast_mut::<T>(x, "trsv")?;
        if n == 0 {
            return Ok(());
        }
        check_matrix(a.len(), n, n, lda, "a")?;
        check_vector(x.len(), n, incx, "x")?;
        if diag == Diag::NonUnit {
            for i in 0..n {
                if a[i * lda + i].magnitude() == 0.0 {
                    return Err(Error::Singular { pivot: i });
                }
            }
        }
        reference::trsv(uplo, trans, diag, n, a, lda, x, incx);
        Ok(())
    }, "trsv")
}

// ---------------------------------------------------------------------------
// Level 3
// ---------------------------------------------------------------------------

/// Dense matrix-matrix product: C = alpha * op(A) * op(B) + beta * C.
#[allow(clippy::too_many_arguments)]
pub fn gemm(
    dtype: DType,
    transa: Transpose,
    transb: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: &[u8],
    a: &[u8],
    lda: usize,
    b: &[u8],
    ldb: usize,
    beta: &[u8],
    c: &mut [u8],
    ldc: usize,
) -> Result<()> {
    crate::dispatch_dtype!(dtype, T => {
        let alpha_t = scalar::<T>(alpha, "gemm")?;
        let beta_t = scalar::<T>(beta, "gemm")?;
        let a = cast::<T>(a, "gemm")?;
        let b = cast::<T>(b, "gemm")?;
        let c = cast_mut::<T>(c, "gemm")?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        // Stored dimensions of each operand depend on its transpose flag.
        let (a_rows, a_cols) = match transa {
            Transpose::NoTrans => (m, k),
            _ => (k, m),
        };
        let (b_rows, b_cols) = match transb {
            Transpose::NoTrans => (k, n),
            _ => (n, k),
        };
        check_matrix(a.len(), a_rows, a_cols, lda, "a")?;
        check_matrix(b.len(), b_rows, b_cols, ldb, "b")?;
        check_matrix(c.len(), m, n, ldc, "c")?;
        if let Some(VendorFn::Gemm(f)) = registry::overrides().get(KernelId::Gemm, dtype) {
            unsafe {
                f(
                    transa,
                    transb,
                    m,
                    n,
                    k,
                    (&alpha_t as *const T).cast(),
                    a.as_ptr().cast(),
                    lda,
                    b.as_ptr().cast(),
                    ldb,
                    (&beta_t as *const T).cast(),
                    c.as_mut_ptr().cast(),
                    ldc,
                );
            }
            return Ok(());
        }
        reference::gemm(
            transa, transb, m, n, k, alpha_t, a, lda, b, ldb, beta_t, c, ldc,
        );
        Ok(())
    }, "gemm")
}

/// LU factorization with partial pivoting, in place.
///
/// Not available for machine-integer dtypes: truncating division cannot
/// produce a valid factorization, so those tags fail with
/// [`Error::UnsupportedDType`]. There is no vendor override for this kernel;
/// it always runs the reference implementation.
pub fn getrf(dtype: DType, m: usize, n: usize, a: &mut [u8], lda: usize, ipiv: &mut [usize]) -> Result<()> {
    if dtype.is_int() {
        return Err(Error::unsupported_dtype(dtype, "getrf"));
    }
    crate::dispatch_dtype!(dtype, T => {
        let a = cast_mut::<T>(a, "getrf")?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        check_matrix(a.len(), m, n, lda, "a")?;
        if ipiv.len() < m.min(n) {
            return Err(Error::invalid_argument(
                "ipiv",
                format!("needs {} slots, got {}", m.min(n), ipiv.len()),
            ));
        }
        reference::getrf(m, n, a, lda, ipiv)
    }, "getrf")
}
