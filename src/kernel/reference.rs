//! Portable reference kernels
//!
//! Each kernel here is the contract's reference implementation: one generic
//! body over [`Element`], stepping by explicit strides, never assuming
//! contiguity. Vendor overrides registered for a (kernel, dtype) pair must be
//! behaviorally indistinguishable from these, modulo floating-point rounding,
//! with one recorded exception: CBLAS ranks complex `imax` candidates by
//! |re| + |im| rather than the modulus used here (see `vendor.rs`).
//!
//! # Degenerate strides
//!
//! All strided kernels share one policy for a degenerate [`StrideSpec`]
//! (count < 1 or stride <= 0): they produce their empty result without
//! touching the buffer. That is `None` from [`imax`], zero from [`dot`],
//! and a no-op from the mutating kernels.
//!
//! # Buffer lengths
//!
//! Slices must cover the access pattern (`spec.span()` elements for vectors,
//! `(rows - 1) * ld + cols` for row-major matrices). The gateway checks this
//! before calling; direct callers that violate it hit a bounds panic.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::kernel::{Diag, StrideSpec, Transpose, Uplo};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Apply an operand's transpose flag to one of its elements.
#[inline]
fn op_value<T: Element>(trans: Transpose, v: T) -> T {
    match trans {
        Transpose::ConjTrans => v.conj(),
        _ => v,
    }
}

/// Index of the element with the greatest magnitude, first occurrence
/// winning ties.
///
/// Returns the position within the logical sequence, not the raw buffer.
/// A degenerate spec returns `None`; a single element returns `Some(0)`
/// without inspecting its magnitude.
pub fn imax<T: Element>(x: &[T], spec: StrideSpec) -> Option<usize> {
    if spec.is_degenerate() {
        return None;
    }
    let n = spec.count as usize;
    if n == 1 {
        return Some(0);
    }
    let step = spec.stride as usize;

    let mut best = 0;
    let mut dmax = x[0].magnitude();
    let mut ix = step;
    for i in 1..n {
        let mag = x[ix].magnitude();
        if mag > dmax {
            best = i;
            dmax = mag;
        }
        ix += step;
    }
    Some(best)
}

/// Exchange element i of `x` with element i of `y` for every i.
///
/// The two specs may carry independent strides; the logical count is taken
/// from `xs` and the counts must agree (the gateway enforces this). A
/// degenerate spec on either side is a no-op.
pub fn swap<T: Element>(x: &mut [T], xs: StrideSpec, y: &mut [T], ys: StrideSpec) {
    if xs.is_degenerate() || ys.is_degenerate() {
        return;
    }
    debug_assert_eq!(xs.count, ys.count);
    let n = xs.count as usize;
    let (step_x, step_y) = (xs.stride as usize, ys.stride as usize);

    let (mut ix, mut iy) = (0, 0);
    for _ in 0..n {
        let tmp = x[ix];
        x[ix] = y[iy];
        y[iy] = tmp;
        ix += step_x;
        iy += step_y;
    }
}

/// In-place scaling: x[i] *= alpha.
pub fn scal<T: Element>(alpha: T, x: &mut [T], spec: StrideSpec) {
    if spec.is_degenerate() {
        return;
    }
    let n = spec.count as usize;
    let step = spec.stride as usize;

    let mut ix = 0;
    for _ in 0..n {
        x[ix] = alpha * x[ix];
        ix += step;
    }
}

/// y[i] += alpha * x[i].
pub fn axpy<T: Element>(alpha: T, x: &[T], xs: StrideSpec, y: &mut [T], ys: StrideSpec) {
    if xs.is_degenerate() || ys.is_degenerate() {
        return;
    }
    debug_assert_eq!(xs.count, ys.count);
    let n = xs.count as usize;
    let (step_x, step_y) = (xs.stride as usize, ys.stride as usize);

    let (mut ix, mut iy) = (0, 0);
    for _ in 0..n {
        y[iy] = y[iy] + alpha * x[ix];
        ix += step_x;
        iy += step_y;
    }
}

/// Unconjugated product sum: sum of x[i] * y[i].
///
/// Returns zero for a degenerate spec.
pub fn dot<T: Element>(x: &[T], xs: StrideSpec, y: &[T], ys: StrideSpec) -> T {
    if xs.is_degenerate() || ys.is_degenerate() {
        return T::zero();
    }
    debug_assert_eq!(xs.count, ys.count);
    let n = xs.count as usize;
    let (step_x, step_y) = (xs.stride as usize, ys.stride as usize);

    let mut acc = T::zero();
    let (mut ix, mut iy) = (0, 0);
    for _ in 0..n {
        acc = acc + x[ix] * y[iy];
        ix += step_x;
        iy += step_y;
    }
    acc
}

/// Dense matrix-vector product: y = alpha * op(A) * x + beta * y.
///
/// `a` is row-major m×n with leading dimension `lda >= n`. When
/// `beta == 0`, y is written without being read.
#[allow(clippy::too_many_arguments)]
pub fn gemv<T: Element>(
    trans: Transpose,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    x: &[T],
    incx: usize,
    beta: T,
    y: &mut [T],
    incy: usize,
) {
    debug_assert!(lda >= n.max(1));
    // op(A) is rows×cols; x has `cols` logical elements, y has `rows`.
    let (rows, cols) = match trans {
        Transpose::NoTrans => (m, n),
        _ => (n, m),
    };

    for r in 0..rows {
        let mut acc = T::zero();
        for c in 0..cols {
            let av = match trans {
                Transpose::NoTrans => a[r * lda + c],
                _ => op_value(trans, a[c * lda + r]),
            };
            acc = acc + av * x[c * incx];
        }
        let scaled = alpha * acc;
        let iy = r * incy;
        y[iy] = if beta == T::zero() {
            scaled
        } else {
            scaled + beta * y[iy]
        };
    }
}

/// Rank-1 update: A += alpha * x * y^T (unconjugated, like [`dot`]).
///
/// `a` is row-major m×n with `lda >= n`; x has m logical elements at `incx`,
/// y has n at `incy`.
#[allow(clippy::too_many_arguments)]
pub fn ger<T: Element>(
    m: usize,
    n: usize,
    alpha: T,
    x: &[T],
    incx: usize,
    y: &[T],
    incy: usize,
    a: &mut [T],
    lda: usize,
) {
    if m == 0 || n == 0 {
        return;
    }
    debug_assert!(lda >= n);

    for i in 0..m {
        let xi = alpha * x[i * incx];
        if xi == T::zero() {
            continue;
        }
        for j in 0..n {
            a[i * lda + j] = a[i * lda + j] + xi * y[j * incy];
        }
    }
}

/// Triangular solve: x := op(A)^-1 * x for a row-major n×n triangular A.
///
/// With `Diag::Unit` the diagonal is taken as one and never read. The
/// divisions this performs are exact for rational elements and truncating
/// for integer elements, as with every kernel in this set.
#[allow(clippy::too_many_arguments)]
pub fn trsv<T: Element>(
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: usize,
    a: &[T],
    lda: usize,
    x: &mut [T],
    incx: usize,
) {
    if n == 0 {
        return;
    }
    debug_assert!(lda >= n);

    // Transposing flips which stored triangle the effective matrix occupies.
    let eff_uplo = match (uplo, trans) {
        (u, Transpose::NoTrans) => u,
        (Uplo::Upper, _) => Uplo::Lower,
        (Uplo::Lower, _) => Uplo::Upper,
    };
    let at = |i: usize, j: usize| -> T {
        match trans {
            Transpose::NoTrans => a[i * lda + j],
            _ => op_value(trans, a[j * lda + i]),
        }
    };

    match eff_uplo {
        Uplo::Lower => {
            // Forward substitution
            for i in 0..n {
                let mut acc = x[i * incx];
                for j in 0..i {
                    acc = acc - at(i, j) * x[j * incx];
                }
                x[i * incx] = match diag {
                    Diag::Unit => acc,
                    Diag::NonUnit => acc / at(i, i),
                };
            }
        }
        Uplo::Upper => {
            // Back substitution
            for i in (0..n).rev() {
                let mut acc = x[i * incx];
                for j in (i + 1)..n {
                    acc = acc - at(i, j) * x[j * incx];
                }
                x[i * incx] = match diag {
                    Diag::Unit => acc,
                    Diag::NonUnit => acc / at(i, i),
                };
            }
        }
    }
}

// One output row of gemm; split out so the rayon and serial drivers share it.
#[allow(clippy::too_many_arguments)]
fn gemm_row<T: Element>(
    transa: Transpose,
    transb: Transpose,
    i: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c_row: &mut [T],
) {
    for j in 0..n {
        let mut acc = T::zero();
        for p in 0..k {
            let av = match transa {
                Transpose::NoTrans => a[i * lda + p],
                _ => op_value(transa, a[p * lda + i]),
            };
            let bv = match transb {
                Transpose::NoTrans => b[p * ldb + j],
                _ => op_value(transb, b[j * ldb + p]),
            };
            acc = acc + av * bv;
        }
        let scaled = alpha * acc;
        c_row[j] = if beta == T::zero() {
            scaled
        } else {
            scaled + beta * c_row[j]
        };
    }
}

/// Dense matrix-matrix product: C = alpha * op(A) * op(B) + beta * C.
///
/// All operands are row-major; op(A) is m×k, op(B) is k×n, C is m×n with
/// leading dimension `ldc >= n`. Output rows are disjoint, so with the
/// `rayon` feature they are computed in parallel.
#[allow(clippy::too_many_arguments)]
pub fn gemm<T: Element>(
    transa: Transpose,
    transb: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
) {
    if m == 0 || n == 0 {
        return;
    }
    debug_assert!(ldc >= n);

    #[cfg(feature = "rayon")]
    {
        c.par_chunks_mut(ldc)
            .take(m)
            .enumerate()
            .for_each(|(i, c_row)| {
                gemm_row(transa, transb, i, n, k, alpha, a, lda, b, ldb, beta, c_row);
            });
    }

    #[cfg(not(feature = "rayon"))]
    {
        for (i, c_row) in c.chunks_mut(ldc).take(m).enumerate() {
            gemm_row(transa, transb, i, n, k, alpha, a, lda, b, ldb, beta, c_row);
        }
    }
}

/// LU factorization with partial pivoting: A = P * L * U, in place.
///
/// `a` is row-major m×n with `lda >= n`. On return the strict lower triangle
/// holds L (unit diagonal implied) and the upper triangle holds U. `ipiv`
/// (length >= min(m, n)) records the row swapped with row k at step k.
///
/// Pivot selection runs [`imax`] down the current column (stride `lda`) and
/// row interchanges run [`swap`] across the two full rows; an exactly-zero
/// pivot fails with [`Error::Singular`].
pub fn getrf<T: Element>(
    m: usize,
    n: usize,
    a: &mut [T],
    lda: usize,
    ipiv: &mut [usize],
) -> Result<()> {
    debug_assert!(lda >= n.max(1));
    debug_assert!(ipiv.len() >= m.min(n));

    for k in 0..m.min(n) {
        // count >= 1 and stride >= 1 here, so imax cannot be degenerate.
        let col = StrideSpec::new((m - k) as isize, lda as isize);
        let rel = imax(&a[k * lda + k..], col).unwrap_or(0);
        let piv = k + rel;
        ipiv[k] = piv;

        if a[piv * lda + k].magnitude() == 0.0 {
            return Err(Error::Singular { pivot: k });
        }

        if piv != k {
            let (top, bottom) = a.split_at_mut(piv * lda);
            swap(
                &mut top[k * lda..k * lda + n],
                StrideSpec::contiguous(n),
                &mut bottom[..n],
                StrideSpec::contiguous(n),
            );
        }

        let pivot = a[k * lda + k];
        for i in (k + 1)..m {
            let lik = a[i * lda + k] / pivot;
            a[i * lda + k] = lik;
            for j in (k + 1)..n {
                a[i * lda + j] = a[i * lda + j] - lik * a[k * lda + j];
            }
        }
    }
    Ok(())
}
