//! CBLAS-backed kernel overrides
//!
//! Compiled only with the `cblas` feature. Each wrapper adapts one CBLAS
//! routine to the registry's raw-pointer calling convention; the gateway has
//! already validated the dtype tag and buffer spans by the time these run,
//! which is why the pointers arrive untyped.
//!
//! Coverage is exactly what CBLAS provides: the four dense numeric types for
//! the level-1/2/3 kernels. Everything else stays on the reference path.

#![allow(unsafe_op_in_unsafe_fn)] // Wrappers are already marked unsafe, inner unsafe is redundant

use std::collections::HashMap;
use std::ffi::c_void;

use cblas_sys::{CBLAS_LAYOUT, CBLAS_TRANSPOSE};

use crate::dtype::DType;
use crate::kernel::registry::VendorFn;
use crate::kernel::{KernelId, Transpose};

fn to_cblas(trans: Transpose) -> CBLAS_TRANSPOSE {
    match trans {
        Transpose::NoTrans => CBLAS_TRANSPOSE::CblasNoTrans,
        Transpose::Trans => CBLAS_TRANSPOSE::CblasTrans,
        Transpose::ConjTrans => CBLAS_TRANSPOSE::CblasConjTrans,
    }
}

// ---------------------------------------------------------------------------
// imax
// ---------------------------------------------------------------------------

unsafe fn imax_f32(n: usize, x: *const u8, incx: usize) -> usize {
    cblas_sys::cblas_isamax(n as i32, x as *const f32, incx as i32) as usize
}

unsafe fn imax_f64(n: usize, x: *const u8, incx: usize) -> usize {
    cblas_sys::cblas_idamax(n as i32, x as *const f64, incx as i32) as usize
}

// CBLAS icamax/izamax rank complex entries by |re| + |im|, not the modulus
// the reference kernel uses, so the two paths can disagree when the 1-norm
// and 2-norm order entries differently (e.g. 3+4i outranks 4+2i by modulus
// but not by |re| + |im|). CBLAS precedent keeps the substitution.

unsafe fn imax_c64(n: usize, x: *const u8, incx: usize) -> usize {
    cblas_sys::cblas_icamax(n as i32, x as *const c_void as *const _, incx as i32) as usize
}

unsafe fn imax_c128(n: usize, x: *const u8, incx: usize) -> usize {
    cblas_sys::cblas_izamax(n as i32, x as *const c_void as *const _, incx as i32) as usize
}

// ---------------------------------------------------------------------------
// swap
// ---------------------------------------------------------------------------

unsafe fn swap_f32(n: usize, x: *mut u8, incx: usize, y: *mut u8, incy: usize) {
    cblas_sys::cblas_sswap(n as i32, x as *mut f32, incx as i32, y as *mut f32, incy as i32);
}

unsafe fn swap_f64(n: usize, x: *mut u8, incx: usize, y: *mut u8, incy: usize) {
    cblas_sys::cblas_dswap(n as i32, x as *mut f64, incx as i32, y as *mut f64, incy as i32);
}

unsafe fn swap_c64(n: usize, x: *mut u8, incx: usize, y: *mut u8, incy: usize) {
    cblas_sys::cblas_cswap(
        n as i32,
        x as *mut c_void as *mut _,
        incx as i32,
        y as *mut c_void as *mut _,
        incy as i32,
    );
}

unsafe fn swap_c128(n: usize, x: *mut u8, incx: usize, y: *mut u8, incy: usize) {
    cblas_sys::cblas_zswap(
        n as i32,
        x as *mut c_void as *mut _,
        incx as i32,
        y as *mut c_void as *mut _,
        incy as i32,
    );
}

// ---------------------------------------------------------------------------
// scal
// ---------------------------------------------------------------------------

unsafe fn scal_f32(n: usize, alpha: *const u8, x: *mut u8, incx: usize) {
    cblas_sys::cblas_sscal(n as i32, *(alpha as *const f32), x as *mut f32, incx as i32);
}

unsafe fn scal_f64(n: usize, alpha: *const u8, x: *mut u8, incx: usize) {
    cblas_sys::cblas_dscal(n as i32, *(alpha as *const f64), x as *mut f64, incx as i32);
}

unsafe fn scal_c64(n: usize, alpha: *const u8, x: *mut u8, incx: usize) {
    cblas_sys::cblas_cscal(
        n as i32,
        alpha as *const c_void as *const _,
        x as *mut c_void as *mut _,
        incx as i32,
    );
}

unsafe fn scal_c128(n: usize, alpha: *const u8, x: *mut u8, incx: usize) {
    cblas_sys::cblas_zscal(
        n as i32,
        alpha as *const c_void as *const _,
        x as *mut c_void as *mut _,
        incx as i32,
    );
}

// ---------------------------------------------------------------------------
// axpy
// ---------------------------------------------------------------------------

unsafe fn axpy_f32(n: usize, alpha: *const u8, x: *const u8, incx: usize, y: *mut u8, incy: usize) {
    cblas_sys::cblas_saxpy(
        n as i32,
        *(alpha as *const f32),
        x as *const f32,
        incx as i32,
        y as *mut f32,
        incy as i32,
    );
}

unsafe fn axpy_f64(n: usize, alpha: *const u8, x: *const u8, incx: usize, y: *mut u8, incy: usize) {
    cblas_sys::cblas_daxpy(
        n as i32,
        *(alpha as *const f64),
        x as *const f64,
        incx as i32,
        y as *mut f64,
        incy as i32,
    );
}

unsafe fn axpy_c64(n: usize, alpha: *const u8, x: *const u8, incx: usize, y: *mut u8, incy: usize) {
    cblas_sys::cblas_caxpy(
        n as i32,
        alpha as *const c_void as *const _,
        x as *const c_void as *const _,
        incx as i32,
        y as *mut c_void as *mut _,
        incy as i32,
    );
}

unsafe fn axpy_c128(n: usize, alpha: *const u8, x: *const u8, incx: usize, y: *mut u8, incy: usize) {
    cblas_sys::cblas_zaxpy(
        n as i32,
        alpha as *const c_void as *const _,
        x as *const c_void as *const _,
        incx as i32,
        y as *mut c_void as *mut _,
        incy as i32,
    );
}

// ---------------------------------------------------------------------------
// dot (unconjugated)
// ---------------------------------------------------------------------------

unsafe fn dot_f32(n: usize, x: *const u8, incx: usize, y: *const u8, incy: usize, out: *mut u8) {
    *(out as *mut f32) = cblas_sys::cblas_sdot(
        n as i32,
        x as *const f32,
        incx as i32,
        y as *const f32,
        incy as i32,
    );
}

unsafe fn dot_f64(n: usize, x: *const u8, incx: usize, y: *const u8, incy: usize, out: *mut u8) {
    *(out as *mut f64) = cblas_sys::cblas_ddot(
        n as i32,
        x as *const f64,
        incx as i32,
        y as *const f64,
        incy as i32,
    );
}

unsafe fn dot_c64(n: usize, x: *const u8, incx: usize, y: *const u8, incy: usize, out: *mut u8) {
    cblas_sys::cblas_cdotu_sub(
        n as i32,
        x as *const c_void as *const _,
        incx as i32,
        y as *const c_void as *const _,
        incy as i32,
        out as *mut c_void as *mut _,
    );
}

unsafe fn dot_c128(n: usize, x: *const u8, incx: usize, y: *const u8, incy: usize, out: *mut u8) {
    cblas_sys::cblas_zdotu_sub(
        n as i32,
        x as *const c_void as *const _,
        incx as i32,
        y as *const c_void as *const _,
        incy as i32,
        out as *mut c_void as *mut _,
    );
}

// ---------------------------------------------------------------------------
// gemv
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
unsafe fn gemv_f32(
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
) {
    cblas_sys::cblas_sgemv(
        CBLAS_LAYOUT::CblasRowMajor,
        to_cblas(trans),
        m as i32,
        n as i32,
        *(alpha as *const f32),
        a as *const f32,
        lda as i32,
        x as *const f32,
        incx as i32,
        *(beta as *const f32),
        y as *mut f32,
        incy as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn gemv_f64(
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
) {
    cblas_sys::cblas_dgemv(
        CBLAS_LAYOUT::CblasRowMajor,
        to_cblas(trans),
        m as i32,
        n as i32,
        *(alpha as *const f64),
        a as *const f64,
        lda as i32,
        x as *const f64,
        incx as i32,
        *(beta as *const f64),
        y as *mut f64,
        incy as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn gemv_c64(
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
) {
    cblas_sys::cblas_cgemv(
        CBLAS_LAYOUT::CblasRowMajor,
        to_cblas(trans),
        m as i32,
        n as i32,
        alpha as *const c_void as *const _,
        a as *const c_void as *const _,
        lda as i32,
        x as *const c_void as *const _,
        incx as i32,
        beta as *const c_void as *const _,
        y as *mut c_void as *mut _,
        incy as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn gemv_c128(
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
) {
    cblas_sys::cblas_zgemv(
        CBLAS_LAYOUT::CblasRowMajor,
        to_cblas(trans),
        m as i32,
        n as i32,
        alpha as *const c_void as *const _,
        a as *const c_void as *const _,
        lda as i32,
        x as *const c_void as *const _,
        incx as i32,
        beta as *const c_void as *const _,
        y as *mut c_void as *mut _,
        incy as i32,
    );
}

// ---------------------------------------------------------------------------
// ger (unconjugated rank-1 update)
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
unsafe fn ger_f32(
    m: usize,
    n: usize,
    alpha: *const u8,
    x: *const u8,
    incx: usize,
    y: *const u8,
    incy: usize,
    a: *mut u8,
    lda: usize,
) {
    cblas_sys::cblas_sger(
        CBLAS_LAYOUT::CblasRowMajor,
        m as i32,
        n as i32,
        *(alpha as *const f32),
        x as *const f32,
        incx as i32,
        y as *const f32,
        incy as i32,
        a as *mut f32,
        lda as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn ger_f64(
    m: usize,
    n: usize,
    alpha: *const u8,
    x: *const u8,
    incx: usize,
    y: *const u8,
    incy: usize,
    a: *mut u8,
    lda: usize,
) {
    cblas_sys::cblas_dger(
        CBLAS_LAYOUT::CblasRowMajor,
        m as i32,
        n as i32,
        *(alpha as *const f64),
        x as *const f64,
        incx as i32,
        y as *const f64,
        incy as i32,
        a as *mut f64,
        lda as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn ger_c64(
    m: usize,
    n: usize,
    alpha: *const u8,
    x: *const u8,
    incx: usize,
    y: *const u8,
    incy: usize,
    a: *mut u8,
    lda: usize,
) {
    cblas_sys::cblas_cgeru(
        CBLAS_LAYOUT::CblasRowMajor,
        m as i32,
        n as i32,
        alpha as *const c_void as *const _,
        x as *const c_void as *const _,
        incx as i32,
        y as *const c_void as *const _,
        incy as i32,
        a as *mut c_void as *mut _,
        lda as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn ger_c128(
    m: usize,
    n: usize,
    alpha: *const u8,
    x: *const u8,
    incx: usize,
    y: *const u8,
    incy: usize,
    a: *mut u8,
    lda: usize,
) {
    cblas_sys::cblas_zgeru(
        CBLAS_LAYOUT::CblasRowMajor,
        m as i32,
        n as i32,
        alpha as *const c_void as *const _,
        x as *const c_void as *const _,
        incx as i32,
        y as *const c_void as *const _,
        incy as i32,
        a as *mut c_void as *mut _,
        lda as i32,
    );
}

// ---------------------------------------------------------------------------
// gemm
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
unsafe fn gemm_f32(
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
) {
    cblas_sys::cblas_sgemm(
        CBLAS_LAYOUT::CblasRowMajor,
        to_cblas(transa),
        to_cblas(transb),
        m as i32,
        n as i32,
        k as i32,
        *(alpha as *const f32),
        a as *const f32,
        lda as i32,
        b as *const f32,
        ldb as i32,
        *(beta as *const f32),
        c as *mut f32,
        ldc as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn gemm_f64(
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
) {
    cblas_sys::cblas_dgemm(
        CBLAS_LAYOUT::CblasRowMajor,
        to_cblas(transa),
        to_cblas(transb),
        m as i32,
        n as i32,
        k as i32,
        *(alpha as *const f64),
        a as *const f64,
        lda as i32,
        b as *const f64,
        ldb as i32,
        *(beta as *const f64),
        c as *mut f64,
        ldc as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn gemm_c64(
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
) {
    cblas_sys::cblas_cgemm(
        CBLAS_LAYOUT::CblasRowMajor,
        to_cblas(transa),
        to_cblas(transb),
        m as i32,
        n as i32,
        k as i32,
        alpha as *const c_void as *const _,
        a as *const c_void as *const _,
        lda as i32,
        b as *const c_void as *const _,
        ldb as i32,
        beta as *const c_void as *const _,
        c as *mut c_void as *mut _,
        ldc as i32,
    );
}

#[allow(clippy::too_many_arguments)]
unsafe fn gemm_c128(
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
) {
    cblas_sys::cblas_zgemm(
        CBLAS_LAYOUT::CblasRowMajor,
        to_cblas(transa),
        to_cblas(transb),
        m as i32,
        n as i32,
        k as i32,
        alpha as *const c_void as *const _,
        a as *const c_void as *const _,
        lda as i32,
        b as *const c_void as *const _,
        ldb as i32,
        beta as *const c_void as *const _,
        c as *mut c_void as *mut _,
        ldc as i32,
    );
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Populate the override table with every routine this CBLAS build covers.
pub(crate) fn register(entries: &mut HashMap<(KernelId, DType), VendorFn>) {
    use DType::{Complex64, Complex128, F32, F64};

    entries.insert((KernelId::Imax, F32), VendorFn::Imax(imax_f32));
    entries.insert((KernelId::Imax, F64), VendorFn::Imax(imax_f64));
    entries.insert((KernelId::Imax, Complex64), VendorFn::Imax(imax_c64));
    entries.insert((KernelId::Imax, Complex128), VendorFn::Imax(imax_c128));

    entries.insert((KernelId::Swap, F32), VendorFn::Swap(swap_f32));
    entries.insert((KernelId::Swap, F64), VendorFn::Swap(swap_f64));
    entries.insert((KernelId::Swap, Complex64), VendorFn::Swap(swap_c64));
    entries.insert((KernelId::Swap, Complex128), VendorFn::Swap(swap_c128));

    entries.insert((KernelId::Scal, F32), VendorFn::Scal(scal_f32));
    entries.insert((KernelId::Scal, F64), VendorFn::Scal(scal_f64));
    entries.insert((KernelId::Scal, Complex64), VendorFn::Scal(scal_c64));
    entries.insert((KernelId::Scal, Complex128), VendorFn::Scal(scal_c128));

    entries.insert((KernelId::Axpy, F32), VendorFn::Axpy(axpy_f32));
    entries.insert((KernelId::Axpy, F64), VendorFn::Axpy(axpy_f64));
    entries.insert((KernelId::Axpy, Complex64), VendorFn::Axpy(axpy_c64));
    entries.insert((KernelId::Axpy, Complex128), VendorFn::Axpy(axpy_c128));

    entries.insert((KernelId::Dot, F32), VendorFn::Dot(dot_f32));
    entries.insert((KernelId::Dot, F64), VendorFn::Dot(dot_f64));
    entries.insert((KernelId::Dot, Complex64), VendorFn::Dot(dot_c64));
    entries.insert((KernelId::Dot, Complex128), VendorFn::Dot(dot_c128));

    entries.insert((KernelId::Gemv, F32), VendorFn::Gemv(gemv_f32));
    entries.insert((KernelId::Gemv, F64), VendorFn::Gemv(gemv_f64));
    entries.insert((KernelId::Gemv, Complex64), VendorFn::Gemv(gemv_c64));
    entries.insert((KernelId::Gemv, Complex128), VendorFn::Gemv(gemv_c128));

    entries.insert((KernelId::Ger, F32), VendorFn::Ger(ger_f32));
    entries.insert((KernelId::Ger, F64), VendorFn::Ger(ger_f64));
    entries.insert((KernelId::Ger, Complex64), VendorFn::Ger(ger_c64));
    entries.insert((KernelId::Ger, Complex128), VendorFn::Ger(ger_c128));

    entries.insert((KernelId::Gemm, F32), VendorFn::Gemm(gemm_f32));
    entries.insert((KernelId::Gemm, F64), VendorFn::Gemm(gemm_f64));
    entries.insert((KernelId::Gemm, Complex64), VendorFn::Gemm(gemm_c64));
    entries.insert((KernelId::Gemm, Complex128), VendorFn::Gemm(gemm_c128));
}
