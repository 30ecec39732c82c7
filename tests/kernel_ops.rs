//! Gateway-level kernel tests across element types

mod common;

use common::{assert_allclose_f64, bytes_of, bytes_of_mut};

use numat::dtype::{Complex128, Complex64, DType, Rational64};
use numat::kernel::gateway;
use numat::kernel::{Diag, StrideSpec, Transpose, Uplo};
use numat::error::Error;

// ---------------------------------------------------------------------------
// imax
// ---------------------------------------------------------------------------

#[test]
fn imax_first_maximum_wins() {
    let x = [3.0f64, -7.0, 2.0, 7.0, -1.0];
    let hit = gateway::imax(DType::F64, bytes_of(&x), StrideSpec::contiguous(5)).unwrap();
    assert_eq!(hit, Some(1));
}

#[test]
fn imax_single_element_is_zero() {
    let x = [42.0f32];
    let hit = gateway::imax(DType::F32, bytes_of(&x), StrideSpec::contiguous(1)).unwrap();
    assert_eq!(hit, Some(0));
}

#[test]
fn imax_degenerate_specs_yield_none() {
    let x = [1.0f64, 2.0, 3.0];
    for spec in [
        StrideSpec::new(0, 1),
        StrideSpec::new(-3, 1),
        StrideSpec::new(3, 0),
        StrideSpec::new(3, -1),
    ] {
        assert_eq!(
            gateway::imax(DType::F64, bytes_of(&x), spec).unwrap(),
            None,
            "spec {spec:?}"
        );
    }
}

#[test]
fn imax_strided_reports_logical_index() {
    // Logical elements are x[0], x[2], x[4]: values 1, 9, 5
    let x = [1.0f64, 100.0, 9.0, 100.0, 5.0];
    let hit = gateway::imax(DType::F64, bytes_of(&x), StrideSpec::new(3, 2)).unwrap();
    assert_eq!(hit, Some(1));
}

#[test]
fn imax_complex_uses_modulus() {
    // |3+4i| = 5, |6| = 6, |5i| = 5
    let x = [
        Complex64::new(3.0, 4.0),
        Complex64::new(6.0, 0.0),
        Complex64::new(0.0, 5.0),
    ];
    let hit = gateway::imax(DType::Complex64, bytes_of(&x), StrideSpec::contiguous(3)).unwrap();
    assert_eq!(hit, Some(1));
}

#[test]
fn imax_integer_magnitude() {
    let x = [-8i16, 3, 8, -2];
    let hit = gateway::imax(DType::I16, bytes_of(&x), StrideSpec::contiguous(4)).unwrap();
    assert_eq!(hit, Some(0)); // |-8| ties |8|; first wins
}

#[test]
fn imax_rejects_span_past_usize() {
    // count * stride wraps usize; the span check must still fail the buffer
    let x = [1.0f64, 2.0];
    let spec = StrideSpec::new(isize::MAX, isize::MAX);
    let err = gateway::imax(DType::F64, bytes_of(&x), spec).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "x", .. }));
}

// ---------------------------------------------------------------------------
// swap
// ---------------------------------------------------------------------------

#[test]
fn swap_is_an_involution() {
    let orig_x = [1.0f64, 2.0, 3.0, 4.0];
    let orig_y = [9.0f64, 8.0, 7.0, 6.0];
    let mut x = orig_x;
    let mut y = orig_y;
    let spec = StrideSpec::contiguous(4);
    for _ in 0..2 {
        gateway::swap(
            DType::F64,
            bytes_of_mut(&mut x),
            spec,
            bytes_of_mut(&mut y),
            spec,
        )
        .unwrap();
    }
    assert_eq!(x, orig_x);
    assert_eq!(y, orig_y);
}

#[test]
fn swap_mixed_strides() {
    // x at stride 2 (elements 0, 2), y at stride 1 (elements 0, 1)
    let mut x = [1i64, -1, 2, -2];
    let mut y = [10i64, 20];
    gateway::swap(
        DType::I64,
        bytes_of_mut(&mut x),
        StrideSpec::new(2, 2),
        bytes_of_mut(&mut y),
        StrideSpec::new(2, 1),
    )
    .unwrap();
    assert_eq!(x, [10, -1, 20, -2]);
    assert_eq!(y, [1, 2]);
}

#[test]
fn swap_degenerate_is_noop() {
    let mut x = [1.0f32, 2.0];
    let mut y = [3.0f32, 4.0];
    gateway::swap(
        DType::F32,
        bytes_of_mut(&mut x),
        StrideSpec::new(0, 1),
        bytes_of_mut(&mut y),
        StrideSpec::contiguous(2),
    )
    .unwrap();
    assert_eq!(x, [1.0, 2.0]);
    assert_eq!(y, [3.0, 4.0]);
}

// ---------------------------------------------------------------------------
// scal / axpy / dot
// ---------------------------------------------------------------------------

#[test]
fn scal_strided_leaves_gaps_alone() {
    let alpha = [3.0f64];
    let mut x = [1.0f64, 10.0, 2.0, 20.0, 3.0];
    gateway::scal(
        DType::F64,
        bytes_of(&alpha),
        bytes_of_mut(&mut x),
        StrideSpec::new(3, 2),
    )
    .unwrap();
    assert_eq!(x, [3.0, 10.0, 6.0, 20.0, 9.0]);
}

#[test]
fn axpy_accumulates() {
    let alpha = [2.0f64];
    let x = [1.0f64, 2.0, 3.0];
    let mut y = [10.0f64, 20.0, 30.0];
    let spec = StrideSpec::contiguous(3);
    gateway::axpy(
        DType::F64,
        bytes_of(&alpha),
        bytes_of(&x),
        spec,
        bytes_of_mut(&mut y),
        spec,
    )
    .unwrap();
    assert_eq!(y, [12.0, 24.0, 36.0]);
}

#[test]
fn dot_rational_is_exact() {
    // 1/3 * 3 + 1/7 * 7 = 2, no rounding anywhere
    let x = [Rational64::new(1, 3), Rational64::new(1, 7)];
    let y = [Rational64::new(3, 1), Rational64::new(7, 1)];
    let mut out = [Rational64::ZERO];
    let spec = StrideSpec::contiguous(2);
    gateway::dot(
        DType::Rational64,
        bytes_of(&x),
        spec,
        bytes_of(&y),
        spec,
        bytes_of_mut(&mut out),
    )
    .unwrap();
    assert_eq!(out[0], Rational64::new(2, 1));
}

#[test]
fn dot_complex_is_unconjugated() {
    // (i) . (i) = -1 under the unconjugated product
    let x = [Complex128::I];
    let y = [Complex128::I];
    let mut out = [Complex128::ZERO];
    let spec = StrideSpec::contiguous(1);
    gateway::dot(
        DType::Complex128,
        bytes_of(&x),
        spec,
        bytes_of(&y),
        spec,
        bytes_of_mut(&mut out),
    )
    .unwrap();
    assert_eq!(out[0], Complex128::new(-1.0, 0.0));
}

#[test]
fn dot_degenerate_writes_zero() {
    let x = [5.0f64];
    let y = [5.0f64];
    let mut out = [123.0f64];
    gateway::dot(
        DType::F64,
        bytes_of(&x),
        StrideSpec::new(0, 1),
        bytes_of(&y),
        StrideSpec::new(0, 1),
        bytes_of_mut(&mut out),
    )
    .unwrap();
    assert_eq!(out[0], 0.0);
}

// ---------------------------------------------------------------------------
// gemv
// ---------------------------------------------------------------------------

#[test]
fn gemv_no_transpose() {
    // A = [[1, 2], [3, 4], [5, 6]], x = [1, 1]
    let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    let x = [1.0f64, 1.0];
    let mut y = [0.0f64; 3];
    let one = [1.0f64];
    let zero = [0.0f64];
    gateway::gemv(
        DType::F64,
        Transpose::NoTrans,
        3,
        2,
        bytes_of(&one),
        bytes_of(&a),
        2,
        bytes_of(&x),
        1,
        bytes_of(&zero),
        bytes_of_mut(&mut y),
        1,
    )
    .unwrap();
    assert_allclose_f64(&y, &[3.0, 7.0, 11.0], 1e-12, 0.0, "gemv notrans");
}

#[test]
fn gemv_transpose_and_beta() {
    // y = 2 * A^T x + 3 * y with A = [[1, 2], [3, 4]]
    let a = [1.0f64, 2.0, 3.0, 4.0];
    let x = [1.0f64, 1.0];
    let mut y = [1.0f64, 1.0];
    let alpha = [2.0f64];
    let beta = [3.0f64];
    gateway::gemv(
        DType::F64,
        Transpose::Trans,
        2,
        2,
        bytes_of(&alpha),
        bytes_of(&a),
        2,
        bytes_of(&x),
        1,
        bytes_of(&beta),
        bytes_of_mut(&mut y),
        1,
    )
    .unwrap();
    // A^T x = [4, 6]; y = 2*[4,6] + 3*[1,1] = [11, 15]
    assert_allclose_f64(&y, &[11.0, 15.0], 1e-12, 0.0, "gemv trans");
}

#[test]
fn gemv_conjugate_transpose_complex() {
    // A = [[i]], x = [1]: conj(A)^T x = [-i]
    let a = [Complex128::I];
    let x = [Complex128::ONE];
    let mut y = [Complex128::ZERO];
    let one = [Complex128::ONE];
    let zero = [Complex128::ZERO];
    gateway::gemv(
        DType::Complex128,
        Transpose::ConjTrans,
        1,
        1,
        bytes_of(&one),
        bytes_of(&a),
        1,
        bytes_of(&x),
        1,
        bytes_of(&zero),
        bytes_of_mut(&mut y),
        1,
    )
    .unwrap();
    assert_eq!(y[0], Complex128::new(0.0, -1.0));
}

#[test]
fn gemv_beta_zero_overwrites_nan() {
    // beta = 0 must write y without reading it, even through NaN
    let a = [1.0f64];
    let x = [2.0f64];
    let mut y = [f64::NAN];
    let one = [1.0f64];
    let zero = [0.0f64];
    gateway::gemv(
        DType::F64,
        Transpose::NoTrans,
        1,
        1,
        bytes_of(&one),
        bytes_of(&a),
        1,
        bytes_of(&x),
        1,
        bytes_of(&zero),
        bytes_of_mut(&mut y),
        1,
    )
    .unwrap();
    assert_eq!(y[0], 2.0);
}

// ---------------------------------------------------------------------------
// ger
// ---------------------------------------------------------------------------

#[test]
fn ger_outer_product_accumulates() {
    // A += 1 * [1, 2, 3]^T [10, 20]
    let mut a = [0.0f64; 6];
    let x = [1.0f64, 2.0, 3.0];
    let y = [10.0f64, 20.0];
    let one = [1.0f64];
    gateway::ger(
        DType::F64,
        3,
        2,
        bytes_of(&one),
        bytes_of(&x),
        1,
        bytes_of(&y),
        1,
        bytes_of_mut(&mut a),
        2,
    )
    .unwrap();
    assert_allclose_f64(&a, &[10.0, 20.0, 20.0, 40.0, 30.0, 60.0], 1e-12, 0.0, "ger");
}

#[test]
fn ger_strided_vectors() {
    // x takes elements 0 and 2; y takes elements 0 and 1
    let mut a = [1.0f64; 4];
    let x = [2.0f64, -1.0, 3.0];
    let y = [1.0f64, 10.0];
    let one = [1.0f64];
    gateway::ger(
        DType::F64,
        2,
        2,
        bytes_of(&one),
        bytes_of(&x),
        2,
        bytes_of(&y),
        1,
        bytes_of_mut(&mut a),
        2,
    )
    .unwrap();
    assert_allclose_f64(&a, &[3.0, 21.0, 4.0, 31.0], 1e-12, 0.0, "ger strided");
}

// ---------------------------------------------------------------------------
// trsv
// ---------------------------------------------------------------------------

#[test]
fn trsv_upper_solves() {
    // A = [[2, 1], [0, 4]], b = [5, 8] -> x = [3/2, 2]
    let a = [2.0f64, 1.0, 0.0, 4.0];
    let mut x = [5.0f64, 8.0];
    gateway::trsv(
        DType::F64,
        Uplo::Upper,
        Transpose::NoTrans,
        Diag::NonUnit,
        2,
        bytes_of(&a),
        2,
        bytes_of_mut(&mut x),
        1,
    )
    .unwrap();
    assert_allclose_f64(&x, &[1.5, 2.0], 1e-12, 0.0, "trsv upper");
}

#[test]
fn trsv_unit_diag_ignores_stored_diagonal() {
    // Unit diagonal: stored zeros on the diagonal must not trip the
    // singularity check and must never be read.
    let a = [0.0f64, 0.0, 3.0, 0.0];
    let mut x = [7.0f64, 10.0];
    gateway::trsv(
        DType::F64,
        Uplo::Lower,
        Transpose::NoTrans,
        Diag::Unit,
        2,
        bytes_of(&a),
        2,
        bytes_of_mut(&mut x),
        1,
    )
    .unwrap();
    // Forward substitution: x0 = 7, x1 = 10 - 3*7 = -11
    assert_allclose_f64(&x, &[7.0, -11.0], 1e-12, 0.0, "trsv unit");
}

#[test]
fn trsv_rational_exact() {
    // A = [[1/2, 0], [1/3, 1/4]] lower, b = [1, 1]
    let a = [
        Rational64::new(1, 2),
        Rational64::ZERO,
        Rational64::new(1, 3),
        Rational64::new(1, 4),
    ];
    let mut x = [Rational64::new(1, 1), Rational64::new(1, 1)];
    gateway::trsv(
        DType::Rational64,
        Uplo::Lower,
        Transpose::NoTrans,
        Diag::NonUnit,
        2,
        bytes_of(&a),
        2,
        bytes_of_mut(&mut x),
        1,
    )
    .unwrap();
    // x0 = 2; x1 = (1 - 2/3) / (1/4) = 4/3
    assert_eq!(x[0], Rational64::new(2, 1));
    assert_eq!(x[1], Rational64::new(4, 3));
}

// ---------------------------------------------------------------------------
// gemm
// ---------------------------------------------------------------------------

#[test]
fn gemm_matches_hand_product() {
    // A (2x3) * B (3x2)
    let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    let b = [7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0];
    let mut c = [0.0f64; 4];
    let one = [1.0f64];
    let zero = [0.0f64];
    gateway::gemm(
        DType::F64,
        Transpose::NoTrans,
        Transpose::NoTrans,
        2,
        2,
        3,
        bytes_of(&one),
        bytes_of(&a),
        3,
        bytes_of(&b),
        2,
        bytes_of(&zero),
        bytes_of_mut(&mut c),
        2,
    )
    .unwrap();
    assert_allclose_f64(&c, &[58.0, 64.0, 139.0, 154.0], 1e-12, 0.0, "gemm");
}

#[test]
fn gemm_transposed_operands_and_scalars() {
    // C = 2 * A^T * B^T + 1 * C with A, B both 2x2
    let a = [1.0f64, 2.0, 3.0, 4.0];
    let b = [5.0f64, 6.0, 7.0, 8.0];
    let mut c = [1.0f64, 1.0, 1.0, 1.0];
    let alpha = [2.0f64];
    let beta = [1.0f64];
    gateway::gemm(
        DType::F64,
        Transpose::Trans,
        Transpose::Trans,
        2,
        2,
        2,
        bytes_of(&alpha),
        bytes_of(&a),
        2,
        bytes_of(&b),
        2,
        bytes_of(&beta),
        bytes_of_mut(&mut c),
        2,
    )
    .unwrap();
    // A^T B^T = [[23, 31], [34, 46]]; C = 2*that + 1
    assert_allclose_f64(&c, &[47.0, 63.0, 69.0, 93.0], 1e-12, 0.0, "gemm trans");
}

#[test]
fn gemm_k_zero_scales_c_only() {
    let a: [f64; 0] = [];
    let b: [f64; 0] = [];
    let mut c = [4.0f64, 8.0];
    let one = [1.0f64];
    let half = [0.5f64];
    gateway::gemm(
        DType::F64,
        Transpose::NoTrans,
        Transpose::NoTrans,
        1,
        2,
        0,
        bytes_of(&one),
        bytes_of(&a),
        1,
        bytes_of(&b),
        2,
        bytes_of(&half),
        bytes_of_mut(&mut c),
        2,
    )
    .unwrap();
    assert_allclose_f64(&c, &[2.0, 4.0], 1e-12, 0.0, "gemm k=0");
}

#[test]
fn gemm_integer_elements() {
    let a = [1i32, 2, 3, 4];
    let b = [1i32, 0, 0, 1];
    let mut c = [0i32; 4];
    let one = [1i32];
    let zero = [0i32];
    gateway::gemm(
        DType::I32,
        Transpose::NoTrans,
        Transpose::NoTrans,
        2,
        2,
        2,
        bytes_of(&one),
        bytes_of(&a),
        2,
        bytes_of(&b),
        2,
        bytes_of(&zero),
        bytes_of_mut(&mut c),
        2,
    )
    .unwrap();
    assert_eq!(c, [1, 2, 3, 4]);
}

// ---------------------------------------------------------------------------
// getrf
// ---------------------------------------------------------------------------

/// Apply the recorded row interchanges to a copy of the original matrix.
fn permute_rows(a: &[f64], n: usize, ipiv: &[usize]) -> Vec<f64> {
    let mut p = a.to_vec();
    for (k, &piv) in ipiv.iter().enumerate() {
        if piv != k {
            for j in 0..n {
                p.swap(k * n + j, piv * n + j);
            }
        }
    }
    p
}

#[test]
fn getrf_reconstructs_pa_from_lu() {
    let orig = [2.0f64, 1.0, 1.0, 4.0, -6.0, 0.0, -2.0, 7.0, 2.0];
    let n = 3;
    let mut a = orig;
    let mut ipiv = [0usize; 3];
    gateway::getrf(
        DType::F64,
        n,
        n,
        bytes_of_mut(&mut a),
        n,
        &mut ipiv,
    )
    .unwrap();

    // Rebuild L * U (unit-diagonal L below, U on and above) and compare
    // with the row-permuted original
    let mut lu = vec![0.0f64; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                let l = if k < i {
                    a[i * n + k]
                } else if k == i {
                    1.0
                } else {
                    0.0
                };
                let u = if k <= j { a[k * n + j] } else { 0.0 };
                sum += l * u;
            }
            lu[i * n + j] = sum;
        }
    }
    let pa = permute_rows(&orig, n, &ipiv);
    assert_allclose_f64(&lu, &pa, 1e-12, 1e-12, "PA = LU");
}

#[test]
fn getrf_singular_matrix_reports_pivot() {
    let mut a = [1.0f64, 2.0, 2.0, 4.0]; // rank 1
    let mut ipiv = [0usize; 2];
    let err = gateway::getrf(
        DType::F64,
        2,
        2,
        bytes_of_mut(&mut a),
        2,
        &mut ipiv,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Singular { pivot: 1 }));
}

#[test]
fn getrf_rejects_every_integer_dtype() {
    for dtype in [DType::I8, DType::I16, DType::I32, DType::I64] {
        // Rejected on the dtype tag alone, before the buffer is looked at
        let mut a = [0u8; 32];
        let mut ipiv = [0usize; 2];
        let err = gateway::getrf(dtype, 2, 2, &mut a, 2, &mut ipiv).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDType { .. }), "{dtype}");
    }
}

#[test]
fn getrf_rectangular_tall() {
    // 3x2: factorization touches min(m, n) = 2 pivot steps
    let mut a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    let mut ipiv = [0usize; 2];
    gateway::getrf(
        DType::F64,
        3,
        2,
        bytes_of_mut(&mut a),
        2,
        &mut ipiv,
    )
    .unwrap();
    // Largest leading-column magnitude is row 2 (value 5)
    assert_eq!(ipiv[0], 2);
}
