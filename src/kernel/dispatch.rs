//! Runtime dtype dispatch for the kernel gateway
//!
//! This module provides the `dispatch_dtype!` macro that converts a runtime
//! [`DType`](crate::dtype::DType) tag into a concrete generic type. The
//! gateway uses it to instantiate the reference kernels; it is exported so
//! an embedding host layer can dispatch its own typed helpers the same way.
//!
//! # Usage
//!
//! ```ignore
//! fn element_size(dtype: DType) -> Result<usize> {
//!     dispatch_dtype!(dtype, T => {
//!         // T is now a concrete type (f64, Complex64, Rational64, ...)
//!         Ok(std::mem::size_of::<T>())
//!     }, "element_size")
//! }
//! ```
//!
//! # Arguments
//!
//! * `$dtype` - Expression evaluating to a `DType` value
//! * `$T` - Identifier to bind to the concrete type in the body
//! * `$body` - Code block to execute with `T` bound
//! * `$error_op` - Operation name for the error raised on a tag this build
//!   does not recognize (the enum is `#[non_exhaustive]`)
//!
//! The surrounding function must return [`crate::error::Result`].

/// Macro for runtime dtype dispatch to typed operations.
///
/// Takes a `DType` value and executes a code block with `$T` bound to the
/// corresponding Rust type. An unrecognized tag returns
/// [`Error::UnsupportedDType`](crate::error::Error::UnsupportedDType) from
/// the enclosing function.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::Complex64 => {
                type $T = $crate::dtype::Complex64;
                $body
            }
            $crate::dtype::DType::Complex128 => {
                type $T = $crate::dtype::Complex128;
                $body
            }
            $crate::dtype::DType::Rational64 => {
                type $T = $crate::dtype::Rational64;
                $body
            }
            $crate::dtype::DType::Rational128 => {
                type $T = $crate::dtype::Rational128;
                $body
            }
            #[allow(unreachable_patterns)]
            _ => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: $dtype,
                    op: $error_op,
                })
            }
        }
    };
}
