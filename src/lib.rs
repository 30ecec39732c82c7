//! # numat
//!
//! **Type-generic numeric kernels for a multi-format matrix library.**
//!
//! numat is the kernel layer that sits underneath a matrix object API: it
//! supplies strided BLAS/LAPACK-style vector and matrix primitives,
//! parameterized over an element type chosen at run time, together with the
//! storage formats those kernels operate over.
//!
//! ## What's inside
//!
//! - **Element types**: machine integers, single/double floats, single/double
//!   complex, and fixed-width rationals, all behind one runtime
//!   [`DType`](dtype::DType) tag and one [`Element`](dtype::Element) trait
//! - **Reference kernels**: `imax`, `swap`, `scal`, `axpy`, `dot`, `gemv`,
//!   `ger`, `trsv`, `gemm`, and an LU factorization (`getrf`), each written once with
//!   explicit stride stepping so the same source serves every element type
//! - **Dispatch gateway**: the single entry point that validates a dtype tag,
//!   reinterprets untyped operand buffers, and routes to either the reference
//!   kernel or a vendor BLAS override
//! - **Storage formats**: dense row-major, list-of-lists sparse, and
//!   compressed "Yale" sparse with reserved diagonal slots, all behind one
//!   read/write/iterate trait
//! - **Symbol table**: the process-wide mapping from attribute names
//!   (`"dense"`, `"transpose"`, `"upper"`, ...) to internal tags, built once
//!   at first use and immutable after
//!
//! ## Quick start
//!
//! ```
//! use numat::prelude::*;
//!
//! // Typed data crosses the kernel boundary as untyped bytes plus a tag.
//! let x = [3.0f64, -7.0, 2.0, 7.0, -1.0];
//! let hit = kernel::gateway::imax(
//!     DType::F64,
//!     bytemuck::cast_slice(&x),
//!     StrideSpec::contiguous(x.len()),
//! ).unwrap();
//! assert_eq!(hit, Some(1)); // -7 has the greatest magnitude; ties go first
//! ```
//!
//! ## Feature flags
//!
//! - `rayon` (default): multi-threaded reference `gemm`
//! - `cblas`: link a vendor CBLAS and substitute its level-1/2/3 routines for
//!   the reference kernels on `F32`, `F64`, `Complex64`, and `Complex128`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod kernel;
pub mod storage;
pub mod symbols;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::kernel::{self, StrideSpec, Transpose};
    pub use crate::storage::{
        DenseStorage, ListStorage, MatrixStorage, StorageFormat, YaleStorage,
    };
    pub use crate::symbols::{symbols, Symbol};
}
