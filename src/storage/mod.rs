//! Matrix storage formats
//!
//! Three storage backends share one element-level contract:
//!
//! - **Dense**: row-major contiguous buffer. Best for: small or mostly-full
//!   matrices, anything headed for the BLAS-shaped kernels. Storage:
//!   O(rows * cols).
//!
//! - **List**: per-row sorted association lists of (column, value). Best
//!   for: incremental construction with an arbitrary default element.
//!   Storage: O(stored).
//!
//! - **Yale**: compressed rows with reserved diagonal slots in a shared
//!   index/value array pair. Best for: large square-ish matrices with a
//!   dominant diagonal. Storage: O(stored + rows).
//!
//! Every backend carries an explicit *default value* (usually zero, but any
//! element works); `get` on an unstored position yields the default, and
//! `set` to the default removes the stored entry in the sparse formats. The
//! cross-format contract is that two storages with the same shape, default,
//! and logical contents agree on `get` everywhere and yield the same
//! multiset from [`MatrixStorage::iter_stored`].

mod dense;
mod list;
mod yale;

pub use dense::DenseStorage;
pub use list::ListStorage;
pub use yale::YaleStorage;

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};

/// Matrix storage format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageFormat {
    /// Row-major contiguous dense storage.
    Dense,
    /// Per-row sorted association lists.
    List,
    /// Compressed rows with reserved diagonal slots.
    Yale,
}

impl StorageFormat {
    /// Returns true if the format stores only non-default entries.
    #[inline]
    pub fn is_sparse(&self) -> bool {
        !matches!(self, StorageFormat::Dense)
    }

    /// Returns the format name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            StorageFormat::Dense => "dense",
            StorageFormat::List => "list",
            StorageFormat::Yale => "yale",
        }
    }
}

impl std::fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Trait for matrix storage backends.
///
/// Implementors expose element access in logical (row, column) coordinates;
/// how entries are laid out is the backend's business. All index errors are
/// reported through [`Error::IndexOutOfBounds`], never by panicking.
pub trait MatrixStorage<T: Element> {
    /// Returns the storage format tag.
    fn format(&self) -> StorageFormat;

    /// Returns the shape as [rows, cols].
    fn shape(&self) -> [usize; 2];

    /// Returns the number of rows.
    #[inline]
    fn rows(&self) -> usize {
        self.shape()[0]
    }

    /// Returns the number of columns.
    #[inline]
    fn cols(&self) -> usize {
        self.shape()[1]
    }

    /// Returns the element dtype tag.
    #[inline]
    fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Returns the default element: what an unstored position reads as.
    fn default_value(&self) -> T;

    /// Reads the element at (row, col).
    fn get(&self, row: usize, col: usize) -> Result<T>;

    /// Writes the element at (row, col).
    ///
    /// Sparse backends remove the stored entry when `value` equals the
    /// default, so repeated sets never leak storage.
    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()>;

    /// Iterates the stored non-default entries as (row, col, value).
    ///
    /// Order is backend-specific; compare results as multisets.
    fn iter_stored(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_>;

    /// Returns the number of stored non-default entries.
    fn stored_len(&self) -> usize;

    /// Returns the approximate memory usage in bytes.
    fn memory_usage(&self) -> usize;

    /// Returns the fraction of positions holding the default element.
    #[inline]
    fn sparsity(&self) -> f64 {
        let total = (self.rows() * self.cols()) as f64;
        if total == 0.0 {
            0.0
        } else {
            1.0 - (self.stored_len() as f64 / total)
        }
    }
}

/// Bounds-check a logical coordinate against a shape.
#[inline]
pub(crate) fn check_index(row: usize, col: usize, shape: [usize; 2]) -> Result<()> {
    if row >= shape[0] {
        return Err(Error::IndexOutOfBounds {
            index: row,
            size: shape[0],
        });
    }
    if col >= shape[1] {
        return Err(Error::IndexOutOfBounds {
            index: col,
            size: shape[1],
        });
    }
    Ok(())
}
