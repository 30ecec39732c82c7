//! Dense row-major storage

use crate::dtype::Element;
use crate::error::{Error, Result};

use super::{check_index, MatrixStorage, StorageFormat};

/// Row-major contiguous matrix storage.
///
/// Every position is materialized, so `stored_len` counts the positions
/// whose value differs from the default rather than the buffer length; that
/// keeps the cross-format `iter_stored` contract intact.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseStorage<T: Element> {
    data: Vec<T>,
    shape: [usize; 2],
    default: T,
}

impl<T: Element> DenseStorage<T> {
    /// Create a matrix with every position set to `default`.
    pub fn new(rows: usize, cols: usize, default: T) -> Self {
        Self {
            data: vec![default; rows * cols],
            shape: [rows, cols],
            default,
        }
    }

    /// Create a matrix from a row-major element buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the buffer length is not
    /// `rows * cols`.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize, default: T) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::ShapeMismatch {
                expected: vec![rows * cols],
                got: vec![data.len()],
            });
        }
        Ok(Self {
            data,
            shape: [rows, cols],
            default,
        })
    }

    /// Borrow the row-major element buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutably borrow the row-major element buffer.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Borrow the buffer as raw bytes, the form the kernel gateway accepts.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Mutably borrow the buffer as raw bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Row length in elements, i.e. the leading dimension for the kernels.
    #[inline]
    pub fn leading_dim(&self) -> usize {
        self.shape[1]
    }
}

impl<T: Element> MatrixStorage<T> for DenseStorage<T> {
    fn format(&self) -> StorageFormat {
        StorageFormat::Dense
    }

    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn default_value(&self) -> T {
        self.default
    }

    fn get(&self, row: usize, col: usize) -> Result<T> {
        check_index(row, col, self.shape)?;
        Ok(self.data[row * self.shape[1] + col])
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        check_index(row, col, self.shape)?;
        self.data[row * self.shape[1] + col] = value;
        Ok(())
    }

    fn iter_stored(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        let cols = self.shape[1];
        let default = self.default;
        Box::new(
            self.data
                .iter()
                .enumerate()
                .filter(move |(_, v)| **v != default)
                .map(move |(i, v)| (i / cols, i % cols, *v)),
        )
    }

    fn stored_len(&self) -> usize {
        self.data.iter().filter(|v| **v != self.default).count()
    }

    fn memory_usage(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
    }
}
