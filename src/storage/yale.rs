//! Yale sparse storage
//!
//! Compressed-row storage with reserved diagonal slots. Two parallel arrays
//! back the matrix:
//!
//! - `ija`: positions `0..=rows` are row pointers into the shared region
//!   (`ija[0]` is always `rows + 1`); positions from `rows + 1` hold the
//!   column indices of off-diagonal entries, sorted within each row.
//! - `a`: positions `0..rows` are the diagonal values themselves (a slot
//!   exists whether or not the diagonal is default), position `rows` is
//!   padding, and positions from `rows + 1` hold the off-diagonal values
//!   aligned with `ija`.
//!
//! Diagonal reads and writes are O(1); off-diagonal access is a binary
//! search within the row, and pattern changes shift the tail of both arrays
//! and adjust the later row pointers.

use crate::dtype::Element;
use crate::error::{Error, Result};

use super::{check_index, MatrixStorage, StorageFormat};

/// Yale-format sparse matrix storage.
#[derive(Debug, Clone, PartialEq)]
pub struct YaleStorage<T: Element> {
    ija: Vec<usize>,
    a: Vec<T>,
    shape: [usize; 2],
    default: T,
}

impl<T: Element> YaleStorage<T> {
    /// Create an empty matrix with room for `capacity` stored slots.
    ///
    /// The capacity is clamped to at least the reserved region
    /// (`rows + 1`) and at most [`YaleStorage::max_size`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] when the backing arrays cannot be
    /// allocated.
    pub fn with_capacity(rows: usize, cols: usize, default: T, capacity: usize) -> Result<Self> {
        let reserved = rows + 1;
        let mut storage = Self {
            ija: Vec::new(),
            a: Vec::new(),
            shape: [rows, cols],
            default,
        };
        let capacity = capacity.max(reserved).min(storage.max_size());
        storage
            .ija
            .try_reserve(capacity)
            .map_err(|_| Error::OutOfMemory {
                size: capacity * std::mem::size_of::<usize>(),
            })?;
        storage
            .a
            .try_reserve(capacity)
            .map_err(|_| Error::OutOfMemory {
                size: capacity * std::mem::size_of::<T>(),
            })?;
        // Row pointers all start at the end of the reserved region.
        storage.ija.resize(reserved, reserved);
        storage.a.resize(reserved, default);
        Ok(storage)
    }

    /// Create an empty matrix with the minimum capacity.
    pub fn new(rows: usize, cols: usize, default: T) -> Result<Self> {
        Self::with_capacity(rows, cols, default, 0)
    }

    /// Build from (row, col, value) triplets; defaults are skipped, later
    /// duplicates win.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        default: T,
        triplets: &[(usize, usize, T)],
    ) -> Result<Self> {
        let mut storage = Self::with_capacity(rows, cols, default, rows + 1 + triplets.len())?;
        for &(r, c, v) in triplets {
            storage.set(r, c, v)?;
        }
        Ok(storage)
    }

    /// Largest slot count this shape can ever need: the reserved region
    /// plus every position outside the stored diagonal.
    pub fn max_size(&self) -> usize {
        let [rows, cols] = self.shape;
        rows + 1 + rows * cols - rows.min(cols)
    }

    /// Number of occupied slots, including the reserved region.
    #[inline]
    pub fn size(&self) -> usize {
        self.ija[self.shape[0]]
    }

    /// Current slot capacity of the backing arrays.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ija.capacity().min(self.a.capacity())
    }

    /// Borrow the index array (row pointers then column indices).
    pub fn ija(&self) -> &[usize] {
        &self.ija
    }

    /// Borrow the value array (diagonal, padding, then off-diagonals).
    pub fn a(&self) -> &[T] {
        &self.a
    }

    fn reserved(&self) -> usize {
        self.shape[0] + 1
    }

    /// Locate `col` within row `row`'s off-diagonal slice: Ok(slot) when
    /// stored, Err(slot) with the insertion point otherwise.
    fn find(&self, row: usize, col: usize) -> std::result::Result<usize, usize> {
        let lo = self.ija[row];
        let hi = self.ija[row + 1];
        match self.ija[lo..hi].binary_search(&col) {
            Ok(pos) => Ok(lo + pos),
            Err(pos) => Err(lo + pos),
        }
    }

    /// Grow the backing arrays to hold at least `needed` slots.
    fn ensure_capacity(&mut self, needed: usize) -> Result<()> {
        let limit = self.max_size();
        if needed > limit {
            return Err(Error::YaleCapacity { needed, limit });
        }
        if needed <= self.capacity() {
            return Ok(());
        }
        let target = (self.capacity() * 2).max(needed).min(limit);
        log::trace!(
            "yale growth: {} -> {} slots (shape {:?})",
            self.capacity(),
            target,
            self.shape
        );
        let additional = target - self.ija.len();
        self.ija
            .try_reserve(additional)
            .map_err(|_| Error::OutOfMemory {
                size: target * std::mem::size_of::<usize>(),
            })?;
        self.a
            .try_reserve(additional)
            .map_err(|_| Error::OutOfMemory {
                size: target * std::mem::size_of::<T>(),
            })?;
        Ok(())
    }

    fn insert_slot(&mut self, row: usize, slot: usize, col: usize, value: T) -> Result<()> {
        self.ensure_capacity(self.size() + 1)?;
        self.ija.insert(slot, col);
        self.a.insert(slot, value);
        for ptr in &mut self.ija[row + 1..=self.shape[0]] {
            *ptr += 1;
        }
        Ok(())
    }

    fn remove_slot(&mut self, row: usize, slot: usize) {
        self.ija.remove(slot);
        self.a.remove(slot);
        for ptr in &mut self.ija[row + 1..=self.shape[0]] {
            *ptr -= 1;
        }
    }
}

impl<T: Element> MatrixStorage<T> for YaleStorage<T> {
    fn format(&self) -> StorageFormat {
        StorageFormat::Yale
    }

    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn default_value(&self) -> T {
        self.default
    }

    fn get(&self, row: usize, col: usize) -> Result<T> {
        check_index(row, col, self.shape)?;
        if row == col {
            return Ok(self.a[row]);
        }
        match self.find(row, col) {
            Ok(slot) => Ok(self.a[slot]),
            Err(_) => Ok(self.default),
        }
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        check_index(row, col, self.shape)?;
        if row == col {
            // The diagonal slot always exists; a default here just reads
            // back as unstored.
            self.a[row] = value;
            return Ok(());
        }
        match self.find(row, col) {
            Ok(slot) => {
                if value == self.default {
                    self.remove_slot(row, slot);
                } else {
                    self.a[slot] = value;
                }
                Ok(())
            }
            Err(slot) => {
                if value == self.default {
                    return Ok(());
                }
                self.insert_slot(row, slot, col, value)
            }
        }
    }

    fn iter_stored(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        let default = self.default;
        let diag_len = self.shape[0].min(self.shape[1]);
        let diagonal = (0..diag_len)
            .filter(move |&i| self.a[i] != default)
            .map(move |i| (i, i, self.a[i]));
        let off_diagonal = (0..self.shape[0]).flat_map(move |r| {
            (self.ija[r]..self.ija[r + 1]).map(move |slot| (r, self.ija[slot], self.a[slot]))
        });
        Box::new(diagonal.chain(off_diagonal))
    }

    fn stored_len(&self) -> usize {
        let diag_len = self.shape[0].min(self.shape[1]);
        let diag = (0..diag_len)
            .filter(|&i| self.a[i] != self.default)
            .count();
        diag + (self.size() - self.reserved())
    }

    fn memory_usage(&self) -> usize {
        self.ija.capacity() * std::mem::size_of::<usize>()
            + self.a.capacity() * std::mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_layout() {
        let m = YaleStorage::new(3, 3, 0.0f64).unwrap();
        assert_eq!(m.ija()[..4], [4, 4, 4, 4]);
        assert_eq!(m.size(), 4);
        assert_eq!(m.stored_len(), 0);
        assert_eq!(m.get(1, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_diagonal_slots() {
        let mut m = YaleStorage::new(3, 3, 0.0f64).unwrap();
        m.set(0, 0, 5.0).unwrap();
        m.set(2, 2, 9.0).unwrap();
        assert_eq!(m.get(0, 0).unwrap(), 5.0);
        assert_eq!(m.get(1, 1).unwrap(), 0.0);
        // Diagonal writes never move the shared region
        assert_eq!(m.size(), 4);

        let mut got: Vec<_> = m.iter_stored().collect();
        got.sort_by_key(|&(r, c, _)| (r, c));
        assert_eq!(got, vec![(0, 0, 5.0), (2, 2, 9.0)]);
        assert_eq!(m.stored_len(), 2);
    }

    #[test]
    fn test_off_diagonal_insert_and_pointers() {
        let mut m = YaleStorage::new(3, 3, 0.0f64).unwrap();
        m.set(0, 2, 1.0).unwrap();
        m.set(0, 1, 2.0).unwrap();
        m.set(2, 0, 3.0).unwrap();
        // Row 0 holds columns [1, 2]; row 2 holds [0]
        assert_eq!(m.ija()[..4], [4, 6, 6, 7]);
        assert_eq!(m.ija()[4..7], [1, 2, 0]);
        assert_eq!(m.get(0, 1).unwrap(), 2.0);
        assert_eq!(m.get(0, 2).unwrap(), 1.0);
        assert_eq!(m.get(2, 0).unwrap(), 3.0);
        assert_eq!(m.get(1, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_set_default_removes_off_diagonal() {
        let mut m = YaleStorage::new(2, 3, 0i32).unwrap();
        m.set(0, 2, 7).unwrap();
        m.set(1, 0, 8).unwrap();
        assert_eq!(m.stored_len(), 2);
        m.set(0, 2, 0).unwrap();
        assert_eq!(m.stored_len(), 1);
        assert_eq!(m.get(0, 2).unwrap(), 0);
        assert_eq!(m.get(1, 0).unwrap(), 8);
    }

    #[test]
    fn test_overwrite_keeps_size() {
        let mut m = YaleStorage::new(2, 2, 0.0f32).unwrap();
        m.set(0, 1, 1.0).unwrap();
        let size = m.size();
        m.set(0, 1, 2.5).unwrap();
        assert_eq!(m.size(), size);
        assert_eq!(m.get(0, 1).unwrap(), 2.5);
    }

    #[test]
    fn test_growth_beyond_initial_capacity() {
        let mut m = YaleStorage::with_capacity(4, 8, 0i64, 0).unwrap();
        for c in 0..8usize {
            for r in 0..4usize {
                if r != c {
                    m.set(r, c, (r * 8 + c) as i64).unwrap();
                }
            }
        }
        for c in 0..8usize {
            for r in 0..4usize {
                let want = if r == c { 0 } else { (r * 8 + c) as i64 };
                assert_eq!(m.get(r, c).unwrap(), want, "({r},{c})");
            }
        }
    }

    #[test]
    fn test_capacity_limit() {
        // 2x2: reserved 3 slots + 2 off-diagonals = 5 max
        let mut m = YaleStorage::new(2, 2, 0i32).unwrap();
        assert_eq!(m.max_size(), 5);
        m.set(0, 1, 1).unwrap();
        m.set(1, 0, 2).unwrap();
        assert_eq!(m.size(), 5);
        // Every position is now addressable without growth
        m.set(0, 0, 3).unwrap();
        assert_eq!(m.stored_len(), 3);
    }

    #[test]
    fn test_tall_matrix_fills_completely() {
        // Rows past the diagonal contribute cols off-diagonal slots each;
        // the capacity bound must admit every position
        let mut m = YaleStorage::new(5, 2, 0i32).unwrap();
        assert_eq!(m.max_size(), 6 + 8);
        for r in 0..5usize {
            for c in 0..2usize {
                m.set(r, c, (r * 2 + c + 1) as i32).unwrap();
            }
        }
        for r in 0..5usize {
            for c in 0..2usize {
                assert_eq!(m.get(r, c).unwrap(), (r * 2 + c + 1) as i32);
            }
        }
        assert_eq!(m.size(), m.max_size());
    }

    #[test]
    fn test_nonzero_default() {
        let mut m = YaleStorage::new(2, 2, 1.0f64).unwrap();
        assert_eq!(m.get(0, 1).unwrap(), 1.0);
        // Fresh diagonal slots read as the default too
        assert_eq!(m.get(0, 0).unwrap(), 1.0);
        assert_eq!(m.stored_len(), 0);
        m.set(0, 0, 2.0).unwrap();
        m.set(0, 1, 3.0).unwrap();
        m.set(0, 1, 1.0).unwrap();
        assert_eq!(m.stored_len(), 1);
    }

    #[test]
    fn test_rectangular_shapes() {
        let mut wide = YaleStorage::new(2, 5, 0.0f64).unwrap();
        wide.set(1, 4, 2.0).unwrap();
        wide.set(1, 1, 3.0).unwrap();
        assert_eq!(wide.get(1, 4).unwrap(), 2.0);
        assert_eq!(wide.get(1, 1).unwrap(), 3.0);

        let mut tall = YaleStorage::new(5, 2, 0.0f64).unwrap();
        tall.set(4, 0, 6.0).unwrap();
        assert_eq!(tall.get(4, 0).unwrap(), 6.0);
        // Rows past the column count have no diagonal position to store
        assert_eq!(tall.stored_len(), 1);
    }
}
