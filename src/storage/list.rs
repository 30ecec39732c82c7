//! List-of-rows sparse storage

use crate::dtype::Element;
use crate::error::Result;

use super::{check_index, MatrixStorage, StorageFormat};

/// Per-row sorted association lists of (column, value).
///
/// Each row holds its stored entries sorted by column, so lookups are a
/// binary search and in-order iteration is free. Writing the default value
/// deletes the entry; the lists never hold a default.
#[derive(Debug, Clone, PartialEq)]
pub struct ListStorage<T: Element> {
    rows: Vec<Vec<(usize, T)>>,
    shape: [usize; 2],
    default: T,
}

impl<T: Element> ListStorage<T> {
    /// Create an empty matrix where every position reads as `default`.
    pub fn new(rows: usize, cols: usize, default: T) -> Self {
        Self {
            rows: vec![Vec::new(); rows],
            shape: [rows, cols],
            default,
        }
    }

    /// Build from (row, col, value) triplets; defaults are skipped, later
    /// duplicates win.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        default: T,
        triplets: &[(usize, usize, T)],
    ) -> Result<Self> {
        let mut storage = Self::new(rows, cols, default);
        for &(r, c, v) in triplets {
            storage.set(r, c, v)?;
        }
        Ok(storage)
    }
}

impl<T: Element> MatrixStorage<T> for ListStorage<T> {
    fn format(&self) -> StorageFormat {
        StorageFormat::List
    }

    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn default_value(&self) -> T {
        self.default
    }

    fn get(&self, row: usize, col: usize) -> Result<T> {
        check_index(row, col, self.shape)?;
        let entries = &self.rows[row];
        match entries.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(pos) => Ok(entries[pos].1),
            Err(_) => Ok(self.default),
        }
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        check_index(row, col, self.shape)?;
        let entries = &mut self.rows[row];
        match entries.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(pos) => {
                if value == self.default {
                    entries.remove(pos);
                } else {
                    entries[pos].1 = value;
                }
            }
            Err(pos) => {
                if value != self.default {
                    entries.insert(pos, (col, value));
                }
            }
        }
        Ok(())
    }

    fn iter_stored(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        Box::new(
            self.rows
                .iter()
                .enumerate()
                .flat_map(|(r, entries)| entries.iter().map(move |&(c, v)| (r, c, v))),
        )
    }

    fn stored_len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    fn memory_usage(&self) -> usize {
        let entry = std::mem::size_of::<(usize, T)>();
        self.rows
            .iter()
            .map(|entries| entries.capacity() * entry + std::mem::size_of::<Vec<(usize, T)>>())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex64;

    #[test]
    fn test_empty_reads_default() {
        let m = ListStorage::new(3, 3, -1.0f64);
        assert_eq!(m.get(2, 2).unwrap(), -1.0);
        assert_eq!(m.stored_len(), 0);
    }

    #[test]
    fn test_set_get_and_overwrite() {
        let mut m = ListStorage::new(2, 4, 0.0f64);
        m.set(0, 3, 5.0).unwrap();
        m.set(0, 1, 2.0).unwrap();
        m.set(0, 3, 6.0).unwrap();
        assert_eq!(m.get(0, 3).unwrap(), 6.0);
        assert_eq!(m.get(0, 1).unwrap(), 2.0);
        assert_eq!(m.stored_len(), 2);
    }

    #[test]
    fn test_set_default_removes_entry() {
        let mut m = ListStorage::new(2, 2, 0i32);
        m.set(1, 0, 9).unwrap();
        assert_eq!(m.stored_len(), 1);
        m.set(1, 0, 0).unwrap();
        assert_eq!(m.stored_len(), 0);
        assert_eq!(m.get(1, 0).unwrap(), 0);
    }

    #[test]
    fn test_set_default_on_absent_is_noop() {
        let mut m = ListStorage::new(2, 2, 0i32);
        m.set(0, 0, 0).unwrap();
        assert_eq!(m.stored_len(), 0);
    }

    #[test]
    fn test_rows_stay_sorted() {
        let mut m = ListStorage::new(1, 6, 0i64);
        for &c in &[4, 0, 5, 2] {
            m.set(0, c, (c + 1) as i64).unwrap();
        }
        let cols: Vec<usize> = m.iter_stored().map(|(_, c, _)| c).collect();
        assert_eq!(cols, vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_from_triplets_last_wins() {
        let m = ListStorage::from_triplets(
            2,
            2,
            Complex64::ZERO,
            &[
                (0, 0, Complex64::new(1.0, 0.0)),
                (0, 0, Complex64::new(0.0, 2.0)),
            ],
        )
        .unwrap();
        assert_eq!(m.get(0, 0).unwrap(), Complex64::new(0.0, 2.0));
        assert_eq!(m.stored_len(), 1);
    }

    #[test]
    fn test_bounds() {
        let mut m = ListStorage::new(2, 2, 0.0f32);
        assert!(m.get(2, 0).is_err());
        assert!(m.set(0, 2, 1.0).is_err());
    }
}
