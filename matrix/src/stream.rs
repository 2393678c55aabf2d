//! Lazy traversals over a borrowed matrix.
//!
//! Every stream knows its exact remaining length and skips ahead in constant
//! time through [`LazySeq::advance`], which also backs [`Iterator::nth`].

use crate::{access::check_range, error::Result, matrix::Matrix};
use core::{iter::FusedIterator, ops::Range};
use num_integer::Integer;
use util::LazySeq;

macro_rules! impl_lazy_seq {
    ($name:ident $(, $bound:path)?) => {
        impl<'a, T $(: $bound)?> ExactSizeIterator for $name<'a, T> {}

        impl<'a, T $(: $bound)?> FusedIterator for $name<'a, T> {}

        impl<'a, T $(: $bound)?> LazySeq for $name<'a, T> {
            fn advance(&mut self, n: usize) {
                self.skip_cells(n.min(self.len()));
            }
        }
    };
}

/// Elements of a row range in row-major order.
#[derive(Clone, Debug)]
pub struct RowMajor<'a, T> {
    data: &'a [Vec<T>],
    cols: usize,
    i: usize,
    j: usize,
    end: usize,
}

impl<'a, T> RowMajor<'a, T> {
    fn new(data: &'a [Vec<T>], cols: usize, rows: Range<usize>) -> Self {
        let i = if cols == 0 { rows.end } else { rows.start };
        Self {
            data,
            cols,
            i,
            j: 0,
            end: rows.end,
        }
    }

    fn remaining_cells(&self) -> usize {
        (self.end - self.i) * self.cols - self.j
    }

    fn skip_cells(&mut self, n: usize) {
        if n > 0 {
            let (rows, j) = (self.j + n).div_rem(&self.cols);
            self.i += rows;
            self.j = j;
        }
    }
}

impl<'a, T: Clone> Iterator for RowMajor<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.i >= self.end {
            return None;
        }
        let value = self.data[self.i][self.j].clone();
        self.j += 1;
        if self.j == self.cols {
            self.i += 1;
            self.j = 0;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining_cells();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.advance(n);
        self.next()
    }
}

impl<'a, T: Clone> ExactSizeIterator for RowMajor<'a, T> {}

impl<'a, T: Clone> FusedIterator for RowMajor<'a, T> {}

impl<'a, T: Clone> LazySeq for RowMajor<'a, T> {
    fn advance(&mut self, n: usize) {
        self.skip_cells(n.min(self.len()));
    }

    fn to_vec(self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len());
        if self.i < self.end {
            items.extend_from_slice(&self.data[self.i][self.j..]);
            self.data[self.i + 1..self.end]
                .iter()
                .for_each(|row| items.extend_from_slice(row));
        }
        items
    }
}

/// Elements of a column range in column-major order.
#[derive(Clone, Debug)]
pub struct ColumnMajor<'a, T> {
    data: &'a [Vec<T>],
    rows: usize,
    i: usize,
    j: usize,
    end: usize,
}

impl<'a, T> ColumnMajor<'a, T> {
    fn new(data: &'a [Vec<T>], cols: Range<usize>) -> Self {
        let j = if data.is_empty() { cols.end } else { cols.start };
        Self {
            data,
            rows: data.len(),
            i: 0,
            j,
            end: cols.end,
        }
    }

    fn remaining_cells(&self) -> usize {
        (self.end - self.j) * self.rows - self.i
    }

    fn skip_cells(&mut self, n: usize) {
        if n > 0 {
            let (cols, i) = (self.i + n).div_rem(&self.rows);
            self.j += cols;
            self.i = i;
        }
    }
}

impl<'a, T: Clone> Iterator for ColumnMajor<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.j >= self.end {
            return None;
        }
        let value = self.data[self.i][self.j].clone();
        self.i += 1;
        if self.i == self.rows {
            self.j += 1;
            self.i = 0;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining_cells();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.advance(n);
        self.next()
    }
}

impl_lazy_seq!(ColumnMajor, Clone);

/// Main or anti-diagonal of a square matrix, top row first.
#[derive(Clone, Debug)]
pub struct Diagonal<'a, T> {
    data: &'a [Vec<T>],
    cursor: usize,
    anti: bool,
}

impl<'a, T> Diagonal<'a, T> {
    fn skip_cells(&mut self, n: usize) {
        self.cursor += n;
    }
}

impl<'a, T: Clone> Iterator for Diagonal<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let n = self.data.len();
        let row = self.data.get(self.cursor)?;
        let j = if self.anti { n - 1 - self.cursor } else { self.cursor };
        self.cursor += 1;
        Some(row[j].clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.data.len() - self.cursor;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.advance(n);
        self.next()
    }
}

impl_lazy_seq!(Diagonal, Clone);

/// One [`RowMajor`] stream per row.
#[derive(Clone, Debug)]
pub struct RowStreams<'a, T> {
    data: &'a [Vec<T>],
    cols: usize,
    rows: Range<usize>,
}

impl<'a, T> RowStreams<'a, T> {
    fn skip_cells(&mut self, n: usize) {
        self.rows.start += n;
    }
}

impl<'a, T> Iterator for RowStreams<'a, T> {
    type Item = RowMajor<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.rows.next()?;
        Some(RowMajor::new(self.data, self.cols, i..i + 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.advance(n);
        self.next()
    }
}

impl_lazy_seq!(RowStreams);

/// One [`ColumnMajor`] stream per column.
#[derive(Clone, Debug)]
pub struct ColumnStreams<'a, T> {
    data: &'a [Vec<T>],
    cols: Range<usize>,
}

impl<'a, T> ColumnStreams<'a, T> {
    fn skip_cells(&mut self, n: usize) {
        self.cols.start += n;
    }
}

impl<'a, T> Iterator for ColumnStreams<'a, T> {
    type Item = ColumnMajor<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let j = self.cols.next()?;
        Some(ColumnMajor::new(self.data, j..j + 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cols.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.advance(n);
        self.next()
    }
}

impl_lazy_seq!(ColumnStreams);

impl<T, S: AsRef<[Vec<T>]>> Matrix<T, S> {
    /// All elements, row by row.
    pub fn stream_h(&self) -> RowMajor<'_, T> {
        RowMajor::new(self.array(), self.cols(), 0..self.rows())
    }

    pub fn stream_h_range(&self, rows: Range<usize>) -> Result<RowMajor<'_, T>> {
        check_range(&rows, self.rows())?;
        Ok(RowMajor::new(self.array(), self.cols(), rows))
    }

    /// All elements, column by column.
    pub fn stream_v(&self) -> ColumnMajor<'_, T> {
        ColumnMajor::new(self.array(), 0..self.cols())
    }

    pub fn stream_v_range(&self, cols: Range<usize>) -> Result<ColumnMajor<'_, T>> {
        check_range(&cols, self.cols())?;
        Ok(ColumnMajor::new(self.array(), cols))
    }

    pub fn stream_lu2rd(&self) -> Result<Diagonal<'_, T>> {
        self.diagonal_stream(false)
    }

    pub fn stream_ru2ld(&self) -> Result<Diagonal<'_, T>> {
        self.diagonal_stream(true)
    }

    fn diagonal_stream(&self, anti: bool) -> Result<Diagonal<'_, T>> {
        self.check_square()?;
        Ok(Diagonal {
            data: self.array(),
            cursor: 0,
            anti,
        })
    }

    pub fn stream_r(&self) -> RowStreams<'_, T> {
        RowStreams {
            data: self.array(),
            cols: self.cols(),
            rows: 0..self.rows(),
        }
    }

    pub fn stream_r_range(&self, rows: Range<usize>) -> Result<RowStreams<'_, T>> {
        check_range(&rows, self.rows())?;
        Ok(RowStreams {
            data: self.array(),
            cols: self.cols(),
            rows,
        })
    }

    pub fn stream_c(&self) -> ColumnStreams<'_, T> {
        ColumnStreams {
            data: self.array(),
            cols: 0..self.cols(),
        }
    }

    pub fn stream_c_range(&self, cols: Range<usize>) -> Result<ColumnStreams<'_, T>> {
        check_range(&cols, self.cols())?;
        Ok(ColumnStreams {
            data: self.array(),
            cols,
        })
    }
}

impl<'a, T: Clone, S: AsRef<[Vec<T>]>> IntoIterator for &'a Matrix<T, S> {
    type Item = T;
    type IntoIter = RowMajor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.stream_h()
    }
}

#[cfg(test)]
mod test {
    use crate::{error::MatrixError, matrix::Matrix};
    use rand::{distributions::Uniform, thread_rng, Rng};
    use util::LazySeq;

    #[test]
    fn row_and_column_major() {
        let m = Matrix::from([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.stream_h().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(m.stream_v().collect::<Vec<_>>(), [1, 4, 2, 5, 3, 6]);
        assert_eq!(m.stream_h_range(1..2).unwrap().to_vec(), [4, 5, 6]);
        assert_eq!(m.stream_v_range(1..3).unwrap().to_vec(), [2, 5, 3, 6]);
        assert_eq!((&m).into_iter().sum::<i32>(), 21);
        assert_eq!(
            m.stream_h_range(1..3).unwrap_err(),
            MatrixError::RangeOutOfBounds {
                start: 1,
                end: 3,
                len: 2
            }
        );
        assert!(m.stream_v_range(2..4).is_err());
    }

    #[test]
    fn skip_matches_materialized() {
        let mut rng = thread_rng();
        for _ in 0..16 {
            let (rows, cols) = (rng.gen_range(0..6), rng.gen_range(0..6));
            let m = Matrix::sample(rows, cols, Uniform::new(0, 100), &mut rng);
            let by_row = m.flatten();
            let by_col = m.transpose().flatten();
            for n in 0..=m.count() + 2 {
                let mut h = m.stream_h();
                h.advance(n);
                assert_eq!(h.remaining(), by_row.len().saturating_sub(n));
                assert_eq!(h.to_vec(), by_row[n.min(by_row.len())..]);

                let mut v = m.stream_v();
                v.advance(n);
                assert_eq!(v.remaining(), by_col.len().saturating_sub(n));
                assert_eq!(v.collect::<Vec<_>>(), by_col[n.min(by_col.len())..]);

                assert_eq!(m.stream_h().nth(n), by_row.get(n).copied());
                assert_eq!(m.stream_v().nth(n), by_col.get(n).copied());
            }

            let mut h = m.stream_h();
            let mut seen = Vec::new();
            while h.has_next() {
                seen.extend(h.next());
                h.advance(1);
            }
            assert_eq!(seen, by_row.iter().step_by(2).copied().collect::<Vec<_>>());
        }
    }

    #[test]
    fn diagonals() {
        let m = Matrix::from([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(m.stream_lu2rd().unwrap().to_vec(), [1, 5, 9]);
        assert_eq!(m.stream_ru2ld().unwrap().to_vec(), [3, 5, 7]);

        let mut anti = m.stream_ru2ld().unwrap();
        assert_eq!(anti.len(), 3);
        anti.advance(2);
        assert_eq!(anti.next(), Some(7));
        assert!(!anti.has_next());
        anti.advance(5);
        assert_eq!(anti.next(), None);

        let err = Matrix::from([[1, 2]]).stream_lu2rd().unwrap_err();
        assert_eq!(err, MatrixError::NotSquare { rows: 1, cols: 2 });
        assert_eq!(Matrix::<i32>::empty().stream_lu2rd().unwrap().count(), 0);
    }

    #[test]
    fn streams_of_streams() {
        let m = Matrix::from([[1, 2, 3], [4, 5, 6]]);
        let rows = m.stream_r().map(LazySeq::to_vec).collect::<Vec<_>>();
        assert_eq!(rows, [vec![1, 2, 3], vec![4, 5, 6]]);
        let cols = m.stream_c().map(LazySeq::to_vec).collect::<Vec<_>>();
        assert_eq!(cols, [vec![1, 4], vec![2, 5], vec![3, 6]]);

        let mut cols = m.stream_c_range(1..3).unwrap();
        assert_eq!(cols.len(), 2);
        cols.advance(1);
        assert_eq!(cols.next().map(LazySeq::to_vec), Some(vec![3, 6]));
        assert!(cols.next().is_none());

        let mut rows = m.stream_r_range(0..2).unwrap();
        assert_eq!(rows.nth(1).map(|row| row.sum::<i32>()), Some(15));
        assert!(m.stream_r_range(0..3).is_err());
        assert!(m.stream_c_range(3..2).is_err());
    }

    #[test]
    fn empty_streams() {
        let empty = Matrix::<i32>::empty();
        assert_eq!(empty.stream_h().next(), None);
        assert_eq!(empty.stream_v().next(), None);
        assert_eq!(empty.stream_r().count(), 0);
        assert_eq!(empty.stream_c().count(), 0);

        let no_cols = Matrix::<i32>::from_rows(vec![vec![], vec![]]).unwrap();
        assert_eq!(no_cols.stream_h().len(), 0);
        assert_eq!(no_cols.stream_v().len(), 0);
        let mut h = no_cols.stream_h();
        h.advance(3);
        assert_eq!(h.next(), None);
        assert_eq!(no_cols.stream_r().count(), 0);
    }
}
