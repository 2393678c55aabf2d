use crate::{
    access::check_range,
    error::{MatrixError, Result},
    matrix::Matrix,
};
use core::{iter::repeat, ops::Range};
use util::checked_area;

fn checked_shape(
    op: &'static str,
    rows: Option<usize>,
    cols: Option<usize>,
) -> Result<(usize, usize)> {
    match (rows, cols) {
        (Some(rows), Some(cols)) if checked_area(rows, cols).is_some() => Ok((rows, cols)),
        _ => Err(MatrixError::DimensionOverflow { op }),
    }
}

impl<T> Matrix<T> {
    pub(crate) fn generate(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let data = (0..rows)
            .map(|i| (0..cols).map(|j| f(i, j)).collect())
            .collect();
        Self::from_parts(rows, cols, data)
    }
}

impl<T: Clone, S: AsRef<[Vec<T>]>> Matrix<T, S> {
    /// Deep copy into freshly allocated rows.
    pub fn copy(&self) -> Matrix<T> {
        Matrix::from_parts(self.rows(), self.cols(), self.array().to_vec())
    }

    pub fn copy_rows(&self, rows: Range<usize>) -> Result<Matrix<T>> {
        check_range(&rows, self.rows())?;
        Ok(Matrix::from_parts(
            rows.len(),
            self.cols(),
            self.array()[rows].to_vec(),
        ))
    }

    pub fn copy_region(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Matrix<T>> {
        check_range(&rows, self.rows())?;
        check_range(&cols, self.cols())?;
        let data = self.array()[rows.clone()]
            .iter()
            .map(|row| row[cols.clone()].to_vec())
            .collect();
        Ok(Matrix::from_parts(rows.len(), cols.len(), data))
    }

    pub fn transpose(&self) -> Matrix<T> {
        let a = self.array();
        Matrix::generate(self.cols(), self.rows(), |i, j| a[j][i].clone())
    }

    /// Rotates clockwise by 90 degrees.
    pub fn rotate90(&self) -> Matrix<T> {
        let (a, rows) = (self.array(), self.rows());
        Matrix::generate(self.cols(), rows, |i, j| a[rows - j - 1][i].clone())
    }

    pub fn rotate180(&self) -> Matrix<T> {
        let data = self
            .array()
            .iter()
            .rev()
            .map(|row| row.iter().rev().cloned().collect())
            .collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    /// Rotates clockwise by 270 degrees.
    pub fn rotate270(&self) -> Matrix<T> {
        let (a, cols) = (self.array(), self.cols());
        Matrix::generate(cols, self.rows(), |i, j| a[j][cols - i - 1].clone())
    }

    /// Copy with every row reversed.
    pub fn flip_h(&self) -> Matrix<T> {
        let mut flipped = self.copy();
        flipped.reverse_h();
        flipped
    }

    /// Copy with the row order reversed.
    pub fn flip_v(&self) -> Matrix<T> {
        let mut flipped = self.copy();
        flipped.reverse_v();
        flipped
    }

    /// Refills the row-major sequence of elements into `new_rows x new_cols`,
    /// dropping what does not fit and padding with `T::default()`.
    pub fn reshape(&self, new_rows: usize, new_cols: usize) -> Result<Matrix<T>>
    where
        T: Default,
    {
        let (new_rows, new_cols) = checked_shape("reshape", Some(new_rows), Some(new_cols))?;
        let mut cells = self.array().iter().flatten().cloned();
        Ok(Matrix::generate(new_rows, new_cols, |_, _| {
            cells.next().unwrap_or_default()
        }))
    }

    /// [`Matrix::reshape`] into as many rows of `new_cols` as the elements need.
    pub fn reshape_cols(&self, new_cols: usize) -> Result<Matrix<T>>
    where
        T: Default,
    {
        if new_cols == 0 {
            return Err(MatrixError::ZeroColumns);
        }
        self.reshape(self.count().div_ceil(new_cols), new_cols)
    }

    /// Grows or shrinks to `new_rows x new_cols` from the top-left corner, new
    /// cells get `T::default()`.
    pub fn extend(&self, new_rows: usize, new_cols: usize) -> Result<Matrix<T>>
    where
        T: Default,
    {
        self.extend_with(new_rows, new_cols, T::default())
    }

    pub fn extend_with(&self, new_rows: usize, new_cols: usize, value: T) -> Result<Matrix<T>> {
        let (new_rows, new_cols) = checked_shape("extend", Some(new_rows), Some(new_cols))?;
        let kept = self.cols().min(new_cols);
        let data = (0..new_rows)
            .map(|i| match self.array().get(i) {
                Some(row) => row[..kept]
                    .iter()
                    .cloned()
                    .chain(repeat(value.clone()))
                    .take(new_cols)
                    .collect(),
                None => vec![value.clone(); new_cols],
            })
            .collect();
        Ok(Matrix::from_parts(new_rows, new_cols, data))
    }

    /// Pads `up`/`down` rows and `left`/`right` columns of `value` around a copy.
    pub fn extend_around(
        &self,
        up: usize,
        down: usize,
        left: usize,
        right: usize,
        value: T,
    ) -> Result<Matrix<T>> {
        let (new_rows, new_cols) = checked_shape(
            "extend_around",
            up.checked_add(self.rows()).and_then(|rows| rows.checked_add(down)),
            left.checked_add(self.cols()).and_then(|cols| cols.checked_add(right)),
        )?;
        if new_rows == 0 {
            return Ok(Matrix::empty());
        }
        let padding = vec![value.clone(); new_cols];
        let data = repeat(padding.clone())
            .take(up)
            .chain(self.array().iter().map(|row| {
                repeat(value.clone())
                    .take(left)
                    .chain(row.iter().cloned())
                    .chain(repeat(value.clone()).take(right))
                    .collect()
            }))
            .chain(repeat(padding).take(down))
            .collect();
        Ok(Matrix::from_parts(new_rows, new_cols, data))
    }

    /// Expands every element into a `row_repeats x col_repeats` block.
    pub fn repelem(&self, row_repeats: usize, col_repeats: usize) -> Result<Matrix<T>> {
        let (rows, cols) = self.repeated_shape("repelem", row_repeats, col_repeats)?;
        let data = self
            .array()
            .iter()
            .flat_map(|row| {
                let expanded = row
                    .iter()
                    .flat_map(|value| repeat(value.clone()).take(col_repeats))
                    .collect::<Vec<_>>();
                repeat(expanded).take(row_repeats)
            })
            .collect();
        Ok(Matrix::from_parts(rows, cols, data))
    }

    /// Tiles the whole matrix `row_repeats x col_repeats` times.
    pub fn repmat(&self, row_repeats: usize, col_repeats: usize) -> Result<Matrix<T>> {
        let (rows, cols) = self.repeated_shape("repmat", row_repeats, col_repeats)?;
        let tiled = self
            .array()
            .iter()
            .map(|row| {
                (0..col_repeats)
                    .flat_map(|_| row.iter().cloned())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let data = (0..row_repeats)
            .flat_map(|_| tiled.iter().cloned())
            .collect();
        Ok(Matrix::from_parts(rows, cols, data))
    }

    fn repeated_shape(
        &self,
        op: &'static str,
        row_repeats: usize,
        col_repeats: usize,
    ) -> Result<(usize, usize)> {
        if row_repeats == 0 || col_repeats == 0 {
            return Err(MatrixError::InvalidRepeats {
                rows: row_repeats,
                cols: col_repeats,
            });
        }
        checked_shape(
            op,
            self.rows().checked_mul(row_repeats),
            self.cols().checked_mul(col_repeats),
        )
    }

    /// Rows of `self` followed by rows of `other`.
    pub fn vstack<S2: AsRef<[Vec<T>]>>(&self, other: &Matrix<T, S2>) -> Result<Matrix<T>> {
        if self.cols() != other.cols() {
            return Err(MatrixError::ColumnCountMismatch {
                lhs: self.cols(),
                rhs: other.cols(),
            });
        }
        let data = self
            .array()
            .iter()
            .chain(other.array())
            .cloned()
            .collect();
        Ok(Matrix::from_parts(
            self.rows() + other.rows(),
            self.cols(),
            data,
        ))
    }

    /// Columns of `self` followed by columns of `other`.
    pub fn hstack<S2: AsRef<[Vec<T>]>>(&self, other: &Matrix<T, S2>) -> Result<Matrix<T>> {
        if self.rows() != other.rows() {
            return Err(MatrixError::RowCountMismatch {
                lhs: self.rows(),
                rhs: other.rows(),
            });
        }
        let data = self
            .array()
            .iter()
            .zip(other.array())
            .map(|(a, b)| a.iter().chain(b).cloned().collect())
            .collect();
        Ok(Matrix::from_parts(
            self.rows(),
            self.cols() + other.cols(),
            data,
        ))
    }

    /// Elements in row-major order.
    pub fn flatten(&self) -> Vec<T> {
        self.array().concat()
    }
}

impl<T: Clone, S: AsRef<[Vec<T>]> + AsMut<[Vec<T>]>> Matrix<T, S> {
    pub fn fill(&mut self, value: T) {
        self.rows_mut().for_each(|row| row.fill(value.clone()));
    }

    /// Copies `block` in with its top-left corner at `(row, col)`. Parts of the
    /// block that fall outside the matrix are ignored, and its rows may differ
    /// in length.
    pub fn fill_from<R: AsRef<[T]>>(&mut self, row: usize, col: usize, block: &[R]) -> Result<()> {
        check_range(&(row..self.rows()), self.rows())?;
        check_range(&(col..self.cols()), self.cols())?;
        let width = self.cols() - col;
        self.rows_mut()
            .skip(row)
            .zip(block)
            .for_each(|(target, source)| {
                let source = source.as_ref();
                let n = source.len().min(width);
                target[col..col + n].clone_from_slice(&source[..n]);
            });
        Ok(())
    }

    /// Hands all elements to `f` as one row-major slice, then writes them back.
    pub fn flat_op(&mut self, f: impl FnOnce(&mut [T])) {
        let mut cells = self.flatten();
        f(&mut cells);
        self.rows_mut()
            .flatten()
            .zip(cells)
            .for_each(|(slot, value)| *slot = value);
    }
}

impl<T, S: AsMut<[Vec<T>]>> Matrix<T, S> {
    /// Reverses every row in place.
    pub fn reverse_h(&mut self) {
        self.rows_mut().for_each(<[T]>::reverse);
    }

    /// Reverses the row order in place.
    pub fn reverse_v(&mut self) {
        self.array_mut().reverse();
    }
}
