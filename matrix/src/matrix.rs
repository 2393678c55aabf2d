use crate::error::{MatrixError, Result};
use core::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
};
use util::first_ragged;

/// Dense row-major matrix.
///
/// Every row is its own contiguous `Vec<T>` of length `cols`. The storage `S`
/// decides who owns those rows:
///
/// - [`Matrix<T>`] owns them. Built by [`Matrix::from_rows`] (takes the rows
///   without copying), [`Matrix::copy_from`] and every transform.
/// - [`MatrixMut`] borrows them mutably from the caller through
///   [`Matrix::wrap`]. Writes through the matrix land in the caller's rows.
/// - [`MatrixRef`] borrows them immutably through [`Matrix::view`].
///
/// Operations that produce a new matrix always return an owned [`Matrix<T>`]
/// with freshly allocated rows.
///
/// A matrix with no cells is always `0 x 0`: no rows and no columns.
#[derive(Debug)]
pub struct Matrix<T, S = Vec<Vec<T>>> {
    rows: usize,
    cols: usize,
    data: S,
    _marker: PhantomData<T>,
}

pub type MatrixMut<'a, T> = Matrix<T, &'a mut [Vec<T>]>;

pub type MatrixRef<'a, T> = Matrix<T, &'a [Vec<T>]>;

fn shape_of<T, R: AsRef<[T]>>(rows: &[R]) -> Result<(usize, usize)> {
    let cols = rows.first().map_or(0, |row| row.as_ref().len());
    match first_ragged(rows) {
        Some(row) => Err(MatrixError::RaggedRows {
            row,
            expected: cols,
            found: rows[row].as_ref().len(),
        }),
        None => Ok((rows.len(), cols)),
    }
}

/// Row storage that can drop all of its rows.
pub(crate) trait Storage {
    fn cleared(self) -> Self;
}

impl<T> Storage for Vec<Vec<T>> {
    fn cleared(mut self) -> Self {
        self.clear();
        self
    }
}

impl<T> Storage for &mut [Vec<T>] {
    fn cleared(self) -> Self {
        &mut self[..0]
    }
}

impl<T> Storage for &[Vec<T>] {
    fn cleared(self) -> Self {
        &self[..0]
    }
}

impl<T, S: Storage> Matrix<T, S> {
    fn from_storage(rows: usize, cols: usize, data: S) -> Self {
        let (rows, cols, data) = if rows == 0 || cols == 0 {
            (0, 0, data.cleared())
        } else {
            (rows, cols, data)
        };
        Self {
            rows,
            cols,
            data,
            _marker: PhantomData,
        }
    }
}

impl<T> Matrix<T> {
    /// The `0 x 0` matrix.
    pub fn empty() -> Self {
        Self::from_storage(0, 0, Vec::new())
    }

    /// Takes ownership of `data` without copying it.
    pub fn from_rows(data: Vec<Vec<T>>) -> Result<Self> {
        let (rows, cols) = shape_of(&data)?;
        Ok(Self::from_storage(rows, cols, data))
    }

    /// Caller guarantees `data` is `rows x cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<Vec<T>>) -> Self {
        debug_assert_eq!(data.len(), rows);
        debug_assert!(data.iter().all(|row| row.len() == cols));
        Self::from_storage(rows, cols, data)
    }

    pub(crate) fn single_row(row: Vec<T>) -> Self {
        if row.is_empty() {
            Self::empty()
        } else {
            Self::from_parts(1, row.len(), vec![row])
        }
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.data
    }
}

impl<T: Clone> Matrix<T> {
    /// Copies rectangular `data` into a new matrix.
    pub fn copy_from<R: AsRef<[T]>>(data: &[R]) -> Result<Self> {
        let (rows, cols) = shape_of(data)?;
        let data = data.iter().map(|row| row.as_ref().to_vec()).collect();
        Ok(Self::from_storage(rows, cols, data))
    }
}

impl<'a, T> Matrix<T, &'a mut [Vec<T>]> {
    /// Aliases the caller's rows: no copy is made, and mutations through the
    /// matrix are visible in `data` once the borrow ends.
    pub fn wrap(data: &'a mut [Vec<T>]) -> Result<Self> {
        let (rows, cols) = shape_of(data)?;
        Ok(Self::from_storage(rows, cols, data))
    }
}

impl<'a, T> Matrix<T, &'a [Vec<T>]> {
    /// Read-only counterpart of [`Matrix::wrap`].
    pub fn view(data: &'a [Vec<T>]) -> Result<Self> {
        let (rows, cols) = shape_of(data)?;
        Ok(Self::from_storage(rows, cols, data))
    }
}

impl<T, S: AsRef<[Vec<T>]>> Matrix<T, S> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_same_shape<U, S2: AsRef<[Vec<U>]>>(&self, other: &Matrix<U, S2>) -> bool {
        self.shape() == other.shape()
    }

    /// The backing rows.
    pub fn array(&self) -> &[Vec<T>] {
        self.data.as_ref()
    }

    /// Borrows the rows as a [`MatrixRef`].
    pub fn as_view(&self) -> MatrixRef<'_, T> {
        MatrixRef::from_storage(self.rows, self.cols, self.array())
    }

    pub(crate) fn check_same_shape<U, S2: AsRef<[Vec<U>]>>(
        &self,
        op: &'static str,
        other: &Matrix<U, S2>,
    ) -> Result<()> {
        if self.is_same_shape(other) {
            Ok(())
        } else {
            Err(MatrixError::ShapeMismatch {
                op,
                lhs: self.shape(),
                rhs: other.shape(),
            })
        }
    }

    pub(crate) fn check_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl<T, S: AsMut<[Vec<T>]>> Matrix<T, S> {
    /// Mutable access to the backing rows. Rows are handed out as slices so
    /// their length cannot change.
    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        self.data.as_mut().iter_mut().map(Vec::as_mut_slice)
    }

    pub(crate) fn array_mut(&mut self) -> &mut [Vec<T>] {
        self.data.as_mut()
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Self::from_storage(self.rows, self.cols, self.data.clone())
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T> {
    fn from(value: [[T; C]; R]) -> Self {
        Self::from_storage(R, C, value.into_iter().map(Vec::from).collect())
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = MatrixError;

    fn try_from(value: Vec<Vec<T>>) -> Result<Self> {
        Self::from_rows(value)
    }
}

impl<T> From<Matrix<T>> for Vec<Vec<T>> {
    fn from(value: Matrix<T>) -> Self {
        value.into_rows()
    }
}

impl<T, S, S2> PartialEq<Matrix<T, S2>> for Matrix<T, S>
where
    T: PartialEq,
    S: AsRef<[Vec<T>]>,
    S2: AsRef<[Vec<T>]>,
{
    fn eq(&self, other: &Matrix<T, S2>) -> bool {
        self.shape() == other.shape() && self.array() == other.array()
    }
}

impl<T: Eq, S: AsRef<[Vec<T>]>> Eq for Matrix<T, S> {}

impl<T: Hash, S: AsRef<[Vec<T>]>> Hash for Matrix<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.cols.hash(state);
        self.array()
            .iter()
            .flatten()
            .for_each(|value| value.hash(state));
    }
}

impl<T: Display, S: AsRef<[Vec<T>]>> Display for Matrix<T, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.array().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            if let Some((first, rest)) = row.split_first() {
                write!(f, "{first}")?;
                rest.iter().try_for_each(|value| write!(f, ", {value}"))?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
