use crate::{
    access::check_range,
    error::{MatrixError, Result},
    matrix::{Matrix, MatrixRef},
    scalar::Scalar,
};
use core::ops::Range;
use util::{
    checked_area, for_each_index, for_each_row_mut, is_parallelable, izip_eq, map_rows,
    try_map_rows,
};

impl<T: Clone + Send + Sync, S: AsRef<[Vec<T>]>> Matrix<T, S> {
    pub fn map<F>(&self, f: F) -> Matrix<T>
    where
        F: Fn(T) -> T + Sync + Send,
    {
        self.map_to(f)
    }

    /// Maps every element into a matrix of another element kind.
    pub fn map_to<U, F>(&self, f: F) -> Matrix<U>
    where
        U: Send,
        F: Fn(T) -> U + Sync + Send,
    {
        let parallel = is_parallelable(self.count());
        let data = map_rows(self.array(), parallel, |_, row| {
            row.iter().cloned().map(&f).collect()
        });
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    /// Fallible [`Matrix::map_to`], returning the first error of `f`.
    pub fn try_map<U, E, F>(&self, f: F) -> core::result::Result<Matrix<U>, E>
    where
        U: Send,
        E: Send,
        F: Fn(T) -> core::result::Result<U, E> + Sync + Send,
    {
        let parallel = is_parallelable(self.count());
        let data = try_map_rows(self.array(), parallel, |_, row| {
            row.iter().cloned().map(&f).collect()
        })?;
        Ok(Matrix::from_parts(self.rows(), self.cols(), data))
    }

    /// Combines same-shaped matrices element-wise, possibly into a third
    /// element kind.
    pub fn zip_with<U, R, S2, F>(&self, other: &Matrix<U, S2>, f: F) -> Result<Matrix<R>>
    where
        U: Clone + Sync,
        R: Send,
        S2: AsRef<[Vec<U>]>,
        F: Fn(T, U) -> R + Sync + Send,
    {
        self.zip_rows("zip_with", other, f)
    }

    pub fn zip_with3<U, V, R, S2, S3, F>(
        &self,
        b: &Matrix<U, S2>,
        c: &Matrix<V, S3>,
        f: F,
    ) -> Result<Matrix<R>>
    where
        U: Clone + Sync,
        V: Clone + Sync,
        R: Send,
        S2: AsRef<[Vec<U>]>,
        S3: AsRef<[Vec<V>]>,
        F: Fn(T, U, V) -> R + Sync + Send,
    {
        self.check_same_shape("zip_with3", b)?;
        self.check_same_shape("zip_with3", c)?;
        let (b, c) = (b.array(), c.array());
        let parallel = is_parallelable(self.count());
        let data = map_rows(self.array(), parallel, |i, row| {
            izip_eq!(row, &b[i], &c[i])
                .map(|(a, b, c)| f(a.clone(), b.clone(), c.clone()))
                .collect()
        });
        Ok(Matrix::from_parts(self.rows(), self.cols(), data))
    }

    /// Fallible [`Matrix::zip_with`]. Shape mismatches are reported through
    /// `E: From<MatrixError>`.
    pub fn try_zip_with<U, R, S2, E, F>(
        &self,
        other: &Matrix<U, S2>,
        f: F,
    ) -> core::result::Result<Matrix<R>, E>
    where
        U: Clone + Sync,
        R: Send,
        S2: AsRef<[Vec<U>]>,
        E: From<MatrixError> + Send,
        F: Fn(T, U) -> core::result::Result<R, E> + Sync + Send,
    {
        self.check_same_shape("try_zip_with", other)?;
        let other = other.array();
        let parallel = is_parallelable(self.count());
        let data = try_map_rows(self.array(), parallel, |i, row| {
            izip_eq!(row, &other[i])
                .map(|(a, b)| f(a.clone(), b.clone()))
                .collect()
        })?;
        Ok(Matrix::from_parts(self.rows(), self.cols(), data))
    }

    fn zip_rows<U, R, S2, F>(
        &self,
        op: &'static str,
        other: &Matrix<U, S2>,
        f: F,
    ) -> Result<Matrix<R>>
    where
        U: Clone + Sync,
        R: Send,
        S2: AsRef<[Vec<U>]>,
        F: Fn(T, U) -> R + Sync + Send,
    {
        self.check_same_shape(op, other)?;
        let other = other.array();
        let parallel = is_parallelable(self.count());
        let data = map_rows(self.array(), parallel, |i, row| {
            izip_eq!(row, &other[i])
                .map(|(a, b)| f(a.clone(), b.clone()))
                .collect()
        });
        Ok(Matrix::from_parts(self.rows(), self.cols(), data))
    }

    /// Calls `f` on every element. Row-major when run sequentially; once the
    /// work is split across threads the order of calls is unspecified.
    pub fn for_each<F>(&self, f: F)
    where
        F: Fn(&T) + Sync + Send,
    {
        let data = self.array();
        let parallel = is_parallelable(self.count());
        for_each_index(0..self.rows(), parallel, |i| data[i].iter().for_each(&f));
    }

    /// [`Matrix::for_each`] restricted to the cells in `rows x cols`.
    pub fn for_each_region<F>(&self, rows: Range<usize>, cols: Range<usize>, f: F) -> Result<()>
    where
        F: Fn(&T) + Sync + Send,
    {
        check_range(&rows, self.rows())?;
        check_range(&cols, self.cols())?;
        let data = self.array();
        let parallel = is_parallelable(rows.len() * cols.len());
        for_each_index(rows, parallel, |i| {
            data[i][cols.clone()].iter().for_each(&f)
        });
        Ok(())
    }
}

impl<T: Clone + Send + Sync> Matrix<T> {
    /// Folds `matrices` element-wise with `f`, left to right. All of them must
    /// have the same shape; no matrices yields the empty matrix.
    pub fn zip_all<F>(matrices: &[MatrixRef<'_, T>], f: F) -> Result<Self>
    where
        F: Fn(T, T) -> T + Sync + Send,
    {
        Self::zip_cells("zip_all", matrices, |cell| {
            cell[1..].iter().cloned().fold(cell[0].clone(), &f)
        })
    }

    /// Applies `f` to the values of every matrix at each cell, in the order of
    /// `matrices`. All of them must have the same shape; no matrices yields
    /// the empty matrix.
    pub fn zip_all_to<R, F>(matrices: &[MatrixRef<'_, T>], f: F) -> Result<Matrix<R>>
    where
        R: Send,
        F: Fn(&[T]) -> R + Sync + Send,
    {
        Self::zip_cells("zip_all_to", matrices, f)
    }

    fn zip_cells<R, F>(op: &'static str, matrices: &[MatrixRef<'_, T>], f: F) -> Result<Matrix<R>>
    where
        R: Send,
        F: Fn(&[T]) -> R + Sync + Send,
    {
        // Every cell slice holds one value per matrix, so it is never empty.
        let Some(first) = matrices.first() else {
            return Ok(Matrix::empty());
        };
        matrices
            .iter()
            .try_for_each(|m| first.check_same_shape(op, m))?;
        let cells = first.count().saturating_mul(matrices.len());
        let data = map_rows(first.array(), is_parallelable(cells), |i, row| {
            let mut cell = Vec::with_capacity(matrices.len());
            (0..row.len())
                .map(|j| {
                    cell.clear();
                    cell.extend(matrices.iter().map(|m| m.array()[i][j].clone()));
                    f(&cell)
                })
                .collect()
        });
        Ok(Matrix::from_parts(first.rows(), first.cols(), data))
    }
}

impl<T, S: AsRef<[Vec<T>]>> Matrix<T, S> {
    /// Calls `f` on every element in row-major order, stopping at the first error.
    pub fn try_for_each<E, F>(&self, f: F) -> core::result::Result<(), E>
    where
        F: FnMut(&T) -> core::result::Result<(), E>,
    {
        self.array().iter().flatten().try_for_each(f)
    }
}

impl<T: Scalar, S: AsRef<[Vec<T>]>> Matrix<T, S> {
    pub fn add<S2: AsRef<[Vec<T>]>>(&self, other: &Matrix<T, S2>) -> Result<Matrix<T>> {
        self.zip_rows("add", other, T::plus)
    }

    pub fn subtract<S2: AsRef<[Vec<T>]>>(&self, other: &Matrix<T, S2>) -> Result<Matrix<T>> {
        self.zip_rows("subtract", other, T::minus)
    }

    /// Matrix product `self * other`.
    pub fn multiply<S2: AsRef<[Vec<T>]>>(&self, other: &Matrix<T, S2>) -> Result<Matrix<T>> {
        if self.cols() != other.rows() {
            return Err(MatrixError::InnerDimensionMismatch {
                lhs_cols: self.cols(),
                rhs_rows: other.rows(),
            });
        }
        let (cols, rhs) = (other.cols(), other.array());
        let cells = checked_area(self.count(), cols).unwrap_or(usize::MAX);
        let parallel = is_parallelable(cells);
        let data = map_rows(self.array(), parallel, |_, lhs| {
            (0..cols)
                .map(|j| {
                    lhs.iter()
                        .zip(rhs)
                        .fold(T::zero(), |acc, (a, row)| acc.plus(a.times(row[j])))
                })
                .collect()
        });
        Ok(Matrix::from_parts(self.rows(), cols, data))
    }
}

impl<T, S> Matrix<T, S>
where
    T: Clone + Send + Sync,
    S: AsRef<[Vec<T>]> + AsMut<[Vec<T>]>,
{
    /// Replaces every element `v` with `f(v)` in place.
    pub fn update_all<F>(&mut self, f: F)
    where
        F: Fn(T) -> T + Sync + Send,
    {
        let parallel = is_parallelable(self.count());
        for_each_row_mut(self.array_mut(), parallel, |_, row| {
            row.iter_mut().for_each(|v| *v = f(v.clone()))
        });
    }

    /// Replaces the element at `(i, j)` with `f(i, j)` in place.
    pub fn update_all_indexed<F>(&mut self, f: F)
    where
        F: Fn(usize, usize) -> T + Sync + Send,
    {
        let parallel = is_parallelable(self.count());
        for_each_row_mut(self.array_mut(), parallel, |i, row| {
            row.iter_mut().enumerate().for_each(|(j, v)| *v = f(i, j))
        });
    }

    /// Fallible [`Matrix::update_all`]. Either every element is updated or,
    /// when `f` fails, none is.
    pub fn try_update_all<E, F>(&mut self, f: F) -> core::result::Result<(), E>
    where
        E: Send,
        F: Fn(T) -> core::result::Result<T, E> + Sync + Send,
    {
        let parallel = is_parallelable(self.count());
        let updated = try_map_rows(self.array(), parallel, |_, row| {
            row.iter().cloned().map(&f).collect::<core::result::Result<Vec<_>, E>>()
        })?;
        self.array_mut()
            .iter_mut()
            .zip(updated)
            .for_each(|(row, values)| *row = values);
        Ok(())
    }

    pub fn replace_if<P>(&mut self, predicate: P, value: T)
    where
        P: Fn(&T) -> bool + Sync + Send,
    {
        let parallel = is_parallelable(self.count());
        for_each_row_mut(self.array_mut(), parallel, |_, row| {
            row.iter_mut()
                .filter(|v| predicate(v))
                .for_each(|v| *v = value.clone())
        });
    }

    pub fn replace_if_indexed<P>(&mut self, predicate: P, value: T)
    where
        P: Fn(usize, usize) -> bool + Sync + Send,
    {
        let parallel = is_parallelable(self.count());
        for_each_row_mut(self.array_mut(), parallel, |i, row| {
            row.iter_mut()
                .enumerate()
                .filter(|(j, _)| predicate(i, *j))
                .for_each(|(_, v)| *v = value.clone())
        });
    }
}
