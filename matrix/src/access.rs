use crate::{
    error::{MatrixError, Result},
    matrix::Matrix,
    point::{Direction, Point},
};
use core::ops::Range;
use util::is_sub_range;

pub(crate) fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if is_sub_range(range, len) {
        Ok(())
    } else {
        Err(MatrixError::RangeOutOfBounds {
            start: range.start,
            end: range.end,
            len,
        })
    }
}

impl<T, S: AsRef<[Vec<T>]>> Matrix<T, S> {
    /// Panics when `(i, j)` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> T
    where
        T: Clone,
    {
        self.array()[i][j].clone()
    }

    pub fn get_at(&self, point: Point) -> T
    where
        T: Clone,
    {
        self.get(point.row, point.col)
    }

    /// The row as a slice of the backing storage.
    pub fn row(&self, i: usize) -> &[T] {
        &self.array()[i]
    }

    /// A copy of column `j`; columns are not contiguous so they cannot be borrowed.
    pub fn column(&self, j: usize) -> Vec<T>
    where
        T: Clone,
    {
        self.array().iter().map(|row| row[j].clone()).collect()
    }

    pub fn neighbor_point(&self, i: usize, j: usize, direction: Direction) -> Option<Point> {
        Point::new(i, j).step(direction, self.rows(), self.cols())
    }

    /// Value of the neighbor of `(i, j)` in `direction`, `None` at the border.
    pub fn neighbor(&self, i: usize, j: usize, direction: Direction) -> Option<T>
    where
        T: Clone,
    {
        self.neighbor_point(i, j, direction)
            .map(|point| self.get_at(point))
    }

    pub fn up_of(&self, i: usize, j: usize) -> Option<T>
    where
        T: Clone,
    {
        self.neighbor(i, j, Direction::Up)
    }

    pub fn down_of(&self, i: usize, j: usize) -> Option<T>
    where
        T: Clone,
    {
        self.neighbor(i, j, Direction::Down)
    }

    pub fn left_of(&self, i: usize, j: usize) -> Option<T>
    where
        T: Clone,
    {
        self.neighbor(i, j, Direction::Left)
    }

    pub fn right_of(&self, i: usize, j: usize) -> Option<T>
    where
        T: Clone,
    {
        self.neighbor(i, j, Direction::Right)
    }

    /// Neighbors in the order up, right, down, left.
    pub fn adjacent4_points(&self, i: usize, j: usize) -> [Option<Point>; 4] {
        Direction::ADJACENT4.map(|direction| self.neighbor_point(i, j, direction))
    }

    /// Neighbors in the order left-up, up, right-up, right, right-down, down,
    /// left-down, left.
    pub fn adjacent8_points(&self, i: usize, j: usize) -> [Option<Point>; 8] {
        Direction::ADJACENT8.map(|direction| self.neighbor_point(i, j, direction))
    }

    /// Main diagonal, top-left to bottom-right.
    pub fn get_lu2rd(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.check_square()?;
        Ok((0..self.rows()).map(|i| self.get(i, i)).collect())
    }

    /// Anti-diagonal, top-right to bottom-left.
    pub fn get_ru2ld(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.check_square()?;
        let n = self.rows();
        Ok((0..n).map(|i| self.get(i, n - 1 - i)).collect())
    }

    pub fn points_lu2rd(&self) -> Result<impl Iterator<Item = Point>> {
        self.check_square()?;
        Ok((0..self.rows()).map(|i| Point::new(i, i)))
    }

    pub fn points_ru2ld(&self) -> Result<impl Iterator<Item = Point>> {
        self.check_square()?;
        let n = self.rows();
        Ok((0..n).map(move |i| Point::new(i, n - 1 - i)))
    }

    /// Every point, row-major.
    pub fn points_h(&self) -> impl Iterator<Item = Point> {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |i| (0..cols).map(move |j| Point::new(i, j)))
    }

    /// Points of the rows in `rows`, row-major.
    pub fn points_h_range(&self, rows: Range<usize>) -> Result<impl Iterator<Item = Point>> {
        check_range(&rows, self.rows())?;
        let cols = self.cols();
        Ok(rows.flat_map(move |i| (0..cols).map(move |j| Point::new(i, j))))
    }

    /// Every point, column-major.
    pub fn points_v(&self) -> impl Iterator<Item = Point> {
        let rows = self.rows();
        (0..self.cols()).flat_map(move |j| (0..rows).map(move |i| Point::new(i, j)))
    }

    pub fn points_v_range(&self, cols: Range<usize>) -> Result<impl Iterator<Item = Point>> {
        check_range(&cols, self.cols())?;
        let rows = self.rows();
        Ok(cols.flat_map(move |j| (0..rows).map(move |i| Point::new(i, j))))
    }

    /// One point sequence per row.
    pub fn points_r(&self) -> impl Iterator<Item = impl Iterator<Item = Point>> {
        let cols = self.cols();
        (0..self.rows()).map(move |i| (0..cols).map(move |j| Point::new(i, j)))
    }

    /// One point sequence per column.
    pub fn points_c(&self) -> impl Iterator<Item = impl Iterator<Item = Point>> {
        let rows = self.rows();
        (0..self.cols()).map(move |j| (0..rows).map(move |i| Point::new(i, j)))
    }
}

impl<T, S: AsRef<[Vec<T>]> + AsMut<[Vec<T>]>> Matrix<T, S> {
    /// Panics when `(i, j)` is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.array_mut()[i][j] = value;
    }

    pub fn set_at(&mut self, point: Point, value: T) {
        self.set(point.row, point.col, value)
    }

    /// Row `i` of the backing storage; writes are visible through [`Matrix::get`].
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.array_mut()[i]
    }

    pub fn set_row(&mut self, i: usize, row: &[T]) -> Result<()>
    where
        T: Clone,
    {
        if row.len() != self.cols() {
            return Err(MatrixError::RowLength {
                expected: self.cols(),
                found: row.len(),
            });
        }
        self.row_mut(i).clone_from_slice(row);
        Ok(())
    }

    pub fn set_column(&mut self, j: usize, column: &[T]) -> Result<()>
    where
        T: Clone,
    {
        if column.len() != self.rows() {
            return Err(MatrixError::ColumnLength {
                expected: self.rows(),
                found: column.len(),
            });
        }
        self.rows_mut()
            .zip(column)
            .for_each(|(row, value)| row[j] = value.clone());
        Ok(())
    }

    pub fn update_row(&mut self, i: usize, mut f: impl FnMut(T) -> T)
    where
        T: Clone,
    {
        self.row_mut(i)
            .iter_mut()
            .for_each(|value| *value = f(value.clone()));
    }

    pub fn update_column(&mut self, j: usize, mut f: impl FnMut(T) -> T)
    where
        T: Clone,
    {
        self.rows_mut()
            .for_each(|row| row[j] = f(row[j].clone()));
    }

    pub fn set_lu2rd(&mut self, diagonal: &[T]) -> Result<()>
    where
        T: Clone,
    {
        self.check_diagonal(diagonal)?;
        self.rows_mut()
            .zip(diagonal)
            .enumerate()
            .for_each(|(i, (row, value))| row[i] = value.clone());
        Ok(())
    }

    pub fn set_ru2ld(&mut self, diagonal: &[T]) -> Result<()>
    where
        T: Clone,
    {
        self.check_diagonal(diagonal)?;
        let n = self.rows();
        self.rows_mut()
            .zip(diagonal)
            .enumerate()
            .for_each(|(i, (row, value))| row[n - 1 - i] = value.clone());
        Ok(())
    }

    pub fn update_lu2rd(&mut self, mut f: impl FnMut(T) -> T) -> Result<()>
    where
        T: Clone,
    {
        self.check_square()?;
        self.rows_mut()
            .enumerate()
            .for_each(|(i, row)| row[i] = f(row[i].clone()));
        Ok(())
    }

    pub fn update_ru2ld(&mut self, mut f: impl FnMut(T) -> T) -> Result<()>
    where
        T: Clone,
    {
        self.check_square()?;
        let n = self.rows();
        self.rows_mut()
            .enumerate()
            .for_each(|(i, row)| row[n - 1 - i] = f(row[n - 1 - i].clone()));
        Ok(())
    }

    fn check_diagonal(&self, diagonal: &[T]) -> Result<()> {
        self.check_square()?;
        if diagonal.len() != self.rows() {
            return Err(MatrixError::DiagonalLength {
                expected: self.rows(),
                found: diagonal.len(),
            });
        }
        Ok(())
    }
}
