use crate::{
    error::{MatrixError, Result},
    matrix::Matrix,
};
use core::iter::{repeat, successors};
use num_traits::PrimInt;
use rand::{
    distributions::{Distribution, Standard},
    RngCore,
};

fn range_len(start: i128, end: i128, by: i128, closed: bool) -> usize {
    let towards_end = if by > 0 { start <= end } else { start >= end };
    if !towards_end || (!closed && start == end) {
        return 0;
    }
    let (span, step) = (start.abs_diff(end), by.unsigned_abs());
    let len = if closed {
        (span / step).saturating_add(1)
    } else {
        (span - 1) / step + 1
    };
    // Allocating this many cells fails long before the length stops fitting in `usize`.
    usize::try_from(len).unwrap_or(usize::MAX)
}

impl<T: Clone> Matrix<T> {
    /// `1 x len` matrix filled with `value`.
    pub fn repeat(value: T, len: usize) -> Self {
        Self::single_row(repeat(value).take(len).collect())
    }

    /// `n x n` matrix holding `main` on its main diagonal and `anti` on its
    /// anti-diagonal, default elsewhere. An empty slice means "absent"; when
    /// both are present they must have the same length. On the center cell
    /// of odd sizes the anti-diagonal wins.
    pub fn diagonal(main: &[T], anti: &[T]) -> Result<Self>
    where
        T: Default,
    {
        if !main.is_empty() && !anti.is_empty() && main.len() != anti.len() {
            return Err(MatrixError::DiagonalsLength {
                main: main.len(),
                anti: anti.len(),
            });
        }
        let n = main.len().max(anti.len());
        let mut data = vec![vec![T::default(); n]; n];
        main.iter()
            .enumerate()
            .for_each(|(i, value)| data[i][i] = value.clone());
        anti.iter()
            .enumerate()
            .for_each(|(i, value)| data[i][n - 1 - i] = value.clone());
        Ok(Self::from_parts(n, n, data))
    }

    pub fn diagonal_lu2rd(main: &[T]) -> Self
    where
        T: Default,
    {
        let n = main.len();
        let data = main
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let mut row = vec![T::default(); n];
                row[i] = value.clone();
                row
            })
            .collect();
        Self::from_parts(n, n, data)
    }

    pub fn diagonal_ru2ld(anti: &[T]) -> Self
    where
        T: Default,
    {
        let n = anti.len();
        let data = anti
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let mut row = vec![T::default(); n];
                row[n - 1 - i] = value.clone();
                row
            })
            .collect();
        Self::from_parts(n, n, data)
    }

    /// Widens every element of rectangular `data` into a freshly allocated
    /// matrix, e.g. `i8`/`i16` rows into an `i32` matrix.
    pub fn from_narrower<U, R>(data: &[R]) -> Result<Self>
    where
        U: Clone + Into<T>,
        R: AsRef<[U]>,
    {
        let cols = data.first().map_or(0, |row| row.as_ref().len());
        let data = data
            .iter()
            .enumerate()
            .map(|(row, values)| match values.as_ref() {
                values if values.len() == cols => {
                    Ok(values.iter().cloned().map(Into::into).collect())
                }
                values => Err(MatrixError::RaggedRows {
                    row,
                    expected: cols,
                    found: values.len(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(data.len(), cols, data))
    }

    /// Converts a matrix of optional elements, failing on the first missing one
    /// in row-major order.
    pub fn unbox<S: AsRef<[Vec<Option<T>>]>>(boxed: &Matrix<Option<T>, S>) -> Result<Self> {
        let data = boxed
            .array()
            .iter()
            .enumerate()
            .map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(|(col, value)| {
                        value
                            .clone()
                            .ok_or(MatrixError::MissingElement { row, col })
                    })
                    .collect()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(boxed.rows(), boxed.cols(), data))
    }
}

impl<T: Clone, S: AsRef<[Vec<T>]>> Matrix<T, S> {
    /// Copies into a matrix of a wider element kind.
    pub fn widen<U: From<T>>(&self) -> Matrix<U> {
        let data = self
            .array()
            .iter()
            .map(|row| row.iter().cloned().map(U::from).collect())
            .collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    pub fn boxed(&self) -> Matrix<Option<T>> {
        let data = self
            .array()
            .iter()
            .map(|row| row.iter().cloned().map(Some).collect())
            .collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }
}

impl<T> Matrix<T> {
    /// `rows x cols` matrix sampled from `dist`.
    pub fn sample(
        rows: usize,
        cols: usize,
        dist: impl Distribution<T>,
        rng: &mut impl RngCore,
    ) -> Self {
        if rows == 0 || cols == 0 {
            return Self::empty();
        }
        let data = (0..rows)
            .map(|_| (0..cols).map(|_| dist.sample(&mut *rng)).collect())
            .collect();
        Self::from_parts(rows, cols, data)
    }

    /// `1 x len` matrix of uniformly random values.
    pub fn random(len: usize, rng: &mut impl RngCore) -> Self
    where
        Standard: Distribution<T>,
    {
        Self::sample(1, len, Standard, rng)
    }
}

impl<T: PrimInt + Into<i128>> Matrix<T> {
    /// `1 x n` matrix of `start, start + 1, ..` below `end`.
    pub fn range(start: T, end: T) -> Self {
        Self::stepped(start, end, T::one(), false)
    }

    pub fn range_by(start: T, end: T, by: T) -> Result<Self> {
        Self::check_step(by)?;
        Ok(Self::stepped(start, end, by, false))
    }

    /// Like [`Matrix::range`] with `end` included.
    pub fn range_closed(start: T, end: T) -> Self {
        Self::stepped(start, end, T::one(), true)
    }

    pub fn range_closed_by(start: T, end: T, by: T) -> Result<Self> {
        Self::check_step(by)?;
        Ok(Self::stepped(start, end, by, true))
    }

    fn check_step(by: T) -> Result<()> {
        if by.is_zero() {
            Err(MatrixError::ZeroStep)
        } else {
            Ok(())
        }
    }

    fn stepped(start: T, end: T, by: T, closed: bool) -> Self {
        let len = range_len(start.into(), end.into(), by.into(), closed);
        Self::single_row(
            successors(Some(start), |value| value.checked_add(&by))
                .take(len)
                .collect(),
        )
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::{ErrorKind, MatrixError},
        matrix::Matrix,
    };
    use rand::{distributions::Uniform, thread_rng};

    #[test]
    fn repeat() {
        assert_eq!(Matrix::repeat(7i64, 3), Matrix::from([[7, 7, 7]]));
        assert_eq!(Matrix::repeat(true, 0), Matrix::empty());
    }

    #[test]
    fn range() {
        assert_eq!(Matrix::range(2, 6), Matrix::from([[2, 3, 4, 5]]));
        assert_eq!(Matrix::range(6, 2), Matrix::<i32>::empty());
        assert_eq!(Matrix::range(3, 3), Matrix::<i32>::empty());
        assert_eq!(Matrix::range_by(0, 10, 3), Ok(Matrix::from([[0, 3, 6, 9]])));
        assert_eq!(Matrix::range_by(10, 0, -4), Ok(Matrix::from([[10, 6, 2]])));
        assert_eq!(Matrix::range_by(0, 10, -1), Ok(Matrix::empty()));
        assert_eq!(Matrix::range_closed(1u8, 3), Matrix::from([[1, 2, 3]]));
        assert_eq!(Matrix::range_closed(4, 4), Matrix::from([[4]]));
        assert_eq!(Matrix::range_closed_by(0, 9, 3), Ok(Matrix::from([[0, 3, 6, 9]])));
        assert_eq!(Matrix::range_closed_by(5, -5, -5), Ok(Matrix::from([[5, 0, -5]])));
        assert_eq!(Matrix::range_by(0, 5, 0), Err(MatrixError::ZeroStep));
        assert_eq!(
            Matrix::range_closed_by(0, 5, 0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn range_near_type_bounds() {
        assert_eq!(
            Matrix::range_closed(i8::MAX - 2, i8::MAX),
            Matrix::from([[125, 126, 127]])
        );
        assert_eq!(
            Matrix::range_closed_by(i64::MIN, i64::MAX, i64::MAX),
            Ok(Matrix::from([[i64::MIN, -1, i64::MAX - 1]]))
        );
        assert_eq!(Matrix::range(u64::MAX - 1, u64::MAX), Matrix::from([[u64::MAX - 1]]));
        assert_eq!(
            Matrix::range_closed_by(i128::MAX, i128::MIN, -i128::MAX),
            Ok(Matrix::from([[i128::MAX, 0, -i128::MAX]]))
        );
        assert_eq!(Matrix::range_by(0, 10, i128::MIN), Ok(Matrix::empty()));
        assert_eq!(
            Matrix::range_by(i128::MIN, i128::MAX, i128::MAX),
            Ok(Matrix::from([[i128::MIN, -1, i128::MAX - 1]]))
        );
        assert_eq!(
            Matrix::range_closed(i128::MAX - 1, i128::MAX),
            Matrix::from([[i128::MAX - 1, i128::MAX]])
        );
    }

    #[test]
    fn diagonal() {
        assert_eq!(
            Matrix::diagonal(&[1, 2, 3], &[]),
            Ok(Matrix::from([[1, 0, 0], [0, 2, 0], [0, 0, 3]]))
        );
        assert_eq!(
            Matrix::diagonal(&[1, 2, 3], &[4, 5, 6]),
            Ok(Matrix::from([[1, 0, 4], [0, 5, 0], [6, 0, 3]]))
        );
        assert_eq!(
            Matrix::diagonal(&[], &[1, 2]),
            Ok(Matrix::from([[0, 1], [2, 0]]))
        );
        assert_eq!(Matrix::<i32>::diagonal(&[], &[]), Ok(Matrix::empty()));
        assert_eq!(
            Matrix::diagonal(&[1, 2], &[1, 2, 3]),
            Err(MatrixError::DiagonalsLength { main: 2, anti: 3 })
        );
        assert_eq!(
            Matrix::diagonal_lu2rd(&[true, true]),
            Matrix::from([[true, false], [false, true]])
        );
        assert_eq!(
            Matrix::diagonal_ru2ld(&[1.5, 2.5]),
            Matrix::from([[0.0, 1.5], [2.5, 0.0]])
        );
        assert_eq!(Matrix::<u8>::diagonal_ru2ld(&[]), Matrix::empty());
    }

    #[test]
    fn from_narrower() {
        let bytes: [[i8; 2]; 2] = [[-1, 2], [3, -4]];
        assert_eq!(
            Matrix::<i32>::from_narrower(&bytes),
            Ok(Matrix::from([[-1, 2], [3, -4]]))
        );
        let ints = vec![vec![i32::MAX], vec![i32::MIN]];
        assert_eq!(
            Matrix::<i64>::from_narrower(&ints),
            Ok(Matrix::from([[i32::MAX as i64], [i32::MIN as i64]]))
        );
        let chars = [['a', 'b']];
        assert_eq!(
            Matrix::<u32>::from_narrower(&chars),
            Ok(Matrix::from([[97, 98]]))
        );
        let ragged = vec![vec![1i16, 2], vec![3]];
        assert_eq!(
            Matrix::<i32>::from_narrower(&ragged),
            Err(MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        let none: [Vec<i16>; 0] = [];
        assert_eq!(Matrix::<i32>::from_narrower(&none), Ok(Matrix::empty()));
    }

    #[test]
    fn widen() {
        let m = Matrix::from([[1u8, 255], [0, 7]]);
        assert_eq!(m.widen::<i32>(), Matrix::from([[1, 255], [0, 7]]));
        assert_eq!(
            Matrix::from([[-1i16, 300]]).widen::<f64>(),
            Matrix::from([[-1.0, 300.0]])
        );
    }

    #[test]
    fn unbox() {
        let boxed = Matrix::from([[Some(1), Some(2)], [Some(3), Some(4)]]);
        assert_eq!(Matrix::unbox(&boxed), Ok(Matrix::from([[1, 2], [3, 4]])));
        assert_eq!(Matrix::from([[1, 2], [3, 4]]).boxed(), boxed);
        let holey = Matrix::from([[Some(1), Some(2)], [None, Some(4)]]);
        assert_eq!(
            Matrix::unbox(&holey),
            Err(MatrixError::MissingElement { row: 1, col: 0 })
        );
    }

    #[test]
    fn random() {
        let mut rng = thread_rng();
        let m = Matrix::<u16>::random(16, &mut rng);
        assert_eq!(m.shape(), (1, 16));
        assert_eq!(Matrix::<bool>::random(0, &mut rng), Matrix::empty());

        let m = Matrix::sample(3, 5, Uniform::new(-3, 3), &mut rng);
        assert_eq!(m.shape(), (3, 5));
        assert!(m.array().iter().flatten().all(|v| (-3..3).contains(v)));
        assert_eq!(Matrix::sample(0, 5, Uniform::new(0, 1), &mut rng), Matrix::empty());
    }
}
