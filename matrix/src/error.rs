/// Broad category of a [`MatrixError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument was rejected before anything was allocated or mutated.
    InvalidArgument,
    /// The matrix is in a state that does not support the operation.
    IllegalState,
    /// A requested index range does not fit the matrix.
    OutOfRange,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{op} requires matrices of the same shape: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("vstack requires the same column count: {lhs} vs {rhs}")]
    ColumnCountMismatch { lhs: usize, rhs: usize },

    #[error("hstack requires the same row count: {lhs} vs {rhs}")]
    RowCountMismatch { lhs: usize, rhs: usize },

    #[error("illegal matrix dimensions for multiply: {lhs_cols} columns vs {rhs_rows} rows")]
    InnerDimensionMismatch { lhs_cols: usize, rhs_rows: usize },

    #[error("row has length {found}, expected {expected}")]
    RowLength { expected: usize, found: usize },

    #[error("column has length {found}, expected {expected}")]
    ColumnLength { expected: usize, found: usize },

    #[error("diagonal has length {found}, expected {expected}")]
    DiagonalLength { expected: usize, found: usize },

    #[error("main and anti diagonals differ in length: {main} vs {anti}")]
    DiagonalsLength { main: usize, anti: usize },

    #[error("step must not be zero")]
    ZeroStep,

    #[error("column count must not be zero")]
    ZeroColumns,

    #[error("repeats must be positive, got {rows} x {cols}")]
    InvalidRepeats { rows: usize, cols: usize },

    #[error("{op} would overflow the addressable dimensions")]
    DimensionOverflow { op: &'static str },

    #[error("matrix must be square to access diagonals, got {rows} x {cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("range {start}..{end} out of bounds for length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("missing element at ({row}, {col})")]
    MissingElement { row: usize, col: usize },
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotSquare { .. } => ErrorKind::IllegalState,
            Self::RangeOutOfBounds { .. } => ErrorKind::OutOfRange,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = core::result::Result<T, MatrixError>;

#[cfg(test)]
mod test {
    use crate::error::{ErrorKind, MatrixError};

    #[test]
    fn kind() {
        let not_square = MatrixError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(not_square.kind(), ErrorKind::IllegalState);
        assert_eq!(
            not_square.to_string(),
            "matrix must be square to access diagonals, got 2 x 3"
        );
        assert_eq!(MatrixError::ZeroStep.kind(), ErrorKind::InvalidArgument);
        let out_of_range = MatrixError::RangeOutOfBounds {
            start: 1,
            end: 4,
            len: 3,
        };
        assert_eq!(out_of_range.kind(), ErrorKind::OutOfRange);
        assert_eq!(out_of_range.to_string(), "range 1..4 out of bounds for length 3");
    }
}
