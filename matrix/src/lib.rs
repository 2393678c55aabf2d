mod access;
mod error;
mod factory;
mod matrix;
mod ops;
mod point;
mod scalar;
mod shape;
mod stream;

pub use error::{ErrorKind, MatrixError, Result};
pub use matrix::{Matrix, MatrixMut, MatrixRef};
pub use point::{Direction, Point};
pub use scalar::Scalar;
pub use stream::{ColumnMajor, ColumnStreams, Diagonal, RowMajor, RowStreams};
pub use util::{
    parallelism, set_parallelism, with_parallelism, LazySeq, Parallelism, UnknownParallelism,
    MIN_COUNT_FOR_PARALLEL, PARALLELISM_ENV,
};

macro_rules! impl_aliases {
    ($($name:ident => $t:ty),* $(,)?) => {
        paste::paste! {
            $(pub type [<$name Matrix>] = Matrix<$t>;)*
        }
    };
}

impl_aliases!(
    Boolean => bool,
    Char => char,
    Byte => i8,
    Short => i16,
    Int => i32,
    Long => i64,
    Float => f32,
    Double => f64,
);

#[cfg(test)]
mod test {
    use crate::{BooleanMatrix, ByteMatrix, CharMatrix, DoubleMatrix, IntMatrix, LongMatrix};

    #[test]
    fn aliases() {
        let ints = IntMatrix::range(0, 6).reshape(2, 3).unwrap();
        assert_eq!(ints, IntMatrix::from([[0, 1, 2], [3, 4, 5]]));

        let longs: LongMatrix = ints.widen();
        assert_eq!(longs.add(&longs).unwrap().get(1, 2), 10);

        let bytes = ByteMatrix::from([[-1, 2], [3, -4]]);
        assert_eq!(IntMatrix::from_narrower(bytes.array()), Ok(bytes.widen()));

        let evens: BooleanMatrix = ints.map_to(|v| v % 2 == 0);
        assert_eq!(evens.stream_h().filter(|even| *even).count(), 3);

        let halves: DoubleMatrix = ints.map_to(|v| f64::from(v) / 2.0);
        assert_eq!(halves.get(0, 1), 0.5);

        let letters = CharMatrix::from([['a', 'b'], ['c', 'd']]);
        assert_eq!(letters.transpose().to_string(), "[[a, c], [b, d]]");
        assert_eq!(letters.map_to(u32::from).get(1, 1), 100);
    }
}
