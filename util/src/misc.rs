use core::ops::Range;

/// Number of cells in a `rows x cols` grid, `None` on overflow.
pub fn checked_area(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols)
}

/// Whether `range` is a valid sub-range of `0..len`.
pub fn is_sub_range(range: &Range<usize>, len: usize) -> bool {
    range.start <= range.end && range.end <= len
}

/// Index of the first row whose length differs from the first row, if any.
pub fn first_ragged<T, R: AsRef<[T]>>(rows: &[R]) -> Option<usize> {
    let cols = rows.first()?.as_ref().len();
    rows.iter().position(|row| row.as_ref().len() != cols)
}

#[macro_export]
macro_rules! izip_eq {
    (@closure $p:pat => $tup:expr) => {
        |$p| $tup
    };
    (@closure $p:pat => ($($tup:tt)*) , $_iter:expr $(, $tail:expr)*) => {
        $crate::izip_eq!(@closure ($p, b) => ($($tup)*, b) $(, $tail)*)
    };
    ($first:expr $(,)*) => {
        itertools::__std_iter::IntoIterator::into_iter($first)
    };
    ($first:expr, $second:expr $(,)*) => {
        itertools::Itertools::zip_eq($crate::izip_eq!($first), $second)
    };
    ($first:expr $(, $rest:expr)* $(,)*) => {{
        let t = $crate::izip_eq!($first);
        $(let t = $crate::izip_eq!(t, $rest);)*
        t.map($crate::izip_eq!(@closure a => (a) $(, $rest)*))
    }};
}
