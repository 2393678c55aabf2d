mod misc;
mod parallel;
mod seq;

pub use misc::{checked_area, first_ragged, is_sub_range};
pub use parallel::{
    for_each_index, for_each_row_mut, is_parallelable, map_rows, parallelism, set_parallelism,
    try_map_rows, with_parallelism, Parallelism, UnknownParallelism, MIN_COUNT_FOR_PARALLEL,
    PARALLELISM_ENV,
};
pub use seq::LazySeq;
