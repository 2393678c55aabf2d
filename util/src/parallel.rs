//! Sequential or data-parallel execution of per-row work.
//!
//! Whether a workload runs in parallel is decided by [`is_parallelable`] from
//! its cell count and the [`Parallelism`] in effect on the calling thread.
//! Rows are the unit of parallel work, so every output row is produced by
//! exactly one worker; only the order in which side effects happen across rows
//! is left unspecified.

use core::{cell::Cell, fmt, ops::Range, str::FromStr};
use std::sync::OnceLock;

/// Cell count above which [`Parallelism::Default`] switches to parallel execution.
pub const MIN_COUNT_FOR_PARALLEL: usize = 8192;

/// Environment variable holding the process-wide [`Parallelism`].
pub const PARALLELISM_ENV: &str = "PRIMAT_PARALLELISM";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Parallelism {
    /// Always run in parallel.
    Yes,
    /// Always run sequentially.
    No,
    /// Run in parallel once a workload exceeds [`MIN_COUNT_FOR_PARALLEL`] cells.
    #[default]
    Default,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown parallelism {0:?}, expected one of \"yes\", \"no\", \"default\"")]
pub struct UnknownParallelism(pub String);

impl FromStr for Parallelism {
    type Err = UnknownParallelism;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "default" | "" => Ok(Self::Default),
            _ => Err(UnknownParallelism(s.to_owned())),
        }
    }
}

impl fmt::Display for Parallelism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

thread_local! {
    static PARALLELISM: Cell<Option<Parallelism>> = const { Cell::new(None) };
}

fn process_default() -> Parallelism {
    static DEFAULT: OnceLock<Parallelism> = OnceLock::new();
    *DEFAULT.get_or_init(|| {
        let parallelism = match std::env::var(PARALLELISM_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                log::warn!("{PARALLELISM_ENV}: {err}, falling back to default");
                Parallelism::Default
            }),
            Err(_) => Parallelism::Default,
        };
        log::debug!("process-wide parallelism resolved to {parallelism}");
        parallelism
    })
}

/// Overrides the parallelism for the calling thread.
pub fn set_parallelism(parallelism: Parallelism) {
    PARALLELISM.with(|cell| cell.set(Some(parallelism)));
}

/// Parallelism in effect on the calling thread.
pub fn parallelism() -> Parallelism {
    PARALLELISM
        .with(Cell::get)
        .unwrap_or_else(process_default)
}

/// Runs `f` with `parallelism` in effect on the calling thread, restoring the
/// previous setting afterwards (also on unwind).
pub fn with_parallelism<R>(parallelism: Parallelism, f: impl FnOnce() -> R) -> R {
    struct Restore(Option<Parallelism>);

    impl Drop for Restore {
        fn drop(&mut self) {
            PARALLELISM.with(|cell| cell.set(self.0));
        }
    }

    let _restore = Restore(PARALLELISM.with(|cell| cell.replace(Some(parallelism))));
    f()
}

/// Whether a workload of `cells` cells should run in parallel.
pub fn is_parallelable(cells: usize) -> bool {
    let parallel = cfg!(feature = "parallel")
        && match parallelism() {
            Parallelism::Yes => true,
            Parallelism::No => false,
            Parallelism::Default => cells > MIN_COUNT_FOR_PARALLEL,
        };
    log::trace!(
        "{cells} cells run {}",
        if parallel { "in parallel" } else { "sequentially" }
    );
    parallel
}

#[cfg(feature = "parallel")]
fn log_split(units: usize) {
    log::debug!(
        "splitting {units} rows across {} workers",
        rayon::current_num_threads()
    );
}

/// Applies `f(i, &mut rows[i])` to every row.
pub fn for_each_row_mut<R, F>(rows: &mut [R], parallel: bool, f: F)
where
    R: Send,
    F: Fn(usize, &mut R) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            log_split(rows.len());
            rows.par_iter_mut().enumerate().for_each(|(i, row)| f(i, row));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    rows.iter_mut().enumerate().for_each(|(i, row)| f(i, row));
}

/// Maps every row to one output, preserving row order.
pub fn map_rows<R, U, F>(rows: &[R], parallel: bool, f: F) -> Vec<U>
where
    R: Sync,
    U: Send,
    F: Fn(usize, &R) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            log_split(rows.len());
            return rows.par_iter().enumerate().map(|(i, row)| f(i, row)).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    rows.iter().enumerate().map(|(i, row)| f(i, row)).collect()
}

/// Fallible [`map_rows`]. Returns the first error encountered; in parallel
/// mode other rows may still have been evaluated.
pub fn try_map_rows<R, U, E, F>(rows: &[R], parallel: bool, f: F) -> Result<Vec<U>, E>
where
    R: Sync,
    U: Send,
    E: Send,
    F: Fn(usize, &R) -> Result<U, E> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            log_split(rows.len());
            return rows.par_iter().enumerate().map(|(i, row)| f(i, row)).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    rows.iter().enumerate().map(|(i, row)| f(i, row)).collect()
}

/// Runs `f(i)` for every `i` in `range`.
pub fn for_each_index<F>(range: Range<usize>, parallel: bool, f: F)
where
    F: Fn(usize) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            log_split(range.len());
            range.into_par_iter().for_each(f);
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    range.for_each(f);
}

#[cfg(test)]
mod test {
    use crate::parallel::{
        for_each_index, for_each_row_mut, is_parallelable, map_rows, parallelism,
        set_parallelism, try_map_rows, with_parallelism, Parallelism, MIN_COUNT_FOR_PARALLEL,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn parse() {
        assert_eq!("YES".parse(), Ok(Parallelism::Yes));
        assert_eq!(" no ".parse(), Ok(Parallelism::No));
        assert_eq!("default".parse(), Ok(Parallelism::Default));
        assert!("sometimes".parse::<Parallelism>().is_err());
        for p in [Parallelism::Yes, Parallelism::No, Parallelism::Default] {
            assert_eq!(p.to_string().parse(), Ok(p));
        }
    }

    #[test]
    fn thread_override() {
        with_parallelism(Parallelism::No, || {
            assert_eq!(parallelism(), Parallelism::No);
            assert!(!is_parallelable(usize::MAX));
            with_parallelism(Parallelism::Yes, || {
                assert_eq!(parallelism(), Parallelism::Yes);
                assert_eq!(is_parallelable(1), cfg!(feature = "parallel"));
            });
            assert_eq!(parallelism(), Parallelism::No);
        });
        with_parallelism(Parallelism::Default, || {
            assert!(!is_parallelable(MIN_COUNT_FOR_PARALLEL));
            assert_eq!(
                is_parallelable(MIN_COUNT_FOR_PARALLEL + 1),
                cfg!(feature = "parallel")
            );
        });
    }

    #[test]
    fn set_is_thread_local() {
        std::thread::spawn(|| {
            set_parallelism(Parallelism::Yes);
            assert_eq!(parallelism(), Parallelism::Yes);
        })
        .join()
        .unwrap();
        std::thread::spawn(|| {
            set_parallelism(Parallelism::No);
            assert_eq!(parallelism(), Parallelism::No);
        })
        .join()
        .unwrap();
    }

    #[test]
    fn dispatch_agrees() {
        let rows = (0..64).map(|i| vec![i; 16]).collect::<Vec<_>>();
        for parallel in [false, true] {
            let sums = map_rows(&rows, parallel, |i, row| i + row.iter().sum::<usize>());
            assert_eq!(sums, (0..64).map(|i| i * 17).collect::<Vec<_>>());

            let mut doubled = rows.clone();
            for_each_row_mut(&mut doubled, parallel, |_, row| {
                row.iter_mut().for_each(|v| *v *= 2)
            });
            assert!(doubled.iter().enumerate().all(|(i, row)| row == &vec![2 * i; 16]));

            let failed = try_map_rows(&rows, parallel, |i, _| if i == 40 { Err(i) } else { Ok(i) });
            assert_eq!(failed, Err(40));

            let visited = AtomicUsize::new(0);
            for_each_index(3..67, parallel, |i| {
                visited.fetch_add(i, Ordering::Relaxed);
            });
            assert_eq!(visited.into_inner(), (3..67).sum::<usize>());
        }
    }
}
