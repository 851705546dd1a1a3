//! Rayon-based fan-out/fan-in reductions.
//!
//! Quadrature and truncated series evaluate independent terms over an index
//! range. [`partitioned_sum`] splits that range into contiguous chunks, sums
//! each chunk sequentially on a Rayon worker, returns the partial sums by
//! value and folds them on the calling thread once every worker has joined.
//! No lock is held at any point.
//!
//! Floating-point addition is not associative, so results may differ in the
//! last bits between worker counts. Tests compare against a tolerance band.

use std::ops::Range;

use rayon::prelude::*;

use crate::traits::Real;

/// Minimum number of terms before a reduction is fanned out.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// Configuration for partitioned reductions.
///
/// # Examples
/// ```
/// use quant_math::parallel::ParallelConfig;
///
/// let config = ParallelConfig::new(4, 1_000);
/// assert!(!config.should_parallelize(999));
/// assert!(config.should_parallelize(1_000));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelConfig {
    /// Number of contiguous chunks the index range is split into
    pub workers: usize,
    /// Minimum number of terms before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: rayon::current_num_threads(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(workers: usize, parallel_threshold: usize) -> Self {
        Self {
            workers: workers.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that always runs on the calling thread.
    pub fn sequential() -> Self {
        Self {
            workers: 1,
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns whether to use parallel processing for the given term count.
    #[inline]
    pub fn should_parallelize(&self, n_terms: usize) -> bool {
        self.workers > 1 && n_terms >= self.parallel_threshold
    }
}

/// Sums `term(i)` for every `i` in `range`.
///
/// When the range is large enough it is statically partitioned into
/// `config.workers` contiguous chunks. Each chunk produces an independent
/// partial sum; partials are combined in chunk order after the parallel
/// region completes.
///
/// # Examples
/// ```
/// use quant_math::parallel::{partitioned_sum, ParallelConfig};
///
/// let config = ParallelConfig::new(4, 1);
/// let total: f64 = partitioned_sum(1..101, &config, |i| i as f64);
/// assert_eq!(total, 5050.0);
/// ```
pub fn partitioned_sum<T, F>(range: Range<usize>, config: &ParallelConfig, term: F) -> T
where
    T: Real,
    F: Fn(usize) -> T + Sync + Send,
{
    let n_terms = range.len();
    if n_terms == 0 {
        return T::zero();
    }
    if !config.should_parallelize(n_terms) {
        return sequential_sum(range, &term);
    }

    let workers = config.workers.min(n_terms);
    let chunk = n_terms.div_ceil(workers);
    let start = range.start;
    let end = range.end;

    let partials: Vec<T> = (0..workers)
        .into_par_iter()
        .map(|w| {
            let lo = start + w * chunk;
            let hi = (lo + chunk).min(end);
            sequential_sum(lo..hi, &term)
        })
        .collect();

    tracing::trace!(workers, n_terms, "folded partitioned sum");
    partials.into_iter().fold(T::zero(), |acc, p| acc + p)
}

#[inline]
fn sequential_sum<T, F>(range: Range<usize>, term: &F) -> T
where
    T: Real,
    F: Fn(usize) -> T,
{
    range.fold(T::zero(), |acc, i| acc + term(i))
}
