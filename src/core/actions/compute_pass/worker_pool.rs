use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken};
use crate::core::actions::compute_pass::completion_latch::{
    CompletionLatch, CountDownOnDrop, LatchWaitError,
};
use crate::core::actions::compute_pass::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::grid::Grid;
use crate::core::data::point::Point;
use crate::core::util::strided_rows::partition_rows_mut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerPoolError {
    ZeroWorkers,
    Build(String),
}

impl fmt::Display for WorkerPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWorkers => write!(f, "worker count must be greater than zero"),
            Self::Build(message) => write!(f, "error creating worker pool: {}", message),
        }
    }
}

impl Error for WorkerPoolError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComputePassError {
    Cancelled,
    TimedOut { after: Duration },
}

impl fmt::Display for ComputePassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "computation pass cancelled"),
            Self::TimedOut { after } => write!(f, "computation pass timed out after {:?}", after),
        }
    }
}

impl Error for ComputePassError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub worker_count: usize,
    pub resolution: usize,
    pub elapsed: Duration,
}

/// Fixed set of worker threads that fill a [`Grid`] one pass at a time.
///
/// The threads live as long as the pool. Each pass hands worker `t` the rows
/// `t, t + N, t + 2N, ...` as disjoint mutable slices, then blocks the caller
/// on a [`CompletionLatch`] until every worker has reported in.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    worker_count: NonZeroUsize,
}

impl WorkerPool {
    pub fn new(worker_count: usize) -> Result<Self, WorkerPoolError> {
        let worker_count = NonZeroUsize::new(worker_count).ok_or(WorkerPoolError::ZeroWorkers)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count.get())
            .thread_name(|index| format!("mbset-worker-{}", index))
            .build()
            .map_err(|err| WorkerPoolError::Build(err.to_string()))?;

        tracing::debug!(workers = worker_count.get(), "worker pool started");

        Ok(Self { pool, worker_count })
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.worker_count.get()
    }

    /// Overwrites every cell of `grid` with `algorithm`'s result.
    ///
    /// On `Err` the pass was abandoned part-way and `grid` holds a mix of old
    /// and new cells; callers must not publish it.
    pub fn compute_all<Alg, C>(
        &self,
        algorithm: &Alg,
        grid: &mut Grid,
        cancel: &C,
        deadline: Option<Instant>,
    ) -> Result<PassReport, ComputePassError>
    where
        Alg: FractalAlgorithm + Sync,
        C: CancelToken,
    {
        let start = Instant::now();
        let resolution = grid.resolution();
        let latch = CompletionLatch::new(self.worker_count.get());
        let abort = AtomicBool::new(false);
        let interrupted = AtomicBool::new(false);
        let assignments = partition_rows_mut(grid.rows_mut(), self.worker_count);

        let waited = self.pool.in_place_scope(|scope| {
            for (worker, rows) in assignments.into_iter().enumerate() {
                let latch = &latch;
                let abort = &abort;
                let interrupted = &interrupted;

                scope.spawn(move |_| {
                    let _done = CountDownOnDrop(latch);
                    let stop = || abort.load(Ordering::Relaxed) || cancel.is_cancelled();

                    tracing::trace!(worker, rows = rows.len(), "worker started");

                    for (y, row) in rows {
                        for (x, cell) in row.iter_mut().enumerate() {
                            if x % CANCEL_CHECK_INTERVAL_PIXELS == 0 && stop() {
                                interrupted.store(true, Ordering::Relaxed);
                                return;
                            }

                            *cell = algorithm.compute(Point {
                                x: x as u32,
                                y: y as u32,
                            });
                        }
                    }
                });
            }

            let waited = latch.wait_until(cancel, deadline);

            if waited.is_err() {
                abort.store(true, Ordering::Relaxed);
            }

            waited
        });

        let elapsed = start.elapsed();

        // The latch also releases when every worker bailed out early on the
        // cancel token, so a released latch alone does not mean a full grid.
        let waited = match waited {
            Ok(()) if interrupted.load(Ordering::Relaxed) => Err(LatchWaitError::Cancelled),
            other => other,
        };

        match waited {
            Ok(()) => Ok(PassReport {
                worker_count: self.worker_count.get(),
                resolution,
                elapsed,
            }),
            Err(LatchWaitError::Cancelled) => Err(ComputePassError::Cancelled),
            Err(LatchWaitError::TimedOut) => Err(ComputePassError::TimedOut { after: elapsed }),
        }
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("worker_count", &self.worker_count)
            .finish_non_exhaustive()
    }
}
