use std::iter::StepBy;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Rows owned by `worker`: `worker, worker + worker_count, ...` below `resolution`.
pub fn strided_rows(
    worker: usize,
    worker_count: NonZeroUsize,
    resolution: usize,
) -> StepBy<Range<usize>> {
    (worker..resolution).step_by(worker_count.get())
}

/// Deals rows out to workers round-robin, so worker `t` receives exactly the
/// rows of [`strided_rows`]`(t, ...)`, each paired with its row index.
pub fn partition_rows_mut<'a, T: 'a>(
    rows: impl Iterator<Item = &'a mut [T]>,
    worker_count: NonZeroUsize,
) -> Vec<Vec<(usize, &'a mut [T])>> {
    let mut assignments: Vec<Vec<(usize, &'a mut [T])>> =
        (0..worker_count.get()).map(|_| Vec::new()).collect();

    for (y, row) in rows.enumerate() {
        assignments[y % worker_count.get()].push((y, row));
    }

    assignments
}
