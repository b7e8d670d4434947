use std::error::Error;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::core::actions::cancellation::CancelToken;

/// Upper bound on how long the waiting thread sleeps before re-checking its
/// cancel token. Count-downs still wake it immediately.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LatchWaitError {
    Cancelled,
    TimedOut,
}

impl fmt::Display for LatchWaitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "wait for workers was cancelled"),
            Self::TimedOut => write!(f, "workers did not finish before the deadline"),
        }
    }
}

impl Error for LatchWaitError {}

/// One-shot countdown latch: created with the number of workers in a pass,
/// released once each of them has counted down.
#[derive(Debug)]
pub struct CompletionLatch {
    remaining: Mutex<usize>,
    released: Condvar,
}

impl CompletionLatch {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            remaining: Mutex::new(count),
            released: Condvar::new(),
        }
    }

    pub fn count_down(&self) {
        let mut remaining = self.lock();

        if *remaining == 0 {
            return;
        }

        *remaining -= 1;

        if *remaining == 0 {
            self.released.notify_all();
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        *self.lock()
    }

    /// Blocks until the count reaches zero.
    pub fn wait(&self) {
        let mut remaining = self.lock();

        while *remaining > 0 {
            remaining = self
                .released
                .wait(remaining)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until the count reaches zero, `cancel` fires, or `deadline`
    /// passes, whichever comes first. A released latch wins over both.
    pub fn wait_until<C: CancelToken>(
        &self,
        cancel: &C,
        deadline: Option<Instant>,
    ) -> Result<(), LatchWaitError> {
        let mut remaining = self.lock();

        loop {
            if *remaining == 0 {
                return Ok(());
            }

            if cancel.is_cancelled() {
                return Err(LatchWaitError::Cancelled);
            }

            let mut slice = CANCEL_POLL_INTERVAL;

            if let Some(deadline) = deadline {
                let left = deadline.saturating_duration_since(Instant::now());

                if left.is_zero() {
                    return Err(LatchWaitError::TimedOut);
                }

                slice = slice.min(left);
            }

            remaining = self
                .released
                .wait_timeout(remaining, slice)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.remaining.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Counts the latch down when dropped, so a worker releases its slot even if
/// it unwinds.
pub struct CountDownOnDrop<'a>(pub &'a CompletionLatch);

impl Drop for CountDownOnDrop<'_> {
    fn drop(&mut self) {
        self.0.count_down();
    }
}
