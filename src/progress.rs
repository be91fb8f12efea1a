use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    completed: AtomicUsize,
    total: AtomicUsize,
}

/// Shared run progress. Written by the worker, read by any number of observers.
///
/// Reads never wait on writes; an observer may see a value one step behind.
#[derive(Debug, Clone, Default)]
pub struct RunProgress {
    inner: Arc<Counters>,
}

impl RunProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to 0/0 at the start of a run.
    pub fn reset(&self) {
        self.inner.completed.store(0, Ordering::Release);
        self.inner.total.store(0, Ordering::Release);
    }

    /// Fix the total once discovery is done.
    pub fn begin(&self, total: usize) {
        self.inner.completed.store(0, Ordering::Release);
        self.inner.total.store(total, Ordering::Release);
    }

    /// Record that `completed` tasks have produced an outcome. Never moves backwards.
    pub fn advance(&self, completed: usize) {
        let total = self.inner.total.load(Ordering::Acquire);
        self.inner
            .completed
            .fetch_max(completed.min(total), Ordering::AcqRel);
    }

    pub fn completed(&self) -> usize {
        self.inner.completed.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.inner.total.load(Ordering::Acquire)
    }

    /// Percentage in `[0, 100]`; an empty run stays at 0.
    pub fn percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let completed = self.completed().min(total);
        completed as f64 / total as f64 * 100.0
    }

    pub fn is_finished(&self) -> bool {
        let total = self.total();
        total > 0 && self.completed() == total
    }
}
