//! Single-shot delayed tasks where a newer schedule replaces the older one.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Delay before a search request follows the last keystroke.
pub const SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Delay before an edited note is saved.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

struct Pending {
    handle: JoinHandle<()>,
    /// Set once the delay elapsed and the task body is running.
    fired: Arc<AtomicBool>,
}

/// Runs the most recently scheduled task after `delay`.
///
/// Scheduling again before the delay elapses aborts the waiting task. A task
/// that has already started is left to finish.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Run `task` after the delay unless another task is scheduled first.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            flag.store(true, Ordering::SeqCst);
            task.await;
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Pending { handle, fired });
        if let Some(previous) = previous {
            abort_if_waiting(previous);
        }
    }

    /// Drop the waiting task, if any. Returns whether one was aborted.
    pub fn cancel(&self) -> bool {
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        previous.is_some_and(abort_if_waiting)
    }

    /// Whether a scheduled task has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }
}

fn abort_if_waiting(pending: Pending) -> bool {
    if pending.fired.load(Ordering::SeqCst) {
        return false;
    }
    pending.handle.abort();
    true
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            abort_if_waiting(pending);
        }
    }
}
