//! TimerService - deferred one-shot tasks on a dedicated worker thread
//!
//! Replaces one sleeping thread per timer with a single worker that waits
//! on a deadline-ordered queue. Shutdown is deterministic: the worker is
//! joined and every task that has not fired yet is dropped unrun.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::application::ports::{DeferredTask, Scheduler};
use crate::domain::errors::QuickSwitchError;

struct PendingTask {
    due: Instant,
    /// Tie-breaker so tasks with equal deadlines run in schedule order
    seq: u64,
    task: DeferredTask,
}

impl PartialEq for PendingTask {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for PendingTask {}

impl PartialOrd for PendingTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingTask {
    // Reversed: BinaryHeap is a max-heap, the earliest deadline must pop first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct TimerQueue {
    pending: BinaryHeap<PendingTask>,
    next_seq: u64,
    shutdown: bool,
}

#[derive(Default)]
struct TimerShared {
    queue: Mutex<TimerQueue>,
    wakeup: Condvar,
}

/// Single-worker deferred task service
pub struct TimerService {
    shared: Arc<TimerShared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TimerService {
    /// Start the worker thread
    pub fn start() -> Result<Self, QuickSwitchError> {
        let shared = Arc::new(TimerShared::default());
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("quick-switch-timer".into())
            .spawn(move || run_worker(&worker_shared))?;

        info!("Timer service started");
        Ok(Self {
            shared,
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Number of tasks waiting for their deadline
    pub fn pending_count(&self) -> usize {
        self.shared.queue.lock().pending.len()
    }

    /// Stop the worker and drop every task that has not run yet
    ///
    /// Safe to call more than once.
    pub fn shutdown(&self) {
        let dropped = {
            let mut queue = self.shared.queue.lock();
            queue.shutdown = true;
            let dropped = queue.pending.len();
            queue.pending.clear();
            dropped
        };
        self.shared.wakeup.notify_all();

        if let Some(worker) = self.worker.lock().take() {
            if worker.join().is_err() {
                error!("Timer worker panicked");
            }
            info!(dropped, "Timer service stopped");
        }
    }
}

impl Scheduler for TimerService {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        let mut queue = self.shared.queue.lock();
        if queue.shutdown {
            debug!("Timer service stopped; dropping task");
            return;
        }

        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.pending.push(PendingTask {
            due: Instant::now() + delay,
            seq,
            task,
        });
        drop(queue);

        self.shared.wakeup.notify_one();
    }
}

impl<T: Scheduler + ?Sized> Scheduler for Arc<T> {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        (**self).schedule(delay, task)
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(shared: &TimerShared) {
    let mut queue = shared.queue.lock();
    loop {
        if queue.shutdown {
            break;
        }

        let next_due = queue.pending.peek().map(|t| t.due);
        match next_due {
            None => shared.wakeup.wait(&mut queue),
            Some(due) if due <= Instant::now() => {
                if let Some(pending) = queue.pending.pop() {
                    // Never run a task while holding the queue lock
                    MutexGuard::unlocked(&mut queue, || run_task(pending.task));
                }
            }
            Some(due) => {
                shared.wakeup.wait_until(&mut queue, due);
            }
        }
    }
}

fn run_task(task: DeferredTask) {
    if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
        error!("Deferred task panicked");
    }
}
