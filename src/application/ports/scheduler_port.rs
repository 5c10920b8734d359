//! SchedulerPort - deferred, one-shot tasks

use std::time::Duration;

/// A task run once on the scheduler's own execution context
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Port interface for scheduling work after a delay
///
/// Tasks cannot be cancelled; anything a task touches must be re-checked
/// when it runs.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask);
}
