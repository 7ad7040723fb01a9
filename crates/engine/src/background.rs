//! Worker pool for dispatched store operations.
//!
//! A fixed set of named threads takes tasks from a bounded FIFO queue. The
//! async facade hands every store primitive to this pool, so the caller's
//! thread never blocks on storage.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{error, warn};

/// The queue is full or the pool has been shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("background scheduler rejected the task (queue full or shut down)")]
pub struct BackpressureError;

/// Point-in-time view of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Tasks waiting to be picked up
    pub queue_depth: usize,
    /// Tasks running right now
    pub active_tasks: usize,
    /// Tasks finished, including ones that panicked
    pub tasks_completed: u64,
    /// Worker threads
    pub worker_count: usize,
}

type Task = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct PoolState {
    tasks: VecDeque<Task>,
    active: usize,
    completed: u64,
    shut_down: bool,
}

impl PoolState {
    fn is_idle(&self) -> bool {
        self.tasks.is_empty() && self.active == 0
    }
}

struct Shared {
    state: Mutex<PoolState>,
    // Signalled on submit and on shutdown
    task_ready: Condvar,
    // Signalled whenever the pool becomes idle
    idle: Condvar,
    capacity: usize,
}

/// Fixed pool of worker threads.
///
/// Tasks start in submission order. With more than one worker they may
/// finish in any order.
pub struct BackgroundScheduler {
    shared: Arc<Shared>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    num_threads: usize,
}

impl BackgroundScheduler {
    /// Start `num_threads` workers (`permstore-worker-N`) over a queue holding
    /// at most `max_queue_depth` waiting tasks.
    ///
    /// Threads that fail to spawn are logged and skipped. With no workers at
    /// all the pool starts shut down.
    pub fn new(num_threads: usize, max_queue_depth: usize) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState::default()),
            task_ready: Condvar::new(),
            idle: Condvar::new(),
            capacity: max_queue_depth,
        });

        let workers: Vec<_> = (0..num_threads)
            .filter_map(|i| {
                let shared = Arc::clone(&shared);
                std::thread::Builder::new()
                    .name(format!("permstore-worker-{}", i))
                    .spawn(move || run_worker(&shared))
                    .map_err(|e| {
                        warn!(
                            target: "permstore::store",
                            worker = i,
                            error = %e,
                            "Failed to spawn worker thread"
                        );
                    })
                    .ok()
            })
            .collect();
        if workers.is_empty() {
            shared.state.lock().shut_down = true;
        }

        Self {
            num_threads: workers.len(),
            shared,
            workers: Mutex::new(workers),
        }
    }

    /// Queue a task. A rejected task is dropped without running.
    pub fn submit(&self, work: impl FnOnce() + Send + 'static) -> Result<(), BackpressureError> {
        let mut state = self.shared.state.lock();
        if state.shut_down || state.tasks.len() >= self.shared.capacity {
            return Err(BackpressureError);
        }
        state.tasks.push_back(Box::new(work));
        drop(state);

        self.shared.task_ready.notify_one();
        Ok(())
    }

    /// Wait until nothing is queued or running. Workers stay up.
    pub fn drain(&self) {
        let mut state = self.shared.state.lock();
        while !state.is_idle() {
            self.shared.idle.wait(&mut state);
        }
    }

    /// Stop accepting tasks, let workers finish the queue, and join them.
    ///
    /// Safe to call more than once, and from a worker thread.
    pub fn shutdown(&self) {
        self.shared.state.lock().shut_down = true;
        self.shared.task_ready.notify_all();

        let current = std::thread::current().id();
        for handle in self.workers.lock().drain(..) {
            if handle.thread().id() != current {
                let _ = handle.join();
            }
        }
    }

    /// Whether `shutdown` has been called
    pub fn is_shut_down(&self) -> bool {
        self.shared.state.lock().shut_down
    }

    /// Current queue and worker counts
    pub fn stats(&self) -> SchedulerStats {
        let state = self.shared.state.lock();
        SchedulerStats {
            queue_depth: state.tasks.len(),
            active_tasks: state.active,
            tasks_completed: state.completed,
            worker_count: self.num_threads,
        }
    }
}

impl std::fmt::Debug for BackgroundScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundScheduler")
            .field("num_threads", &self.num_threads)
            .field("max_queue_depth", &self.shared.capacity)
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

impl Drop for BackgroundScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(shared: &Shared) {
    loop {
        let task = {
            let mut state = shared.state.lock();
            loop {
                if let Some(task) = state.tasks.pop_front() {
                    state.active += 1;
                    break task;
                }
                if state.shut_down {
                    return;
                }
                shared.task_ready.wait(&mut state);
            }
        };

        if let Err(panic) = catch_unwind(AssertUnwindSafe(task)) {
            let message = panic
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("(non-string panic)");
            error!(target: "permstore::store", panic = message, "Worker task panicked");
        }

        let mut state = shared.state.lock();
        state.active -= 1;
        state.completed += 1;
        if state.is_idle() {
            shared.idle.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Barrier};
    use std::time::Duration;

    fn counting_task(counter: &Arc<AtomicUsize>) -> impl FnOnce() + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Occupy the only worker of `scheduler` until the returned barrier is hit.
    fn block_worker(scheduler: &BackgroundScheduler) -> Arc<Barrier> {
        let barrier = Arc::new(Barrier::new(2));
        let (started_tx, started_rx) = mpsc::channel();
        let b = Arc::clone(&barrier);
        scheduler
            .submit(move || {
                started_tx.send(()).unwrap();
                b.wait();
            })
            .unwrap();
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        barrier
    }

    #[test]
    fn test_submit_and_drain() {
        let scheduler = BackgroundScheduler::new(2, 64);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            scheduler.submit(counting_task(&counter)).unwrap();
        }
        scheduler.drain();

        assert_eq!(counter.load(Ordering::SeqCst), 10);
        let stats = scheduler.stats();
        assert_eq!(stats.tasks_completed, 10);
        assert_eq!(stats.queue_depth, 0);
        assert_eq!(stats.active_tasks, 0);
    }

    #[test]
    fn test_fifo_with_single_worker() {
        let scheduler = BackgroundScheduler::new(1, 64);
        let gate = block_worker(&scheduler);

        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..5 {
            let order = Arc::clone(&order);
            scheduler.submit(move || order.lock().push(i)).unwrap();
        }
        assert_eq!(scheduler.stats().queue_depth, 5);

        gate.wait();
        scheduler.drain();
        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_full_queue_rejects() {
        let scheduler = BackgroundScheduler::new(1, 2);
        let gate = block_worker(&scheduler);
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.submit(counting_task(&counter)).unwrap();
        scheduler.submit(counting_task(&counter)).unwrap();
        assert_eq!(scheduler.submit(counting_task(&counter)), Err(BackpressureError));

        gate.wait();
        scheduler.drain();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_shutdown_finishes_queue() {
        let scheduler = BackgroundScheduler::new(1, 64);
        let gate = block_worker(&scheduler);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            scheduler.submit(counting_task(&counter)).unwrap();
        }
        gate.wait();
        scheduler.shutdown();

        assert_eq!(counter.load(Ordering::SeqCst), 5);
        assert!(scheduler.is_shut_down());
        assert_eq!(scheduler.submit(|| {}), Err(BackpressureError));
    }

    #[test]
    fn test_panicking_task_is_contained() {
        let scheduler = BackgroundScheduler::new(2, 64);
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.submit(|| panic!("task failure under test")).unwrap();
        for _ in 0..5 {
            scheduler.submit(counting_task(&counter)).unwrap();
        }
        scheduler.drain();

        assert_eq!(counter.load(Ordering::SeqCst), 5);
        assert_eq!(scheduler.stats().tasks_completed, 6);
        assert_eq!(scheduler.stats().worker_count, 2);
    }

    #[test]
    fn test_shutdown_from_worker_thread() {
        let scheduler = Arc::new(BackgroundScheduler::new(1, 64));
        let (done_tx, done_rx) = mpsc::channel();

        let handle = Arc::clone(&scheduler);
        scheduler
            .submit(move || {
                handle.shutdown();
                done_tx.send(handle.is_shut_down()).unwrap();
            })
            .unwrap();

        assert!(done_rx.recv_timeout(Duration::from_secs(5)).unwrap());
        scheduler.shutdown();
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let scheduler = BackgroundScheduler::new(2, 64);
        scheduler.submit(|| {}).unwrap();
        scheduler.drain();

        scheduler.shutdown();
        scheduler.shutdown();
        assert!(scheduler.is_shut_down());
    }
}
