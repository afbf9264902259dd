//! Bounded concurrency gate for extraction-transcode work.
//!
//! The transport layer dispatches every request independently; this pool
//! additionally bounds how many extraction+transcode jobs run at once.
//! Excess jobs wait in FIFO order on the semaphore's permit queue.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Default number of concurrently running jobs.
pub const DEFAULT_SLOTS: usize = 3;

/// Hard cap on jobs accepted in a single batch submission.
pub const MAX_BATCH_JOBS: usize = 20;

/// Fixed-capacity execution gate.
///
/// A slot is held for a job's entire run; it frees only when the job
/// completes, successfully or not. The pool never retries failures.
#[derive(Clone)]
pub struct JobSlotPool {
    slots: Arc<Semaphore>,
    capacity: usize,
}

impl JobSlotPool {
    /// Create a pool with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Pool capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Currently available slots.
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }

    /// Run a job once a slot frees, holding the slot until it completes.
    pub async fn run<F, T>(&self, job: F) -> T
    where
        F: Future<Output = T>,
    {
        // The semaphore is never closed, so acquisition only fails if it is
        // dropped, which cannot happen while &self is alive.
        let _permit = self
            .slots
            .acquire()
            .await
            .expect("job slot semaphore closed");
        job.await
    }

    /// Spawn a job onto the runtime, gated by the pool.
    ///
    /// Used by batch submission, which accepts work and returns immediately.
    pub fn spawn<F, T>(&self, job: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let slots = Arc::clone(&self.slots);
        tokio::spawn(async move {
            let _permit = slots.acquire().await.expect("job slot semaphore closed");
            job.await
        })
    }
}

impl Default for JobSlotPool {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_never_exceeds_capacity() {
        let pool = JobSlotPool::new(3);
        let running = Arc::new(AtomicUsize::new(0));
        let high_water = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let running = Arc::clone(&running);
            let high_water = Arc::clone(&high_water);
            handles.push(pool.spawn(async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                high_water.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert!(high_water.load(Ordering::SeqCst) <= 3);
        assert_eq!(pool.available(), 3);
    }

    #[tokio::test]
    async fn test_run_returns_job_output() {
        let pool = JobSlotPool::new(1);
        let result: Result<u32, &str> = pool.run(async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_slot_freed_after_failure() {
        let pool = JobSlotPool::new(1);
        let _: Result<(), &str> = pool.run(async { Err("boom") }).await;
        // Failure is terminal for the job but frees its slot
        assert_eq!(pool.available(), 1);
    }
}
