//! Bounded generation pool
//!
//! Jobs run on the blocking threads of a dedicated Tokio runtime. A semaphore
//! sized to `workers + queue_capacity` bounds how many jobs can be running or
//! waiting at once; when it is exhausted the job runs on the submitting thread
//! instead of being dropped.

use crate::shutdown::{ShutdownHandle, ShutdownSignal};
use dto2ts_core::{GenerateError, GenerateResult, GeneratedDocument, TypescriptGenerator};
use serde::{Deserialize, Serialize};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{Semaphore, oneshot};

const MIN_WORKERS: usize = 4;

/// Upper bound on `workers + queue_capacity`; shutdown drains permits as a `u32`
const MAX_TOTAL_PERMITS: usize = if Semaphore::MAX_PERMITS < u32::MAX as usize {
    Semaphore::MAX_PERMITS
} else {
    u32::MAX as usize
};

/// Sizing for a [`GenerationPool`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of worker threads (None = available parallelism, at least 4)
    pub worker_threads: Option<usize>,

    /// Jobs that may wait for a worker before callers run them inline
    pub queue_capacity: usize,

    /// Name prefix for worker threads
    pub thread_name: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            queue_capacity: 100,
            thread_name: "dto2ts-worker".to_string(),
        }
    }
}

impl PoolConfig {
    /// Largest accepted `queue_capacity`
    pub const MAX_QUEUE_CAPACITY: usize = 1 << 20;

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// Set the queue capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the thread name prefix
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Worker count after applying the hardware default
    pub fn effective_workers(&self) -> usize {
        match self.worker_threads {
            Some(threads) => threads.max(1),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .max(MIN_WORKERS),
        }
    }
}

/// Pending outcome of a submitted job
pub struct JobHandle<R> {
    receiver: oneshot::Receiver<GenerateResult<R>>,
}

impl<R> JobHandle<R> {
    /// Block the current thread until the job finishes.
    ///
    /// Must not be called from inside an async context.
    pub fn join(self) -> GenerateResult<R> {
        self.receiver
            .blocking_recv()
            .map_err(|_| GenerateError::TaskFailed("job ended without a result".to_string()))?
    }
}

/// Fixed-size pool running generation jobs with caller-runs backpressure
pub struct GenerationPool {
    runtime: Runtime,
    permits: Arc<Semaphore>,
    total_permits: usize,
    shutdown_handle: ShutdownHandle,
    caller_runs: AtomicUsize,
    config: PoolConfig,
}

impl GenerationPool {
    /// Create a pool with the given configuration
    pub fn new(config: PoolConfig) -> GenerateResult<Self> {
        let workers = config.effective_workers();

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(workers)
            .thread_name(&config.thread_name)
            .enable_time()
            .build()?;

        let total_permits = workers
            .saturating_add(config.queue_capacity)
            .min(MAX_TOTAL_PERMITS);
        if total_permits < workers.saturating_add(config.queue_capacity) {
            tracing::warn!(
                queue_capacity = config.queue_capacity,
                total_permits,
                "queue capacity clamped"
            );
        }
        tracing::debug!(
            workers,
            queue_capacity = config.queue_capacity,
            "generation pool started"
        );

        Ok(Self {
            runtime,
            permits: Arc::new(Semaphore::new(total_permits)),
            total_permits,
            shutdown_handle: ShutdownHandle::new(),
            caller_runs: AtomicUsize::new(0),
            config,
        })
    }

    /// Create a pool with default configuration
    pub fn with_defaults() -> GenerateResult<Self> {
        Self::new(PoolConfig::default())
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get a shutdown signal that can be used to detect shutdown
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown_handle.signal()
    }

    /// Submit a job.
    ///
    /// The job runs on a worker when a slot is free, otherwise on the calling
    /// thread before this returns. Either way the outcome comes back through
    /// the returned handle.
    pub fn submit<F, R>(&self, job: F) -> GenerateResult<JobHandle<R>>
    where
        F: FnOnce() -> GenerateResult<R> + Send + 'static,
        R: Send + 'static,
    {
        if self.is_shutting_down() {
            return Err(GenerateError::PoolShutdown);
        }

        let (sender, receiver) = oneshot::channel();

        match Arc::clone(&self.permits).try_acquire_owned() {
            Ok(permit) => {
                let signal = self.shutdown_handle.signal();
                self.runtime.spawn_blocking(move || {
                    let _permit = permit;
                    let outcome = if signal.is_triggered() {
                        Err(GenerateError::PoolShutdown)
                    } else {
                        job()
                    };
                    // receiver may already be gone
                    let _ = sender.send(outcome);
                });
            }
            Err(_) => {
                self.caller_runs.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("pool saturated, running job on caller");
                let outcome = catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|_| {
                    Err(GenerateError::TaskFailed("job panicked".to_string()))
                });
                let _ = sender.send(outcome);
            }
        }

        Ok(JobHandle { receiver })
    }

    /// Submit a job and wait for its result
    pub fn execute<F, R>(&self, job: F) -> GenerateResult<R>
    where
        F: FnOnce() -> GenerateResult<R> + Send + 'static,
        R: Send + 'static,
    {
        self.submit(job)?.join()
    }

    /// Run every job, returning results in submission order
    pub fn run_all<F, R>(&self, jobs: Vec<F>) -> Vec<GenerateResult<R>>
    where
        F: FnOnce() -> GenerateResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let handles: Vec<GenerateResult<JobHandle<R>>> =
            jobs.into_iter().map(|job| self.submit(job)).collect();

        handles
            .into_iter()
            .map(|handle| handle.and_then(JobHandle::join))
            .collect()
    }

    /// Generate a document per root; each job walks with its own state
    pub fn generate_all<S: AsRef<str>>(
        &self,
        generator: &Arc<TypescriptGenerator>,
        roots: &[S],
    ) -> Vec<GenerateResult<GeneratedDocument>> {
        let jobs: Vec<_> = roots
            .iter()
            .map(|root| {
                let generator = Arc::clone(generator);
                let root = root.as_ref().to_string();
                move || generator.generate(&root)
            })
            .collect();
        self.run_all(jobs)
    }

    /// Number of jobs that ran on the submitting thread
    pub fn caller_runs_count(&self) -> usize {
        self.caller_runs.load(Ordering::Relaxed)
    }

    /// Stop accepting work and wait up to `timeout` for running jobs
    pub fn shutdown(&self, timeout: Duration) -> GenerateResult<()> {
        tracing::info!("Initiating pool shutdown with timeout {:?}", timeout);
        self.shutdown_handle.trigger();

        let permits = Arc::clone(&self.permits);
        let total = u32::try_from(self.total_permits).unwrap_or(u32::MAX);
        let drained = self.runtime.block_on(async move {
            tokio::time::timeout(timeout, permits.acquire_many_owned(total)).await
        });

        match drained {
            Ok(Ok(_)) => tracing::info!("Pool shutdown complete"),
            Ok(Err(_)) => tracing::debug!("pool already closed"),
            Err(_) => tracing::warn!("pool shutdown timed out with jobs still running"),
        }
        self.permits.close();
        Ok(())
    }

    /// Check if shutdown has been triggered
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_handle.is_triggered()
    }
}

impl Drop for GenerationPool {
    fn drop(&mut self) {
        self.shutdown_handle.trigger();
    }
}

#[cfg(test)]
#[path = "pool/pool_tests.rs"]
mod pool_tests;
