//! dto2ts-runtime - Bounded execution of generation jobs
//!
//! This crate provides:
//! - [`GenerationPool`] running jobs on a fixed set of blocking workers
//!   behind a bounded queue, falling back to the caller when the queue is full
//! - [`PoolConfig`] for sizing the pool
//! - [`JobHandle`] carrying the outcome of a submitted job
//! - Shutdown signalling that stops queued jobs from starting

mod pool;
mod shutdown;

pub use pool::{GenerationPool, JobHandle, PoolConfig};
pub use shutdown::{ShutdownHandle, ShutdownSignal};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{GenerationPool, JobHandle, PoolConfig, ShutdownHandle, ShutdownSignal};
}
