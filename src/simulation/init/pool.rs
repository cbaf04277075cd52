//! Worker pool - runs one phase's band tasks and waits for all of them
//!
//! With the `parallel` feature the tasks go to rayon; without it they run
//! in order on the calling thread. Either way `run` only returns once every
//! task has finished, which is the barrier between the even and the odd
//! band phase.
//!
//! Natively the pool owns its own rayon `ThreadPool`. On wasm32 threads can
//! only come from `init_thread_pool`, so the global rayon pool is used.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::error::EngineResult;

pub struct WorkerPool {
    workers: usize,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    /// `workers == 0` picks the available parallelism.
    pub fn new(workers: usize) -> EngineResult<Self> {
        let workers = if workers == 0 { default_workers() } else { workers };

        #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("sandfall-band-{}", i))
                .build()
                .map_err(|e| crate::core::error::EngineError::WorkerPool(e.to_string()))?;
            log::info!("worker pool started with {} threads", workers);
            Ok(Self { workers, pool: Some(pool) })
        }
        #[cfg(all(feature = "parallel", target_arch = "wasm32"))]
        {
            log::info!("worker pool using the global rayon pool ({} workers)", workers);
            Ok(Self { workers, pool: None })
        }
        #[cfg(not(feature = "parallel"))]
        {
            log::info!("worker pool running serially ({} logical workers)", workers);
            Ok(Self { workers })
        }
    }

    /// Single worker; small grids then run as one band.
    pub fn serial() -> EngineResult<Self> {
        Self::new(1)
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `task` over every item and collect the results in item order.
    pub(crate) fn run<T, U, F>(&self, items: Vec<T>, task: F) -> Vec<U>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> U + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if items.len() > 1 {
                return match &self.pool {
                    Some(pool) => pool.install(|| items.into_par_iter().map(&task).collect()),
                    None => items.into_par_iter().map(&task).collect(),
                };
            }
        }
        items.into_iter().map(task).collect()
    }
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
fn default_workers() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(all(feature = "parallel", target_arch = "wasm32")))]
fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_preserves_item_order() {
        let pool = WorkerPool::new(3).expect("pool");
        let out = pool.run((0..10).collect(), |i: u32| i * 2);
        assert_eq!(out, (0..10).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn zero_workers_means_auto() {
        let pool = WorkerPool::new(0).expect("pool");
        assert!(pool.workers() >= 1);
    }
}
