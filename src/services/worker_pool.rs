use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tokio::sync::Semaphore;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("blocking call did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("blocking worker failed: {0}")]
    Worker(String),

    #[error("worker pool is closed")]
    Closed,
}

/// Runs blocking closures on tokio's blocking threads, at most `workers`
/// at a time, so request tasks only ever await them.
#[derive(Clone, Debug)]
pub struct BlockingPool {
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl BlockingPool {
    pub fn new(workers: usize, timeout: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
            timeout,
        }
    }

    /// Submit `task` and wait for its result. The timeout covers both
    /// waiting for a free worker and the task itself.
    pub async fn run<F, T>(&self, task: F) -> Result<T, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let work = async {
            let permit = self
                .permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| PoolError::Closed)?;

            // The permit moves into the worker: a call abandoned on timeout
            // keeps its slot until the thread really returns.
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                task()
            })
            .await
            .map_err(|e| PoolError::Worker(e.to_string()))
        };

        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(PoolError::TimedOut(self.timeout)),
        }
    }
}
