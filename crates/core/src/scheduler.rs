//! Bounded, order-preserving execution of per-unit jobs
//!
//! The [`Scheduler`] owns a rayon thread pool and fans one job per unit
//! identifier out over it. Results come back in input order no matter which
//! job finishes first. A job that returns an error or panics is recorded as a
//! [`UnitFailure`]; its siblings keep running.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use crate::error::{CollationError, Result, UnitFailure};

/// Worker pool for per-unit diff jobs
pub struct Scheduler {
    pool: ThreadPool,
}

impl Scheduler {
    /// Build a pool with `workers` threads, or one per available core.
    pub fn new(workers: Option<usize>) -> Result<Self> {
        let threads = workers
            .or_else(|| std::thread::available_parallelism().ok().map(usize::from))
            .unwrap_or(1)
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("collator-worker-{i}"))
            .build()
            .map_err(|e| CollationError::WorkerPool(e.to_string()))?;

        debug!(threads, "worker pool ready");
        Ok(Self { pool })
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `job(ordinal, id)` for every identifier and wait for all of them.
    ///
    /// On success the results are in the same order as `unit_ids`. If any job
    /// fails, every failure is returned, again in input order.
    pub fn run_all<S, T, F>(&self, unit_ids: &[S], job: F) -> std::result::Result<Vec<T>, Vec<UnitFailure>>
    where
        S: AsRef<str> + Sync,
        T: Send,
        F: Fn(usize, &str) -> Result<T> + Sync,
    {
        let outcomes: Vec<std::result::Result<T, UnitFailure>> = self.pool.install(|| {
            unit_ids
                .par_iter()
                .enumerate()
                .map(|(ordinal, id)| {
                    let id = id.as_ref();
                    let reason = match catch_unwind(AssertUnwindSafe(|| job(ordinal, id))) {
                        Ok(Ok(value)) => return Ok(value),
                        Ok(Err(e)) => e.to_string(),
                        Err(payload) => format!("job panicked: {}", panic_message(payload.as_ref())),
                    };
                    warn!(unit = id, ordinal, %reason, "unit job failed");
                    Err(UnitFailure {
                        id: id.to_string(),
                        ordinal,
                        reason,
                    })
                })
                .collect()
        });

        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(value) => results.push(value),
                Err(failure) => failures.push(failure),
            }
        }

        if failures.is_empty() {
            Ok(results)
        } else {
            Err(failures)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{i}")).collect()
    }

    #[test]
    fn test_results_follow_input_order() {
        let scheduler = Scheduler::new(Some(4)).unwrap();
        let ids = ids(8);

        // Later units finish first.
        let results = scheduler
            .run_all(&ids, |ordinal, id| {
                thread::sleep(Duration::from_millis(5 * (8 - ordinal as u64)));
                Ok(format!("{id}:{ordinal}"))
            })
            .unwrap();

        let expected: Vec<String> = (0..8).map(|i| format!("p{i}:{i}")).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_failures_are_isolated_and_aggregated() {
        let scheduler = Scheduler::new(Some(2)).unwrap();
        let ids = ids(5);

        let failures = scheduler
            .run_all(&ids, |ordinal, id| {
                if ordinal % 2 == 1 {
                    Err(CollationError::UnknownIdentifier {
                        witness: "sorb".to_string(),
                        id: id.to_string(),
                    })
                } else {
                    Ok(ordinal)
                }
            })
            .unwrap_err();

        let failed: Vec<&str> = failures.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(failed, vec!["p1", "p3"]);
        assert!(failures[0].reason.contains("not found in witness `sorb`"));
    }

    #[test]
    fn test_panicking_job_is_captured() {
        let scheduler = Scheduler::new(Some(2)).unwrap();
        let ids = ids(3);

        let failures = scheduler
            .run_all(&ids, |ordinal, _| {
                if ordinal == 2 {
                    panic!("bad unit");
                }
                Ok(())
            })
            .unwrap_err();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].ordinal, 2);
        assert!(failures[0].reason.contains("bad unit"));
    }

    #[test]
    fn test_default_pool_size() {
        let scheduler = Scheduler::new(None).unwrap();
        assert!(scheduler.workers() >= 1);

        let empty: Vec<String> = Vec::new();
        let results: Vec<()> = scheduler.run_all(&empty, |_, _| Ok(())).unwrap();
        assert!(results.is_empty());
    }
}
