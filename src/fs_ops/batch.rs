//! Parallel fan-out over independent per-item jobs.

use rayon::prelude::*;
use tracing::debug;

use crate::errors::{ErrorLog, FsOpError};

/// Run `operation` on every item across rayon's global pool and gather failures.
///
/// One failing item never stops the others. Each worker hands back its own
/// `Result`; the failures are merged after the join, so the caller blocks until
/// every item has finished. The pool is sized to the available parallelism.
pub fn run_parallel<T, F>(items: &[T], operation: F) -> ErrorLog
where
    T: Sync,
    F: Fn(&T) -> Result<(), FsOpError> + Sync + Send,
{
    let failures: Vec<FsOpError> = items
        .par_iter()
        .filter_map(|item| operation(item).err())
        .collect();

    debug!(
        items = items.len(),
        failed = failures.len(),
        workers = rayon::current_num_threads(),
        "batch finished"
    );
    ErrorLog::from(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn every_item_runs_despite_failures() {
        let items: Vec<u32> = (0..64).collect();
        let ran = AtomicUsize::new(0);
        let log = run_parallel(&items, |n| {
            ran.fetch_add(1, Ordering::Relaxed);
            if n % 8 == 0 {
                Err(FsOpError::NotFound {
                    op: "test",
                    path: PathBuf::from(format!("/item/{n}")),
                })
            } else {
                Ok(())
            }
        });
        assert_eq!(ran.load(Ordering::Relaxed), 64);
        assert_eq!(log.len(), 8);
    }

    #[test]
    fn empty_batch_yields_empty_log() {
        let items: Vec<PathBuf> = Vec::new();
        let log = run_parallel(&items, |_| Ok(()));
        assert!(log.is_empty());
    }
}
