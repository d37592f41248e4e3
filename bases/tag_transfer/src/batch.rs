//! Bounded pool of blocking per-file tasks.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::{stream, StreamExt};
use id3_metadata::MetadataError;
use thiserror::Error;

use crate::progress::Progress;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("worker for {path} stopped unexpectedly")]
    Worker {
        path: PathBuf,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// A file the batch could not process.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: TaskError,
}

/// Run `work` once per item on at most `jobs` blocking threads.
///
/// Results come back in the order of `items`, each paired with its path.
/// A failing item never stops the others. `progress` sees a tick for every
/// finished item, in order.
pub async fn for_each_file<I, O, F>(
    items: Vec<(PathBuf, I)>,
    jobs: NonZeroUsize,
    work: F,
    progress: &mut dyn Progress,
) -> Vec<(PathBuf, Result<O, TaskError>)>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(&Path, I) -> Result<O, MetadataError> + Send + Sync + 'static,
{
    let total = items.len();
    let work = Arc::new(work);

    let mut finished = stream::iter(items)
        .map(|(path, item)| {
            let work = Arc::clone(&work);
            async move {
                let worker_path = path.clone();
                let joined = tokio::task::spawn_blocking(move || work(&worker_path, item)).await;
                let result = match joined {
                    Ok(result) => result.map_err(TaskError::from),
                    Err(source) => Err(TaskError::Worker {
                        path: path.clone(),
                        source,
                    }),
                };
                (path, result)
            }
        })
        .buffered(jobs.get());

    let mut results = Vec::with_capacity(total);
    progress.advance(0, total);
    while let Some((path, result)) = finished.next().await {
        if let Err(e) = &result {
            tracing::warn!("{}: {}", path.display(), e);
        }
        results.push((path, result));
        progress.advance(results.len(), total);
    }
    progress.finish();

    results
}

/// Split results into successes and failures, keeping order.
pub fn partition<O>(results: Vec<(PathBuf, Result<O, TaskError>)>) -> (Vec<O>, Vec<Failure>) {
    let mut done = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (path, result) in results {
        match result {
            Ok(output) => done.push(output),
            Err(error) => failures.push(Failure { path, error }),
        }
    }
    (done, failures)
}
