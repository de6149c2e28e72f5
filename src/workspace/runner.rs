//! Checks many catalog files in parallel.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;

use super::types::{
    FileOutcome,
    WorkspaceError,
};
use crate::input::Preprocessor;
use crate::lint::{
    CheckOptions,
    check_file,
};

/// Checks every file, at most `num_threads` at a time.
///
/// Outcomes come back in the order of `files`. A fatal error in one file is recorded
/// in its outcome and does not stop the others.
///
/// # Errors
/// Fails only when a check task panics.
pub async fn check_files(
    files: Vec<PathBuf>,
    preprocessor: Arc<dyn Preprocessor>,
    options: CheckOptions,
    num_threads: usize,
) -> Result<Vec<FileOutcome>, WorkspaceError> {
    tracing::debug!(files = files.len(), num_threads, "Checking catalogs");
    let semaphore = Arc::new(Semaphore::new(num_threads.max(1)));

    // 並列処理でファイルをチェック
    let tasks: Vec<_> = files
        .into_iter()
        .map(|path| {
            let semaphore = Arc::clone(&semaphore);
            let preprocessor = Arc::clone(&preprocessor);
            async move {
                let _permit = semaphore.acquire_owned().await?;
                let task_path = path.clone();
                let result = tokio::task::spawn_blocking(move || {
                    check_file(&task_path, preprocessor.as_ref(), options)
                })
                .await?;

                if let Err(error) = &result {
                    tracing::debug!(path = %path.display(), %error, "Check aborted");
                }
                Ok::<_, WorkspaceError>(FileOutcome { path, result })
            }
        })
        .collect();

    futures::future::join_all(tasks).await.into_iter().collect()
}
