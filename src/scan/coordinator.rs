// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan coordinator: fan the extractor out across repositories.
//!
//! One tokio task per repository, admitted by a semaphore whose width is
//! independent of the repository count, so a large root cannot spawn an
//! unbounded number of concurrent git subprocesses. Results are joined in
//! spawn order: the aggregate always matches locator order no matter which
//! extraction finishes first.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::scan::extractor::StatusExtractor;
use crate::scan::status::{RepoRef, StatusRecord};

/// Coordinates concurrent status extraction with bounded parallelism.
pub struct ScanCoordinator {
    extractor: Arc<StatusExtractor>,
    permits: Arc<Semaphore>,
}

impl ScanCoordinator {
    /// Creates a coordinator with a fixed worker-pool width.
    #[must_use]
    pub fn new(extractor: Arc<StatusExtractor>, workers: usize) -> Self {
        Self {
            extractor,
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Scans every repository, returning exactly one record per input in
    /// input order.
    ///
    /// Per-repository isolation: each extraction runs in its own task, so a
    /// panic or failure in one repository folds into that repository's slot
    /// and never delays or sinks the others.
    pub async fn scan(&self, repos: Vec<RepoRef>) -> Vec<StatusRecord> {
        if repos.is_empty() {
            return Vec::new();
        }

        debug!(
            repos = repos.len(),
            workers = self.permits.available_permits(),
            "starting scan"
        );

        let (refs, handles): (Vec<_>, Vec<_>) = repos
            .into_iter()
            .map(|repo| {
                let extractor = Arc::clone(&self.extractor);
                let permits = Arc::clone(&self.permits);
                let task_repo = repo.clone();
                let handle = tokio::spawn(async move {
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return StatusRecord::failed(task_repo, "scan pool closed");
                    };
                    extractor.extract(&task_repo).await
                });
                (repo, handle)
            })
            .unzip();

        let joined = join_all(handles).await;

        refs.into_iter()
            .zip(joined)
            .map(|(repo, outcome)| match outcome {
                Ok(record) => record,
                Err(e) => StatusRecord::failed(repo, format!("status task failed: {e}")),
            })
            .collect()
    }
}
