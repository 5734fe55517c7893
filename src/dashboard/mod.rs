// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dashboard facade: the boundary a transport layer talks to.
//!
//! ```text
//! scan_all()              -> Vec<StatusRecord>        (locator order)
//! refresh(name)           -> OperationResult          (gated, never blocks)
//! merge(name, confirmed)  -> Executed(OperationResult)
//!                          | Blocked { reason, snapshot }
//! ```
//!
//! Repository names arriving from callers are untrusted: they are validated
//! against a conservative character set and may not traverse outside the
//! scan root.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::info;

use crate::config::Config;
use crate::error::{DashResult, RequestError};
use crate::git::query::is_working_copy;
use crate::ops::OperationKind;
use crate::ops::executor::{MutationExecutor, OperationResult};
use crate::ops::gate::OperationGate;
use crate::ops::validator::{ValidationDecision, validate};
use crate::scan::coordinator::ScanCoordinator;
use crate::scan::extractor::StatusExtractor;
use crate::scan::locator::discover_repos;
use crate::scan::status::{RepoRef, StatusRecord};

/// Outcome of a merge request: executed, or awaiting confirmation.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum MergeOutcome {
    /// The merge ran; inspect the result for success and fresh status.
    Executed(OperationResult),
    /// Blocked pending confirmation; the snapshot lets the caller render a
    /// prompt without re-scanning.
    Blocked {
        reason: String,
        snapshot: StatusRecord,
    },
}

/// Service facade wiring the locator, coordinator, validator, gate, and
/// executor together.
pub struct Dashboard {
    root: PathBuf,
    extractor: Arc<StatusExtractor>,
    coordinator: ScanCoordinator,
    executor: MutationExecutor,
    gate: OperationGate,
}

impl Dashboard {
    /// Builds a dashboard from the application configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let extractor = Arc::new(StatusExtractor::new(
            config.scan.query_timeout(),
            config.tracker.clone(),
        ));
        let coordinator = ScanCoordinator::new(Arc::clone(&extractor), config.scan.workers);
        let executor = MutationExecutor::new(&config.ops, Arc::clone(&extractor));
        Self {
            root: config.scan.root.clone(),
            extractor,
            coordinator,
            executor,
            gate: OperationGate::new(),
        }
    }

    /// Scans every working copy under the root.
    ///
    /// Returns exactly one record per discovered repository, in locator
    /// order; per-repository failures are embedded in their records.
    ///
    /// # Errors
    ///
    /// Fails only when the root directory itself cannot be read.
    pub async fn scan_all(&self) -> DashResult<Vec<StatusRecord>> {
        let repos = discover_repos(&self.root)?;
        info!(root = %self.root.display(), repos = repos.len(), "scanning working copies");
        Ok(self.coordinator.scan(repos).await)
    }

    /// Refreshes remote refs for one repository.
    ///
    /// Refresh is read-only against the working tree, so the validator
    /// admits it unconditionally and no pre-status extraction is needed.
    ///
    /// # Errors
    ///
    /// Returns `Busy` when a mutation is already in flight for this
    /// repository, or a request error for an invalid/unknown name.
    pub async fn refresh(&self, name: &str) -> DashResult<OperationResult> {
        let repo = self.resolve(name)?;
        let _permit = self.gate.try_admit(&repo.name)?;
        Ok(self.executor.execute(&repo, OperationKind::Refresh).await)
    }

    /// Merges upstream changes into one repository, subject to the
    /// validate-then-confirm protocol.
    ///
    /// Validation always runs against a freshly extracted status — a
    /// confirmed retry after a block re-evaluates current state, never the
    /// snapshot that triggered the block.
    ///
    /// # Errors
    ///
    /// Returns `Busy` when a mutation is already in flight for this
    /// repository, or a request error for an invalid/unknown name.
    pub async fn merge(&self, name: &str, confirmed: bool) -> DashResult<MergeOutcome> {
        let repo = self.resolve(name)?;
        let status = self.extractor.extract(&repo).await;
        match validate(OperationKind::Merge, &status, confirmed) {
            ValidationDecision::Blocked { reason, snapshot } => {
                info!(repo = %repo.name, %reason, "merge blocked pending confirmation");
                Ok(MergeOutcome::Blocked { reason, snapshot })
            }
            ValidationDecision::Allowed => {
                let _permit = self.gate.try_admit(&repo.name)?;
                Ok(MergeOutcome::Executed(
                    self.executor.execute(&repo, OperationKind::Merge).await,
                ))
            }
        }
    }

    /// Resolves a caller-supplied name to a working copy under the root.
    fn resolve(&self, name: &str) -> DashResult<RepoRef> {
        if !valid_name(name) {
            return Err(RequestError::InvalidName {
                name: name.to_string(),
            }
            .into());
        }
        let path = self.root.join(name);
        if !path.is_dir() || !is_working_copy(&path) {
            return Err(RequestError::RepoNotFound {
                name: name.to_string(),
            }
            .into());
        }
        Ok(RepoRef {
            name: name.to_string(),
            path,
        })
    }
}

/// Validates a repository name from an untrusted caller.
///
/// Conservative allow-list plus traversal guards: alphanumerics, dash,
/// underscore and dot; no `..`; no leading dot.
fn valid_name(name: &str) -> bool {
    static NAME_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = NAME_RE.get_or_init(|| {
        regex::Regex::new(r"^[A-Za-z0-9._-]+$").unwrap_or_else(|e| {
            unreachable!("invalid repository-name pattern: {e}");
        })
    });
    re.is_match(name) && !name.contains("..") && !name.starts_with('.')
}

#[cfg(test)]
mod tests;
