// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mutation executor: run one guarded git operation against one repository.
//!
//! The subprocess is scoped to the target repository's directory and bounded
//! by a kind-specific timeout (merge transfers more data than refresh). On
//! timeout the child is killed and the result carries a timeout-specific
//! reason, never a silent success. After execution — success or failure —
//! the repository's status is re-extracted and attached to the result.

use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use super::OperationKind;
use crate::config::OpsConfig;
use crate::git::mutate;
use crate::scan::extractor::StatusExtractor;
use crate::scan::status::{RepoRef, StatusRecord};

/// Outcome of one mutation execution. Produced once per invocation and
/// never cached.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    /// Whether the underlying git command ran to completion with exit 0.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Wall-clock duration of the git command.
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Human-readable failure reason; timeouts are distinguishable from
    /// non-zero exits by message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// One-line digest of a successful merge ("Already up to date", …).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Status re-extracted after the operation completed.
    pub status: StatusRecord,
}

fn serialize_millis<S>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Executes guarded mutations with kind-specific timeouts.
pub struct MutationExecutor {
    refresh_timeout: Duration,
    merge_timeout: Duration,
    extractor: Arc<StatusExtractor>,
}

impl MutationExecutor {
    /// Creates an executor from the operations config.
    #[must_use]
    pub fn new(config: &OpsConfig, extractor: Arc<StatusExtractor>) -> Self {
        Self {
            refresh_timeout: config.fetch_timeout(),
            merge_timeout: config.pull_timeout(),
            extractor,
        }
    }

    /// Timeout applied to the given operation kind.
    #[must_use]
    pub const fn timeout_for(&self, kind: OperationKind) -> Duration {
        match kind {
            OperationKind::Refresh => self.refresh_timeout,
            OperationKind::Merge => self.merge_timeout,
        }
    }

    /// Runs `kind` against `repo` and folds the outcome — including captured
    /// output and a fresh status snapshot — into an `OperationResult`.
    pub async fn execute(&self, repo: &RepoRef, kind: OperationKind) -> OperationResult {
        let timeout = self.timeout_for(kind);
        info!(repo = %repo.name, op = %kind, timeout_secs = timeout.as_secs(), "executing mutation");

        let started = Instant::now();
        let outcome = match kind {
            OperationKind::Refresh => mutate::fetch_all(&repo.path, timeout).await,
            OperationKind::Merge => mutate::pull(&repo.path, timeout).await,
        };
        let elapsed = started.elapsed();

        let (success, stdout, stderr, reason) = match outcome {
            Ok(out) if out.timed_out() => {
                let reason = format!("{kind} timed out after {} seconds", timeout.as_secs());
                (false, out.stdout().to_string(), out.stderr().to_string(), Some(reason))
            }
            Ok(out) if !out.success() => {
                let stderr_trimmed = out.stderr().trim();
                let reason = if stderr_trimmed.is_empty() {
                    format!("{kind} failed with exit code {}", out.exit_code())
                } else {
                    stderr_trimmed.to_string()
                };
                (false, out.stdout().to_string(), out.stderr().to_string(), Some(reason))
            }
            Ok(out) => (true, out.stdout().to_string(), out.stderr().to_string(), None),
            Err(e) => (false, String::new(), String::new(), Some(format!("{e:#}"))),
        };

        let summary = if success && kind == OperationKind::Merge {
            summarize_pull(&stdout)
        } else {
            None
        };

        // Fresh snapshot regardless of outcome, so callers always see the
        // repository's post-operation state.
        let status = self.extractor.extract(repo).await;

        info!(
            repo = %repo.name,
            op = %kind,
            success,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "mutation finished"
        );

        OperationResult {
            success,
            stdout,
            stderr,
            elapsed,
            reason,
            summary,
            status,
        }
    }
}

/// Digests `git pull` output into a one-line summary.
#[must_use]
pub fn summarize_pull(output: &str) -> Option<String> {
    if output.contains("Already up to date") {
        return Some("Already up to date".to_string());
    }
    output
        .lines()
        .find(|line| line.contains("file changed") || line.contains("files changed"))
        .map(|line| line.trim().to_string())
}
