// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only git queries, one isolated subprocess per question.
//!
//! ```text
//! current_branch  git symbolic-ref --short HEAD     None = detached
//! change_count    git status --porcelain            line count
//! ahead_behind    git rev-parse @{upstream} probe
//!                 git rev-list --left-right --count  None = no upstream
//! last_commit     git log -1 --format=%h..%s        None = empty repo
//! remote_url      git remote get-url origin         None = no remote
//! ```
//!
//! Failure policy: a timeout surfaces as `ProcessError::Timeout`, an
//! unexpected non-zero exit as `GitError::CommandFailed` carrying the
//! trimmed stderr. Expected non-zero exits (detached HEAD, missing
//! upstream, empty repository, missing remote) map to `Ok(None)`.

use anyhow::Context;
use std::path::Path;
use std::time::Duration;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{GitError, ProcessError, Result};

/// Commit metadata as reported by `git log -1`.
///
/// The subject is last in the wire format so embedded separators cannot
/// shift the fixed fields.
#[derive(Debug, Clone)]
pub struct CommitLine {
    pub hash: String,
    pub author: String,
    pub timestamp: i64,
    pub subject: String,
}

const COMMIT_FORMAT: &str = "%h%x1f%an%x1f%ct%x1f%s";

/// Check if `path` is itself a git working copy (or bare repository).
///
/// Uses gix so the locator can probe every subdirectory without spawning
/// a subprocess per candidate. Does not search parent directories.
#[must_use]
pub fn is_working_copy(path: &Path) -> bool {
    gix::open(path).is_ok()
}

/// Base builder for a git invocation scoped to one repository.
fn git_builder(path: &Path) -> Result<ProcessBuilder> {
    Ok(ProcessBuilder::which("git")
        .context("git executable not found")?
        .cwd(path)
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GCM_INTERACTIVE", "never"))
}

/// Runs a query, converting a timeout kill into its dedicated error.
async fn run_query(
    builder: ProcessBuilder,
    command: &str,
    timeout: Duration,
) -> Result<ProcessOutput> {
    let out = builder
        .flag(ProcessFlags::ALLOW_FAILURE)
        .timeout(timeout)
        .name(command.to_string())
        .run()
        .await?;
    if out.timed_out() {
        return Err(ProcessError::Timeout {
            command: command.to_string(),
            timeout_secs: timeout.as_secs(),
        }
        .into());
    }
    Ok(out)
}

/// Maps an unexpected non-zero exit to `GitError::CommandFailed`.
fn require_success(out: &ProcessOutput, command: &str) -> Result<()> {
    if out.success() {
        Ok(())
    } else {
        Err(GitError::CommandFailed {
            command: command.to_string(),
            message: out.stderr().trim().to_string(),
        }
        .into())
    }
}

/// Get current branch name (`None` if HEAD is detached).
///
/// # Errors
///
/// Returns an error on timeout or if git cannot be invoked.
pub async fn current_branch(path: &Path, timeout: Duration) -> Result<Option<String>> {
    let out = run_query(
        git_builder(path)?
            .args(["symbolic-ref", "--short", "HEAD"])
            .capture_output(),
        "git symbolic-ref",
        timeout,
    )
    .await?;
    // symbolic-ref fails iff HEAD does not point at a branch
    if out.success() {
        Ok(Some(out.stdout().trim().to_string()))
    } else {
        Ok(None)
    }
}

/// Count uncommitted changes: staged, unstaged, and untracked paths.
///
/// # Errors
///
/// Returns an error on timeout or a failed status invocation.
pub async fn change_count(path: &Path, timeout: Duration) -> Result<u32> {
    let out = run_query(
        git_builder(path)?
            .args(["status", "--porcelain"])
            .capture_output(),
        "git status",
        timeout,
    )
    .await?;
    require_success(&out, "git status --porcelain")?;
    let count = out.stdout().lines().filter(|l| !l.trim().is_empty()).count();
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Commits ahead of / behind the configured upstream.
///
/// Returns `None` when no upstream is configured or it cannot be resolved —
/// the caller must not read that as "in sync".
///
/// # Errors
///
/// Returns an error on timeout or when the divergence count itself fails.
pub async fn ahead_behind(path: &Path, timeout: Duration) -> Result<Option<(u32, u32)>> {
    let probe = run_query(
        git_builder(path)?
            .args(["rev-parse", "--abbrev-ref", "@{upstream}"])
            .quiet(),
        "git rev-parse @{upstream}",
        timeout,
    )
    .await?;
    if !probe.success() {
        return Ok(None);
    }

    let out = run_query(
        git_builder(path)?
            .args(["rev-list", "--left-right", "--count", "HEAD...@{upstream}"])
            .capture_output(),
        "git rev-list",
        timeout,
    )
    .await?;
    require_success(&out, "git rev-list --left-right --count")?;

    let stdout = out.stdout().trim().to_string();
    let mut parts = stdout.split_whitespace();
    let (Some(ahead), Some(behind)) = (parts.next(), parts.next()) else {
        return Err(GitError::CommandFailed {
            command: "git rev-list --left-right --count".to_string(),
            message: format!("unexpected output: '{stdout}'"),
        }
        .into());
    };
    let ahead = ahead.parse::<u32>().context("unparsable ahead count")?;
    let behind = behind.parse::<u32>().context("unparsable behind count")?;
    Ok(Some((ahead, behind)))
}

/// Tip-commit metadata (`None` for an empty repository).
///
/// # Errors
///
/// Returns an error on timeout or if the log output is malformed.
pub async fn last_commit(path: &Path, timeout: Duration) -> Result<Option<CommitLine>> {
    let out = run_query(
        git_builder(path)?
            .args(["log", "-1"])
            .arg(format!("--format={COMMIT_FORMAT}"))
            .capture_output(),
        "git log",
        timeout,
    )
    .await?;
    // log fails on a repository with no commits yet
    if !out.success() {
        return Ok(None);
    }

    let line = out.stdout().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut parts = line.splitn(4, '\u{1f}');
    let (Some(hash), Some(author), Some(timestamp), Some(subject)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(GitError::CommandFailed {
            command: "git log -1".to_string(),
            message: format!("unexpected output: '{line}'"),
        }
        .into());
    };
    let timestamp = timestamp
        .trim()
        .parse::<i64>()
        .context("unparsable commit timestamp")?;
    Ok(Some(CommitLine {
        hash: hash.to_string(),
        author: author.to_string(),
        timestamp,
        subject: subject.to_string(),
    }))
}

/// Fetch URL of the `origin` remote (`None` if unset).
///
/// # Errors
///
/// Returns an error on timeout or if git cannot be invoked.
pub async fn remote_url(path: &Path, timeout: Duration) -> Result<Option<String>> {
    let out = run_query(
        git_builder(path)?
            .args(["remote", "get-url", "origin"])
            .capture_output(),
        "git remote get-url",
        timeout,
    )
    .await?;
    if out.success() {
        Ok(Some(out.stdout().trim().to_string()))
    } else {
        Ok(None)
    }
}
