// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mutating git operations: remote-ref refresh and remote merge.
//!
//! ```text
//! fetch_all  git fetch --all   (read-only against the working tree)
//! pull       git pull          (requires clean tree or confirmation)
//! ```
//!
//! Both return the raw `ProcessOutput` — including a non-zero exit or the
//! `timed_out` flag — so the mutation executor can fold the outcome into an
//! `OperationResult` with captured stdout/stderr instead of losing it to an
//! error path. A killed-on-timeout command leaves the repository in whatever
//! state git guarantees for an interrupted operation; this layer does not
//! attempt remediation.

use anyhow::Context;
use std::path::Path;
use std::time::Duration;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::Result;

/// Base builder for a mutating git invocation scoped to one repository.
fn git_builder(path: &Path) -> Result<ProcessBuilder> {
    Ok(ProcessBuilder::which("git")
        .context("git executable not found")?
        .cwd(path)
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GCM_INTERACTIVE", "never")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .capture_and_log_output())
}

/// Update locally cached remote refs for every configured remote.
///
/// # Errors
///
/// Returns an error only if the subprocess cannot be spawned; command
/// failure and timeout are reported through the output.
pub async fn fetch_all(path: &Path, timeout: Duration) -> Result<ProcessOutput> {
    git_builder(path)?
        .args(["fetch", "--all"])
        .timeout(timeout)
        .name("git fetch")
        .run()
        .await
}

/// Integrate upstream changes into the local working copy.
///
/// # Errors
///
/// Returns an error only if the subprocess cannot be spawned; command
/// failure and timeout are reported through the output.
pub async fn pull(path: &Path, timeout: Duration) -> Result<ProcessOutput> {
    git_builder(path)?
        .args(["pull"])
        .timeout(timeout)
        .name("git pull")
        .run()
        .await
}
