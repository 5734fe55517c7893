// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Optional issue-tracker lookup via the `gh` CLI.
//!
//! ```text
//! origin remote URL
//!   git@github.com:owner/repo.git --> https://github.com/owner/repo
//!        |
//!        v
//! gh issue list --repo owner/repo --state open --json number
//!        |
//!        v
//! Some(count) | None ("unavailable")
//! ```
//!
//! Everything here degrades: a missing `gh` binary, a non-GitHub remote, a
//! non-zero exit, a timeout, or unparsable JSON all yield `None` and never
//! fail the surrounding status extraction.

use std::time::Duration;
use tracing::debug;

use crate::core::process::builder::ProcessBuilder;

/// Rewrites an origin remote URL into a browsable GitHub URL.
///
/// SSH remotes are converted to HTTPS; a trailing `.git` is stripped.
/// Non-GitHub remotes yield `None`.
#[must_use]
pub fn github_web_url(remote: &str) -> Option<String> {
    let remote = remote.trim();
    let url = remote
        .strip_prefix("git@github.com:")
        .map(|rest| format!("https://github.com/{rest}"))
        .or_else(|| remote.contains("github.com").then(|| remote.to_string()))?;
    let url = url.strip_suffix(".git").unwrap_or(&url);
    Some(url.trim_end_matches('/').to_string())
}

/// Extracts the `owner/repo` slug from a GitHub web URL.
#[must_use]
pub fn github_repo_slug(url: &str) -> Option<String> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let repo = segments.next()?;
    let owner = segments.next()?;
    if owner.is_empty() || repo.is_empty() || owner.contains(':') {
        return None;
    }
    Some(format!("{owner}/{repo}"))
}

/// Parses `gh issue list --json number` output into an open-issue count.
#[must_use]
pub fn parse_issue_count(json: &str) -> Option<u32> {
    let issues: Vec<serde_json::Value> = serde_json::from_str(json).ok()?;
    u32::try_from(issues.len()).ok()
}

/// Queries the open-issue count for `slug` ("owner/repo").
///
/// Returns `None` whenever the tracker is unavailable for any reason.
pub async fn open_issue_count(slug: &str, timeout: Duration) -> Option<u32> {
    let builder = match ProcessBuilder::which("gh") {
        Ok(builder) => builder,
        Err(e) => {
            debug!(error = %e, "issue tracker unavailable");
            return None;
        }
    };

    let outcome = builder
        .args([
            "issue", "list", "--repo", slug, "--state", "open", "--json", "number",
        ])
        .env("GH_PROMPT_DISABLED", "1")
        .env("NO_COLOR", "1")
        .capture_output()
        .timeout(timeout)
        .name("gh issue list")
        .run()
        .await;

    match outcome {
        Ok(out) => parse_issue_count(out.stdout()),
        Err(e) => {
            debug!(repo = %slug, error = %e, "issue lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests;
