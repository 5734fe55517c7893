// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetch and pull command implementations for repodash.

use crate::cli::{FetchArgs, PullArgs};
use crate::config::Config;
use crate::dashboard::{Dashboard, MergeOutcome};
use crate::error::Result;
use crate::ops::executor::OperationResult;
use crate::scan::status::StatusRecord;

/// Main handler for the fetch command.
///
/// # Errors
///
/// Returns an error for an invalid/unknown repository, a busy repository,
/// or a failed fetch.
pub async fn run_fetch_command(args: &FetchArgs, config: &Config) -> Result<()> {
    let dashboard = Dashboard::new(config);
    let result = dashboard.refresh(&args.repo).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if !result.success {
        let reason = result.reason.as_deref().unwrap_or("fetch failed");
        anyhow::bail!("fetch '{}' failed: {reason}", args.repo);
    }

    if !args.json {
        println!(
            "Fetched '{}' in {}ms ({})",
            args.repo,
            result.elapsed.as_millis(),
            sync_summary(&result.status)
        );
    }
    Ok(())
}

/// Main handler for the pull command.
///
/// A merge against a dirty working tree is blocked until the caller
/// confirms with `--yes`; a block exits non-zero so scripts notice.
///
/// # Errors
///
/// Returns an error for an invalid/unknown repository, a busy repository,
/// a blocked merge, or a failed pull.
pub async fn run_pull_command(args: &PullArgs, config: &Config) -> Result<()> {
    let dashboard = Dashboard::new(config);

    match dashboard.merge(&args.repo, args.yes).await? {
        MergeOutcome::Blocked { reason, snapshot } => {
            if args.json {
                let value = serde_json::json!({
                    "outcome": "blocked",
                    "reason": reason,
                    "snapshot": snapshot,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Blocked: {reason}");
                println!(
                    "  branch {}, {} uncommitted, {}",
                    snapshot.branch,
                    snapshot
                        .changes
                        .map_or_else(|| "?".to_string(), |c| c.to_string()),
                    sync_summary(&snapshot)
                );
                println!("Re-run with --yes to merge anyway.");
            }
            anyhow::bail!("confirmation required for '{}'", args.repo)
        }
        MergeOutcome::Executed(result) => report_pull(args, &result),
    }
}

fn report_pull(args: &PullArgs, result: &OperationResult) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    }

    if !result.success {
        let reason = result.reason.as_deref().unwrap_or("pull failed");
        anyhow::bail!("pull '{}' failed: {reason}", args.repo);
    }

    if !args.json {
        let digest = result.summary.as_deref().unwrap_or("done");
        println!(
            "Pulled '{}' in {}ms: {digest} ({})",
            args.repo,
            result.elapsed.as_millis(),
            sync_summary(&result.status)
        );
    }
    Ok(())
}

fn sync_summary(status: &StatusRecord) -> String {
    match (status.ahead, status.behind) {
        (Some(0), Some(0)) => "in sync".to_string(),
        (Some(ahead), Some(behind)) => format!("{ahead} ahead, {behind} behind"),
        _ => "no upstream".to_string(),
    }
}
