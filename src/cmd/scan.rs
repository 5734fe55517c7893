// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan command implementation for repodash.

use crate::cli::ScanArgs;
use crate::config::{Config, SortMode};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::scan::status::StatusRecord;

/// Main handler for the scan command.
///
/// The engine returns records in locator order; recent-first ordering is a
/// presentation concern applied here.
///
/// # Errors
///
/// Returns an error if the scan root cannot be read or output serialization
/// fails.
pub async fn run_scan_command(args: &ScanArgs, config: &Config) -> Result<()> {
    let dashboard = Dashboard::new(config);
    let mut records = dashboard.scan_all().await?;

    let sort = args.sort.unwrap_or(config.scan.sort);
    if sort == SortMode::Recent {
        records.sort_by_key(|r| std::cmp::Reverse(r.last_timestamp()));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!(
            "No working copies found under {}",
            config.scan.root.display()
        );
        return Ok(());
    }

    let name_width = records
        .iter()
        .map(|r| r.repo.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let branch_width = records
        .iter()
        .map(|r| r.branch.len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!("{:<name_width$}  {:<branch_width$}  {:>7}  {:<9}  LAST COMMIT", "NAME", "BRANCH", "CHANGES", "SYNC");
    for record in &records {
        println!(
            "{:<name_width$}  {:<branch_width$}  {:>7}  {:<9}  {}",
            record.repo.name,
            record.branch,
            changes_cell(record),
            sync_cell(record),
            commit_cell(record),
        );
        if let Some(error) = &record.error {
            println!("{:<name_width$}  ! {error}", "");
        }
    }
    Ok(())
}

fn changes_cell(record: &StatusRecord) -> String {
    match record.changes {
        Some(0) => "clean".to_string(),
        Some(count) => count.to_string(),
        None => "?".to_string(),
    }
}

fn sync_cell(record: &StatusRecord) -> String {
    match (record.ahead, record.behind) {
        (Some(0), Some(0)) => "synced".to_string(),
        (Some(ahead), Some(behind)) => {
            let mut parts = Vec::new();
            if ahead > 0 {
                parts.push(format!("↑{ahead}"));
            }
            if behind > 0 {
                parts.push(format!("↓{behind}"));
            }
            parts.join(" ")
        }
        // No upstream, or the divergence query failed
        _ => "-".to_string(),
    }
}

fn commit_cell(record: &StatusRecord) -> String {
    record.commit.as_ref().map_or_else(
        || "(no commits)".to_string(),
        |c| format!("{} {} ({}, {})", c.hash, c.message, c.author, c.relative_time),
    )
}
