// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Human-relative time formatting for commit timestamps.
//!
//! ```text
//! < 60s   "just now"      < 7d    "3d ago"
//! < 60m   "5m ago"        < 30d   "2w ago"
//! < 24h   "4h ago"        else    "6mo ago"
//! ```

use std::time::SystemTime;

const MINUTE: i64 = 60;
const HOUR: i64 = 3600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;
const MONTH: i64 = 2_592_000;

/// Formats a unix timestamp as a relative duration from `now`.
///
/// Timestamps in the future (clock skew between machines) collapse to
/// "just now" rather than producing a negative duration.
#[must_use]
pub fn relative_time(timestamp: i64, now: SystemTime) -> String {
    let now_secs = now
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX));
    let elapsed = now_secs.saturating_sub(timestamp);

    if elapsed < MINUTE {
        "just now".to_string()
    } else if elapsed < HOUR {
        format!("{}m ago", elapsed / MINUTE)
    } else if elapsed < DAY {
        format!("{}h ago", elapsed / HOUR)
    } else if elapsed < WEEK {
        format!("{}d ago", elapsed / DAY)
    } else if elapsed < MONTH {
        format!("{}w ago", elapsed / WEEK)
    } else {
        format!("{}mo ago", elapsed / MONTH)
    }
}
