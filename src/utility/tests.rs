// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::time::relative_time;
use std::time::{Duration, SystemTime};

fn now_at(epoch_secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(epoch_secs)
}

#[test]
fn test_relative_time_buckets() {
    let now = now_at(10_000_000);
    let at = |ago: i64| 10_000_000 - ago;

    assert_eq!(relative_time(at(0), now), "just now");
    assert_eq!(relative_time(at(59), now), "just now");
    assert_eq!(relative_time(at(60), now), "1m ago");
    assert_eq!(relative_time(at(3_599), now), "59m ago");
    assert_eq!(relative_time(at(3_600), now), "1h ago");
    assert_eq!(relative_time(at(86_399), now), "23h ago");
    assert_eq!(relative_time(at(86_400), now), "1d ago");
    assert_eq!(relative_time(at(604_799), now), "6d ago");
    assert_eq!(relative_time(at(604_800), now), "1w ago");
    assert_eq!(relative_time(at(2_591_999), now), "4w ago");
    assert_eq!(relative_time(at(2_592_000), now), "1mo ago");
    assert_eq!(relative_time(at(31_000_000), now), "11mo ago");
}

#[test]
fn test_relative_time_future_timestamp() {
    // Clock skew: a commit stamped "in the future" must not underflow.
    let now = now_at(1_000);
    assert_eq!(relative_time(5_000, now), "just now");
}
