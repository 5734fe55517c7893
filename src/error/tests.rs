// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{DashError, DashResult, ProcessError, RequestError};

#[test]
fn test_process_timeout_display() {
    let err = ProcessError::Timeout {
        command: "git fetch --all".to_string(),
        timeout_secs: 60,
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"process 'git fetch --all' timed out after 60 seconds"
    );
}

#[test]
fn test_timeout_distinguishable_from_exit() {
    // The safe-mutation layer relies on telling these two apart by message.
    let timeout = ProcessError::Timeout {
        command: "git pull".to_string(),
        timeout_secs: 120,
    }
    .to_string();
    let exit = ProcessError::NonZeroExit {
        command: "git pull".to_string(),
        code: 1,
    }
    .to_string();
    assert!(timeout.contains("timed out"));
    assert!(!exit.contains("timed out"));
}

#[test]
fn test_busy_display() {
    let err = RequestError::Busy {
        name: "my-repo".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"operation already in progress for 'my-repo'");
}

#[test]
fn test_dash_error_size() {
    // Box<str> variants (Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<DashError>();
    assert!(size <= 24, "DashError is {size} bytes, expected <= 24");
}

#[test]
fn test_dash_result_size() {
    let size = std::mem::size_of::<DashResult<()>>();
    assert!(size <= 24, "DashResult<()> is {size} bytes, expected <= 24");
}

#[test]
fn test_boxed_from_conversions() {
    let err: DashError = RequestError::InvalidName {
        name: "../escape".to_string(),
    }
    .into();
    assert!(matches!(err, DashError::Request(_)));

    let err: DashError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(err, DashError::Io(_)));
}
