// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository locator: enumerate working copies under a root directory.

use std::path::Path;
use tracing::{trace, warn};

use crate::error::{DashError, DashResult, FsError};
use crate::git::query::is_working_copy;
use crate::scan::status::RepoRef;

/// Lists every immediate subdirectory of `root` that is a git working copy,
/// ordered by name (case-insensitive).
///
/// Hidden directories and directories without git metadata are silently
/// skipped. Unreadable individual entries are skipped with a warning.
///
/// # Errors
///
/// Returns an `FsError` when the root itself cannot be read — the only
/// failure that is fatal to a scan call.
pub fn discover_repos(root: &Path) -> DashResult<Vec<RepoRef>> {
    let entries = std::fs::read_dir(root).map_err(|e| fs_error(root, e))?;

    let mut repos = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if !is_working_copy(&path) {
            trace!(path = %path.display(), "not a working copy, skipping");
            continue;
        }

        repos.push(RepoRef { name, path });
    }

    repos.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(repos)
}

/// Maps a root-level read failure onto the filesystem error taxonomy.
fn fs_error(root: &Path, e: std::io::Error) -> DashError {
    let display = root.display().to_string();
    match e.kind() {
        std::io::ErrorKind::NotFound => FsError::NotFound(display).into(),
        std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(display).into(),
        _ => FsError::IoError {
            path: display,
            source: e,
        }
        .into(),
    }
}
