// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Safe-mutation subsystem.
//!
//! ```text
//! request (kind, repo, confirmed)
//!        |
//!        v
//! validator::validate()    fresh status, never a cached snapshot
//!        |                 Refresh => Allowed; Merge => clean or confirmed
//!        v
//! OperationGate::try_admit()   per-repo exclusion, Busy instead of queueing
//!        |
//!        v
//! MutationExecutor::execute()  fetch/pull subprocess, kind-specific timeout
//!        |
//!        v
//! OperationResult { success, output, reason, fresh StatusRecord }
//! ```

pub mod executor;
pub mod gate;
pub mod validator;

#[cfg(test)]
mod tests;

use serde::Serialize;

/// The two guarded mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Update locally cached remote refs (`git fetch --all`).
    /// Read-only against the working tree.
    Refresh,
    /// Integrate upstream changes (`git pull`).
    /// Requires a clean working tree or explicit confirmation.
    Merge,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Refresh => write!(f, "refresh"),
            Self::Merge => write!(f, "merge"),
        }
    }
}
