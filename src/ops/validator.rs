// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Safety validator: decide whether a mutation may run.
//!
//! The decision is a pure function of the *current* status snapshot and the
//! caller's confirmation flag — nothing is remembered between requests, so a
//! confirmed retry after a block is always re-evaluated against fresh state
//! rather than the snapshot that triggered the block.

use serde::Serialize;

use super::OperationKind;
use crate::scan::status::StatusRecord;

/// Outcome of validating one mutation request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum ValidationDecision {
    /// The operation may execute.
    Allowed,
    /// The operation needs caller confirmation. Carries the snapshot that
    /// triggered the block so the caller can render a prompt without
    /// re-scanning.
    Blocked {
        reason: String,
        snapshot: StatusRecord,
    },
}

impl ValidationDecision {
    /// Returns true for [`ValidationDecision::Allowed`].
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Validates a mutation request against the repository's current status.
///
/// - `Refresh` never blocks: fetching remote refs cannot conflict with
///   local edits.
/// - `Merge` requires a *measured* clean working tree (`changes == Some(0)`)
///   or `confirmed == true`. An unknown change count blocks: it must not be
///   conflated with clean.
#[must_use]
pub fn validate(
    kind: OperationKind,
    status: &StatusRecord,
    confirmed: bool,
) -> ValidationDecision {
    match kind {
        OperationKind::Refresh => ValidationDecision::Allowed,
        OperationKind::Merge => {
            if confirmed || status.is_clean() {
                return ValidationDecision::Allowed;
            }
            let reason = match status.changes {
                Some(count) => format!(
                    "'{}' has {count} uncommitted change(s); merging may conflict with local edits",
                    status.repo.name
                ),
                None => format!(
                    "uncommitted-change count for '{}' is unknown; refusing to merge unconfirmed",
                    status.repo.name
                ),
            };
            ValidationDecision::Blocked {
                reason,
                snapshot: status.clone(),
            }
        }
    }
}
