// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operation serializer: at most one in-flight mutation per repository.
//!
//! A keyed registry of admission flags, mutated only under a single lock.
//! A second request for a busy repository fails immediately with `Busy` —
//! never queued, never blocked. The flag lives in process memory only, so a
//! crash mid-operation cannot permanently wedge a repository.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::error::{DashResult, RequestError};

/// Per-repository mutation admission registry.
#[derive(Debug, Default)]
pub struct OperationGate {
    in_flight: Mutex<HashSet<String>>,
}

impl OperationGate {
    /// Creates an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to admit a mutation for `name`.
    ///
    /// Distinct repositories are always admitted concurrently.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Busy` when a mutation for the same repository
    /// is already in flight.
    pub fn try_admit(&self, name: &str) -> DashResult<OperationPermit<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(name.to_string()) {
            debug!(repo = %name, "mutation rejected, already in flight");
            return Err(RequestError::Busy {
                name: name.to_string(),
            }
            .into());
        }
        Ok(OperationPermit {
            gate: self,
            name: name.to_string(),
        })
    }

    /// Returns whether a mutation is currently in flight for `name`.
    #[must_use]
    pub fn is_busy(&self, name: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    fn release(&self, name: &str) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }
}

/// RAII admission permit; dropping it clears the in-flight flag on every
/// exit path, including failure and timeout.
#[derive(Debug)]
pub struct OperationPermit<'a> {
    gate: &'a OperationGate,
    name: String,
}

impl Drop for OperationPermit<'_> {
    fn drop(&mut self) {
        self.gate.release(&self.name);
    }
}
