// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          Public API
//!     query.rs    mutate.rs
//!         |           |
//!         v           v
//!   read-only      fetch / pull
//!   subprocess     subprocess
//!   (timeout per   (timeout per
//!    query)         operation kind)
//!
//!   is_working_copy() --> gix (no subprocess)
//! ```
//!
//! Every status query runs as its own `git -C <repo>` subprocess under a
//! wall-clock timeout, so one slow repository can never stall another.
//! Working-copy detection is the only read that stays in-process (gix),
//! since the locator probes every subdirectory of the root.

pub mod mutate;
pub mod query;
