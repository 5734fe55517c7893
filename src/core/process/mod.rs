// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async subprocess spawning with bounded wall-clock time.
//!
//! ```text
//! ProcessBuilder::which("git")
//!   .args() .cwd() .env() .capture_output() .timeout()
//!   .run()
//!       --> tokio::process::Command
//!           stream stdout/stderr lines
//!           timeout => kill + timed_out flag
//!       --> ProcessOutput { exit_code, stdout, stderr, timed_out }
//! ```
//!
//! Every invocation is isolated: the timeout cancels only its own child
//! process, and the working directory override never touches the caller's
//! own cwd.

pub mod builder;
mod io;
mod runner;
