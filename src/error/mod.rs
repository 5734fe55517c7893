// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!               DashError (~24 bytes)
//!                      |
//!    +--------+-------+-------+--------+--------+
//!    |        |       |       |        |        |
//!    v        v       v       v        v        v
//!   Git     Proc     Cfg     Fs     Request  Io/Other
//!   Box     Box      Box     Box     Box     Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git      CommandFailed, RepoNotFound
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout
//!   Config   InvalidValue
//!   Fs       NotFound, PermissionDenied, IoError
//!   Request  InvalidName, RepoNotFound, Busy
//!
//! All variants boxed => DashError fits in 24 bytes.
//! ```
//!
//! Per-repository extraction failures are NOT part of this taxonomy: they are
//! recorded as a reason string inside the affected `StatusRecord` and never
//! abort a scan. A blocked merge is a normal decision outcome, not an error.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DashError`].
pub type DashResult<T> = std::result::Result<T, DashError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum DashError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Malformed or inadmissible caller request.
    #[error("request error: {0}")]
    Request(#[from] Box<RequestError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for DashError {
                fn from(err: $error) -> Self {
                    DashError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ProcessError => Process,
    ConfigError => Config,
    FsError => Fs,
    RequestError => Request,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Working copy not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Git command execution failed with a non-zero exit.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process exceeded its wall-clock timeout and was killed.
    ///
    /// Deliberately distinct from [`ProcessError::NonZeroExit`]: a timeout
    /// must never be reported as an ordinary command failure.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
///
/// Fatal to a scan call only when the scan root itself is affected.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Request Errors ---

/// Errors for a single caller request against the mutation boundary.
///
/// Fatal to that request only; never affects other repositories.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Repository name failed validation (path-traversal guard).
    #[error("invalid repository name: '{name}'")]
    InvalidName { name: String },

    /// No repository with that name under the scan root.
    #[error("repository not found: '{name}'")]
    RepoNotFound { name: String },

    /// Another mutation is already in flight for this repository.
    ///
    /// Requests are rejected immediately, never queued.
    #[error("operation already in progress for '{name}'")]
    Busy { name: String },
}

#[cfg(test)]
mod tests;
