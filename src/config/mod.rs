// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for repodash.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. repodash.toml (cwd)
//! 3. --config FILE (repeatable)
//! 4. REPODASH_* env vars
//! 5. CLI overrides (--root)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REPODASH_SCAN_ROOT=/srv/git     → scan.root = "/srv/git"
//! REPODASH_SCAN_WORKERS=4         → scan.workers = 4
//! REPODASH_TRACKER_ENABLED=false  → tracker.enabled = false
//! ```

pub mod loader;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scan engine options.
    pub scan: ScanConfig,
    /// Guarded-mutation options.
    pub ops: OpsConfig,
    /// Issue-tracker lookup options.
    pub tracker: TrackerConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repodash::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("repodash.toml")
    ///     .with_env_prefix("REPODASH")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero worker-pool width or zero timeouts.
    pub fn resolve_and_validate(&self) -> Result<()> {
        let nonzero = |section: &str, key: &str, value: u64| {
            if value == 0 {
                Err(ConfigError::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    message: "must be at least 1".to_string(),
                })
            } else {
                Ok(())
            }
        };
        nonzero(
            "scan",
            "workers",
            u64::try_from(self.scan.workers).unwrap_or(u64::MAX),
        )?;
        nonzero("scan", "query_timeout_secs", self.scan.query_timeout_secs)?;
        nonzero("ops", "fetch_timeout_secs", self.ops.fetch_timeout_secs)?;
        nonzero("ops", "pull_timeout_secs", self.ops.pull_timeout_secs)?;
        nonzero("tracker", "timeout_secs", self.tracker.timeout_secs)?;
        Ok(())
    }

    /// Format configuration options for display, deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("scan.root", self.scan.root.display().to_string());
        options.insert("scan.workers", self.scan.workers.to_string());
        options.insert(
            "scan.query_timeout_secs",
            self.scan.query_timeout_secs.to_string(),
        );
        options.insert("scan.sort", self.scan.sort.to_string());
        options.insert(
            "ops.fetch_timeout_secs",
            self.ops.fetch_timeout_secs.to_string(),
        );
        options.insert(
            "ops.pull_timeout_secs",
            self.ops.pull_timeout_secs.to_string(),
        );
        options.insert("tracker.enabled", self.tracker.enabled.to_string());
        options.insert("tracker.timeout_secs", self.tracker.timeout_secs.to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Result ordering for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most recent tip commit first.
    #[default]
    Recent,
    /// Alphabetical by repository name (the scan engine's native order).
    Alpha,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recent => write!(f, "recent"),
            Self::Alpha => write!(f, "alpha"),
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "alpha" => Ok(Self::Alpha),
            _ => Err(ConfigError::InvalidValue {
                section: "scan".to_string(),
                key: "sort".to_string(),
                message: format!("expected 'recent' or 'alpha', got '{s}'"),
            }),
        }
    }
}

/// Scan engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Directory whose immediate subdirectories are scanned.
    pub root: PathBuf,
    /// Worker-pool width for concurrent extraction, independent of the
    /// repository count.
    pub workers: usize,
    /// Wall-clock timeout for each read-only git query.
    pub query_timeout_secs: u64,
    /// Default result ordering for presentation.
    pub sort: SortMode,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            workers: 10,
            query_timeout_secs: 10,
            sort: SortMode::default(),
        }
    }
}

impl ScanConfig {
    /// Per-query timeout as a `Duration`.
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

/// Guarded-mutation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpsConfig {
    /// Timeout for remote-ref refresh (`git fetch --all`).
    pub fetch_timeout_secs: u64,
    /// Timeout for remote merge (`git pull`) — longer, it may transfer
    /// more data and run a merge.
    pub pull_timeout_secs: u64,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 60,
            pull_timeout_secs: 120,
        }
    }
}

impl OpsConfig {
    /// Fetch timeout as a `Duration`.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Pull timeout as a `Duration`.
    #[must_use]
    pub const fn pull_timeout(&self) -> Duration {
        Duration::from_secs(self.pull_timeout_secs)
    }
}

/// Issue-tracker lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Whether to query the `gh` CLI for open-issue counts during scans.
    pub enabled: bool,
    /// Timeout for one tracker lookup.
    pub timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 15,
        }
    }
}

impl TrackerConfig {
    /// Lookup timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A disabled tracker, for callers that only need the scan core.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            timeout_secs: 15,
        }
    }
}

/// Default scan root: `~/git`, falling back to the current directory when
/// no home directory can be determined.
fn default_root() -> PathBuf {
    #[cfg(windows)]
    let home = std::env::var_os("USERPROFILE");
    #[cfg(not(windows))]
    let home = std::env::var_os("HOME");
    home.map_or_else(|| PathBuf::from("."), |h| PathBuf::from(h).join("git"))
}
