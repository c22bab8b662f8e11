use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "epg-console.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,

    /// Period of every dashboard poll.
    pub poll_interval_ms: u64,

    /// Widest grid the services panel will lay out.
    pub max_columns: usize,

    /// Log directory for the interactive console (which owns the terminal).
    pub log_dir: PathBuf,

    pub timeouts: Timeouts,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            poll_interval_ms: 60_000,
            max_columns: 6,
            log_dir: PathBuf::from("logs"),
            timeouts: Timeouts::default(),
        }
    }
}

/// Per-call budgets in milliseconds, sized to the expected backend cost.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub services_ms: u64,
    pub carousel_ms: u64,
    pub system_ms: u64,
    pub detail_ms: u64,
    pub upload_ms: u64,
    pub commit_ms: u64,
    pub browse_ms: u64,
    pub target_ms: u64,
    pub activate_ms: u64,
    pub update_ms: u64,
    pub announce_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            services_ms: 8_000,
            carousel_ms: 4_000,
            system_ms: 100_000,
            detail_ms: 3_000,
            upload_ms: 10_000,
            commit_ms: 5_000,
            browse_ms: 5_000,
            target_ms: 2_000,
            activate_ms: 120_000,
            update_ms: 5_000,
            announce_ms: 5_000,
        }
    }
}

impl Timeouts {
    pub fn services(&self) -> Duration {
        Duration::from_millis(self.services_ms)
    }
    pub fn carousel(&self) -> Duration {
        Duration::from_millis(self.carousel_ms)
    }
    pub fn system(&self) -> Duration {
        Duration::from_millis(self.system_ms)
    }
    pub fn detail(&self) -> Duration {
        Duration::from_millis(self.detail_ms)
    }
    pub fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }
    pub fn commit(&self) -> Duration {
        Duration::from_millis(self.commit_ms)
    }
    pub fn browse(&self) -> Duration {
        Duration::from_millis(self.browse_ms)
    }
    pub fn target(&self) -> Duration {
        Duration::from_millis(self.target_ms)
    }
    pub fn activate(&self) -> Duration {
        Duration::from_millis(self.activate_ms)
    }
    pub fn update(&self) -> Duration {
        Duration::from_millis(self.update_ms)
    }
    pub fn announce(&self) -> Duration {
        Duration::from_millis(self.announce_ms)
    }
}

impl ConsoleConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] in the
    /// current directory when no path is given. A missing default file yields
    /// defaults; an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let bytes =
            std::fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
        let cfg: ConsoleConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config {}", path.display()))?;
        if cfg.max_columns == 0 {
            anyhow::bail!("config {}: max_columns must be at least 1", path.display());
        }
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/model/config_tests.rs"]
mod tests;
