//! HTTP client for the broadcast backend. This is the only place the console
//! performs network I/O; every call carries its own timeout and maps failures
//! onto [`ConsoleError`].

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::error::ConsoleError;
use crate::model::{ConsoleConfig, Timeouts};

mod http_client;

mod types;
pub use self::types::*;
mod browse;
mod dashboards;
mod ingest;
mod system;
pub use self::browse::ChunkAction;
pub use self::dashboards::ExportFormat;
pub use self::system::{UpdateChecker, UpdateState};

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    timeouts: Timeouts,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("epg-console")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeouts: config.timeouts.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }
}
