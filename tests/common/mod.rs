use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use epg_console::model::ConsoleConfig;
use epg_console::remote::BackendClient;

pub struct StubGuard {
    pub base_url: String,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for StubGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl StubGuard {
    #[allow(dead_code)]
    pub fn config(&self) -> ConsoleConfig {
        ConsoleConfig {
            base_url: self.base_url.clone(),
            poll_interval_ms: 50,
            ..ConsoleConfig::default()
        }
    }

    #[allow(dead_code)]
    pub fn client(&self) -> Result<BackendClient> {
        BackendClient::new(&self.config())
    }

    /// Reshape the stub's services report (`count`, `status`, `delay_ms`).
    #[allow(dead_code)]
    pub async fn control(&self, fields: &[(&str, &str)]) -> Result<()> {
        let resp = reqwest::Client::new()
            .post(format!("{}/stub/services", self.base_url))
            .form(fields)
            .send()
            .await
            .context("POST /stub/services")?;
        anyhow::ensure!(
            resp.status().is_success(),
            "stub control failed: {}",
            resp.status()
        );
        Ok(())
    }
}

pub fn spawn_stub() -> Result<StubGuard> {
    spawn_stub_with(&[])
}

pub fn spawn_stub_with(extra: &[&str]) -> Result<StubGuard> {
    let data_dir = tempfile::tempdir().context("create stub tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");

    let child = Command::new(env!("CARGO_BIN_EXE_epg-stub"))
        .args(["--addr", "127.0.0.1:0", "--addr-file"])
        .arg(&addr_file)
        .args(extra)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn epg-stub")?;

    // Owned before the first fallible step so the child is reaped on error.
    let mut guard = StubGuard {
        base_url: String::new(),
        _data_dir: data_dir,
        child,
    };
    guard.base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&guard.base_url)?;
    Ok(guard)
}

/// Runtime for driving the async client from a plain `#[test]`.
#[allow(dead_code)]
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("build tokio runtime")
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("stub did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}
