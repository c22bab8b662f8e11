use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use epg_console::logging::{self, LogTarget};

use super::routes::router;
use super::types::{AppState, Backend};
use super::*;

#[derive(Parser)]
#[command(name = "epg-stub")]
#[command(about = "In-memory broadcast backend (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Number of services in the initial report
    #[arg(long, default_value_t = 8)]
    services: usize,

    /// Report a pending software update
    #[arg(long)]
    update_available: bool,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(LogTarget::Stderr)?;

    let state = Arc::new(AppState {
        backend: Arc::new(RwLock::new(Backend::new(
            args.services,
            args.update_available,
        ))),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(addr = %local_addr, services = args.services, "epg-stub listening");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
