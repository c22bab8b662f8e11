//! In-memory stand-in for the broadcast backend, for development and tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json, Router};
use serde_json::{Value, json};
use tokio::sync::RwLock;

#[path = "epg_stub/types.rs"]
mod types;
use self::types::*;
#[path = "epg_stub/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "epg_stub/uploads.rs"]
mod uploads;
use self::uploads::*;
#[path = "epg_stub/handlers_dashboards.rs"]
mod handlers_dashboards;
#[path = "epg_stub/handlers_ingest.rs"]
mod handlers_ingest;
#[path = "epg_stub/handlers_browse.rs"]
mod handlers_browse;
#[path = "epg_stub/handlers_system.rs"]
mod handlers_system;
#[path = "epg_stub/routes.rs"]
mod routes;
#[path = "epg_stub/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
