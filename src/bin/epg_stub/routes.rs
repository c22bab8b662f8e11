//! Route table of the stub backend.

use axum::routing::{get, post};

use super::handlers_browse::*;
use super::handlers_dashboards::*;
use super::handlers_ingest::*;
use super::handlers_system::*;
use super::*;

pub(super) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        // dashboards
        .route("/ebudget", post(ebudget))
        .route("/carousel", post(carousel))
        .route("/status", post(status))
        .route("/service/info", post(service_info))
        .route("/service/ingest", post(service_ingest))
        .route("/export/:file", get(export))
        // chunk flow
        .route("/carousel/upload", post(chunk_upload))
        .route("/carousel/save", post(chunk_save))
        .route("/carousel/upnsave", post(chunk_upnsave))
        .route("/carousel/browse", post(chunk_list))
        .route("/carousel/delete", post(chunk_delete))
        .route("/carousel/play", post(chunk_play))
        .route("/carousel/pause", post(chunk_pause))
        .route("/carousel/:target", get(chunk_download))
        .route("/dump/:target", get(chunk_dump))
        // scheme flow
        .route("/scheme", post(current_scheme))
        .route("/scheme/upload", post(scheme_upload))
        .route("/scheme/validate", post(scheme_commit))
        .route("/scheme/prepare", post(scheme_prepare))
        .route("/scheme/action", post(scheme_action))
        .route("/scheme/browse", post(scheme_list))
        .route("/scheme/delete", post(scheme_delete))
        // system
        .route("/git", post(update_check))
        .route("/maintenance", post(maintenance))
        .route("/announce", post(announce))
        .route("/stub/services", post(control_services))
        .with_state(state)
}
