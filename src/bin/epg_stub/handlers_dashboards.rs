use std::time::Duration;

use super::*;

async fn poll_delay(state: &AppState) {
    let delay = state.backend.read().await.poll_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

pub(super) async fn ebudget(State(state): State<Arc<AppState>>) -> Json<Value> {
    poll_delay(&state).await;
    let mut b = state.backend.write().await;
    b.polls += 1;
    let polls = b.polls as i64;
    let data: Vec<Value> = b
        .services
        .iter()
        .map(|s| {
            let budget: Vec<i64> = (0..12).map(|i| (s.id as i64 * 7 + i * 13 + polls) % 100).collect();
            json!({
                "id": s.id,
                "name": s.name,
                "budget": budget,
                "status": s.status,
                "update": now_stamp(),
            })
        })
        .collect();
    Json(json!({
        "timestamp": now_stamp(),
        "status": b.services_status,
        "data": data,
    }))
}

pub(super) async fn carousel(State(state): State<Arc<AppState>>) -> Json<Value> {
    poll_delay(&state).await;
    let b = state.backend.read().await;
    let files: Vec<Value> = b
        .chunks
        .values()
        .filter(|c| c.playing)
        .map(|c| {
            json!({
                "title": c.title,
                "pid": c.pid,
                "size": c.bytes.len(),
                "bitrate": 8 * c.bytes.len() as u64,
                "last": now_stamp(),
                "tdt": 0,
                "pcr": 0,
            })
        })
        .collect();
    let total: u64 = files
        .iter()
        .filter_map(|f| f["bitrate"].as_u64())
        .sum::<u64>()
        + 350_000;
    Json(json!({
        "timestamp": now_stamp(),
        "status": 0,
        "message": "",
        "start": b.started,
        "timing": {"overshootProtection": 1},
        "streams": [
            {
                "addr": "239.1.1.1",
                "port": 1234,
                "bitrate": total,
                "tdt": 1,
                "pcr": true,
                "last": now_stamp(),
                "files": files,
            }
        ],
    }))
}

pub(super) async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    poll_delay(&state).await;
    let b = state.backend.read().await;
    let current = b
        .current_scheme
        .as_ref()
        .map(|s| s.meta.description.clone())
        .unwrap_or_else(|| "no scheme loaded".to_string());
    let db_status = if b.services_status == 3 { 2 } else { 0 };
    Json(json!({
        "timestamp": now_stamp(),
        "systemStart": b.started,
        "version": {"epg-stub": env!("CARGO_PKG_VERSION"), "playout": null},
        "modules": {
            "epg": {"status": 0, "message": current, "report": {}},
            "playout": {
                "status": 0,
                "message": "running",
                "report": {"chunks": b.chunks.len(), "streams": 1, "detail": {"nested": true}},
            },
            "ntp": {"status": 0, "message": "synchronized", "report": {"offset": "0.001"}},
            "database": {
                "status": db_status,
                "message": "connected",
                "report": {"services": b.services.len()},
            },
        },
    }))
}

pub(super) async fn service_info(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let b = state.backend.read().await;
    let id = form.get("id").map(String::as_str).unwrap_or("");
    let Some(svc) = b.services.iter().find(|s| s.id.to_string() == id) else {
        // Unknown services come back without a name.
        return Json(json!({"channel_id": id}));
    };
    Json(json!({
        "name": svc.name,
        "channel_id": svc.id,
        "codepage": "ISO-8859-9",
        "language": "eng",
        "maxsegments": 8,
        "grabber": {"update": 6, "url": format!("http://grabber.local/{}", svc.id)},
        "parser": "xmltv",
        "events": [
            {"timeSpan": "20:00-20:45", "title": "News", "subtitle": ""},
            {"timeSpan": "20:45-22:15", "title": "Feature film", "subtitle": "Premiere"},
        ],
    }))
}

pub(super) async fn service_ingest(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let upload = match read_single(multipart).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let b = state.backend.read().await;
    let id = upload.fields.get("id").cloned().unwrap_or_default();
    if !b.services.iter().any(|s| s.id.to_string() == id) {
        return Json(json!({"success": false, "message": format!("unknown service {}", id)}))
            .into_response();
    }
    let errors = content_errors(&upload.bytes);
    if !errors.is_empty() {
        return Json(json!({"success": false, "message": errors.join("; ")})).into_response();
    }
    Json(json!({
        "success": true,
        "message": format!("{} queued for service {}", upload.file_name, id),
    }))
    .into_response()
}

/// Two fixed programmes per service, the same ones `service/info` lists.
const PROGRAMMES: [(&str, &str, &str); 2] =
    [("2000", "2045", "News"), ("2045", "2215", "Feature film")];

fn xmltv(services: &[&StubService]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<tv>\n");
    for svc in services {
        out.push_str(&format!(
            "  <channel id=\"{}\"><display-name>{}</display-name></channel>\n",
            svc.id, svc.name
        ));
    }
    for svc in services {
        for (start, stop, title) in PROGRAMMES {
            out.push_str(&format!(
                "  <programme channel=\"{}\" start=\"{}\" stop=\"{}\"><title>{}</title></programme>\n",
                svc.id, start, stop, title
            ));
        }
    }
    out.push_str("</tv>\n");
    out
}

fn csv(svc: &StubService) -> String {
    let mut out = String::from("channel,start,stop,title\n");
    for (start, stop, title) in PROGRAMMES {
        out.push_str(&format!("{},{},{},{}\n", svc.id, start, stop, title));
    }
    out
}

/// `GET /export/<channel>.xml`, `/export/<channel>.csv` and `/export/all.xml`.
pub(super) async fn export(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Response {
    let b = state.backend.read().await;
    if file == "all.xml" {
        return text(xmltv(&b.services.iter().collect::<Vec<_>>()));
    }
    let Some((id, ext)) = file.rsplit_once('.') else {
        return not_found();
    };
    let Some(svc) = b.services.iter().find(|s| s.id.to_string() == id) else {
        return not_found();
    };
    match ext {
        "xml" => text(xmltv(&[svc])),
        "csv" => text(csv(svc)),
        _ => not_found(),
    }
}

/// Test control: reshape the services report.
pub(super) async fn control_services(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut b = state.backend.write().await;
    if let Some(count) = form.get("count") {
        match count.parse() {
            Ok(n) => b.resize_services(n),
            Err(_) => return bad_request("count must be a number"),
        }
    }
    if let Some(status) = form.get("status") {
        match status.parse() {
            Ok(s) => b.services_status = s,
            Err(_) => return bad_request("status must be a number"),
        }
    }
    if let Some(delay) = form.get("delay_ms") {
        match delay.parse() {
            Ok(d) => b.poll_delay_ms = d,
            Err(_) => return bad_request("delay_ms must be a number"),
        }
    }
    Json(json!({"success": true, "services": b.services.len()})).into_response()
}
