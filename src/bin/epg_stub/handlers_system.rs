use super::*;

pub(super) async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub(super) async fn update_check(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let mut b = state.backend.write().await;
    let apply = form.get("update").is_some_and(|v| v == "1");
    match (b.update_available, apply) {
        (true, true) => {
            b.update_available = false;
            Json(json!({"success": 1, "message": "update installed"}))
        }
        (true, false) => Json(json!({"success": 2, "message": "a newer version is available"})),
        (false, _) => Json(json!({"success": 1, "message": "software is up to date"})),
    }
}

pub(super) async fn maintenance(multipart: Multipart) -> Response {
    let upload = match read_single(multipart).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let errors = content_errors(&upload.bytes);
    if !errors.is_empty() {
        return Json(json!({"success": false, "message": errors.join("; ")})).into_response();
    }
    Json(json!({
        "success": true,
        "message": format!("{} applied", upload.file_name),
        "pod": "epg-0",
        "content": format!("maintenance report\nfile: {}\nbytes: {}\n", upload.file_name, upload.bytes.len()),
    }))
    .into_response()
}

fn announce_json(b: &Backend) -> Value {
    let [(present_publish, present), (following_publish, following)] = &b.announce;
    json!({
        "success": true,
        "announce": {
            "present": {"publish": present_publish, "text": present},
            "following": {"publish": following_publish, "text": following},
        },
    })
}

/// Reads the announcements, or saves them when the form carries them.
pub(super) async fn announce(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let mut b = state.backend.write().await;
    if let (Some(present), Some(following)) = (form.get("present"), form.get("following")) {
        b.announce = [
            (form.get("present_publish").is_some_and(|v| v == "1"), present.clone()),
            (form.get("following_publish").is_some_and(|v| v == "1"), following.clone()),
        ];
    }
    Json(announce_json(&b))
}
