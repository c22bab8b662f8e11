use super::*;

const MIN_DESCRIPTION: usize = 5;

fn has_extension(name: &str, ext: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn chunk_errors(file_name: &str, bytes: &[u8]) -> Vec<String> {
    let mut errors = Vec::new();
    if !has_extension(file_name, "gz") {
        errors.push(format!("{}: not a chunk archive", file_name));
    }
    if bytes.is_empty() {
        errors.push("file is empty".to_string());
    }
    errors.extend(content_errors(bytes));
    errors
}

pub(super) async fn chunk_upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let upload = match read_single(multipart).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let errors = chunk_errors(&upload.file_name, &upload.bytes);
    let title = content_field(&upload.bytes, "title").unwrap_or_else(|| file_stem(&upload.file_name));
    let dst = content_field(&upload.bytes, "dst").unwrap_or_else(|| "0x0d00".to_string());
    let md5 = content_hash(&upload.bytes);

    let mut b = state.backend.write().await;
    // Any validation replaces what was staged before.
    b.staged_chunk = errors.is_empty().then(|| StagedChunk {
        md5: md5.clone(),
        title: title.clone(),
        dst: dst.clone(),
        bytes: upload.bytes.clone(),
    });
    let md5 = if errors.is_empty() { md5 } else { String::new() };
    Json(json!({
        "error": errors,
        "source": upload.file_name,
        "title": title,
        "dst": dst,
        "size": upload.bytes.len(),
        "md5": md5,
    }))
    .into_response()
}

pub(super) async fn chunk_save(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let mut b = state.backend.write().await;
    let md5 = form.get("md5").map(String::as_str).unwrap_or("");
    let Some(staged) = b.staged_chunk.take_if(|s| s.md5 == md5) else {
        return Json(json!({"success": false, "message": "chunk is not the one last validated"}));
    };
    store_chunk(&mut b, staged);
    Json(json!({"success": true}))
}

fn store_chunk(b: &mut Backend, staged: StagedChunk) -> String {
    let target = new_target();
    let pid = 0x100 + b.chunks.len() as u32;
    b.chunks.insert(
        target.clone(),
        StoredChunk {
            timestamp: now_stamp(),
            title: staged.title,
            dst: staged.dst,
            pid,
            playing: false,
            ets: true,
            bytes: staged.bytes,
        },
    );
    target
}

pub(super) async fn chunk_upnsave(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let batch = match read_multipart(multipart).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let mut b = state.backend.write().await;
    let results: Vec<Value> = batch
        .files
        .into_iter()
        .map(|(name, bytes)| {
            let errors = chunk_errors(&name, &bytes);
            if !errors.is_empty() {
                return json!({"success": false, "message": format!("{}: {}", name, errors.join("; "))});
            }
            let staged = StagedChunk {
                md5: content_hash(&bytes),
                title: content_field(&bytes, "title").unwrap_or_else(|| file_stem(&name)),
                dst: content_field(&bytes, "dst").unwrap_or_else(|| "0x0d00".to_string()),
                bytes,
            };
            let target = store_chunk(&mut b, staged);
            json!({"success": 1, "message": format!("{} saved as {}", name, target)})
        })
        .collect();
    Json(Value::Array(results)).into_response()
}

fn scheme_meta(file_name: &str, bytes: &[u8]) -> SchemeMeta {
    SchemeMeta {
        source: file_name.to_string(),
        channel: content_count(bytes, "service"),
        eit: content_count(bytes, "eit"),
        rule: content_count(bytes, "rule"),
        description: content_field(bytes, "description").unwrap_or_default(),
    }
}

fn scheme_response(meta: &SchemeMeta, errors: &[String], mtime: &str) -> Value {
    json!({
        "errorList": errors,
        "source": meta.source,
        "channel": meta.channel,
        "eit": meta.eit,
        "rule": meta.rule,
        "description": meta.description,
        "mtime": mtime,
    })
}

pub(super) async fn scheme_upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let upload = match read_single(multipart).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let mut errors = Vec::new();
    if !has_extension(&upload.file_name, "xls") {
        errors.push(format!("{}: not a spreadsheet", upload.file_name));
    }
    errors.extend(content_errors(&upload.bytes));
    let meta = scheme_meta(&upload.file_name, &upload.bytes);

    let mut b = state.backend.write().await;
    b.committed_scheme = None;
    let mtime = if errors.is_empty() {
        let mtime = b.next_mtime();
        b.staged_scheme = Some(StagedScheme {
            mtime: mtime.clone(),
            meta: meta.clone(),
            target: None,
        });
        mtime
    } else {
        b.staged_scheme = None;
        String::new()
    };
    Json(scheme_response(&meta, &errors, &mtime)).into_response()
}

pub(super) async fn scheme_commit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let description = form
        .get("description")
        .map(|d| d.trim().to_string())
        .unwrap_or_default();
    if description.chars().count() < MIN_DESCRIPTION {
        return Json(json!({"success": false, "message": "description too short"}));
    }
    let mtime = form.get("mtime").map(String::as_str).unwrap_or("");
    let mut b = state.backend.write().await;
    let Some(mut staged) = b
        .staged_scheme
        .take_if(|s| s.mtime == mtime && s.target.is_none())
    else {
        return Json(json!({"success": false, "message": "scheme is not the one last validated"}));
    };
    staged.meta.description = description;
    let target = new_target();
    b.schemes.insert(
        target.clone(),
        StoredScheme {
            timestamp: now_stamp(),
            meta: staged.meta.clone(),
        },
    );
    staged.target = Some(target);
    b.committed_scheme = Some(staged);
    Json(json!({"success": true}))
}

pub(super) async fn scheme_prepare(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let target = form.get("target").cloned().unwrap_or_default();
    let mut b = state.backend.write().await;
    let Some(stored) = b.schemes.get(&target).cloned() else {
        let errors = vec![format!("unknown scheme {}", target)];
        return Json(scheme_response(&SchemeMeta::default(), &errors, "")).into_response();
    };
    let mtime = b.next_mtime();
    b.committed_scheme = None;
    b.staged_scheme = Some(StagedScheme {
        mtime: mtime.clone(),
        meta: stored.meta.clone(),
        target: Some(target),
    });
    Json(scheme_response(&stored.meta, &[], &mtime)).into_response()
}

fn flag(form: &HashMap<String, String>, key: &str) -> bool {
    form.get(key).is_some_and(|v| v == "1")
}

fn maintenance_steps(b: &mut Backend, form: &HashMap<String, String>) -> Vec<Value> {
    let mut out = Vec::new();
    if flag(form, "stopCarousel") {
        for c in b.chunks.values_mut() {
            c.playing = false;
        }
        out.push(json!({"success": true, "message": "carousel stopped"}));
    }
    if flag(form, "deleteCarousel") {
        b.chunks.clear();
        out.push(json!({"success": true, "message": "carousel deleted"}));
    }
    if flag(form, "stopEIT") {
        out.push(json!({"success": true, "message": "EIT generator stopped"}));
    }
    if flag(form, "resetDatabase") {
        b.current_scheme = None;
        out.push(json!({"success": true, "message": "database reset"}));
    }
    out
}

pub(super) async fn scheme_action(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut b = state.backend.write().await;
    match form.get("action").map(String::as_str) {
        Some("maintain") => {
            let mut steps = maintenance_steps(&mut b, &form);
            if steps.is_empty() {
                steps.push(json!({"success": true, "message": "nothing to do"}));
            }
            Json(Value::Array(steps)).into_response()
        }
        Some("loadScheme") => {
            let mtime = form.get("mtime").map(String::as_str).unwrap_or("");
            let loadable = [b.committed_scheme.as_ref(), b.staged_scheme.as_ref()]
                .into_iter()
                .flatten()
                .find(|s| s.mtime == mtime && s.target.is_some())
                .cloned();
            let Some(scheme) = loadable else {
                return Json(json!([
                    {"success": false, "message": "scheme changed since it was validated"}
                ]))
                .into_response();
            };
            let mut steps = maintenance_steps(&mut b, &form);
            if flag(&form, "importScheme") {
                steps.push(json!({
                    "success": true,
                    "message": format!("{} services imported", scheme.meta.channel),
                }));
            }
            b.current_scheme = Some(StoredScheme {
                timestamp: now_stamp(),
                meta: scheme.meta.clone(),
            });
            steps.push(json!({
                "success": 1,
                "message": format!("scheme \"{}\" loaded", scheme.meta.description),
            }));
            Json(Value::Array(steps)).into_response()
        }
        other => bad_request(format!("unknown action {:?}", other)),
    }
}
