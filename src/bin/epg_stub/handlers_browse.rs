use super::*;

pub(super) async fn chunk_list(State(state): State<Arc<AppState>>) -> Json<Value> {
    let b = state.backend.read().await;
    let list: Vec<Value> = b
        .chunks
        .iter()
        .map(|(target, c)| {
            let playing = u8::from(c.playing);
            json!({
                "target": target,
                "timestamp": c.timestamp,
                "meta": {"title": c.title, "dst": c.dst},
                "pid": c.pid,
                "playing": playing,
                "ets": c.ets,
            })
        })
        .collect();
    Json(Value::Array(list))
}

fn scheme_json(target: Option<&str>, s: &StoredScheme) -> Value {
    let mut v = json!({
        "timestamp": s.timestamp,
        "description": s.meta.description,
        "channel": s.meta.channel,
        "eit": s.meta.eit,
        "rule": s.meta.rule,
        "source": s.meta.source,
    });
    if let (Some(target), Some(obj)) = (target, v.as_object_mut()) {
        obj.insert("target".to_string(), json!(target));
    }
    v
}

pub(super) async fn scheme_list(State(state): State<Arc<AppState>>) -> Json<Value> {
    let b = state.backend.read().await;
    let list = b
        .schemes
        .iter()
        .map(|(target, s)| scheme_json(Some(target), s))
        .collect();
    Json(Value::Array(list))
}

pub(super) async fn current_scheme(State(state): State<Arc<AppState>>) -> Json<Value> {
    let b = state.backend.read().await;
    match &b.current_scheme {
        Some(s) => Json(scheme_json(None, s)),
        None => Json(json!({})),
    }
}

fn target_of(form: &HashMap<String, String>) -> String {
    form.get("target").cloned().unwrap_or_default()
}

fn ack(success: bool, target: &str) -> Json<Value> {
    Json(json!({"success": success, "target": target}))
}

pub(super) async fn chunk_delete(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let target = target_of(&form);
    let removed = state.backend.write().await.chunks.remove(&target).is_some();
    ack(removed, &target)
}

pub(super) async fn chunk_play(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    set_playing(&state, &target_of(&form), true).await
}

pub(super) async fn chunk_pause(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    set_playing(&state, &target_of(&form), false).await
}

async fn set_playing(state: &AppState, target: &str, playing: bool) -> Json<Value> {
    let mut b = state.backend.write().await;
    match b.chunks.get_mut(target) {
        Some(c) if c.ets => {
            c.playing = playing;
            ack(true, target)
        }
        _ => ack(false, target),
    }
}

pub(super) async fn scheme_delete(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let target = target_of(&form);
    let removed = state.backend.write().await.schemes.remove(&target).is_some();
    ack(removed, &target)
}

pub(super) async fn chunk_dump(
    State(state): State<Arc<AppState>>,
    Path(target): Path<String>,
) -> Response {
    let b = state.backend.read().await;
    let Some(c) = b.chunks.get(&target) else {
        return not_found();
    };
    let mut out = format!(
        "chunk {}\ntitle: {}\ndestination: {}\npid: 0x{:04x}\nsize: {}\n\n",
        target,
        c.title,
        c.dst,
        c.pid,
        c.bytes.len()
    );
    out.push_str(&String::from_utf8_lossy(&c.bytes));
    text(out)
}

pub(super) async fn chunk_download(
    State(state): State<Arc<AppState>>,
    Path(target): Path<String>,
) -> Response {
    let b = state.backend.read().await;
    match b.chunks.get(&target) {
        Some(c) => octets(c.bytes.clone()),
        None => not_found(),
    }
}
