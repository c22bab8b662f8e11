use super::*;

use time::macros::format_description;

#[derive(Clone)]
pub(super) struct AppState {
    pub(super) backend: Arc<RwLock<Backend>>,
}

#[derive(Clone, Debug)]
pub(super) struct StubService {
    pub(super) id: u32,
    pub(super) name: String,
    pub(super) status: i64,
}

#[derive(Clone, Debug)]
pub(super) struct StoredChunk {
    pub(super) timestamp: String,
    pub(super) title: String,
    pub(super) dst: String,
    pub(super) pid: u32,
    pub(super) playing: bool,
    pub(super) ets: bool,
    pub(super) bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub(super) struct SchemeMeta {
    pub(super) source: String,
    pub(super) channel: usize,
    pub(super) eit: usize,
    pub(super) rule: usize,
    pub(super) description: String,
}

#[derive(Clone, Debug)]
pub(super) struct StoredScheme {
    pub(super) timestamp: String,
    pub(super) meta: SchemeMeta,
}

#[derive(Clone, Debug)]
pub(super) struct StagedChunk {
    pub(super) md5: String,
    pub(super) title: String,
    pub(super) dst: String,
    pub(super) bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub(super) struct StagedScheme {
    pub(super) mtime: String,
    pub(super) meta: SchemeMeta,
    /// Archived scheme this was prepared from, if any.
    pub(super) target: Option<String>,
}

/// Everything the stub remembers between requests.
#[derive(Debug)]
pub(super) struct Backend {
    pub(super) started: String,
    pub(super) services: Vec<StubService>,
    pub(super) services_status: i64,
    /// Artificial latency of dashboard polls, for timeout tests.
    pub(super) poll_delay_ms: u64,
    pub(super) polls: u64,
    pub(super) chunks: BTreeMap<String, StoredChunk>,
    pub(super) schemes: BTreeMap<String, StoredScheme>,
    pub(super) staged_chunk: Option<StagedChunk>,
    pub(super) staged_scheme: Option<StagedScheme>,
    /// Fingerprint of the last committed scheme; loadable until the next upload.
    pub(super) committed_scheme: Option<StagedScheme>,
    pub(super) current_scheme: Option<StoredScheme>,
    pub(super) mtime: u64,
    pub(super) update_available: bool,
    pub(super) announce: [(bool, String); 2],
}

impl Backend {
    pub(super) fn new(services: usize, update_available: bool) -> Self {
        Self {
            started: now_stamp(),
            services: (0..services).map(seed_service).collect(),
            services_status: 0,
            poll_delay_ms: 0,
            polls: 0,
            chunks: BTreeMap::new(),
            schemes: BTreeMap::new(),
            staged_chunk: None,
            staged_scheme: None,
            committed_scheme: None,
            current_scheme: None,
            mtime: 1_700_000_000,
            update_available,
            announce: [(false, String::new()), (false, String::new())],
        }
    }

    /// Monotonic modification time used as the scheme fingerprint.
    pub(super) fn next_mtime(&mut self) -> String {
        self.mtime += 1;
        self.mtime.to_string()
    }

    pub(super) fn resize_services(&mut self, count: usize) {
        let have = self.services.len();
        if count < have {
            self.services.truncate(count);
        } else {
            self.services.extend((have..count).map(seed_service));
        }
    }
}

fn seed_service(i: usize) -> StubService {
    StubService {
        id: 100 + i as u32,
        name: format!("Channel {}", i + 1),
        status: 0,
    }
}

pub(super) fn now_stamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_default()
}

/// Fresh archive target name.
pub(super) fn new_target() -> String {
    let mut buf = [0u8; 6];
    if getrandom::getrandom(&mut buf).is_err() {
        // Fall back to the clock; uniqueness within one stub run is enough.
        let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
        buf.copy_from_slice(&nanos.to_le_bytes()[..6]);
    }
    buf.iter().map(|b| format!("{:02x}", b)).collect()
}
