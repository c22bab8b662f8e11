//! Panel-neutral status report consumed by the reconciler.

/// Maximum number of samples kept in an entry's numeric series.
pub const SERIES_LIMIT: usize = 48;

pub type EntryId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverallState {
    Ok,
    Degraded,
    Error,
    Fatal,
}

impl OverallState {
    pub fn label(self) -> &'static str {
        match self {
            OverallState::Ok => "ok",
            OverallState::Degraded => "degraded",
            OverallState::Error => "error",
            OverallState::Fatal => "fatal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryState {
    Ok,
    Warn,
    Error,
}

impl EntryState {
    pub fn label(self) -> &'static str {
        match self {
            EntryState::Ok => "ok",
            EntryState::Warn => "warn",
            EntryState::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// Stable identity; the only safe correlation key across refreshes.
    pub id: EntryId,
    pub display_name: String,
    pub series: Vec<i64>,
    pub state: EntryState,
    pub last_update: String,
}

impl Entry {
    pub fn new(
        id: impl Into<EntryId>,
        display_name: impl Into<String>,
        series: Vec<i64>,
        state: EntryState,
        last_update: impl Into<String>,
    ) -> Self {
        let mut series = series;
        if series.len() > SERIES_LIMIT {
            series.drain(..series.len() - SERIES_LIMIT);
        }
        Self {
            id: id.into(),
            display_name: display_name.into(),
            series,
            state,
            last_update: last_update.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusReport {
    pub timestamp: String,
    pub overall: OverallState,
    /// Banner text for the fatal case.
    pub message: Option<String>,
    pub entries: Vec<Entry>,
}

impl StatusReport {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
