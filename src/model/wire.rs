//! Dashboard payloads as sent by the backend, and their mapping onto
//! [`StatusReport`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::report::{Entry, EntryState, OverallState, StatusReport};
use super::scalar::{Scalar, de_truthy};

const SERVICES_FATAL_BANNER: &str = "Connecting to database failed. Please check service!";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceReport {
    pub timestamp: String,
    pub status: i64,
    #[serde(default)]
    pub data: Vec<ServiceChannel>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceChannel {
    pub id: Scalar,
    pub name: String,
    #[serde(default)]
    pub budget: Vec<i64>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub update: Scalar,
}

impl ServiceReport {
    pub fn overall(&self) -> OverallState {
        match self.status {
            0 => OverallState::Ok,
            1 => OverallState::Degraded,
            3 => OverallState::Fatal,
            _ => OverallState::Error,
        }
    }

    pub fn into_status_report(self) -> StatusReport {
        let overall = self.overall();
        let message = (overall == OverallState::Fatal).then(|| SERVICES_FATAL_BANNER.to_string());
        let entries = self
            .data
            .into_iter()
            .map(|ch| {
                let state = match ch.status {
                    2 => EntryState::Error,
                    1 => EntryState::Warn,
                    _ => EntryState::Ok,
                };
                // Service names are cut to fit a grid cell.
                let name: String = ch.name.chars().take(9).collect();
                Entry::new(ch.id.0, name, ch.budget, state, ch.update.0)
            })
            .collect();
        StatusReport {
            timestamp: self.timestamp,
            overall,
            message,
            entries,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CarouselReport {
    pub timestamp: String,
    pub status: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub timing: CarouselTiming,
    #[serde(default)]
    pub streams: Vec<CarouselStream>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CarouselTiming {
    #[serde(
        default,
        rename = "overshootProtection",
        deserialize_with = "de_truthy"
    )]
    pub overshoot_protection: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CarouselStream {
    pub addr: String,
    pub port: u16,
    pub bitrate: u64,
    #[serde(default)]
    pub tdt: Option<i64>,
    #[serde(default, deserialize_with = "de_truthy")]
    pub pcr: bool,
    #[serde(default)]
    pub last: Scalar,
    #[serde(default)]
    pub files: Vec<CarouselFile>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CarouselFile {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub bitrate: u64,
    #[serde(default)]
    pub last: Scalar,
    #[serde(default, deserialize_with = "de_truthy")]
    pub tdt: bool,
    #[serde(default, deserialize_with = "de_truthy")]
    pub pcr: bool,
}

impl CarouselStream {
    pub fn key(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    /// Offset badge shown when the TDT generator drifts from the expected
    /// single insertion.
    pub fn tdt_badge(&self) -> Option<String> {
        let tdt = self.tdt?;
        if tdt > 1 {
            Some(format!("+{}", tdt - 1))
        } else if tdt < 0 {
            Some(format!("-{}", tdt - 1))
        } else {
            None
        }
    }
}

impl CarouselReport {
    pub fn overall(&self) -> OverallState {
        match self.status {
            2 => OverallState::Fatal,
            1 => OverallState::Degraded,
            _ => OverallState::Ok,
        }
    }

    /// Bar reference in bits per second: at least 1 Mbps, rounded up to a
    /// whole Mbps above the fastest stream.
    pub fn bitrate_reference(&self) -> u64 {
        let max = self
            .streams
            .iter()
            .map(|s| s.bitrate)
            .fold(1_000_000, u64::max);
        max.div_ceil(1_000_000) * 1_000_000
    }

    pub fn to_status_report(&self) -> StatusReport {
        let overall = self.overall();
        let message = (overall == OverallState::Fatal).then(|| self.message.clone());
        let entries = self
            .streams
            .iter()
            .map(|s| {
                let state = if s.tdt_badge().is_some() {
                    EntryState::Warn
                } else {
                    EntryState::Ok
                };
                let series = std::iter::once(s.bitrate as i64)
                    .chain(s.files.iter().map(|f| f.bitrate as i64))
                    .collect();
                Entry::new(
                    s.key(),
                    format!("udp://{}", s.key()),
                    series,
                    state,
                    s.last.0.clone(),
                )
            })
            .collect();
        StatusReport {
            timestamp: self.timestamp.clone(),
            overall,
            message,
            entries,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemReport {
    pub timestamp: String,
    #[serde(default, rename = "systemStart")]
    pub system_start: Option<String>,
    #[serde(default)]
    pub version: BTreeMap<String, Value>,
    pub modules: SystemModules,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemModules {
    pub epg: ModuleStatus,
    pub playout: ModuleStatus,
    pub ntp: ModuleStatus,
    pub database: ModuleStatus,
    #[serde(default)]
    pub webgrab: Option<ModuleStatus>,
    #[serde(default)]
    pub announcer: Option<ModuleStatus>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub status: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub report: serde_json::Map<String, Value>,
}

impl ModuleStatus {
    pub fn state(&self) -> EntryState {
        match self.status {
            0 => EntryState::Ok,
            1 => EntryState::Warn,
            _ => EntryState::Error,
        }
    }

    /// Scalar report fields as `key:value`, sorted by key.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut keys: Vec<&String> = self.report.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|k| match &self.report[k] {
                Value::String(s) => Some(format!("{}:{}", k, s)),
                Value::Number(n) => Some(format!("{}:{}", k, n)),
                _ => None,
            })
            .collect()
    }
}

impl SystemReport {
    /// Component versions sorted by name; missing versions show as `-`.
    pub fn version_labels(&self) -> Vec<String> {
        self.version
            .iter()
            .map(|(k, v)| {
                let no = match v {
                    Value::Null => "-".to_string(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                format!("{}: {}", k, no)
            })
            .collect()
    }

    /// Modules in display order together with whether their details are shown.
    pub fn module_rows(&self) -> Vec<(&'static str, &ModuleStatus, bool)> {
        let m = &self.modules;
        let mut rows = vec![
            ("EPG", &m.epg, false),
            ("Playout", &m.playout, true),
            ("NTP", &m.ntp, true),
            ("Database", &m.database, true),
        ];
        if let Some(w) = &m.webgrab {
            rows.push(("Webgrab", w, false));
        }
        if let Some(a) = &m.announcer {
            rows.push(("Announcer", a, true));
        }
        rows
    }
}

/// Detail record for one service. A payload without `name` is a failed lookup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub channel_id: Scalar,
    #[serde(default)]
    pub codepage: Scalar,
    #[serde(default)]
    pub language: Scalar,
    #[serde(default)]
    pub maxsegments: Scalar,
    #[serde(default)]
    pub grabber: ServiceGrabber,
    #[serde(default)]
    pub parser: Scalar,
    #[serde(default)]
    pub events: Vec<ServiceEvent>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceGrabber {
    #[serde(default)]
    pub update: Scalar,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceEvent {
    #[serde(default, rename = "timeSpan")]
    pub time_span: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

#[cfg(test)]
#[path = "../tests/model/wire_tests.rs"]
mod tests;
