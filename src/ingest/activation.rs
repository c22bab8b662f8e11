//! Post-commit activation of a scheme, and its per-sub-action report.

use serde_json::Value;

use crate::error::ConsoleError;
use crate::model::ActionResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationKind {
    /// Load the committed scheme into the scheduler.
    LoadScheme,
    /// Housekeeping that needs no staged scheme.
    Maintain,
}

impl ActivationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivationKind::LoadScheme => "loadScheme",
            ActivationKind::Maintain => "maintain",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivationOptions {
    pub stop_carousel: bool,
    pub reset_database: bool,
    pub import_scheme: bool,
    pub stop_eit: bool,
    pub delete_carousel: bool,
}

const FLAG_NAMES: [&str; 5] = [
    "stop-carousel",
    "reset-database",
    "import-scheme",
    "stop-eit",
    "delete-carousel",
];

impl ActivationOptions {
    /// Parse flags such as `stop-carousel reset-database`.
    pub fn parse<'a>(words: impl IntoIterator<Item = &'a str>) -> Result<Self, ConsoleError> {
        let mut o = Self::default();
        for w in words {
            match w {
                "stop-carousel" => o.stop_carousel = true,
                "reset-database" => o.reset_database = true,
                "import-scheme" => o.import_scheme = true,
                "stop-eit" => o.stop_eit = true,
                "delete-carousel" => o.delete_carousel = true,
                other => {
                    return Err(ConsoleError::invalid(format!(
                        "unknown activation flag `{}` (expected one of: {})",
                        other,
                        FLAG_NAMES.join(", ")
                    )));
                }
            }
        }
        Ok(o)
    }

    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        let bit = |b: bool| if b { "1" } else { "0" }.to_string();
        vec![
            ("stopCarousel", bit(self.stop_carousel)),
            ("resetDatabase", bit(self.reset_database)),
            ("importScheme", bit(self.import_scheme)),
            ("stopEIT", bit(self.stop_eit)),
            ("deleteCarousel", bit(self.delete_carousel)),
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActivationReport {
    pub results: Vec<ActionResult>,
}

impl ActivationReport {
    pub(crate) fn from_value(value: Value) -> Result<Self, ConsoleError> {
        if !value.is_array() {
            return Err(ConsoleError::malformed(
                "scheme action",
                "expected an array of results",
            ));
        }
        let results: Vec<ActionResult> =
            serde_json::from_value(value).map_err(|e| ConsoleError::malformed("scheme action", e))?;
        Ok(Self { results })
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    /// Every sub-action succeeded, and there was at least one.
    pub fn succeeded(&self) -> bool {
        !self.results.is_empty() && self.failures() == 0
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .results
            .iter()
            .map(|r| format!("{} {}", if r.success { "ok  " } else { "FAIL" }, r.message))
            .collect();
        if self.succeeded() {
            lines.push("activation complete".to_string());
        } else {
            lines.push(format!(
                "activation failed ({} of {} sub-actions)",
                self.failures().max(usize::from(self.results.is_empty())),
                self.results.len()
            ));
        }
        lines
    }
}

#[cfg(test)]
#[path = "../tests/ingest/activation_tests.rs"]
mod tests;
